use std::collections::{BTreeMap, HashMap};
#[cfg(not(target_arch = "wasm32"))]
use std::ffi::OsStr;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use anyhow::Context;
use log::{debug, warn};

use crate::config::Config;

/// spawn point name -> file name, relative to `Config::icon_base_url`
const BUNDLED_MANIFEST: &str = include_str!("../assets/outposts/icons.yaml");

#[cfg(not(target_arch = "wasm32"))]
const ICON_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "svg", "gif"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IconSource {
    /// an image uri the egui image loaders understand (file://, https://, bytes://)
    Image(String),
    /// the built-in red pin, for spawn points without an image
    Fallback,
}

/// How to draw a marker. All offsets are in screen points, measured from the top left of the icon.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerIcon {
    pub source: IconSource,
    pub size: egui::Vec2,
    /// the point of the icon that sits exactly on the marker position
    pub anchor: egui::Vec2,
    /// where the popup attaches, relative to the anchor
    pub popup_anchor: egui::Vec2,
    pub shadow: Option<MarkerShadow>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerShadow {
    pub size: egui::Vec2,
    pub anchor: egui::Vec2,
}

impl MarkerIcon {
    pub fn outpost(uri: String) -> Self {
        Self {
            source: IconSource::Image(uri),
            size: egui::vec2(50.0, 50.0),
            anchor: egui::vec2(16.0, 16.0),
            popup_anchor: egui::vec2(0.0, -16.0),
            shadow: Some(MarkerShadow {
                size: egui::vec2(41.0, 41.0),
                anchor: egui::vec2(12.0, 41.0),
            }),
        }
    }

    pub fn fallback() -> Self {
        Self {
            source: IconSource::Fallback,
            size: egui::vec2(25.0, 41.0),
            anchor: egui::vec2(12.0, 41.0),
            popup_anchor: egui::vec2(1.0, -34.0),
            shadow: None,
        }
    }

    /// the screen rectangle covered by the icon when its anchor is at `position`
    pub fn rect_at(&self, position: egui::Pos2) -> egui::Rect {
        egui::Rect::from_min_size(position - self.anchor, self.size)
    }
}

/// Maps spawn point names to marker images. Names without an entry get the fallback pin.
#[derive(Debug, Default, Clone)]
pub struct IconResolver {
    icons: HashMap<String, String>,
}

impl IconResolver {
    pub fn new(icons: HashMap<String, String>) -> Self {
        Self { icons }
    }

    /// Images found in `config.icon_dir` first, then the bundled manifest if there is an
    /// `icon_base_url` to load its files from, explicit `config.icons` entries on top.
    pub fn from_config(config: &Config) -> Self {
        Self::from_config_and_manifest(config, BUNDLED_MANIFEST)
    }

    fn from_config_and_manifest(config: &Config, manifest: &str) -> Self {
        let mut icons = HashMap::new();

        #[cfg(not(target_arch = "wasm32"))]
        if let Some(dir) = &config.icon_dir {
            match scan_icon_dir(dir) {
                Ok(found) => icons.extend(found),
                Err(err) => warn!("No marker icons loaded from {dir:?}: {err:?}"),
            }
        }

        if let Some(base_url) = &config.icon_base_url {
            match manifest_icons(manifest, base_url) {
                Ok(listed) => icons.extend(listed),
                Err(err) => warn!("Ignoring the bundled icon manifest: {err:?}"),
            }
        }

        icons.extend(
            config
                .icons
                .iter()
                .map(|(name, uri)| (name.clone(), uri.clone())),
        );
        debug!("{} marker icons available", icons.len());
        Self::new(icons)
    }

    pub fn resolve(&self, name: &str) -> MarkerIcon {
        match self.icons.get(name) {
            Some(uri) => MarkerIcon::outpost(uri.clone()),
            None => MarkerIcon::fallback(),
        }
    }

    pub fn len(&self) -> usize {
        self.icons.len()
    }
}

/// Parse a `name: file` yaml mapping into image uris below `base_url`.
pub fn manifest_icons(manifest: &str, base_url: &str) -> anyhow::Result<HashMap<String, String>> {
    let files: BTreeMap<String, String> =
        serde_yaml::from_str(manifest).context("Failed to parse the icon manifest")?;
    let base_url = base_url.trim_end_matches('/');
    Ok(files
        .into_iter()
        .map(|(name, file)| {
            let uri = format!("{base_url}/{}", file.trim_start_matches('/'));
            (name, uri)
        })
        .collect())
}

/// every image file in `dir`, keyed by its file stem
#[cfg(not(target_arch = "wasm32"))]
pub fn scan_icon_dir(dir: &Path) -> anyhow::Result<HashMap<String, String>> {
    let entries =
        std::fs::read_dir(dir).with_context(|| format!("Failed to read icon dir {dir:?}"))?;

    let icons = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .filter(|path| {
            path.extension()
                .and_then(OsStr::to_str)
                .is_some_and(|ext| ICON_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        })
        .filter_map(|path| {
            let stem = path.file_stem()?.to_str()?.to_owned();
            let absolute = path.canonicalize().unwrap_or(path);
            Some((stem, format!("file://{}", absolute.display())))
        })
        .collect();
    Ok(icons)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_name_gets_outpost_icon() {
        let resolver = IconResolver::new(HashMap::from([(
            "Arab Souk".to_owned(),
            "https://example.org/souk.png".to_owned(),
        )]));
        let icon = resolver.resolve("Arab Souk");
        assert_eq!(
            icon.source,
            IconSource::Image("https://example.org/souk.png".into())
        );
        assert_eq!(icon.size, egui::vec2(50.0, 50.0));
        assert_eq!(icon.anchor, egui::vec2(16.0, 16.0));
        assert_eq!(icon.popup_anchor, egui::vec2(0.0, -16.0));
    }

    #[test]
    fn unknown_name_gets_fallback_pin() {
        let resolver = IconResolver::default();
        let icon = resolver.resolve("Atlantis");
        assert_eq!(icon, MarkerIcon::fallback());
        assert_eq!(icon.source, IconSource::Fallback);
    }

    #[test]
    fn anchor_sits_on_the_position() {
        let icon = MarkerIcon::fallback();
        let rect = icon.rect_at(egui::pos2(100.0, 100.0));
        assert_eq!(rect.min, egui::pos2(88.0, 59.0));
        assert_eq!(rect.size(), egui::vec2(25.0, 41.0));
    }

    #[test]
    fn config_entries_override_scanned_ones() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Indian Bazar.png"), b"png").unwrap();
        std::fs::write(dir.path().join("Arab Souk.svg"), b"svg").unwrap();

        let mut config = Config::default();
        config.icon_dir = Some(dir.path().to_path_buf());
        config
            .icons
            .insert("Arab Souk".into(), "https://example.org/souk.png".into());

        let resolver = IconResolver::from_config(&config);
        assert_eq!(resolver.len(), 2);
        assert_eq!(
            resolver.resolve("Arab Souk").source,
            IconSource::Image("https://example.org/souk.png".into())
        );
        match resolver.resolve("Indian Bazar").source {
            IconSource::Image(uri) => {
                assert!(uri.starts_with("file://"));
                assert!(uri.ends_with("Indian Bazar.png"));
            }
            IconSource::Fallback => panic!("scanned icon was not picked up"),
        }
    }

    #[test]
    fn scan_skips_non_images() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("README.md"), b"hello").unwrap();
        std::fs::write(dir.path().join("Siberian Frontier.PNG"), b"png").unwrap();
        std::fs::create_dir(dir.path().join("nested.png")).unwrap();

        let icons = scan_icon_dir(dir.path()).unwrap();
        assert_eq!(icons.len(), 1);
        assert!(icons.contains_key("Siberian Frontier"));
    }

    #[test]
    fn manifest_files_live_below_the_base_url() {
        let icons = manifest_icons(
            "Arab Souk: souk.png\nSiberian Frontier: /north/sib.svg\n",
            "https://outposts.example.org/assets/outposts/",
        )
        .unwrap();
        assert_eq!(
            icons.get("Arab Souk").map(String::as_str),
            Some("https://outposts.example.org/assets/outposts/souk.png")
        );
        assert_eq!(
            icons.get("Siberian Frontier").map(String::as_str),
            Some("https://outposts.example.org/assets/outposts/north/sib.svg")
        );
        assert!(manifest_icons("- just\n- a list\n", "x").is_err());
    }

    #[test]
    fn bundled_manifest_parses() {
        assert!(manifest_icons(BUNDLED_MANIFEST, "https://example.org").is_ok());
    }

    #[test]
    fn manifest_is_used_without_a_file_system() {
        let mut config = Config::default();
        config.icon_dir = None;
        config.icon_base_url = Some("https://example.org/assets/outposts".into());
        config
            .icons
            .insert("Indian Bazar".into(), "https://cdn.example.org/bazar.gif".into());

        let resolver = IconResolver::from_config_and_manifest(
            &config,
            "Arab Souk: souk.png\nIndian Bazar: bazar.png\n",
        );

        assert_eq!(resolver.len(), 2);
        assert_eq!(
            resolver.resolve("Arab Souk").source,
            IconSource::Image("https://example.org/assets/outposts/souk.png".into())
        );
        assert_eq!(
            resolver.resolve("Indian Bazar").source,
            IconSource::Image("https://cdn.example.org/bazar.gif".into())
        );
        assert_eq!(resolver.resolve("Atlantis"), MarkerIcon::fallback());
    }

    #[test]
    fn manifest_needs_a_base_url() {
        let mut config = Config::default();
        config.icon_dir = None;
        let resolver = IconResolver::from_config_and_manifest(&config, "Arab Souk: souk.png\n");
        assert_eq!(resolver.len(), 0);
    }

    #[test]
    fn missing_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_icon_dir(&dir.path().join("missing")).is_err());
    }
}
