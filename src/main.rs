#![warn(clippy::pedantic)]
// hide the cmd when opening the exe on windows, see: https://github.com/emilk/egui/issues/116
#![windows_subsystem = "windows"]

mod config;
mod credentials;
mod fetcher;
mod icons;
mod logging;
mod message;
mod model;
mod notice;
mod presenter;
mod router;
mod selection;
mod view;
#[cfg(target_arch = "wasm32")]
mod wasm_utils;

use config::Config;
#[cfg(not(target_arch = "wasm32"))]
use rust_i18n::t;
use view::View;

rust_i18n::i18n!("locales");

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    logging::init();
    let config = Config::load();

    let title = t!("app.title");
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(title.clone())
            .with_inner_size([1200.0, 800.0]),
        ..Default::default()
    };
    eframe::run_native(
        &title,
        native_options,
        Box::new(move |cc| Box::new(View::new(cc, &config))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {
    logging::init();
    let config = Config::load();

    wasm_bindgen_futures::spawn_local(async move {
        let start_result = eframe::WebRunner::new()
            .start(
                "the_canvas_id",
                eframe::WebOptions::default(),
                Box::new(move |cc| Box::new(View::new(cc, &config))),
            )
            .await;
        if let Err(err) = start_result {
            log::error!("Failed to start eframe: {err:?}");
        }
    });
}

#[cfg(test)]
mod tests {
    use rust_i18n::t;

    #[test]
    fn window_title_is_translated() {
        assert_eq!(t!("app.title"), "Trading Outpost");
    }

    #[test]
    fn notice_texts_are_translated() {
        assert_eq!(t!("notice.signup_failed"), "Signup failed");
        assert_eq!(t!("notice.auth_error"), "An error occurred");
        assert_eq!(
            t!("notice.selected", name = "Arab Souk"),
            "You have selected: Arab Souk"
        );
    }
}
