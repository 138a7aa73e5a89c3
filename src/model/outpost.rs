use rust_i18n::t;
use serde::{Deserialize, Serialize};

/// A selectable starting outpost, as sent by `/outposts/fetch_spawn_points`.
/// The client never mutates these, it only replaces the whole list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpawnPoint {
    pub id: String,
    /// display label, and the key for the marker icon
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub description: String,
    pub culture: String,
    pub gold_bonus: f64,
    pub reputation_bonus: f64,
    pub language: Vec<String>,
    pub population: u64,

    // the backend sends these as well, but older deployments don't
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub era: Option<String>,
    #[serde(default)]
    pub economy_type: Option<String>,
    #[serde(default)]
    pub climate: Option<String>,
    #[serde(default)]
    pub trade_routes: Vec<String>,
}

impl SpawnPoint {
    /// Label/value pairs shown in the landing list and the map popup.
    /// Values are the record fields verbatim, lists joined by ", ".
    pub fn detail_rows(&self) -> Vec<(String, String)> {
        let mut rows = vec![
            (t!("spawn_point.description"), self.description.clone()),
            (t!("spawn_point.culture"), self.culture.clone()),
            (t!("spawn_point.gold_bonus"), self.gold_bonus.to_string()),
            (
                t!("spawn_point.reputation_bonus"),
                self.reputation_bonus.to_string(),
            ),
            (t!("spawn_point.languages"), self.language.join(", ")),
            (t!("spawn_point.population"), self.population.to_string()),
        ];

        let optional = [
            (t!("spawn_point.region"), &self.region),
            (t!("spawn_point.era"), &self.era),
            (t!("spawn_point.economy_type"), &self.economy_type),
            (t!("spawn_point.climate"), &self.climate),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                rows.push((label, value.clone()));
            }
        }
        if !self.trade_routes.is_empty() {
            rows.push((t!("spawn_point.trade_routes"), self.trade_routes.join(", ")));
        }
        rows
    }

    /// position on the map canvas. x grows eastwards, y grows southwards
    #[allow(clippy::cast_possible_truncation)]
    pub fn world_position(&self) -> egui::Vec2 {
        egui::vec2(self.longitude as f32, -self.latitude as f32)
    }
}

/// One trade route polyline from `/outposts/route_coordinates`, a list of `[lat, lon]` pairs.
/// There is no minimum length, a route with less than two points is simply not drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteCoordinate {
    pub route: Vec<[f64; 2]>,
}

impl RouteCoordinate {
    #[allow(clippy::cast_possible_truncation)]
    pub fn world_positions(&self) -> impl Iterator<Item = egui::Vec2> + '_ {
        self.route
            .iter()
            .map(|[lat, lon]| egui::vec2(*lon as f32, -*lat as f32))
    }
}
