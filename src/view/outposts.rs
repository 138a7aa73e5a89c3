use log::debug;
use rust_i18n::t;

use crate::fetcher::{FetchState, RemoteCollection};
use crate::icons::IconResolver;
use crate::message::{Generation, MessageToView};
use crate::model::{RouteCoordinate, SpawnPoint};
use crate::notice::Notice;
use crate::presenter::Presenter;
use crate::router::Route;
use crate::selection::SpawnSelection;

use super::data::CanvasData;
use super::map::MapClick;

/// What an outpost page shows and which collections it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    pub route: Route,
    /// the scrollable list of spawn points with their details
    pub show_list: bool,
    /// fetch and draw the trade routes
    pub show_routes: bool,
    /// welcome text and links to signup/login
    pub show_intro: bool,
}

impl PageLayout {
    pub const LANDING: Self = Self {
        route: Route::Landing,
        show_list: true,
        show_routes: false,
        show_intro: false,
    };

    pub const INTRODUCTION: Self = Self {
        route: Route::Introduction,
        show_list: false,
        show_routes: true,
        show_intro: true,
    };

    fn title(self) -> String {
        match self.route {
            Route::Landing => t!("landing.title"),
            _ => t!("introduction.title"),
        }
    }
}

/// A page listing spawn points on a map. Everything it knows is fetched once when
/// it is mounted and dropped when the user navigates away.
pub struct OutpostPage {
    layout: PageLayout,
    generation: Generation,
    pub(super) spawn_points: RemoteCollection<SpawnPoint>,
    pub(super) routes: RemoteCollection<RouteCoordinate>,
    pub(super) selection: SpawnSelection,
    notice: Notice,
    pub(super) canvas: Option<CanvasData>,
    /// id of the spawn point whose popup is open on the map
    pub(super) popup: Option<String>,
}

impl OutpostPage {
    /// Create the page and send one request per collection it needs.
    pub fn mount(layout: PageLayout, generation: Generation, presenter: &Presenter) -> Self {
        let mut page = Self {
            layout,
            generation,
            spawn_points: RemoteCollection::default(),
            routes: RemoteCollection::default(),
            selection: SpawnSelection::default(),
            notice: Notice::default(),
            canvas: None,
            popup: None,
        };
        if page.spawn_points.start() {
            presenter.fetch_spawn_points(generation);
        }
        if layout.show_routes && page.routes.start() {
            presenter.fetch_route_coordinates(generation);
        }
        page
    }

    pub fn layout(&self) -> PageLayout {
        self.layout
    }

    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    pub fn selection(&self) -> &SpawnSelection {
        &self.selection
    }

    pub fn spawn_points(&self) -> &RemoteCollection<SpawnPoint> {
        &self.spawn_points
    }

    pub fn routes(&self) -> &RemoteCollection<RouteCoordinate> {
        &self.routes
    }

    pub fn is_loading(&self) -> bool {
        self.spawn_points.state() == FetchState::Fetching
            || self.routes.state() == FetchState::Fetching
    }

    /// Apply an answer. Answers for another mount are dropped, each collection
    /// reports its own failure through the notice.
    pub fn handle(&mut self, message: MessageToView) {
        if message.generation() != self.generation {
            debug!("{} drops stale {message}", self.layout.route);
            return;
        }
        match message {
            MessageToView::SpawnPoints(_, result) => {
                if let Err(err) = self.spawn_points.resolve(result) {
                    self.notice.set(err.notice(
                        &t!("notice.spawn_points_failed"),
                        &t!("notice.spawn_points_error"),
                    ));
                }
            }
            MessageToView::RouteCoordinates(_, result) => {
                if let Err(err) = self.routes.resolve(result) {
                    self.notice.set(err.notice(
                        &t!("notice.routes_failed"),
                        &t!("notice.routes_error"),
                    ));
                }
            }
            message @ MessageToView::Authenticated(..) => {
                debug!("{} ignores {message}", self.layout.route);
            }
        }
    }

    /// select the spawn point at `index` of the fetched list
    pub fn select(&mut self, index: usize) {
        if let Some(point) = self.spawn_points.items().get(index) {
            self.selection.select(point, &mut self.notice);
        }
    }

    /// A marker click selects its spawn point and opens its popup, a click
    /// next to the markers closes the popup and keeps the selection.
    pub(super) fn click_map(&mut self, click: MapClick) {
        match click {
            MapClick::Marker(index) => {
                self.popup = self
                    .spawn_points
                    .items()
                    .get(index)
                    .map(|point| point.id.clone());
                self.select(index);
            }
            MapClick::Background => self.popup = None,
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context, icons: &IconResolver) -> Option<Route> {
        let mut navigate = None;
        let mut clicked = None;

        egui::TopBottomPanel::top("outpost header").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(self.layout.title());
                if self.layout.show_intro {
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button(t!("nav.login")).clicked() {
                            navigate = Some(Route::Login);
                        }
                        if ui.button(t!("nav.signup")).clicked() {
                            navigate = Some(Route::Signup);
                        }
                    });
                }
            });
            if self.layout.show_intro {
                ui.label(t!("introduction.description"));
            }
            ui.horizontal(|ui| {
                if self.is_loading() {
                    ui.spinner();
                }
                self.notice.ui(ui, egui::Color32::GOLD);
            });
        });

        if self.layout.show_list {
            egui::SidePanel::left("spawn point list")
                .resizable(true)
                .default_width(320.0)
                .show(ctx, |ui| {
                    clicked = self.ui_list(ui);
                });
        }

        let mut map_click = None;
        egui::CentralPanel::default().show(ctx, |ui| {
            map_click = self.ui_map(ui, icons);
        });

        if let Some(index) = clicked {
            self.select(index);
        }
        if let Some(click) = map_click {
            self.click_map(click);
        }
        navigate
    }

    fn ui_list(&self, ui: &mut egui::Ui) -> Option<usize> {
        let mut clicked = None;
        let spawn_points = self.spawn_points.items();
        egui::ScrollArea::vertical().show(ui, |ui| {
            for (index, point) in spawn_points.iter().enumerate() {
                let selected = self.selection.is_selected(point);
                let label = egui::RichText::new(&point.name).strong().size(18.0);
                if ui.selectable_label(selected, label).clicked() {
                    clicked = Some(index);
                }
                for (name, value) in point.detail_rows() {
                    ui.horizontal_wrapped(|ui| {
                        ui.strong(name);
                        ui.label(value);
                    });
                }
                ui.separator();
            }
        });
        clicked
    }
}
