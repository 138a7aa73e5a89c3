mod auth;
mod data;
mod map;
mod outposts;
pub(crate) mod state;

use std::sync::{mpsc, Arc};

use log::{debug, info};

use crate::config::Config;
use crate::credentials::{CredentialStore, FrameCredentials};
use crate::icons::IconResolver;
use crate::message::{Generation, MessageToView};
use crate::model::api::EhttpTransport;
use crate::presenter::Presenter;
use crate::router::Route;
use crate::view::state::State;

pub struct View {
    ui_state: State,
    /// bumped on every navigation, answers carrying an older one are dropped
    generation: Generation,
    #[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
    root: Route,
    presenter: Presenter,
    icons: IconResolver,
    channel_presenter_rx: mpsc::Receiver<MessageToView>,
}

impl View {
    pub fn new(cc: &eframe::CreationContext<'_>, config: &Config) -> Self {
        egui_extras::install_image_loaders(&cc.egui_ctx);

        let (tx, rx) = mpsc::channel();
        let presenter = Presenter::new(
            config.backend_url.clone(),
            Arc::new(EhttpTransport),
            tx,
            cc.egui_ctx.clone(),
        );
        let icons = IconResolver::from_config(config);
        info!(
            "Backend at {}, {} outpost icons",
            config.backend_url,
            icons.len()
        );

        Self::with_presenter(presenter, rx, icons, config.root_redirect)
    }

    fn with_presenter(
        presenter: Presenter,
        rx: mpsc::Receiver<MessageToView>,
        icons: IconResolver,
        root: Route,
    ) -> Self {
        let route = initial_route(root);
        let generation = Generation::default();
        Self {
            ui_state: State::mount(route, generation, &presenter),
            generation,
            root,
            presenter,
            icons,
            channel_presenter_rx: rx,
        }
    }

    pub fn route(&self) -> Route {
        self.ui_state.route()
    }

    /// Unmount the current page and mount the one for `route`.
    pub fn navigate(&mut self, route: Route) {
        #[cfg(target_arch = "wasm32")]
        crate::wasm_utils::set_current_path(route.path());
        self.remount(route);
    }

    fn remount(&mut self, route: Route) {
        self.generation = self.generation.next();
        debug!("{} -> {route} ({})", self.route(), self.generation);
        self.ui_state = State::mount(route, self.generation, &self.presenter);
    }

    /// Hand every queued answer to the mounted page and follow the navigation it asks for.
    pub fn process_messages(&mut self, credentials: &mut dyn CredentialStore) {
        let mut navigate = None;
        while let Ok(message) = self.channel_presenter_rx.try_recv() {
            debug!("Received {message}");
            match &mut self.ui_state {
                State::Auth(page) => {
                    if let Some(route) = page.handle(message, credentials) {
                        navigate = Some(route);
                    }
                }
                State::Outposts(page) => page.handle(message),
            }
        }
        if let Some(route) = navigate {
            self.navigate(route);
        }
    }

    /// The browser back and forward buttons change the url without telling us.
    #[cfg(target_arch = "wasm32")]
    fn follow_url(&mut self) {
        if let Some(path) = crate::wasm_utils::current_path() {
            let route = Route::resolve(&path, self.root);
            if route != self.route() {
                self.remount(route);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn initial_route(root: Route) -> Route {
    Route::resolve("/", root)
}

#[cfg(target_arch = "wasm32")]
fn initial_route(root: Route) -> Route {
    let path = crate::wasm_utils::current_path().unwrap_or_default();
    let route = Route::resolve(&path, root);
    if path != route.path() {
        crate::wasm_utils::replace_current_path(route.path());
    }
    route
}

impl eframe::App for View {
    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        #[cfg(target_arch = "wasm32")]
        self.follow_url();

        self.process_messages(&mut FrameCredentials::new(frame.storage_mut()));

        let navigate = match &mut self.ui_state {
            State::Auth(page) => page.ui(ctx, &self.presenter),
            State::Outposts(page) => page.ui(ctx, &self.icons),
        };
        if let Some(route) = navigate {
            self.navigate(route);
        }
    }
}
