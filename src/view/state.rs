use crate::message::Generation;
use crate::model::AuthMode;
use crate::presenter::Presenter;
use crate::router::Route;

use super::auth::AuthPage;
use super::outposts::{OutpostPage, PageLayout};

/// The page that is currently mounted. Dropping it unmounts it.
pub enum State {
    Auth(AuthPage),
    Outposts(OutpostPage),
}

impl State {
    /// Mount the page for `route`. Pages that need data start fetching right away.
    pub fn mount(route: Route, generation: Generation, presenter: &Presenter) -> Self {
        match route {
            Route::Signup => State::Auth(AuthPage::mount(AuthMode::Signup, generation)),
            Route::Login => State::Auth(AuthPage::mount(AuthMode::Login, generation)),
            Route::Landing => State::Outposts(OutpostPage::mount(
                PageLayout::LANDING,
                generation,
                presenter,
            )),
            Route::Introduction => State::Outposts(OutpostPage::mount(
                PageLayout::INTRODUCTION,
                generation,
                presenter,
            )),
        }
    }

    pub fn route(&self) -> Route {
        match self {
            State::Auth(page) => match page.mode() {
                AuthMode::Signup => Route::Signup,
                AuthMode::Login => Route::Login,
            },
            State::Outposts(page) => page.layout().route,
        }
    }
}

impl std::fmt::Debug for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "State({})", self.route())
    }
}
