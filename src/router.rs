use core::fmt;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::EnumIter;

/// Client side pages. Switching between them never talks to a server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Route {
    Signup,
    Login,
    Landing,
    Introduction,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Signup => "/signup",
            Route::Login => "/login",
            Route::Landing => "/landing",
            Route::Introduction => "/introduction",
        }
    }

    /// Map a url path to a page. `/` and anything unknown go to `root`.
    pub fn resolve(path: &str, root: Route) -> Route {
        let trimmed = path.trim_end_matches('/');
        Route::iter()
            .find(|route| route.path() == trimmed)
            .unwrap_or(root)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.path())
    }
}
