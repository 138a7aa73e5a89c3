use core::fmt;

use crate::model::{AuthMode, AuthResponse, FetchError, RouteCoordinate, SpawnPoint};

// This is a file for the messages passed from the request callbacks to the view.
// The callbacks run wherever the http backend decides, the channel brings the results
// back onto the ui thread.

/// Every page mount gets a fresh generation. Answers are tagged with the generation
/// of the page that asked, so a page can drop answers meant for a previous mount.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Generation(u64);

impl Generation {
    #[must_use]
    pub fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

impl fmt::Display for Generation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[allow(clippy::module_name_repetitions)]
#[derive(Debug)]
pub enum MessageToView {
    SpawnPoints(Generation, Result<Vec<SpawnPoint>, FetchError>),
    RouteCoordinates(Generation, Result<Vec<RouteCoordinate>, FetchError>),
    Authenticated(Generation, AuthMode, Result<AuthResponse, FetchError>),
}

impl MessageToView {
    pub fn generation(&self) -> Generation {
        match self {
            MessageToView::SpawnPoints(generation, _)
            | MessageToView::RouteCoordinates(generation, _)
            | MessageToView::Authenticated(generation, _, _) => *generation,
        }
    }
}

impl fmt::Display for MessageToView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageToView::SpawnPoints(generation, Ok(points)) => write!(
                f,
                "MessageToView::SpawnPoints({generation}, {} spawn points)",
                points.len()
            ),
            MessageToView::SpawnPoints(generation, Err(err)) => {
                write!(f, "MessageToView::SpawnPoints({generation}, {err})")
            }
            MessageToView::RouteCoordinates(generation, Ok(routes)) => write!(
                f,
                "MessageToView::RouteCoordinates({generation}, {} routes)",
                routes.len()
            ),
            MessageToView::RouteCoordinates(generation, Err(err)) => {
                write!(f, "MessageToView::RouteCoordinates({generation}, {err})")
            }
            // never log tokens
            MessageToView::Authenticated(generation, mode, Ok(_)) => {
                write!(f, "MessageToView::Authenticated({generation}, {mode}, Ok)")
            }
            MessageToView::Authenticated(generation, mode, Err(err)) => {
                write!(f, "MessageToView::Authenticated({generation}, {mode}, {err})")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generations_increase() {
        let first = Generation::default();
        let second = first.next();
        assert!(second > first);
        assert_ne!(second, second.next());
    }

    #[test]
    fn display_does_not_leak_tokens() {
        let message = MessageToView::Authenticated(
            Generation::default(),
            AuthMode::Signup,
            Ok(AuthResponse {
                message: "ok".into(),
                access_token: Some("secret-access".into()),
                refresh_token: Some("secret-refresh".into()),
            }),
        );
        let text = message.to_string();
        assert!(!text.contains("secret"));
        assert_eq!(text, "MessageToView::Authenticated(#0, Signup, Ok)");
    }
}
