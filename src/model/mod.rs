//the entry point for model
pub mod api;
pub mod auth;
pub mod outpost;

pub use api::FetchError;
pub use auth::{AuthMode, AuthResponse, Credentials};
pub use outpost::{RouteCoordinate, SpawnPoint};
