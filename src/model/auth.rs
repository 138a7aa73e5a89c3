use core::fmt;

use serde::{Deserialize, Serialize};

/// Which of the two credential endpoints a form talks to. Both share the same
/// request and response bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthMode {
    Signup,
    Login,
}

impl AuthMode {
    pub fn endpoint(self) -> &'static str {
        match self {
            AuthMode::Signup => "auth/signup",
            AuthMode::Login => "auth/login",
        }
    }
}

impl fmt::Display for AuthMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AuthMode::Signup => write!(f, "Signup"),
            AuthMode::Login => write!(f, "Login"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Success body of `/auth/signup` and `/auth/login`. The signup endpoint of
/// some backend versions only answers with a message, so the tokens are optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct AuthResponse {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_serialize_as_username_password() {
        let body = serde_json::to_value(Credentials {
            username: "marco".into(),
            password: "polo".into(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({"username": "marco", "password": "polo"}));
    }

    #[test]
    fn tokens_are_optional() {
        let response: AuthResponse =
            serde_json::from_str(r#"{"message": "User created successfully with ID 7"}"#).unwrap();
        assert_eq!(response.message, "User created successfully with ID 7");
        assert!(response.access_token.is_none());
        assert!(response.refresh_token.is_none());
    }
}
