use log::warn;

pub const ACCESS_TOKEN_KEY: &str = "access_token";
pub const REFRESH_TOKEN_KEY: &str = "refresh_token";

/// Where tokens from a successful signup/login end up.
pub trait CredentialStore {
    fn set_access_token(&mut self, token: &str);
    fn set_refresh_token(&mut self, token: &str);
}

/// The cookie written for the refresh token in the browser.
///
/// NOTE: browsers refuse `HttpOnly` on cookies set from script, so the attribute
/// is dropped silently. Whether the backend should set this cookie itself is an open question.
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub fn refresh_cookie(token: &str) -> String {
    let value: String = form_urlencoded::byte_serialize(token.as_bytes()).collect();
    format!("{REFRESH_TOKEN_KEY}={value}; Secure; HttpOnly; Path=/")
}

/// Stores tokens in the eframe key value storage, which is `localStorage` in the browser
/// and a ron file in the app data dir on desktop.
pub struct FrameCredentials<'a> {
    storage: Option<&'a mut (dyn eframe::Storage + 'static)>,
}

impl<'a> FrameCredentials<'a> {
    pub fn new(storage: Option<&'a mut (dyn eframe::Storage + 'static)>) -> Self {
        Self { storage }
    }

    fn set(&mut self, key: &str, value: &str) {
        match self.storage.as_mut() {
            Some(storage) => {
                storage.set_string(key, value.to_owned());
                storage.flush();
            }
            None => warn!("No persistent storage available, {key} is not kept"),
        }
    }
}

impl CredentialStore for FrameCredentials<'_> {
    fn set_access_token(&mut self, token: &str) {
        self.set(ACCESS_TOKEN_KEY, token);
    }

    #[cfg(target_arch = "wasm32")]
    fn set_refresh_token(&mut self, token: &str) {
        warn!("Setting the refresh token cookie from script, HttpOnly will not be honored");
        crate::wasm_utils::set_cookie(&refresh_cookie(token));
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn set_refresh_token(&mut self, token: &str) {
        // no cookie jar on desktop
        self.set(REFRESH_TOKEN_KEY, token);
    }
}
