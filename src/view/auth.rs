use log::debug;
use rust_i18n::t;

use crate::credentials::CredentialStore;
use crate::message::{Generation, MessageToView};
use crate::model::{AuthMode, Credentials};
use crate::notice::Notice;
use crate::presenter::Presenter;
use crate::router::Route;

/// The signup and the login form. Both post username and password and, on success,
/// keep the tokens and move on to the landing page.
pub struct AuthPage {
    mode: AuthMode,
    generation: Generation,
    username: String,
    password: String,
    notice: Notice,
    pending: bool,
}

impl AuthPage {
    pub fn mount(mode: AuthMode, generation: Generation) -> Self {
        Self {
            mode,
            generation,
            username: String::new(),
            password: String::new(),
            notice: Notice::default(),
            pending: false,
        }
    }

    pub fn mode(&self) -> AuthMode {
        self.mode
    }

    pub fn notice(&self) -> &Notice {
        &self.notice
    }

    pub fn set_credentials(&mut self, username: &str, password: &str) {
        username.clone_into(&mut self.username);
        password.clone_into(&mut self.password);
    }

    pub fn submit(&mut self, presenter: &Presenter) {
        self.pending = true;
        presenter.authenticate(
            self.generation,
            self.mode,
            &Credentials {
                username: self.username.clone(),
                password: self.password.clone(),
            },
        );
    }

    /// Apply the answer to `submit`. Returns the page to go to on success.
    pub fn handle(
        &mut self,
        message: MessageToView,
        credentials: &mut dyn CredentialStore,
    ) -> Option<Route> {
        if message.generation() != self.generation {
            debug!("{} drops stale {message}", self.mode);
            return None;
        }
        let (mode, result) = match message {
            MessageToView::Authenticated(_, mode, result) => (mode, result),
            other => {
                debug!("{} ignores {other}", self.mode);
                return None;
            }
        };
        if mode != self.mode {
            debug!("{} ignores an answer for {mode}", self.mode);
            return None;
        }

        self.pending = false;
        match result {
            Ok(response) => {
                self.notice.set(response.message);
                if let Some(token) = &response.access_token {
                    credentials.set_access_token(token);
                }
                if let Some(token) = &response.refresh_token {
                    credentials.set_refresh_token(token);
                }
                Some(Route::Landing)
            }
            Err(err) => {
                let failed = match self.mode {
                    AuthMode::Signup => t!("notice.signup_failed"),
                    AuthMode::Login => t!("notice.login_failed"),
                };
                self.notice.set(err.notice(&failed, &t!("notice.auth_error")));
                None
            }
        }
    }

    pub fn ui(&mut self, ctx: &egui::Context, presenter: &Presenter) -> Option<Route> {
        let mut navigate = None;
        let mut submit = false;

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(ui.available_height() / 4.0);
                let (title, button, other_text, other_route) = match self.mode {
                    AuthMode::Signup => (
                        t!("auth.signup_title"),
                        t!("auth.signup_button"),
                        t!("nav.login"),
                        Route::Login,
                    ),
                    AuthMode::Login => (
                        t!("auth.login_title"),
                        t!("auth.login_button"),
                        t!("nav.signup"),
                        Route::Signup,
                    ),
                };
                ui.heading(title);
                ui.add_space(20.0);

                let username = ui.add(
                    egui::TextEdit::singleline(&mut self.username)
                        .hint_text(t!("auth.username"))
                        .desired_width(200.0),
                );
                let password = ui.add(
                    egui::TextEdit::singleline(&mut self.password)
                        .password(true)
                        .hint_text(t!("auth.password"))
                        .desired_width(200.0),
                );
                let pressed_enter = (username.lost_focus() || password.lost_focus())
                    && ui.input(|input| input.key_pressed(egui::Key::Enter));

                let clicked = ui
                    .add_enabled(!self.pending, egui::Button::new(button))
                    .clicked();
                submit = !self.pending && (clicked || pressed_enter);

                if self.pending {
                    ui.spinner();
                }
                let color = ui.visuals().text_color();
                self.notice.ui(ui, color);

                ui.add_space(10.0);
                if ui.link(other_text).clicked() {
                    navigate = Some(other_route);
                }
            });
        });

        if submit {
            self.submit(presenter);
        }
        navigate
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{mpsc, Arc};

    use super::*;
    use crate::credentials::tests::MemoryCredentials;
    use crate::credentials::{ACCESS_TOKEN_KEY, REFRESH_TOKEN_KEY};
    use crate::model::api::testing::CannedTransport;

    const SIGNUP_URL: &str = "http://backend/auth/signup";

    fn submit_signup(
        status: u16,
        body: Option<&str>,
    ) -> (AuthPage, MemoryCredentials, Option<Route>, Arc<CannedTransport>) {
        let transport = Arc::new(CannedTransport::default());
        match body {
            Some(body) => transport.respond(SIGNUP_URL, status, body),
            None => transport.fail(SIGNUP_URL, "connection refused"),
        }
        let (tx, rx) = mpsc::channel();
        let presenter = Presenter::new(
            "http://backend".into(),
            transport.clone(),
            tx,
            egui::Context::default(),
        );

        let mut page = AuthPage::mount(AuthMode::Signup, Generation::default());
        page.set_credentials("marco", "polo");
        page.submit(&presenter);

        let mut credentials = MemoryCredentials::default();
        let mut navigation = None;
        while let Ok(message) = rx.try_recv() {
            navigation = page.handle(message, &mut credentials);
        }
        (page, credentials, navigation, transport)
    }

    #[test]
    fn successful_signup_stores_tokens_and_goes_to_landing() {
        let (page, credentials, navigation, transport) = submit_signup(
            200,
            Some(r#"{"message": "User created", "access_token": "acc", "refresh_token": "ref"}"#),
        );

        assert_eq!(navigation, Some(Route::Landing));
        assert_eq!(page.notice().text(), Some("User created"));
        assert_eq!(credentials.values.get(ACCESS_TOKEN_KEY).map(String::as_str), Some("acc"));
        assert_eq!(credentials.values.get(REFRESH_TOKEN_KEY).map(String::as_str), Some("ref"));

        let sent = transport.sent.lock().unwrap();
        let body: serde_json::Value = serde_json::from_slice(&sent[0].body).unwrap();
        assert_eq!(body, serde_json::json!({"username": "marco", "password": "polo"}));
    }

    #[test]
    fn rejected_signup_stores_nothing() {
        let (page, credentials, navigation, _) =
            submit_signup(400, Some(r#"{"message": "Username already exists"}"#));

        assert_eq!(navigation, None);
        assert!(credentials.values.is_empty());
        assert_eq!(page.notice().text(), Some("Username already exists"));
    }

    #[test]
    fn rejected_signup_without_message_uses_fallback() {
        let (page, credentials, navigation, _) = submit_signup(422, Some("{}"));

        assert_eq!(navigation, None);
        assert!(credentials.values.is_empty());
        assert_eq!(page.notice().text(), Some("Signup failed"));
    }

    #[test]
    fn rejected_signup_with_empty_message_uses_fallback() {
        let (page, credentials, navigation, _) =
            submit_signup(400, Some(r#"{"message": ""}"#));

        assert_eq!(navigation, None);
        assert!(credentials.values.is_empty());
        assert_eq!(page.notice().text(), Some("Signup failed"));
    }

    #[test]
    fn network_failure_uses_generic_text() {
        let (page, credentials, navigation, _) = submit_signup(0, None);

        assert_eq!(navigation, None);
        assert!(credentials.values.is_empty());
        assert_eq!(page.notice().text(), Some("An error occurred"));
    }

    #[test]
    fn success_without_tokens_still_navigates() {
        let (_, credentials, navigation, _) =
            submit_signup(200, Some(r#"{"message": "User created successfully with ID 1"}"#));

        assert_eq!(navigation, Some(Route::Landing));
        assert!(credentials.values.is_empty());
    }

    #[test]
    fn answers_for_the_other_form_are_ignored() {
        let mut page = AuthPage::mount(AuthMode::Login, Generation::default());
        let mut credentials = MemoryCredentials::default();
        let navigation = page.handle(
            MessageToView::Authenticated(
                Generation::default(),
                AuthMode::Signup,
                Err(crate::model::FetchError::Transport("x".into())),
            ),
            &mut credentials,
        );
        assert_eq!(navigation, None);
        assert_eq!(page.notice().text(), None);
        assert_eq!(page.mode(), AuthMode::Login);
    }
}
