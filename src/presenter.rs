use std::sync::{mpsc, Arc};

use log::{debug, warn};
use serde::de::DeserializeOwned;

use crate::message::{Generation, MessageToView};
use crate::model::api::{self, FetchError, Transport};
use crate::model::{AuthMode, Credentials};

/// Issues the backend requests for the view. Each request is fire-and-forget: the answer
/// comes back as a `MessageToView` through the channel, followed by a repaint request so the
/// view wakes up and drains it.
pub struct Presenter {
    backend_url: String,
    transport: Arc<dyn Transport>,
    channel_tx: mpsc::Sender<MessageToView>,
    ctx: egui::Context,
}

impl Presenter {
    pub fn new(
        backend_url: String,
        transport: Arc<dyn Transport>,
        tx: mpsc::Sender<MessageToView>,
        ctx: egui::Context,
    ) -> Self {
        Self {
            backend_url,
            transport,
            channel_tx: tx,
            ctx,
        }
    }

    pub fn fetch_spawn_points(&self, generation: Generation) {
        let request = api::spawn_points_request(&self.backend_url);
        self.dispatch(request, move |result| {
            MessageToView::SpawnPoints(generation, result)
        });
    }

    pub fn fetch_route_coordinates(&self, generation: Generation) {
        let request = api::route_coordinates_request(&self.backend_url);
        self.dispatch(request, move |result| {
            MessageToView::RouteCoordinates(generation, result)
        });
    }

    pub fn authenticate(&self, generation: Generation, mode: AuthMode, credentials: &Credentials) {
        match api::credentials_request(&self.backend_url, mode.endpoint(), credentials) {
            Ok(request) => self.dispatch(request, move |result| {
                MessageToView::Authenticated(generation, mode, result)
            }),
            Err(err) => self.send(MessageToView::Authenticated(generation, mode, Err(err))),
        }
    }

    fn dispatch<T, F>(&self, request: ehttp::Request, wrap: F)
    where
        T: DeserializeOwned + 'static,
        F: FnOnce(Result<T, FetchError>) -> MessageToView + Send + 'static,
    {
        debug!("{} {}", request.method, request.url);
        let tx = self.channel_tx.clone();
        let ctx = self.ctx.clone();
        self.transport.fetch(
            request,
            Box::new(move |result| {
                let message = wrap(api::parse_response(result));
                Self::send_with(&tx, &ctx, message);
            }),
        );
    }

    fn send(&self, message: MessageToView) {
        Self::send_with(&self.channel_tx, &self.ctx, message);
    }

    fn send_with(tx: &mpsc::Sender<MessageToView>, ctx: &egui::Context, message: MessageToView) {
        debug!("Sending {message}");
        if let Err(err) = tx.send(message) {
            // the view is gone, e.g. the window was closed while a request was in flight
            warn!("Dropping answer, nobody is listening: {}", err.0);
        }
        ctx.request_repaint();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::api::testing::CannedTransport;

    fn presenter(transport: Arc<CannedTransport>) -> (Presenter, mpsc::Receiver<MessageToView>) {
        let (tx, rx) = mpsc::channel();
        let presenter = Presenter::new(
            "http://backend".into(),
            transport,
            tx,
            egui::Context::default(),
        );
        (presenter, rx)
    }

    #[test]
    fn spawn_points_arrive_tagged_with_generation() {
        let transport = Arc::new(CannedTransport::default());
        transport.respond("http://backend/outposts/fetch_spawn_points", 200, "[]");
        let (presenter, rx) = presenter(transport.clone());

        let generation = Generation::default().next();
        presenter.fetch_spawn_points(generation);

        match rx.try_recv().unwrap() {
            MessageToView::SpawnPoints(g, Ok(points)) => {
                assert_eq!(g, generation);
                assert!(points.is_empty());
            }
            other => panic!("unexpected message {other}"),
        }
        let sent = transport.sent.lock().unwrap();
        assert_eq!(sent[0].method, "POST");
        assert!(sent[0].body.is_empty());
    }

    #[test]
    fn unreachable_backend_reports_transport_error() {
        let transport = Arc::new(CannedTransport::default());
        let (presenter, rx) = presenter(transport);

        presenter.fetch_route_coordinates(Generation::default());

        assert!(matches!(
            rx.try_recv().unwrap(),
            MessageToView::RouteCoordinates(_, Err(FetchError::Transport(_)))
        ));
    }

    #[test]
    fn login_posts_credentials_to_login_endpoint() {
        let transport = Arc::new(CannedTransport::default());
        transport.respond(
            "http://backend/auth/login",
            200,
            r#"{"message": "Login successful", "access_token": "a", "refresh_token": "r"}"#,
        );
        let (presenter, rx) = presenter(transport.clone());

        presenter.authenticate(
            Generation::default(),
            AuthMode::Login,
            &Credentials {
                username: "marco".into(),
                password: "polo".into(),
            },
        );

        match rx.try_recv().unwrap() {
            MessageToView::Authenticated(_, AuthMode::Login, Ok(response)) => {
                assert_eq!(response.access_token.as_deref(), Some("a"));
            }
            other => panic!("unexpected message {other}"),
        }
        assert_eq!(transport.sent_urls(), vec!["http://backend/auth/login"]);
    }

    #[test]
    fn answers_after_the_view_is_gone_are_dropped_quietly() {
        let transport = Arc::new(CannedTransport::default());
        transport.respond("http://backend/outposts/route_coordinates", 200, "[]");
        let (presenter, rx) = presenter(transport);
        drop(rx);

        presenter.fetch_route_coordinates(Generation::default());
    }
}
