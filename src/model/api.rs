//! Everything that touches the backend: building requests, sending them, and
//! sorting the answers into data or a `FetchError`.
use serde::de::DeserializeOwned;

use super::auth::Credentials;

/// Callback invoked exactly once with the outcome of a request.
pub type OnDone = Box<dyn FnOnce(ehttp::Result<ehttp::Response>) + Send>;

/// Sends a request and calls back when it is done. The callback may run on
/// any thread, so it must not touch ui state directly.
pub trait Transport: Send + Sync {
    fn fetch(&self, request: ehttp::Request, on_done: OnDone);
}

/// Uses ehttp, which spawns a thread per request on desktop and a js promise in the browser.
pub struct EhttpTransport;

impl Transport for EhttpTransport {
    fn fetch(&self, request: ehttp::Request, on_done: OnDone) {
        ehttp::fetch(request, on_done);
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FetchError {
    /// no response at all: connection refused, dns, cors, ...
    #[error("transport failed: {0}")]
    Transport(String),
    /// the server answered with a non 2xx status and a json body
    #[error("server answered with status {status}")]
    Status { status: u16, message: Option<String> },
    /// the body was not the json we expected
    #[error("malformed response: {0}")]
    Parse(String),
}

impl FetchError {
    /// Collapse the error into the one line the user gets to see. A message from
    /// the server wins, a bare failure status gets `status_fallback` and anything
    /// that never produced valid json gets `error_fallback`.
    pub fn notice(&self, status_fallback: &str, error_fallback: &str) -> String {
        match self {
            FetchError::Status {
                message: Some(message),
                ..
            } => message.clone(),
            FetchError::Status { message: None, .. } => status_fallback.to_owned(),
            FetchError::Transport(_) | FetchError::Parse(_) => error_fallback.to_owned(),
        }
    }
}

pub const SPAWN_POINTS_PATH: &str = "outposts/fetch_spawn_points";
pub const ROUTE_COORDINATES_PATH: &str = "outposts/route_coordinates";

pub fn endpoint(backend_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        backend_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

// ehttp presets a text/plain content type and `Headers::insert` appends, so replace the set
fn with_json_header(mut request: ehttp::Request) -> ehttp::Request {
    request.headers = ehttp::Headers::new(&[
        ("Accept", "*/*"),
        ("Content-Type", "application/json"),
    ]);
    request
}

pub fn spawn_points_request(backend_url: &str) -> ehttp::Request {
    with_json_header(ehttp::Request::post(
        endpoint(backend_url, SPAWN_POINTS_PATH),
        Vec::new(),
    ))
}

pub fn route_coordinates_request(backend_url: &str) -> ehttp::Request {
    with_json_header(ehttp::Request::get(endpoint(
        backend_url,
        ROUTE_COORDINATES_PATH,
    )))
}

pub fn credentials_request(
    backend_url: &str,
    path: &str,
    credentials: &Credentials,
) -> Result<ehttp::Request, FetchError> {
    let body =
        serde_json::to_vec(credentials).map_err(|err| FetchError::Parse(err.to_string()))?;
    Ok(with_json_header(ehttp::Request::post(
        endpoint(backend_url, path),
        body,
    )))
}

/// Turn the raw outcome of a request into the expected payload.
///
/// A failure status is only reported as `Status` if its body is json, otherwise
/// it is a `Parse` error, same as a 2xx response with a broken body. Only a non-empty
/// string `message` counts as a server message.
pub fn parse_response<T>(result: ehttp::Result<ehttp::Response>) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    let response = result.map_err(FetchError::Transport)?;
    if response.ok {
        return serde_json::from_slice(&response.bytes)
            .map_err(|err| FetchError::Parse(err.to_string()));
    }

    let body: serde_json::Value = serde_json::from_slice(&response.bytes)
        .map_err(|err| FetchError::Parse(err.to_string()))?;
    let message = body
        .get("message")
        .and_then(serde_json::Value::as_str)
        .filter(|message| !message.is_empty())
        .map(str::to_owned);
    Err(FetchError::Status {
        status: response.status,
        message,
    })
}
