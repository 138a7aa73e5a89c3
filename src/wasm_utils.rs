use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
/// some utility functions that are required for routing and cookies on wasm
use web_sys;

/// the path part of the current url, e.g. `/landing`
pub fn current_path() -> Option<String> {
    web_sys::window().and_then(|w| w.location().pathname().ok())
}

/// Push the given path onto the browser history, so back/forward and reloads keep the page.
pub fn set_current_path(path: &str) {
    with_history(path, |history| {
        // args: state object, title (ignored), url (must be same-origin)
        history.push_state_with_url(&JsValue::NULL, "", Some(path))
    });
}

/// like `set_current_path`, without adding a history entry. Used for redirects.
pub fn replace_current_path(path: &str) {
    with_history(path, |history| {
        history.replace_state_with_url(&JsValue::NULL, "", Some(path))
    });
}

fn with_history(path: &str, update: impl FnOnce(&web_sys::History) -> Result<(), JsValue>) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Ok(history) = window.history() else {
        warn!("No history object, the url will not follow navigation");
        return;
    };
    if let Err(err) = update(&history) {
        warn!("Failed to update the url to {path}: {err:?}");
    }
}

fn query_param(name: &str) -> Option<String> {
    let search = web_sys::window().and_then(|w| w.location().search().ok())?;
    let params = web_sys::UrlSearchParams::new_with_str(&search).ok()?;
    params.get(name).filter(|value| !value.is_empty())
}

/// `?backend=https://...` in the page url overrides the configured backend
pub fn backend_url_param() -> Option<String> {
    query_param("backend")
}

/// `?icons=https://...` points the bundled icon manifest at another host
pub fn icon_base_url_param() -> Option<String> {
    query_param("icons")
}

/// scheme, host and port of the page, e.g. `https://outposts.example.org`
pub fn origin() -> Option<String> {
    web_sys::window().and_then(|w| w.location().origin().ok())
}

pub fn set_cookie(cookie: &str) {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.dyn_into::<web_sys::HtmlDocument>().ok());
    match document {
        Some(document) => {
            if let Err(err) = document.set_cookie(cookie) {
                warn!("Failed to set cookie: {err:?}");
            }
        }
        None => warn!("No html document, cookie not set"),
    }
}
