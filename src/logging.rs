//! Route the `log` records of this crate (and of egui/eframe) somewhere visible.
//! Desktop: stderr, filtered by `RUST_LOG` (default `info`). Browser: the js console.

#[cfg(not(target_arch = "wasm32"))]
pub fn init() {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // also installs the log -> tracing bridge
    if let Err(err) = tracing_subscriber::fmt().with_env_filter(filter).try_init() {
        eprintln!("Logging was already set up: {err}");
    }
}

#[cfg(target_arch = "wasm32")]
pub fn init() {
    console_error_panic_hook::set_once();
    _ = console_log::init_with_level(log::Level::Debug);
}
