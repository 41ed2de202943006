//! Logging initialization and utilities

/// Initialize the logging system
///
/// Uses env_logger with default filter level of `info`.
/// Override with RUST_LOG environment variable. The library itself never
/// calls this; hosts embedding the pipeline do.
///
/// # Example
/// ```no_run
/// treeshade::core::logging::init();
/// log::info!("Shadow pipeline started");
/// ```
pub fn init() {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    ).init();
}

/// Like [`init`], but safe to call more than once (used by tests and
/// embedders that may have installed a logger already).
pub fn try_init() -> bool {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info")
    )
    .try_init()
    .is_ok()
}
