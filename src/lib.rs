pub mod app;
pub mod gesture;
pub mod hook;
pub mod models;
pub mod telemetry;

/// Runs the drag-to-scroll daemon until a shutdown signal arrives.
/// Returns the process exit status.
pub fn run() -> i32 {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match app::serve() {
        Ok(()) => 0,
        Err(err) => {
            log::error!("{err}");
            1
        }
    }
}
