//! Process lifecycle: load config, install the hook, wait for a shutdown signal, tear down.

use std::sync::Arc;
use std::time::Duration;

use crate::hook::{self, HookAdapter, HookError, RuntimeInjector};
use crate::models::config::{ConfigError, ScaleConfig};
use crate::telemetry::observer::{observation_channel, spawn_observer};

const RUNTIME_SHUTDOWN_GRACE: Duration = Duration::from_millis(500);

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Hook(#[from] HookError),
    #[error("failed to start async runtime: {0}")]
    Runtime(std::io::Error),
    #[error("failed to spawn observer thread: {0}")]
    Observer(std::io::Error),
    #[error("failed to listen for shutdown signal: {0}")]
    Signal(std::io::Error),
}

pub fn serve() -> Result<(), AppError> {
    let scale = ScaleConfig::from_env()?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("drag-scroll-rt")
        .build()
        .map_err(AppError::Runtime)?;

    let (observer_tx, observer_rx) = observation_channel();
    let observer = spawn_observer(observer_rx).map_err(AppError::Observer)?;

    let injector = Arc::new(RuntimeInjector::new(
        runtime.handle().clone(),
        hook::inject_vertical_wheel,
    ));
    let adapter = HookAdapter::new(scale, injector, Some(observer_tx));
    let mouse_hook = hook::install(adapter)?;

    log::info!(
        "Start capturing mouse input (linear={}, quadratic={})",
        scale.linear,
        scale.quadratic
    );

    let signal = runtime.block_on(shutdown_signal());
    match &signal {
        Ok(()) => log::info!("Received shutdown signal"),
        Err(e) => log::error!("shutdown signal listener failed: {e}"),
    }

    mouse_hook.uninstall()?;
    match observer.join() {
        Ok(summary) => log::debug!(
            "observed {} events ({} injected): {summary:?}",
            summary.total(),
            summary.injected
        ),
        Err(_) => log::warn!("observer thread panicked"),
    }
    runtime.shutdown_timeout(RUNTIME_SHUTDOWN_GRACE);

    signal.map_err(AppError::Signal)
}

#[cfg(unix)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::unix::{signal, SignalKind};

    let mut terminate = signal(SignalKind::terminate())?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res,
        _ = terminate.recv() => Ok(()),
    }
}

#[cfg(windows)]
async fn shutdown_signal() -> std::io::Result<()> {
    use tokio::signal::windows::{ctrl_break, ctrl_close};

    let mut ctrl_break = ctrl_break()?;
    let mut ctrl_close = ctrl_close()?;
    tokio::select! {
        res = tokio::signal::ctrl_c() => res,
        _ = ctrl_break.recv() => Ok(()),
        _ = ctrl_close.recv() => Ok(()),
    }
}

#[cfg(not(any(unix, windows)))]
async fn shutdown_signal() -> std::io::Result<()> {
    tokio::signal::ctrl_c().await
}
