//! OS mouse hook: event ingestion, suppression decision and the platform collaborator.

pub mod adapter;
pub mod decision;

#[cfg(target_os = "windows")]
mod win32;

pub use adapter::HookAdapter;
pub use decision::{apply_action, HookVerdict, RuntimeInjector, ScrollInjector};

/// Buffer size of the observation channel fed from the hook callback.
pub const OBSERVATION_CHANNEL_CAPACITY: usize = 100;

#[derive(Debug, thiserror::Error)]
pub enum HookError {
    #[error("failed to install mouse hook: {0}")]
    InstallFailed(String),
    #[error("failed to uninstall mouse hook: {0}")]
    UninstallFailed(String),
    #[error("failed to spawn hook thread: {0}")]
    ThreadSpawn(String),
    #[error("platform not supported: {0}")]
    UnsupportedPlatform(String),
}

/// An installed system-wide low-level mouse hook.
pub struct MouseHook {
    #[cfg(target_os = "windows")]
    inner: win32::HookThread,
}

#[cfg(target_os = "windows")]
pub fn install(adapter: HookAdapter) -> Result<MouseHook, HookError> {
    win32::install(adapter).map(|inner| MouseHook { inner })
}

#[cfg(not(target_os = "windows"))]
pub fn install(adapter: HookAdapter) -> Result<MouseHook, HookError> {
    drop(adapter);
    Err(HookError::UnsupportedPlatform(
        std::env::consts::OS.to_string(),
    ))
}

impl MouseHook {
    #[cfg(target_os = "windows")]
    pub fn uninstall(self) -> Result<(), HookError> {
        self.inner.uninstall()
    }

    #[cfg(not(target_os = "windows"))]
    pub fn uninstall(self) -> Result<(), HookError> {
        Ok(())
    }
}

/// Native vertical wheel injection used by [`RuntimeInjector`] in the binary.
#[cfg(target_os = "windows")]
pub fn inject_vertical_wheel(magnitude: i32) {
    win32::send_vertical_wheel(magnitude);
}

#[cfg(not(target_os = "windows"))]
pub fn inject_vertical_wheel(magnitude: i32) {
    log::trace!("wheel injection unavailable on this platform (delta {magnitude})");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[cfg(not(target_os = "windows"))]
    #[test]
    fn install_reports_unsupported_platform_and_closes_observer() {
        use std::sync::mpsc::sync_channel;
        use std::sync::Arc;

        use super::decision::testing::RecordingInjector;
        use crate::models::config::ScaleConfig;

        let (tx, rx) = sync_channel(OBSERVATION_CHANNEL_CAPACITY);
        let adapter = HookAdapter::new(
            ScaleConfig::default(),
            Arc::new(RecordingInjector::default()),
            Some(tx),
        );

        let err = install(adapter).err().expect("install must fail off Windows");
        assert!(matches!(err, HookError::UnsupportedPlatform(_)));
        assert!(rx.recv().is_err());
    }

    #[test]
    fn errors_render_their_cause() {
        let err = HookError::InstallFailed("access denied".to_string());
        assert_eq!(err.to_string(), "failed to install mouse hook: access denied");
    }
}
