//! Turns a gesture [`Action`] into the hook return contract and the scroll injection.

use std::panic::{catch_unwind, UnwindSafe};

use tokio::runtime::Handle;

use crate::gesture::state::Action;

/// Hook return contract: forward to the next hook, or swallow the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HookVerdict {
    Forward,
    Suppress,
}

impl HookVerdict {
    /// Value the hook procedure returns when it does not forward.
    pub const SUPPRESS_RESULT: isize = 1;
}

/// Emits a synthesized vertical wheel event. Must not block the caller.
pub trait ScrollInjector: Send + Sync {
    fn inject_vertical_wheel_delta(&self, magnitude: i32);
}

pub fn apply_action(action: Action, injector: &dyn ScrollInjector) -> HookVerdict {
    match action {
        Action::PassThrough => HookVerdict::Forward,
        Action::Suppress => HookVerdict::Suppress,
        Action::SuppressAndScroll(magnitude) => {
            injector.inject_vertical_wheel_delta(magnitude);
            HookVerdict::Suppress
        }
    }
}

/// Runs one hook invocation; a panic inside it forwards the event instead of
/// unwinding into the OS.
pub fn forward_on_panic<F>(handle: F) -> HookVerdict
where
    F: FnOnce() -> HookVerdict + UnwindSafe,
{
    catch_unwind(handle).unwrap_or_else(|_| {
        log::error!("mouse hook callback panicked; forwarding event");
        HookVerdict::Forward
    })
}

/// Dispatches every injection onto the runtime's blocking pool and never joins it,
/// so the native call's latency stays off the hook thread.
pub struct RuntimeInjector {
    runtime: Handle,
    sink: fn(i32),
}

impl RuntimeInjector {
    pub fn new(runtime: Handle, sink: fn(i32)) -> Self {
        Self { runtime, sink }
    }
}

impl ScrollInjector for RuntimeInjector {
    fn inject_vertical_wheel_delta(&self, magnitude: i32) {
        let sink = self.sink;
        drop(self.runtime.spawn_blocking(move || sink(magnitude)));
    }
}
