//! Entry point of every hook invocation: copy, publish, interpret, decide.

use std::sync::mpsc::SyncSender;
use std::sync::Arc;

use crate::gesture::state::GestureState;
use crate::hook::decision::{apply_action, HookVerdict, ScrollInjector};
use crate::models::config::ScaleConfig;
use crate::models::events::{HookData, RawMouseEvent};

/// Everything the hook callback owns. Lives on the hook thread only.
pub struct HookAdapter {
    state: GestureState,
    scale: ScaleConfig,
    injector: Arc<dyn ScrollInjector>,
    observer: Option<SyncSender<RawMouseEvent>>,
}

impl HookAdapter {
    pub fn new(
        scale: ScaleConfig,
        injector: Arc<dyn ScrollInjector>,
        observer: Option<SyncSender<RawMouseEvent>>,
    ) -> Self {
        Self {
            state: GestureState::new(),
            scale,
            injector,
            observer,
        }
    }

    pub fn state(&self) -> &GestureState {
        &self.state
    }

    /// Handles one raw hook invocation. `data` is `None` when the OS passed a null
    /// event pointer; a negative `code` means the event is not ours to inspect.
    pub fn on_hook_event(
        &mut self,
        code: i32,
        message_id: u32,
        data: Option<&HookData>,
    ) -> HookVerdict {
        if code < 0 {
            return HookVerdict::Forward;
        }
        let Some(data) = data else {
            return HookVerdict::Forward;
        };

        let event = RawMouseEvent::from_hook(message_id, data);
        self.publish(event);

        let action = self.state.handle_event(&event, &self.scale);
        apply_action(action, self.injector.as_ref())
    }

    /// Best-effort copy to the observer. A full or closed channel drops the event.
    fn publish(&self, event: RawMouseEvent) {
        if let Some(tx) = &self.observer {
            tx.try_send(event).ok();
        }
    }
}
