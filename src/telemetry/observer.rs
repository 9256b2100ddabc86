//! Consumer side of the observation channel.
//!
//! The hook callback `try_send`s a copy of every event it sees. This thread drains
//! them, traces each one as a JSON line and tallies them per kind. It exits once
//! every sender is gone (the hook thread drops its adapter on uninstall) and
//! hands back the tally through its `JoinHandle`.

use std::sync::mpsc::{sync_channel, Receiver, SyncSender};
use std::thread::JoinHandle;

use serde::Serialize;

use crate::hook::OBSERVATION_CHANNEL_CAPACITY;
use crate::models::events::{MessageKind, RawMouseEvent};

// ─── Summary ─────────────────────────────────────────────────────────────────

/// Per-kind counts of everything the observer received.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ObservationSummary {
    pub left_down: u64,
    pub left_up: u64,
    pub right_down: u64,
    pub right_up: u64,
    pub moves: u64,
    pub other: u64,
    pub injected: u64,
}

impl ObservationSummary {
    pub fn record(&mut self, event: &RawMouseEvent) {
        let counter = match event.kind {
            MessageKind::LeftDown => &mut self.left_down,
            MessageKind::LeftUp => &mut self.left_up,
            MessageKind::RightDown => &mut self.right_down,
            MessageKind::RightUp => &mut self.right_up,
            MessageKind::Move => &mut self.moves,
            MessageKind::Other { .. } => &mut self.other,
        };
        *counter += 1;
        if event.is_injected() {
            self.injected += 1;
        }
    }

    pub fn total(&self) -> u64 {
        self.left_down + self.left_up + self.right_down + self.right_up + self.moves + self.other
    }
}

// ─── Consumer thread ─────────────────────────────────────────────────────────

pub fn observation_channel() -> (SyncSender<RawMouseEvent>, Receiver<RawMouseEvent>) {
    sync_channel(OBSERVATION_CHANNEL_CAPACITY)
}

pub fn spawn_observer(
    rx: Receiver<RawMouseEvent>,
) -> std::io::Result<JoinHandle<ObservationSummary>> {
    std::thread::Builder::new()
        .name("drag-scroll-observer".to_string())
        .spawn(move || drain(rx))
}

fn drain(rx: Receiver<RawMouseEvent>) -> ObservationSummary {
    let mut summary = ObservationSummary::default();
    for event in rx {
        if log::log_enabled!(log::Level::Trace) {
            match serde_json::to_string(&event) {
                Ok(line) => log::trace!("{line}"),
                Err(e) => log::trace!("unserializable event {event:?}: {e}"),
            }
        }
        summary.record(&event);
    }
    summary
}
