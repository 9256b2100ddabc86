//! Raw low-level mouse events as seen by the hook callback.
//!
//! The OS hands the callback a pointer to a struct it owns and may reuse once the
//! callback returns. Everything the gesture logic needs is copied into
//! [`RawMouseEvent`] on entry, so nothing downstream ever borrows OS memory.

use serde::Serialize;

pub const WM_MOUSEMOVE: u32 = 0x0200;
pub const WM_LBUTTONDOWN: u32 = 0x0201;
pub const WM_LBUTTONUP: u32 = 0x0202;
pub const WM_RBUTTONDOWN: u32 = 0x0204;
pub const WM_RBUTTONUP: u32 = 0x0205;
pub const WM_MOUSEWHEEL: u32 = 0x020A;

/// `flags` bit set by the OS on events produced by SendInput/mouse_event.
pub const LLMHF_INJECTED: u32 = 0x0000_0001;

/// Message kind of one hook event.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MessageKind {
    LeftDown,
    LeftUp,
    RightDown,
    RightUp,
    Move,
    /// Wheel, middle/X buttons and anything else the gesture ignores.
    Other {
        #[serde(rename = "messageId")]
        message_id: u32,
    },
}

impl MessageKind {
    pub fn from_message_id(message_id: u32) -> Self {
        match message_id {
            WM_LBUTTONDOWN => MessageKind::LeftDown,
            WM_LBUTTONUP => MessageKind::LeftUp,
            WM_RBUTTONDOWN => MessageKind::RightDown,
            WM_RBUTTONUP => MessageKind::RightUp,
            WM_MOUSEMOVE => MessageKind::Move,
            message_id => MessageKind::Other { message_id },
        }
    }
}

/// Owned copy of the fields of the OS hook struct (`MSLLHOOKSTRUCT` on Windows).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HookData {
    pub x: i32,
    pub y: i32,
    pub mouse_data: u32,
    pub flags: u32,
    /// Milliseconds since system start.
    pub time: u32,
    pub extra_info: usize,
}

/// One physical (or injected) mouse update.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawMouseEvent {
    pub kind: MessageKind,
    pub x: i32,
    pub y: i32,
    pub ts: u32,
    pub mouse_data: u32,
    pub flags: u32,
    pub extra_info: usize,
}

impl RawMouseEvent {
    pub fn from_hook(message_id: u32, data: &HookData) -> Self {
        Self {
            kind: MessageKind::from_message_id(message_id),
            x: data.x,
            y: data.y,
            ts: data.time,
            mouse_data: data.mouse_data,
            flags: data.flags,
            extra_info: data.extra_info,
        }
    }

    /// True for events that were synthesized rather than produced by hardware.
    pub fn is_injected(&self) -> bool {
        self.flags & LLMHF_INJECTED != 0
    }
}
