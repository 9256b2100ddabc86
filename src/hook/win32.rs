//! WH_MOUSE_LL hook on a dedicated message-loop thread, plus SendInput wheel injection.
//!
//! The hook procedure runs on the thread that installed it, one event at a time,
//! and only while that thread pumps messages. The [`HookAdapter`] is parked in a
//! thread-local there, so the callback owns it exclusively.

use std::cell::RefCell;
use std::sync::mpsc::{self, RecvTimeoutError, SyncSender};
use std::thread::JoinHandle;
use std::time::Duration;

use ::windows::Win32::Foundation::{HINSTANCE, HWND, LPARAM, LRESULT, WPARAM};
use ::windows::Win32::System::Threading::GetCurrentThreadId;
use ::windows::Win32::UI::Input::KeyboardAndMouse::{
    SendInput, INPUT, INPUT_0, INPUT_MOUSE, MOUSEEVENTF_WHEEL, MOUSEINPUT,
};
use ::windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PostThreadMessageW, SetWindowsHookExW,
    TranslateMessage, UnhookWindowsHookEx, HHOOK, MSG, MSLLHOOKSTRUCT, WH_MOUSE_LL, WM_QUIT,
};

use super::adapter::HookAdapter;
use super::decision::{forward_on_panic, HookVerdict};
use super::HookError;
use crate::models::events::HookData;

const INSTALL_TIMEOUT: Duration = Duration::from_secs(2);

// ─── Hook thread ──────────────────────────────────────────────────────────────

thread_local! {
    static ADAPTER: RefCell<Option<HookAdapter>> = RefCell::new(None);
}

pub struct HookThread {
    thread_id: u32,
    join_handle: JoinHandle<()>,
}

pub fn install(adapter: HookAdapter) -> Result<HookThread, HookError> {
    let (ready_tx, ready_rx) = mpsc::sync_channel::<Result<u32, HookError>>(1);

    let join_handle = std::thread::Builder::new()
        .name("drag-scroll-hook".to_string())
        .spawn(move || run_hook_thread(adapter, ready_tx))
        .map_err(|e| HookError::ThreadSpawn(e.to_string()))?;

    match ready_rx.recv_timeout(INSTALL_TIMEOUT) {
        Ok(Ok(thread_id)) => Ok(HookThread {
            thread_id,
            join_handle,
        }),
        Ok(Err(err)) => {
            let _ = join_handle.join();
            Err(err)
        }
        // The thread notices the dropped receiver and unhooks itself.
        Err(RecvTimeoutError::Timeout) => Err(HookError::InstallFailed(
            "timed out waiting for the hook thread".to_string(),
        )),
        Err(RecvTimeoutError::Disconnected) => {
            let _ = join_handle.join();
            Err(HookError::InstallFailed(
                "hook thread exited during startup".to_string(),
            ))
        }
    }
}

impl HookThread {
    /// Stops the message loop; the hook thread unhooks before exiting.
    pub fn uninstall(self) -> Result<(), HookError> {
        unsafe { PostThreadMessageW(self.thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) }
            .map_err(|e| HookError::UninstallFailed(e.to_string()))?;
        self.join_handle
            .join()
            .map_err(|_| HookError::UninstallFailed("hook thread panicked".to_string()))
    }
}

fn run_hook_thread(adapter: HookAdapter, ready_tx: SyncSender<Result<u32, HookError>>) {
    ADAPTER.with(|cell| *cell.borrow_mut() = Some(adapter));

    let hook = match unsafe {
        SetWindowsHookExW(WH_MOUSE_LL, Some(mouse_hook_proc), HINSTANCE::default(), 0)
    } {
        Ok(hook) => hook,
        Err(err) => {
            release_adapter();
            ready_tx
                .send(Err(HookError::InstallFailed(err.to_string())))
                .ok();
            return;
        }
    };

    let thread_id = unsafe { GetCurrentThreadId() };
    if ready_tx.send(Ok(thread_id)).is_ok() {
        log::debug!("low-level mouse hook installed on thread {thread_id}");
        pump_messages();
    }

    if let Err(err) = unsafe { UnhookWindowsHookEx(hook) } {
        log::warn!("UnhookWindowsHookEx failed: {err}");
    }
    release_adapter();
}

fn pump_messages() {
    let mut msg = MSG::default();
    // GetMessageW returns -1 on error and 0 on WM_QUIT.
    while unsafe { GetMessageW(&mut msg, HWND::default(), 0, 0) }.0 > 0 {
        unsafe {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

/// Drops the adapter and with it the observation sender, closing the channel.
fn release_adapter() {
    ADAPTER.with(|cell| cell.borrow_mut().take());
}

// ─── Callback ────────────────────────────────────────────────────────────────

unsafe extern "system" fn mouse_hook_proc(code: i32, wparam: WPARAM, lparam: LPARAM) -> LRESULT {
    let verdict = forward_on_panic(move || {
        let data = if code < 0 || lparam.0 == 0 {
            None
        } else {
            let raw = &*(lparam.0 as *const MSLLHOOKSTRUCT);
            Some(HookData {
                x: raw.pt.x,
                y: raw.pt.y,
                mouse_data: raw.mouseData as u32,
                flags: raw.flags as u32,
                time: raw.time as u32,
                extra_info: raw.dwExtraInfo as usize,
            })
        };

        ADAPTER.with(|cell| match cell.try_borrow_mut() {
            Ok(mut slot) => match slot.as_mut() {
                Some(adapter) => adapter.on_hook_event(code, wparam.0 as u32, data.as_ref()),
                None => HookVerdict::Forward,
            },
            Err(_) => HookVerdict::Forward,
        })
    });

    match verdict {
        HookVerdict::Suppress => LRESULT(HookVerdict::SUPPRESS_RESULT),
        HookVerdict::Forward => CallNextHookEx(HHOOK::default(), code, wparam, lparam),
    }
}

// ─── Injection ───────────────────────────────────────────────────────────────

/// Injects one vertical wheel event with `magnitude` as its wheel delta.
pub fn send_vertical_wheel(magnitude: i32) {
    let input = [INPUT {
        r#type: INPUT_MOUSE,
        Anonymous: INPUT_0 {
            mi: MOUSEINPUT {
                dx: 0,
                dy: 0,
                mouseData: magnitude as _,
                dwFlags: MOUSEEVENTF_WHEEL,
                time: 0,
                dwExtraInfo: 0,
            },
        },
    }];
    let sent = unsafe { SendInput(&input, std::mem::size_of::<INPUT>() as i32) };
    if sent == 0 {
        log::trace!("SendInput rejected wheel delta {magnitude}");
    }
}
