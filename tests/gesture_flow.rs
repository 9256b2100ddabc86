use std::sync::mpsc::sync_channel;
use std::sync::{Arc, Mutex};

use drag_scroll_lib::gesture::response::compute_magnitude;
use drag_scroll_lib::gesture::state::Phase;
use drag_scroll_lib::hook::{HookAdapter, HookVerdict, ScrollInjector};
use drag_scroll_lib::models::config::ScaleConfig;
use drag_scroll_lib::models::events::{
    HookData, MessageKind, WM_LBUTTONDOWN, WM_LBUTTONUP, WM_MOUSEMOVE, WM_MOUSEWHEEL,
    WM_RBUTTONDOWN, WM_RBUTTONUP,
};
use drag_scroll_lib::telemetry::observer::{observation_channel, spawn_observer};

#[derive(Default)]
struct Recorder {
    deltas: Mutex<Vec<i32>>,
}

impl ScrollInjector for Recorder {
    fn inject_vertical_wheel_delta(&self, magnitude: i32) {
        self.deltas.lock().unwrap().push(magnitude);
    }
}

fn at(y: i32) -> HookData {
    HookData {
        x: 800,
        y,
        time: 1_000,
        ..HookData::default()
    }
}

#[test]
fn drag_up_then_down_scrolls_both_ways_and_release_restores_pointer() {
    let recorder = Arc::new(Recorder::default());
    let scale = ScaleConfig {
        linear: 2,
        quadratic: 1,
    };
    let mut adapter = HookAdapter::new(scale, recorder.clone(), None);

    let script = [
        (WM_LBUTTONDOWN, 400, HookVerdict::Forward),
        (WM_RBUTTONDOWN, 400, HookVerdict::Forward),
        (WM_MOUSEMOVE, 402, HookVerdict::Forward),
        (WM_MOUSEMOVE, 380, HookVerdict::Suppress),
        (WM_MOUSEMOVE, 430, HookVerdict::Suppress),
        (WM_MOUSEWHEEL, 430, HookVerdict::Forward),
        (WM_LBUTTONUP, 430, HookVerdict::Forward),
        (WM_MOUSEMOVE, 300, HookVerdict::Forward),
        (WM_RBUTTONUP, 300, HookVerdict::Forward),
    ];
    for (step, (message, y, expected)) in script.into_iter().enumerate() {
        assert_eq!(
            adapter.on_hook_event(0, message, Some(&at(y))),
            expected,
            "step {step}"
        );
    }

    assert_eq!(
        *recorder.deltas.lock().unwrap(),
        vec![
            compute_magnitude(402, 380, 2, 1),
            compute_magnitude(402, 430, 2, 1),
        ]
    );
    assert_eq!(adapter.state().phase(), Phase::Idle);
}

#[test]
fn observer_sees_events_published_by_the_adapter() {
    let (tx, rx) = observation_channel();
    let observer = spawn_observer(rx).expect("spawn observer");
    let recorder = Arc::new(Recorder::default());
    let mut adapter = HookAdapter::new(ScaleConfig::default(), recorder, Some(tx));

    adapter.on_hook_event(0, WM_LBUTTONDOWN, Some(&at(10)));
    adapter.on_hook_event(0, WM_MOUSEMOVE, Some(&at(11)));
    adapter.on_hook_event(-1, WM_MOUSEMOVE, Some(&at(12)));
    adapter.on_hook_event(0, WM_LBUTTONUP, None);
    drop(adapter);

    let summary = observer.join().expect("observer thread");
    assert_eq!(summary.left_down, 1);
    assert_eq!(summary.moves, 1);
    assert_eq!(summary.left_up, 0);
    assert_eq!(summary.total(), 2);
}

#[test]
fn observation_is_lossy_under_backpressure() {
    let (tx, rx) = sync_channel(2);
    let recorder = Arc::new(Recorder::default());
    let mut adapter = HookAdapter::new(ScaleConfig::default(), recorder, Some(tx));

    for y in 0..50 {
        adapter.on_hook_event(0, WM_MOUSEMOVE, Some(&at(y)));
    }
    let kinds: Vec<MessageKind> = rx.try_iter().map(|event| event.kind).collect();
    assert_eq!(kinds, vec![MessageKind::Move, MessageKind::Move]);
}
