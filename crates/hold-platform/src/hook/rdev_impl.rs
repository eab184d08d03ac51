//! rdev-backed global mouse listener.

use crate::error::PlatformError;
use crate::translate::translate_mouse;
use crossbeam_channel::Receiver;
use hold_core::PressNotifier;
use rdev::{listen, Event, EventType};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::{error, info};

/// Run the listener until the stop signal arrives.
pub(super) fn run(notifier: PressNotifier, stop_rx: Receiver<()>, running: Arc<AtomicBool>) {
    info!("mouse hook thread started (rdev)");

    let running_flag = running.clone();
    let mut last_pos = (0i32, 0i32);
    let callback = move |event: Event| {
        if stop_rx.try_recv().is_ok() {
            running_flag.store(false, Ordering::SeqCst);
        }
        if !running_flag.load(Ordering::SeqCst) {
            return;
        }

        if let EventType::MouseMove { x, y } = &event.event_type {
            last_pos = (*x as i32, *y as i32);
        }

        if let Some(notification) = translate_mouse(&event.event_type, last_pos) {
            notifier.notify(notification);
        }
    };

    if let Err(err) = listen(callback) {
        let err = PlatformError::HookFailed(format!("{:?}", err));
        error!(%err, "mouse hook error");
    }

    running.store(false, Ordering::SeqCst);
    info!("mouse hook thread exiting");
}
