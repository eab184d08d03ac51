//! Global mouse hook feeding a press driver.
//!
//! Uses rdev's global listener on all platforms. The hook thread tracks
//! the cursor position and forwards canonical notifications into a
//! [`PressNotifier`].

use crossbeam_channel::{bounded, Sender};
use hold_core::PressNotifier;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

mod rdev_impl;

/// Handle to control the mouse hook.
pub struct MouseHookHandle {
    stop_tx: Sender<()>,
    running: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl MouseHookHandle {
    /// Signal the hook to stop forwarding events.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        let _ = self.stop_tx.send(());
    }

    /// Check if the hook is still forwarding events.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
            && self.thread.as_ref().map_or(false, |t| !t.is_finished())
    }
}

impl Drop for MouseHookHandle {
    fn drop(&mut self) {
        self.stop();
        // Take the thread handle but don't join it - the listener blocks
        // and will exit when the process tears the hook down
        let _ = self.thread.take();
    }
}

/// Start forwarding global mouse input into `notifier`.
///
/// Returns a handle that can be used to stop the hook.
pub fn start_mouse_hook(notifier: PressNotifier) -> MouseHookHandle {
    let (stop_tx, stop_rx) = bounded(1);
    let running = Arc::new(AtomicBool::new(true));
    let running_clone = running.clone();

    let thread = thread::spawn(move || {
        rdev_impl::run(notifier, stop_rx, running_clone);
    });

    MouseHookHandle {
        stop_tx,
        running,
        thread: Some(thread),
    }
}
