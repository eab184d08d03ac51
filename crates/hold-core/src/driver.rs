//! Press driver: worker thread owning the detector and its timer.
//!
//! One thread serializes pointer notifications and timer expiries, so a
//! cancel is always processed before a wakeup that was scheduled earlier
//! can fire. Sinks are invoked on the driver thread.

use crate::{
    ConfigError, PendingTimer, PointerEvent, PointerNotification, PressConfig, PressDetector,
    PressOutput, PressState, TimerOp,
};
use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Output seam: the two sinks the detector fires into.
pub trait PressSink: Send {
    /// One long press, with the raw event that started it.
    fn on_long_press(&self, event: PointerEvent);
    /// One continuous-mode tick.
    fn on_continuous(&self);
}

/// Adapter implementing [`PressSink`] for a pair of closures.
pub struct ClosureSink<L, C> {
    on_long: L,
    on_tick: C,
}

impl<L, C> ClosureSink<L, C>
where
    L: Fn(PointerEvent) + Send,
    C: Fn() + Send,
{
    pub fn new(on_long: L, on_tick: C) -> Self {
        Self { on_long, on_tick }
    }
}

impl<L, C> PressSink for ClosureSink<L, C>
where
    L: Fn(PointerEvent) + Send,
    C: Fn() + Send,
{
    fn on_long_press(&self, event: PointerEvent) {
        (self.on_long)(event)
    }

    fn on_continuous(&self) {
        (self.on_tick)()
    }
}

/// Commands sent to the driver thread.
#[derive(Debug, Clone)]
pub enum DriverCommand {
    /// A canonical pointer notification from an input source.
    Notify(PointerNotification),
    /// Swap the configuration (applied only between presses).
    Reconfigure(PressConfig),
    /// Cancel any armed timer and exit the thread.
    Shutdown,
}

/// Cloneable notification sender for input sources.
#[derive(Debug, Clone)]
pub struct PressNotifier {
    cmd_tx: Sender<DriverCommand>,
}

impl PressNotifier {
    /// Forward one canonical notification to the driver.
    pub fn notify(&self, notification: PointerNotification) {
        if let Err(e) = self.cmd_tx.send(DriverCommand::Notify(notification)) {
            warn!("failed to send notification to driver: {}", e);
        }
    }
}

/// Handle to control the driver thread.
pub struct DriverHandle {
    cmd_tx: Sender<DriverCommand>,
    state: Arc<Mutex<PressState>>,
    thread: Option<JoinHandle<()>>,
}

impl DriverHandle {
    /// Forward one canonical notification.
    pub fn notify(&self, notification: PointerNotification) {
        if let Err(e) = self.cmd_tx.send(DriverCommand::Notify(notification)) {
            warn!("failed to send notification to driver: {}", e);
        }
    }

    /// Request a configuration swap. Validation happens here; the driver
    /// still refuses to apply it while a press is active.
    pub fn reconfigure(&self, config: PressConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if let Err(e) = self.cmd_tx.send(DriverCommand::Reconfigure(config)) {
            warn!("failed to send reconfigure to driver: {}", e);
        }
        Ok(())
    }

    /// Current detector state.
    pub fn state(&self) -> PressState {
        *self.state.lock().unwrap()
    }

    /// A cloneable sender for input sources feeding this driver.
    pub fn notifier(&self) -> PressNotifier {
        PressNotifier {
            cmd_tx: self.cmd_tx.clone(),
        }
    }

    /// Stop the driver and wait for the thread to finish. Any armed timer
    /// is dropped before the thread exits.
    pub fn shutdown(mut self) {
        let _ = self.cmd_tx.send(DriverCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for DriverHandle {
    fn drop(&mut self) {
        let _ = self.cmd_tx.send(DriverCommand::Shutdown);
        if let Some(handle) = self.thread.take() {
            let _ = handle.join();
        }
    }
}

/// Spawns the worker thread that runs a [`PressDetector`].
pub struct PressDriver;

impl PressDriver {
    /// Validate `config`, spawn the worker thread, and return a handle.
    pub fn spawn<S: PressSink + 'static>(
        config: PressConfig,
        sink: S,
    ) -> Result<DriverHandle, ConfigError> {
        let detector = PressDetector::new(config)?;
        let (cmd_tx, cmd_rx) = bounded(64);
        let state = Arc::new(Mutex::new(PressState::Idle));
        let state_clone = state.clone();

        let thread = thread::spawn(move || {
            run_loop(detector, sink, cmd_rx, state_clone);
        });

        Ok(DriverHandle {
            cmd_tx,
            state,
            thread: Some(thread),
        })
    }
}

fn run_loop<S: PressSink>(
    mut detector: PressDetector,
    sink: S,
    cmd_rx: Receiver<DriverCommand>,
    shared_state: Arc<Mutex<PressState>>,
) {
    info!("press driver thread started");

    // The one armed timer. Commands preempt `recv_deadline`, so a cancel
    // always lands before the deadline it cancels.
    let mut timer: Option<PendingTimer> = None;

    loop {
        let received = match &timer {
            Some(pending) => cmd_rx.recv_deadline(pending.due),
            None => cmd_rx.recv().map_err(|_| RecvTimeoutError::Disconnected),
        };

        match received {
            Ok(DriverCommand::Notify(notification)) => {
                match detector.handle(notification) {
                    Some(TimerOp::Schedule(spec)) => {
                        timer = Some(PendingTimer::arm(spec, Instant::now()));
                    }
                    Some(TimerOp::Cancel) => {
                        timer = None;
                    }
                    None => {}
                }
                *shared_state.lock().unwrap() = detector.state();
            }
            Ok(DriverCommand::Reconfigure(config)) => {
                if let Err(e) = detector.reconfigure(config) {
                    warn!(error = %e, "reconfigure rejected");
                }
            }
            Ok(DriverCommand::Shutdown) => break,
            Err(RecvTimeoutError::Timeout) => {
                let pending = match timer.take() {
                    Some(pending) => pending,
                    None => continue,
                };
                timer = pending.fire();
                match detector.on_timer(pending.session) {
                    Some(PressOutput::LongPress(event)) => {
                        debug!(?event, "long press");
                        sink.on_long_press(event);
                    }
                    Some(PressOutput::Tick) => {
                        debug!("continuous tick");
                        sink.on_continuous();
                    }
                    None => {
                        // Stale wakeup; drop its follow-up too.
                        timer = None;
                    }
                }
                *shared_state.lock().unwrap() = detector.state();
            }
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }

    // Teardown: the armed timer dies with the thread, so no sink call can
    // happen after shutdown returns.
    drop(timer);
    *shared_state.lock().unwrap() = PressState::Idle;
    info!("press driver thread exiting");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MouseButton, PointerKind};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    /// Sink recording every delivery with its arrival time.
    #[derive(Clone, Default)]
    struct RecordingSink {
        long_presses: Arc<Mutex<Vec<PointerEvent>>>,
        ticks: Arc<Mutex<Vec<Instant>>>,
    }

    impl PressSink for RecordingSink {
        fn on_long_press(&self, event: PointerEvent) {
            self.long_presses.lock().unwrap().push(event);
        }

        fn on_continuous(&self) {
            self.ticks.lock().unwrap().push(Instant::now());
        }
    }

    impl RecordingSink {
        fn long_press_count(&self) -> usize {
            self.long_presses.lock().unwrap().len()
        }

        fn tick_count(&self) -> usize {
            self.ticks.lock().unwrap().len()
        }
    }

    fn config(hold_ms: u64, interval_ms: u64, continuous: bool) -> PressConfig {
        let mut config = PressConfig::for_mouse();
        config.hold_threshold_ms = hold_ms;
        config.interval_ms = interval_ms;
        config.continuous = continuous;
        config
    }

    fn left_down() -> PointerNotification {
        PointerNotification::Start(PointerEvent::mouse(MouseButton::Left, 100, 200))
    }

    fn sleep_ms(ms: u64) {
        thread::sleep(Duration::from_millis(ms));
    }

    #[test]
    fn test_single_long_press_fires_once_with_original_event() {
        let sink = RecordingSink::default();
        let handle = PressDriver::spawn(config(60, 1000, false), sink.clone()).unwrap();

        handle.notify(left_down());
        sleep_ms(250);

        let fired = sink.long_presses.lock().unwrap().clone();
        assert_eq!(fired.len(), 1);
        assert_eq!(fired[0].kind, PointerKind::Mouse);
        assert_eq!(fired[0].button, Some(MouseButton::Left));
        assert_eq!((fired[0].x, fired[0].y), (100, 200));
        assert_eq!(sink.tick_count(), 0);
        assert_eq!(handle.state(), PressState::Idle);

        // A release after expiry is a no-op.
        handle.notify(PointerNotification::End);
        sleep_ms(50);
        assert_eq!(sink.long_press_count(), 1);

        handle.shutdown();
    }

    #[test]
    fn test_release_before_threshold_fires_nothing() {
        let sink = RecordingSink::default();
        let handle = PressDriver::spawn(config(150, 1000, false), sink.clone()).unwrap();

        handle.notify(left_down());
        sleep_ms(30);
        handle.notify(PointerNotification::End);
        sleep_ms(300);

        assert_eq!(sink.long_press_count(), 0);
        assert_eq!(sink.tick_count(), 0);

        handle.shutdown();
    }

    #[test]
    fn test_move_interrupts_pending_long_press() {
        let sink = RecordingSink::default();
        let handle = PressDriver::spawn(config(150, 1000, false), sink.clone()).unwrap();

        handle.notify(left_down());
        sleep_ms(30);
        handle.notify(PointerNotification::Move);
        sleep_ms(300);

        assert_eq!(sink.long_press_count(), 0);
        assert_eq!(handle.state(), PressState::Idle);

        handle.shutdown();
    }

    #[test]
    fn test_continuous_tick_count_matches_held_duration() {
        let sink = RecordingSink::default();
        let handle = PressDriver::spawn(config(150, 300, true), sink.clone()).unwrap();

        // Held for threshold + 2.5 intervals: ticks at 150, 450, 750 ms.
        handle.notify(left_down());
        sleep_ms(900);
        handle.notify(PointerNotification::End);

        assert_eq!(sink.tick_count(), 3);
        assert_eq!(sink.long_press_count(), 0);

        // Stopped: no further ticks ever.
        sleep_ms(450);
        assert_eq!(sink.tick_count(), 3);
        assert_eq!(handle.state(), PressState::Idle);

        handle.shutdown();
    }

    #[test]
    fn test_release_before_threshold_produces_no_ticks() {
        let sink = RecordingSink::default();
        let handle = PressDriver::spawn(config(150, 100, true), sink.clone()).unwrap();

        handle.notify(left_down());
        sleep_ms(40);
        handle.notify(PointerNotification::Cancel);
        sleep_ms(400);

        assert_eq!(sink.tick_count(), 0);

        handle.shutdown();
    }

    #[test]
    fn test_stop_while_idle_is_noop() {
        let sink = RecordingSink::default();
        let handle = PressDriver::spawn(config(60, 100, false), sink.clone()).unwrap();

        handle.notify(PointerNotification::End);
        handle.notify(PointerNotification::Cancel);
        handle.notify(PointerNotification::Move);
        sleep_ms(150);

        assert_eq!(sink.long_press_count(), 0);
        assert_eq!(handle.state(), PressState::Idle);

        handle.shutdown();
    }

    #[test]
    fn test_second_start_does_not_double_fire() {
        let sink = RecordingSink::default();
        let handle = PressDriver::spawn(config(80, 1000, false), sink.clone()).unwrap();

        handle.notify(left_down());
        handle.notify(left_down());
        sleep_ms(250);

        assert_eq!(sink.long_press_count(), 1);

        handle.shutdown();
    }

    #[test]
    fn test_restart_after_stop_uses_fresh_ticker_sequence() {
        let sink = RecordingSink::default();
        let handle = PressDriver::spawn(config(150, 150, true), sink.clone()).unwrap();

        // First press released before the threshold.
        handle.notify(left_down());
        sleep_ms(40);
        handle.notify(PointerNotification::End);
        assert_eq!(sink.tick_count(), 0);

        // Second press: the delay phase starts from scratch.
        handle.notify(left_down());
        sleep_ms(60);
        assert_eq!(sink.tick_count(), 0);
        sleep_ms(150);
        assert_eq!(sink.tick_count(), 1);
        handle.notify(PointerNotification::End);

        handle.shutdown();
    }

    #[test]
    fn test_shutdown_cancels_pending_timer() {
        let sink = RecordingSink::default();
        let handle = PressDriver::spawn(config(100, 1000, false), sink.clone()).unwrap();

        handle.notify(left_down());
        sleep_ms(20);
        handle.shutdown();

        sleep_ms(300);
        assert_eq!(sink.long_press_count(), 0);
    }

    #[test]
    fn test_drop_cancels_pending_timer() {
        let sink = RecordingSink::default();
        let handle = PressDriver::spawn(config(100, 1000, false), sink.clone()).unwrap();

        handle.notify(left_down());
        sleep_ms(20);
        drop(handle);

        sleep_ms(300);
        assert_eq!(sink.long_press_count(), 0);
    }

    #[test]
    fn test_reconfigure_applies_between_presses() {
        let sink = RecordingSink::default();
        let handle = PressDriver::spawn(config(60, 1000, false), sink.clone()).unwrap();

        handle.notify(left_down());
        sleep_ms(200);
        assert_eq!(sink.long_press_count(), 1);

        handle.reconfigure(config(60, 80, true)).unwrap();
        sleep_ms(30);

        handle.notify(left_down());
        sleep_ms(250);
        handle.notify(PointerNotification::End);

        assert!(sink.tick_count() >= 2);
        assert_eq!(sink.long_press_count(), 1);

        handle.shutdown();
    }

    #[test]
    fn test_reconfigure_mid_press_keeps_old_config() {
        let sink = RecordingSink::default();
        let handle = PressDriver::spawn(config(120, 1000, false), sink.clone()).unwrap();

        handle.notify(left_down());
        sleep_ms(30);
        // Rejected in-thread; the pending single-shot still fires.
        handle.reconfigure(config(120, 100, true)).unwrap();
        sleep_ms(300);

        assert_eq!(sink.long_press_count(), 1);
        assert_eq!(sink.tick_count(), 0);

        handle.shutdown();
    }

    #[test]
    fn test_reconfigure_rejects_invalid_config() {
        let sink = RecordingSink::default();
        let handle = PressDriver::spawn(config(60, 100, false), sink.clone()).unwrap();

        let mut bad = PressConfig::for_mouse();
        bad.interval_ms = 0;
        assert!(handle.reconfigure(bad).is_err());

        handle.shutdown();
    }

    #[test]
    fn test_spawn_rejects_invalid_config() {
        let sink = RecordingSink::default();
        let mut bad = PressConfig::for_mouse();
        bad.hold_threshold_ms = 0;
        assert!(PressDriver::spawn(bad, sink).is_err());
    }

    #[test]
    fn test_notifier_feeds_the_driver() {
        let sink = RecordingSink::default();
        let handle = PressDriver::spawn(config(60, 1000, false), sink.clone()).unwrap();

        let notifier = handle.notifier();
        notifier.notify(left_down());
        sleep_ms(200);

        assert_eq!(sink.long_press_count(), 1);

        handle.shutdown();
    }
}
