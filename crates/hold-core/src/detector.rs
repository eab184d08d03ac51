//! Press state machine: canonical notifications in, timer operations and
//! press outputs out.

use crate::{
    ConfigError, PointerEvent, PointerKind, PointerNotification, PressConfig, PressState,
    TimerSpec,
};
use std::time::Duration;
use tracing::{debug, warn};

/// Timer side effect requested by a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerOp {
    /// Arm the timer for the new session.
    Schedule(TimerSpec),
    /// Tear down whatever timer is armed.
    Cancel,
}

/// Output produced by a timer wakeup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PressOutput {
    /// The hold threshold elapsed in single-shot mode. Carries the raw
    /// event that started the press. At most one per session.
    LongPress(PointerEvent),
    /// One continuous-mode tick. No payload.
    Tick,
}

/// Tracks one press session at a time and decides when the hold threshold
/// or the tick interval applies.
///
/// The detector is synchronous and clock-free: a driver owns the actual
/// timer, executes the returned [`TimerOp`]s, and feeds expiries back
/// through [`PressDetector::on_timer`]. The session id acts as the
/// cancellation token: a wakeup carrying an old id is stale and produces
/// nothing.
#[derive(Debug)]
pub struct PressDetector {
    config: PressConfig,
    state: PressState,
    /// Current session id; bumped on every start and every teardown.
    session: u64,
    /// Raw start event held for the long-press sink (single-shot mode).
    pending: Option<PointerEvent>,
}

impl PressDetector {
    /// Create a detector with a validated configuration.
    pub fn new(config: PressConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            state: PressState::Idle,
            session: 0,
            pending: None,
        })
    }

    /// Current state.
    pub fn state(&self) -> PressState {
        self.state
    }

    /// Current configuration.
    pub fn config(&self) -> &PressConfig {
        &self.config
    }

    /// Swap the configuration between presses. Refused while a session is
    /// active.
    pub fn reconfigure(&mut self, config: PressConfig) -> Result<(), ConfigError> {
        config.validate()?;
        if self.state != PressState::Idle {
            return Err(ConfigError::SessionActive);
        }
        self.config = config;
        Ok(())
    }

    /// Feed one canonical notification. Returns the timer operation the
    /// driver must execute, if any.
    pub fn handle(&mut self, notification: PointerNotification) -> Option<TimerOp> {
        match notification {
            PointerNotification::Start(event) => self.on_start(event),
            PointerNotification::Move | PointerNotification::End | PointerNotification::Cancel => {
                self.on_stop(notification)
            }
        }
    }

    /// Feed a timer wakeup for `session`. Returns what to deliver, if
    /// anything.
    pub fn on_timer(&mut self, session: u64) -> Option<PressOutput> {
        if session != self.session {
            // A correctly cancelling driver never gets here.
            warn!(session, current = self.session, "stale timer wakeup discarded");
            return None;
        }
        match self.state {
            PressState::Idle => None,
            PressState::ArmedSingle => {
                self.state = PressState::Idle;
                debug!(session, "hold threshold reached, firing long press");
                self.pending.take().map(PressOutput::LongPress)
            }
            PressState::FiringContinuous => Some(PressOutput::Tick),
        }
    }

    fn on_start(&mut self, event: PointerEvent) -> Option<TimerOp> {
        if self.state != PressState::Idle {
            // Single-pointer assumption; a second start must not arm a
            // second timer.
            debug!(state = ?self.state, "start ignored, session already active");
            return None;
        }
        if !self.qualifies(&event) {
            debug!(?event, touch_only = self.config.touch_only, "start ignored, does not qualify");
            return None;
        }

        self.session += 1;
        let interval = if self.config.continuous {
            self.state = PressState::FiringContinuous;
            Some(Duration::from_millis(self.config.interval_ms))
        } else {
            self.state = PressState::ArmedSingle;
            self.pending = Some(event);
            None
        };
        debug!(session = self.session, state = ?self.state, "press session started");
        Some(TimerOp::Schedule(TimerSpec {
            session: self.session,
            delay: Duration::from_millis(self.config.hold_threshold_ms),
            interval,
        }))
    }

    fn on_stop(&mut self, notification: PointerNotification) -> Option<TimerOp> {
        if self.state == PressState::Idle {
            // end/cancel/move with no active press is a no-op.
            return None;
        }
        debug!(session = self.session, ?notification, state = ?self.state, "press session ended");
        self.state = PressState::Idle;
        self.pending = None;
        // A wakeup carrying the old id is stale from here on.
        self.session += 1;
        Some(TimerOp::Cancel)
    }

    /// Whether `event` may start a session under the current config.
    fn qualifies(&self, event: &PointerEvent) -> bool {
        let modality_ok = match event.kind {
            PointerKind::Touch => self.config.touch_only,
            PointerKind::Mouse => !self.config.touch_only,
        };
        if !modality_ok {
            return false;
        }
        // Continuous mode only starts from the primary mouse button.
        if self.config.continuous && event.kind == PointerKind::Mouse {
            return event.button.map(|b| b.is_primary()).unwrap_or(false);
        }
        true
    }
}
