use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Login guard defaults
pub const MAX_ATTEMPTS: u32 = 3; // Attempts per lockout cycle
pub const LOCKOUT_SECS: i64 = 60; // Lockout duration in seconds

/// Persisted attempt budget. Both fields are written together so a restart
/// cannot hand out a fresh budget in the middle of a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GuardState {
    pub attempts_remaining: u32,
    #[serde(default)]
    pub lockout_until: Option<DateTime<Utc>>,
}

impl GuardState {
    pub fn new(max_attempts: u32) -> Self {
        Self {
            attempts_remaining: max_attempts,
            lockout_until: None,
        }
    }
}

impl Default for GuardState {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS)
    }
}

/// Outcome of asking the guard whether a login attempt may go ahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// `attempts_left` is what remains if this attempt is rejected.
    Proceed { attempts_left: u32 },
    LockedOut { retry_after: Duration },
}

/// What the login screen shows about the guard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GuardStatus {
    pub attempts_remaining: u32,
    pub locked_out: bool,
    pub retry_after_secs: u64,
}

#[derive(Debug, Clone, Copy)]
pub struct LoginPolicy {
    max_attempts: u32,
    lockout: Duration,
}

impl Default for LoginPolicy {
    fn default() -> Self {
        Self::new(MAX_ATTEMPTS, LOCKOUT_SECS)
    }
}

impl LoginPolicy {
    pub fn new(max_attempts: u32, lockout_secs: i64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            lockout: Duration::seconds(lockout_secs.max(0)),
        }
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn fresh_state(&self) -> GuardState {
        GuardState::new(self.max_attempts)
    }

    /// Clear an elapsed lockout and restore the full budget.
    /// Returns true if the state changed.
    pub fn expire(&self, state: &mut GuardState, now: DateTime<Utc>) -> bool {
        match state.lockout_until {
            Some(until) if now >= until => {
                *state = self.fresh_state();
                true
            }
            _ => false,
        }
    }

    /// Decide whether an attempt may be sent to the backend, and spend it if so.
    ///
    /// The attempt that would be the last one in the budget is refused
    /// outright and starts the lockout. An admitted attempt is already
    /// counted as a failure; `refund` or `record_success` undo that.
    pub fn admit(&self, state: &mut GuardState, now: DateTime<Utc>) -> Admission {
        self.expire(state, now);

        if let Some(until) = state.lockout_until {
            return Admission::LockedOut {
                retry_after: until - now,
            };
        }

        if state.attempts_remaining <= 1 {
            state.lockout_until = Some(now + self.lockout);
            return Admission::LockedOut {
                retry_after: self.lockout,
            };
        }

        state.attempts_remaining -= 1;
        Admission::Proceed {
            attempts_left: state.attempts_remaining,
        }
    }

    /// Give back an admitted attempt that never reached a verdict.
    pub fn refund(&self, state: &mut GuardState) {
        if state.lockout_until.is_none() {
            state.attempts_remaining = (state.attempts_remaining + 1).min(self.max_attempts);
        }
    }

    pub fn record_success(&self, state: &mut GuardState) {
        *state = self.fresh_state();
    }

    pub fn status(&self, state: &GuardState, now: DateTime<Utc>) -> GuardStatus {
        match state.lockout_until {
            Some(until) if now < until => GuardStatus {
                attempts_remaining: state.attempts_remaining,
                locked_out: true,
                retry_after_secs: retry_secs(until - now),
            },
            Some(_) => GuardStatus {
                attempts_remaining: self.max_attempts,
                locked_out: false,
                retry_after_secs: 0,
            },
            None => GuardStatus {
                attempts_remaining: state.attempts_remaining,
                locked_out: false,
                retry_after_secs: 0,
            },
        }
    }
}

/// Whole seconds left, rounded up so a client never retries early.
pub fn retry_secs(remaining: Duration) -> u64 {
    let millis = remaining.num_milliseconds().max(0) as u64;
    millis.div_ceil(1000)
}
