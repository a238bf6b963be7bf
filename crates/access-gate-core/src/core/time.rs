// crates/access-gate-core/src/core/time.rs
// ============================================================================
// Module: Access Gate Time Model
// Description: Host-supplied monotonic timestamps and gate timing windows.
// Purpose: Keep cool-down and reveal timers deterministic and replayable.
// Dependencies: serde, thiserror
// ============================================================================

//! ## Overview
//! The gate never reads a wall clock. Hosts pass monotonic millisecond
//! timestamps into every call that can start or expire a timer, and timers
//! are stored as deadlines.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::time::Duration;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default invalid-input cool-down in milliseconds.
pub const DEFAULT_INVALID_COOLDOWN_MS: u64 = 3_000;
/// Default reveal window in milliseconds.
pub const DEFAULT_REVEAL_WINDOW_MS: u64 = 5_000;

// ============================================================================
// SECTION: Timestamps
// ============================================================================

/// Monotonic host timestamp in milliseconds.
///
/// # Invariants
/// - Values are supplied by callers; monotonicity is a caller responsibility.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Timestamp(u64);

impl Timestamp {
    /// Timestamp zero.
    pub const ZERO: Self = Self(0);

    /// Creates a timestamp from milliseconds.
    #[must_use]
    pub const fn from_millis(millis: u64) -> Self {
        Self(millis)
    }

    /// Returns the timestamp in milliseconds.
    #[must_use]
    pub const fn as_millis(self) -> u64 {
        self.0
    }

    /// Returns the timestamp shifted forward, saturating at the maximum.
    #[must_use]
    pub fn saturating_add(self, duration: Duration) -> Self {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(millis))
    }

    /// Returns true when this timestamp is at or past the deadline.
    #[must_use]
    pub const fn has_reached(self, deadline: Self) -> bool {
        self.0 >= deadline.0
    }
}

// ============================================================================
// SECTION: Timings
// ============================================================================

/// Gate timing windows.
///
/// # Invariants
/// - Both windows are non-zero.
/// - `reveal_window` is strictly longer than `invalid_cooldown`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GateTimings {
    /// Duration of the invalid-input flash.
    invalid_cooldown: Duration,
    /// Duration the overlay stays click-through after a successful unlock.
    reveal_window: Duration,
}

impl GateTimings {
    /// Creates validated timings.
    ///
    /// # Errors
    ///
    /// Returns [`TimingError`] when a window is zero or the ordering is violated.
    pub const fn new(
        invalid_cooldown: Duration,
        reveal_window: Duration,
    ) -> Result<Self, TimingError> {
        if invalid_cooldown.is_zero() {
            return Err(TimingError::ZeroWindow("invalid_cooldown"));
        }
        if reveal_window.is_zero() {
            return Err(TimingError::ZeroWindow("reveal_window"));
        }
        if reveal_window.as_millis() <= invalid_cooldown.as_millis() {
            return Err(TimingError::RevealNotLonger);
        }
        Ok(Self {
            invalid_cooldown,
            reveal_window,
        })
    }

    /// Creates validated timings from millisecond values.
    ///
    /// # Errors
    ///
    /// Returns [`TimingError`] when a window is zero or the ordering is violated.
    pub const fn from_millis(
        invalid_cooldown_ms: u64,
        reveal_window_ms: u64,
    ) -> Result<Self, TimingError> {
        Self::new(
            Duration::from_millis(invalid_cooldown_ms),
            Duration::from_millis(reveal_window_ms),
        )
    }

    /// Returns the invalid-input cool-down.
    #[must_use]
    pub const fn invalid_cooldown(&self) -> Duration {
        self.invalid_cooldown
    }

    /// Returns the reveal window.
    #[must_use]
    pub const fn reveal_window(&self) -> Duration {
        self.reveal_window
    }
}

impl Default for GateTimings {
    fn default() -> Self {
        Self {
            invalid_cooldown: Duration::from_millis(DEFAULT_INVALID_COOLDOWN_MS),
            reveal_window: Duration::from_millis(DEFAULT_REVEAL_WINDOW_MS),
        }
    }
}

/// Timing validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TimingError {
    /// A timing window is zero.
    #[error("{0} must be greater than zero")]
    ZeroWindow(&'static str),
    /// The reveal window does not outlast the cool-down.
    #[error("reveal_window must be longer than invalid_cooldown")]
    RevealNotLonger,
}
