//! Interval lengths and epoch-aligned interval keys.

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use std::num::NonZeroU32;

use crate::ConfigError;

/// Length of one bar in seconds.
///
/// Always positive; construct through [`IntervalLength::new`] so that bad
/// values surface as a [`ConfigError`] at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize, Deserialize)]
#[display("{_0}")]
#[serde(try_from = "i64", into = "i64")]
pub struct IntervalLength(NonZeroU32);

impl IntervalLength {
    /// Validates an interval length given in seconds.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidInterval`] if `seconds` is zero,
    /// negative, or does not fit in 32 bits.
    pub fn new(seconds: i64) -> Result<Self, ConfigError> {
        u32::try_from(seconds)
            .ok()
            .and_then(NonZeroU32::new)
            .map(Self)
            .ok_or(ConfigError::InvalidInterval(seconds))
    }

    /// Returns the length in seconds.
    #[must_use]
    pub const fn seconds(&self) -> u32 {
        self.0.get()
    }

    /// Returns the length in seconds as a signed value for timestamp arithmetic.
    #[must_use]
    pub fn as_i64(&self) -> i64 {
        i64::from(self.0.get())
    }
}

impl TryFrom<i64> for IntervalLength {
    type Error = ConfigError;

    fn try_from(seconds: i64) -> Result<Self, Self::Error> {
        Self::new(seconds)
    }
}

impl From<IntervalLength> for i64 {
    fn from(length: IntervalLength) -> Self {
        length.as_i64()
    }
}

/// Index of a fixed-length interval counted from the Unix epoch.
///
/// Interval 0 covers `[0, L)` seconds since the epoch, interval 1 covers
/// `[L, 2L)`, and so on. Keys are negative before the epoch.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    From,
    Into,
    Serialize,
    Deserialize,
)]
#[serde(transparent)]
pub struct IntervalKey(i64);

impl IntervalKey {
    /// Creates a key from its raw index.
    #[must_use]
    pub const fn new(index: i64) -> Self {
        Self(index)
    }

    /// Returns the raw index.
    #[must_use]
    pub const fn index(&self) -> i64 {
        self.0
    }
}
