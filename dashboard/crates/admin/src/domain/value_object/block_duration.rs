//! Block Duration Value Object
//!
//! How long an account block lasts. Resolves to the optional `blockedUntil`
//! instant sent with a block request.
//!
//! ## Forms
//! - **Preset**: 1h, 3h, 6h, 12h, 1d, 3d, 1w, 2w, 1m (one month is 720 hours)
//! - **Custom**: an amount of hours, days, weeks or calendar months
//! - **Until**: an absolute instant
//! - **Permanent**: no expiry

use chrono::{DateTime, Duration, Months, Utc};
use std::fmt;
use std::str::FromStr;

/// Error when a duration cannot be resolved
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BlockDurationError {
    #[error("Unknown duration preset '{0}' (1h, 3h, 6h, 12h, 1d, 3d, 1w, 2w, 1m)")]
    UnknownPreset(String),

    #[error("Block duration must be greater than zero")]
    ZeroAmount,

    #[error("Block duration is too long")]
    OutOfRange,
}

/// Quick-pick durations
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DurationPreset {
    OneHour,
    ThreeHours,
    SixHours,
    TwelveHours,
    OneDay,
    ThreeDays,
    OneWeek,
    TwoWeeks,
    OneMonth,
}

impl DurationPreset {
    pub const ALL: [DurationPreset; 9] = [
        DurationPreset::OneHour,
        DurationPreset::ThreeHours,
        DurationPreset::SixHours,
        DurationPreset::TwelveHours,
        DurationPreset::OneDay,
        DurationPreset::ThreeDays,
        DurationPreset::OneWeek,
        DurationPreset::TwoWeeks,
        DurationPreset::OneMonth,
    ];

    pub const fn code(&self) -> &'static str {
        use DurationPreset::*;
        match self {
            OneHour => "1h",
            ThreeHours => "3h",
            SixHours => "6h",
            TwelveHours => "12h",
            OneDay => "1d",
            ThreeDays => "3d",
            OneWeek => "1w",
            TwoWeeks => "2w",
            OneMonth => "1m",
        }
    }

    pub const fn hours(&self) -> i64 {
        use DurationPreset::*;
        match self {
            OneHour => 1,
            ThreeHours => 3,
            SixHours => 6,
            TwelveHours => 12,
            OneDay => 24,
            ThreeDays => 72,
            OneWeek => 168,
            TwoWeeks => 336,
            OneMonth => 720,
        }
    }
}

impl FromStr for DurationPreset {
    type Err = BlockDurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim().to_ascii_lowercase();
        DurationPreset::ALL
            .into_iter()
            .find(|p| p.code() == code)
            .ok_or_else(|| BlockDurationError::UnknownPreset(s.to_string()))
    }
}

impl fmt::Display for DurationPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeUnit {
    Hours,
    Days,
    Weeks,
    Months,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BlockDuration {
    Preset(DurationPreset),
    Custom { amount: u32, unit: TimeUnit },
    Until(DateTime<Utc>),
    Permanent,
}

impl BlockDuration {
    /// Expiry instant relative to `now`; `None` for a permanent block
    ///
    /// An absolute instant is returned as-is. Whether it lies in the future
    /// is checked when the block request is built.
    pub fn blocked_until(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Option<DateTime<Utc>>, BlockDurationError> {
        match self {
            BlockDuration::Permanent => Ok(None),
            BlockDuration::Until(at) => Ok(Some(*at)),
            BlockDuration::Preset(preset) => now
                .checked_add_signed(Duration::hours(preset.hours()))
                .map(Some)
                .ok_or(BlockDurationError::OutOfRange),
            BlockDuration::Custom { amount: 0, .. } => Err(BlockDurationError::ZeroAmount),
            BlockDuration::Custom { amount, unit } => {
                let amount = i64::from(*amount);
                let shift = |d| now.checked_add_signed(d);
                let until = match unit {
                    TimeUnit::Hours => Duration::try_hours(amount).and_then(shift),
                    TimeUnit::Days => Duration::try_days(amount).and_then(shift),
                    TimeUnit::Weeks => Duration::try_weeks(amount).and_then(shift),
                    TimeUnit::Months => u32::try_from(amount)
                        .ok()
                        .and_then(|m| now.checked_add_months(Months::new(m))),
                };
                until.map(Some).ok_or(BlockDurationError::OutOfRange)
            }
        }
    }

    #[inline]
    pub fn is_permanent(&self) -> bool {
        matches!(self, BlockDuration::Permanent)
    }
}
