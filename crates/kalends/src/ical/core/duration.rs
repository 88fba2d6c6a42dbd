//! DURATION values (RFC 5545 §3.3.6).

use serde::{Deserialize, Serialize};

/// A nominal duration: `[+|-]P[nW]` or `[+|-]P[nD][T[nH][nM][nS]]`.
///
/// Weeks are exclusive with the day/time form on the wire; a value built
/// with both is serialized in the day/time form with weeks converted to
/// days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Duration {
    pub negative: bool,
    pub weeks: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}

impl Duration {
    /// The zero duration.
    #[must_use]
    pub const fn zero() -> Self {
        Self {
            negative: false,
            weeks: 0,
            days: 0,
            hours: 0,
            minutes: 0,
            seconds: 0,
        }
    }

    /// Creates a duration of whole weeks.
    #[must_use]
    pub const fn weeks(weeks: u32) -> Self {
        Self {
            weeks,
            ..Self::zero()
        }
    }

    /// Creates a duration from hours, minutes, and seconds.
    #[must_use]
    pub const fn hms(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            ..Self::zero()
        }
    }

    /// Returns whether every component is zero.
    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.weeks == 0 && self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0
    }

    /// Total signed seconds (weeks and days counted nominally).
    #[must_use]
    pub fn total_seconds(self) -> i64 {
        let magnitude = i64::from(self.weeks) * 7 * 86_400
            + i64::from(self.days) * 86_400
            + i64::from(self.hours) * 3600
            + i64::from(self.minutes) * 60
            + i64::from(self.seconds);
        if self.negative { -magnitude } else { magnitude }
    }
}

impl std::fmt::Display for Duration {
    /// Canonical wire form. `P{n}W` when only weeks are set, otherwise
    /// `P[nD][T[nH][nM][nS]]`; the zero duration is `PT0S`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.negative {
            write!(f, "-")?;
        }
        write!(f, "P")?;

        if self.weeks != 0 && self.days == 0 && self.hours == 0 && self.minutes == 0 && self.seconds == 0 {
            return write!(f, "{}W", self.weeks);
        }

        let days = self.days + self.weeks * 7;
        if days != 0 {
            write!(f, "{days}D")?;
        }
        if self.hours != 0 || self.minutes != 0 || self.seconds != 0 || days == 0 {
            write!(f, "T")?;
            if self.hours != 0 {
                write!(f, "{}H", self.hours)?;
            }
            if self.minutes != 0 {
                write!(f, "{}M", self.minutes)?;
            }
            if self.seconds != 0 || (self.hours == 0 && self.minutes == 0) {
                write!(f, "{}S", self.seconds)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_weeks() {
        assert_eq!(Duration::weeks(2).to_string(), "P2W");
    }

    #[test]
    fn display_day_time() {
        let d = Duration {
            days: 1,
            hours: 2,
            minutes: 30,
            ..Duration::zero()
        };
        assert_eq!(d.to_string(), "P1DT2H30M");
    }

    #[test]
    fn display_negative() {
        let d = Duration {
            negative: true,
            minutes: 15,
            ..Duration::zero()
        };
        assert_eq!(d.to_string(), "-PT15M");
    }

    #[test]
    fn display_zero() {
        assert_eq!(Duration::zero().to_string(), "PT0S");
    }

    #[test]
    fn total_seconds_signed() {
        let d = Duration {
            negative: true,
            hours: 1,
            ..Duration::zero()
        };
        assert_eq!(d.total_seconds(), -3600);
        assert_eq!(Duration::weeks(1).total_seconds(), 604_800);
    }
}
