//! Calendar systems for recurrence expansion (RFC 7529 RSCALE).
//!
//! Every calendar converts between its own civil dates and a shared fixed
//! day number (days since 1970-01-01). All recurrence arithmetic happens on
//! fixed days; only period splitting needs the civil view.
//!
//! The Hebrew and Islamic implementations use the classic arithmetic
//! formulations (molad plus postponements for Hebrew, the 30-year tabular
//! cycle for Islamic), which are exact for these scales.

use std::collections::HashMap;
use std::sync::Arc;

/// A civil date in some calendar system. Month numbering is per system
/// (Hebrew months count from Tishri so intercalation extends the year end).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CivilDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl CivilDate {
    #[must_use]
    pub const fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }
}

/// A calendar system: civil date arithmetic over fixed day numbers.
pub trait CalendarSystem: Send + Sync {
    /// RSCALE tag, uppercase.
    fn name(&self) -> &'static str;

    /// Converts a civil date to a fixed day number. The date must be valid
    /// for this system.
    fn fixed_from_civil(&self, date: CivilDate) -> i64;

    /// Converts a fixed day number to a civil date.
    fn civil_from_fixed(&self, fixed: i64) -> CivilDate;

    /// Number of months in the given year (12 or 13 for lunisolar systems).
    fn months_in_year(&self, year: i32) -> u8;

    /// Number of days in the given month. Zero for a month the year does
    /// not have.
    fn days_in_month(&self, year: i32, month: u8) -> u8;

    /// Number of days in the given year.
    fn days_in_year(&self, year: i32) -> u16;
}

/// Day of week for a fixed day number, 0 = Sunday. 1970-01-01 was a
/// Thursday (4).
#[must_use]
pub fn weekday_from_fixed(fixed: i64) -> u8 {
    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    {
        (fixed + 4).rem_euclid(7) as u8
    }
}

/// The proleptic Gregorian calendar.
#[derive(Debug, Clone, Copy, Default)]
pub struct Gregorian;

impl Gregorian {
    #[must_use]
    pub fn is_leap_year(year: i32) -> bool {
        year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
    }

    const MONTH_DAYS: [u8; 12] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
}

impl CalendarSystem for Gregorian {
    fn name(&self) -> &'static str {
        "GREGORIAN"
    }

    // Howard Hinnant's days_from_civil, shifted to the 1970 epoch.
    fn fixed_from_civil(&self, date: CivilDate) -> i64 {
        let y = i64::from(date.year) - i64::from(date.month <= 2);
        let m = i64::from(date.month);
        let d = i64::from(date.day);

        let era = if y >= 0 { y } else { y - 399 } / 400;
        let yoe = y - era * 400;
        let mp = if m > 2 { m - 3 } else { m + 9 };
        let doy = (153 * mp + 2) / 5 + d - 1;
        let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
        era * 146_097 + doe - 719_468
    }

    #[expect(clippy::cast_possible_truncation)]
    fn civil_from_fixed(&self, fixed: i64) -> CivilDate {
        let z = fixed + 719_468;
        let era = if z >= 0 { z } else { z - 146_096 } / 146_097;
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let y = yoe + era * 400;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let d = doy - (153 * mp + 2) / 5 + 1;
        let m = if mp < 10 { mp + 3 } else { mp - 9 };

        CivilDate {
            year: (y + i64::from(m <= 2)) as i32,
            month: m as u8,
            day: d as u8,
        }
    }

    fn months_in_year(&self, _year: i32) -> u8 {
        12
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        match month {
            2 if Self::is_leap_year(year) => 29,
            1..=12 => Self::MONTH_DAYS[usize::from(month) - 1],
            _ => 0,
        }
    }

    fn days_in_year(&self, year: i32) -> u16 {
        if Self::is_leap_year(year) { 366 } else { 365 }
    }
}

/// The Hebrew calendar (arithmetic form).
///
/// Months are numbered civilly from Tishri = 1, so the intercalary month
/// falls mid-sequence: in leap years month 6 is Adar I (30 days) and month 7
/// is Adar II (29 days).
#[derive(Debug, Clone, Copy, Default)]
pub struct Hebrew;

impl Hebrew {
    /// Offset from days-since-molad-baharad to the 1970 fixed epoch:
    /// `elapsed_days(5731)`-era arithmetic puts 1 Tishri 5785 at elapsed day
    /// 2_112_590 = 2024-10-03 = fixed day 19_999.
    const EPOCH_OFFSET: i64 = 2_092_591;

    #[must_use]
    pub fn is_leap_year(year: i32) -> bool {
        (7 * i64::from(year) + 1).rem_euclid(19) < 7
    }

    /// Days from the epoch of the molad reckoning to Rosh Hashanah of the
    /// given year, with the four postponement rules applied.
    fn elapsed_days(year: i32) -> i64 {
        let y = i64::from(year) - 1;
        let months_elapsed = 235 * (y / 19) + 12 * (y % 19) + (7 * (y % 19) + 1) / 19;
        let parts_elapsed = 204 + 793 * (months_elapsed % 1080);
        let hours_elapsed =
            5 + 12 * months_elapsed + 793 * (months_elapsed / 1080) + parts_elapsed / 1080;
        let parts = 1080 * (hours_elapsed % 24) + parts_elapsed % 1080;
        let day = 1 + 29 * months_elapsed + hours_elapsed / 24;

        // Postponements: molad too late in the day, or the two dechiyot
        // that keep year lengths legal
        let day = if parts >= 19_440
            || (day % 7 == 2 && parts >= 9924 && !Self::is_leap_year(year))
            || (day % 7 == 1 && parts >= 16_789 && Self::is_leap_year(year - 1))
        {
            day + 1
        } else {
            day
        };

        // Rosh Hashanah may not fall on Sunday, Wednesday, or Friday
        if matches!(day % 7, 0 | 3 | 5) { day + 1 } else { day }
    }

    fn first_of_year(year: i32) -> i64 {
        Self::elapsed_days(year) - Self::EPOCH_OFFSET
    }

    fn year_length(year: i32) -> i64 {
        Self::first_of_year(year + 1) - Self::first_of_year(year)
    }
}

impl CalendarSystem for Hebrew {
    fn name(&self) -> &'static str {
        "HEBREW"
    }

    fn fixed_from_civil(&self, date: CivilDate) -> i64 {
        let mut fixed = Self::first_of_year(date.year);
        for m in 1..date.month {
            fixed += i64::from(self.days_in_month(date.year, m));
        }
        fixed + i64::from(date.day) - 1
    }

    fn civil_from_fixed(&self, fixed: i64) -> CivilDate {
        // Mean year is about 365.2468 days; the estimate is within one
        #[expect(clippy::cast_possible_truncation)]
        let mut year = ((fixed + Self::EPOCH_OFFSET) * 10_000 / 3_652_468 + 1) as i32;
        while Self::first_of_year(year + 1) <= fixed {
            year += 1;
        }
        while Self::first_of_year(year) > fixed {
            year -= 1;
        }

        let mut remaining = fixed - Self::first_of_year(year);
        let mut month = 1u8;
        loop {
            let dim = i64::from(self.days_in_month(year, month));
            if remaining < dim {
                break;
            }
            remaining -= dim;
            month += 1;
        }

        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        CivilDate {
            year,
            month,
            day: (remaining + 1) as u8,
        }
    }

    fn months_in_year(&self, year: i32) -> u8 {
        if Self::is_leap_year(year) { 13 } else { 12 }
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        let leap = Self::is_leap_year(year);
        match month {
            1 => 30,                                                  // Tishri
            2 => {
                // Heshvan is long only in complete years
                if Self::year_length(year) % 10 == 5 { 30 } else { 29 }
            }
            3 => {
                // Kislev is short only in deficient years
                if Self::year_length(year) % 10 == 3 { 29 } else { 30 }
            }
            4 => 29,                                                  // Tevet
            5 => 30,                                                  // Shevat
            6 if leap => 30,                                          // Adar I
            6 => 29,                                                  // Adar
            m if leap && (7..=13).contains(&m) => {
                // Adar II through Elul
                [29, 30, 29, 30, 29, 30, 29][usize::from(m) - 7]
            }
            m if !leap && (7..=12).contains(&m) => {
                // Nisan through Elul
                [30, 29, 30, 29, 30, 29][usize::from(m) - 7]
            }
            _ => 0,
        }
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn days_in_year(&self, year: i32) -> u16 {
        Self::year_length(year) as u16
    }
}

/// The tabular (civil-epoch) Islamic calendar.
///
/// Purely arithmetic 30-year cycle; useful as a deterministic approximation
/// of observation-based calendars.
#[derive(Debug, Clone, Copy, Default)]
pub struct IslamicCivil;

impl IslamicCivil {
    /// 1 Muharram AH 1 as a fixed day (19 July 622 Gregorian).
    const EPOCH: i64 = -492_148;

    #[must_use]
    pub fn is_leap_year(year: i32) -> bool {
        (11 * i64::from(year) + 14).rem_euclid(30) < 11
    }

    fn days_before_month(month: u8) -> i64 {
        29 * (i64::from(month) - 1) + i64::from(month) / 2
    }
}

impl CalendarSystem for IslamicCivil {
    fn name(&self) -> &'static str {
        "ISLAMIC-CIVIL"
    }

    fn fixed_from_civil(&self, date: CivilDate) -> i64 {
        let y = i64::from(date.year);
        Self::EPOCH
            + (y - 1) * 354
            + (3 + 11 * y).div_euclid(30)
            + Self::days_before_month(date.month)
            + i64::from(date.day)
            - 1
    }

    fn civil_from_fixed(&self, fixed: i64) -> CivilDate {
        let days = fixed - Self::EPOCH;
        #[expect(clippy::cast_possible_truncation)]
        let year = ((30 * days + 10_646).div_euclid(10_631)) as i32;

        let year_start = self.fixed_from_civil(CivilDate::new(year, 1, 1));
        let mut remaining = fixed - year_start;
        let mut month = 1u8;
        loop {
            let dim = i64::from(self.days_in_month(year, month));
            if remaining < dim {
                break;
            }
            remaining -= dim;
            month += 1;
        }

        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        CivilDate {
            year,
            month,
            day: (remaining + 1) as u8,
        }
    }

    fn months_in_year(&self, _year: i32) -> u8 {
        12
    }

    fn days_in_month(&self, year: i32, month: u8) -> u8 {
        match month {
            12 if Self::is_leap_year(year) => 30,
            m if (1..=12).contains(&m) => {
                if m % 2 == 1 { 30 } else { 29 }
            }
            _ => 0,
        }
    }

    fn days_in_year(&self, year: i32) -> u16 {
        if Self::is_leap_year(year) { 355 } else { 354 }
    }
}

/// Registry mapping RSCALE tags to calendar systems.
///
/// Read-mostly: build it once (typically via `Default`), share it by
/// reference. There is deliberately no process-wide instance; callers that
/// need custom scales register them on their own registry.
#[derive(Clone)]
pub struct CalendarRegistry {
    systems: HashMap<String, Arc<dyn CalendarSystem>>,
}

impl CalendarRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            systems: HashMap::new(),
        }
    }

    /// Registers a calendar system under its own name.
    pub fn register(&mut self, system: Arc<dyn CalendarSystem>) {
        self.systems.insert(system.name().to_owned(), system);
    }

    /// Looks up a system by RSCALE tag (case-insensitive).
    #[must_use]
    pub fn get(&self, name: &str) -> Option<Arc<dyn CalendarSystem>> {
        self.systems.get(&name.to_ascii_uppercase()).cloned()
    }
}

impl Default for CalendarRegistry {
    /// Registry with the bundled scales: GREGORIAN, HEBREW, ISLAMIC-CIVIL.
    fn default() -> Self {
        let mut registry = Self::empty();
        registry.register(Arc::new(Gregorian));
        registry.register(Arc::new(Hebrew));
        registry.register(Arc::new(IslamicCivil));
        registry
    }
}

impl std::fmt::Debug for CalendarRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalendarRegistry")
            .field("scales", &self.systems.keys().collect::<Vec<_>>())
            .finish()
    }
}
