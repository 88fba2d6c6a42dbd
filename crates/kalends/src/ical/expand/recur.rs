//! Recurrence expansion (RFC 5545 §3.8.5, RFC 7529).
//!
//! Expansion is lazy: [`expand`] returns an iterator that generates one
//! frequency period at a time, applies the BY-rules to it, and drains the
//! result before touching the next period. Unbounded rules therefore cost
//! nothing beyond the occurrences actually pulled.
//!
//! All arithmetic happens on fixed day numbers in the rule's calendar
//! system; occurrences are always rendered back as Gregorian civil values,
//! whatever the `RSCALE`.

use std::collections::VecDeque;
use std::sync::Arc;

use crate::ical::core::{
    Date, DateTime, DateTimeForm, Frequency, RRule, RRuleUntil, RuleError, WeekdayNum,
};

use super::calendar::{
    CalendarRegistry, CalendarSystem, CivilDate, Gregorian, weekday_from_fixed,
};

/// Consecutive periods allowed to produce no occurrence before an unbounded
/// rule is declared exhausted. Catches rules that can never match, such as
/// `BYMONTH=2;BYMONTHDAY=30`.
const MAX_EMPTY_PERIODS: u32 = 5000;

const SECS_PER_DAY: i64 = 86_400;

/// The seed of a recurrence: the DTSTART value, at DATE or DATE-TIME
/// precision. Occurrences are rendered at the same precision and zone
/// disposition as the anchor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Anchor {
    Date(Date),
    DateTime(DateTime),
}

impl Anchor {
    #[must_use]
    pub fn year(&self) -> u16 {
        match self {
            Self::Date(d) => d.year,
            Self::DateTime(dt) => dt.year,
        }
    }

    #[must_use]
    pub fn month(&self) -> u8 {
        match self {
            Self::Date(d) => d.month,
            Self::DateTime(dt) => dt.month,
        }
    }

    #[must_use]
    pub fn day(&self) -> u8 {
        match self {
            Self::Date(d) => d.day,
            Self::DateTime(dt) => dt.day,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<&Date> {
        match self {
            Self::Date(d) => Some(d),
            Self::DateTime(_) => None,
        }
    }

    #[must_use]
    pub fn as_datetime(&self) -> Option<&DateTime> {
        match self {
            Self::Date(_) => None,
            Self::DateTime(dt) => Some(dt),
        }
    }
}

/// A point on the civil timeline: fixed day plus seconds of day. Zone
/// dispositions are carried separately; two instants compare on wall-clock
/// position only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Instant {
    fixed: i64,
    secs: u32,
}

fn gregorian_fixed(year: u16, month: u8, day: u8) -> i64 {
    Gregorian.fixed_from_civil(CivilDate::new(i32::from(year), month, day))
}

/// Decomposes an anchor into its timeline position, precision, and zone
/// disposition.
fn instant_of(anchor: &Anchor) -> (Instant, bool, DateTimeForm) {
    match anchor {
        Anchor::Date(d) => (
            Instant {
                fixed: gregorian_fixed(d.year, d.month, d.day),
                secs: 0,
            },
            true,
            DateTimeForm::Floating,
        ),
        Anchor::DateTime(dt) => (
            Instant {
                fixed: gregorian_fixed(dt.year, dt.month, dt.day),
                secs: dt.seconds_of_day(),
            },
            false,
            dt.form.clone(),
        ),
    }
}

/// An exclusion at its own precision: a DATE exdate removes every
/// occurrence on that day, a DATE-TIME exdate only the exact instant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExDate {
    Day(i64),
    Exact(Instant),
}

/// Position of the next period to generate.
#[derive(Debug, Clone)]
enum Cursor {
    Yearly { year: i32 },
    Monthly { year: i32, month: u8 },
    Weekly { week_start: i64 },
    Daily { day: i64 },
    /// Absolute seconds, for HOURLY/MINUTELY/SECONDLY.
    SubDaily { tick: i64 },
}

/// Expands a recurrence rule from its anchor.
///
/// The anchor is always the first occurrence, whether or not it matches the
/// rule. Returns an error if the rule fails structural validation or names
/// an `RSCALE` the registry does not know.
///
/// # Errors
///
/// [`RuleError`] on invalid rules or unknown calendar scales.
pub fn expand(
    rule: &RRule,
    anchor: &Anchor,
    registry: &CalendarRegistry,
) -> Result<RecurIter, RuleError> {
    rule.validate()?;
    let scale = rule.rscale.as_deref().unwrap_or("GREGORIAN");
    let cal = registry
        .get(scale)
        .ok_or_else(|| RuleError::UnknownScale(scale.to_owned()))?;

    let (anchor_instant, date_only, form) = instant_of(anchor);
    let anchor_civil = cal.civil_from_fixed(anchor_instant.fixed);

    let until = rule.until.as_ref().map(|u| match u {
        // A DATE bound covers the whole day
        RRuleUntil::Date(d) => Instant {
            fixed: gregorian_fixed(d.year, d.month, d.day),
            secs: if date_only { 0 } else { 86_399 },
        },
        RRuleUntil::DateTime(dt) => Instant {
            fixed: gregorian_fixed(dt.year, dt.month, dt.day),
            secs: dt.seconds_of_day(),
        },
    });

    let wkst = rule.wkst.number_from_sunday();
    let cursor = match rule.freq {
        Frequency::Yearly => Cursor::Yearly {
            year: anchor_civil.year,
        },
        Frequency::Monthly => Cursor::Monthly {
            year: anchor_civil.year,
            month: anchor_civil.month,
        },
        Frequency::Weekly => Cursor::Weekly {
            week_start: anchor_instant.fixed
                - i64::from((weekday_from_fixed(anchor_instant.fixed) + 7 - wkst) % 7),
        },
        Frequency::Daily => Cursor::Daily {
            day: anchor_instant.fixed,
        },
        Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => Cursor::SubDaily {
            tick: anchor_instant.fixed * SECS_PER_DAY + i64::from(anchor_instant.secs),
        },
    };

    Ok(RecurIter {
        rule: rule.clone(),
        cal,
        date_only,
        form,
        anchor: anchor_instant,
        anchor_civil,
        until,
        cursor,
        buffer: VecDeque::new(),
        pending_anchor: true,
        last: None,
        emitted: 0,
        rule_done: false,
        empty_streak: 0,
        rdates: Vec::new(),
        rdate_idx: 0,
        exdates: Vec::new(),
        done: false,
    })
}

/// Lazy occurrence iterator. Cloning snapshots the position, so a clone can
/// be drained independently.
#[derive(Clone)]
pub struct RecurIter {
    rule: RRule,
    cal: Arc<dyn CalendarSystem>,
    date_only: bool,
    form: DateTimeForm,
    anchor: Instant,
    anchor_civil: CivilDate,
    until: Option<Instant>,
    cursor: Cursor,
    buffer: VecDeque<Instant>,
    pending_anchor: bool,
    last: Option<Instant>,
    emitted: u32,
    rule_done: bool,
    empty_streak: u32,
    rdates: Vec<Instant>,
    rdate_idx: usize,
    exdates: Vec<ExDate>,
    done: bool,
}

impl std::fmt::Debug for RecurIter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecurIter")
            .field("rule", &self.rule)
            .field("scale", &self.cal.name())
            .field("emitted", &self.emitted)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

impl RecurIter {
    /// Merges extra occurrence dates into the stream. RDATEs sort into
    /// position, deduplicate against rule occurrences, count toward COUNT,
    /// and are not bounded by UNTIL. Dates before the anchor are dropped.
    #[must_use]
    pub fn with_rdates(mut self, rdates: &[Anchor]) -> Self {
        for anchor in rdates {
            let (inst, _, _) = instant_of(anchor);
            if inst >= self.anchor {
                self.rdates.push(inst);
            }
        }
        self.rdates.sort_unstable();
        self.rdates.dedup();
        self
    }

    /// Excludes dates from the stream. Exclusions never count toward COUNT.
    /// A DATE exclusion removes every occurrence on that day.
    #[must_use]
    pub fn with_exdates(mut self, exdates: &[Anchor]) -> Self {
        for anchor in exdates {
            let ex = match anchor {
                Anchor::Date(d) => ExDate::Day(gregorian_fixed(d.year, d.month, d.day)),
                Anchor::DateTime(_) => {
                    let (inst, _, _) = instant_of(anchor);
                    ExDate::Exact(inst)
                }
            };
            self.exdates.push(ex);
        }
        self
    }

    /// Collects the occurrences within `[start, end]` (inclusive) without
    /// consuming this iterator.
    #[must_use]
    pub fn between(&self, start: &Anchor, end: &Anchor) -> Vec<Anchor> {
        let (lo, _, _) = instant_of(start);
        let (hi, _, _) = instant_of(end);
        let mut out = Vec::new();
        for occ in self.clone() {
            let (inst, _, _) = instant_of(&occ);
            if inst > hi {
                break;
            }
            if inst >= lo {
                out.push(occ);
            }
        }
        out
    }

    fn is_excluded(&self, inst: Instant) -> bool {
        self.exdates.iter().any(|ex| match ex {
            ExDate::Day(day) => *day == inst.fixed,
            ExDate::Exact(e) => *e == inst,
        })
    }

    #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn render(&self, inst: Instant) -> Anchor {
        let civil = Gregorian.civil_from_fixed(inst.fixed);
        let year = u16::try_from(civil.year).unwrap_or(u16::MAX);
        if self.date_only {
            Anchor::Date(Date {
                year,
                month: civil.month,
                day: civil.day,
            })
        } else {
            Anchor::DateTime(DateTime {
                year,
                month: civil.month,
                day: civil.day,
                hour: (inst.secs / 3600) as u8,
                minute: (inst.secs / 60 % 60) as u8,
                second: (inst.secs % 60) as u8,
                form: self.form.clone(),
            })
        }
    }

    /// Earliest instant the current period could produce, for the UNTIL
    /// short-circuit.
    fn cursor_floor(&self) -> Instant {
        let fixed = match &self.cursor {
            Cursor::Yearly { year } => self.cal.fixed_from_civil(CivilDate::new(*year, 1, 1)),
            Cursor::Monthly { year, month } => {
                self.cal.fixed_from_civil(CivilDate::new(*year, *month, 1))
            }
            Cursor::Weekly { week_start } => *week_start,
            Cursor::Daily { day } => *day,
            Cursor::SubDaily { tick } => {
                #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let secs = tick.rem_euclid(SECS_PER_DAY) as u32;
                return Instant {
                    fixed: tick.div_euclid(SECS_PER_DAY),
                    secs,
                };
            }
        };
        Instant { fixed, secs: 0 }
    }

    fn advance_cursor(&mut self) {
        let interval = i64::from(self.rule.interval);
        match &mut self.cursor {
            Cursor::Yearly { year } => {
                #[expect(clippy::cast_possible_truncation)]
                {
                    *year += interval as i32;
                }
            }
            Cursor::Monthly { year, month } => {
                let mut m = i64::from(*month) + interval;
                let mut y = *year;
                loop {
                    let miy = i64::from(self.cal.months_in_year(y));
                    if m > miy {
                        m -= miy;
                        y += 1;
                    } else {
                        break;
                    }
                }
                *year = y;
                *month = u8::try_from(m).unwrap_or(1);
            }
            Cursor::Weekly { week_start } => *week_start += 7 * interval,
            Cursor::Daily { day } => *day += interval,
            Cursor::SubDaily { tick } => {
                let unit = match self.rule.freq {
                    Frequency::Hourly => 3600,
                    Frequency::Minutely => 60,
                    _ => 1,
                };
                *tick += interval * unit;
            }
        }
    }

    fn fill_buffer(&mut self) {
        while self.buffer.is_empty() && !self.rule_done {
            if let Some(until) = self.until
                && self.cursor_floor() > until
            {
                self.rule_done = true;
                break;
            }

            let candidates = self.generate_period();
            self.advance_cursor();

            let mut any = false;
            for inst in candidates {
                if inst < self.anchor {
                    continue;
                }
                if let Some(until) = self.until
                    && inst > until
                {
                    self.rule_done = true;
                    break;
                }
                self.buffer.push_back(inst);
                any = true;
            }

            if any {
                self.empty_streak = 0;
            } else {
                self.empty_streak += 1;
                if self.empty_streak >= MAX_EMPTY_PERIODS {
                    self.rule_done = true;
                }
            }
        }
    }

    /// All candidate instants of the current period, sorted, after BY-rule
    /// expansion and limiting and BYSETPOS selection.
    fn generate_period(&self) -> Vec<Instant> {
        let mut out = match self.rule.freq {
            Frequency::Hourly | Frequency::Minutely | Frequency::Secondly => {
                self.generate_sub_daily()
            }
            _ => {
                let days = match &self.cursor {
                    Cursor::Yearly { year } => self.yearly_days(*year),
                    Cursor::Monthly { year, month } => self.monthly_days(*year, *month),
                    Cursor::Weekly { week_start } => self.weekly_days(*week_start),
                    Cursor::Daily { day } => {
                        if self.day_passes_limits(*day) {
                            vec![*day]
                        } else {
                            Vec::new()
                        }
                    }
                    Cursor::SubDaily { .. } => Vec::new(),
                };
                let times = self.time_grid();
                let mut out = Vec::with_capacity(days.len() * times.len());
                for day in days {
                    for &secs in &times {
                        out.push(Instant { fixed: day, secs });
                    }
                }
                out
            }
        };

        out.sort_unstable();
        out.dedup();
        apply_setpos(out, &self.rule.by_setpos)
    }

    /// Hour/minute/second combinations for day-or-coarser frequencies.
    /// Empty BY-lists default to the anchor's time.
    fn time_grid(&self) -> Vec<u32> {
        if self.date_only {
            return vec![0];
        }
        let default_h = self.anchor.secs / 3600;
        let default_m = self.anchor.secs / 60 % 60;
        let default_s = self.anchor.secs % 60;

        let hours: Vec<u32> = if self.rule.by_hour.is_empty() {
            vec![default_h]
        } else {
            self.rule.by_hour.iter().map(|&h| u32::from(h)).collect()
        };
        let minutes: Vec<u32> = if self.rule.by_minute.is_empty() {
            vec![default_m]
        } else {
            self.rule.by_minute.iter().map(|&m| u32::from(m)).collect()
        };
        let seconds: Vec<u32> = if self.rule.by_second.is_empty() {
            vec![default_s]
        } else {
            self.rule.by_second.iter().map(|&s| u32::from(s)).collect()
        };

        let mut grid = Vec::with_capacity(hours.len() * minutes.len() * seconds.len());
        for &h in &hours {
            for &m in &minutes {
                for &s in &seconds {
                    grid.push(h * 3600 + m * 60 + s);
                }
            }
        }
        grid
    }

    fn generate_sub_daily(&self) -> Vec<Instant> {
        let Cursor::SubDaily { tick } = &self.cursor else {
            return Vec::new();
        };
        let fixed = tick.div_euclid(SECS_PER_DAY);
        #[expect(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let secs = tick.rem_euclid(SECS_PER_DAY) as u32;

        if !self.day_passes_limits(fixed) {
            return Vec::new();
        }

        let hour = secs / 3600;
        let minute = secs / 60 % 60;
        let second = secs % 60;
        let limit =
            |list: &[u8], value: u32| list.is_empty() || list.iter().any(|&v| u32::from(v) == value);

        if !limit(&self.rule.by_hour, hour) {
            return Vec::new();
        }

        match self.rule.freq {
            Frequency::Hourly => {
                let minutes: Vec<u32> = if self.rule.by_minute.is_empty() {
                    vec![self.anchor.secs / 60 % 60]
                } else {
                    self.rule.by_minute.iter().map(|&m| u32::from(m)).collect()
                };
                let seconds: Vec<u32> = if self.rule.by_second.is_empty() {
                    vec![self.anchor.secs % 60]
                } else {
                    self.rule.by_second.iter().map(|&s| u32::from(s)).collect()
                };
                let mut out = Vec::with_capacity(minutes.len() * seconds.len());
                for &m in &minutes {
                    for &s in &seconds {
                        out.push(Instant {
                            fixed,
                            secs: hour * 3600 + m * 60 + s,
                        });
                    }
                }
                out
            }
            Frequency::Minutely => {
                if !limit(&self.rule.by_minute, minute) {
                    return Vec::new();
                }
                let seconds: Vec<u32> = if self.rule.by_second.is_empty() {
                    vec![self.anchor.secs % 60]
                } else {
                    self.rule.by_second.iter().map(|&s| u32::from(s)).collect()
                };
                seconds
                    .into_iter()
                    .map(|s| Instant {
                        fixed,
                        secs: hour * 3600 + minute * 60 + s,
                    })
                    .collect()
            }
            _ => {
                if !limit(&self.rule.by_minute, minute) || !limit(&self.rule.by_second, second) {
                    return Vec::new();
                }
                vec![Instant { fixed, secs }]
            }
        }
    }

    /// Day-level limits shared by DAILY and sub-daily frequencies, where
    /// every BY-day-rule restricts rather than expands.
    fn day_passes_limits(&self, fixed: i64) -> bool {
        let civil = self.cal.civil_from_fixed(fixed);
        if !self.rule.by_month.is_empty() && !self.rule.by_month.contains(&civil.month) {
            return false;
        }
        if !self.rule.by_monthday.is_empty() && !self.monthday_matches(civil) {
            return false;
        }
        if !self.rule.by_yearday.is_empty() && !self.yearday_matches(fixed, civil.year) {
            return false;
        }
        if !self.rule.by_day.is_empty() && !weekday_matches_bare(&self.rule.by_day, fixed) {
            return false;
        }
        true
    }

    fn monthday_matches(&self, civil: CivilDate) -> bool {
        let dim = i16::from(self.cal.days_in_month(civil.year, civil.month));
        self.rule.by_monthday.iter().any(|&md| {
            let resolved = if md > 0 {
                i16::from(md)
            } else {
                dim + i16::from(md) + 1
            };
            resolved == i16::from(civil.day)
        })
    }

    fn yearday_matches(&self, fixed: i64, year: i32) -> bool {
        let first = self.cal.fixed_from_civil(CivilDate::new(year, 1, 1));
        let diy = i64::from(self.cal.days_in_year(year));
        let doy = fixed - first + 1;
        self.rule.by_yearday.iter().any(|&yd| {
            let resolved = if yd > 0 {
                i64::from(yd)
            } else {
                diy + i64::from(yd) + 1
            };
            resolved == doy
        })
    }

    fn month_span(&self, year: i32, month: u8) -> (i64, i64) {
        let first = self.cal.fixed_from_civil(CivilDate::new(year, month, 1));
        (first, i64::from(self.cal.days_in_month(year, month)))
    }

    /// Days of the given month selected by BYMONTHDAY (negative values count
    /// from the end; out-of-range values are skipped).
    fn monthdays_in(&self, year: i32, month: u8) -> Vec<i64> {
        let (first, dim) = self.month_span(year, month);
        let mut days = Vec::new();
        for &md in &self.rule.by_monthday {
            let day = if md > 0 {
                i64::from(md)
            } else {
                dim + i64::from(md) + 1
            };
            if (1..=dim).contains(&day) {
                days.push(first + day - 1);
            }
        }
        days
    }

    fn monthly_days(&self, year: i32, month: u8) -> Vec<i64> {
        if !self.rule.by_month.is_empty() && !self.rule.by_month.contains(&month) {
            return Vec::new();
        }
        let (first, dim) = self.month_span(year, month);
        if dim == 0 {
            return Vec::new();
        }

        if !self.rule.by_monthday.is_empty() {
            let mut days = self.monthdays_in(year, month);
            if !self.rule.by_day.is_empty() {
                let allowed = weekdays_in_span(first, dim, &self.rule.by_day);
                days.retain(|d| allowed.contains(d));
            }
            days
        } else if !self.rule.by_day.is_empty() {
            weekdays_in_span(first, dim, &self.rule.by_day)
        } else {
            let day = i64::from(self.anchor_civil.day);
            if day <= dim {
                vec![first + day - 1]
            } else {
                Vec::new()
            }
        }
    }

    fn weekly_days(&self, week_start: i64) -> Vec<i64> {
        let wkst = self.rule.wkst.number_from_sunday();
        let mut days = Vec::new();
        if self.rule.by_day.is_empty() {
            let anchor_wd = weekday_from_fixed(self.anchor.fixed);
            days.push(week_start + i64::from((anchor_wd + 7 - wkst) % 7));
        } else {
            // Ordinals are meaningless at WEEKLY frequency and ignored
            for wdn in &self.rule.by_day {
                let wd = wdn.weekday.number_from_sunday();
                days.push(week_start + i64::from((wd + 7 - wkst) % 7));
            }
        }
        if !self.rule.by_month.is_empty() {
            days.retain(|&d| {
                self.rule
                    .by_month
                    .contains(&self.cal.civil_from_fixed(d).month)
            });
        }
        days
    }

    fn yearly_days(&self, year: i32) -> Vec<i64> {
        let first = self.cal.fixed_from_civil(CivilDate::new(year, 1, 1));
        let diy = i64::from(self.cal.days_in_year(year));
        let rule = &self.rule;

        let mut days: Vec<i64> = if !rule.by_yearday.is_empty() {
            let mut days = Vec::new();
            for &yd in &rule.by_yearday {
                let doy = if yd > 0 {
                    i64::from(yd)
                } else {
                    diy + i64::from(yd) + 1
                };
                if (1..=diy).contains(&doy) {
                    days.push(first + doy - 1);
                }
            }
            if !rule.by_day.is_empty() {
                days.retain(|&d| weekday_matches_bare(&rule.by_day, d));
            }
            days
        } else if !rule.by_weekno.is_empty() {
            let week1 = self.week1_start(year);
            let nweeks = (self.week1_start(year + 1) - week1) / 7;
            let wkst = rule.wkst.number_from_sunday();
            let mut days = Vec::new();
            for &wn in &rule.by_weekno {
                let w = if wn > 0 {
                    i64::from(wn)
                } else {
                    nweeks + i64::from(wn) + 1
                };
                if !(1..=nweeks).contains(&w) {
                    continue;
                }
                let ws = week1 + 7 * (w - 1);
                if rule.by_day.is_empty() {
                    let anchor_wd = weekday_from_fixed(self.anchor.fixed);
                    days.push(ws + i64::from((anchor_wd + 7 - wkst) % 7));
                } else {
                    for wdn in &rule.by_day {
                        let wd = wdn.weekday.number_from_sunday();
                        days.push(ws + i64::from((wd + 7 - wkst) % 7));
                    }
                }
            }
            days
        } else if !rule.by_month.is_empty() {
            let mut days = Vec::new();
            for &m in &rule.by_month {
                // Skip months this year does not have (intercalation)
                let (mfirst, dim) = self.month_span(year, m);
                if dim == 0 {
                    continue;
                }
                if !rule.by_monthday.is_empty() {
                    let mut md = self.monthdays_in(year, m);
                    if !rule.by_day.is_empty() {
                        let allowed = weekdays_in_span(mfirst, dim, &rule.by_day);
                        md.retain(|d| allowed.contains(d));
                    }
                    days.extend(md);
                } else if !rule.by_day.is_empty() {
                    days.extend(weekdays_in_span(mfirst, dim, &rule.by_day));
                } else {
                    let day = i64::from(self.anchor_civil.day);
                    if day <= dim {
                        days.push(mfirst + day - 1);
                    }
                }
            }
            days
        } else if !rule.by_monthday.is_empty() {
            let mut days = Vec::new();
            for m in 1..=self.cal.months_in_year(year) {
                let (mfirst, dim) = self.month_span(year, m);
                let mut md = self.monthdays_in(year, m);
                if !rule.by_day.is_empty() {
                    let allowed = weekdays_in_span(mfirst, dim, &rule.by_day);
                    md.retain(|d| allowed.contains(d));
                }
                days.extend(md);
            }
            days
        } else if !rule.by_day.is_empty() {
            // Ordinals are relative to the whole year
            weekdays_in_span(first, diy, &rule.by_day)
        } else {
            // Same civil month and day as the anchor; years lacking that
            // date (shorter month, no leap month) produce nothing
            let (month, day) = (self.anchor_civil.month, self.anchor_civil.day);
            if month <= self.cal.months_in_year(year)
                && day <= self.cal.days_in_month(year, month)
            {
                vec![self
                    .cal
                    .fixed_from_civil(CivilDate::new(year, month, day))]
            } else {
                Vec::new()
            }
        };

        if !rule.by_month.is_empty() && (!rule.by_yearday.is_empty() || !rule.by_weekno.is_empty())
        {
            days.retain(|&d| rule.by_month.contains(&self.cal.civil_from_fixed(d).month));
        }
        days
    }

    /// First day of week 1 of the given year: the earliest week (starting on
    /// WKST) with at least four days inside the year.
    fn week1_start(&self, year: i32) -> i64 {
        let first = self.cal.fixed_from_civil(CivilDate::new(year, 1, 1));
        let wkst = self.rule.wkst.number_from_sunday();
        let delta = i64::from((weekday_from_fixed(first) + 7 - wkst) % 7);
        if delta <= 3 { first - delta } else { first - delta + 7 }
    }
}

impl Iterator for RecurIter {
    type Item = Anchor;

    fn next(&mut self) -> Option<Anchor> {
        if self.done {
            return None;
        }
        loop {
            let inst = if self.pending_anchor {
                self.pending_anchor = false;
                self.anchor
            } else {
                self.fill_buffer();
                let rule_next = self.buffer.front().copied();
                let rdate_next = self.rdates.get(self.rdate_idx).copied();
                match (rule_next, rdate_next) {
                    (None, None) => {
                        self.done = true;
                        return None;
                    }
                    (Some(r), None) => {
                        self.buffer.pop_front();
                        r
                    }
                    (None, Some(d)) => {
                        self.rdate_idx += 1;
                        d
                    }
                    (Some(r), Some(d)) => {
                        if r <= d {
                            self.buffer.pop_front();
                            if r == d {
                                self.rdate_idx += 1;
                            }
                            r
                        } else {
                            self.rdate_idx += 1;
                            d
                        }
                    }
                }
            };

            // Duplicates are adjacent in the ascending stream
            if self.last == Some(inst) {
                continue;
            }
            self.last = Some(inst);

            if self.is_excluded(inst) {
                continue;
            }

            self.emitted += 1;
            if let Some(count) = self.rule.count
                && self.emitted >= count
            {
                self.done = true;
            }
            return Some(self.render(inst));
        }
    }
}

/// All days in `[first, first + len)` matching any BYDAY entry, with
/// ordinals resolved relative to the span.
fn weekdays_in_span(first: i64, len: i64, by_day: &[WeekdayNum]) -> Vec<i64> {
    let mut days = Vec::new();
    for wdn in by_day {
        let target = wdn.weekday.number_from_sunday();
        let start = i64::from((target + 7 - weekday_from_fixed(first)) % 7);
        let matches: Vec<i64> = (0..)
            .map(|k| start + 7 * k)
            .take_while(|&off| off < len)
            .map(|off| first + off)
            .collect();
        match wdn.ordinal {
            None => days.extend(&matches),
            Some(n) if n > 0 => {
                if let Some(&d) = matches.get(usize::from(n.unsigned_abs()) - 1) {
                    days.push(d);
                }
            }
            Some(n) => {
                let back = usize::from(n.unsigned_abs());
                if back <= matches.len() {
                    days.push(matches[matches.len() - back]);
                }
            }
        }
    }
    days
}

fn weekday_matches_bare(by_day: &[WeekdayNum], fixed: i64) -> bool {
    let wd = weekday_from_fixed(fixed);
    by_day
        .iter()
        .any(|wdn| wdn.weekday.number_from_sunday() == wd)
}

/// Selects the BYSETPOS positions from a sorted period set. An empty
/// position list keeps the whole set.
fn apply_setpos(set: Vec<Instant>, by_setpos: &[i16]) -> Vec<Instant> {
    if by_setpos.is_empty() {
        return set;
    }
    let len = set.len();
    let mut selected = Vec::with_capacity(by_setpos.len());
    for &pos in by_setpos {
        let idx = if pos > 0 {
            usize::from(pos.unsigned_abs()) - 1
        } else {
            let back = usize::from(pos.unsigned_abs());
            if back > len {
                continue;
            }
            len - back
        };
        if let Some(&inst) = set.get(idx) {
            selected.push(inst);
        }
    }
    selected.sort_unstable();
    selected.dedup();
    selected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ical::parse::parse_rrule;

    fn rule(s: &str) -> RRule {
        parse_rrule(s, true, 1, 1).unwrap()
    }

    fn date(year: u16, month: u8, day: u8) -> Anchor {
        Anchor::Date(Date { year, month, day })
    }

    fn utc(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Anchor {
        Anchor::DateTime(DateTime::utc(year, month, day, hour, minute, second))
    }

    fn ymd(occurrences: &[Anchor]) -> Vec<(u16, u8, u8)> {
        occurrences
            .iter()
            .map(|a| (a.year(), a.month(), a.day()))
            .collect()
    }

    fn take(iter: RecurIter, n: usize) -> Vec<Anchor> {
        iter.take(n).collect()
    }

    #[test]
    fn daily_count() {
        let registry = CalendarRegistry::default();
        let iter = expand(&rule("FREQ=DAILY;COUNT=3"), &utc(2024, 1, 1, 9, 0, 0), &registry)
            .unwrap();
        let occurrences: Vec<Anchor> = iter.collect();
        assert_eq!(
            ymd(&occurrences),
            vec![(2024, 1, 1), (2024, 1, 2), (2024, 1, 3)]
        );
        // Precision and zone disposition carry over from the anchor
        assert!(occurrences[2].as_datetime().unwrap().is_utc());
    }

    #[test]
    fn anchor_is_always_first_even_off_pattern() {
        let registry = CalendarRegistry::default();
        let iter = expand(
            &rule("FREQ=MONTHLY;BYMONTHDAY=15"),
            &date(2024, 1, 10),
            &registry,
        )
        .unwrap();
        assert_eq!(
            ymd(&take(iter, 3)),
            vec![(2024, 1, 10), (2024, 1, 15), (2024, 2, 15)]
        );
    }

    #[test]
    fn weekly_byday() {
        let registry = CalendarRegistry::default();
        let iter = expand(
            &rule("FREQ=WEEKLY;BYDAY=TU,TH;COUNT=5"),
            &utc(2024, 1, 2, 9, 0, 0),
            &registry,
        )
        .unwrap();
        assert_eq!(
            ymd(&iter.collect::<Vec<_>>()),
            vec![
                (2024, 1, 2),
                (2024, 1, 4),
                (2024, 1, 9),
                (2024, 1, 11),
                (2024, 1, 16)
            ]
        );
    }

    #[test]
    fn weekly_interval_respects_wkst() {
        // RFC 5545 example: WKST changes which weeks an interval-2 rule hits
        let registry = CalendarRegistry::default();
        let mo = expand(
            &rule("FREQ=WEEKLY;INTERVAL=2;COUNT=4;BYDAY=TU,SU"),
            &utc(1997, 8, 5, 9, 0, 0),
            &registry,
        )
        .unwrap();
        assert_eq!(
            ymd(&mo.collect::<Vec<_>>()),
            vec![(1997, 8, 5), (1997, 8, 10), (1997, 8, 19), (1997, 8, 24)]
        );

        let su = expand(
            &rule("FREQ=WEEKLY;INTERVAL=2;COUNT=4;BYDAY=TU,SU;WKST=SU"),
            &utc(1997, 8, 5, 9, 0, 0),
            &registry,
        )
        .unwrap();
        assert_eq!(
            ymd(&su.collect::<Vec<_>>()),
            vec![(1997, 8, 5), (1997, 8, 17), (1997, 8, 19), (1997, 8, 31)]
        );
    }

    #[test]
    fn monthly_last_friday() {
        let registry = CalendarRegistry::default();
        let iter = expand(
            &rule("FREQ=MONTHLY;BYDAY=-1FR;COUNT=3"),
            &date(2024, 1, 26),
            &registry,
        )
        .unwrap();
        assert_eq!(
            ymd(&iter.collect::<Vec<_>>()),
            vec![(2024, 1, 26), (2024, 2, 23), (2024, 3, 29)]
        );
    }

    #[test]
    fn yearly_first_sunday_of_november() {
        let registry = CalendarRegistry::default();
        let iter = expand(
            &rule("FREQ=YEARLY;BYMONTH=11;BYDAY=1SU;COUNT=2"),
            &date(2024, 11, 3),
            &registry,
        )
        .unwrap();
        assert_eq!(
            ymd(&iter.collect::<Vec<_>>()),
            vec![(2024, 11, 3), (2025, 11, 2)]
        );
    }

    #[test]
    fn bysetpos_last_weekday_of_month() {
        let registry = CalendarRegistry::default();
        let iter = expand(
            &rule("FREQ=MONTHLY;BYDAY=MO,TU,WE,TH,FR;BYSETPOS=-1;COUNT=2"),
            &date(2024, 1, 31),
            &registry,
        )
        .unwrap();
        assert_eq!(
            ymd(&iter.collect::<Vec<_>>()),
            vec![(2024, 1, 31), (2024, 2, 29)]
        );
    }

    #[test]
    fn until_is_inclusive() {
        let registry = CalendarRegistry::default();
        let iter = expand(
            &rule("FREQ=DAILY;UNTIL=20240103T090000Z"),
            &utc(2024, 1, 1, 9, 0, 0),
            &registry,
        )
        .unwrap();
        assert_eq!(
            ymd(&iter.collect::<Vec<_>>()),
            vec![(2024, 1, 1), (2024, 1, 2), (2024, 1, 3)]
        );
    }

    #[test]
    fn yearly_leap_day_skips_common_years() {
        let registry = CalendarRegistry::default();
        let iter = expand(&rule("FREQ=YEARLY;COUNT=2"), &date(2024, 2, 29), &registry).unwrap();
        assert_eq!(
            ymd(&iter.collect::<Vec<_>>()),
            vec![(2024, 2, 29), (2028, 2, 29)]
        );
    }

    #[test]
    fn byweekno_with_byday() {
        let registry = CalendarRegistry::default();
        let iter = expand(
            &rule("FREQ=YEARLY;BYWEEKNO=20;BYDAY=MO;COUNT=2"),
            &date(2024, 5, 13),
            &registry,
        )
        .unwrap();
        assert_eq!(
            ymd(&iter.collect::<Vec<_>>()),
            vec![(2024, 5, 13), (2025, 5, 12)]
        );
    }

    #[test]
    fn hourly_with_byminute() {
        let registry = CalendarRegistry::default();
        let iter = expand(
            &rule("FREQ=HOURLY;BYMINUTE=0,30;COUNT=4"),
            &utc(2024, 1, 1, 9, 0, 0),
            &registry,
        )
        .unwrap();
        let times: Vec<(u8, u8)> = iter
            .map(|a| {
                let dt = a.as_datetime().unwrap().clone();
                (dt.hour, dt.minute)
            })
            .collect();
        assert_eq!(times, vec![(9, 0), (9, 30), (10, 0), (10, 30)]);
    }

    #[test]
    fn hebrew_rscale_yearly_anniversary() {
        // 1 Tishri over three years lands on the civil Rosh Hashanah dates
        let registry = CalendarRegistry::default();
        let iter = expand(
            &rule("RSCALE=HEBREW;FREQ=YEARLY;COUNT=3"),
            &date(2024, 10, 3),
            &registry,
        )
        .unwrap();
        assert_eq!(
            ymd(&iter.collect::<Vec<_>>()),
            vec![(2024, 10, 3), (2025, 9, 23), (2026, 9, 12)]
        );
    }

    #[test]
    fn islamic_rscale_yearly() {
        // 1 Ramadan 1445 then 1446
        let registry = CalendarRegistry::default();
        let iter = expand(
            &rule("RSCALE=ISLAMIC-CIVIL;FREQ=YEARLY;COUNT=2"),
            &date(2024, 3, 11),
            &registry,
        )
        .unwrap();
        assert_eq!(
            ymd(&iter.collect::<Vec<_>>()),
            vec![(2024, 3, 11), (2025, 3, 1)]
        );
    }

    #[test]
    fn unknown_rscale_is_an_error() {
        let registry = CalendarRegistry::default();
        let mut r = rule("FREQ=YEARLY");
        r.rscale = Some("COPTIC".into());
        assert_eq!(
            expand(&r, &date(2024, 1, 1), &registry).unwrap_err(),
            RuleError::UnknownScale("COPTIC".into())
        );
    }

    #[test]
    fn exdates_do_not_count_toward_count() {
        let registry = CalendarRegistry::default();
        let iter = expand(&rule("FREQ=DAILY;COUNT=3"), &date(2024, 1, 1), &registry)
            .unwrap()
            .with_exdates(&[date(2024, 1, 2)]);
        assert_eq!(
            ymd(&iter.collect::<Vec<_>>()),
            vec![(2024, 1, 1), (2024, 1, 3), (2024, 1, 4)]
        );
    }

    #[test]
    fn rdates_merge_sorted_and_dedup() {
        let registry = CalendarRegistry::default();
        let iter = expand(
            &rule("FREQ=DAILY;UNTIL=20240102"),
            &date(2024, 1, 1),
            &registry,
        )
        .unwrap()
        .with_rdates(&[date(2024, 1, 10), date(2024, 1, 2)]);
        assert_eq!(
            ymd(&iter.collect::<Vec<_>>()),
            vec![(2024, 1, 1), (2024, 1, 2), (2024, 1, 10)]
        );
    }

    #[test]
    fn rdates_count_toward_count() {
        let registry = CalendarRegistry::default();
        let iter = expand(&rule("FREQ=WEEKLY;COUNT=3"), &date(2024, 1, 1), &registry)
            .unwrap()
            .with_rdates(&[date(2024, 1, 2)]);
        assert_eq!(
            ymd(&iter.collect::<Vec<_>>()),
            vec![(2024, 1, 1), (2024, 1, 2), (2024, 1, 8)]
        );
    }

    #[test]
    fn between_is_inclusive_and_repeatable() {
        let registry = CalendarRegistry::default();
        let iter = expand(&rule("FREQ=DAILY"), &date(2024, 1, 1), &registry).unwrap();
        let window = iter.between(&date(2024, 1, 5), &date(2024, 1, 7));
        assert_eq!(ymd(&window), vec![(2024, 1, 5), (2024, 1, 6), (2024, 1, 7)]);
        // The source iterator is untouched
        assert_eq!(ymd(&take(iter, 1)), vec![(2024, 1, 1)]);
    }

    #[test]
    fn impossible_rule_terminates() {
        let registry = CalendarRegistry::default();
        let iter = expand(
            &rule("FREQ=YEARLY;BYMONTH=2;BYMONTHDAY=30"),
            &date(2024, 1, 30),
            &registry,
        )
        .unwrap();
        let occurrences: Vec<Anchor> = iter.collect();
        assert_eq!(ymd(&occurrences), vec![(2024, 1, 30)]);
    }

    #[test]
    fn clone_snapshots_position() {
        let registry = CalendarRegistry::default();
        let mut iter = expand(&rule("FREQ=DAILY;COUNT=5"), &date(2024, 1, 1), &registry).unwrap();
        iter.next();
        iter.next();
        let fork = iter.clone();
        assert_eq!(ymd(&iter.collect::<Vec<_>>()), ymd(&fork.collect::<Vec<_>>()));
    }
}
