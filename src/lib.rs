//! # cron-explain
//!
//! Validates cron expressions, explains every field in plain English and
//! lists the next times an expression fires.
//!
//! ## Example
//!
//! ```rust
//! use cron_explain::{parse_cron_expression, validate_cron_expression, generate_next_executions};
//!
//! assert!(validate_cron_expression("*/15 9-17 * * MON-FRI"));
//!
//! let explanation = parse_cron_expression("0 9 * * 1").expect("valid expression");
//! assert_eq!(explanation.day_of_week, "At Monday");
//! assert_eq!(explanation.hours, "At 9");
//!
//! for (i, time) in generate_next_executions("0 9 * * 1", 5).unwrap().iter().enumerate() {
//!     println!("#{}: {}", i + 1, time.format("%Y-%m-%d %H:%M:%S"));
//! }
//! ```
//!
//! The same operations are available on a parsed [`Cron`], which also answers
//! single questions like "does this instant match" or "what is the next
//! match after this instant":
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use cron_explain::Cron;
//!
//! let cron: Cron = "0 0 * * FRI".parse().expect("valid expression");
//! let start = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
//! let next = cron.find_next_occurrence(&start, false).unwrap();
//! assert_eq!(next, Utc.with_ymd_and_hms(2024, 1, 5, 0, 0, 0).unwrap());
//! ```
//!
//! ## Pattern
//!
//! ```text
//! ┌──────────────── (optional) second (0 - 59)
//! │ ┌────────────── minute (0 - 59)
//! │ │ ┌──────────── hour (0 - 23)
//! │ │ │ ┌────────── day of month (1 - 31)
//! │ │ │ │ ┌──────── month (1 - 12, JAN-DEC)
//! │ │ │ │ │ ┌────── day of week (0 - 6, SUN-SAT)
//! │ │ │ │ │ │       (0 to 6 are Sunday to Saturday; 7 is Sunday, the same as 0)
//! │ │ │ │ │ │
//! * * * * * *
//! ```
//!
//! | Field        | Required | Allowed values  | Allowed special characters |
//! | ------------ | -------- | --------------- | -------------------------- |
//! | Seconds      | Optional | 0-59            | * , - /                    |
//! | Minutes      | Yes      | 0-59            | * , - /                    |
//! | Hours        | Yes      | 0-23            | * , - /                    |
//! | Day of Month | Yes      | 1-31            | * , - / ? L W              |
//! | Month        | Yes      | 1-12 or JAN-DEC | * , - /                    |
//! | Day of Week  | Yes      | 0-7 or SUN-SAT  | * , - / ? # L              |
//!
//! When both day of month and day of week are restricted, a day matches if
//! either one does, unless the parser is configured with
//! [`dom_and_dow`](parser::CronParserBuilder::dom_and_dow).

pub mod candidate;
mod component;
pub mod errors;
pub mod explain;
mod field;
mod iterator;
pub mod parser;
mod pattern;

pub use errors::CronError;
pub use explain::Explanation;
pub use field::Field;
pub use iterator::CronIterator;
pub use parser::{CronParser, Seconds};
pub use pattern::{CronPattern, DayRule};

use std::str::FromStr;

use chrono::{
    DateTime, Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike,
};
use tracing::trace;

use explain::lang::English;

/// How many executions the enumerator lists when the caller does not say.
pub const DEFAULT_EXECUTION_COUNT: usize = 5;

/// How many years past the reference instant a search may look before it
/// gives up with [`CronError::ExhaustedSchedule`].
pub const DEFAULT_SEARCH_HORIZON_YEARS: u16 = 28;

enum TimeComponent {
    Second = 1,
    Minute,
    Hour,
    Day,
    Month,
    Year,
}

/// A parsed cron expression.
///
/// Build one with [`str::parse`] or, for non-default options, with a
/// [`CronParser`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cron {
    pub pattern: CronPattern,
    search_horizon_years: u16,
}

impl Cron {
    pub(crate) fn from_parts(pattern: CronPattern, search_horizon_years: u16) -> Self {
        Self {
            pattern,
            search_horizon_years,
        }
    }

    /// Explains every field of the expression in English.
    pub fn explain(&self) -> Explanation {
        explain::explain(&self.pattern, &English)
    }

    /// How the day of month and day of week fields combine.
    pub fn day_rule(&self) -> DayRule {
        self.pattern.day_rule()
    }

    /// Evaluates if a given `DateTime` matches the cron pattern.
    ///
    /// The comparison uses the wall-clock time of `time` in its own zone.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{Local, TimeZone};
    /// use cron_explain::Cron;
    ///
    /// let cron: Cron = "0 9 1 1 *".parse().expect("Couldn't parse cron string");
    /// let time = Local.with_ymd_and_hms(2023, 1, 1, 9, 0, 0).unwrap();
    /// assert!(cron.is_time_matching(&time).unwrap());
    /// ```
    pub fn is_time_matching<Tz: TimeZone>(&self, time: &DateTime<Tz>) -> Result<bool, CronError> {
        let naive_time = time.naive_local();

        Ok(self.pattern.second_match(naive_time.second())?
            && self.pattern.minute_match(naive_time.minute())?
            && self.pattern.hour_match(naive_time.hour())?
            && self
                .pattern
                .day_match(naive_time.year(), naive_time.month(), naive_time.day())?
            && self.pattern.month_match(naive_time.month())?)
    }

    /// Finds the next time that matches the pattern, starting from
    /// `start_time`. If `inclusive` is `true`, `start_time` itself is a
    /// candidate; otherwise the search starts one second later.
    ///
    /// Sub-second precision of `start_time` is dropped, a start time with a
    /// fraction of a second is never a candidate itself. Wall-clock times
    /// that do not exist in the zone of `start_time` are skipped, repeated
    /// ones resolve to their earliest instant.
    ///
    /// # Errors
    ///
    /// - `CronError::ExhaustedSchedule`: no match within the search horizon.
    /// - `CronError::InvalidTime` / `CronError::InvalidDate`: the search ran
    ///   off the range `chrono` can represent.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use cron_explain::Cron;
    ///
    /// let cron: Cron = "0 18 * * * 5".parse().expect("Success");
    /// let time = Utc.with_ymd_and_hms(2024, 3, 1, 18, 0, 0).unwrap();
    /// let next = cron.find_next_occurrence(&time, false).unwrap();
    /// assert_eq!(next, Utc.with_ymd_and_hms(2024, 3, 1, 18, 18, 0).unwrap());
    /// ```
    pub fn find_next_occurrence<Tz: TimeZone>(
        &self,
        start_time: &DateTime<Tz>,
        inclusive: bool,
    ) -> Result<DateTime<Tz>, CronError> {
        let local_time = start_time.naive_local();
        let mut naive_time = local_time
            .with_nanosecond(0)
            .ok_or(CronError::InvalidTime)?;
        if !inclusive || local_time.nanosecond() > 0 {
            naive_time = naive_time
                .checked_add_signed(Duration::seconds(1))
                .ok_or(CronError::InvalidTime)?;
        }

        let timezone = start_time.timezone();
        let limit_year = local_time
            .year()
            .saturating_add(i32::from(self.search_horizon_years));

        loop {
            let found = self.find_next_naive(naive_time, limit_year)?;
            match timezone.from_local_datetime(&found).earliest() {
                Some(candidate)
                    if candidate > *start_time || (inclusive && candidate == *start_time) =>
                {
                    return Ok(candidate);
                }
                Some(_) => trace!(%found, "skipping repeated wall-clock time"),
                None => trace!(%found, "skipping wall-clock time missing from the time zone"),
            }
            naive_time = found
                .checked_add_signed(Duration::seconds(1))
                .ok_or(CronError::InvalidTime)?;
        }
    }

    /// Creates a `CronIterator` starting from the specified time.
    ///
    /// The iterator yields `start_from` itself first if it matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::Utc;
    /// use cron_explain::Cron;
    ///
    /// let cron: Cron = "* * * * *".parse().expect("Couldn't parse cron string");
    /// for time in cron.iter_from(Utc::now()).take(5) {
    ///     println!("{}", time.unwrap());
    /// }
    /// ```
    pub fn iter_from<Tz: TimeZone>(&self, start_from: DateTime<Tz>) -> CronIterator<Tz> {
        CronIterator::new(self.clone(), start_from, true)
    }

    /// Creates a `CronIterator` that only yields times after `start_after`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use cron_explain::Cron;
    ///
    /// let cron: Cron = "0 0 1 1 *".parse().expect("Couldn't parse cron string");
    /// let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    /// let next: Vec<_> = cron.iter_after(start).take(2).collect::<Result<_, _>>().unwrap();
    /// assert_eq!(next[0], Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    /// assert_eq!(next[1], Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    /// ```
    pub fn iter_after<Tz: TimeZone>(&self, start_after: DateTime<Tz>) -> CronIterator<Tz> {
        CronIterator::new(self.clone(), start_after, false)
    }

    // Walks the naive calendar from `current_time` until every field matches.
    // Each mismatch rolls the offending component forward and resets the
    // smaller ones, then starts over from the month.
    fn find_next_naive(
        &self,
        mut current_time: NaiveDateTime,
        limit_year: i32,
    ) -> Result<NaiveDateTime, CronError> {
        loop {
            if current_time.year() > limit_year {
                return Err(CronError::ExhaustedSchedule {
                    horizon_years: self.search_horizon_years,
                });
            }

            if !self.pattern.month_match(current_time.month())? {
                increment_time_component(&mut current_time, TimeComponent::Month)?;
                continue;
            }

            if !self.pattern.day_match(
                current_time.year(),
                current_time.month(),
                current_time.day(),
            )? {
                increment_time_component(&mut current_time, TimeComponent::Day)?;
                continue;
            }

            match self.pattern.next_hour_match(current_time.hour())? {
                Some(next_match) if next_match != current_time.hour() => {
                    set_time_component(&mut current_time, TimeComponent::Hour, next_match)?;
                }
                Some(_) => {}
                None => {
                    increment_time_component(&mut current_time, TimeComponent::Day)?;
                    continue;
                }
            }

            match self.pattern.next_minute_match(current_time.minute())? {
                Some(next_match) if next_match != current_time.minute() => {
                    set_time_component(&mut current_time, TimeComponent::Minute, next_match)?;
                }
                Some(_) => {}
                None => {
                    increment_time_component(&mut current_time, TimeComponent::Hour)?;
                    continue;
                }
            }

            match self.pattern.next_second_match(current_time.second())? {
                Some(next_match) => {
                    set_time_component(&mut current_time, TimeComponent::Second, next_match)?;
                }
                None => {
                    increment_time_component(&mut current_time, TimeComponent::Minute)?;
                    continue;
                }
            }

            return Ok(current_time);
        }
    }
}

impl FromStr for Cron {
    type Err = CronError;

    fn from_str(cron_string: &str) -> Result<Cron, CronError> {
        CronParser::new().parse(cron_string)
    }
}

impl std::fmt::Display for Cron {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}

impl TryFrom<String> for Cron {
    type Error = CronError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Cron> for String {
    fn from(cron: Cron) -> Self {
        cron.pattern.pattern
    }
}

#[cfg(feature = "serde")]
mod serialization {
    use std::fmt;

    use serde::{
        de::{self, Visitor},
        Deserialize, Deserializer, Serialize, Serializer,
    };

    use crate::Cron;

    impl Serialize for Cron {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            serializer.serialize_str(self.pattern.as_str())
        }
    }

    struct CronVisitor;

    impl Visitor<'_> for CronVisitor {
        type Value = Cron;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a valid cron expression")
        }

        fn visit_str<E: de::Error>(self, value: &str) -> Result<Self::Value, E> {
            value.parse().map_err(de::Error::custom)
        }
    }

    impl<'de> Deserialize<'de> for Cron {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            deserializer.deserialize_str(CronVisitor)
        }
    }
}

/// Whether `expression` is a well formed 5 or 6 field cron expression.
///
/// ```
/// use cron_explain::validate_cron_expression;
///
/// assert!(validate_cron_expression("0 12 * * MON-FRI"));
/// assert!(!validate_cron_expression("0 12 * *"));
/// ```
pub fn validate_cron_expression(expression: &str) -> bool {
    CronParser::new().parse(expression).is_ok()
}

/// Explains every field of `expression`.
///
/// Fails with the same error [`validate_cron_expression`] would reject the
/// expression for.
pub fn parse_cron_expression(expression: &str) -> Result<Explanation, CronError> {
    Ok(CronParser::new().parse(expression)?.explain())
}

/// The next `count` times `expression` fires after now, in local time.
pub fn generate_next_executions(
    expression: &str,
    count: usize,
) -> Result<Vec<DateTime<Local>>, CronError> {
    generate_next_executions_from(expression, count, &Local::now())
}

/// The next `count` times `expression` fires strictly after `from`, in the
/// zone of `from`.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use cron_explain::generate_next_executions_from;
///
/// let from = Utc.with_ymd_and_hms(2023, 12, 31, 12, 0, 0).unwrap();
/// let times = generate_next_executions_from("0 0 1 1 *", 3, &from).unwrap();
/// assert_eq!(times.len(), 3);
/// assert_eq!(times[2], Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
/// ```
pub fn generate_next_executions_from<Tz: TimeZone>(
    expression: &str,
    count: usize,
    from: &DateTime<Tz>,
) -> Result<Vec<DateTime<Tz>>, CronError> {
    let cron = CronParser::new().parse(expression)?;
    cron.iter_after(from.clone()).take(count).collect()
}

// Recursive function to handle setting the time and managing overflows.
#[allow(clippy::too_many_arguments)]
fn set_time(
    current_time: &mut NaiveDateTime,
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
    component: TimeComponent,
) -> Result<(), CronError> {
    match (
        NaiveDate::from_ymd_opt(year, month, day),
        NaiveTime::from_hms_opt(hour, minute, second),
    ) {
        (Some(date), Some(time)) => {
            *current_time = date.and_time(time);
            Ok(())
        }
        // Overflow carries into the next larger component
        _ => match component {
            TimeComponent::Second => set_time(
                current_time,
                year,
                month,
                day,
                hour,
                minute + 1,
                0,
                TimeComponent::Minute,
            ),
            TimeComponent::Minute => set_time(
                current_time,
                year,
                month,
                day,
                hour + 1,
                0,
                0,
                TimeComponent::Hour,
            ),
            TimeComponent::Hour => set_time(
                current_time,
                year,
                month,
                day + 1,
                0,
                0,
                0,
                TimeComponent::Day,
            ),
            TimeComponent::Day => set_time(
                current_time,
                year,
                month + 1,
                1,
                0,
                0,
                0,
                TimeComponent::Month,
            ),
            TimeComponent::Month => {
                set_time(current_time, year + 1, 1, 1, 0, 0, 0, TimeComponent::Year)
            }
            TimeComponent::Year => Err(CronError::InvalidDate),
        },
    }
}

fn set_time_component(
    current_time: &mut NaiveDateTime,
    component: TimeComponent,
    set_to: u32,
) -> Result<(), CronError> {
    let (year, month, day, hour, minute) = (
        current_time.year(),
        current_time.month(),
        current_time.day(),
        current_time.hour(),
        current_time.minute(),
    );

    // Dates are only ever advanced, never set directly
    match component {
        TimeComponent::Year | TimeComponent::Month | TimeComponent::Day => {
            Err(CronError::InvalidDate)
        }
        TimeComponent::Hour => set_time(current_time, year, month, day, set_to, 0, 0, component),
        TimeComponent::Minute => {
            set_time(current_time, year, month, day, hour, set_to, 0, component)
        }
        TimeComponent::Second => set_time(
            current_time,
            year,
            month,
            day,
            hour,
            minute,
            set_to,
            component,
        ),
    }
}

fn increment_time_component(
    current_time: &mut NaiveDateTime,
    component: TimeComponent,
) -> Result<(), CronError> {
    let (year, month, day, hour, minute, second) = (
        current_time.year(),
        current_time.month(),
        current_time.day(),
        current_time.hour(),
        current_time.minute(),
        current_time.second(),
    );

    match component {
        // Years advance through the month overflow in `set_time`
        TimeComponent::Year => Err(CronError::InvalidDate),
        TimeComponent::Month => set_time(current_time, year, month + 1, 1, 0, 0, 0, component),
        TimeComponent::Day => set_time(current_time, year, month, day + 1, 0, 0, 0, component),
        TimeComponent::Hour => set_time(current_time, year, month, day, hour + 1, 0, 0, component),
        TimeComponent::Minute => set_time(
            current_time,
            year,
            month,
            day,
            hour,
            minute + 1,
            0,
            component,
        ),
        TimeComponent::Second => set_time(
            current_time,
            year,
            month,
            day,
            hour,
            minute,
            second + 1,
            component,
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, Utc};
    use rstest::rstest;

    fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, second)
            .unwrap()
    }

    fn next_runs(cron: &Cron, start: DateTime<Utc>, count: usize) -> Vec<DateTime<Utc>> {
        cron.iter_after(start)
            .take(count)
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn test_is_time_matching() -> Result<(), CronError> {
        let cron: Cron = "0 9 1 1 *".parse()?;
        assert!(cron.is_time_matching(&utc(2023, 1, 1, 9, 0, 0))?);
        assert!(!cron.is_time_matching(&utc(2023, 1, 1, 10, 0, 0))?);
        assert!(!cron.is_time_matching(&utc(2023, 1, 1, 9, 0, 1))?);
        Ok(())
    }

    #[test]
    fn test_last_day_of_february() -> Result<(), CronError> {
        let cron: Cron = "0 9 L 2 *".parse()?;
        assert!(cron.is_time_matching(&utc(2023, 2, 28, 9, 0, 0))?);
        assert!(!cron.is_time_matching(&utc(2023, 2, 27, 9, 0, 0))?);
        assert!(cron.is_time_matching(&utc(2024, 2, 29, 9, 0, 0))?);
        assert!(!cron.is_time_matching(&utc(2024, 2, 28, 9, 0, 0))?);
        Ok(())
    }

    #[rstest]
    #[case("0 0 * * FRI#L")]
    #[case("0 0 * * FRIl")]
    #[case("0 0 * * 5L")]
    fn test_last_friday_of_year(#[case] pattern: &str) -> Result<(), CronError> {
        let cron: Cron = pattern.parse()?;
        assert!(cron.is_time_matching(&utc(2023, 12, 29, 0, 0, 0))?);
        assert!(!cron.is_time_matching(&utc(2023, 12, 22, 0, 0, 0))?);
        Ok(())
    }

    #[test]
    fn test_find_next_occurrence() -> Result<(), CronError> {
        let cron: Cron = "* * * * * *".parse()?;
        let next = cron.find_next_occurrence(&utc(2023, 1, 1, 0, 0, 29), false)?;
        assert_eq!(next, utc(2023, 1, 1, 0, 0, 30));
        Ok(())
    }

    #[test]
    fn test_find_next_minute() -> Result<(), CronError> {
        let cron: Cron = "* * * * *".parse()?;
        let next = cron.find_next_occurrence(&utc(2023, 1, 1, 0, 0, 29), false)?;
        assert_eq!(next, utc(2023, 1, 1, 0, 1, 0));
        Ok(())
    }

    #[test]
    fn test_wrap_month_and_year() -> Result<(), CronError> {
        let cron: Cron = "0 0 15 * * *".parse()?;
        let next = cron.find_next_occurrence(&utc(2023, 12, 31, 16, 0, 0), false)?;
        assert_eq!(next, utc(2024, 1, 1, 15, 0, 0));
        Ok(())
    }

    #[test]
    fn test_find_next_occurrence_edge_case_inclusive() -> Result<(), CronError> {
        let cron = CronParser::builder()
            .seconds(Seconds::Required)
            .build()
            .parse("59 59 23 * * *")?;
        let start = utc(2023, 3, 14, 23, 59, 59);
        assert_eq!(cron.find_next_occurrence(&start, true)?, start);
        assert_eq!(
            cron.find_next_occurrence(&start, false)?,
            utc(2023, 3, 15, 23, 59, 59)
        );
        Ok(())
    }

    #[test]
    fn test_sub_second_start_is_truncated() -> Result<(), CronError> {
        let cron: Cron = "* * * * * *".parse()?;
        let start = utc(2023, 1, 1, 0, 0, 10) + Duration::milliseconds(500);
        assert_eq!(
            cron.find_next_occurrence(&start, true)?,
            utc(2023, 1, 1, 0, 0, 11)
        );
        assert_eq!(
            cron.find_next_occurrence(&start, false)?,
            utc(2023, 1, 1, 0, 0, 11)
        );
        Ok(())
    }

    #[test]
    fn test_weekday_pattern_correct_weekdays() -> Result<(), CronError> {
        let cron: Cron = "0 0 0 * * 5,6".parse()?;
        let runs = next_runs(&cron, utc(2022, 2, 17, 0, 0, 0), 6);
        let days: Vec<(u32, u32)> = runs.iter().map(|t| (t.month(), t.day())).collect();
        assert_eq!(days, vec![(2, 18), (2, 19), (2, 25), (2, 26), (3, 4), (3, 5)]);
        Ok(())
    }

    #[test]
    fn test_weekday_pattern_combined_with_day_of_month() -> Result<(), CronError> {
        let cron: Cron = "59 59 23 2 * 6".parse()?;
        let runs = next_runs(&cron, utc(2022, 1, 31, 0, 0, 0), 6);
        let days: Vec<(u32, u32)> = runs.iter().map(|t| (t.month(), t.day())).collect();
        assert_eq!(days, vec![(2, 2), (2, 5), (2, 12), (2, 19), (2, 26), (3, 2)]);
        Ok(())
    }

    #[test]
    fn test_weekday_pattern_alone() -> Result<(), CronError> {
        let cron: Cron = "15 9 * * mon".parse()?;
        let runs = next_runs(&cron, utc(2022, 2, 28, 23, 59, 0), 3);
        assert_eq!(
            runs,
            vec![
                utc(2022, 3, 7, 9, 15, 0),
                utc(2022, 3, 14, 9, 15, 0),
                utc(2022, 3, 21, 9, 15, 0),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_cron_expression_13w_wed() -> Result<(), CronError> {
        let cron: Cron = "0 0 13W * WED".parse()?;
        let runs: Vec<_> = cron
            .iter_from(utc(2024, 1, 1, 0, 0, 0))
            .take(5)
            .collect::<Result<_, _>>()?;
        assert_eq!(
            runs,
            vec![
                utc(2024, 1, 3, 0, 0, 0),
                utc(2024, 1, 10, 0, 0, 0),
                utc(2024, 1, 12, 0, 0, 0),
                utc(2024, 1, 17, 0, 0, 0),
                utc(2024, 1, 24, 0, 0, 0),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_cron_expression_31dec_fri() -> Result<(), CronError> {
        let cron = CronParser::builder()
            .seconds(Seconds::Required)
            .dom_and_dow(true)
            .build()
            .parse("0 0 0 31 12 FRI")?;
        let runs: Vec<_> = cron
            .iter_from(utc(2024, 1, 1, 0, 0, 0))
            .take(5)
            .collect::<Result<_, _>>()?;
        assert_eq!(
            runs,
            vec![
                utc(2027, 12, 31, 0, 0, 0),
                utc(2032, 12, 31, 0, 0, 0),
                utc(2038, 12, 31, 0, 0, 0),
                utc(2049, 12, 31, 0, 0, 0),
                utc(2055, 12, 31, 0, 0, 0),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_cron_expression_29feb_march_fri() -> Result<(), CronError> {
        let cron = CronParser::builder()
            .dom_and_dow(true)
            .build()
            .parse("0 0 29 2-3 FRI")?;
        let runs: Vec<_> = cron
            .iter_from(utc(2024, 1, 1, 0, 0, 0))
            .take(5)
            .collect::<Result<_, _>>()?;
        assert_eq!(
            runs,
            vec![
                utc(2024, 3, 29, 0, 0, 0),
                utc(2030, 3, 29, 0, 0, 0),
                utc(2036, 2, 29, 0, 0, 0),
                utc(2041, 3, 29, 0, 0, 0),
                utc(2047, 3, 29, 0, 0, 0),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_is_time_matching_different_time_zones() -> Result<(), CronError> {
        let cron: Cron = "0 12 * * *".parse()?;
        let east = FixedOffset::east_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2023, 1, 1, 12, 0, 0)
            .unwrap();
        let west = FixedOffset::west_opt(3600)
            .unwrap()
            .with_ymd_and_hms(2023, 1, 1, 12, 0, 0)
            .unwrap();
        assert!(cron.is_time_matching(&east)?);
        assert!(cron.is_time_matching(&west)?);
        Ok(())
    }

    #[test]
    fn test_iterator_large_time_jumps() -> Result<(), CronError> {
        let cron: Cron = "0 0 * * *".parse()?;
        let mut iterator = cron.iter_after(utc(2020, 1, 1, 0, 0, 0));
        // 2020 and 2024 are leap years
        let next_run = iterator.nth(365 * 5 + 1).transpose()?;
        assert_eq!(next_run, Some(utc(2025, 1, 1, 0, 0, 0)));
        Ok(())
    }

    #[test]
    fn test_handling_different_month_lengths() -> Result<(), CronError> {
        let cron: Cron = "0 0 L * *".parse()?;
        assert_eq!(
            cron.find_next_occurrence(&utc(2023, 2, 1, 0, 0, 0), false)?,
            utc(2023, 2, 28, 0, 0, 0)
        );
        assert_eq!(
            cron.find_next_occurrence(&utc(2024, 2, 1, 0, 0, 0), false)?,
            utc(2024, 2, 29, 0, 0, 0)
        );
        assert_eq!(
            cron.find_next_occurrence(&utc(2023, 4, 1, 0, 0, 0), false)?,
            utc(2023, 4, 30, 0, 0, 0)
        );
        Ok(())
    }

    #[test]
    fn test_non_standard_intervals_with_offset() -> Result<(), CronError> {
        let cron: Cron = "7/29 2/13 * * *".parse()?;
        let runs = next_runs(&cron, utc(2023, 1, 1, 0, 0, 0), 3);
        assert_eq!(
            runs,
            vec![
                utc(2023, 1, 1, 2, 7, 0),
                utc(2023, 1, 1, 2, 36, 0),
                utc(2023, 1, 1, 15, 7, 0),
            ]
        );
        Ok(())
    }

    #[test]
    fn test_time_overflow() -> Result<(), CronError> {
        let cron_match: Cron = "59 59 23 31 12 *".parse()?;
        let cron_next: Cron = "0 0 0 1 1 *".parse()?;
        let time_matching = utc(2023, 12, 31, 23, 59, 59);

        assert!(cron_match.is_time_matching(&time_matching)?);
        assert_eq!(
            cron_next.find_next_occurrence(&time_matching, false)?,
            utc(2024, 1, 1, 0, 0, 0)
        );
        assert_eq!(
            cron_match.find_next_occurrence(&time_matching, false)?,
            utc(2024, 12, 31, 23, 59, 59)
        );
        Ok(())
    }

    #[test]
    fn test_impossible_date_exhausts_schedule() -> Result<(), CronError> {
        let cron: Cron = "0 0 31 2 *".parse()?;
        assert_eq!(
            cron.find_next_occurrence(&utc(2024, 1, 1, 0, 0, 0), false),
            Err(CronError::ExhaustedSchedule {
                horizon_years: DEFAULT_SEARCH_HORIZON_YEARS
            })
        );
        Ok(())
    }

    #[test]
    fn test_custom_search_horizon() -> Result<(), CronError> {
        let cron = CronParser::builder()
            .search_horizon_years(2)
            .build()
            .parse("0 0 29 2 *")?;
        // The next leap day is three years away
        assert!(cron
            .find_next_occurrence(&utc(2024, 3, 1, 0, 0, 0), false)
            .unwrap_err()
            .is_exhausted_schedule());
        assert_eq!(
            cron.find_next_occurrence(&utc(2027, 3, 1, 0, 0, 0), false)?,
            utc(2028, 2, 29, 0, 0, 0)
        );
        Ok(())
    }

    #[test]
    fn test_generate_next_executions_from() -> Result<(), CronError> {
        let times = generate_next_executions_from("*/15 * * * *", 4, &utc(2024, 5, 1, 10, 7, 0))?;
        assert_eq!(
            times,
            vec![
                utc(2024, 5, 1, 10, 15, 0),
                utc(2024, 5, 1, 10, 30, 0),
                utc(2024, 5, 1, 10, 45, 0),
                utc(2024, 5, 1, 11, 0, 0),
            ]
        );
        assert!(generate_next_executions_from("*/15 * * * *", 0, &utc(2024, 5, 1, 10, 7, 0))?
            .is_empty());
        Ok(())
    }

    #[test]
    fn test_generate_next_executions_local() -> Result<(), CronError> {
        let now = Local::now();
        let times = generate_next_executions("* * * * *", DEFAULT_EXECUTION_COUNT)?;
        assert_eq!(times.len(), DEFAULT_EXECUTION_COUNT);
        assert!(times[0] > now);
        assert!(times.windows(2).all(|pair| pair[0] < pair[1]));
        Ok(())
    }

    #[test]
    fn test_invalid_expression_fails_every_operation() {
        assert!(!validate_cron_expression("* * *"));
        assert!(parse_cron_expression("* * *").unwrap_err().is_malformed());
        assert!(generate_next_executions("* * *", 0)
            .unwrap_err()
            .is_malformed());
    }

    #[test]
    fn test_display_and_string_conversions() -> Result<(), CronError> {
        let cron = Cron::try_from(" 0 12 * * MON ".to_string())?;
        assert_eq!(cron.to_string(), "0 12 * * MON");
        assert_eq!(String::from(cron), "0 12 * * MON");
        Ok(())
    }

    #[test]
    fn test_time_helpers_only_advance_dates() {
        let mut time = utc(2024, 12, 31, 23, 59, 59).naive_utc();
        assert!(matches!(
            set_time_component(&mut time, TimeComponent::Day, 5),
            Err(CronError::InvalidDate)
        ));
        assert!(matches!(
            increment_time_component(&mut time, TimeComponent::Year),
            Err(CronError::InvalidDate)
        ));

        increment_time_component(&mut time, TimeComponent::Month).unwrap();
        assert_eq!(time, utc(2025, 1, 1, 0, 0, 0).naive_utc());

        set_time_component(&mut time, TimeComponent::Minute, 75).unwrap();
        assert_eq!(time, utc(2025, 1, 1, 1, 0, 0).naive_utc());
    }
}
