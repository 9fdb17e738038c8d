use chrono::{Datelike, Duration, NaiveDate, Weekday};
use strum::{Display, EnumIs};

use crate::component::{CronComponent, ALL_BIT, CLOSEST_WEEKDAY_BIT, LAST_BIT, NTH_BITS};
use crate::errors::CronError;
use crate::field::Field;

/// How the day-of-month and day-of-week fields combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIs)]
pub enum DayRule {
    /// Both day fields are wildcards.
    #[strum(serialize = "every day")]
    Any,
    /// Only the day of month is restricted.
    #[strum(serialize = "day of month only")]
    DayOfMonth,
    /// Only the day of week is restricted.
    #[strum(serialize = "day of week only")]
    DayOfWeek,
    /// Both are restricted and either one matching is enough.
    #[strum(serialize = "day of month or day of week")]
    Either,
    /// Both are restricted and both have to match.
    #[strum(serialize = "day of month and day of week")]
    Both,
}

// The parsed form of a cron expression. It keeps the fields as written, for
// explanations, next to the components used for matching.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CronPattern {
    pub(crate) pattern: String,     // The original expression, trimmed
    pub(crate) tokens: Vec<String>, // Fields as written, 5 or 6 of them
    pub seconds: CronComponent,
    pub minutes: CronComponent,
    pub hours: CronComponent,
    pub days: CronComponent,
    pub months: CronComponent,
    pub days_of_week: CronComponent,

    pub(crate) star_dom: bool,
    pub(crate) star_dow: bool,
    pub(crate) dom_and_dow: bool,
}

impl CronPattern {
    /// `true` when the expression was written with a leading seconds field.
    pub fn has_seconds(&self) -> bool {
        self.tokens.len() == 6
    }

    /// The fields as written, paired with their position.
    pub fn tokens(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        let fields: &[Field] = if self.has_seconds() {
            &Field::ALL
        } else {
            &Field::WITHOUT_SECONDS
        };
        fields
            .iter()
            .copied()
            .zip(self.tokens.iter().map(String::as_str))
    }

    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn day_rule(&self) -> DayRule {
        match (self.star_dom, self.star_dow) {
            (true, true) => DayRule::Any,
            (false, true) => DayRule::DayOfMonth,
            (true, false) => DayRule::DayOfWeek,
            (false, false) if self.dom_and_dow => DayRule::Both,
            (false, false) => DayRule::Either,
        }
    }

    // Whether `date` is the nth occurrence of its weekday within its month.
    fn is_nth_weekday_of_month(date: NaiveDate, nth: u32) -> bool {
        (date.day() - 1) / 7 + 1 == nth
    }

    fn is_last_weekday_of_month(date: NaiveDate) -> bool {
        (date + Duration::days(7)).month() != date.month()
    }

    // Checks if a given year, month and day match the day part of the cron pattern.
    pub fn day_match(&self, year: i32, month: u32, day: u32) -> Result<bool, CronError> {
        let date = NaiveDate::from_ymd_opt(year, month, day).ok_or(CronError::InvalidDate)?;

        let mut day_matches = self.days.is_bit_set(day as u8, ALL_BIT)?;
        if !day_matches && self.days.is_feature_enabled(LAST_BIT) {
            day_matches = day == Self::last_day_of_month(year, month)?;
        }
        if !day_matches {
            day_matches = self.closest_weekday(date)?;
        }

        let weekday = date.weekday().num_days_from_sunday() as u8;
        let mut dow_matches = self.days_of_week.is_bit_set(weekday, ALL_BIT)?;
        if !dow_matches {
            for (index, nth_bit) in NTH_BITS.iter().enumerate() {
                if self.days_of_week.is_bit_set(weekday, *nth_bit)?
                    && Self::is_nth_weekday_of_month(date, index as u32 + 1)
                {
                    dow_matches = true;
                    break;
                }
            }
        }
        if !dow_matches && self.days_of_week.is_bit_set(weekday, LAST_BIT)? {
            dow_matches = Self::is_last_weekday_of_month(date);
        }

        Ok(match self.day_rule() {
            DayRule::Any => true,
            DayRule::DayOfMonth => day_matches,
            DayRule::DayOfWeek => dow_matches,
            DayRule::Either => day_matches || dow_matches,
            DayRule::Both => day_matches && dow_matches,
        })
    }

    // Helper function to find the last day of a given month
    pub(crate) fn last_day_of_month(year: i32, month: u32) -> Result<u32, CronError> {
        let (next_year, next_month) = if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        };
        NaiveDate::from_ymd_opt(next_year, next_month, 1)
            .and_then(|first| first.pred_opt())
            .map(|last| last.day())
            .ok_or(CronError::InvalidDate)
    }

    // The weekday a `nW` entry resolves to in the given month. Saturdays move
    // back to Friday and Sundays forward to Monday, without leaving the month.
    fn nearest_weekday(year: i32, month: u32, day: u32) -> Option<u32> {
        let date = NaiveDate::from_ymd_opt(year, month, day)?;
        let last_day = Self::last_day_of_month(year, month).ok()?;
        Some(match date.weekday() {
            Weekday::Sat if day == 1 => day + 2,
            Weekday::Sat => day - 1,
            Weekday::Sun if day == last_day => day - 2,
            Weekday::Sun => day + 1,
            _ => day,
        })
    }

    // Checks whether `date` is the weekday picked by any `nW` entry.
    fn closest_weekday(&self, date: NaiveDate) -> Result<bool, CronError> {
        let day = date.day();
        for candidate in day.saturating_sub(2).max(1)..=(day + 2).min(31) {
            if self.days.is_bit_set(candidate as u8, CLOSEST_WEEKDAY_BIT)?
                && Self::nearest_weekday(date.year(), date.month(), candidate) == Some(day)
            {
                return Ok(true);
            }
        }
        Ok(false)
    }

    pub fn month_match(&self, month: u32) -> Result<bool, CronError> {
        if month == 0 || month > 12 {
            return Err(CronError::InvalidDate);
        }
        self.months.is_bit_set(month as u8, ALL_BIT)
    }

    pub fn hour_match(&self, hour: u32) -> Result<bool, CronError> {
        if hour > 23 {
            return Err(CronError::InvalidTime);
        }
        self.hours.is_bit_set(hour as u8, ALL_BIT)
    }

    pub fn minute_match(&self, minute: u32) -> Result<bool, CronError> {
        if minute > 59 {
            return Err(CronError::InvalidTime);
        }
        self.minutes.is_bit_set(minute as u8, ALL_BIT)
    }

    pub fn second_match(&self, second: u32) -> Result<bool, CronError> {
        if second > 59 {
            return Err(CronError::InvalidTime);
        }
        self.seconds.is_bit_set(second as u8, ALL_BIT)
    }

    // Finds the next hour at or after `hour` that matches, if any remain today.
    pub fn next_hour_match(&self, hour: u32) -> Result<Option<u32>, CronError> {
        if hour > 23 {
            return Err(CronError::InvalidTime);
        }
        Ok(self.hours.next_set(hour as u8)?.map(u32::from))
    }

    pub fn next_minute_match(&self, minute: u32) -> Result<Option<u32>, CronError> {
        if minute > 59 {
            return Err(CronError::InvalidTime);
        }
        Ok(self.minutes.next_set(minute as u8)?.map(u32::from))
    }

    pub fn next_second_match(&self, second: u32) -> Result<Option<u32>, CronError> {
        if second > 59 {
            return Err(CronError::InvalidTime);
        }
        Ok(self.seconds.next_set(second as u8)?.map(u32::from))
    }
}

impl std::fmt::Display for CronPattern {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.pattern)
    }
}
