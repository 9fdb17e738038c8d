//! Field by field explanations of cron expressions.
//!
//! Every field is explained on its own, the way it is written. Aliases such
//! as `MON` or `jan` resolve to their full names, also inside list elements
//! (`JAN-MAR,DEC` reads "At January-March, December"); tokens without a name
//! (`L`, `15W`, `5#2`, weekday `7`) are shown as written.

pub mod lang;

use std::fmt;

use tracing::trace;

pub use lang::{English, Language};

use crate::field::Field;
use crate::pattern::CronPattern;

/// The explanation of every field of an expression.
///
/// `seconds` is only present when the expression was written with six
/// fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Explanation {
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub seconds: Option<String>,
    pub minutes: String,
    pub hours: String,
    pub day_of_month: String,
    pub month: String,
    pub day_of_week: String,
}

impl Explanation {
    /// The phrase for one field, `None` for seconds of a 5-field expression.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Second => self.seconds.as_deref(),
            Field::Minute => Some(&self.minutes),
            Field::Hour => Some(&self.hours),
            Field::DayOfMonth => Some(&self.day_of_month),
            Field::Month => Some(&self.month),
            Field::DayOfWeek => Some(&self.day_of_week),
        }
    }

    /// The present phrases in field order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> + '_ {
        Field::ALL
            .into_iter()
            .filter_map(move |field| self.get(field).map(|phrase| (field, phrase)))
    }

    fn set(&mut self, field: Field, phrase: String) {
        match field {
            Field::Second => self.seconds = Some(phrase),
            Field::Minute => self.minutes = phrase,
            Field::Hour => self.hours = phrase,
            Field::DayOfMonth => self.day_of_month = phrase,
            Field::Month => self.month = phrase,
            Field::DayOfWeek => self.day_of_week = phrase,
        }
    }
}

impl fmt::Display for Explanation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, (field, phrase)) in self.iter().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            write!(f, "{}: {}", field.label(), phrase)?;
        }
        Ok(())
    }
}

/// The syntactic form of one field as written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FieldToken<'a> {
    /// `*`, `*/1`, or `?` in a day field.
    Wildcard,
    /// `*/N`
    Step(u8),
    /// `A-B`, `A-B/N` or `A/N`.
    Range {
        start: &'a str,
        end: Option<&'a str>,
        step: Option<u8>,
    },
    /// `A,B,C`
    List(&'a str),
    /// Anything else, including `L`, `15W` and `5#2`.
    Value(&'a str),
}

impl<'a> FieldToken<'a> {
    pub(crate) fn classify(token: &'a str) -> Self {
        if token == "*" || token == "?" {
            return FieldToken::Wildcard;
        }
        if let Some(step) = token.strip_prefix("*/") {
            return match step.parse::<u8>() {
                Ok(1) => FieldToken::Wildcard,
                Ok(step) => FieldToken::Step(step),
                Err(_) => FieldToken::Value(token),
            };
        }
        if token.contains(',') {
            return FieldToken::List(token);
        }

        let (range, step) = match token.split_once('/') {
            Some((range, step)) => match step.parse::<u8>() {
                Ok(step) => (range, Some(step)),
                Err(_) => return FieldToken::Value(token),
            },
            None => (token, None),
        };
        match range.split_once('-') {
            Some((start, end)) => FieldToken::Range {
                start,
                end: Some(end),
                step,
            },
            None if step.is_some() => FieldToken::Range {
                start: range,
                end: None,
                step,
            },
            None => FieldToken::Value(token),
        }
    }
}

/// Explains every field of `pattern` using the phrases of `lang`.
pub fn explain<L: Language>(pattern: &CronPattern, lang: &L) -> Explanation {
    let mut explanation = Explanation::default();
    for (field, token) in pattern.tokens() {
        explanation.set(field, explain_field(field, token, lang));
    }
    explanation
}

/// Explains a single field token.
pub fn explain_field<L: Language>(field: Field, token: &str, lang: &L) -> String {
    let unit = lang.unit(field);
    match FieldToken::classify(token) {
        FieldToken::Wildcard => lang.every_unit(unit),
        FieldToken::Step(step) => lang.every_x_units(step, unit),
        FieldToken::Range { start, end, step } => {
            let start = value(field, start, lang);
            let phrase = match end {
                Some(end) => lang.from_to(&start, &value(field, end, lang)),
                None => lang.from(&start),
            };
            match step {
                Some(step) if step > 1 => lang.with_step(&phrase, step, unit),
                _ => phrase,
            }
        }
        FieldToken::List(list) => {
            let values: Vec<String> = list.split(',').map(|item| list_item(field, item, lang)).collect();
            lang.at_phrase(&values.join(lang.list_separator()))
        }
        FieldToken::Value(single) => lang.at_phrase(&value(field, single, lang)),
    }
}

// A list element keeps its written shape; only the values in it are named.
fn list_item<L: Language>(field: Field, item: &str, lang: &L) -> String {
    let (range, step) = match item.split_once('/') {
        Some((range, step)) => (range, Some(step)),
        None => (item, None),
    };
    let named = match range.split_once('-') {
        Some((start, end)) => lang.list_range(&value(field, start, lang), &value(field, end, lang)),
        None => value(field, range, lang),
    };
    match step {
        Some(step) => format!("{named}/{step}"),
        None => named,
    }
}

// Resolves a month or weekday to its name. Other fields, and values without
// a name, are shown as written.
fn value<L: Language>(field: Field, token: &str, lang: &L) -> String {
    if !matches!(field, Field::Month | Field::DayOfWeek) {
        return token.to_string();
    }

    let number = token
        .parse::<usize>()
        .ok()
        .or_else(|| field.alias_value(token).map(usize::from));
    let name = number.and_then(|number| match field {
        Field::Month => number
            .checked_sub(1)
            .and_then(|index| lang.month_names().get(index).copied()),
        _ => lang.day_of_week_names().get(number).copied(),
    });

    match name {
        Some(name) => name.to_string(),
        None => {
            trace!(%field, token, "no name for value, showing it as written");
            token.to_string()
        }
    }
}
