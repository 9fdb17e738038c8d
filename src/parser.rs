//! Parser for cron expressions.
//!
//! [`CronParser::new`] accepts 5-field expressions and 6-field expressions
//! with a leading seconds field, which is what
//! [`validate_cron_expression`](crate::validate_cron_expression) and the other
//! free functions use. Invoking
//!
//! ```rust
//! # use std::str::FromStr as _;
//! # use cron_explain::{Cron, parser::CronParser};
//! Cron::from_str("*/5 * * * *");
//! ```
//!
//! is equivalent to
//!
//! ```rust
//! # use cron_explain::parser::CronParser;
//! CronParser::new().parse("*/5 * * * *");
//! ```
//!
//! Other behaviour is configured through [`CronParser::builder`]:
//!
//! ```rust
//! use cron_explain::parser::{CronParser, Seconds};
//!
//! let parser = CronParser::builder()
//!     .seconds(Seconds::Required)
//!     .dom_and_dow(true)
//!     .search_horizon_years(50)
//!     .build();
//!
//! assert!(parser.parse("0 0 12 13 * FRI").is_ok());
//! assert!(parser.parse("0 12 13 * FRI").is_err());
//! ```

use derive_builder::Builder;
use strum::{Display, EnumIs, EnumString};
use tracing::debug;

use crate::{
    component::{CronComponent, ALL_BIT, LAST_BIT, NTH_BITS},
    errors::CronError,
    field::Field,
    pattern::CronPattern,
    Cron, DEFAULT_SEARCH_HORIZON_YEARS,
};

/// Whether the leading seconds field may, must or must not be present.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIs, EnumString,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Seconds {
    #[default]
    Optional,
    Required,
    Disallowed,
}

impl Seconds {
    fn accepts(self, field_count: usize) -> bool {
        match self {
            Seconds::Optional => field_count == 5 || field_count == 6,
            Seconds::Required => field_count == 6,
            Seconds::Disallowed => field_count == 5,
        }
    }

    fn expected(self) -> &'static str {
        match self {
            Seconds::Optional => "5 or 6",
            Seconds::Required => "6",
            Seconds::Disallowed => "5",
        }
    }
}

/// Parser for cron expressions.
///
/// In order to build a custom cron parser use [`CronParser::builder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Builder)]
#[builder(default, build_fn(skip), pattern = "owned")]
pub struct CronParser {
    /// Configure how seconds should be handled.
    seconds: Seconds,
    /// Require both restricted day fields to match instead of either one.
    dom_and_dow: bool,
    /// How many years past the reference instant the enumerator searches.
    search_horizon_years: u16,
}

impl Default for CronParser {
    fn default() -> Self {
        Self {
            seconds: Seconds::default(),
            dom_and_dow: false,
            search_horizon_years: DEFAULT_SEARCH_HORIZON_YEARS,
        }
    }
}

impl CronParser {
    /// Create a parser with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a builder for custom parsing.
    ///
    /// Equivalent to [`CronParserBuilder::default`].
    pub fn builder() -> CronParserBuilder {
        CronParserBuilder::default()
    }

    /// Parses a cron expression.
    pub fn parse(&self, expression: &str) -> Result<Cron, CronError> {
        self.parse_expression(expression).map_err(|error| {
            debug!(expression, %error, "rejected cron expression");
            error
        })
    }

    fn parse_expression(&self, expression: &str) -> Result<Cron, CronError> {
        let pattern = expression.trim();
        if pattern.is_empty() {
            return Err(CronError::EmptyExpression);
        }

        let tokens: Vec<&str> = pattern.split_whitespace().collect();
        if !self.seconds.accepts(tokens.len()) {
            return Err(CronError::FieldCount {
                found: tokens.len(),
                expected: self.seconds.expected(),
            });
        }

        let fields: &[Field] = if tokens.len() == 6 {
            &Field::ALL
        } else {
            &Field::WITHOUT_SECONDS
        };

        // Seconds default to "0" when omitted
        let mut seconds = CronComponent::new(Field::Second);
        seconds.set_bit(0, ALL_BIT)?;
        let mut minutes = CronComponent::new(Field::Minute);
        let mut hours = CronComponent::new(Field::Hour);
        let mut days = CronComponent::new(Field::DayOfMonth);
        let mut months = CronComponent::new(Field::Month);
        let mut days_of_week = CronComponent::new(Field::DayOfWeek);

        for (&field, token) in fields.iter().zip(&tokens) {
            let normalized = Self::normalize(field, token);
            Self::throw_at_illegal_characters(field, &normalized)?;
            let component = match field {
                Field::Second => {
                    seconds = CronComponent::new(Field::Second);
                    &mut seconds
                }
                Field::Minute => &mut minutes,
                Field::Hour => &mut hours,
                Field::DayOfMonth => &mut days,
                Field::Month => &mut months,
                Field::DayOfWeek => &mut days_of_week,
            };
            component.parse(&normalized)?;
        }

        // Fold 7 into 0 last, ranges like 5-7 need it during parsing
        for bit in [ALL_BIT, LAST_BIT].into_iter().chain(NTH_BITS) {
            if days_of_week.is_bit_set(7, bit)? {
                days_of_week.unset_bit(7, bit)?;
                days_of_week.set_bit(0, bit)?;
            }
        }

        // A day field covering its whole domain is as good as '*'
        let star_dom = days.is_full();
        let star_dow = days_of_week.is_full();

        Ok(Cron::from_parts(
            CronPattern {
                pattern: pattern.to_string(),
                tokens: tokens.iter().map(|token| token.to_string()).collect(),
                seconds,
                minutes,
                hours,
                days,
                months,
                days_of_week,
                star_dom,
                star_dow,
                dom_and_dow: self.dom_and_dow,
            },
            self.search_horizon_years,
        ))
    }

    // Upper-cases a field, turns '?' into '*' in the day fields and replaces
    // month and weekday aliases with their numbers.
    fn normalize(field: Field, token: &str) -> String {
        let token = token.to_ascii_uppercase();
        match field {
            Field::DayOfMonth if token == "?" => "*".to_string(),
            Field::DayOfWeek if token == "?" => "*".to_string(),
            Field::Month | Field::DayOfWeek => field.replace_aliases(&token),
            _ => token,
        }
    }

    // Validates that the field only contains characters legal in its position.
    fn throw_at_illegal_characters(field: Field, token: &str) -> Result<(), CronError> {
        let base_allowed_characters = ['*', '/', ',', '-'];
        let extra = field.extra_characters();

        match token
            .chars()
            .find(|ch| !(ch.is_ascii_digit() || base_allowed_characters.contains(ch) || extra.contains(ch)))
        {
            Some(ch) => Err(CronError::IllegalCharacter {
                field,
                token: token.to_string(),
                ch,
            }),
            None => Ok(()),
        }
    }
}

impl CronParserBuilder {
    pub fn build(self) -> CronParser {
        let CronParserBuilder {
            seconds,
            dom_and_dow,
            search_horizon_years,
        } = self;
        CronParser {
            seconds: seconds.unwrap_or_default(),
            dom_and_dow: dom_and_dow.unwrap_or_default(),
            search_horizon_years: search_horizon_years.unwrap_or(DEFAULT_SEARCH_HORIZON_YEARS),
        }
    }
}
