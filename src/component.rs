use crate::errors::CronError;
use crate::field::Field;

// Constants for flags
pub const NONE_BIT: u8 = 0;
pub const ALL_BIT: u8 = 1;

// Used for nth weekday
pub const NTH_1ST_BIT: u8 = 1 << 1;
pub const NTH_2ND_BIT: u8 = 1 << 2;
pub const NTH_3RD_BIT: u8 = 1 << 3;
pub const NTH_4TH_BIT: u8 = 1 << 4;
pub const NTH_5TH_BIT: u8 = 1 << 5;
pub const NTH_ALL: u8 = NTH_1ST_BIT | NTH_2ND_BIT | NTH_3RD_BIT | NTH_4TH_BIT | NTH_5TH_BIT;
pub const NTH_BITS: [u8; 5] = [NTH_1ST_BIT, NTH_2ND_BIT, NTH_3RD_BIT, NTH_4TH_BIT, NTH_5TH_BIT];

// Used for last day of month, or last weekday of month
pub const LAST_BIT: u8 = 1 << 6;

// Used for the weekday closest to a day of month
pub const CLOSEST_WEEKDAY_BIT: u8 = 1 << 7;

/// The parsed values of one cron field.
///
/// Each possible value owns a byte of flags; `ALL_BIT` marks a plain match
/// while the other bits carry the day specific modifiers (`L`, `W`, `#n`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CronComponent {
    field: Field,
    bitfields: Vec<u8>,
    pub min: u8,
    pub max: u8,
    features: u8,         // Bits this field may use at all
    enabled_features: u8, // Component-wide bits, like a bare 'L' in day of month
}

impl CronComponent {
    pub fn new(field: Field) -> Self {
        let features = match field {
            Field::DayOfMonth => ALL_BIT | LAST_BIT | CLOSEST_WEEKDAY_BIT,
            Field::DayOfWeek => ALL_BIT | LAST_BIT | NTH_ALL,
            _ => ALL_BIT,
        };
        Self {
            field,
            bitfields: vec![NONE_BIT; usize::from(field.max()) + 1],
            min: field.min(),
            max: field.max(),
            features,
            enabled_features: NONE_BIT,
        }
    }

    pub fn field(&self) -> Field {
        self.field
    }

    fn check(&self, pos: u8, bit: u8) -> Result<usize, CronError> {
        if pos < self.min || pos > self.max {
            return Err(CronError::invalid_field(
                self.field,
                format!("value {pos} is out of range ({}-{})", self.min, self.max),
            ));
        }
        if self.features & bit != bit {
            return Err(CronError::invalid_field(
                self.field,
                format!("modifier 0b{bit:08b} is not supported here"),
            ));
        }
        Ok(usize::from(pos))
    }

    pub fn set_bit(&mut self, pos: u8, bit: u8) -> Result<(), CronError> {
        let index = self.check(pos, bit)?;
        self.bitfields[index] |= bit;
        Ok(())
    }

    pub fn unset_bit(&mut self, pos: u8, bit: u8) -> Result<(), CronError> {
        let index = self.check(pos, bit)?;
        self.bitfields[index] &= !bit;
        Ok(())
    }

    pub fn is_bit_set(&self, pos: u8, bit: u8) -> Result<bool, CronError> {
        let index = self.check(pos, bit)?;
        Ok(self.bitfields[index] & bit != 0)
    }

    /// Smallest value at or after `from` carrying a plain match.
    pub fn next_set(&self, from: u8) -> Result<Option<u8>, CronError> {
        for value in from.max(self.min)..=self.max {
            if self.is_bit_set(value, ALL_BIT)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Values of the field that carry `bit`, ascending.
    pub fn values_with(&self, bit: u8) -> impl Iterator<Item = u8> + '_ {
        (self.min..=self.max).filter(move |&value| self.is_bit_set(value, bit).unwrap_or(false))
    }

    /// Whether every value of the field is a plain match. Day of week is
    /// checked over 0-6, after 7 has been folded into 0.
    pub fn is_full(&self) -> bool {
        let max = if self.field.is_day_of_week() { 6 } else { self.max };
        (self.min..=max).all(|value| self.bitfields[usize::from(value)] & ALL_BIT != 0)
    }

    pub fn enable_feature(&mut self, feature: u8) -> Result<(), CronError> {
        if self.features & feature != feature {
            return Err(CronError::invalid_field(
                self.field,
                "'L' is not supported here",
            ));
        }
        self.enabled_features |= feature;
        Ok(())
    }

    pub fn is_feature_enabled(&self, feature: u8) -> bool {
        (self.enabled_features & feature) == feature
    }

    /// Parses one normalized field: upper case, aliases replaced, `?` already
    /// turned into `*`.
    pub fn parse(&mut self, token: &str) -> Result<(), CronError> {
        if token == "*" {
            for value in self.min..=self.max {
                self.set_bit(value, ALL_BIT)?;
            }
            return Ok(());
        }

        for part in token.split(',') {
            if part.is_empty() {
                return Err(CronError::invalid_field(self.field, "empty list element"));
            }
            if part.contains('/') {
                self.handle_stepping(part)?;
            } else if part.contains('-') {
                self.handle_range(part)?;
            } else if part == "L" && self.field.is_day_of_month() {
                self.enable_feature(LAST_BIT)?;
            } else if let Some(day) = part.strip_suffix('W') {
                let day = self.parse_value(day)?;
                self.set_bit(day, CLOSEST_WEEKDAY_BIT)?;
            } else {
                self.handle_number(part)?;
            }
        }
        Ok(())
    }

    fn parse_value(&self, value: &str) -> Result<u8, CronError> {
        value
            .parse::<u8>()
            .map_err(|_| CronError::invalid_field(self.field, format!("'{value}' is not a number")))
    }

    // Splits off '#n', '#L' or a trailing 'L' and returns the flag it stands for.
    fn split_modifier<'a>(&self, value: &'a str) -> Result<(&'a str, u8), CronError> {
        if let Some((base, nth)) = value.split_once('#') {
            if nth == "L" {
                return Ok((base, LAST_BIT));
            }
            let nth = self.parse_value(nth)?;
            return match nth {
                1..=5 => Ok((base, NTH_BITS[usize::from(nth) - 1])),
                _ => Err(CronError::invalid_field(
                    self.field,
                    format!("nth specifier #{nth} must be between 1 and 5"),
                )),
            };
        }
        if self.field.is_day_of_week() {
            if let Some(base) = value.strip_suffix('L') {
                return Ok((base, LAST_BIT));
            }
        }
        Ok((value, ALL_BIT))
    }

    fn handle_number(&mut self, value: &str) -> Result<(), CronError> {
        let (value, bit) = self.split_modifier(value)?;
        let number = self.parse_value(value)?;
        self.set_bit(number, bit)
    }

    fn handle_range(&mut self, range: &str) -> Result<(), CronError> {
        let (range, bit) = self.split_modifier(range)?;
        let (start, end) = self.parse_bounds(range)?;
        for value in start..=end {
            self.set_bit(value, bit)?;
        }
        Ok(())
    }

    fn parse_bounds(&self, range: &str) -> Result<(u8, u8), CronError> {
        let (start, end) = range
            .split_once('-')
            .ok_or_else(|| CronError::invalid_field(self.field, "invalid range syntax"))?;
        let start = self.parse_value(start)?;
        let end = self.parse_value(end)?;
        if start > end {
            return Err(CronError::invalid_field(
                self.field,
                format!("range {start}-{end} is descending"),
            ));
        }
        if start < self.min || end > self.max {
            return Err(CronError::invalid_field(
                self.field,
                format!("range {start}-{end} is out of range ({}-{})", self.min, self.max),
            ));
        }
        Ok((start, end))
    }

    fn handle_stepping(&mut self, stepped: &str) -> Result<(), CronError> {
        let (range, step) = stepped
            .split_once('/')
            .ok_or_else(|| CronError::invalid_field(self.field, "invalid step syntax"))?;
        let step = self.parse_value(step)?;
        if step == 0 {
            return Err(CronError::invalid_field(self.field, "step cannot be zero"));
        }

        let (start, end) = if range == "*" {
            (self.min, self.max)
        } else if range.contains('-') {
            self.parse_bounds(range)?
        } else {
            // A lone start steps through to the end of the field.
            (self.parse_value(range)?, self.max)
        };

        let mut value = start;
        while value <= end {
            self.set_bit(value, ALL_BIT)?;
            value = match value.checked_add(step) {
                Some(next) => next,
                None => break,
            };
        }
        Ok(())
    }
}
