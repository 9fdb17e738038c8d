mod english;

pub use english::English;

use crate::field::Field;

// This defines the contract for providing localized phrases.
pub trait Language {
    fn unit(&self, field: Field) -> &'static str;

    fn every_unit(&self, unit: &str) -> String;
    fn every_x_units(&self, step: u8, unit: &str) -> String;

    fn from_to(&self, start: &str, end: &str) -> String;
    fn from(&self, start: &str) -> String;
    fn with_step(&self, phrase: &str, step: u8, unit: &str) -> String;

    fn at_phrase(&self, phrase: &str) -> String;
    fn list_separator(&self) -> &'static str;
    fn list_range(&self, start: &str, end: &str) -> String;

    fn day_of_week_names(&self) -> [&'static str; 7];
    fn month_names(&self) -> [&'static str; 12];
}
