use crate::explain::Language;
use crate::field::Field;

#[derive(Debug, Default, Clone, Copy)]
pub struct English;

impl Language for English {
    fn unit(&self, field: Field) -> &'static str { field.unit() }

    fn every_unit(&self, unit: &str) -> String { format!("Every {unit}") }
    fn every_x_units(&self, step: u8, unit: &str) -> String { format!("Every {step} {unit}s") }

    fn from_to(&self, start: &str, end: &str) -> String { format!("From {start} to {end}") }
    fn from(&self, start: &str) -> String { format!("From {start}") }
    fn with_step(&self, phrase: &str, step: u8, unit: &str) -> String { format!("{phrase}, every {step} {unit}s") }

    fn at_phrase(&self, phrase: &str) -> String { format!("At {phrase}") }
    fn list_separator(&self) -> &'static str { ", " }
    fn list_range(&self, start: &str, end: &str) -> String { format!("{start}-{end}") }

    fn day_of_week_names(&self) -> [&'static str; 7] { ["Sunday", "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday"] }
    fn month_names(&self) -> [&'static str; 12] { ["January", "February", "March", "April", "May", "June", "July", "August", "September", "October", "November", "December"] }
}
