use strum::{Display, EnumIs};

/// One position of a cron expression, in the order the fields are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display, EnumIs)]
pub enum Field {
    #[strum(serialize = "second")]
    Second,
    #[strum(serialize = "minute")]
    Minute,
    #[strum(serialize = "hour")]
    Hour,
    #[strum(serialize = "day of month")]
    DayOfMonth,
    #[strum(serialize = "month")]
    Month,
    #[strum(serialize = "day of week")]
    DayOfWeek,
}

const MONTH_ALIASES: [(&str, u8); 12] = [
    ("JAN", 1),
    ("FEB", 2),
    ("MAR", 3),
    ("APR", 4),
    ("MAY", 5),
    ("JUN", 6),
    ("JUL", 7),
    ("AUG", 8),
    ("SEP", 9),
    ("OCT", 10),
    ("NOV", 11),
    ("DEC", 12),
];

const WEEKDAY_ALIASES: [(&str, u8); 7] = [
    ("SUN", 0),
    ("MON", 1),
    ("TUE", 2),
    ("WED", 3),
    ("THU", 4),
    ("FRI", 5),
    ("SAT", 6),
];

impl Field {
    /// All six fields, seconds first.
    pub const ALL: [Field; 6] = [
        Field::Second,
        Field::Minute,
        Field::Hour,
        Field::DayOfMonth,
        Field::Month,
        Field::DayOfWeek,
    ];

    /// The five fields of an expression written without seconds.
    pub const WITHOUT_SECONDS: [Field; 5] = [
        Field::Minute,
        Field::Hour,
        Field::DayOfMonth,
        Field::Month,
        Field::DayOfWeek,
    ];

    /// Smallest value the field accepts.
    pub fn min(self) -> u8 {
        match self {
            Field::DayOfMonth | Field::Month => 1,
            _ => 0,
        }
    }

    /// Largest value the field accepts. Day of week accepts 7 as a second
    /// spelling of Sunday.
    pub fn max(self) -> u8 {
        match self {
            Field::Second | Field::Minute => 59,
            Field::Hour => 23,
            Field::DayOfMonth => 31,
            Field::Month => 12,
            Field::DayOfWeek => 7,
        }
    }

    /// The unit word used in "Every {unit}" phrases.
    pub fn unit(self) -> &'static str {
        match self {
            Field::Second => "second",
            Field::Minute => "minute",
            Field::Hour => "hour",
            Field::DayOfMonth => "day",
            Field::Month => "month",
            Field::DayOfWeek => "weekday",
        }
    }

    /// Key of the field in a serialized [`Explanation`](crate::Explanation).
    pub fn key(self) -> &'static str {
        match self {
            Field::Second => "seconds",
            Field::Minute => "minutes",
            Field::Hour => "hours",
            Field::DayOfMonth => "dayOfMonth",
            Field::Month => "month",
            Field::DayOfWeek => "dayOfWeek",
        }
    }

    /// Heading used when printing an explanation.
    pub fn label(self) -> &'static str {
        match self {
            Field::Second => "Seconds",
            Field::Minute => "Minutes",
            Field::Hour => "Hours",
            Field::DayOfMonth => "Day of Month",
            Field::Month => "Month",
            Field::DayOfWeek => "Day of Week",
        }
    }

    /// Characters allowed in the field besides digits and `* / , -`.
    pub(crate) fn extra_characters(self) -> &'static [char] {
        match self {
            Field::DayOfMonth => &['L', 'W'],
            Field::DayOfWeek => &['L', '#'],
            _ => &[],
        }
    }

    fn aliases(self) -> &'static [(&'static str, u8)] {
        match self {
            Field::Month => &MONTH_ALIASES,
            Field::DayOfWeek => &WEEKDAY_ALIASES,
            _ => &[],
        }
    }

    /// Resolves a three letter alias (`JAN`, `mon`, ...) to its number.
    pub fn alias_value(self, alias: &str) -> Option<u8> {
        self.aliases()
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(alias))
            .map(|&(_, value)| value)
    }

    // Replaces aliases inside an upper-cased token with their numbers.
    // A Sunday closing a range becomes 7 so that SAT-SUN stays ascending,
    // unless the range also starts on Sunday.
    pub(crate) fn replace_aliases(self, token: &str) -> String {
        let mut replaced = token.to_string();
        if self.is_day_of_week() {
            replaced = replaced
                .split(',')
                .map(close_range_on_sunday)
                .collect::<Vec<_>>()
                .join(",");
        }
        for &(alias, value) in self.aliases() {
            replaced = replaced.replace(alias, &value.to_string());
        }
        replaced
    }
}

fn close_range_on_sunday(element: &str) -> String {
    match element.split_once('-') {
        Some((start, end)) if start != "SUN" && start != "0" => match end.strip_prefix("SUN") {
            Some(rest) => format!("{start}-7{rest}"),
            None => element.to_string(),
        },
        _ => element.to_string(),
    }
}
