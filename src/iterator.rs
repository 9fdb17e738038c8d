use std::iter::FusedIterator;

use chrono::{DateTime, TimeZone};

use crate::{Cron, CronError};

/// Lazily yields the times a [`Cron`] fires, in increasing order.
///
/// Each item is a `Result`; after the first error (typically
/// [`CronError::ExhaustedSchedule`]) the iterator is finished.
#[derive(Debug, Clone)]
pub struct CronIterator<Tz>
where
    Tz: TimeZone,
{
    cron: Cron,
    current_time: DateTime<Tz>,
    inclusive: bool,
    finished: bool,
}

impl<Tz> CronIterator<Tz>
where
    Tz: TimeZone,
{
    /// Creates a new `CronIterator`.
    ///
    /// # Arguments
    ///
    /// * `cron` - The `Cron` schedule instance.
    /// * `start_time` - The `DateTime` to start iterating from.
    /// * `inclusive` - Whether `start_time` is yielded when it matches.
    pub fn new(cron: Cron, start_time: DateTime<Tz>, inclusive: bool) -> Self {
        CronIterator {
            cron,
            current_time: start_time,
            inclusive,
            finished: false,
        }
    }
}

impl<Tz> Iterator for CronIterator<Tz>
where
    Tz: TimeZone,
{
    type Item = Result<DateTime<Tz>, CronError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        match self
            .cron
            .find_next_occurrence(&self.current_time, self.inclusive)
        {
            Ok(found) => {
                // Later searches start strictly after the last match
                self.current_time = found.clone();
                self.inclusive = false;
                Some(Ok(found))
            }
            Err(error) => {
                self.finished = true;
                Some(Err(error))
            }
        }
    }
}

impl<Tz: TimeZone> FusedIterator for CronIterator<Tz> {}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_iter_from_includes_matching_start() {
        let cron: Cron = "0 * * * *".parse().unwrap();
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();

        let from: Vec<_> = cron.iter_from(start).take(2).map(Result::unwrap).collect();
        assert_eq!(from[0], start);
        assert_eq!(from[1], Utc.with_ymd_and_hms(2024, 6, 1, 11, 0, 0).unwrap());

        let after: Vec<_> = cron.iter_after(start).take(2).map(Result::unwrap).collect();
        assert_eq!(after[0], Utc.with_ymd_and_hms(2024, 6, 1, 11, 0, 0).unwrap());
    }

    #[test]
    fn test_consecutive_seconds_are_not_skipped() {
        let cron: Cron = "* * * * * *".parse().unwrap();
        let start = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();
        let seconds: Vec<u32> = cron
            .iter_after(start)
            .take(3)
            .map(|time| chrono::Timelike::second(&time.unwrap()))
            .collect();
        assert_eq!(seconds, vec![1, 2, 3]);
    }

    #[test]
    fn test_stops_after_error() {
        let cron: Cron = "0 0 30 2 *".parse().unwrap();
        let mut iterator = cron.iter_after(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert!(matches!(
            iterator.next(),
            Some(Err(CronError::ExhaustedSchedule { .. }))
        ));
        assert!(iterator.next().is_none());
        assert!(iterator.next().is_none());
    }
}
