//! Helpers for cron expressions that come from somewhere else, typically a
//! text generator that may wrap the expression in prose or get it wrong.
//!
//! ```rust
//! use cron_explain::candidate::{extract_expression, generate_with_retry};
//!
//! assert_eq!(
//!     extract_expression("Sure! Use `*/5 * * * *` to run every five minutes."),
//!     Some("*/5 * * * *".to_string())
//! );
//!
//! let replies = ["I cannot help with that", "0 9 * * 1"];
//! let generated = generate_with_retry(|attempt| {
//!     Ok::<_, std::io::Error>(replies[usize::from(attempt)].to_string())
//! })
//! .unwrap();
//! assert_eq!(generated.expression, "0 9 * * 1");
//! assert_eq!(generated.retry_count, 1);
//! ```

use std::sync::OnceLock;

use regex::Regex;
use thiserror::Error;
use tracing::debug;

use crate::validate_cron_expression;

/// How many times a failed generation is retried. The source is called at
/// most `RETRY_LIMIT + 1` times.
pub const RETRY_LIMIT: u8 = 3;

// Runs of 5 or 6 tokens that are a number, `*` or `*/N`.
const CANDIDATE_PATTERN: &str = r"([0-9]+|\*|\*/[0-9]+)(\s+([0-9]+|\*|\*/[0-9]+)){4,5}";

fn candidate_regex() -> Option<&'static Regex> {
    static CANDIDATE: OnceLock<Option<Regex>> = OnceLock::new();
    CANDIDATE
        .get_or_init(|| Regex::new(CANDIDATE_PATTERN).ok())
        .as_ref()
}

/// Finds the first cron expression in `text` that validates.
///
/// Only plain numeric forms are recognised (`N`, `*` and `*/N`); ranges,
/// lists and aliases are not picked out of free text.
pub fn extract_expression(text: &str) -> Option<String> {
    candidate_regex()?
        .find_iter(text)
        .map(|found| found.as_str().trim())
        .find(|candidate| validate_cron_expression(candidate))
        .map(str::to_string)
}

/// A successfully generated expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generated {
    pub expression: String,
    /// How many retries it took, `0` when the first attempt worked.
    pub retry_count: u8,
}

#[derive(Debug, Error)]
pub enum GenerateError<E> {
    /// The source itself failed; no further attempts are made.
    #[error("candidate source failed")]
    Source(#[source] E),

    #[error("no valid cron expression after {attempts} attempts")]
    NoValidExpression { attempts: u8 },
}

/// Asks `source` for text until it contains a valid cron expression.
///
/// `source` receives the attempt number, starting at `0`. Text without a
/// valid expression is retried up to [`RETRY_LIMIT`] times; an error from
/// `source` is returned at once.
pub fn generate_with_retry<F, E>(mut source: F) -> Result<Generated, GenerateError<E>>
where
    F: FnMut(u8) -> Result<String, E>,
{
    let mut retry_count = 0;
    loop {
        let text = source(retry_count).map_err(GenerateError::Source)?;
        if let Some(expression) = extract_expression(&text) {
            return Ok(Generated {
                expression,
                retry_count,
            });
        }
        if retry_count >= RETRY_LIMIT {
            return Err(GenerateError::NoValidExpression {
                attempts: retry_count + 1,
            });
        }
        debug!(attempt = retry_count, "no valid cron expression in generated text, retrying");
        retry_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use std::io;

    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("0 9 * * 1", Some("0 9 * * 1"))]
    #[case("Run it with: 30 2 * * *\nThat is 2:30 every night.", Some("30 2 * * *"))]
    #[case("*/10 * * * * *", Some("*/10 * * * * *"))]
    #[case("first 99 99 99 99 99 then 0 0 1 1 *", Some("0 0 1 1 *"))]
    #[case("\u{663} \u{663} \u{663} \u{663} 0 9 * * 1", Some("0 9 * * 1"))]
    #[case("0 9 * *", None)]
    #[case("at nine on mondays", None)]
    #[case("", None)]
    fn test_extract_expression(#[case] text: &str, #[case] expected: Option<&str>) {
        assert_eq!(extract_expression(text).as_deref(), expected);
    }

    #[test]
    fn test_first_attempt_succeeds() {
        let generated = generate_with_retry(|_| Ok::<_, io::Error>("0 12 * * *".to_string())).unwrap();
        assert_eq!(
            generated,
            Generated {
                expression: "0 12 * * *".to_string(),
                retry_count: 0
            }
        );
    }

    #[test]
    fn test_gives_up_after_retry_limit() {
        let mut calls = 0;
        let result = generate_with_retry(|attempt| {
            assert_eq!(attempt, calls);
            calls += 1;
            Ok::<_, io::Error>("no idea".to_string())
        });
        assert_eq!(calls, RETRY_LIMIT + 1);
        assert!(matches!(
            result,
            Err(GenerateError::NoValidExpression { attempts: 4 })
        ));
    }

    #[test]
    fn test_source_error_is_not_retried() {
        let mut calls = 0;
        let result = generate_with_retry(|_| {
            calls += 1;
            Err::<String, _>(io::Error::new(io::ErrorKind::Other, "offline"))
        });
        assert_eq!(calls, 1);
        assert!(matches!(result, Err(GenerateError::Source(_))));
    }
}
