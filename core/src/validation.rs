//! Duplicate option value detection.
//!
//! Sibling options of one question must carry distinct values. Only the first
//! collision in scan order is reported.

use std::fmt;

use crate::draft::{OptionValue, SurveyOption};

/// A question whose options share a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateOptionValue {
    /// 1-based position of the question when the error was raised.
    pub question_number: usize,
    pub value: OptionValue,
}

impl DuplicateOptionValue {
    /// Message shown next to the offending question.
    pub fn inline_message(&self) -> String {
        format!("Duplicate option value found: {}", self.value)
    }

    /// Message pushed to the alert surface.
    pub fn alert_message(&self) -> String {
        format!("Duplicate option value found in Question {}", self.question_number)
    }
}

impl fmt::Display for DuplicateOptionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "duplicate option value {} in question {}",
            self.value, self.question_number
        )
    }
}

impl std::error::Error for DuplicateOptionValue {}

/// Returns the value at the first index whose value equals an earlier one.
pub fn first_duplicate(options: &[SurveyOption]) -> Option<&OptionValue> {
    let mut seen = Vec::with_capacity(options.len());
    for option in options {
        let key = option.value.key();
        if seen.contains(&key) {
            return Some(&option.value);
        }
        seen.push(key);
    }
    None
}

/// Check one question's options. `question_index` is 0-based.
pub fn check_options(
    question_index: usize,
    options: &[SurveyOption],
) -> Result<(), DuplicateOptionValue> {
    match first_duplicate(options) {
        Some(value) => Err(DuplicateOptionValue {
            question_number: question_index + 1,
            value: value.clone(),
        }),
        None => Ok(()),
    }
}
