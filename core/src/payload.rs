//! Draft to transport payload conversion.

use crate::draft::{Question, SurveyDraft};
use crate::error::PayloadError;
use crate::types::{OptionPayload, QuestionPayload, SurveyPayload};

impl SurveyPayload {
    /// Strip client-local ids and coerce option values to integers. Options
    /// are only carried for choice and rating questions.
    pub fn from_draft(draft: &SurveyDraft) -> Result<Self, PayloadError> {
        let questions = draft
            .questions
            .iter()
            .enumerate()
            .map(|(index, question)| question_payload(index, question))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            start_date: draft.start_date,
            end_date: draft.end_date,
            questions,
        })
    }
}

fn question_payload(index: usize, question: &Question) -> Result<QuestionPayload, PayloadError> {
    let options = if question.kind.has_options() {
        question
            .options
            .iter()
            .enumerate()
            .map(|(option_index, option)| {
                let option_value =
                    option
                        .value
                        .as_int()
                        .map_err(|_| PayloadError::InvalidOptionValue {
                            question_number: index + 1,
                            option_number: option_index + 1,
                            raw: option.value.raw().to_string(),
                        })?;
                Ok(OptionPayload {
                    option_text: option.text.clone(),
                    option_value,
                })
            })
            .collect::<Result<Vec<_>, PayloadError>>()?
    } else {
        Vec::new()
    };

    Ok(QuestionPayload {
        question_text: question.text.clone(),
        question_type: question.kind,
        required: question.required,
        options,
    })
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::draft::{QuestionType, SurveyOption};

    fn draft() -> SurveyDraft {
        let mut rating = Question::new();
        rating.text = "How was the reunion?".to_string();
        rating.kind = QuestionType::Rating;
        rating.required = true;
        rating.options = QuestionType::Rating.default_options();

        let mut open = Question::new();
        open.text = "Anything else?".to_string();
        // Stale options on an open-ended question never reach the wire.
        open.options = vec![SurveyOption::new("leftover", "9")];

        SurveyDraft {
            title: "Reunion 2026".to_string(),
            description: "Feedback".to_string(),
            start_date: NaiveDate::from_ymd_opt(2026, 11, 1),
            end_date: NaiveDate::from_ymd_opt(2026, 11, 30),
            questions: vec![rating, open],
        }
    }

    #[test]
    fn serializes_wire_shape_without_ids() {
        let payload = SurveyPayload::from_draft(&draft()).unwrap();
        let json = serde_json::to_value(&payload).unwrap();

        assert_eq!(json["title"], "Reunion 2026");
        assert_eq!(json["start_date"], "2026-11-01");
        assert_eq!(json["end_date"], "2026-11-30");
        assert_eq!(json["questions"][0]["question_type"], "Rating");
        assert_eq!(json["questions"][0]["required"], true);
        assert_eq!(json["questions"][0]["options"][4]["option_text"], "Very Satisfied");
        assert_eq!(json["questions"][0]["options"][4]["option_value"], 5);
        assert_eq!(json["questions"][1]["question_type"], "Open-ended");
        assert_eq!(json["questions"][1]["options"], serde_json::json!([]));
        assert!(json["questions"][0].get("id").is_none());
        assert!(json["questions"][0]["options"][0].get("id").is_none());
    }

    #[test]
    fn string_values_become_integers() {
        let mut d = draft();
        d.questions[0].options[0].value = " 7 ".into();
        let json = serde_json::to_value(SurveyPayload::from_draft(&d).unwrap()).unwrap();
        assert!(json["questions"][0]["options"][0]["option_value"].is_i64());
        assert_eq!(json["questions"][0]["options"][0]["option_value"], 7);
    }

    #[test]
    fn serialization_is_idempotent() {
        let d = draft();
        let first = serde_json::to_string(&SurveyPayload::from_draft(&d).unwrap()).unwrap();
        let second = serde_json::to_string(&SurveyPayload::from_draft(&d).unwrap()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn unset_dates_serialize_as_null() {
        let payload = SurveyPayload::from_draft(&SurveyDraft::default()).unwrap();
        let json = serde_json::to_value(&payload).unwrap();
        assert!(json["start_date"].is_null());
        assert_eq!(json["questions"], serde_json::json!([]));
    }

    #[test]
    fn non_integer_value_is_rejected() {
        let mut d = draft();
        d.questions[0].options[2].value = "three".into();
        let err = SurveyPayload::from_draft(&d).unwrap_err();
        assert_eq!(
            err,
            PayloadError::InvalidOptionValue {
                question_number: 1,
                option_number: 3,
                raw: "three".to_string(),
            }
        );
    }
}
