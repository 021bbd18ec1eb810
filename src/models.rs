use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Question {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: i64,
    #[serde(rename = "type")]
    pub kind: String,
}

/// Question difficulty, always within 1..=5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl TryFrom<i64> for Difficulty {
    type Error = ValidationError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        if (i64::from(Self::MIN)..=i64::from(Self::MAX)).contains(&value) {
            Ok(Difficulty(value as u8))
        } else {
            Err(ValidationError::DifficultyOutOfRange(value))
        }
    }
}

/// An integer that clients may send as a JSON number (`5` or `5.0`) or a
/// numeric string.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum LooseInt {
    Int(i64),
    Float(f64),
    Text(String),
}

impl LooseInt {
    pub fn to_i64(&self, field: &'static str) -> Result<i64, ValidationError> {
        match self {
            LooseInt::Int(value) => Ok(*value),
            LooseInt::Float(value) => {
                let whole = value.is_finite()
                    && value.fract() == 0.0
                    && *value >= i64::MIN as f64
                    && *value < i64::MAX as f64;
                if whole {
                    Ok(*value as i64)
                } else {
                    Err(ValidationError::NotAnInteger {
                        field,
                        value: value.to_string(),
                    })
                }
            }
            LooseInt::Text(text) => {
                text.trim()
                    .parse()
                    .map_err(|_| ValidationError::NotAnInteger {
                        field,
                        value: text.clone(),
                    })
            }
        }
    }
}

/// Create-question payload as received, before any checks.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuestionDraft {
    pub question: Option<String>,
    pub answer: Option<String>,
    pub category: Option<LooseInt>,
    pub difficulty: Option<LooseInt>,
}

/// A question that passed field validation. Category existence is checked
/// against the store at insert time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewQuestion {
    pub question: String,
    pub answer: String,
    pub category: i64,
    pub difficulty: Difficulty,
}

impl QuestionDraft {
    /// Text fields only need to be present; an empty string is stored as is.
    pub fn validate(self) -> Result<NewQuestion, ValidationError> {
        let question = self.question.ok_or(ValidationError::MissingField("question"))?;
        let answer = self.answer.ok_or(ValidationError::MissingField("answer"))?;
        let category = self
            .category
            .ok_or(ValidationError::MissingField("category"))?
            .to_i64("category")?;
        let difficulty = self
            .difficulty
            .ok_or(ValidationError::MissingField("difficulty"))?
            .to_i64("difficulty")?;

        Ok(NewQuestion {
            question,
            answer,
            category,
            difficulty: Difficulty::try_from(difficulty)?,
        })
    }
}
