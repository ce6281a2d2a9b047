use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

/// The four answer choices of the triangle puzzle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AnswerKey {
    TwentyFour,
    FortySeven,
    OneNinetyNine,
    Many,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Invalid answer")]
pub struct InvalidAnswer;

impl AnswerKey {
    pub const ALL: [AnswerKey; 4] = [
        AnswerKey::TwentyFour,
        AnswerKey::FortySeven,
        AnswerKey::OneNinetyNine,
        AnswerKey::Many,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerKey::TwentyFour => "24",
            AnswerKey::FortySeven => "47",
            AnswerKey::OneNinetyNine => "199",
            AnswerKey::Many => "many",
        }
    }
}

impl FromStr for AnswerKey {
    type Err = InvalidAnswer;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "24" => Ok(AnswerKey::TwentyFour),
            "47" => Ok(AnswerKey::FortySeven),
            "199" => Ok(AnswerKey::OneNinetyNine),
            "many" => Ok(AnswerKey::Many),
            _ => Err(InvalidAnswer),
        }
    }
}

/// Vote counts for every answer. All four slots are always present; a stored
/// payload missing a slot decodes with that slot at zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Tally {
    #[serde(rename = "24", default)]
    pub twenty_four: u64,
    #[serde(rename = "47", default)]
    pub forty_seven: u64,
    #[serde(rename = "199", default)]
    pub one_ninety_nine: u64,
    #[serde(default)]
    pub many: u64,
}

impl Tally {
    pub fn increment(&mut self, key: AnswerKey) {
        *self.slot_mut(key) += 1;
    }

    pub fn count(&self, key: AnswerKey) -> u64 {
        match key {
            AnswerKey::TwentyFour => self.twenty_four,
            AnswerKey::FortySeven => self.forty_seven,
            AnswerKey::OneNinetyNine => self.one_ninety_nine,
            AnswerKey::Many => self.many,
        }
    }

    fn slot_mut(&mut self, key: AnswerKey) -> &mut u64 {
        match key {
            AnswerKey::TwentyFour => &mut self.twenty_four,
            AnswerKey::FortySeven => &mut self.forty_seven,
            AnswerKey::OneNinetyNine => &mut self.one_ninety_nine,
            AnswerKey::Many => &mut self.many,
        }
    }
}

/// `answer` stays a raw JSON value so a non-string submission is rejected as
/// an invalid answer by the handler rather than failing the body guard.
#[derive(Debug, Deserialize)]
pub struct VoteRequest {
    #[serde(default)]
    pub answer: Option<serde_json::Value>,
}

#[derive(Debug, Serialize)]
pub struct VoteResponse {
    pub success: bool,
    pub votes: Tally,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
