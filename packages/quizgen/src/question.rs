//! Typed question shapes produced by the generation pipeline.
//!
//! These are the validated forms a model reply must decode into before
//! anything leaves the library. Serialization uses the camelCase key
//! names the HTTP surface exposes.

use serde::{Deserialize, Serialize};

/// The kind of question to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionType {
    TrueOrFalse,
    SingleChoice,
    MultipleChoice,
}

/// One of the four answer slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionLetter {
    A,
    B,
    C,
    D,
}

impl OptionLetter {
    /// Parse a single-letter answer reference, case-insensitively.
    pub fn parse(s: &str) -> Option<OptionLetter> {
        match s.trim() {
            "A" | "a" => Some(OptionLetter::A),
            "B" | "b" => Some(OptionLetter::B),
            "C" | "c" => Some(OptionLetter::C),
            "D" | "d" => Some(OptionLetter::D),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OptionLetter::A => "A",
            OptionLetter::B => "B",
            OptionLetter::C => "C",
            OptionLetter::D => "D",
        }
    }
}

/// A statement the student marks as true or false.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrueOrFalseQuestion {
    pub question: String,
    #[serde(rename = "correctOption")]
    pub correct_option: bool,
}

/// Four options, exactly one correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleChoiceQuestion {
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "correctOption")]
    pub correct_option: OptionLetter,
}

/// Four options, one or more correct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultipleChoiceQuestion {
    pub question: String,
    pub options: Vec<String>,
    #[serde(rename = "correctOptions")]
    pub correct_options: Vec<OptionLetter>,
}

/// Any validated question, serialized as its inner shape.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum GeneratedQuestion {
    TrueOrFalse(TrueOrFalseQuestion),
    SingleChoice(SingleChoiceQuestion),
    MultipleChoice(MultipleChoiceQuestion),
}
