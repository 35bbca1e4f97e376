use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// The six self-reflection questions, keyed by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectionField {
    WhoAmI,
    Likes,
    GoodAt,
    Childhood,
    Energy,
    OthersSay,
}

impl ReflectionField {
    pub fn all() -> [ReflectionField; 6] {
        [
            ReflectionField::WhoAmI,
            ReflectionField::Likes,
            ReflectionField::GoodAt,
            ReflectionField::Childhood,
            ReflectionField::Energy,
            ReflectionField::OthersSay,
        ]
    }

    pub fn id(&self) -> &'static str {
        match self {
            ReflectionField::WhoAmI => "who_am_i",
            ReflectionField::Likes => "likes",
            ReflectionField::GoodAt => "good_at",
            ReflectionField::Childhood => "childhood",
            ReflectionField::Energy => "energy",
            ReflectionField::OthersSay => "others_say",
        }
    }
}

impl fmt::Display for ReflectionField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id())
    }
}

impl FromStr for ReflectionField {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "who_am_i" => Ok(ReflectionField::WhoAmI),
            "likes" => Ok(ReflectionField::Likes),
            "good_at" => Ok(ReflectionField::GoodAt),
            "childhood" => Ok(ReflectionField::Childhood),
            "energy" => Ok(ReflectionField::Energy),
            "others_say" => Ok(ReflectionField::OthersSay),
            _ => Err(anyhow::anyhow!("Unknown reflection field: {}", s)),
        }
    }
}

/// One question as shown to the student: a title line, the predefined
/// options that can be toggled and a starter phrase for writing an
/// answer of their own.
pub struct ReflectionQuestion {
    pub field: ReflectionField,
    pub text: &'static str,
    pub options: &'static [&'static str],
    pub placeholder: &'static str,
}

pub static QUESTIONS: [ReflectionQuestion; 6] = [
    ReflectionQuestion {
        field: ReflectionField::WhoAmI,
        text: "Who am I right now?",
        options: &["Cheerful", "Calm", "Energetic", "Curious", "Helpful"],
        placeholder: "I am someone who...",
    },
    ReflectionQuestion {
        field: ReflectionField::Likes,
        text: "What do I enjoy doing?",
        options: &[
            "Working with my hands",
            "Talking with people",
            "Solving puzzles",
            "Sports",
            "Drawing and music",
            "Gaming",
        ],
        placeholder: "Pick one, or write your own...",
    },
    ReflectionQuestion {
        field: ReflectionField::GoodAt,
        text: "What am I good at?",
        options: &[
            "Listening",
            "Building things",
            "Organizing",
            "Working with numbers",
            "Language",
            "Caring for others",
        ],
        placeholder: "I am good at...",
    },
    ReflectionQuestion {
        field: ReflectionField::Childhood,
        text: "What did I love doing as a kid?",
        options: &[
            "Lego and blocks",
            "Playing doctor",
            "Playing shop",
            "Being out in nature",
            "Reading books",
            "Arts and crafts",
        ],
        placeholder: "As a kid I often played...",
    },
    ReflectionQuestion {
        field: ReflectionField::Energy,
        text: "What gives me energy?",
        options: &[
            "Helping someone",
            "Finishing something",
            "Learning something new",
            "Working together",
            "Being outdoors",
        ],
        placeholder: "I feel happy when...",
    },
    ReflectionQuestion {
        field: ReflectionField::OthersSay,
        text: "What do others say about me?",
        options: &["Funny", "Smart", "Kind", "Creative", "Strong"],
        placeholder: "My friends say that I...",
    },
];

/// Everything the student has answered so far. Selections are the
/// toggled predefined options; custom answers are free text per
/// question and live alongside the selections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReflectionAnswers {
    #[serde(default)]
    pub who_am_i: Vec<String>,
    #[serde(default)]
    pub likes: Vec<String>,
    #[serde(default)]
    pub good_at: Vec<String>,
    #[serde(default)]
    pub childhood: Vec<String>,
    #[serde(default)]
    pub energy: Vec<String>,
    #[serde(default)]
    pub others_say: Vec<String>,
    #[serde(default)]
    pub custom_answers: HashMap<String, String>,
}

impl ReflectionAnswers {
    pub fn selections(&self, field: ReflectionField) -> &Vec<String> {
        match field {
            ReflectionField::WhoAmI => &self.who_am_i,
            ReflectionField::Likes => &self.likes,
            ReflectionField::GoodAt => &self.good_at,
            ReflectionField::Childhood => &self.childhood,
            ReflectionField::Energy => &self.energy,
            ReflectionField::OthersSay => &self.others_say,
        }
    }

    fn selections_mut(&mut self, field: ReflectionField) -> &mut Vec<String> {
        match field {
            ReflectionField::WhoAmI => &mut self.who_am_i,
            ReflectionField::Likes => &mut self.likes,
            ReflectionField::GoodAt => &mut self.good_at,
            ReflectionField::Childhood => &mut self.childhood,
            ReflectionField::Energy => &mut self.energy,
            ReflectionField::OthersSay => &mut self.others_say,
        }
    }

    /// Toggle a predefined option on or off. Each option appears at
    /// most once; toggling twice restores the previous state.
    pub fn toggle_option(&mut self, field: ReflectionField, option: &str) {
        let selections = self.selections_mut(field);
        if let Some(pos) = selections.iter().position(|s| s == option) {
            selections.remove(pos);
        } else {
            selections.push(option.to_string());
        }
    }

    pub fn is_selected(&self, field: ReflectionField, option: &str) -> bool {
        self.selections(field).iter().any(|s| s == option)
    }

    /// Set the free-text answer for a question. An empty or
    /// whitespace-only text clears it.
    pub fn set_custom_answer(&mut self, field: ReflectionField, text: &str) {
        let text = text.trim();
        if text.is_empty() {
            self.custom_answers.remove(field.id());
        } else {
            self.custom_answers
                .insert(field.id().to_string(), text.to_string());
        }
    }

    pub fn custom_answer(&self, field: ReflectionField) -> Option<&str> {
        self.custom_answers.get(field.id()).map(|s| s.as_str())
    }

    /// All selections and custom answers for one question, joined for
    /// display. Empty string when the question is unanswered.
    pub fn answer_summary(&self, field: ReflectionField) -> String {
        let mut parts: Vec<&str> = self
            .selections(field)
            .iter()
            .map(|s| s.as_str())
            .collect();
        if let Some(custom) = self.custom_answer(field) {
            parts.push(custom);
        }
        parts.join(", ")
    }

    /// Every answer across all six questions as one lowercase-ready
    /// blob of text, used for route suggestion matching.
    pub fn concatenated_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for field in ReflectionField::all() {
            for selection in self.selections(field) {
                parts.push(selection);
            }
        }
        for custom in self.custom_answers.values() {
            parts.push(custom);
        }
        parts.join(" ")
    }

    pub fn answered_count(&self) -> usize {
        ReflectionField::all()
            .iter()
            .filter(|f| !self.answer_summary(**f).is_empty())
            .count()
    }

    pub fn is_empty(&self) -> bool {
        self.answered_count() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_adds_and_removes() {
        let mut answers = ReflectionAnswers::default();
        answers.toggle_option(ReflectionField::Likes, "Sports");
        assert!(answers.is_selected(ReflectionField::Likes, "Sports"));
        assert_eq!(answers.likes, vec!["Sports".to_string()]);

        answers.toggle_option(ReflectionField::Likes, "Sports");
        assert!(!answers.is_selected(ReflectionField::Likes, "Sports"));
        assert!(answers.likes.is_empty());
    }

    #[test]
    fn test_toggle_twice_restores_surrounding_selections() {
        let mut answers = ReflectionAnswers::default();
        answers.toggle_option(ReflectionField::Likes, "Sports");
        answers.toggle_option(ReflectionField::Likes, "Gaming");
        answers.toggle_option(ReflectionField::Likes, "Sports");
        answers.toggle_option(ReflectionField::Likes, "Sports");
        assert_eq!(
            answers.likes,
            vec!["Gaming".to_string(), "Sports".to_string()]
        );
    }

    #[test]
    fn test_option_appears_at_most_once() {
        let mut answers = ReflectionAnswers::default();
        answers.toggle_option(ReflectionField::Energy, "Helping someone");
        answers.toggle_option(ReflectionField::Energy, "Helping someone");
        answers.toggle_option(ReflectionField::Energy, "Helping someone");
        assert_eq!(answers.energy.len(), 1);
    }

    #[test]
    fn test_custom_answer_set_and_clear() {
        let mut answers = ReflectionAnswers::default();
        answers.set_custom_answer(ReflectionField::WhoAmI, "I love street dance");
        assert_eq!(
            answers.custom_answer(ReflectionField::WhoAmI),
            Some("I love street dance")
        );

        answers.set_custom_answer(ReflectionField::WhoAmI, "   ");
        assert_eq!(answers.custom_answer(ReflectionField::WhoAmI), None);
        assert!(answers.custom_answers.is_empty());
    }

    #[test]
    fn test_answer_summary_joins_selections_and_custom() {
        let mut answers = ReflectionAnswers::default();
        assert_eq!(answers.answer_summary(ReflectionField::GoodAt), "");

        answers.toggle_option(ReflectionField::GoodAt, "Listening");
        answers.toggle_option(ReflectionField::GoodAt, "Language");
        answers.set_custom_answer(ReflectionField::GoodAt, "fixing bikes");
        assert_eq!(
            answers.answer_summary(ReflectionField::GoodAt),
            "Listening, Language, fixing bikes"
        );
    }

    #[test]
    fn test_concatenated_text_covers_all_fields() {
        let mut answers = ReflectionAnswers::default();
        answers.toggle_option(ReflectionField::WhoAmI, "Curious");
        answers.toggle_option(ReflectionField::OthersSay, "Creative");
        answers.set_custom_answer(ReflectionField::Likes, "street dance");

        let text = answers.concatenated_text();
        assert!(text.contains("Curious"));
        assert!(text.contains("Creative"));
        assert!(text.contains("street dance"));
    }

    #[test]
    fn test_answered_count() {
        let mut answers = ReflectionAnswers::default();
        assert_eq!(answers.answered_count(), 0);
        assert!(answers.is_empty());

        answers.toggle_option(ReflectionField::Likes, "Sports");
        answers.set_custom_answer(ReflectionField::Energy, "being with friends");
        assert_eq!(answers.answered_count(), 2);
        assert!(!answers.is_empty());
    }

    #[test]
    fn test_every_question_has_a_starter_phrase() {
        for question in &QUESTIONS {
            assert!(
                question.placeholder.ends_with("..."),
                "placeholder for {} should invite the student to finish the sentence",
                question.field
            );
        }
        assert_eq!(QUESTIONS[0].placeholder, "I am someone who...");
    }

    #[test]
    fn test_field_round_trip() {
        for field in ReflectionField::all() {
            let parsed: ReflectionField = field.id().parse().unwrap();
            assert_eq!(parsed, field);
        }
        assert!("favourite_color".parse::<ReflectionField>().is_err());
    }
}
