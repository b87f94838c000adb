use core::fmt;
use serde::{Deserialize, Serialize};

/// A catalog question: an identifier plus opaque display text.
///
/// Only the identifier is semantically meaningful to the engine; the text
/// exists for whoever drives the prompt loop.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: String,
    pub text: String,
}

impl Question {
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
        }
    }
}

impl fmt::Display for Question {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::Question;

    #[test]
    fn displays_the_text_only() {
        let question = Question::new("q1", "Is it a mammal?");
        assert_eq!(question.to_string(), "Is it a mammal?");
        assert_eq!(question.id, "q1");
    }
}
