use guess_core::model::answer::Answer;
use std::io::{self, Write};

/// Line-oriented terminal abstraction so sessions can be driven from
/// stdio or from a scripted transcript in tests.
pub trait GameIo {
    fn say(&mut self, line: &str);
    fn ask(&mut self, prompt: &str) -> io::Result<String>;
}

/// Real stdin/stdout implementation.
pub struct StdIo;

impl GameIo for StdIo {
    fn say(&mut self, line: &str) {
        println!("{line}");
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        print!("{prompt}");
        io::stdout().flush()?;
        let mut line = String::new();
        let read = io::stdin().read_line(&mut line)?;
        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input stream closed",
            ));
        }
        Ok(line.trim().to_string())
    }
}

/// Maps the five-level menu choice to an answer value.
pub fn answer_from_choice(choice: &str) -> Option<Answer> {
    match choice {
        "1" => Some(Answer::YES),
        "2" => Some(Answer::PROBABLY_YES),
        "3" => Some(Answer::UNKNOWN),
        "4" => Some(Answer::PROBABLY_NO),
        "5" => Some(Answer::NO),
        _ => None,
    }
}

pub fn is_affirmative(input: &str) -> bool {
    matches!(input.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
pub struct ScriptedIo {
    inputs: std::collections::VecDeque<String>,
    pub transcript: Vec<String>,
}

#[cfg(test)]
impl ScriptedIo {
    pub fn new(inputs: &[&str]) -> Self {
        Self {
            inputs: inputs.iter().map(|line| line.to_string()).collect(),
            transcript: Vec::new(),
        }
    }

    pub fn saw(&self, needle: &str) -> bool {
        self.transcript.iter().any(|line| line.contains(needle))
    }
}

#[cfg(test)]
impl GameIo for ScriptedIo {
    fn say(&mut self, line: &str) {
        self.transcript.push(line.to_string());
    }

    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        self.transcript.push(prompt.to_string());
        self.inputs
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

#[cfg(test)]
mod tests {
    use super::{answer_from_choice, is_affirmative};
    use guess_core::model::answer::Answer;

    #[test]
    fn choices_map_to_the_five_levels() {
        assert_eq!(answer_from_choice("1"), Some(Answer::YES));
        assert_eq!(answer_from_choice("2"), Some(Answer::PROBABLY_YES));
        assert_eq!(answer_from_choice("3"), Some(Answer::UNKNOWN));
        assert_eq!(answer_from_choice("4"), Some(Answer::PROBABLY_NO));
        assert_eq!(answer_from_choice("5"), Some(Answer::NO));
    }

    #[test]
    fn out_of_menu_choices_are_rejected() {
        assert_eq!(answer_from_choice("0"), None);
        assert_eq!(answer_from_choice("6"), None);
        assert_eq!(answer_from_choice("yes"), None);
        assert_eq!(answer_from_choice(""), None);
    }

    #[test]
    fn affirmative_detection_is_case_insensitive() {
        assert!(is_affirmative("yes"));
        assert!(is_affirmative(" Y "));
        assert!(!is_affirmative("no"));
        assert!(!is_affirmative(""));
    }
}
