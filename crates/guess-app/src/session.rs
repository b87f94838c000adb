use std::io;

use guess_core::engine::{Engine, ReinforceConfig, reinforce};
use guess_core::model::answer::Answer;
use guess_core::model::catalog::Catalog;
use guess_core::model::entity::Entity;
use guess_core::model::question::Question;
use tracing::{Level, event};
use uuid::Uuid;

use crate::prompt::{GameIo, answer_from_choice, is_affirmative};

/// Per-session driver policy; the engine itself is unbounded.
#[derive(Debug, Clone, Copy)]
pub struct SessionOptions {
    pub max_questions: usize,
    pub guess_threshold: f64,
    pub learning_rate: f64,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            max_questions: 20,
            guess_threshold: 0.75,
            learning_rate: ReinforceConfig::default().learning_rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionOutcome {
    /// A confident mid-session guess the user confirmed.
    Guessed { entity: String, questions: usize },
    /// The fallback guess after the question budget, confirmed by the user.
    GuessedAtTheWire { entity: String, questions: usize },
    /// The user taught a brand-new entity.
    Learned { entity: String },
    /// The user named an entity already in the catalog; its profile was
    /// reinforced from this session's answers.
    Relearned { entity: String },
    /// No usable teaching input; nothing was learned.
    GaveUp,
}

/// Plays one full session against `io`, mutating the catalog in place
/// when the user confirms a guess or teaches something new. The caller
/// persists the catalog afterwards.
pub fn run_session(
    catalog: &mut Catalog,
    io: &mut dyn GameIo,
    options: &SessionOptions,
) -> io::Result<SessionOutcome> {
    io.say("==================================================");
    io.say("Think of an animal and I will try to guess it.");
    io.say("==================================================");

    let mut engine = Engine::new(&mut *catalog);
    let mut history: Vec<(String, Answer)> = Vec::new();
    let mut asked = 0usize;
    let mut missed_confident_guess = false;

    while asked < options.max_questions {
        if let Some(candidate) = engine.best_guess() {
            if candidate.probability >= options.guess_threshold {
                io.say("I think I know!");
                let reply = io.ask(&format!("Is it \"{}\"? (yes/no): ", candidate.name))?;
                if is_affirmative(&reply) {
                    io.say("Got it!");
                    for (question_id, answer) in &history {
                        engine.reinforce_entity(
                            &candidate.name,
                            question_id,
                            *answer,
                            options.learning_rate,
                        );
                    }
                    event!(
                        target: "mdguess::session",
                        Level::INFO,
                        entity = %candidate.name,
                        questions = asked,
                        confident = true,
                        "guess confirmed"
                    );
                    return Ok(SessionOutcome::Guessed {
                        entity: candidate.name,
                        questions: asked,
                    });
                }
                io.say("I was wrong...");
                missed_confident_guess = true;
                break;
            }
        }

        let Some(question_id) = engine.best_question().map(str::to_string) else {
            io.say("I have no questions left to ask...");
            break;
        };
        let text = engine
            .question_text(&question_id)
            .unwrap_or(question_id.as_str())
            .to_string();
        let answer = prompt_answer(io, &text)?;
        history.push((question_id.clone(), answer));
        engine.update_probabilities(&question_id, answer);
        asked += 1;

        io.say(&format!(
            "Current candidates ({asked}/{} questions):",
            options.max_questions
        ));
        for (index, candidate) in engine.top_candidates(3).iter().enumerate() {
            io.say(&format!(
                "  {}. {} ({:.1}%)",
                index + 1,
                candidate.name,
                candidate.probability * 100.0
            ));
        }
    }

    // One parting shot, unless a confident guess already missed.
    let final_guess = engine.best_guess();
    if !missed_confident_guess {
        if let Some(candidate) = final_guess.as_ref() {
            let reply = io.ask(&format!("Could it be \"{}\"? (yes/no): ", candidate.name))?;
            if is_affirmative(&reply) {
                io.say("Phew, got it at the wire!");
                event!(
                    target: "mdguess::session",
                    Level::INFO,
                    entity = %candidate.name,
                    questions = asked,
                    confident = false,
                    "guess confirmed"
                );
                return Ok(SessionOutcome::GuessedAtTheWire {
                    entity: candidate.name.clone(),
                    questions: asked,
                });
            }
        }
    }

    let wrong_guess = final_guess.map(|candidate| candidate.name);
    drop(engine);
    teach(catalog, io, options, &history, wrong_guess)
}

/// The learning phase after a lost session.
fn teach(
    catalog: &mut Catalog,
    io: &mut dyn GameIo,
    options: &SessionOptions,
    history: &[(String, Answer)],
    wrong_guess: Option<String>,
) -> io::Result<SessionOutcome> {
    io.say("I give up, you win! Help me learn.");
    let correct = io.ask("What were you thinking of? ")?.trim().to_string();
    if correct.is_empty() {
        io.say("Teaching cancelled.");
        event!(target: "mdguess::session", Level::INFO, "session ended without learning");
        return Ok(SessionOutcome::GaveUp);
    }

    if catalog.contains_entity(&correct) {
        io.say(&format!(
            "I already know \"{correct}\"; refreshing its profile."
        ));
        for (question_id, answer) in history {
            reinforce(catalog, &correct, question_id, *answer, options.learning_rate);
        }
        event!(
            target: "mdguess::session",
            Level::INFO,
            entity = %correct,
            "existing entity reinforced"
        );
        return Ok(SessionOutcome::Relearned { entity: correct });
    }

    io.say(&format!(
        "Give me a question that would single out \"{correct}\"."
    ));
    let question_text = io.ask("Question: ")?.trim().to_string();
    if question_text.is_empty() {
        io.say("No question given; nothing learned this time.");
        event!(target: "mdguess::session", Level::INFO, "teaching abandoned");
        return Ok(SessionOutcome::GaveUp);
    }

    io.say("And for the correct answer...");
    let answer = prompt_answer(io, &question_text)?;

    let mut entity = Entity::new(correct.clone());
    for (question_id, observed) in history {
        entity.set_attribute(question_id.clone(), observed.value());
    }

    let question_id = fresh_question_id();
    catalog.add_question(Question::new(question_id.clone(), question_text));
    entity.set_attribute(question_id.clone(), answer.value());
    catalog.add_entity(entity);

    // The entity we confused it with presumably answers the other way.
    if let Some(wrong) = wrong_guess {
        catalog.set_attribute(&wrong, &question_id, answer.negated().value());
    }

    io.say(&format!(
        "Added \"{correct}\" to my knowledge. Thanks, I am smarter now!"
    ));
    event!(
        target: "mdguess::session",
        Level::INFO,
        entity = %correct,
        question = %question_id,
        "new entity learned"
    );
    Ok(SessionOutcome::Learned { entity: correct })
}

fn prompt_answer(io: &mut dyn GameIo, text: &str) -> io::Result<Answer> {
    io.say(&format!("Question: {text}"));
    io.say("  1: yes   2: probably   3: don't know   4: probably not   5: no");
    loop {
        let choice = io.ask("Choose (1-5): ")?;
        match answer_from_choice(choice.trim()) {
            Some(answer) => return Ok(answer),
            None => io.say("Please enter a number from 1 to 5."),
        }
    }
}

fn fresh_question_id() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("q{}", &hex[..8])
}
