use guess_core::model::answer::Answer;
use guess_core::model::entity::Entity;
use rand::Rng;

/// Answers questions on behalf of a secret entity.
///
/// The oracle replays the secret's recorded attribute values verbatim and
/// says "don't know" for questions the secret has no value for. A nonzero
/// `unknown_rate` degrades that fraction of answers to "don't know",
/// simulating an unsure human.
pub struct Oracle<'a> {
    secret: &'a Entity,
    unknown_rate: f64,
}

impl<'a> Oracle<'a> {
    pub fn new(secret: &'a Entity, unknown_rate: f64) -> Self {
        Self {
            secret,
            unknown_rate,
        }
    }

    pub fn answer(&self, question_id: &str, rng: &mut impl Rng) -> Answer {
        if self.unknown_rate > 0.0 && rng.r#gen::<f64>() < self.unknown_rate {
            return Answer::UNKNOWN;
        }
        match self.secret.attribute(question_id) {
            Some(value) => Answer::new(value),
            None => Answer::UNKNOWN,
        }
    }
}
