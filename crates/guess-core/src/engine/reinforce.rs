//! Attribute reinforcement after a confirmed-correct guess.

use crate::model::answer::Answer;
use crate::model::catalog::Catalog;

/// Learning parameters for the exponential-moving-average nudge.
#[derive(Debug, Clone, Copy)]
pub struct ReinforceConfig {
    pub learning_rate: f64,
}

impl Default for ReinforceConfig {
    fn default() -> Self {
        Self { learning_rate: 0.1 }
    }
}

/// Nudges one attribute of a confirmed entity toward the observed answer.
///
/// A missing attribute is set to the answer outright; an existing one
/// moves by `rate * (answer - old)` and is clamped back into [-1.0, 1.0].
/// Unknown entity names are ignored.
pub fn reinforce(
    catalog: &mut Catalog,
    entity_name: &str,
    question_id: &str,
    answer: Answer,
    rate: f64,
) {
    let Some(entity) = catalog.entity_mut(entity_name) else {
        return;
    };

    match entity.attribute(question_id) {
        None => entity.set_attribute(question_id, answer.value()),
        Some(old) => {
            let nudged = old + rate * (answer.value() - old);
            entity.set_attribute(question_id, nudged);
        }
    }
}
