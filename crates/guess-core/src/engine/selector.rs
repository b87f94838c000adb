//! Entropy-driven question selection.
//!
//! For every unasked question the selector simulates the two extreme
//! answers (yes and no), weighs each branch by its unnormalized mass, and
//! scores the question by the expected reduction in posterior entropy.
//! Simulating only the extremes is a contractual simplification: the
//! intermediate answer levels are deliberately not explored, and ties
//! resolve to the earliest question in catalog order.

use super::likelihood::LikelihoodModel;
use super::posterior::{Posterior, shannon_entropy};
use crate::model::answer::Answer;
use crate::model::catalog::Catalog;
use std::collections::HashSet;

const SIMULATED_ANSWERS: [Answer; 2] = [Answer::YES, Answer::NO];

/// Picks the unasked question with the greatest expected information
/// gain, or `None` when every catalog question has been asked.
pub fn best_question<'a>(
    catalog: &'a Catalog,
    posterior: &Posterior,
    asked: &HashSet<String>,
    model: &LikelihoodModel,
) -> Option<&'a str> {
    let current_entropy = posterior.entropy();

    let mut best: Option<&str> = None;
    let mut best_gain = f64::NEG_INFINITY;

    for question in catalog.questions() {
        if asked.contains(&question.id) {
            continue;
        }

        let expected = expected_entropy(catalog, posterior, model, &question.id);
        let gain = current_entropy - expected;
        if gain > best_gain {
            best_gain = gain;
            best = Some(question.id.as_str());
        }
    }

    best
}

/// Expected posterior entropy after asking `question_id`, averaged over
/// the two simulated answer branches.
fn expected_entropy(
    catalog: &Catalog,
    posterior: &Posterior,
    model: &LikelihoodModel,
    question_id: &str,
) -> f64 {
    let current_total = posterior.total();
    let mut expected = 0.0;

    for answer in SIMULATED_ANSWERS {
        let mut scores = Vec::with_capacity(posterior.len());
        let mut branch_total = 0.0;

        for (index, entity) in catalog.entities().iter().enumerate() {
            let likelihood = model.evaluate(entity.attribute(question_id), answer);
            let score = posterior.prob(index) * likelihood;
            branch_total += score;
            scores.push(score);
        }

        if branch_total > 0.0 {
            for score in &mut scores {
                *score /= branch_total;
            }
        } else if !scores.is_empty() {
            // Zero branch mass carries no preference; fall back to uniform.
            let uniform = 1.0 / scores.len() as f64;
            scores.fill(uniform);
        }

        let branch_probability = if current_total > 0.0 {
            branch_total / current_total
        } else {
            0.5
        };

        expected += branch_probability * shannon_entropy(scores.iter().copied());
    }

    expected
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::entity::Entity;
    use crate::model::question::Question;

    fn catalog_with(questions: &[(&str, &str)], entities: Vec<Entity>) -> Catalog {
        let mut catalog = Catalog::new();
        for (id, text) in questions {
            catalog.add_question(Question::new(*id, *text));
        }
        for entity in entities {
            catalog.add_entity(entity);
        }
        catalog
    }

    fn entity(name: &str, attributes: &[(&str, f64)]) -> Entity {
        let mut entity = Entity::new(name);
        for (question_id, value) in attributes {
            entity.set_attribute(*question_id, *value);
        }
        entity
    }

    #[test]
    fn prefers_the_discriminating_question() {
        let catalog = catalog_with(
            &[("q_same", "Same for all?"), ("q_split", "Splits the set?")],
            vec![
                entity("Dog", &[("q_same", 1.0), ("q_split", 1.0)]),
                entity("Bird", &[("q_same", 1.0), ("q_split", -1.0)]),
            ],
        );
        let posterior = Posterior::uniform(2);
        let asked = HashSet::new();
        let model = LikelihoodModel::default();

        let choice = best_question(&catalog, &posterior, &asked, &model);
        assert_eq!(choice, Some("q_split"));
    }

    #[test]
    fn never_returns_an_asked_question() {
        let catalog = catalog_with(
            &[("q1", "First?"), ("q2", "Second?")],
            vec![
                entity("Dog", &[("q1", 1.0), ("q2", -1.0)]),
                entity("Bird", &[("q1", -1.0), ("q2", 1.0)]),
            ],
        );
        let posterior = Posterior::uniform(2);
        let model = LikelihoodModel::default();

        let mut asked = HashSet::new();
        asked.insert("q1".to_string());
        assert_eq!(
            best_question(&catalog, &posterior, &asked, &model),
            Some("q2")
        );

        asked.insert("q2".to_string());
        assert_eq!(best_question(&catalog, &posterior, &asked, &model), None);
    }

    #[test]
    fn tie_breaks_to_catalog_order() {
        // Two questions with identical attribute columns produce identical
        // gains; the earlier catalog entry must win.
        let catalog = catalog_with(
            &[("q_b", "Later id, first slot?"), ("q_a", "Second slot?")],
            vec![
                entity("Dog", &[("q_b", 1.0), ("q_a", 1.0)]),
                entity("Bird", &[("q_b", -1.0), ("q_a", -1.0)]),
            ],
        );
        let posterior = Posterior::uniform(2);
        let asked = HashSet::new();
        let model = LikelihoodModel::default();

        assert_eq!(
            best_question(&catalog, &posterior, &asked, &model),
            Some("q_b")
        );
    }

    #[test]
    fn empty_question_catalog_yields_none() {
        let catalog = catalog_with(&[], vec![entity("Dog", &[])]);
        let posterior = Posterior::uniform(1);
        let asked = HashSet::new();
        let model = LikelihoodModel::default();

        assert_eq!(best_question(&catalog, &posterior, &asked, &model), None);
    }

    #[test]
    fn uninformative_question_still_selected_when_alone() {
        // A question nobody has an attribute for gains nothing, but it is
        // the only candidate and must still be offered.
        let catalog = catalog_with(
            &[("q_mystery", "Anyone?")],
            vec![entity("Dog", &[]), entity("Bird", &[])],
        );
        let posterior = Posterior::uniform(2);
        let asked = HashSet::new();
        let model = LikelihoodModel::default();

        assert_eq!(
            best_question(&catalog, &posterior, &asked, &model),
            Some("q_mystery")
        );
    }
}
