//! Bayesian inference over a fixed catalog of candidate entities.
//!
//! This module is composed of:
//! - `likelihood`: the evidence strength model mapping answers to likelihoods.
//! - `posterior`: the belief distribution and its entropy.
//! - `selector`: expected-information-gain question selection.
//! - `reinforce`: attribute learning after a confirmed guess.
//! - `report`: read-only candidate views.

pub mod likelihood;
mod posterior;
mod reinforce;
mod report;
mod selector;

pub use likelihood::{LikelihoodConfig, LikelihoodModel};
pub use posterior::{Posterior, shannon_entropy};
pub use reinforce::{ReinforceConfig, reinforce};
pub use report::{Candidate, best_guess, top_candidates};

use crate::model::answer::Answer;
use crate::model::catalog::Catalog;
use std::collections::HashSet;

/// The inference engine for one guessing session.
///
/// The engine borrows the catalog for its lifetime: it reads attribute
/// vectors during updates and selection, and writes them only through
/// [`Engine::reinforce_entity`]. Committing the mutated catalog to durable
/// storage is the caller's job once the session ends. The posterior and
/// the asked-question set are owned here and reset together.
#[derive(Debug)]
pub struct Engine<'a> {
    catalog: &'a mut Catalog,
    posterior: Posterior,
    asked: HashSet<String>,
    likelihood: LikelihoodModel,
}

impl<'a> Engine<'a> {
    pub fn new(catalog: &'a mut Catalog) -> Self {
        Self::with_model(catalog, LikelihoodModel::default())
    }

    pub fn with_model(catalog: &'a mut Catalog, likelihood: LikelihoodModel) -> Self {
        let posterior = Posterior::uniform(catalog.entity_count());
        Self {
            catalog,
            posterior,
            asked: HashSet::new(),
            likelihood,
        }
    }

    /// Returns to the fresh state: uniform posterior, no questions asked.
    pub fn reset(&mut self) {
        self.posterior = Posterior::uniform(self.catalog.entity_count());
        self.asked.clear();
    }

    /// Applies one (question, answer) observation.
    ///
    /// The question is marked as asked even for an unknown answer; an
    /// unknown answer changes no beliefs beyond that.
    pub fn update_probabilities(&mut self, question_id: &str, answer: Answer) {
        self.asked.insert(question_id.to_string());

        if answer.is_unknown() {
            return;
        }

        for (index, entity) in self.catalog.entities().iter().enumerate() {
            let likelihood = self.likelihood.evaluate(entity.attribute(question_id), answer);
            self.posterior.scale(index, likelihood);
        }
        self.posterior.normalize();
    }

    /// The unasked question with the greatest expected information gain.
    pub fn best_question(&self) -> Option<&str> {
        selector::best_question(self.catalog, &self.posterior, &self.asked, &self.likelihood)
    }

    pub fn best_guess(&self) -> Option<Candidate> {
        report::best_guess(self.catalog, &self.posterior)
    }

    pub fn top_candidates(&self, n: usize) -> Vec<Candidate> {
        report::top_candidates(self.catalog, &self.posterior, n)
    }

    /// Nudges the confirmed entity's attribute toward the observed answer.
    pub fn reinforce_entity(
        &mut self,
        entity_name: &str,
        question_id: &str,
        answer: Answer,
        rate: f64,
    ) {
        reinforce::reinforce(self.catalog, entity_name, question_id, answer, rate);
    }

    pub fn question_text(&self, question_id: &str) -> Option<&str> {
        self.catalog.question_text(question_id)
    }

    pub fn contains_entity(&self, name: &str) -> bool {
        self.catalog.contains_entity(name)
    }

    pub fn asked_count(&self) -> usize {
        self.asked.len()
    }

    pub fn was_asked(&self, question_id: &str) -> bool {
        self.asked.contains(question_id)
    }

    pub fn posterior(&self) -> &Posterior {
        &self.posterior
    }

    pub fn catalog(&self) -> &Catalog {
        self.catalog
    }
}
