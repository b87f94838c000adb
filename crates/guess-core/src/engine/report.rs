//! Read-only candidate views over the posterior.

use super::posterior::Posterior;
use crate::model::catalog::Catalog;
use core::cmp::Ordering;

/// A named entity paired with its current posterior probability.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub name: String,
    pub probability: f64,
}

/// At most `n` candidates by descending probability. The sort is stable,
/// so equal probabilities keep their catalog order.
pub fn top_candidates(catalog: &Catalog, posterior: &Posterior, n: usize) -> Vec<Candidate> {
    let mut ranked: Vec<Candidate> = catalog
        .entities()
        .iter()
        .zip(posterior.iter())
        .map(|(entity, probability)| Candidate {
            name: entity.name().to_string(),
            probability,
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.probability
            .partial_cmp(&a.probability)
            .unwrap_or(Ordering::Equal)
    });
    ranked.truncate(n);
    ranked
}

/// The single most probable entity; the first catalog entry wins ties.
pub fn best_guess(catalog: &Catalog, posterior: &Posterior) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for (entity, probability) in catalog.entities().iter().zip(posterior.iter()) {
        let better = match &best {
            Some(current) => probability > current.probability,
            None => true,
        };
        if better {
            best = Some(Candidate {
                name: entity.name().to_string(),
                probability,
            });
        }
    }
    best
}
