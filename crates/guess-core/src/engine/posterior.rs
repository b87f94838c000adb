//! Posterior probability store, kept parallel to the catalog's entity order.

/// Shannon entropy (base 2) of a probability sequence; terms with
/// non-positive probability contribute nothing.
pub fn shannon_entropy(probs: impl Iterator<Item = f64>) -> f64 {
    probs
        .filter(|p| *p > 0.0)
        .map(|p| -p * p.log2())
        .sum()
}

/// The belief distribution over entities. Slot `i` is the probability of
/// the catalog's `i`-th entity; the mapping to names lives in the catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct Posterior {
    probs: Vec<f64>,
}

impl Posterior {
    /// Uniform distribution over `len` entities (empty when `len` is 0).
    pub fn uniform(len: usize) -> Self {
        let probs = if len == 0 {
            Vec::new()
        } else {
            vec![1.0 / len as f64; len]
        };
        Self { probs }
    }

    pub fn len(&self) -> usize {
        self.probs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.probs.is_empty()
    }

    pub fn prob(&self, index: usize) -> f64 {
        self.probs[index]
    }

    pub fn scale(&mut self, index: usize, factor: f64) {
        self.probs[index] *= factor;
    }

    pub fn total(&self) -> f64 {
        self.probs.iter().sum()
    }

    /// Rescales the distribution to sum to 1. A non-positive total means
    /// the distribution is degenerate; it is left untouched rather than
    /// divided by zero.
    pub fn normalize(&mut self) {
        let total = self.total();
        if total <= 0.0 {
            return;
        }
        for prob in &mut self.probs {
            *prob /= total;
        }
    }

    pub fn entropy(&self) -> f64 {
        shannon_entropy(self.iter())
    }

    pub fn iter(&self) -> impl Iterator<Item = f64> + '_ {
        self.probs.iter().copied()
    }
}
