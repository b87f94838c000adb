use std::collections::BTreeMap;

/// A candidate entity: a name plus a sparse attribute vector mapping
/// question ids to expected answer values in [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    name: String,
    attributes: BTreeMap<String, f64>,
}

impl Entity {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attributes(name: impl Into<String>, attributes: BTreeMap<String, f64>) -> Self {
        let mut entity = Self::new(name);
        for (question_id, value) in attributes {
            entity.set_attribute(question_id, value);
        }
        entity
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Expected answer for a question, or `None` when the entity has no
    /// recorded value for it.
    pub fn attribute(&self, question_id: &str) -> Option<f64> {
        self.attributes.get(question_id).copied()
    }

    /// Records an expected answer, clamping it into [-1.0, 1.0].
    pub fn set_attribute(&mut self, question_id: impl Into<String>, value: f64) {
        let clamped = if value.is_finite() {
            value.clamp(-1.0, 1.0)
        } else {
            0.0
        };
        self.attributes.insert(question_id.into(), clamped);
    }

    pub fn attributes(&self) -> &BTreeMap<String, f64> {
        &self.attributes
    }
}
