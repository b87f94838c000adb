use super::entity::Entity;
use super::question::Question;

/// The shared entity/question catalog the engine reasons over.
///
/// Both collections preserve insertion order, and that order is the
/// tie-break order everywhere: the question selector scans questions in
/// catalog order and the reporter scans entities in catalog order, so
/// among equal scores the earliest catalog entry wins.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Catalog {
    entities: Vec<Entity>,
    questions: Vec<Question>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entity, replacing any existing entry with the same name
    /// without changing its position.
    pub fn add_entity(&mut self, entity: Entity) {
        if let Some(existing) = self
            .entities
            .iter_mut()
            .find(|candidate| candidate.name() == entity.name())
        {
            *existing = entity;
        } else {
            self.entities.push(entity);
        }
    }

    /// Adds a question, replacing the text of an existing id in place.
    pub fn add_question(&mut self, question: Question) {
        if let Some(existing) = self
            .questions
            .iter_mut()
            .find(|candidate| candidate.id == question.id)
        {
            existing.text = question.text;
        } else {
            self.questions.push(question);
        }
    }

    pub fn entity(&self, name: &str) -> Option<&Entity> {
        self.entities.iter().find(|entity| entity.name() == name)
    }

    pub fn entity_mut(&mut self, name: &str) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|entity| entity.name() == name)
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn question_text(&self, question_id: &str) -> Option<&str> {
        self.questions
            .iter()
            .find(|question| question.id == question_id)
            .map(|question| question.text.as_str())
    }

    pub fn contains_entity(&self, name: &str) -> bool {
        self.entity(name).is_some()
    }

    pub fn contains_question(&self, question_id: &str) -> bool {
        self.questions
            .iter()
            .any(|question| question.id == question_id)
    }

    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    pub fn question_count(&self) -> usize {
        self.questions.len()
    }

    /// Updates one attribute on a named entity; unknown names are ignored.
    pub fn set_attribute(&mut self, name: &str, question_id: &str, value: f64) {
        if let Some(entity) = self.entity_mut(name) {
            entity.set_attribute(question_id, value);
        }
    }
}
