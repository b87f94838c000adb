use super::catalog::Catalog;
use super::entity::Entity;
use super::question::Question;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Durable, human-editable form of the catalog:
/// `{ "entities": { name: { question_id: value } }, "questions": { id: text } }`.
///
/// `restore` rebuilds the catalog in lexicographic key order, so a catalog
/// loaded from disk has a reproducible iteration (and therefore tie-break)
/// order. Unknown fields in older files are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogSnapshot {
    pub entities: BTreeMap<String, BTreeMap<String, f64>>,
    pub questions: BTreeMap<String, String>,
}

impl CatalogSnapshot {
    pub fn capture(catalog: &Catalog) -> Self {
        let entities = catalog
            .entities()
            .iter()
            .map(|entity| (entity.name().to_string(), entity.attributes().clone()))
            .collect();
        let questions = catalog
            .questions()
            .iter()
            .map(|question| (question.id.clone(), question.text.clone()))
            .collect();
        CatalogSnapshot {
            entities,
            questions,
        }
    }

    pub fn restore(self) -> Catalog {
        let mut catalog = Catalog::new();
        for (id, text) in self.questions {
            catalog.add_question(Question::new(id, text));
        }
        for (name, attributes) in self.entities {
            catalog.add_entity(Entity::with_attributes(name, attributes));
        }
        catalog
    }

    pub fn to_json(catalog: &Catalog) -> serde_json::Result<String> {
        let snapshot = Self::capture(catalog);
        serde_json::to_string_pretty(&snapshot)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::CatalogSnapshot;
    use crate::model::catalog::Catalog;
    use crate::model::entity::Entity;
    use crate::model::question::Question;

    fn sample_catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.add_question(Question::new("q1", "Is it a mammal?"));
        let mut dog = Entity::new("Dog");
        dog.set_attribute("q1", 1.0);
        catalog.add_entity(dog);
        catalog
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let catalog = sample_catalog();
        let json = CatalogSnapshot::to_json(&catalog).unwrap();
        assert!(json.contains("\"Dog\""));
        assert!(json.contains("\"q1\": 1.0"));
        assert!(json.contains("Is it a mammal?"));
    }

    #[test]
    fn snapshot_roundtrip_restores_catalog() {
        let catalog = sample_catalog();
        let snapshot = CatalogSnapshot::capture(&catalog);
        let restored = snapshot.restore();
        assert_eq!(restored.entity_count(), 1);
        assert_eq!(restored.entity("Dog").unwrap().attribute("q1"), Some(1.0));
        assert_eq!(restored.question_text("q1"), Some("Is it a mammal?"));
    }

    #[test]
    fn restore_orders_entries_lexicographically() {
        let json = r#"{
            "entities": {
                "Zebra": {"q1": -1.0},
                "Ant": {"q1": 1.0}
            },
            "questions": {
                "q2": "Second?",
                "q1": "First?"
            }
        }"#;

        let catalog = CatalogSnapshot::from_json(json).unwrap().restore();
        assert_eq!(catalog.entities()[0].name(), "Ant");
        assert_eq!(catalog.entities()[1].name(), "Zebra");
        assert_eq!(catalog.questions()[0].id, "q1");
    }

    #[test]
    fn from_json_ignores_legacy_fields() {
        let legacy = r#"{
            "entities": {"Dog": {"q1": 1.0}},
            "questions": {"q1": "Is it a mammal?"},
            "schema_version": 1
        }"#;

        let snapshot = CatalogSnapshot::from_json(legacy).unwrap();
        assert_eq!(snapshot.entities.len(), 1);
        assert_eq!(snapshot.questions.len(), 1);
    }

    #[test]
    fn restore_clamps_out_of_range_values() {
        let json = r#"{
            "entities": {"Dog": {"q1": 5.0}},
            "questions": {"q1": "Is it a mammal?"}
        }"#;

        let catalog = CatalogSnapshot::from_json(json).unwrap().restore();
        assert_eq!(catalog.entity("Dog").unwrap().attribute("q1"), Some(1.0));
    }
}
