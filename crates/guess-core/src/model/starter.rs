use super::catalog::Catalog;
use super::entity::Entity;
use super::question::Question;

/// Builds the built-in starter catalog: eight animal questions and five
/// animals. The engine never reaches for this on its own; collaborators
/// pass it in explicitly when no durable knowledge exists yet.
pub fn starter_catalog() -> Catalog {
    let mut catalog = Catalog::new();

    for (id, text) in [
        ("q1", "Is it a mammal?"),
        ("q2", "Can it fly?"),
        ("q3", "Can it be kept as a pet?"),
        ("q4", "Does it live in water?"),
        ("q5", "Is it a carnivore?"),
        ("q6", "Is it bigger than a human?"),
        ("q7", "Does it make vocal sounds?"),
        ("q8", "Does it have four legs?"),
    ] {
        catalog.add_question(Question::new(id, text));
    }

    let profiles: [(&str, [f64; 8]); 5] = [
        ("Dog", [1.0, -1.0, 1.0, -1.0, 0.5, -0.5, 1.0, 1.0]),
        ("Cat", [1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, 1.0]),
        ("Elephant", [1.0, -1.0, -1.0, -1.0, -1.0, 1.0, 1.0, 1.0]),
        ("Penguin", [-1.0, -1.0, -0.5, 0.5, 0.5, -1.0, 1.0, -1.0]),
        ("Goldfish", [-1.0, -1.0, 1.0, 1.0, -1.0, -1.0, -1.0, -1.0]),
    ];

    for (name, values) in profiles {
        let mut entity = Entity::new(name);
        for (index, value) in values.iter().enumerate() {
            entity.set_attribute(format!("q{}", index + 1), *value);
        }
        catalog.add_entity(entity);
    }

    catalog
}
