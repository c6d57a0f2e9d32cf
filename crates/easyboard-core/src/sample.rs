//! A small two-character universe used as a seed and as a test fixture.

use crate::character::{CharacterRecord, Position, Relation, Tag};
use crate::universe::Universe;

/// Arya and Jon, each with tags and relations. Both point at character
/// `"3"`, which is deliberately absent.
pub fn sample_characters() -> Vec<CharacterRecord> {
    vec![
        CharacterRecord::new("1", "Arya Stark")
            .with_descriptions(
                "Petite Stark en cavale.",
                "Une jeune fille de la maison Stark.",
            )
            .with_tags(vec![
                Tag::new("gender", "string", "Femme"),
                Tag::new("age", "int", 15),
            ])
            .with_position(Position::new(150.0, 300.0))
            .with_relations(vec![
                Relation::new("2", "ami"),
                Relation::new("3", "méfiance"),
            ]),
        CharacterRecord::new("2", "Jon Snow")
            .with_descriptions(
                "Bâtard de Winterfell.",
                "Garde de Nuit, loyal et courageux.",
            )
            .with_tags(vec![
                Tag::new("gender", "string", "Homme"),
                Tag::new("age", "int", 22),
            ])
            .with_position(Position::new(420.0, 260.0))
            .with_relations(vec![
                Relation::new("1", "protecteur"),
                Relation::new("3", "allié"),
            ]),
    ]
}

pub fn sample_universe() -> Universe {
    Universe::from_records(sample_characters())
}
