//! Collision queries between the runner and world entities
//!
//! Pure predicates over hitboxes. An empty collection never collides.

use super::entity::WorldEntity;
use super::hitbox::Hitbox;

/// Index of the first entity (in insertion order) overlapping `hitbox`
pub fn first_overlap(hitbox: &Hitbox, entities: &[WorldEntity]) -> Option<usize> {
    entities
        .iter()
        .position(|entity| entity.hitbox().intersects(hitbox))
}

/// Whether any entity overlaps `hitbox`
pub fn any_overlap(hitbox: &Hitbox, entities: &[WorldEntity]) -> bool {
    first_overlap(hitbox, entities).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::ObstacleKind;

    #[test]
    fn test_empty_collection_never_collides() {
        let runner = Hitbox::new(0.0, 0.0, 100.0, 100.0);
        assert!(!any_overlap(&runner, &[]));
        assert_eq!(first_overlap(&runner, &[]), None);
    }

    #[test]
    fn test_first_overlap_in_insertion_order() {
        let entities = vec![
            WorldEntity::obstacle(1, ObstacleKind::SmallCactus, 600.0),
            WorldEntity::obstacle(2, ObstacleKind::SmallCactus, 100.0),
            WorldEntity::obstacle(3, ObstacleKind::LargeCactus, 105.0),
        ];
        let probe = Hitbox::new(90.0, 300.0, 40.0, 100.0);
        assert_eq!(first_overlap(&probe, &entities), Some(1));
        assert!(any_overlap(&probe, &entities));
    }

    #[test]
    fn test_miss() {
        let entities = vec![WorldEntity::obstacle(1, ObstacleKind::SmallCactus, 600.0)];
        let probe = Hitbox::new(0.0, 0.0, 50.0, 50.0);
        assert!(!any_overlap(&probe, &entities));
    }
}
