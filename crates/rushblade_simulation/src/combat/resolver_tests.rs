//! Tests for the swing resolver.

#[cfg(test)]
mod tests {
    use super::super::layers::CombatLayers;
    use super::super::resolver::{resolve_swing, Damageable, SwingParams};
    use bevy::prelude::*;

    #[derive(Debug)]
    struct Dummy {
        id: u32,
        position: Vec2,
        layers: CombatLayers,
        damage_taken: u32,
        knockback: Vec2,
    }

    impl Dummy {
        fn enemy(id: u32, x: f32, y: f32) -> Self {
            Self {
                id,
                position: Vec2::new(x, y),
                layers: CombatLayers::ENEMY,
                damage_taken: 0,
                knockback: Vec2::ZERO,
            }
        }
    }

    impl Damageable for &mut Dummy {
        type Id = u32;

        fn id(&self) -> u32 {
            self.id
        }

        fn position(&self) -> Vec2 {
            self.position
        }

        fn layers(&self) -> CombatLayers {
            self.layers
        }

        fn take_damage(&mut self, amount: u32, knockback: Vec2) {
            self.damage_taken += amount;
            self.knockback += knockback;
        }
    }

    fn swing() -> SwingParams {
        SwingParams {
            origin: Vec2::ZERO,
            facing: Vec2::X,
            radius: 2.5,
            half_angle_degrees: 60.0,
            damage: 10,
            knockback: 7.0,
            damage_multiplier: 1.0,
            mask: CombatLayers::ENEMY | CombatLayers::DESTRUCTIBLE,
        }
    }

    #[test]
    fn test_hits_targets_in_sector() {
        let mut targets = vec![
            Dummy::enemy(1, 1.0, 0.0),  // straight ahead
            Dummy::enemy(2, 1.0, 1.5),  // ~56°, inside
            Dummy::enemy(3, -1.0, 0.0), // behind
            Dummy::enemy(4, 3.0, 0.0),  // out of range
        ];

        let hits = resolve_swing(&swing(), targets.iter_mut());

        let ids: Vec<u32> = hits.iter().map(|hit| hit.target).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(targets[0].damage_taken, 10);
        assert_eq!(targets[2].damage_taken, 0);
        assert_eq!(targets[3].damage_taken, 0);
    }

    #[test]
    fn test_edge_of_arc_is_inclusive() {
        let params = swing();
        let edge = Vec2::from_angle(59.9_f32.to_radians()) * 2.0;
        let outside = Vec2::from_angle(61.0_f32.to_radians()) * 2.0;
        assert!(params.contains(edge));
        assert!(!params.contains(outside));
    }

    #[test]
    fn test_damage_multiplier_rounds() {
        let params = SwingParams {
            damage_multiplier: 1.25,
            ..swing()
        };
        // 10 * 1.25 = 12.5 → 12 (ties to even)
        assert_eq!(params.applied_damage(), 12);

        let params = SwingParams {
            damage: 30,
            damage_multiplier: 1.25,
            ..swing()
        };
        // 37.5 → 38
        assert_eq!(params.applied_damage(), 38);

        let params = SwingParams {
            damage: 20,
            damage_multiplier: 1.1,
            ..swing()
        };
        assert_eq!(params.applied_damage(), 22);
    }

    #[test]
    fn test_knockback_points_away_from_origin() {
        let mut targets = vec![Dummy::enemy(1, 0.0, 2.0)];
        let params = SwingParams {
            facing: Vec2::Y,
            ..swing()
        };

        let hits = resolve_swing(&params, targets.iter_mut());
        assert_eq!(hits.len(), 1);
        assert!((hits[0].knockback - Vec2::new(0.0, 7.0)).length() < 1e-5);
        assert_eq!(targets[0].knockback, hits[0].knockback);
    }

    #[test]
    fn test_zero_facing_defaults_to_positive_x() {
        let mut targets = vec![Dummy::enemy(1, 1.0, 0.0), Dummy::enemy(2, -1.0, 0.0)];
        let params = SwingParams {
            facing: Vec2::ZERO,
            ..swing()
        };

        let hits = resolve_swing(&params, targets.iter_mut());
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].target, 1);
    }

    #[test]
    fn test_target_at_origin_is_pushed_along_facing() {
        let mut targets = vec![Dummy::enemy(1, 0.0, 0.0)];
        let hits = resolve_swing(&swing(), targets.iter_mut());

        assert_eq!(hits.len(), 1);
        assert!((hits[0].knockback - Vec2::new(7.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_mask_filters_layers() {
        let mut ally = Dummy::enemy(1, 1.0, 0.0);
        ally.layers = CombatLayers::PLAYER;
        let mut targets = vec![ally];

        let hits = resolve_swing(&swing(), targets.iter_mut());
        assert!(hits.is_empty());
        assert_eq!(targets[0].damage_taken, 0);
    }

    #[test]
    fn test_empty_target_set_is_noop() {
        let mut targets: Vec<Dummy> = Vec::new();
        assert!(resolve_swing(&swing(), targets.iter_mut()).is_empty());
    }

    #[test]
    fn test_one_record_per_target() {
        let mut targets = vec![
            Dummy::enemy(1, 1.0, 0.0),
            Dummy::enemy(2, 1.5, 0.2),
            Dummy::enemy(3, 2.0, -0.3),
        ];
        let hits = resolve_swing(&swing(), targets.iter_mut());
        assert_eq!(hits.len(), 3);
    }
}
