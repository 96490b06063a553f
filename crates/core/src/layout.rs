use crate::{LayoutRules, Vec2};

/// Target pose for one hand slot. Rotation is in degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Slot {
    pub pos: Vec2,
    pub rot: f32,
}

/// Arrange `count` slots along a symmetric arc around `pivot`.
///
/// The arc midpoint sits at the pivot; the ends droop by
/// `radius * (1 - cos(spread / 2))`. Tilt is proportional to the slot's
/// angle, zero at the center and maximal with opposite signs at the two
/// ends. Deterministic and order-stable: the output depends only on
/// `count` and the rules, never on prior layouts.
pub fn arc_slots(count: usize, pivot: Vec2, rules: &LayoutRules) -> Vec<Slot> {
    let mut slots = Vec::with_capacity(count);
    if count == 0 {
        return slots;
    }
    let denom = (count - 1).max(1) as f32;
    let half_spread = rules.spread / 2.0;
    for i in 0..count {
        let angle = if count == 1 {
            0.0
        } else {
            crate::geom::lerp(-half_spread, half_spread, i as f32 / denom)
        };
        let rad = angle.to_radians();
        let pos = pivot
            + Vec2::new(
                rules.radius * rad.sin(),
                rules.radius * rad.cos() - rules.radius,
            );
        let rot = if half_spread == 0.0 {
            0.0
        } else {
            -(angle / half_spread) * rules.max_tilt
        };
        slots.push(Slot { pos, rot });
    }
    slots
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> LayoutRules {
        LayoutRules {
            spread: 60.0,
            radius: 400.0,
            max_tilt: 12.0,
        }
    }

    fn angles(count: usize) -> Vec<f32> {
        let rules = rules();
        arc_slots(count, Vec2::ZERO, &rules)
            .iter()
            .map(|slot| -slot.rot / rules.max_tilt * (rules.spread / 2.0))
            .collect()
    }

    #[test]
    fn single_slot_sits_on_the_pivot() {
        let slots = arc_slots(1, Vec2::new(100.0, 200.0), &rules());
        assert_eq!(slots.len(), 1);
        assert!((slots[0].pos.x - 100.0).abs() < 1e-3);
        assert!((slots[0].pos.y - 200.0).abs() < 1e-3);
        assert_eq!(slots[0].rot, 0.0);
    }

    #[test]
    fn angles_are_monotonic_and_symmetric() {
        for count in 2..=8 {
            let angles = angles(count);
            for pair in angles.windows(2) {
                assert!(pair[0] < pair[1], "angles must increase with slot index");
            }
            for i in 0..count {
                let mirrored = -angles[count - 1 - i];
                assert!(
                    (angles[i] - mirrored).abs() < 1e-3,
                    "angles must be symmetric about the center"
                );
            }
        }
    }

    #[test]
    fn odd_center_has_zero_rotation() {
        for count in [1usize, 3, 5, 7] {
            let slots = arc_slots(count, Vec2::ZERO, &rules());
            assert!(slots[count / 2].rot.abs() < 1e-4);
        }
    }

    #[test]
    fn end_tilts_are_opposite_and_maximal() {
        let slots = arc_slots(5, Vec2::ZERO, &rules());
        let first = slots.first().expect("slots").rot;
        let last = slots.last().expect("slots").rot;
        assert!((first - 12.0).abs() < 1e-3);
        assert!((last + 12.0).abs() < 1e-3);
    }

    #[test]
    fn ends_droop_by_the_arc_height() {
        let rules = rules();
        let slots = arc_slots(7, Vec2::ZERO, &rules);
        let droop = rules.radius * (1.0 - (rules.spread / 2.0).to_radians().cos());
        assert!((slots[0].pos.y + droop).abs() < 1e-2);
        assert!((slots[6].pos.y + droop).abs() < 1e-2);
        assert!(slots[3].pos.y.abs() < 1e-3);
    }

    #[test]
    fn relayout_is_stable() {
        let a = arc_slots(6, Vec2::new(10.0, 20.0), &rules());
        let b = arc_slots(6, Vec2::new(10.0, 20.0), &rules());
        assert_eq!(a, b);
    }
}
