// Pointer position in canvas coordinates, repels particles that come
// within its influence radius

use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Pointer {
    pub pos: Vector2<f64>,
}

impl Pointer {
    pub const INFLUENCE_RADIUS: f64 = 150.0;
    pub const PUSH_STRENGTH: f64 = 1.5;

    pub fn new(x: f64, y: f64) -> Self {
        Pointer { pos: [x, y] }
    }

    // Displacement to apply to a particle at `point`, or None when the
    // point is outside the influence radius
    pub fn push_at(&self, point: Vector2<f64>) -> Option<Vector2<f64>> {
        let to_pointer = vecmath::vec2_sub(self.pos, point);
        let distance = vecmath::vec2_len(to_pointer);
        if distance >= Pointer::INFLUENCE_RADIUS {
            return None;
        }
        let force = (Pointer::INFLUENCE_RADIUS - distance) / Pointer::INFLUENCE_RADIUS;
        // atan2(0, 0) is 0, so a particle sitting on the pointer goes left
        let angle = to_pointer[1].atan2(to_pointer[0]);
        Some([
            -angle.cos() * force * Pointer::PUSH_STRENGTH,
            -angle.sin() * force * Pointer::PUSH_STRENGTH,
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_push_outside_radius() {
        let pointer = Pointer::new(0.0, 0.0);
        assert_eq!(pointer.push_at([150.0, 0.0]), None);
        assert_eq!(pointer.push_at([200.0, 200.0]), None);
    }

    #[test]
    fn push_points_away_from_pointer() {
        let pointer = Pointer::new(100.0, 100.0);
        let push = pointer.push_at([175.0, 100.0]).unwrap();
        assert!(push[0] > 0.0);
        assert!(push[1].abs() < 1e-12);
        // half way into the radius gives half strength
        assert!((push[0] - 0.75).abs() < 1e-12);
    }

    #[test]
    fn push_grows_toward_center() {
        let pointer = Pointer::new(0.0, 0.0);
        let near = pointer.push_at([0.0, -10.0]).unwrap();
        let far = pointer.push_at([0.0, -100.0]).unwrap();
        assert!(near[1] < far[1]);
        assert!(near[1] < 0.0);
    }

    #[test]
    fn coincident_point_is_pushed_left_at_full_strength() {
        let pointer = Pointer::new(5.0, 5.0);
        let push = pointer.push_at([5.0, 5.0]).unwrap();
        assert!((push[0] + Pointer::PUSH_STRENGTH).abs() < 1e-12);
        assert!(push[1].abs() < 1e-12);
    }
}
