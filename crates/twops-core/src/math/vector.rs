use glam::Vec2;

/// Vector operations the physics code needs beyond what `glam::Vec2` ships.
///
/// Addition, subtraction, scaling, component-wise multiplication, `dot`,
/// `length` and `length_squared` come straight from glam. The methods here
/// either have no glam counterpart or differ from it in a way the contact
/// math depends on.
pub trait Vec2Ext {
    /// Scalar 2D cross product: `x1 * y2 - y1 * x2`.
    fn cross(self, other: Vec2) -> f32;

    /// Unit vector in the same direction. A zero vector is returned unchanged.
    fn unit(self) -> Vec2;

    /// `(x, y) -> (y, -x)`.
    ///
    /// glam's `perp` rotates the other way; face normals are built with this
    /// one so they point outward for the winding polygons are generated with.
    fn right_perp(self) -> Vec2;

    /// Rotate by `angle` radians around `pivot`.
    fn rotate_about(self, angle: f32, pivot: Vec2) -> Vec2;

    /// `self + v * k`.
    fn add_scaled(self, v: Vec2, k: f32) -> Vec2;
}

impl Vec2Ext for Vec2 {
    #[inline]
    fn cross(self, other: Vec2) -> f32 {
        self.x * other.y - self.y * other.x
    }

    #[inline]
    fn unit(self) -> Vec2 {
        let len = self.length();
        if len == 0.0 {
            self
        } else {
            self / len
        }
    }

    #[inline]
    fn right_perp(self) -> Vec2 {
        Vec2::new(self.y, -self.x)
    }

    #[inline]
    fn rotate_about(self, angle: f32, pivot: Vec2) -> Vec2 {
        let (sin, cos) = angle.sin_cos();
        let d = self - pivot;
        Vec2::new(d.x * cos - d.y * sin, d.x * sin + d.y * cos) + pivot
    }

    #[inline]
    fn add_scaled(self, v: Vec2, k: f32) -> Vec2 {
        self + v * k
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec2, b: Vec2) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn cross_is_signed_area() {
        assert_eq!(Vec2::X.cross(Vec2::Y), 1.0);
        assert_eq!(Vec2::Y.cross(Vec2::X), -1.0);
        assert_eq!(Vec2::new(2.0, 3.0).cross(Vec2::new(4.0, 6.0)), 0.0);
    }

    #[test]
    fn unit_of_zero_is_zero() {
        assert_eq!(Vec2::ZERO.unit(), Vec2::ZERO);
    }

    #[test]
    fn unit_has_length_one() {
        let u = Vec2::new(3.0, 4.0).unit();
        assert!((u.length() - 1.0).abs() < 1e-6);
        assert!(close(u, Vec2::new(0.6, 0.8)));
    }

    #[test]
    fn right_perp_swaps_and_negates() {
        assert_eq!(Vec2::new(1.0, 2.0).right_perp(), Vec2::new(2.0, -1.0));
        // opposite of glam's perp
        let v = Vec2::new(5.0, -7.0);
        assert_eq!(v.right_perp(), -v.perp());
    }

    #[test]
    fn rotate_about_origin_quarter_turn() {
        let r = Vec2::X.rotate_about(std::f32::consts::FRAC_PI_2, Vec2::ZERO);
        assert!(close(r, Vec2::Y), "got {:?}", r);
    }

    #[test]
    fn rotate_about_pivot_keeps_distance() {
        let pivot = Vec2::new(10.0, -4.0);
        let p = Vec2::new(13.0, 0.0);
        let r = p.rotate_about(1.234, pivot);
        assert!(((r - pivot).length() - (p - pivot).length()).abs() < 1e-4);
        assert!(close(pivot.rotate_about(2.0, pivot), pivot));
    }

    #[test]
    fn add_scaled_matches_manual() {
        let v = Vec2::new(1.0, 1.0).add_scaled(Vec2::new(2.0, -1.0), 3.0);
        assert_eq!(v, Vec2::new(7.0, -2.0));
    }
}
