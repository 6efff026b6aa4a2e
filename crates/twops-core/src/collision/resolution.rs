//! Contact resolution: positional correction plus velocity impulses.
//!
//! All three entry points take the pair in the order it was detected, so the
//! contact normal points from `b` toward `a`. A pair of static bodies is a
//! no-op before any division happens, and so is a pair that is already
//! separating along the normal.
//!
//! Each call handles one pair and one contact. Stacks of touching bodies need
//! several passes over all pairs per step to settle.

use glam::Vec2;

use super::manifold::Contact;
use crate::body::RigidBody;
use crate::math::Vec2Ext;

/// Below this tangential speed no friction impulse is applied.
const FRICTION_SPEED_THRESHOLD: f32 = 1e-5;

/// Push overlapping bodies apart by `correction_factor * depth`, split by
/// inverse mass. Velocities are untouched.
///
/// A factor in [0.2, 0.3] removes penetration over a few steps without the
/// overshoot a full correction causes.
pub fn positional_correction(a: &mut RigidBody, b: &mut RigidBody, contact: &Contact, correction_factor: f32) {
    let inv_a = a.inverse_mass();
    let inv_b = b.inverse_mass();
    let total = inv_a + inv_b;
    if total == 0.0 {
        return;
    }

    let magnitude = contact.depth / total * correction_factor;
    let correction = contact.normal * magnitude;
    if !a.is_static() {
        a.translate(correction * inv_a);
    }
    if !b.is_static() {
        b.translate(-correction * inv_b);
    }
}

/// Rotation-aware impulse with restitution and Coulomb friction.
pub fn resolve(a: &mut RigidBody, b: &mut RigidBody, contact: &Contact) {
    let inv_mass_sum = a.inverse_mass() + b.inverse_mass();
    if inv_mass_sum == 0.0 {
        return;
    }

    let n = contact.normal;
    let ra = contact.point - a.center();
    let rb = contact.point - b.center();

    let rel_vel = a.point_velocity(ra) - b.point_velocity(rb);
    let vel_along_normal = rel_vel.dot(n);
    if vel_along_normal >= 0.0 {
        return;
    }

    let e = a.bounce().min(b.bounce());
    let j = -(1.0 + e) * vel_along_normal / effective_mass(a, b, ra, rb, n, inv_mass_sum);
    let impulse = n * j;
    a.apply_impulse(impulse, ra);
    b.apply_impulse(-impulse, rb);

    // Friction opposes what is left of the sliding motion.
    let rel_vel = a.point_velocity(ra) - b.point_velocity(rb);
    let sliding = rel_vel - n * rel_vel.dot(n);
    if sliding.length() < FRICTION_SPEED_THRESHOLD {
        return;
    }
    let t = (-sliding).unit();
    let mu = a.friction().min(b.friction());

    let stop = -rel_vel.dot(t) / effective_mass(a, b, ra, rb, t, inv_mass_sum);
    let jt = stop.min(mu * j).min(j.abs());
    if jt <= 0.0 {
        return;
    }
    let friction = t * jt;
    a.apply_impulse(friction, ra);
    b.apply_impulse(-friction, rb);
}

/// Linear-only impulse: no rotation, no friction.
///
/// Restitution is the harmonic combination `2 e1 e2 / (e1 + e2)`.
pub fn linear_resolve(a: &mut RigidBody, b: &mut RigidBody, contact: &Contact) {
    let inv_mass_sum = a.inverse_mass() + b.inverse_mass();
    if inv_mass_sum == 0.0 {
        return;
    }

    let n = contact.normal;
    let vel_along_normal = (a.velocity() - b.velocity()).dot(n);
    if vel_along_normal >= 0.0 {
        return;
    }

    let e = harmonic_restitution(a.bounce(), b.bounce());
    let j = -(1.0 + e) * vel_along_normal / inv_mass_sum;
    a.apply_linear_impulse(n * j);
    b.apply_linear_impulse(-n * j);
}

/// Denominator of the impulse along `dir`.
fn effective_mass(a: &RigidBody, b: &RigidBody, ra: Vec2, rb: Vec2, dir: Vec2, inv_mass_sum: f32) -> f32 {
    let ra_x = ra.cross(dir);
    let rb_x = rb.cross(dir);
    inv_mass_sum + ra_x * ra_x * a.inverse_inertia() + rb_x * rb_x * b.inverse_inertia()
}

fn harmonic_restitution(e1: f32, e2: f32) -> f32 {
    let sum = e1 + e2;
    if sum <= 0.0 {
        0.0
    } else {
        2.0 * e1 * e2 / sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::detect;

    fn head_on(bounce: f32) -> (RigidBody, RigidBody) {
        let a = RigidBody::circle(Vec2::ZERO, 10.0)
            .with_velocity(Vec2::new(5.0, 0.0))
            .with_bounce(bounce);
        let b = RigidBody::circle(Vec2::new(18.0, 0.0), 10.0)
            .with_velocity(Vec2::new(-5.0, 0.0))
            .with_bounce(bounce);
        (a, b)
    }

    #[test]
    fn elastic_head_on_swaps_velocities() {
        let (mut a, mut b) = head_on(1.0);
        let contact = detect(&a, &b).expect("overlap").primary();
        resolve(&mut a, &mut b, &contact);
        assert!((a.velocity().x + 5.0).abs() < 1e-4, "a: {:?}", a.velocity());
        assert!((b.velocity().x - 5.0).abs() < 1e-4, "b: {:?}", b.velocity());
        assert!(a.angular_velocity().abs() < 1e-6);
    }

    #[test]
    fn inelastic_head_on_stops_relative_motion() {
        let (mut a, mut b) = head_on(0.0);
        let contact = detect(&a, &b).expect("overlap").primary();
        resolve(&mut a, &mut b, &contact);
        let rel = (a.velocity() - b.velocity()).dot(contact.normal);
        assert!(rel.abs() < 1e-4, "relative normal velocity {}", rel);
    }

    #[test]
    fn separating_pair_is_untouched() {
        let a = RigidBody::circle(Vec2::ZERO, 10.0).with_velocity(Vec2::new(-5.0, 0.0));
        let b = RigidBody::circle(Vec2::new(18.0, 0.0), 10.0).with_velocity(Vec2::new(5.0, 0.0));
        let contact = detect(&a, &b).expect("overlap").primary();
        for op in [resolve as fn(&mut RigidBody, &mut RigidBody, &Contact), linear_resolve] {
            let (mut a2, mut b2) = (a.clone(), b.clone());
            op(&mut a2, &mut b2, &contact);
            assert_eq!(a2.velocity(), a.velocity());
            assert_eq!(b2.velocity(), b.velocity());
            assert_eq!(a2.angular_velocity(), 0.0);
        }
    }

    #[test]
    fn static_pair_is_a_no_op() {
        let mut a = RigidBody::rectangle(Vec2::ZERO, 10.0, 10.0).into_static();
        let mut b = RigidBody::rectangle(Vec2::new(8.0, 0.0), 10.0, 10.0).into_static();
        let contact = detect(&a, &b).expect("overlap").primary();
        positional_correction(&mut a, &mut b, &contact, 0.25);
        resolve(&mut a, &mut b, &contact);
        linear_resolve(&mut a, &mut b, &contact);
        assert_eq!(a.center(), Vec2::ZERO);
        assert_eq!(b.center(), Vec2::new(8.0, 0.0));
    }

    #[test]
    fn static_body_never_moves() {
        let mut ground = RigidBody::rectangle(Vec2::new(0.0, 60.0), 400.0, 30.0).into_static();
        let mut ball = RigidBody::circle(Vec2::new(0.0, 36.0), 10.0).with_velocity(Vec2::new(3.0, 40.0));
        let contact = detect(&ball, &ground).expect("ball in ground").primary();
        positional_correction(&mut ball, &mut ground, &contact, 0.25);
        resolve(&mut ball, &mut ground, &contact);
        assert_eq!(ground.velocity(), Vec2::ZERO);
        assert_eq!(ground.angular_velocity(), 0.0);
        assert_eq!(ground.center(), Vec2::new(0.0, 60.0));
        assert!(ball.velocity().y <= 0.0, "ball should stop sinking: {:?}", ball.velocity());
    }

    #[test]
    fn zero_mass_ground_with_pinned_inertia_does_not_spin() {
        let ball = RigidBody::circle(Vec2::new(30.0, 36.0), 10.0).with_velocity(Vec2::new(3.0, 40.0));
        let pinned = RigidBody::rectangle(Vec2::new(0.0, 60.0), 400.0, 30.0)
            .with_inertia(1000.0)
            .with_mass(0.0);
        let frozen = RigidBody::rectangle(Vec2::new(0.0, 60.0), 400.0, 30.0).into_static();

        let mut results = Vec::new();
        for ground in [pinned, frozen] {
            let (mut ball, mut ground) = (ball.clone(), ground);
            let contact = detect(&ball, &ground).expect("ball in ground").primary();
            resolve(&mut ball, &mut ground, &contact);
            assert_eq!(ground.angular_velocity(), 0.0);
            assert_eq!(ground.velocity(), Vec2::ZERO);
            results.push((ball.velocity(), ball.angular_velocity()));
        }
        // the pinned inertia must not soften the impulse either
        assert_eq!(results[0], results[1]);
    }

    #[test]
    fn positional_correction_splits_by_inverse_mass() {
        let mut light = RigidBody::circle(Vec2::ZERO, 10.0).with_mass(1.0);
        let mut heavy = RigidBody::circle(Vec2::new(16.0, 0.0), 10.0).with_mass(3.0);
        let contact = detect(&light, &heavy).expect("overlap").primary();
        positional_correction(&mut light, &mut heavy, &contact, 1.0);
        // depth 4: light moves 3, heavy moves 1
        assert!((light.center().x + 3.0).abs() < 1e-4, "light {:?}", light.center());
        assert!((heavy.center().x - 17.0).abs() < 1e-4, "heavy {:?}", heavy.center());
        assert_eq!(light.velocity(), Vec2::ZERO);
    }

    #[test]
    fn positional_correction_against_static_moves_dynamic_only() {
        let mut wall = RigidBody::rectangle(Vec2::ZERO, 20.0, 200.0).into_static();
        let mut ball = RigidBody::circle(Vec2::new(15.0, 0.0), 10.0);
        let contact = detect(&ball, &wall).expect("overlap").primary();
        positional_correction(&mut ball, &mut wall, &contact, 0.5);
        assert!((ball.center().x - 17.5).abs() < 1e-4, "ball {:?}", ball.center());
        assert_eq!(wall.center(), Vec2::ZERO);
    }

    #[test]
    fn off_center_hit_spins_the_box() {
        let mut floor = RigidBody::rectangle(Vec2::new(0.0, 100.0), 1000.0, 30.0).into_static();
        let mut plank = RigidBody::rectangle(Vec2::new(0.0, 50.0), 60.0, 60.0)
            .with_velocity(Vec2::new(0.0, 100.0));
        plank.rotate(0.3);
        let contact = detect(&plank, &floor).expect("corner hits floor").primary();
        resolve(&mut plank, &mut floor, &contact);
        assert!(plank.angular_velocity().abs() > 1e-3);
        assert!(plank.velocity().y < 100.0);
    }

    #[test]
    fn friction_slows_sliding_but_never_reverses_it() {
        let mut floor = RigidBody::rectangle(Vec2::new(0.0, 60.0), 1000.0, 30.0).into_static();
        let mut block = RigidBody::rectangle(Vec2::new(0.0, 0.0), 100.0, 100.0)
            .with_inertia(0.0)
            .with_velocity(Vec2::new(50.0, 20.0))
            .with_bounce(0.0)
            .with_friction(0.3);
        let contact = detect(&block, &floor).expect("block sinks").primary();
        resolve(&mut block, &mut floor, &contact);
        // normal impulse 20; friction limited to 0.3 * 20 = 6
        assert!(block.velocity().y.abs() < 1e-4, "{:?}", block.velocity());
        assert!((block.velocity().x - 44.0).abs() < 1e-3, "{:?}", block.velocity());
    }

    #[test]
    fn linear_resolve_uses_harmonic_restitution() {
        let (mut a, mut b) = head_on(1.0);
        b = b.with_bounce(0.0);
        let contact = detect(&a, &b).expect("overlap").primary();
        linear_resolve(&mut a, &mut b, &contact);
        // harmonic(1, 0) = 0: perfectly inelastic
        assert!((a.velocity().x - b.velocity().x).abs() < 1e-4);

        let (mut a, mut b) = head_on(0.5);
        let contact = detect(&a, &b).expect("overlap").primary();
        linear_resolve(&mut a, &mut b, &contact);
        // closing speed 10 becomes separating speed 5
        assert!(((b.velocity().x - a.velocity().x) - 5.0).abs() < 1e-4);
        assert_eq!(a.angular_velocity(), 0.0);
    }

    #[test]
    fn harmonic_restitution_edge_cases() {
        assert_eq!(harmonic_restitution(0.0, 0.0), 0.0);
        assert!((harmonic_restitution(1.0, 1.0) - 1.0).abs() < 1e-6);
        assert!((harmonic_restitution(0.5, 1.0) - 2.0 / 3.0).abs() < 1e-6);
    }
}
