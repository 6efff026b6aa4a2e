use proptest::prelude::*;
use twops_core::{detect, linear_resolve, positional_correction, resolve, RigidBody, Vec2};

fn vec2(range: std::ops::Range<f32>) -> impl Strategy<Value = Vec2> {
    (range.clone(), range).prop_map(|(x, y)| Vec2::new(x, y))
}

/// Two circles whose centers are strictly closer than the radius sum.
fn overlapping_circles() -> impl Strategy<Value = (RigidBody, RigidBody)> {
    (vec2(-200.0..200.0), 5.0f32..50.0, 5.0f32..50.0, 0.0f32..std::f32::consts::TAU, 0.05f32..0.95)
        .prop_map(|(c, r1, r2, angle, fraction)| {
            let d = (r1 + r2) * fraction;
            let offset = Vec2::new(angle.cos(), angle.sin()) * d;
            (RigidBody::circle(c, r1), RigidBody::circle(c + offset, r2))
        })
}

proptest! {
    #[test]
    fn circles_collide_iff_closer_than_radius_sum(
        c1 in vec2(-300.0..300.0),
        c2 in vec2(-300.0..300.0),
        r1 in 1.0f32..100.0,
        r2 in 1.0f32..100.0,
    ) {
        let d = (c2 - c1).length();
        prop_assume!((d - (r1 + r2)).abs() > 1e-2);
        prop_assume!(d > 1e-3);

        let result = detect(&RigidBody::circle(c1, r1), &RigidBody::circle(c2, r2));
        if d < r1 + r2 {
            let manifold = result.expect("overlapping circles must collide");
            prop_assert!((manifold.depth - (r1 + r2 - d)).abs() < 1e-3);
            prop_assert_eq!(manifold.len(), 1);
            // normal points from the second body toward the first
            prop_assert!(manifold.normal.dot(c1 - c2) > 0.0);
        } else {
            prop_assert!(result.is_none());
        }
    }

    #[test]
    fn separated_rectangles_never_collide(
        center in vec2(-100.0..100.0),
        size_a in vec2(5.0..80.0),
        size_b in vec2(5.0..80.0),
        gap in 0.5f32..50.0,
        angle in 0.0f32..std::f32::consts::TAU,
    ) {
        let a = RigidBody::rectangle(center, size_a.x, size_a.y);
        // bounding circles apart, so the rectangles are apart at any angle
        let reach = size_a.length() / 2.0 + size_b.length() / 2.0 + gap;
        let offset = Vec2::new(angle.cos(), angle.sin()) * reach;
        let mut b = RigidBody::rectangle(center + offset, size_b.x, size_b.y);
        b.rotate(angle);
        prop_assert!(detect(&a, &b).is_none());
        prop_assert!(detect(&b, &a).is_none());
    }

    #[test]
    fn separating_velocities_are_left_alone(
        (a, b) in overlapping_circles(),
        speed in 0.1f32..100.0,
    ) {
        let manifold = detect(&a, &b).expect("overlap");
        let n = manifold.normal;
        // a moves along n (away from b), b moves against it
        let a = a.with_velocity(n * speed);
        let b = b.with_velocity(-n * speed);
        let contact = manifold.primary();

        let (mut a1, mut b1) = (a.clone(), b.clone());
        resolve(&mut a1, &mut b1, &contact);
        prop_assert_eq!(a1.velocity(), a.velocity());
        prop_assert_eq!(b1.velocity(), b.velocity());
        prop_assert_eq!(a1.angular_velocity(), 0.0);

        let (mut a2, mut b2) = (a.clone(), b.clone());
        linear_resolve(&mut a2, &mut b2, &contact);
        prop_assert_eq!(a2.velocity(), a.velocity());
        prop_assert_eq!(b2.velocity(), b.velocity());
    }

    #[test]
    fn inelastic_resolve_never_injects_energy(
        (a, b) in overlapping_circles(),
        va in vec2(-100.0..100.0),
        vb in vec2(-100.0..100.0),
        wa in -5.0f32..5.0,
        mass_a in 0.5f32..10.0,
        mass_b in 0.5f32..10.0,
    ) {
        let mut a = a.with_mass(mass_a).with_bounce(0.0).with_velocity(va).with_angular_velocity(wa);
        let mut b = b.with_mass(mass_b).with_bounce(0.0).with_velocity(vb);
        let contact = detect(&a, &b).expect("overlap").primary();
        let n = contact.normal;

        let before = (a.velocity() - b.velocity()).dot(n);
        resolve(&mut a, &mut b, &contact);
        let after = (a.velocity() - b.velocity()).dot(n);

        prop_assert!(after >= -1e-3, "still closing: {}", after);
        prop_assert!(after.abs() <= before.abs() + 1e-3, "{} -> {}", before, after);
    }

    #[test]
    fn positional_correction_converges_without_overshoot(
        (a, b) in overlapping_circles(),
        factor in 0.05f32..=1.0,
        static_b in any::<bool>(),
    ) {
        let mut a = a;
        let mut b = if static_b { b.into_static() } else { b };
        let radius_sum = a.radius().unwrap() + b.radius().unwrap();
        let mut depth = radius_sum - (b.center() - a.center()).length();

        for _ in 0..10 {
            let Some(manifold) = detect(&a, &b) else { break };
            positional_correction(&mut a, &mut b, &manifold.primary(), factor);
            let next = radius_sum - (b.center() - a.center()).length();
            prop_assert!(next <= depth + 1e-4, "depth grew: {} -> {}", depth, next);
            prop_assert!(next >= -1e-3, "overshot into separation: {}", next);
            depth = next;
        }
    }

    #[test]
    fn static_bodies_never_move(
        ball_center in vec2(-40.0..40.0),
        radius in 5.0f32..30.0,
        velocity in vec2(-200.0..200.0),
        spin in -10.0f32..10.0,
    ) {
        let mut ground = RigidBody::rectangle(Vec2::new(0.0, 50.0), 200.0, 40.0).into_static();
        prop_assert!(ground.is_static());
        prop_assert_eq!(ground.inverse_mass(), 0.0);

        let mut ball = RigidBody::circle(ball_center + Vec2::new(0.0, 30.0 - radius * 0.5), radius)
            .with_velocity(velocity)
            .with_angular_velocity(spin);
        let Some(manifold) = detect(&ball, &ground) else { return Ok(()) };
        for contact in manifold.contacts() {
            positional_correction(&mut ball, &mut ground, &contact, 0.25);
            resolve(&mut ball, &mut ground, &contact);
            linear_resolve(&mut ball, &mut ground, &contact);
        }
        prop_assert_eq!(ground.velocity(), Vec2::ZERO);
        prop_assert_eq!(ground.angular_velocity(), 0.0);
        prop_assert_eq!(ground.center(), Vec2::new(0.0, 50.0));
    }
}
