use glam::Vec2;

/// One contact point with its normal and penetration depth.
///
/// This is what the resolver consumes. The normal points from the second
/// body of the detected pair toward the first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    pub point: Vec2,
    pub normal: Vec2,
    pub depth: f32,
}

/// Contact between two bodies: a unit normal, a depth and one or two world points.
///
/// Produced fresh by every detection call and never kept across steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactManifold {
    /// Unit normal pointing from body B toward body A.
    pub normal: Vec2,
    /// Penetration depth, never negative.
    pub depth: f32,
    points: [Vec2; 2],
    count: usize,
}

impl ContactManifold {
    pub fn single(point: Vec2, normal: Vec2, depth: f32) -> Self {
        Self { normal, depth, points: [point, point], count: 1 }
    }

    pub fn pair(first: Vec2, second: Vec2, normal: Vec2, depth: f32) -> Self {
        Self { normal, depth, points: [first, second], count: 2 }
    }

    /// Contact points, primary first.
    pub fn points(&self) -> &[Vec2] {
        &self.points[..self.count]
    }

    /// Number of contact points (1 or 2).
    pub fn len(&self) -> usize {
        self.count
    }

    /// Always `false`; a manifold exists only for colliding pairs.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// The first contact point as a resolver record.
    pub fn primary(&self) -> Contact {
        Contact { point: self.points[0], normal: self.normal, depth: self.depth }
    }

    /// Every contact point as a resolver record.
    pub fn contacts(&self) -> impl Iterator<Item = Contact> + '_ {
        self.points().iter().map(move |&point| Contact {
            point,
            normal: self.normal,
            depth: self.depth,
        })
    }

    /// Same contact seen with the bodies swapped.
    pub fn flipped(mut self) -> Self {
        self.normal = -self.normal;
        self
    }

    /// Flip the normal when it points from A's center toward B's.
    pub(crate) fn oriented(mut self, center_a: Vec2, center_b: Vec2) -> Self {
        self.normal = orient_normal(self.normal, center_a, center_b);
        self
    }
}

/// Sign-correct a normal so it points away from B, toward A.
pub(crate) fn orient_normal(normal: Vec2, center_a: Vec2, center_b: Vec2) -> Vec2 {
    if (center_b - center_a).dot(normal) > 0.0 {
        -normal
    } else {
        normal
    }
}
