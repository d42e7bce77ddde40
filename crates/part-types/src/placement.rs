use nalgebra::{Isometry3, Point3, Translation3, Unit, UnitQuaternion, Vector3};

/// A rigid placement (rotation followed by translation) in model space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    iso: Isometry3<f64>,
}

impl Default for Placement {
    fn default() -> Self {
        Self::identity()
    }
}

impl Placement {
    pub fn identity() -> Self {
        Self {
            iso: Isometry3::identity(),
        }
    }

    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        Self {
            iso: Isometry3::translation(dx, dy, dz),
        }
    }

    /// Rotation about `axis` through the origin by `angle` radians.
    pub fn rotation(axis: [f64; 3], angle: f64) -> Self {
        let axis = Unit::new_normalize(Vector3::from(axis));
        Self {
            iso: Isometry3::from_parts(
                Translation3::identity(),
                UnitQuaternion::from_axis_angle(&axis, angle),
            ),
        }
    }

    /// `self` followed by `next`.
    pub fn then(&self, next: &Placement) -> Placement {
        Placement {
            iso: next.iso * self.iso,
        }
    }

    /// Where the origin ends up.
    pub fn position(&self) -> [f64; 3] {
        let v = self.iso.translation.vector;
        [v.x, v.y, v.z]
    }

    pub fn transform_point(&self, p: [f64; 3]) -> [f64; 3] {
        let q = self.iso.transform_point(&Point3::new(p[0], p[1], p[2]));
        [q.x, q.y, q.z]
    }
}
