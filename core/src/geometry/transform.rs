//! Transformations

use super::{Float, Matrix4x4, Point3f, Ray, Vector3f, IDENTITY_MATRIX};
use std::ops::Mul;

/// An affine transformation storing both the forward and inverse matrices.
/// Halos map world space into container and density space with it.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Transform {
    /// The transformation matrix.
    pub m: Matrix4x4,

    /// The inverse transformation matrix.
    pub m_inv: Matrix4x4,
}

/// Create a transformation representing a translation.
///
/// * `delta` -  Translation.
#[rustfmt::skip]
pub fn translate(delta: &Vector3f) -> Transform {
    Transform {
        m: Matrix4x4 {
            m: [
                [1.0, 0.0, 0.0, delta.x],
                [0.0, 1.0, 0.0, delta.y],
                [0.0, 0.0, 1.0, delta.z],
                [0.0, 0.0, 0.0, 1.0],
            ],
        },
        m_inv: Matrix4x4 {
            m: [
                [1.0, 0.0, 0.0, -delta.x],
                [0.0, 1.0, 0.0, -delta.y],
                [0.0, 0.0, 1.0, -delta.z],
                [0.0, 0.0, 0.0,  1.0],
            ],
        },
    }
}

/// Create a transformation representing a scale. Zero factors are not
/// allowed since the inverse would be undefined.
///
/// * `x` -  Scaling factor in x-axis.
/// * `y` -  Scaling factor in y-axis.
/// * `z` -  Scaling factor in z-axis.
#[rustfmt::skip]
pub fn scale(x: Float, y: Float, z: Float) -> Transform {
    debug_assert!(x != 0.0 && y != 0.0 && z != 0.0);

    Transform {
        m: Matrix4x4 {
            m: [
                [x,   0.0, 0.0, 0.0],
                [0.0, y,   0.0, 0.0],
                [0.0, 0.0, z,   0.0],
                [0.0, 0.0, 0.0, 1.0],
            ],
        },
        m_inv: Matrix4x4 {
            m: [
                [1.0 / x, 0.0,     0.0,     0.0],
                [0.0,     1.0 / y, 0.0,     0.0],
                [0.0,     0.0,     1.0 / z, 0.0],
                [0.0,     0.0,     0.0,     1.0],
            ],
        },
    }
}

/// Create a transformation representing rotation about the x-axis.
///
/// * `theta` -  Angle in degrees.
pub fn rotate_x(theta: Float) -> Transform {
    rotate_axis(theta, &Vector3f::new(1.0, 0.0, 0.0))
}

/// Create a transformation representing rotation about the y-axis.
///
/// * `theta` -  Angle in degrees.
pub fn rotate_y(theta: Float) -> Transform {
    rotate_axis(theta, &Vector3f::new(0.0, 1.0, 0.0))
}

/// Create a transformation representing rotation about the z-axis.
///
/// * `theta` -  Angle in degrees.
pub fn rotate_z(theta: Float) -> Transform {
    rotate_axis(theta, &Vector3f::new(0.0, 0.0, 1.0))
}

/// Create a transformation representing rotation about an arbitrary axis.
/// The rotation matrix is orthogonal so its inverse is the transpose.
///
/// * `theta` - Angle in degrees.
/// * `axis`  - Axis of rotation.
pub fn rotate_axis(theta: Float, axis: &Vector3f) -> Transform {
    let a = axis.normalize();
    let r = theta.to_radians();
    let sin_theta = r.sin();
    let cos_theta = r.cos();
    let mut m = Matrix4x4::default();

    // Compute rotation of first basis vector
    m.m[0][0] = a.x * a.x + (1.0 - a.x * a.x) * cos_theta;
    m.m[0][1] = a.x * a.y * (1.0 - cos_theta) - a.z * sin_theta;
    m.m[0][2] = a.x * a.z * (1.0 - cos_theta) + a.y * sin_theta;

    // Compute rotations of second and third basis vectors
    m.m[1][0] = a.x * a.y * (1.0 - cos_theta) + a.z * sin_theta;
    m.m[1][1] = a.y * a.y + (1.0 - a.y * a.y) * cos_theta;
    m.m[1][2] = a.y * a.z * (1.0 - cos_theta) - a.x * sin_theta;

    m.m[2][0] = a.x * a.z * (1.0 - cos_theta) - a.y * sin_theta;
    m.m[2][1] = a.y * a.z * (1.0 - cos_theta) + a.x * sin_theta;
    m.m[2][2] = a.z * a.z + (1.0 - a.z * a.z) * cos_theta;

    Transform {
        m,
        m_inv: m.transpose(),
    }
}

impl Transform {
    /// Returns the inverse transformation.
    pub fn inverse(&self) -> Transform {
        Transform {
            m: self.m_inv,
            m_inv: self.m,
        }
    }

    /// Returns true if matrix is identity matrix
    pub fn is_identity(&self) -> bool {
        self.m == IDENTITY_MATRIX
    }

    /// Applies transformation to a given point.
    ///
    /// * `p` - The point.
    pub fn transform_point(&self, p: &Point3f) -> Point3f {
        apply_to_point(&self.m, p)
    }

    /// Applies the inverse transformation to a given point.
    ///
    /// * `p` - The point.
    pub fn inverse_transform_point(&self, p: &Point3f) -> Point3f {
        apply_to_point(&self.m_inv, p)
    }

    /// Applies transformation to a given vector.
    ///
    /// * `v` - The vector.
    pub fn transform_vector(&self, v: &Vector3f) -> Vector3f {
        apply_to_vector(&self.m, v)
    }

    /// Applies the inverse transformation to a given vector.
    ///
    /// * `v` - The vector.
    pub fn inverse_transform_vector(&self, v: &Vector3f) -> Vector3f {
        apply_to_vector(&self.m_inv, v)
    }

    /// Applies the inverse transformation to a ray. The ray parameter is
    /// preserved so distances found in the target space apply to the
    /// original ray.
    ///
    /// * `r` - The ray.
    pub fn inverse_transform_ray(&self, r: &Ray) -> Ray {
        Ray::new(
            self.inverse_transform_point(&r.o),
            self.inverse_transform_vector(&r.d),
            r.t_max,
        )
    }
}

fn apply_to_point(m: &Matrix4x4, p: &Point3f) -> Point3f {
    let xp = m[0][0] * p.x + m[0][1] * p.y + m[0][2] * p.z + m[0][3];
    let yp = m[1][0] * p.x + m[1][1] * p.y + m[1][2] * p.z + m[1][3];
    let zp = m[2][0] * p.x + m[2][1] * p.y + m[2][2] * p.z + m[2][3];
    let wp = m[3][0] * p.x + m[3][1] * p.y + m[3][2] * p.z + m[3][3];

    debug_assert!(wp != 0.0, "Transformation<Point3f>: wp is zero");

    if wp == 1.0 {
        Point3f::new(xp, yp, zp)
    } else {
        Point3f::new(xp / wp, yp / wp, zp / wp)
    }
}

fn apply_to_vector(m: &Matrix4x4, v: &Vector3f) -> Vector3f {
    Vector3f::new(
        m[0][0] * v.x + m[0][1] * v.y + m[0][2] * v.z,
        m[1][0] * v.x + m[1][1] * v.y + m[1][2] * v.z,
        m[2][0] * v.x + m[2][1] * v.y + m[2][2] * v.z,
    )
}

impl Mul<Transform> for Transform {
    type Output = Self;

    /// Composes this transformation with another one. The resulting transform
    /// is the same as applying `rhs` then `self`.
    ///
    /// * `rhs` - The transformation to compose.
    fn mul(self, rhs: Self) -> Self {
        Transform {
            m: self.m * rhs.m,
            m_inv: rhs.m_inv * self.m_inv,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use float_cmp::*;

    fn approx_point(a: Point3f, b: Point3f) -> bool {
        approx_eq!(Float, a.x, b.x, epsilon = 1e-5)
            && approx_eq!(Float, a.y, b.y, epsilon = 1e-5)
            && approx_eq!(Float, a.z, b.z, epsilon = 1e-5)
    }

    #[test]
    fn translate_point_and_back() {
        let t = translate(&Vector3f::new(1.0, -2.0, 3.0));
        let p = Point3f::new(1.0, 1.0, 1.0);
        let q = t.transform_point(&p);
        assert_eq!(q, Point3f::new(2.0, -1.0, 4.0));
        assert_eq!(t.inverse_transform_point(&q), p);
    }

    #[test]
    fn translation_ignores_vectors() {
        let t = translate(&Vector3f::new(5.0, 5.0, 5.0));
        let v = Vector3f::new(0.0, 1.0, 0.0);
        assert_eq!(t.transform_vector(&v), v);
    }

    #[test]
    fn rotate_z_quarter_turn() {
        let t = rotate_z(90.0);
        let p = t.transform_point(&Point3f::new(1.0, 0.0, 0.0));
        assert!(approx_point(p, Point3f::new(0.0, 1.0, 0.0)));
    }

    #[test]
    fn composition_inverse_round_trip() {
        let t = translate(&Vector3f::new(0.0, 3.0, 0.0))
            * rotate_y(30.0)
            * scale(2.0, 0.5, 4.0);
        let p = Point3f::new(0.25, -1.5, 2.0);
        let q = t.transform_point(&p);
        assert!(approx_point(t.inverse_transform_point(&q), p));
        assert!(approx_point(t.inverse().transform_point(&q), p));
    }

    #[test]
    fn compose_applies_right_first() {
        let t = translate(&Vector3f::new(1.0, 0.0, 0.0)) * scale(2.0, 2.0, 2.0);
        let p = t.transform_point(&Point3f::new(1.0, 0.0, 0.0));
        assert_eq!(p, Point3f::new(3.0, 0.0, 0.0));
    }

    #[test]
    fn identity() {
        assert!(Transform::default().is_identity());
        assert!(!rotate_x(10.0).is_identity());
    }
}
