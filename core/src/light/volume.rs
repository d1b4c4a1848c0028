//! Light Volumes

use crate::math::*;

/// An interval of the ray parameter; either bound may be infinite.
type Span = (Float, Float);

/// Intersects a ray with the volume a light can illuminate and returns the
/// nearest sub-interval of `[0, depth]` that lies inside it.
///
/// The volume is described along the ray parameter `t` by a quadric
/// `f(t) = a·t² + b·t + c` that is non-negative inside, and a half-space
/// `h(t) = h0 + t·hd` that is non-negative in front of the light. A cone's
/// quadric describes both nappes so the half-space keeps only the one the
/// light shines into; for a cylinder it is the cap through the light.
///
/// * `a`     - Coefficient of t² in the quadric.
/// * `b`     - Coefficient of t in the quadric.
/// * `c`     - Constant term of the quadric (its value at the ray origin).
/// * `h0`    - Axial distance of the ray origin in front of the light.
/// * `hd`    - Rate of change of the axial distance along the ray.
/// * `depth` - Distance to the intersection ending the ray.
pub fn clip_to_light_volume(
    a: Float,
    b: Float,
    c: Float,
    h0: Float,
    hd: Float,
    depth: Float,
) -> Option<(Float, Float)> {
    let front = match half_line(h0, hd) {
        Some(span) => span,
        None => return None,
    };

    quadric_spans(a, b, c)
        .into_iter()
        .flatten()
        .filter_map(|span| {
            let t1 = max(max(span.0, front.0), 0.0);
            let t2 = min(min(span.1, front.1), depth);
            if t1 < t2 {
                Some((t1, t2))
            } else {
                None
            }
        })
        .next()
}

/// Returns the spans where `a·t² + b·t + c >= 0` in increasing order. There
/// are at most two; unused slots are `None`.
fn quadric_spans(a: Float, b: Float, c: Float) -> [Option<Span>; 2] {
    if abs(a) < EPSILON {
        // Ray runs parallel to the surface; the quadric degenerates to a line.
        return [half_line(c, b), None];
    }

    match Quadratic::solve(a, b, c) {
        Some((r1, r2)) if a > 0.0 => [Some((-INFINITY, r1)), Some((r2, INFINITY))],
        Some((r1, r2)) => [Some((r1, r2)), None],
        None if a > 0.0 => [Some((-INFINITY, INFINITY)), None],
        None => [None, None],
    }
}

/// Returns the span where `h0 + t·hd >= 0`.
fn half_line(h0: Float, hd: Float) -> Option<Span> {
    if abs(hd) < EPSILON {
        if h0 >= 0.0 {
            Some((-INFINITY, INFINITY))
        } else {
            None
        }
    } else {
        let r = -h0 / hd;
        if hd > 0.0 {
            Some((r, INFINITY))
        } else {
            Some((-INFINITY, r))
        }
    }
}
