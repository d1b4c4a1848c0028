//! Gradient Noise

use crate::geometry::*;
use crate::math::*;

/// Number of elements in one dimension of noise permuation table.
const NOISE_PERM_SIZE: usize = 256;

/// Precomputed noise permutation table.
const NOISE_PERM: [usize; 2 * NOISE_PERM_SIZE] = [
    151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30, 69,
    142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94, 252, 219,
    203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171, 168, 68, 175,
    74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60, 211, 133, 230,
    220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1, 216, 80, 73, 209, 76,
    132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86, 164, 100, 109, 198, 173,
    186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118, 126, 255, 82, 85, 212, 207, 206,
    59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170, 213, 119, 248, 152, 2, 44, 154, 163,
    70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253, 19, 98, 108, 110, 79, 113, 224, 232,
    178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193, 238, 210, 144, 12, 191, 179, 162,
    241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31, 181, 199, 106, 157, 184, 84, 204,
    176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141,
    128, 195, 78, 66, 215, 61, 156, 180, 151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194,
    233, 7, 225, 140, 36, 103, 30, 69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234,
    75, 0, 26, 197, 62, 94, 252, 219, 203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174,
    20, 125, 136, 171, 168, 68, 175, 74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83,
    111, 229, 122, 60, 211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25,
    63, 161, 1, 216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188,
    159, 86, 164, 100, 109, 198, 173, 186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147,
    118, 126, 255, 82, 85, 212, 207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170,
    213, 119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39, 253,
    19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104, 218, 246, 97, 228, 251, 34, 242, 193,
    238, 210, 144, 12, 191, 179, 162, 241, 81, 51, 145, 235, 249, 14, 239, 107, 49, 192, 214, 31,
    181, 199, 106, 157, 184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254, 138, 236, 205, 93,
    222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
];

/// Offsets used to decorrelate the three components of `vector_noise()`.
const VECTOR_NOISE_OFFSETS: [Vector3f; 3] = [
    Vector3f {
        x: 0.0,
        y: 0.0,
        z: 0.0,
    },
    Vector3f {
        x: 31.416,
        y: -47.853,
        z: 12.793,
    },
    Vector3f {
        x: -233.145,
        y: -113.408,
        z: -185.31,
    },
];

/// Evaluates gradient noise for a point. The result lies roughly in [-1, 1]
/// and is zero at integer lattice points.
///
/// * `p` - The point.
pub fn noise(p: &Point3f) -> Float {
    // Compute noise cell coordinates and offsets.
    let (fx, fy, fz) = (p.x.floor(), p.y.floor(), p.z.floor());
    let ix = (fx as i64 & (NOISE_PERM_SIZE as i64 - 1)) as usize;
    let iy = (fy as i64 & (NOISE_PERM_SIZE as i64 - 1)) as usize;
    let iz = (fz as i64 & (NOISE_PERM_SIZE as i64 - 1)) as usize;
    let dx = p.x - fx;
    let dy = p.y - fy;
    let dz = p.z - fz;

    // Compute gradient weights
    let w000 = grad(ix, iy, iz, dx, dy, dz);
    let w100 = grad(ix + 1, iy, iz, dx - 1.0, dy, dz);
    let w010 = grad(ix, iy + 1, iz, dx, dy - 1.0, dz);
    let w110 = grad(ix + 1, iy + 1, iz, dx - 1.0, dy - 1.0, dz);
    let w001 = grad(ix, iy, iz + 1, dx, dy, dz - 1.0);
    let w101 = grad(ix + 1, iy, iz + 1, dx - 1.0, dy, dz - 1.0);
    let w011 = grad(ix, iy + 1, iz + 1, dx, dy - 1.0, dz - 1.0);
    let w111 = grad(ix + 1, iy + 1, iz + 1, dx - 1.0, dy - 1.0, dz - 1.0);

    // Compute trilinear interpolation of weights.
    let wx = noise_weight(dx);
    let wy = noise_weight(dy);
    let wz = noise_weight(dz);
    let x00 = lerp(wx, w000, w100);
    let x10 = lerp(wx, w010, w110);
    let x01 = lerp(wx, w001, w101);
    let x11 = lerp(wx, w011, w111);
    let y0 = lerp(wy, x00, x10);
    let y1 = lerp(wy, x01, x11);
    lerp(wz, y0, y1)
}

/// Evaluates three decorrelated noise values at a point and returns them as
/// a vector.
///
/// * `p` - The point.
pub fn vector_noise(p: &Point3f) -> Vector3f {
    Vector3f::new(
        noise(&(*p + VECTOR_NOISE_OFFSETS[0])),
        noise(&(*p + VECTOR_NOISE_OFFSETS[1])),
        noise(&(*p + VECTOR_NOISE_OFFSETS[2])),
    )
}

/// Returns the weight value for a corner cell that the point (x, y, z) lies in.
///
/// * `x`  - The corner cell's x-coordinate.
/// * `y`  - The corner cell's y-coordinate.
/// * `z`  - The corner cell's z-coordinate.
/// * `dx` - Point's x-coordinate offset.
/// * `dy` - Point's y-coordinate offset.
/// * `dz` - Point's z-coordinate offset.
fn grad(x: usize, y: usize, z: usize, dx: Float, dy: Float, dz: Float) -> Float {
    let h = NOISE_PERM[NOISE_PERM[NOISE_PERM[x] + y] + z] & 15;
    let u = if h < 8 || h == 12 || h == 13 { dx } else { dy };
    let v = if h < 4 || h == 12 || h == 13 { dy } else { dz };

    let a = if h & 1 > 0 { -u } else { u };
    let b = if h & 2 > 0 { -v } else { v };
    a + b
}

/// Smoothing function for point's offset values in `noise()`.
///
/// * `t` - The offset values `dx`, `dy`, `dz`.
fn noise_weight(t: Float) -> Float {
    let t3 = t * t * t;
    let t4 = t3 * t;
    6.0 * t4 * t - 15.0 * t4 + 10.0 * t3
}
