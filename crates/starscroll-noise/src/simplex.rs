//! CPU simplex noise (Ashima Arts / Ian McEwan formulation).
//!
//! Uses the mod-289 permutation polynomial instead of a lookup table, so the
//! WGSL twin in `noise.wgsl` produces the same field without texture inputs.

use glam::{Vec3, Vec3Swizzles, Vec4, Vec4Swizzles};

const C_X: f32 = 1.0 / 6.0;
const C_Y: f32 = 1.0 / 3.0;
/// 1/7, the gradient lattice step.
const N_: f32 = 0.142_857_142_857;

fn mod289_3(x: Vec3) -> Vec3 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn mod289_4(x: Vec4) -> Vec4 {
    x - (x * (1.0 / 289.0)).floor() * 289.0
}

fn permute(x: Vec4) -> Vec4 {
    mod289_4((x * 34.0 + Vec4::ONE) * x)
}

fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    Vec4::splat(1.792_842_9) - r * 0.853_734_7
}

/// GLSL `step(edge, x)`: 0 where `x < edge`, else 1.
fn step3(edge: Vec3, x: Vec3) -> Vec3 {
    Vec3::select(x.cmplt(edge), Vec3::ZERO, Vec3::ONE)
}

fn step4(edge: Vec4, x: Vec4) -> Vec4 {
    Vec4::select(x.cmplt(edge), Vec4::ZERO, Vec4::ONE)
}

/// Evaluate simplex noise at `v`.
///
/// Output lies in roughly `[-1, 1]`, is continuous everywhere and is a pure
/// function of the input. Defined for all finite inputs.
pub fn simplex3(v: Vec3) -> f32 {
    // Skew into simplex space and find the containing cell.
    let i = (v + Vec3::splat(v.dot(Vec3::splat(C_Y)))).floor();
    let x0 = v - i + Vec3::splat(i.dot(Vec3::splat(C_X)));

    // Rank the offsets to pick the simplex corners.
    let g = step3(x0.yzx(), x0);
    let l = Vec3::ONE - g;
    let i1 = g.min(l.zxy());
    let i2 = g.max(l.zxy());

    let x1 = x0 - i1 + Vec3::splat(C_X);
    let x2 = x0 - i2 + Vec3::splat(C_Y);
    let x3 = x0 - Vec3::splat(0.5);

    let i = mod289_3(i);
    let p = permute(
        permute(
            permute(Vec4::splat(i.z) + Vec4::new(0.0, i1.z, i2.z, 1.0))
                + Vec4::splat(i.y)
                + Vec4::new(0.0, i1.y, i2.y, 1.0),
        ) + Vec4::splat(i.x)
            + Vec4::new(0.0, i1.x, i2.x, 1.0),
    );

    // Gradients on a 7x7 grid mapped onto an octahedron.
    let ns = Vec3::new(2.0 * N_, 0.5 * N_ - 1.0, N_);
    let j = p - 49.0 * (p * ns.z * ns.z).floor();

    let x_ = (j * ns.z).floor();
    let y_ = (j - 7.0 * x_).floor();

    let x = x_ * ns.x + Vec4::splat(ns.y);
    let y = y_ * ns.x + Vec4::splat(ns.y);
    let h = Vec4::ONE - x.abs() - y.abs();

    let b0 = Vec4::new(x.x, x.y, y.x, y.y);
    let b1 = Vec4::new(x.z, x.w, y.z, y.w);

    let s0 = b0.floor() * 2.0 + Vec4::ONE;
    let s1 = b1.floor() * 2.0 + Vec4::ONE;
    let sh = -step4(h, Vec4::ZERO);

    let a0 = b0.xzyw() + s0.xzyw() * sh.xxyy();
    let a1 = b1.xzyw() + s1.xzyw() * sh.zzww();

    let p0 = Vec3::new(a0.x, a0.y, h.x);
    let p1 = Vec3::new(a0.z, a0.w, h.y);
    let p2 = Vec3::new(a1.x, a1.y, h.z);
    let p3 = Vec3::new(a1.z, a1.w, h.w);

    let norm = taylor_inv_sqrt(Vec4::new(p0.dot(p0), p1.dot(p1), p2.dot(p2), p3.dot(p3)));
    let p0 = p0 * norm.x;
    let p1 = p1 * norm.y;
    let p2 = p2 * norm.z;
    let p3 = p3 * norm.w;

    // Radial falloff per corner.
    let m = (Vec4::splat(0.6) - Vec4::new(x0.dot(x0), x1.dot(x1), x2.dot(x2), x3.dot(x3)))
        .max(Vec4::ZERO);
    let m = m * m;

    42.0 * (m * m).dot(Vec4::new(p0.dot(x0), p1.dot(x1), p2.dot(x2), p3.dot(x3)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn random_point(rng: &mut ChaCha8Rng, extent: f32) -> Vec3 {
        Vec3::new(
            (rng.random::<f32>() * 2.0 - 1.0) * extent,
            (rng.random::<f32>() * 2.0 - 1.0) * extent,
            (rng.random::<f32>() * 2.0 - 1.0) * extent,
        )
    }

    #[test]
    fn test_deterministic() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        for _ in 0..1000 {
            let p = random_point(&mut rng, 50.0);
            assert_eq!(simplex3(p).to_bits(), simplex3(p).to_bits(), "at {p:?}");
        }
    }

    #[test]
    fn test_output_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for _ in 0..200_000 {
            let n = simplex3(random_point(&mut rng, 100.0));
            assert!(n.is_finite());
            min = min.min(n);
            max = max.max(n);
        }
        assert!(min >= -1.05, "min {min} below -1.05");
        assert!(max <= 1.05, "max {max} above 1.05");
        // Should actually use most of the range
        assert!(min < -0.5 && max > 0.5, "range too narrow: [{min}, {max}]");
    }

    #[test]
    fn test_continuous_across_integer_boundaries() {
        let eps = 1e-3;
        for ix in -3..=3 {
            for iy in -3..=3 {
                let base = Vec3::new(ix as f32, iy as f32, 0.37);
                for axis in [Vec3::X, Vec3::Y, Vec3::Z] {
                    let a = simplex3(base - axis * eps);
                    let b = simplex3(base + axis * eps);
                    assert!(
                        (a - b).abs() < 0.05,
                        "jump of {} across {base:?} along {axis:?}",
                        (a - b).abs()
                    );
                }
            }
        }
    }

    #[test]
    fn test_varies_over_space() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        let samples: Vec<f32> = (0..4000)
            .map(|_| simplex3(random_point(&mut rng, 20.0)))
            .collect();
        let mean = samples.iter().sum::<f32>() / samples.len() as f32;
        let variance =
            samples.iter().map(|s| (s - mean) * (s - mean)).sum::<f32>() / samples.len() as f32;
        assert!(variance.sqrt() > 0.1, "std dev {} too small", variance.sqrt());
        assert!(samples.iter().any(|&s| s > 0.0));
        assert!(samples.iter().any(|&s| s < 0.0));
    }

    #[test]
    fn test_time_axis_changes_value() {
        // Shaders animate by sliding the third coordinate.
        let p = Vec3::new(1.3, 2.7, 0.0);
        let moved = simplex3(p + Vec3::Z * 0.5);
        assert_ne!(simplex3(p), moved);
    }
}
