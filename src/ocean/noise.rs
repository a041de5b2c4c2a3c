//! Classic 3D gradient noise (Stefan Gustavson's permutation-polynomial form).
//!
//! Ported operation for operation from the GLSL formulation, in `f32`.
//! Periodic with period 289 on every axis; exactly zero on integer lattice
//! points.

use glam::{Vec2, Vec3, Vec4};

/// GLSL `mod`: `x - y * floor(x / y)`
#[inline]
fn mod289_3(x: Vec3) -> Vec3 {
    x - 289.0 * (x / 289.0).floor()
}

#[inline]
fn mod289_4(x: Vec4) -> Vec4 {
    x - 289.0 * (x / 289.0).floor()
}

/// GLSL `fract`: `x - floor(x)`
#[inline]
fn fract3(x: Vec3) -> Vec3 {
    x - x.floor()
}

#[inline]
fn fract4(x: Vec4) -> Vec4 {
    x - x.floor()
}

#[inline]
fn permute(x: Vec4) -> Vec4 {
    mod289_4((x * 34.0 + 1.0) * x)
}

#[inline]
fn taylor_inv_sqrt(r: Vec4) -> Vec4 {
    1.792_842_9 - 0.853_734_7 * r
}

#[inline]
fn fade(t: Vec3) -> Vec3 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

/// GLSL `step(edge, x)` with `x = 0`: 1 where `edge <= 0`
#[inline]
fn step_nonpositive(edge: Vec4) -> Vec4 {
    let s = |e: f32| if 0.0 < e { 0.0 } else { 1.0 };
    Vec4::new(s(edge.x), s(edge.y), s(edge.z), s(edge.w))
}

/// GLSL `step(0.0, x)`: 1 where `x >= 0`
#[inline]
fn step_nonnegative(x: Vec4) -> Vec4 {
    let s = |v: f32| if v < 0.0 { 0.0 } else { 1.0 };
    Vec4::new(s(x.x), s(x.y), s(x.z), s(x.w))
}

#[inline]
fn mix4(a: Vec4, b: Vec4, t: f32) -> Vec4 {
    a * (1.0 - t) + b * t
}

#[inline]
fn mix2(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a * (1.0 - t) + b * t
}

#[inline]
fn mix1(a: f32, b: f32, t: f32) -> f32 {
    a * (1.0 - t) + b * t
}

/// Gradients for one z-slice of the lattice cell: (gx, gy, gz), four corners each
#[inline]
fn gradients(ixy: Vec4) -> (Vec4, Vec4, Vec4) {
    let gx = ixy / 7.0;
    let gy = fract4(gx.floor() / 7.0) - 0.5;
    let gx = fract4(gx);
    let gz = 0.5 - gx.abs() - gy.abs();
    let sz = step_nonpositive(gz);
    let gx = gx - sz * (step_nonnegative(gx) - 0.5);
    let gy = gy - sz * (step_nonnegative(gy) - 0.5);
    (gx, gy, gz)
}

/// Classic gradient noise at `p`, roughly in [-1, 1]
pub fn cnoise(p: Vec3) -> f32 {
    let pi0 = mod289_3(p.floor());
    let pi1 = mod289_3(p.floor() + 1.0);
    let pf0 = fract3(p);
    let pf1 = pf0 - 1.0;

    let ix = Vec4::new(pi0.x, pi1.x, pi0.x, pi1.x);
    let iy = Vec4::new(pi0.y, pi0.y, pi1.y, pi1.y);
    let iz0 = Vec4::splat(pi0.z);
    let iz1 = Vec4::splat(pi1.z);

    let ixy = permute(permute(ix) + iy);
    let ixy0 = permute(ixy + iz0);
    let ixy1 = permute(ixy + iz1);

    let (gx0, gy0, gz0) = gradients(ixy0);
    let (gx1, gy1, gz1) = gradients(ixy1);

    let mut g000 = Vec3::new(gx0.x, gy0.x, gz0.x);
    let mut g100 = Vec3::new(gx0.y, gy0.y, gz0.y);
    let mut g010 = Vec3::new(gx0.z, gy0.z, gz0.z);
    let mut g110 = Vec3::new(gx0.w, gy0.w, gz0.w);
    let mut g001 = Vec3::new(gx1.x, gy1.x, gz1.x);
    let mut g101 = Vec3::new(gx1.y, gy1.y, gz1.y);
    let mut g011 = Vec3::new(gx1.z, gy1.z, gz1.z);
    let mut g111 = Vec3::new(gx1.w, gy1.w, gz1.w);

    let norm0 = taylor_inv_sqrt(Vec4::new(
        g000.dot(g000),
        g010.dot(g010),
        g100.dot(g100),
        g110.dot(g110),
    ));
    g000 *= norm0.x;
    g010 *= norm0.y;
    g100 *= norm0.z;
    g110 *= norm0.w;

    let norm1 = taylor_inv_sqrt(Vec4::new(
        g001.dot(g001),
        g011.dot(g011),
        g101.dot(g101),
        g111.dot(g111),
    ));
    g001 *= norm1.x;
    g011 *= norm1.y;
    g101 *= norm1.z;
    g111 *= norm1.w;

    let n000 = g000.dot(pf0);
    let n100 = g100.dot(Vec3::new(pf1.x, pf0.y, pf0.z));
    let n010 = g010.dot(Vec3::new(pf0.x, pf1.y, pf0.z));
    let n110 = g110.dot(Vec3::new(pf1.x, pf1.y, pf0.z));
    let n001 = g001.dot(Vec3::new(pf0.x, pf0.y, pf1.z));
    let n101 = g101.dot(Vec3::new(pf1.x, pf0.y, pf1.z));
    let n011 = g011.dot(Vec3::new(pf0.x, pf1.y, pf1.z));
    let n111 = g111.dot(pf1);

    let fade_xyz = fade(pf0);
    let n_z = mix4(
        Vec4::new(n000, n100, n010, n110),
        Vec4::new(n001, n101, n011, n111),
        fade_xyz.z,
    );
    let n_yz = mix2(Vec2::new(n_z.x, n_z.y), Vec2::new(n_z.z, n_z.w), fade_xyz.y);
    let n_xyz = mix1(n_yz.x, n_yz.y, fade_xyz.x);

    2.2 * n_xyz
}
