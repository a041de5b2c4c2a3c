//! Wave field: surface position and time to elevation.
//!
//! Two superposed bands:
//! - big waves: one directional sinusoid (slow swell)
//! - small waves: a ridged fractal sum of gradient noise (chop), each octave
//!   at twice the frequency and half the weight of the previous one
//!
//! Pure and allocation-free; safe to evaluate concurrently for every vertex.

use glam::Vec3;

use super::noise::cnoise;
use crate::params::OceanParams;

/// Large-scale band: `sin(x·fx + z·fz + t·speed) · elevation`
#[inline]
pub fn big_wave(x: f32, z: f32, t: f32, params: &OceanParams) -> f32 {
    let [fx, fz] = params.big_wave_frequency;
    let phase = x * fx + z * fz + t * params.big_wave_speed;
    phase.sin() * params.big_wave_elevation
}

/// Small-scale band: sum over octaves of `-|noise| / 2^i`, scaled by elevation.
///
/// Octave `i` samples noise at `2^i` times the base frequency, shifted by `i`
/// along X so consecutive octaves do not line up.
#[inline]
pub fn small_wave(x: f32, z: f32, t: f32, params: &OceanParams) -> f32 {
    let frequency = params.small_wave_frequency;
    let time = t * params.small_wave_speed;

    let mut sum = 0.0;
    let mut scale = 1.0;
    for i in 0..params.small_wave_iterations {
        let p = Vec3::new(
            x * frequency * scale + i as f32,
            z * frequency * scale,
            time,
        );
        sum -= cnoise(p).abs() / scale;
        scale *= 2.0;
    }
    sum * params.small_wave_elevation
}

/// Total surface elevation at `(x, z)` and time `t` (seconds)
#[inline]
pub fn elevation(x: f32, z: f32, t: f32, params: &OceanParams) -> f32 {
    big_wave(x, z, t, params) + small_wave(x, z, t, params)
}
