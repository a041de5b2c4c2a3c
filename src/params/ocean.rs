//! Wave and color parameters read by the surface evaluators.

use super::Rgb;

/// Snapshot of every value the wave field and shading model read.
///
/// Plain `Copy` data: one snapshot is taken per frame and shared by all
/// per-vertex and per-pixel evaluations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OceanParams {
    /// Seconds since the animation started (monotonically non-decreasing)
    pub elapsed_time: f32,

    // === Big waves (directional swell) ===
    /// Swell amplitude (surface units)
    pub big_wave_elevation: f32,

    /// Spatial frequency along X and Z (radians per surface unit)
    pub big_wave_frequency: [f32; 2],

    /// Swell phase rate (radians per second, either sign)
    pub big_wave_speed: f32,

    // === Small waves (fractal noise chop) ===
    /// Chop amplitude (surface units)
    pub small_wave_elevation: f32,

    /// Base spatial frequency of the first octave
    pub small_wave_frequency: f32,

    /// Noise time rate
    pub small_wave_speed: f32,

    /// Number of noise octaves summed
    pub small_wave_iterations: u32,

    // === Coloring ===
    /// Color of the troughs (mix factor 0)
    pub depth_color: Rgb,

    /// Color of the crests (mix factor 1)
    pub surface_color: Rgb,

    /// Shifts which elevation lands on the gradient midpoint
    pub color_offset: f32,

    /// Gradient steepness
    pub color_multiplier: f32,
}

/// Default depth color, as hex
pub const DEFAULT_DEPTH_COLOR: &str = "#981ffc";

/// Default surface color, as hex
pub const DEFAULT_SURFACE_COLOR: &str = "#f0d720";

impl Default for OceanParams {
    fn default() -> Self {
        Self {
            elapsed_time: 0.0,

            big_wave_elevation: 0.1,
            big_wave_frequency: [4.0, 1.5],
            big_wave_speed: 0.75,

            small_wave_elevation: 0.15,
            small_wave_frequency: 3.0,
            small_wave_speed: 0.2,
            small_wave_iterations: 4,

            depth_color: Rgb::from_u8(0x98, 0x1f, 0xfc),
            surface_color: Rgb::from_u8(0xf0, 0xd7, 0x20),
            color_offset: 0.1,
            color_multiplier: 5.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_colors_match_hex_constants() {
        let params = OceanParams::default();
        assert_eq!(params.depth_color.to_string(), DEFAULT_DEPTH_COLOR);
        assert_eq!(params.surface_color.to_string(), DEFAULT_SURFACE_COLOR);
    }
}
