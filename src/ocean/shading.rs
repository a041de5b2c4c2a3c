//! Shading model: elevation to color via a clamped two-color gradient.

use crate::params::{OceanParams, Rgb};

/// Interpolation weight between depth (0) and surface (1) colors.
///
/// Always in [0, 1]: elevations outside the gradient band saturate to one of
/// the base colors. A NaN product (e.g. `0 * inf`) maps to the depth color.
#[inline]
pub fn mix_factor(elevation: f32, params: &OceanParams) -> f32 {
    // `f32::max` returns the non-NaN operand, `clamp` would propagate NaN
    ((elevation + params.color_offset) * params.color_multiplier)
        .max(0.0)
        .min(1.0)
}

/// Final surface color for a point at `elevation`
#[inline]
pub fn color(elevation: f32, params: &OceanParams) -> Rgb {
    params
        .depth_color
        .lerp(params.surface_color, mix_factor(elevation, params))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn within(c: f32, a: f32, b: f32) -> bool {
        c >= a.min(b) - 1e-6 && c <= a.max(b) + 1e-6
    }

    #[test]
    fn test_half_blend_of_default_colors() {
        let params = OceanParams::default();
        // (0 + 0.1) * 5.0 = 0.5
        assert_eq!(mix_factor(0.0, &params), 0.5);

        let depth = Rgb::from_hex("#981ffc").unwrap();
        let surface = Rgb::from_hex("#f0d720").unwrap();
        let c = color(0.0, &params);
        assert_eq!(c.r, depth.r * 0.5 + surface.r * 0.5);
        assert_eq!(c.g, depth.g * 0.5 + surface.g * 0.5);
        assert_eq!(c.b, depth.b * 0.5 + surface.b * 0.5);
        // (0x98 + 0xf0) / 2 = 0xc4, (0x1f + 0xd7) / 2 = 0x7b, (0xfc + 0x20) / 2 = 0x8e
        assert_eq!(c.to_string(), "#c47b8e");
    }

    #[test]
    fn test_negated_offset_yields_depth_color() {
        let params = OceanParams::default();
        assert_eq!(mix_factor(-params.color_offset, &params), 0.0);
        assert_eq!(color(-params.color_offset, &params), params.depth_color);
    }

    #[test]
    fn test_extreme_elevations_saturate() {
        let params = OceanParams::default();
        assert_eq!(color(1.0e6, &params), params.surface_color);
        assert_eq!(color(-1.0e6, &params), params.depth_color);
        assert_eq!(color(f32::INFINITY, &params), params.surface_color);
        assert_eq!(color(f32::NEG_INFINITY, &params), params.depth_color);
    }

    #[test]
    fn test_color_stays_within_base_colors() {
        let params = OceanParams::default();
        let (a, b) = (params.depth_color, params.surface_color);
        for i in 0..=400 {
            let e = i as f32 * 0.01 - 2.0;
            let c = color(e, &params);
            assert!(within(c.r, a.r, b.r), "r out of hull at {}", e);
            assert!(within(c.g, a.g, b.g), "g out of hull at {}", e);
            assert!(within(c.b, a.b, b.b), "b out of hull at {}", e);
        }
    }

    #[test]
    fn test_multiplier_sharpens_transition() {
        let mut params = OceanParams::default();
        // Positive side (elevation + offset = 0.05) climbs toward 1
        let mut last = 0.0;
        for m in [0.5, 1.0, 2.0, 5.0, 10.0, 20.0, 40.0] {
            params.color_multiplier = m;
            let f = mix_factor(-0.05, &params);
            assert!(f >= last, "mix factor fell from {} to {} at m={}", last, f, m);
            last = f;
        }
        assert_eq!(last, 1.0);

        // Negative side saturates at 0 for every multiplier
        for m in [0.5, 1.0, 5.0, 40.0] {
            params.color_multiplier = m;
            assert_eq!(mix_factor(-0.3, &params), 0.0);
        }
    }

    #[test]
    fn test_zero_multiplier_is_depth_color() {
        let params = OceanParams {
            color_multiplier: 0.0,
            ..OceanParams::default()
        };
        assert_eq!(color(0.7, &params), params.depth_color);
    }

    #[test]
    fn test_hull_holds_for_any_parameters() {
        let base = OceanParams::default();
        let (a, b) = (base.depth_color, base.surface_color);
        let elevations = [
            -2.0,
            -0.1,
            0.0,
            0.05,
            1.0,
            f32::INFINITY,
            f32::NEG_INFINITY,
            f32::NAN,
        ];

        for offset in [0.0, 0.1, 2.0, -1.0] {
            for multiplier in [0.0, 0.01, 5.0, 1.0e30, f32::INFINITY] {
                let params = OceanParams {
                    color_offset: offset,
                    color_multiplier: multiplier,
                    ..base
                };
                for e in elevations {
                    let f = mix_factor(e, &params);
                    assert!(
                        (0.0..=1.0).contains(&f),
                        "f={} for e={} offset={} multiplier={}",
                        f,
                        e,
                        offset,
                        multiplier
                    );
                    let c = color(e, &params);
                    assert!(within(c.r, a.r, b.r) && within(c.g, a.g, b.g) && within(c.b, a.b, b.b));
                }
            }
        }
    }

    #[test]
    fn test_undefined_product_is_depth_color() {
        // inf * 0
        let flat = OceanParams {
            color_multiplier: 0.0,
            ..OceanParams::default()
        };
        assert_eq!(mix_factor(f32::INFINITY, &flat), 0.0);

        // 0 * inf
        let sharp = OceanParams {
            color_multiplier: f32::INFINITY,
            ..OceanParams::default()
        };
        assert_eq!(mix_factor(-sharp.color_offset, &sharp), 0.0);

        assert_eq!(color(f32::NAN, &OceanParams::default()), OceanParams::default().depth_color);
    }
}
