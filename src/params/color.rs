//! RGB colors as edited in the control panel (`#rrggbb`) and mixed by the shading model.

use std::fmt;

use super::ParamError;

/// RGB color with channels in [0, 1], sRGB-encoded (as picked in the panel)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Build from 8-bit channels
    pub fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parse `#rrggbb` (the leading `#` is optional)
    pub fn from_hex(hex: &str) -> Result<Self, ParamError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ParamError::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| ParamError::InvalidColor(hex.to_string()))
        };

        Ok(Self::from_u8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Quantize to 8-bit channels (rounded, saturating)
    pub fn to_u8(self) -> [u8; 3] {
        let q = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        [q(self.r), q(self.g), q(self.b)]
    }

    /// Per-channel linear interpolation: `self` at `t = 0`, `other` at `t = 1`
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        // Same form as GLSL/WGSL mix() so CPU and GPU agree
        let mix = |a: f32, b: f32| a * (1.0 - t) + b * t;
        Rgb::new(
            mix(self.r, other.r),
            mix(self.g, other.g),
            mix(self.b, other.b),
        )
    }

    /// Padded `vec4<f32>` layout for uniform buffers
    pub fn to_uniform(self) -> [f32; 4] {
        [self.r, self.g, self.b, 1.0]
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b] = self.to_u8();
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_parsing() {
        let c = Rgb::from_hex("#981ffc").unwrap();
        assert_eq!(c.to_u8(), [0x98, 0x1f, 0xfc]);

        // Prefix is optional, case-insensitive digits
        let c = Rgb::from_hex("F0D720").unwrap();
        assert_eq!(c.to_u8(), [0xf0, 0xd7, 0x20]);
    }

    #[test]
    fn test_invalid_hex_rejected() {
        for bad in ["", "#12345", "#1234567", "#zzzzzz", "#ééé", "#+1+2+3", "-1-2-3"] {
            assert!(
                matches!(Rgb::from_hex(bad), Err(ParamError::InvalidColor(_))),
                "accepted {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_display_round_trips_hex() {
        assert_eq!(Rgb::from_hex("#981ffc").unwrap().to_string(), "#981ffc");
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Rgb::new(0.2, 0.4, 0.6);
        let b = Rgb::new(1.0, 0.0, 0.5);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
    }
}
