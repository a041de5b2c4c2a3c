//! Ocean surface: wave field, shading model and the displaced surface mesh.

mod mesh;
pub mod noise;
pub mod shading;
pub mod wave;

// Re-export public types
pub use mesh::{SurfaceMesh, Vertex};
pub use shading::{color, mix_factor};
pub use wave::elevation;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::OceanParams;

    #[test]
    fn test_default_scenario_at_origin() {
        // Flat at the origin at t = 0, so the color is the offset-driven midpoint blend
        let params = OceanParams::default();
        let e = elevation(0.0, 0.0, 0.0, &params);
        assert_eq!(e, 0.0);
        assert_eq!(mix_factor(e, &params), 0.5);
        assert_eq!(color(e, &params).to_string(), "#c47b8e");
    }
}
