//! Orbit camera configuration.

/// Damped orbit camera around a fixed target
#[derive(Debug, Clone)]
pub struct OrbitCameraConfig {
    /// Initial eye position (surface units)
    pub position: [f32; 3],

    /// Orbit center
    pub target: [f32; 3],

    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Near clipping plane
    pub near_plane: f32,

    /// Far clipping plane
    pub far_plane: f32,

    /// Fraction of the pending rotation/zoom applied per update (0..1]
    pub damping_factor: f32,

    /// Radians of orbit per pixel of drag
    pub rotate_speed: f32,

    /// Fractional distance change per wheel line
    pub zoom_speed: f32,

    /// Closest allowed eye distance from the target
    pub min_distance: f32,

    /// Farthest allowed eye distance from the target
    pub max_distance: f32,
}

impl Default for OrbitCameraConfig {
    fn default() -> Self {
        Self {
            position: [1.0, 1.0, 2.0],
            target: [0.0, 0.0, 0.0],
            fov_degrees: 75.0,
            near_plane: 0.1,
            far_plane: 100.0,
            damping_factor: 0.05,
            rotate_speed: 0.005,
            zoom_speed: 0.1,
            min_distance: 0.2,
            max_distance: 20.0,
        }
    }
}
