//! Damped orbit camera controls.
//!
//! The eye orbits a fixed target on a sphere. Pointer drags and wheel steps
//! accumulate pending rotation/zoom; each `update` applies a damped fraction
//! of it, so motion eases out over the following frames.

use glam::{Mat4, Vec3};

use crate::animation::CameraControls;
use crate::params::OrbitCameraConfig;

/// Keeps the eye off the poles, where `look_at` degenerates
const POLAR_EPSILON: f32 = 1e-3;

/// Eye position in spherical coordinates around the target
#[derive(Debug, Clone, Copy, PartialEq)]
struct Spherical {
    radius: f32,
    /// Angle from +Y
    phi: f32,
    /// Angle around Y, measured from +Z toward +X
    theta: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                phi: 0.0,
                theta: 0.0,
            };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Orbit controls with damping
pub struct OrbitControls {
    config: OrbitCameraConfig,
    target: Vec3,
    spherical: Spherical,
    /// Pending rotation (phi, theta), drained by `update`
    pending_rotation: (f32, f32),
    /// Pending zoom factor, applied and reset by `update`
    pending_scale: f32,
    aspect_ratio: f32,
    dragging: bool,
    last_pointer: Option<(f64, f64)>,
}

impl OrbitControls {
    /// Create controls for a viewport of `width` x `height` pixels
    pub fn new(config: OrbitCameraConfig, width: u32, height: u32) -> Self {
        let target = Vec3::from_array(config.target);
        let eye = Vec3::from_array(config.position);
        let mut controls = Self {
            target,
            spherical: Spherical::from_offset(eye - target),
            pending_rotation: (0.0, 0.0),
            pending_scale: 1.0,
            aspect_ratio: 1.0,
            dragging: false,
            last_pointer: None,
            config,
        };
        controls.set_viewport(width, height);
        controls
    }

    /// Update the projection for a resized viewport
    pub fn set_viewport(&mut self, width: u32, height: u32) {
        if width > 0 && height > 0 {
            self.aspect_ratio = width as f32 / height as f32;
        }
    }

    pub fn aspect_ratio(&self) -> f32 {
        self.aspect_ratio
    }

    /// Queue an orbit by a pointer delta in pixels
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.pending_rotation.0 -= dy * self.config.rotate_speed;
        self.pending_rotation.1 -= dx * self.config.rotate_speed;
    }

    /// Queue a zoom by wheel lines (positive moves closer)
    pub fn zoom(&mut self, lines: f32) {
        self.pending_scale *= (1.0 - self.config.zoom_speed).powf(lines);
    }

    pub fn pointer_pressed(&mut self) {
        self.dragging = true;
    }

    pub fn pointer_released(&mut self) {
        self.dragging = false;
    }

    /// Track the cursor; rotates while the pointer is held
    pub fn pointer_moved(&mut self, x: f64, y: f64) {
        if let Some((last_x, last_y)) = self.last_pointer {
            if self.dragging {
                self.rotate((x - last_x) as f32, (y - last_y) as f32);
            }
        }
        self.last_pointer = Some((x, y));
    }

    pub fn eye(&self) -> Vec3 {
        self.target + self.spherical.to_offset()
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    /// Apply a damped step of the pending rotation and zoom
    pub fn advance(&mut self) {
        let damping = self.config.damping_factor;
        let (d_phi, d_theta) = self.pending_rotation;

        self.spherical.phi = (self.spherical.phi + d_phi * damping)
            .clamp(POLAR_EPSILON, std::f32::consts::PI - POLAR_EPSILON);
        self.spherical.theta += d_theta * damping;
        self.spherical.radius = (self.spherical.radius * self.pending_scale)
            .clamp(self.config.min_distance, self.config.max_distance);

        self.pending_rotation = (d_phi * (1.0 - damping), d_theta * (1.0 - damping));
        self.pending_scale = 1.0;
    }

    /// View-projection matrix (wgpu clip space, depth 0..1)
    pub fn view_proj_matrix(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye(), self.target, Vec3::Y);
        let proj = Mat4::perspective_rh(
            self.config.fov_degrees.to_radians(),
            self.aspect_ratio,
            self.config.near_plane,
            self.config.far_plane,
        );
        proj * view
    }
}

impl CameraControls for OrbitControls {
    fn update(&mut self) {
        self.advance();
    }

    fn view_proj(&self) -> Mat4 {
        self.view_proj_matrix()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls() -> OrbitControls {
        OrbitControls::new(OrbitCameraConfig::default(), 1280, 720)
    }

    #[test]
    fn test_initial_eye_matches_config() {
        let c = controls();
        let eye = c.eye();
        assert!((eye - Vec3::new(1.0, 1.0, 2.0)).length() < 1e-5, "{:?}", eye);
    }

    #[test]
    fn test_update_without_input_is_stationary() {
        let mut c = controls();
        let before = c.eye();
        for _ in 0..10 {
            c.advance();
        }
        assert!((c.eye() - before).length() < 1e-5);
    }

    #[test]
    fn test_rotation_is_damped() {
        let mut c = controls();
        let start = c.eye();
        c.rotate(100.0, 0.0);

        c.advance();
        let first_step = (c.eye() - start).length();
        let after_first = c.eye();
        c.advance();
        let second_step = (c.eye() - after_first).length();

        assert!(first_step > 0.0);
        // Each update applies a shrinking share of the remaining rotation
        assert!(second_step < first_step);
    }

    #[test]
    fn test_orbit_keeps_distance() {
        let mut c = controls();
        let radius = (c.eye() - c.target()).length();
        c.rotate(250.0, -80.0);
        for _ in 0..100 {
            c.advance();
        }
        assert!(((c.eye() - c.target()).length() - radius).abs() < 1e-4);
    }

    #[test]
    fn test_polar_angle_is_clamped() {
        let mut c = controls();
        // Drag far past the pole
        c.rotate(0.0, 100_000.0);
        for _ in 0..200 {
            c.advance();
        }
        assert!(c.spherical.phi >= POLAR_EPSILON);
        assert!(c.eye().is_finite());
        assert!(c.view_proj_matrix().is_finite());
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut c = controls();
        c.zoom(1_000.0);
        c.advance();
        let config = OrbitCameraConfig::default();
        assert!(((c.eye() - c.target()).length() - config.min_distance).abs() < 1e-4);

        c.zoom(-1_000.0);
        c.advance();
        assert!(((c.eye() - c.target()).length() - config.max_distance).abs() < 1e-3);
    }

    #[test]
    fn test_drag_only_rotates_while_pressed() {
        let mut c = controls();
        c.pointer_moved(10.0, 10.0);
        c.pointer_moved(200.0, 10.0);
        assert_eq!(c.pending_rotation, (0.0, 0.0));

        c.pointer_pressed();
        c.pointer_moved(250.0, 10.0);
        assert!(c.pending_rotation.1 < 0.0);
        c.pointer_released();
    }

    #[test]
    fn test_viewport_updates_aspect() {
        let mut c = controls();
        c.set_viewport(800, 800);
        assert_eq!(c.aspect_ratio(), 1.0);
        // Minimized windows report zero; keep the last aspect
        c.set_viewport(0, 0);
        assert_eq!(c.aspect_ratio(), 1.0);
    }

    #[test]
    fn test_view_proj_matrix_generation() {
        let c = controls();
        let view_proj = c.view_proj_matrix();

        // Matrix should not be identity or zero
        assert_ne!(view_proj, Mat4::IDENTITY);
        assert_ne!(view_proj, Mat4::ZERO);
        assert!(view_proj.is_finite());

        // The target projects to the middle of the screen
        let clip = view_proj * c.target().extend(1.0);
        assert!((clip.x / clip.w).abs() < 1e-5);
        assert!((clip.y / clip.w).abs() < 1e-5);
    }
}
