//! Window, surface mesh and snapshot configuration.

/// Window configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            window_width: 1280,
            window_height: 720,
        }
    }
}

/// Surface mesh layout
#[derive(Debug, Clone)]
pub struct SurfaceConfig {
    /// Grid subdivisions per side (512 = 263,169 vertices)
    pub subdivisions: usize,

    /// Side length of the square plane, centered on the origin
    pub extent: f32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            subdivisions: 512,
            extent: 2.0,
        }
    }
}

/// Offline top-down render
#[derive(Debug, Clone)]
pub struct SnapshotConfig {
    /// Output image size (width = height, pixels)
    pub size: u32,

    /// Side length of the square region imaged, centered on the origin
    pub extent: f32,

    /// Animation time to evaluate (seconds)
    pub time_s: f32,
}

impl Default for SnapshotConfig {
    fn default() -> Self {
        Self {
            size: 512,
            extent: 2.0,
            time_s: 0.0,
        }
    }
}
