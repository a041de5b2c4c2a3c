//! Command-line argument parsing.

use std::path::PathBuf;

use clap::Parser;

use crate::params::{RenderConfig, SnapshotConfig, SurfaceConfig};

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "ragingsea")]
#[command(about = "Real-time procedural ocean surface", long_about = None)]
pub struct Args {
    /// Grid subdivisions per side of the surface mesh
    #[arg(long, value_name = "N", default_value_t = 512,
          value_parser = clap::value_parser!(u32).range(1..=2048))]
    pub subdivisions: u32,

    /// Side length of the square surface (world units)
    #[arg(long, value_name = "UNITS", default_value_t = 2.0)]
    pub extent: f32,

    /// Window width (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 1280)]
    pub width: u32,

    /// Window height (pixels)
    #[arg(long, value_name = "PIXELS", default_value_t = 720)]
    pub height: u32,

    /// Render one top-down frame on the CPU to this PNG and exit
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<PathBuf>,

    /// Animation time for --snapshot (seconds)
    #[arg(long, value_name = "SECONDS", default_value_t = 0.0, requires = "snapshot")]
    pub time: f32,

    /// Image size for --snapshot (pixels, square)
    #[arg(long, value_name = "PIXELS", default_value_t = 512, requires = "snapshot")]
    pub size: u32,
}

impl Args {
    pub fn surface_config(&self) -> SurfaceConfig {
        SurfaceConfig {
            subdivisions: self.subdivisions as usize,
            extent: self.extent,
        }
    }

    pub fn render_config(&self) -> RenderConfig {
        RenderConfig {
            window_width: self.width,
            window_height: self.height,
        }
    }

    /// Snapshot settings, if snapshot mode was requested
    pub fn snapshot_config(&self) -> Option<(SnapshotConfig, PathBuf)> {
        self.snapshot.as_ref().map(|path| {
            (
                SnapshotConfig {
                    size: self.size,
                    extent: self.extent,
                    time_s: self.time,
                },
                path.clone(),
            )
        })
    }
}
