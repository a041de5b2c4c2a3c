//! Offline top-down render of the surface, evaluated entirely on the CPU.
//!
//! Each pixel maps to one surface point: the wave field gives its elevation
//! and the shading model its color. Useful for headless inspection and as a
//! reference image for the GPU output.

use std::path::Path;

use image::RgbImage;
use rayon::prelude::*;
use thiserror::Error;

use crate::ocean::{color, elevation};
use crate::params::{OceanParams, SnapshotConfig};

/// Errors raised while producing a snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Snapshot size must be > 0")]
    EmptyImage,

    #[error("Failed to save snapshot: {0}")]
    Image(#[from] image::ImageError),
}

/// Render the surface seen from straight above at `config.time_s`.
///
/// Image X follows surface X, image rows follow surface Z.
pub fn render_snapshot(
    params: &OceanParams,
    config: &SnapshotConfig,
) -> Result<RgbImage, SnapshotError> {
    if config.size == 0 {
        return Err(SnapshotError::EmptyImage);
    }

    let size = config.size as usize;
    let step = config.extent / config.size as f32;
    let half_size = config.extent / 2.0;
    let t = config.time_s;

    let mut image = RgbImage::new(config.size, config.size);
    let buffer: &mut [u8] = &mut image;
    buffer
        .par_chunks_mut(size * 3)
        .enumerate()
        .for_each(|(row, pixels)| {
            // Sample pixel centers
            let z = (row as f32 + 0.5) * step - half_size;
            for (col, pixel) in pixels.chunks_exact_mut(3).enumerate() {
                let x = (col as f32 + 0.5) * step - half_size;
                let rgb = color(elevation(x, z, t, params), params);
                pixel.copy_from_slice(&rgb.to_u8());
            }
        });

    Ok(image)
}

/// Render and save a snapshot as PNG
pub fn save_snapshot(
    params: &OceanParams,
    config: &SnapshotConfig,
    path: &Path,
) -> Result<(), SnapshotError> {
    let image = render_snapshot(params, config)?;
    image.save(path)?;
    log::info!(
        "Saved {}x{} snapshot at t={:.2}s to {}",
        config.size,
        config.size,
        config.time_s,
        path.display()
    );
    Ok(())
}
