//! Surface mesh: fixed-topology grid on the XZ plane, displaced per frame.

use bytemuck::{Pod, Zeroable};
use rayon::prelude::*;

use super::wave;
use crate::params::{OceanParams, SurfaceConfig};

/// Vertex data for the surface mesh (`position[1]` holds the elevation)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
}

/// Grid of surface points with fixed resolution and extent
pub struct SurfaceMesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    subdivisions: usize,
    extent: f32,
}

impl SurfaceMesh {
    /// Create a flat grid of `subdivisions`² quads over `extent`², centered on the origin
    pub fn new(config: &SurfaceConfig) -> Self {
        let n = config.subdivisions;
        let step = config.extent / n as f32;
        let half_size = config.extent / 2.0;

        let mut vertices = Vec::with_capacity((n + 1) * (n + 1));
        let mut indices = Vec::with_capacity(n * n * 6);

        // Generate flat XZ plane grid
        for z in 0..=n {
            for x in 0..=n {
                let x_pos = x as f32 * step - half_size;
                let z_pos = z as f32 * step - half_size;

                vertices.push(Vertex {
                    position: [x_pos, 0.0, z_pos],
                });
            }
        }

        // Generate triangle indices (counter-clockwise winding)
        for z in 0..n {
            for x in 0..n {
                let top_left = (z * (n + 1) + x) as u32;
                let top_right = top_left + 1;
                let bottom_left = ((z + 1) * (n + 1) + x) as u32;
                let bottom_right = bottom_left + 1;

                indices.extend_from_slice(&[
                    top_left,
                    bottom_left,
                    top_right,
                    top_right,
                    bottom_left,
                    bottom_right,
                ]);
            }
        }

        Self {
            vertices,
            indices,
            subdivisions: n,
            extent: config.extent,
        }
    }

    pub fn subdivisions(&self) -> usize {
        self.subdivisions
    }

    pub fn extent(&self) -> f32 {
        self.extent
    }

    /// Rewrite every vertex elevation from the wave field at `params.elapsed_time`.
    ///
    /// Only `y` changes; X/Z and the index buffer are never touched.
    pub fn displace(&mut self, params: &OceanParams) {
        let t = params.elapsed_time;
        self.vertices.par_iter_mut().for_each(|vertex| {
            let [x, _, z] = vertex.position;
            vertex.position[1] = wave::elevation(x, z, t, params);
        });
    }
}
