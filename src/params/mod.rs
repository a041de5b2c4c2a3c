//! Parameter definitions with documented semantics and defaults.
//!
//! - `OceanParams`: the values the wave field and shading model read
//! - `ParameterStore`: named, live-editable access to them
//! - camera, window, mesh and snapshot configuration

mod camera;
mod color;
mod ocean;
mod render;
mod store;

// Re-export all types
pub use camera::OrbitCameraConfig;
pub use color::Rgb;
pub use ocean::{OceanParams, DEFAULT_DEPTH_COLOR, DEFAULT_SURFACE_COLOR};
pub use render::{RenderConfig, SnapshotConfig, SurfaceConfig};
pub use store::{
    ColorObserver, ParamError, ParamId, ParamKind, ParamRange, ParamValue, ParameterStore,
};
