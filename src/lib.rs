//! Ragingsea library - Real-time procedural ocean surface

pub mod animation;
pub mod camera;
pub mod cli;
pub mod ocean;
pub mod panel;
pub mod params;
pub mod rendering;
pub mod snapshot;
