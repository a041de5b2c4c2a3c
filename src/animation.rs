//! Per-frame animation driver.
//!
//! Each tick: read the monotonic clock, publish the elapsed time to the
//! parameter store, advance the camera controls, submit one frame, and ask
//! the host for the next tick. Rendering errors are returned to the caller
//! and end the loop; nothing is retried.
//!
//! The driver owns its whole context (clock, store, mesh, collaborators), so
//! the host only has to forward "next frame" callbacks to [`AnimationDriver::tick`].

use std::time::Instant;

use glam::Mat4;

use crate::ocean::SurfaceMesh;
use crate::params::ParameterStore;
use crate::rendering::RenderError;

/// Monotonic time source
pub trait Clock {
    /// Seconds since the clock started
    fn elapsed_secs(&self) -> f32;
}

/// Wall clock started at construction
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn start() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Clock for MonotonicClock {
    fn elapsed_secs(&self) -> f32 {
        self.start.elapsed().as_secs_f32()
    }
}

/// Camera controls advanced once per tick
pub trait CameraControls {
    /// Advance damped camera motion by one frame
    fn update(&mut self);

    /// Current view-projection matrix
    fn view_proj(&self) -> Mat4;
}

/// Everything one frame submission reads
pub struct Frame<'a> {
    pub params: &'a ParameterStore,
    pub mesh: &'a mut SurfaceMesh,
    pub view_proj: Mat4,
}

/// Render submission: produces one displayed frame
pub trait FrameRenderer {
    fn render(&mut self, frame: Frame<'_>) -> Result<(), RenderError>;
}

/// Host primitive that runs the next tick at the next display refresh
pub trait FrameScheduler {
    fn request_frame(&self);
}

/// Driver lifecycle. `Running` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Idle,
    Running,
}

/// Frame-synchronous animation loop
pub struct AnimationDriver<K, C, R, S> {
    state: DriverState,
    clock: K,
    store: ParameterStore,
    mesh: SurfaceMesh,
    controls: C,
    renderer: R,
    scheduler: S,
    frames: u64,
}

impl<K, C, R, S> AnimationDriver<K, C, R, S>
where
    K: Clock,
    C: CameraControls,
    R: FrameRenderer,
    S: FrameScheduler,
{
    pub fn new(
        clock: K,
        store: ParameterStore,
        mesh: SurfaceMesh,
        controls: C,
        renderer: R,
        scheduler: S,
    ) -> Self {
        Self {
            state: DriverState::Idle,
            clock,
            store,
            mesh,
            controls,
            renderer,
            scheduler,
            frames: 0,
        }
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    /// Number of frames submitted so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Run one tick. The first call moves the driver to `Running`.
    ///
    /// On a render error the next tick is not scheduled and the error is
    /// returned; the loop is over.
    pub fn tick(&mut self) -> Result<(), RenderError> {
        if self.state == DriverState::Idle {
            log::debug!("Animation loop started");
            self.state = DriverState::Running;
        }

        // Never step backwards, whatever the clock reports
        let elapsed = self.clock.elapsed_secs().max(self.store.elapsed_time());
        self.store.set_elapsed_time(elapsed);

        self.controls.update();

        self.renderer.render(Frame {
            params: &self.store,
            mesh: &mut self.mesh,
            view_proj: self.controls.view_proj(),
        })?;
        self.frames += 1;

        self.scheduler.request_frame();
        Ok(())
    }

    pub fn store(&self) -> &ParameterStore {
        &self.store
    }

    /// Panel-side access; writes are picked up by the next tick
    pub fn store_mut(&mut self) -> &mut ParameterStore {
        &mut self.store
    }

    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    pub fn controls_mut(&mut self) -> &mut C {
        &mut self.controls
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }
}
