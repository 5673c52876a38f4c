//! Rendering module
//!
//! The simulation hands renderers a read-only [`FrameView`]; renderers never
//! touch game state. Shapes are built on the CPU and drawn as one triangle
//! list through WebGPU.

pub mod pipeline;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use vertex::Vertex;

use thiserror::Error;

use crate::sim::{GamePhase, GameState, Obstacle, Player};
use crate::tuning::Tuning;

/// Errors a renderer can report for a single frame
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("render surface lost")]
    SurfaceLost,

    #[error("out of GPU memory")]
    OutOfMemory,

    #[error("render error: {0}")]
    Other(String),
}

/// Everything a renderer may look at for one frame
#[derive(Debug, Clone, Copy)]
pub struct FrameView<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub obstacles: &'a [Obstacle],
    pub score: f64,
    pub speed: f64,
    pub tuning: &'a Tuning,
}

impl<'a> FrameView<'a> {
    pub fn capture(state: &'a GameState) -> Self {
        Self {
            phase: state.phase,
            player: &state.player,
            obstacles: &state.obstacles,
            score: state.counters.score,
            speed: state.counters.speed,
            tuning: &state.tuning,
        }
    }
}

/// Draws a frame from simulation state
pub trait Renderer {
    fn draw(&mut self, view: &FrameView<'_>) -> Result<(), RenderError>;
}

/// Builds the scene without presenting it (native runs and tests)
#[derive(Debug, Default)]
pub struct HeadlessRenderer {
    pub frames: u64,
    pub last_vertex_count: usize,
}

impl Renderer for HeadlessRenderer {
    fn draw(&mut self, view: &FrameView<'_>) -> Result<(), RenderError> {
        self.last_vertex_count = shapes::scene(view).len();
        self.frames += 1;
        Ok(())
    }
}
