//! Interactive explorer for a family of 2D iterated maps.
//!
//! The core (`system`, `view`, `binding`, `accumulator`, `orbit`,
//! `interaction`, `engine`) is toolkit-free; `input` and `render` adapt it to
//! winit and wgpu.

pub mod accumulator;
pub mod binding;
pub mod config;
pub mod engine;
pub mod error;
pub mod help;
pub mod input;
pub mod interaction;
pub mod logging;
pub mod orbit;
pub mod render;
pub mod screenshot;
pub mod system;
pub mod view;

pub use engine::EngineState;
pub use error::{ExplorerError, Result};
pub use system::SystemKind;
