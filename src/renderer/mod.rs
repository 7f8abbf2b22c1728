//! Canvas2D rendering module
//!
//! Paints the simulation's draw list onto a 2D canvas context each frame.

pub mod canvas;

pub use canvas::CanvasRenderer;
