//! Platform abstraction layer
//!
//! Turns browser events into simulation input. Nothing in here touches the
//! DOM directly, so the same collector backs the wasm host and tests.

pub mod input;

pub use input::{DragState, InputCollector, PointerAction};
