//! Scene state machines for DOORWAY.
//!
//! Pure transition functions for door motion, trigger gates, one-shot
//! interaction and the clap sequence. No ECS dependency; operates on
//! plain data.

pub mod clap;
pub mod door;
pub mod gate;
pub mod oneshot;

pub use doorway_core as core;

#[cfg(test)]
mod tests;
