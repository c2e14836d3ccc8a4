//! Controller layer: backend events, screen state transitions, and command
//! orchestration.

pub mod events;
pub mod orchestration;
pub mod reducer;
