//! Time subsystem.
//!
//! Provides stable, testable frame timing utilities without coupling to the host loop.
//! Intended usage:
//! - one `FrameClock` per menu scene
//! - call `tick()` once per host frame to obtain `FrameTime`
//! - hand the `FrameTime` to a `DeferredQueue` to run tasks that were waiting on a frame boundary

mod deferred;
mod frame_clock;

pub use deferred::{DeferredQueue, DeferredTask};
pub use frame_clock::{FrameClock, FrameTime};
