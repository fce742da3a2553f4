//! Core host-facing contracts.
//!
//! This module defines the stable interface between the host loop (engine,
//! window system) and the menu layer: the process-wide cursor and time-scale
//! state a menu stack saves, overrides and restores.

mod host;

pub use host::{CursorLockMode, HostControls, HostState};
