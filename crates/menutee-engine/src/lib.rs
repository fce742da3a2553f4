//! Menutee engine crate.
//!
//! Host-facing pieces the menu layer sits on: logging, frame timing with
//! deferred tasks, platform-agnostic input mediation, and the cursor/time
//! controls a menu stack drives. Nothing here knows about menus.

pub mod core;
pub mod input;
pub mod time;

pub mod logging;
pub mod paint;
