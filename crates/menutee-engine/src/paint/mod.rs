//! Color model shared by palettes.
//!
//! Menus never draw; they hand colors to the host's widget theming through
//! palette configs. Colors are kept in linear premultiplied alpha so hosts can
//! blend state transitions without fringes.

pub mod color;

pub use color::Color;
