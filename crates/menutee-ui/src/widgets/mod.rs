//! The default live widgets the [`crate::factory::DefaultWidgetFactory`] creates.

pub mod button;
pub mod dropdown;
pub mod option_select;
pub mod slider;
pub mod text;
pub mod toggle;
