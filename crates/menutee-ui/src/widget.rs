use std::any::Any;

use crate::event::{EventResult, UiEvent};
use crate::focus::ElementId;
use crate::palette::PaletteConfig;

// ── Widget trait ──────────────────────────────────────────────────────────

/// A live widget element inside a panel.
///
/// Widgets own their typed change handler and their current value; the
/// manager only routes [`UiEvent`]s to whichever one is focused.
///
/// # Implementing a custom widget
///
/// ```rust,ignore
/// use menutee_ui::prelude::*;
///
/// pub struct Counter { key: String, id: ElementId, count: u32 }
///
/// impl Widget for Counter {
///     fn key(&self) -> &str { &self.key }
///     fn label(&self) -> String { format!("Pressed {} times", self.count) }
///     fn selectable(&self) -> Option<ElementId> { Some(self.id) }
///     fn on_event(&mut self, event: &UiEvent) -> EventResult {
///         if *event == UiEvent::Submit { self.count += 1; return EventResult::Consumed; }
///         EventResult::Ignored
///     }
///     fn as_any(&self) -> &dyn std::any::Any { self }
///     fn as_any_mut(&mut self) -> &mut dyn std::any::Any { self }
/// }
/// ```
pub trait Widget: 'static {
    /// The config key this widget was built from; unique within its panel.
    fn key(&self) -> &str;

    /// Human-readable state, e.g. `"Volume: 0.50"`.
    fn label(&self) -> String;

    /// The focus handle, or `None` for display-only widgets.
    fn selectable(&self) -> Option<ElementId> {
        None
    }

    /// `true` while this widget wants the cancel input for itself (an open
    /// dropdown, for instance) instead of letting the menu go back a panel.
    fn consumes_cancel(&self) -> bool {
        false
    }

    /// Handle an input event while focused.
    fn on_event(&mut self, _event: &UiEvent) -> EventResult {
        EventResult::Ignored
    }

    fn set_palette(&mut self, _palette: &PaletteConfig) {}

    /// Pull external state (bound references) into the widget without firing
    /// its handler. Called every frame for the active panel.
    fn refresh(&mut self) {}

    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

// ── Element ───────────────────────────────────────────────────────────────

/// A type-erased widget, as stored in a live panel.
pub struct Element(Box<dyn Widget>);

impl Element {
    pub fn new<W: Widget>(w: W) -> Self {
        Self(Box::new(w))
    }

    #[inline]
    pub fn key(&self) -> &str {
        self.0.key()
    }

    #[inline]
    pub fn label(&self) -> String {
        self.0.label()
    }

    #[inline]
    pub fn selectable(&self) -> Option<ElementId> {
        self.0.selectable()
    }

    #[inline]
    pub fn consumes_cancel(&self) -> bool {
        self.0.consumes_cancel()
    }

    #[inline]
    pub fn on_event(&mut self, event: &UiEvent) -> EventResult {
        self.0.on_event(event)
    }

    #[inline]
    pub fn set_palette(&mut self, palette: &PaletteConfig) {
        self.0.set_palette(palette)
    }

    #[inline]
    pub fn refresh(&mut self) {
        self.0.refresh()
    }

    pub fn widget(&self) -> &dyn Widget {
        self.0.as_ref()
    }

    pub fn widget_mut(&mut self) -> &mut dyn Widget {
        self.0.as_mut()
    }

    /// The concrete widget, if it is a `W`.
    pub fn downcast_ref<W: Widget>(&self) -> Option<&W> {
        self.0.as_any().downcast_ref::<W>()
    }

    pub fn downcast_mut<W: Widget>(&mut self) -> Option<&mut W> {
        self.0.as_any_mut().downcast_mut::<W>()
    }
}

impl<W: Widget> From<W> for Element {
    fn from(w: W) -> Self {
        Self::new(w)
    }
}
