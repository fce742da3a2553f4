use std::any::Any;

use crate::config::{ButtonSpec, widget::PressHandler};
use crate::event::{EventResult, UiEvent};
use crate::focus::ElementId;
use crate::palette::PaletteConfig;
use crate::widget::Widget;

/// A pressable button.
///
/// # Example
/// ```rust,ignore
/// Button::new("quit", "Quit").on_press(move || ctl.request_exit())
/// ```
pub struct Button {
    key: String,
    id: ElementId,
    text: String,
    palette: PaletteConfig,
    on_press: Option<PressHandler>,
}

impl Button {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            id: ElementId::new(),
            text: text.into(),
            palette: PaletteConfig::default(),
            on_press: None,
        }
    }

    pub fn from_spec(key: impl Into<String>, spec: ButtonSpec) -> Self {
        Self { on_press: spec.on_press, ..Self::new(key, spec.text) }
    }

    pub fn on_press(mut self, f: impl FnMut() + 'static) -> Self {
        self.on_press = Some(Box::new(f));
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn palette(&self) -> &PaletteConfig {
        &self.palette
    }

    /// Fires the press handler as if the button had been submitted.
    pub fn press(&mut self) {
        if let Some(f) = &mut self.on_press {
            f();
        }
    }
}

impl Widget for Button {
    fn key(&self) -> &str {
        &self.key
    }

    fn label(&self) -> String {
        self.text.clone()
    }

    fn selectable(&self) -> Option<ElementId> {
        Some(self.id)
    }

    fn on_event(&mut self, event: &UiEvent) -> EventResult {
        if *event == UiEvent::Submit {
            self.press();
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }

    fn set_palette(&mut self, palette: &PaletteConfig) {
        self.palette = *palette;
    }

    fn as_any(&self) -> &dyn Any { self }
    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::MoveDirection;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn submit_fires_handler() {
        let n = Rc::new(Cell::new(0));
        let c = n.clone();
        let mut b = Button::new("play", "Play").on_press(move || c.set(c.get() + 1));
        assert_eq!(b.on_event(&UiEvent::Submit), EventResult::Consumed);
        assert_eq!(n.get(), 1);
    }

    #[test]
    fn moves_are_ignored() {
        let mut b = Button::new("play", "Play");
        assert_eq!(b.on_event(&UiEvent::Move(MoveDirection::Down)), EventResult::Ignored);
        assert!(!b.consumes_cancel());
    }

    #[test]
    fn label_is_text() {
        let mut b = Button::new("play", "Play");
        b.set_text("Continue");
        assert_eq!(b.label(), "Continue");
    }
}
