use std::any::Any;

use crate::config::TextSpec;
use crate::widget::Widget;

/// A display-only line of text. Never selectable.
pub struct Text {
    key: String,
    text: String,
}

impl Text {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self { key: key.into(), text: text.into() }
    }

    pub fn from_spec(key: impl Into<String>, spec: TextSpec) -> Self {
        Self::new(key, spec.text)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }
}

impl Widget for Text {
    fn key(&self) -> &str {
        &self.key
    }

    fn label(&self) -> String {
        self.text.clone()
    }

    fn as_any(&self) -> &dyn Any { self }
    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}
