use std::any::Any;

use crate::config::{DropdownSpec, widget::ChoiceHandler};
use crate::event::{EventResult, UiEvent};
use crate::focus::{ElementId, MoveDirection};
use crate::palette::PaletteConfig;
use crate::widget::Widget;

/// A dropdown list.
///
/// Submit opens the list; while open, up/down move the highlighted option,
/// submit chooses it and cancel closes the list without choosing. An open
/// dropdown keeps every input to itself, including cancel.
pub struct Dropdown {
    key: String,
    id: ElementId,
    display_text: String,
    options: Vec<String>,
    index: usize,
    open: bool,
    highlighted: usize,
    palette: PaletteConfig,
    on_choose: Option<ChoiceHandler>,
}

impl Dropdown {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            id: ElementId::new(),
            display_text: String::new(),
            options: Vec::new(),
            index: 0,
            open: false,
            highlighted: 0,
            palette: PaletteConfig::default(),
            on_choose: None,
        }
    }

    pub fn from_spec(key: impl Into<String>, spec: DropdownSpec) -> Self {
        let mut dropdown = Self::new(key).text(spec.display_text).options(spec.options);
        dropdown.set_index_without_notify(spec.default_index);
        dropdown.on_choose = spec.on_choose;
        dropdown
    }

    pub fn text(mut self, v: impl Into<String>) -> Self { self.display_text = v.into(); self }

    pub fn options(mut self, options: Vec<String>) -> Self {
        self.options = options;
        self.index = 0;
        self
    }
    pub fn on_choose(mut self, f: impl FnMut(usize, &str) + 'static) -> Self {
        self.on_choose = Some(Box::new(f));
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn selected(&self) -> Option<&str> {
        self.options.get(self.index).map(String::as_str)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn open(&mut self) {
        if self.options.is_empty() {
            return;
        }
        self.open = true;
        self.highlighted = self.index;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Chooses `index` and closes the list; fires the handler if it changed.
    pub fn choose(&mut self, index: usize) {
        self.open = false;
        if index >= self.options.len() || index == self.index {
            return;
        }
        self.index = index;
        if let Some(f) = &mut self.on_choose {
            f(index, &self.options[index]);
        }
    }

    pub fn set_index_without_notify(&mut self, index: usize) {
        if index < self.options.len() {
            self.index = index;
        }
    }
}

impl Widget for Dropdown {
    fn key(&self) -> &str {
        &self.key
    }

    fn label(&self) -> String {
        let current = self.selected().unwrap_or("");
        let head = if self.display_text.is_empty() {
            current.to_string()
        } else {
            format!("{}: {current}", self.display_text)
        };
        if self.open {
            format!("{head} [{}]", self.options.get(self.highlighted).map_or("", String::as_str))
        } else {
            head
        }
    }

    fn selectable(&self) -> Option<ElementId> {
        Some(self.id)
    }

    fn consumes_cancel(&self) -> bool {
        self.open
    }

    fn on_event(&mut self, event: &UiEvent) -> EventResult {
        if !self.open {
            if *event == UiEvent::Submit {
                self.open();
                return EventResult::Consumed;
            }
            return EventResult::Ignored;
        }
        match event {
            UiEvent::Submit => self.choose(self.highlighted),
            UiEvent::Cancel => self.close(),
            UiEvent::Move(MoveDirection::Up) => self.highlighted = self.highlighted.saturating_sub(1),
            UiEvent::Move(MoveDirection::Down) => {
                self.highlighted = (self.highlighted + 1).min(self.options.len().saturating_sub(1));
            }
            UiEvent::Move(_) => {}
        }
        EventResult::Consumed
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
    use std::cell::RefCell;
    use std::rc::Rc;

    fn quality() -> Dropdown {
        Dropdown::new("quality").options(vec!["Low".into(), "Medium".into(), "High".into()])
    }

    #[test]
    fn submit_opens_then_chooses() {
        let chosen = Rc::new(RefCell::new(Vec::new()));
        let c = chosen.clone();
        let mut d = quality().on_choose(move |i, s| c.borrow_mut().push((i, s.to_string())));
        d.on_event(&UiEvent::Submit);
        assert!(d.is_open());
        assert!(d.consumes_cancel());
        d.on_event(&UiEvent::Move(MoveDirection::Down));
        d.on_event(&UiEvent::Move(MoveDirection::Down));
        d.on_event(&UiEvent::Move(MoveDirection::Down));
        assert_eq!(d.highlighted(), 2);
        d.on_event(&UiEvent::Submit);
        assert!(!d.is_open());
        assert_eq!(d.selected(), Some("High"));
        assert_eq!(*chosen.borrow(), vec![(2, "High".to_string())]);
    }

    #[test]
    fn cancel_closes_without_choosing() {
        let mut d = quality();
        d.on_event(&UiEvent::Submit);
        d.on_event(&UiEvent::Move(MoveDirection::Down));
        assert_eq!(d.on_event(&UiEvent::Cancel), EventResult::Consumed);
        assert!(!d.is_open());
        assert_eq!(d.index(), 0);
    }

    #[test]
    fn closed_dropdown_lets_navigation_through() {
        let mut d = quality();
        assert_eq!(d.on_event(&UiEvent::Move(MoveDirection::Down)), EventResult::Ignored);
        assert!(!d.consumes_cancel());
    }

    #[test]
    fn choosing_current_does_not_fire() {
        let fired = Rc::new(RefCell::new(0));
        let f = fired.clone();
        let mut d = quality().on_choose(move |_, _| *f.borrow_mut() += 1);
        d.on_event(&UiEvent::Submit);
        d.on_event(&UiEvent::Submit);
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn empty_dropdown_never_opens() {
        let mut d = Dropdown::new("empty");
        d.on_event(&UiEvent::Submit);
        assert!(!d.is_open());
        assert_eq!(d.label(), "");
    }

    #[test]
    fn label_shows_text_and_highlight() {
        let mut d = quality().text("Quality");
        assert_eq!(d.label(), "Quality: Low");
        d.on_event(&UiEvent::Submit);
        d.on_event(&UiEvent::Move(MoveDirection::Down));
        assert_eq!(d.label(), "Quality: Low [Medium]");
    }
}
