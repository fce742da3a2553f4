use std::any::Any;

use crate::config::{OptionSelectSpec, OptionValue, widget::ChoiceHandler};
use crate::event::{EventResult, UiEvent};
use crate::focus::{ElementId, MoveDirection};
use crate::palette::PaletteConfig;
use crate::reference::ValueRef;
use crate::widget::Widget;

enum Binding {
    Index(ValueRef<i32>),
    Flag(ValueRef<bool>),
}

impl Binding {
    fn version(&self) -> u64 {
        match self {
            Binding::Index(r) => r.version(),
            Binding::Flag(r) => r.version(),
        }
    }

    fn read(&self) -> i64 {
        match self {
            Binding::Index(r) => r.get() as i64,
            Binding::Flag(r) => r.get() as i64,
        }
    }

    fn write(&self, index: usize) {
        match self {
            Binding::Index(r) => r.set(index as i32),
            Binding::Flag(r) => r.set(index == 1),
        }
    }
}

/// A `< option >` selector cycled with left/right.
///
/// Submit on the label behaves like the right arrow. Without `loops`, the
/// ends are hard stops; with `hides_arrow_if_last_option` the arrow pointing
/// past such an end reports itself hidden.
pub struct OptionSelect {
    key: String,
    id: ElementId,
    display_text: String,
    options: Vec<String>,
    index: usize,
    loops: bool,
    hides_arrow_if_last_option: bool,
    binding: Option<Binding>,
    seen_version: u64,
    palette: PaletteConfig,
    on_select: Option<ChoiceHandler>,
}

impl OptionSelect {
    pub fn new(key: impl Into<String>, options: Vec<String>) -> Self {
        Self {
            key: key.into(),
            id: ElementId::new(),
            display_text: String::new(),
            options,
            index: 0,
            loops: true,
            hides_arrow_if_last_option: false,
            binding: None,
            seen_version: 0,
            palette: PaletteConfig::default(),
            on_select: None,
        }
    }

    pub fn from_spec(key: impl Into<String>, spec: OptionSelectSpec) -> Self {
        let initial = spec.value.initial_index();
        let mut select = Self::new(key, spec.options)
            .text(spec.display_text)
            .loops(spec.loops)
            .hides_arrow_if_last_option(spec.hides_arrow_if_last_option);
        select.binding = match spec.value {
            OptionValue::Index(_) => None,
            OptionValue::IndexRef(r) => Some(Binding::Index(r)),
            OptionValue::FlagRef(r) => Some(Binding::Flag(r)),
        };
        if let Some(b) = &select.binding {
            select.seen_version = b.version();
        }
        if !select.in_range(initial) {
            log::warn!("option select `{}` starts at out-of-range index {initial}; using 0", select.key);
        }
        select.set_index_without_notify(initial);
        select.on_select = spec.on_select;
        select
    }

    pub fn text(mut self, v: impl Into<String>) -> Self { self.display_text = v.into(); self }
    pub fn loops(mut self, v: bool) -> Self { self.loops = v; self }
    pub fn hides_arrow_if_last_option(mut self, v: bool) -> Self { self.hides_arrow_if_last_option = v; self }
    pub fn on_select(mut self, f: impl FnMut(usize, &str) + 'static) -> Self {
        self.on_select = Some(Box::new(f));
        self
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn selected(&self) -> Option<&str> {
        self.options.get(self.index).map(String::as_str)
    }

    pub fn choose_left(&mut self) {
        let len = self.options.len();
        if len == 0 {
            return;
        }
        match self.index.checked_sub(1) {
            Some(i) => self.select(i),
            None if self.loops => self.select(len - 1),
            None => {}
        }
    }

    pub fn choose_right(&mut self) {
        let len = self.options.len();
        if len == 0 {
            return;
        }
        if self.index + 1 < len {
            self.select(self.index + 1);
        } else if self.loops {
            self.select(0);
        }
    }

    /// User change: writes the bound reference and fires the handler.
    pub fn select(&mut self, index: usize) {
        if index >= self.options.len() {
            return;
        }
        self.index = index;
        if let Some(b) = &self.binding {
            b.write(index);
            self.seen_version = b.version();
        }
        if let Some(f) = &mut self.on_select {
            f(index, &self.options[index]);
        }
    }

    /// Out-of-range values fall back to the first option.
    pub fn set_index_without_notify(&mut self, index: i64) {
        self.index = if self.in_range(index) { index as usize } else { 0 };
    }

    pub fn left_arrow_visible(&self) -> bool {
        !(self.hides_arrow_if_last_option && !self.loops && self.index == 0)
    }

    pub fn right_arrow_visible(&self) -> bool {
        !(self.hides_arrow_if_last_option && !self.loops && self.index + 1 >= self.options.len())
    }

    fn in_range(&self, index: i64) -> bool {
        index >= 0 && (index as usize) < self.options.len()
    }
}

impl Widget for OptionSelect {
    fn key(&self) -> &str {
        &self.key
    }

    fn label(&self) -> String {
        let left = if self.left_arrow_visible() { "<" } else { " " };
        let right = if self.right_arrow_visible() { ">" } else { " " };
        format!("{}: {left} {} {right}", self.display_text, self.selected().unwrap_or(""))
    }

    fn selectable(&self) -> Option<ElementId> {
        Some(self.id)
    }

    fn on_event(&mut self, event: &UiEvent) -> EventResult {
        match event {
            UiEvent::Move(MoveDirection::Left) => self.choose_left(),
            UiEvent::Move(MoveDirection::Right) | UiEvent::Submit => self.choose_right(),
            _ => return EventResult::Ignored,
        }
        EventResult::Consumed
    }

    fn set_palette(&mut self, palette: &PaletteConfig) {
        self.palette = *palette;
    }

    fn refresh(&mut self) {
        let Some(b) = &self.binding else { return };
        let version = b.version();
        if version != self.seen_version {
            let value = b.read();
            self.seen_version = version;
            self.set_index_without_notify(value);
        }
    }

    fn as_any(&self) -> &dyn Any { self }
    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{OptionSelectBuilder, WidgetKind};
    use std::cell::RefCell;
    use std::rc::Rc;

    fn spec(builder: OptionSelectBuilder) -> OptionSelectSpec {
        match builder.build().unwrap().kind {
            WidgetKind::OptionSelect(s) => s,
            _ => unreachable!(),
        }
    }

    fn abc() -> OptionSelect {
        OptionSelect::new("o", vec!["a".into(), "b".into(), "c".into()])
    }

    // ── looping ───────────────────────────────────────────────────────────

    #[test]
    fn looping_wraps_both_ways() {
        let mut o = abc();
        o.on_event(&UiEvent::Move(MoveDirection::Left));
        assert_eq!(o.selected(), Some("c"));
        o.on_event(&UiEvent::Move(MoveDirection::Right));
        assert_eq!(o.selected(), Some("a"));
    }

    #[test]
    fn non_looping_stops_at_ends() {
        let fired = Rc::new(RefCell::new(0));
        let f = fired.clone();
        let mut o = abc().loops(false).on_select(move |_, _| *f.borrow_mut() += 1);
        o.choose_left();
        assert_eq!(o.index(), 0);
        assert_eq!(*fired.borrow(), 0);
        o.choose_right();
        o.choose_right();
        o.choose_right();
        assert_eq!(o.index(), 2);
        assert_eq!(*fired.borrow(), 2);
    }

    #[test]
    fn submit_advances_right() {
        let mut o = abc();
        assert_eq!(o.on_event(&UiEvent::Submit), EventResult::Consumed);
        assert_eq!(o.index(), 1);
    }

    #[test]
    fn vertical_moves_are_navigation() {
        let mut o = abc();
        assert_eq!(o.on_event(&UiEvent::Move(MoveDirection::Down)), EventResult::Ignored);
    }

    // ── arrows ────────────────────────────────────────────────────────────

    #[test]
    fn arrows_hide_at_non_looping_ends() {
        let mut o = abc().loops(false).hides_arrow_if_last_option(true);
        assert!(!o.left_arrow_visible());
        assert!(o.right_arrow_visible());
        o.select(2);
        assert!(o.left_arrow_visible());
        assert!(!o.right_arrow_visible());
    }

    #[test]
    fn arrows_stay_when_looping() {
        let o = abc().hides_arrow_if_last_option(true);
        assert!(o.left_arrow_visible());
        assert!(o.right_arrow_visible());
    }

    // ── bound ─────────────────────────────────────────────────────────────

    #[test]
    fn index_ref_initialises_and_writes_back() {
        let r = ValueRef::new(2);
        let mut o = OptionSelect::from_spec("q", spec(OptionSelectBuilder::bound("q", r.clone()).options(["l", "m", "h"])));
        assert_eq!(o.index(), 2);
        o.choose_right();
        assert_eq!(r.get(), 0);
    }

    #[test]
    fn flag_ref_maps_index_to_bool() {
        let r = ValueRef::new(false);
        let mut o = OptionSelect::from_spec("fs", spec(OptionSelectBuilder::toggle_bound("fs", "Off", "On", r.clone())));
        assert_eq!(o.selected(), Some("Off"));
        o.choose_right();
        assert!(r.get());
        r.set(false);
        o.refresh();
        assert_eq!(o.selected(), Some("Off"));
    }

    #[test]
    fn out_of_range_reference_falls_back_to_first() {
        let r = ValueRef::new(9);
        let o = OptionSelect::from_spec("q", spec(OptionSelectBuilder::bound("q", r).options(["l", "m"])));
        assert_eq!(o.index(), 0);
    }
}
