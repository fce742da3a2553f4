use std::any::Any;

use crate::config::{ToggleSpec, ValueSource, widget::ToggleHandler};
use crate::event::{EventResult, UiEvent};
use crate::focus::ElementId;
use crate::palette::PaletteConfig;
use crate::reference::ValueRef;
use crate::widget::Widget;

/// An on/off toggle. Submit flips it.
///
/// # Example
/// ```rust,ignore
/// Toggle::new("fullscreen").checked(true).on_change(|v| window.set_fullscreen(v))
/// ```
pub struct Toggle {
    key: String,
    id: ElementId,
    display_text: String,
    checked: bool,
    binding: Option<ValueRef<bool>>,
    seen_version: u64,
    palette: PaletteConfig,
    on_change: Option<ToggleHandler>,
}

impl Toggle {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            id: ElementId::new(),
            display_text: String::new(),
            checked: false,
            binding: None,
            seen_version: 0,
            palette: PaletteConfig::default(),
            on_change: None,
        }
    }

    pub fn from_spec(key: impl Into<String>, spec: ToggleSpec) -> Self {
        let mut toggle = Self::new(key).text(spec.display_text).checked(spec.value.initial());
        if let ValueSource::Bound(reference) = spec.value {
            toggle.seen_version = reference.version();
            toggle.binding = Some(reference);
        }
        toggle.on_change = spec.on_change;
        toggle
    }

    pub fn checked(mut self, v: bool) -> Self { self.checked = v; self }
    pub fn text(mut self, v: impl Into<String>) -> Self { self.display_text = v.into(); self }
    pub fn on_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn is_on(&self) -> bool {
        self.checked
    }

    /// User change: writes the bound reference and fires the handler.
    pub fn set_on(&mut self, on: bool) {
        if on == self.checked {
            return;
        }
        self.checked = on;
        if let Some(r) = &self.binding {
            r.set(on);
            self.seen_version = r.version();
        }
        if let Some(f) = &mut self.on_change {
            f(on);
        }
    }

    pub fn set_on_without_notify(&mut self, on: bool) {
        self.checked = on;
    }
}

impl Widget for Toggle {
    fn key(&self) -> &str {
        &self.key
    }

    fn label(&self) -> String {
        format!("{}: {}", self.display_text, if self.checked { "On" } else { "Off" })
    }

    fn selectable(&self) -> Option<ElementId> {
        Some(self.id)
    }

    fn on_event(&mut self, event: &UiEvent) -> EventResult {
        if *event == UiEvent::Submit {
            self.set_on(!self.checked);
            return EventResult::Consumed;
        }
        EventResult::Ignored
    }

    fn set_palette(&mut self, palette: &PaletteConfig) {
        self.palette = *palette;
    }

    fn refresh(&mut self) {
        let Some(r) = &self.binding else { return };
        let version = r.version();
        if version != self.seen_version {
            self.checked = r.get();
            self.seen_version = version;
        }
    }

    fn as_any(&self) -> &dyn Any { self }
    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ToggleBuilder, WidgetKind};
    use std::cell::Cell;
    use std::rc::Rc;

    fn spec(builder: ToggleBuilder) -> ToggleSpec {
        match builder.build().unwrap().kind {
            WidgetKind::Toggle(s) => s,
            _ => unreachable!(),
        }
    }

    #[test]
    fn submit_flips_and_notifies() {
        let last = Rc::new(Cell::new(None));
        let l = last.clone();
        let mut t = Toggle::new("fs").on_change(move |v| l.set(Some(v)));
        t.on_event(&UiEvent::Submit);
        assert!(t.is_on());
        assert_eq!(last.get(), Some(true));
        t.on_event(&UiEvent::Submit);
        assert_eq!(last.get(), Some(false));
    }

    #[test]
    fn bound_toggle_round_trips_through_reference() {
        let r = ValueRef::new(true);
        let mut t = Toggle::from_spec("fs", spec(ToggleBuilder::bound("fs", r.clone())));
        assert!(t.is_on());
        t.on_event(&UiEvent::Submit);
        assert!(!r.get());
        r.set(true);
        t.refresh();
        assert!(t.is_on());
    }

    #[test]
    fn label_shows_state() {
        let t = Toggle::new("fs").text("Fullscreen").checked(true);
        assert_eq!(t.label(), "Fullscreen: On");
    }
}
