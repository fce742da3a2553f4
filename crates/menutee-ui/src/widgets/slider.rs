use std::any::Any;

use crate::config::{SliderSpec, ValueSource, widget::SliderHandler};
use crate::event::{EventResult, UiEvent};
use crate::focus::{ElementId, MoveDirection};
use crate::palette::PaletteConfig;
use crate::reference::ValueRef;
use crate::widget::Widget;

/// A horizontal slider for selecting a value in a range.
///
/// Left/right input nudges the value by one step: 1 for whole-number
/// sliders, a tenth of the range otherwise. Up/down is left to navigation.
///
/// # Example
/// ```rust,ignore
/// Slider::new("volume", 0.0, 1.0)
///     .value(0.8)
///     .on_change(|v| mixer.set_master(v))
/// ```
pub struct Slider {
    key: String,
    id: ElementId,
    display_text: String,
    /// Current value (clamped to [min, max], rounded for whole numbers).
    value: f32,
    min: f32,
    max: f32,
    whole_numbers: bool,
    binding: Option<ValueRef<f32>>,
    /// Reference version last seen, so refresh only picks up foreign writes.
    seen_version: u64,
    palette: PaletteConfig,
    on_change: Option<SliderHandler>,
}

impl Slider {
    /// A reversed range is swapped rather than rejected.
    pub fn new(key: impl Into<String>, min: f32, max: f32) -> Self {
        let key = key.into();
        let (min, max) = if min <= max {
            (min, max)
        } else {
            log::warn!("slider `{key}`: min {min} is above max {max}; swapping");
            (max, min)
        };
        Self {
            key,
            id: ElementId::new(),
            display_text: String::new(),
            value: min,
            min,
            max,
            whole_numbers: false,
            binding: None,
            seen_version: 0,
            palette: PaletteConfig::default(),
            on_change: None,
        }
    }

    pub fn from_spec(key: impl Into<String>, spec: SliderSpec) -> Self {
        let initial = spec.value.initial();
        let mut slider = Self::new(key, spec.min, spec.max)
            .text(spec.display_text)
            .whole_numbers(spec.whole_numbers);
        if let ValueSource::Bound(reference) = spec.value {
            slider.seen_version = reference.version();
            slider.binding = Some(reference);
        }
        slider.on_change = spec.on_change;
        slider.set_value_without_notify(initial);
        slider
    }

    pub fn value(mut self, v: f32) -> Self {
        self.set_value_without_notify(v);
        self
    }
    pub fn text(mut self, v: impl Into<String>) -> Self { self.display_text = v.into(); self }
    pub fn whole_numbers(mut self, v: bool) -> Self {
        self.whole_numbers = v;
        self.value = self.normalize(self.value);
        self
    }
    pub fn on_change(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    pub fn current(&self) -> f32 {
        self.value
    }

    pub fn range(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// How far one left/right input moves the value.
    pub fn step(&self) -> f32 {
        if self.whole_numbers { 1.0 } else { (self.max - self.min) / 10.0 }
    }

    /// User change: clamps, writes the bound reference and fires the handler
    /// if the value actually moved.
    pub fn set_value(&mut self, v: f32) {
        let v = self.normalize(v);
        if v == self.value {
            return;
        }
        self.value = v;
        if let Some(r) = &self.binding {
            r.set(v);
            self.seen_version = r.version();
        }
        if let Some(f) = &mut self.on_change {
            f(v);
        }
    }

    pub fn set_value_without_notify(&mut self, v: f32) {
        self.value = self.normalize(v);
    }

    fn normalize(&self, v: f32) -> f32 {
        let v = if v.is_nan() { self.min } else { v.clamp(self.min, self.max) };
        if self.whole_numbers { v.round().clamp(self.min, self.max) } else { v }
    }
}

impl Widget for Slider {
    fn key(&self) -> &str {
        &self.key
    }

    fn label(&self) -> String {
        if self.whole_numbers {
            format!("{}: {:.0}", self.display_text, self.value)
        } else {
            format!("{}: {:.2}", self.display_text, self.value)
        }
    }

    fn selectable(&self) -> Option<ElementId> {
        Some(self.id)
    }

    fn on_event(&mut self, event: &UiEvent) -> EventResult {
        match event {
            UiEvent::Move(MoveDirection::Left) => {
                self.set_value(self.value - self.step());
                EventResult::Consumed
            }
            UiEvent::Move(MoveDirection::Right) => {
                self.set_value(self.value + self.step());
                EventResult::Consumed
            }
            _ => EventResult::Ignored,
        }
    }

    fn set_palette(&mut self, palette: &PaletteConfig) {
        self.palette = *palette;
    }

    fn refresh(&mut self) {
        let Some(r) = &self.binding else { return };
        let version = r.version();
        if version != self.seen_version {
            let v = r.get();
            self.seen_version = version;
            self.set_value_without_notify(v);
        }
    }

    fn as_any(&self) -> &dyn Any { self }
    fn as_any_mut(&mut self) -> &mut dyn Any { self }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SliderBuilder;
    use crate::config::WidgetKind;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn spec(builder: SliderBuilder) -> SliderSpec {
        match builder.build().unwrap().kind {
            WidgetKind::Slider(s) => s,
            _ => unreachable!(),
        }
    }

    // ── stepping ──────────────────────────────────────────────────────────

    #[test]
    fn right_steps_by_tenth_of_range() {
        let mut s = Slider::new("v", 0.0, 1.0).value(0.5);
        s.on_event(&UiEvent::Move(MoveDirection::Right));
        assert!((s.current() - 0.6).abs() < 1e-5);
    }

    #[test]
    fn whole_numbers_step_by_one_and_round() {
        let mut s = Slider::new("n", 0.0, 10.0).whole_numbers(true).value(3.4);
        assert_eq!(s.current(), 3.0);
        s.on_event(&UiEvent::Move(MoveDirection::Left));
        assert_eq!(s.current(), 2.0);
    }

    #[test]
    fn value_is_clamped() {
        let mut s = Slider::new("v", 0.1, 3.0).value(3.0);
        s.on_event(&UiEvent::Move(MoveDirection::Right));
        assert_eq!(s.current(), 3.0);
        s.set_value(-4.0);
        assert_eq!(s.current(), 0.1);
    }

    #[test]
    fn reversed_range_is_swapped() {
        let mut s = Slider::new("s", 1.0, 0.0).value(0.5);
        assert_eq!(s.range(), (0.0, 1.0));
        assert_eq!(s.current(), 0.5);
        s.set_value(4.0);
        assert_eq!(s.current(), 1.0);
    }

    #[test]
    fn vertical_moves_are_navigation() {
        let mut s = Slider::new("v", 0.0, 1.0);
        assert_eq!(s.on_event(&UiEvent::Move(MoveDirection::Up)), EventResult::Ignored);
    }

    // ── handler ───────────────────────────────────────────────────────────

    #[test]
    fn handler_fires_only_on_change() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let s2 = seen.clone();
        let mut s = Slider::new("v", 0.0, 1.0).value(1.0).on_change(move |v| s2.borrow_mut().push(v));
        s.on_event(&UiEvent::Move(MoveDirection::Right));
        assert!(seen.borrow().is_empty());
        s.on_event(&UiEvent::Move(MoveDirection::Left));
        assert_eq!(seen.borrow().len(), 1);
    }

    // ── bound ─────────────────────────────────────────────────────────────

    #[test]
    fn bound_slider_reads_and_writes_reference() {
        let r = ValueRef::new(2.0_f32);
        let mut s = Slider::from_spec("look", spec(SliderBuilder::bound("look", 0.1, 3.0, r.clone())));
        assert_eq!(s.current(), 2.0);
        s.set_value(2.5);
        assert_eq!(r.get(), 2.5);
    }

    #[test]
    fn refresh_follows_external_writes_silently() {
        let r = ValueRef::new(0.5_f32);
        let fired = Rc::new(RefCell::new(0));
        let f2 = fired.clone();
        let mut s = Slider::from_spec(
            "vol",
            spec(SliderBuilder::bound("vol", 0.0, 1.0, r.clone()).on_change(move |_| *f2.borrow_mut() += 1)),
        );
        r.set(0.9);
        s.refresh();
        assert_eq!(s.current(), 0.9);
        assert_eq!(*fired.borrow(), 0);
    }

    #[test]
    fn fixed_default_outside_range_is_clamped() {
        let s = Slider::from_spec("v", spec(SliderBuilder::new("v", 0.0, 1.0, 7.0)));
        assert_eq!(s.current(), 1.0);
    }
}
