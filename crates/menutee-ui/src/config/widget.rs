//! Widget descriptors.
//!
//! Every widget kind is described by a spec record (`ButtonSpec`,
//! `SliderSpec`, ...) wrapped in one generic [`WidgetBuilder`]. The common
//! fields (key, prefab, callbacks, palette override) live in [`WidgetInit`] and
//! are set through methods every builder shares; kind-specific setters live on
//! the per-kind `impl WidgetBuilder<...>` blocks.
//!
//! Slider, toggle and option select can also be *bound* to a [`ValueRef`]:
//! the widget then takes its initial value from the reference and writes
//! every change back into it.

use crate::error::ConfigError;
use crate::palette::PaletteConfig;
use crate::reference::ValueRef;
use crate::widget::Element;

use super::PrefabId;

pub type CreationCallback = Box<dyn FnOnce(&mut Element)>;
pub type DisplayCallback = Box<dyn FnMut(&mut Element)>;

pub type PressHandler = Box<dyn FnMut()>;
pub type SliderHandler = Box<dyn FnMut(f32)>;
pub type ToggleHandler = Box<dyn FnMut(bool)>;
/// Receives the chosen index and its option text.
pub type ChoiceHandler = Box<dyn FnMut(usize, &str)>;

// ── common fields ─────────────────────────────────────────────────────────

/// Fields every widget kind shares.
pub struct WidgetInit {
    pub key: String,
    pub prefab: Option<PrefabId>,
    /// Run once, right after the widget is created.
    pub creation_callback: Option<CreationCallback>,
    /// Run every time the widget's panel is shown.
    pub display_callback: Option<DisplayCallback>,
    /// Replaces the menu palette for this widget only.
    pub palette_override: Option<PaletteConfig>,
}

impl WidgetInit {
    fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            prefab: None,
            creation_callback: None,
            display_callback: None,
            palette_override: None,
        }
    }
}

// ── value sources ─────────────────────────────────────────────────────────

/// Where a widget's value comes from.
pub enum ValueSource<T> {
    Fixed(T),
    Bound(ValueRef<T>),
}

impl<T: Clone> ValueSource<T> {
    /// The value the widget starts with.
    pub fn initial(&self) -> T {
        match self {
            ValueSource::Fixed(v) => v.clone(),
            ValueSource::Bound(r) => r.get(),
        }
    }

    pub fn is_bound(&self) -> bool {
        matches!(self, ValueSource::Bound(_))
    }
}

/// The selected option of an option select.
pub enum OptionValue {
    Index(usize),
    /// Index stored in a shared integer.
    IndexRef(ValueRef<i32>),
    /// Two-option selector (off, on) stored in a shared flag.
    FlagRef(ValueRef<bool>),
}

impl OptionValue {
    pub fn initial_index(&self) -> i64 {
        match self {
            OptionValue::Index(i) => *i as i64,
            OptionValue::IndexRef(r) => r.get() as i64,
            OptionValue::FlagRef(r) => r.get() as i64,
        }
    }

    pub fn is_bound(&self) -> bool {
        !matches!(self, OptionValue::Index(_))
    }
}

// ── specs ─────────────────────────────────────────────────────────────────

pub struct ButtonSpec {
    pub text: String,
    pub on_press: Option<PressHandler>,
}

pub struct SliderSpec {
    pub display_text: String,
    pub min: f32,
    pub max: f32,
    pub whole_numbers: bool,
    pub value: ValueSource<f32>,
    pub on_change: Option<SliderHandler>,
}

pub struct ToggleSpec {
    pub display_text: String,
    pub value: ValueSource<bool>,
    pub on_change: Option<ToggleHandler>,
}

pub struct DropdownSpec {
    pub display_text: String,
    pub options: Vec<String>,
    pub default_index: usize,
    pub on_choose: Option<ChoiceHandler>,
}

pub struct OptionSelectSpec {
    pub display_text: String,
    pub options: Vec<String>,
    pub value: OptionValue,
    /// Stepping past either end wraps around.
    pub loops: bool,
    /// Report the arrow on a non-looping end as hidden.
    pub hides_arrow_if_last_option: bool,
    pub on_select: Option<ChoiceHandler>,
}

pub struct TextSpec {
    pub text: String,
}

/// The kind-specific half of a [`WidgetConfig`].
pub enum WidgetKind {
    Button(ButtonSpec),
    Slider(SliderSpec),
    Toggle(ToggleSpec),
    Dropdown(DropdownSpec),
    OptionSelect(OptionSelectSpec),
    Text(TextSpec),
}

impl WidgetKind {
    pub fn name(&self) -> &'static str {
        match self {
            WidgetKind::Button(_) => "button",
            WidgetKind::Slider(_) => "slider",
            WidgetKind::Toggle(_) => "toggle",
            WidgetKind::Dropdown(_) => "dropdown",
            WidgetKind::OptionSelect(_) => "option select",
            WidgetKind::Text(_) => "text",
        }
    }

    /// `true` for the Ref variants.
    pub fn is_reference_bound(&self) -> bool {
        match self {
            WidgetKind::Slider(s) => s.value.is_bound(),
            WidgetKind::Toggle(s) => s.value.is_bound(),
            WidgetKind::OptionSelect(s) => s.value.is_bound(),
            _ => false,
        }
    }
}

/// A validated widget description.
pub struct WidgetConfig {
    pub init: WidgetInit,
    pub kind: WidgetKind,
}

impl WidgetConfig {
    pub fn key(&self) -> &str {
        &self.init.key
    }
}

// ── WidgetSpec ────────────────────────────────────────────────────────────

/// A spec record [`WidgetBuilder`] can build.
pub trait WidgetSpec {
    fn validate(&self, key: &str) -> Result<(), ConfigError>;
    fn into_kind(self) -> WidgetKind;
}

impl WidgetSpec for ButtonSpec {
    fn validate(&self, _key: &str) -> Result<(), ConfigError> { Ok(()) }
    fn into_kind(self) -> WidgetKind { WidgetKind::Button(self) }
}

impl WidgetSpec for SliderSpec {
    fn validate(&self, key: &str) -> Result<(), ConfigError> {
        // NaN bounds fail this too.
        if self.min <= self.max {
            Ok(())
        } else {
            Err(ConfigError::InvalidRange { key: key.to_string(), min: self.min, max: self.max })
        }
    }
    fn into_kind(self) -> WidgetKind { WidgetKind::Slider(self) }
}

impl WidgetSpec for ToggleSpec {
    fn validate(&self, _key: &str) -> Result<(), ConfigError> { Ok(()) }
    fn into_kind(self) -> WidgetKind { WidgetKind::Toggle(self) }
}

impl WidgetSpec for DropdownSpec {
    fn validate(&self, key: &str) -> Result<(), ConfigError> {
        let len = self.options.len();
        if self.default_index < len.max(1) {
            Ok(())
        } else {
            Err(ConfigError::DefaultIndexOutOfRange { key: key.to_string(), index: self.default_index, len })
        }
    }
    fn into_kind(self) -> WidgetKind { WidgetKind::Dropdown(self) }
}

impl WidgetSpec for OptionSelectSpec {
    fn validate(&self, key: &str) -> Result<(), ConfigError> {
        if self.options.is_empty() {
            return Err(ConfigError::EmptyOptions { key: key.to_string() });
        }
        if let OptionValue::Index(index) = self.value {
            if index >= self.options.len() {
                return Err(ConfigError::DefaultIndexOutOfRange {
                    key: key.to_string(),
                    index,
                    len: self.options.len(),
                });
            }
        }
        Ok(())
    }
    fn into_kind(self) -> WidgetKind { WidgetKind::OptionSelect(self) }
}

impl WidgetSpec for TextSpec {
    fn validate(&self, _key: &str) -> Result<(), ConfigError> { Ok(()) }
    fn into_kind(self) -> WidgetKind { WidgetKind::Text(self) }
}

// ── WidgetBuilder ─────────────────────────────────────────────────────────

/// Accumulates a widget description; validates in [`build`](Self::build).
pub struct WidgetBuilder<S> {
    init: WidgetInit,
    spec: S,
}

pub type ButtonBuilder = WidgetBuilder<ButtonSpec>;
pub type SliderBuilder = WidgetBuilder<SliderSpec>;
pub type ToggleBuilder = WidgetBuilder<ToggleSpec>;
pub type DropdownBuilder = WidgetBuilder<DropdownSpec>;
pub type OptionSelectBuilder = WidgetBuilder<OptionSelectSpec>;
pub type TextBuilder = WidgetBuilder<TextSpec>;

impl<S> WidgetBuilder<S> {
    fn with_spec(key: impl Into<String>, spec: S) -> Self {
        Self { init: WidgetInit::new(key), spec }
    }

    pub fn key(&self) -> &str {
        &self.init.key
    }

    pub fn prefab(mut self, prefab: PrefabId) -> Self {
        self.init.prefab = Some(prefab);
        self
    }

    pub fn palette_override(mut self, palette: PaletteConfig) -> Self {
        self.init.palette_override = Some(palette);
        self
    }

    pub fn on_create(mut self, f: impl FnOnce(&mut Element) + 'static) -> Self {
        self.init.creation_callback = Some(Box::new(f));
        self
    }

    pub fn on_display(mut self, f: impl FnMut(&mut Element) + 'static) -> Self {
        self.init.display_callback = Some(Box::new(f));
        self
    }
}

impl<S: WidgetSpec> WidgetBuilder<S> {
    pub fn build(self) -> Result<WidgetConfig, ConfigError> {
        if self.init.key.is_empty() {
            return Err(ConfigError::EmptyKey { what: "widget" });
        }
        self.spec.validate(&self.init.key)?;
        Ok(WidgetConfig { init: self.init, kind: self.spec.into_kind() })
    }
}

impl WidgetBuilder<ButtonSpec> {
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_spec(key, ButtonSpec { text: String::new(), on_press: None })
    }

    pub fn text(mut self, v: impl Into<String>) -> Self { self.spec.text = v.into(); self }
    pub fn on_press(mut self, f: impl FnMut() + 'static) -> Self {
        self.spec.on_press = Some(Box::new(f));
        self
    }
}

impl WidgetBuilder<SliderSpec> {
    pub fn new(key: impl Into<String>, min: f32, max: f32, default: f32) -> Self {
        Self::slider(key, min, max, ValueSource::Fixed(default))
    }

    /// A slider reading and writing `reference`.
    pub fn bound(key: impl Into<String>, min: f32, max: f32, reference: ValueRef<f32>) -> Self {
        Self::slider(key, min, max, ValueSource::Bound(reference))
    }

    fn slider(key: impl Into<String>, min: f32, max: f32, value: ValueSource<f32>) -> Self {
        Self::with_spec(
            key,
            SliderSpec { display_text: String::new(), min, max, whole_numbers: false, value, on_change: None },
        )
    }

    pub fn text(mut self, v: impl Into<String>) -> Self { self.spec.display_text = v.into(); self }
    pub fn whole_numbers(mut self, v: bool) -> Self { self.spec.whole_numbers = v; self }
    pub fn on_change(mut self, f: impl FnMut(f32) + 'static) -> Self {
        self.spec.on_change = Some(Box::new(f));
        self
    }
}

impl WidgetBuilder<ToggleSpec> {
    pub fn new(key: impl Into<String>, is_on: bool) -> Self {
        Self::with_spec(key, ToggleSpec { display_text: String::new(), value: ValueSource::Fixed(is_on), on_change: None })
    }

    /// A toggle reading and writing `reference`.
    pub fn bound(key: impl Into<String>, reference: ValueRef<bool>) -> Self {
        Self::with_spec(key, ToggleSpec { display_text: String::new(), value: ValueSource::Bound(reference), on_change: None })
    }

    pub fn text(mut self, v: impl Into<String>) -> Self { self.spec.display_text = v.into(); self }
    pub fn on_change(mut self, f: impl FnMut(bool) + 'static) -> Self {
        self.spec.on_change = Some(Box::new(f));
        self
    }
}

impl WidgetBuilder<DropdownSpec> {
    pub fn new(key: impl Into<String>) -> Self {
        Self::with_spec(key, DropdownSpec { display_text: String::new(), options: Vec::new(), default_index: 0, on_choose: None })
    }

    pub fn text(mut self, v: impl Into<String>) -> Self { self.spec.display_text = v.into(); self }

    /// Appends an option; `default` makes it the initial choice.
    pub fn option(mut self, text: impl Into<String>, default: bool) -> Self {
        if default {
            self.spec.default_index = self.spec.options.len();
        }
        self.spec.options.push(text.into());
        self
    }

    pub fn options<I, T>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.spec.options.extend(options.into_iter().map(Into::into));
        self
    }

    pub fn default_index(mut self, v: usize) -> Self { self.spec.default_index = v; self }
    pub fn on_choose(mut self, f: impl FnMut(usize, &str) + 'static) -> Self {
        self.spec.on_choose = Some(Box::new(f));
        self
    }
}

impl WidgetBuilder<OptionSelectSpec> {
    pub fn new(key: impl Into<String>) -> Self {
        Self::option_select(key, Vec::new(), OptionValue::Index(0))
    }

    /// An option select whose index lives in `reference`.
    pub fn bound(key: impl Into<String>, reference: ValueRef<i32>) -> Self {
        Self::option_select(key, Vec::new(), OptionValue::IndexRef(reference))
    }

    /// A two-option (`off_text`, `on_text`) selector over a shared flag.
    pub fn toggle_bound(
        key: impl Into<String>,
        off_text: impl Into<String>,
        on_text: impl Into<String>,
        reference: ValueRef<bool>,
    ) -> Self {
        Self::option_select(key, vec![off_text.into(), on_text.into()], OptionValue::FlagRef(reference))
    }

    fn option_select(key: impl Into<String>, options: Vec<String>, value: OptionValue) -> Self {
        Self::with_spec(
            key,
            OptionSelectSpec {
                display_text: String::new(),
                options,
                value,
                loops: true,
                hides_arrow_if_last_option: false,
                on_select: None,
            },
        )
    }

    pub fn text(mut self, v: impl Into<String>) -> Self { self.spec.display_text = v.into(); self }
    pub fn loops(mut self, v: bool) -> Self { self.spec.loops = v; self }
    pub fn hides_arrow_if_last_option(mut self, v: bool) -> Self { self.spec.hides_arrow_if_last_option = v; self }

    /// Appends an option; `default` makes it the initial choice (fixed index only).
    pub fn option(mut self, text: impl Into<String>, default: bool) -> Self {
        if default {
            if let OptionValue::Index(_) = self.spec.value {
                self.spec.value = OptionValue::Index(self.spec.options.len());
            }
        }
        self.spec.options.push(text.into());
        self
    }

    pub fn options<I, T>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.spec.options.extend(options.into_iter().map(Into::into));
        self
    }

    pub fn default_index(mut self, v: usize) -> Self {
        self.spec.value = OptionValue::Index(v);
        self
    }

    pub fn on_select(mut self, f: impl FnMut(usize, &str) + 'static) -> Self {
        self.spec.on_select = Some(Box::new(f));
        self
    }

    /// Handler for two-option selectors: receives `true` for the second option.
    pub fn on_toggle(mut self, mut f: impl FnMut(bool) + 'static) -> Self {
        self.spec.on_select = Some(Box::new(move |index, _| f(index == 1)));
        self
    }
}

impl WidgetBuilder<TextSpec> {
    pub fn new(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self::with_spec(key, TextSpec { text: text.into() })
    }
}

// ── IntoWidgetConfig ──────────────────────────────────────────────────────

/// Anything a panel builder accepts as a widget: a finished config or a
/// builder that is built when the panel is.
pub trait IntoWidgetConfig {
    fn into_widget_config(self) -> Result<WidgetConfig, ConfigError>;
}

impl IntoWidgetConfig for WidgetConfig {
    fn into_widget_config(self) -> Result<WidgetConfig, ConfigError> {
        Ok(self)
    }
}

impl<S: WidgetSpec> IntoWidgetConfig for WidgetBuilder<S> {
    fn into_widget_config(self) -> Result<WidgetConfig, ConfigError> {
        self.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── defaults ──────────────────────────────────────────────────────────

    #[test]
    fn button_builds() {
        let cfg = ButtonBuilder::new("resume").text("Resume").build().unwrap();
        assert_eq!(cfg.key(), "resume");
        assert!(matches!(cfg.kind, WidgetKind::Button(ref b) if b.text == "Resume"));
    }

    #[test]
    fn empty_key_rejected() {
        let err = TextBuilder::new("", "hi").build().err();
        assert_eq!(err, Some(ConfigError::EmptyKey { what: "widget" }));
    }

    #[test]
    fn option_default_flag_sets_index() {
        let cfg = OptionSelectBuilder::new("q")
            .option("low", false)
            .option("mid", true)
            .option("high", false)
            .build()
            .unwrap();
        let WidgetKind::OptionSelect(spec) = cfg.kind else { panic!("wrong kind") };
        assert_eq!(spec.value.initial_index(), 1);
        assert!(spec.loops);
    }

    #[test]
    fn dropdown_default_flag_sets_index() {
        let cfg = DropdownBuilder::new("d").option("a", false).option("b", true).build().unwrap();
        let WidgetKind::Dropdown(spec) = cfg.kind else { panic!("wrong kind") };
        assert_eq!(spec.default_index, 1);
    }

    // ── validation ────────────────────────────────────────────────────────

    #[test]
    fn slider_inverted_range_rejected() {
        let err = SliderBuilder::new("s", 1.0, 0.0, 0.5).build().err();
        assert!(matches!(err, Some(ConfigError::InvalidRange { .. })));
    }

    #[test]
    fn option_select_needs_options() {
        let err = OptionSelectBuilder::new("o").build().err();
        assert_eq!(err, Some(ConfigError::EmptyOptions { key: "o".into() }));
    }

    #[test]
    fn option_select_index_checked() {
        let err = OptionSelectBuilder::new("o").options(["a", "b"]).default_index(2).build().err();
        assert!(matches!(err, Some(ConfigError::DefaultIndexOutOfRange { index: 2, len: 2, .. })));
    }

    #[test]
    fn empty_dropdown_allowed_at_zero() {
        assert!(DropdownBuilder::new("d").build().is_ok());
        assert!(DropdownBuilder::new("d").default_index(1).build().is_err());
    }

    // ── bound variants ────────────────────────────────────────────────────

    #[test]
    fn bound_variants_report_reference() {
        let r = ValueRef::new(0.3_f32);
        let cfg = SliderBuilder::bound("look", 0.1, 3.0, r.clone()).build().unwrap();
        assert!(cfg.kind.is_reference_bound());
        let WidgetKind::Slider(spec) = cfg.kind else { panic!("wrong kind") };
        r.set(2.0);
        assert_eq!(spec.value.initial(), 2.0);
    }

    #[test]
    fn toggle_bound_option_select_has_two_options() {
        let flag = ValueRef::new(true);
        let cfg = OptionSelectBuilder::toggle_bound("fs", "Off", "On", flag).build().unwrap();
        let WidgetKind::OptionSelect(spec) = cfg.kind else { panic!("wrong kind") };
        assert_eq!(spec.options, vec!["Off", "On"]);
        assert_eq!(spec.value.initial_index(), 1);
    }

    #[test]
    fn on_toggle_maps_second_option_to_true() {
        use std::cell::Cell;
        use std::rc::Rc;
        let seen = Rc::new(Cell::new(false));
        let s = seen.clone();
        let cfg = OptionSelectBuilder::new("o")
            .options(["off", "on"])
            .on_toggle(move |on| s.set(on))
            .build()
            .unwrap();
        let WidgetKind::OptionSelect(mut spec) = cfg.kind else { panic!("wrong kind") };
        (spec.on_select.as_mut().unwrap())(1, "on");
        assert!(seen.get());
    }
}
