//! Turning widget descriptions into live widgets.

use std::collections::HashSet;

use crate::config::{PrefabId, WidgetKind};
use crate::widget::Element;
use crate::widgets::{
    button::Button, dropdown::Dropdown, option_select::OptionSelect, slider::Slider, text::Text,
    toggle::Toggle,
};

/// The panel a widget is being created in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelContainer {
    pub panel_key: String,
    pub prefab: Option<PrefabId>,
}

/// Creates live widgets.
///
/// Returning `None` means the instantiated template lacks the component the
/// kind needs; the generator then leaves the widget inert (never selectable,
/// handler never wired) and carries on.
pub trait WidgetFactory {
    fn create(
        &mut self,
        parent: &PanelContainer,
        key: &str,
        prefab: Option<&PrefabId>,
        kind: WidgetKind,
    ) -> Option<Element>;
}

/// Creates the built-in widgets for every kind.
#[derive(Debug, Default)]
pub struct DefaultWidgetFactory {
    broken: HashSet<PrefabId>,
}

impl DefaultWidgetFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `prefab` as missing its widget component: configs naming it come
    /// out inert.
    pub fn without_component(mut self, prefab: PrefabId) -> Self {
        self.broken.insert(prefab);
        self
    }
}

impl WidgetFactory for DefaultWidgetFactory {
    fn create(
        &mut self,
        _parent: &PanelContainer,
        key: &str,
        prefab: Option<&PrefabId>,
        kind: WidgetKind,
    ) -> Option<Element> {
        if prefab.is_some_and(|p| self.broken.contains(p)) {
            return None;
        }
        Some(match kind {
            WidgetKind::Button(spec) => Element::new(Button::from_spec(key, spec)),
            WidgetKind::Slider(spec) => Element::new(Slider::from_spec(key, spec)),
            WidgetKind::Toggle(spec) => Element::new(Toggle::from_spec(key, spec)),
            WidgetKind::Dropdown(spec) => Element::new(Dropdown::from_spec(key, spec)),
            WidgetKind::OptionSelect(spec) => Element::new(OptionSelect::from_spec(key, spec)),
            WidgetKind::Text(spec) => Element::new(Text::from_spec(key, spec)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ButtonBuilder, SliderBuilder};

    fn container() -> PanelContainer {
        PanelContainer { panel_key: "main".into(), prefab: None }
    }

    #[test]
    fn creates_each_kind() {
        let mut f = DefaultWidgetFactory::new();
        let cfg = SliderBuilder::new("vol", 0.0, 1.0, 0.25).build().unwrap();
        let e = f.create(&container(), "vol", None, cfg.kind).unwrap();
        let slider = e.downcast_ref::<Slider>().unwrap();
        assert_eq!(slider.current(), 0.25);
    }

    #[test]
    fn broken_prefab_yields_nothing() {
        let broken = PrefabId::new("legacy-button");
        let mut f = DefaultWidgetFactory::new().without_component(broken.clone());
        let cfg = ButtonBuilder::new("b").prefab(broken.clone()).build().unwrap();
        assert!(f.create(&container(), "b", Some(&broken), cfg.kind).is_none());
    }
}
