//! Live panel instances.

use crate::config::panel::PanelCallback;
use crate::config::widget::DisplayCallback;
use crate::config::PrefabId;
use crate::event::{EventResult, UiEvent};
use crate::focus::{ElementId, FocusManager};
use crate::widget::Element;

/// A supplemental object as it exists at runtime: shown exactly when its
/// panel is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SupplementalInstance {
    pub name: String,
    pub visible: bool,
}

/// One screen of a live menu: its widgets, their focus handles and the
/// panel's default selectable.
///
/// Owned by the [`crate::manager::MenuManager`] that created it.
pub struct PanelManager {
    key: String,
    prefab: Option<PrefabId>,
    active: bool,
    elements: Vec<Element>,
    /// `(element index, callback)`, run each time the panel is shown.
    widget_display_callbacks: Vec<(usize, DisplayCallback)>,
    /// Widgets the factory could not create.
    inert_keys: Vec<String>,
    supplemental: Vec<SupplementalInstance>,
    selectables: Vec<ElementId>,
    default_input: Option<ElementId>,
    display_callback: Option<PanelCallback>,
}

impl PanelManager {
    pub(crate) fn new(key: impl Into<String>, prefab: Option<PrefabId>) -> Self {
        Self {
            key: key.into(),
            prefab,
            active: false,
            elements: Vec::new(),
            widget_display_callbacks: Vec::new(),
            inert_keys: Vec::new(),
            supplemental: Vec::new(),
            selectables: Vec::new(),
            default_input: None,
            display_callback: None,
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn prefab(&self) -> Option<&PrefabId> {
        self.prefab.as_ref()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    // ── elements ──────────────────────────────────────────────────────────

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn element(&self, key: &str) -> Option<&Element> {
        self.elements.iter().find(|e| e.key() == key)
    }

    pub fn element_mut(&mut self, key: &str) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.key() == key)
    }

    pub fn element_by_id(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.selectable() == Some(id))
    }

    pub fn element_by_id_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.selectable() == Some(id))
    }

    /// `true` if `id` is one of this panel's selectables.
    pub fn contains(&self, id: ElementId) -> bool {
        self.selectables.contains(&id)
    }

    /// Selectables in navigation order.
    pub fn selectables(&self) -> &[ElementId] {
        &self.selectables
    }

    pub fn default_input(&self) -> Option<ElementId> {
        self.default_input
    }

    pub fn set_default_input(&mut self, id: Option<ElementId>) {
        self.default_input = id;
    }

    pub fn inert_keys(&self) -> &[String] {
        &self.inert_keys
    }

    pub fn supplemental(&self) -> &[SupplementalInstance] {
        &self.supplemental
    }

    /// `true` if any widget wants the cancel input for itself right now.
    pub fn consumes_cancel(&self) -> bool {
        self.elements.iter().any(Element::consumes_cancel)
    }

    /// Routes `event` to the element owning `id`.
    pub fn dispatch(&mut self, id: ElementId, event: &UiEvent) -> EventResult {
        match self.element_by_id_mut(id) {
            Some(element) => element.on_event(event),
            None => EventResult::Ignored,
        }
    }

    /// Routes cancel to whichever widgets are consuming it.
    pub fn dispatch_cancel(&mut self) {
        for element in self.elements.iter_mut().filter(|e| e.consumes_cancel()) {
            element.on_event(&UiEvent::Cancel);
        }
    }

    /// Lets every widget pull in external changes.
    pub fn refresh(&mut self) {
        for element in &mut self.elements {
            element.refresh();
        }
    }

    // ── visibility ────────────────────────────────────────────────────────

    /// Shows or hides the panel. Showing enables its selectables in `focus`
    /// and runs the display callbacks; hiding disables them.
    pub fn set_panel_active(&mut self, active: bool, focus: &mut FocusManager) {
        let was_active = self.active;
        self.active = active;
        for &id in &self.selectables {
            focus.set_enabled(id, active);
        }
        for object in &mut self.supplemental {
            object.visible = active;
        }
        if active && !was_active {
            log::debug!("panel `{}` shown", self.key);
            for (index, callback) in &mut self.widget_display_callbacks {
                if let Some(element) = self.elements.get_mut(*index) {
                    callback(element);
                }
            }
            if let Some(mut callback) = self.display_callback.take() {
                callback(self);
                self.display_callback = Some(callback);
            }
        }
    }

    // ── assembly (generator only) ─────────────────────────────────────────

    pub(crate) fn push_element(&mut self, element: Element, display: Option<DisplayCallback>) {
        if let Some(id) = element.selectable() {
            self.selectables.push(id);
        }
        if let Some(display) = display {
            self.widget_display_callbacks.push((self.elements.len(), display));
        }
        self.elements.push(element);
    }

    pub(crate) fn mark_inert(&mut self, key: &str) {
        self.inert_keys.push(key.to_string());
    }

    pub(crate) fn add_supplemental(&mut self, name: &str) {
        self.supplemental.push(SupplementalInstance { name: name.to_string(), visible: false });
    }

    pub(crate) fn set_display_callback(&mut self, callback: Option<PanelCallback>) {
        self.display_callback = callback;
    }

    pub(crate) fn add_selectable(&mut self, id: ElementId) {
        if !self.selectables.contains(&id) {
            self.selectables.push(id);
        }
    }
}
