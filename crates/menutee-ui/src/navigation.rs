//! Navigation wiring between a panel's selectables.
//!
//! - `Vertical`: selectable *i* links up to *i-1* and down to *i+1*.
//! - `Horizontal`: the same on left/right.
//! - `Custom`: the panel's callback gets a [`NavigationCtx`] and does all the linking.
//! - `AutomaticEngine`: no links; [`Navigation::Automatic`] everywhere.
//!
//! Ends do not wrap unless the panel asks for it.

use crate::config::NavigationMode;
use crate::focus::{ElementId, FocusManager, NavLinks, Navigation};
use crate::panel::PanelManager;

/// Applies `mode` to `selectables`. `Custom` is a no-op here; the generator
/// hands custom panels a [`NavigationCtx`] instead.
pub fn wire_navigation(mode: NavigationMode, wrap: bool, selectables: &[ElementId], focus: &mut FocusManager) {
    match mode {
        NavigationMode::Vertical => link_vertical(selectables, wrap, focus),
        NavigationMode::Horizontal => link_horizontal(selectables, wrap, focus),
        NavigationMode::Custom => {}
        NavigationMode::AutomaticEngine => {
            for &id in selectables {
                focus.set_navigation(id, Navigation::Automatic);
            }
        }
    }
}

pub fn link_vertical(selectables: &[ElementId], wrap: bool, focus: &mut FocusManager) {
    for (i, &id) in selectables.iter().enumerate() {
        let (prev, next) = neighbours(selectables, i, wrap);
        focus.set_links(id, NavLinks { up: prev, down: next, ..NavLinks::default() });
    }
}

pub fn link_horizontal(selectables: &[ElementId], wrap: bool, focus: &mut FocusManager) {
    for (i, &id) in selectables.iter().enumerate() {
        let (prev, next) = neighbours(selectables, i, wrap);
        focus.set_links(id, NavLinks { left: prev, right: next, ..NavLinks::default() });
    }
}

fn neighbours(ids: &[ElementId], i: usize, wrap: bool) -> (Option<ElementId>, Option<ElementId>) {
    let n = ids.len();
    if n < 2 {
        return (None, None);
    }
    let prev = match i {
        0 if wrap => Some(ids[n - 1]),
        0 => None,
        _ => Some(ids[i - 1]),
    };
    let next = if i + 1 < n {
        Some(ids[i + 1])
    } else if wrap {
        Some(ids[0])
    } else {
        None
    };
    (prev, next)
}

// ── NavigationCtx ─────────────────────────────────────────────────────────

/// What a custom navigation callback gets to work with: the freshly built
/// panel, its selectables in order, and the focus links.
pub struct NavigationCtx<'a> {
    panel: &'a mut PanelManager,
    selectables: Vec<ElementId>,
    focus: &'a mut FocusManager,
}

impl<'a> NavigationCtx<'a> {
    pub(crate) fn new(panel: &'a mut PanelManager, focus: &'a mut FocusManager) -> Self {
        let selectables = panel.selectables().to_vec();
        Self { panel, selectables, focus }
    }

    pub fn panel(&self) -> &PanelManager {
        &*self.panel
    }

    pub fn selectables(&self) -> &[ElementId] {
        &self.selectables
    }

    /// The selectable of the widget keyed `key`, if it has one.
    pub fn selectable(&self, key: &str) -> Option<ElementId> {
        self.panel.element(key).and_then(|e| e.selectable())
    }

    pub fn set_links(&mut self, id: ElementId, links: NavLinks) {
        self.focus.set_links(id, links);
    }

    /// Adds a selectable the panel did not generate (one the host created
    /// alongside it) so it is enabled with the panel and can take focus.
    pub fn add_selectable(&mut self, id: ElementId) {
        self.focus.register(id);
        self.panel.add_selectable(id);
        if !self.selectables.contains(&id) {
            self.selectables.push(id);
        }
    }

    pub fn link_vertical(&mut self, wrap: bool) {
        link_vertical(&self.selectables, wrap, self.focus);
    }

    pub fn link_horizontal(&mut self, wrap: bool) {
        link_horizontal(&self.selectables, wrap, self.focus);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::focus::MoveDirection;

    fn setup(n: usize) -> (FocusManager, Vec<ElementId>) {
        let mut focus = FocusManager::new();
        let ids: Vec<ElementId> = (0..n).map(|_| ElementId::new()).collect();
        for &id in &ids {
            focus.register(id);
            focus.set_enabled(id, true);
        }
        (focus, ids)
    }

    fn links(focus: &FocusManager, id: ElementId) -> NavLinks {
        match focus.navigation(id) {
            Some(Navigation::Explicit(l)) => l,
            other => panic!("expected explicit links, got {other:?}"),
        }
    }

    #[test]
    fn vertical_links_neighbours_without_wrap() {
        let (mut focus, ids) = setup(3);
        wire_navigation(NavigationMode::Vertical, false, &ids, &mut focus);
        assert_eq!(links(&focus, ids[0]), NavLinks { up: None, down: Some(ids[1]), ..Default::default() });
        assert_eq!(links(&focus, ids[1]).up, Some(ids[0]));
        assert_eq!(links(&focus, ids[1]).down, Some(ids[2]));
        assert_eq!(links(&focus, ids[2]).down, None);
        assert_eq!(links(&focus, ids[1]).left, None);
    }

    #[test]
    fn vertical_wrap_closes_the_loop() {
        let (mut focus, ids) = setup(3);
        wire_navigation(NavigationMode::Vertical, true, &ids, &mut focus);
        assert_eq!(links(&focus, ids[0]).up, Some(ids[2]));
        assert_eq!(links(&focus, ids[2]).down, Some(ids[0]));
    }

    #[test]
    fn horizontal_uses_left_right() {
        let (mut focus, ids) = setup(2);
        wire_navigation(NavigationMode::Horizontal, false, &ids, &mut focus);
        assert_eq!(links(&focus, ids[0]).right, Some(ids[1]));
        assert_eq!(links(&focus, ids[1]).left, Some(ids[0]));
        assert_eq!(links(&focus, ids[0]).down, None);
    }

    #[test]
    fn single_selectable_has_no_links_even_with_wrap() {
        let (mut focus, ids) = setup(1);
        wire_navigation(NavigationMode::Vertical, true, &ids, &mut focus);
        assert_eq!(links(&focus, ids[0]), NavLinks::default());
    }

    #[test]
    fn custom_mode_sets_nothing() {
        let (mut focus, ids) = setup(2);
        wire_navigation(NavigationMode::Custom, false, &ids, &mut focus);
        assert_eq!(links(&focus, ids[0]), NavLinks::default());
    }

    #[test]
    fn automatic_mode_marks_elements() {
        let (mut focus, ids) = setup(2);
        wire_navigation(NavigationMode::AutomaticEngine, false, &ids, &mut focus);
        assert_eq!(focus.navigation(ids[0]), Some(Navigation::Automatic));
        focus.set_current(Some(ids[0]));
        assert_eq!(focus.navigate(MoveDirection::Down), Some(ids[1]));
    }
}
