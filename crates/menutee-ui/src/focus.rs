//! Selection focus shared by every menu in a scene.
//!
//! [`FocusManager`] is the single nullable "currently selected element" slot.
//! Menus read and write it when panels change; the manager's input pass moves
//! it along each element's navigation links.
//!
//! # How focus works
//!
//! 1. The generator **registers** every selectable widget it creates and gives
//!    it a [`Navigation`] (explicit links or automatic).
//! 2. Panels **enable** their elements when shown and disable them when hidden.
//!    Only enabled, registered elements are *live*; disabling the focused
//!    element clears focus.
//! 3. [`FocusManager::navigate`] follows the focused element's link in a
//!    direction, skipping over elements that are not live.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_ELEMENT_ID: AtomicU64 = AtomicU64::new(1);

/// Shared handle to the scene's focus slot.
pub type SharedFocus = Rc<RefCell<FocusManager>>;

// ── ElementId ─────────────────────────────────────────────────────────────

/// Unique identifier for a selectable element.
///
/// Allocated once per live widget via [`ElementId::new()`].
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct ElementId(u64);

impl ElementId {
    /// Allocate a new, globally unique `ElementId`.
    pub fn new() -> Self {
        ElementId(NEXT_ELEMENT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Default for ElementId {
    fn default() -> Self {
        Self::new()
    }
}

// ── MoveDirection ─────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum MoveDirection {
    Up,
    Down,
    Left,
    Right,
}

impl MoveDirection {
    /// The dominant direction of a stick/arrow reading, if either axis is
    /// past `threshold`. `y` is positive up.
    pub fn from_axes(x: f32, y: f32, threshold: f32) -> Option<Self> {
        let (ax, ay) = (x.abs(), y.abs());
        if ax <= threshold && ay <= threshold {
            return None;
        }
        Some(if ax >= ay {
            if x > 0.0 { MoveDirection::Right } else { MoveDirection::Left }
        } else if y > 0.0 {
            MoveDirection::Up
        } else {
            MoveDirection::Down
        })
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, MoveDirection::Up | MoveDirection::Down)
    }
}

// ── Navigation ────────────────────────────────────────────────────────────

/// Explicit neighbours of an element.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub struct NavLinks {
    pub up: Option<ElementId>,
    pub down: Option<ElementId>,
    pub left: Option<ElementId>,
    pub right: Option<ElementId>,
}

impl NavLinks {
    pub fn up(mut self, v: ElementId) -> Self { self.up = Some(v); self }
    pub fn down(mut self, v: ElementId) -> Self { self.down = Some(v); self }
    pub fn left(mut self, v: ElementId) -> Self { self.left = Some(v); self }
    pub fn right(mut self, v: ElementId) -> Self { self.right = Some(v); self }

    pub fn get(&self, dir: MoveDirection) -> Option<ElementId> {
        match dir {
            MoveDirection::Up => self.up,
            MoveDirection::Down => self.down,
            MoveDirection::Left => self.left,
            MoveDirection::Right => self.right,
        }
    }
}

/// How an element finds its neighbour.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Navigation {
    /// Follow these links only.
    Explicit(NavLinks),
    /// Registration order among live elements: up/left go back, down/right go
    /// forward. Crude, but it is what the host would guess without layout.
    Automatic,
}

impl Default for Navigation {
    fn default() -> Self {
        Navigation::Explicit(NavLinks::default())
    }
}

// ── FocusManager ──────────────────────────────────────────────────────────

pub struct FocusManager {
    focused: Option<ElementId>,
    /// Registration order, used by [`Navigation::Automatic`].
    order: Vec<ElementId>,
    navigation: HashMap<ElementId, Navigation>,
    enabled: HashSet<ElementId>,
}

impl FocusManager {
    pub fn new() -> Self {
        Self {
            focused: None,
            order: Vec::new(),
            navigation: HashMap::new(),
            enabled: HashSet::new(),
        }
    }

    pub fn shared(self) -> SharedFocus {
        Rc::new(RefCell::new(self))
    }

    #[inline]
    pub fn current(&self) -> Option<ElementId> {
        self.focused
    }

    #[inline]
    pub fn is_focused(&self, id: ElementId) -> bool {
        self.focused == Some(id)
    }

    /// Sets focus. A dead element cannot take focus; the slot is cleared instead.
    pub fn set_current(&mut self, id: Option<ElementId>) {
        self.focused = match id {
            Some(id) if self.is_live(id) => Some(id),
            Some(id) => {
                log::debug!("focus request for inactive element {id:?} dropped");
                None
            }
            None => None,
        };
    }

    #[inline]
    pub fn clear(&mut self) {
        self.focused = None;
    }

    // ── registration ──────────────────────────────────────────────────────

    /// Registers `id` (disabled, no links). Re-registering is a no-op.
    pub fn register(&mut self, id: ElementId) {
        if !self.navigation.contains_key(&id) {
            self.order.push(id);
            self.navigation.insert(id, Navigation::default());
        }
    }

    pub fn unregister(&mut self, id: ElementId) {
        self.order.retain(|&x| x != id);
        self.navigation.remove(&id);
        self.enabled.remove(&id);
        if self.focused == Some(id) {
            self.focused = None;
        }
    }

    pub fn is_registered(&self, id: ElementId) -> bool {
        self.navigation.contains_key(&id)
    }

    pub fn set_enabled(&mut self, id: ElementId, enabled: bool) {
        if !self.is_registered(id) {
            return;
        }
        if enabled {
            self.enabled.insert(id);
        } else {
            self.enabled.remove(&id);
            if self.focused == Some(id) {
                self.focused = None;
            }
        }
    }

    /// Registered and enabled.
    pub fn is_live(&self, id: ElementId) -> bool {
        self.enabled.contains(&id) && self.is_registered(id)
    }

    // ── navigation ────────────────────────────────────────────────────────

    pub fn set_navigation(&mut self, id: ElementId, nav: Navigation) {
        if let Some(slot) = self.navigation.get_mut(&id) {
            *slot = nav;
        }
    }

    pub fn navigation(&self, id: ElementId) -> Option<Navigation> {
        self.navigation.get(&id).copied()
    }

    /// Sets explicit links for `id`.
    pub fn set_links(&mut self, id: ElementId, links: NavLinks) {
        self.set_navigation(id, Navigation::Explicit(links));
    }

    /// The live neighbour of `from` in `dir`, if any.
    ///
    /// Explicit links skip over dead elements by following their links in the
    /// same direction. Cycles terminate.
    pub fn neighbour(&self, from: ElementId, dir: MoveDirection) -> Option<ElementId> {
        let mut visited = HashSet::new();
        let mut cursor = from;
        loop {
            if !visited.insert(cursor) {
                return None;
            }
            let next = match self.navigation.get(&cursor)? {
                Navigation::Explicit(links) => links.get(dir)?,
                Navigation::Automatic => return self.automatic_neighbour(cursor, dir),
            };
            if next == from {
                return None;
            }
            if self.is_live(next) {
                return Some(next);
            }
            cursor = next;
        }
    }

    /// Moves focus one step in `dir`. Returns the new focus if it moved.
    pub fn navigate(&mut self, dir: MoveDirection) -> Option<ElementId> {
        let from = self.focused?;
        let next = self.neighbour(from, dir)?;
        self.focused = Some(next);
        Some(next)
    }

    fn automatic_neighbour(&self, from: ElementId, dir: MoveDirection) -> Option<ElementId> {
        let live: Vec<ElementId> = self.order.iter().copied().filter(|&id| self.is_live(id)).collect();
        let i = live.iter().position(|&x| x == from)?;
        match dir {
            MoveDirection::Up | MoveDirection::Left => i.checked_sub(1).map(|j| live[j]),
            MoveDirection::Down | MoveDirection::Right => live.get(i + 1).copied(),
        }
    }
}

impl Default for FocusManager {
    fn default() -> Self {
        Self::new()
    }
}
