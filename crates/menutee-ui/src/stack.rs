//! The modal menu stack.
//!
//! [`MenuStack`] is the single owner of cursor lock, cursor visibility, game
//! time scale and pause state while menus are open. Every push snapshots the
//! current state; every pop restores the matching snapshot, so strictly nested
//! push/pop pairs always leave the host exactly as they found it.
//!
//! Only the top menu is "on top": it receives input and visual focus. A menu
//! buried in the stack cannot be popped or toggled until everything above it
//! has been removed.

use std::cell::RefCell;
use std::rc::Rc;

use menutee_engine::core::{CursorLockMode, HostControls};

use crate::attributes::MenuAttributes;
use crate::menu::{same_menu, Menu, MenuRef};

/// Shared handle to the scene's stack.
pub type SharedStack = Rc<RefCell<MenuStack>>;

type PauseListener = Box<dyn FnMut()>;

// ── MenuStackSettings ─────────────────────────────────────────────────────

/// Construction-time behaviour of a [`MenuStack`].
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MenuStackSettings {
    /// Cursor lock applied when the stack is created.
    pub default_lock_mode: CursorLockMode,
    /// Cursor visibility applied when the stack is created.
    pub default_cursor_visible: bool,
    /// Leave the cursor alone entirely (the host manages it).
    pub disable_cursor_management: bool,
    /// Leave the time scale alone entirely (the host manages it).
    pub disable_time_management: bool,
}

impl MenuStackSettings {
    pub fn default_lock_mode(mut self, v: CursorLockMode) -> Self { self.default_lock_mode = v; self }
    pub fn default_cursor_visible(mut self, v: bool) -> Self { self.default_cursor_visible = v; self }
    pub fn disable_cursor_management(mut self, v: bool) -> Self { self.disable_cursor_management = v; self }
    pub fn disable_time_management(mut self, v: bool) -> Self { self.disable_time_management = v; self }
}

impl Default for MenuStackSettings {
    fn default() -> Self {
        Self {
            default_lock_mode: CursorLockMode::Locked,
            default_cursor_visible: false,
            disable_cursor_management: false,
            disable_time_management: false,
        }
    }
}

// ── MenuStack ─────────────────────────────────────────────────────────────

/// Ordered stack of open menus plus the attribute snapshots that undo them.
///
/// `menus.len() == cached_attributes.len()` at all times.
pub struct MenuStack {
    settings: MenuStackSettings,
    host: Box<dyn HostControls>,
    menus: Vec<MenuRef>,
    cached_attributes: Vec<MenuAttributes>,
    paused: bool,
    on_pause: Vec<PauseListener>,
    on_unpause: Vec<PauseListener>,
}

impl MenuStack {
    /// Creates an empty stack and applies the default cursor state and a
    /// real-time clock to `host`.
    pub fn new(settings: MenuStackSettings, host: impl HostControls + 'static) -> Self {
        let mut stack = Self {
            settings,
            host: Box::new(host),
            menus: Vec::new(),
            cached_attributes: Vec::new(),
            paused: false,
            on_pause: Vec::new(),
            on_unpause: Vec::new(),
        };
        stack.set_cursor(settings.default_lock_mode, settings.default_cursor_visible);
        if !settings.disable_time_management {
            stack.host.set_time_scale(1.0);
        }
        stack
    }

    /// Wraps the stack in the shared handle menus hold.
    pub fn shared(self) -> SharedStack {
        Rc::new(RefCell::new(self))
    }

    pub fn settings(&self) -> &MenuStackSettings {
        &self.settings
    }

    pub fn host(&self) -> &dyn HostControls {
        self.host.as_ref()
    }

    pub fn host_mut(&mut self) -> &mut dyn HostControls {
        self.host.as_mut()
    }

    /// Whether the top menu (if any) pauses the game.
    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Called once on every unpaused → paused transition.
    pub fn add_pause_listener(&mut self, f: impl FnMut() + 'static) {
        self.on_pause.push(Box::new(f));
    }

    /// Called once on every paused → unpaused transition.
    pub fn add_unpause_listener(&mut self, f: impl FnMut() + 'static) {
        self.on_unpause.push(Box::new(f));
    }

    // ── queries ───────────────────────────────────────────────────────────

    pub fn stack_size(&self) -> usize {
        self.menus.len()
    }

    pub fn is_empty(&self) -> bool {
        self.menus.is_empty()
    }

    pub fn is_menu_in_stack(&self, menu: &MenuRef) -> bool {
        self.menus.iter().any(|m| same_menu(m, menu))
    }

    /// Same as [`is_menu_in_stack`](Self::is_menu_in_stack): a stacked menu is "up".
    pub fn is_menu_up(&self, menu: &MenuRef) -> bool {
        self.is_menu_in_stack(menu)
    }

    /// `false` on an empty stack.
    pub fn is_menu_at_top(&self, menu: &MenuRef) -> bool {
        self.menus.last().is_some_and(|top| same_menu(top, menu))
    }

    pub fn top(&self) -> Option<MenuRef> {
        self.menus.last().cloned()
    }

    // ── transitions ───────────────────────────────────────────────────────

    /// Pushes `menu` if it is not stacked, pops it if it is on top, and does
    /// nothing if it is buried.
    pub fn toggle_menu(&mut self, menu: &MenuRef) {
        if !self.is_menu_in_stack(menu) {
            self.push_and_show_menu(menu);
        } else if self.is_menu_at_top(menu) {
            self.pop_and_close_menu(menu);
        } else {
            log::debug!("toggle ignored: menu is buried under {} other menu(s)", self.buried_depth(menu));
        }
    }

    /// Pushes `menu` on top and applies its attributes.
    ///
    /// Returns `false` (and changes nothing) if the menu is already stacked.
    pub fn push_and_show_menu(&mut self, menu: &MenuRef) -> bool {
        if self.is_menu_in_stack(menu) {
            log::warn!("push refused: menu is already in the stack (depth {})", self.menus.len());
            return false;
        }

        let snapshot = self.current_attributes();
        self.cached_attributes.push(snapshot);

        if let Some(top) = self.menus.last().cloned() {
            notify(&top, |m| m.set_menu_on_top(false));
        }

        self.menus.push(menu.clone());
        let attributes = match menu.try_borrow() {
            Ok(m) => m.menu_attributes(),
            Err(_) => {
                log::warn!("menu busy while reading its attributes; using the current host state");
                snapshot
            }
        };
        self.apply_attributes(attributes);

        notify(menu, |m| m.set_menu_up(true));
        notify(menu, |m| m.set_menu_on_top(true));
        log::debug!("menu pushed (depth {})", self.menus.len());
        true
    }

    /// Pops `menu`, which must be the top, and restores the state from
    /// before its push.
    pub fn pop_and_close_menu(&mut self, menu: &MenuRef) -> bool {
        if self.menus.is_empty() {
            log::warn!("pop refused: the menu stack is empty");
            return false;
        }
        if !self.is_menu_at_top(menu) {
            log::warn!("pop refused: menu is not on top of the stack");
            return false;
        }

        if let Some(previous) = self.cached_attributes.pop() {
            self.apply_attributes(previous);
        }
        let popped = self.menus.pop();

        if let Some(popped) = popped {
            notify(&popped, |m| m.set_menu_on_top(false));
            notify(&popped, |m| m.set_menu_up(false));
        }
        if let Some(top) = self.menus.last().cloned() {
            notify(&top, |m| m.set_menu_on_top(true));
        }
        log::debug!("menu popped (depth {})", self.menus.len());
        true
    }

    /// Replaces the top menu `current` with `new`.
    ///
    /// Fails without side effects if `current` is not on top or `new` is
    /// already stacked.
    pub fn pop_and_push_menu(&mut self, current: &MenuRef, new: &MenuRef) -> bool {
        if !self.is_menu_at_top(current) {
            log::warn!("replace refused: current menu is not on top of the stack");
            return false;
        }
        if self.is_menu_in_stack(new) {
            log::warn!("replace refused: new menu is already in the stack");
            return false;
        }
        self.pop_and_close_menu(current) && self.push_and_show_menu(new)
    }

    // ── helpers ───────────────────────────────────────────────────────────

    fn buried_depth(&self, menu: &MenuRef) -> usize {
        self.menus
            .iter()
            .rposition(|m| same_menu(m, menu))
            .map_or(0, |i| self.menus.len() - 1 - i)
    }

    fn current_attributes(&self) -> MenuAttributes {
        MenuAttributes {
            cursor_lock_mode: self.host.cursor_lock_mode(),
            cursor_visible: self.host.cursor_visible(),
            time_scale: self.host.time_scale(),
            pause_game: self.paused,
        }
    }

    fn apply_attributes(&mut self, attributes: MenuAttributes) {
        self.set_cursor(attributes.cursor_lock_mode, attributes.cursor_visible);
        if !self.settings.disable_time_management && attributes.changes_time_scale() {
            self.host.set_time_scale(attributes.time_scale);
        }
        self.update_paused(attributes.pause_game);
    }

    fn set_cursor(&mut self, mode: CursorLockMode, visible: bool) {
        if self.settings.disable_cursor_management {
            return;
        }
        self.host.set_cursor_lock_mode(mode);
        self.host.set_cursor_visible(visible);
    }

    fn update_paused(&mut self, paused: bool) {
        if paused == self.paused {
            return;
        }
        self.paused = paused;
        log::debug!("game {}", if paused { "paused" } else { "unpaused" });
        let listeners = if paused { &mut self.on_pause } else { &mut self.on_unpause };
        for f in listeners.iter_mut() {
            f();
        }
    }
}

/// Calls into a stacked menu. A menu that is already borrowed (it is the
/// caller of this stack operation) is skipped with an error instead of
/// panicking.
fn notify(menu: &MenuRef, f: impl FnOnce(&mut dyn Menu)) {
    match menu.try_borrow_mut() {
        Ok(mut m) => f(&mut *m),
        Err(_) => log::error!(
            "menu is borrowed during a stack transition; route the request through its MenuController"
        ),
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use menutee_engine::core::HostState;
    use std::cell::Cell;

    // ── RecordingMenu ─────────────────────────────────────────────────────

    /// Test menu that records every notification it receives.
    pub(crate) struct RecordingMenu {
        pub attributes: MenuAttributes,
        pub log: Rc<RefCell<Vec<String>>>,
        pub name: &'static str,
    }

    impl Menu for RecordingMenu {
        fn menu_attributes(&self) -> MenuAttributes {
            self.attributes
        }
        fn set_menu_up(&mut self, up: bool) {
            self.log.borrow_mut().push(format!("{}.up({up})", self.name));
        }
        fn set_menu_on_top(&mut self, on_top: bool) {
            self.log.borrow_mut().push(format!("{}.top({on_top})", self.name));
        }
    }

    pub(crate) fn recording(
        name: &'static str,
        attributes: MenuAttributes,
        log: &Rc<RefCell<Vec<String>>>,
    ) -> MenuRef {
        Rc::new(RefCell::new(RecordingMenu { attributes, log: log.clone(), name }))
    }

    /// HostState shared with the test so writes through the stack are visible.
    #[derive(Clone)]
    pub(crate) struct SharedHost(pub Rc<RefCell<HostState>>);

    impl HostControls for SharedHost {
        fn cursor_lock_mode(&self) -> CursorLockMode { self.0.borrow().cursor_lock_mode }
        fn set_cursor_lock_mode(&mut self, mode: CursorLockMode) { self.0.borrow_mut().cursor_lock_mode = mode; }
        fn cursor_visible(&self) -> bool { self.0.borrow().cursor_visible }
        fn set_cursor_visible(&mut self, visible: bool) { self.0.borrow_mut().cursor_visible = visible; }
        fn time_scale(&self) -> f32 { self.0.borrow().time_scale }
        fn set_time_scale(&mut self, scale: f32) { self.0.borrow_mut().time_scale = scale; }
    }

    fn stack() -> (MenuStack, Rc<RefCell<HostState>>) {
        let host = Rc::new(RefCell::new(HostState::new()));
        (MenuStack::new(MenuStackSettings::default(), SharedHost(host.clone())), host)
    }

    fn log() -> Rc<RefCell<Vec<String>>> {
        Rc::new(RefCell::new(Vec::new()))
    }

    // ── construction ──────────────────────────────────────────────────────

    #[test]
    fn new_applies_defaults() {
        let (s, host) = stack();
        assert!(s.is_empty());
        assert!(!s.paused());
        let h = host.borrow();
        assert_eq!(h.cursor_lock_mode, CursorLockMode::Locked);
        assert!(!h.cursor_visible);
        assert_eq!(h.time_scale, 1.0);
    }

    #[test]
    fn disabled_cursor_management_leaves_cursor() {
        let host = Rc::new(RefCell::new(HostState::new()));
        let settings = MenuStackSettings::default().disable_cursor_management(true);
        let mut s = MenuStack::new(settings, SharedHost(host.clone()));
        assert_eq!(host.borrow().cursor_lock_mode, CursorLockMode::None);
        let l = log();
        let a = recording("a", MenuAttributes::standard_in_game(), &l);
        s.push_and_show_menu(&a);
        assert_eq!(host.borrow().cursor_lock_mode, CursorLockMode::None);
        assert!(host.borrow().cursor_visible);
    }

    #[test]
    fn disabled_time_management_leaves_clock() {
        let host = Rc::new(RefCell::new(HostState::new()));
        host.borrow_mut().time_scale = 0.5;
        let settings = MenuStackSettings::default().disable_time_management(true);
        let mut s = MenuStack::new(settings, SharedHost(host.clone()));
        let l = log();
        s.push_and_show_menu(&recording("a", MenuAttributes::standard_pause_menu(), &l));
        assert_eq!(host.borrow().time_scale, 0.5);
        assert!(s.paused());
    }

    // ── push / pop ────────────────────────────────────────────────────────

    #[test]
    fn push_notifies_up_then_top() {
        let (mut s, _) = stack();
        let l = log();
        let a = recording("a", MenuAttributes::standard_pause_menu(), &l);
        assert!(s.push_and_show_menu(&a));
        assert_eq!(*l.borrow(), vec!["a.up(true)", "a.top(true)"]);
        assert!(s.is_menu_at_top(&a));
        assert!(s.is_menu_up(&a));
        assert_eq!(s.stack_size(), 1);
    }

    #[test]
    fn push_twice_fails_and_keeps_depth() {
        let (mut s, _) = stack();
        let l = log();
        let a = recording("a", MenuAttributes::standard_pause_menu(), &l);
        let b = recording("b", MenuAttributes::standard_non_pause_menu(), &l);
        assert!(s.push_and_show_menu(&a));
        assert!(s.push_and_show_menu(&b));
        l.borrow_mut().clear();
        assert!(!s.push_and_show_menu(&a));
        assert!(!s.push_and_show_menu(&b));
        assert_eq!(s.stack_size(), 2);
        assert!(l.borrow().is_empty());
    }

    #[test]
    fn pop_requires_top() {
        let (mut s, _) = stack();
        let l = log();
        let a = recording("a", MenuAttributes::standard_pause_menu(), &l);
        let b = recording("b", MenuAttributes::standard_pause_menu(), &l);
        assert!(!s.pop_and_close_menu(&a));
        s.push_and_show_menu(&a);
        s.push_and_show_menu(&b);
        assert!(!s.pop_and_close_menu(&a));
        assert_eq!(s.stack_size(), 2);
        assert!(s.pop_and_close_menu(&b));
        assert!(s.pop_and_close_menu(&a));
        assert!(s.is_empty());
    }

    #[test]
    fn pop_notification_order() {
        let (mut s, _) = stack();
        let l = log();
        let a = recording("a", MenuAttributes::standard_pause_menu(), &l);
        let b = recording("b", MenuAttributes::standard_pause_menu(), &l);
        s.push_and_show_menu(&a);
        s.push_and_show_menu(&b);
        l.borrow_mut().clear();
        s.pop_and_close_menu(&b);
        assert_eq!(*l.borrow(), vec!["b.top(false)", "b.up(false)", "a.top(true)"]);
    }

    #[test]
    fn is_menu_at_top_false_when_empty() {
        let (s, _) = stack();
        let l = log();
        let a = recording("a", MenuAttributes::standard_pause_menu(), &l);
        assert!(!s.is_menu_at_top(&a));
        assert!(s.top().is_none());
    }

    // ── attribute restoration ─────────────────────────────────────────────

    #[test]
    fn lifo_pairs_restore_host_state() {
        let (mut s, host) = stack();
        host.borrow_mut().time_scale = 0.75;
        let before = *host.borrow();
        let l = log();
        let a = recording("a", MenuAttributes::standard_pause_menu(), &l);
        let b = recording("b", MenuAttributes::standard_in_game().time_scale(2.0), &l);

        s.push_and_show_menu(&a);
        let mid = *host.borrow();
        s.push_and_show_menu(&b);
        s.pop_and_close_menu(&b);
        assert_eq!(*host.borrow(), mid);
        s.pop_and_close_menu(&a);
        assert_eq!(*host.borrow(), before);
        assert!(!s.paused());
    }

    #[test]
    fn pause_then_real_time_menu_scenario() {
        let (mut s, host) = stack();
        let l = log();
        let a = recording("a", MenuAttributes::standard_pause_menu(), &l);
        let b = recording("b", MenuAttributes::standard_non_pause_menu().time_scale(1.0), &l);

        s.push_and_show_menu(&a);
        assert_eq!(host.borrow().time_scale, 0.0);
        assert!(s.is_menu_at_top(&a));

        l.borrow_mut().clear();
        s.push_and_show_menu(&b);
        assert_eq!(l.borrow()[0], "a.top(false)");
        assert_eq!(host.borrow().time_scale, 1.0);
        assert!(s.is_menu_at_top(&b));

        l.borrow_mut().clear();
        s.pop_and_close_menu(&b);
        assert_eq!(host.borrow().time_scale, 0.0);
        assert!(l.borrow().contains(&"a.top(true)".to_string()));
    }

    #[test]
    fn negative_time_scale_keeps_clock() {
        let (mut s, host) = stack();
        let l = log();
        let a = recording("a", MenuAttributes::standard_pause_menu(), &l);
        let b = recording("b", MenuAttributes::standard_non_pause_menu(), &l);
        s.push_and_show_menu(&a);
        s.push_and_show_menu(&b);
        assert_eq!(host.borrow().time_scale, 0.0);
    }

    // ── pause edges ───────────────────────────────────────────────────────

    #[test]
    fn pause_listeners_fire_once_per_edge() {
        let (mut s, _) = stack();
        let pauses = Rc::new(Cell::new(0));
        let unpauses = Rc::new(Cell::new(0));
        {
            let p = pauses.clone();
            s.add_pause_listener(move || p.set(p.get() + 1));
            let u = unpauses.clone();
            s.add_unpause_listener(move || u.set(u.get() + 1));
        }
        let l = log();
        let a = recording("a", MenuAttributes::standard_pause_menu(), &l);
        let b = recording("b", MenuAttributes::standard_pause_menu(), &l);
        let c = recording("c", MenuAttributes::standard_non_pause_menu(), &l);

        s.push_and_show_menu(&a);
        s.push_and_show_menu(&b);
        assert_eq!(pauses.get(), 1);
        s.push_and_show_menu(&c);
        assert_eq!(unpauses.get(), 1);
        s.pop_and_close_menu(&c);
        assert_eq!(pauses.get(), 2);
        s.pop_and_close_menu(&b);
        assert_eq!(pauses.get(), 2);
        s.pop_and_close_menu(&a);
        assert_eq!(unpauses.get(), 2);
    }

    // ── toggle / replace ──────────────────────────────────────────────────

    #[test]
    fn toggle_pushes_then_pops() {
        let (mut s, _) = stack();
        let l = log();
        let a = recording("a", MenuAttributes::standard_pause_menu(), &l);
        s.toggle_menu(&a);
        assert!(s.is_menu_at_top(&a));
        s.toggle_menu(&a);
        assert!(s.is_empty());
    }

    #[test]
    fn toggle_buried_menu_is_noop() {
        let (mut s, host) = stack();
        let l = log();
        let a = recording("a", MenuAttributes::standard_pause_menu(), &l);
        let b = recording("b", MenuAttributes::standard_non_pause_menu(), &l);
        s.push_and_show_menu(&a);
        s.push_and_show_menu(&b);
        let before = *host.borrow();
        l.borrow_mut().clear();
        s.toggle_menu(&a);
        assert_eq!(s.stack_size(), 2);
        assert!(s.is_menu_at_top(&b));
        assert!(l.borrow().is_empty());
        assert_eq!(*host.borrow(), before);
    }

    #[test]
    fn pop_and_push_replaces_top() {
        let (mut s, host) = stack();
        let l = log();
        let a = recording("a", MenuAttributes::standard_pause_menu(), &l);
        let b = recording("b", MenuAttributes::standard_in_game(), &l);
        s.push_and_show_menu(&a);
        assert!(s.pop_and_push_menu(&a, &b));
        assert_eq!(s.stack_size(), 1);
        assert!(s.is_menu_at_top(&b));
        assert_eq!(host.borrow().cursor_lock_mode, CursorLockMode::Locked);
        assert!(!s.pop_and_push_menu(&a, &b));
    }

    #[test]
    fn busy_menu_is_skipped_not_panicking() {
        let (mut s, _) = stack();
        let l = log();
        let a = recording("a", MenuAttributes::standard_pause_menu(), &l);
        let _guard = a.borrow_mut();
        assert!(s.push_and_show_menu(&a));
        assert!(l.borrow().is_empty());
    }
}
