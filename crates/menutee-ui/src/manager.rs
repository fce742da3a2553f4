//! One menu's panel state machine.
//!
//! A [`MenuManager`] owns the live panels the generator built for it and
//! tracks which one is showing, the panels pushed on top of the main panel,
//! and what was selected before each push so going back restores it.
//!
//! # Frame flow
//!
//! ```text
//! MenuScene::frame
//!   └─ MenuManager::update(handle)
//!        ├─ poll input (toggle → stack, cancel → pop panel, submit/move → focused widget)
//!        ├─ restore selection per SelectionRestorationMode
//!        └─ apply queued MenuCommands (from widget handlers)
//! ```
//!
//! Operations that touch the [`MenuStack`] are associated functions taking the
//! shared [`MenuHandle`]: the stack calls back into the menu, so the caller
//! must not be holding a borrow when it does.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

use menutee_engine::input::{InputDeviceKind, MenuInputMediator};

use crate::attributes::MenuAttributes;
use crate::config::menu::{MenuSettings, PanelChangeCallback};
use crate::event::UiEvent;
use crate::focus::{ElementId, MoveDirection, SharedFocus};
use crate::menu::{Menu, MenuRef};
use crate::panel::PanelManager;
use crate::stack::{MenuStack, SharedStack};

pub use crate::config::menu::{DefaultSelectMode, SelectionRestorationMode};

/// Shared handle to a menu manager. Coerces to [`MenuRef`].
pub type MenuHandle = Rc<RefCell<MenuManager>>;

/// Shared handle to the scene's input mediator.
pub type SharedInput = Rc<RefCell<dyn MenuInputMediator>>;

type LifecycleListener = Box<dyn FnMut()>;

/// Axis deflection that counts as "the player wants a selection back".
const RESTORE_AXIS_THRESHOLD: f32 = 0.1;
/// Axis deflection that moves focus or nudges the focused widget.
const MOVE_AXIS_THRESHOLD: f32 = 0.5;

// ── MenuCommand / MenuController ──────────────────────────────────────────

/// A request queued by a widget handler, applied after input dispatch.
pub enum MenuCommand {
    PushPanel(String),
    PopPanel,
    PopPanelOrExitMenu,
    ExitMenu,
    ShowMenu,
    /// Push another menu on the stack.
    OpenMenu(MenuRef),
    /// Pop another menu off the stack (it must be on top).
    CloseMenu(MenuRef),
    /// Ask the host to quit; see [`MenuManager::take_exit_request`].
    RequestExit,
}

/// Cloneable handle widget handlers capture to drive their menu.
///
/// ```rust,ignore
/// let ctl = menu.borrow().controller();
/// ButtonBuilder::new("options").text("Options").on_press(move || ctl.push_panel("options"))
/// ```
#[derive(Clone, Default)]
pub struct MenuController {
    queue: Rc<RefCell<VecDeque<MenuCommand>>>,
}

impl MenuController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn send(&self, command: MenuCommand) {
        self.queue.borrow_mut().push_back(command);
    }

    pub fn push_panel(&self, key: impl Into<String>) { self.send(MenuCommand::PushPanel(key.into())) }
    pub fn pop_panel(&self) { self.send(MenuCommand::PopPanel) }
    pub fn pop_panel_or_exit_menu(&self) { self.send(MenuCommand::PopPanelOrExitMenu) }
    pub fn exit_menu(&self) { self.send(MenuCommand::ExitMenu) }
    pub fn show_menu(&self) { self.send(MenuCommand::ShowMenu) }
    pub fn open_menu(&self, menu: MenuRef) { self.send(MenuCommand::OpenMenu(menu)) }
    pub fn close_menu(&self, menu: MenuRef) { self.send(MenuCommand::CloseMenu(menu)) }
    pub fn request_exit(&self) { self.send(MenuCommand::RequestExit) }

    pub fn pending(&self) -> usize {
        self.queue.borrow().len()
    }

    fn next(&self) -> Option<MenuCommand> {
        self.queue.borrow_mut().pop_front()
    }
}

// ── lifecycle listeners ───────────────────────────────────────────────────

#[derive(Default)]
struct Lifecycle {
    opened: Vec<LifecycleListener>,
    closed: Vec<LifecycleListener>,
    entered_top: Vec<LifecycleListener>,
    exited_top: Vec<LifecycleListener>,
}

fn fire(listeners: &mut [LifecycleListener]) {
    for f in listeners.iter_mut() {
        f();
    }
}

// ── MenuManager ───────────────────────────────────────────────────────────

pub struct MenuManager {
    name: String,
    settings: MenuSettings,
    configured: bool,
    panels: Vec<PanelManager>,
    panel_change_callbacks: Vec<PanelChangeCallback>,

    stack: Weak<RefCell<MenuStack>>,
    input: Option<SharedInput>,
    focus: SharedFocus,
    controller: MenuController,
    lifecycle: Lifecycle,

    started: bool,
    disabled: bool,
    active: bool,
    on_top: bool,
    exit_requested: bool,

    /// Pushed panel keys, root excluded. Last is showing.
    panel_history: Vec<String>,
    /// Focus before each push, parallel to `panel_history`.
    selection_history: Vec<Option<ElementId>>,
    active_panel: Option<usize>,
    active_default_input: Option<ElementId>,
    last_valid_selection: Option<ElementId>,
    /// Focus saved while another menu is on top.
    cached_selection: Option<ElementId>,
    /// Direction held last frame; moves fire on change only.
    held_direction: Option<MoveDirection>,
}

impl MenuManager {
    pub fn new(name: impl Into<String>, focus: SharedFocus) -> MenuHandle {
        Rc::new(RefCell::new(Self {
            name: name.into(),
            settings: MenuSettings::default(),
            configured: false,
            panels: Vec::new(),
            panel_change_callbacks: Vec::new(),
            stack: Weak::new(),
            input: None,
            focus,
            controller: MenuController::new(),
            lifecycle: Lifecycle::default(),
            started: false,
            disabled: false,
            active: false,
            on_top: false,
            exit_requested: false,
            panel_history: Vec::new(),
            selection_history: Vec::new(),
            active_panel: None,
            active_default_input: None,
            last_valid_selection: None,
            cached_selection: None,
            held_direction: None,
        }))
    }

    // ── wiring ────────────────────────────────────────────────────────────

    pub fn set_stack(&mut self, stack: &SharedStack) {
        self.stack = Rc::downgrade(stack);
    }

    pub fn set_input(&mut self, input: SharedInput) {
        self.input = Some(input);
    }

    pub fn has_stack(&self) -> bool {
        self.stack.strong_count() > 0
    }

    pub fn has_input(&self) -> bool {
        self.input.is_some()
    }

    /// Installs generated panels. Replaces whatever was there.
    pub(crate) fn install(
        &mut self,
        settings: MenuSettings,
        panels: Vec<PanelManager>,
        callbacks: Vec<PanelChangeCallback>,
    ) {
        if self.configured {
            log::warn!("menu `{}` regenerated; dropping its old panels", self.name);
            let mut focus = self.focus.borrow_mut();
            for &id in self.panels.iter().flat_map(|p| p.selectables()) {
                focus.unregister(id);
            }
        }
        self.settings = settings;
        self.panels = panels;
        self.active_panel = None;
        self.active_default_input = None;
        self.panel_change_callbacks = callbacks;
        self.configured = true;
        log::debug!("menu `{}` configured with {} panel(s)", self.name, self.panels.len());
    }

    pub fn on_opened(&mut self, f: impl FnMut() + 'static) { self.lifecycle.opened.push(Box::new(f)); }
    pub fn on_closed(&mut self, f: impl FnMut() + 'static) { self.lifecycle.closed.push(Box::new(f)); }
    pub fn on_entered_top(&mut self, f: impl FnMut() + 'static) { self.lifecycle.entered_top.push(Box::new(f)); }
    pub fn on_exited_top(&mut self, f: impl FnMut() + 'static) { self.lifecycle.exited_top.push(Box::new(f)); }

    // ── queries ───────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn settings(&self) -> &MenuSettings {
        &self.settings
    }

    pub fn controller(&self) -> MenuController {
        self.controller.clone()
    }

    pub fn focus(&self) -> SharedFocus {
        self.focus.clone()
    }

    pub fn is_configured(&self) -> bool {
        self.configured
    }

    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// `true` between `set_menu_up(true)` and `set_menu_up(false)`.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_on_top(&self) -> bool {
        self.on_top
    }

    pub fn is_at_root(&self) -> bool {
        self.panel_history.is_empty()
    }

    pub fn panel_history(&self) -> &[String] {
        &self.panel_history
    }

    pub fn active_panel_key(&self) -> Option<&str> {
        self.active_panel.map(|i| self.panels[i].key())
    }

    pub fn active_panel(&self) -> Option<&PanelManager> {
        self.active_panel.map(|i| &self.panels[i])
    }

    pub fn panels(&self) -> &[PanelManager] {
        &self.panels
    }

    pub fn panel(&self, key: &str) -> Option<&PanelManager> {
        self.panels.iter().find(|p| p.key() == key)
    }

    pub fn panel_mut(&mut self, key: &str) -> Option<&mut PanelManager> {
        self.panels.iter_mut().find(|p| p.key() == key)
    }

    pub fn last_valid_selection(&self) -> Option<ElementId> {
        self.last_valid_selection
    }

    /// Returns and clears a pending exit request.
    pub fn take_exit_request(&mut self) -> bool {
        std::mem::take(&mut self.exit_requested)
    }

    pub fn exit_requested(&self) -> bool {
        self.exit_requested
    }

    // ── start ─────────────────────────────────────────────────────────────

    /// Resets to a closed, clean state and checks wiring. Returns `true` if
    /// the menu should be shown now (it starts open and is usable).
    ///
    /// A menu with no stack, no input or no panels disables itself for good.
    pub fn start(&mut self) -> bool {
        if self.started {
            log::warn!("menu `{}` started twice", self.name);
            return false;
        }
        self.started = true;
        self.reset_to_closed();

        if self.stack.upgrade().is_none() {
            log::error!("menu `{}` has no menu stack; menu disabled", self.name);
            self.disabled = true;
        } else if self.input.is_none() {
            log::error!("menu `{}` has no input mediator; menu disabled", self.name);
            self.disabled = true;
        } else if !self.configured {
            log::error!("menu `{}` was never generated; menu disabled", self.name);
            self.disabled = true;
        }
        !self.disabled && self.settings.starts_open
    }

    fn reset_to_closed(&mut self) {
        self.panel_history.clear();
        self.selection_history.clear();
        self.cached_selection = None;
        let mut focus = self.focus.borrow_mut();
        for panel in &mut self.panels {
            panel.set_panel_active(false, &mut focus);
        }
        self.active_panel = None;
        self.active_default_input = None;
    }

    // ── stack operations (take the handle) ────────────────────────────────

    /// Pushes this menu on the stack.
    pub fn show_menu(this: &MenuHandle) -> bool {
        let stack = {
            let m = this.borrow();
            if m.disabled {
                log::warn!("menu `{}` is disabled and cannot be shown", m.name);
                return false;
            }
            m.stack.upgrade()
        };
        let Some(stack) = stack else {
            log::error!("menu `{}` cannot be shown: no menu stack", this.borrow().name);
            return false;
        };
        let menu: MenuRef = this.clone();
        stack.borrow_mut().push_and_show_menu(&menu)
    }

    /// Opens or closes this menu through the stack. Only toggleable,
    /// enabled menus respond.
    pub fn toggle_menu(this: &MenuHandle) {
        let stack = {
            let m = this.borrow();
            if !m.settings.toggleable || m.disabled {
                return;
            }
            m.stack.upgrade()
        };
        if let Some(stack) = stack {
            let menu: MenuRef = this.clone();
            stack.borrow_mut().toggle_menu(&menu);
        }
    }

    /// Closes this menu if it is open.
    pub fn exit_menu(this: &MenuHandle) {
        if !this.borrow().active {
            return;
        }
        Self::toggle_menu(this);
    }

    /// Goes back a panel, or closes the menu when already at the main panel.
    pub fn pop_panel_or_exit_menu(this: &MenuHandle) {
        let at_root = this.borrow().is_at_root();
        if at_root {
            Self::exit_menu(this);
        } else {
            this.borrow_mut().pop_panel();
        }
    }

    /// Runs every queued [`MenuCommand`].
    pub fn apply_commands(this: &MenuHandle) {
        let controller = this.borrow().controller.clone();
        while let Some(command) = controller.next() {
            match command {
                MenuCommand::PushPanel(key) => {
                    this.borrow_mut().push_panel(&key);
                }
                MenuCommand::PopPanel => this.borrow_mut().pop_panel(),
                MenuCommand::PopPanelOrExitMenu => Self::pop_panel_or_exit_menu(this),
                MenuCommand::ExitMenu => Self::exit_menu(this),
                MenuCommand::ShowMenu => {
                    Self::show_menu(this);
                }
                MenuCommand::OpenMenu(menu) => {
                    let stack = this.borrow().stack.upgrade();
                    if let Some(stack) = stack {
                        stack.borrow_mut().push_and_show_menu(&menu);
                    }
                }
                MenuCommand::CloseMenu(menu) => {
                    let stack = this.borrow().stack.upgrade();
                    if let Some(stack) = stack {
                        stack.borrow_mut().pop_and_close_menu(&menu);
                    }
                }
                MenuCommand::RequestExit => this.borrow_mut().exit_requested = true,
            }
        }
    }

    /// One frame of input handling followed by queued commands.
    ///
    /// `allow_toggle` lets the scene hand the toggle input to one menu per
    /// frame. Returns `true` if this menu used the toggle.
    pub fn update(this: &MenuHandle, allow_toggle: bool) -> bool {
        let wants_toggle = this.borrow_mut().poll_input(allow_toggle);
        if wants_toggle {
            Self::toggle_menu(this);
        }
        Self::apply_commands(this);
        wants_toggle
    }

    // ── panels ────────────────────────────────────────────────────────────

    /// Shows panel `key` on top of the current one. Unknown keys are logged
    /// and ignored.
    pub fn push_panel(&mut self, key: &str) -> bool {
        if self.panel_index(key).is_none() {
            log::error!("menu `{}` cannot push panel `{key}`: no such panel", self.name);
            return false;
        }
        let current = self.focus.borrow().current();
        self.selection_history.push(current);
        self.panel_history.push(key.to_string());
        log::debug!("menu `{}` pushed panel `{key}` (depth {})", self.name, self.panel_history.len());
        self.activate_panel(Some(key), true, None);
        true
    }

    /// Goes back to the previous panel (or stays on the main panel).
    pub fn pop_panel(&mut self) {
        self.panel_history.pop();
        let restore = self.selection_history.pop().flatten();
        let key = self
            .panel_history
            .last()
            .cloned()
            .unwrap_or_else(|| self.settings.main_panel_key.clone());
        log::debug!("menu `{}` popped to panel `{key}`", self.name);
        self.activate_panel(Some(&key), false, restore);
    }

    /// Whether a freshly shown panel should focus its default selectable.
    pub fn should_have_default_selection(&self) -> bool {
        match self.settings.default_select_mode {
            DefaultSelectMode::Always => true,
            DefaultSelectMode::Never => false,
            DefaultSelectMode::Contextual => self.last_device() != InputDeviceKind::Pointer,
        }
    }

    fn last_device(&self) -> InputDeviceKind {
        self.input.as_ref().map_or(InputDeviceKind::Unknown, |i| i.borrow().last_input_device())
    }

    fn panel_index(&self, key: &str) -> Option<usize> {
        self.panels.iter().position(|p| p.key() == key)
    }

    /// Shows `key` (or nothing), hides every other panel, picks focus and
    /// fires panel-change callbacks if the key changed.
    fn activate_panel(&mut self, key: Option<&str>, from_push: bool, restore: Option<ElementId>) {
        let old_key = self.active_panel_key().map(str::to_string);
        let new_index = key.and_then(|k| self.panel_index(k));
        if let (Some(k), None) = (key, new_index) {
            log::error!("menu `{}` has no panel `{k}`", self.name);
        }
        let wants_default = self.should_have_default_selection();

        {
            let mut focus = self.focus.borrow_mut();
            focus.clear();
            // Hide first so the shown panel's display callbacks see a settled menu.
            for (i, panel) in self.panels.iter_mut().enumerate() {
                if Some(i) != new_index {
                    panel.set_panel_active(false, &mut focus);
                }
            }
            self.active_panel = new_index;
            self.active_default_input = None;

            if let Some(i) = new_index {
                let panel = &mut self.panels[i];
                panel.set_panel_active(true, &mut focus);
                self.active_default_input = panel.default_input();

                let restorable = restore.filter(|&id| !from_push && focus.is_live(id) && panel.contains(id));
                if restorable.is_some() {
                    focus.set_current(restorable);
                } else if wants_default {
                    focus.set_current(self.active_default_input);
                }
            }
            self.last_valid_selection = focus.current();
        }

        let new_key = self.active_panel_key().map(str::to_string);
        if old_key != new_key {
            for callback in &mut self.panel_change_callbacks {
                callback(old_key.as_deref(), new_key.as_deref());
            }
        }
    }

    // ── input ─────────────────────────────────────────────────────────────

    /// Reads this frame's input. Returns `true` if the menu should toggle.
    fn poll_input(&mut self, allow_toggle: bool) -> bool {
        if self.disabled || !self.started {
            return false;
        }
        let Some(input) = self.input.clone() else { return false };
        let input = input.borrow();

        // Buried menus get nothing; closed menus only listen for the toggle.
        if self.active && !self.on_top {
            return false;
        }
        if allow_toggle && self.settings.toggleable && input.menu_toggle_pressed() {
            return true;
        }
        if !self.active {
            return false;
        }
        let Some(panel_index) = self.active_panel else { return false };

        if input.ui_cancel_pressed() {
            if self.panels[panel_index].consumes_cancel() {
                self.panels[panel_index].dispatch_cancel();
            } else if !self.is_at_root() {
                self.pop_panel();
            }
            // The panel may have changed; finish next frame.
            self.held_direction = None;
            return false;
        }

        let (x, y) = (input.ui_axis_x(), input.ui_axis_y());
        let restored = self.restore_selection(x, y);

        let direction = MoveDirection::from_axes(x, y, MOVE_AXIS_THRESHOLD);
        let new_direction = direction.filter(|d| self.held_direction != Some(*d));
        self.held_direction = direction;

        let focused = self.focus.borrow().current();
        if let Some(id) = focused.filter(|&id| self.panels[panel_index].contains(id)) {
            if input.ui_submit_pressed() {
                self.panels[panel_index].dispatch(id, &UiEvent::Submit);
            } else if let Some(dir) = new_direction.filter(|_| !restored) {
                let result = self.panels[panel_index].dispatch(id, &UiEvent::Move(dir));
                if !result.is_consumed() {
                    self.focus.borrow_mut().navigate(dir);
                }
            }
        }

        if let Some(i) = self.active_panel {
            self.panels[i].refresh();
        }
        let current = self.focus.borrow().current();
        if let Some(id) = current {
            if self.active_panel.is_some_and(|i| self.panels[i].contains(id)) {
                self.last_valid_selection = Some(id);
            }
        }
        false
    }

    /// Puts focus back when it is empty, per the restoration mode. Returns
    /// `true` if it did.
    fn restore_selection(&mut self, x: f32, y: f32) -> bool {
        if !self.on_top || self.focus.borrow().current().is_some() {
            return false;
        }
        let target = match self.settings.selection_restoration_mode {
            SelectionRestorationMode::Never => None,
            SelectionRestorationMode::Always => {
                let focus = self.focus.borrow();
                let in_panel = |id: ElementId| self.active_panel().is_some_and(|p| p.contains(id));
                self.last_valid_selection
                    .filter(|&id| focus.is_live(id) && in_panel(id))
                    .or(self.active_default_input)
            }
            SelectionRestorationMode::OnInput => {
                if x.abs() > RESTORE_AXIS_THRESHOLD || y.abs() > RESTORE_AXIS_THRESHOLD {
                    self.active_default_input
                } else {
                    None
                }
            }
        };
        let Some(target) = target else { return false };
        let mut focus = self.focus.borrow_mut();
        focus.set_current(Some(target));
        focus.current().is_some()
    }
}

impl Menu for MenuManager {
    fn menu_attributes(&self) -> MenuAttributes {
        self.settings.menu_attributes()
    }

    fn set_menu_up(&mut self, up: bool) {
        if up == self.active {
            log::debug!("menu `{}` already {}", self.name, if up { "up" } else { "down" });
            return;
        }
        self.active = up;
        self.held_direction = None;
        if up {
            log::debug!("menu `{}` opened", self.name);
            let main = self.settings.main_panel_key.clone();
            self.activate_panel(Some(&main), false, None);
            fire(&mut self.lifecycle.opened);
        } else {
            log::debug!("menu `{}` closed", self.name);
            self.panel_history.clear();
            self.selection_history.clear();
            self.cached_selection = None;
            self.activate_panel(None, false, None);
            fire(&mut self.lifecycle.closed);
        }
    }

    fn set_menu_on_top(&mut self, on_top: bool) {
        if on_top == self.on_top {
            return;
        }
        self.on_top = on_top;
        self.held_direction = None;
        // A covered menu's panel is hidden so its widgets drop out of the
        // shared focus graph; the panel key and history stay as they were.
        {
            let mut focus = self.focus.borrow_mut();
            if on_top {
                if let Some(i) = self.active_panel {
                    self.panels[i].set_panel_active(true, &mut focus);
                }
                if let Some(cached) = self.cached_selection.take() {
                    focus.set_current(Some(cached));
                }
            } else {
                let current = focus.current();
                let owned = current.filter(|&id| self.active_panel.is_some_and(|i| self.panels[i].contains(id)));
                self.cached_selection = owned;
                if self.settings.clear_selection_when_not_top {
                    focus.clear();
                }
                if let Some(i) = self.active_panel {
                    self.panels[i].set_panel_active(false, &mut focus);
                }
            }
        }
        if on_top {
            fire(&mut self.lifecycle.entered_top);
        } else {
            fire(&mut self.lifecycle.exited_top);
        }
    }
}
