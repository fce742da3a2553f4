//! Frame driver for a set of menus sharing one stack.
//!
//! ```text
//! MenuScene::frame
//!   ├─ tick the clock (host time scale)
//!   ├─ run deferred tasks that are due
//!   └─ update menus: the top menu first, then closed menus; buried menus skip
//! ```

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use menutee_engine::core::HostControls;
use menutee_engine::time::{DeferredQueue, FrameClock, FrameTime};

use crate::focus::{FocusManager, SharedFocus};
use crate::hook::{HookHandle, MenuHook};
use crate::manager::{MenuHandle, MenuManager};
use crate::menu::{same_menu, MenuRef};
use crate::stack::{MenuStack, MenuStackSettings, SharedStack};

pub use crate::manager::SharedInput;

pub struct MenuScene {
    stack: SharedStack,
    focus: SharedFocus,
    input: SharedInput,
    menus: Vec<MenuHandle>,
    hooks: Vec<HookHandle>,
    clock: FrameClock,
    deferred: Rc<RefCell<DeferredQueue>>,
    started: bool,
}

impl MenuScene {
    pub fn new(settings: MenuStackSettings, host: impl HostControls + 'static, input: SharedInput) -> Self {
        Self {
            stack: MenuStack::new(settings, host).shared(),
            focus: FocusManager::new().shared(),
            input,
            menus: Vec::new(),
            hooks: Vec::new(),
            clock: FrameClock::new(),
            deferred: Rc::new(RefCell::new(DeferredQueue::new())),
            started: false,
        }
    }

    pub fn stack(&self) -> &SharedStack {
        &self.stack
    }

    pub fn focus(&self) -> &SharedFocus {
        &self.focus
    }

    pub fn input(&self) -> &SharedInput {
        &self.input
    }

    pub fn deferred(&self) -> &Rc<RefCell<DeferredQueue>> {
        &self.deferred
    }

    pub fn menus(&self) -> &[MenuHandle] {
        &self.menus
    }

    pub fn hooks(&self) -> &[HookHandle] {
        &self.hooks
    }

    pub fn menu(&self, name: &str) -> Option<&MenuHandle> {
        self.menus.iter().find(|m| m.borrow().name() == name)
    }

    // ── registration ──────────────────────────────────────────────────────

    /// Creates a menu wired to this scene's stack, focus and input.
    pub fn create_menu(&mut self, name: impl Into<String>) -> MenuHandle {
        let menu = MenuManager::new(name, self.focus.clone());
        self.add_menu(menu.clone());
        menu
    }

    /// Registers a menu built elsewhere and wires it to this scene. The
    /// menu keeps its own focus manager.
    pub fn add_menu(&mut self, menu: MenuHandle) {
        {
            let mut m = menu.borrow_mut();
            m.set_stack(&self.stack);
            m.set_input(self.input.clone());
        }
        if self.started {
            log::warn!("menu `{}` added after start; start it yourself", menu.borrow().name());
        }
        self.menus.push(menu);
    }

    pub fn add_hook(&mut self, hook: MenuHook) -> HookHandle {
        let hook = hook.shared();
        self.hooks.push(hook.clone());
        hook
    }

    // ── lifecycle ─────────────────────────────────────────────────────────

    /// Runs every menu's start checks. Menus that start open are pushed on
    /// the next frame so all of them finish starting first. Hooks marked
    /// `show_on_start` are pushed immediately.
    pub fn start(&mut self) {
        if self.started {
            log::warn!("menu scene started twice");
            return;
        }
        self.started = true;

        for menu in &self.menus {
            let opens = menu.borrow_mut().start();
            if opens {
                let menu = menu.clone();
                self.deferred.borrow_mut().next_frame(move || {
                    MenuManager::show_menu(&menu);
                });
            }
        }
        for hook in &self.hooks {
            let shows = hook.borrow().show_on_start;
            if shows {
                MenuHook::push_menu(hook, &self.stack);
            }
        }
        log::info!("menu scene started: {} menu(s), {} hook(s)", self.menus.len(), self.hooks.len());
    }

    /// Closes `menu` (which must be on top by then) after `frames` frames.
    pub fn close_menu_after_frames(&self, menu: MenuRef, frames: u64) {
        let stack = self.stack.clone();
        self.deferred.borrow_mut().after_frames(frames, move || {
            stack.borrow_mut().pop_and_close_menu(&menu);
        });
    }

    /// Closes `menu` after `seconds` of unscaled time.
    pub fn close_menu_after_seconds(&self, menu: MenuRef, seconds: f64) {
        let stack = self.stack.clone();
        self.deferred.borrow_mut().after_seconds(seconds, move || {
            stack.borrow_mut().pop_and_close_menu(&menu);
        });
    }

    /// One host frame on wall-clock time.
    pub fn frame(&mut self) -> FrameTime {
        let scale = self.stack.borrow().host().time_scale();
        let time = self.clock.tick(scale);
        self.process(&time);
        time
    }

    /// One host frame of exactly `dt`.
    pub fn frame_fixed(&mut self, dt: Duration) -> FrameTime {
        let scale = self.stack.borrow().host().time_scale();
        let time = self.clock.tick_fixed(dt, scale);
        self.process(&time);
        time
    }

    /// `true` once if any menu asked the host to quit since the last call.
    pub fn take_exit_request(&self) -> bool {
        self.menus.iter().fold(false, |any, m| m.borrow_mut().take_exit_request() || any)
    }

    fn process(&mut self, time: &FrameTime) {
        let due = self.deferred.borrow_mut().take_due(time);
        for task in due {
            task();
        }

        let top = self.stack.borrow().top();
        let is_top = |m: &MenuHandle| {
            let m: MenuRef = m.clone();
            top.as_ref().is_some_and(|t| same_menu(t, &m))
        };
        let is_stacked = |m: &MenuHandle| {
            let m: MenuRef = m.clone();
            self.stack.borrow().is_menu_in_stack(&m)
        };

        // The top menu sees input first so the toggle closes it rather than
        // opening some other menu. Menus buried at frame start get nothing.
        let mut order: Vec<MenuHandle> = self.menus.iter().filter(|&m| is_top(m)).cloned().collect();
        order.extend(self.menus.iter().filter(|&m| !is_top(m) && !is_stacked(m)).cloned());

        let mut toggle_free = true;
        for menu in &order {
            if MenuManager::update(menu, toggle_free) {
                toggle_free = false;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ButtonBuilder, MenuBuilder, PanelBuilder};
    use crate::generator::MenuGenerator;
    use menutee_engine::core::HostState;
    use menutee_engine::input::{InputSnapshot, ScriptedInput};

    const STEP: Duration = Duration::from_millis(16);

    fn scene() -> (MenuScene, Rc<RefCell<ScriptedInput>>) {
        let input = Rc::new(RefCell::new(ScriptedInput::new()));
        let scene = MenuScene::new(MenuStackSettings::default(), HostState::new(), input.clone());
        (scene, input)
    }

    fn add(scene: &mut MenuScene, name: &str, toggleable: bool) -> MenuHandle {
        let menu = scene.create_menu(name);
        let config = MenuBuilder::new(toggleable, true)
            .add_panel(PanelBuilder::new("main").add_widget(ButtonBuilder::new("ok")))
            .build()
            .unwrap();
        MenuGenerator::new().create_menu(&mut menu.borrow_mut(), config);
        menu
    }

    fn step(scene: &mut MenuScene, input: &Rc<RefCell<ScriptedInput>>, snapshot: InputSnapshot) {
        input.borrow_mut().set(snapshot);
        scene.frame_fixed(STEP);
    }

    #[test]
    fn starts_open_menu_waits_one_frame() {
        let (mut scene, input) = scene();
        let title = add(&mut scene, "title", false);
        scene.start();
        assert!(!title.borrow().is_active());
        step(&mut scene, &input, InputSnapshot::idle());
        assert!(title.borrow().is_active());
        assert_eq!(scene.stack().borrow().stack_size(), 1);
    }

    #[test]
    fn toggle_closes_top_menu_only() {
        let (mut scene, input) = scene();
        let pause = add(&mut scene, "pause", true);
        let inventory = add(&mut scene, "inventory", true);
        scene.start();

        step(&mut scene, &input, InputSnapshot::toggle());
        assert!(pause.borrow().is_active());
        assert!(!inventory.borrow().is_active());

        step(&mut scene, &input, InputSnapshot::toggle());
        assert!(!pause.borrow().is_active());
        assert!(!inventory.borrow().is_active());
        assert!(scene.stack().borrow().is_empty());
        assert_eq!(scene.stack().borrow().host().time_scale(), 1.0);
    }

    #[test]
    fn buried_menu_ignores_input() {
        let (mut scene, input) = scene();
        let pause = add(&mut scene, "pause", true);
        scene.start();
        step(&mut scene, &input, InputSnapshot::toggle());

        let dialog = scene.add_hook(MenuHook::new("dialog"));
        MenuHook::push_menu(&dialog, scene.stack());
        assert!(!pause.borrow().is_on_top());

        step(&mut scene, &input, InputSnapshot::toggle());
        assert!(pause.borrow().is_active());
        assert_eq!(scene.stack().borrow().stack_size(), 2);
    }

    #[test]
    fn hook_closes_after_delay() {
        let (mut scene, input) = scene();
        let splash = scene.add_hook(MenuHook::new("splash").show_on_start(true));
        scene.start();
        assert!(splash.borrow().is_visible());

        let menu: MenuRef = splash.clone();
        scene.close_menu_after_frames(menu, 3);
        step(&mut scene, &input, InputSnapshot::idle());
        step(&mut scene, &input, InputSnapshot::idle());
        assert!(splash.borrow().is_visible());
        step(&mut scene, &input, InputSnapshot::idle());
        assert!(!splash.borrow().is_visible());
        assert!(scene.stack().borrow().is_empty());
    }

    #[test]
    fn exit_request_surfaces_once() {
        let (mut scene, input) = scene();
        let menu = scene.create_menu("title");
        let ctl = menu.borrow().controller();
        let config = MenuBuilder::new(false, false)
            .add_panel(PanelBuilder::new("main").add_widget(ButtonBuilder::new("quit").on_press(move || ctl.request_exit())))
            .default_select_mode(crate::manager::DefaultSelectMode::Always)
            .build()
            .unwrap();
        MenuGenerator::new().create_menu(&mut menu.borrow_mut(), config);
        scene.start();
        step(&mut scene, &input, InputSnapshot::idle());
        step(&mut scene, &input, InputSnapshot::submit());
        assert!(scene.take_exit_request());
        assert!(!scene.take_exit_request());
    }

    #[test]
    fn menu_lookup_by_name() {
        let (mut scene, _) = scene();
        add(&mut scene, "pause", true);
        assert!(scene.menu("pause").is_some());
        assert!(scene.menu("nope").is_none());
    }
}
