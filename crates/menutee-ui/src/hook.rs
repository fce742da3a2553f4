//! A menu with no panels of its own.
//!
//! [`MenuHook`] lets host-built screens (a splash, a dialog drawn elsewhere)
//! take part in the stack: they get the cursor/time/pause treatment and
//! lifecycle callbacks, and draw themselves however they like.

use std::cell::RefCell;
use std::rc::Rc;

use menutee_engine::core::CursorLockMode;

use crate::attributes::MenuAttributes;
use crate::menu::{Menu, MenuRef};
use crate::stack::SharedStack;

pub type HookHandle = Rc<RefCell<MenuHook>>;

type HookListener = Box<dyn FnMut()>;

pub struct MenuHook {
    name: String,
    pub show_on_start: bool,
    pub cursor_lock_mode: CursorLockMode,
    pub cursor_visible: bool,
    pub pauses_game: bool,
    /// Negative keeps the current time scale.
    pub time_scale: f32,
    visible: bool,
    on_open: Vec<HookListener>,
    on_close: Vec<HookListener>,
    on_top: Vec<HookListener>,
    on_not_top: Vec<HookListener>,
}

impl MenuHook {
    /// A pausing hook with a free, visible cursor and a frozen clock.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            show_on_start: false,
            cursor_lock_mode: CursorLockMode::None,
            cursor_visible: true,
            pauses_game: true,
            time_scale: 0.0,
            visible: false,
            on_open: Vec::new(),
            on_close: Vec::new(),
            on_top: Vec::new(),
            on_not_top: Vec::new(),
        }
    }

    pub fn shared(self) -> HookHandle {
        Rc::new(RefCell::new(self))
    }

    pub fn show_on_start(mut self, v: bool) -> Self { self.show_on_start = v; self }
    pub fn cursor_lock_mode(mut self, v: CursorLockMode) -> Self { self.cursor_lock_mode = v; self }
    pub fn cursor_visible(mut self, v: bool) -> Self { self.cursor_visible = v; self }
    pub fn pauses_game(mut self, v: bool) -> Self { self.pauses_game = v; self }
    pub fn time_scale(mut self, v: f32) -> Self { self.time_scale = v; self }

    /// Copies every field of `attributes`.
    pub fn attributes(mut self, attributes: MenuAttributes) -> Self {
        self.cursor_lock_mode = attributes.cursor_lock_mode;
        self.cursor_visible = attributes.cursor_visible;
        self.pauses_game = attributes.pause_game;
        self.time_scale = attributes.time_scale;
        self
    }

    pub fn on_open(&mut self, f: impl FnMut() + 'static) { self.on_open.push(Box::new(f)); }
    pub fn on_close(&mut self, f: impl FnMut() + 'static) { self.on_close.push(Box::new(f)); }
    pub fn on_top(&mut self, f: impl FnMut() + 'static) { self.on_top.push(Box::new(f)); }
    pub fn on_not_top(&mut self, f: impl FnMut() + 'static) { self.on_not_top.push(Box::new(f)); }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether the host should be drawing this menu.
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn push_menu(this: &HookHandle, stack: &SharedStack) -> bool {
        let menu: MenuRef = this.clone();
        stack.borrow_mut().push_and_show_menu(&menu)
    }

    pub fn pop_menu(this: &HookHandle, stack: &SharedStack) -> bool {
        let menu: MenuRef = this.clone();
        stack.borrow_mut().pop_and_close_menu(&menu)
    }
}

impl Menu for MenuHook {
    fn menu_attributes(&self) -> MenuAttributes {
        MenuAttributes {
            cursor_lock_mode: self.cursor_lock_mode,
            cursor_visible: self.cursor_visible,
            time_scale: self.time_scale,
            pause_game: self.pauses_game,
        }
    }

    fn set_menu_up(&mut self, up: bool) {
        self.visible = up;
        log::debug!("hook `{}` {}", self.name, if up { "opened" } else { "closed" });
        let listeners = if up { &mut self.on_open } else { &mut self.on_close };
        for f in listeners.iter_mut() {
            f();
        }
    }

    fn set_menu_on_top(&mut self, on_top: bool) {
        let listeners = if on_top { &mut self.on_top } else { &mut self.on_not_top };
        for f in listeners.iter_mut() {
            f();
        }
    }
}
