//! Menutee UI: stacked, controller/keyboard/mouse friendly game menus.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use menutee_ui::prelude::*;
//!
//! let mut scene = MenuScene::new(MenuStackSettings::default(), HostState::new(), input);
//! let pause = scene.create_menu("pause");
//! let ctl = pause.borrow().controller();
//!
//! let config = MenuBuilder::new(true, true)
//!     .add_main_panel(
//!         PanelBuilder::new("main")
//!             .add_widget(ButtonBuilder::new("resume").text("Resume").on_press({
//!                 let ctl = ctl.clone();
//!                 move || ctl.exit_menu()
//!             }))
//!             .add_widget(ButtonBuilder::new("options").text("Options").on_press({
//!                 let ctl = ctl.clone();
//!                 move || ctl.push_panel("options")
//!             })),
//!     )
//!     .add_panel(options_panel(&ctl))
//!     .build()?;
//!
//! MenuGenerator::new().create_menu(&mut pause.borrow_mut(), config);
//! scene.start();
//! loop { /* feed input */ scene.frame(); }
//! ```
//!
//! # Pieces
//!
//! - [`stack::MenuStack`] decides which menu is modal and owns cursor/time/pause state.
//! - [`manager::MenuManager`] is one menu's panel state machine.
//! - [`config`] holds the declarative builders that describe menus, panels and widgets.
//! - [`generator::MenuGenerator`] turns a config tree into live panels and widgets.
//! - [`scene::MenuScene`] drives everything once per host frame.

pub mod attributes;
pub mod config;
pub mod error;
pub mod event;
pub mod factory;
pub mod focus;
pub mod generator;
pub mod hook;
pub mod manager;
pub mod menu;
pub mod navigation;
pub mod palette;
pub mod panel;
pub mod reference;
pub mod scene;
pub mod stack;
pub mod widget;
pub mod widgets;

/// Everything needed to describe and run menus. Import this in game code.
pub mod prelude {
    pub use crate::attributes::MenuAttributes;
    pub use crate::config::{
        ButtonBuilder, DropdownBuilder, MenuBuilder, MenuConfig, MenuSettings, NavigationMode,
        OptionSelectBuilder, PanelBuilder, PanelConfig, PrefabId, SliderBuilder, SupplementalObject,
        TextBuilder, ToggleBuilder, WidgetConfig, WidgetKind,
    };
    pub use crate::error::ConfigError;
    pub use crate::event::{EventResult, UiEvent};
    pub use crate::factory::{DefaultWidgetFactory, PanelContainer, WidgetFactory};
    pub use crate::focus::{ElementId, FocusManager, MoveDirection, NavLinks, Navigation, SharedFocus};
    pub use crate::generator::MenuGenerator;
    pub use crate::hook::{HookHandle, MenuHook};
    pub use crate::manager::{
        DefaultSelectMode, MenuCommand, MenuController, MenuHandle, MenuManager,
        SelectionRestorationMode,
    };
    pub use crate::menu::{Menu, MenuRef};
    pub use crate::navigation::NavigationCtx;
    pub use crate::palette::{PaletteConfig, SelectableState};
    pub use crate::panel::PanelManager;
    pub use crate::reference::ValueRef;
    pub use crate::scene::{MenuScene, SharedInput};
    pub use crate::stack::{MenuStack, MenuStackSettings, SharedStack};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{
        button::Button, dropdown::Dropdown, option_select::OptionSelect, slider::Slider,
        text::Text, toggle::Toggle,
    };

    // Host primitives everyone needs.
    pub use menutee_engine::core::{CursorLockMode, HostControls, HostState};
    pub use menutee_engine::input::{InputDeviceKind, InputSnapshot, MenuInputMediator, ScriptedInput};
    pub use menutee_engine::paint::Color;
}
