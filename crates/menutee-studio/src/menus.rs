//! The sample menus.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use anyhow::{Context, Result};
use menutee_ui::prelude::*;

pub const PANEL_MAIN: &str = "main";
pub const PANEL_OPTIONS: &str = "options";
pub const PANEL_OTHER: &str = "other";
pub const PANEL_THIRD: &str = "third";

const QUALITY_LEVELS: [&str; 4] = ["Low", "Medium", "High", "Ultra"];
const DIFFICULTIES: [&str; 3] = ["Story", "Normal", "Hard"];

/// Player settings the options panel edits in place.
#[derive(Clone)]
pub struct GameSettings {
    pub look_speed: ValueRef<f32>,
    pub volume: ValueRef<f32>,
    pub quality: ValueRef<i32>,
    pub difficulty: ValueRef<i32>,
    pub fullscreen: ValueRef<bool>,
    pub subtitles: ValueRef<bool>,
}

impl GameSettings {
    pub fn new() -> Self {
        Self {
            look_speed: ValueRef::new(1.0),
            volume: ValueRef::new(1.0),
            quality: ValueRef::new(2),
            difficulty: ValueRef::new(1),
            fullscreen: ValueRef::new(true),
            subtitles: ValueRef::new(false),
        }
    }
}

impl std::fmt::Display for GameSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "look {:.2}, volume {:.2}, quality {}, difficulty {}, fullscreen {}, subtitles {}",
            self.look_speed.get(),
            self.volume.get(),
            QUALITY_LEVELS.get(self.quality.get() as usize).unwrap_or(&"?"),
            DIFFICULTIES.get(self.difficulty.get() as usize).unwrap_or(&"?"),
            self.fullscreen.get(),
            self.subtitles.get(),
        )
    }
}

/// Back, look speed, volume, quality, difficulty, fullscreen, subtitles.
pub fn options_panel(key: &str, ctl: &MenuController, settings: &GameSettings) -> PanelBuilder {
    let back = ctl.clone();
    let quality = settings.quality.clone();
    let fullscreen = settings.fullscreen.clone();

    PanelBuilder::new(key)
        .add_widget(ButtonBuilder::new("back").text("Back").on_press(move || back.pop_panel()))
        .add_widget(
            SliderBuilder::bound("look", 0.1, 3.0, settings.look_speed.clone())
                .text("Look Speed")
                .on_change(|v| log::info!("look speed -> {v:.2}")),
        )
        .add_widget(
            SliderBuilder::bound("volume", 0.0, 1.0, settings.volume.clone())
                .text("Volume")
                .on_change(|v| log::info!("volume -> {v:.2}")),
        )
        .add_widget(
            DropdownBuilder::new("quality")
                .text("Quality")
                .options(QUALITY_LEVELS)
                .default_index(quality.get().max(0) as usize)
                .on_choose(move |index, name| {
                    quality.set(index as i32);
                    log::info!("quality -> {name}");
                }),
        )
        .add_widget(
            OptionSelectBuilder::bound("difficulty", settings.difficulty.clone())
                .text("Difficulty")
                .options(DIFFICULTIES)
                .loops(false)
                .hides_arrow_if_last_option(true),
        )
        .add_widget(
            ToggleBuilder::new("fullscreen", fullscreen.get())
                .text("Fullscreen")
                .on_change(move |on| {
                    fullscreen.set(on);
                    log::info!("fullscreen -> {on}");
                }),
        )
        .add_widget(
            OptionSelectBuilder::toggle_bound("subtitles", "Off", "On", settings.subtitles.clone())
                .text("Subtitles"),
        )
}

/// The title screen: opens on start, never toggles, does not pause.
///
/// "Show Other Menu" opens `hook`; "Extras" walks into panels with custom
/// navigation and a custom default selection.
pub fn title_menu(ctl: &MenuController, settings: &GameSettings, hook: MenuRef) -> Result<MenuConfig> {
    let (play, options, other, extras, exit) = (ctl.clone(), ctl.clone(), ctl.clone(), ctl.clone(), ctl.clone());
    let third = ctl.clone();

    MenuBuilder::new(false, false)
        .add_main_panel(
            PanelBuilder::new(PANEL_MAIN)
                .add_widget(ButtonBuilder::new("play").text("Play Game").on_press(move || {
                    log::info!("play pressed");
                    play.request_exit();
                }))
                .add_widget(TextBuilder::new("tagline", "Just Some Text"))
                .add_widget(ButtonBuilder::new("options").text("Options").on_press(move || options.push_panel(PANEL_OPTIONS)))
                .add_widget(ButtonBuilder::new("show_other").text("Show Other Menu").on_press(move || other.open_menu(hook.clone())))
                .add_widget(ButtonBuilder::new("extras").text("Extras").on_press(move || extras.push_panel(PANEL_OTHER)))
                .add_widget(ButtonBuilder::new("exit").text("Exit").on_press(move || exit.request_exit())),
        )
        .add_panel(options_panel(PANEL_OPTIONS, ctl, settings))
        .add_panel(
            PanelBuilder::new(PANEL_OTHER)
                .prefab_override(PrefabId::new("custom-back-panel"))
                .add_widget(ButtonBuilder::new("deeper").text("Show Empty Menu").on_press(move || third.push_panel(PANEL_THIRD)))
                .add_widget(ButtonBuilder::new("back").text("Back").on_press({
                    let ctl = ctl.clone();
                    move || ctl.pop_panel()
                }))
                .custom_navigation(|nav| nav.link_vertical(true)),
        )
        .add_panel(
            PanelBuilder::new(PANEL_THIRD)
                .prefab_override(PrefabId::new("custom-back-panel"))
                .add_widget(TextBuilder::new("empty", "Nothing here"))
                .add_widget(ButtonBuilder::new("back").text("Back").on_press({
                    let ctl = ctl.clone();
                    move || ctl.pop_panel()
                }))
                .default_selectable(|_, selectables| selectables.last().copied()),
        )
        .on_panel_change(|old, new| log::info!("title: panel {} -> {}", old.unwrap_or("-"), new.unwrap_or("-")))
        .build()
        .context("building the title menu")
}

/// The in-game pause menu: opened and closed with the toggle input, pauses the game.
pub fn pause_menu(ctl: &MenuController, settings: &GameSettings) -> Result<MenuConfig> {
    let (resume, options, exit) = (ctl.clone(), ctl.clone(), ctl.clone());

    MenuBuilder::new(true, true)
        .add_main_panel(
            PanelBuilder::new(PANEL_MAIN)
                .add_widget(ButtonBuilder::new("resume").text("Resume").on_press(move || resume.exit_menu()))
                .add_widget(ButtonBuilder::new("options").text("Options").on_press(move || options.push_panel(PANEL_OPTIONS)))
                .add_widget(ButtonBuilder::new("restart").text("Restart").on_press(|| log::info!("restart requested")))
                .add_widget(ButtonBuilder::new("exit").text("Exit").on_press(move || exit.request_exit())),
        )
        .add_panel(options_panel(PANEL_OPTIONS, ctl, settings))
        .default_select_mode(DefaultSelectMode::Always)
        .on_panel_change(|old, new| log::info!("pause: panel {} -> {}", old.unwrap_or("-"), new.unwrap_or("-")))
        .build()
        .context("building the pause menu")
}

/// A non-pausing overlay that closes itself `frames` frames after opening.
pub fn self_closing_hook(
    scene: &mut MenuScene,
    frames: u64,
) -> HookHandle {
    let hook = scene.add_hook(
        MenuHook::new("notice").pauses_game(false).time_scale(MenuAttributes::KEEP_TIME_SCALE),
    );
    let weak: Weak<RefCell<MenuHook>> = Rc::downgrade(&hook);
    let deferred = scene.deferred().clone();
    let stack = scene.stack().clone();
    hook.borrow_mut().on_open(move || {
        let weak = weak.clone();
        let stack = stack.clone();
        deferred.borrow_mut().after_frames(frames, move || {
            if let Some(hook) = weak.upgrade() {
                let menu: MenuRef = hook;
                stack.borrow_mut().pop_and_close_menu(&menu);
            }
        });
    });
    hook
}
