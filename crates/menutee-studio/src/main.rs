mod menus;

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{ensure, Result};
use menutee_engine::logging::{init_logging, LoggingConfig};
use menutee_ui::generator::MenuGenerator;
use menutee_ui::prelude::*;

use menus::GameSettings;

const STEP: Duration = Duration::from_millis(16);

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    println!();
    println!("  ╔════════════════════════════════════════╗");
    println!("  ║          MENUTEE STUDIO v0.1           ║");
    println!("  ║   scripted walk through sample menus   ║");
    println!("  ╚════════════════════════════════════════╝");
    println!();

    let settings = GameSettings::new();
    title_scene(&settings)?;
    game_scene(&settings)?;

    println!();
    println!("  final settings: {settings}");
    println!();
    Ok(())
}

// ── title scene ───────────────────────────────────────────────────────────

fn title_scene(settings: &GameSettings) -> Result<()> {
    println!("  ── title scene ──");
    let input = Rc::new(RefCell::new(ScriptedInput::new()));
    let mut scene = MenuScene::new(MenuStackSettings::default(), HostState::new(), input.clone());

    let notice = menus::self_closing_hook(&mut scene, 3);
    let title = scene.create_menu("title");
    let ctl = title.borrow().controller();
    let config = menus::title_menu(&ctl, settings, notice.clone())?;
    MenuGenerator::new().create_menu(&mut title.borrow_mut(), config);
    scene.start();

    use menutee_engine::input::InputSnapshot as I;
    let down = || I::axis(0.0, -1.0);
    input.borrow_mut().extend([
        I::idle(),
        // options: tweak look speed and volume, pick a quality level
        down(), I::idle(), I::submit(),
        down(), I::idle(), I::axis(1.0, 0.0), I::idle(), I::axis(1.0, 0.0), I::idle(),
        down(), I::idle(), I::axis(-1.0, 0.0), I::idle(),
        down(), I::submit(), down(), I::submit(),
        I::cancel(),
        // the self-closing notice
        down(), I::idle(), I::submit(), I::idle(), I::idle(), I::idle(), I::idle(),
        // extras: custom navigation, custom default selection
        down(), I::idle(), I::submit(), I::submit(), I::cancel(), I::cancel(),
        // exit
        down(), I::idle(), I::submit(),
    ]);

    let frames = run(&mut scene, &input, "title")?;
    ensure!(!notice.borrow().is_visible(), "the notice should have closed itself");
    println!("  title scene ended after {frames} frames");
    println!();
    Ok(())
}

// ── game scene ────────────────────────────────────────────────────────────

fn game_scene(settings: &GameSettings) -> Result<()> {
    println!("  ── game scene ──");
    let input = Rc::new(RefCell::new(ScriptedInput::new()));
    let mut scene = MenuScene::new(MenuStackSettings::default(), HostState::new(), input.clone());

    let pause = scene.create_menu("pause");
    let ctl = pause.borrow().controller();
    let config = menus::pause_menu(&ctl, settings)?;
    MenuGenerator::new().create_menu(&mut pause.borrow_mut(), config);
    {
        let mut stack = scene.stack().borrow_mut();
        stack.add_pause_listener(|| log::info!("game paused"));
        stack.add_unpause_listener(|| log::info!("game resumed"));
    }
    scene.start();

    use menutee_engine::input::InputSnapshot as I;
    let down = || I::axis(0.0, -1.0);
    input.borrow_mut().extend([
        I::idle(), I::idle(),
        I::toggle(),
        // options: difficulty up, subtitles on, then toggle straight out
        down(), I::idle(), I::submit(),
        down(), I::idle(), down(), I::idle(), down(), I::idle(), down(), I::idle(),
        I::axis(1.0, 0.0), I::idle(), I::axis(1.0, 0.0), I::idle(),
        down(), I::idle(), down(), I::idle(), I::submit(),
        I::toggle(),
        I::idle(),
        // reopen, resume, reopen, exit
        I::toggle(), I::submit(),
        I::toggle(), down(), I::idle(), down(), I::idle(), down(), I::idle(), I::submit(),
    ]);

    let frames = run(&mut scene, &input, "game")?;
    ensure!(pause.borrow().is_active(), "the pause menu should be open when exit is chosen");
    println!("  game scene ended after {frames} frames");
    println!();
    Ok(())
}

// ── driver ────────────────────────────────────────────────────────────────

/// Plays the queued input one frame at a time until a menu asks to exit.
fn run(scene: &mut MenuScene, input: &Rc<RefCell<ScriptedInput>>, name: &str) -> Result<u64> {
    let mut frames = 0;
    loop {
        let remaining = input.borrow().remaining();
        ensure!(remaining > 0, "{name} scene ran out of input before a menu asked to exit");
        input.borrow_mut().advance();

        let time = scene.frame_fixed(STEP);
        frames += 1;
        println!("  {:>3}  {}", time.frame_index, describe(scene));

        if scene.take_exit_request() {
            return Ok(frames);
        }
    }
}

/// One line of scene state: stack depth, clock, and what the player sees.
fn describe(scene: &MenuScene) -> String {
    let stack = scene.stack().borrow();
    let mut line = format!(
        "depth {}  time {:.1}  {}",
        stack.stack_size(),
        stack.host().time_scale(),
        if stack.paused() { "paused " } else { "running" },
    );
    drop(stack);

    let focused = scene.focus().borrow().current();
    for menu in scene.menus() {
        let m = menu.borrow();
        if !m.is_active() {
            continue;
        }
        let panel = m.active_panel();
        let label = focused
            .and_then(|id| panel.and_then(|p| p.element_by_id(id)))
            .map_or_else(|| "-".to_string(), Element::label);
        line.push_str(&format!(
            "  [{}:{}{}] > {label}",
            m.name(),
            m.active_panel_key().unwrap_or("-"),
            if m.is_on_top() { "" } else { " (covered)" },
        ));
    }
    for hook in scene.hooks() {
        let h = hook.borrow();
        if h.is_visible() {
            line.push_str(&format!("  [{}]", h.name()));
        }
    }
    line
}
