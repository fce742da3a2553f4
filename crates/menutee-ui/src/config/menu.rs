use crate::attributes::MenuAttributes;
use crate::error::ConfigError;
use crate::palette::PaletteConfig;

use super::panel::{IntoPanelConfig, PanelConfig};

/// Called with `(old_key, new_key)` whenever a menu's active panel changes.
/// `None` means "no panel" (the menu is closed).
pub type PanelChangeCallback = Box<dyn FnMut(Option<&str>, Option<&str>)>;

/// When a freshly shown panel gets its default selectable focused.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum DefaultSelectMode {
    Always,
    /// Unless the last input came from a pointer.
    #[default]
    Contextual,
    Never,
}

/// What to do when focus is empty while the menu is on top.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq)]
pub enum SelectionRestorationMode {
    Never,
    /// Restore the last valid selection, else the panel default.
    Always,
    /// Restore the panel default on the first directional input.
    #[default]
    OnInput,
}

/// Menu-wide behaviour, copied into the live manager.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuSettings {
    pub toggleable: bool,
    pub starts_open: bool,
    pub menu_pauses_game: bool,
    /// Replaces the pause/non-pause preset when set.
    pub attributes_override: Option<MenuAttributes>,
    pub default_select_mode: DefaultSelectMode,
    pub selection_restoration_mode: SelectionRestorationMode,
    /// Clear the focus slot when another menu goes on top. This menu's own
    /// widgets lose focus while covered either way; it is restored on return.
    pub clear_selection_when_not_top: bool,
    pub main_panel_key: String,
    pub panel_keys: Vec<String>,
}

impl MenuSettings {
    pub fn menu_attributes(&self) -> MenuAttributes {
        match self.attributes_override {
            Some(a) => a,
            None if self.menu_pauses_game => MenuAttributes::standard_pause_menu(),
            None => MenuAttributes::standard_non_pause_menu(),
        }
    }
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            toggleable: false,
            starts_open: true,
            menu_pauses_game: false,
            attributes_override: None,
            default_select_mode: DefaultSelectMode::default(),
            selection_restoration_mode: SelectionRestorationMode::default(),
            clear_selection_when_not_top: true,
            main_panel_key: String::new(),
            panel_keys: Vec::new(),
        }
    }
}

/// A validated menu description, consumed by the generator.
pub struct MenuConfig {
    pub settings: MenuSettings,
    pub panels: Vec<PanelConfig>,
    pub panel_change_callbacks: Vec<PanelChangeCallback>,
    pub palette: Option<PaletteConfig>,
}

// ── MenuBuilder ───────────────────────────────────────────────────────────

/// Accumulates a menu description; validates in [`build`](Self::build).
pub struct MenuBuilder {
    settings: MenuSettings,
    main_panel_key: Option<String>,
    panels: Vec<Result<PanelConfig, ConfigError>>,
    panel_change_callbacks: Vec<PanelChangeCallback>,
    palette: Option<PaletteConfig>,
}

impl MenuBuilder {
    /// `toggleable_and_starts_closed`: an in-game menu the player opens with
    /// the toggle input. Otherwise the menu opens on start and cannot be
    /// toggled (a title screen).
    pub fn new(toggleable_and_starts_closed: bool, pauses_game: bool) -> Self {
        Self {
            settings: MenuSettings {
                toggleable: toggleable_and_starts_closed,
                starts_open: !toggleable_and_starts_closed,
                menu_pauses_game: pauses_game,
                ..MenuSettings::default()
            },
            main_panel_key: None,
            panels: Vec::new(),
            panel_change_callbacks: Vec::new(),
            palette: None,
        }
    }

    pub fn toggleable(mut self, v: bool) -> Self { self.settings.toggleable = v; self }
    pub fn starts_open(mut self, v: bool) -> Self { self.settings.starts_open = v; self }
    pub fn pauses_game(mut self, v: bool) -> Self { self.settings.menu_pauses_game = v; self }
    pub fn attributes(mut self, v: MenuAttributes) -> Self { self.settings.attributes_override = Some(v); self }
    pub fn default_select_mode(mut self, v: DefaultSelectMode) -> Self { self.settings.default_select_mode = v; self }
    pub fn selection_restoration_mode(mut self, v: SelectionRestorationMode) -> Self {
        self.settings.selection_restoration_mode = v;
        self
    }
    pub fn clear_selection_when_not_top(mut self, v: bool) -> Self {
        self.settings.clear_selection_when_not_top = v;
        self
    }
    pub fn palette(mut self, v: PaletteConfig) -> Self { self.palette = Some(v); self }
    pub fn main_panel_key(mut self, key: impl Into<String>) -> Self {
        self.main_panel_key = Some(key.into());
        self
    }

    pub fn add_panel(mut self, panel: impl IntoPanelConfig) -> Self {
        self.panels.push(panel.into_panel_config());
        self
    }

    /// Adds a panel and makes it the one shown when the menu opens.
    pub fn add_main_panel(mut self, panel: impl IntoPanelConfig) -> Self {
        let panel = panel.into_panel_config();
        if let Ok(cfg) = &panel {
            self.main_panel_key = Some(cfg.key.clone());
        }
        self.panels.push(panel);
        self
    }

    /// Inserts at `index`, clamped to the current panel count.
    pub fn insert_panel(mut self, index: usize, panel: impl IntoPanelConfig) -> Self {
        let index = index.min(self.panels.len());
        self.panels.insert(index, panel.into_panel_config());
        self
    }

    pub fn on_panel_change(mut self, f: impl FnMut(Option<&str>, Option<&str>) + 'static) -> Self {
        self.panel_change_callbacks.push(Box::new(f));
        self
    }

    /// Validates panel keys and fills the main panel (first panel) when unset.
    pub fn build(self) -> Result<MenuConfig, ConfigError> {
        let panels = self.panels.into_iter().collect::<Result<Vec<_>, _>>()?;
        if panels.is_empty() {
            return Err(ConfigError::NoPanels);
        }
        for (i, p) in panels.iter().enumerate() {
            if panels[..i].iter().any(|other| other.key == p.key) {
                return Err(ConfigError::DuplicatePanelKey(p.key.clone()));
            }
        }

        let main_panel_key = match self.main_panel_key {
            Some(key) if panels.iter().any(|p| p.key == key) => key,
            Some(key) => return Err(ConfigError::UnknownMainPanel(key)),
            None => panels[0].key.clone(),
        };

        let mut settings = self.settings;
        settings.main_panel_key = main_panel_key;
        settings.panel_keys = panels.iter().map(|p| p.key.clone()).collect();

        Ok(MenuConfig {
            settings,
            panels,
            panel_change_callbacks: self.panel_change_callbacks,
            palette: self.palette,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::panel::PanelBuilder;

    #[test]
    fn toggleable_menu_starts_closed() {
        let cfg = MenuBuilder::new(true, true).add_panel(PanelBuilder::new("main")).build().unwrap();
        assert!(cfg.settings.toggleable);
        assert!(!cfg.settings.starts_open);
        assert_eq!(cfg.settings.menu_attributes(), MenuAttributes::standard_pause_menu());
    }

    #[test]
    fn title_menu_starts_open() {
        let cfg = MenuBuilder::new(false, false).add_panel(PanelBuilder::new("main")).build().unwrap();
        assert!(!cfg.settings.toggleable);
        assert!(cfg.settings.starts_open);
        assert_eq!(cfg.settings.menu_attributes(), MenuAttributes::standard_non_pause_menu());
    }

    #[test]
    fn main_panel_defaults_to_first() {
        let cfg = MenuBuilder::new(false, true)
            .add_panel(PanelBuilder::new("main"))
            .add_panel(PanelBuilder::new("options"))
            .build()
            .unwrap();
        assert_eq!(cfg.settings.main_panel_key, "main");
        assert_eq!(cfg.settings.panel_keys, vec!["main", "options"]);
    }

    #[test]
    fn add_main_panel_wins() {
        let cfg = MenuBuilder::new(false, true)
            .add_panel(PanelBuilder::new("options"))
            .add_main_panel(PanelBuilder::new("main"))
            .build()
            .unwrap();
        assert_eq!(cfg.settings.main_panel_key, "main");
    }

    #[test]
    fn insert_panel_orders_keys() {
        let cfg = MenuBuilder::new(false, true)
            .add_panel(PanelBuilder::new("b"))
            .insert_panel(0, PanelBuilder::new("a"))
            .build()
            .unwrap();
        assert_eq!(cfg.settings.panel_keys, vec!["a", "b"]);
        assert_eq!(cfg.settings.main_panel_key, "a");
    }

    #[test]
    fn no_panels_rejected() {
        assert_eq!(MenuBuilder::new(false, true).build().err(), Some(ConfigError::NoPanels));
    }

    #[test]
    fn duplicate_panels_rejected() {
        let err = MenuBuilder::new(false, true)
            .add_panel(PanelBuilder::new("x"))
            .add_panel(PanelBuilder::new("x"))
            .build()
            .err();
        assert_eq!(err, Some(ConfigError::DuplicatePanelKey("x".into())));
    }

    #[test]
    fn unknown_main_rejected() {
        let err = MenuBuilder::new(false, true)
            .add_panel(PanelBuilder::new("x"))
            .main_panel_key("y")
            .build()
            .err();
        assert_eq!(err, Some(ConfigError::UnknownMainPanel("y".into())));
    }

    #[test]
    fn attributes_override_replaces_preset() {
        let cfg = MenuBuilder::new(true, true)
            .attributes(MenuAttributes::standard_in_game())
            .add_panel(PanelBuilder::new("hud"))
            .build()
            .unwrap();
        assert_eq!(cfg.settings.menu_attributes(), MenuAttributes::standard_in_game());
    }
}
