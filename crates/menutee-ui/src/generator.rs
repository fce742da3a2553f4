//! Builds live panels and widgets from a [`MenuConfig`].
//!
//! For every panel, in order:
//!
//! 1. create each widget through the [`WidgetFactory`]; a widget the factory
//!    cannot create is logged and left inert
//! 2. apply the palette (widget override, else the menu palette)
//! 3. run the widget's creation callback
//! 4. register selectables with the focus manager
//! 5. link navigation per the panel's [`NavigationMode`]
//! 6. pick the default selectable (callback, else key, else the first
//!    selectable when the keyed widget cannot take focus)
//! 7. run the panel's creation callback
//!
//! Panels start hidden; the manager shows the main one when the menu opens.

use crate::config::panel::PanelConfig;
use crate::config::MenuConfig;
use crate::config::NavigationMode;
use crate::factory::{DefaultWidgetFactory, PanelContainer, WidgetFactory};
use crate::focus::FocusManager;
use crate::manager::MenuManager;
use crate::navigation::{wire_navigation, NavigationCtx};
use crate::palette::PaletteConfig;
use crate::panel::PanelManager;

pub struct MenuGenerator<F: WidgetFactory = DefaultWidgetFactory> {
    factory: F,
    palette: PaletteConfig,
}

impl MenuGenerator {
    pub fn new() -> Self {
        Self::with_factory(DefaultWidgetFactory::new())
    }
}

impl Default for MenuGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: WidgetFactory> MenuGenerator<F> {
    pub fn with_factory(factory: F) -> Self {
        Self { factory, palette: PaletteConfig::default() }
    }

    /// Palette for menus whose config does not carry one.
    pub fn palette(mut self, palette: PaletteConfig) -> Self {
        self.palette = palette;
        self
    }

    pub fn factory(&self) -> &F {
        &self.factory
    }

    pub fn factory_mut(&mut self) -> &mut F {
        &mut self.factory
    }

    /// Generates every panel of `config` and installs them in `manager`,
    /// replacing any panels it had.
    pub fn create_menu(&mut self, manager: &mut MenuManager, config: MenuConfig) {
        let MenuConfig { settings, panels, panel_change_callbacks, palette } = config;
        let palette = palette.unwrap_or(self.palette);

        let focus = manager.focus();
        let mut live = Vec::with_capacity(panels.len());
        {
            let mut focus = focus.borrow_mut();
            for panel in panels {
                live.push(self.create_panel(panel, &palette, &mut focus));
            }
        }
        log::debug!("generated menu `{}`: panels {:?}", manager.name(), settings.panel_keys);
        manager.install(settings, live, panel_change_callbacks);
    }

    /// Generates one hidden panel.
    pub fn create_panel(
        &mut self,
        config: PanelConfig,
        palette: &PaletteConfig,
        focus: &mut FocusManager,
    ) -> PanelManager {
        let PanelConfig {
            key,
            default_selectable_key,
            default_selectable_callback,
            widgets,
            supplemental,
            navigation,
            wrap_navigation,
            custom_navigation,
            prefab_override,
            creation_callback,
            display_callback,
        } = config;

        let container = PanelContainer { panel_key: key.clone(), prefab: prefab_override.clone() };
        let mut panel = PanelManager::new(key, prefab_override);
        for object in &supplemental {
            panel.add_supplemental(&object.name);
        }

        for widget in widgets {
            let mut init = widget.init;
            let kind_name = widget.kind.name();
            let Some(mut element) = self.factory.create(&container, &init.key, init.prefab.as_ref(), widget.kind) else {
                log::warn!(
                    "panel `{}`: {kind_name} `{}` has no widget component; leaving it inert",
                    container.panel_key,
                    init.key
                );
                panel.mark_inert(&init.key);
                continue;
            };

            element.set_palette(init.palette_override.as_ref().unwrap_or(palette));
            if let Some(callback) = init.creation_callback.take() {
                callback(&mut element);
            }
            if let Some(id) = element.selectable() {
                focus.register(id);
                focus.set_enabled(id, false);
            }
            panel.push_element(element, init.display_callback.take());
        }

        match navigation {
            NavigationMode::Custom => {
                if let Some(custom) = custom_navigation {
                    let mut ctx = NavigationCtx::new(&mut panel, focus);
                    custom(&mut ctx);
                }
            }
            mode => wire_navigation(mode, wrap_navigation, panel.selectables(), focus),
        }

        let default_input = match default_selectable_callback {
            Some(pick) => {
                let selectables = panel.selectables().to_vec();
                pick(&panel, &selectables).filter(|id| panel.contains(*id))
            }
            None => default_selectable_key
                .as_deref()
                .and_then(|k| panel.element(k))
                .and_then(|e| e.selectable())
                .or_else(|| panel.selectables().first().copied()),
        };
        if default_input.is_none() && !panel.selectables().is_empty() {
            log::debug!("panel `{}` has no default selectable", panel.key());
        }
        panel.set_default_input(default_input);

        if let Some(callback) = creation_callback {
            callback(&mut panel);
        }
        panel.set_display_callback(display_callback);
        panel
    }
}
