use menutee_engine::paint::Color;

/// Visual state of a selectable element.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SelectableState {
    Normal,
    Highlighted,
    Pressed,
    Selected,
    Disabled,
}

/// Tint colors for each [`SelectableState`], shared by a whole menu or
/// overridden per widget.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PaletteConfig {
    pub normal_color: Color,
    pub highlighted_color: Color,
    pub pressed_color: Color,
    pub selected_color: Color,
    pub disabled_color: Color,
    /// Scales every tint; values above 1 brighten.
    pub color_multiplier: f32,
    /// Seconds a renderer should take to blend between tints.
    pub fade_duration: f32,
}

impl PaletteConfig {
    pub fn normal_color(mut self, v: Color) -> Self { self.normal_color = v; self }
    pub fn highlighted_color(mut self, v: Color) -> Self { self.highlighted_color = v; self }
    pub fn pressed_color(mut self, v: Color) -> Self { self.pressed_color = v; self }
    pub fn selected_color(mut self, v: Color) -> Self { self.selected_color = v; self }
    pub fn disabled_color(mut self, v: Color) -> Self { self.disabled_color = v; self }
    pub fn color_multiplier(mut self, v: f32) -> Self { self.color_multiplier = v; self }
    pub fn fade_duration(mut self, v: f32) -> Self { self.fade_duration = v; self }

    /// The tint for `state` with the multiplier applied.
    pub fn color_for(&self, state: SelectableState) -> Color {
        let base = match state {
            SelectableState::Normal => self.normal_color,
            SelectableState::Highlighted => self.highlighted_color,
            SelectableState::Pressed => self.pressed_color,
            SelectableState::Selected => self.selected_color,
            SelectableState::Disabled => self.disabled_color,
        };
        base.scaled(self.color_multiplier)
    }
}

impl Default for PaletteConfig {
    fn default() -> Self {
        Self {
            normal_color: Color::WHITE,
            highlighted_color: Color::from_srgb_u8(245, 245, 245, 255),
            pressed_color: Color::from_srgb_u8(200, 200, 200, 255),
            selected_color: Color::from_srgb_u8(245, 245, 245, 255),
            disabled_color: Color::from_srgb_u8(200, 200, 200, 128),
            color_multiplier: 1.0,
            fade_duration: 0.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = PaletteConfig::default();
        assert_eq!(p.color_multiplier, 1.0);
        assert_eq!(p.fade_duration, 0.1);
        assert_eq!(p.color_for(SelectableState::Normal), Color::WHITE);
    }

    #[test]
    fn multiplier_scales_and_clamps() {
        let p = PaletteConfig::default()
            .normal_color(Color::from_straight(0.5, 0.5, 0.5, 1.0))
            .color_multiplier(4.0);
        let c = p.color_for(SelectableState::Normal);
        assert!(c.r <= 1.0 && c.g <= 1.0 && c.b <= 1.0);
    }
}
