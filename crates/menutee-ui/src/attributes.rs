use menutee_engine::core::CursorLockMode;

/// The global state a menu asks for while it sits on top of the stack.
///
/// A negative `time_scale` means "leave the game clock alone".
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct MenuAttributes {
    pub cursor_lock_mode: CursorLockMode,
    pub cursor_visible: bool,
    pub time_scale: f32,
    pub pause_game: bool,
}

impl MenuAttributes {
    /// Sentinel for [`MenuAttributes::time_scale`] that keeps the current scale.
    pub const KEEP_TIME_SCALE: f32 = -1.0;

    pub fn new(cursor_lock_mode: CursorLockMode, cursor_visible: bool, time_scale: f32, pause_game: bool) -> Self {
        Self { cursor_lock_mode, cursor_visible, time_scale, pause_game }
    }

    /// Free visible cursor, frozen clock, paused game.
    pub fn standard_pause_menu() -> Self {
        Self::new(CursorLockMode::None, true, 0.0, true)
    }

    /// Free visible cursor; game keeps running at its current speed.
    pub fn standard_non_pause_menu() -> Self {
        Self::new(CursorLockMode::None, true, Self::KEEP_TIME_SCALE, false)
    }

    /// Plain gameplay: locked hidden cursor, real-time clock.
    pub fn standard_in_game() -> Self {
        Self::new(CursorLockMode::Locked, false, 1.0, false)
    }

    pub fn cursor_lock_mode(mut self, v: CursorLockMode) -> Self { self.cursor_lock_mode = v; self }
    pub fn cursor_visible(mut self, v: bool) -> Self { self.cursor_visible = v; self }
    pub fn time_scale(mut self, v: f32) -> Self { self.time_scale = v; self }
    pub fn pause_game(mut self, v: bool) -> Self { self.pause_game = v; self }

    /// `true` when applying these attributes writes the game clock.
    #[inline]
    pub fn changes_time_scale(&self) -> bool {
        self.time_scale >= 0.0
    }
}

impl Default for MenuAttributes {
    fn default() -> Self {
        Self::standard_pause_menu()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pause_preset_freezes_time() {
        let a = MenuAttributes::standard_pause_menu();
        assert!(a.pause_game);
        assert_eq!(a.time_scale, 0.0);
        assert!(a.changes_time_scale());
        assert!(a.cursor_visible);
    }

    #[test]
    fn non_pause_preset_keeps_time() {
        let a = MenuAttributes::standard_non_pause_menu();
        assert!(!a.pause_game);
        assert!(!a.changes_time_scale());
    }

    #[test]
    fn in_game_preset_locks_cursor() {
        let a = MenuAttributes::standard_in_game();
        assert_eq!(a.cursor_lock_mode, CursorLockMode::Locked);
        assert!(!a.cursor_visible);
        assert_eq!(a.time_scale, 1.0);
    }

    #[test]
    fn builder_overrides_fields() {
        let a = MenuAttributes::standard_pause_menu().time_scale(0.5).pause_game(false);
        assert_eq!(a.time_scale, 0.5);
        assert!(!a.pause_game);
    }
}
