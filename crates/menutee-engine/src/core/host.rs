use std::fmt;

/// How the host confines the OS cursor.
#[derive(Debug, Copy, Clone, Default, Eq, PartialEq, Hash)]
pub enum CursorLockMode {
    /// Cursor moves freely.
    #[default]
    None,
    /// Cursor is locked to the window center (typical for first-person play).
    Locked,
    /// Cursor may move but stays inside the window.
    Confined,
}

impl fmt::Display for CursorLockMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Global, process-wide state a menu stack reads and writes.
///
/// Hosts implement this over their window/cursor API and game clock. The menu
/// layer is the single writer while menus are stacked; nothing else should
/// change these values behind its back or restoration will resurrect stale state.
pub trait HostControls {
    fn cursor_lock_mode(&self) -> CursorLockMode;
    fn set_cursor_lock_mode(&mut self, mode: CursorLockMode);

    fn cursor_visible(&self) -> bool;
    fn set_cursor_visible(&mut self, visible: bool);

    /// Game time scale (`1.0` = real time, `0.0` = frozen).
    fn time_scale(&self) -> f32;
    fn set_time_scale(&mut self, scale: f32);
}

/// In-memory [`HostControls`] for hosts that poll state each frame, and for tests.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct HostState {
    pub cursor_lock_mode: CursorLockMode,
    pub cursor_visible: bool,
    pub time_scale: f32,
}

impl HostState {
    pub fn new() -> Self {
        Self {
            cursor_lock_mode: CursorLockMode::None,
            cursor_visible: true,
            time_scale: 1.0,
        }
    }
}

impl Default for HostState {
    fn default() -> Self {
        Self::new()
    }
}

impl HostControls for HostState {
    fn cursor_lock_mode(&self) -> CursorLockMode { self.cursor_lock_mode }
    fn set_cursor_lock_mode(&mut self, mode: CursorLockMode) { self.cursor_lock_mode = mode; }

    fn cursor_visible(&self) -> bool { self.cursor_visible }
    fn set_cursor_visible(&mut self, visible: bool) { self.cursor_visible = visible; }

    fn time_scale(&self) -> f32 { self.time_scale }
    fn set_time_scale(&mut self, scale: f32) { self.time_scale = scale; }
}
