//! Platform-specific configuration

use crossterm::event::KeyModifiers;

/// Platform-appropriate modifier for form shortcuts
/// - macOS: SUPER (Cmd key)
/// - Linux/Windows: CONTROL (Ctrl key)
///
/// Ctrl is accepted on every platform; this is the extra one.
#[cfg(target_os = "macos")]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::SUPER;

#[cfg(not(target_os = "macos"))]
pub const SHORTCUT_MODIFIER: KeyModifiers = KeyModifiers::CONTROL;

/// Submit shortcut display for form help text
/// Ctrl+S works on all platforms
pub const SUBMIT_SHORTCUT: &str = "Ctrl+S";

/// Add list entry shortcut display
#[cfg(target_os = "macos")]
pub const ADD_ENTRY_SHORTCUT: &str = "Cmd+N";

#[cfg(not(target_os = "macos"))]
pub const ADD_ENTRY_SHORTCUT: &str = "Ctrl+N";

/// Remove list entry shortcut display
#[cfg(target_os = "macos")]
pub const REMOVE_ENTRY_SHORTCUT: &str = "Cmd+D";

#[cfg(not(target_os = "macos"))]
pub const REMOVE_ENTRY_SHORTCUT: &str = "Ctrl+D";

/// Reveal optional section shortcut display
#[cfg(target_os = "macos")]
pub const REVEAL_SECTION_SHORTCUT: &str = "Cmd+O";

#[cfg(not(target_os = "macos"))]
pub const REVEAL_SECTION_SHORTCUT: &str = "Ctrl+O";

/// True when `modifiers` hold Ctrl or the platform shortcut modifier
pub fn is_shortcut(modifiers: KeyModifiers) -> bool {
    modifiers.contains(KeyModifiers::CONTROL) || modifiers.contains(SHORTCUT_MODIFIER)
}
