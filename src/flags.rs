//! UI Feature Toggles
//!
//! Opt-in/opt-out toggles for pointer interaction and motion. All features
//! default to safe values and can be disabled if they cause issues.

/// UI feature flags for controlling enhanced behaviors
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct UiFlags {
    /// Map mouse clicks onto grid items.
    ///
    /// Mouse capture itself is still toggled at runtime with Ctrl+M.
    ///
    /// Default: `true`
    pub mouse_map: bool,

    /// Require a double-click to activate an item (single click only
    /// highlights it).
    ///
    /// Default: `false`
    pub dblclick_activate: bool,

    /// Show the "n moving / settled" indicator in the footer.
    ///
    /// Default: `true`
    pub stats_overlay: bool,

    /// Skip the drop animation and place items straight into their cells.
    ///
    /// Default: `false`
    pub reduced_motion: bool,
}

impl Default for UiFlags {
    fn default() -> Self {
        UiFlags {
            mouse_map: true,
            dblclick_activate: false,
            stats_overlay: true,
            reduced_motion: false,
        }
    }
}

impl UiFlags {
    /// Create flags with all features enabled (for testing new behaviors)
    pub fn all_enabled() -> Self {
        UiFlags {
            mouse_map: true,
            dblclick_activate: true,
            stats_overlay: true,
            reduced_motion: true,
        }
    }

    /// Create flags with all features disabled (for maximum stability)
    pub fn all_disabled() -> Self {
        UiFlags {
            mouse_map: false,
            dblclick_activate: false,
            stats_overlay: false,
            reduced_motion: false,
        }
    }

    /// Create flags with only keyboard-relevant features enabled
    pub fn keyboard_only() -> Self {
        UiFlags {
            mouse_map: false,
            dblclick_activate: false,
            stats_overlay: true,
            reduced_motion: false,
        }
    }
}
