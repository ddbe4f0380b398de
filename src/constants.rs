//! Application constants
//!
//! Centralized constants for grid layout, motion tuning, UI dimensions and
//! other magic numbers used throughout the application.

/// Grid layout constants (pixels)
pub mod layout {
    /// Spacing between neighbouring cells
    pub const GAP: f64 = 4.0;

    /// Smallest readable cell edge; overcrowded grids degrade to this
    pub const MIN_CELL: f64 = 10.0;

    /// Largest cell edge, even when the viewport could fit bigger cells
    pub const MAX_CELL: f64 = 100.0;

    /// Upper bound on the number of rows the solver will consider
    pub const MAX_ROWS: usize = 10;

    /// Target moves smaller than this do not re-animate an item
    pub const RETARGET_EPSILON: f64 = 1e-3;
}

/// Motion integrator tuning
///
/// Velocities are in pixels per tick, where one tick is one 60 Hz frame.
pub mod motion {
    /// Downward acceleration added per tick while falling
    pub const GRAVITY: f64 = 0.7;

    /// Fraction of impact speed kept after hitting the target
    pub const BOUNCE: f64 = 0.25;

    /// Exponential easing factor for horizontal moves and upward retargets
    pub const EASE: f64 = 0.12;

    /// Distance from target treated as "arrived"
    pub const TOLERANCE: f64 = 0.5;

    /// Residual bounce speed below which an item snaps to rest
    pub const REST_VELOCITY: f64 = 0.3;

    /// Per-tick decay of residual bounce near the target
    pub const BOUNCE_DECAY: f64 = 0.6;

    /// Largest frame delta (in ticks) fed to the integrator
    ///
    /// Resuming a hidden terminal can produce multi-second gaps; clamping keeps
    /// a single frame from launching items through their targets.
    pub const MAX_DT: f64 = 2.0;

    /// Duration of one tick in milliseconds
    pub const TICK_MS: f64 = 1000.0 / 60.0;

    /// Spawn heights are jittered by up to this many pixels above the viewport
    pub const SPAWN_JITTER: f64 = 300.0;
}

/// UI layout and display constants
pub mod ui {
    /// Minimum terminal width in columns for usable display
    pub const MIN_WIDTH: u16 = 40;

    /// Minimum terminal height in rows for usable display
    pub const MIN_HEIGHT: u16 = 12;

    /// Horizontal pixels represented by one terminal column
    pub const PX_PER_COL: f64 = 8.0;

    /// Vertical pixels represented by one terminal row
    pub const PX_PER_ROW: f64 = 16.0;
}

/// Application state and behavior constants
pub mod app {
    /// Duration to show toast notifications (seconds)
    pub const TOAST_DURATION_SECS: u64 = 2;

    /// Maximum number of debug log lines to retain in memory
    pub const MAX_DEBUG_LOG_LINES: usize = 50;

    /// Double-click window for item activation (milliseconds)
    pub const DBLCLICK_MS: u64 = 280;
}

/// User-facing message strings
pub mod messages {
    pub const REPLAY: &str = "Replaying drop animation";

    pub const THEME_DARK: &str = "Theme: dark";

    pub const THEME_LIGHT: &str = "Theme: light";

    pub const MOUSE_ON: &str = "Mouse enabled (Ctrl+M to disable)";

    pub const MOUSE_OFF: &str = "Mouse disabled";
}
