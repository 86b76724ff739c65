//! Shared crate-wide constants.
//!
//! Geometry values are in desktop pixels. The terminal front-end converts
//! them to cells with [`CELL_WIDTH_PX`] and [`CELL_HEIGHT_PX`].

/// Stacking priority every allocated z-order is strictly greater than.
pub const Z_ORDER_BASELINE: u64 = 100;

/// Hard floor for a window's width while resizing.
pub const MIN_WINDOW_WIDTH: u32 = 250;

/// Hard floor for a window's height while resizing.
pub const MIN_WINDOW_HEIGHT: u32 = 200;

/// Width used when a window still has an automatic size and a resize starts.
pub const DEFAULT_WINDOW_WIDTH: u32 = 400;

/// Height used when a window still has an automatic size and a resize starts.
pub const DEFAULT_WINDOW_HEIGHT: u32 = 300;

/// Vertical space reserved for the taskbar when a window is maximized.
pub const TASKBAR_HEIGHT: u32 = 40;

/// Inclusive range of the random spawn offset applied to both axes so new
/// windows do not land exactly on top of each other.
pub const SPAWN_OFFSET_MIN: i32 = 50;
pub const SPAWN_OFFSET_MAX: i32 = 150;

/// Pixel width of one terminal column.
pub const CELL_WIDTH_PX: u32 = 8;

/// Pixel height of one terminal row. Two rows hold the taskbar.
pub const CELL_HEIGHT_PX: u32 = 20;

/// Delay between a Ctrl+S save and the follow-up explorer refresh / close.
pub const SAVE_AND_CLOSE_DELAY_MS: u64 = 500;

/// How long the wallpaper confirmation stays up before the window closes.
pub const WALLPAPER_CONFIRM_DELAY_MS: u64 = 2000;

/// Fallback filename when a notepad is saved with an empty name.
pub const DEFAULT_DOCUMENT_NAME: &str = "Document.txt";
