//! A simulated desktop: floating windows with z-ordering, focus, drag and
//! resize, a taskbar, and a handful of small apps over a key-value store,
//! all drawn in the terminal.

pub mod apps;
pub mod component_context;
pub mod components;
pub mod constants;
pub mod desktop;
pub mod drivers;
pub mod error;
pub mod event_loop;
pub mod keybindings;
pub mod layout;
pub mod runner;
pub mod scheduler;
pub mod store;
pub mod taskbar;
pub mod theme;
pub mod tracing_sub;
pub mod ui;
pub mod window;
