use crate::ui::UiFrame;
use ratatui::backend::Backend;
use std::io;

/// Where frames go. `enter`/`exit` bracket the session (alternate screen,
/// raw mode); `draw` hands one clipped frame to the renderer.
pub trait OutputDriver {
    type Backend: Backend;

    fn enter(&mut self) -> io::Result<()>;
    fn exit(&mut self) -> io::Result<()>;

    fn draw<F>(&mut self, f: F) -> io::Result<()>
    where
        F: FnOnce(UiFrame<'_>);
}
