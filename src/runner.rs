//! Glue between the input driver, the desktop and the output driver.

use std::io;
use std::time::{Duration, Instant};

use chrono::Local;
use crossterm::event::{Event, KeyEventKind, MouseButton, MouseEvent, MouseEventKind};
use tracing::{debug, info};

use crate::desktop::{Desktop, HitTarget};
use crate::drivers::{InputDriver, OutputDriver};
use crate::event_loop::{ControlFlow, EventLoop};
use crate::layout::{RegionMap, cell_to_point, desktop_size_for};
use crate::store::Storage;
use crate::theme;
use crate::ui::{RenderOptions, render_desktop};

#[derive(Debug, Clone)]
pub struct RunOptions {
    pub poll_interval: Duration,
    pub truecolor: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_millis(16),
            truecolor: theme::truecolor_supported(),
        }
    }
}

/// Taskbar clock text, local time as HH:MM.
pub fn clock_label() -> String {
    Local::now().format("%H:%M").to_string()
}

/// Runs the desktop until it asks to quit.
///
/// Each tick runs due deferred tasks and redraws; the regions recorded by
/// the last draw resolve the next mouse press.
pub fn run_desktop<S, D, O>(
    desktop: &mut Desktop<S>,
    input: D,
    output: &mut O,
    options: &RunOptions,
) -> io::Result<()>
where
    S: Storage,
    D: InputDriver,
    O: OutputDriver,
{
    output.enter()?;
    let mut event_loop = EventLoop::new(input, options.poll_interval);
    event_loop.driver().set_mouse_capture(true)?;
    info!("desktop session started");

    let mut regions = RegionMap::default();
    let result = event_loop.run(|_, event| {
        let now = Instant::now();
        match event {
            None => {
                desktop.tick(now);
                if desktop.should_quit() {
                    return Ok(ControlFlow::Quit);
                }
                let render = RenderOptions {
                    truecolor: options.truecolor,
                    clock: clock_label(),
                };
                output.draw(|mut frame| {
                    desktop.set_desktop_size(desktop_size_for(frame.area()));
                    render_desktop(&mut frame, desktop, &mut regions, &render);
                })?;
            }
            Some(event) => {
                dispatch_event(desktop, &regions, &event, now);
            }
        }
        if desktop.should_quit() {
            Ok(ControlFlow::Quit)
        } else {
            Ok(ControlFlow::Continue)
        }
    });

    let _ = event_loop.driver().set_mouse_capture(false);
    output.exit()?;
    info!("desktop session ended");
    result
}

/// Routes one input event. Returns whether the desktop acted on it.
pub fn dispatch_event<S: Storage>(
    desktop: &mut Desktop<S>,
    regions: &RegionMap<HitTarget>,
    event: &Event,
    now: Instant,
) -> bool {
    match event {
        Event::Key(key) if key.kind != KeyEventKind::Release => desktop.handle_key(key, now),
        Event::Mouse(mouse) => dispatch_mouse(desktop, regions, mouse, now),
        Event::Resize(width, height) => {
            debug!(width, height, "terminal resized");
            false
        }
        _ => false,
    }
}

fn dispatch_mouse<S: Storage>(
    desktop: &mut Desktop<S>,
    regions: &RegionMap<HitTarget>,
    mouse: &MouseEvent,
    now: Instant,
) -> bool {
    let point = cell_to_point(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let target = regions
                .hit_test(mouse.column, mouse.row)
                .unwrap_or(HitTarget::Desktop);
            desktop.pointer_down(target, point, now);
            true
        }
        MouseEventKind::Drag(MouseButton::Left) => desktop.pointer_move(point),
        MouseEventKind::Up(MouseButton::Left) => {
            desktop.pointer_up();
            true
        }
        _ => false,
    }
}
