use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};

use super::{Component, ComponentContext};
use crate::apps::Launcher;
use crate::desktop::HitTarget;
use crate::layout::RegionMap;
use crate::taskbar::Taskbar;
use crate::theme;
use crate::ui::{UiFrame, safe_set_string, truncate_to_width};

/// Widest a window entry gets before its title is cut.
const ENTRY_MAX_WIDTH: usize = 20;

/// The launcher/entry/clock row of the taskbar.
pub struct TaskbarView<'a> {
    taskbar: &'a Taskbar,
    clock: &'a str,
}

struct Item {
    target: HitTarget,
    x: u16,
    label: String,
    style: Style,
}

impl<'a> TaskbarView<'a> {
    pub fn new(taskbar: &'a Taskbar, clock: &'a str) -> Self {
        Self { taskbar, clock }
    }

    fn clock_x(&self, area: Rect) -> u16 {
        let width = self.clock.chars().count() as u16;
        area.x
            .saturating_add(area.width)
            .saturating_sub(width.saturating_add(1))
    }

    fn items(&self, area: Rect) -> Vec<Item> {
        let limit = self.clock_x(area).saturating_sub(1);
        let mut items = Vec::new();
        let mut x = area.x.saturating_add(1);
        let mut place = |target, label: String, style, x: &mut u16| {
            let width = label.chars().count() as u16;
            if x.saturating_add(width) > limit {
                return false;
            }
            items.push(Item {
                target,
                x: *x,
                label,
                style,
            });
            *x = x.saturating_add(width + 1);
            true
        };

        let launcher_style = Style::default()
            .bg(theme::taskbar_bg())
            .fg(theme::launcher_fg())
            .add_modifier(Modifier::BOLD);
        let mut room = Launcher::ALL.into_iter().all(|launcher| {
            let label = format!("[{}]", launcher.short_label());
            place(HitTarget::Launcher(launcher), label, launcher_style, &mut x)
        });
        x = x.saturating_add(1);
        for (index, entry) in self.taskbar.entries().iter().enumerate() {
            if !room {
                break;
            }
            let style = if entry.active {
                Style::default()
                    .bg(theme::taskbar_active_bg())
                    .fg(theme::taskbar_active_fg())
            } else {
                Style::default()
                    .bg(theme::taskbar_bg())
                    .fg(theme::taskbar_fg())
                    .add_modifier(Modifier::DIM)
            };
            let label = format!(" {} ", truncate_to_width(&entry.label, ENTRY_MAX_WIDTH - 2));
            room = place(HitTarget::TaskbarEntry(index), label, style, &mut x);
        }
        items
    }

    /// Records launcher and entry buttons for hit-testing.
    pub fn record(&self, area: Rect, regions: &mut RegionMap<HitTarget>) {
        for item in self.items(area) {
            let width = item.label.chars().count() as u16;
            regions.push(item.target, Rect::new(item.x, area.y, width, 1));
        }
    }
}

impl Component for TaskbarView<'_> {
    fn render(&self, frame: &mut UiFrame<'_>, area: Rect, _ctx: &ComponentContext) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        let bar_style = Style::default().bg(theme::taskbar_bg()).fg(theme::taskbar_fg());
        frame.fill(Rect { height: 1, ..area }, bar_style);
        let bounds = area.intersection(frame.area());
        let items = self.items(area);
        let buffer = frame.buffer_mut();
        for item in &items {
            safe_set_string(buffer, bounds, item.x, area.y, &item.label, item.style);
        }
        safe_set_string(
            buffer,
            bounds,
            self.clock_x(area),
            area.y,
            self.clock,
            bar_style.add_modifier(Modifier::BOLD),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{WindowKind, WindowRegistry};

    fn taskbar_with(titles: &[&str]) -> Taskbar {
        let mut registry = WindowRegistry::new();
        for title in titles {
            registry.register(crate::window::Window::new(
                WindowKind::Generic,
                title.to_string(),
                crate::window::Geometry::default(),
                crate::window::ZOrder::new(101),
                (),
                None,
            ));
        }
        let mut taskbar = Taskbar::new();
        taskbar.rebuild(&registry);
        taskbar
    }

    #[test]
    fn launchers_come_first_then_entries() {
        let taskbar = taskbar_with(&["Notepad", "File Explorer"]);
        let view = TaskbarView::new(&taskbar, "09:05");
        let mut regions = RegionMap::default();
        let area = Rect::new(0, 5, 100, 1);
        view.record(area, &mut regions);
        assert_eq!(regions.hit_test(1, 5), Some(HitTarget::Launcher(Launcher::Notepad)));
        let targets: Vec<HitTarget> = view.items(area).into_iter().map(|i| i.target).collect();
        assert_eq!(
            &targets[4..],
            &[HitTarget::TaskbarEntry(0), HitTarget::TaskbarEntry(1)]
        );
    }

    #[test]
    fn entries_stop_before_the_clock() {
        let titles = ["Window title that is long"; 10];
        let taskbar = taskbar_with(&titles);
        let view = TaskbarView::new(&taskbar, "09:05");
        let area = Rect::new(0, 0, 80, 1);
        let clock_x = view.clock_x(area);
        assert_eq!(clock_x, 74);
        for item in view.items(area) {
            assert!(item.x + item.label.chars().count() as u16 <= clock_x - 1);
        }
    }
}
