use ratatui::style::Color;

// Centralized theme colors. Wallpaper gradients go through `rgb_to_color`
// so they degrade to the xterm-256 palette on terminals without truecolor.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// From a `0xRRGGBB` literal.
    pub const fn from_hex(hex: u32) -> Self {
        Self((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Linear blend, `t` in 0.0..=1.0.
    pub fn lerp(self, other: Rgb, t: f32) -> Rgb {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f32 + (b as f32 - a as f32) * t).round() as u8;
        Rgb(mix(self.0, other.0), mix(self.1, other.1), mix(self.2, other.2))
    }
}

pub fn truecolor_supported() -> bool {
    std::env::var("COLORTERM")
        .map(|v| {
            let v = v.to_lowercase();
            v.contains("truecolor") || v.contains("24bit")
        })
        .unwrap_or(false)
}

pub fn rgb_to_color(rgb: Rgb, truecolor: bool) -> Color {
    if truecolor {
        Color::Rgb(rgb.0, rgb.1, rgb.2)
    } else {
        Color::Indexed(xterm_index(rgb))
    }
}

/// Nearest xterm-256 entry, picking between the 6x6x6 cube and the gray ramp.
fn xterm_index(Rgb(r, g, b): Rgb) -> u8 {
    let to_cube = |v: u8| ((v as u16 * 5 + 127) / 255) as u8;
    let from_cube = |c: u8| match c {
        0 => 0u8,
        1 => 95,
        2 => 135,
        3 => 175,
        4 => 215,
        _ => 255,
    };
    let (r6, g6, b6) = (to_cube(r), to_cube(g), to_cube(b));
    let cube = Rgb(from_cube(r6), from_cube(g6), from_cube(b6));

    let avg = (r as u16 + g as u16 + b as u16) / 3;
    let gray_step = ((avg * 23 + 127) / 255) as u8;
    let gray_level = (8 + gray_step as u16 * 10).min(255) as u8;
    let gray = Rgb(gray_level, gray_level, gray_level);

    let source = Rgb(r, g, b);
    if distance_sq(source, gray) < distance_sq(source, cube) {
        232 + gray_step
    } else {
        16 + 36 * r6 + 6 * g6 + b6
    }
}

fn distance_sq(a: Rgb, b: Rgb) -> u32 {
    let d = |x: u8, y: u8| {
        let v = x as i32 - y as i32;
        (v * v) as u32
    };
    d(a.0, b.0) + d(a.1, b.1) + d(a.2, b.2)
}

// Taskbar
pub fn taskbar_bg() -> Color {
    Color::DarkGray
}
pub fn taskbar_fg() -> Color {
    Color::White
}
pub fn taskbar_active_bg() -> Color {
    Color::Gray
}
pub fn taskbar_active_fg() -> Color {
    Color::Black
}
pub fn launcher_fg() -> Color {
    Color::Yellow
}

// Windows
pub fn title_bg(focused: bool) -> Color {
    if focused { Color::Blue } else { Color::DarkGray }
}
pub fn title_fg() -> Color {
    Color::White
}
pub fn window_bg() -> Color {
    Color::Black
}
pub fn window_fg() -> Color {
    Color::White
}
pub fn muted_fg() -> Color {
    Color::Gray
}
pub fn selection_bg() -> Color {
    Color::Cyan
}
pub fn selection_fg() -> Color {
    Color::Black
}
pub fn close_button_fg() -> Color {
    Color::LightRed
}

// Dialog / confirm
pub fn dialog_bg() -> Color {
    Color::Black
}
pub fn dialog_fg() -> Color {
    Color::White
}
pub fn dialog_border() -> Color {
    Color::Yellow
}
pub fn dialog_selected_bg() -> Color {
    Color::Blue
}

pub fn success_fg() -> Color {
    Color::Green
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_parsing() {
        assert_eq!(Rgb::from_hex(0x1e3c72), Rgb(0x1e, 0x3c, 0x72));
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Rgb(0, 0, 0);
        let b = Rgb(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb(100, 50, 25));
        assert_eq!(a.lerp(b, 7.0), b);
    }

    #[test]
    fn truecolor_passes_rgb_through() {
        assert_eq!(rgb_to_color(Rgb(1, 2, 3), true), Color::Rgb(1, 2, 3));
    }

    #[test]
    fn palette_fallback_in_range() {
        for rgb in [Rgb(10, 20, 30), Rgb(255, 255, 255), Rgb(0, 0, 0), Rgb(128, 128, 128)] {
            match rgb_to_color(rgb, false) {
                Color::Indexed(idx) => assert!(idx >= 16),
                other => panic!("unexpected color {other:?}"),
            }
        }
    }

    #[test]
    fn pure_colors_hit_cube_corners() {
        assert_eq!(xterm_index(Rgb(255, 0, 0)), 196);
        assert_eq!(xterm_index(Rgb(0, 0, 255)), 21);
    }
}
