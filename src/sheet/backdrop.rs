//! Full-surface dimming layer behind the action list

use ratatui::{buffer::Buffer, layout::Rect, style::Color};

/// Assumed terminal colors for cells that still carry `Color::Reset`
const DEFAULT_BACKGROUND: (u8, u8, u8) = (0, 0, 0);
const DEFAULT_FOREGROUND: (u8, u8, u8) = (229, 229, 229);

#[derive(Debug, Clone, PartialEq)]
pub struct Backdrop {
    frame: Rect,
    opacity: f64,
}

impl Backdrop {
    /// A backdrop covering `frame`, initially transparent
    pub fn new(frame: Rect) -> Self {
        Self {
            frame,
            opacity: 0.0,
        }
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
    }

    pub fn opacity(&self) -> f64 {
        self.opacity
    }

    pub fn set_opacity(&mut self, opacity: f64) {
        self.opacity = opacity;
    }

    pub fn contains(&self, column: u16, row: u16) -> bool {
        contains(self.frame, column, row)
    }

    /// Blend every covered cell toward `color` by `alpha * opacity`
    pub fn render(&self, color: Color, alpha: f64, buf: &mut Buffer) {
        let amount = alpha * self.opacity;
        if amount <= 0.0 {
            return;
        }

        let area = self.frame.intersection(buf.area);
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                let cell = buf.get_mut(x, y);
                cell.bg = blend(cell.bg, DEFAULT_BACKGROUND, color, amount);
                cell.fg = blend(cell.fg, DEFAULT_FOREGROUND, color, amount);
            }
        }
    }
}

pub(crate) fn contains(rect: Rect, column: u16, row: u16) -> bool {
    column >= rect.left() && column < rect.right() && row >= rect.top() && row < rect.bottom()
}

/// Mix `base` toward `overlay` by `amount`.
///
/// `fallback` stands in for `base` when it is `Color::Reset`. Channels
/// saturate, so amounts outside `0.0..=1.0` are not an error.
pub fn blend(base: Color, fallback: (u8, u8, u8), overlay: Color, amount: f64) -> Color {
    let (br, bg, bb) = rgb(base).unwrap_or(fallback);
    let (or, og, ob) = rgb(overlay).unwrap_or(fallback);
    let mix = |from: u8, to: u8| (f64::from(from) + (f64::from(to) - f64::from(from)) * amount) as u8;
    Color::Rgb(mix(br, or), mix(bg, og), mix(bb, ob))
}

/// Approximate RGB value of a terminal color
fn rgb(color: Color) -> Option<(u8, u8, u8)> {
    let value = match color {
        Color::Reset => return None,
        Color::Rgb(r, g, b) => (r, g, b),
        Color::Black => (0, 0, 0),
        Color::Red => (205, 0, 0),
        Color::Green => (0, 205, 0),
        Color::Yellow => (205, 205, 0),
        Color::Blue => (0, 0, 238),
        Color::Magenta => (205, 0, 205),
        Color::Cyan => (0, 205, 205),
        Color::Gray => (229, 229, 229),
        Color::DarkGray => (127, 127, 127),
        Color::LightRed => (255, 0, 0),
        Color::LightGreen => (0, 255, 0),
        Color::LightYellow => (255, 255, 0),
        Color::LightBlue => (92, 92, 255),
        Color::LightMagenta => (255, 0, 255),
        Color::LightCyan => (0, 255, 255),
        Color::White => (255, 255, 255),
        Color::Indexed(index) => return indexed_rgb(index),
    };
    Some(value)
}

/// xterm 256-color palette
fn indexed_rgb(index: u8) -> Option<(u8, u8, u8)> {
    const ANSI: [Color; 16] = [
        Color::Black,
        Color::Red,
        Color::Green,
        Color::Yellow,
        Color::Blue,
        Color::Magenta,
        Color::Cyan,
        Color::Gray,
        Color::DarkGray,
        Color::LightRed,
        Color::LightGreen,
        Color::LightYellow,
        Color::LightBlue,
        Color::LightMagenta,
        Color::LightCyan,
        Color::White,
    ];

    match index {
        0..=15 => rgb(ANSI[index as usize]),
        16..=231 => {
            let level = |n: u8| if n == 0 { 0 } else { 55 + n * 40 };
            let n = index - 16;
            Some((level(n / 36), level((n / 6) % 6), level(n % 6)))
        }
        _ => {
            let gray = 8 + (index - 232) * 10;
            Some((gray, gray, gray))
        }
    }
}
