//! List row rendering one action: icon box on the left, title to its right

use ratatui::{buffer::Buffer, layout::Rect, style::Style};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::{
    action::{Action, Icon},
    backdrop::contains,
};
use crate::config::{IconSize, SheetConfiguration};

/// Space between the row edges and its content
pub const ROW_MARGIN: u16 = 1;
/// Space between the icon box and the title
pub const TITLE_GAP: u16 = 1;
/// Blank lines above and below the title
pub const TITLE_PADDING: u16 = 1;

/// How a title uses the available width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineMode {
    /// Clipped to one line with a trailing ellipsis
    Single,
    /// Word-wrapped over as many lines as needed
    Wrapped,
}

/// A reusable list cell.
///
/// Line mode, icon box and title style are captured from the configuration
/// when the row is created; later configuration writes do not reach it.
#[derive(Debug, Clone)]
pub struct ActionRow {
    icon: Option<Icon>,
    title: String,
    line_mode: LineMode,
    icon_size: IconSize,
    title_style: Style,
}

impl ActionRow {
    pub fn new(configuration: &SheetConfiguration) -> Self {
        let line_mode = if configuration.wrap_text {
            LineMode::Single
        } else {
            LineMode::Wrapped
        };

        Self {
            icon: None,
            title: String::new(),
            line_mode,
            icon_size: configuration.icon_size,
            title_style: configuration.text_style(),
        }
    }

    /// Show `action` in this row
    pub fn bind(&mut self, action: &Action) {
        self.title = action.title().to_string();
        self.icon = action.icon().cloned();
    }

    /// Reset identity before the row is handed out again
    pub fn prepare_for_reuse(&mut self) {
        self.icon = None;
    }

    pub fn icon(&self) -> Option<&Icon> {
        self.icon.as_ref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn line_mode(&self) -> LineMode {
        self.line_mode
    }

    /// Columns left for the title in a row of `row_width`
    pub fn title_width(&self, row_width: u16) -> u16 {
        row_width
            .saturating_sub(ROW_MARGIN * 2)
            .saturating_sub(self.icon_size.width)
            .saturating_sub(TITLE_GAP)
    }

    /// Title as laid out in a row of `row_width`
    pub fn title_lines(&self, row_width: u16) -> Vec<String> {
        let width = self.title_width(row_width);
        match self.line_mode {
            LineMode::Single => vec![truncate(&self.title, width)],
            LineMode::Wrapped => wrap(&self.title, width),
        }
    }

    /// Measured height of the row
    pub fn height(&self, row_width: u16) -> u16 {
        let lines = u16::try_from(self.title_lines(row_width).len()).unwrap_or(u16::MAX);
        lines
            .max(self.icon_size.height)
            .saturating_add(TITLE_PADDING * 2)
    }

    /// Draw the row into `area`, filling it with `highlight` when given
    pub fn render(&self, area: Rect, buf: &mut Buffer, highlight: Option<Style>) {
        // Rows narrower than their chrome draw only what fits
        let clip = area.intersection(buf.area);
        if let Some(style) = highlight {
            buf.set_style(clip, style);
        }

        let lines = self.title_lines(area.width);
        let content_left = area.x.saturating_add(ROW_MARGIN);

        if let Some(icon) = &self.icon {
            let box_top = area
                .y
                .saturating_add(area.height.saturating_sub(self.icon_size.height) / 2);
            let glyph_y = box_top.saturating_add(self.icon_size.height.saturating_sub(1) / 2);
            if self.icon_size.width > 0 && contains(clip, content_left, glyph_y) {
                buf.set_stringn(
                    content_left,
                    glyph_y,
                    icon.glyph(),
                    self.icon_size.width as usize,
                    Style::default(),
                );
            }
        }

        let title_x = content_left
            .saturating_add(self.icon_size.width)
            .saturating_add(TITLE_GAP);
        let title_width = self.title_width(area.width) as usize;
        if title_width == 0 {
            return;
        }
        let line_count = u16::try_from(lines.len()).unwrap_or(u16::MAX);
        let title_top = area
            .y
            .saturating_add(area.height.saturating_sub(line_count) / 2);
        for (offset, line) in lines.iter().enumerate() {
            let y = title_top.saturating_add(u16::try_from(offset).unwrap_or(u16::MAX));
            if !contains(clip, title_x, y) {
                continue;
            }
            buf.set_stringn(title_x, y, line, title_width, self.title_style);
        }
    }
}

/// Clip `text` to `width` columns, marking the cut with an ellipsis
fn truncate(text: &str, width: u16) -> String {
    let width = width as usize;
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut clipped = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let ch_width = ch.width().unwrap_or(0);
        if used + ch_width + 1 > width {
            break;
        }
        clipped.push(ch);
        used += ch_width;
    }
    clipped.push('…');
    clipped
}

/// Greedy word wrap by display width; words wider than a line are split
fn wrap(text: &str, width: u16) -> Vec<String> {
    let width = width as usize;
    if width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current = String::new();
    let mut used = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if used > 0 && used + 1 + word_width > width {
            lines.push(std::mem::take(&mut current));
            used = 0;
        }

        if used > 0 {
            current.push(' ');
            used += 1;
        }

        if word_width <= width {
            current.push_str(word);
            used += word_width;
            continue;
        }

        for ch in word.chars() {
            let ch_width = ch.width().unwrap_or(0);
            if used > 0 && used + ch_width > width {
                lines.push(std::mem::take(&mut current).trim_end().to_string());
                used = 0;
            }
            current.push(ch);
            used += ch_width;
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn configuration(wrap_text: bool) -> SheetConfiguration {
        SheetConfiguration {
            wrap_text,
            ..SheetConfiguration::default()
        }
    }

    #[test]
    fn test_wrap_text_true_forces_single_line() {
        let mut row = ActionRow::new(&configuration(true));
        row.bind(&Action::new("Share this photo with everyone you know"));

        assert_eq!(row.line_mode(), LineMode::Single);
        // 20 - 2 margins - 2 icon - 1 gap = 15 columns
        let lines = row.title_lines(20);
        assert_eq!(lines, vec!["Share this pho…".to_string()]);
        assert_eq!(row.height(20), 3);
    }

    #[test]
    fn test_wrap_text_false_wraps() {
        let mut row = ActionRow::new(&configuration(false));
        row.bind(&Action::new("Share this photo with everyone"));

        assert_eq!(row.line_mode(), LineMode::Wrapped);
        let lines = row.title_lines(20);
        assert_eq!(lines, vec!["Share this", "photo with", "everyone"]);
        assert_eq!(row.height(20), 5);
    }

    #[test]
    fn test_long_word_is_split() {
        assert_eq!(wrap("abcdefgh", 3), vec!["abc", "def", "gh"]);
        assert_eq!(wrap("", 5), vec![String::new()]);
    }

    #[test]
    fn test_icon_box_taller_than_title_sets_height() {
        let mut config = configuration(true);
        config.icon_size = IconSize { width: 4, height: 3 };
        let row = ActionRow::new(&config);
        assert_eq!(row.height(40), 5);
    }

    #[test]
    fn test_prepare_for_reuse_clears_icon_only() {
        let mut row = ActionRow::new(&configuration(true));
        row.bind(&Action::new("Camera").with_icon("📷"));
        assert!(row.icon().is_some());

        row.prepare_for_reuse();
        assert!(row.icon().is_none());
        assert_eq!(row.title(), "Camera");
    }

    #[test]
    fn test_render_places_icon_and_title() {
        let mut row = ActionRow::new(&configuration(true));
        row.bind(&Action::new("Files").with_icon("F"));

        let area = Rect::new(0, 0, 20, 3);
        let mut buf = Buffer::empty(area);
        row.render(area, &mut buf, None);

        assert_eq!(buf.get(1, 1).symbol(), "F");
        assert_eq!(buf.get(4, 1).symbol(), "F");
        assert_eq!(buf.get(5, 1).symbol(), "i");
        assert_eq!(buf.get(4, 0).symbol(), " ");
    }

    #[test]
    fn test_render_narrower_than_chrome_draws_what_fits() {
        let mut row = ActionRow::new(&configuration(true));
        row.bind(&Action::new("Camera").with_icon("C"));

        for width in 0..=4 {
            let area = Rect::new(0, 0, width, 3);
            let mut buf = Buffer::empty(area);
            row.render(area, &mut buf, Some(Style::default()));
        }

        let area = Rect::new(0, 0, 2, 3);
        let mut buf = Buffer::empty(area);
        row.render(area, &mut buf, None);
        assert_eq!(buf.get(1, 1).symbol(), "C");
    }

    #[test]
    fn test_oversized_icon_box_saturates() {
        let mut config = configuration(false);
        config.icon_size = IconSize {
            width: u16::MAX,
            height: u16::MAX,
        };
        let mut row = ActionRow::new(&config);
        row.bind(&Action::new("Files").with_icon("F"));

        assert_eq!(row.title_width(40), 0);
        assert_eq!(row.height(40), u16::MAX);

        let area = Rect::new(0, 0, 40, 12);
        let mut buf = Buffer::empty(area);
        row.render(area, &mut buf, None);
        assert_eq!(buf.get(1, 0).symbol(), " ");
    }

    #[test]
    fn test_render_in_offset_area_clips_to_buffer() {
        let mut row = ActionRow::new(&configuration(true));
        row.bind(&Action::new("Library").with_icon("L"));

        let mut buf = Buffer::empty(Rect::new(0, 0, 6, 6));
        row.render(Rect::new(3, 4, 20, 3), &mut buf, None);

        assert_eq!(buf.get(4, 5).symbol(), "L");
    }
}
