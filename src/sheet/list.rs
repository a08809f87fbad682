//! Scrollable list view holding the action rows

use ratatui::{buffer::Buffer, layout::Rect, style::Style};

use super::{action::Action, backdrop::contains, row::ActionRow};
use crate::config::SharedConfiguration;

/// Measured size of all rows stacked together
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ContentSize {
    pub width: u16,
    pub height: u16,
}

/// Fired by [`ActionList::reload`] when the measured content size moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentSizeChanged {
    pub previous: ContentSize,
    pub current: ContentSize,
}

/// List view of the sheet.
///
/// Rows are drawn through a reuse pool; a row is created only when the pool
/// is empty, and it keeps the style it was created with.
#[derive(Debug)]
pub struct ActionList {
    configuration: SharedConfiguration,
    reuse_pool: Vec<ActionRow>,
    rows_created: usize,
    row_heights: Vec<u16>,
    content_size: ContentSize,
    frame: Rect,
    scroll_offset: u16,
    scroll_enabled: bool,
    cursor: Option<usize>,
    selected: Option<usize>,
}

impl ActionList {
    pub fn new(configuration: SharedConfiguration, frame: Rect) -> Self {
        Self {
            configuration,
            reuse_pool: Vec::new(),
            rows_created: 0,
            row_heights: Vec::new(),
            content_size: ContentSize::default(),
            frame,
            scroll_offset: 0,
            scroll_enabled: true,
            cursor: None,
            selected: None,
        }
    }

    fn dequeue_row(&mut self) -> ActionRow {
        match self.reuse_pool.pop() {
            Some(mut row) => {
                row.prepare_for_reuse();
                row
            }
            None => {
                self.rows_created += 1;
                ActionRow::new(&self.configuration.get())
            }
        }
    }

    fn enqueue_row(&mut self, row: ActionRow) {
        self.reuse_pool.push(row);
    }

    /// Rows waiting in the reuse pool
    pub fn reusable_rows(&self) -> &[ActionRow] {
        &self.reuse_pool
    }

    pub fn rows_created(&self) -> usize {
        self.rows_created
    }

    /// Re-measure every row at `width`
    pub fn reload(&mut self, actions: &[Action], width: u16) -> Option<ContentSizeChanged> {
        let mut heights = Vec::with_capacity(actions.len());
        for action in actions {
            let mut row = self.dequeue_row();
            row.bind(action);
            heights.push(row.height(width));
            self.enqueue_row(row);
        }

        let current = ContentSize {
            width,
            height: heights.iter().fold(0u16, |total, h| total.saturating_add(*h)),
        };
        self.row_heights = heights;
        self.clamp_scroll_offset();

        let previous = self.content_size;
        self.content_size = current;
        (previous != current).then_some(ContentSizeChanged { previous, current })
    }

    pub fn content_size(&self) -> ContentSize {
        self.content_size
    }

    pub fn row_count(&self) -> usize {
        self.row_heights.len()
    }

    pub fn row_heights(&self) -> &[u16] {
        &self.row_heights
    }

    pub fn frame(&self) -> Rect {
        self.frame
    }

    pub fn set_frame(&mut self, frame: Rect) {
        self.frame = frame;
        self.clamp_scroll_offset();
    }

    pub fn scroll_enabled(&self) -> bool {
        self.scroll_enabled
    }

    pub fn set_scroll_enabled(&mut self, enabled: bool) {
        self.scroll_enabled = enabled;
        if !enabled {
            self.scroll_offset = 0;
        }
    }

    pub fn scroll_offset(&self) -> u16 {
        self.scroll_offset
    }

    fn max_scroll_offset(&self) -> u16 {
        self.content_size.height.saturating_sub(self.frame.height)
    }

    fn clamp_scroll_offset(&mut self) {
        self.scroll_offset = self.scroll_offset.min(self.max_scroll_offset());
    }

    /// Scroll by `delta` rows; returns whether the offset moved
    pub fn scroll_by(&mut self, delta: i32) -> bool {
        if !self.scroll_enabled {
            return false;
        }
        let target = (i32::from(self.scroll_offset) + delta)
            .clamp(0, i32::from(self.max_scroll_offset())) as u16;
        let moved = target != self.scroll_offset;
        self.scroll_offset = target;
        moved
    }

    /// Offset of row `index` from the top of the content
    pub fn row_top(&self, index: usize) -> u16 {
        self.row_heights
            .iter()
            .take(index)
            .fold(0u16, |total, h| total.saturating_add(*h))
    }

    /// Action index under a surface position
    pub fn row_at(&self, column: u16, row: u16) -> Option<usize> {
        if !contains(self.frame, column, row) {
            return None;
        }

        let content_y = row - self.frame.y + self.scroll_offset;
        let mut top = 0u16;
        for (index, height) in self.row_heights.iter().enumerate() {
            let bottom = top.saturating_add(*height);
            if content_y >= top && content_y < bottom {
                return Some(index);
            }
            top = bottom;
        }
        None
    }

    fn scroll_to_row(&mut self, index: usize) {
        if !self.scroll_enabled {
            return;
        }
        let top = self.row_top(index);
        let bottom = top.saturating_add(self.row_heights.get(index).copied().unwrap_or(0));
        if top < self.scroll_offset {
            self.scroll_offset = top;
        } else if bottom > self.scroll_offset.saturating_add(self.frame.height) {
            self.scroll_offset = bottom.saturating_sub(self.frame.height);
        }
        self.clamp_scroll_offset();
    }

    /// Keyboard highlight
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn move_cursor_down(&mut self) {
        let len = self.row_heights.len();
        if len == 0 {
            return;
        }
        let next = match self.cursor {
            Some(index) => (index + 1) % len,
            None => 0,
        };
        self.cursor = Some(next);
        self.scroll_to_row(next);
    }

    pub fn move_cursor_up(&mut self) {
        let len = self.row_heights.len();
        if len == 0 {
            return;
        }
        let next = match self.cursor {
            Some(0) | None => len - 1,
            Some(index) => index - 1,
        };
        self.cursor = Some(next);
        self.scroll_to_row(next);
    }

    /// Row drawn as selected
    pub fn selected_row(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, index: usize) {
        self.selected = Some(index);
    }

    pub fn deselect(&mut self, index: usize) {
        if self.selected == Some(index) {
            self.selected = None;
        }
    }

    /// Draw the visible part of the list, opaque over whatever is beneath
    pub fn render(&mut self, actions: &[Action], buf: &mut Buffer, highlight: Style) {
        let visible = self.frame.intersection(buf.area);
        if visible.width == 0 || visible.height == 0 {
            return;
        }

        for y in visible.top()..visible.bottom() {
            for x in visible.left()..visible.right() {
                buf.get_mut(x, y).reset();
            }
        }

        let view_top = self.scroll_offset;
        let view_bottom = view_top.saturating_add(self.frame.height);
        let mut row_top = 0u16;

        for (index, action) in actions.iter().enumerate() {
            let height = self.row_heights.get(index).copied().unwrap_or(0);
            let row_bottom = row_top.saturating_add(height);

            if height > 0 && row_bottom > view_top && row_top < view_bottom {
                let mut row = self.dequeue_row();
                row.bind(action);

                // Only the rows of this cell inside the view get a scratch buffer
                let local = Rect {
                    x: 0,
                    y: 0,
                    width: self.frame.width,
                    height,
                };
                let slice_top = view_top.saturating_sub(row_top);
                let slice_bottom = row_bottom.min(view_bottom) - row_top;
                let mut scratch = Buffer::empty(Rect::new(
                    0,
                    slice_top,
                    self.frame.width,
                    slice_bottom - slice_top,
                ));
                let highlighted = self.cursor == Some(index) || self.selected == Some(index);
                row.render(local, &mut scratch, highlighted.then_some(highlight));
                self.enqueue_row(row);

                let slice = scratch.area;
                for dy in slice.top()..slice.bottom() {
                    let content_y = row_top.saturating_add(dy);
                    let screen_y = u32::from(self.frame.y) + u32::from(content_y - view_top);
                    if screen_y >= u32::from(visible.bottom()) {
                        break;
                    }
                    for dx in slice.left()..slice.right() {
                        let screen_x = self.frame.x.saturating_add(dx);
                        if contains(visible, screen_x, screen_y as u16) {
                            *buf.get_mut(screen_x, screen_y as u16) = scratch.get(dx, dy).clone();
                        }
                    }
                }
            }

            if row_top >= view_bottom {
                break;
            }
            row_top = row_bottom;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SheetConfiguration;
    use crate::sheet::row::LineMode;

    fn actions(count: usize) -> Vec<Action> {
        (0..count).map(|i| Action::new(format!("Action {}", i))).collect()
    }

    fn list() -> ActionList {
        ActionList::new(SharedConfiguration::default(), Rect::new(0, 0, 40, 24))
    }

    #[test]
    fn test_reload_measures_rows_and_fires_once() {
        let mut list = list();
        let actions = actions(4);

        let change = list.reload(&actions, 40).expect("first measurement changes size");
        assert_eq!(change.previous, ContentSize::default());
        assert_eq!(change.current, ContentSize { width: 40, height: 12 });
        assert_eq!(list.row_heights(), &[3, 3, 3, 3]);

        assert!(list.reload(&actions, 40).is_none());
        assert!(list.reload(&actions, 30).is_some());
    }

    #[test]
    fn test_rows_are_reused() {
        let mut list = list();
        list.reload(&actions(10), 40);
        list.reload(&actions(10), 40);
        assert_eq!(list.rows_created(), 1);
        assert_eq!(list.reusable_rows().len(), 1);
    }

    #[test]
    fn test_pooled_rows_keep_creation_style() {
        let configuration = SharedConfiguration::default();
        let mut list = ActionList::new(configuration.clone(), Rect::new(0, 0, 40, 24));
        list.reload(&actions(2), 40);

        configuration.update(|c| c.wrap_text = false);
        list.reload(&actions(2), 40);

        assert_eq!(list.reusable_rows()[0].line_mode(), LineMode::Single);
    }

    #[test]
    fn test_row_at_accounts_for_scroll() {
        let mut list = list();
        list.reload(&actions(10), 40);
        list.set_frame(Rect::new(0, 14, 40, 10));
        list.set_scroll_enabled(true);

        assert_eq!(list.row_at(5, 14), Some(0));
        assert_eq!(list.row_at(5, 17), Some(1));
        assert_eq!(list.row_at(5, 13), None);

        assert!(list.scroll_by(4));
        assert_eq!(list.row_at(5, 14), Some(1));

        assert!(list.scroll_by(100));
        assert_eq!(list.scroll_offset(), 20);
        assert!(!list.scroll_by(1));
    }

    #[test]
    fn test_scroll_disabled_resets_offset() {
        let mut list = list();
        list.reload(&actions(10), 40);
        list.set_frame(Rect::new(0, 14, 40, 10));
        list.scroll_by(5);

        list.set_scroll_enabled(false);
        assert_eq!(list.scroll_offset(), 0);
        assert!(!list.scroll_by(5));
    }

    #[test]
    fn test_cursor_wraps_and_scrolls_into_view() {
        let mut list = list();
        list.reload(&actions(10), 40);
        list.set_frame(Rect::new(0, 14, 40, 10));

        list.move_cursor_up();
        assert_eq!(list.cursor(), Some(9));
        assert_eq!(list.scroll_offset(), 20);

        list.move_cursor_down();
        assert_eq!(list.cursor(), Some(0));
        assert_eq!(list.scroll_offset(), 0);
    }

    #[test]
    fn test_select_then_deselect() {
        let mut list = list();
        list.select(2);
        list.deselect(1);
        assert_eq!(list.selected_row(), Some(2));
        list.deselect(2);
        assert_eq!(list.selected_row(), None);
    }

    #[test]
    fn test_render_draws_rows_in_order() {
        let configuration = SharedConfiguration::new(SheetConfiguration::default());
        let mut list = ActionList::new(configuration, Rect::new(0, 4, 20, 6));
        let actions = vec![Action::new("Camera"), Action::new("Library")];
        list.reload(&actions, 20);

        let mut buf = Buffer::empty(Rect::new(0, 0, 20, 10));
        list.render(&actions, &mut buf, Style::default());

        // title column = margin + icon + gap
        assert_eq!(buf.get(4, 5).symbol(), "C");
        assert_eq!(buf.get(4, 8).symbol(), "L");
    }
}
