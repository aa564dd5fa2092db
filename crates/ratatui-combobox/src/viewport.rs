/// Vertical scroll state of the dropdown list, in rows.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ViewportState {
    pub y: u16,
    pub viewport_h: u16,
    pub content_h: u16,
}

impl ViewportState {
    pub fn set_viewport(&mut self, h: u16) {
        self.viewport_h = h;
        self.clamp();
    }

    pub fn set_content(&mut self, h: u16) {
        self.content_h = h;
        self.clamp();
    }

    pub fn clamp(&mut self) {
        self.y = self.y.min(self.max_y());
    }

    pub fn to_top(&mut self) {
        self.y = 0;
    }

    pub fn scroll_y_by(&mut self, delta: i16) {
        let next = self.y as i32 + delta as i32;
        self.y = next.clamp(0, self.max_y() as i32) as u16;
    }

    /// Scrolls the least amount needed for `row` to be visible.
    pub fn ensure_visible(&mut self, row: u16) {
        if self.viewport_h == 0 {
            return;
        }
        if row < self.y {
            self.y = row;
        } else if row >= self.y.saturating_add(self.viewport_h) {
            self.y = row + 1 - self.viewport_h;
        }
        self.clamp();
    }

    pub fn overflows(&self) -> bool {
        self.content_h > self.viewport_h
    }

    fn max_y(&self) -> u16 {
        self.content_h.saturating_sub(self.viewport_h)
    }
}
