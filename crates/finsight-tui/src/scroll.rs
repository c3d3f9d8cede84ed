//! Keeps the chat view pinned to the newest message.

use finsight_ui::ChatViewport;

/// Deferred scroll-to-bottom for the chat view.
///
/// The app reports the timeline length after handling each event. A change
/// schedules a snap, which is applied in [`settle`](Self::settle) once the
/// next frame has been laid out and the real line count is known. Manual
/// scrolling holds until the next append.
#[derive(Debug, Default)]
pub struct ScrollFollower {
    seen_len: usize,
    snap_pending: bool,
    offset: usize,
    viewport: Option<ChatViewport>,
}

impl ScrollFollower {
    /// Offset to render the chat view with.
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Record the current timeline length, scheduling a snap if it changed.
    pub fn note_timeline(&mut self, len: usize) {
        if len != self.seen_len {
            self.seen_len = len;
            self.snap_pending = true;
        }
    }

    /// Apply a scheduled snap using the layout of the frame just drawn.
    ///
    /// Returns true when the offset moved and the frame should be redrawn.
    /// Without a viewport the snap is dropped.
    pub fn settle(&mut self, viewport: Option<ChatViewport>) -> bool {
        self.viewport = viewport;

        if !self.snap_pending {
            return false;
        }
        self.snap_pending = false;

        match viewport {
            Some(v) => {
                let bottom = v.max_scroll();
                let moved = self.offset != bottom;
                self.offset = bottom;
                moved
            }
            None => false,
        }
    }

    fn max_scroll(&self) -> usize {
        self.viewport.map_or(0, |v| v.max_scroll())
    }

    fn page(&self) -> usize {
        self.viewport.map_or(1, |v| v.visible_height.max(1))
    }

    pub fn page_up(&mut self) {
        self.offset = self.offset.min(self.max_scroll()).saturating_sub(self.page());
    }

    pub fn page_down(&mut self) {
        self.offset = (self.offset + self.page()).min(self.max_scroll());
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
    }

    pub fn to_bottom(&mut self) {
        self.offset = self.max_scroll();
    }
}
