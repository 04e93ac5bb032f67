/// Keeps the newest revealed line in view, the way a terminal follows output.
///
/// Follow mode moves the viewport just far enough to expose the anchor line
/// (nearest edge, no over-scroll). Scrolling up by hand disengages follow
/// mode; scrolling back to the bottom re-engages it. Purely viewport math;
/// a scroll that cannot be honored only leaves the offset clamped, it never
/// affects the animation stages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AutoScroll {
    offset: usize,
    following: bool,
    last_revision: u64,
}

impl AutoScroll {
    pub fn new() -> Self {
        Self {
            offset: 0,
            following: true,
            last_revision: 0,
        }
    }

    /// First visible content line.
    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_following(&self) -> bool {
        self.following
    }

    /// React to a content change. `revision` is the session's coalesced
    /// visible-output counter; the anchor is only chased when it moved.
    pub fn follow(&mut self, revision: u64, anchor: usize, content_height: usize, viewport: usize) {
        if viewport == 0 {
            return;
        }
        if self.following && revision != self.last_revision {
            if anchor < self.offset {
                self.offset = anchor;
            } else if anchor + 1 > self.offset + viewport {
                self.offset = anchor + 1 - viewport;
            }
        }
        self.last_revision = revision;
        self.clamp(content_height, viewport);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.offset = self.offset.saturating_sub(lines);
        self.following = false;
    }

    pub fn scroll_down(&mut self, lines: usize, content_height: usize, viewport: usize) {
        self.offset += lines;
        self.clamp(content_height, viewport);
        if self.offset == max_offset(content_height, viewport) {
            self.following = true;
        }
    }

    fn clamp(&mut self, content_height: usize, viewport: usize) {
        self.offset = self.offset.min(max_offset(content_height, viewport));
    }
}

impl Default for AutoScroll {
    fn default() -> Self {
        Self::new()
    }
}

fn max_offset(content_height: usize, viewport: usize) -> usize {
    content_height.saturating_sub(viewport)
}
