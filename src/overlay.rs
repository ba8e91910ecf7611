/// Cached text overlays.
///
/// Text is laid out into an off-screen buffer once and re-used every frame
/// until the value it shows changes.  The surface only ever blits the
/// buffer.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Align {
    Left,
    Center,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tone {
    /// Scoreboard text.
    Board,
    /// Large result banner.
    Banner,
    /// Secondary line under the banner.
    Prompt,
}

/// One line of text positioned in overlay-local pixels, anchored the way
/// `align` says.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayLine {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub align: Align,
    pub tone: Tone,
}

/// The off-screen buffer.  `framed` fills a box behind the
/// text; otherwise only the text itself is painted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OverlayBuffer {
    pub width: f32,
    pub height: f32,
    pub framed: bool,
    pub lines: Vec<OverlayLine>,
}

pub struct CachedOverlay<K> {
    buffer: OverlayBuffer,
    drawn: Option<K>,
    force: bool,
    redraws: u32,
}

impl<K: Clone + PartialEq> CachedOverlay<K> {
    pub fn new(width: f32, height: f32, framed: bool) -> Self {
        Self {
            buffer: OverlayBuffer {
                width,
                height,
                framed,
                lines: Vec::new(),
            },
            drawn: None,
            force: true,
            redraws: 0,
        }
    }

    pub fn force_redraw(&mut self) {
        self.force = true;
    }

    pub fn needs_redraw(&self, key: &K) -> bool {
        self.force || self.drawn.as_ref() != Some(key)
    }

    /// Return the buffer for `key`, laying it out again with `layout` only
    /// if `key` differs from what was drawn last or a redraw was forced.
    pub fn refresh<F>(&mut self, key: &K, layout: F) -> &OverlayBuffer
    where
        F: FnOnce(&K) -> Vec<OverlayLine>,
    {
        if self.needs_redraw(key) {
            self.buffer.lines = layout(key);
            self.drawn = Some(key.clone());
            self.force = false;
            self.redraws += 1;
        }
        &self.buffer
    }

    /// How many times the buffer has been laid out.
    pub fn redraws(&self) -> u32 {
        self.redraws
    }
}

