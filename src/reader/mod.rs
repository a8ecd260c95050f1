//! Page-turn state machine for the chapter reader.
//!
//! The reader is driven entirely through [`ReaderState::apply`]; callers feed
//! it events from whatever input source they have (keyboard, touch, a timer)
//! and render from the returned state.


/// Minimum horizontal travel, in pixels, for a touch gesture to turn a page.
pub const SWIPE_THRESHOLD: f32 = 50.0;
/// Share of the viewport width, on each side, that acts as a page-turn zone.
pub const TAP_ZONE_FRACTION: f32 = 0.25;
/// Controls hide this long after being shown or after the last page turn.
pub const CONTROLS_HIDE_MS: u64 = 3_000;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Space,
    Escape,
    Char(char),
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value. Unknown named keys yield `None`.
    pub fn from_dom(name: &str) -> Option<Key> {
        match name {
            "ArrowLeft" => Some(Key::ArrowLeft),
            "ArrowRight" => Some(Key::ArrowRight),
            " " | "Spacebar" => Some(Key::Space),
            "Escape" | "Esc" => Some(Key::Escape),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(Key::Char(c)),
                    _ => None,
                }
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ReaderEvent {
    Next,
    Previous,
    Key(Key),
    TouchStart { x: f32 },
    TouchMove { x: f32 },
    TouchEnd,
    /// Tap on the page area at `x`, out of a viewport `width` pixels wide.
    /// The outer quarters turn pages; the centre toggles the controls.
    Tap { x: f32, width: f32 },
    /// The platform entered or left fullscreen on its own.
    FullscreenChanged(bool),
    Tick,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum TapZone {
    Previous,
    Centre,
    Next,
}

impl TapZone {
    fn locate(x: f32, width: f32) -> TapZone {
        if width.is_nan() || width <= 0.0 {
            return TapZone::Centre;
        }

        let zone = width * TAP_ZONE_FRACTION;
        if x < zone {
            TapZone::Previous
        } else if x >= width - zone {
            TapZone::Next
        } else {
            TapZone::Centre
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Touch {
    start_x: f32,
    last_x: Option<f32>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ReaderState {
    page: usize,
    page_count: usize,
    fullscreen: bool,
    controls_visible: bool,
    hide_controls_at_ms: Option<u64>,
    touch: Option<Touch>,
    closed: bool,
}

impl ReaderState {
    /// Opens the reader on the first page with controls shown.
    pub fn new(page_count: usize, now_ms: u64) -> Self {
        ReaderState {
            page: 0,
            page_count,
            fullscreen: false,
            controls_visible: true,
            hide_controls_at_ms: Some(now_ms.saturating_add(CONTROLS_HIDE_MS)),
            touch: None,
            closed: false,
        }
    }

    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_count(&self) -> usize {
        self.page_count
    }

    pub fn is_first_page(&self) -> bool {
        self.page == 0
    }

    pub fn is_last_page(&self) -> bool {
        self.page + 1 >= self.page_count
    }

    pub fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    pub fn controls_visible(&self) -> bool {
        self.controls_visible
    }

    pub fn hide_controls_at_ms(&self) -> Option<u64> {
        self.hide_controls_at_ms
    }

    /// Set once the reader was dismissed; every later event is ignored.
    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn apply(mut self, event: ReaderEvent, now_ms: u64) -> Self {
        if self.closed {
            return self;
        }

        match event {
            ReaderEvent::Next => self.turn_forward(now_ms),
            ReaderEvent::Previous => self.turn_back(now_ms),
            ReaderEvent::Key(key) => match key {
                Key::ArrowRight | Key::Space => self.turn_forward(now_ms),
                Key::ArrowLeft => self.turn_back(now_ms),
                Key::Escape => self.closed = true,
                Key::Char('f') | Key::Char('F') => self.fullscreen = !self.fullscreen,
                Key::Char(_) => {}
            },
            ReaderEvent::TouchStart { x } => {
                self.touch = Some(Touch {
                    start_x: x,
                    last_x: None,
                });
            }
            ReaderEvent::TouchMove { x } => {
                if let Some(touch) = self.touch.as_mut() {
                    touch.last_x = Some(x);
                }
            }
            ReaderEvent::TouchEnd => {
                if let Some(Touch {
                    start_x,
                    last_x: Some(last_x),
                }) = self.touch.take()
                {
                    let distance = start_x - last_x;
                    if distance > SWIPE_THRESHOLD {
                        self.turn_forward(now_ms);
                    } else if distance < -SWIPE_THRESHOLD {
                        self.turn_back(now_ms);
                    }
                }
            }
            ReaderEvent::Tap { x, width } => match TapZone::locate(x, width) {
                TapZone::Previous => self.turn_back(now_ms),
                TapZone::Next => self.turn_forward(now_ms),
                TapZone::Centre => {
                    if self.controls_visible {
                        self.controls_visible = false;
                        self.hide_controls_at_ms = None;
                    } else {
                        self.show_controls(now_ms);
                    }
                }
            },
            ReaderEvent::FullscreenChanged(fullscreen) => self.fullscreen = fullscreen,
            ReaderEvent::Tick => {
                if self
                    .hide_controls_at_ms
                    .is_some_and(|deadline| now_ms >= deadline)
                {
                    self.controls_visible = false;
                    self.hide_controls_at_ms = None;
                }
            }
        }

        self
    }

    fn turn_forward(&mut self, now_ms: u64) {
        if !self.is_last_page() {
            self.go_to(self.page + 1, now_ms);
        }
    }

    fn turn_back(&mut self, now_ms: u64) {
        if !self.is_first_page() {
            self.go_to(self.page - 1, now_ms);
        }
    }

    fn go_to(&mut self, page: usize, now_ms: u64) {
        self.page = page;
        if self.controls_visible {
            self.hide_controls_at_ms = Some(now_ms.saturating_add(CONTROLS_HIDE_MS));
        }
    }

    fn show_controls(&mut self, now_ms: u64) {
        self.controls_visible = true;
        self.hide_controls_at_ms = Some(now_ms.saturating_add(CONTROLS_HIDE_MS));
    }
}
