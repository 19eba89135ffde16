use std::fmt;

pub const NAVBAR_SCROLLED_AFTER: f64 = 50.0;
pub const BACK_TO_TOP_AFTER: f64 = 300.0;

pub const MAGNETIC_STRENGTH: f64 = 0.1;
pub const TILT_DIVISOR: f64 = 20.0;
pub const DEFAULT_PARALLAX_SPEED: f64 = 0.5;

/// Approximate frame length the counter animation is paced against.
pub const COUNTER_FRAME_MS: f64 = 16.0;
pub const DEFAULT_COUNTER_DURATION_MS: f64 = 2000.0;

pub fn navbar_scrolled(scroll_y: f64) -> bool {
    scroll_y > NAVBAR_SCROLLED_AFTER
}

pub fn back_to_top_visible(scroll_y: f64) -> bool {
    scroll_y > BACK_TO_TOP_AFTER
}

/// Element id targeted by an in-page link, `None` for a bare `#` or any
/// link that is not an anchor.
pub fn anchor_target(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scroll position that puts a section just below the fixed navbar.
pub fn scroll_target(section_top: f64, navbar_height: f64) -> f64 {
    section_top - navbar_height
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum ProjectFilter {
    #[default]
    All,
    Category(String),
}

impl ProjectFilter {
    pub fn matches(&self, category: &str) -> bool {
        match self {
            Self::All => true,
            Self::Category(c) => c == category,
        }
    }

    pub fn key(&self) -> &str {
        match self {
            Self::All => "all",
            Self::Category(c) => c,
        }
    }
}

impl From<&str> for ProjectFilter {
    fn from(value: &str) -> Self {
        match value {
            "all" => Self::All,
            c => Self::Category(c.to_string()),
        }
    }
}

impl fmt::Display for ProjectFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.key())
    }
}

/// Pointer position relative to an element's top-left corner, plus the
/// element's size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerInElement {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PointerInElement {
    fn from_center(&self) -> (f64, f64) {
        (self.x - self.width / 2.0, self.y - self.height / 2.0)
    }
}

pub fn magnetic_transform(p: PointerInElement) -> String {
    let (dx, dy) = p.from_center();
    format!(
        "translate({}px, {}px)",
        dx * MAGNETIC_STRENGTH,
        dy * MAGNETIC_STRENGTH
    )
}

pub fn tilt_transform(p: PointerInElement) -> String {
    let rotate_x = (p.y - p.height / 2.0) / TILT_DIVISOR;
    let rotate_y = (p.width / 2.0 - p.x) / TILT_DIVISOR;
    format!(
        "perspective(1000px) rotateX({rotate_x}deg) rotateY({rotate_y}deg) translateY(-5px)"
    )
}

pub fn parallax_transform(scroll_y: f64, speed: f64) -> String {
    format!("translateY({}px)", -(scroll_y * speed))
}

/// Width style for a skill bar, clamped to 0-100%.
pub fn skill_width(progress: u8) -> String {
    format!("{}%", progress.min(100))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CounterTick {
    Running(u64),
    Done(u64),
}

/// Counts from zero up to a target, one increment per frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Counter {
    value: f64,
    target: u64,
    increment: f64,
}

impl Counter {
    pub fn new(target: u64, duration_ms: f64) -> Self {
        Self {
            value: 0.0,
            target,
            increment: target as f64 / (duration_ms / COUNTER_FRAME_MS),
        }
    }

    pub fn tick(&mut self) -> CounterTick {
        self.value += self.increment;
        if self.value < self.target as f64 {
            CounterTick::Running(self.value.floor() as u64)
        } else {
            CounterTick::Done(self.target)
        }
    }
}
