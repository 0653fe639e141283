//! Navigation links: hyperspace trigger and eased in-page scrolling

use crate::consts::SCROLL_DURATION_MS;

/// What clicking a link should do
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkAction {
    /// In-page anchor: jump to hyperspace and scroll to the element with this id
    ScrollTo(String),
    /// Regular link: jump to hyperspace, let the browser navigate
    Navigate,
    /// Bare `#` or missing href
    Ignore,
}

impl LinkAction {
    pub fn classify(href: &str) -> Self {
        match href.strip_prefix('#') {
            Some("") => LinkAction::Ignore,
            Some(id) => LinkAction::ScrollTo(id.to_string()),
            None if href.is_empty() => LinkAction::Ignore,
            None => LinkAction::Navigate,
        }
    }

    /// Whether the click also engages warp
    pub fn engages_warp(&self) -> bool {
        !matches!(self, LinkAction::Ignore)
    }
}

/// Cubic ease-in-out: time `t` of duration `d`, from `b` by change `c`
pub fn ease_in_out_cubic(t: f64, b: f64, c: f64, d: f64) -> f64 {
    let mut t = t / (d / 2.0);
    if t < 1.0 {
        return c / 2.0 * t * t * t + b;
    }
    t -= 2.0;
    c / 2.0 * (t * t * t + 2.0) + b
}

/// An eased scroll driven by animation-frame timestamps
#[derive(Debug, Clone)]
pub struct ScrollAnimation {
    pub start: f64,
    pub distance: f64,
    pub duration: f64,
    start_time: Option<f64>,
}

impl ScrollAnimation {
    /// Scroll from `start` to `target` over the standard jump duration
    pub fn new(start: f64, target: f64) -> Self {
        Self::with_duration(start, target, SCROLL_DURATION_MS)
    }

    pub fn with_duration(start: f64, target: f64, duration: f64) -> Self {
        Self {
            start,
            distance: target - start,
            duration: duration.max(1.0),
            start_time: None,
        }
    }

    /// Scroll position at `now`, and whether the animation has finished
    ///
    /// The first sample fixes the start time.
    pub fn sample(&mut self, now: f64) -> (f64, bool) {
        let start_time = *self.start_time.get_or_insert(now);
        let elapsed = (now - start_time).max(0.0);
        if elapsed >= self.duration {
            return (self.start + self.distance, true);
        }
        (
            ease_in_out_cubic(elapsed, self.start, self.distance, self.duration),
            false,
        )
    }
}
