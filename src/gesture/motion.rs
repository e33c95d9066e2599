//! Trajectory classification over a rolling window of palm-center samples.
//!
//! Each tracked hand slot keeps a fixed-capacity ring of the most recent
//! palm positions. Swipes come from the net displacement across the window;
//! circles from near-constant radial distance to the window centroid.

use crate::types::{GestureEvent, GestureKind, Point};

/// Samples kept per hand slot.
pub const WINDOW_CAPACITY: usize = 10;
/// Minimum net displacement (pixels) before a swipe is considered.
pub const SWIPE_MIN_PX: f32 = 60.0;
/// Displacement that maps to full swipe confidence.
pub const SWIPE_FULL_CONFIDENCE_PX: f32 = 100.0;
/// Radial variance below this fraction of the mean radius reads as a circle.
pub const CIRCLE_VARIANCE_RATIO: f32 = 0.3;
/// Circles smaller than this mean radius (pixels) are ignored as jitter.
pub const CIRCLE_MIN_RADIUS_PX: f32 = 25.0;

const CIRCLE_CONFIDENCE: f32 = 0.8;

/// Fixed-capacity ring of timestamped palm samples. Overwrites the oldest
/// entry once full; never reallocates.
#[derive(Debug, Clone)]
struct PalmWindow {
    samples: [(Point, f64); WINDOW_CAPACITY],
    head: usize,
    len: usize,
}

impl PalmWindow {
    fn new() -> Self {
        Self {
            samples: [(Point::default(), 0.0); WINDOW_CAPACITY],
            head: 0,
            len: 0,
        }
    }

    fn push(&mut self, palm: Point, now_s: f64) {
        self.samples[self.head] = (palm, now_s);
        self.head = (self.head + 1) % WINDOW_CAPACITY;
        self.len = (self.len + 1).min(WINDOW_CAPACITY);
    }

    fn clear(&mut self) {
        self.len = 0;
        self.head = 0;
    }

    fn oldest(&self) -> Point {
        let idx = (self.head + WINDOW_CAPACITY - self.len) % WINDOW_CAPACITY;
        self.samples[idx].0
    }

    fn newest(&self) -> Point {
        let idx = (self.head + WINDOW_CAPACITY - 1) % WINDOW_CAPACITY;
        self.samples[idx].0
    }

    fn points(&self) -> impl Iterator<Item = Point> + '_ {
        let start = (self.head + WINDOW_CAPACITY - self.len) % WINDOW_CAPACITY;
        (0..self.len).map(move |i| self.samples[(start + i) % WINDOW_CAPACITY].0)
    }
}

/// Motion classifier state: one palm window per hand slot (at most two
/// simultaneous hands). A slot whose hand vanishes is cleared so a
/// reappearing hand starts a fresh trajectory.
#[derive(Debug, Clone)]
pub struct MotionClassifier {
    windows: [PalmWindow; 2],
}

impl MotionClassifier {
    pub fn new() -> Self {
        Self {
            windows: [PalmWindow::new(), PalmWindow::new()],
        }
    }

    /// Feed this frame's palm centers (slot order) and classify.
    pub fn update(&mut self, palms: &[Point], now_s: f64) -> Vec<GestureEvent> {
        let mut events = Vec::new();
        for slot in 0..self.windows.len() {
            match palms.get(slot) {
                Some(&palm) => {
                    self.windows[slot].push(palm, now_s);
                    events.extend(classify_window(&self.windows[slot], now_s));
                }
                None => self.windows[slot].clear(),
            }
        }
        events
    }

    pub fn reset(&mut self) {
        for w in &mut self.windows {
            w.clear();
        }
    }
}

impl Default for MotionClassifier {
    fn default() -> Self {
        Self::new()
    }
}

fn classify_window(window: &PalmWindow, now_s: f64) -> Vec<GestureEvent> {
    let mut events = Vec::new();
    if window.len < 2 {
        return events;
    }

    let start = window.oldest();
    let end = window.newest();
    let dx = end.x - start.x;
    let dy = end.y - start.y;
    let magnitude = (dx * dx + dy * dy).sqrt();

    if magnitude >= SWIPE_MIN_PX {
        let confidence = (magnitude / SWIPE_FULL_CONFIDENCE_PX).min(1.0);
        // Dominant-axis test; diagonals match neither and emit nothing.
        let label = if dx.abs() > 2.0 * dy.abs() {
            Some(if dx > 0.0 { "swipe_right" } else { "swipe_left" })
        } else if dy.abs() > 2.0 * dx.abs() {
            Some(if dy > 0.0 { "swipe_down" } else { "swipe_up" })
        } else {
            None
        };
        if let Some(label) = label {
            events.push(GestureEvent {
                label,
                kind: GestureKind::Motion,
                confidence,
                timestamp_s: now_s,
            });
        }
    }

    if window.len == WINDOW_CAPACITY {
        if let Some(confidence) = circle_confidence(window) {
            events.push(GestureEvent {
                label: "circle",
                kind: GestureKind::Motion,
                confidence,
                timestamp_s: now_s,
            });
        }
    }

    events
}

fn circle_confidence(window: &PalmWindow) -> Option<f32> {
    let n = window.len as f32;
    let mut cx = 0.0;
    let mut cy = 0.0;
    for p in window.points() {
        cx += p.x;
        cy += p.y;
    }
    let centroid = Point::new(cx / n, cy / n);

    let radii: Vec<f32> = window.points().map(|p| p.distance(&centroid)).collect();
    let mean_r = radii.iter().sum::<f32>() / n;
    if mean_r <= CIRCLE_MIN_RADIUS_PX {
        return None;
    }
    let variance = radii.iter().map(|r| (r - mean_r) * (r - mean_r)).sum::<f32>() / n;
    if variance < CIRCLE_VARIANCE_RATIO * mean_r {
        Some(CIRCLE_CONFIDENCE)
    } else {
        None
    }
}
