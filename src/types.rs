use crate::error::PodiumError;

/// Landmarks per hand skeleton, as produced by the external pose estimator.
/// Index 0 is the wrist; 4/8/12/16/20 are the fingertips.
pub const LANDMARK_COUNT: usize = 21;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: &Point) -> f32 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// One sampled hand skeleton in image-space pixel coordinates (y grows
/// downward). Consumed and discarded after feature extraction.
#[derive(Debug, Clone)]
pub struct HandSkeleton {
    pub landmarks: Vec<Point>,
}

impl HandSkeleton {
    pub fn new(landmarks: Vec<Point>) -> Self {
        Self { landmarks }
    }
}

/// One frame from the pose source: zero, one, or two hands plus a
/// monotonic timestamp in seconds.
#[derive(Debug, Clone)]
pub struct Frame {
    pub hands: Vec<HandSkeleton>,
    pub timestamp_s: f64,
}

/// Per-finger extension flags, thumb first. Derived per skeleton per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FingerState(pub [bool; 5]);

impl FingerState {
    pub fn all_folded(&self) -> bool {
        self.0.iter().all(|&f| !f)
    }

    pub fn all_extended(&self) -> bool {
        self.0.iter().all(|&f| f)
    }
}

/// Low-level features for one hand, produced by the feature extractor.
#[derive(Debug, Clone, Copy)]
pub struct HandFeatures {
    pub fingers: FingerState,
    pub palm: Point,
    /// Thumb-tip to index-tip distance in pixels.
    pub pinch_gap_px: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Static,
    Motion,
    DualHand,
}

impl GestureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Motion => "motion",
            Self::DualHand => "dual_hand",
        }
    }

    pub fn parse(s: &str) -> Result<Self, PodiumError> {
        match s {
            "static" => Ok(Self::Static),
            "motion" => Ok(Self::Motion),
            "dual_hand" => Ok(Self::DualHand),
            other => Err(PodiumError::config(
                "gesture kind",
                format!("unknown kind {other:?}"),
            )),
        }
    }
}

/// A classified, confidence-scored gesture observation. Ephemeral: several
/// may exist per frame and all are consumed immediately by the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureEvent {
    pub label: &'static str,
    pub kind: GestureKind,
    pub confidence: f32,
    pub timestamp_s: f64,
}

/// Abstract commands emitted to the presentation-control backend. Closed
/// set, resolved from the rule file's action strings once at load time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NextSlide,
    PrevSlide,
    PlayPause,
    ExitPresentation,
    FullscreenToggle,
    DrawMode,
    EraseMode,
    ZoomIn,
    ZoomOut,
    JumpToPage(u32),
    SpeechNext,
    SpeechPrev,
    SpeechScrollToggle,
}

impl Command {
    /// Parse a rule-file action string. `jump_to_page:<n>` carries its page
    /// argument; everything else is a bare name.
    pub fn parse(s: &str) -> Result<Self, PodiumError> {
        if let Some(page) = s.strip_prefix("jump_to_page:") {
            let n: u32 = page.trim().parse().map_err(|_| {
                PodiumError::config("action", format!("bad page number in {s:?}"))
            })?;
            return Ok(Self::JumpToPage(n));
        }
        match s {
            "next_slide" => Ok(Self::NextSlide),
            "prev_slide" => Ok(Self::PrevSlide),
            "play_pause" => Ok(Self::PlayPause),
            "exit_presentation" => Ok(Self::ExitPresentation),
            "fullscreen_toggle" => Ok(Self::FullscreenToggle),
            "draw_mode" => Ok(Self::DrawMode),
            "erase_mode" => Ok(Self::EraseMode),
            "zoom_in" => Ok(Self::ZoomIn),
            "zoom_out" => Ok(Self::ZoomOut),
            "speech_next" => Ok(Self::SpeechNext),
            "speech_prev" => Ok(Self::SpeechPrev),
            "speech_scroll_toggle" => Ok(Self::SpeechScrollToggle),
            other => Err(PodiumError::config(
                "action",
                format!("unknown action {other:?}"),
            )),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NextSlide => "next_slide",
            Self::PrevSlide => "prev_slide",
            Self::PlayPause => "play_pause",
            Self::ExitPresentation => "exit_presentation",
            Self::FullscreenToggle => "fullscreen_toggle",
            Self::DrawMode => "draw_mode",
            Self::EraseMode => "erase_mode",
            Self::ZoomIn => "zoom_in",
            Self::ZoomOut => "zoom_out",
            Self::JumpToPage(_) => "jump_to_page",
            Self::SpeechNext => "speech_next",
            Self::SpeechPrev => "speech_prev",
            Self::SpeechScrollToggle => "speech_scroll_toggle",
        }
    }
}

/// Pull-based position report for the display/backend.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PositionReport {
    pub current_index: usize,
    pub slide_number: u32,
    pub confidence: f32,
    pub progress_percent: f32,
}
