//! Configuration and script surfaces.
//!
//! Both surfaces are JSON files loaded once at startup. The strict loaders
//! return typed errors; the `*_or_default` variants implement the
//! configuration-malformed policy: log a warning and substitute the
//! built-in rule set or demonstration script, never abort.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::dispatch::{GestureRule, DEFAULT_COOLDOWN_S};
use crate::error::PodiumError;
use crate::script::matcher::{MatcherWeights, ScriptSegment};
use crate::types::{Command, GestureKind};

#[derive(Debug, Clone)]
pub struct PodiumConfig {
    pub rules_path: String,
    pub script_path: String,
    pub cooldown_s: f64,
    pub weights: MatcherWeights,
}

impl Default for PodiumConfig {
    fn default() -> Self {
        Self {
            rules_path: "rules.json".to_string(),
            script_path: "script.json".to_string(),
            cooldown_s: DEFAULT_COOLDOWN_S,
            weights: MatcherWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct RuleRecord {
    pub name: String,
    pub kind: String,
    pub pattern: String,
    pub threshold: f32,
    #[serde(default)]
    pub hold_duration_s: f64,
    #[serde(default = "default_true")]
    pub cooldown_applies: bool,
    #[serde(default = "default_true")]
    pub enabled: bool,
    pub action: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub(crate) struct SegmentRecord {
    pub text: String,
    pub slide_number: u32,
    #[serde(default)]
    pub keywords: Vec<String>,
}

fn default_true() -> bool {
    true
}

impl RuleRecord {
    fn into_rule(self) -> Result<GestureRule, PodiumError> {
        Ok(GestureRule {
            kind: GestureKind::parse(&self.kind)?,
            action: Command::parse(&self.action)?,
            name: self.name,
            pattern: self.pattern,
            confidence_threshold: self.threshold,
            hold_duration_s: self.hold_duration_s,
            cooldown_applies: self.cooldown_applies,
            enabled: self.enabled,
        })
    }

    fn from_rule(rule: &GestureRule) -> Self {
        let action = match &rule.action {
            Command::JumpToPage(n) => format!("jump_to_page:{n}"),
            other => other.as_str().to_string(),
        };
        Self {
            name: rule.name.clone(),
            kind: rule.kind.as_str().to_string(),
            pattern: rule.pattern.clone(),
            threshold: rule.confidence_threshold,
            hold_duration_s: rule.hold_duration_s,
            cooldown_applies: rule.cooldown_applies,
            enabled: rule.enabled,
            action,
        }
    }
}

/// Strict rule-file loader. Unknown kinds or action strings are rejected
/// here, once, rather than silently ignored per frame.
pub fn load_rules(path: &Path) -> Result<Vec<GestureRule>, PodiumError> {
    let data =
        std::fs::read_to_string(path).map_err(|e| PodiumError::io("read rule file", e))?;
    let records: Vec<RuleRecord> =
        serde_json::from_str(&data).map_err(|e| PodiumError::json("parse rule file", e))?;
    records.into_iter().map(RuleRecord::into_rule).collect()
}

/// Lenient rule-file loader: any failure falls back to the built-in table.
pub fn load_rules_or_default(path: &Path) -> Vec<GestureRule> {
    match load_rules(path) {
        Ok(rules) => rules,
        Err(err) => {
            warn!(path = %path.display(), %err, "rule file unusable, using built-in rules");
            builtin_rules()
        }
    }
}

/// Persist the rule table back to disk (explicit-save semantics).
pub fn save_rules(path: &Path, rules: &[GestureRule]) -> Result<(), PodiumError> {
    let records: Vec<RuleRecord> = rules.iter().map(RuleRecord::from_rule).collect();
    let data = serde_json::to_string_pretty(&records)
        .map_err(|e| PodiumError::json("serialize rule file", e))?;
    std::fs::write(path, data).map_err(|e| PodiumError::io("write rule file", e))
}

/// The fixed built-in rule set used when no rule file is available.
pub fn builtin_rules() -> Vec<GestureRule> {
    fn rule(
        name: &str,
        kind: GestureKind,
        pattern: &str,
        threshold: f32,
        hold_s: f64,
        cooldown_applies: bool,
        action: Command,
    ) -> GestureRule {
        GestureRule {
            name: name.to_string(),
            kind,
            pattern: pattern.to_string(),
            confidence_threshold: threshold,
            hold_duration_s: hold_s,
            cooldown_applies,
            enabled: true,
            action,
        }
    }

    use GestureKind::{DualHand, Motion, Static};
    vec![
        rule("swipe-next", Motion, "swipe_left", 0.6, 0.0, true, Command::NextSlide),
        rule("swipe-prev", Motion, "swipe_right", 0.6, 0.0, true, Command::PrevSlide),
        rule("palm-play-pause", Static, "open_palm", 0.8, 1.0, true, Command::PlayPause),
        rule("fist-exit", Static, "fist", 0.9, 1.5, true, Command::ExitPresentation),
        rule("pinch-draw", Static, "pinch", 0.6, 0.5, false, Command::DrawMode),
        rule("peace-erase", Static, "peace", 0.8, 0.5, true, Command::EraseMode),
        rule("rock-fullscreen", Static, "rock", 0.8, 0.5, true, Command::FullscreenToggle),
        rule("spread-zoom-in", DualHand, "spread", 0.8, 0.0, true, Command::ZoomIn),
        rule("together-zoom-out", DualHand, "together", 0.8, 0.0, true, Command::ZoomOut),
        rule("circle-scroll", Motion, "circle", 0.7, 0.0, true, Command::SpeechScrollToggle),
        rule("double-fist-prev", DualHand, "double_fist", 0.9, 0.5, true, Command::SpeechPrev),
    ]
}

/// Strict script-file loader; segment index is the record's position.
pub fn load_script(path: &Path) -> Result<Vec<ScriptSegment>, PodiumError> {
    let data =
        std::fs::read_to_string(path).map_err(|e| PodiumError::io("read script file", e))?;
    let records: Vec<SegmentRecord> =
        serde_json::from_str(&data).map_err(|e| PodiumError::json("parse script file", e))?;
    Ok(records
        .into_iter()
        .enumerate()
        .map(|(i, r)| ScriptSegment::new(i, r.text, r.slide_number, r.keywords))
        .collect())
}

/// Lenient script-file loader. An absent or unusable file yields the fixed
/// demonstration script, which is best-effort persisted for the next run.
pub fn load_script_or_default(path: &Path) -> Vec<ScriptSegment> {
    match load_script(path) {
        Ok(segments) if !segments.is_empty() => segments,
        Ok(_) => {
            warn!(path = %path.display(), "script file is empty, using demonstration script");
            demo_script()
        }
        Err(err) => {
            warn!(path = %path.display(), %err, "script file unusable, using demonstration script");
            let segments = demo_script();
            if let Err(err) = save_script(path, &segments) {
                warn!(%err, "could not persist demonstration script");
            }
            segments
        }
    }
}

/// Persist a script back to disk.
pub fn save_script(path: &Path, segments: &[ScriptSegment]) -> Result<(), PodiumError> {
    let records: Vec<SegmentRecord> = segments
        .iter()
        .map(|s| SegmentRecord {
            text: s.text.clone(),
            slide_number: s.slide_number,
            keywords: s.keywords.clone(),
        })
        .collect();
    let data = serde_json::to_string_pretty(&records)
        .map_err(|e| PodiumError::json("serialize script file", e))?;
    std::fs::write(path, data).map_err(|e| PodiumError::io("write script file", e))
}

/// Fixed 5-segment demonstration script.
pub fn demo_script() -> Vec<ScriptSegment> {
    [
        "人工智能技术在近年来得到了快速发展",
        "深度学习模型在图像识别领域表现突出",
        "自然语言处理让机器理解人类的语言",
        "多模态交互结合了手势与语音两种通道",
        "感谢大家的聆听欢迎提问",
    ]
    .iter()
    .enumerate()
    .map(|(i, text)| ScriptSegment::new(i, *text, i as u32 + 1, Vec::new()))
    .collect()
}
