//! Gesture-to-command dispatch with hold-duration and cooldown semantics.
//!
//! Each rule runs a small Idle -> Holding -> Fired machine. The cooldown is
//! global: once any rule fires a cooldown-bearing command, no rule is even
//! evaluated until the cooldown elapses, so one fired command cannot be
//! chased by a different unintended one while the hand is still mid-gesture.

use tracing::debug;

use crate::error::PodiumError;
use crate::types::{Command, GestureEvent, GestureKind};

/// Default global cooldown between dispatched commands, seconds.
pub const DEFAULT_COOLDOWN_S: f64 = 2.0;
/// Minimum re-trigger interval for zero-hold rules, seconds.
pub const MIN_RETRIGGER_S: f64 = 1.0;

/// One configurable gesture-to-command binding.
#[derive(Debug, Clone)]
pub struct GestureRule {
    pub name: String,
    pub kind: GestureKind,
    /// Event label this rule matches, e.g. `"swipe_left"`.
    pub pattern: String,
    pub confidence_threshold: f32,
    pub hold_duration_s: f64,
    /// Whether firing this rule arms the global cooldown.
    pub cooldown_applies: bool,
    pub enabled: bool,
    pub action: Command,
}

#[derive(Debug, Clone, Copy)]
struct RuleState {
    holding_since: Option<f64>,
    last_fired_s: f64,
}

impl RuleState {
    fn new() -> Self {
        Self {
            holding_since: None,
            last_fired_s: f64::NEG_INFINITY,
        }
    }
}

/// Dispatcher over an ordered rule table. All cross-frame memory lives in
/// this explicit state object, driven by the caller-supplied clock, so unit
/// tests run against synthetic time.
#[derive(Debug)]
pub struct Dispatcher {
    rules: Vec<GestureRule>,
    states: Vec<RuleState>,
    cooldown_s: f64,
    last_command_s: f64,
}

impl Dispatcher {
    /// Build from a validated rule table. Thresholds must sit in (0, 1] and
    /// hold durations must be non-negative.
    pub fn new(rules: Vec<GestureRule>, cooldown_s: f64) -> Result<Self, PodiumError> {
        for rule in &rules {
            if !(rule.confidence_threshold > 0.0 && rule.confidence_threshold <= 1.0) {
                return Err(PodiumError::config(
                    "rule table",
                    format!(
                        "rule {:?}: confidence threshold {} outside (0, 1]",
                        rule.name, rule.confidence_threshold
                    ),
                ));
            }
            if rule.hold_duration_s < 0.0 {
                return Err(PodiumError::config(
                    "rule table",
                    format!("rule {:?}: negative hold duration", rule.name),
                ));
            }
        }
        let states = vec![RuleState::new(); rules.len()];
        Ok(Self {
            rules,
            states,
            cooldown_s,
            last_command_s: f64::NEG_INFINITY,
        })
    }

    pub fn rules(&self) -> &[GestureRule] {
        &self.rules
    }

    pub fn cooldown_s(&self) -> f64 {
        self.cooldown_s
    }

    /// Runtime-adjustable global cooldown.
    pub fn set_cooldown(&mut self, cooldown_s: f64) {
        self.cooldown_s = cooldown_s.max(0.0);
    }

    /// Evaluate one frame's events against the rule table. Emits at most
    /// one command; `None` is the common, expected outcome.
    pub fn evaluate(&mut self, events: &[GestureEvent], now_s: f64) -> Option<Command> {
        // Cooldown gate: rule evaluation is skipped outright, hold timers
        // and all, until the window has elapsed.
        if now_s - self.last_command_s < self.cooldown_s {
            return None;
        }

        let mut fired = None;
        for (idx, (rule, state)) in self.rules.iter().zip(self.states.iter_mut()).enumerate() {
            if !rule.enabled {
                continue;
            }
            let matched = events.iter().any(|e| {
                e.kind == rule.kind
                    && e.label == rule.pattern
                    && e.confidence >= rule.confidence_threshold
            });
            if !matched {
                state.holding_since = None;
                continue;
            }

            if rule.hold_duration_s == 0.0 {
                if now_s - state.last_fired_s < MIN_RETRIGGER_S {
                    continue;
                }
            } else {
                match state.holding_since {
                    None => {
                        state.holding_since = Some(now_s);
                        continue;
                    }
                    Some(since) if now_s - since < rule.hold_duration_s => continue,
                    Some(_) => {}
                }
            }

            fired = Some(idx);
            break;
        }

        let idx = fired?;
        self.states[idx].last_fired_s = now_s;
        self.states[idx].holding_since = None;
        let rule = &self.rules[idx];
        if rule.cooldown_applies {
            self.last_command_s = now_s;
            // Holds are unobservable while the gate is closed, so any
            // accumulation from before it armed would be stale by the time
            // it opens. Every rule restarts its hold from scratch.
            for state in &mut self.states {
                state.holding_since = None;
            }
        }
        debug!(rule = %rule.name, action = rule.action.as_str(), now_s, "dispatching command");
        Some(rule.action.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule(name: &str, pattern: &str, hold_s: f64, action: Command) -> GestureRule {
        GestureRule {
            name: name.to_string(),
            kind: GestureKind::Static,
            pattern: pattern.to_string(),
            confidence_threshold: 0.7,
            hold_duration_s: hold_s,
            cooldown_applies: true,
            enabled: true,
            action,
        }
    }

    fn event(label: &'static str, confidence: f32, now_s: f64) -> GestureEvent {
        GestureEvent {
            label,
            kind: GestureKind::Static,
            confidence,
            timestamp_s: now_s,
        }
    }

    #[test]
    fn zero_hold_rule_fires_immediately() {
        let mut d = Dispatcher::new(vec![rule("fist", "fist", 0.0, Command::PlayPause)], 2.0)
            .expect("valid rules");
        let fired = d.evaluate(&[event("fist", 1.0, 0.0)], 0.0);
        assert_eq!(fired, Some(Command::PlayPause));
    }

    #[test]
    fn below_threshold_event_does_not_activate() {
        let mut d = Dispatcher::new(vec![rule("fist", "fist", 0.0, Command::PlayPause)], 2.0)
            .expect("valid rules");
        assert_eq!(d.evaluate(&[event("fist", 0.5, 0.0)], 0.0), None);
    }

    #[test]
    fn kind_must_match_as_well_as_label() {
        let mut d = Dispatcher::new(vec![rule("fist", "fist", 0.0, Command::PlayPause)], 2.0)
            .expect("valid rules");
        let wrong_kind = GestureEvent {
            label: "fist",
            kind: GestureKind::Motion,
            confidence: 1.0,
            timestamp_s: 0.0,
        };
        assert_eq!(d.evaluate(&[wrong_kind], 0.0), None);
    }

    #[test]
    fn zero_hold_rule_retriggers_at_most_once_per_second() {
        let mut d = Dispatcher::new(vec![rule("fist", "fist", 0.0, Command::PlayPause)], 0.0)
            .expect("valid rules");
        assert!(d.evaluate(&[event("fist", 1.0, 0.0)], 0.0).is_some());
        assert!(d.evaluate(&[event("fist", 1.0, 0.5)], 0.5).is_none());
        assert!(d.evaluate(&[event("fist", 1.0, 0.99)], 0.99).is_none());
        assert!(d.evaluate(&[event("fist", 1.0, 1.0)], 1.0).is_some());
    }

    #[test]
    fn hold_rule_never_fires_before_its_duration() {
        let mut d = Dispatcher::new(
            vec![rule("palm", "open_palm", 1.5, Command::NextSlide)],
            0.0,
        )
        .expect("valid rules");
        assert!(d.evaluate(&[event("open_palm", 1.0, 0.0)], 0.0).is_none());
        assert!(d.evaluate(&[event("open_palm", 1.0, 1.0)], 1.0).is_none());
        assert!(d.evaluate(&[event("open_palm", 1.0, 1.49)], 1.49).is_none());
        assert_eq!(
            d.evaluate(&[event("open_palm", 1.0, 1.5)], 1.5),
            Some(Command::NextSlide)
        );
    }

    #[test]
    fn interrupted_hold_resets_accumulated_time() {
        let mut d = Dispatcher::new(
            vec![rule("palm", "open_palm", 1.0, Command::NextSlide)],
            0.0,
        )
        .expect("valid rules");
        assert!(d.evaluate(&[event("open_palm", 1.0, 0.0)], 0.0).is_none());
        // Match disappears for one frame; hold restarts from scratch.
        assert!(d.evaluate(&[], 0.5).is_none());
        assert!(d.evaluate(&[event("open_palm", 1.0, 0.6)], 0.6).is_none());
        assert!(d.evaluate(&[event("open_palm", 1.0, 1.2)], 1.2).is_none());
        assert_eq!(
            d.evaluate(&[event("open_palm", 1.0, 1.6)], 1.6),
            Some(Command::NextSlide)
        );
    }

    #[test]
    fn global_cooldown_blocks_every_rule() {
        let r1 = rule("fist", "fist", 0.0, Command::PlayPause);
        let mut r2 = rule("palm", "open_palm", 0.5, Command::NextSlide);
        r2.confidence_threshold = 0.7;
        let mut d = Dispatcher::new(vec![r1, r2], 2.0).expect("valid rules");

        assert_eq!(d.evaluate(&[event("fist", 1.0, 0.0)], 0.0), Some(Command::PlayPause));
        // R2 fully satisfied during cooldown: nothing fires, nothing is
        // even evaluated, until t >= 2.0.
        for t in [0.5, 1.0, 1.5, 1.9] {
            assert_eq!(d.evaluate(&[event("open_palm", 1.0, t)], t), None);
        }
        // Evaluation resumes at 2.0: the hold starts fresh here.
        assert_eq!(d.evaluate(&[event("open_palm", 1.0, 2.0)], 2.0), None);
        assert_eq!(
            d.evaluate(&[event("open_palm", 1.0, 2.5)], 2.5),
            Some(Command::NextSlide)
        );
    }

    #[test]
    fn consecutive_fires_are_separated_by_cooldown() {
        let mut d = Dispatcher::new(vec![rule("fist", "fist", 0.0, Command::PlayPause)], 2.0)
            .expect("valid rules");
        let mut fired_at = Vec::new();
        let mut t = 0.0;
        while t < 10.0 {
            if d.evaluate(&[event("fist", 1.0, t)], t).is_some() {
                fired_at.push(t);
            }
            t += 0.1;
        }
        assert!(fired_at.len() >= 2);
        for pair in fired_at.windows(2) {
            assert!(pair[1] - pair[0] >= 2.0 - 1e-9, "fires too close: {pair:?}");
        }
    }

    #[test]
    fn hold_started_before_cooldown_does_not_survive_the_gate() {
        let hold = rule("palm", "open_palm", 1.0, Command::NextSlide);
        let instant = rule("fist", "fist", 0.0, Command::PlayPause);
        let mut d = Dispatcher::new(vec![hold, instant], 2.0).expect("valid rules");

        // Both gestures present: the hold rule starts holding, then the
        // zero-hold rule fires and arms the cooldown.
        let both = [event("open_palm", 1.0, 0.0), event("fist", 1.0, 0.0)];
        assert_eq!(d.evaluate(&both, 0.0), Some(Command::PlayPause));

        // The palm drops out during the cooldown; nothing observes it.
        for t in [0.5, 1.0, 1.5] {
            assert_eq!(d.evaluate(&[], t), None);
        }

        // Reappearing as the gate opens must start a fresh hold, not fire
        // off the stale pre-cooldown timestamp.
        assert_eq!(d.evaluate(&[event("open_palm", 1.0, 2.0)], 2.0), None);
        assert_eq!(d.evaluate(&[event("open_palm", 1.0, 2.5)], 2.5), None);
        assert_eq!(
            d.evaluate(&[event("open_palm", 1.0, 3.0)], 3.0),
            Some(Command::NextSlide)
        );
    }

    #[test]
    fn cooldown_exempt_rule_does_not_arm_the_gate() {
        let mut draw = rule("pinch", "pinch", 0.0, Command::DrawMode);
        draw.cooldown_applies = false;
        let other = rule("fist", "fist", 0.0, Command::PlayPause);
        let mut d = Dispatcher::new(vec![draw, other], 2.0).expect("valid rules");

        assert_eq!(d.evaluate(&[event("pinch", 1.0, 0.0)], 0.0), Some(Command::DrawMode));
        // The exempt fire left the gate open; an ordinary rule may fire now.
        assert_eq!(d.evaluate(&[event("fist", 1.0, 0.1)], 0.1), Some(Command::PlayPause));
    }

    #[test]
    fn disabled_rule_is_ignored() {
        let mut r = rule("fist", "fist", 0.0, Command::PlayPause);
        r.enabled = false;
        let mut d = Dispatcher::new(vec![r], 2.0).expect("valid rules");
        assert_eq!(d.evaluate(&[event("fist", 1.0, 0.0)], 0.0), None);
    }

    #[test]
    fn at_most_one_command_per_evaluation() {
        let mut d = Dispatcher::new(
            vec![
                rule("fist", "fist", 0.0, Command::PlayPause),
                rule("palm", "open_palm", 0.0, Command::NextSlide),
            ],
            0.0,
        )
        .expect("valid rules");
        let events = [event("fist", 1.0, 0.0), event("open_palm", 1.0, 0.0)];
        assert_eq!(d.evaluate(&events, 0.0), Some(Command::PlayPause));
    }

    #[test]
    fn invalid_threshold_rejected_at_construction() {
        let mut bad = rule("fist", "fist", 0.0, Command::PlayPause);
        bad.confidence_threshold = 0.0;
        assert!(Dispatcher::new(vec![bad.clone()], 2.0).is_err());
        bad.confidence_threshold = 1.2;
        assert!(Dispatcher::new(vec![bad], 2.0).is_err());
    }

    #[test]
    fn negative_hold_rejected_at_construction() {
        let mut bad = rule("fist", "fist", 0.0, Command::PlayPause);
        bad.hold_duration_s = -1.0;
        assert!(Dispatcher::new(vec![bad], 2.0).is_err());
    }
}
