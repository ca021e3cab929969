use serde::{Deserialize, Serialize};

use crate::WaveParameters;

/// Match score (percent) the user wave must reach against the target.
pub const MATCH_THRESHOLD: f32 = 97.5;

/// Numeric wave fields the player can adjust during a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WaveField {
    Speed,
    Amplitude,
    Wavelength,
    SegmentLength,
    LineWidth,
    TimeModifier,
}

impl WaveField {
    /// All adjustable fields, in scoring order.
    pub const ALL: [WaveField; 6] = [
        WaveField::Speed,
        WaveField::Amplitude,
        WaveField::Wavelength,
        WaveField::SegmentLength,
        WaveField::LineWidth,
        WaveField::TimeModifier,
    ];

    fn get(self, params: &WaveParameters) -> f32 {
        match self {
            WaveField::Speed => params.speed,
            WaveField::Amplitude => params.amplitude,
            WaveField::Wavelength => params.wavelength,
            WaveField::SegmentLength => params.segment_length,
            WaveField::LineWidth => params.line_width,
            WaveField::TimeModifier => params.time_modifier,
        }
    }

    fn set(self, params: &mut WaveParameters, value: f32) {
        match self {
            WaveField::Speed => params.speed = value,
            WaveField::Amplitude => params.amplitude = value,
            WaveField::Wavelength => params.wavelength = value,
            WaveField::SegmentLength => params.segment_length = value,
            WaveField::LineWidth => params.line_width = value,
            WaveField::TimeModifier => params.time_modifier = value,
        }
    }
}

/// Difficulty tuning for a round: the starting wave, per-field bounds, and
/// the increment a single adjustment applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WaveTuning {
    pub start: WaveParameters,
    pub min: WaveParameters,
    pub max: WaveParameters,
    pub step: WaveParameters,
}

impl Default for WaveTuning {
    fn default() -> Self {
        Self {
            start: wave(1.0, 1.0, 1.0, 1.0, 10.0, 1.0),
            // The wavelength floor is one step above zero: zero is rejected
            // by parameter validation (divisor per sample).
            min: wave(0.1, 0.0, 0.1, 0.1, 10.0, 0.1),
            max: wave(5.0, 100.0, 10.0, 10.0, 30.0, 1.0),
            step: wave(0.1, 0.1, 0.1, 0.1, 0.1, 0.01),
        }
    }
}

fn wave(
    speed: f32,
    amplitude: f32,
    wavelength: f32,
    segment_length: f32,
    line_width: f32,
    time_modifier: f32,
) -> WaveParameters {
    WaveParameters {
        speed,
        amplitude,
        wavelength,
        segment_length,
        line_width,
        time_modifier,
        ..Default::default()
    }
}

/// State of one wave-match round: the wave the player is shaping and the
/// hidden target wave it is scored against.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaveMatchState {
    pub duration_ms: u32,
    pub current_iteration: u32,
    pub user_wave: WaveParameters,
    pub target_wave: WaveParameters,
    tuning: WaveTuning,
}

impl WaveMatchState {
    /// Starts a round with a randomized target inside the tuning bounds.
    pub fn new(duration_ms: u32) -> Self {
        let tuning = WaveTuning::default();
        let target_wave = random_target(&tuning);
        Self {
            duration_ms,
            current_iteration: 0,
            user_wave: tuning.start.clone(),
            target_wave,
            tuning,
        }
    }

    /// Starts a round against a fixed target. Used by tests and replays.
    pub fn with_target(duration_ms: u32, target_wave: WaveParameters) -> Self {
        let tuning = WaveTuning::default();
        Self {
            duration_ms,
            current_iteration: 0,
            user_wave: tuning.start.clone(),
            target_wave,
            tuning,
        }
    }

    pub fn tuning(&self) -> &WaveTuning {
        &self.tuning
    }

    /// Steps one field of the user wave up (`direction > 0`) or down,
    /// clamped to the tuning bounds.
    pub fn adjust(&mut self, field: WaveField, direction: i32) {
        let step = field.get(&self.tuning.step) * direction.signum() as f32;
        let value = (field.get(&self.user_wave) + step)
            .clamp(field.get(&self.tuning.min), field.get(&self.tuning.max));
        field.set(&mut self.user_wave, value);
    }

    /// Scores the user wave against the target: 100 minus the mean
    /// per-field distance, each normalized by that field's tuning range.
    pub fn match_percent(&self) -> f32 {
        let mut total = 0.0;
        let mut scored = 0;
        for field in WaveField::ALL {
            let range = field.get(&self.tuning.max) - field.get(&self.tuning.min);
            if range <= f32::EPSILON {
                continue;
            }
            let distance =
                (field.get(&self.user_wave) - field.get(&self.target_wave)).abs() / range;
            total += distance.min(1.0);
            scored += 1;
        }

        if scored == 0 {
            100.0
        } else {
            100.0 - (total / scored as f32) * 100.0
        }
    }

    pub fn is_matched(&self) -> bool {
        self.match_percent() >= MATCH_THRESHOLD
    }

    /// Moves to the next iteration: fresh random target, user wave back to
    /// the starting shape.
    pub fn advance_iteration(&mut self) {
        self.current_iteration += 1;
        self.user_wave = self.tuning.start.clone();
        self.target_wave = random_target(&self.tuning);
    }
}

/// Picks a target on the per-field step grid so it is always reachable
/// through `adjust` calls.
fn random_target(tuning: &WaveTuning) -> WaveParameters {
    let mut target = tuning.start.clone();
    for field in WaveField::ALL {
        let min = field.get(&tuning.min);
        let max = field.get(&tuning.max);
        let step = field.get(&tuning.step);
        if step <= 0.0 || max <= min {
            continue;
        }
        let steps = ((max - min) / step).round() as u32;
        let value = min + fastrand::u32(..=steps) as f32 * step;
        field.set(&mut target, value.clamp(min, max));
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_steps_by_the_tuning_increment() {
        let mut state = WaveMatchState::new(3_000);
        assert_eq!(state.user_wave.speed, 1.0);
        state.adjust(WaveField::Speed, 1);
        assert!((state.user_wave.speed - 1.1).abs() < 1e-6);
        state.adjust(WaveField::TimeModifier, -1);
        assert!((state.user_wave.time_modifier - 0.99).abs() < 1e-6);
    }

    #[test]
    fn adjust_clamps_at_the_bounds() {
        let mut state = WaveMatchState::new(3_000);
        for _ in 0..100 {
            state.adjust(WaveField::Speed, 1);
        }
        assert_eq!(state.user_wave.speed, 5.0);

        for _ in 0..100 {
            state.adjust(WaveField::Amplitude, -1);
        }
        assert_eq!(state.user_wave.amplitude, 0.0);
    }

    #[test]
    fn identical_waves_score_a_perfect_match() {
        let target = WaveTuning::default().start;
        let state = WaveMatchState::with_target(3_000, target);
        assert!((state.match_percent() - 100.0).abs() < 1e-4);
        assert!(state.is_matched());
    }

    #[test]
    fn distant_waves_score_below_the_threshold() {
        let state = WaveMatchState::with_target(3_000, WaveTuning::default().max);
        assert!(state.match_percent() < MATCH_THRESHOLD);
        assert!(!state.is_matched());
    }

    #[test]
    fn match_percent_stays_within_bounds() {
        let mut user_far = WaveTuning::default().min;
        user_far.amplitude = -1_000.0;
        let state = WaveMatchState::with_target(3_000, user_far);
        let percent = state.match_percent();
        assert!((0.0..=100.0).contains(&percent));
    }

    #[test]
    fn random_targets_stay_inside_tuning_bounds() {
        for _ in 0..50 {
            let state = WaveMatchState::new(3_000);
            let tuning = state.tuning();
            for field in WaveField::ALL {
                let value = field.get(&state.target_wave);
                assert!(value >= field.get(&tuning.min) - 1e-4);
                assert!(value <= field.get(&tuning.max) + 1e-4);
            }
            assert!(state.target_wave.validate().is_ok());
        }
    }

    #[test]
    fn advancing_resets_the_user_wave() {
        let mut state = WaveMatchState::new(3_000);
        state.adjust(WaveField::Amplitude, 1);
        state.advance_iteration();
        assert_eq!(state.current_iteration, 1);
        assert_eq!(state.user_wave, state.tuning().start);
    }
}
