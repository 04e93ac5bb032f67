use crate::command::CommandSpec;

/// Hold on the fully-typed misspelling before the "oops" backspacing starts.
pub const TYPO_HOLD_MS: u64 = 500;
/// Hold at the divergence point before the correct suffix is retyped.
pub const CORRECTION_HOLD_MS: u64 = 250;
/// Backspacing runs faster than typing.
pub const BACKSPACE_FACTOR: f64 = 0.4;

/// One step of a command's typing timeline: the text on screen and how long
/// it stays before the next frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub text: String,
    pub wait_ms: u64,
}

impl Frame {
    fn new(text: String, wait_ms: u64) -> Self {
        Self { text, wait_ms }
    }
}

pub fn backspace_speed_ms(speed_ms: u64) -> u64 {
    ((speed_ms as f64) * BACKSPACE_FACTOR).round().max(1.0) as u64
}

/// Build the full typing timeline for one command. Pure: identical inputs
/// always yield the identical frame sequence.
///
/// Without a typo the timeline is one frame per character of the correct
/// text. With one it types the misspelling, holds, backspaces to the
/// divergence point, holds again, then types the correct suffix.
pub fn build_timeline(spec: &CommandSpec, with_typo: bool) -> Vec<Frame> {
    let speed = spec.speed_ms();
    let mut frames = Vec::new();

    match spec.typo_len() {
        Some(typo_len) if with_typo => {
            for i in 1..=typo_len {
                frames.push(Frame::new(spec.typo_prefix(i), speed));
            }
            frames.push(Frame::new(spec.typo_prefix(typo_len), TYPO_HOLD_MS));

            let backspace = backspace_speed_ms(speed);
            for i in (spec.divergence()..typo_len).rev() {
                frames.push(Frame::new(spec.typo_prefix(i), backspace));
            }
            frames.push(Frame::new(
                spec.correct_prefix(spec.divergence()),
                CORRECTION_HOLD_MS,
            ));

            for i in spec.divergence() + 1..=spec.correct_len() {
                frames.push(Frame::new(spec.correct_prefix(i), speed));
            }
        }
        _ => {
            for i in 1..=spec.correct_len() {
                frames.push(Frame::new(spec.correct_prefix(i), speed));
            }
        }
    }

    // Unreachable with a validated spec; guards the timeline-never-empty
    // contract the sequencer relies on.
    if frames.is_empty() {
        frames.push(Frame::new(spec.correct_text(), speed));
    }

    frames
}

/// Total wall time the timeline for `(spec, with_typo)` takes to play out.
/// Must equal the sum of that timeline's waits exactly; the cascade schedule
/// is computed from this, never from runtime measurement.
pub fn command_duration_ms(spec: &CommandSpec, with_typo: bool) -> u64 {
    let speed = spec.speed_ms();
    match spec.typo_len() {
        Some(typo_len) if with_typo => {
            let backspaced = (typo_len - spec.divergence()) as u64;
            let retyped = (spec.correct_len() - spec.divergence()) as u64;
            typo_len as u64 * speed
                + TYPO_HOLD_MS
                + backspaced * backspace_speed_ms(speed)
                + CORRECTION_HOLD_MS
                + retyped * speed
        }
        _ => spec.correct_len() as u64 * speed,
    }
}
