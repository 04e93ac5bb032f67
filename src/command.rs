use rand::Rng;
use thiserror::Error;

/// One scripted shell command: the text that should end up on screen, plus an
/// optional misspelled variant used when the session's typo lottery hits.
///
/// The typo variant must agree with the correct text up to the divergence
/// index and disagree at it; backspacing stops exactly there before the
/// correct suffix is retyped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    correct: Vec<char>,
    typo: Option<Vec<char>>,
    divergence: usize,
    speed_ms: u64,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpecError {
    #[error("command text is empty")]
    EmptyCommand,
    #[error("per-character speed must be non-zero")]
    ZeroSpeed,
    #[error("divergence index {index} out of bounds for {correct:?} / {typo:?}")]
    DivergenceOutOfBounds {
        index: usize,
        correct: String,
        typo: String,
    },
    #[error("typo variant {typo:?} differs from {correct:?} before index {index}")]
    DivergesTooEarly {
        index: usize,
        correct: String,
        typo: String,
    },
    #[error("typo variant {typo:?} matches {correct:?} at index {index}")]
    NoDivergence {
        index: usize,
        correct: String,
        typo: String,
    },
}

impl CommandSpec {
    pub fn plain(correct: &str, speed_ms: u64) -> Result<Self, SpecError> {
        Self::build(correct, None, 0, speed_ms)
    }

    pub fn with_typo(
        correct: &str,
        typo: &str,
        divergence: usize,
        speed_ms: u64,
    ) -> Result<Self, SpecError> {
        Self::build(correct, Some(typo), divergence, speed_ms)
    }

    fn build(
        correct: &str,
        typo: Option<&str>,
        divergence: usize,
        speed_ms: u64,
    ) -> Result<Self, SpecError> {
        let correct_chars: Vec<char> = correct.chars().collect();
        if correct_chars.is_empty() {
            return Err(SpecError::EmptyCommand);
        }
        if speed_ms == 0 {
            return Err(SpecError::ZeroSpeed);
        }

        let typo_chars = match typo {
            None => None,
            Some(typo) => {
                let typo_chars: Vec<char> = typo.chars().collect();
                if divergence > correct_chars.len() || divergence > typo_chars.len() {
                    return Err(SpecError::DivergenceOutOfBounds {
                        index: divergence,
                        correct: correct.to_string(),
                        typo: typo.to_string(),
                    });
                }
                if correct_chars[..divergence] != typo_chars[..divergence] {
                    return Err(SpecError::DivergesTooEarly {
                        index: divergence,
                        correct: correct.to_string(),
                        typo: typo.to_string(),
                    });
                }
                if correct_chars.get(divergence) == typo_chars.get(divergence) {
                    return Err(SpecError::NoDivergence {
                        index: divergence,
                        correct: correct.to_string(),
                        typo: typo.to_string(),
                    });
                }
                Some(typo_chars)
            }
        };

        Ok(Self {
            correct: correct_chars,
            typo: typo_chars,
            divergence,
            speed_ms,
        })
    }

    pub fn correct_len(&self) -> usize {
        self.correct.len()
    }

    pub fn typo_len(&self) -> Option<usize> {
        self.typo.as_ref().map(Vec::len)
    }

    pub fn has_typo_variant(&self) -> bool {
        self.typo.is_some()
    }

    pub fn divergence(&self) -> usize {
        self.divergence
    }

    pub fn speed_ms(&self) -> u64 {
        self.speed_ms
    }

    pub fn correct_text(&self) -> String {
        self.correct.iter().collect()
    }

    /// Prefix of the correct text, `n` characters long.
    pub fn correct_prefix(&self, n: usize) -> String {
        self.correct[..n.min(self.correct.len())].iter().collect()
    }

    /// Prefix of the typo variant, `n` characters long. Empty when the
    /// command has no typo variant.
    pub fn typo_prefix(&self, n: usize) -> String {
        match &self.typo {
            Some(typo) => typo[..n.min(typo.len())].iter().collect(),
            None => String::new(),
        }
    }

    /// Return a copy with every per-character delay scaled by `factor`,
    /// clamped so the result stays a valid (non-zero) speed.
    pub fn scale_speed(&self, factor: f64) -> Self {
        let scaled = ((self.speed_ms as f64) * factor).round() as u64;
        Self {
            speed_ms: scaled.max(1),
            ..self.clone()
        }
    }
}

/// Draw the per-command typo lottery. Drawn exactly once per session and
/// threaded into both the duration calculator and the frame generator, so the
/// two can never disagree about which path a command takes.
pub fn draw_typo_decisions<R: Rng>(
    rng: &mut R,
    specs: &[CommandSpec],
    probability: f64,
) -> Vec<bool> {
    let probability = probability.clamp(0.0, 1.0);
    specs
        .iter()
        .map(|spec| spec.has_typo_variant() && rng.gen_bool(probability))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn plain_command_is_accepted() {
        let spec = CommandSpec::plain("whoami", 90).unwrap();
        assert_eq!(spec.correct_len(), 6);
        assert_eq!(spec.typo_len(), None);
        assert!(!spec.has_typo_variant());
    }

    #[test]
    fn typo_command_is_accepted() {
        let spec = CommandSpec::with_typo("ls ~/projects/", "ls ~/projcets/", 9, 65).unwrap();
        assert_eq!(spec.correct_len(), 14);
        assert_eq!(spec.typo_len(), Some(14));
        assert_eq!(spec.divergence(), 9);
    }

    #[test]
    fn empty_command_is_rejected() {
        assert_matches!(CommandSpec::plain("", 90), Err(SpecError::EmptyCommand));
    }

    #[test]
    fn zero_speed_is_rejected() {
        assert_matches!(CommandSpec::plain("ls", 0), Err(SpecError::ZeroSpeed));
    }

    #[test]
    fn out_of_bounds_divergence_is_rejected() {
        assert_matches!(
            CommandSpec::with_typo("cat a", "cat b", 9, 65),
            Err(SpecError::DivergenceOutOfBounds { index: 9, .. })
        );
    }

    #[test]
    fn early_divergence_is_rejected() {
        // Texts already disagree at index 0, so a divergence index of 3 lies.
        assert_matches!(
            CommandSpec::with_typo("whoami", "xhoami", 3, 90),
            Err(SpecError::DivergesTooEarly { index: 3, .. })
        );
    }

    #[test]
    fn missing_divergence_is_rejected() {
        // Identical texts never diverge.
        assert_matches!(
            CommandSpec::with_typo("whoami", "whoami", 3, 90),
            Err(SpecError::NoDivergence { index: 3, .. })
        );
    }

    #[test]
    fn divergence_at_end_of_shorter_typo_is_accepted() {
        // The typo is a strict prefix of the correct text; it "diverges" at
        // its own end, where the correct text keeps going.
        let spec = CommandSpec::with_typo("whoami", "who", 3, 90).unwrap();
        assert_eq!(spec.divergence(), 3);
    }

    #[test]
    fn prefixes_are_char_based() {
        let spec = CommandSpec::plain("cat résumé.md", 65).unwrap();
        assert_eq!(spec.correct_prefix(5), "cat r");
        assert_eq!(spec.correct_prefix(6), "cat ré");
        assert_eq!(spec.correct_prefix(100), "cat résumé.md");
    }

    #[test]
    fn scale_speed_never_reaches_zero() {
        let spec = CommandSpec::plain("ls", 3).unwrap();
        assert_eq!(spec.scale_speed(0.01).speed_ms(), 1);
        assert_eq!(spec.scale_speed(2.0).speed_ms(), 6);
    }

    #[test]
    fn lottery_never_picks_commands_without_a_variant() {
        let specs = vec![
            CommandSpec::plain("whoami", 90).unwrap(),
            CommandSpec::with_typo("ls ~/projects/", "ls ~/projcets/", 9, 65).unwrap(),
        ];
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let decisions = draw_typo_decisions(&mut rng, &specs, 1.0);
            assert_eq!(decisions, vec![false, true]);
        }
    }

    #[test]
    fn lottery_respects_probability_extremes() {
        let specs = vec![CommandSpec::with_typo("whoami", "whomai", 3, 90).unwrap()];
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(draw_typo_decisions(&mut rng, &specs, 0.0), vec![false]);
        assert_eq!(draw_typo_decisions(&mut rng, &specs, 1.0), vec![true]);
    }
}
