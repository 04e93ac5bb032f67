use rand::seq::SliceRandom;

/// Default noise alphabet for the name reveal.
pub const SCRAMBLE_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789@#$%&";
/// Default cadence of one noise frame.
pub const SCRAMBLE_TICK_MS: u64 = 35;
/// Default noise frames spent per character before it resolves.
pub const SCRAMBLE_ITERATIONS: u32 = 4;

/// Resolves a target string out of random noise, left to right.
///
/// Until triggered it shows the target with every non-space character
/// blanked, so the layout already reserves the final width. After the
/// trigger, each tick redraws the unresolved tail with random characters
/// while the resolved prefix grows; the final state is exactly the target
/// and never mutates again.
#[derive(Debug)]
pub struct ScrambleResolver {
    target: Vec<char>,
    alphabet: Vec<char>,
    tick_ms: u64,
    iterations: u32,
    displayed: String,
    triggered_at: Option<u64>,
    frame: u32,
    complete: bool,
}

impl ScrambleResolver {
    pub fn new(target: &str, alphabet: &str, tick_ms: u64, iterations: u32) -> Self {
        let target: Vec<char> = target.chars().collect();
        // Blank placeholder of the same width, so the layout never jumps.
        let displayed = " ".repeat(target.len());
        Self {
            target,
            alphabet: alphabet.chars().collect(),
            tick_ms: tick_ms.max(1),
            iterations: iterations.max(1),
            displayed,
            triggered_at: None,
            frame: 0,
            complete: false,
        }
    }

    /// Fire the resolve. The first trigger wins; later calls are ignored.
    pub fn trigger(&mut self, now_ms: u64) {
        if self.triggered_at.is_none() {
            self.triggered_at = Some(now_ms);
        }
    }

    pub fn is_triggered(&self) -> bool {
        self.triggered_at.is_some()
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }

    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    /// Advance to the frame due at `now_ms`. Returns true when the visible
    /// text changed.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        let Some(triggered_at) = self.triggered_at else {
            return false;
        };
        if self.complete {
            return false;
        }

        let total = self.target.len() as u32 * self.iterations;
        if total == 0 {
            self.complete = true;
            return true;
        }

        // One noise frame per elapsed tick since the trigger.
        let due = ((now_ms.saturating_sub(triggered_at)) / self.tick_ms) as u32;
        let due = due.min(total);
        if due <= self.frame {
            return false;
        }
        self.frame = due;

        if self.frame >= total {
            self.displayed = self.target.iter().collect();
            self.complete = true;
            return true;
        }

        let resolved = (self.frame / self.iterations) as usize;
        let mut rng = rand::thread_rng();
        self.displayed = self
            .target
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if c == ' ' {
                    ' '
                } else if i < resolved {
                    c
                } else {
                    *self.alphabet.choose(&mut rng).unwrap_or(&c)
                }
            })
            .collect();
        true
    }

    /// Jump to the stable end state.
    pub fn skip_to_end(&mut self) -> bool {
        if self.complete {
            return false;
        }
        self.displayed = self.target.iter().collect();
        self.frame = self.target.len() as u32 * self.iterations;
        self.complete = true;
        true
    }
}
