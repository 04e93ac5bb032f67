use crate::frames::Frame;

/// Plays one command's frame timeline against session-relative time.
///
/// The sequencer owns no timers. The caller polls it with the milliseconds
/// elapsed since session start; every frame that has come due is applied in
/// order. Dropping it or calling [`shutdown`](Self::shutdown) is teardown:
/// later polls are no-ops, so no frame can land on a dead stage.
#[derive(Debug)]
pub struct TypingSequencer {
    frames: Vec<Frame>,
    next: usize,
    due_ms: u64,
    displayed: String,
    complete: bool,
    shut_down: bool,
}

impl TypingSequencer {
    /// `start_at_ms` is the absolute session time of the first frame, taken
    /// from the cascade schedule.
    pub fn new(frames: Vec<Frame>, start_at_ms: u64) -> Self {
        Self {
            frames,
            next: 0,
            due_ms: start_at_ms,
            displayed: String::new(),
            complete: false,
            shut_down: false,
        }
    }

    /// Apply every frame due at `now_ms`, in order. Returns true when the
    /// visible state changed.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if self.shut_down || self.complete {
            return false;
        }

        let mut changed = false;
        while self.next < self.frames.len() && now_ms >= self.due_ms {
            let frame = &self.frames[self.next];
            self.displayed.clone_from(&frame.text);
            self.due_ms += frame.wait_ms;
            self.next += 1;
            changed = true;
        }
        if self.next == self.frames.len() && now_ms >= self.due_ms {
            self.complete = true;
            changed = true;
        }
        changed
    }

    /// Jump straight to the played-out state. Used by the skip key; the final
    /// text and completion flag are exactly what a full playback reaches.
    pub fn skip_to_end(&mut self) -> bool {
        if self.shut_down || self.complete {
            return false;
        }
        if let Some(last) = self.frames.last() {
            self.displayed.clone_from(&last.text);
        }
        self.next = self.frames.len();
        self.complete = true;
        true
    }

    /// Teardown: cancel everything still pending. Polls after this never
    /// mutate state.
    pub fn shutdown(&mut self) {
        self.shut_down = true;
    }

    pub fn displayed(&self) -> &str {
        &self.displayed
    }

    pub fn has_started(&self) -> bool {
        self.next > 0
    }

    pub fn is_complete(&self) -> bool {
        self.complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::CommandSpec;
    use crate::frames::build_timeline;

    fn whoami_at(start: u64, speed: u64) -> TypingSequencer {
        let spec = CommandSpec::plain("whoami", speed).unwrap();
        TypingSequencer::new(build_timeline(&spec, false), start)
    }

    #[test]
    fn idle_until_the_start_delay_elapses() {
        let mut seq = whoami_at(500, 70);
        assert!(!seq.poll(0));
        assert!(!seq.poll(499));
        assert_eq!(seq.displayed(), "");
        assert!(!seq.has_started());
        assert!(!seq.is_complete());
    }

    #[test]
    fn reveals_one_character_per_interval() {
        // Start 500ms, 70ms per char, complete at 500 + 6 * 70 = 920ms.
        let mut seq = whoami_at(500, 70);

        assert!(seq.poll(500));
        assert_eq!(seq.displayed(), "w");
        assert!(seq.has_started());

        assert!(!seq.poll(569));
        assert_eq!(seq.displayed(), "w");

        assert!(seq.poll(570));
        assert_eq!(seq.displayed(), "wh");

        seq.poll(850);
        assert_eq!(seq.displayed(), "whoami");
        assert!(!seq.is_complete());

        assert!(seq.poll(920));
        assert!(seq.is_complete());
        assert_eq!(seq.displayed(), "whoami");
    }

    #[test]
    fn a_late_poll_catches_up_in_order() {
        let mut seq = whoami_at(500, 70);
        assert!(seq.poll(10_000));
        assert_eq!(seq.displayed(), "whoami");
        assert!(seq.is_complete());
    }

    #[test]
    fn polls_after_completion_change_nothing() {
        let mut seq = whoami_at(0, 70);
        seq.poll(10_000);
        assert!(seq.is_complete());
        assert!(!seq.poll(20_000));
        assert_eq!(seq.displayed(), "whoami");
    }

    #[test]
    fn shutdown_freezes_the_stage() {
        let mut seq = whoami_at(500, 70);
        seq.poll(570);
        assert_eq!(seq.displayed(), "wh");

        seq.shutdown();
        assert!(!seq.poll(10_000));
        assert_eq!(seq.displayed(), "wh");
        assert!(!seq.is_complete());
    }

    #[test]
    fn skip_reaches_the_exact_final_state() {
        let spec = CommandSpec::with_typo("ls ~/projects/", "ls ~/projcets/", 9, 65).unwrap();
        let mut seq = TypingSequencer::new(build_timeline(&spec, true), 500);
        seq.poll(700);

        assert!(seq.skip_to_end());
        assert_eq!(seq.displayed(), "ls ~/projects/");
        assert!(seq.is_complete());
        // Skipping twice is a no-op.
        assert!(!seq.skip_to_end());
    }

    #[test]
    fn typo_playback_walks_through_the_misspelling() {
        let spec = CommandSpec::with_typo("whoami", "whomai", 3, 90).unwrap();
        let mut seq = TypingSequencer::new(build_timeline(&spec, true), 0);

        // 6 chars in: the misspelling is fully on screen.
        seq.poll(6 * 90);
        assert_eq!(seq.displayed(), "whomai");

        // After the hold, backspacing begins: 3 erased at 36ms each.
        seq.poll(6 * 90 + 500 + 3 * 36);
        assert_eq!(seq.displayed(), "who");

        // Correction hold, then the correct suffix lands.
        let total = crate::frames::command_duration_ms(&spec, true);
        seq.poll(total);
        assert_eq!(seq.displayed(), "whoami");
        assert!(seq.is_complete());
    }
}
