use chrono_tz::Tz;
use rand::Rng;

use crate::clock::{WallClock, CLOCK_TICK_MS, CLOCK_TIMEZONE};
use crate::command::{draw_typo_decisions, CommandSpec};
use crate::frames::build_timeline;
use crate::schedule::{ScheduleTable, BASE_DELAY_MS, CURSOR_BUFFER_MS, STAGE_GAP_MS};
use crate::scramble::{ScrambleResolver, SCRAMBLE_ALPHABET, SCRAMBLE_ITERATIONS, SCRAMBLE_TICK_MS};
use crate::sequencer::TypingSequencer;

/// The four reveal stages, in cascade order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageId {
    Identity,
    Projects,
    Experience,
    Contact,
}

impl StageId {
    pub const ALL: [StageId; 4] = [
        StageId::Identity,
        StageId::Projects,
        StageId::Experience,
        StageId::Contact,
    ];

    pub fn index(self) -> usize {
        match self {
            StageId::Identity => 0,
            StageId::Projects => 1,
            StageId::Experience => 2,
            StageId::Contact => 3,
        }
    }
}

pub const STAGE_COUNT: usize = StageId::ALL.len();

/// Default probability that a command plays its typo variant.
pub const TYPO_PROBABILITY: f64 = 0.25;

/// Resolved animation tuning, one value per knob. The profile layer fills
/// this from its optional overrides.
#[derive(Debug, Clone)]
pub struct Tuning {
    pub typo_probability: f64,
    pub base_delay_ms: u64,
    pub stage_gap_ms: u64,
    pub cursor_buffer_ms: u64,
    pub scramble_alphabet: String,
    pub scramble_tick_ms: u64,
    pub scramble_iterations: u32,
    pub clock_tz: Tz,
    pub clock_tick_ms: u64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            typo_probability: TYPO_PROBABILITY,
            base_delay_ms: BASE_DELAY_MS,
            stage_gap_ms: STAGE_GAP_MS,
            cursor_buffer_ms: CURSOR_BUFFER_MS,
            scramble_alphabet: SCRAMBLE_ALPHABET.to_string(),
            scramble_tick_ms: SCRAMBLE_TICK_MS,
            scramble_iterations: SCRAMBLE_ITERATIONS,
            clock_tz: CLOCK_TIMEZONE,
            clock_tick_ms: CLOCK_TICK_MS,
        }
    }
}

/// Read-only view of one stage for the rendering layer.
#[derive(Debug, Clone, Copy)]
pub struct StageView<'a> {
    pub displayed: &'a str,
    pub started: bool,
    pub complete: bool,
}

/// One mount-to-teardown lifetime of the animated profile.
///
/// Owns the four typing stages, the name scramble, the wall clock, and the
/// idle-cursor flag. The typo lottery and the cascade schedule are drawn once
/// here and never revisited; everything else advances through [`poll`] with
/// session-relative time.
///
/// [`poll`]: Self::poll
#[derive(Debug)]
pub struct IntroSession {
    schedule: ScheduleTable,
    stages: Vec<TypingSequencer>,
    scramble: ScrambleResolver,
    clock: WallClock,
    cursor_shown: bool,
    revision: u64,
    torn_down: bool,
}

impl IntroSession {
    pub fn new<R: Rng>(specs: &[CommandSpec], name: &str, tuning: &Tuning, rng: &mut R) -> Self {
        assert_eq!(specs.len(), STAGE_COUNT, "the cascade has exactly four stages");

        let decisions = draw_typo_decisions(rng, specs, tuning.typo_probability);
        let schedule = ScheduleTable::compute(
            specs,
            &decisions,
            tuning.base_delay_ms,
            tuning.stage_gap_ms,
            tuning.cursor_buffer_ms,
        );
        let stages = specs
            .iter()
            .zip(&decisions)
            .enumerate()
            .map(|(i, (spec, &with_typo))| {
                TypingSequencer::new(build_timeline(spec, with_typo), schedule.start_of(i))
            })
            .collect();

        Self {
            schedule,
            stages,
            scramble: ScrambleResolver::new(
                name,
                &tuning.scramble_alphabet,
                tuning.scramble_tick_ms,
                tuning.scramble_iterations,
            ),
            clock: WallClock::new(tuning.clock_tz, tuning.clock_tick_ms),
            cursor_shown: false,
            revision: 0,
            torn_down: false,
        }
    }

    /// Advance every animated piece to `now_ms` (milliseconds since mount).
    pub fn poll(&mut self, now_ms: u64) {
        if self.torn_down {
            return;
        }

        let mut content_moved = false;
        for (i, stage) in self.stages.iter_mut().enumerate() {
            let was_complete = stage.is_complete();
            let changed = stage.poll(now_ms);
            // The identity prompt sits at the top, so its own keystrokes
            // don't move the newest-content anchor; its completion does,
            // because that reveals the identity block.
            if i == StageId::Identity.index() {
                content_moved |= !was_complete && stage.is_complete();
            } else {
                content_moved |= changed;
            }
        }

        if self.stages[StageId::Identity.index()].is_complete() {
            self.scramble.trigger(now_ms);
        }
        self.scramble.poll(now_ms);
        self.clock.poll(now_ms);

        if !self.cursor_shown && now_ms >= self.schedule.idle_cursor_at() {
            self.cursor_shown = true;
            content_moved = true;
        }

        if content_moved {
            self.revision += 1;
        }
    }

    /// Fast-forward the whole cascade to its terminal state.
    pub fn skip_to_end(&mut self) {
        if self.torn_down {
            return;
        }
        for stage in &mut self.stages {
            stage.skip_to_end();
        }
        self.scramble.trigger(self.schedule.idle_cursor_at());
        self.scramble.skip_to_end();
        self.cursor_shown = true;
        self.revision += 1;
    }

    /// Teardown. Cancels everything still pending; later polls are no-ops.
    pub fn shutdown(&mut self) {
        self.torn_down = true;
        for stage in &mut self.stages {
            stage.shutdown();
        }
    }

    pub fn stage(&self, id: StageId) -> StageView<'_> {
        let stage = &self.stages[id.index()];
        StageView {
            displayed: stage.displayed(),
            started: stage.has_started(),
            complete: stage.is_complete(),
        }
    }

    pub fn name_displayed(&self) -> &str {
        self.scramble.displayed()
    }

    pub fn name_resolved(&self) -> bool {
        self.scramble.is_complete()
    }

    pub fn clock_text(&self) -> &str {
        self.clock.displayed()
    }

    pub fn cursor_shown(&self) -> bool {
        self.cursor_shown
    }

    /// Coalesced visible-output counter for the auto-scroll controller.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn idle_cursor_at(&self) -> u64 {
        self.schedule.idle_cursor_at()
    }

    pub fn schedule(&self) -> &ScheduleTable {
        &self.schedule
    }

    /// True while anything is still due to move on its own.
    pub fn is_animating(&self) -> bool {
        !self.torn_down
            && (!self.cursor_shown
                || self.stages.iter().any(|s| !s.is_complete())
                || (self.scramble.is_triggered() && !self.scramble.is_complete()))
    }
}
