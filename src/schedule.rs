use crate::command::CommandSpec;
use crate::frames::command_duration_ms;

/// Default delay before the first command starts typing.
pub const BASE_DELAY_MS: u64 = 500;
/// Default breathing room between one command completing and the next
/// starting.
pub const STAGE_GAP_MS: u64 = 600;
/// Default pause between the last command completing and the idle prompt
/// cursor appearing.
pub const CURSOR_BUFFER_MS: u64 = 400;

/// Precomputed start times for the whole cascade. Computed once per session
/// from static durations, before any stage starts; never recomputed, so the
/// total session length is fixed the moment the typo lottery is drawn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleTable {
    starts: Vec<u64>,
    idle_cursor_at: u64,
}

impl ScheduleTable {
    /// `decisions` must hold one typo decision per command; both feed off the
    /// same lottery the frame generator will see.
    pub fn compute(
        specs: &[CommandSpec],
        decisions: &[bool],
        base_delay_ms: u64,
        gap_ms: u64,
        cursor_buffer_ms: u64,
    ) -> Self {
        assert_eq!(specs.len(), decisions.len());

        let mut starts = Vec::with_capacity(specs.len());
        let mut next = base_delay_ms;
        for (spec, &with_typo) in specs.iter().zip(decisions) {
            starts.push(next);
            next += command_duration_ms(spec, with_typo) + gap_ms;
        }

        // `next` already includes one trailing gap; the idle cursor waits for
        // its own buffer instead.
        let idle_cursor_at = next - gap_ms + cursor_buffer_ms;

        Self {
            starts,
            idle_cursor_at,
        }
    }

    pub fn start_of(&self, stage: usize) -> u64 {
        self.starts[stage]
    }

    pub fn starts(&self) -> &[u64] {
        &self.starts
    }

    pub fn idle_cursor_at(&self) -> u64 {
        self.idle_cursor_at
    }
}
