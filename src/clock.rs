use chrono::Utc;
use chrono_tz::Tz;

/// Default timezone the clock is pinned to.
pub const CLOCK_TIMEZONE: Tz = chrono_tz::Asia::Jerusalem;
/// Recompute cadence.
pub const CLOCK_TICK_MS: u64 = 1000;

/// Live wall clock pinned to one named timezone, formatted 24-hour HH:MM:SS.
///
/// Publishes a formatted time immediately on construction (no blank first
/// paint), then recomputes once per tick interval. It runs for exactly as
/// long as its owner polls it; there is no timer to leak on teardown.
#[derive(Debug)]
pub struct WallClock {
    tz: Tz,
    tick_ms: u64,
    displayed: String,
    next_due_ms: u64,
}

impl WallClock {
    pub fn new(tz: Tz, tick_ms: u64) -> Self {
        let tick_ms = tick_ms.max(1);
        Self {
            tz,
            tick_ms,
            displayed: format_now(tz),
            next_due_ms: tick_ms,
        }
    }

    /// Recompute when a tick boundary has passed. Returns true when the
    /// displayed string changed.
    pub fn poll(&mut self, now_ms: u64) -> bool {
        if now_ms < self.next_due_ms {
            return false;
        }
        // Skip any boundaries a slow caller missed.
        self.next_due_ms = now_ms - now_ms % self.tick_ms + self.tick_ms;

        let fresh = format_now(self.tz);
        if fresh == self.displayed {
            return false;
        }
        self.displayed = fresh;
        true
    }

    pub fn displayed(&self) -> &str {
        &self.displayed
    }
}

fn format_now(tz: Tz) -> String {
    Utc::now().with_timezone(&tz).format("%H:%M:%S").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn looks_like_a_time(s: &str) -> bool {
        let bytes = s.as_bytes();
        s.len() == 8
            && bytes[2] == b':'
            && bytes[5] == b':'
            && s.chars()
                .enumerate()
                .all(|(i, c)| matches!(i, 2 | 5) || c.is_ascii_digit())
    }

    #[test]
    fn publishes_a_formatted_time_immediately() {
        let clock = WallClock::new(CLOCK_TIMEZONE, CLOCK_TICK_MS);
        assert!(looks_like_a_time(clock.displayed()), "{:?}", clock.displayed());
    }

    #[test]
    fn does_not_recompute_between_ticks() {
        let mut clock = WallClock::new(CLOCK_TIMEZONE, CLOCK_TICK_MS);
        let first = clock.displayed().to_string();
        assert!(!clock.poll(0));
        assert!(!clock.poll(999));
        assert_eq!(clock.displayed(), first);
    }

    #[test]
    fn a_late_poll_lands_on_the_next_boundary() {
        let mut clock = WallClock::new(CLOCK_TIMEZONE, CLOCK_TICK_MS);
        clock.poll(5_250);
        // Whatever the wall time did, the schedule must not owe 5 catch-up
        // recomputes: the next one is due at the following boundary.
        assert!(!clock.poll(5_900));
        assert!(looks_like_a_time(clock.displayed()));
    }

    #[test]
    fn timezone_names_parse_into_the_clock() {
        let tz: Tz = "Asia/Jerusalem".parse().unwrap();
        assert_eq!(tz, CLOCK_TIMEZONE);
        let clock = WallClock::new("UTC".parse().unwrap(), 1000);
        assert!(looks_like_a_time(clock.displayed()));
    }
}
