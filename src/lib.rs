// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod clock;
pub mod command;
pub mod frames;
pub mod profile;
pub mod runtime;
pub mod schedule;
pub mod scramble;
pub mod scroll;
pub mod sequencer;
pub mod session;

/// Tick rate of the TUI event loop. Well under the fastest per-character
/// typing delay so no typing frame or blink phase is visibly quantized.
pub const TICK_RATE_MS: u64 = 30;
