/// Engine collaborator seam.
///
/// The emulated CPU/PPU/APU core lives outside this crate; these are the
/// named hooks the platform layer calls into it. The command dispatcher
/// routes slot commands here, and the frame loop drives `run_frame` /
/// `draw_frame` once per iteration.
///
/// Mutual-exclusion contract: `save_slot`, `load_slot`, `replay_slot` and
/// `reset` mutate persistent engine state and must never execute while
/// `run_frame` is on the stack. The single-threaded frame loop guarantees
/// this ordering structurally (it finishes dispatch before advancing the
/// frame); the dispatcher additionally debug-asserts it, because engine
/// callbacks issued from inside `run_frame` could otherwise re-enter.
pub trait EngineCore {
    /// Advance the emulation by one frame with the given joypad word.
    /// Returns true while a recorded replay is driving the input.
    fn run_frame(&mut self, input: u32) -> bool;

    /// Render the last simulated frame into `pixels` (one u32 per pixel in
    /// A-R-G-B channel order, `pitch` pixels per row, top-to-bottom).
    fn draw_frame(&mut self, pixels: &mut [u32], pitch: usize);

    /// Save the current game state into the numbered slot.
    fn save_slot(&mut self, slot: u32);

    /// Load the numbered slot. Slots ≥ 256 are the referenced band.
    fn load_slot(&mut self, slot: u32);

    /// Start replaying the recording attached to the numbered slot.
    fn replay_slot(&mut self, slot: u32);

    /// Hard-reset the emulated machine.
    fn reset(&mut self);
}

// ── Test double ──
