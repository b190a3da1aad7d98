/// Shared platform state.
///
/// One `PlatformContext` is owned by the frame-loop driver and passed by
/// reference into the input dispatcher and the drawing path. It replaces
/// the original port's file-scope globals (input word, pause/turbo flags,
/// graphics tables); nothing in this crate keeps hidden singletons.
use crate::assets::PlayerGraphics;

pub struct PlatformContext {
    /// Player sprite sheet and palettes, populated from the asset pack and
    /// optionally patched by a ZSPR override at startup. The engine core
    /// reads these during rendering.
    pub graphics: PlayerGraphics,

    /// Engine joypad word. Control commands toggle bits here on both the
    /// press and release edge; the frame loop hands it to the engine once
    /// per frame.
    pub input_word: u32,

    // Runtime toggles, all driven by the command dispatcher.
    pub paused: bool,
    pub turbo: bool,
    pub replay_turbo: bool,
    pub cursor: bool,
    pub display_perf: bool,

    /// Mixer volume, 0..=100 in steps of 5.
    pub volume: i32,

    /// Rolling average maintained while `display_perf` is on.
    pub current_fps: f32,

    /// Set when a dimmed-pause command wants the next presented frame
    /// darkened. Cleared by the frame loop after it draws.
    pub dim_request: bool,

    /// True only while the engine's frame-advance call is on the stack.
    /// Persistent-state dispatch (save/load/replay/reset) asserts against
    /// it: those paths must never run concurrently with frame advance.
    pub in_frame_advance: bool,
}

impl PlatformContext {
    pub fn new(graphics: PlayerGraphics) -> Self {
        PlatformContext {
            graphics,
            input_word: 0,
            paused: false,
            turbo: false,
            replay_turbo: true,
            cursor: true,
            display_perf: false,
            volume: 100,
            current_fps: 0.0,
            dim_request: false,
            in_frame_advance: false,
        }
    }
}
