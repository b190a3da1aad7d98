/// Abstract commands and their dispatcher.
///
/// The resolver produces one `Command` per recognized (slot, chord) pair;
/// dispatch routes it either into the engine joypad word (edge-symmetric),
/// into the turbo flag (follows the held state), or into the locked region
/// that touches persistent engine state and runtime toggles (pressed edge
/// only, releases are no-ops there).
use crate::context::PlatformContext;
use crate::engine::EngineCore;

/// Referenced save/replay slots live 256 above the plain slot numbers.
pub const REF_SLOT_BASE: u32 = 256;

const VOLUME_STEP: i32 = 5;

/// Engine joypad buttons. The discriminants are the engine input-word bit
/// positions and must not be reordered.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ControlButton {
    B = 0,
    Y,
    Select,
    Start,
    Up,
    Down,
    Left,
    Right,
    A,
    X,
    L,
    R,
}

impl ControlButton {
    pub fn joypad_bit(self) -> u32 {
        1 << self as u32
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Command {
    /// Direct joypad button, toggled on both edges.
    Control(ControlButton),
    /// Fast-forward while held.
    Turbo,
    // Everything below is locked-region, pressed edge only.
    LoadSlot(u8),
    SaveSlot(u8),
    ReplaySlot(u8),
    LoadRefSlot(u8),
    ReplayRefSlot(u8),
    Reset,
    Pause,
    PauseDimmed,
    ReplayTurbo,
    DisplayPerf,
    ToggleCursor,
    VolumeUp,
    VolumeDown,
}

/// Route one resolved command. `pressed` is the edge that produced it.
pub fn dispatch<E: EngineCore>(
    cmd: Command,
    pressed: bool,
    ctx: &mut PlatformContext,
    engine: &mut E,
) {
    match cmd {
        Command::Control(btn) => {
            if pressed {
                ctx.input_word |= btn.joypad_bit();
            } else {
                ctx.input_word &= !btn.joypad_bit();
            }
        }
        Command::Turbo => ctx.turbo = pressed,
        _ if pressed => dispatch_locked(cmd, ctx, engine),
        _ => {} // locked commands ignore the release edge
    }
}

/// Persistent-state and toggle dispatch. Must never run while the engine's
/// frame advance is on the stack; the frame loop orders dispatch before
/// frame advance, and the assert catches re-entry from engine callbacks.
fn dispatch_locked<E: EngineCore>(cmd: Command, ctx: &mut PlatformContext, engine: &mut E) {
    debug_assert!(
        !ctx.in_frame_advance,
        "persistent-state command dispatched during frame advance"
    );
    match cmd {
        Command::LoadSlot(n) => engine.load_slot(n as u32),
        Command::SaveSlot(n) => engine.save_slot(n as u32),
        Command::ReplaySlot(n) => engine.replay_slot(n as u32),
        Command::LoadRefSlot(n) => engine.load_slot(REF_SLOT_BASE + n as u32),
        Command::ReplayRefSlot(n) => engine.replay_slot(REF_SLOT_BASE + n as u32),
        Command::Reset => engine.reset(),
        Command::Pause => ctx.paused = !ctx.paused,
        Command::PauseDimmed => {
            ctx.paused = !ctx.paused;
            if ctx.paused {
                ctx.dim_request = true;
            }
        }
        Command::ReplayTurbo => ctx.replay_turbo = !ctx.replay_turbo,
        Command::DisplayPerf => ctx.display_perf = !ctx.display_perf,
        Command::ToggleCursor => ctx.cursor = !ctx.cursor,
        Command::VolumeUp => adjust_volume(ctx, VOLUME_STEP),
        Command::VolumeDown => adjust_volume(ctx, -VOLUME_STEP),
        Command::Control(_) | Command::Turbo => {
            unreachable!("edge-routed command reached the locked dispatcher")
        }
    }
}

fn adjust_volume(ctx: &mut PlatformContext, delta: i32) {
    ctx.volume = (ctx.volume + delta).clamp(0, 100);
    log::info!("volume: {}%", ctx.volume);
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
