/// Per-slot press/release state machine.
///
/// Presses resolve a command against the full held mask and cache it on
/// the slot; the matching release replays exactly that cached command,
/// not a fresh resolution, so a chord command is always cancelled by the
/// button that triggered it even if the modifiers changed in between.
/// Repeat events for an already-pressed or already-released slot are
/// ignored outright.
///
/// The cache is keyed by slot, not by command. Two slots resolving to the
/// same command and interleaving their releases will replay it twice; this
/// matches the behavior of the port being reproduced and is kept as is.
use crate::context::PlatformContext;
use crate::engine::EngineCore;
use crate::input::bindings::BindingTable;
use crate::input::buttons::{ButtonSlot, SLOT_COUNT};
use crate::input::command::{self, Command};

pub struct CommandResolver {
    held: u16,
    last_cmd: [Option<Command>; SLOT_COUNT],
}

impl Default for CommandResolver {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandResolver {
    pub fn new() -> Self {
        CommandResolver {
            held: 0,
            last_cmd: [None; SLOT_COUNT],
        }
    }

    /// Feed one slot edge through the table and dispatch the result.
    pub fn handle<E: EngineCore>(
        &mut self,
        slot: ButtonSlot,
        pressed: bool,
        table: &BindingTable,
        ctx: &mut PlatformContext,
        engine: &mut E,
    ) {
        let bit = slot.bit();
        if pressed {
            if self.held & bit != 0 {
                return; // repeat press, already resolved
            }
            self.held |= bit;
            let cmd = table.resolve(slot, self.held);
            self.last_cmd[slot.index()] = cmd;
            if let Some(cmd) = cmd {
                command::dispatch(cmd, true, ctx, engine);
            }
        } else {
            if self.held & bit == 0 {
                return; // release without a tracked press
            }
            self.held &= !bit;
            if let Some(cmd) = self.last_cmd[slot.index()] {
                command::dispatch(cmd, false, ctx, engine);
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
