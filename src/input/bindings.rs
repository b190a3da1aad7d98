/// Chord bindings: (trigger slot, held-modifier mask) → command.
///
/// A chord string like `"Guide+L1"` names its modifiers first and the
/// trigger last. Resolution considers only bindings for the trigger slot
/// whose whole modifier chord is currently held and picks the most
/// specific one, so `"Guide+L1"` shadows the bare `L1` joypad binding
/// while Guide is down.
use crate::config::BindingsConfig;
use crate::input::buttons::ButtonSlot;
use crate::input::command::{Command, ControlButton};

struct Binding {
    trigger: ButtonSlot,
    chord: u16,
    command: Command,
}

pub struct BindingTable {
    // Config bindings are appended after the defaults; on equal chord
    // specificity the later entry wins, so config can rebind a chord.
    bindings: Vec<Binding>,
}

impl BindingTable {
    /// Bare-slot joypad bindings only (no command chords).
    pub fn with_defaults() -> Self {
        let joypad = [
            (ButtonSlot::A, ControlButton::A),
            (ButtonSlot::B, ControlButton::B),
            (ButtonSlot::X, ControlButton::X),
            (ButtonSlot::Y, ControlButton::Y),
            (ButtonSlot::L1, ControlButton::L),
            (ButtonSlot::R1, ControlButton::R),
            (ButtonSlot::Start, ControlButton::Start),
            (ButtonSlot::Guide, ControlButton::Select),
            (ButtonSlot::Up, ControlButton::Up),
            (ButtonSlot::Down, ControlButton::Down),
            (ButtonSlot::Left, ControlButton::Left),
            (ButtonSlot::Right, ControlButton::Right),
        ];
        let bindings = joypad
            .into_iter()
            .map(|(trigger, btn)| Binding {
                trigger,
                chord: 0,
                command: Command::Control(btn),
            })
            .collect();
        BindingTable { bindings }
    }

    /// Defaults plus the `[bindings]` config section. For the slot actions
    /// the list position picks the slot number: the n-th chord in
    /// `load = [...]` binds `LoadSlot(n)`.
    pub fn from_config(cfg: &BindingsConfig) -> Self {
        let mut table = BindingTable::with_defaults();
        table.add_slot_action(&cfg.load, Command::LoadSlot);
        table.add_slot_action(&cfg.save, Command::SaveSlot);
        table.add_slot_action(&cfg.replay, Command::ReplaySlot);
        table.add_slot_action(&cfg.load_ref, Command::LoadRefSlot);
        table.add_slot_action(&cfg.replay_ref, Command::ReplayRefSlot);
        table.add_action(&cfg.reset, Command::Reset);
        table.add_action(&cfg.pause, Command::Pause);
        table.add_action(&cfg.pause_dimmed, Command::PauseDimmed);
        table.add_action(&cfg.turbo, Command::Turbo);
        table.add_action(&cfg.replay_turbo, Command::ReplayTurbo);
        table.add_action(&cfg.display_perf, Command::DisplayPerf);
        table.add_action(&cfg.toggle_cursor, Command::ToggleCursor);
        table.add_action(&cfg.volume_up, Command::VolumeUp);
        table.add_action(&cfg.volume_down, Command::VolumeDown);
        table
    }

    fn add_slot_action(&mut self, chords: &[String], make: fn(u8) -> Command) {
        for (slot, chord) in chords.iter().enumerate().take(256) {
            self.add_chord(chord, make(slot as u8));
        }
    }

    fn add_action(&mut self, chords: &[String], command: Command) {
        for chord in chords {
            self.add_chord(chord, command);
        }
    }

    fn add_chord(&mut self, chord: &str, command: Command) {
        match parse_chord(chord) {
            Some((trigger, mask)) => self.bindings.push(Binding {
                trigger,
                chord: mask,
                command,
            }),
            None => log::warn!("ignoring unparseable binding {chord:?}"),
        }
    }

    /// Look up the command for a trigger slot given the full held mask
    /// (which includes the trigger itself). `None` means the press binds
    /// nothing, which the resolver treats as a no-op.
    pub fn resolve(&self, trigger: ButtonSlot, held: u16) -> Option<Command> {
        self.bindings
            .iter()
            .filter(|b| b.trigger == trigger && b.chord & held == b.chord)
            .max_by_key(|b| b.chord.count_ones())
            .map(|b| b.command)
    }
}

/// `"Guide+L1"` → (trigger `L1`, chord mask {Guide}). Any unknown button
/// name invalidates the whole chord.
fn parse_chord(s: &str) -> Option<(ButtonSlot, u16)> {
    let mut names = s.split('+').map(str::trim);
    let trigger = ButtonSlot::from_name(names.next_back()?)?;
    let mut mask = 0u16;
    for name in names {
        mask |= ButtonSlot::from_name(name)?.bit();
    }
    Some((trigger, mask))
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::BindingsConfig;

    #[test]
    fn chord_strings_parse_into_trigger_and_mask() {
        assert_eq!(
            parse_chord("Guide+L1"),
            Some((ButtonSlot::L1, ButtonSlot::Guide.bit()))
        );
        assert_eq!(
            parse_chord("Guide+L1+A"),
            Some((ButtonSlot::A, ButtonSlot::Guide.bit() | ButtonSlot::L1.bit()))
        );
        assert_eq!(parse_chord("Start"), Some((ButtonSlot::Start, 0)));
        assert_eq!(parse_chord("Guide+Frobnicator"), None);
        assert_eq!(parse_chord(""), None);
    }

    #[test]
    fn bare_slots_resolve_to_joypad_buttons() {
        let table = BindingTable::with_defaults();
        let held = ButtonSlot::A.bit();
        assert_eq!(
            table.resolve(ButtonSlot::A, held),
            Some(Command::Control(ControlButton::A))
        );
        assert_eq!(
            table.resolve(ButtonSlot::Guide, ButtonSlot::Guide.bit()),
            Some(Command::Control(ControlButton::Select))
        );
    }

    #[test]
    fn most_specific_chord_wins() {
        let table = BindingTable::from_config(&BindingsConfig::default());
        // L1 alone is the engine's L shoulder.
        assert_eq!(
            table.resolve(ButtonSlot::L1, ButtonSlot::L1.bit()),
            Some(Command::Control(ControlButton::L))
        );
        // With Guide held the same trigger becomes a load command.
        let held = ButtonSlot::Guide.bit() | ButtonSlot::L1.bit();
        assert_eq!(table.resolve(ButtonSlot::L1, held), Some(Command::LoadSlot(0)));
        // An unrelated extra held button changes nothing.
        let held = held | ButtonSlot::Up.bit();
        assert_eq!(table.resolve(ButtonSlot::L1, held), Some(Command::LoadSlot(0)));
    }

    #[test]
    fn slot_actions_are_list_indexed() {
        let mut cfg = BindingsConfig::default();
        cfg.load = vec!["Guide+L1".into(), "Guide+L1+A".into(), "Guide+L1+B".into()];
        cfg.load_ref = vec!["Guide+L1+X".into()];
        let table = BindingTable::from_config(&cfg);

        let held = ButtonSlot::Guide.bit() | ButtonSlot::L1.bit() | ButtonSlot::B.bit();
        assert_eq!(table.resolve(ButtonSlot::B, held), Some(Command::LoadSlot(2)));
        let held = ButtonSlot::Guide.bit() | ButtonSlot::L1.bit() | ButtonSlot::X.bit();
        assert_eq!(
            table.resolve(ButtonSlot::X, held),
            Some(Command::LoadRefSlot(0))
        );
    }

    #[test]
    fn config_can_rebind_a_default_chord() {
        let mut cfg = BindingsConfig::default();
        // Same chord as the default reset binding; the later entry wins.
        cfg.pause = vec!["Guide+Start".into()];
        let table = BindingTable::from_config(&cfg);
        let held = ButtonSlot::Guide.bit() | ButtonSlot::Start.bit();
        assert_eq!(table.resolve(ButtonSlot::Start, held), Some(Command::Pause));
    }

    #[test]
    fn unbound_chords_resolve_to_nothing() {
        let table = BindingTable::with_defaults();
        let held = ButtonSlot::Guide.bit() | ButtonSlot::L1.bit();
        // Bare-slot default still matches for the trigger, never None here,
        // but a trigger with no binding at all is None.
        assert_eq!(
            table.resolve(ButtonSlot::L1, held),
            Some(Command::Control(ControlButton::L))
        );
        let empty = BindingTable { bindings: vec![] };
        assert_eq!(empty.resolve(ButtonSlot::L1, held), None);
    }
}
