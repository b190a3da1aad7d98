/// Abstract button slots.
///
/// Physical controller buttons are remapped into this fixed slot set before
/// anything else sees them; unmapped physical buttons are dropped. The
/// console's SELECT/back button lands on `Guide`, which the default chord
/// bindings use as the command modifier.
#[cfg(feature = "gamepad")]
use gilrs::Button;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ButtonSlot {
    A = 0, // South
    B,     // East
    X,     // West
    Y,     // North
    L1,
    R1,
    Start,
    Guide, // physical SELECT / back / mode
    Up,
    Down,
    Left,
    Right,
}

pub const SLOT_COUNT: usize = 12;

impl ButtonSlot {
    pub fn index(self) -> usize {
        self as usize
    }

    /// One bit per slot, for the held-chord bitmask.
    pub fn bit(self) -> u16 {
        1 << self as u16
    }

    pub fn from_name(s: &str) -> Option<ButtonSlot> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH" => Some(ButtonSlot::A),
            "B" | "EAST" => Some(ButtonSlot::B),
            "X" | "WEST" => Some(ButtonSlot::X),
            "Y" | "NORTH" => Some(ButtonSlot::Y),
            "L1" | "LB" | "LEFTTRIGGER" => Some(ButtonSlot::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(ButtonSlot::R1),
            "START" => Some(ButtonSlot::Start),
            "GUIDE" | "SELECT" | "BACK" | "MODE" => Some(ButtonSlot::Guide),
            "UP" | "DPADUP" => Some(ButtonSlot::Up),
            "DOWN" | "DPADDOWN" => Some(ButtonSlot::Down),
            "LEFT" | "DPADLEFT" => Some(ButtonSlot::Left),
            "RIGHT" | "DPADRIGHT" => Some(ButtonSlot::Right),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    pub(crate) fn from_gilrs(btn: Button) -> Option<ButtonSlot> {
        match btn {
            Button::South => Some(ButtonSlot::A),
            Button::East => Some(ButtonSlot::B),
            Button::West => Some(ButtonSlot::X),
            Button::North => Some(ButtonSlot::Y),
            Button::LeftTrigger => Some(ButtonSlot::L1),
            Button::RightTrigger => Some(ButtonSlot::R1),
            Button::Start => Some(ButtonSlot::Start),
            Button::Select | Button::Mode => Some(ButtonSlot::Guide),
            Button::DPadUp => Some(ButtonSlot::Up),
            Button::DPadDown => Some(ButtonSlot::Down),
            Button::DPadLeft => Some(ButtonSlot::Left),
            Button::DPadRight => Some(ButtonSlot::Right),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_default_chord_name_parses() {
        for name in ["Guide", "L1", "R1", "Start", "A", "B", "X", "Y", "Up", "Down", "Left", "Right"] {
            assert!(ButtonSlot::from_name(name).is_some(), "{name}");
        }
        assert_eq!(ButtonSlot::from_name("Select"), Some(ButtonSlot::Guide));
        assert!(ButtonSlot::from_name("Pedal").is_none());
    }

    #[test]
    fn slot_bits_are_distinct() {
        let slots = [
            ButtonSlot::A, ButtonSlot::B, ButtonSlot::X, ButtonSlot::Y,
            ButtonSlot::L1, ButtonSlot::R1, ButtonSlot::Start, ButtonSlot::Guide,
            ButtonSlot::Up, ButtonSlot::Down, ButtonSlot::Left, ButtonSlot::Right,
        ];
        let mut mask = 0u16;
        for s in slots {
            assert_eq!(mask & s.bit(), 0);
            mask |= s.bit();
        }
        assert_eq!(mask.count_ones() as usize, SLOT_COUNT);
    }
}
