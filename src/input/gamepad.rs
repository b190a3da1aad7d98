/// Physical gamepad event source using gilrs.
///
/// Emits `(ButtonSlot, pressed)` edges for the resolver. The left stick is
/// synthesized into the four D-pad slots with a deadzone, so stick and
/// D-pad share the same bindings.
#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::input::buttons::ButtonSlot;

const STICK_DEADZONE: f32 = 0.25;

const DIRS: [ButtonSlot; 4] = [
    ButtonSlot::Up,
    ButtonSlot::Down,
    ButtonSlot::Left,
    ButtonSlot::Right,
];

pub struct GamepadSource {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    stick_x: f32,
    stick_y: f32,
    stick_held: [bool; 4],

    pub connected: bool,
}

impl Default for GamepadSource {
    fn default() -> Self {
        Self::new()
    }
}

impl GamepadSource {
    pub fn new() -> Self {
        #[cfg(feature = "gamepad")]
        let (gilrs, connected) = match Gilrs::new() {
            Ok(g) => {
                let has_pad = g.gamepads().next().is_some();
                (Some(g), has_pad)
            }
            Err(e) => {
                log::warn!("gamepad backend unavailable: {e}");
                (None, false)
            }
        };
        #[cfg(not(feature = "gamepad"))]
        let connected = false;

        GamepadSource {
            #[cfg(feature = "gamepad")]
            gilrs,
            stick_x: 0.0,
            stick_y: 0.0,
            stick_held: [false; 4],
            connected,
        }
    }

    /// Drain pending controller events into `out`. Call once per frame.
    pub fn poll(&mut self, out: &mut Vec<(ButtonSlot, bool)>) {
        #[cfg(feature = "gamepad")]
        self.poll_gilrs(out);

        // Derive digital direction edges from the stick position.
        let now = [
            self.stick_y > STICK_DEADZONE,
            self.stick_y < -STICK_DEADZONE,
            self.stick_x < -STICK_DEADZONE,
            self.stick_x > STICK_DEADZONE,
        ];
        for (i, slot) in DIRS.into_iter().enumerate() {
            if now[i] != self.stick_held[i] {
                self.stick_held[i] = now[i];
                out.push((slot, now[i]));
            }
        }
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self, out: &mut Vec<(ButtonSlot, bool)>) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => {
                    self.mark_connected();
                    if let Some(slot) = ButtonSlot::from_gilrs(btn) {
                        out.push((slot, true));
                    }
                }
                EventType::ButtonReleased(btn, _) => {
                    self.mark_connected();
                    if let Some(slot) = ButtonSlot::from_gilrs(btn) {
                        out.push((slot, false));
                    }
                }
                EventType::AxisChanged(axis, value, _) => {
                    self.mark_connected();
                    self.update_axis(axis, value);
                }
                EventType::Connected => self.mark_connected(),
                EventType::Disconnected => {
                    if self.connected {
                        log::warn!("gamepad disconnected");
                    }
                    self.connected = false;
                    self.stick_x = 0.0;
                    self.stick_y = 0.0;
                }
                _ => {}
            }
        }
    }

    #[cfg(feature = "gamepad")]
    fn mark_connected(&mut self) {
        if !self.connected {
            log::info!("gamepad connected");
        }
        self.connected = true;
    }

    #[cfg(feature = "gamepad")]
    fn update_axis(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::LeftStickX => self.stick_x = value,
            Axis::LeftStickY => self.stick_y = value,
            _ => {}
        }
    }
}
