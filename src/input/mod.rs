/// Input pipeline: physical events → abstract slots → commands → engine.
///
/// `gamepad` reads the controller (gilrs, feature-gated) and emits
/// `(ButtonSlot, pressed)` edges; `resolver` runs the per-slot state
/// machine against the `bindings` chord table and hands resolved commands
/// to the dispatcher in `command`.
mod bindings;
mod buttons;
mod command;
mod gamepad;
mod resolver;

pub use bindings::BindingTable;
pub use buttons::{ButtonSlot, SLOT_COUNT};
pub use command::{Command, ControlButton, REF_SLOT_BASE};
pub use gamepad::GamepadSource;
pub use resolver::CommandResolver;
