//! Platform-adaptation layer for the handheld-console port.
//!
//! The engine core (CPU/PPU/APU emulation) and the console's boot/windowing
//! bootstrap live outside this crate. What lives here is everything between
//! them:
//!
//! * `assets`: decodes the packed asset container into zero-copy views and
//!   applies optional ZSPR player-sprite overrides to the fixed graphics
//!   tables. Both run once at startup; any violation there is fatal.
//! * `input`: turns physical gamepad events into abstract button slots,
//!   resolves (slot, modifier-chord) pairs into commands, and dispatches
//!   them to the engine hooks and runtime toggles.
//! * `video`: the four-operation display capability (initialize, destroy,
//!   begin_draw, end_draw) plus the rotated-panel compositor that rewrites
//!   the engine's pixel buffer into the physical framebuffer layout.
//! * `runner`: the single-threaded frame loop that polls input, advances
//!   the engine, composites, and blocks until the next vblank.
//!
//! Shared mutable state is held in one [`PlatformContext`] owned by the
//! frame-loop driver and passed by reference into each component; there are
//! no module-level singletons.

pub mod assets;
pub mod config;
pub mod context;
pub mod engine;
pub mod input;
pub mod runner;
pub mod startup;
pub mod video;

pub use assets::{AssetId, AssetPack, PlayerGraphics, ASSET_COUNT};
pub use config::PortConfig;
pub use context::PlatformContext;
pub use engine::EngineCore;
pub use input::{ButtonSlot, Command};
pub use runner::FrameLoop;
pub use startup::{startup, StartupError};
pub use video::{DisplayBackend, RotatedPanel};
