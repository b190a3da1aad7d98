/// Frame-synchronous loop driver.
///
/// One thread, one iteration per display refresh: drain input events,
/// resolve and dispatch commands, advance the engine (unless paused),
/// present, then block until the next vblank. Command dispatch finishes
/// before the frame advance starts, which is what keeps the
/// persistent-state lock contract trivially satisfied.
use std::time::{Duration, Instant};

use spin_sleep::SpinSleeper;

use crate::config::PortConfig;
use crate::context::PlatformContext;
use crate::engine::EngineCore;
use crate::input::{BindingTable, ButtonSlot, CommandResolver, GamepadSource};
use crate::video::DisplayBackend;

const VBLANK_PERIOD: Duration = Duration::from_nanos(16_666_667); // 60 Hz
/// While fast-forwarding only every n-th frame is presented.
const TURBO_DRAW_INTERVAL: u32 = 8;
const FPS_WINDOW: usize = 64;
const STOCK_FRAME_WIDTH: usize = 256;

pub struct FrameLoop<E: EngineCore, D: DisplayBackend> {
    ctx: PlatformContext,
    engine: E,
    display: D,
    bindings: BindingTable,
    resolver: CommandResolver,
    gamepad: GamepadSource,
    events: Vec<(ButtonSlot, bool)>,

    frame_width: usize,
    frame_height: usize,

    frame: u32,
    sleeper: SpinSleeper,
    next_vblank: Instant,
    last_frame_at: Instant,
    frame_times: [f32; FPS_WINDOW],
}

impl<E: EngineCore, D: DisplayBackend> FrameLoop<E, D> {
    pub fn new(config: &PortConfig, context: PlatformContext, engine: E, mut display: D) -> Self {
        display.initialize();
        let now = Instant::now();
        FrameLoop {
            ctx: context,
            engine,
            display,
            bindings: BindingTable::from_config(&config.bindings),
            resolver: CommandResolver::new(),
            gamepad: GamepadSource::new(),
            events: Vec::new(),
            frame_width: STOCK_FRAME_WIDTH + config.extended_aspect as usize * 2,
            frame_height: if config.extend_y { 240 } else { 224 },
            frame: 0,
            sleeper: SpinSleeper::default(),
            next_vblank: now + VBLANK_PERIOD,
            last_frame_at: now,
            frame_times: [0.0; FPS_WINDOW],
        }
    }

    /// Inject one button edge ahead of the next `step`. Alternate input
    /// sources (and the tests) use this instead of the gamepad.
    pub fn feed_button(&mut self, slot: ButtonSlot, pressed: bool) {
        self.events.push((slot, pressed));
    }

    /// One loop iteration: input, advance, present, pace.
    pub fn step(&mut self) {
        self.gamepad.poll(&mut self.events);
        for i in 0..self.events.len() {
            let (slot, pressed) = self.events[i];
            self.resolver
                .handle(slot, pressed, &self.bindings, &mut self.ctx, &mut self.engine);
        }
        self.events.clear();

        let mut is_replay = false;
        if !self.ctx.paused {
            self.ctx.in_frame_advance = true;
            is_replay = self.engine.run_frame(self.ctx.input_word);
            self.ctx.in_frame_advance = false;
        }
        self.frame = self.frame.wrapping_add(1);

        let turbo_active = if is_replay {
            self.ctx.replay_turbo
        } else {
            self.ctx.turbo
        };

        // While paused nothing re-renders; the panel keeps the last
        // committed frame (dimmed once if the pause asked for it), so the
        // still image survives every following vblank.
        let present_now = if self.ctx.paused {
            self.ctx.dim_request
        } else {
            !turbo_active || self.frame % TURBO_DRAW_INTERVAL == 0
        };
        if present_now {
            self.present();
        }
        self.track_fps();
        if !turbo_active {
            self.wait_vblank();
        }
    }

    /// Run until the exit condition goes false, checked once per
    /// iteration. This is the loop's only cancellation point.
    pub fn run_until(&mut self, mut keep_running: impl FnMut() -> bool) {
        while keep_running() {
            self.step();
        }
    }

    pub fn shutdown(mut self) {
        self.display.destroy();
    }

    pub fn context(&self) -> &PlatformContext {
        &self.ctx
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    // ── Presentation ──

    fn present(&mut self) {
        let (pixels, pitch) = self.display.begin_draw(self.frame_width, self.frame_height);
        self.engine.draw_frame(pixels, pitch);
        if self.ctx.dim_request {
            // Halve every channel so the paused frame reads as inactive.
            for px in pixels.iter_mut() {
                *px = (*px >> 1) & 0x7F7F_7F7F;
            }
            self.ctx.dim_request = false;
        }
        self.display.end_draw();
    }

    // ── Pacing ──

    fn wait_vblank(&mut self) {
        let now = Instant::now();
        if self.next_vblank > now {
            self.sleeper.sleep(self.next_vblank - now);
            self.next_vblank += VBLANK_PERIOD;
        } else {
            // Fell behind; resync instead of bursting catch-up frames.
            self.next_vblank = now + VBLANK_PERIOD;
        }
    }

    fn track_fps(&mut self) {
        let now = Instant::now();
        let dt = now - self.last_frame_at;
        self.last_frame_at = now;
        self.frame_times[self.frame as usize % FPS_WINDOW] = dt.as_secs_f32();

        if self.ctx.display_perf && self.frame % FPS_WINDOW as u32 == 0 {
            let total: f32 = self.frame_times.iter().sum();
            if total > 0.0 {
                self.ctx.current_fps = FPS_WINDOW as f32 / total;
                log::debug!("fps: {:.1}", self.ctx.current_fps);
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════
