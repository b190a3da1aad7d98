/// Rotated-panel compositor.
///
/// The console's LCD is mounted rotated a quarter turn relative to the
/// rendered image, and its controller wants the channel bytes rotated by
/// one position. `end_draw` does both in one pass: each source pixel
/// `(x, y)` lands at framebuffer index
/// `base + (panel_width - y) + x * panel_width`, with its 32-bit word
/// barrel-rotated left by 8 bits. `base` is zero for the full-panel layout
/// and `margin_rows * frame_height` for the centered layout that floats a
/// smaller logical frame inside the panel.
use crate::video::backend::DisplayBackend;

const PANEL_WIDTH: usize = 240;
const PANEL_HEIGHT: usize = 400;
const CENTER_MARGIN_ROWS: usize = 72;

pub struct RotatedPanel {
    framebuffer: Vec<u32>,
    panel_width: usize,
    panel_height: usize,
    margin_rows: usize,

    // Scratch surface between begin_draw and end_draw. Grows to the
    // largest frame ever requested and never shrinks.
    scratch: Vec<u32>,
    frame_width: usize,
    frame_height: usize,
}

impl RotatedPanel {
    pub fn new(panel_width: usize, panel_height: usize, margin_rows: usize) -> Self {
        RotatedPanel {
            framebuffer: vec![0; panel_width * panel_height],
            panel_width,
            panel_height,
            margin_rows,
            scratch: Vec::new(),
            frame_width: 0,
            frame_height: 0,
        }
    }

    /// The main screen, frame drawn from the panel edge.
    pub fn top_screen() -> Self {
        RotatedPanel::new(PANEL_WIDTH, PANEL_HEIGHT, 0)
    }

    /// The main screen with the stock-width frame floated to the middle.
    pub fn centered() -> Self {
        RotatedPanel::new(PANEL_WIDTH, PANEL_HEIGHT, CENTER_MARGIN_ROWS)
    }

    /// The committed physical surface, `panel_width * panel_height` pixels.
    /// Flushing it to the glass belongs to the platform bootstrap.
    pub fn framebuffer(&self) -> &[u32] {
        &self.framebuffer
    }

    /// Physical geometry, for whoever flushes the framebuffer.
    pub fn panel_size(&self) -> (usize, usize) {
        (self.panel_width, self.panel_height)
    }

    #[cfg(test)]
    fn scratch_capacity(&self) -> usize {
        self.scratch.len()
    }
}

impl DisplayBackend for RotatedPanel {
    fn initialize(&mut self) {
        self.framebuffer.fill(0);
    }

    fn destroy(&mut self) {
        self.framebuffer = Vec::new();
        self.scratch = Vec::new();
    }

    fn begin_draw(&mut self, width: usize, height: usize) -> (&mut [u32], usize) {
        let need = width * height;
        if need > self.scratch.len() {
            log::debug!("frame scratch grows to {need} pixels");
            self.scratch.resize(need, 0);
        }
        self.frame_width = width;
        self.frame_height = height;
        (&mut self.scratch[..need], width)
    }

    fn end_draw(&mut self) {
        let base = self.margin_rows * self.frame_height;
        for y in 0..self.frame_height {
            let row = &self.scratch[y * self.frame_width..][..self.frame_width];
            let column_start = base + self.panel_width - y;
            for (x, &px) in row.iter().enumerate() {
                self.framebuffer[column_start + x * self.panel_width] = px.rotate_left(8);
            }
        }
    }
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinate_remap_matches_the_panel_formula() {
        // Panel as wide as the frame so the destination indices are easy
        // to read: (0,0) -> 256, (1,0) -> 512.
        let mut panel = RotatedPanel::new(256, 400, 0);
        let (pixels, pitch) = panel.begin_draw(256, 224);
        assert_eq!(pitch, 256);
        pixels[0] = 0x0000_0001; // (0,0)
        pixels[1] = 0x0000_0002; // (1,0)
        pixels[256] = 0x0000_0003; // (0,1)
        panel.end_draw();

        let fb = panel.framebuffer();
        assert_eq!(fb[256], 0x0000_0001u32.rotate_left(8));
        assert_eq!(fb[512], 0x0000_0002u32.rotate_left(8));
        assert_eq!(fb[255], 0x0000_0003u32.rotate_left(8));
    }

    #[test]
    fn channel_order_is_rotated_one_byte() {
        let mut panel = RotatedPanel::new(256, 400, 0);
        let (pixels, _) = panel.begin_draw(256, 224);
        pixels[0] = 0x1122_3344; // A-R-G-B
        panel.end_draw();
        assert_eq!(panel.framebuffer()[256], 0x2233_4411); // R-G-B-A
    }

    #[test]
    fn centered_layout_offsets_by_margin_rows() {
        let mut panel = RotatedPanel::centered();
        let (pixels, _) = panel.begin_draw(256, 224);
        pixels[0] = 0xFF;
        panel.end_draw();
        let base = 72 * 224;
        assert_eq!(panel.framebuffer()[base + 240], 0xFFu32.rotate_left(8));
    }

    #[test]
    fn scratch_grows_monotonically_and_never_shrinks() {
        let mut panel = RotatedPanel::top_screen();
        {
            let (pixels, _) = panel.begin_draw(256, 224);
            assert_eq!(pixels.len(), 256 * 224);
        }
        assert_eq!(panel.scratch_capacity(), 256 * 224);

        // A smaller frame reuses the buffer.
        {
            let (pixels, _) = panel.begin_draw(64, 64);
            assert_eq!(pixels.len(), 64 * 64);
        }
        assert_eq!(panel.scratch_capacity(), 256 * 224);

        // A larger frame grows it.
        {
            let (pixels, _) = panel.begin_draw(320, 240);
            assert_eq!(pixels.len(), 320 * 240);
        }
        assert_eq!(panel.scratch_capacity(), 320 * 240);
    }

    #[test]
    fn whole_frame_lands_inside_the_panel() {
        let mut panel = RotatedPanel::centered();
        let (pixels, _) = panel.begin_draw(256, 224);
        pixels.fill(0xAA55_AA55);
        panel.end_draw(); // must not panic on any index
        assert!(panel.framebuffer().iter().any(|&p| p != 0));
    }
}
