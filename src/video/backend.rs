/// Display capability: exactly the four operations the frame loop needs.
///
/// `begin_draw` hands the engine renderer a scratch surface of
/// `width * height` 32-bit pixels (A-R-G-B channel order, `pitch` pixels
/// per row, top-to-bottom); `end_draw` commits whatever was written to the
/// physical framebuffer. One begin/end pair per presented frame.
///
/// Geometry is a caller contract: backends do not validate `width` and
/// `height` against the panel, an out-of-range frame panics on the slice
/// write instead of scribbling.
pub trait DisplayBackend {
    /// Bring the output surface up (clear to black).
    fn initialize(&mut self);

    /// Tear the output surface down. No draw calls may follow.
    fn destroy(&mut self);

    /// Borrow the scratch surface for one frame. Pitch is in pixels.
    fn begin_draw(&mut self, width: usize, height: usize) -> (&mut [u32], usize);

    /// Transform the scratch surface into the physical framebuffer.
    fn end_draw(&mut self);
}
