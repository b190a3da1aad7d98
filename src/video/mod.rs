/// Presentation: the four-operation display capability and the concrete
/// rotated-panel backend. The frame loop holds one backend chosen at
/// startup and drives it with one begin/end pair per presented frame.
mod backend;
mod panel;

pub use backend::DisplayBackend;
pub use panel::RotatedPanel;
