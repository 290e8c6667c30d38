/// Template matching data types
/// Best-scoring alignment of a template within one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MatchResult {
    /// X coordinate of the match top-left corner, in frame-local pixels
    pub x: u32,
    /// Y coordinate of the match top-left corner, in frame-local pixels
    pub y: u32,
    /// Normalized correlation score, 1.0 for a perfect match
    pub score: f32,
}
