//! Best-match search over a captured frame

use image::GrayImage;
use imageproc::template_matching::{MatchTemplateMethod, find_extremes, match_template};

use super::types::MatchResult;

/// Find the best alignment of `template` within `frame`.
///
/// Scores come from normalized cross correlation, so the same percentage
/// threshold is meaningful across templates of different size and content.
/// Deterministic: one scale, no rotation, every valid position is evaluated.
///
/// Returns `None` when the template cannot fit inside the frame (or is
/// empty). That is an always-no-match, not an error: a template larger than
/// every display simply never triggers.
pub fn best_match(frame: &GrayImage, template: &GrayImage) -> Option<MatchResult> {
    if template.width() == 0 || template.height() == 0 {
        return None;
    }
    if template.width() > frame.width() || template.height() > frame.height() {
        return None;
    }

    let scores = match_template(frame, template, MatchTemplateMethod::CrossCorrelationNormalized);
    let extremes = find_extremes(&scores);
    let (x, y) = extremes.max_value_location;
    Some(MatchResult {
        x,
        y,
        score: extremes.max_value,
    })
}
