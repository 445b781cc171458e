//! Two-column page assembly
//!
//! Page-object-based extraction reports text for the left-half and
//! right-half bounding boxes of each page alongside the full-page
//! extraction. When the two halves produce similar line counts the page
//! is a genuine two-column layout and the halves are concatenated
//! left-then-right; otherwise the full-page extraction wins.

use serde::{Deserialize, Serialize};

/// Text extracted from one page: the two half-width bounding boxes and
/// the full page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageRegions {
    pub left: String,
    pub right: String,
    pub full: String,
}

/// Line count as the column heuristic sees it: `split('\n')`, so an
/// empty region still counts one line.
fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Assemble one page's text.
///
/// The tolerance (10 lines) is a tuned tie-break; the comparison is
/// strict (`< tolerance`), matching the layouts it was calibrated on.
pub fn assemble_page(page: &PageRegions, tolerance: usize) -> String {
    let left_lines = line_count(&page.left);
    let right_lines = line_count(&page.right);

    if left_lines.abs_diff(right_lines) < tolerance {
        format!("{}\n\n{}", page.left, page.right)
    } else {
        page.full.clone()
    }
}

/// Assemble a whole document from per-page regions, pages separated by
/// a blank line.
pub fn assemble_document(pages: &[PageRegions], tolerance: usize) -> String {
    pages
        .iter()
        .map(|p| assemble_page(p, tolerance))
        .collect::<Vec<_>>()
        .join("\n\n")
}
