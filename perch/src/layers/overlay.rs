//! Overlay placement relative to an anchor element.
//!
//! Overlays are floating panels rendered outside normal layout flow, appended
//! straight to the document body and positioned with page coordinates. The
//! placement policy is deliberately small:
//!
//! - below the anchor when the space under it fits the overlay height
//! - above the anchor otherwise
//!
//! There is no horizontal flipping and no clamping to the viewport. An anchor
//! near the right edge produces an overlay that overflows it, and an anchor
//! near the top with too little room below produces an overlay whose top is
//! above the page.

use perchdom::{Rect, Viewport};

/// Which side of the anchor the overlay opens on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Side {
    #[default]
    Below,
    Above,
}

/// Where the overlay is drawn, in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub top: f64,
    pub left: f64,
    pub width: f64,
}

impl Position {
    /// The collapsed position used while the anchor is out of view.
    pub const ZERO: Position = Position {
        top: 0.0,
        left: 0.0,
        width: 0.0,
    };

    pub fn new(top: f64, left: f64, width: f64) -> Self {
        Self { top, left, width }
    }
}

/// Result of [`place`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    pub side: Side,
    pub position: Position,
}

/// Calculate where to put an overlay of `overlay_height` next to `anchor`.
///
/// `anchor` is the anchor's bounding rect in viewport coordinates. The result
/// adds the viewport's scroll offsets so it can be used as absolute page
/// offsets.
pub fn place(anchor: Rect, viewport: Viewport, overlay_height: f64) -> Placement {
    let space_below = viewport.height - anchor.bottom();
    let left = anchor.left() + viewport.scroll_x;
    let width = anchor.width;

    if space_below < overlay_height {
        Placement {
            side: Side::Above,
            position: Position::new(anchor.top() + viewport.scroll_y - overlay_height, left, width),
        }
    } else {
        Placement {
            side: Side::Below,
            position: Position::new(anchor.bottom() + viewport.scroll_y, left, width),
        }
    }
}
