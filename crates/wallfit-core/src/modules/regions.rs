//! Edge strip selection for background sampling.

use crate::domain::{Dimensions, EdgeMatchFlags, Ratio, Region};

/// Returns the pair of edge strips to sample for a background color.
///
/// Each strip spans `floor(side * edge_fraction / 2)` pixels measured inward
/// from opposite edges. When both flag axes are set (the `Center` case) the
/// vertical left/right strips win, since side bands dominate on wide screens.
/// With no flags set, or when the strip width floors to zero, both regions
/// are empty.
#[must_use]
pub fn edge_strips(size: Dimensions, flags: EdgeMatchFlags, edge_fraction: Ratio) -> (Region, Region) {
    if flags.match_left_right {
        let w = strip_depth(size.width(), edge_fraction);
        (
            Region::new(0, 0, w, size.height()),
            Region::new(size.width() - w, 0, w, size.height()),
        )
    } else if flags.match_top_bottom {
        let h = strip_depth(size.height(), edge_fraction);
        (
            Region::new(0, 0, size.width(), h),
            Region::new(0, size.height() - h, size.width(), h),
        )
    } else {
        (Region::EMPTY, Region::EMPTY)
    }
}

/// `floor(side * fraction / 2)`, exact because nested integer floors agree
/// with the single rational floor.
#[allow(clippy::cast_possible_truncation)] // result is at most side / 2 for fractions <= 1
fn strip_depth(side: u32, fraction: Ratio) -> u32 {
    (fraction.scale_floor(u64::from(side)) / 2) as u32
}
