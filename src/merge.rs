use crate::region::Region;

/// Repeatedly merges regions whose bounding boxes are closer than
/// `merge_distance` until a full pass makes no merge.
///
/// Each pass compares every pair. When region `j` is absorbed into region
/// `i`, it is swap-removed and the scan for `i` restarts, because the grown
/// box may now reach regions it previously missed. Output order is
/// deterministic but not meaningful.
///
/// # Examples
///
/// ```
/// use diff_spotter::{Region, merge_regions};
///
/// let a = Region { min_x: 0, max_x: 9, min_y: 0, max_y: 9, size: 100 };
/// let b = Region { min_x: 12, max_x: 20, min_y: 0, max_y: 9, size: 90 };
///
/// assert_eq!(merge_regions(vec![a, b], 2.0).len(), 2);
///
/// let merged = merge_regions(vec![a, b], 5.0);
/// assert_eq!(merged.len(), 1);
/// assert_eq!(merged[0].size, 190);
/// ```
pub fn merge_regions(mut regions: Vec<Region>, merge_distance: f64) -> Vec<Region> {
    let before = regions.len();
    let mut passes = 0usize;

    loop {
        passes += 1;
        let mut merged_any = false;

        let mut i = 0;
        while i < regions.len() {
            let mut j = i + 1;
            while j < regions.len() {
                let gap = regions[i].gap_to(&regions[j]);
                if gap < merge_distance {
                    tracing::trace!(?gap, into = ?regions[i], absorbed = ?regions[j], "merging regions");
                    let absorbed = regions.swap_remove(j);
                    regions[i] = regions[i].union(&absorbed);
                    merged_any = true;
                    j = i + 1;
                } else {
                    j += 1;
                }
            }
            i += 1;
        }

        if !merged_any {
            break;
        }
    }

    tracing::debug!(before, after = regions.len(), passes, "merged regions");
    regions
}
