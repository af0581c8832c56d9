use crate::params::AnalysisParams;
use crate::region::Region;

/// Regions with more than `min_region_size * LARGE_REGION_DENSITY_WAIVER`
/// pixels skip the density test: large sparse regions are kept as meaningful
/// rather than discarded as noise.
pub const LARGE_REGION_DENSITY_WAIVER: usize = 10;

/// Drops regions that look like noise, keeping the survivors in their
/// original relative order.
///
/// A region is dropped when any of these holds:
///
/// 1. `size < min_region_size`;
/// 2. its aspect ratio (`width / height`) is outside
///    `[min_aspect_ratio, max_aspect_ratio]` (zero-height boxes and single
///    pixels always are);
/// 3. its bounding-box area is zero, or its density is below `min_density`,
///    unless the region is large enough for [`LARGE_REGION_DENSITY_WAIVER`].
pub fn filter_regions(mut regions: Vec<Region>, params: &AnalysisParams) -> Vec<Region> {
    let before = regions.len();
    regions.retain(|region| keep_region(region, params));
    tracing::debug!(before, after = regions.len(), "filtered regions");
    regions
}

fn keep_region(region: &Region, params: &AnalysisParams) -> bool {
    if region.size < params.min_region_size {
        return false;
    }

    let aspect = region.aspect_ratio();
    if !(params.min_aspect_ratio..=params.max_aspect_ratio).contains(&aspect) {
        return false;
    }

    if region.size > params.min_region_size.saturating_mul(LARGE_REGION_DENSITY_WAIVER) {
        return true;
    }
    matches!(region.density(), Some(density) if density >= params.min_density)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> AnalysisParams {
        AnalysisParams {
            min_region_size: 20,
            min_density: 0.3,
            min_aspect_ratio: 0.25,
            max_aspect_ratio: 4.0,
            ..AnalysisParams::default()
        }
    }

    fn region(min_x: u32, max_x: u32, min_y: u32, max_y: u32, size: usize) -> Region {
        Region {
            min_x,
            max_x,
            min_y,
            max_y,
            size,
        }
    }

    #[test]
    fn keeps_a_solid_square() {
        let square = region(0, 9, 0, 9, 100);
        assert_eq!(filter_regions(vec![square], &params()), vec![square]);
    }

    #[test]
    fn drops_small_regions() {
        assert!(filter_regions(vec![region(0, 3, 0, 3, 16)], &params()).is_empty());
    }

    #[test]
    fn drops_out_of_range_aspect_ratios() {
        let wide = region(0, 50, 0, 5, 200); // 10:1
        let tall = region(0, 5, 0, 50, 200); // 1:10
        let edge = region(0, 40, 0, 10, 200); // exactly 4:1
        assert_eq!(filter_regions(vec![wide, tall, edge], &params()), vec![edge]);
    }

    #[test]
    fn drops_zero_area_regions() {
        // A single row has infinite aspect ratio, a single pixel has none.
        let row = region(0, 30, 5, 5, 31);
        let column = region(5, 5, 0, 30, 31);
        assert!(filter_regions(vec![row, column], &params()).is_empty());
    }

    #[test]
    fn drops_sparse_regions() {
        // Area 400, 50 pixels: density 0.125.
        let sparse = region(0, 20, 0, 20, 50);
        assert!(filter_regions(vec![sparse], &params()).is_empty());
    }

    #[test]
    fn large_sparse_regions_are_waived() {
        // 201 pixels > 20 * 10, density ~0.02.
        let large_sparse = region(0, 100, 0, 100, 201);
        // Exactly 200 pixels does not qualify.
        let borderline = region(0, 100, 0, 100, 200);
        assert_eq!(
            filter_regions(vec![large_sparse, borderline], &params()),
            vec![large_sparse]
        );
    }

    #[test]
    fn preserves_relative_order() {
        let a = region(0, 9, 0, 9, 100);
        let noise = region(20, 21, 20, 21, 4);
        let b = region(30, 39, 30, 39, 90);
        assert_eq!(filter_regions(vec![a, noise, b], &params()), vec![a, b]);
    }
}
