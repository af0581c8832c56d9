use crate::diff_map::DiffMask;
use crate::region::Region;

const NEIGHBOURS: [(i64, i64); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Groups the set pixels of `mask` into 8-connected regions.
///
/// Seeds are taken in raster order and each region is grown with an explicit
/// work stack, so contiguous areas of any size are handled without recursion.
/// Every set pixel is visited exactly once and belongs to exactly one region.
///
/// # Examples
///
/// ```
/// use diff_spotter::{DiffMask, label_regions};
///
/// // Two diagonal neighbours form one region, the lone pixel another.
/// let mask = DiffMask::from_bits(4, 3, vec![
///     true,  false, false, false,
///     false, true,  false, false,
///     false, false, false, true,
/// ]);
/// let regions = label_regions(&mask);
/// assert_eq!(regions.len(), 2);
/// assert_eq!(regions[0].size, 2);
/// ```
pub fn label_regions(mask: &DiffMask) -> Vec<Region> {
    let width = mask.width() as usize;
    let height = mask.height() as usize;
    let bits = mask.bits();

    let mut visited = vec![false; bits.len()];
    let mut stack: Vec<usize> = Vec::new();
    let mut regions = Vec::new();

    for seed in 0..bits.len() {
        if !bits[seed] || visited[seed] {
            continue;
        }

        visited[seed] = true;
        stack.push(seed);
        let mut region = Region::at((seed % width) as u32, (seed / width) as u32);

        while let Some(index) = stack.pop() {
            let (x, y) = (index % width, index / width);
            for (dx, dy) in NEIGHBOURS {
                let nx = x as i64 + dx;
                let ny = y as i64 + dy;
                if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                let neighbour = ny as usize * width + nx as usize;
                if bits[neighbour] && !visited[neighbour] {
                    visited[neighbour] = true;
                    region.include(nx as u32, ny as u32);
                    stack.push(neighbour);
                }
            }
        }

        regions.push(region);
    }

    tracing::debug!(regions = regions.len(), "labelled connected regions");
    regions
}
