use serde::{Deserialize, Serialize};

use crate::region::Region;

/// A bounding circle in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub x: f64,
    pub y: f64,
    pub radius: f64,
}

impl Circle {
    /// Centres a circle on the region's bounding box, with radius
    /// `max(width, height) / 2 * multiplier`.
    pub fn from_region(region: &Region, radius_multiplier: f64) -> Self {
        let (x, y) = region.center();
        let extent = f64::from(region.width().max(region.height()));
        Self {
            x,
            y,
            radius: extent / 2.0 * radius_multiplier,
        }
    }

    pub fn center_distance(&self, other: &Circle) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Two circles overlap when their centres are closer than the sum of
    /// their radii. Tangent circles do not overlap.
    pub fn overlaps(&self, other: &Circle) -> bool {
        self.center_distance(other) < self.radius + other.radius
    }
}

/// One clickable difference, in coordinates normalised to the image.
///
/// `x` is divided by the image width, `y` by the height and `radius` by the
/// shorter side. `found_time` belongs to the consumer and is always `None`
/// when produced by the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Difference {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub found_time: Option<u64>,
}

impl Difference {
    /// The difference's circle back in pixel space.
    pub fn to_pixel_circle(&self, width: u32, height: u32) -> Circle {
        Circle {
            x: self.x * f64::from(width),
            y: self.y * f64::from(height),
            radius: self.radius * f64::from(width.min(height)),
        }
    }
}

/// Turns merged regions into the final, non-overlapping difference list.
///
/// Regions whose bounding-box width or height exceeds
/// `max_region_size_percent` of the image's shorter side are dropped first.
/// The rest become circles, sorted by radius (largest first, ties keep their
/// input order). A circle is kept only if it overlaps none of the circles
/// already kept, so larger differences win. Kept circles are numbered from 0
/// in that order and normalised.
pub fn resolve_differences(
    regions: &[Region],
    circle_radius_multiplier: f64,
    max_region_size_percent: f64,
    width: u32,
    height: u32,
) -> Vec<Difference> {
    let min_side = f64::from(width.min(height));

    let mut circles: Vec<Circle> = regions
        .iter()
        .filter(|region| {
            let widest = f64::from(region.width().max(region.height()));
            widest / min_side <= max_region_size_percent
        })
        .map(|region| Circle::from_region(region, circle_radius_multiplier))
        .collect();
    circles.sort_by(|a, b| b.radius.total_cmp(&a.radius));

    let mut kept: Vec<Circle> = Vec::with_capacity(circles.len());
    for circle in circles {
        if let Some(winner) = kept.iter().find(|k| k.overlaps(&circle)) {
            tracing::trace!(?circle, ?winner, "dropping overlapped circle");
            continue;
        }
        kept.push(circle);
    }

    tracing::debug!(
        regions = regions.len(),
        differences = kept.len(),
        "resolved difference circles"
    );

    kept.into_iter()
        .enumerate()
        .map(|(id, circle)| Difference {
            id,
            x: circle.x / f64::from(width),
            y: circle.y / f64::from(height),
            radius: circle.radius / min_side,
            found_time: None,
        })
        .collect()
}
