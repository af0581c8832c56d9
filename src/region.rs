use image::math::Rect;

/// A connected group of different pixels, summarised by its inclusive
/// bounding box and pixel count.
///
/// Box extents (`width`, `height`, `area`) are measured as `max - min`, so a
/// region one pixel tall has zero height and zero area. The filter relies on
/// this to reject line-like regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub min_x: u32,
    pub max_x: u32,
    pub min_y: u32,
    pub max_y: u32,
    /// Number of pixels, always at least 1.
    pub size: usize,
}

impl Region {
    /// A one-pixel region.
    pub fn at(x: u32, y: u32) -> Self {
        Self {
            min_x: x,
            max_x: x,
            min_y: y,
            max_y: y,
            size: 1,
        }
    }

    /// Adds one pixel to the region.
    pub fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
        self.size += 1;
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width()) * u64::from(self.height())
    }

    /// `width / height`. Infinite for zero-height regions and NaN when both
    /// extents are zero, so neither passes an aspect-ratio range check.
    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width()) / f64::from(self.height())
    }

    /// Pixel count over bounding-box area; `None` when the area is zero.
    pub fn density(&self) -> Option<f64> {
        match self.area() {
            0 => None,
            area => Some(self.size as f64 / area as f64),
        }
    }

    /// Euclidean gap between two bounding boxes. Zero when they overlap or
    /// touch on both axes.
    pub fn gap_to(&self, other: &Region) -> f64 {
        let dx = self.min_x.max(other.min_x).saturating_sub(self.max_x.min(other.max_x));
        let dy = self.min_y.max(other.min_y).saturating_sub(self.max_y.min(other.max_y));
        f64::from(dx).hypot(f64::from(dy))
    }

    /// The smallest region covering both, with their pixel counts summed.
    pub fn union(&self, other: &Region) -> Region {
        Region {
            min_x: self.min_x.min(other.min_x),
            max_x: self.max_x.max(other.max_x),
            min_y: self.min_y.min(other.min_y),
            max_y: self.max_y.max(other.max_y),
            size: self.size + other.size,
        }
    }

    /// Bounding-box midpoint in pixel coordinates.
    pub fn center(&self) -> (f64, f64) {
        (
            (f64::from(self.min_x) + f64::from(self.max_x)) / 2.0,
            (f64::from(self.min_y) + f64::from(self.max_y)) / 2.0,
        )
    }

    /// The bounding box as an `image` rectangle covering every pixel of the
    /// region (so its width and height are one larger than the extents).
    pub fn to_rect(&self) -> Rect {
        Rect {
            x: self.min_x,
            y: self.min_y,
            width: self.width() + 1,
            height: self.height() + 1,
        }
    }
}
