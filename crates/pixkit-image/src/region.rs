use crate::image::ImageSize;

/// A pixel position in absolute image coordinates.
///
/// # Examples
///
/// ```
/// use pixkit_image::Point;
///
/// let p = Point::new(3, 4);
/// assert_eq!((p.x, p.y), (3, 4));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    /// Column of the pixel.
    pub x: usize,
    /// Row of the pixel.
    pub y: usize,
}

impl Point {
    /// Create a new point.
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A rectangular sub-area of an image that bounds a single decode or transform call.
///
/// The region covers the columns `[x, x + width)` and the rows `[y, y + height)`.
///
/// # Examples
///
/// ```
/// use pixkit_image::{ImageSize, Region};
///
/// let region = Region::new(1, 2, 3, 4);
/// assert_eq!(region.right(), 4);
/// assert_eq!(region.bottom(), 6);
/// assert!(region.fits_within(ImageSize { width: 4, height: 6 }));
/// assert!(!region.fits_within(ImageSize { width: 3, height: 6 }));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    /// Left column of the region.
    pub x: usize,
    /// Top row of the region.
    pub y: usize,
    /// Width of the region in pixels.
    pub width: usize,
    /// Height of the region in pixels.
    pub height: usize,
}

impl Region {
    /// Create a new region from its top-left corner and its extent.
    pub const fn new(x: usize, y: usize, width: usize, height: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a region that covers a whole image of the given size.
    pub const fn from_size(size: ImageSize) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// One past the last column of the region.
    pub fn right(&self) -> usize {
        self.x.saturating_add(self.width)
    }

    /// One past the last row of the region.
    pub fn bottom(&self) -> usize {
        self.y.saturating_add(self.height)
    }

    /// The number of pixels covered by the region, saturating at `usize::MAX`.
    pub fn area(&self) -> usize {
        self.width.saturating_mul(self.height)
    }

    /// Returns true if the region covers no pixel.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns true if the pixel `(x, y)` lies inside the region.
    pub fn contains(&self, x: usize, y: usize) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns true if the region lies entirely inside an image of the given size.
    pub fn fits_within(&self, size: ImageSize) -> bool {
        let fits_x = self
            .x
            .checked_add(self.width)
            .is_some_and(|right| right <= size.width);
        let fits_y = self
            .y
            .checked_add(self.height)
            .is_some_and(|bottom| bottom <= size.height);
        fits_x && fits_y
    }

    /// The top-left corner of the region.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "Region {{ x: {}, y: {}, width: {}, height: {} }}",
            self.x, self.y, self.width, self.height
        )
    }
}

impl From<ImageSize> for Region {
    fn from(size: ImageSize) -> Self {
        Region::from_size(size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn region_contains() {
        let region = Region::new(2, 1, 3, 2);
        assert!(region.contains(2, 1));
        assert!(region.contains(4, 2));
        assert!(!region.contains(5, 2));
        assert!(!region.contains(2, 3));
        assert!(!region.contains(1, 1));
    }

    #[test]
    fn region_overflow_does_not_fit() {
        let region = Region::new(usize::MAX, 0, 2, 1);
        assert!(!region.fits_within(ImageSize {
            width: 10,
            height: 10
        }));
    }

    #[test]
    fn region_empty() {
        assert!(Region::new(0, 0, 0, 5).is_empty());
        assert!(Region::new(0, 0, 5, 0).is_empty());
        assert!(!Region::new(0, 0, 1, 1).is_empty());
        assert_eq!(Region::new(0, 0, 3, 4).area(), 12);
        assert_eq!(Region::new(0, 0, usize::MAX, 2).area(), usize::MAX);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn region_serde() -> Result<(), serde_json::Error> {
        let region = Region::new(1, 2, 3, 4);
        let json = serde_json::to_string(&region)?;
        let back: Region = serde_json::from_str(&json)?;
        assert_eq!(back, region);
        Ok(())
    }
}
