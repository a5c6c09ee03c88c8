//! Consumer-facing description of an open volume and of rectangular
//! sub-region requests. All per-dimension values are kept in file
//! declaration order; no canonical axis order is ever imposed.

use crate::error::{MincError, Result};
use crate::typedef::{ComponentType, PixelKind};

/// Metadata of an open volume, derived once per open: pixel structure,
/// component type, and per-dimension size, spacing, origin and direction
/// in file order.
///
/// The spacing is always non-negative; any sign carried by a negative
/// step in the file has been absorbed into the direction vector. The
/// origin is the raw per-dimension start value. Direction vectors are
/// expressed in the consumer's sign convention and have one slot per
/// dimension.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageInfo {
    pixel_kind: PixelKind,
    component_type: ComponentType,
    sizes: Vec<usize>,
    spacing: Vec<f64>,
    origin: Vec<f64>,
    directions: Vec<Vec<f64>>,
}

impl ImageInfo {
    pub(crate) fn new(
        pixel_kind: PixelKind,
        component_type: ComponentType,
        sizes: Vec<usize>,
        spacing: Vec<f64>,
        origin: Vec<f64>,
        directions: Vec<Vec<f64>>,
    ) -> ImageInfo {
        debug_assert_eq!(sizes.len(), spacing.len());
        debug_assert_eq!(sizes.len(), origin.len());
        debug_assert_eq!(sizes.len(), directions.len());
        ImageInfo {
            pixel_kind,
            component_type,
            sizes,
            spacing,
            origin,
            directions,
        }
    }

    /// The pixel structure of the volume.
    pub fn pixel_kind(&self) -> PixelKind {
        self.pixel_kind
    }

    /// The component type of the volume's samples.
    pub fn component_type(&self) -> ComponentType {
        self.component_type
    }

    /// Number of components making up one pixel (1 for scalar volumes,
    /// 2 for complex ones).
    pub fn components_per_pixel(&self) -> usize {
        self.pixel_kind.components_per_pixel()
    }

    /// Number of dimensions of the volume.
    pub fn dimensionality(&self) -> usize {
        self.sizes.len()
    }

    /// Per-dimension sample counts, in file order.
    pub fn sizes(&self) -> &[usize] {
        &self.sizes
    }

    /// Per-dimension spacing, in file order. Always non-negative.
    pub fn spacing(&self) -> &[f64] {
        &self.spacing
    }

    /// Per-dimension origin, in file order, exactly as declared by the
    /// file.
    pub fn origin(&self) -> &[f64] {
        &self.origin
    }

    /// Direction vector of the given axis, in the consumer's sign
    /// convention, with one slot per dimension.
    pub fn direction(&self, axis: usize) -> &[f64] {
        &self.directions[axis]
    }

    /// Total number of pixels in the volume.
    pub fn pixel_count(&self) -> usize {
        self.sizes.iter().product()
    }

    /// Total number of components in the volume.
    pub fn component_count(&self) -> usize {
        self.pixel_count() * self.components_per_pixel()
    }

    /// Total size of the decoded volume, in bytes.
    pub fn byte_size(&self) -> usize {
        self.component_count() * self.component_type.size_of()
    }

    /// The region covering the whole volume.
    pub fn full_region(&self) -> Region {
        Region::new(vec![0; self.sizes.len()], self.sizes.clone())
    }
}

/// A rectangular sub-volume request: a start index and an extent for
/// every dimension, in file order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Region {
    index: Vec<usize>,
    size: Vec<usize>,
}

impl Region {
    /// Create a region from a start index and an extent per dimension.
    pub fn new(index: Vec<usize>, size: Vec<usize>) -> Region {
        debug_assert_eq!(index.len(), size.len());
        Region { index, size }
    }

    /// Create a region of the given extent starting at the volume origin.
    pub fn from_size(size: Vec<usize>) -> Region {
        let index = vec![0; size.len()];
        Region { index, size }
    }

    /// Per-dimension start index, in file order.
    pub fn index(&self) -> &[usize] {
        &self.index
    }

    /// Per-dimension extent, in file order.
    pub fn size(&self) -> &[usize] {
        &self.size
    }

    /// Number of dimensions of the region.
    pub fn dimensionality(&self) -> usize {
        self.size.len()
    }

    /// Number of pixels selected by the region.
    pub fn pixel_count(&self) -> usize {
        self.size.iter().product()
    }

    /// Check the region against the sizes of a volume.
    ///
    /// # Errors
    ///
    /// - `MincError::OutOfBounds` if the rank differs or any start/extent
    /// pair reaches outside the volume.
    pub fn validate(&self, sizes: &[usize]) -> Result<()> {
        if self.index.len() != sizes.len() || self.size.len() != sizes.len() {
            return Err(MincError::OutOfBounds);
        }
        for d in 0..sizes.len() {
            if self.index[d] >= sizes[d] || self.size[d] > sizes[d] - self.index[d] {
                return Err(MincError::OutOfBounds);
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{ImageInfo, Region};
    use crate::typedef::{ComponentType, PixelKind};

    fn scalar_info(sizes: Vec<usize>, component: ComponentType) -> ImageInfo {
        let rank = sizes.len();
        let directions = (0..rank).map(|_| vec![0.0; rank]).collect();
        ImageInfo::new(
            PixelKind::Scalar,
            component,
            sizes,
            vec![1.0; rank],
            vec![0.0; rank],
            directions,
        )
    }

    #[test]
    fn scalar_accounting() {
        let info = scalar_info(vec![3, 4], ComponentType::Int16);
        assert_eq!(info.components_per_pixel(), 1);
        assert_eq!(info.pixel_count(), 12);
        assert_eq!(info.component_count(), 12);
        assert_eq!(info.byte_size(), 24);
    }

    #[test]
    fn complex_accounting() {
        let info = ImageInfo::new(
            PixelKind::Complex,
            ComponentType::Float32,
            vec![3, 4, 7],
            vec![1.0; 3],
            vec![0.0; 3],
            vec![vec![0.0; 3]; 3],
        );
        assert_eq!(info.components_per_pixel(), 2);
        assert_eq!(info.pixel_count(), 84);
        assert_eq!(info.component_count(), 168);
        assert_eq!(info.byte_size(), 672);
    }

    #[test]
    fn full_region_covers_the_volume() {
        let info = scalar_info(vec![2, 3, 5], ComponentType::Uint8);
        let region = info.full_region();
        assert_eq!(region.index(), &[0, 0, 0]);
        assert_eq!(region.size(), &[2, 3, 5]);
        assert_eq!(region.pixel_count(), 30);
        assert!(region.validate(info.sizes()).is_ok());
    }

    #[test]
    fn region_bounds() {
        let sizes = [4, 4];
        assert!(Region::new(vec![1, 1], vec![2, 3]).validate(&sizes).is_ok());
        assert!(Region::new(vec![0, 0], vec![4, 4]).validate(&sizes).is_ok());
        // extent reaching past the end
        assert!(Region::new(vec![3, 0], vec![2, 1])
            .validate(&sizes)
            .is_err());
        // start at the boundary
        assert!(Region::new(vec![4, 0], vec![0, 1])
            .validate(&sizes)
            .is_err());
        // rank mismatch
        assert!(Region::from_size(vec![4, 4, 1]).validate(&sizes).is_err());
    }
}
