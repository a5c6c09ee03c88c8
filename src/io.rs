//! Module for the host-facing image I/O surface.
//!
//! [`ImageIo`] is the capability interface a host toolkit's format
//! registry dispatches through; nothing here assumes how registration
//! happens. [`MincImageIo`] is the MINC2 implementation: it holds at
//! most one open volume, derives the consumer-facing [`ImageInfo`] once
//! per open, and serves rectangular region reads against it.

use crate::element::RegionData;
use crate::error::{MincError, Result};
use crate::info::{ImageInfo, Region};
use crate::orientation;
use crate::typedef::{ComponentType, MincClass, PixelKind};
use crate::util::is_minc_file_name;
use crate::volume::MincVolume;
use std::path::Path;

/// Capability interface for one image file format.
///
/// Probing operations never fail: they convert any underlying error
/// into `false`. Every other entry point surfaces its error to the
/// caller.
pub trait ImageIo {
    /// Check whether the file at `path` can be read by this format.
    fn can_read(&self, path: &Path) -> bool;

    /// Check whether `path` is an acceptable name for writing in this
    /// format.
    fn can_write(&self, path: &Path) -> bool;

    /// Open the file at `path` and derive its metadata. A volume
    /// already held by this value is closed first.
    fn read_metadata(&mut self, path: &Path) -> Result<&ImageInfo>;

    /// Read a rectangular sub-region of the open volume into a buffer
    /// of the given component type.
    fn read_region(&mut self, region: &Region, target: ComponentType) -> Result<RegionData>;

    /// Write image metadata. Not supported by the MINC2 implementation.
    fn write_metadata(&mut self, info: &ImageInfo) -> Result<()>;

    /// Write pixel data. Not supported by the MINC2 implementation.
    fn write_pixels(&mut self, region: &Region, data: &RegionData) -> Result<()>;
}

/// MINC2 implementation of the [`ImageIo`] capability interface.
///
/// The value is either *closed* (no volume held) or *open* (one native
/// handle plus the metadata derived from it). [`read_metadata`] moves
/// it to open, closing any previous volume first; [`close`] and drop
/// release the handle and the derived metadata together.
///
/// [`read_metadata`]: trait.ImageIo.html#tymethod.read_metadata
/// [`close`]: #method.close
#[derive(Debug, Default)]
pub struct MincImageIo {
    open: Option<OpenVolume>,
}

#[derive(Debug)]
struct OpenVolume {
    volume: MincVolume,
    info: ImageInfo,
}

impl MincImageIo {
    /// Create a closed instance.
    pub fn new() -> MincImageIo {
        MincImageIo { open: None }
    }

    /// Release the open volume, if any. Safe to call repeatedly.
    pub fn close(&mut self) {
        self.open = None;
    }

    /// The metadata of the open volume, if one is open.
    pub fn image_info(&self) -> Option<&ImageInfo> {
        self.open.as_ref().map(|open| &open.info)
    }

    fn read_pixel_info(volume: &MincVolume) -> Result<(PixelKind, ComponentType)> {
        let kind = match volume.data_class() {
            MincClass::Real | MincClass::Int | MincClass::Label => PixelKind::Scalar,
            MincClass::Complex => PixelKind::Complex,
            unsupported => return Err(MincError::UnsupportedDataClass(unsupported)),
        };
        let datatype = volume.data_type();
        let component = datatype
            .component_type()
            .map_err(|_| MincError::UnsupportedDataType(datatype))?;
        Ok((kind, component))
    }

    fn read_shape_info(volume: &MincVolume) -> Vec<usize> {
        volume
            .dimensions()
            .iter()
            .map(|dimension| dimension.size())
            .collect()
    }

    fn read_calibration(volume: &MincVolume) -> (Vec<f64>, Vec<f64>, Vec<Vec<f64>>) {
        let rank = volume.dimension_count();
        let mut spacing = Vec::with_capacity(rank);
        let mut origin = Vec::with_capacity(rank);
        let mut directions = Vec::with_capacity(rank);
        for (axis, dimension) in volume.dimensions().iter().enumerate() {
            let (axis_spacing, cosines) =
                orientation::axis_from_file(dimension.step(), dimension.direction_cosines());
            spacing.push(axis_spacing);
            // the start is recorded as-is, unaffected by the spacing sign
            origin.push(dimension.start());
            directions.push(orientation::direction_vector(rank, axis, cosines));
        }
        (spacing, origin, directions)
    }
}

impl ImageIo for MincImageIo {
    fn can_read(&self, path: &Path) -> bool {
        MincVolume::probe(path)
    }

    fn can_write(&self, path: &Path) -> bool {
        is_minc_file_name(path)
    }

    fn read_metadata(&mut self, path: &Path) -> Result<&ImageInfo> {
        self.close();
        let volume = MincVolume::open(path)?;
        let (pixel_kind, component_type) = Self::read_pixel_info(&volume)?;
        let sizes = Self::read_shape_info(&volume);
        let (spacing, origin, directions) = Self::read_calibration(&volume);
        let info = ImageInfo::new(
            pixel_kind,
            component_type,
            sizes,
            spacing,
            origin,
            directions,
        );
        let open = self.open.get_or_insert(OpenVolume { volume, info });
        Ok(&open.info)
    }

    fn read_region(&mut self, region: &Region, target: ComponentType) -> Result<RegionData> {
        let open = self.open.as_ref().ok_or(MincError::InvalidState)?;
        let transfer = target.minc_type(open.info.pixel_kind())?;
        region.validate(open.info.sizes())?;
        open.volume
            .read_hyperslab(transfer, region.index(), region.size())
    }

    fn write_metadata(&mut self, _info: &ImageInfo) -> Result<()> {
        Err(MincError::WriteUnsupported)
    }

    fn write_pixels(&mut self, _region: &Region, _data: &RegionData) -> Result<()> {
        Err(MincError::WriteUnsupported)
    }
}
