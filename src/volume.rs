//! Access layer for MINC2 volume files.
//!
//! A MINC2 volume is an HDF5 container with the image samples under
//! `/minc-2.0/image/0/image` and one entry per dimension under
//! `/minc-2.0/dimensions`. This module owns the lifecycle of one open
//! file and exposes the operations the adapter consumes: data class and
//! stored type queries, enumeration of the regularly sampled dimensions
//! in file declaration order, and a typed hyperslab read which converts
//! stored values through the declared real value range into the
//! requested transfer type.

use crate::element::RegionData;
use crate::error::{MincError, Result};
use crate::typedef::{MincClass, MincType};
use hdf5::types::{CompoundType, FloatSize, IntSize, TypeDescriptor, VarLenUnicode};
use hdf5::{Dataset, H5Type};
use log::debug;
use ndarray::{IxDyn, SliceInfo, SliceInfoElem};
use std::convert::TryFrom;
use std::path::Path;

const ROOT_GROUP: &str = "minc-2.0";
const REGULAR_SPACING: &str = "regular__";

/// Complex sample stored as two signed shorts.
#[derive(H5Type, Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct MincScomplex {
    /// Real component.
    pub real: i16,
    /// Imaginary component.
    pub imaginary: i16,
}

/// Complex sample stored as two signed ints.
#[derive(H5Type, Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct MincIcomplex {
    /// Real component.
    pub real: i32,
    /// Imaginary component.
    pub imaginary: i32,
}

/// Complex sample stored as two 32 bit floats.
#[derive(H5Type, Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct MincFcomplex {
    /// Real component.
    pub real: f32,
    /// Imaginary component.
    pub imaginary: f32,
}

/// Complex sample stored as two 64 bit floats.
#[derive(H5Type, Debug, Clone, Copy, PartialEq)]
#[repr(C)]
pub struct MincDcomplex {
    /// Real component.
    pub real: f64,
    /// Imaginary component.
    pub imaginary: f64,
}

trait ComplexPair: H5Type + Copy {
    type Component: Copy;
    fn components(&self) -> (Self::Component, Self::Component);
}

macro_rules! complex_pair {
    ($t:ty, $component:ty) => {
        impl ComplexPair for $t {
            type Component = $component;
            fn components(&self) -> ($component, $component) {
                (self.real, self.imaginary)
            }
        }
    };
}

complex_pair!(MincScomplex, i16);
complex_pair!(MincIcomplex, i32);
complex_pair!(MincFcomplex, f32);
complex_pair!(MincDcomplex, f64);

/// One dimension of an open volume, as declared by the file. The
/// position of the value in [`MincVolume::dimensions`] is the
/// dimension's positional index.
#[derive(Debug, Clone, PartialEq)]
pub struct MincDimension {
    name: String,
    size: usize,
    step: f64,
    start: f64,
    cosines: [f64; 3],
}

impl MincDimension {
    /// The dimension name declared by the file (e.g. `xspace`).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of samples along the dimension.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Signed physical distance between consecutive samples.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Signed physical offset of sample 0.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// Raw direction cosines in the file's native sign convention.
    pub fn direction_cosines(&self) -> [f64; 3] {
        self.cosines
    }
}

/// An open MINC2 volume file.
///
/// The native handle and the dimension descriptors are acquired
/// together when the value is constructed and released together when it
/// is dropped; a `MincVolume` is never partially valid.
#[derive(Debug)]
pub struct MincVolume {
    _file: hdf5::File,
    image: Dataset,
    dimensions: Vec<MincDimension>,
    stored_type: MincType,
    data_class: MincClass,
    valid_range: (f64, f64),
    real_range: (f64, f64),
}

impl MincVolume {
    /// Open a MINC2 volume for reading.
    ///
    /// # Errors
    ///
    /// - `MincError::FileOpen` if the file does not exist or is not an
    /// HDF5 container.
    /// - `MincError::InvalidFormat` if the container is not a readable
    /// MINC2 volume (missing structure, unsupported sample type,
    /// irregular sampling, or a dimension count outside 2..=4).
    pub fn open<P: AsRef<Path>>(path: P) -> Result<MincVolume> {
        let path = path.as_ref();
        let file = hdf5::File::open(path).map_err(|e| {
            debug!("cannot open {}: {}", path.display(), e);
            MincError::FileOpen(path.to_path_buf())
        })?;
        let volume = MincVolume::from_file(file)?;
        debug!(
            "opened {} as {:?} volume with {} dimensions",
            path.display(),
            volume.stored_type,
            volume.dimension_count()
        );
        Ok(volume)
    }

    /// Check whether the file at `path` can be opened as a MINC2
    /// volume. The trial handle is closed before returning; failures of
    /// any kind yield `false`.
    pub fn probe<P: AsRef<Path>>(path: P) -> bool {
        MincVolume::open(path).is_ok()
    }

    fn from_file(file: hdf5::File) -> Result<MincVolume> {
        let root = file
            .group(ROOT_GROUP)
            .map_err(|_| invalid("no minc-2.0 group"))?;
        let image_group = root
            .group("image")
            .and_then(|g| g.group("0"))
            .map_err(|_| invalid("no image group"))?;
        let image = image_group
            .dataset("image")
            .map_err(|_| invalid("no image dataset"))?;

        let descriptor = image.dtype()?.to_descriptor()?;
        let stored_type = stored_type_of(&descriptor)?;
        let data_class = class_of(stored_type);

        let names = read_dimension_order(&image)?;
        let shape = image.shape();
        if shape.len() != names.len() {
            return Err(invalid("dimension order does not match the image rank"));
        }
        if names.len() < 2 || names.len() > 4 {
            return Err(invalid("dimension count outside the supported 2..=4"));
        }

        let dimension_group = root
            .group("dimensions")
            .map_err(|_| invalid("no dimensions group"))?;
        let mut dimensions = Vec::with_capacity(names.len());
        for (position, name) in names.iter().enumerate() {
            let entry = dimension_group
                .dataset(name)
                .map_err(|_| invalid(&format!("missing dimension entry {}", name)))?;
            dimensions.push(read_dimension(&entry, name, shape[position])?);
        }

        let valid_range = match image.attr("valid_range") {
            Ok(attr) => {
                let range = attr.read_raw::<f64>()?;
                if range.len() != 2 {
                    return Err(invalid("valid_range must have 2 components"));
                }
                (range[0], range[1])
            }
            Err(_) => default_valid_range(stored_type),
        };
        let real_range = match (
            image_group.dataset("image-min"),
            image_group.dataset("image-max"),
        ) {
            (Ok(min), Ok(max)) => (min.read_scalar::<f64>()?, max.read_scalar::<f64>()?),
            _ => valid_range,
        };

        Ok(MincVolume {
            _file: file,
            image,
            dimensions,
            stored_type,
            data_class,
            valid_range,
            real_range,
        })
    }

    /// The data class of the volume.
    pub fn data_class(&self) -> MincClass {
        self.data_class
    }

    /// The stored type of the volume's samples.
    pub fn data_type(&self) -> MincType {
        self.stored_type
    }

    /// Number of regularly sampled dimensions.
    pub fn dimension_count(&self) -> usize {
        self.dimensions.len()
    }

    /// The volume's dimensions, in file declaration order.
    pub fn dimensions(&self) -> &[MincDimension] {
        &self.dimensions
    }

    /// The range of stored sample values declared by the file.
    pub fn valid_range(&self) -> (f64, f64) {
        self.valid_range
    }

    /// The real (world) value range the stored range maps onto.
    pub fn real_range(&self) -> (f64, f64) {
        self.real_range
    }

    /// Read a rectangular sub-region into a buffer of the given transfer
    /// type. `start` and `count` are per-dimension, in file order; the
    /// returned buffer is row-major with the last dimension varying
    /// fastest. Stored values are mapped through the declared real value
    /// range before conversion into the transfer type; complex samples
    /// are converted member-wise and interleaved, without rescaling.
    ///
    /// # Errors
    ///
    /// - `MincError::HyperslabRead` if the underlying read fails; the
    /// buffer is not partially valid.
    pub fn read_hyperslab(
        &self,
        transfer: MincType,
        start: &[usize],
        count: &[usize],
    ) -> Result<RegionData> {
        let selection = hyperslab_selection(start, count);
        match transfer {
            MincType::Scomplex => Ok(RegionData::Int16(
                self.read_complex::<MincScomplex>(selection)?,
            )),
            MincType::Icomplex => Ok(RegionData::Int32(
                self.read_complex::<MincIcomplex>(selection)?,
            )),
            MincType::Fcomplex => Ok(RegionData::Float32(
                self.read_complex::<MincFcomplex>(selection)?,
            )),
            MincType::Dcomplex => Ok(RegionData::Float64(
                self.read_complex::<MincDcomplex>(selection)?,
            )),
            MincType::String => Err(MincError::UnsupportedStoredType(transfer)),
            scalar => self.read_scalar(scalar, selection),
        }
    }

    fn read_scalar(&self, transfer: MincType, selection: Hyperslab) -> Result<RegionData> {
        let component = transfer.component_type()?;
        let values = self
            .image
            .read_slice::<f64, _, IxDyn>(selection)
            .map_err(MincError::HyperslabRead)?;
        if self.rescales() {
            Ok(RegionData::from_reals(
                component,
                values.iter().map(|v| self.stored_to_real(*v)),
            ))
        } else {
            Ok(RegionData::from_reals(component, values.iter().cloned()))
        }
    }

    fn read_complex<T: ComplexPair>(&self, selection: Hyperslab) -> Result<Vec<T::Component>> {
        let values = self
            .image
            .read_slice::<T, _, IxDyn>(selection)
            .map_err(MincError::HyperslabRead)?;
        let mut components = Vec::with_capacity(values.len() * 2);
        for pair in values.iter() {
            let (real, imaginary) = pair.components();
            components.push(real);
            components.push(imaginary);
        }
        Ok(components)
    }

    /// Whether reads must map stored values onto the real range. Float
    /// storage already holds real values; integer storage is rescaled
    /// whenever the two ranges differ.
    fn rescales(&self) -> bool {
        use MincType::*;
        match self.stored_type {
            Byte | Ubyte | Short | Ushort | Int | Uint => {
                self.real_range != self.valid_range && self.valid_range.1 > self.valid_range.0
            }
            _ => false,
        }
    }

    fn stored_to_real(&self, value: f64) -> f64 {
        let (vmin, vmax) = self.valid_range;
        let (rmin, rmax) = self.real_range;
        rmin + (value - vmin) * (rmax - rmin) / (vmax - vmin)
    }
}

type Hyperslab = SliceInfo<Vec<SliceInfoElem>, IxDyn, IxDyn>;

fn hyperslab_selection(start: &[usize], count: &[usize]) -> Hyperslab {
    let elems: Vec<SliceInfoElem> = start
        .iter()
        .zip(count.iter())
        .map(|(&s, &c)| SliceInfoElem::Slice {
            start: s as isize,
            end: Some((s + c) as isize),
            step: 1,
        })
        .collect();
    SliceInfo::try_from(elems).expect("dynamic slice info from matching rank")
}

fn invalid(descr: &str) -> MincError {
    MincError::InvalidFormat(descr.to_string())
}

fn read_dimension_order(image: &Dataset) -> Result<Vec<String>> {
    let attr = image
        .attr("dimorder")
        .map_err(|_| invalid("image dataset has no dimorder attribute"))?;
    let value: VarLenUnicode = attr.read_scalar()?;
    Ok(value
        .as_str()
        .split(',')
        .map(|name| name.trim().to_string())
        .collect())
}

fn read_dimension(entry: &Dataset, name: &str, size: usize) -> Result<MincDimension> {
    if let Ok(attr) = entry.attr("spacing") {
        let spacing: VarLenUnicode = attr.read_scalar()?;
        if spacing.as_str() != REGULAR_SPACING {
            return Err(invalid(&format!(
                "dimension {} is not regularly sampled",
                name
            )));
        }
    }

    let step = match entry.attr("step") {
        Ok(attr) => attr.read_scalar::<f64>()?,
        Err(_) => 1.0,
    };
    let start = match entry.attr("start") {
        Ok(attr) => attr.read_scalar::<f64>()?,
        Err(_) => 0.0,
    };
    let cosines = match entry.attr("direction_cosines") {
        Ok(attr) => {
            let values = attr.read_raw::<f64>()?;
            if values.len() != 3 {
                return Err(invalid(&format!(
                    "direction_cosines of {} must have 3 components",
                    name
                )));
            }
            [values[0], values[1], values[2]]
        }
        Err(_) => default_cosines(name),
    };

    Ok(MincDimension {
        name: name.to_string(),
        size,
        step,
        start,
        cosines,
    })
}

/// Direction cosines assumed for a dimension that does not declare any,
/// by dimension name.
fn default_cosines(name: &str) -> [f64; 3] {
    match name {
        "xspace" | "xfrequency" => [1.0, 0.0, 0.0],
        "yspace" | "yfrequency" => [0.0, 1.0, 0.0],
        "zspace" | "zfrequency" => [0.0, 0.0, 1.0],
        _ => [0.0, 0.0, 0.0],
    }
}

fn stored_type_of(descriptor: &TypeDescriptor) -> Result<MincType> {
    match descriptor {
        TypeDescriptor::Integer(IntSize::U1) => Ok(MincType::Byte),
        TypeDescriptor::Integer(IntSize::U2) => Ok(MincType::Short),
        TypeDescriptor::Integer(IntSize::U4) => Ok(MincType::Int),
        TypeDescriptor::Unsigned(IntSize::U1) => Ok(MincType::Ubyte),
        TypeDescriptor::Unsigned(IntSize::U2) => Ok(MincType::Ushort),
        TypeDescriptor::Unsigned(IntSize::U4) => Ok(MincType::Uint),
        TypeDescriptor::Float(FloatSize::U4) => Ok(MincType::Float),
        TypeDescriptor::Float(FloatSize::U8) => Ok(MincType::Double),
        TypeDescriptor::Compound(compound) => complex_type_of(compound),
        other => Err(invalid(&format!("unsupported sample datatype: {:?}", other))),
    }
}

fn complex_type_of(compound: &CompoundType) -> Result<MincType> {
    let mut real = None;
    let mut imaginary = false;
    for field in &compound.fields {
        match field.name.as_str() {
            "real" => real = Some(&field.ty),
            "imaginary" => imaginary = true,
            _ => return Err(invalid("compound sample is not a complex pair")),
        }
    }
    if compound.fields.len() != 2 || !imaginary {
        return Err(invalid("compound sample is not a complex pair"));
    }
    match real {
        Some(TypeDescriptor::Integer(IntSize::U2)) => Ok(MincType::Scomplex),
        Some(TypeDescriptor::Integer(IntSize::U4)) => Ok(MincType::Icomplex),
        Some(TypeDescriptor::Float(FloatSize::U4)) => Ok(MincType::Fcomplex),
        Some(TypeDescriptor::Float(FloatSize::U8)) => Ok(MincType::Dcomplex),
        _ => Err(invalid("unsupported complex component datatype")),
    }
}

/// Data class derived from the stored type. The MINC2 subset read here
/// carries no separate class tag; record classes therefore never occur
/// on this path, but stay representable for the class switch.
fn class_of(stored: MincType) -> MincClass {
    use MincType::*;
    match stored {
        Float | Double => MincClass::Real,
        Scomplex | Icomplex | Fcomplex | Dcomplex => MincClass::Complex,
        _ => MincClass::Int,
    }
}

/// Range of stored values assumed when the file declares none.
fn default_valid_range(stored: MincType) -> (f64, f64) {
    use MincType::*;
    match stored {
        Byte => (f64::from(i8::min_value()), f64::from(i8::max_value())),
        Ubyte => (0.0, f64::from(u8::max_value())),
        Short => (f64::from(i16::min_value()), f64::from(i16::max_value())),
        Ushort => (0.0, f64::from(u16::max_value())),
        Int => (f64::from(i32::min_value()), f64::from(i32::max_value())),
        Uint => (0.0, f64::from(u32::max_value())),
        // float and complex storage holds real values directly
        _ => (0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::{class_of, default_cosines, default_valid_range};
    use crate::typedef::{MincClass, MincType};

    #[test]
    fn derived_classes() {
        assert_eq!(class_of(MincType::Float), MincClass::Real);
        assert_eq!(class_of(MincType::Double), MincClass::Real);
        assert_eq!(class_of(MincType::Ubyte), MincClass::Int);
        assert_eq!(class_of(MincType::Fcomplex), MincClass::Complex);
    }

    #[test]
    fn name_based_cosines() {
        assert_eq!(default_cosines("xspace"), [1.0, 0.0, 0.0]);
        assert_eq!(default_cosines("yfrequency"), [0.0, 1.0, 0.0]);
        assert_eq!(default_cosines("zspace"), [0.0, 0.0, 1.0]);
        assert_eq!(default_cosines("time"), [0.0, 0.0, 0.0]);
    }

    #[test]
    fn stored_ranges() {
        assert_eq!(default_valid_range(MincType::Ubyte), (0.0, 255.0));
        assert_eq!(default_valid_range(MincType::Short), (-32768.0, 32767.0));
    }
}
