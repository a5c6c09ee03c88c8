//! This module contains the value types defined by the MINC 2 standard
//! and the consumer-facing component type enumeration, along with the
//! fixed conversion tables between them. The conversions never touch
//! sample values; rescaling is a property of the hyperslab decode step,
//! not of type mapping.

use crate::error::{MincError, Result};
use log::warn;
use num_derive::FromPrimitive;

/// Data type used to store the samples of a MINC volume.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum MincType {
    /// signed char.
    // MI_TYPE_BYTE           1
    Byte = 1,
    /// signed short.
    // MI_TYPE_SHORT          3
    Short = 3,
    /// signed int.
    // MI_TYPE_INT            4
    Int = 4,
    /// 32 bit float.
    // MI_TYPE_FLOAT          5
    Float = 5,
    /// 64 bit float = double.
    // MI_TYPE_DOUBLE         6
    Double = 6,
    /// ASCII string, not a sample type the consumer can hold.
    // MI_TYPE_STRING         7
    String = 7,
    /// unsigned char.
    // MI_TYPE_UBYTE        100
    Ubyte = 100,
    /// unsigned short.
    // MI_TYPE_USHORT       101
    Ushort = 101,
    /// unsigned int.
    // MI_TYPE_UINT         102
    Uint = 102,
    /// complex = 2 signed shorts.
    // MI_TYPE_SCOMPLEX    1000
    Scomplex = 1000,
    /// complex = 2 signed ints.
    // MI_TYPE_ICOMPLEX    1001
    Icomplex = 1001,
    /// complex = 2 32 bit floats.
    // MI_TYPE_FCOMPLEX    1002
    Fcomplex = 1002,
    /// complex = 2 64 bit floats.
    // MI_TYPE_DCOMPLEX    1003
    Dcomplex = 1003,
}

impl MincType {
    /// Map this stored type to the consumer's component type.
    /// Complex types map to the type of a single component.
    ///
    /// # Errors
    ///
    /// - `MincError::UnsupportedStoredType` if no component type can
    /// represent values of this stored type.
    pub fn component_type(self) -> Result<ComponentType> {
        use MincType::*;
        match self {
            Byte => Ok(ComponentType::Int8),
            Ubyte => Ok(ComponentType::Uint8),
            Short | Scomplex => Ok(ComponentType::Int16),
            Ushort => Ok(ComponentType::Uint16),
            Int | Icomplex => Ok(ComponentType::Int32),
            Uint => Ok(ComponentType::Uint32),
            Float | Fcomplex => Ok(ComponentType::Float32),
            Double | Dcomplex => Ok(ComponentType::Float64),
            String => {
                warn!("unhandled MINC data type: {:?}", self);
                Err(MincError::UnsupportedStoredType(self))
            }
        }
    }

    /// Whether this stored type holds complex (two-component) samples.
    pub fn is_complex(self) -> bool {
        use MincType::*;
        match self {
            Scomplex | Icomplex | Fcomplex | Dcomplex => true,
            _ => false,
        }
    }
}

/// Data class of a MINC volume, describing how its samples are to be
/// interpreted.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy, FromPrimitive)]
pub enum MincClass {
    /// Continuous scalar values.
    // MI_CLASS_REAL                  0
    Real = 0,
    /// Discrete scalar values.
    // MI_CLASS_INT                   1
    Int = 1,
    /// Labels over a discrete domain.
    // MI_CLASS_LABEL                 2
    Label = 2,
    /// Complex (real, imaginary) pairs.
    // MI_CLASS_COMPLEX               3
    Complex = 3,
    /// Uniform record values; not supported by the consumer model.
    // MI_CLASS_UNIFORM_RECORD        4
    UniformRecord = 4,
    /// Non-uniform record values; not supported by the consumer model.
    // MI_CLASS_NON_UNIFORM_RECORD    5
    NonUniformRecord = 5,
}

/// Pixel structure of a volume as seen by the consumer.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum PixelKind {
    /// One component per pixel.
    Scalar,
    /// Two interleaved components per pixel.
    Complex,
}

impl PixelKind {
    /// Number of components making up one pixel.
    pub fn components_per_pixel(self) -> usize {
        match self {
            PixelKind::Scalar => 1,
            PixelKind::Complex => 2,
        }
    }
}

/// The consumer's component type enumeration: the primitive type of a
/// single component in a decoded buffer.
#[derive(Debug, PartialEq, Eq, Hash, Clone, Copy)]
pub enum ComponentType {
    /// signed 8 bit integer.
    Int8,
    /// unsigned 8 bit integer.
    Uint8,
    /// signed 16 bit integer.
    Int16,
    /// unsigned 16 bit integer.
    Uint16,
    /// signed 32 bit integer.
    Int32,
    /// unsigned 32 bit integer.
    Uint32,
    /// 32 bit float.
    Float32,
    /// 64 bit float.
    Float64,
}

impl ComponentType {
    /// Retrieve the size of one component of this type, in bytes.
    pub fn size_of(self) -> usize {
        use ComponentType::*;
        match self {
            Int8 | Uint8 => 1,
            Int16 | Uint16 => 2,
            Int32 | Uint32 | Float32 => 4,
            Float64 => 8,
        }
    }

    /// Map this component type to the stored type holding scalar samples
    /// of it. Every component type has a scalar counterpart.
    pub fn scalar_minc_type(self) -> MincType {
        use ComponentType::*;
        match self {
            Int8 => MincType::Byte,
            Uint8 => MincType::Ubyte,
            Int16 => MincType::Short,
            Uint16 => MincType::Ushort,
            Int32 => MincType::Int,
            Uint32 => MincType::Uint,
            Float32 => MincType::Float,
            Float64 => MincType::Double,
        }
    }

    /// Map this component type to the stored type holding complex samples
    /// with components of it. Only short, int, float and double components
    /// can be paired into a complex sample.
    ///
    /// # Errors
    ///
    /// - `MincError::UnsupportedComplexComponent` for byte-sized or
    /// unsigned component types.
    pub fn complex_minc_type(self) -> Result<MincType> {
        use ComponentType::*;
        match self {
            Int16 => Ok(MincType::Scomplex),
            Int32 => Ok(MincType::Icomplex),
            Float32 => Ok(MincType::Fcomplex),
            Float64 => Ok(MincType::Dcomplex),
            Int8 | Uint8 | Uint16 | Uint32 => {
                warn!("unhandled complex component type: {:?}", self);
                Err(MincError::UnsupportedComplexComponent(self))
            }
        }
    }

    /// Map this component type to the stored type used to transfer pixels
    /// of the given kind.
    pub fn minc_type(self, kind: PixelKind) -> Result<MincType> {
        match kind {
            PixelKind::Scalar => Ok(self.scalar_minc_type()),
            PixelKind::Complex => self.complex_minc_type(),
        }
    }
}
