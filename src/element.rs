//! This module defines the data element API: the primitive types a
//! region can be decoded into, and the typed buffer produced by a
//! region read.

use crate::typedef::ComponentType;
use num_traits::AsPrimitive;

/// Trait type for a primitive usable as the component type of a decoded
/// region buffer.
///
/// Conversion from the volume's real (world) values is defined per type:
/// integer targets round to nearest and saturate at the type's bounds,
/// floating point targets convert directly.
pub trait DataElement: 'static + Copy + AsPrimitive<f64> {
    /// The component type mapped to the type `Self`.
    const COMPONENT_TYPE: ComponentType;

    /// Convert a real (world) value to this element.
    fn from_real(value: f64) -> Self;

    /// Move the matching buffer variant out of `data`, or `None` if the
    /// buffer holds another component type.
    fn take_buffer(data: RegionData) -> Option<Vec<Self>>;
}

macro_rules! int_data_element {
    ($t:ty, $component:expr, $variant:ident) => {
        impl DataElement for $t {
            const COMPONENT_TYPE: ComponentType = $component;
            fn from_real(value: f64) -> $t {
                // saturating float-to-int cast
                value.round() as $t
            }
            fn take_buffer(data: RegionData) -> Option<Vec<$t>> {
                match data {
                    RegionData::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }
    };
}

int_data_element!(i8, ComponentType::Int8, Int8);
int_data_element!(u8, ComponentType::Uint8, Uint8);
int_data_element!(i16, ComponentType::Int16, Int16);
int_data_element!(u16, ComponentType::Uint16, Uint16);
int_data_element!(i32, ComponentType::Int32, Int32);
int_data_element!(u32, ComponentType::Uint32, Uint32);

impl DataElement for f32 {
    const COMPONENT_TYPE: ComponentType = ComponentType::Float32;
    fn from_real(value: f64) -> f32 {
        value as f32
    }
    fn take_buffer(data: RegionData) -> Option<Vec<f32>> {
        match data {
            RegionData::Float32(v) => Some(v),
            _ => None,
        }
    }
}

impl DataElement for f64 {
    const COMPONENT_TYPE: ComponentType = ComponentType::Float64;
    fn from_real(value: f64) -> f64 {
        value
    }
    fn take_buffer(data: RegionData) -> Option<Vec<f64>> {
        match data {
            RegionData::Float64(v) => Some(v),
            _ => None,
        }
    }
}

/// A decoded region buffer: one component sequence in row-major order
/// with the last dimension varying fastest. Complex pixels contribute
/// two consecutive components each.
#[derive(Debug, Clone, PartialEq)]
pub enum RegionData {
    /// Components of type `i8`.
    Int8(Vec<i8>),
    /// Components of type `u8`.
    Uint8(Vec<u8>),
    /// Components of type `i16`.
    Int16(Vec<i16>),
    /// Components of type `u16`.
    Uint16(Vec<u16>),
    /// Components of type `i32`.
    Int32(Vec<i32>),
    /// Components of type `u32`.
    Uint32(Vec<u32>),
    /// Components of type `f32`.
    Float32(Vec<f32>),
    /// Components of type `f64`.
    Float64(Vec<f64>),
}

impl RegionData {
    /// Collect real (world) values into a buffer of the given component
    /// type.
    pub(crate) fn from_reals<I>(target: ComponentType, values: I) -> RegionData
    where
        I: IntoIterator<Item = f64>,
    {
        use ComponentType::*;
        match target {
            Int8 => RegionData::Int8(values.into_iter().map(i8::from_real).collect()),
            Uint8 => RegionData::Uint8(values.into_iter().map(u8::from_real).collect()),
            Int16 => RegionData::Int16(values.into_iter().map(i16::from_real).collect()),
            Uint16 => RegionData::Uint16(values.into_iter().map(u16::from_real).collect()),
            Int32 => RegionData::Int32(values.into_iter().map(i32::from_real).collect()),
            Uint32 => RegionData::Uint32(values.into_iter().map(u32::from_real).collect()),
            Float32 => RegionData::Float32(values.into_iter().map(f32::from_real).collect()),
            Float64 => RegionData::Float64(values.into_iter().collect()),
        }
    }

    /// The component type of the buffer.
    pub fn component_type(&self) -> ComponentType {
        use RegionData::*;
        match self {
            Int8(_) => ComponentType::Int8,
            Uint8(_) => ComponentType::Uint8,
            Int16(_) => ComponentType::Int16,
            Uint16(_) => ComponentType::Uint16,
            Int32(_) => ComponentType::Int32,
            Uint32(_) => ComponentType::Uint32,
            Float32(_) => ComponentType::Float32,
            Float64(_) => ComponentType::Float64,
        }
    }

    /// Number of components in the buffer.
    pub fn len(&self) -> usize {
        use RegionData::*;
        match self {
            Int8(v) => v.len(),
            Uint8(v) => v.len(),
            Int16(v) => v.len(),
            Uint16(v) => v.len(),
            Int32(v) => v.len(),
            Uint32(v) => v.len(),
            Float32(v) => v.len(),
            Float64(v) => v.len(),
        }
    }

    /// Whether the buffer holds no components.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Move the components out as a vector of `T`, or `None` if `T` is
    /// not the buffer's component type.
    pub fn into_vec<T: DataElement>(self) -> Option<Vec<T>> {
        T::take_buffer(self)
    }
}
