//! Crate-wide error types.

use crate::typedef::{ComponentType, MincClass, MincType};
use quick_error::quick_error;
use std::path::PathBuf;

quick_error! {
    /// Error type for every failure the reader can report.
    #[derive(Debug)]
    pub enum MincError {
        /// The file could not be opened as a MINC2 volume.
        FileOpen(path: PathBuf) {
            display("cannot open volume file {}", path.display())
        }
        /// The file opened, but its structure is not a readable MINC2 volume.
        InvalidFormat(descr: String) {
            display("invalid MINC2 volume: {}", descr)
        }
        /// The volume's data class cannot be mapped to a pixel kind.
        UnsupportedDataClass(class: MincClass) {
            display("unhandled data class: {:?}", class)
        }
        /// The volume's stored data type cannot be mapped to a component type.
        UnsupportedDataType(datatype: MincType) {
            display("unhandled MINC data type: {:?}", datatype)
        }
        /// A stored value type with no component type counterpart.
        UnsupportedStoredType(datatype: MincType) {
            display("no component type for stored type {:?}", datatype)
        }
        /// A component type that cannot be paired into a complex sample.
        UnsupportedComplexComponent(component: ComponentType) {
            display("no complex sample type with {:?} components", component)
        }
        /// The underlying hyperslab read failed; the output buffer is invalid.
        HyperslabRead(err: hdf5::Error) {
            source(err)
            display("error reading pixel values: {}", err)
        }
        /// Attempted to read a region outside the volume boundaries.
        OutOfBounds {
            display("region exceeds the volume boundaries")
        }
        /// A metadata or region operation was attempted with no open volume.
        InvalidState {
            display("no volume is open")
        }
        /// Writing MINC volumes is not implemented.
        WriteUnsupported {
            display("writing MINC volumes is not supported")
        }
        /// Any other failure reported by the HDF5 library.
        Hdf5(err: hdf5::Error) {
            from()
            source(err)
            display("{}", err)
        }
    }
}

/// Alias type for results yielding `MincError`.
pub type Result<T> = ::std::result::Result<T, MincError>;
