//! Rust reader for the MINC2 volumetric image format.
//!
//! MINC2 volumes are multi-dimensional rasters (2 to 4 regularly
//! sampled axes) with per-axis physical calibration, stored inside an
//! HDF5 container. This crate adapts them into a generic image-I/O
//! consumer's data model: dimension sizes are reported in file
//! declaration order, spacing is always non-negative (a negative step
//! flips the direction vector instead), direction cosines are converted
//! from MINC's RAS world convention into LPS, and rectangular
//! sub-regions decode into typed buffers with real-value-range
//! rescaling.
//!
//! Reading happens through [`MincImageIo`], which implements the
//! registry-agnostic [`ImageIo`] capability interface:
//!
//! ```no_run
//! use minc2::{ImageIo, MincImageIo};
//! # use minc2::Result;
//!
//! # fn run() -> Result<()> {
//! let mut io = MincImageIo::new();
//! let info = io.read_metadata("brain.mnc".as_ref())?.clone();
//! let data = io.read_region(&info.full_region(), info.component_type())?;
//! assert_eq!(data.len(), info.component_count());
//! # Ok(())
//! # }
//! ```
//!
//! The write side of the interface is present but unsupported; write
//! calls fail with [`MincError::WriteUnsupported`].
//!
//! [`MincError::WriteUnsupported`]: error/enum.MincError.html#variant.WriteUnsupported
#![deny(missing_debug_implementations)]
#![warn(missing_docs, unused_extern_crates, trivial_casts, unused_results)]

pub mod element;
pub mod error;
pub mod info;
pub mod io;
pub mod orientation;
pub mod typedef;
pub mod volume;
mod util;

pub use crate::element::{DataElement, RegionData};
pub use crate::error::{MincError, Result};
pub use crate::info::{ImageInfo, Region};
pub use crate::io::{ImageIo, MincImageIo};
pub use crate::typedef::{ComponentType, MincClass, MincType, PixelKind};
pub use crate::volume::{MincDimension, MincVolume};
