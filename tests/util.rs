//! Common utilities for the integration tests: generation of MINC2
//! volume files on disk, standing in for the `rawtominc` tool. Volumes
//! are filled with consecutive sample values 0, 1, 2, ... in the
//! fastest-varying (last dimension) order, wrapping at the stored
//! type's width.
#![allow(dead_code)]

use hdf5::types::VarLenUnicode;
use hdf5::{Dataset, Group, H5Type};
use minc2::volume::{MincDcomplex, MincFcomplex, MincIcomplex, MincScomplex};
use minc2::MincType;
use ndarray::{ArrayD, ArrayView1, IxDyn};
use std::path::Path;
use std::str::FromStr;

/// Specification of one dimension of a generated volume, in file
/// declaration order (slowest-varying first).
pub struct Dim {
    name: String,
    size: usize,
    step: Option<f64>,
    start: Option<f64>,
    cosines: Option<[f64; 3]>,
    irregular: bool,
}

impl Dim {
    pub fn new(name: &str, size: usize) -> Dim {
        Dim {
            name: name.to_string(),
            size,
            step: None,
            start: None,
            cosines: None,
            irregular: false,
        }
    }

    pub fn step(mut self, step: f64) -> Dim {
        self.step = Some(step);
        self
    }

    pub fn start(mut self, start: f64) -> Dim {
        self.start = Some(start);
        self
    }

    pub fn cosines(mut self, cosines: [f64; 3]) -> Dim {
        self.cosines = Some(cosines);
        self
    }

    pub fn irregular(mut self) -> Dim {
        self.irregular = true;
        self
    }
}

/// Builder for MINC2 test volumes.
pub struct VolumeBuilder {
    dims: Vec<Dim>,
    stored: MincType,
    real_range: Option<(f64, f64)>,
}

impl VolumeBuilder {
    pub fn new() -> VolumeBuilder {
        VolumeBuilder {
            dims: Vec::new(),
            stored: MincType::Ubyte,
            real_range: None,
        }
    }

    pub fn dim(mut self, dim: Dim) -> VolumeBuilder {
        self.dims.push(dim);
        self
    }

    pub fn stored(mut self, stored: MincType) -> VolumeBuilder {
        self.stored = stored;
        self
    }

    pub fn real_range(mut self, min: f64, max: f64) -> VolumeBuilder {
        self.real_range = Some((min, max));
        self
    }

    /// Write the volume file at `path`.
    pub fn create(&self, path: &Path) {
        let file = hdf5::File::create(path).unwrap();
        let root = file.create_group("minc-2.0").unwrap();

        let dim_group = root.create_group("dimensions").unwrap();
        for dim in &self.dims {
            let entry = dim_group
                .new_dataset::<f64>()
                .create(dim.name.as_str())
                .unwrap();
            let spacing = if dim.irregular {
                "irregular"
            } else {
                "regular__"
            };
            write_str_attr(&entry, "spacing", spacing);
            if let Some(step) = dim.step {
                write_f64_attr(&entry, "step", step);
            }
            if let Some(start) = dim.start {
                write_f64_attr(&entry, "start", start);
            }
            if let Some(cosines) = dim.cosines {
                write_f64_slice_attr(&entry, "direction_cosines", &cosines);
            }
        }

        let image_group = root
            .create_group("image")
            .unwrap()
            .create_group("0")
            .unwrap();
        let shape: Vec<usize> = self.dims.iter().map(|dim| dim.size).collect();
        let count: usize = shape.iter().product();

        let image = self.write_image(&image_group, &shape, count);

        let names: Vec<&str> = self.dims.iter().map(|dim| dim.name.as_str()).collect();
        write_str_attr(&image, "dimorder", &names.join(","));
        if let Some(range) = stored_valid_range(self.stored) {
            write_f64_slice_attr(&image, "valid_range", &[range.0, range.1]);
        }

        if let Some((min, max)) = self.real_range {
            let min_ds = image_group.new_dataset::<f64>().create("image-min").unwrap();
            min_ds.write_scalar(&min).unwrap();
            let max_ds = image_group.new_dataset::<f64>().create("image-max").unwrap();
            max_ds.write_scalar(&max).unwrap();
        }
    }

    fn write_image(&self, group: &Group, shape: &[usize], count: usize) -> Dataset {
        use MincType::*;
        match self.stored {
            Byte => write_dataset(group, shape, fill(count, |i| (i % 128) as i8)),
            Ubyte => write_dataset(group, shape, fill(count, |i| (i % 256) as u8)),
            Short => write_dataset(group, shape, fill(count, |i| (i % 32768) as i16)),
            Ushort => write_dataset(group, shape, fill(count, |i| (i % 65536) as u16)),
            Int => write_dataset(group, shape, fill(count, |i| i as i32)),
            Uint => write_dataset(group, shape, fill(count, |i| i as u32)),
            Float => write_dataset(group, shape, fill(count, |i| i as f32)),
            Double => write_dataset(group, shape, fill(count, |i| i as f64)),
            Scomplex => write_dataset(
                group,
                shape,
                fill(count, |i| MincScomplex {
                    real: (i % 32768) as i16,
                    imaginary: (i % 32768) as i16,
                }),
            ),
            Icomplex => write_dataset(
                group,
                shape,
                fill(count, |i| MincIcomplex {
                    real: i as i32,
                    imaginary: i as i32,
                }),
            ),
            Fcomplex => write_dataset(
                group,
                shape,
                fill(count, |i| MincFcomplex {
                    real: i as f32,
                    imaginary: i as f32,
                }),
            ),
            Dcomplex => write_dataset(
                group,
                shape,
                fill(count, |i| MincDcomplex {
                    real: i as f64,
                    imaginary: i as f64,
                }),
            ),
            String => panic!("string volumes cannot be generated"),
        }
    }
}

fn fill<T, F: Fn(usize) -> T>(count: usize, value: F) -> Vec<T> {
    (0..count).map(value).collect()
}

fn write_dataset<T: H5Type>(group: &Group, shape: &[usize], values: Vec<T>) -> Dataset {
    let dataset = group
        .new_dataset::<T>()
        .shape(shape.to_vec())
        .create("image")
        .unwrap();
    let array = ArrayD::from_shape_vec(IxDyn(shape), values).unwrap();
    dataset.write(&array).unwrap();
    dataset
}

fn write_str_attr(dataset: &Dataset, name: &str, value: &str) {
    let value = VarLenUnicode::from_str(value).unwrap();
    dataset
        .new_attr::<VarLenUnicode>()
        .create(name)
        .unwrap()
        .write_scalar(&value)
        .unwrap();
}

fn write_f64_attr(dataset: &Dataset, name: &str, value: f64) {
    dataset
        .new_attr::<f64>()
        .create(name)
        .unwrap()
        .write_scalar(&value)
        .unwrap();
}

fn write_f64_slice_attr(dataset: &Dataset, name: &str, values: &[f64]) {
    dataset
        .new_attr::<f64>()
        .shape((values.len(),))
        .create(name)
        .unwrap()
        .write(ArrayView1::from(values))
        .unwrap();
}

/// The valid_range written for integer storage; float and complex
/// volumes carry none.
fn stored_valid_range(stored: MincType) -> Option<(f64, f64)> {
    use MincType::*;
    match stored {
        Byte => Some((-128.0, 127.0)),
        Ubyte => Some((0.0, 255.0)),
        Short => Some((-32768.0, 32767.0)),
        Ushort => Some((0.0, 65535.0)),
        Int => Some((f64::from(i32::min_value()), f64::from(i32::max_value()))),
        Uint => Some((0.0, f64::from(u32::max_value()))),
        _ => None,
    }
}
