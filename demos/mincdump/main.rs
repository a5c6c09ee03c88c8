//! An application for reading MINC2 volume meta-data.

use minc2::{ImageIo, MincImageIo};
use std::env;
use std::path::Path;

fn main() {
    let mut args = env::args().skip(1);
    let filename = args.next().expect("Path to MINC file is required");
    let mut image_io = MincImageIo::new();
    let info = image_io
        .read_metadata(Path::new(&filename))
        .expect("Failed to read MINC file");
    println!("{:#?}", info);
}
