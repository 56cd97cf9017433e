//! Filesystem collaborators. The codec itself only ever sees in-memory
//! text; these helpers do the single blocking read or write around it.

use std::fs;
use std::path::Path;

use crate::io::{GeneratorOptions, generate, parse};
use crate::{Error, Image};

/// Read a hex document as UTF-8 text.
pub fn load_file(path: impl AsRef<Path>) -> Result<String, Error> {
    Ok(fs::read_to_string(path)?)
}

/// Write hex text back out.
pub fn save_file(path: impl AsRef<Path>, text: &str) -> Result<(), Error> {
    Ok(fs::write(path, text)?)
}

/// Load and parse a hex file in one step.
pub fn read_image(path: impl AsRef<Path>) -> Result<Image, Error> {
    let text = load_file(path)?;
    Ok(parse(&text)?)
}

/// Generate and save a hex file in one step.
pub fn write_image(
    path: impl AsRef<Path>,
    image: &Image,
    options: &GeneratorOptions,
) -> Result<(), Error> {
    let text = generate(image, options)?;
    save_file(path, &text)
}
