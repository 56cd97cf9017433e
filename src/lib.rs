pub mod error;
pub mod file;
pub mod image;
pub mod io;
pub mod record;
pub mod section;

pub use error::Error;
pub use file::{load_file, read_image, save_file, write_image};
pub use image::Image;
pub use io::{
    Architecture, GenerateError, GeneratorOptions, LineSeparator, ParseError, generate, parse,
};
pub use record::{Record, RecordError, RecordType};
pub use section::Section;
