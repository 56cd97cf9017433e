mod error;
mod generate;
mod parse;

pub use error::{GenerateError, ParseError};
pub use generate::{Architecture, GeneratorOptions, LineSeparator, generate};
pub use parse::parse;
