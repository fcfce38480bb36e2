//! Turns a written project directory into `main.pdf` by shelling out to a
//! TeX distribution. Nothing here is needed for conversion itself.

pub mod compiler;
pub mod error;

pub use compiler::{Compiled, Compiler, METHODS, Method};
pub use error::CompileError;
