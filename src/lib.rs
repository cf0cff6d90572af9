pub mod dft;
pub mod error;
pub mod modulus;
pub mod mult;

pub use error::{NttError, Result};
