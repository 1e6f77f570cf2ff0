//! CARv1 encoding and decoding (spec.md §4.5).

pub mod error;
pub mod reader;
pub mod writer;

pub use error::{Error, Result};
pub use reader::{read_car, read_single_root_car, CarFile};
pub use writer::write_car;
