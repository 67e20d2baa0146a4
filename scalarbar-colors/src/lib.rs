pub mod error;
pub mod lookup_table;
pub mod source;
pub mod transfer_function;

pub use error::ColorError;
pub use lookup_table::LookupTable;
pub use source::{ColorSource, OutOfRangeColors};
pub use transfer_function::ColorTransferFunction;
