pub mod fit;
pub mod measurement;
pub mod types;
