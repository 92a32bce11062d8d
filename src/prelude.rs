pub use crate::pkg::internal::errors::Error;

pub type Result<T> = std::result::Result<T, Error>;
