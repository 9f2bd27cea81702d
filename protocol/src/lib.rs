pub mod erd;
pub mod value;

pub use erd::{ErdCode, IsErd};
pub use value::{ErdValue, RawValue};
