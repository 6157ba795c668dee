#![warn(missing_docs)]
#![forbid(unsafe_code)]
#![doc = include_str!("../README.md")]

mod arena;
mod equal;
mod kind;
mod pretty;
mod value;

pub use arena::{ValueArena, ValueId};
pub use equal::deep_equal;
pub use kind::ValueKind;
pub use pretty::serialize;
pub use value::{Prop, PropKey, Value};
