mod core;
pub use core::*;

mod list;
pub use list::*;

mod scalar;
pub use scalar::*;

mod vector;
pub use vector::*;
pub use vector::{attributes, coercion, complex, na, reptype, types};
pub use vector::types::{Atomic, ElementKind};
