/// R Vectors module
///
/// This module holds the atomic vector representation shared by all
/// operators. Element kinds map onto rust types through [`OptionNA`], which
/// keeps the missing value distinct from any regular value, including NaN.
///
pub mod attributes;
pub mod coercion;
pub mod complex;
pub mod na;
pub mod reptype;
pub mod types;

mod core;
pub use core::*;

pub use na::NA_INTEGER;
