//! Helmshim Core - runtime shims for templates generated from typed code
//!
//! Generated templates run inside a dynamically typed engine that lacks
//! several operations of the language they were generated from. This crate
//! provides those operations as pure functions over a JSON-shaped [`Value`]:
//! - Type tests and assertions (`typetest`, `typeassertion`, `isIntLikeFloat`)
//! - Map lookups with presence flag, multi-value packing and lengths
//! - Pointer emulation (`deref`, `ptr_Deref`, `ptr_Equal`)
//! - Kubernetes quantity validation and conversion
//! - A static registry exposing all of them by their stable template names
//! - `Values`: configuration input with deep merge support

pub mod containers;
pub mod error;
pub mod pointers;
pub mod quantity;
pub mod registry;
pub mod types;
pub mod value;
pub mod values;

pub use containers::{compact, compact_get, dict_test, length};
pub use error::{CoreError, ShimError, ShimResult};
pub use pointers::{deref, ptr_deref, ptr_equal};
pub use quantity::{quantity_as_int64, quantity_validate};
pub use registry::{Shim, ShimFn};
pub use types::{TypeTag, is_int_like_float, type_assert, type_test};
pub use value::{Map, Value};
pub use values::{Values, parse_set_values};
