//! Method selection for JVM proxies.
//!
//! A [`MethodFilter`] decides which methods of a proxied type are intercepted,
//! based on annotations, return types (with primitive/wrapper equivalence) and
//! an optional caller predicate.

#![forbid(unsafe_code)]

mod error;
mod filter;
mod method;
mod selector;

pub use error::FilterError;
pub use filter::{build_method_filter, select_methods, CustomFilter, MethodFilter};
pub use method::{MethodInfo, MethodStub};
pub use selector::MethodSelector;
