//! Utilities shared by pointcut tests.
//!
//! [`ClassFileBuilder`] assembles minimal, valid class files in memory so tests
//! can exercise the class-file reader, the signature providers and the method
//! selection pipeline without a `javac` toolchain. [`env_lock`] and
//! [`EnvVarGuard`] serialize tests that touch process environment variables.

mod class_bytes;
mod env;

pub use class_bytes::{AnnotationSpec, ClassFileBuilder, ElementSpec};
pub use env::{env_lock, EnvVarGuard};
