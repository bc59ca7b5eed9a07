#![forbid(unsafe_code)]

mod annotation;
mod classfile;
mod constant_pool;
mod cursor;
mod descriptor;
mod error;
mod reader;
mod signature;

pub use crate::annotation::{descriptor_to_internal_name, Annotation, ConstValue, ElementValue};
pub use crate::classfile::{
    ClassFile, ClassMember, ACC_BRIDGE, ACC_INTERFACE, ACC_PUBLIC, ACC_STATIC, ACC_SYNTHETIC,
};
pub use crate::descriptor::{parse_field_descriptor, parse_method_descriptor};
pub use crate::descriptor::{BaseType, FieldType, MethodDescriptor, ReturnType};
pub use crate::error::{Error, Result};
/// Deepest nesting accepted in signatures and annotation element values.
///
/// Matches the 255 array dimensions the JVM allows; deeper input is reported as
/// malformed rather than recursed into.
pub const MAX_NESTING_DEPTH: usize = 255;

pub use crate::signature::{
    parse_class_signature, parse_field_signature, ClassSignature, ClassTypeSignature,
    SimpleClassTypeSignature, TypeArgument, TypeParameter, TypeSignature,
};
