//! Java type model used by pointcut matching.
//!
//! Covers concrete and parameterized types, primitive/wrapper equivalence, and
//! recovery of the type arguments a class binds for its generic supertypes from
//! compiled `Signature` metadata.

#![forbid(unsafe_code)]

mod error;
mod primitive;
mod provider;
mod resolve;
mod ty;

pub use error::{ProviderError, ResolveError, SignatureSourceError, TypeError};
pub use primitive::{equivalence_class, wrapper_of, PrimitiveKind};
pub use provider::{ClassFileSignatureProvider, InMemorySignatureProvider, SignatureProvider};
pub use resolve::{
    resolve_generic_bindings, resolved_type_arguments, type_from_class_signature,
    type_from_signature, GenericBinding, GenericSupertypes,
};
pub use ty::{
    is_class_like, make_generic_array, make_map_type, make_parameterized, to_concrete_type,
    ConcreteType, GenericArrayType, ParameterizedType, Type, WildcardBound, MAP, OBJECT,
};
