use thiserror::Error;

/// Failures of the pure type-model operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TypeError {
    /// A primitive kind was supplied where a reference type argument or raw type is required.
    #[error("{0}")]
    InvalidTypeArgument(String),
    /// The type cannot be reduced to a concrete type (type variables, wildcards, stand-ins).
    #[error("Cannot convert type {0} to class")]
    UnresolvableType(String),
    /// A primitive-equivalence query on a kind that is not one of the nine primitives.
    #[error("type {0} is not a primitive type")]
    UnsupportedKind(String),
}

/// Errors reported by a [`crate::SignatureProvider`].
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("no class metadata available for {0}")]
    UnknownType(String),
    #[error(transparent)]
    ClassFile(#[from] pointcut_classfile::Error),
}

/// Underlying cause of a [`ResolveError`].
#[derive(Debug, Error)]
pub enum SignatureSourceError {
    #[error(transparent)]
    Provider(#[from] ProviderError),
    #[error(transparent)]
    Parse(#[from] pointcut_classfile::Error),
    #[error(transparent)]
    Type(#[from] TypeError),
}

#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("failed to resolve generic signature of {type_name}")]
    SignatureResolution {
        type_name: String,
        #[source]
        source: SignatureSourceError,
    },
}

impl ResolveError {
    pub(crate) fn signature(type_name: &str, source: impl Into<SignatureSourceError>) -> Self {
        ResolveError::SignatureResolution {
            type_name: type_name.to_string(),
            source: source.into(),
        }
    }
}
