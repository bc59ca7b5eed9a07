use std::collections::HashMap;

use pointcut_classfile::ClassFile;

use crate::error::ProviderError;

/// Source of raw generic class signatures (the JVM `Signature` attribute).
///
/// `Ok(None)` means the type is known but carries no generic signature; an
/// error means its metadata could not be located. Implementations decide their
/// own thread-safety; the resolver never shares a provider across threads itself.
pub trait SignatureProvider {
    fn generic_signature(&self, binary_name: &str) -> Result<Option<String>, ProviderError>;
}

impl<P: SignatureProvider + ?Sized> SignatureProvider for &P {
    fn generic_signature(&self, binary_name: &str) -> Result<Option<String>, ProviderError> {
        (**self).generic_signature(binary_name)
    }
}

/// Signatures registered up front, e.g. emitted by a build step.
#[derive(Debug, Default, Clone)]
pub struct InMemorySignatureProvider {
    signatures: HashMap<String, Option<String>>,
}

impl InMemorySignatureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `binary_name` with its signature, or `None` for a non-generic type.
    pub fn insert(&mut self, binary_name: impl Into<String>, signature: Option<&str>) -> &mut Self {
        self.signatures
            .insert(binary_name.into(), signature.map(str::to_string));
        self
    }

    pub fn with_type(mut self, binary_name: impl Into<String>, signature: Option<&str>) -> Self {
        self.insert(binary_name, signature);
        self
    }
}

impl SignatureProvider for InMemorySignatureProvider {
    fn generic_signature(&self, binary_name: &str) -> Result<Option<String>, ProviderError> {
        self.signatures
            .get(binary_name)
            .cloned()
            .ok_or_else(|| ProviderError::UnknownType(binary_name.to_string()))
    }
}

/// Signatures read from compiled class files, keyed by binary name.
#[derive(Debug, Default, Clone)]
pub struct ClassFileSignatureProvider {
    inner: InMemorySignatureProvider,
}

impl ClassFileSignatureProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_class_files<'a>(classes: impl IntoIterator<Item = &'a ClassFile>) -> Self {
        let mut provider = Self::new();
        for class in classes {
            provider.add_class(class);
        }
        provider
    }

    /// Index an already parsed class file; returns its binary name.
    pub fn add_class(&mut self, class: &ClassFile) -> String {
        let binary_name = class.binary_name();
        self.inner
            .insert(binary_name.clone(), class.signature.as_deref());
        tracing::trace!(
            target = "pointcut.signature",
            class = %binary_name,
            generic = class.signature.is_some(),
            "indexed class file"
        );
        binary_name
    }

    /// Parse and index raw class-file bytes; returns the binary name.
    pub fn add_class_bytes(&mut self, bytes: &[u8]) -> Result<String, ProviderError> {
        let class = ClassFile::parse(bytes)?;
        Ok(self.add_class(&class))
    }

    pub fn len(&self) -> usize {
        self.inner.signatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.signatures.is_empty()
    }
}

impl SignatureProvider for ClassFileSignatureProvider {
    fn generic_signature(&self, binary_name: &str) -> Result<Option<String>, ProviderError> {
        self.inner.generic_signature(binary_name)
    }
}
