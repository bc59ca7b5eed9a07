use std::collections::BTreeSet;
use std::fmt;

use pointcut_classfile::BaseType;

use crate::error::TypeError;
use crate::ty::ConcreteType;

/// The nine primitive kinds of the JVM, `void` included.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Boolean,
    Byte,
    Short,
    Int,
    Long,
    Float,
    Double,
    Char,
    Void,
}

impl PrimitiveKind {
    pub const ALL: [PrimitiveKind; 9] = [
        PrimitiveKind::Boolean,
        PrimitiveKind::Byte,
        PrimitiveKind::Short,
        PrimitiveKind::Int,
        PrimitiveKind::Long,
        PrimitiveKind::Float,
        PrimitiveKind::Double,
        PrimitiveKind::Char,
        PrimitiveKind::Void,
    ];

    /// (keyword, descriptor char, wrapper binary name)
    const fn row(self) -> (&'static str, char, &'static str) {
        match self {
            PrimitiveKind::Boolean => ("boolean", 'Z', "java.lang.Boolean"),
            PrimitiveKind::Byte => ("byte", 'B', "java.lang.Byte"),
            PrimitiveKind::Short => ("short", 'S', "java.lang.Short"),
            PrimitiveKind::Int => ("int", 'I', "java.lang.Integer"),
            PrimitiveKind::Long => ("long", 'J', "java.lang.Long"),
            PrimitiveKind::Float => ("float", 'F', "java.lang.Float"),
            PrimitiveKind::Double => ("double", 'D', "java.lang.Double"),
            PrimitiveKind::Char => ("char", 'C', "java.lang.Character"),
            PrimitiveKind::Void => ("void", 'V', "java.lang.Void"),
        }
    }

    pub const fn keyword(self) -> &'static str {
        self.row().0
    }

    pub const fn descriptor_char(self) -> char {
        self.row().1
    }

    pub const fn wrapper_name(self) -> &'static str {
        self.row().2
    }

    /// The boxed counterpart, e.g. `java.lang.Integer` for `int`.
    pub fn wrapper(self) -> ConcreteType {
        ConcreteType::class(self.wrapper_name())
    }

    pub fn from_keyword(keyword: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.keyword() == keyword)
    }

    /// Reverse lookup: the primitive whose wrapper is `binary_name`.
    pub fn from_wrapper(binary_name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.wrapper_name() == binary_name)
    }

    pub fn from_descriptor_char(ch: char) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.descriptor_char() == ch)
    }
}

impl From<BaseType> for PrimitiveKind {
    fn from(base: BaseType) -> Self {
        match base {
            BaseType::Byte => PrimitiveKind::Byte,
            BaseType::Char => PrimitiveKind::Char,
            BaseType::Double => PrimitiveKind::Double,
            BaseType::Float => PrimitiveKind::Float,
            BaseType::Int => PrimitiveKind::Int,
            BaseType::Long => PrimitiveKind::Long,
            BaseType::Short => PrimitiveKind::Short,
            BaseType::Boolean => PrimitiveKind::Boolean,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// Boxed counterpart of a primitive type.
///
/// Fails with [`TypeError::UnsupportedKind`] for anything that is not one of the
/// nine primitive kinds, including the wrapper types themselves.
pub fn wrapper_of(ty: &ConcreteType) -> Result<ConcreteType, TypeError> {
    match ty {
        ConcreteType::Primitive(kind) => Ok(kind.wrapper()),
        other => Err(TypeError::UnsupportedKind(other.to_string())),
    }
}

/// Types treated as interchangeable with `ty` for return-type matching:
/// `{primitive, wrapper}` for either member of a pair, `{ty}` otherwise.
pub fn equivalence_class(ty: &ConcreteType) -> BTreeSet<ConcreteType> {
    let kind = match ty {
        ConcreteType::Primitive(kind) => Some(*kind),
        ConcreteType::Class(name) => PrimitiveKind::from_wrapper(name),
        ConcreteType::Array(_) => None,
    };
    match kind {
        Some(kind) => BTreeSet::from([ConcreteType::Primitive(kind), kind.wrapper()]),
        None => BTreeSet::from([ty.clone()]),
    }
}
