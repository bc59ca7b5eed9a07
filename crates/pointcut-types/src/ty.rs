use std::fmt;

use pointcut_classfile::{FieldType, ReturnType};

use crate::error::TypeError;
use crate::primitive::PrimitiveKind;

pub const OBJECT: &str = "java.lang.Object";
pub const MAP: &str = "java.util.Map";
const CLONEABLE: &str = "java.lang.Cloneable";
const SERIALIZABLE: &str = "java.io.Serializable";

/// A reified type: a primitive, a class named by its binary name, or an array.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConcreteType {
    Primitive(PrimitiveKind),
    /// Binary name, e.g. `java.util.Map$Entry`.
    Class(String),
    Array(Box<ConcreteType>),
}

impl ConcreteType {
    pub fn class(binary_name: impl Into<String>) -> Self {
        ConcreteType::Class(binary_name.into())
    }

    pub fn array_of(component: ConcreteType) -> Self {
        ConcreteType::Array(Box::new(component))
    }

    pub fn object() -> Self {
        Self::class(OBJECT)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, ConcreteType::Primitive(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, ConcreteType::Array(_))
    }

    pub fn component(&self) -> Option<&ConcreteType> {
        match self {
            ConcreteType::Array(component) => Some(component),
            _ => None,
        }
    }

    /// Parse a Java type name: `int`, `java.lang.String`, `java.util.List[][]`.
    pub fn from_type_name(name: &str) -> Result<Self, TypeError> {
        let trimmed = name.trim();
        if let Some(component) = trimmed.strip_suffix("[]") {
            let component = Self::from_type_name(component)?;
            if component == ConcreteType::Primitive(PrimitiveKind::Void) {
                return Err(TypeError::UnresolvableType(name.to_string()));
            }
            return Ok(Self::array_of(component));
        }

        let malformed = trimmed.is_empty()
            || trimmed.contains(|c: char| {
                c.is_whitespace() || matches!(c, '<' | '>' | '[' | ']' | ',' | '/' | ';')
            });
        if malformed {
            return Err(TypeError::UnresolvableType(name.to_string()));
        }

        Ok(match PrimitiveKind::from_keyword(trimmed) {
            Some(kind) => ConcreteType::Primitive(kind),
            None => Self::class(trimmed),
        })
    }

    /// Enclosing class of a nested member class (`a.Outer$Inner` -> `a.Outer`).
    ///
    /// Local and anonymous classes (`a.Outer$1`) have no declaring class.
    pub fn declaring_class(&self) -> Option<ConcreteType> {
        let ConcreteType::Class(name) = self else {
            return None;
        };
        let (outer, inner) = name.rsplit_once('$')?;
        let starts_with_digit = inner.chars().next().map_or(true, |c| c.is_ascii_digit());
        if outer.is_empty() || starts_with_digit {
            return None;
        }
        Some(Self::class(outer))
    }

    pub fn simple_name(&self) -> String {
        match self {
            ConcreteType::Primitive(kind) => kind.keyword().to_string(),
            ConcreteType::Class(name) => {
                let unqualified = name.rsplit('.').next().unwrap_or(name);
                let simple = match self.declaring_class() {
                    Some(_) => unqualified.rsplit('$').next().unwrap_or(unqualified),
                    None => unqualified,
                };
                simple.to_string()
            }
            ConcreteType::Array(component) => format!("{}[]", component.simple_name()),
        }
    }

    /// Whether a value of type `other` can be assigned to `self` without a
    /// class hierarchy: identity, `Object` for any reference, the array
    /// supertypes, and covariance of reference arrays.
    pub fn is_assignable_from(&self, other: &ConcreteType) -> bool {
        if self == other {
            return true;
        }
        match (self, other) {
            (ConcreteType::Primitive(_), _) | (_, ConcreteType::Primitive(_)) => false,
            (ConcreteType::Class(name), ConcreteType::Class(_)) => name == OBJECT,
            (ConcreteType::Class(name), ConcreteType::Array(_)) => {
                matches!(name.as_str(), OBJECT | CLONEABLE | SERIALIZABLE)
            }
            (ConcreteType::Array(target), ConcreteType::Array(source)) => {
                !target.is_primitive() && !source.is_primitive() && target.is_assignable_from(source)
            }
            (ConcreteType::Array(_), ConcreteType::Class(_)) => false,
        }
    }
}

impl From<PrimitiveKind> for ConcreteType {
    fn from(kind: PrimitiveKind) -> Self {
        ConcreteType::Primitive(kind)
    }
}

impl From<&FieldType> for ConcreteType {
    fn from(ty: &FieldType) -> Self {
        match ty {
            FieldType::Base(base) => ConcreteType::Primitive((*base).into()),
            FieldType::Object(internal) => ConcreteType::class(internal.replace('/', ".")),
            FieldType::Array(component) => ConcreteType::array_of(component.as_ref().into()),
        }
    }
}

impl From<&ReturnType> for ConcreteType {
    fn from(ty: &ReturnType) -> Self {
        match ty {
            ReturnType::Void => ConcreteType::Primitive(PrimitiveKind::Void),
            ReturnType::Type(ty) => ty.into(),
        }
    }
}

impl fmt::Display for ConcreteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConcreteType::Primitive(kind) => f.write_str(kind.keyword()),
            ConcreteType::Class(name) => f.write_str(name),
            ConcreteType::Array(component) => write!(f, "{component}[]"),
        }
    }
}

/// A type reference as it appears in generic metadata.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Concrete(ConcreteType),
    Parameterized(ParameterizedType),
    GenericArray(GenericArrayType),
    TypeVariable(String),
    Wildcard(WildcardBound),
    /// A synthetic stand-in that does not denote any reifiable type.
    Opaque(String),
}

impl Type {
    pub fn class(binary_name: impl Into<String>) -> Self {
        Type::Concrete(ConcreteType::class(binary_name))
    }

    pub fn as_parameterized(&self) -> Option<&ParameterizedType> {
        match self {
            Type::Parameterized(ty) => Some(ty),
            _ => None,
        }
    }
}

impl From<ConcreteType> for Type {
    fn from(ty: ConcreteType) -> Self {
        Type::Concrete(ty)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WildcardBound {
    Unbounded,
    Extends(Box<Type>),
    Super(Box<Type>),
}

/// `raw<args>` with an optional owner; built with [`make_parameterized`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParameterizedType {
    raw_type: ConcreteType,
    type_arguments: Vec<Type>,
    owner_type: Option<Box<Type>>,
}

impl ParameterizedType {
    pub fn raw_type(&self) -> &ConcreteType {
        &self.raw_type
    }

    pub fn type_arguments(&self) -> &[Type] {
        &self.type_arguments
    }

    pub fn owner_type(&self) -> Option<&Type> {
        self.owner_type.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenericArrayType {
    component: Box<Type>,
}

impl GenericArrayType {
    pub fn component_type(&self) -> &Type {
        &self.component
    }
}

/// Wrap `component` in a generic array type.
pub fn make_generic_array(component: Type) -> Type {
    Type::GenericArray(GenericArrayType {
        component: Box::new(component),
    })
}

/// Build a parameterized type from a raw type, its type arguments and an owner.
///
/// Primitive type arguments and primitive raw types are rejected. An array raw
/// type yields a generic array of the parameterized component, so
/// `List[]` with `[String]` becomes `List<String>[]`. Without an explicit owner,
/// the raw type's declaring class (if any) is used.
pub fn make_parameterized(
    raw_type: ConcreteType,
    type_arguments: Vec<Type>,
    owner_type: Option<Type>,
) -> Result<Type, TypeError> {
    if type_arguments
        .iter()
        .any(|arg| matches!(arg, Type::Concrete(ConcreteType::Primitive(_))))
    {
        return Err(TypeError::InvalidTypeArgument(
            "Java Generic Type not support PrimitiveType".to_string(),
        ));
    }
    if raw_type.is_primitive() {
        return Err(TypeError::InvalidTypeArgument(format!(
            "rawType {raw_type} must not PrimitiveType"
        )));
    }

    if let ConcreteType::Array(component) = raw_type {
        let inner = make_parameterized(*component, type_arguments, None)?;
        return Ok(make_generic_array(inner));
    }

    let owner_type = owner_type.or_else(|| raw_type.declaring_class().map(Type::Concrete));
    Ok(Type::Parameterized(ParameterizedType {
        raw_type,
        type_arguments,
        owner_type: owner_type.map(Box::new),
    }))
}

/// `java.util.Map<key, value>`
pub fn make_map_type(key_type: Type, value_type: Type) -> Result<Type, TypeError> {
    make_parameterized(ConcreteType::class(MAP), vec![key_type, value_type], None)
}

/// Reduce a type to the concrete type it erases to.
pub fn to_concrete_type(ty: &Type) -> Result<ConcreteType, TypeError> {
    match ty {
        Type::Concrete(ty) => Ok(ty.clone()),
        Type::Parameterized(ty) => Ok(ty.raw_type.clone()),
        Type::GenericArray(ty) => Ok(ConcreteType::array_of(to_concrete_type(&ty.component)?)),
        Type::TypeVariable(_) | Type::Wildcard(_) | Type::Opaque(_) => {
            Err(TypeError::UnresolvableType(ty.to_string()))
        }
    }
}

/// Whether [`to_concrete_type`] can succeed for `ty`.
pub fn is_class_like(ty: &Type) -> bool {
    matches!(
        ty,
        Type::Concrete(_) | Type::Parameterized(_) | Type::GenericArray(_)
    )
}

impl fmt::Display for ParameterizedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.owner_type {
            Some(owner) => write!(f, "{owner}${}", self.raw_type.simple_name())?,
            None => write!(f, "{}", self.raw_type)?,
        }
        if !self.type_arguments.is_empty() {
            f.write_str("<")?;
            for (idx, arg) in self.type_arguments.iter().enumerate() {
                if idx > 0 {
                    f.write_str(",")?;
                }
                write!(f, "{arg}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

impl fmt::Display for GenericArrayType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}[]", self.component)
    }
}

impl fmt::Display for WildcardBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WildcardBound::Unbounded => f.write_str("?"),
            WildcardBound::Extends(bound) => write!(f, "? extends {bound}"),
            WildcardBound::Super(bound) => write!(f, "? super {bound}"),
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Concrete(ty) => fmt::Display::fmt(ty, f),
            Type::Parameterized(ty) => fmt::Display::fmt(ty, f),
            Type::GenericArray(ty) => fmt::Display::fmt(ty, f),
            Type::TypeVariable(name) | Type::Opaque(name) => f.write_str(name),
            Type::Wildcard(bound) => fmt::Display::fmt(bound, f),
        }
    }
}
