use indexmap::IndexMap;
use pointcut_classfile::{
    parse_class_signature, ClassSignature, ClassTypeSignature, TypeArgument, TypeSignature,
};

use crate::error::{ResolveError, TypeError};
use crate::provider::SignatureProvider;
use crate::ty::{make_generic_array, make_parameterized, ConcreteType, Type, WildcardBound};

/// Type arguments a class binds for its generic superclass and superinterfaces,
/// keyed by the supertype's binary name in declaration order (superclass first).
///
/// Built fresh by every [`resolve_generic_bindings`] call; the empty binding
/// compares equal to [`GenericBinding::default`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenericBinding {
    entries: IndexMap<String, Vec<Type>>,
}

impl GenericBinding {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, supertype: &str) -> Option<&[Type]> {
        self.entries.get(supertype).map(Vec::as_slice)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Type])> {
        self.entries
            .iter()
            .map(|(name, args)| (name.as_str(), args.as_slice()))
    }
}

impl IntoIterator for GenericBinding {
    type Item = (String, Vec<Type>);
    type IntoIter = indexmap::map::IntoIter<String, Vec<Type>>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

/// The generic superclass and superinterfaces of a class as full types.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenericSupertypes {
    pub super_class: Option<Type>,
    pub interfaces: Vec<Type>,
}

impl GenericSupertypes {
    pub fn is_empty(&self) -> bool {
        self.super_class.is_none() && self.interfaces.is_empty()
    }

    /// Positional view: superclass at index 0, interfaces after it.
    pub fn iter(&self) -> impl Iterator<Item = &Type> {
        self.super_class.iter().chain(&self.interfaces)
    }

    pub fn to_vec(&self) -> Vec<Type> {
        self.iter().cloned().collect()
    }
}

/// Recover the type arguments `binary_name` binds for each of its generic supertypes.
///
/// A type without a generic signature yields an empty binding. Provider and
/// parse failures are reported as [`ResolveError::SignatureResolution`].
pub fn resolve_generic_bindings(
    provider: &dyn SignatureProvider,
    binary_name: &str,
) -> Result<GenericBinding, ResolveError> {
    let Some(signature) = load_signature(provider, binary_name)? else {
        return Ok(GenericBinding::default());
    };

    let mut entries = IndexMap::with_capacity(1 + signature.interfaces.len());
    for supertype in signature.supertypes() {
        let args = supertype
            .last_segment()
            .map(|segment| type_arguments(&segment.type_arguments))
            .transpose()
            .map_err(|err| ResolveError::signature(binary_name, err))?
            .unwrap_or_default();
        entries.insert(supertype.binary_name(), args);
    }

    tracing::debug!(
        target = "pointcut.signature",
        class = %binary_name,
        supertypes = entries.len(),
        "resolved generic bindings"
    );
    Ok(GenericBinding { entries })
}

/// Like [`resolve_generic_bindings`], but returns each supertype as a full
/// [`Type`] (owner and raw type included) in positional order.
pub fn resolved_type_arguments(
    provider: &dyn SignatureProvider,
    binary_name: &str,
) -> Result<GenericSupertypes, ResolveError> {
    let Some(signature) = load_signature(provider, binary_name)? else {
        return Ok(GenericSupertypes::default());
    };

    let convert = |sig: &ClassTypeSignature| {
        type_from_class_signature(sig).map_err(|err| ResolveError::signature(binary_name, err))
    };
    let super_class = convert(&signature.super_class)?;
    let interfaces = signature
        .interfaces
        .iter()
        .map(convert)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(GenericSupertypes {
        super_class: Some(super_class),
        interfaces,
    })
}

fn load_signature(
    provider: &dyn SignatureProvider,
    binary_name: &str,
) -> Result<Option<ClassSignature>, ResolveError> {
    let raw = provider
        .generic_signature(binary_name)
        .map_err(|err| ResolveError::signature(binary_name, err))?;
    let Some(raw) = raw else {
        tracing::trace!(
            target = "pointcut.signature",
            class = %binary_name,
            "no generic signature"
        );
        return Ok(None);
    };

    parse_class_signature(&raw)
        .map(Some)
        .map_err(|err| ResolveError::signature(binary_name, err))
}

/// Convert a class type signature into a [`Type`].
///
/// Outer segments become the owner; segments without type arguments stay
/// concrete unless their owner is parameterized.
pub fn type_from_class_signature(sig: &ClassTypeSignature) -> Result<Type, TypeError> {
    let mut binary_name = String::new();
    for part in &sig.package {
        binary_name.push_str(part);
        binary_name.push('.');
    }

    let mut current: Option<Type> = None;
    for (idx, segment) in sig.segments.iter().enumerate() {
        if idx > 0 {
            binary_name.push('$');
        }
        binary_name.push_str(&segment.name);

        let raw = ConcreteType::class(binary_name.clone());
        let owner = current.take();
        let owner_is_generic = matches!(owner, Some(Type::Parameterized(_)));
        current = Some(if segment.type_arguments.is_empty() && !owner_is_generic {
            Type::Concrete(raw)
        } else {
            make_parameterized(raw, type_arguments(&segment.type_arguments)?, owner)?
        });
    }

    current.ok_or_else(|| TypeError::UnresolvableType(sig.internal_name()))
}

pub fn type_from_signature(sig: &TypeSignature) -> Result<Type, TypeError> {
    match sig {
        TypeSignature::Base(base) => Ok(Type::Concrete(ConcreteType::Primitive((*base).into()))),
        TypeSignature::Array(component) => Ok(match type_from_signature(component)? {
            Type::Concrete(component) => Type::Concrete(ConcreteType::array_of(component)),
            generic => make_generic_array(generic),
        }),
        TypeSignature::Class(class) => type_from_class_signature(class),
        TypeSignature::TypeVariable(name) => Ok(Type::TypeVariable(name.clone())),
    }
}

fn type_arguments(args: &[TypeArgument]) -> Result<Vec<Type>, TypeError> {
    args.iter()
        .map(|arg| {
            Ok(match arg {
                TypeArgument::Any => Type::Wildcard(WildcardBound::Unbounded),
                TypeArgument::Exact(sig) => type_from_signature(sig)?,
                TypeArgument::Extends(sig) => {
                    Type::Wildcard(WildcardBound::Extends(Box::new(type_from_signature(sig)?)))
                }
                TypeArgument::Super(sig) => {
                    Type::Wildcard(WildcardBound::Super(Box::new(type_from_signature(sig)?)))
                }
            })
        })
        .collect()
}
