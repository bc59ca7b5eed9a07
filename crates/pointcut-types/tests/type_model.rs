use std::collections::{BTreeSet, HashSet};

use pointcut_types::{
    equivalence_class, is_class_like, make_generic_array, make_map_type, make_parameterized,
    to_concrete_type, wrapper_of, ConcreteType, PrimitiveKind, Type, TypeError, WildcardBound,
};

use pretty_assertions::assert_eq;

fn string() -> Type {
    Type::class("java.lang.String")
}

fn int() -> Type {
    Type::Concrete(ConcreteType::Primitive(PrimitiveKind::Int))
}

#[test]
fn parameterized_types_compare_by_value() {
    let a = make_parameterized(ConcreteType::class("java.util.List"), vec![string()], None)
        .unwrap();
    let b = make_parameterized(ConcreteType::class("java.util.List"), vec![string()], None)
        .unwrap();
    assert_eq!(a, b);

    let mut set = HashSet::new();
    set.insert(a.clone());
    assert!(set.contains(&b));

    let other = make_parameterized(
        ConcreteType::class("java.util.List"),
        vec![Type::class("java.lang.Integer")],
        None,
    )
    .unwrap();
    assert_ne!(a, other);
    assert_eq!(a.to_string(), "java.util.List<java.lang.String>");
}

#[test]
fn primitive_type_arguments_are_rejected() {
    let err = make_parameterized(ConcreteType::class("java.util.List"), vec![int()], None)
        .unwrap_err();
    assert_eq!(
        err,
        TypeError::InvalidTypeArgument("Java Generic Type not support PrimitiveType".to_string())
    );
}

#[test]
fn primitive_raw_type_is_rejected() {
    let err = make_parameterized(
        ConcreteType::Primitive(PrimitiveKind::Int),
        vec![string()],
        None,
    )
    .unwrap_err();
    assert_eq!(err.to_string(), "rawType int must not PrimitiveType");

    let err = make_parameterized(ConcreteType::Primitive(PrimitiveKind::Int), vec![], None)
        .unwrap_err();
    assert!(matches!(err, TypeError::InvalidTypeArgument(_)));
}

#[test]
fn array_raw_type_becomes_generic_array() {
    let ty = make_parameterized(
        ConcreteType::array_of(ConcreteType::class("java.util.List")),
        vec![string()],
        None,
    )
    .unwrap();
    assert_eq!(ty.to_string(), "java.util.List<java.lang.String>[]");
    let Type::GenericArray(array) = &ty else {
        panic!("expected generic array, got {ty:?}");
    };
    assert_eq!(
        array.component_type().as_parameterized().unwrap().raw_type(),
        &ConcreteType::class("java.util.List")
    );
    assert_eq!(
        to_concrete_type(&ty).unwrap(),
        ConcreteType::array_of(ConcreteType::class("java.util.List"))
    );
}

#[test]
fn nested_raw_type_defaults_owner_to_declaring_class() {
    let ty = make_parameterized(
        ConcreteType::class("java.util.Map$Entry"),
        vec![string(), Type::class("java.lang.Integer")],
        None,
    )
    .unwrap();
    let entry = ty.as_parameterized().unwrap();
    assert_eq!(entry.owner_type(), Some(&Type::class("java.util.Map")));
    assert_eq!(
        ty.to_string(),
        "java.util.Map$Entry<java.lang.String,java.lang.Integer>"
    );
}

#[test]
fn map_type_helper() {
    let map = make_map_type(string(), Type::class("java.lang.Integer")).unwrap();
    assert_eq!(map.to_string(), "java.util.Map<java.lang.String,java.lang.Integer>");
    assert_eq!(
        make_map_type(int(), string()).unwrap_err(),
        TypeError::InvalidTypeArgument("Java Generic Type not support PrimitiveType".to_string())
    );
}

#[test]
fn erasure_of_class_like_types() {
    let list = make_parameterized(ConcreteType::class("java.util.List"), vec![string()], None)
        .unwrap();
    assert_eq!(
        to_concrete_type(&list).unwrap(),
        ConcreteType::class("java.util.List")
    );
    assert_eq!(
        to_concrete_type(&string()).unwrap(),
        ConcreteType::class("java.lang.String")
    );
    assert!(is_class_like(&list));
    assert!(is_class_like(&int()));

    let list_array = make_generic_array(list);
    assert!(is_class_like(&list_array));
    assert_eq!(
        to_concrete_type(&list_array).unwrap(),
        ConcreteType::array_of(ConcreteType::class("java.util.List"))
    );
}

#[test]
fn type_variables_wildcards_and_stand_ins_are_not_class_like() {
    let cases = [
        Type::TypeVariable("T".to_string()),
        Type::Wildcard(WildcardBound::Extends(Box::new(string()))),
        Type::Opaque("$Synthetic".to_string()),
    ];
    for ty in cases {
        assert!(!is_class_like(&ty), "{ty}");
        let err = to_concrete_type(&ty).unwrap_err();
        assert_eq!(err, TypeError::UnresolvableType(ty.to_string()));
    }
    assert_eq!(
        to_concrete_type(&Type::TypeVariable("T".to_string()))
            .unwrap_err()
            .to_string(),
        "Cannot convert type T to class"
    );
}

#[test]
fn every_primitive_has_a_wrapper() {
    let expected = [
        (PrimitiveKind::Boolean, "java.lang.Boolean"),
        (PrimitiveKind::Byte, "java.lang.Byte"),
        (PrimitiveKind::Short, "java.lang.Short"),
        (PrimitiveKind::Int, "java.lang.Integer"),
        (PrimitiveKind::Long, "java.lang.Long"),
        (PrimitiveKind::Float, "java.lang.Float"),
        (PrimitiveKind::Double, "java.lang.Double"),
        (PrimitiveKind::Char, "java.lang.Character"),
        (PrimitiveKind::Void, "java.lang.Void"),
    ];
    for (kind, wrapper) in expected {
        assert_eq!(
            wrapper_of(&ConcreteType::Primitive(kind)).unwrap(),
            ConcreteType::class(wrapper)
        );
    }
}

#[test]
fn wrapper_of_rejects_non_primitives() {
    for ty in [
        ConcreteType::class("java.lang.Integer"),
        ConcreteType::class("java.lang.String"),
        ConcreteType::array_of(ConcreteType::Primitive(PrimitiveKind::Int)),
    ] {
        assert!(matches!(
            wrapper_of(&ty),
            Err(TypeError::UnsupportedKind(name)) if name == ty.to_string()
        ));
    }
}

#[test]
fn equivalence_classes_pair_primitives_with_wrappers() {
    let boolean_pair = BTreeSet::from([
        ConcreteType::Primitive(PrimitiveKind::Boolean),
        ConcreteType::class("java.lang.Boolean"),
    ]);
    assert_eq!(
        equivalence_class(&ConcreteType::Primitive(PrimitiveKind::Boolean)),
        boolean_pair
    );
    assert_eq!(
        equivalence_class(&ConcreteType::class("java.lang.Boolean")),
        boolean_pair
    );
    assert_eq!(
        equivalence_class(&ConcreteType::class("java.lang.String")),
        BTreeSet::from([ConcreteType::class("java.lang.String")])
    );
    assert_eq!(
        equivalence_class(&ConcreteType::array_of(ConcreteType::Primitive(
            PrimitiveKind::Int
        )))
        .len(),
        1
    );
}
