use std::error::Error as _;

use pointcut_test_utils::ClassFileBuilder;
use pointcut_types::{
    make_map_type, make_parameterized, resolve_generic_bindings, resolved_type_arguments,
    ClassFileSignatureProvider, ConcreteType, GenericBinding, InMemorySignatureProvider,
    PrimitiveKind, ProviderError, ResolveError, SignatureSourceError, Type, WildcardBound,
};

use pretty_assertions::assert_eq;

const FUNCTION1: &str = "com.github.harbby.gadtry.function.Function1";
const GENERIC_TEST: &str = "com.example.GenericTest";
const GENERIC_TEST_SIGNATURE: &str = "Ljava/lang/Object;Lcom/github/harbby/gadtry/function/Function1<Ljava/util/Map<Ljava/lang/String;Ljava/lang/Integer;>;Ljava/lang/String;>;Ljava/util/concurrent/Callable<Ljava/lang/Double;>;";

fn string() -> Type {
    Type::class("java.lang.String")
}

fn provider() -> InMemorySignatureProvider {
    InMemorySignatureProvider::new()
        .with_type(GENERIC_TEST, Some(GENERIC_TEST_SIGNATURE))
        .with_type("com.example.Plain", None)
        .with_type("com.example.Broken", Some("Ljava/lang/Object"))
}

#[test]
fn bindings_follow_declaration_order() {
    let binding = resolve_generic_bindings(&provider(), GENERIC_TEST).unwrap();

    assert_eq!(binding.len(), 3);
    assert_eq!(
        binding.keys().collect::<Vec<_>>(),
        vec!["java.lang.Object", FUNCTION1, "java.util.concurrent.Callable"]
    );
    assert_eq!(binding.get("java.lang.Object"), Some(&[][..]));
    assert_eq!(
        binding.get(FUNCTION1).unwrap(),
        &[
            make_map_type(string(), Type::class("java.lang.Integer")).unwrap(),
            string(),
        ][..]
    );
    assert_eq!(
        binding.get("java.util.concurrent.Callable").unwrap(),
        &[Type::class("java.lang.Double")][..]
    );
}

#[test]
fn resolved_type_arguments_are_positional() {
    let supertypes = resolved_type_arguments(&provider(), GENERIC_TEST).unwrap();
    let types = supertypes.to_vec();

    assert_eq!(types.len(), 3);
    assert_eq!(types[0], Type::class("java.lang.Object"));
    assert_eq!(
        types[1],
        make_parameterized(
            ConcreteType::class(FUNCTION1),
            vec![
                make_map_type(string(), Type::class("java.lang.Integer")).unwrap(),
                string(),
            ],
            None,
        )
        .unwrap()
    );
    assert_eq!(
        types[2].to_string(),
        "java.util.concurrent.Callable<java.lang.Double>"
    );
}

#[test]
fn type_without_signature_has_empty_binding() {
    let binding = resolve_generic_bindings(&provider(), "com.example.Plain").unwrap();
    assert!(binding.is_empty());
    assert_eq!(binding, GenericBinding::default());

    let supertypes = resolved_type_arguments(&provider(), "com.example.Plain").unwrap();
    assert!(supertypes.is_empty());
}

#[test]
fn each_call_returns_an_independent_binding() {
    let provider = provider();
    let first = resolve_generic_bindings(&provider, GENERIC_TEST).unwrap();
    let second = resolve_generic_bindings(&provider, GENERIC_TEST).unwrap();
    assert_eq!(first, second);

    let mut consumed = first.into_iter();
    assert_eq!(consumed.next().map(|(name, _)| name).as_deref(), Some("java.lang.Object"));
    assert_eq!(second.len(), 3);
}

#[test]
fn unknown_type_is_a_resolution_error() {
    let err = resolve_generic_bindings(&provider(), "com.example.Missing").unwrap_err();
    let ResolveError::SignatureResolution { type_name, source } = &err;
    assert_eq!(type_name, "com.example.Missing");
    assert!(matches!(
        source,
        SignatureSourceError::Provider(ProviderError::UnknownType(name)) if name == "com.example.Missing"
    ));
    assert_eq!(
        err.to_string(),
        "failed to resolve generic signature of com.example.Missing"
    );
    assert!(err.source().is_some());
}

#[test]
fn malformed_signature_is_a_resolution_error() {
    let err = resolve_generic_bindings(&provider(), "com.example.Broken").unwrap_err();
    let ResolveError::SignatureResolution { type_name, source } = err;
    assert_eq!(type_name, "com.example.Broken");
    assert!(matches!(source, SignatureSourceError::Parse(_)));
}

#[test]
fn nested_supertypes_are_keyed_by_binary_name() {
    let provider = InMemorySignatureProvider::new().with_type(
        "com.example.Handler",
        Some("Ljava/lang/Object;Lcom/example/Outer<Ljava/lang/String;>.Callback<+Ljava/lang/Number;>;"),
    );
    let binding = resolve_generic_bindings(&provider, "com.example.Handler").unwrap();
    assert_eq!(
        binding.get("com.example.Outer$Callback").unwrap(),
        &[Type::Wildcard(WildcardBound::Extends(Box::new(Type::class(
            "java.lang.Number"
        ))))][..]
    );

    let supertypes = resolved_type_arguments(&provider, "com.example.Handler").unwrap();
    assert_eq!(
        supertypes.interfaces[0].to_string(),
        "com.example.Outer<java.lang.String>$Callback<? extends java.lang.Number>"
    );
}

#[test]
fn class_file_provider_reads_signature_attributes() {
    let generic = ClassFileBuilder::new("com/example/GenericTest")
        .interface("com/github/harbby/gadtry/function/Function1")
        .interface("java/util/concurrent/Callable")
        .signature(GENERIC_TEST_SIGNATURE)
        .build();
    let plain = ClassFileBuilder::new("com/example/Plain").build();

    let mut provider = ClassFileSignatureProvider::new();
    assert_eq!(provider.add_class_bytes(&generic).unwrap(), GENERIC_TEST);
    assert_eq!(provider.add_class_bytes(&plain).unwrap(), "com.example.Plain");
    assert_eq!(provider.len(), 2);

    let binding = resolve_generic_bindings(&provider, GENERIC_TEST).unwrap();
    assert_eq!(binding, resolve_generic_bindings(&self::provider(), GENERIC_TEST).unwrap());
    assert!(resolve_generic_bindings(&provider, "com.example.Plain")
        .unwrap()
        .is_empty());
}

#[test]
fn class_file_provider_rejects_garbage() {
    let mut provider = ClassFileSignatureProvider::new();
    let err = provider.add_class_bytes(&[0xCA, 0xFE]).unwrap_err();
    assert!(matches!(err, ProviderError::ClassFile(_)));
    assert!(provider.is_empty());
}

#[test]
fn generic_superclass_arguments_are_bound() {
    let provider = InMemorySignatureProvider::new().with_type(
        "com.example.Rows",
        Some("Ljava/util/AbstractList<Ljava/lang/String;>;Ljava/lang/Comparable<Lcom/example/Rows;>;Ljava/util/function/Supplier<[I>;"),
    );
    let binding = resolve_generic_bindings(&provider, "com.example.Rows").unwrap();

    let entries: Vec<(String, Vec<Type>)> = binding.into_iter().collect();
    assert_eq!(
        entries,
        vec![
            ("java.util.AbstractList".to_string(), vec![string()]),
            (
                "java.lang.Comparable".to_string(),
                vec![Type::class("com.example.Rows")]
            ),
            (
                "java.util.function.Supplier".to_string(),
                vec![Type::Concrete(ConcreteType::array_of(ConcreteType::Primitive(
                    PrimitiveKind::Int
                )))]
            ),
        ]
    );

    let supertypes = resolved_type_arguments(&provider, "com.example.Rows").unwrap();
    assert_eq!(
        supertypes.super_class.map(|ty| ty.to_string()).as_deref(),
        Some("java.util.AbstractList<java.lang.String>")
    );
}

#[test]
fn deeply_nested_signature_is_a_resolution_error() {
    let signature = format!(
        "Ljava/lang/Object;Ljava/util/List<{}I>;",
        "[".repeat(60_000)
    );
    let provider =
        InMemorySignatureProvider::new().with_type("com.example.Deep", Some(&signature));

    let err = resolve_generic_bindings(&provider, "com.example.Deep").unwrap_err();
    let ResolveError::SignatureResolution { type_name, source } = err;
    assert_eq!(type_name, "com.example.Deep");
    assert!(matches!(source, SignatureSourceError::Parse(_)));

    assert!(resolved_type_arguments(&provider, "com.example.Deep").is_err());
}
