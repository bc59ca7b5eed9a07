#![no_main]

use libfuzzer_sys::fuzz_target;
use pointcut_classfile::{parse_class_signature, parse_field_signature};
use pointcut_types::{
    resolve_generic_bindings, resolved_type_arguments, type_from_signature,
    InMemorySignatureProvider,
};

mod utils;

const TYPE_NAME: &str = "fuzz.Target";

fuzz_target!(|data: &[u8]| {
    let Some(text) = utils::signature_text(data) else {
        return;
    };

    if let Ok(signature) = parse_field_signature(text) {
        if let Ok(ty) = type_from_signature(&signature) {
            let _ = ty.to_string();
        }
    }

    let parsed = parse_class_signature(text);
    let provider = InMemorySignatureProvider::new().with_type(TYPE_NAME, Some(text));
    let bindings = resolve_generic_bindings(&provider, TYPE_NAME);
    let supertypes = resolved_type_arguments(&provider, TYPE_NAME);

    // Whatever the parser accepts, the resolver must accept too.
    if let Ok(signature) = parsed {
        let bindings = bindings.expect("parsed signature failed to resolve");
        let supertypes = supertypes.expect("parsed signature failed to convert");
        assert!(bindings.len() <= 1 + signature.interfaces.len());
        assert_eq!(supertypes.iter().count(), 1 + signature.interfaces.len());
    }
});
