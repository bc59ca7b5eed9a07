#![no_main]

use libfuzzer_sys::fuzz_target;
use pointcut_aop::{MethodInfo, MethodStub};
use pointcut_classfile::ClassFile;
use pointcut_types::{resolve_generic_bindings, ClassFileSignatureProvider};

/// Inputs are cut to this many bytes before parsing.
const MAX_CLASS_LEN: usize = 1 << 20;

fuzz_target!(|data: &[u8]| {
    let bytes = &data[..data.len().min(MAX_CLASS_LEN)];
    let Ok(class) = ClassFile::parse(bytes) else {
        return;
    };

    // Stubs come from declared methods only, never constructors or bridges.
    if let Ok(stubs) = MethodStub::from_class_file(&class) {
        assert!(stubs.len() <= class.methods.len());
        for stub in &stubs {
            assert!(
                !matches!(stub.name(), "<init>" | "<clinit>"),
                "initializer {} became a stub",
                stub.name()
            );
        }
    }

    let mut provider = ClassFileSignatureProvider::new();
    let name = provider.add_class(&class);
    assert_eq!(name, class.binary_name());
    match resolve_generic_bindings(&provider, &name) {
        Ok(binding) => assert!(class.signature.is_some() || binding.is_empty()),
        Err(_) => assert!(class.signature.is_some(), "{name} failed without a signature"),
    }
});
