use std::collections::HashMap;

const ACC_PUBLIC: u16 = 0x0001;
const ACC_SUPER: u16 = 0x0020;

/// An annotation attached to a generated method or class.
#[derive(Debug, Clone)]
pub struct AnnotationSpec {
    /// Internal name of the annotation interface, e.g. `com/example/Traced`.
    pub internal_name: String,
    pub elements: Vec<(String, ElementSpec)>,
    pub visible: bool,
}

impl AnnotationSpec {
    pub fn visible(internal_name: &str) -> Self {
        Self {
            internal_name: internal_name.to_string(),
            elements: Vec::new(),
            visible: true,
        }
    }

    pub fn invisible(internal_name: &str) -> Self {
        Self {
            visible: false,
            ..Self::visible(internal_name)
        }
    }

    pub fn element(mut self, name: &str, value: ElementSpec) -> Self {
        self.elements.push((name.to_string(), value));
        self
    }
}

#[derive(Debug, Clone)]
pub enum ElementSpec {
    Int(i32),
    Str(String),
    Enum { type_descriptor: String, const_name: String },
    Array(Vec<ElementSpec>),
}

#[derive(Debug, Clone)]
struct MethodSpec {
    access_flags: u16,
    name: String,
    descriptor: String,
    annotations: Vec<AnnotationSpec>,
}

/// Builder for a minimal class file (major version 52, no fields, no code).
#[derive(Debug, Clone)]
pub struct ClassFileBuilder {
    access_flags: u16,
    this_class: String,
    super_class: Option<String>,
    interfaces: Vec<String>,
    signature: Option<String>,
    annotations: Vec<AnnotationSpec>,
    methods: Vec<MethodSpec>,
}

impl ClassFileBuilder {
    /// Public class `internal_name` extending `java/lang/Object`.
    pub fn new(internal_name: &str) -> Self {
        Self {
            access_flags: ACC_PUBLIC | ACC_SUPER,
            this_class: internal_name.to_string(),
            super_class: Some("java/lang/Object".to_string()),
            interfaces: Vec::new(),
            signature: None,
            annotations: Vec::new(),
            methods: Vec::new(),
        }
    }

    pub fn access_flags(mut self, flags: u16) -> Self {
        self.access_flags = flags;
        self
    }

    pub fn super_class(mut self, internal_name: Option<&str>) -> Self {
        self.super_class = internal_name.map(str::to_string);
        self
    }

    pub fn interface(mut self, internal_name: &str) -> Self {
        self.interfaces.push(internal_name.to_string());
        self
    }

    pub fn signature(mut self, signature: &str) -> Self {
        self.signature = Some(signature.to_string());
        self
    }

    pub fn annotation(mut self, annotation: AnnotationSpec) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn method(self, name: &str, descriptor: &str) -> Self {
        self.annotated_method(ACC_PUBLIC, name, descriptor, Vec::new())
    }

    pub fn annotated_method(
        mut self,
        access_flags: u16,
        name: &str,
        descriptor: &str,
        annotations: Vec<AnnotationSpec>,
    ) -> Self {
        self.methods.push(MethodSpec {
            access_flags,
            name: name.to_string(),
            descriptor: descriptor.to_string(),
            annotations,
        });
        self
    }

    pub fn build(&self) -> Vec<u8> {
        let mut pool = PoolWriter::default();
        let mut body = Vec::new();

        put_u2(&mut body, self.access_flags);
        put_u2(&mut body, pool.class(&self.this_class));
        let super_index = self.super_class.as_deref().map_or(0, |name| pool.class(name));
        put_u2(&mut body, super_index);

        put_u2(&mut body, self.interfaces.len() as u16);
        for iface in &self.interfaces {
            put_u2(&mut body, pool.class(iface));
        }

        // fields
        put_u2(&mut body, 0);

        put_u2(&mut body, self.methods.len() as u16);
        for method in &self.methods {
            put_u2(&mut body, method.access_flags);
            put_u2(&mut body, pool.utf8(&method.name));
            put_u2(&mut body, pool.utf8(&method.descriptor));
            write_attributes(&mut body, &mut pool, None, &method.annotations);
        }

        write_attributes(
            &mut body,
            &mut pool,
            self.signature.as_deref(),
            &self.annotations,
        );

        let mut out = Vec::new();
        out.extend_from_slice(&0xCAFE_BABEu32.to_be_bytes());
        put_u2(&mut out, 0);
        put_u2(&mut out, 52);
        put_u2(&mut out, pool.next_index);
        out.extend_from_slice(&pool.bytes);
        out.extend_from_slice(&body);
        out
    }
}

fn write_attributes(
    out: &mut Vec<u8>,
    pool: &mut PoolWriter,
    signature: Option<&str>,
    annotations: &[AnnotationSpec],
) {
    let visible: Vec<_> = annotations.iter().filter(|a| a.visible).collect();
    let invisible: Vec<_> = annotations.iter().filter(|a| !a.visible).collect();

    let mut attributes: Vec<(u16, Vec<u8>)> = Vec::new();
    if let Some(signature) = signature {
        let index = pool.utf8(signature);
        attributes.push((pool.utf8("Signature"), index.to_be_bytes().to_vec()));
    }
    for (name, group) in [
        ("RuntimeVisibleAnnotations", visible),
        ("RuntimeInvisibleAnnotations", invisible),
    ] {
        if group.is_empty() {
            continue;
        }
        let mut info = Vec::new();
        put_u2(&mut info, group.len() as u16);
        for annotation in group {
            write_annotation(&mut info, pool, annotation);
        }
        attributes.push((pool.utf8(name), info));
    }

    put_u2(out, attributes.len() as u16);
    for (name_index, info) in attributes {
        put_u2(out, name_index);
        out.extend_from_slice(&(info.len() as u32).to_be_bytes());
        out.extend_from_slice(&info);
    }
}

fn write_annotation(out: &mut Vec<u8>, pool: &mut PoolWriter, annotation: &AnnotationSpec) {
    put_u2(out, pool.utf8(&format!("L{};", annotation.internal_name)));
    put_u2(out, annotation.elements.len() as u16);
    for (name, value) in &annotation.elements {
        put_u2(out, pool.utf8(name));
        write_element(out, pool, value);
    }
}

fn write_element(out: &mut Vec<u8>, pool: &mut PoolWriter, value: &ElementSpec) {
    match value {
        ElementSpec::Int(v) => {
            out.push(b'I');
            put_u2(out, pool.integer(*v));
        }
        ElementSpec::Str(s) => {
            out.push(b's');
            put_u2(out, pool.utf8(s));
        }
        ElementSpec::Enum {
            type_descriptor,
            const_name,
        } => {
            out.push(b'e');
            put_u2(out, pool.utf8(type_descriptor));
            put_u2(out, pool.utf8(const_name));
        }
        ElementSpec::Array(values) => {
            out.push(b'[');
            put_u2(out, values.len() as u16);
            for value in values {
                write_element(out, pool, value);
            }
        }
    }
}

fn put_u2(out: &mut Vec<u8>, value: u16) {
    out.extend_from_slice(&value.to_be_bytes());
}

/// Deduplicating constant pool writer. Strings are written as plain UTF-8,
/// which matches modified UTF-8 for anything without NUL or supplementary chars.
struct PoolWriter {
    bytes: Vec<u8>,
    next_index: u16,
    utf8: HashMap<String, u16>,
    classes: HashMap<String, u16>,
    integers: HashMap<i32, u16>,
}

impl Default for PoolWriter {
    fn default() -> Self {
        Self {
            bytes: Vec::new(),
            next_index: 1,
            utf8: HashMap::new(),
            classes: HashMap::new(),
            integers: HashMap::new(),
        }
    }
}

impl PoolWriter {
    fn push(&mut self, entry: &[u8]) -> u16 {
        let index = self.next_index;
        self.bytes.extend_from_slice(entry);
        self.next_index += 1;
        index
    }

    fn utf8(&mut self, value: &str) -> u16 {
        if let Some(index) = self.utf8.get(value) {
            return *index;
        }
        let mut entry = vec![1];
        entry.extend_from_slice(&(value.len() as u16).to_be_bytes());
        entry.extend_from_slice(value.as_bytes());
        let index = self.push(&entry);
        self.utf8.insert(value.to_string(), index);
        index
    }

    fn class(&mut self, internal_name: &str) -> u16 {
        if let Some(index) = self.classes.get(internal_name) {
            return *index;
        }
        let name_index = self.utf8(internal_name);
        let mut entry = vec![7];
        entry.extend_from_slice(&name_index.to_be_bytes());
        let index = self.push(&entry);
        self.classes.insert(internal_name.to_string(), index);
        index
    }

    fn integer(&mut self, value: i32) -> u16 {
        if let Some(index) = self.integers.get(&value) {
            return *index;
        }
        let mut entry = vec![3];
        entry.extend_from_slice(&value.to_be_bytes());
        let index = self.push(&entry);
        self.integers.insert(value, index);
        index
    }
}
