use crate::annotation::Annotation;
use crate::constant_pool::ConstantPool;
use crate::error::{Error, Result};
use crate::reader::Reader;

const MAGIC: u32 = 0xCAFE_BABE;

pub const ACC_PUBLIC: u16 = 0x0001;
pub const ACC_STATIC: u16 = 0x0008;
pub const ACC_BRIDGE: u16 = 0x0040;
pub const ACC_INTERFACE: u16 = 0x0200;
pub const ACC_SYNTHETIC: u16 = 0x1000;

/// The subset of a class file needed to select interception targets and to
/// recover generic supertype bindings.
#[derive(Debug, Clone)]
pub struct ClassFile {
    pub minor_version: u16,
    pub major_version: u16,
    pub access_flags: u16,
    /// Internal name, e.g. `com/example/Service`.
    pub this_class: String,
    pub super_class: Option<String>,
    pub interfaces: Vec<String>,
    pub fields: Vec<ClassMember>,
    pub methods: Vec<ClassMember>,
    /// Raw `Signature` attribute; absent for classes without generic supertypes or parameters.
    pub signature: Option<String>,
    pub runtime_visible_annotations: Vec<Annotation>,
    pub runtime_invisible_annotations: Vec<Annotation>,
}

#[derive(Debug, Clone)]
pub struct ClassMember {
    pub access_flags: u16,
    pub name: String,
    pub descriptor: String,
    pub signature: Option<String>,
    pub runtime_visible_annotations: Vec<Annotation>,
    pub runtime_invisible_annotations: Vec<Annotation>,
}

impl ClassMember {
    /// Visible and invisible annotations, in that order.
    pub fn annotations(&self) -> impl Iterator<Item = &Annotation> {
        self.runtime_visible_annotations
            .iter()
            .chain(&self.runtime_invisible_annotations)
    }

    pub fn is_static(&self) -> bool {
        self.access_flags & ACC_STATIC != 0
    }

    /// Bridge or synthetic member emitted by the compiler rather than declared in source.
    pub fn is_compiler_generated(&self) -> bool {
        self.access_flags & (ACC_BRIDGE | ACC_SYNTHETIC) != 0
    }
}

impl ClassFile {
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let mut reader = Reader::new(bytes);
        let magic = reader.read_u4()?;
        if magic != MAGIC {
            return Err(Error::InvalidMagic(magic));
        }

        let minor_version = reader.read_u2()?;
        let major_version = reader.read_u2()?;
        let cp = ConstantPool::parse(&mut reader)?;

        let access_flags = reader.read_u2()?;
        let this_class = cp.get_class_name(reader.read_u2()?)?;
        let super_class = match reader.read_u2()? {
            0 => None,
            index => Some(cp.get_class_name(index)?),
        };

        let interfaces = (0..reader.read_u2()?)
            .map(|_| cp.get_class_name(reader.read_u2()?))
            .collect::<Result<Vec<_>>>()?;
        let fields = (0..reader.read_u2()?)
            .map(|_| parse_member(&mut reader, &cp))
            .collect::<Result<Vec<_>>>()?;
        let methods = (0..reader.read_u2()?)
            .map(|_| parse_member(&mut reader, &cp))
            .collect::<Result<Vec<_>>>()?;

        let attrs = parse_attributes(&mut reader, &cp)?;
        if !reader.is_empty() {
            return Err(Error::MalformedAttribute("ClassFile"));
        }

        tracing::trace!(
            target = "pointcut.classfile",
            class = %this_class,
            methods = methods.len(),
            generic = attrs.signature.is_some(),
            "parsed class file"
        );

        Ok(Self {
            minor_version,
            major_version,
            access_flags,
            this_class,
            super_class,
            interfaces,
            fields,
            methods,
            signature: attrs.signature,
            runtime_visible_annotations: attrs.runtime_visible_annotations,
            runtime_invisible_annotations: attrs.runtime_invisible_annotations,
        })
    }

    /// Binary name (`com.example.Outer$Inner`) of this class.
    pub fn binary_name(&self) -> String {
        self.this_class.replace('/', ".")
    }

    pub fn is_interface(&self) -> bool {
        self.access_flags & ACC_INTERFACE != 0
    }
}

fn parse_member(reader: &mut Reader<'_>, cp: &ConstantPool) -> Result<ClassMember> {
    let access_flags = reader.read_u2()?;
    let name = cp.get_utf8(reader.read_u2()?)?.to_string();
    let descriptor = cp.get_utf8(reader.read_u2()?)?.to_string();
    let attrs = parse_attributes(reader, cp)?;

    Ok(ClassMember {
        access_flags,
        name,
        descriptor,
        signature: attrs.signature,
        runtime_visible_annotations: attrs.runtime_visible_annotations,
        runtime_invisible_annotations: attrs.runtime_invisible_annotations,
    })
}

#[derive(Default)]
struct ParsedAttributes {
    signature: Option<String>,
    runtime_visible_annotations: Vec<Annotation>,
    runtime_invisible_annotations: Vec<Annotation>,
}

fn parse_attributes(reader: &mut Reader<'_>, cp: &ConstantPool) -> Result<ParsedAttributes> {
    let count = reader.read_u2()?;
    let mut parsed = ParsedAttributes::default();
    for _ in 0..count {
        let name = cp.get_utf8(reader.read_u2()?)?;
        let length = reader.read_u4()? as usize;
        let mut sub = reader.sub_reader(length)?;

        let attribute: &'static str = match name {
            "Signature" => {
                parsed.signature = Some(cp.get_utf8(sub.read_u2()?)?.to_string());
                "Signature"
            }
            "RuntimeVisibleAnnotations" => {
                parsed
                    .runtime_visible_annotations
                    .extend(Annotation::parse_all(&mut sub, cp)?);
                "RuntimeVisibleAnnotations"
            }
            "RuntimeInvisibleAnnotations" => {
                parsed
                    .runtime_invisible_annotations
                    .extend(Annotation::parse_all(&mut sub, cp)?);
                "RuntimeInvisibleAnnotations"
            }
            _ => continue,
        };

        if !sub.is_empty() {
            return Err(Error::MalformedAttribute(attribute));
        }
    }
    Ok(parsed)
}
