use crate::constant_pool::{ConstantPool, CpInfo};
use crate::error::{Error, Result};
use crate::reader::Reader;
use crate::MAX_NESTING_DEPTH;

const ATTRIBUTE: &str = "RuntimeVisibleAnnotations";

#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Field descriptor of the annotation interface, e.g. `Lcom/example/Traced;`.
    pub type_descriptor: String,
    pub elements: Vec<(String, ElementValue)>,
}

impl Annotation {
    /// Binary name of the annotation interface (`com.example.Traced`).
    pub fn binary_name(&self) -> Option<String> {
        descriptor_to_internal_name(&self.type_descriptor).map(|name| name.replace('/', "."))
    }

    pub(crate) fn parse_all(reader: &mut Reader<'_>, cp: &ConstantPool) -> Result<Vec<Self>> {
        let count = reader.read_u2()? as usize;
        (0..count).map(|_| Self::parse(reader, cp, 0)).collect()
    }

    fn parse(reader: &mut Reader<'_>, cp: &ConstantPool, depth: usize) -> Result<Self> {
        let type_descriptor = cp.get_utf8(reader.read_u2()?)?.to_string();
        let pairs = reader.read_u2()? as usize;
        let mut elements = Vec::with_capacity(pairs);
        for _ in 0..pairs {
            let name = cp.get_utf8(reader.read_u2()?)?.to_string();
            elements.push((name, ElementValue::parse(reader, cp, depth)?));
        }
        Ok(Self {
            type_descriptor,
            elements,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElementValue {
    Const(ConstValue),
    Enum {
        type_descriptor: String,
        const_name: String,
    },
    Class(String),
    Annotation(Box<Annotation>),
    Array(Vec<ElementValue>),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConstValue {
    Byte(i8),
    Char(char),
    Short(i16),
    Int(i32),
    Long(i64),
    Float(f32),
    Double(f64),
    Boolean(bool),
    String(String),
}

impl ElementValue {
    /// `depth` counts the enclosing nested annotations and arrays.
    fn parse(reader: &mut Reader<'_>, cp: &ConstantPool, depth: usize) -> Result<Self> {
        if depth >= MAX_NESTING_DEPTH {
            return Err(Error::MalformedAttribute(ATTRIBUTE));
        }
        let tag = reader.read_u1()?;
        let value = match tag {
            b'B' | b'C' | b'I' | b'S' | b'Z' | b'D' | b'F' | b'J' => {
                let index = reader.read_u2()?;
                ElementValue::Const(const_value(tag, index, cp.get(index)?)?)
            }
            b's' => ElementValue::Const(ConstValue::String(
                cp.get_string_constant(reader.read_u2()?)?,
            )),
            b'e' => ElementValue::Enum {
                type_descriptor: cp.get_utf8(reader.read_u2()?)?.to_string(),
                const_name: cp.get_utf8(reader.read_u2()?)?.to_string(),
            },
            b'c' => ElementValue::Class(cp.get_utf8(reader.read_u2()?)?.to_string()),
            b'@' => {
                let nested = Annotation::parse(reader, cp, depth + 1)?;
                ElementValue::Annotation(Box::new(nested))
            }
            b'[' => {
                let count = reader.read_u2()? as usize;
                let values = (0..count)
                    .map(|_| ElementValue::parse(reader, cp, depth + 1))
                    .collect::<Result<Vec<_>>>()?;
                ElementValue::Array(values)
            }
            _ => return Err(Error::MalformedAttribute(ATTRIBUTE)),
        };
        Ok(value)
    }
}

fn const_value(tag: u8, index: u16, entry: &CpInfo) -> Result<ConstValue> {
    let value = match (tag, entry) {
        (b'B', CpInfo::Integer(v)) => ConstValue::Byte(*v as i8),
        (b'S', CpInfo::Integer(v)) => ConstValue::Short(*v as i16),
        (b'I', CpInfo::Integer(v)) => ConstValue::Int(*v),
        (b'Z', CpInfo::Integer(v)) => ConstValue::Boolean(*v != 0),
        (b'C', CpInfo::Integer(v)) => ConstValue::Char(
            char::from_u32(*v as u32).ok_or(Error::MalformedAttribute(ATTRIBUTE))?,
        ),
        (b'J', CpInfo::Long(v)) => ConstValue::Long(*v),
        (b'F', CpInfo::Float(v)) => ConstValue::Float(*v),
        (b'D', CpInfo::Double(v)) => ConstValue::Double(*v),
        (_, other) => {
            let expected = match tag {
                b'J' => "Long",
                b'F' => "Float",
                b'D' => "Double",
                _ => "Integer",
            };
            return Err(Error::ConstantPoolTypeMismatch {
                index,
                expected,
                found: other.kind(),
            });
        }
    };
    Ok(value)
}

pub fn descriptor_to_internal_name(desc: &str) -> Option<&str> {
    desc.strip_prefix('L').and_then(|rest| rest.strip_suffix(';'))
}
