use std::fmt;

use crate::cursor::Cursor;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BaseType {
    Byte,
    Char,
    Double,
    Float,
    Int,
    Long,
    Short,
    Boolean,
}

impl BaseType {
    pub fn from_descriptor_char(ch: char) -> Option<Self> {
        Some(match ch {
            'B' => BaseType::Byte,
            'C' => BaseType::Char,
            'D' => BaseType::Double,
            'F' => BaseType::Float,
            'I' => BaseType::Int,
            'J' => BaseType::Long,
            'S' => BaseType::Short,
            'Z' => BaseType::Boolean,
            _ => return None,
        })
    }

    pub fn keyword(self) -> &'static str {
        match self {
            BaseType::Byte => "byte",
            BaseType::Char => "char",
            BaseType::Double => "double",
            BaseType::Float => "float",
            BaseType::Int => "int",
            BaseType::Long => "long",
            BaseType::Short => "short",
            BaseType::Boolean => "boolean",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FieldType {
    Base(BaseType),
    /// Internal name, e.g. `java/lang/String`.
    Object(String),
    Array(Box<FieldType>),
}

/// Java source spelling: `int`, `java.lang.String`, `java.util.List[]`.
impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldType::Base(base) => f.write_str(base.keyword()),
            FieldType::Object(internal) => f.write_str(&internal.replace('/', ".")),
            FieldType::Array(component) => write!(f, "{component}[]"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReturnType {
    Void,
    Type(FieldType),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodDescriptor {
    pub params: Vec<FieldType>,
    pub return_type: ReturnType,
}

pub fn parse_field_descriptor(desc: &str) -> Result<FieldType> {
    let invalid = || Error::InvalidDescriptor(desc.to_string());
    let mut cursor = Cursor::new(desc);
    let ty = field_type(&mut cursor).ok_or_else(invalid)?;
    if !cursor.is_at_end() {
        return Err(invalid());
    }
    Ok(ty)
}

pub fn parse_method_descriptor(desc: &str) -> Result<MethodDescriptor> {
    let invalid = || Error::InvalidDescriptor(desc.to_string());
    let mut cursor = Cursor::new(desc);
    if !cursor.eat('(') {
        return Err(invalid());
    }

    let mut params = Vec::new();
    while !cursor.eat(')') {
        params.push(field_type(&mut cursor).ok_or_else(invalid)?);
    }

    let return_type = if cursor.eat('V') {
        ReturnType::Void
    } else {
        ReturnType::Type(field_type(&mut cursor).ok_or_else(invalid)?)
    };

    if !cursor.is_at_end() {
        return Err(invalid());
    }
    Ok(MethodDescriptor {
        params,
        return_type,
    })
}

fn field_type(cursor: &mut Cursor<'_>) -> Option<FieldType> {
    match cursor.bump()? {
        'L' => {
            let name = cursor.take_until(&[';']);
            if name.is_empty() || !cursor.eat(';') {
                return None;
            }
            Some(FieldType::Object(name.to_string()))
        }
        '[' => Some(FieldType::Array(Box::new(field_type(cursor)?))),
        ch => BaseType::from_descriptor_char(ch).map(FieldType::Base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_field_descriptor_primitives_and_arrays() {
        assert_eq!(parse_field_descriptor("Z").unwrap(), FieldType::Base(BaseType::Boolean));
        assert_eq!(
            parse_field_descriptor("[[Ljava/util/List;").unwrap(),
            FieldType::Array(Box::new(FieldType::Array(Box::new(FieldType::Object(
                "java/util/List".to_string()
            )))))
        );
    }

    #[test]
    fn parse_method_descriptor_with_void_and_object_returns() {
        let desc = parse_method_descriptor("(J[I)V").unwrap();
        assert_eq!(
            desc.params,
            vec![
                FieldType::Base(BaseType::Long),
                FieldType::Array(Box::new(FieldType::Base(BaseType::Int))),
            ]
        );
        assert_eq!(desc.return_type, ReturnType::Void);

        let desc = parse_method_descriptor("()Ljava/lang/Boolean;").unwrap();
        assert_eq!(
            desc.return_type,
            ReturnType::Type(FieldType::Object("java/lang/Boolean".to_string()))
        );
    }

    #[test]
    fn rejects_trailing_input_and_unterminated_objects() {
        assert!(parse_field_descriptor("II").is_err());
        assert!(parse_field_descriptor("Ljava/lang/String").is_err());
        assert!(parse_method_descriptor("(I").is_err());
        assert!(parse_method_descriptor("()").is_err());
    }

    #[test]
    fn display_uses_source_spelling() {
        let ty = parse_field_descriptor("[Ljava/util/Map$Entry;").unwrap();
        assert_eq!(ty.to_string(), "java.util.Map$Entry[]");
    }
}
