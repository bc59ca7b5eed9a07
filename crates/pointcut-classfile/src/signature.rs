//! Parser for the generic signature grammar of JVMS §4.7.9.1.
//!
//! Only class and field (reference type) signatures are needed to recover the
//! type arguments a class binds for its supertypes.

use crate::cursor::Cursor;
use crate::descriptor::BaseType;
use crate::error::{Error, Result};
use crate::MAX_NESTING_DEPTH;

/// `Signature` attribute of a class: formal type parameters plus the
/// parameterized superclass and superinterfaces, in declaration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassSignature {
    pub type_parameters: Vec<TypeParameter>,
    pub super_class: ClassTypeSignature,
    pub interfaces: Vec<ClassTypeSignature>,
}

impl ClassSignature {
    /// Superclass first, then interfaces in declaration order.
    pub fn supertypes(&self) -> impl Iterator<Item = &ClassTypeSignature> {
        std::iter::once(&self.super_class).chain(&self.interfaces)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeParameter {
    pub name: String,
    pub class_bound: Option<TypeSignature>,
    pub interface_bounds: Vec<TypeSignature>,
}

/// `Lpkg/Outer<..>.Inner<..>;` split into its package and one segment per
/// (possibly nested) class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassTypeSignature {
    pub package: Vec<String>,
    pub segments: Vec<SimpleClassTypeSignature>,
}

impl ClassTypeSignature {
    /// `java/util/Map$Entry`
    pub fn internal_name(&self) -> String {
        self.joined_name('/')
    }

    /// `java.util.Map$Entry`
    pub fn binary_name(&self) -> String {
        self.joined_name('.')
    }

    /// The innermost segment, which carries the type arguments of the named class itself.
    pub fn last_segment(&self) -> Option<&SimpleClassTypeSignature> {
        self.segments.last()
    }

    fn joined_name(&self, package_separator: char) -> String {
        let mut out = String::new();
        for part in &self.package {
            out.push_str(part);
            out.push(package_separator);
        }
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                out.push('$');
            }
            out.push_str(&segment.name);
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimpleClassTypeSignature {
    pub name: String,
    pub type_arguments: Vec<TypeArgument>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeArgument {
    /// `*`
    Any,
    Exact(TypeSignature),
    /// `+T`
    Extends(TypeSignature),
    /// `-T`
    Super(TypeSignature),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeSignature {
    Base(BaseType),
    Array(Box<TypeSignature>),
    Class(ClassTypeSignature),
    TypeVariable(String),
}

pub fn parse_class_signature(signature: &str) -> Result<ClassSignature> {
    let mut parser = SignatureParser::new(signature);
    let parsed = parser.class_signature()?;
    parser.finish()?;
    Ok(parsed)
}

/// Parse a field signature (a reference type signature).
pub fn parse_field_signature(signature: &str) -> Result<TypeSignature> {
    let mut parser = SignatureParser::new(signature);
    let parsed = parser.reference_type()?;
    parser.finish()?;
    Ok(parsed)
}

const IDENTIFIER_STOPS: &[char] = &['.', ';', '[', '/', '<', '>', ':'];

struct SignatureParser<'a> {
    input: &'a str,
    cursor: Cursor<'a>,
    /// Reference types currently open (array components and type arguments).
    depth: usize,
}

impl<'a> SignatureParser<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            input,
            cursor: Cursor::new(input),
            depth: 0,
        }
    }

    fn error(&self) -> Error {
        Error::InvalidSignature(self.input.to_string())
    }

    fn expect(&mut self, ch: char) -> Result<()> {
        if self.cursor.eat(ch) {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn finish(&self) -> Result<()> {
        if self.cursor.is_at_end() {
            Ok(())
        } else {
            Err(self.error())
        }
    }

    fn identifier(&mut self) -> Result<&'a str> {
        let ident = self.cursor.take_until(IDENTIFIER_STOPS);
        if ident.is_empty() {
            return Err(self.error());
        }
        Ok(ident)
    }

    fn class_signature(&mut self) -> Result<ClassSignature> {
        let mut type_parameters = Vec::new();
        if self.cursor.eat('<') {
            while !self.cursor.eat('>') {
                type_parameters.push(self.type_parameter()?);
            }
            if type_parameters.is_empty() {
                return Err(self.error());
            }
        }

        let super_class = self.class_type()?;
        let mut interfaces = Vec::new();
        while !self.cursor.is_at_end() {
            interfaces.push(self.class_type()?);
        }

        Ok(ClassSignature {
            type_parameters,
            super_class,
            interfaces,
        })
    }

    fn type_parameter(&mut self) -> Result<TypeParameter> {
        let name = self.identifier()?.to_string();
        self.expect(':')?;
        // An empty class bound (`T::Ljava/lang/Comparable;`) means interface bounds only.
        let class_bound = match self.cursor.peek() {
            Some('L' | 'T' | '[') => Some(self.reference_type()?),
            _ => None,
        };
        let mut interface_bounds = Vec::new();
        while self.cursor.eat(':') {
            interface_bounds.push(self.reference_type()?);
        }
        Ok(TypeParameter {
            name,
            class_bound,
            interface_bounds,
        })
    }

    fn reference_type(&mut self) -> Result<TypeSignature> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error());
        }
        self.depth += 1;
        let parsed = self.reference_type_inner();
        self.depth -= 1;
        parsed
    }

    fn reference_type_inner(&mut self) -> Result<TypeSignature> {
        match self.cursor.peek() {
            Some('L') => Ok(TypeSignature::Class(self.class_type()?)),
            Some('T') => {
                self.cursor.bump();
                let name = self.identifier()?.to_string();
                self.expect(';')?;
                Ok(TypeSignature::TypeVariable(name))
            }
            Some('[') => {
                self.cursor.bump();
                Ok(TypeSignature::Array(Box::new(self.java_type()?)))
            }
            _ => Err(self.error()),
        }
    }

    fn java_type(&mut self) -> Result<TypeSignature> {
        if let Some(base) = self.cursor.peek().and_then(BaseType::from_descriptor_char) {
            self.cursor.bump();
            return Ok(TypeSignature::Base(base));
        }
        self.reference_type()
    }

    fn class_type(&mut self) -> Result<ClassTypeSignature> {
        self.expect('L')?;
        let mut package = Vec::new();
        let mut name = self.identifier()?;
        while self.cursor.eat('/') {
            package.push(name.to_string());
            name = self.identifier()?;
        }

        let mut segments = vec![self.simple_class_type(name)?];
        while self.cursor.eat('.') {
            let name = self.identifier()?;
            segments.push(self.simple_class_type(name)?);
        }
        self.expect(';')?;

        Ok(ClassTypeSignature { package, segments })
    }

    fn simple_class_type(&mut self, name: &str) -> Result<SimpleClassTypeSignature> {
        let mut type_arguments = Vec::new();
        if self.cursor.eat('<') {
            while !self.cursor.eat('>') {
                type_arguments.push(self.type_argument()?);
            }
            if type_arguments.is_empty() {
                return Err(self.error());
            }
        }
        Ok(SimpleClassTypeSignature {
            name: name.to_string(),
            type_arguments,
        })
    }

    fn type_argument(&mut self) -> Result<TypeArgument> {
        match self.cursor.peek() {
            Some('*') => {
                self.cursor.bump();
                Ok(TypeArgument::Any)
            }
            Some('+') => {
                self.cursor.bump();
                Ok(TypeArgument::Extends(self.reference_type()?))
            }
            Some('-') => {
                self.cursor.bump();
                Ok(TypeArgument::Super(self.reference_type()?))
            }
            _ => Ok(TypeArgument::Exact(self.reference_type()?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn class(package: &[&str], name: &str, args: Vec<TypeArgument>) -> ClassTypeSignature {
        ClassTypeSignature {
            package: package.iter().map(|p| p.to_string()).collect(),
            segments: vec![SimpleClassTypeSignature {
                name: name.to_string(),
                type_arguments: args,
            }],
        }
    }

    #[test]
    fn parses_superclass_and_interfaces_in_order() {
        let sig = parse_class_signature(
            "Ljava/lang/Object;Lcom/example/Function1<Ljava/util/Map<Ljava/lang/String;Ljava/lang/Integer;>;Ljava/lang/String;>;Ljava/util/concurrent/Callable<Ljava/lang/Double;>;",
        )
        .unwrap();

        assert!(sig.type_parameters.is_empty());
        assert_eq!(sig.super_class, class(&["java", "lang"], "Object", vec![]));
        assert_eq!(sig.interfaces.len(), 2);

        let function = &sig.interfaces[0];
        assert_eq!(function.binary_name(), "com.example.Function1");
        let args = &function.last_segment().unwrap().type_arguments;
        assert_eq!(
            args[0],
            TypeArgument::Exact(TypeSignature::Class(class(
                &["java", "util"],
                "Map",
                vec![
                    TypeArgument::Exact(TypeSignature::Class(class(
                        &["java", "lang"],
                        "String",
                        vec![]
                    ))),
                    TypeArgument::Exact(TypeSignature::Class(class(
                        &["java", "lang"],
                        "Integer",
                        vec![]
                    ))),
                ]
            )))
        );

        assert_eq!(
            sig.interfaces[1].internal_name(),
            "java/util/concurrent/Callable"
        );
        let names: Vec<_> = sig.supertypes().map(|s| s.binary_name()).collect();
        assert_eq!(
            names,
            vec![
                "java.lang.Object",
                "com.example.Function1",
                "java.util.concurrent.Callable"
            ]
        );
    }

    #[test]
    fn parses_type_parameters_with_interface_only_bounds() {
        let sig = parse_class_signature(
            "<K::Ljava/lang/Comparable<TK;>;V:Ljava/lang/Object;>Ljava/util/AbstractMap<TK;TV;>;",
        )
        .unwrap();

        assert_eq!(sig.type_parameters.len(), 2);
        let k = &sig.type_parameters[0];
        assert_eq!(k.name, "K");
        assert_eq!(k.class_bound, None);
        assert_eq!(k.interface_bounds.len(), 1);

        let args = &sig.super_class.last_segment().unwrap().type_arguments;
        assert_eq!(
            args,
            &vec![
                TypeArgument::Exact(TypeSignature::TypeVariable("K".to_string())),
                TypeArgument::Exact(TypeSignature::TypeVariable("V".to_string())),
            ]
        );
    }

    #[test]
    fn parses_nested_segments_wildcards_and_arrays() {
        let ty = parse_field_signature("Lcom/example/Outer<[I>.Inner<*+[Ljava/lang/Number;>;")
            .unwrap();
        let TypeSignature::Class(cls) = ty else {
            panic!("expected class type signature");
        };
        assert_eq!(cls.binary_name(), "com.example.Outer$Inner");
        assert_eq!(
            cls.segments[0].type_arguments,
            vec![TypeArgument::Exact(TypeSignature::Array(Box::new(
                TypeSignature::Base(BaseType::Int)
            )))]
        );
        assert_eq!(cls.segments[1].type_arguments[0], TypeArgument::Any);
        assert!(matches!(
            cls.segments[1].type_arguments[1],
            TypeArgument::Extends(TypeSignature::Array(_))
        ));
    }

    #[test]
    fn nesting_is_capped() {
        let at_limit = format!("{}I", "[".repeat(MAX_NESTING_DEPTH - 1));
        assert!(parse_field_signature(&at_limit).is_ok());

        let arrays = format!("{}I", "[".repeat(60_000));
        assert_eq!(
            parse_field_signature(&arrays),
            Err(Error::InvalidSignature(arrays.clone()))
        );

        let mut generics = String::from("Ljava/lang/Object;");
        for _ in 0..10_000 {
            generics.push_str("Ljava/util/List<");
        }
        generics.push_str("Ljava/lang/String;");
        for _ in 0..10_000 {
            generics.push_str(">;");
        }
        assert!(matches!(
            parse_class_signature(&generics),
            Err(Error::InvalidSignature(_))
        ));
    }

    #[test]
    fn rejects_malformed_signatures() {
        for input in [
            "",
            "Ljava/lang/Object",
            "<>Ljava/lang/Object;",
            "Ljava/util/List<>;",
            "Ljava/lang/Object;I",
        ] {
            assert_eq!(
                parse_class_signature(input),
                Err(Error::InvalidSignature(input.to_string())),
                "{input}"
            );
        }
        assert!(parse_field_signature("I").is_err());
    }
}
