use pointcut_classfile::{parse_method_descriptor, ClassFile, ClassMember};
use pointcut_types::ConcreteType;

/// What a method filter needs to know about a candidate method.
pub trait MethodInfo {
    fn name(&self) -> &str;

    /// Erased return type; `void` methods report the `void` primitive.
    fn return_type(&self) -> &ConcreteType;

    /// Whether the method carries an annotation with the given binary name.
    fn has_annotation(&self, binary_name: &str) -> bool;

    /// Whether the return type can be assigned to `target`.
    ///
    /// The default needs no class hierarchy; hosts with one should override it.
    fn return_type_assignable_to(&self, target: &ConcreteType) -> bool {
        target.is_assignable_from(self.return_type())
    }
}

/// A method read from a compiled class file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodStub {
    pub name: String,
    pub descriptor: String,
    pub access_flags: u16,
    pub return_type: ConcreteType,
    /// Binary names of visible and invisible annotations.
    pub annotations: Vec<String>,
}

impl MethodStub {
    pub fn new(name: impl Into<String>, return_type: ConcreteType) -> Self {
        Self {
            name: name.into(),
            descriptor: String::new(),
            access_flags: 0,
            return_type,
            annotations: Vec::new(),
        }
    }

    pub fn with_annotation(mut self, binary_name: impl Into<String>) -> Self {
        self.annotations.push(binary_name.into());
        self
    }

    pub fn from_member(member: &ClassMember) -> pointcut_classfile::Result<Self> {
        let descriptor = parse_method_descriptor(&member.descriptor)?;
        Ok(Self {
            name: member.name.clone(),
            descriptor: member.descriptor.clone(),
            access_flags: member.access_flags,
            return_type: ConcreteType::from(&descriptor.return_type),
            annotations: member
                .annotations()
                .filter_map(|annotation| annotation.binary_name())
                .collect(),
        })
    }

    /// Declared methods, minus constructors, static initializers and compiler-generated bridges.
    pub fn from_class_file(class: &ClassFile) -> pointcut_classfile::Result<Vec<Self>> {
        class
            .methods
            .iter()
            .filter(|method| !matches!(method.name.as_str(), "<init>" | "<clinit>"))
            .filter(|method| !method.is_compiler_generated())
            .map(Self::from_member)
            .collect()
    }
}

impl MethodInfo for MethodStub {
    fn name(&self) -> &str {
        &self.name
    }

    fn return_type(&self) -> &ConcreteType {
        &self.return_type
    }

    fn has_annotation(&self, binary_name: &str) -> bool {
        self.annotations.iter().any(|name| name == binary_name)
    }
}
