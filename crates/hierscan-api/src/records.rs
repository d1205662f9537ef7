use serde::{Deserialize, Serialize};

/// One constructor parameter as the code generator sees it
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ParameterDescriptor {
    /// Reconstructed type text
    #[serde(rename = "type")]
    pub type_name: String,

    /// Declared identifier (empty for unnamed parameters)
    pub name: String,
}

impl ParameterDescriptor {
    pub fn new(type_name: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
        }
    }
}

/// Parameter list of one constructor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConstructorSignature {
    pub arguments: Vec<ParameterDescriptor>,
}

impl ConstructorSignature {
    pub fn new(arguments: Vec<ParameterDescriptor>) -> Self {
        Self { arguments }
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }
}

/// Description of a serializable class, one element of the emitted JSON array
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassRecord {
    /// Display name of the class
    pub class_name: String,

    /// Root class label supplied by the caller (may be empty)
    pub root_class: String,

    /// Immediate base names in declaration order
    #[serde(rename = "baseClass")]
    pub base_classes: Vec<String>,

    /// Explicitly declared constructors in declaration order
    pub constructors: Vec<ConstructorSignature>,
}

impl ClassRecord {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            root_class: String::new(),
            base_classes: Vec::new(),
            constructors: Vec::new(),
        }
    }

    pub fn with_root_class(mut self, root: impl Into<String>) -> Self {
        self.root_class = root.into();
        self
    }

    pub fn with_base_classes(mut self, bases: Vec<String>) -> Self {
        self.base_classes = bases;
        self
    }

    pub fn with_constructor(mut self, constructor: ConstructorSignature) -> Self {
        self.constructors.push(constructor);
        self
    }
}
