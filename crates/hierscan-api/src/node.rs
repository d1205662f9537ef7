use serde::{Deserialize, Serialize};

/// Declaration kinds the hierarchy scan distinguishes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeclKind {
    ClassDecl,
    ClassTemplate,
    StructDecl,
    Constructor,
    BaseSpecifier,
    Parameter,
    Namespace,
    Other,
}

impl DeclKind {
    /// Kinds that can carry base specifiers and constructors
    pub const CLASS_LIKE: [DeclKind; 3] = [
        DeclKind::ClassDecl,
        DeclKind::ClassTemplate,
        DeclKind::StructDecl,
    ];

    pub fn is_class_like(self) -> bool {
        Self::CLASS_LIKE.contains(&self)
    }
}

/// Read-only view of one declaration produced by a front end
///
/// The hierarchy scan consumes nothing but this interface, so any C++ front
/// end that can answer these questions can be plugged in.
pub trait DeclarationNode: Sized {
    /// Kind tag of this declaration
    fn kind(&self) -> DeclKind;

    /// Rendered name; the identity key used for deduplication
    fn display_name(&self) -> &str;

    /// Whether the class cannot be instantiated. Only meaningful for
    /// class-like nodes; everything else reports `false`.
    fn is_abstract(&self) -> bool;

    /// Child declarations in source order
    fn children(&self) -> &[Self];

    /// Parameter declarations; empty for anything but constructors
    fn parameters(&self) -> &[Self];

    /// Raw token spellings covering this declaration's source span
    fn tokens(&self) -> &[String];
}
