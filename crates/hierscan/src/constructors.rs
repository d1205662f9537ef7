//! Constructor signature reconstruction

use hierscan_api::{ConstructorSignature, DeclKind, DeclarationNode, ParameterDescriptor};
use log::warn;

/// Signatures of a class's declared constructors, in declaration order
pub fn constructors_of<N: DeclarationNode>(class: &N) -> Vec<ConstructorSignature> {
    class
        .children()
        .iter()
        .filter(|c| c.kind() == DeclKind::Constructor)
        .map(|ctor| {
            let arguments = ctor
                .parameters()
                .iter()
                .map(|param| parameter_descriptor(class, param))
                .collect();
            ConstructorSignature::new(arguments)
        })
        .collect()
}

/// Type text is every token of the parameter span except the name itself
fn parameter_descriptor<N: DeclarationNode>(class: &N, param: &N) -> ParameterDescriptor {
    let name = param.display_name();
    let type_tokens: Vec<&str> = param
        .tokens()
        .iter()
        .map(String::as_str)
        .filter(|t| *t != name)
        .collect();

    if !name.is_empty() && param.tokens().iter().filter(|t| *t == name).count() > 1 {
        warn!(
            "{}: parameter '{}' shares a token with its type; type reconstructed as '{}'",
            class.display_name(),
            name,
            type_tokens.join(" ")
        );
    }

    ParameterDescriptor::new(type_tokens.join(" "), name)
}
