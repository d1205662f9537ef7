//! AST visitor for building C++ declaration trees

use hierscan_api::{DeclKind, ParseOptions};
use tree_sitter::Node;

use crate::decl::CppDecl;
use crate::includes::IncludeDirective;

/// Node kinds whose whole text is one lexical token
const ATOMIC_KINDS: &[&str] = &[
    "string_literal",
    "raw_string_literal",
    "char_literal",
    "system_lib_string",
];

/// Node kinds that name a base class inside a base clause
const BASE_TYPE_KINDS: &[&str] = &[
    "type_identifier",
    "qualified_type_identifier",
    "qualified_identifier",
    "template_type",
    "dependent_type",
    "decltype",
];

/// Punctuation rendered without surrounding whitespace in type text
const TIGHT_PUNCT: &[char] = &['<', '>', ',', ':', '*', '&', '(', ')'];

pub struct CppVisitor<'a> {
    pub source: &'a [u8],
    pub decls: Vec<CppDecl>,
    pub includes: Vec<IncludeDirective>,
    skip_function_bodies: bool,
}

impl<'a> CppVisitor<'a> {
    pub fn new(source: &'a [u8], options: &ParseOptions) -> Self {
        Self {
            source,
            decls: Vec::new(),
            includes: Vec::new(),
            skip_function_bodies: options.skip_function_bodies,
        }
    }

    fn node_text(&self, node: Node) -> String {
        node.utf8_text(self.source).unwrap_or("").to_string()
    }

    /// Visit a translation unit root and collect its top-level declarations
    pub fn visit_node(&mut self, node: Node) {
        let mut decls = Vec::new();
        self.visit_scope(node, &mut decls, true);
        self.decls = decls;
    }

    fn visit_scope(&mut self, node: Node, out: &mut Vec<CppDecl>, top_level: bool) {
        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "class_specifier" => self.push_class(child, DeclKind::ClassDecl, None, out),
                "struct_specifier" => self.push_class(child, DeclKind::StructDecl, None, out),
                "template_declaration" => self.visit_template(child, out),
                "declaration" | "type_definition" => self.visit_declaration(child, out),
                "namespace_definition" => self.visit_namespace(child, out),
                "preproc_include" => {
                    if top_level {
                        self.visit_include(child, out.len());
                    }
                }
                "preproc_if" | "preproc_elif" if self.is_disabled(child) => {
                    if let Some(alt) = child.child_by_field_name("alternative") {
                        self.visit_scope(alt, out, top_level);
                    }
                }
                // Conditional blocks and error recovery are transparent
                "preproc_if" | "preproc_ifdef" | "preproc_else" | "preproc_elif"
                | "preproc_elifdef" | "ERROR" => self.visit_scope(child, out, top_level),
                _ => {}
            }
        }
    }

    fn visit_namespace(&mut self, node: Node, out: &mut Vec<CppDecl>) {
        let name = node
            .child_by_field_name("name")
            .map(|n| self.node_text(n))
            .unwrap_or_default();

        let mut namespace = CppDecl::new(DeclKind::Namespace, name);
        if let Some(body) = node.child_by_field_name("body") {
            let mut children = Vec::new();
            self.visit_scope(body, &mut children, false);
            namespace.children = children;
        }
        out.push(namespace);
    }

    fn visit_declaration(&mut self, node: Node, out: &mut Vec<CppDecl>) {
        // `class A { ... } a;` and `typedef struct X { ... } Y;`
        if let Some(ty) = node.child_by_field_name("type") {
            if ty.child_by_field_name("body").is_some() {
                if let Some(kind) = class_kind(ty) {
                    self.push_class(ty, kind, None, out);
                }
            }
        }
    }

    fn visit_template(&mut self, node: Node, out: &mut Vec<CppDecl>) {
        let params = self.template_params(node);

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "class_specifier" | "struct_specifier" => {
                    self.push_class(child, DeclKind::ClassTemplate, Some(&params), out);
                }
                "declaration" => {
                    if let Some(ty) = child.child_by_field_name("type") {
                        if class_kind(ty).is_some() && ty.child_by_field_name("body").is_some() {
                            self.push_class(ty, DeclKind::ClassTemplate, Some(&params), out);
                        }
                    }
                }
                _ => {}
            }
        }
    }

    fn visit_include(&mut self, node: Node, position: usize) {
        let mut target = String::new();
        let mut is_system = false;

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            match child.kind() {
                "system_lib_string" => {
                    target = self
                        .node_text(child)
                        .trim_start_matches('<')
                        .trim_end_matches('>')
                        .to_string();
                    is_system = true;
                }
                "string_literal" => {
                    target = self.node_text(child).trim_matches('"').to_string();
                    is_system = false;
                }
                _ => {}
            }
        }

        if !target.is_empty() {
            self.includes.push(IncludeDirective {
                target,
                is_system,
                line: line_of(node),
                position,
            });
        }
    }

    fn push_class(
        &mut self,
        node: Node,
        kind: DeclKind,
        template_params: Option<&[String]>,
        out: &mut Vec<CppDecl>,
    ) {
        if let Some(decl) = self.build_class(node, kind, template_params) {
            out.push(decl);
        }
    }

    fn build_class(
        &mut self,
        node: Node,
        kind: DeclKind,
        template_params: Option<&[String]>,
    ) -> Option<CppDecl> {
        let name_node = node.child_by_field_name("name")?;
        let written = self.node_text(name_node);
        let spelling = simple_name(&written);
        let is_specialization = name_node.kind() == "template_type";

        let (kind, display_name) = match template_params {
            // Partial specializations are not scanned
            Some(params) if is_specialization && !params.is_empty() => {
                (DeclKind::Other, compact_type_text(&written))
            }
            // Explicit specialization: reported like an ordinary class
            Some(_) if is_specialization => (
                class_kind(node).unwrap_or(DeclKind::ClassDecl),
                compact_type_text(&written),
            ),
            Some(params) => (kind, format!("{}<{}>", spelling, params.join(","))),
            None => (kind, compact_type_text(&written)),
        };

        let mut decl = CppDecl::new(kind, display_name);
        decl.spelling = spelling;
        decl.tokens = self.tokens_of(node, self.skip_function_bodies);

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            if child.kind() == "base_class_clause" {
                let bases = self.base_specifiers(child);
                decl.children.extend(bases);
            }
        }

        if let Some(body) = node.child_by_field_name("body") {
            decl.is_definition = true;
            self.visit_class_body(body, &mut decl);
        }

        decl.is_abstract = decl.has_own_pure_virtual();
        Some(decl)
    }

    fn visit_class_body(&mut self, body: Node, class: &mut CppDecl) {
        let mut cursor = body.walk();
        for member in body.children(&mut cursor) {
            self.visit_member(member, class);
        }
    }

    fn visit_member(&mut self, member: Node, class: &mut CppDecl) {
        match member.kind() {
            "{" | "}" | ":" | ";" | "access_specifier" | "comment" => {}
            "class_specifier" | "struct_specifier" => {
                if let Some(kind) = class_kind(member) {
                    if let Some(nested) = self.build_class(member, kind, None) {
                        class.children.push(nested);
                    }
                }
            }
            "field_declaration" => {
                if let Some(nested) = self.nested_class(member) {
                    class.children.push(nested);
                    return;
                }
                if let Some(ctor) = self.constructor(member, &class.spelling) {
                    class.children.push(ctor);
                }
                self.summarize_member(member, class);
            }
            "function_definition" | "declaration" => {
                if let Some(ctor) = self.constructor(member, &class.spelling) {
                    class.children.push(ctor);
                }
                self.summarize_member(member, class);
            }
            "template_declaration" => {
                // Member templates never count as constructors
                let params = self.template_params(member);
                let mut nested_found = false;
                let mut inner_cursor = member.walk();
                for inner in member.children(&mut inner_cursor) {
                    if class_kind(inner).is_some() {
                        if let Some(nested) =
                            self.build_class(inner, DeclKind::ClassTemplate, Some(&params))
                        {
                            class.children.push(nested);
                        }
                        nested_found = true;
                    }
                }
                if !nested_found {
                    self.summarize_member(member, class);
                }
            }
            "preproc_if" | "preproc_ifdef" | "preproc_else" | "preproc_elif"
            | "preproc_elifdef" => self.visit_conditional_members(member, class),
            _ => self.summarize_member(member, class),
        }
    }

    /// Members of a conditional block inside a class body
    fn visit_conditional_members(&mut self, block: Node, class: &mut CppDecl) {
        if self.is_disabled(block) {
            if let Some(alt) = block.child_by_field_name("alternative") {
                self.visit_member(alt, class);
            }
            return;
        }

        // The macro name and condition are not members
        let directive_ids: Vec<usize> = ["name", "condition"]
            .iter()
            .filter_map(|field| block.child_by_field_name(field))
            .map(|n| n.id())
            .collect();

        let mut cursor = block.walk();
        for member in block.children(&mut cursor) {
            if member.is_named() && !directive_ids.contains(&member.id()) {
                self.visit_member(member, class);
            }
        }
    }

    /// `#if 0` and `#elif 0` blocks are dead code
    fn is_disabled(&self, block: Node) -> bool {
        matches!(block.kind(), "preproc_if" | "preproc_elif")
            && block
                .child_by_field_name("condition")
                .is_some_and(|c| self.node_text(c).trim() == "0")
    }

    fn nested_class(&mut self, field: Node) -> Option<CppDecl> {
        let ty = field.child_by_field_name("type")?;
        ty.child_by_field_name("body")?;
        let kind = class_kind(ty)?;
        self.build_class(ty, kind, None)
    }

    /// Record member function names and pure virtual members of a class
    fn summarize_member(&self, member: Node, class: &mut CppDecl) {
        let tokens = self.tokens_of(member, true);
        for segment in tokens.split(|t| t == ";" || t == "}") {
            if let Some((name, is_pure)) = member_signature(segment) {
                if is_pure {
                    class.pure_virtuals.push(name.clone());
                }
                class.methods.push(name);
            }
        }
    }

    fn constructor(&self, member: Node, class_spelling: &str) -> Option<CppDecl> {
        if class_spelling.is_empty() || member.child_by_field_name("type").is_some() {
            return None;
        }

        let declarator = member.child_by_field_name("declarator")?;
        if declarator.kind() != "function_declarator" {
            return None;
        }

        let name_node = declarator.child_by_field_name("declarator")?;
        let name = match name_node.kind() {
            "identifier" | "field_identifier" | "type_identifier" => self.node_text(name_node),
            "template_function" | "template_type" => name_node
                .child_by_field_name("name")
                .map(|n| self.node_text(n))?,
            _ => return None,
        };
        if name != class_spelling {
            return None;
        }

        let parameters = declarator
            .child_by_field_name("parameters")
            .map(|list| self.parameters(list))
            .unwrap_or_default();

        let signature = parameters
            .iter()
            .map(|p| compact_type_text(&type_tokens(p).join(" ")))
            .collect::<Vec<_>>()
            .join(",");

        let mut ctor = CppDecl::new(
            DeclKind::Constructor,
            format!("{}({})", class_spelling, signature),
        );
        ctor.spelling = name;
        ctor.parameters = parameters;
        ctor.tokens = self.tokens_of(member, self.skip_function_bodies);
        Some(ctor)
    }

    fn parameters(&self, list: Node) -> Vec<CppDecl> {
        let mut params = Vec::new();

        let mut cursor = list.walk();
        for child in list.children(&mut cursor) {
            match child.kind() {
                "parameter_declaration"
                | "optional_parameter_declaration"
                | "variadic_parameter_declaration"
                | "variadic_parameter" => params.push(self.parameter(child)),
                _ => {}
            }
        }

        // `Foo(void)` declares no parameters
        if params.len() == 1 && params[0].display_name.is_empty() && params[0].tokens == ["void"] {
            params.clear();
        }

        params
    }

    fn parameter(&self, node: Node) -> CppDecl {
        let name = node
            .child_by_field_name("declarator")
            .and_then(|d| self.declarator_name(d))
            .unwrap_or_default();

        let mut param = CppDecl::new(DeclKind::Parameter, name);
        param.tokens = self.tokens_of(node, self.skip_function_bodies);
        param
    }

    fn declarator_name(&self, node: Node) -> Option<String> {
        match node.kind() {
            "identifier" | "field_identifier" | "destructor_name" | "operator_name" => {
                Some(self.node_text(node))
            }
            "qualified_identifier" => node
                .child_by_field_name("name")
                .and_then(|name| self.declarator_name(name)),
            "parameter_list" | "abstract_function_declarator" | "abstract_pointer_declarator"
            | "abstract_reference_declarator" | "abstract_array_declarator" => None,
            _ => {
                if let Some(inner) = node.child_by_field_name("declarator") {
                    return self.declarator_name(inner);
                }
                // reference and variadic declarators keep the name as a plain child
                let mut cursor = node.walk();
                for child in node.named_children(&mut cursor) {
                    if let Some(name) = self.declarator_name(child) {
                        return Some(name);
                    }
                }
                None
            }
        }
    }

    fn base_specifiers(&self, clause: Node) -> Vec<CppDecl> {
        let mut bases = Vec::new();
        let mut prefix: Vec<String> = Vec::new();

        let mut cursor = clause.walk();
        for child in clause.children(&mut cursor) {
            let kind = child.kind();
            match kind {
                ":" | "," => prefix.clear(),
                "access_specifier" | "virtual" => prefix.push(self.node_text(child)),
                "base_class_specifier" => bases.extend(self.base_specifiers(child)),
                _ if BASE_TYPE_KINDS.contains(&kind) => {
                    let type_text = compact_type_text(&self.node_text(child));
                    let display_name = if prefix.is_empty() {
                        type_text
                    } else {
                        format!("{} {}", prefix.join(" "), type_text)
                    };

                    let mut base = CppDecl::new(DeclKind::BaseSpecifier, display_name);
                    base.tokens = prefix.clone();
                    base.tokens.extend(self.tokens_of(child, true));
                    bases.push(base);
                    prefix.clear();
                }
                _ => {}
            }
        }

        bases
    }

    fn template_params(&self, template: Node) -> Vec<String> {
        let mut names = Vec::new();

        let mut cursor = template.walk();
        for child in template.children(&mut cursor) {
            if child.kind() != "template_parameter_list" {
                continue;
            }
            let mut param_cursor = child.walk();
            for param in child.named_children(&mut param_cursor) {
                if let Some(name) = self.template_param_name(param) {
                    names.push(name);
                }
            }
        }

        names
    }

    fn template_param_name(&self, param: Node) -> Option<String> {
        match param.kind() {
            "parameter_declaration" | "optional_parameter_declaration" => param
                .child_by_field_name("declarator")
                .and_then(|d| self.declarator_name(d)),
            "comment" => None,
            _ => {
                if let Some(name) = param.child_by_field_name("name") {
                    return Some(self.node_text(name));
                }
                let mut cursor = param.walk();
                let children: Vec<Node> = param.named_children(&mut cursor).collect();
                for child in children.into_iter().rev() {
                    match child.kind() {
                        "type_identifier" | "identifier" => return Some(self.node_text(child)),
                        "type_parameter_declaration" | "variadic_type_parameter_declaration" => {
                            return self.template_param_name(child)
                        }
                        _ => {}
                    }
                }
                None
            }
        }
    }

    fn tokens_of(&self, node: Node, elide_bodies: bool) -> Vec<String> {
        let mut tokens = Vec::new();
        self.collect_tokens(node, elide_bodies, &mut tokens);
        tokens
    }

    fn collect_tokens(&self, node: Node, elide_bodies: bool, out: &mut Vec<String>) {
        let kind = node.kind();
        if kind == "comment" {
            return;
        }
        if node.child_count() == 0 || ATOMIC_KINDS.contains(&kind) {
            let text = self.node_text(node);
            if !text.is_empty() {
                out.push(text);
            }
            return;
        }
        if elide_bodies && kind == "compound_statement" {
            out.push("{".to_string());
            out.push("}".to_string());
            return;
        }

        let mut cursor = node.walk();
        for child in node.children(&mut cursor) {
            self.collect_tokens(child, elide_bodies, out);
        }
    }
}

fn line_of(node: Node) -> usize {
    node.start_position().row + 1
}

fn class_kind(node: Node) -> Option<DeclKind> {
    match node.kind() {
        "class_specifier" => Some(DeclKind::ClassDecl),
        "struct_specifier" => Some(DeclKind::StructDecl),
        _ => None,
    }
}

/// Tokens of a parameter other than its name, in order
fn type_tokens(param: &CppDecl) -> Vec<&str> {
    param
        .tokens
        .iter()
        .filter(|t| **t != param.display_name)
        .map(String::as_str)
        .collect()
}

/// Class name with template arguments and qualifiers removed
pub(crate) fn simple_name(written: &str) -> String {
    let unspecialized = written.split('<').next().unwrap_or(written);
    unspecialized
        .rsplit("::")
        .next()
        .unwrap_or(unspecialized)
        .trim()
        .to_string()
}

/// Collapse whitespace in type text and drop it around punctuation
pub(crate) fn compact_type_text(text: &str) -> String {
    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    let chars: Vec<char> = collapsed.chars().collect();

    let mut out = String::with_capacity(collapsed.len());
    for (i, &c) in chars.iter().enumerate() {
        if c == ' ' {
            let prev = i.checked_sub(1).and_then(|p| chars.get(p));
            let next = chars.get(i + 1);
            let tight = prev.is_some_and(|p| TIGHT_PUNCT.contains(p))
                || next.is_some_and(|n| TIGHT_PUNCT.contains(n));
            if tight {
                continue;
            }
        }
        out.push(c);
    }
    out
}

/// Name and purity of the member function a token segment declares
///
/// A segment declares a function when it contains `(`; the name is the token
/// right before the first `(`. It is pure when `= 0` follows the last `)`
/// and the segment is marked `virtual` or `override`.
pub(crate) fn member_signature(segment: &[String]) -> Option<(String, bool)> {
    let open = segment.iter().position(|t| t == "(")?;
    if open == 0 {
        return None;
    }

    let mut name = segment[open - 1].clone();
    if open >= 2 {
        match segment[open - 2].as_str() {
            "~" => name = format!("~{name}"),
            "operator" => name = format!("operator{name}"),
            _ => {}
        }
    }

    let close = segment.iter().rposition(|t| t == ")")?;
    let is_pure = segment[close + 1..]
        .windows(2)
        .any(|w| w[0] == "=" && w[1] == "0")
        && segment.iter().any(|t| t == "virtual" || t == "override");

    Some((name, is_pure))
}
