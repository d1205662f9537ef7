//! Abstractness resolution across a translation unit
//!
//! A class is abstract when it declares a pure virtual member itself, or when
//! a base it can see through the unit leaves a pure virtual member that the
//! class does not override. A pure virtual destructor only makes its own
//! class abstract.

use std::collections::{HashMap, HashSet};

use hierscan_api::DeclKind;

use crate::decl::CppDecl;
use crate::visitor::simple_name;

/// Class definitions reachable in a unit, keyed by spelling
#[derive(Debug, Default)]
struct ClassIndex {
    own_pure: HashMap<String, Vec<String>>,
    methods: HashMap<String, HashSet<String>>,
    bases: HashMap<String, Vec<String>>,
}

impl ClassIndex {
    fn build(decls: &[CppDecl]) -> Self {
        let mut index = Self::default();
        index.collect(decls);
        index
    }

    fn collect(&mut self, decls: &[CppDecl]) {
        for decl in decls {
            match decl.kind {
                DeclKind::Namespace => self.collect(&decl.children),
                kind if kind.is_class_like() => {
                    // First definition wins, like the scanner's name dedup
                    if decl.is_definition && !self.own_pure.contains_key(&decl.spelling) {
                        let own = decl
                            .pure_virtuals
                            .iter()
                            .filter(|name| !name.starts_with('~'))
                            .cloned()
                            .collect();
                        let bases = decl
                            .children
                            .iter()
                            .filter(|c| c.kind == DeclKind::BaseSpecifier)
                            .map(|c| base_spelling(&c.display_name))
                            .collect();

                        self.own_pure.insert(decl.spelling.clone(), own);
                        self.methods
                            .insert(decl.spelling.clone(), decl.methods.iter().cloned().collect());
                        self.bases.insert(decl.spelling.clone(), bases);
                    }
                    self.collect(&decl.children);
                }
                _ => {}
            }
        }
    }

    /// Pure virtual members a class leaves without an override
    fn unresolved(
        &self,
        class: &str,
        memo: &mut HashMap<String, HashSet<String>>,
        in_progress: &mut HashSet<String>,
    ) -> HashSet<String> {
        if let Some(known) = memo.get(class) {
            return known.clone();
        }
        if !in_progress.insert(class.to_string()) {
            // Cyclic inheritance only happens in malformed headers
            return HashSet::new();
        }

        let mut pending: HashSet<String> = self
            .own_pure
            .get(class)
            .map(|names| names.iter().cloned().collect())
            .unwrap_or_default();

        let empty = HashSet::new();
        let methods = self.methods.get(class).unwrap_or(&empty);
        if let Some(bases) = self.bases.get(class) {
            for base in bases {
                for name in self.unresolved(base, memo, in_progress) {
                    if !methods.contains(&name) {
                        pending.insert(name);
                    }
                }
            }
        }

        in_progress.remove(class);
        memo.insert(class.to_string(), pending.clone());
        pending
    }
}

/// Class spelling named by a base specifier display name
fn base_spelling(display_name: &str) -> String {
    let last = display_name.split_whitespace().last().unwrap_or(display_name);
    simple_name(last)
}

/// Mark every class-like declaration in `decls` with its resolved abstractness
pub fn resolve_abstractness(decls: &mut [CppDecl]) {
    let index = ClassIndex::build(decls);
    let mut memo = HashMap::new();
    mark(decls, &index, &mut memo);
}

fn mark(decls: &mut [CppDecl], index: &ClassIndex, memo: &mut HashMap<String, HashSet<String>>) {
    for decl in decls.iter_mut() {
        if decl.kind.is_class_like() {
            let inherited = !index
                .unresolved(&decl.spelling, memo, &mut HashSet::new())
                .is_empty();
            decl.is_abstract = decl.has_own_pure_virtual() || inherited;
        }
        if decl.kind == DeclKind::Namespace || decl.kind.is_class_like() {
            mark(&mut decl.children, index, memo);
        }
    }
}
