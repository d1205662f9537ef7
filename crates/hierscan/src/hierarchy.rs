//! Class hierarchy discovery
//!
//! These functions work purely on [`DeclarationNode`] handles. They never
//! fail; malformed input just yields fewer matches.

use hierscan_api::{DeclKind, DeclarationNode};
use log::{trace, warn};
use std::collections::HashSet;

/// Nodes whose kind is one of `kinds`, in their original order
pub fn filter_by_kind<'a, N: DeclarationNode>(nodes: &'a [N], kinds: &[DeclKind]) -> Vec<&'a N> {
    nodes.iter().filter(|n| kinds.contains(&n.kind())).collect()
}

/// Immediate base class names of a class, in declaration order
///
/// Each name is the last whitespace-delimited token of a base specifier's
/// display name, which drops `public`/`virtual` style prefixes.
pub fn immediate_base_names<N: DeclarationNode>(class: &N) -> Vec<&str> {
    class
        .children()
        .iter()
        .filter(|c| c.kind() == DeclKind::BaseSpecifier)
        .filter_map(|c| c.display_name().split_whitespace().last())
        .collect()
}

/// Every candidate that derives, at any depth, from one of `seeds`
///
/// Each round admits the candidates with a base in the current frontier,
/// and the next frontier is exactly the names admitted in that round.
/// Candidates may be admitted more than once; deduplication is up to the
/// caller.
pub fn transitive_subclasses<'a, N, S>(candidates: &[&'a N], seeds: &[S]) -> Vec<&'a N>
where
    N: DeclarationNode,
    S: AsRef<str>,
{
    let mut frontier: HashSet<&str> = seeds.iter().map(AsRef::as_ref).collect();
    let mut result = Vec::new();

    // An acyclic chain cannot be longer than the pool it is drawn from
    for round in 0..=candidates.len() {
        let admitted: Vec<&'a N> = candidates
            .iter()
            .copied()
            .filter(|c| immediate_base_names(*c).iter().any(|b| frontier.contains(b)))
            .collect();

        if admitted.is_empty() {
            return result;
        }
        trace!("round {round}: admitted {} classes", admitted.len());

        frontier = admitted.iter().map(|&c| c.display_name()).collect();
        result.extend(admitted);
    }

    warn!(
        "inheritance cycle among {} candidates; stopping expansion",
        candidates.len()
    );
    result
}

/// One node per display name, keeping the first occurrence
pub fn unique_by_name<'a, N, I>(nodes: I) -> Vec<&'a N>
where
    N: DeclarationNode + 'a,
    I: IntoIterator<Item = &'a N>,
{
    let mut seen = HashSet::new();
    nodes
        .into_iter()
        .filter(|&n| seen.insert(n.display_name()))
        .collect()
}

/// Nodes the front end does not report as abstract
pub fn concrete_only<'a, N: DeclarationNode>(nodes: Vec<&'a N>) -> Vec<&'a N> {
    nodes.into_iter().filter(|n| !n.is_abstract()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::TestNode;

    fn names<N: DeclarationNode>(nodes: &[&N]) -> Vec<String> {
        nodes.iter().map(|n| n.display_name().to_string()).collect()
    }

    #[test]
    fn test_filter_by_kind_keeps_order() {
        let nodes = vec![
            TestNode::class("A", &[]),
            TestNode::of_kind(DeclKind::Namespace, "ns"),
            TestNode::of_kind(DeclKind::StructDecl, "B"),
            TestNode::of_kind(DeclKind::ClassTemplate, "C<T>"),
            TestNode::of_kind(DeclKind::Other, "f"),
        ];

        let classes = filter_by_kind(&nodes, &DeclKind::CLASS_LIKE);
        assert_eq!(names(&classes), vec!["A", "B", "C<T>"]);
    }

    #[test]
    fn test_immediate_base_names_strip_keywords() {
        let class = TestNode::class("Dog", &["public Animal", "protected virtual Pet", "Plain"]);
        assert_eq!(immediate_base_names(&class), vec!["Animal", "Pet", "Plain"]);

        let orphan = TestNode::class("Orphan", &[]);
        assert!(immediate_base_names(&orphan).is_empty());
    }

    #[test]
    fn test_immediate_base_names_ignore_other_children() {
        let class = TestNode::class("Gen", &["public ColProc"]).with_constructor(&[]);
        assert_eq!(immediate_base_names(&class), vec!["ColProc"]);
    }

    #[test]
    fn test_transitive_closure_is_order_independent() {
        let nodes = vec![
            TestNode::class("Leaf", &["public Mid"]),
            TestNode::class("Unrelated", &["public Other"]),
            TestNode::class("Mid", &["public ColProc"]),
        ];
        let candidates = filter_by_kind(&nodes, &DeclKind::CLASS_LIKE);
        let seeds = vec!["ColProc".to_string()];

        let found = transitive_subclasses(&candidates, &seeds);
        assert_eq!(names(&found), vec!["Mid", "Leaf"]);
    }

    #[test]
    fn test_transitive_frontier_is_not_cumulative() {
        // Late admits only match the previous round's names
        let nodes = vec![
            TestNode::class("A", &["public Root"]),
            TestNode::class("B", &["public A"]),
            TestNode::class("C", &["public B", "public Root"]),
        ];
        let candidates = filter_by_kind(&nodes, &DeclKind::CLASS_LIKE);

        let found = transitive_subclasses(&candidates, &["Root"]);
        assert_eq!(names(&found), vec!["A", "C", "B", "C"]);
    }

    #[test]
    fn test_transitive_multiple_seeds() {
        let nodes = vec![
            TestNode::class("Counter", &["public Variable<T>"]),
            TestNode::class("Gen", &["public ColProc"]),
        ];
        let candidates = filter_by_kind(&nodes, &DeclKind::CLASS_LIKE);

        let found = transitive_subclasses(&candidates, &["ColProc", "Variable<T>"]);
        assert_eq!(names(&found), vec!["Counter", "Gen"]);
    }

    #[test]
    fn test_transitive_no_match() {
        let nodes = vec![TestNode::class("A", &["public B"])];
        let candidates = filter_by_kind(&nodes, &DeclKind::CLASS_LIKE);
        assert!(transitive_subclasses(&candidates, &["Root"]).is_empty());
    }

    #[test]
    fn test_transitive_cycle_terminates() {
        let nodes = vec![
            TestNode::class("A", &["public Root", "public B"]),
            TestNode::class("B", &["public A"]),
        ];
        let candidates = filter_by_kind(&nodes, &DeclKind::CLASS_LIKE);

        let found = transitive_subclasses(&candidates, &["Root"]);
        assert!(!found.is_empty());
        assert_eq!(found[0].display_name(), "A");
    }

    #[test]
    fn test_unique_by_name_first_wins() {
        let first = TestNode::class("Gen", &["public ColProc"]);
        let other = TestNode::class("Other", &[]);
        let second = TestNode::class("Gen", &["public Variable<T>"]);

        let unique = unique_by_name(vec![&first, &other, &second]);
        assert_eq!(unique.len(), 2);
        assert_eq!(immediate_base_names(unique[0]), vec!["ColProc"]);
        assert_eq!(unique[1].display_name(), "Other");
    }

    #[test]
    fn test_concrete_only() {
        let base = TestNode::abstract_class("Mid", &["public ColProc"]);
        let leaf = TestNode::class("Leaf", &["public Mid"]);

        let concrete = concrete_only(vec![&base, &leaf]);
        assert_eq!(names(&concrete), vec!["Leaf"]);
    }

    #[test]
    fn test_abstract_intermediate_still_seeds() {
        let nodes = vec![
            TestNode::abstract_class("Mid", &["public ColProc"]),
            TestNode::class("Leaf", &["public Mid"]),
        ];
        let candidates = filter_by_kind(&nodes, &DeclKind::CLASS_LIKE);

        let found = concrete_only(unique_by_name(transitive_subclasses(&candidates, &["ColProc"])));
        assert_eq!(names(&found), vec!["Leaf"]);
    }
}
