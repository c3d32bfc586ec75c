//! Hierarchical selector scope resolution (§4.4).
//!
//! Grounded on `rowan/src/query.rs`'s style of narrowing a syntax position
//! down through a small set of cursor queries, generalized here into
//! narrowing a *frontier* of CST groups through an ordered selector path.
//! The glob half of the dual pattern semantics reuses the approach of
//! `rhai-common/src/util.rs`'s `GlobRule` (`globset`-backed); the regex half
//! has no teacher analogue and is new.
//!
//! Resolution yields index *paths* rather than borrowed references: the
//! patch runner needs to mutate the very groups a path identifies, and an
//! index path can be walked again mutably without fighting the borrow
//! checker the way a held `&GroupNode` would.

use std::collections::BTreeMap;

use globset::Glob;
use regex::Regex;
use serde::{Deserialize, Serialize};

use liberty_syntax::cst::{GroupNode, Node, RootNode};

use crate::error::ScopeMatchError;

/// §4.4: a bare string is a glob (`fnmatch`-style); a list of strings is a
/// set of regex alternatives, matched by substring search (not anchored).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Pattern {
    Glob(String),
    Regexes(Vec<String>),
}

impl Pattern {
    #[must_use]
    pub fn matches(&self, candidate: &str) -> bool {
        match self {
            Pattern::Glob(pattern) => Glob::new(pattern)
                .map(|g| g.compile_matcher().is_match(candidate))
                .unwrap_or(false),
            Pattern::Regexes(patterns) => patterns
                .iter()
                .any(|p| Regex::new(p).map(|re| re.is_match(candidate)).unwrap_or(false)),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Selector {
    pub group: Option<Pattern>,
    pub name: Option<Pattern>,
    pub args: Option<Pattern>,
    #[serde(default)]
    pub attributes: BTreeMap<String, Pattern>,
}

impl Selector {
    fn matches(&self, group: &GroupNode) -> bool {
        if let Some(p) = &self.group {
            if !p.matches(&group.name.lexeme) {
                return false;
            }
        }

        if let Some(p) = &self.name {
            match group.first_arg() {
                Some(name) if p.matches(name) => {}
                _ => return false,
            }
        }

        if let Some(p) = &self.args {
            if !p.matches(&group.joined_args()) {
                return false;
            }
        }

        for (key, pattern) in &self.attributes {
            match group.find_attribute(key) {
                Some(attr) if pattern.matches(&attr.joined_value()) => {}
                _ => return false,
            }
        }

        true
    }
}

/// An index path from the root's direct children down through nested
/// groups' children, each index pointing at a `Group` node.
pub type GroupPath = Vec<usize>;

/// Looks up the group identified by `path`, starting from `root`.
#[must_use]
pub fn group_at<'a>(root: &'a RootNode, path: &[usize]) -> Option<&'a GroupNode> {
    group_at_in(&root.children, path)
}

fn group_at_in<'a>(children: &'a [Node], path: &[usize]) -> Option<&'a GroupNode> {
    let (first, rest) = path.split_first()?;
    let group = children.get(*first)?.as_group()?;
    if rest.is_empty() {
        Some(group)
    } else {
        group_at_in(&group.children, rest)
    }
}

/// Mutable counterpart of [`group_at`].
#[must_use]
pub fn group_at_mut<'a>(root: &'a mut RootNode, path: &[usize]) -> Option<&'a mut GroupNode> {
    group_at_mut_in(&mut root.children, path)
}

fn group_at_mut_in<'a>(children: &'a mut [Node], path: &[usize]) -> Option<&'a mut GroupNode> {
    let (first, rest) = path.split_first()?;
    let group = children.get_mut(*first)?.as_group_mut()?;
    if rest.is_empty() {
        Some(group)
    } else {
        group_at_mut_in(&mut group.children, rest)
    }
}

/// Resolves `path` against `root`, returning the index paths of matching
/// groups.
///
/// When `require_match` is set, an empty result at any selector is a fatal
/// [`ScopeMatchError`] carrying the prefix that succeeded and the offending
/// selector. When unset, an empty result is returned quietly.
pub fn resolve(
    root: &RootNode,
    path: &[Selector],
    require_match: bool,
) -> Result<Vec<GroupPath>, ScopeMatchError> {
    let mut frontier: Vec<GroupPath> = vec![Vec::new()];
    let mut matched_prefix = 0usize;

    for (index, selector) in path.iter().enumerate() {
        let mut next = Vec::new();

        for prefix in &frontier {
            let children: &[Node] = if prefix.is_empty() {
                &root.children
            } else {
                match group_at(root, prefix) {
                    Some(g) => &g.children,
                    None => continue,
                }
            };

            for (child_index, child) in children.iter().enumerate() {
                if let Node::Group(group) = child {
                    if selector.matches(group) {
                        let mut candidate = prefix.clone();
                        candidate.push(child_index);
                        next.push(candidate);
                    }
                }
            }
        }

        if next.is_empty() {
            if require_match {
                return Err(ScopeMatchError {
                    matched_prefix,
                    selector_index: index,
                    selector_debug: format!("{selector:?}"),
                });
            }
            return Ok(Vec::new());
        }

        matched_prefix = index + 1;
        frontier = next;
    }

    Ok(frontier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use liberty_syntax::parser::parse;

    #[test]
    fn resolves_nested_path_by_group_and_name() {
        let parsed = parse("library(test) {\n  cell(A) {\n    pin(Y) {\n    }\n  }\n}").unwrap();

        let paths = resolve(
            &parsed.root,
            &[
                Selector {
                    group: Some(Pattern::Glob("cell".into())),
                    name: Some(Pattern::Glob("A".into())),
                    ..Default::default()
                },
                Selector {
                    group: Some(Pattern::Glob("pin".into())),
                    ..Default::default()
                },
            ],
            true,
        )
        .unwrap();

        assert_eq!(paths.len(), 1);
        let group = group_at(&parsed.root, &paths[0]).unwrap();
        assert_eq!(group.name.lexeme, "pin");
    }

    #[test]
    fn glob_pattern_matches_wildcards() {
        let parsed = parse(
            "library(test) {\n  cell(INVX1) {\n  }\n  cell(INVX2) {\n  }\n  cell(NAND2) {\n  }\n}",
        )
        .unwrap();

        let paths = resolve(
            &parsed.root,
            &[Selector {
                group: Some(Pattern::Glob("cell".into())),
                name: Some(Pattern::Glob("INV*".into())),
                ..Default::default()
            }],
            true,
        )
        .unwrap();

        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn regex_list_pattern_is_disjunctive_search() {
        let parsed = parse(
            "library(test) {\n  cell(INVX1) {\n  }\n  cell(NAND2) {\n  }\n  cell(BUFX1) {\n  }\n}",
        )
        .unwrap();

        let paths = resolve(
            &parsed.root,
            &[Selector {
                group: Some(Pattern::Glob("cell".into())),
                name: Some(Pattern::Regexes(vec!["^INV".into(), "^NAND".into()])),
                ..Default::default()
            }],
            true,
        )
        .unwrap();

        assert_eq!(paths.len(), 2);
    }

    #[test]
    fn missing_match_with_require_errors_with_prefix() {
        let parsed = parse("library(test) {\n  cell(A) {\n  }\n}").unwrap();

        let err = resolve(
            &parsed.root,
            &[
                Selector {
                    group: Some(Pattern::Glob("cell".into())),
                    name: Some(Pattern::Glob("A".into())),
                    ..Default::default()
                },
                Selector {
                    group: Some(Pattern::Glob("pin".into())),
                    ..Default::default()
                },
            ],
            true,
        )
        .unwrap_err();

        assert_eq!(err.matched_prefix, 1);
        assert_eq!(err.selector_index, 1);
    }

    #[test]
    fn scope_monotonicity_more_clauses_never_grow_result() {
        let parsed =
            parse("library(test) {\n  cell(A) {\n    power_pin : VDD;\n  }\n  cell(B) {\n  }\n}")
                .unwrap();

        let broad = resolve(
            &parsed.root,
            &[Selector {
                group: Some(Pattern::Glob("cell".into())),
                ..Default::default()
            }],
            false,
        )
        .unwrap();

        let mut attributes = BTreeMap::new();
        attributes.insert("power_pin".to_string(), Pattern::Glob("VDD".into()));
        let narrow = resolve(
            &parsed.root,
            &[Selector {
                group: Some(Pattern::Glob("cell".into())),
                attributes,
                ..Default::default()
            }],
            false,
        )
        .unwrap();

        assert!(narrow.len() <= broad.len());
    }

    #[test]
    fn mutation_through_resolved_path_reaches_the_right_group() {
        let mut parsed = parse("library(test) {\n  cell(A) {\n  }\n  cell(B) {\n  }\n}").unwrap();
        let paths = resolve(
            &parsed.root,
            &[Selector {
                group: Some(Pattern::Glob("cell".into())),
                name: Some(Pattern::Glob("B".into())),
                ..Default::default()
            }],
            true,
        )
        .unwrap();

        let group = group_at_mut(&mut parsed.root, &paths[0]).unwrap();
        assert_eq!(group.name.lexeme, "cell");
        assert_eq!(group.first_arg(), Some("B"));
    }
}
