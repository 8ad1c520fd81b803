//! Display ordering for catalog nodes.
//!
//! The repository stores [`fold_case`] and [`sort_key`] next to each name
//! and sorts on them in SQL, so database listings and in-memory sorts
//! agree.

use std::cmp::Ordering;

use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use super::types::Node;

/// Case-folded name used for searching.
///
/// Composed (NFC) and lowercased, so "ÄRGER" and "ärger" fold alike
/// however the accents were encoded.
pub fn fold_case(name: &str) -> String {
    name.nfc().flat_map(char::to_lowercase).collect()
}

/// Primary sort key: lowercase with accents stripped.
///
/// Accented letters sort with their base letter ("éclair" near "eclair",
/// not after "z").
pub fn sort_key(name: &str) -> String {
    name.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
        .collect()
}

/// Compare two names the way a user expects a listing to be sorted.
///
/// Names compare on [`sort_key`], then on [`fold_case`] so accented forms
/// follow their plain forms. Names that differ only in case put the
/// lowercase form first ("a" < "A").
pub fn compare_names(a: &str, b: &str) -> Ordering {
    sort_key(a)
        .cmp(&sort_key(b))
        .then_with(|| fold_case(a).cmp(&fold_case(b)))
        // Reversed binary order on ties puts lowercase ahead of uppercase.
        .then_with(|| b.cmp(a))
}

/// Folder-first, then name.
pub fn compare_nodes(a: &Node, b: &Node) -> Ordering {
    a.node_type
        .rank()
        .cmp(&b.node_type.rank())
        .then_with(|| compare_names(&a.name, &b.name))
}

/// Sort nodes in place, folders first, then by name.
pub fn sort_nodes(nodes: &mut [Node]) {
    nodes.sort_by(compare_nodes);
}
