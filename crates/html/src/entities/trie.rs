//! Packed binary trie for named character references.
//!
//! The trie is a flat `u16` array. Each node starts with a header word:
//!
//! ```text
//!  15 14 | 13 ........ 7 | 6 ....... 0
//!  value |  branch count | jump offset
//! ```
//!
//! - value length `0`: no value. `1`: the value lives in the low 14 bits of
//!   the header (leaf nodes only; every leaf ends in `;`, so decoding never
//!   branches out of one). `2`: one UTF-16 unit follows the header.
//!   `3`: two units follow (a surrogate pair or two code points).
//! - branch count `0` with a non-zero jump offset: a single branch on the byte
//!   stored in the jump offset; the child node follows in place.
//! - non-zero jump offset with branches: a jump table of `branch count` words
//!   indexed by `byte - jump offset`; each entry stores `child index + 1` so
//!   that `0` means "no branch".
//! - zero jump offset with branches: `branch count` sorted keys followed by
//!   `branch count` child indices, searched with a binary search.
//!
//! Tries are generated once from the tables in [`super::data`] and cached for
//! the process lifetime.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use super::data;

pub(crate) const VALUE_LENGTH: u16 = 0b1100_0000_0000_0000;
pub(crate) const BRANCH_LENGTH: u16 = 0b0011_1111_1000_0000;
pub(crate) const JUMP_TABLE: u16 = 0b0000_0000_0111_1111;

const MAX_INLINE_VALUE: u16 = !VALUE_LENGTH;
const MAX_BRANCHES: usize = (BRANCH_LENGTH >> 7) as usize;

/// Number of header-adjacent words a node's value occupies, as encoded in
/// bits 15-14.
#[inline]
pub(crate) fn value_length(node: u16) -> u16 {
    (node & VALUE_LENGTH) >> 14
}

/// Follow the branch for `byte` from the node whose header is `current`.
///
/// `branch_start` is the index of the first word after the node's value.
/// Returns the index of the child node.
pub(crate) fn determine_branch(
    tree: &[u16],
    current: u16,
    branch_start: usize,
    byte: u8,
) -> Option<usize> {
    let branch_count = ((current & BRANCH_LENGTH) >> 7) as usize;
    let jump_offset = current & JUMP_TABLE;
    let c = u16::from(byte);

    if branch_count == 0 {
        return (jump_offset != 0 && c == jump_offset).then_some(branch_start);
    }

    if jump_offset != 0 {
        let slot = usize::from(c.checked_sub(jump_offset)?);
        if slot >= branch_count {
            return None;
        }
        let target = tree[branch_start + slot];
        return (target != 0).then(|| target as usize - 1);
    }

    let keys = &tree[branch_start..branch_start + branch_count];
    keys.binary_search(&c)
        .ok()
        .map(|pos| tree[branch_start + branch_count + pos] as usize)
}

/// Decode the value stored at node `index`.
pub(crate) fn node_value(tree: &[u16], index: usize) -> (char, Option<char>) {
    let header = tree[index];
    match value_length(header) {
        1 => (unit_to_char(header & MAX_INLINE_VALUE), None),
        2 => (unit_to_char(tree[index + 1]), None),
        _ => {
            let (hi, lo) = (tree[index + 1], tree[index + 2]);
            match char::decode_utf16([hi, lo]).next() {
                Some(Ok(c)) if c.len_utf16() == 2 => (c, None),
                _ => (unit_to_char(hi), Some(unit_to_char(lo))),
            }
        }
    }
}

fn unit_to_char(unit: u16) -> char {
    char::from_u32(u32::from(unit)).unwrap_or(char::REPLACEMENT_CHARACTER)
}

/// The HTML named-reference trie.
pub(crate) fn html_tree() -> &'static [u16] {
    static TREE: OnceLock<Vec<u16>> = OnceLock::new();
    TREE.get_or_init(|| {
        let tree = build(data::HTML, data::LEGACY);
        log::debug!(
            target: "html.entities",
            "built html entity trie: {} names, {} words",
            data::HTML.len(),
            tree.len()
        );
        tree
    })
}

/// The XML named-reference trie.
pub(crate) fn xml_tree() -> &'static [u16] {
    static TREE: OnceLock<Vec<u16>> = OnceLock::new();
    TREE.get_or_init(|| build(data::XML, &[]))
}

#[derive(Default)]
struct TrieNode {
    value: Option<Vec<u16>>,
    next: BTreeMap<u8, TrieNode>,
}

impl TrieNode {
    fn insert(&mut self, key: &[u8], value: &str) {
        let mut node = self;
        for &b in key {
            node = node.next.entry(b).or_default();
        }
        node.value = Some(value.encode_utf16().collect());
    }
}

pub(crate) fn build(entries: &[(&str, &str)], legacy: &[&str]) -> Vec<u16> {
    let mut root = TrieNode::default();
    for &(name, value) in entries {
        debug_assert!(name.is_ascii());
        let mut key = Vec::with_capacity(name.len() + 1);
        key.extend_from_slice(name.as_bytes());
        if legacy.contains(&name) {
            root.insert(&key, value);
        }
        key.push(b';');
        root.insert(&key, value);
    }
    let mut out = Vec::new();
    encode_node(&root, &mut out);
    out
}

fn encode_node(node: &TrieNode, out: &mut Vec<u16>) -> usize {
    let index = out.len();
    out.push(0);

    if let Some(value) = &node.value {
        debug_assert!(!value.is_empty() && value.len() <= 2);
        let inline = node.next.is_empty() && value.len() == 1 && value[0] <= MAX_INLINE_VALUE;
        if inline {
            out[index] |= (1 << 14) | value[0];
        } else {
            out[index] |= ((value.len() as u16) + 1) << 14;
            out.extend_from_slice(value);
        }
    }

    if !node.next.is_empty() {
        encode_branches(node, index, out);
    }
    index
}

fn encode_branches(node: &TrieNode, index: usize, out: &mut Vec<u16>) {
    let branches: Vec<(u8, &TrieNode)> = node.next.iter().map(|(&k, v)| (k, v)).collect();
    debug_assert!(branches.iter().all(|(k, _)| *k != 0 && *k < 0x80));

    if let [(key, child)] = branches.as_slice() {
        out[index] |= u16::from(*key);
        encode_node(child, out);
        return;
    }

    let first = branches[0].0 as usize;
    let last = branches[branches.len() - 1].0 as usize;
    let table_len = last - first + 1;
    let table_start = out.len();

    if table_len <= MAX_BRANCHES && table_len <= branches.len() * 2 {
        out[index] |= ((table_len as u16) << 7) | first as u16;
        out.resize(table_start + table_len, 0);
        for (key, child) in branches {
            let child_index = encode_node(child, out);
            out[table_start + key as usize - first] = child_index as u16 + 1;
        }
        return;
    }

    debug_assert!(branches.len() <= MAX_BRANCHES);
    let count = branches.len();
    out[index] |= (count as u16) << 7;
    out.extend(branches.iter().map(|(k, _)| u16::from(*k)));
    out.resize(table_start + 2 * count, 0);
    for (pos, (_, child)) in branches.into_iter().enumerate() {
        let child_index = encode_node(child, out);
        out[table_start + count + pos] = child_index as u16;
    }
}
