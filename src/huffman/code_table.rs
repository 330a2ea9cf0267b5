use super::{HuffmanTree, NodeId};
use std::collections::btree_map::{self, BTreeMap};
use std::fmt;

/// The bits assigned to one symbol, first bit first
#[derive(Debug, Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }

    fn push(&self, bit: bool) -> Code {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Code { bits }
    }
}

impl From<Vec<bool>> for Code {
    fn from(bits: Vec<bool>) -> Self {
        Code { bits }
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for bit in &self.bits {
            f.write_str(if *bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

/// Maps every symbol of a [`HuffmanTree`] to the path from the root to its leaf.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodeTable {
    codes: BTreeMap<char, Code>,
}

impl CodeTable {
    /// Collect the codes of all leaves. Going left appends a `0`, going right a `1`.
    ///
    /// A tree that is a single leaf has an empty path, that leaf gets the code `0`.
    /// No tree gives an empty table.
    pub fn from_tree(tree: Option<&HuffmanTree>) -> Self {
        let mut codes = BTreeMap::new();
        let tree = match tree {
            Some(tree) => tree,
            None => return CodeTable { codes },
        };

        if tree.is_single_leaf() {
            if let Some(symbol) = tree.symbol(tree.root()) {
                codes.insert(symbol, Code::from(vec![false]));
            }
            return CodeTable { codes };
        }

        // explicit stack, skewed trees can get as deep as there are symbols
        let mut stack: Vec<(NodeId, Code)> = vec![(tree.root(), Code::default())];
        while let Some((id, code)) = stack.pop() {
            if let Some(symbol) = tree.symbol(id) {
                codes.insert(symbol, code);
                continue;
            }
            if let Some(right) = tree.child(id, true) {
                stack.push((right, code.push(true)));
            }
            if let Some(left) = tree.child(id, false) {
                stack.push((left, code.push(false)));
            }
        }

        CodeTable { codes }
    }

    pub fn get(&self, symbol: char) -> Option<&Code> {
        self.codes.get(&symbol)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, char, Code> {
        self.codes.iter()
    }

    /// Checks that no code is the start of another one.
    pub fn is_prefix_free(&self) -> bool {
        // in lexicographic order a code is directly followed by the codes
        // it is a prefix of, comparing neighbours is enough
        let mut sorted: Vec<&Code> = self.codes.values().collect();
        sorted.sort();
        sorted
            .windows(2)
            .all(|pair| !pair[0].is_prefix_of(pair[1]))
    }
}
