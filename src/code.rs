// Joseph Prichard
// 1/5/2023
// Prefix codes assigned to each symbol by walking the huffman tree

use std::cmp::Ordering;
use crate::bitwise::get_code_bit;
use crate::freq::TABLE_SIZE;
use crate::tree::{CodeTree, Tree};

// a symbol's code, stored in the low bit_len bits with the first branch as the highest bit
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SymbolCode {
    pub plain_symbol: u8,
    pub weight: u64,
    pub encoded_symbol: u64,
    pub bit_len: u8,
}

impl SymbolCode {
    pub fn new() -> SymbolCode {
        SymbolCode::default()
    }

    pub fn append_bit(&self, bit: u64) -> SymbolCode {
        SymbolCode {
            plain_symbol: self.plain_symbol,
            weight: self.weight,
            encoded_symbol: (self.encoded_symbol << 1) | bit,
            bit_len: self.bit_len + 1,
        }
    }

    pub fn is_present(&self) -> bool {
        self.bit_len > 0
    }

    pub fn bits(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.bit_len).map(move |n| get_code_bit(self.encoded_symbol, self.bit_len, n))
    }

    pub fn to_bit_string(&self) -> String {
        self.bits().map(|bit| if bit == 0 { '0' } else { '1' }).collect()
    }

    pub fn is_prefix_of(&self, other: &SymbolCode) -> bool {
        self.bit_len <= other.bit_len
            && other.encoded_symbol >> (other.bit_len - self.bit_len) == self.encoded_symbol
    }
}

// presentation order for listings: heaviest first, ascending symbol on ties
pub fn by_weight_desc(a: &SymbolCode, b: &SymbolCode) -> Ordering {
    b.weight.cmp(&a.weight).then_with(|| a.plain_symbol.cmp(&b.plain_symbol))
}

// symbol indexed code table, absent symbols have a zero bit length
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CodeTable {
    table: Box<[SymbolCode; TABLE_SIZE]>,
    len: usize,
}

impl CodeTable {
    pub fn generate(tree: &CodeTree) -> CodeTable {
        let mut code_table = CodeTable {
            table: Box::new([SymbolCode::new(); TABLE_SIZE]),
            len: 0,
        };
        walk_code_tree(&tree.root, SymbolCode::new(), &mut code_table);
        code_table
    }

    pub fn get(&self, symbol: u8) -> Option<&SymbolCode> {
        let code = &self.table[symbol as usize];
        if code.is_present() {
            Some(code)
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    // present codes in ascending symbol order
    pub fn entries(&self) -> impl Iterator<Item = &SymbolCode> + '_ {
        self.table.iter().filter(|code| code.is_present())
    }

    pub fn sort_by_weight_desc(&self) -> Vec<SymbolCode> {
        let mut entries: Vec<SymbolCode> = self.entries().copied().collect();
        entries.sort_by(by_weight_desc);
        entries
    }

    // the number of payload bits the encoded input occupies
    pub fn total_bits(&self) -> u64 {
        self.entries()
            .map(|code| code.weight * code.bit_len as u64)
            .sum()
    }
}

fn walk_code_tree(node: &Tree, mut symbol_code: SymbolCode, code_table: &mut CodeTable) {
    if node.is_leaf() {
        symbol_code.plain_symbol = node.plain_symbol;
        symbol_code.weight = node.weight;
        code_table.table[node.plain_symbol as usize] = symbol_code;
        code_table.len += 1;
    }
    if let Some(left) = &node.left {
        walk_code_tree(left, symbol_code.append_bit(0), code_table);
    }
    if let Some(right) = &node.right {
        walk_code_tree(right, symbol_code.append_bit(1), code_table);
    }
}
