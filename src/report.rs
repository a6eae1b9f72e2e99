// Joseph Prichard
// 1/5/2023
// Listings of code tables, trees, and per file summaries

use crate::code::CodeTable;
use crate::compress::FileReport;
use crate::tree::Tree;

macro_rules! fr_row_format {
    () => ("{:>15}\t\t{:>15}\t\t{:>8}\t\t{:25}")
}

macro_rules! code_row_format {
    () => ("{:>6}\t{:>12}\t{}")
}

// printable form of a symbol, non graphic bytes are shown in hex
pub fn symbol_label(symbol: u8) -> String {
    if symbol.is_ascii_graphic() {
        format!("'{}'", symbol as char)
    } else {
        format!("{:#04x}", symbol)
    }
}

pub fn format_code_table(code_table: &CodeTable) -> String {
    let mut out = format!(code_row_format!(), "symbol", "weight", "code");
    out.push('\n');
    for code in code_table.sort_by_weight_desc() {
        out.push_str(&format!(code_row_format!(),
            symbol_label(code.plain_symbol), code.weight, code.to_bit_string()));
        out.push('\n');
    }
    out
}

pub fn format_tree(root: &Tree) -> String {
    let mut out = String::new();
    format_node(root, 0, "root", &mut out);
    out
}

fn format_node(node: &Tree, depth: usize, label: &str, out: &mut String) {
    let indent = "  ".repeat(depth);
    if node.is_leaf() {
        out.push_str(&format!("{}{} leaf {} [weight: {}]\n",
            indent, label, symbol_label(node.plain_symbol), node.weight));
    } else {
        out.push_str(&format!("{}{} internal [weight: {}]\n", indent, label, node.weight));
    }
    if let Some(left) = &node.left {
        format_node(left, depth + 1, "0", out);
    }
    if let Some(right) = &node.right {
        format_node(right, depth + 1, "1", out);
    }
}

pub fn list_file_reports(reports: &[FileReport], show_table: bool, show_tree: bool) {
    for report in reports {
        if let Some(code_book) = &report.code_book {
            if show_table || show_tree {
                println!("{}", report.filename.display());
            }
            if show_table {
                print!("{}", format_code_table(code_book.code_table()));
            }
            if show_tree {
                print!("{}", format_tree(&code_book.tree.root));
            }
            if show_table || show_tree {
                println!("Active characters: {}\t\tTotal characters: {}",
                    code_book.alphabet_count(), code_book.total_count());
                println!();
            }
        }
    }

    println!(fr_row_format!(), "compressed", "uncompressed", "ratio", "name");
    for report in reports {
        let ratio_str = format!("{:.2}%",
            (report.compressed_size as f64) / (report.original_size.max(1) as f64) * 100.0);
        println!(fr_row_format!(), report.compressed_size, report.original_size,
            &ratio_str, report.filename.display());
    }
    println!();
}
