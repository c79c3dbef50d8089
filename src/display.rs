use crate::tree::NaryTree;
use std::fmt::Write;

/// Renders the tree level by level for the console, one line per level,
/// cells in traversal order. Consumes only the linearized rows; layout here
/// is cosmetic and carries no structural meaning.
pub fn render(tree: &NaryTree) -> String {
    let mut lines: Vec<String> = Vec::new();

    for row in tree.rows() {
        let level = row.level as usize;
        if level == lines.len() {
            lines.push(String::new());
        }
        let line = &mut lines[level];
        if !line.is_empty() {
            line.push_str("  ");
        }
        let _ = match row.parent {
            Some(pid) => write!(line, "[{}]{{{}}} {}", row.id, pid, row.value),
            None => write!(line, "[{}] {}", row.id, row.value),
        };
    }

    let mut out = String::new();
    for (level, line) in lines.iter().enumerate() {
        let _ = writeln!(out, "{}: {}", level, line);
    }
    out
}
