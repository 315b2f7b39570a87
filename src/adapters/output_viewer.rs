//! Read-only rendering of generated records.

use crate::domain::Record;
use serde_json::Value;

/// Nesting depth at which containers are collapsed by default.
pub const DEFAULT_COLLAPSE_DEPTH: usize = 2;

pub const OUTPUT_HEADING: &str = "Generated Output";

#[derive(Debug, Clone, Copy)]
pub struct OutputViewer {
    collapse_depth: usize,
}

impl Default for OutputViewer {
    fn default() -> Self {
        Self::new(DEFAULT_COLLAPSE_DEPTH)
    }
}

impl OutputViewer {
    pub fn new(collapse_depth: usize) -> Self {
        Self { collapse_depth }
    }

    /// Render the records under a heading, or nothing if no result has
    /// arrived yet. The outer array sits at depth 0, each record at depth 1.
    pub fn render(&self, result: Option<&[Record]>) -> Option<String> {
        let records = result?;
        let mut out = String::new();
        out.push_str(OUTPUT_HEADING);
        out.push('\n');
        self.write_array(&mut out, records.iter(), records.len(), 0);
        Some(out)
    }

    fn write_value(&self, out: &mut String, value: &Value, depth: usize) {
        match value {
            Value::Array(items) => self.write_array(out, items.iter(), items.len(), depth),
            Value::Object(map) if map.is_empty() => out.push_str("{}"),
            Value::Object(map) if depth >= self.collapse_depth => {
                out.push_str(&format!("{{…}} ({} keys)", map.len()));
            }
            Value::Object(map) => {
                out.push_str("{\n");
                for (i, (key, item)) in map.iter().enumerate() {
                    indent(out, depth + 1);
                    out.push_str(&format!("{}: ", Value::from(key.as_str())));
                    self.write_value(out, item, depth + 1);
                    if i + 1 < map.len() {
                        out.push(',');
                    }
                    out.push('\n');
                }
                indent(out, depth);
                out.push('}');
            }
            scalar => {
                out.push_str(&scalar.to_string());
            }
        }
    }

    fn write_array<'a>(
        &self,
        out: &mut String,
        items: impl Iterator<Item = &'a Value>,
        len: usize,
        depth: usize,
    ) {
        if len == 0 {
            out.push_str("[]");
            return;
        }
        if depth >= self.collapse_depth {
            out.push_str(&format!("[…] ({} items)", len));
            return;
        }

        out.push_str("[\n");
        for (i, item) in items.enumerate() {
            indent(out, depth + 1);
            self.write_value(out, item, depth + 1);
            if i + 1 < len {
                out.push(',');
            }
            out.push('\n');
        }
        indent(out, depth);
        out.push(']');
    }
}

fn indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push_str("  ");
    }
}
