//! Free-text report template parsing and rendering.
//!
//! The report body is parsed once into a directive tree: plain text,
//! `{{name}}` placeholders, `{{#if field}}...{{/if}}` conditionals, and
//! `{{#each field}}...{{/each}}` loops, plus the bracket-delimited
//! equivalents `[#if]`, `[#each]`, `[this]`. Blocks nest; a conditional or
//! loop close tag always pairs with the innermost open block. Malformed
//! directives degrade to literal text rather than failing the render.

use rustc_hash::FxHashMap;
use serde_json::Value;

#[derive(Debug, Clone, PartialEq)]
enum Node {
    Text(String),
    Placeholder(String),
    /// Current element inside a loop body
    This,
    Conditional {
        field: String,
        body: Vec<Node>,
    },
    Loop {
        field: String,
        body: Vec<Node>,
    },
}

/// A parsed free-text report body
#[derive(Debug, Clone)]
pub struct ReportTemplate {
    nodes: Vec<Node>,
}

impl ReportTemplate {
    /// Parse a report body into a directive tree
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut pos = 0;
        let (nodes, _) = parse_block(source, &mut pos, &[]);
        Self { nodes }
    }

    /// Render against a values map, then collapse runs of 3+ newlines to 2
    /// and trim surrounding whitespace
    #[must_use]
    pub fn render(&self, values: &FxHashMap<String, Value>) -> String {
        let mut out = String::new();
        render_nodes(&self.nodes, values, None, &mut out);
        collapse_newlines(&out).trim().to_string()
    }
}

const IF_ENDS: &[&str] = &["{{/if}}", "[/if]"];
const EACH_ENDS: &[&str] = &["{{/each}}", "[/each]"];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Marker {
    End(usize),
    Curly,
    BracketIf,
    BracketEach,
    BracketThis,
}

/// Parse until one of `end_tags` or the end of input. Returns the nodes and
/// whether an end tag was consumed.
fn parse_block(src: &str, pos: &mut usize, end_tags: &[&str]) -> (Vec<Node>, bool) {
    let mut nodes = Vec::new();

    loop {
        let rest = &src[*pos..];
        let Some((offset, marker)) = next_marker(rest, end_tags) else {
            if !rest.is_empty() {
                nodes.push(Node::Text(rest.to_string()));
            }
            *pos = src.len();
            return (nodes, false);
        };

        if offset > 0 {
            nodes.push(Node::Text(rest[..offset].to_string()));
        }
        *pos += offset;

        match marker {
            Marker::End(i) => {
                *pos += end_tags[i].len();
                return (nodes, true);
            }
            Marker::Curly => parse_curly(src, pos, &mut nodes),
            Marker::BracketIf => parse_bracket_block(src, pos, &mut nodes, "[#if ", true),
            Marker::BracketEach => parse_bracket_block(src, pos, &mut nodes, "[#each ", false),
            Marker::BracketThis => {
                *pos += "[this]".len();
                nodes.push(Node::This);
            }
        }
    }
}

/// Earliest directive marker in `rest`; end tags win index ties
fn next_marker(rest: &str, end_tags: &[&str]) -> Option<(usize, Marker)> {
    let mut best: Option<(usize, Marker)> = None;
    let mut consider = |found: Option<usize>, marker: Marker| {
        if let Some(idx) = found
            && best.is_none_or(|(b, _)| idx < b)
        {
            best = Some((idx, marker));
        }
    };

    for (i, tag) in end_tags.iter().enumerate() {
        consider(rest.find(tag), Marker::End(i));
    }
    consider(rest.find("{{"), Marker::Curly);
    consider(rest.find("[#if "), Marker::BracketIf);
    consider(rest.find("[#each "), Marker::BracketEach);
    consider(rest.find("[this]"), Marker::BracketThis);
    best
}

/// Parse a `{{...}}` directive starting at `pos`
fn parse_curly(src: &str, pos: &mut usize, nodes: &mut Vec<Node>) {
    let start = *pos;
    let Some(close) = src[start + 2..].find("}}") else {
        // Unterminated braces are literal text
        nodes.push(Node::Text("{{".to_string()));
        *pos = start + 2;
        return;
    };
    let inner = src[start + 2..start + 2 + close].trim().to_string();
    *pos = start + 2 + close + 2;

    if let Some(field) = inner.strip_prefix("#if ") {
        let (body, _) = parse_block(src, pos, IF_ENDS);
        nodes.push(Node::Conditional {
            field: field.trim().to_string(),
            body,
        });
    } else if let Some(field) = inner.strip_prefix("#each ") {
        let (body, _) = parse_block(src, pos, EACH_ENDS);
        nodes.push(Node::Loop {
            field: field.trim().to_string(),
            body,
        });
    } else if inner == "this" {
        nodes.push(Node::This);
    } else if inner.starts_with('/') || inner.is_empty() {
        // Stray close tag or empty directive stays literal
        nodes.push(Node::Text(format!("{{{{{inner}}}}}")));
    } else {
        nodes.push(Node::Placeholder(inner));
    }
}

/// Parse a `[#if field]` / `[#each field]` block starting at `pos`
fn parse_bracket_block(src: &str, pos: &mut usize, nodes: &mut Vec<Node>, opener: &str, is_if: bool) {
    let start = *pos;
    let after_opener = start + opener.len();
    let Some(close) = src[after_opener..].find(']') else {
        nodes.push(Node::Text("[".to_string()));
        *pos = start + 1;
        return;
    };
    let field = src[after_opener..after_opener + close].trim().to_string();
    *pos = after_opener + close + 1;

    let (body, _) = parse_block(src, pos, if is_if { IF_ENDS } else { EACH_ENDS });
    if is_if {
        nodes.push(Node::Conditional { field, body });
    } else {
        nodes.push(Node::Loop { field, body });
    }
}

fn render_nodes(
    nodes: &[Node],
    values: &FxHashMap<String, Value>,
    this: Option<&Value>,
    out: &mut String,
) {
    for node in nodes {
        match node {
            Node::Text(text) => out.push_str(text),
            Node::Placeholder(name) => match values.get(name) {
                Some(value) => out.push_str(&stringify(value)),
                // Unresolved placeholders render as a bracketed marker
                None => {
                    out.push('[');
                    out.push_str(name);
                    out.push(']');
                }
            },
            Node::This => match this {
                Some(value) => out.push_str(&stringify(value)),
                None => out.push_str("[this]"),
            },
            Node::Conditional { field, body } => {
                if truthy(values.get(field)) {
                    render_nodes(body, values, this, out);
                }
            }
            Node::Loop { field, body } => {
                if let Some(Value::Array(items)) = values.get(field) {
                    for item in items {
                        render_nodes(body, values, Some(item), out);
                    }
                }
            }
        }
    }
}

/// Collapse runs of three or more newlines down to two
fn collapse_newlines(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut run = 0usize;
    for ch in text.chars() {
        if ch == '\n' {
            run += 1;
            if run <= 2 {
                out.push(ch);
            }
        } else {
            run = 0;
            out.push(ch);
        }
    }
    out
}

/// Truthiness for conditional blocks: absent, null, `""`, `"None"`, `false`,
/// and the empty list are falsy
fn truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(s)) => !s.is_empty() && s != "None",
        Some(Value::Array(items)) => !items.is_empty(),
        Some(_) => true,
    }
}

/// Replace `{{name}}` occurrences, leaving unresolved placeholders verbatim.
/// Used for the structured template pass, where unknown names stay literal.
pub fn substitute_inline(text: &str, values: &FxHashMap<String, Value>) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(open) = rest.find("{{") {
        out.push_str(&rest[..open]);
        let after = &rest[open + 2..];
        let Some(close) = after.find("}}") else {
            out.push_str(&rest[open..]);
            return out;
        };
        let name = after[..close].trim();
        match values.get(name) {
            Some(value) => out.push_str(&stringify(value)),
            None => out.push_str(&rest[open..open + 2 + close + 2]),
        }
        rest = &after[close + 2..];
    }
    out.push_str(rest);
    out
}

fn stringify(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
