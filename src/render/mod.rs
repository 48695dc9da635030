//! Document rendering: the structured field-tree pass, calculated fields,
//! and the free-text report body.

pub mod formula;
pub mod report;

pub use report::ReportTemplate;

use crate::template::{FieldNode, TemplateDefinition, TemplateNode};
use report::substitute_inline;
use rustc_hash::FxHashMap;
use serde_json::{Map, Number, Value};

/// Renders a template's structured body and optional free-text report
/// against a resolved values map.
#[derive(Debug, Clone, Copy, Default)]
pub struct DocumentRenderer;

impl DocumentRenderer {
    /// Render the structured body and, when declared, the report text.
    ///
    /// Calculated fields are evaluated after the field tree, appended to the
    /// body root, and made visible to the report under their field name. A
    /// formula that fails to evaluate is logged and omitted.
    #[must_use]
    pub fn render(
        &self,
        template: &TemplateDefinition,
        values: &mut FxHashMap<String, Value>,
    ) -> (Map<String, Value>, Option<String>) {
        let mut body = match &template.template {
            Some(TemplateNode::Map(children)) => render_map(children, values),
            Some(node) => {
                // Non-mapping roots still render, wrapped under a single key
                let mut map = Map::new();
                map.insert("template".to_string(), render_node(node, values));
                map
            }
            None => Map::new(),
        };

        for (name, formula) in &template.calculated_fields {
            let lookup = |ident: &str| values.get(ident).and_then(Value::as_f64);
            match formula::evaluate(formula, &lookup) {
                Ok(result) => {
                    let value = Number::from_f64(round2(result))
                        .map_or(Value::Null, Value::Number);
                    body.insert(name.clone(), value.clone());
                    values.insert(name.clone(), value);
                }
                Err(err) => {
                    log::warn!("could not calculate field {name}: {err}");
                }
            }
        }

        let report = template
            .report_template
            .as_ref()
            .map(|source| ReportTemplate::parse(source).render(values));

        (body, report)
    }
}

fn render_map(children: &[(String, TemplateNode)], values: &FxHashMap<String, Value>) -> Map<String, Value> {
    let mut out = Map::new();
    for (key, child) in children {
        // Spec-only keys never reach the output
        if key == "reference_range" {
            continue;
        }
        out.insert(key.clone(), render_node(child, values));
    }
    out
}

fn render_node(node: &TemplateNode, values: &FxHashMap<String, Value>) -> Value {
    match node {
        TemplateNode::Field(field) => render_field(field, values),
        TemplateNode::Map(children) => Value::Object(render_map(children, values)),
        TemplateNode::Seq(items) => {
            Value::Array(items.iter().map(|item| render_node(item, values)).collect())
        }
        TemplateNode::Scalar(Value::String(text)) => {
            Value::String(substitute_inline(text, values))
        }
        TemplateNode::Scalar(other) => other.clone(),
    }
}

/// A field leaf renders its remaining entries; the lifted randomization and
/// critical-value specs are already gone from `entries`
fn render_field(field: &FieldNode, values: &FxHashMap<String, Value>) -> Value {
    Value::Object(render_map(&field.entries, values))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
