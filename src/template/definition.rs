//! Typed template definition and the tagged field tree.

use crate::error::{GeneratorError, Result};
use crate::models::Sex;
use serde::Deserialize;
use serde_json::Value;

/// Distribution kind for a synthesizable field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Distribution {
    /// Gaussian around the resolved mean
    #[default]
    Normal,
    /// Log-normal; the underlying normal uses `ln(mean)` and `std / mean`
    LogNormal,
}

/// Partial mean/std override applied on top of the base parameters
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifier {
    /// Replacement mean, when declared
    pub mean: Option<f64>,
    /// Replacement standard deviation (pre-multiplier), when declared
    pub std: Option<f64>,
}

/// Randomization spec attached to one synthesizable field
#[derive(Debug, Clone, Default)]
pub struct FieldRandomization {
    /// Sampling distribution; unknown kinds parse as `Normal`
    pub distribution: Distribution,
    /// Base mean
    pub mean: f64,
    /// Whether the base mean was declared as an integer, which selects
    /// integer rounding for the output value
    pub integer: bool,
    /// Base standard deviation (pre-multiplier)
    pub std: f64,
    /// Sex-specific overrides: (male, female)
    pub sex_modifiers: (Option<Modifier>, Option<Modifier>),
    /// Override for patients aged 65 and up
    pub elderly: Option<Modifier>,
    /// Override for patients aged 30 and under
    pub young: Option<Modifier>,
    /// Per-condition overrides in declared order; first patient match wins
    pub condition_modifiers: Vec<(String, Modifier)>,
    /// Clipping floor
    pub critical_low: Option<f64>,
    /// Clipping ceiling
    pub critical_high: Option<f64>,
}

impl FieldRandomization {
    /// Sex override for the given sex
    #[must_use]
    pub const fn sex_modifier(&self, sex: Sex) -> Option<Modifier> {
        match sex {
            Sex::Male => self.sex_modifiers.0,
            Sex::Female => self.sex_modifiers.1,
        }
    }
}

/// A leaf field carrying a randomization spec
#[derive(Debug, Clone)]
pub struct FieldNode {
    /// Remaining entries of the field mapping (value, unit, ...) in
    /// declared order; `randomization` and `critical_values` are lifted
    /// into `spec` at parse time
    pub entries: Vec<(String, TemplateNode)>,
    /// How to synthesize the field's value
    pub spec: FieldRandomization,
    /// Placeholder name extracted from the `value` entry, without braces
    pub placeholder: Option<String>,
    /// Display unit, when declared
    pub unit: Option<String>,
    /// Display reference range, when declared
    pub reference_range: Option<String>,
}

/// Tagged template tree node, so the recursive walks are exhaustive
#[derive(Debug, Clone)]
pub enum TemplateNode {
    /// Leaf mapping carrying a `randomization` key
    Field(FieldNode),
    /// Plain mapping, children in declared order
    Map(Vec<(String, TemplateNode)>),
    /// Sequence of nodes
    Seq(Vec<TemplateNode>),
    /// Any other scalar, passed through unchanged
    Scalar(Value),
}

/// Eligibility constraints a patient must satisfy
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TemplateConstraints {
    /// Inclusive age range as `[min, max]`
    #[serde(default)]
    pub age_range: Option<(u32, u32)>,
    /// Conditions the patient must carry; one error per missing entry
    #[serde(default)]
    pub required_conditions: Vec<String>,
    /// Conditions the template is written for; none present is a warning
    #[serde(default)]
    pub conditions_relevant: Vec<String>,
    /// Informational flag that the template is sex-specific
    #[serde(default)]
    pub gender_specific: bool,
}

/// Per-condition narrative content declared by a template
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConditionNarrative {
    /// Chief complaint line
    #[serde(default)]
    pub chief_complaint: Option<String>,
    /// Primary diagnosis line, typically with an ICD-10 code
    #[serde(default)]
    pub primary_diagnosis: Option<String>,
    /// HPI body with condition token placeholders
    #[serde(default)]
    pub hpi_template: Option<String>,
}

/// Template-level categorical randomization rule
#[derive(Debug, Clone, Deserialize)]
pub struct CategoricalRule {
    /// Candidate values
    pub values: Vec<Value>,
    /// Optional weights, parallel to `values`
    #[serde(default)]
    pub weights: Option<Vec<f64>>,
    /// Draw mode; `weighted_categorical` with weights enables weighting
    #[serde(default)]
    pub distribution: Option<String>,
}

/// A parsed document template
#[derive(Debug, Clone, Default)]
pub struct TemplateDefinition {
    /// Patient eligibility constraints
    pub constraints: TemplateConstraints,
    /// Field tree, absent for report-only templates
    pub template: Option<TemplateNode>,
    /// Narrative content per condition tag, declared order
    pub condition_templates: Vec<(String, ConditionNarrative)>,
    /// Calculated fields as (name, formula), declared order
    pub calculated_fields: Vec<(String, String)>,
    /// Template-level categorical rules, declared order
    pub randomization_rules: Vec<(String, CategoricalRule)>,
    /// Free-text report body with placeholder/conditional/loop directives
    pub report_template: Option<String>,
}

impl TemplateDefinition {
    /// Parse an in-memory template value into a typed definition
    pub fn from_value(value: &Value) -> Result<Self> {
        let root = value
            .as_object()
            .ok_or_else(|| GeneratorError::TemplateParse("template is not a mapping".into()))?;

        let constraints = match root.get("constraints") {
            Some(section) => serde_json::from_value(section.clone())
                .map_err(|e| GeneratorError::TemplateParse(format!("constraints: {e}")))?,
            None => TemplateConstraints::default(),
        };

        let template = root.get("template").map(parse_node).transpose()?;

        let mut condition_templates = Vec::new();
        if let Some(section) = root.get("condition_templates") {
            let map = section.as_object().ok_or_else(|| {
                GeneratorError::TemplateParse("condition_templates is not a mapping".into())
            })?;
            for (tag, content) in map {
                let narrative = serde_json::from_value(content.clone()).map_err(|e| {
                    GeneratorError::TemplateParse(format!("condition_templates.{tag}: {e}"))
                })?;
                condition_templates.push((tag.clone(), narrative));
            }
        }

        let mut calculated_fields = Vec::new();
        if let Some(section) = root.get("calculated_fields") {
            let map = section.as_object().ok_or_else(|| {
                GeneratorError::TemplateParse("calculated_fields is not a mapping".into())
            })?;
            for (name, formula) in map {
                let formula = formula.as_str().ok_or_else(|| {
                    GeneratorError::TemplateParse(format!(
                        "calculated_fields.{name} is not a string"
                    ))
                })?;
                calculated_fields.push((name.clone(), formula.to_string()));
            }
        }

        let mut randomization_rules = Vec::new();
        if let Some(section) = root.get("randomization") {
            let map = section.as_object().ok_or_else(|| {
                GeneratorError::TemplateParse("randomization is not a mapping".into())
            })?;
            for (name, rule) in map {
                // Entries without a values list are ignored, matching the
                // lenient behavior expected of hand-written templates
                if let Ok(rule) = serde_json::from_value::<CategoricalRule>(rule.clone()) {
                    randomization_rules.push((name.clone(), rule));
                }
            }
        }

        let report_template = root
            .get("report_template")
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(Self {
            constraints,
            template,
            condition_templates,
            calculated_fields,
            randomization_rules,
            report_template,
        })
    }

    /// Narrative content for a condition tag, if declared
    #[must_use]
    pub fn condition_narrative(&self, tag: &str) -> Option<&ConditionNarrative> {
        self.condition_templates
            .iter()
            .find(|(t, _)| t == tag)
            .map(|(_, n)| n)
    }
}

/// Strip the `{{ }}` wrapper from a placeholder expression
fn strip_placeholder(raw: &str) -> String {
    raw.replace("{{", "").replace("}}", "")
}

fn parse_node(value: &Value) -> Result<TemplateNode> {
    match value {
        Value::Object(map) => {
            if map.contains_key("randomization") {
                parse_field(map).map(TemplateNode::Field)
            } else {
                let mut children = Vec::with_capacity(map.len());
                for (key, child) in map {
                    children.push((key.clone(), parse_node(child)?));
                }
                Ok(TemplateNode::Map(children))
            }
        }
        Value::Array(items) => {
            let children = items.iter().map(parse_node).collect::<Result<Vec<_>>>()?;
            Ok(TemplateNode::Seq(children))
        }
        other => Ok(TemplateNode::Scalar(other.clone())),
    }
}

fn parse_field(map: &serde_json::Map<String, Value>) -> Result<FieldNode> {
    let mut spec = parse_randomization(&map["randomization"])?;
    if let Some(bounds) = map.get("critical_values") {
        let bounds = bounds
            .as_object()
            .ok_or_else(|| GeneratorError::InvalidSpec("critical_values is not a mapping".into()))?;
        spec.critical_low = opt_f64(bounds, "low")?;
        spec.critical_high = opt_f64(bounds, "high")?;
    }

    let mut entries = Vec::new();
    for (key, child) in map {
        if key == "randomization" || key == "critical_values" {
            continue;
        }
        entries.push((key.clone(), parse_node(child)?));
    }

    let placeholder = map
        .get("value")
        .and_then(Value::as_str)
        .map(strip_placeholder);
    let unit = map.get("unit").and_then(Value::as_str).map(str::to_string);
    let reference_range = map
        .get("reference_range")
        .and_then(Value::as_str)
        .map(str::to_string);

    Ok(FieldNode {
        entries,
        spec,
        placeholder,
        unit,
        reference_range,
    })
}

fn parse_randomization(value: &Value) -> Result<FieldRandomization> {
    let map = value
        .as_object()
        .ok_or_else(|| GeneratorError::InvalidSpec("randomization is not a mapping".into()))?;

    let distribution = match map.get("distribution").and_then(Value::as_str) {
        Some("log_normal") => Distribution::LogNormal,
        // Unknown kinds fall back to normal semantics
        _ => Distribution::Normal,
    };

    let (mean, integer) = match map.get("mean") {
        Some(Value::Number(n)) => (
            n.as_f64()
                .ok_or_else(|| GeneratorError::InvalidSpec("mean is not finite".into()))?,
            n.is_i64() || n.is_u64(),
        ),
        Some(other) => {
            return Err(GeneratorError::InvalidSpec(format!(
                "mean is not a number: {other}"
            )));
        }
        None => (0.0, true),
    };

    let std = match map.get("std") {
        Some(Value::Number(n)) => n
            .as_f64()
            .ok_or_else(|| GeneratorError::InvalidSpec("std is not finite".into()))?,
        Some(other) => {
            return Err(GeneratorError::InvalidSpec(format!(
                "std is not a number: {other}"
            )));
        }
        None => 1.0,
    };

    let mut spec = FieldRandomization {
        distribution,
        mean,
        integer,
        std,
        ..FieldRandomization::default()
    };

    if let Some(mods) = map.get("gender_modifiers") {
        let mods = mods
            .as_object()
            .ok_or_else(|| GeneratorError::InvalidSpec("gender_modifiers".into()))?;
        spec.sex_modifiers = (
            mods.get("male").map(parse_modifier).transpose()?,
            mods.get("female").map(parse_modifier).transpose()?,
        );
    }

    if let Some(mods) = map.get("age_modifiers") {
        let mods = mods
            .as_object()
            .ok_or_else(|| GeneratorError::InvalidSpec("age_modifiers".into()))?;
        spec.elderly = mods.get("elderly").map(parse_modifier).transpose()?;
        spec.young = mods.get("young").map(parse_modifier).transpose()?;
    }

    if let Some(mods) = map.get("disease_modifiers") {
        let mods = mods
            .as_object()
            .ok_or_else(|| GeneratorError::InvalidSpec("disease_modifiers".into()))?;
        for (tag, modifier) in mods {
            spec.condition_modifiers
                .push((tag.clone(), parse_modifier(modifier)?));
        }
    }

    Ok(spec)
}

fn parse_modifier(value: &Value) -> Result<Modifier> {
    let map = value
        .as_object()
        .ok_or_else(|| GeneratorError::InvalidSpec("modifier is not a mapping".into()))?;
    Ok(Modifier {
        mean: opt_f64(map, "mean")?,
        std: opt_f64(map, "std")?,
    })
}

fn opt_f64(map: &serde_json::Map<String, Value>, key: &str) -> Result<Option<f64>> {
    match map.get(key) {
        None => Ok(None),
        Some(Value::Number(n)) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| GeneratorError::InvalidSpec(format!("{key} is not finite"))),
        Some(other) => Err(GeneratorError::InvalidSpec(format!(
            "{key} is not a number: {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_field_tree_and_spec() {
        let template = json!({
            "constraints": {"age_range": [18, 99], "required_conditions": ["diabetes"]},
            "template": {
                "results": {
                    "glucose": {
                        "value": "{{glucose}}",
                        "unit": "mg/dL",
                        "reference_range": "70-100",
                        "randomization": {
                            "mean": 105.0,
                            "std": 15.0,
                            "disease_modifiers": {"diabetes": {"mean": 160.0, "std": 40.0}}
                        },
                        "critical_values": {"low": 40, "high": 500}
                    }
                }
            }
        });

        let def = TemplateDefinition::from_value(&template).unwrap();
        assert_eq!(def.constraints.age_range, Some((18, 99)));

        let TemplateNode::Map(root) = def.template.unwrap() else {
            panic!("expected map root");
        };
        let TemplateNode::Map(results) = &root[0].1 else {
            panic!("expected results map");
        };
        let TemplateNode::Field(field) = &results[0].1 else {
            panic!("expected field leaf");
        };
        assert_eq!(field.placeholder.as_deref(), Some("glucose"));
        assert_eq!(field.unit.as_deref(), Some("mg/dL"));
        assert_eq!(field.spec.critical_low, Some(40.0));
        assert_eq!(field.spec.critical_high, Some(500.0));
        assert!(!field.spec.integer);
        assert_eq!(field.spec.condition_modifiers[0].0, "diabetes");
    }

    #[test]
    fn integer_mean_sets_integer_hint() {
        let spec = parse_randomization(&json!({"mean": 120, "std": 10})).unwrap();
        assert!(spec.integer);
        assert_eq!(spec.distribution, Distribution::Normal);
    }

    #[test]
    fn unknown_distribution_falls_back_to_normal() {
        let spec = parse_randomization(&json!({"distribution": "poisson", "mean": 5.0})).unwrap();
        assert_eq!(spec.distribution, Distribution::Normal);
    }

    #[test]
    fn non_numeric_mean_is_rejected() {
        assert!(parse_randomization(&json!({"mean": "high"})).is_err());
    }
}
