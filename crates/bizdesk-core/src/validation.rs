//! Declarative field validation.
//!
//! Handlers describe their request fields as a [`RuleSet`] and call
//! [`validate_fields`] before touching storage. The resulting error map
//! (field name → localized message) is returned to the client as-is.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde_json::Value;

use crate::language::Language;
use crate::messages::Message;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("invalid email pattern")
});

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\+?[\s\-()]*(\d[\s\-()]*){7,15}$").expect("invalid phone pattern")
});

/// Plain decimal notation: no exponent, no digit separators.
static DECIMAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[+-]?(\d+\.?\d*|\.\d+)$").expect("invalid decimal pattern"));

/// A single constraint on a field value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// Present, non-null, and not an empty or whitespace-only string.
    Required,
    /// Trimmed string length in characters is at least the bound.
    MinLength(usize),
    /// Trimmed string length in characters is at most the bound.
    MaxLength(usize),
    /// Finite number, or a string that parses as one.
    Number,
    /// Integer or fractional decimal, as a number or string.
    Decimal,
    Email,
    Phone,
    /// Canonical UUID string.
    Uuid,
}

impl Rule {
    /// Check a present (non-blank) value.
    fn accepts(self, value: &Value) -> bool {
        match self {
            Rule::Required => true,
            Rule::MinLength(min) => match value {
                Value::String(s) => s.trim().chars().count() >= min,
                _ => true,
            },
            Rule::MaxLength(max) => match value {
                Value::String(s) => s.trim().chars().count() <= max,
                _ => true,
            },
            Rule::Number => match value {
                Value::Number(n) => n.as_f64().is_some_and(f64::is_finite),
                Value::String(s) => s.trim().parse::<f64>().is_ok_and(f64::is_finite),
                _ => false,
            },
            Rule::Decimal => match value {
                Value::Number(_) => true,
                Value::String(s) => DECIMAL.is_match(s.trim()),
                _ => false,
            },
            Rule::Email => value.as_str().is_some_and(|s| EMAIL.is_match(s.trim())),
            Rule::Phone => value.as_str().is_some_and(|s| PHONE.is_match(s.trim())),
            Rule::Uuid => value
                .as_str()
                .is_some_and(|s| uuid::Uuid::parse_str(s.trim()).is_ok()),
        }
    }

    fn message(self, label: &str) -> Message<'_> {
        match self {
            Rule::Required => Message::Required { label },
            Rule::MinLength(min) => Message::MinLength { label, min },
            Rule::MaxLength(max) => Message::MaxLength { label, max },
            Rule::Number => Message::Number { label },
            Rule::Decimal => Message::Decimal { label },
            Rule::Email => Message::Email { label },
            Rule::Phone => Message::Phone { label },
            Rule::Uuid => Message::Uuid { label },
        }
    }
}

/// A rule together with the label used in its message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationRule {
    pub rule: Rule,
    pub label: String,
}

/// Ordered rules for one field. The first failing rule wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldRules {
    rules: Vec<ValidationRule>,
}

impl FieldRules {
    /// Rules sharing one label.
    pub fn new(label: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        let label = label.into();
        Self {
            rules: rules
                .into_iter()
                .map(|rule| ValidationRule {
                    rule,
                    label: label.clone(),
                })
                .collect(),
        }
    }

    /// Append a rule with its own label.
    pub fn rule(mut self, rule: Rule, label: impl Into<String>) -> Self {
        self.rules.push(ValidationRule {
            rule,
            label: label.into(),
        });
        self
    }

    pub fn rules(&self) -> &[ValidationRule] {
        &self.rules
    }

    pub fn is_required(&self) -> bool {
        self.rules.iter().any(|r| r.rule == Rule::Required)
    }

    fn check(&self, value: Option<&Value>, lang: Language) -> Option<String> {
        let present = value.filter(|v| !is_blank(v));
        for ValidationRule { rule, label } in &self.rules {
            let ok = match present {
                Some(v) => rule.accepts(v),
                // Only `Required` looks at a missing value.
                None => *rule != Rule::Required,
            };
            if !ok {
                return Some(rule.message(label).render(lang));
            }
        }
        None
    }
}

/// Field name → rules for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleSet {
    fields: BTreeMap<String, FieldRules>,
}

impl RuleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a field whose rules share one label.
    pub fn field(
        self,
        name: impl Into<String>,
        label: impl Into<String>,
        rules: impl IntoIterator<Item = Rule>,
    ) -> Self {
        self.with(name, FieldRules::new(label, rules))
    }

    /// Add a field with prebuilt rules, replacing any earlier entry.
    pub fn with(mut self, name: impl Into<String>, rules: FieldRules) -> Self {
        self.fields.insert(name.into(), rules);
        self
    }

    pub fn get(&self, name: &str) -> Option<&FieldRules> {
        self.fields.get(name)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Outcome of [`validate_fields`]. `valid` holds exactly when `errors`
/// is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    errors: BTreeMap<String, String>,
}

impl ValidationResult {
    fn from_errors(errors: BTreeMap<String, String>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn into_errors(self) -> BTreeMap<String, String> {
        self.errors
    }
}

/// Evaluate every field in `rules` against `payload`.
///
/// Non-object payloads behave as if every field were absent.
pub fn validate_fields(payload: &Value, rules: &RuleSet, lang: Language) -> ValidationResult {
    let errors = rules
        .fields
        .iter()
        .filter_map(|(name, field)| {
            field
                .check(payload.get(name), lang)
                .map(|message| (name.clone(), message))
        })
        .collect();
    ValidationResult::from_errors(errors)
}

fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.trim().is_empty(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn missing_required_field_reports_required() {
        let rules = RuleSet::new().field("name", "Name", [Rule::Required]);
        let result = validate_fields(&json!({ "name": "" }), &rules, Language::En);

        assert!(!result.is_valid());
        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()["name"], "Name is required.");
    }

    #[test]
    fn non_numeric_string_fails_number_rule() {
        let rules =
            RuleSet::new().field("base_price", "Base price", [Rule::Required, Rule::Number]);
        let result = validate_fields(&json!({ "base_price": "abc" }), &rules, Language::En);

        assert_eq!(result.errors()["base_price"], "Base price must be a number.");
    }

    #[test]
    fn short_value_fails_min_length_only() {
        let rules = RuleSet::new().field("sku", "SKU", [Rule::Required, Rule::MinLength(3)]);
        let result = validate_fields(&json!({ "sku": "AB" }), &rules, Language::En);

        assert_eq!(result.errors().len(), 1);
        assert_eq!(result.errors()["sku"], "SKU must be at least 3 characters.");
    }

    #[test]
    fn required_short_circuits_remaining_rules() {
        let rules = RuleSet::new().field(
            "code",
            "Code",
            [Rule::Required, Rule::MinLength(3), Rule::Number, Rule::Email],
        );
        for payload in [json!({}), json!({ "code": null }), json!({ "code": "   " })] {
            let result = validate_fields(&payload, &rules, Language::En);
            assert_eq!(result.errors().len(), 1);
            assert_eq!(result.errors()["code"], "Code is required.");
        }
    }

    #[test]
    fn optional_rules_pass_on_empty_payload() {
        let rules = RuleSet::new()
            .field("phone", "Phone", [Rule::Phone])
            .field("email", "Email", [Rule::Email, Rule::MaxLength(50)])
            .field("price", "Price", [Rule::Decimal]);
        let result = validate_fields(&json!({}), &rules, Language::En);

        assert!(result.is_valid());
        assert!(result.errors().is_empty());
    }

    #[test]
    fn every_failing_field_is_reported() {
        let rules = RuleSet::new()
            .field("name", "Name", [Rule::Required])
            .field("email", "Email", [Rule::Email])
            .field("qty", "Quantity", [Rule::Number])
            .field("note", "Note", [Rule::MaxLength(100)]);
        let payload = json!({ "email": "nope", "qty": "ten", "note": "fine" });
        let result = validate_fields(&payload, &rules, Language::En);

        let failed: Vec<_> = result.errors().keys().map(String::as_str).collect();
        assert_eq!(failed, ["email", "name", "qty"]);
    }

    #[test]
    fn validation_is_deterministic() {
        let rules = RuleSet::new()
            .field("name", "Name", [Rule::Required, Rule::MaxLength(3)])
            .field("email", "Email", [Rule::Email]);
        let payload = json!({ "name": "toolong", "email": "x@y" });

        let first = validate_fields(&payload, &rules, Language::Ar);
        let second = validate_fields(&payload, &rules, Language::Ar);
        assert_eq!(first, second);
    }

    #[test]
    fn first_failing_rule_wins() {
        let rules = RuleSet::new().field(
            "code",
            "Code",
            [Rule::MaxLength(2), Rule::Number],
        );
        let result = validate_fields(&json!({ "code": "abcd" }), &rules, Language::En);
        assert_eq!(result.errors()["code"], "Code must not exceed 2 characters.");
    }

    #[test]
    fn per_rule_labels_are_used() {
        let field = FieldRules::new("Name", [Rule::Required]).rule(Rule::MinLength(4), "Full name");
        let rules = RuleSet::new().with("name", field);
        let result = validate_fields(&json!({ "name": "Al" }), &rules, Language::En);
        assert_eq!(result.errors()["name"], "Full name must be at least 4 characters.");
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let rules = RuleSet::new().field("name", "Name", [Rule::MaxLength(5)]);
        let result = validate_fields(&json!({ "name": "فرعين" }), &rules, Language::En);
        assert!(result.is_valid());
    }

    #[test]
    fn length_rules_ignore_non_strings() {
        let rules = RuleSet::new().field("qty", "Quantity", [Rule::MinLength(3)]);
        let result = validate_fields(&json!({ "qty": 7 }), &rules, Language::En);
        assert!(result.is_valid());
    }

    #[test]
    fn number_rule_coerces_numeric_strings() {
        let rules = RuleSet::new().field("qty", "Quantity", [Rule::Number]);
        for ok in [json!(3), json!(2.5), json!("42"), json!(" -1.5 ")] {
            assert!(validate_fields(&json!({ "qty": ok }), &rules, Language::En).is_valid());
        }
        for bad in [json!("NaN"), json!("inf"), json!(true), json!([1])] {
            assert!(!validate_fields(&json!({ "qty": bad }), &rules, Language::En).is_valid());
        }
    }

    #[test]
    fn decimal_rule_accepts_integers_and_fractions() {
        let rules = RuleSet::new().field("price", "Price", [Rule::Decimal]);
        for ok in [json!("10"), json!("10.25"), json!("-0.5"), json!(99.9)] {
            assert!(validate_fields(&json!({ "price": ok }), &rules, Language::En).is_valid());
        }
        for bad in [
            json!("10,5"),
            json!("1.2.3"),
            json!("ten"),
            json!("1_000"),
            json!("1e5"),
        ] {
            let result = validate_fields(&json!({ "price": bad }), &rules, Language::En);
            assert_eq!(result.errors()["price"], "Price must be a decimal number.");
        }
    }

    #[test]
    fn decimal_rule_has_no_precision_ceiling() {
        let rules = RuleSet::new().field("price", "Price", [Rule::Decimal]);
        for ok in ["99999999999999999999999999999999", ".5", "+7.", "0.000000000000000000000000000001"] {
            assert!(
                validate_fields(&json!({ "price": ok }), &rules, Language::En).is_valid(),
                "{ok} should be a decimal"
            );
        }
    }

    #[test]
    fn phone_needs_digits() {
        let rules = RuleSet::new().field("phone", "Phone", [Rule::Phone]);
        for ok in ["0551234567", "+1 (212) 555-0100", "011-555-0100"] {
            assert!(validate_fields(&json!({ "phone": ok }), &rules, Language::En).is_valid());
        }
        for bad in ["(((((((", "-------", "+ - ( )  ", "12345", "1234567890123456"] {
            let result = validate_fields(&json!({ "phone": bad }), &rules, Language::En);
            assert_eq!(result.errors()["phone"], "Phone must be a valid phone number.");
        }
    }

    #[test]
    fn length_ignores_surrounding_whitespace() {
        let rules = RuleSet::new().field("name", "Name", [Rule::Required, Rule::MinLength(2)]);
        let result = validate_fields(&json!({ "name": " a " }), &rules, Language::En);
        assert_eq!(result.errors()["name"], "Name must be at least 2 characters.");

        let rules = RuleSet::new().field("name", "Name", [Rule::MaxLength(3)]);
        assert!(validate_fields(&json!({ "name": "  abc  " }), &rules, Language::En).is_valid());
    }

    #[test]
    fn email_and_phone_shapes() {
        let rules = RuleSet::new()
            .field("email", "Email", [Rule::Email])
            .field("phone", "Phone", [Rule::Phone]);

        let good = json!({ "email": "owner@shop.example", "phone": "+966 (55) 123-4567" });
        assert!(validate_fields(&good, &rules, Language::En).is_valid());

        let bad = json!({ "email": "owner@shop", "phone": "call me" });
        let result = validate_fields(&bad, &rules, Language::En);
        assert_eq!(result.errors().len(), 2);
    }

    #[test]
    fn uuid_rule() {
        let rules = RuleSet::new().field("tenant_id", "Tenant", [Rule::Required, Rule::Uuid]);
        let ok = json!({ "tenant_id": uuid::Uuid::new_v4().to_string() });
        assert!(validate_fields(&ok, &rules, Language::En).is_valid());

        let result = validate_fields(&json!({ "tenant_id": 5 }), &rules, Language::En);
        assert_eq!(result.errors()["tenant_id"], "Tenant must be a valid identifier.");
    }

    #[test]
    fn messages_follow_language() {
        let rules = RuleSet::new().field("name", "الاسم", [Rule::Required]);
        let result = validate_fields(&json!({}), &rules, Language::Ar);
        assert_eq!(result.errors()["name"], "الحقل الاسم مطلوب.");
    }

    #[test]
    fn non_object_payload_treats_fields_as_absent() {
        let rules = RuleSet::new()
            .field("name", "Name", [Rule::Required])
            .field("email", "Email", [Rule::Email]);
        let result = validate_fields(&json!("just a string"), &rules, Language::En);
        assert_eq!(result.errors().len(), 1);
        assert!(result.errors().contains_key("name"));
    }

    #[test]
    fn result_serializes_as_valid_and_errors() {
        let rules = RuleSet::new().field("name", "Name", [Rule::Required]);
        let result = validate_fields(&json!({}), &rules, Language::En);
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({ "valid": false, "errors": { "name": "Name is required." } })
        );
    }
}
