//! Schema validation of system record files with detailed error reporting

use jsonschema::{validator_for, ValidationError as JsonSchemaError, Validator as JsonValidator};
use miette::{Diagnostic, NamedSource, SourceSpan};
use rust_embed::RustEmbed;
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::yaml::diagnostics::line_col_to_offset;

/// Embedded JSON schemas
#[derive(RustEmbed)]
#[folder = "schemas/"]
struct EmbeddedSchemas;

const SYSTEM_SCHEMA: &str = "system.schema.json";

/// Validation error with source location information
#[derive(Debug, Error, Diagnostic)]
#[error("Schema validation failed: {summary}")]
#[diagnostic(code(runbook::schema::validation_error))]
pub struct ValidationError {
    summary: String,

    #[source_code]
    src: NamedSource<String>,

    #[related]
    violations: Vec<SchemaViolation>,
}

/// A single schema violation
#[derive(Debug, Error, Diagnostic)]
#[error("{message}")]
pub struct SchemaViolation {
    #[label("{}", self.hint)]
    span: SourceSpan,

    message: String,
    hint: String,

    #[help]
    help: Option<String>,
}

impl SchemaViolation {
    pub fn new(message: String, hint: String, span: SourceSpan, help: Option<String>) -> Self {
        Self {
            span,
            message,
            hint,
            help,
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl ValidationError {
    pub fn new(filename: &str, source: &str, violations: Vec<SchemaViolation>) -> Self {
        let count = violations.len();
        let summary = if count == 1 {
            format!("1 error in {}", filename)
        } else {
            format!("{} errors in {}", count, filename)
        };
        Self {
            summary,
            src: NamedSource::new(filename, source.to_string()),
            violations,
        }
    }

    /// Get the number of violations
    pub fn violation_count(&self) -> usize {
        self.violations.len()
    }

    pub fn violations(&self) -> &[SchemaViolation] {
        &self.violations
    }
}

/// Errors compiling the embedded schema
#[derive(Debug, Error, Diagnostic)]
pub enum SchemaError {
    #[error("Embedded schema not found: {0}")]
    #[diagnostic(code(runbook::schema::not_found))]
    NotFound(String),

    #[error("Embedded schema {name} is invalid: {message}")]
    #[diagnostic(code(runbook::schema::invalid))]
    Invalid { name: String, message: String },
}

/// Validator for system record files
pub struct Validator {
    compiled: JsonValidator,
}

impl Validator {
    /// Compile the embedded system schema
    pub fn new() -> Result<Self, SchemaError> {
        let file = EmbeddedSchemas::get(SYSTEM_SCHEMA)
            .ok_or_else(|| SchemaError::NotFound(SYSTEM_SCHEMA.to_string()))?;
        let invalid = |message: String| SchemaError::Invalid {
            name: SYSTEM_SCHEMA.to_string(),
            message,
        };

        let schema_json: JsonValue =
            serde_json::from_slice(&file.data).map_err(|e| invalid(e.to_string()))?;
        let compiled = validator_for(&schema_json).map_err(|e| invalid(e.to_string()))?;

        Ok(Self { compiled })
    }

    /// Validate YAML content, collecting every violation
    pub fn validate(&self, content: &str, filename: &str) -> Result<(), ValidationError> {
        let yaml_value: serde_yml::Value = match serde_yml::from_str(content) {
            Ok(v) => v,
            Err(e) => {
                let span = find_error_span(content, e.location());
                let violation = SchemaViolation::new(
                    format!("YAML parse error: {}", e),
                    "invalid YAML".to_string(),
                    span,
                    Some("Check YAML syntax - proper indentation, colons, quotes".to_string()),
                );
                return Err(ValidationError::new(filename, content, vec![violation]));
            }
        };

        // An empty document is an empty record
        if yaml_value.is_null() {
            return Ok(());
        }

        let json_value: JsonValue = match serde_json::to_value(&yaml_value) {
            Ok(v) => v,
            Err(e) => {
                let violation = SchemaViolation::new(
                    format!("Failed to convert YAML to JSON: {}", e),
                    "conversion error".to_string(),
                    (0, content.len()).into(),
                    None,
                );
                return Err(ValidationError::new(filename, content, vec![violation]));
            }
        };

        let violations: Vec<SchemaViolation> = self
            .compiled
            .iter_errors(&json_value)
            .map(|e| error_to_violation(content, &e))
            .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::new(filename, content, violations))
        }
    }
}

/// Convert a JSON Schema validation error to our violation format
fn error_to_violation(content: &str, error: &JsonSchemaError) -> SchemaViolation {
    let path = error.instance_path.to_string();
    let message = format_schema_error(error);
    let hint = format_error_hint(error);
    let help = generate_help_message(error);

    let span = find_path_span(content, &path);

    SchemaViolation::new(message, hint, span, help)
}

/// Format a JSON Schema error into a user-friendly message
fn format_schema_error(error: &JsonSchemaError) -> String {
    let path = if error.instance_path.as_str().is_empty() {
        "document root".to_string()
    } else {
        format!("'{}'", error.instance_path)
    };

    match &error.kind {
        jsonschema::error::ValidationErrorKind::Required { property } => {
            let prop_str = property
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| property.to_string());
            format!("Missing required field: {} at {}", prop_str, path)
        }
        jsonschema::error::ValidationErrorKind::Type { kind } => {
            format!("Wrong type at {}: expected {:?}", path, kind)
        }
        jsonschema::error::ValidationErrorKind::MinLength { limit } => {
            format!("Value at {} is too short: minimum {} characters", path, limit)
        }
        jsonschema::error::ValidationErrorKind::AdditionalProperties { unexpected } => {
            format!("Unknown field(s) at {}: {}", path, unexpected.join(", "))
        }
        _ => {
            format!("Validation error at {}: {}", path, error)
        }
    }
}

/// Generate a short hint for the error label
fn format_error_hint(error: &JsonSchemaError) -> String {
    match &error.kind {
        jsonschema::error::ValidationErrorKind::Required { .. } => "required field missing".to_string(),
        jsonschema::error::ValidationErrorKind::Type { .. } => "wrong type".to_string(),
        jsonschema::error::ValidationErrorKind::MinLength { .. } => "too short".to_string(),
        jsonschema::error::ValidationErrorKind::AdditionalProperties { .. } => "unknown field".to_string(),
        _ => "validation error".to_string(),
    }
}

/// Generate a help message with suggestions for fixing the error
fn generate_help_message(error: &JsonSchemaError) -> Option<String> {
    match &error.kind {
        jsonschema::error::ValidationErrorKind::Required { property } => {
            let prop_str = property
                .as_str()
                .map(|s| s.to_string())
                .unwrap_or_else(|| property.to_string());
            Some(format!("Add the '{}' field", prop_str))
        }
        jsonschema::error::ValidationErrorKind::MinLength { .. } => {
            Some("Contact entries need the CMDB dataItemID of the contact".to_string())
        }
        jsonschema::error::ValidationErrorKind::AdditionalProperties { unexpected } => {
            if unexpected.len() == 1 {
                Some(format!("Remove the '{}' field or check spelling", unexpected[0]))
            } else {
                Some("Remove unknown fields or check spelling".to_string())
            }
        }
        _ => None,
    }
}

/// Find the span (byte offset, length) for a YAML parse error location
fn find_error_span(content: &str, location: Option<serde_yml::Location>) -> SourceSpan {
    let Some(loc) = location else {
        let len = content.find('\n').unwrap_or(content.len()).max(1);
        return (0, len).into();
    };

    let offset = line_col_to_offset(content, loc.line(), loc.column());
    let rest_of_content = &content[offset..];
    let len = rest_of_content
        .find('\n')
        .unwrap_or(rest_of_content.len())
        .max(1);

    (offset, len).into()
}

/// Find the span for a JSON path in YAML content
fn find_path_span(content: &str, json_path: &str) -> SourceSpan {
    let parts: Vec<&str> = json_path.split('/').filter(|s| !s.is_empty()).collect();

    // Array indices point at their parent key
    let key = parts
        .iter()
        .rev()
        .find(|p| p.parse::<usize>().is_err())
        .copied();

    if let Some(span) = key.and_then(|k| find_key_span(content, k)) {
        return span;
    }

    let len = content.find('\n').unwrap_or(content.len()).max(1);
    (0, len).into()
}

/// Find the span of a `key:` at the start of a line
fn find_key_span(content: &str, key: &str) -> Option<SourceSpan> {
    let search_pattern = format!("{}:", key);

    let mut offset = 0;
    for line in content.lines() {
        let trimmed = line.trim_start().trim_start_matches("- ");
        if trimmed.starts_with(&search_pattern) {
            let key_start = offset + (line.len() - trimmed.len());
            return Some((key_start, trimmed.len()).into());
        }
        offset += line.len() + 1;
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validator_creation() {
        assert!(Validator::new().is_ok());
    }

    #[test]
    fn test_valid_system() {
        let validator = Validator::new().unwrap();
        let yaml = r##"
systemCode: content-api
name: Content API
serviceTier: Gold
troubleshooting: MD://troubleshooting.md
monitoring:
  - name: Grafana
    link: https://grafana.example.com
primaryContact:
  contact:
    - dataItemID: team-123
      name: Content Team
      slack: "#content"
"##;
        let result = validator.validate(yaml, "cmdb.yaml");
        assert!(result.is_ok(), "Valid system should pass: {:?}", result);
    }

    #[test]
    fn test_empty_document_is_valid() {
        let validator = Validator::new().unwrap();
        assert!(validator.validate("", "cmdb-global.yaml").is_ok());
    }

    #[test]
    fn test_unknown_field() {
        let validator = Validator::new().unwrap();
        let yaml = "systemCode: abc\nsystem_code: abc\n";

        let err = validator.validate(yaml, "cmdb.yaml").unwrap_err();
        assert_eq!(err.violation_count(), 1);
        assert!(err.violations()[0].message().contains("system_code"));
    }

    #[test]
    fn test_contact_entry_needs_id() {
        let validator = Validator::new().unwrap();
        let yaml = r#"
productOwner:
  contact:
    - name: Jane
"#;
        let err = validator.validate(yaml, "cmdb.yaml").unwrap_err();
        assert!(err
            .violations()
            .iter()
            .any(|v| v.message().contains("dataItemID")));
    }

    #[test]
    fn test_links_must_be_list() {
        let validator = Validator::new().unwrap();
        let err = validator
            .validate("monitoring: https://grafana.example.com\n", "cmdb.yaml")
            .unwrap_err();
        assert!(err.violation_count() >= 1);
    }

    #[test]
    fn test_yaml_parse_error() {
        let validator = Validator::new().unwrap();
        let err = validator.validate("name: [unclosed\n", "cmdb.yaml").unwrap_err();
        assert!(err.violations()[0].message().starts_with("YAML parse error"));
    }

    #[test]
    fn test_yaml_parse_error_after_multibyte_text() {
        let validator = Validator::new().unwrap();
        let err = validator.validate("name: ééé: x\n", "cmdb.yaml").unwrap_err();
        assert_eq!(err.violation_count(), 1);
        assert!(err.violations()[0].message().starts_with("YAML parse error"));
    }

    #[test]
    fn test_error_span_on_char_boundary() {
        let content = "name: ééé: x\n";
        let location = serde_yml::from_str::<serde_yml::Value>(content)
            .unwrap_err()
            .location();
        let span = find_error_span(content, location);
        assert!(content.is_char_boundary(span.offset()));
        assert!(content.is_char_boundary(span.offset() + span.len()));
    }

    #[test]
    fn test_find_key_span() {
        let content = "systemCode: abc\nmonitoring:\n  - name: x\n";
        let span = find_key_span(content, "name").unwrap();
        assert_eq!(span.offset(), content.find("name").unwrap());
        assert!(find_key_span(content, "missing").is_none());
    }
}
