//! Search filter construction
//!
//! The legacy list operation takes a free-form query expression in the
//! server's SQL-like filter language. There is no parameter binding in the
//! v4.1 protocol, so values are escaped before interpolation and field
//! names are restricted to lowercase identifiers. This is best-effort
//! hardening of a protocol-level injection surface.

use crate::error::CrmError;
use crate::module::CrmModule;

/// A substring match on one field, optionally ANDed with equality clauses
///
/// Renders expressions of the form:
///
/// ```text
/// leads.email1 LIKE '%a@b.com%' AND leads.status = 'New'
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilter {
    module: CrmModule,
    field: String,
    pattern: String,
    conditions: Vec<(String, String)>,
}

impl SearchFilter {
    /// Creates a filter on the module's default search field
    pub fn new(module: CrmModule, pattern: impl Into<String>) -> Self {
        Self {
            module,
            field: module.default_search_field().to_string(),
            pattern: pattern.into(),
            conditions: Vec::new(),
        }
    }

    /// Creates a filter on a caller-named field
    pub fn with_field(
        module: CrmModule,
        field: &str,
        pattern: impl Into<String>,
    ) -> Result<Self, CrmError> {
        ensure_identifier(field)?;
        Ok(Self {
            module,
            field: field.to_string(),
            pattern: pattern.into(),
            conditions: Vec::new(),
        })
    }

    /// ANDs an equality clause onto the filter
    pub fn and_equals(
        mut self,
        attribute: &str,
        value: impl Into<String>,
    ) -> Result<Self, CrmError> {
        ensure_identifier(attribute)?;
        self.conditions.push((attribute.to_string(), value.into()));
        Ok(self)
    }

    pub fn module(&self) -> CrmModule {
        self.module
    }

    /// Renders the filter as a query expression for the list operation
    pub fn query(&self) -> String {
        let table = self.module.table();
        let mut expr = format!(
            "{table}.{field} LIKE '%{pattern}%'",
            field = self.field,
            pattern = escape_literal(&self.pattern),
        );
        for (attribute, value) in &self.conditions {
            expr.push_str(&format!(
                " AND {table}.{attribute} = '{value}'",
                value = escape_literal(value),
            ));
        }
        expr
    }
}

/// Escapes a value for interpolation into a quoted query literal
pub fn escape_literal(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => escaped.push_str("\\\\"),
            '\'' => escaped.push_str("\\'"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn ensure_identifier(name: &str) -> Result<(), CrmError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(first) => {
            (first.is_ascii_lowercase() || first == '_')
                && chars.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(CrmError::invalid_input(format!(
            "invalid field name: {name:?}"
        )))
    }
}
