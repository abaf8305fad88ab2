use crate::domain::entities::filter::FilterToken;

/// How one list query maps filter tokens onto SQL.
pub struct FilterColumns {
    /// `key:value` targets, as `(key, sql expression)`.
    pub fields: &'static [(&'static str, &'static str)],
    /// Expressions a free-text token is matched against.
    pub search: &'static [&'static str],
    /// Condition that holds for active rows (`state:activo`).
    pub active: &'static str,
    /// Subquery template for `role:` tokens; `?` receives the pattern.
    pub role: Option<&'static str>,
}

/// `WHERE` clause (without the keyword) plus its positional parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterClause {
    pub sql: String,
    pub params: Vec<String>,
}

const ACTIVE_WORDS: [&str; 4] = ["active", "activo", "activa", "true"];
const INACTIVE_WORDS: [&str; 4] = ["inactive", "inactivo", "inactiva", "false"];

pub fn like_pattern(value: &str) -> String {
    let escaped = value
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

fn like(expr: &str) -> String {
    format!("{expr} LIKE ? ESCAPE '\\'")
}

/// Every token must match (AND). Unknown keys match nothing.
pub fn build_filter_clause(tokens: &[String], columns: &FilterColumns) -> FilterClause {
    let mut conditions = Vec::new();
    let mut params = Vec::new();

    for token in tokens {
        match FilterToken::classify(token) {
            FilterToken::Text(text) => {
                let parts: Vec<String> = columns.search.iter().map(|expr| like(expr)).collect();
                conditions.push(format!("({})", parts.join(" OR ")));
                params.extend(columns.search.iter().map(|_| like_pattern(text)));
            }
            FilterToken::Qualified { key, value } => {
                let key = key.to_lowercase();
                if key == "state" || key == "estado" {
                    let value = value.to_lowercase();
                    if ACTIVE_WORDS.contains(&value.as_str()) {
                        conditions.push(format!("({})", columns.active));
                    } else if INACTIVE_WORDS.contains(&value.as_str()) {
                        conditions.push(format!("NOT ({})", columns.active));
                    } else {
                        conditions.push("0".to_string());
                    }
                } else if key == "role" || key == "rol" {
                    match columns.role {
                        Some(template) => {
                            conditions.push(template.to_string());
                            params.push(like_pattern(value));
                        }
                        None => conditions.push("0".to_string()),
                    }
                } else if let Some((_, expr)) =
                    columns.fields.iter().find(|(field, _)| *field == key)
                {
                    conditions.push(like(expr));
                    params.push(like_pattern(value));
                } else {
                    conditions.push("0".to_string());
                }
            }
        }
    }

    let sql = if conditions.is_empty() {
        "1".to_string()
    } else {
        conditions.join(" AND ")
    };
    FilterClause { sql, params }
}
