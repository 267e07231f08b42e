// quackrun-core/src/domain/statement.rs

use regex::Regex;
use sqlparser::ast::{CopyTarget, Statement};
use sqlparser::dialect::DuckDbDialect;
use sqlparser::parser::Parser;
use std::sync::OnceLock;

/// What a SQL text does, as far as the runner cares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementKind {
    /// Returns rows meant for display (SELECT, SHOW, DESCRIBE, PRAGMA...).
    Select,
    /// `COPY ... TO '<target>'`: writes a file, returns an affected-row count.
    Export { target: Option<String> },
    /// DDL/DML and anything else.
    Other,
}

impl StatementKind {
    pub fn is_export(&self) -> bool {
        matches!(self, StatementKind::Export { .. })
    }

    pub fn export_target(&self) -> Option<&str> {
        match self {
            StatementKind::Export { target } => target.as_deref(),
            _ => None,
        }
    }
}

fn copy_to_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?is)^\s*COPY\b.*\bTO\s+'((?:[^']|'')*)'").unwrap_or_else(|_| {
            // Never reached with a static pattern
            Regex::new("$^").unwrap_or_else(|_| unreachable!())
        })
    })
}

const ROW_RETURNING_KEYWORDS: [&str; 9] = [
    "SELECT", "WITH", "FROM", "VALUES", "SHOW", "DESCRIBE", "DESC", "PRAGMA", "SUMMARIZE",
];

/// Classify the text by its last statement.
///
/// DuckDB runs every statement but the last while preparing, and the last
/// one produces the returned rows, so that is the one that counts.
/// DuckDB accepts syntax the parser doesn't know (`SHOW ALL TABLES`,
/// `FROM tbl`, `SUMMARIZE`), so a parse failure falls back to a keyword check.
pub fn classify(sql: &str) -> StatementKind {
    match Parser::parse_sql(&DuckDbDialect {}, sql) {
        Ok(statements) => match statements.last() {
            Some(Statement::Copy { to: true, target, .. }) => StatementKind::Export {
                target: match target {
                    CopyTarget::File { filename } => Some(filename.clone()),
                    _ => None,
                },
            },
            Some(Statement::Query(_)) => StatementKind::Select,
            Some(
                Statement::ShowTables { .. }
                | Statement::ShowColumns { .. }
                | Statement::ShowVariable { .. }
                | Statement::ExplainTable { .. }
                | Statement::Pragma { .. },
            ) => StatementKind::Select,
            Some(_) => StatementKind::Other,
            None => StatementKind::Other,
        },
        Err(e) => {
            tracing::debug!("SQL parser fallback ({}), classifying by keyword", e);
            classify_by_keyword(last_statement(sql))
        }
    }
}

/// Text of the last non-empty statement, splitting on `;` outside quotes.
fn last_statement(sql: &str) -> &str {
    let mut quote: Option<char> = None;
    let mut start = 0;
    let mut last = sql;

    for (i, c) in sql.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '\'' | '"') => quote = Some(c),
            (None, ';') => {
                if !sql[start..i].trim().is_empty() {
                    last = &sql[start..i];
                }
                start = i + 1;
            }
            (None, _) => {}
        }
    }
    if !sql[start..].trim().is_empty() {
        last = &sql[start..];
    }
    last
}

fn classify_by_keyword(sql: &str) -> StatementKind {
    if let Some(caps) = copy_to_regex().captures(sql) {
        let target = caps.get(1).map(|m| m.as_str().replace("''", "'"));
        return StatementKind::Export { target };
    }

    let first_word = sql
        .trim_start_matches(|c: char| c.is_whitespace() || c == '(')
        .split(|c: char| c.is_whitespace() || c == '(' || c == ';')
        .next()
        .unwrap_or_default()
        .to_ascii_uppercase();

    if ROW_RETURNING_KEYWORDS.contains(&first_word.as_str()) {
        StatementKind::Select
    } else {
        StatementKind::Other
    }
}
