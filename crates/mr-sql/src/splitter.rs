//! Statement splitting

use crate::error::{SqlError, SqlResult};
use sqlparser::dialect::{Dialect, PostgreSqlDialect};
use sqlparser::tokenizer::{Location, Token, Tokenizer};

/// Split SQL on every `;`, trimming whitespace and dropping empty fragments.
///
/// Semicolons inside string literals, comments or function bodies also split,
/// so this is only safe for files made of simple statements.
pub fn split_naive(sql: &str) -> Vec<String> {
    sql.split(';')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Tokenizer-based statement splitter
///
/// Only top-level `;` tokens end a statement. Fragments are returned trimmed,
/// without their terminating `;`, and byte-for-byte as written in the source.
/// Fragments containing nothing but whitespace and comments are dropped.
pub struct StatementSplitter {
    dialect: Box<dyn Dialect + Send + Sync>,
}

impl StatementSplitter {
    /// Create a splitter for PostgreSQL (supports `$tag$` quoting)
    pub fn postgres() -> Self {
        Self {
            dialect: Box::new(PostgreSqlDialect {}),
        }
    }

    /// Split SQL text into statements
    pub fn split(&self, sql: &str) -> SqlResult<Vec<String>> {
        let tokens = Tokenizer::new(self.dialect.as_ref(), sql)
            .with_unescape(false)
            .tokenize_with_location()
            .map_err(|e| SqlError::Tokenize {
                message: e.message.clone(),
                line: e.location.line,
                column: e.location.column,
            })?;

        let offsets = LineOffsets::new(sql);
        let mut statements = Vec::new();
        let mut start = 0;
        let mut significant = false;

        for token in &tokens {
            match &token.token {
                Token::SemiColon => {
                    let end = offsets.byte_offset(sql, token.span.start)?;
                    if significant {
                        statements.push(sql[start..end].trim().to_string());
                    }
                    start = end + 1;
                    significant = false;
                }
                Token::Whitespace(_) | Token::EOF => {}
                _ => significant = true,
            }
        }

        if significant {
            statements.push(sql[start..].trim().to_string());
        }

        Ok(statements)
    }
}

impl Default for StatementSplitter {
    fn default() -> Self {
        Self::postgres()
    }
}

/// Maps tokenizer locations (1-based line, 1-based char column) to byte offsets
struct LineOffsets {
    starts: Vec<usize>,
}

impl LineOffsets {
    fn new(sql: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(sql.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    fn byte_offset(&self, sql: &str, location: Location) -> SqlResult<usize> {
        let out_of_range = || SqlError::LocationOutOfRange {
            line: location.line,
            column: location.column,
        };

        let line_index = usize::try_from(location.line)
            .ok()
            .and_then(|l| l.checked_sub(1))
            .ok_or_else(out_of_range)?;
        let line_start = *self.starts.get(line_index).ok_or_else(out_of_range)?;
        let column = usize::try_from(location.column)
            .ok()
            .and_then(|c| c.checked_sub(1))
            .ok_or_else(out_of_range)?;

        sql[line_start..]
            .char_indices()
            .nth(column)
            .map(|(i, _)| line_start + i)
            .ok_or_else(out_of_range)
    }
}

#[cfg(test)]
#[path = "splitter_test.rs"]
mod tests;
