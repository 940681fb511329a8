use std::str::SplitWhitespace;

use thiserror::Error;

use crate::record::{EMAIL_SIZE, Row, USERNAME_SIZE};

/// A parsed, validated statement ready for execution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Insert(Row),
    Select,
}

/// Rejections produced while parsing a statement line. The `Display` form
/// is the exact message printed back to the user; none of these mutate the
/// table.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StatementError {
    #[error("Unrecognized keyword at start of '{0}'")]
    UnrecognizedKeyword(String),

    #[error("Syntax error")]
    SyntaxError,

    #[error("ID must be positive")]
    NonPositiveId,

    #[error("String too long")]
    StringTooLong,
}

impl Statement {
    /// Parse one whitespace-separated statement line. The input is assumed
    /// non-empty and not a meta-command.
    pub fn parse(input: &str) -> Result<Statement, StatementError> {
        let mut parts = input.split_whitespace();
        match parts.next() {
            Some("insert") => Self::parse_insert(parts),
            Some("select") => match parts.next() {
                None => Ok(Statement::Select),
                Some(_) => Err(StatementError::SyntaxError),
            },
            _ => Err(StatementError::UnrecognizedKeyword(input.to_string())),
        }
    }

    fn parse_insert(mut args: SplitWhitespace<'_>) -> Result<Statement, StatementError> {
        let (Some(id), Some(username), Some(email), None) =
            (args.next(), args.next(), args.next(), args.next())
        else {
            return Err(StatementError::SyntaxError);
        };

        let id: i64 = id.parse().map_err(|_| StatementError::SyntaxError)?;
        if id <= 0 {
            return Err(StatementError::NonPositiveId);
        }
        let id = u32::try_from(id).map_err(|_| StatementError::SyntaxError)?;

        // Byte lengths, not character counts: the row slot stores raw bytes.
        if username.len() > USERNAME_SIZE || email.len() > EMAIL_SIZE {
            return Err(StatementError::StringTooLong);
        }

        Ok(Statement::Insert(Row {
            id,
            username: username.to_string(),
            email: email.to_string(),
        }))
    }
}
