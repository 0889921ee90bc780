//! Structured diagnostics for the compilation run
//!
//! Every stage reports through the same [`Diagnostic`] shape so the external
//! driver can print one ordered list and derive the exit status: any
//! error-severity diagnostic means the run failed, warnings alone do not.
//!
//! Ordering is part of the contract: diagnostics sort by severity (errors
//! first), then file id, then line, then column. The sort is stable, so
//! diagnostics that tie on all keys keep their emission order.

use crate::cram::ast::range::Position;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity. Declared errors-first so the derived ordering gives
/// the severity-descending sort directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// One user-facing message with an exact source position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable machine-readable code, e.g. "dangling-link-target".
    pub code: String,
    pub message: String,
    pub file_id: String,
    pub position: Position,
}

impl Diagnostic {
    pub fn error(code: &str, message: String, file_id: &str, position: Position) -> Self {
        Self {
            severity: Severity::Error,
            code: code.to_string(),
            message,
            file_id: file_id.to_string(),
            position,
        }
    }

    pub fn warning(code: &str, message: String, file_id: &str, position: Position) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.to_string(),
            message,
            file_id: file_id.to_string(),
            position,
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} [{}] {}:{}: {}",
            self.severity, self.code, self.file_id, self.position, self.message
        )
    }
}

/// Sort diagnostics into the contract order:
/// (severity desc, file id, line, column). Stable.
pub fn sort_diagnostics(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.file_id.cmp(&b.file_id))
            .then_with(|| a.position.cmp(&b.position))
    });
}
