//! Collects header, syntax and validation findings into one ordered list.

use crate::types::{CodeWarning, ParsedBatch, Severity, Transfer};
use crate::validate::validate_transfer;

/// Columns a batch file may contain.
pub const HEADER_FIELDS: [&str; 6] = [
    "token_type",
    "token_address",
    "receiver",
    "value",
    "amount",
    "id",
];

/// Checks the header row. Unknown columns are a single line-0 error.
pub fn validate_headers<'a>(fields: impl IntoIterator<Item = &'a str>) -> Option<CodeWarning> {
    let unknown: Vec<&str> = fields
        .into_iter()
        .filter(|field| !HEADER_FIELDS.contains(field))
        .collect();
    if unknown.is_empty() {
        return None;
    }
    Some(CodeWarning {
        message: format!("Unknown header field(s): {}", unknown.join(", ")),
        severity: Severity::Error,
        line_num: 0,
    })
}

pub fn syntax_error(line_num: usize, message: impl Into<String>) -> CodeWarning {
    CodeWarning {
        message: message.into(),
        severity: Severity::Error,
        line_num,
    }
}

/// Validates every transformed row. Rows without findings become the
/// accepted transfers; everything else is reported.
///
/// Warnings are ordered by line, keeping the order in which they were
/// produced within a line.
pub fn collect_results(
    rows: Vec<(usize, Transfer)>,
    syntax_errors: Vec<CodeWarning>,
) -> ParsedBatch {
    let mut transfers = Vec::with_capacity(rows.len());
    let mut warnings = syntax_errors;

    for (line_num, transfer) in rows {
        let messages = validate_transfer(&transfer);
        if messages.is_empty() {
            transfers.push(transfer);
            continue;
        }
        warnings.extend(messages.into_iter().map(|message| CodeWarning {
            message,
            severity: Severity::Warning,
            line_num,
        }));
    }

    warnings.sort_by_key(|warning| warning.line_num);
    ParsedBatch { transfers, warnings }
}
