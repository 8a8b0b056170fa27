//! CSV batch parsing: line limit, header check, row reading, and the
//! concurrent fan-out into the transformer.

use csv::{ErrorKind, ReaderBuilder, StringRecord};
use futures::future::join_all;
use futures::stream::{self, StreamExt};
use tracing::{debug, info};

use crate::config::ParseConfig;
use crate::error::TransferError;
use crate::provider::Providers;
use crate::transform::transform_row;
use crate::types::{CodeWarning, CsvRow, ParsedBatch, Transfer};
use crate::warnings::{collect_results, syntax_error, validate_headers};

/// Parses a batch with the default [`ParseConfig`].
pub async fn parse_csv(
    text: &str,
    providers: Providers<'_>,
) -> Result<ParsedBatch, TransferError> {
    parse_csv_with_config(text, providers, &ParseConfig::default()).await
}

/// Parses a batch of transfers.
///
/// Only exceeding the line limit is fatal. Header problems, malformed rows
/// and invalid transfers all end up in [`ParsedBatch::warnings`].
pub async fn parse_csv_with_config(
    text: &str,
    providers: Providers<'_>,
    config: &ParseConfig,
) -> Result<ParsedBatch, TransferError> {
    let line_count = count_lines(text);
    if line_count > config.line_limit + 1 {
        return Err(TransferError::LineLimitExceeded {
            limit: config.line_limit,
        });
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .from_reader(text.as_bytes());

    let headers = match reader.headers() {
        Ok(headers) => headers.clone(),
        Err(err) => {
            return Ok(ParsedBatch {
                transfers: Vec::new(),
                warnings: vec![syntax_error(0, err.to_string())],
            });
        }
    };
    if let Some(warning) = validate_headers(headers.iter()) {
        debug!(message = %warning.message, "rejected header");
        return Ok(ParsedBatch {
            transfers: Vec::new(),
            warnings: vec![warning],
        });
    }

    let (rows, syntax_errors) = read_rows(&mut reader, &headers);
    debug!(rows = rows.len(), syntax_errors = syntax_errors.len(), "read csv rows");

    let transforms = rows
        .iter()
        .map(|(line_num, row)| async move { (*line_num, transform_row(row, providers).await) });
    let transformed: Vec<(usize, Transfer)> = match config.max_concurrent_rows {
        Some(limit) => stream::iter(transforms).buffered(limit.max(1)).collect().await,
        None => join_all(transforms).await,
    };

    let batch = collect_results(transformed, syntax_errors);
    info!(
        lines = line_count,
        transfers = batch.transfers.len(),
        warnings = batch.warnings.len(),
        "parsed transfer batch"
    );
    Ok(batch)
}

/// Number of lines, not counting a single trailing line break.
fn count_lines(text: &str) -> usize {
    let body = text
        .strip_suffix("\r\n")
        .or_else(|| text.strip_suffix('\n'))
        .or_else(|| text.strip_suffix('\r'))
        .unwrap_or(text);
    body.replace("\r\n", "\n").split(['\n', '\r']).count()
}

/// Reads all data rows. Rows are numbered from 1 in file order, skipping
/// blank lines. Rows without a receiver are dropped.
fn read_rows<R: std::io::Read>(
    reader: &mut csv::Reader<R>,
    headers: &StringRecord,
) -> (Vec<(usize, CsvRow)>, Vec<CodeWarning>) {
    let mut rows = Vec::new();
    let mut errors = Vec::new();

    for (index, record) in reader.records().enumerate() {
        let line_num = index + 1;
        let record = match record {
            Ok(record) => record,
            Err(err) => {
                errors.push(syntax_error(line_num, describe_csv_error(&err)));
                continue;
            }
        };

        let row = to_row(headers, &record);
        if row.receiver.as_deref().is_some_and(|receiver| !receiver.is_empty()) {
            rows.push((line_num, row));
        }
    }

    (rows, errors)
}

fn to_row(headers: &StringRecord, record: &StringRecord) -> CsvRow {
    let field = |name: &str| {
        headers
            .iter()
            .position(|header| header == name)
            .and_then(|index| record.get(index))
            .map(str::to_string)
    };
    CsvRow {
        token_type: field("token_type"),
        token_address: field("token_address"),
        receiver: field("receiver"),
        value: field("value"),
        amount: field("amount"),
        id: field("id"),
    }
}

fn describe_csv_error(err: &csv::Error) -> String {
    match err.kind() {
        ErrorKind::UnequalLengths {
            expected_len, len, ..
        } => {
            let direction = if len > expected_len { "many" } else { "few" };
            format!("Too {direction} fields: expected {expected_len} fields but parsed {len}")
        }
        _ => err.to_string(),
    }
}
