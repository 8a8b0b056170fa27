/// Default maximum number of data rows per batch.
pub const DEFAULT_LINE_LIMIT: usize = 500;

/// Parser settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseConfig {
    /// Maximum number of data rows. The header line is not counted.
    pub line_limit: usize,
    /// Upper bound on rows transformed concurrently. `None` transforms all
    /// rows at once.
    pub max_concurrent_rows: Option<usize>,
}

impl Default for ParseConfig {
    fn default() -> Self {
        Self {
            line_limit: DEFAULT_LINE_LIMIT,
            max_concurrent_rows: None,
        }
    }
}

impl ParseConfig {
    pub fn with_line_limit(mut self, line_limit: usize) -> Self {
        self.line_limit = line_limit;
        self
    }

    pub fn with_max_concurrent_rows(mut self, max_concurrent_rows: usize) -> Self {
        self.max_concurrent_rows = Some(max_concurrent_rows.max(1));
        self
    }
}
