//! Common CLI types shared across commands

/// Sort direction for list commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum SortDir {
    /// Ascending order
    Asc,
    /// Descending order
    Desc,
}

impl SortDir {
    /// Apply the direction to a sort field the way the admin API expects
    /// (`-field` for descending).
    pub fn apply(self, field: &str) -> String {
        let field = field.trim_start_matches('-');
        match self {
            SortDir::Asc => field.to_string(),
            SortDir::Desc => format!("-{}", field),
        }
    }
}

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-optimized rich formatting
    #[default]
    Pretty,
    /// Table format - machine-parseable, one row per entry
    Table,
    /// JSON format - structured for scripts/APIs
    Json,
}
