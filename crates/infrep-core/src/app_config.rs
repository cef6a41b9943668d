use std::str::FromStr;

/// How `report` renders tables on stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Markdown,
    Json,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Table => write!(f, "table"),
            OutputFormat::Markdown => write!(f, "markdown"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "markdown" | "md" => Ok(OutputFormat::Markdown),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!(
                "unknown output format '{other}'; expected table, markdown, or json"
            )),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub log_level: String,
    /// Inputs larger than this are rejected before parsing.
    pub max_input_bytes: u64,
    pub cache_enabled: bool,
    pub output_format: OutputFormat,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("log_level", &self.log_level)
            .field("max_input_bytes", &self.max_input_bytes)
            .field("cache_enabled", &self.cache_enabled)
            .field("output_format", &self.output_format.to_string())
            .finish()
    }
}
