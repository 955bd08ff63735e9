use thiserror::Error;

#[derive(Error, Debug)]
pub enum MarginError {
    #[error("Failed to load PDF: {0}")]
    Load(#[source] lopdf::Error),
    #[error("Failed to add margin to page {page}: {reason}")]
    Transform { page: usize, reason: String },
    #[error("Unsupported page content: {0}")]
    UnsupportedContent(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("Failed to serialize PDF: {0}")]
    Serialize(String),
    #[error("No documents were processed successfully")]
    NoOutputs,
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, MarginError>;

/// Which edge(s) of a page receive the inserted blank space
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum MarginSide {
    /// Blank space before the content; content shifts right
    #[default]
    Left,
    /// Blank space after the content; content stays at the origin
    Right,
    /// Blank space on both edges; page grows by twice the margin
    Both,
}

impl MarginSide {
    pub fn as_str(self) -> &'static str {
        match self {
            MarginSide::Left => "left",
            MarginSide::Right => "right",
            MarginSide::Both => "both",
        }
    }
}

impl std::str::FromStr for MarginSide {
    type Err = MarginError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" => Ok(MarginSide::Left),
            "right" => Ok(MarginSide::Right),
            "both" => Ok(MarginSide::Both),
            other => Err(MarginError::InvalidConfig(format!(
                "Unknown margin side '{}' (expected left, right or both)",
                other
            ))),
        }
    }
}

impl std::fmt::Display for MarginSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Margin size and placement, shared by every page that receives a margin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarginConfig {
    /// Margin width in points (PDF user space units)
    pub size: u32,
    pub side: MarginSide,
}

impl Default for MarginConfig {
    fn default() -> Self {
        Self {
            size: crate::constants::DEFAULT_MARGIN_SIZE,
            side: MarginSide::default(),
        }
    }
}

impl MarginConfig {
    pub fn new(size: u32, side: MarginSide) -> Self {
        Self { size, side }
    }

    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(MarginError::InvalidConfig(
                "Margin size must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Which pages of a document receive the margin
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(
    feature = "serde",
    serde(tag = "mode", content = "expression", rename_all = "lowercase")
)]
pub enum RangeMode {
    /// Every page
    #[default]
    All,
    /// Pages 1, 3, 5, ... (1-based)
    Odd,
    /// Pages 2, 4, 6, ... (1-based)
    Even,
    /// A range expression such as `"1-3, 5, 8-10"`; blank means every page
    Custom(String),
}

impl RangeMode {
    /// Build a mode from its textual name and an optional custom expression.
    ///
    /// `custom` without an expression selects every page, like an empty one.
    pub fn from_parts(mode: &str, expression: Option<&str>) -> Result<Self> {
        match mode.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(RangeMode::All),
            "odd" => Ok(RangeMode::Odd),
            "even" => Ok(RangeMode::Even),
            "custom" => Ok(RangeMode::Custom(expression.unwrap_or_default().to_string())),
            other => Err(MarginError::InvalidConfig(format!(
                "Unknown page selection mode '{}' (expected all, odd, even or custom)",
                other
            ))),
        }
    }
}

/// A named source document as handed over by the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl SourceFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// The margin-applied PDF produced for one source document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessedOutput {
    pub source_name: String,
    pub bytes: Vec<u8>,
}

/// A source document that could not be processed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentFailure {
    pub source_name: String,
    pub error: String,
}

/// Outcome of one batch run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchResult {
    /// Successful outputs, in input order
    pub outputs: Vec<ProcessedOutput>,
    /// Failed inputs, in input order
    pub failures: Vec<DocumentFailure>,
}

impl BatchResult {
    /// Error description recorded for a source name, if it failed
    pub fn failure(&self, source_name: &str) -> Option<&str> {
        self.failures
            .iter()
            .find(|f| f.source_name == source_name)
            .map(|f| f.error.as_str())
    }

    pub fn is_complete_success(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Progress event emitted after each document of a batch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchProgress {
    pub completed: usize,
    pub total: usize,
    /// Name of the document that just finished, if any
    pub source_name: Option<String>,
    /// Whether that document succeeded
    pub succeeded: bool,
}

impl BatchProgress {
    /// Whole-batch progress as a percentage in `0..=100`
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return 100;
        }
        ((self.completed * 100) / self.total) as u8
    }

    pub fn is_finished(&self) -> bool {
        self.completed == self.total
    }
}

/// Summary of what a margin run would do to one document
#[derive(Debug, Clone, PartialEq)]
pub struct MarginStatistics {
    /// Total pages in the source document
    pub total_pages: usize,
    /// Pages that receive a margin
    pub pages_with_margin: usize,
    /// Narrowest and widest output page width, in points
    pub output_width_range: Option<(f32, f32)>,
    /// Horizontal space added across the whole document, in points
    pub added_width_total: f32,
}
