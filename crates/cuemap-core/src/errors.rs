use thiserror::Error;

/// Result type alias using the canonical error facility
pub type Result<T> = std::result::Result<T, CueError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that can be used for programmatic
/// error handling, testing, and CLI exit reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CueErrorKind {
    /// A required input (old dictionary, container map) could not be found
    NotFound,
    /// An input table is structurally invalid (bad column, duplicate container)
    InvalidInput,
    /// Run configuration could not be parsed or is incomplete
    Config,

    // Integration/IO
    Io,
    Serialization,

    /// A pipeline invariant was broken (out-of-range slot, unowned index)
    Internal,
}

impl CueErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            CueErrorKind::NotFound => "ERR_NOT_FOUND",
            CueErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            CueErrorKind::Config => "ERR_CONFIG",
            CueErrorKind::Io => "ERR_IO",
            CueErrorKind::Serialization => "ERR_SERIALIZATION",
            CueErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus optional
/// context (operation, container, file path, index) for debugging.
#[derive(Debug, Clone)]
pub struct CueError {
    kind: CueErrorKind,
    op: Option<String>,
    container: Option<String>,
    path: Option<String>,
    index: Option<i64>,
    message: String,
}

impl CueError {
    /// Create a new error with the specified kind
    pub fn new(kind: CueErrorKind) -> Self {
        Self {
            kind,
            op: None,
            container: None,
            path: None,
            index: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add container name context
    pub fn with_container(mut self, container: impl Into<String>) -> Self {
        self.container = Some(container.into());
        self
    }

    /// Add file path context
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Add global index context
    pub fn with_index(mut self, index: i64) -> Self {
        self.index = Some(index);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> CueErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn container(&self) -> Option<&str> {
        self.container.as_deref()
    }

    pub fn path(&self) -> Option<&str> {
        self.path.as_deref()
    }

    pub fn index(&self) -> Option<i64> {
        self.index
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for CueError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(container) = &self.container {
            write!(f, " (container: {})", container)?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path)?;
        }
        if let Some(index) = self.index {
            write!(f, " (index: {})", index)?;
        }
        Ok(())
    }
}

impl std::error::Error for CueError {}

// ========== End Error Facility ==========

/// Failures raised by the remapping stages themselves
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RemapError {
    /// The container map lists the same container twice
    #[error("Duplicate container in layout: {name}")]
    DuplicateContainer { name: String },

    /// Track counts sum past the largest representable index
    #[error("Layout overflows the index space at container {name}")]
    LayoutOverflow { name: String },

    /// An event points at a slot outside the new layout
    #[error("Index {index} is outside the new layout (total tracks: {total})")]
    SlotOutOfRange { index: i64, total: usize },

    /// A slot needs a placeholder but no container owns it
    #[error("No container owns index {index}")]
    UnownedIndex { index: u32 },

    /// The manifest line pattern failed to compile
    #[error("Invalid manifest line pattern: {message}")]
    Pattern { message: String },
}

impl From<RemapError> for CueError {
    fn from(err: RemapError) -> Self {
        match err {
            RemapError::DuplicateContainer { name } => CueError::new(CueErrorKind::InvalidInput)
                .with_op("build_layout")
                .with_container(name)
                .with_message("Container listed more than once in the container map"),

            RemapError::LayoutOverflow { name } => CueError::new(CueErrorKind::InvalidInput)
                .with_op("build_layout")
                .with_container(name)
                .with_message("Total track count exceeds the index space"),

            RemapError::SlotOutOfRange { index, total } => CueError::new(CueErrorKind::Internal)
                .with_op("build_dictionary")
                .with_index(index)
                .with_message(format!(
                    "Event index outside the new layout of {} tracks",
                    total
                )),

            RemapError::UnownedIndex { index } => CueError::new(CueErrorKind::Internal)
                .with_op("build_dictionary")
                .with_index(i64::from(index))
                .with_message("No container owns this index"),

            RemapError::Pattern { message } => CueError::new(CueErrorKind::Internal)
                .with_op("classify_manifests")
                .with_message(message),
        }
    }
}
