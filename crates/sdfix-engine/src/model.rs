//! Request metadata and the remediation result record

/// Where a block of code came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceMetadata {
    /// Program name
    pub pgm_name: String,

    /// Include name
    pub inc_name: String,

    /// Object type (e.g., "PROG", "CLAS", "FUGR")
    pub object_type: String,

    /// Optional object name; empty when not supplied
    pub name: Option<String>,

    /// Optional class implementation marker; empty when not supplied
    pub class_implementation: Option<String>,
}

impl SourceMetadata {
    /// Create metadata with the optional fields set to empty strings
    pub fn new(
        pgm_name: impl Into<String>,
        inc_name: impl Into<String>,
        object_type: impl Into<String>,
    ) -> Self {
        Self {
            pgm_name: pgm_name.into(),
            inc_name: inc_name.into(),
            object_type: object_type.into(),
            name: Some(String::new()),
            class_implementation: Some(String::new()),
        }
    }

    /// Set the object name
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the class implementation marker
    pub fn with_class_implementation(mut self, class_implementation: impl Into<String>) -> Self {
        self.class_implementation = Some(class_implementation.into());
        self
    }
}

/// Outcome of remediating one block of code.
///
/// `original_code` is the input exactly as received.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemediationResult {
    /// Metadata echoed from the request
    pub metadata: SourceMetadata,

    /// Untouched input
    pub original_code: String,

    /// Input after all rewrite rules were applied
    pub remediated_code: String,
}
