/// Form value that selects the networked backend
const NETWORKED_FLAG: &str = "true";

/// Speech synthesis backend used for a conversion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SynthesisBackend {
    /// Local engine, whole text in one call
    Local,
    /// Remote engine, text synthesized in fixed-size chunks
    Networked,
}

impl SynthesisBackend {
    /// Resolve the backend from the optional `use_gtts` form field.
    /// Only the exact value `"true"` selects the networked engine.
    pub fn from_form_value(value: Option<&str>) -> Self {
        match value {
            Some(NETWORKED_FLAG) => SynthesisBackend::Networked,
            _ => SynthesisBackend::Local,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SynthesisBackend::Local => "local",
            SynthesisBackend::Networked => "networked",
        }
    }
}

impl std::fmt::Display for SynthesisBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
