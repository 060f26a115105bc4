use std::fmt;
use std::str::FromStr;

use crate::error::ExtractError;

/// Document formats the extractor understands, keyed by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentFormat {
    Text,
    Pdf,
    Docx,
    /// Legacy Word. Read with the DOCX reader, so only OOXML bodies that
    /// carry a `.doc` name succeed.
    Doc,
}

impl DocumentFormat {
    pub fn from_extension(ext: &str) -> Result<Self, ExtractError> {
        match ext.to_lowercase().as_str() {
            "txt" => Ok(Self::Text),
            "pdf" => Ok(Self::Pdf),
            "docx" => Ok(Self::Docx),
            "doc" => Ok(Self::Doc),
            other => Err(ExtractError::UnsupportedFormat(other.to_string())),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Text => "txt",
            Self::Pdf => "pdf",
            Self::Docx => "docx",
            Self::Doc => "doc",
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = ExtractError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_extension(s)
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}
