use serde::Serialize;

use crate::FileType;

/// Fields derived from one downloaded object
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractedMetadata {
    /// `Name` from Markdown frontmatter
    pub display_name: Option<String>,
    /// `None` when the content was not treated as text
    pub word_count: Option<usize>,
    pub first_line: Option<String>,
    pub file_type: Option<FileType>,
}

impl ExtractedMetadata {
    /// MIME type derived from the extension, if recognised
    pub fn mime_type(&self) -> Option<&'static str> {
        self.file_type.map(FileType::mime_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_serialization() {
        let metadata = ExtractedMetadata {
            display_name: Some("Report".to_string()),
            word_count: Some(2),
            first_line: Some("Hello world".to_string()),
            file_type: Some(FileType::Markdown),
        };

        let json = serde_json::to_value(&metadata).unwrap();
        assert_eq!(json["display_name"], "Report");
        assert_eq!(json["word_count"], 2);
        assert_eq!(json["file_type"], "markdown");
        assert_eq!(metadata.mime_type(), Some("text/markdown"));
    }

    #[test]
    fn test_default_has_no_mime_type() {
        assert_eq!(ExtractedMetadata::default().mime_type(), None);
    }
}
