use serde::{Deserialize, Serialize};

/// Text formats recognised by object path extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileType {
    Markdown,
    PlainText,
    Csv,
    Json,
}

impl FileType {
    /// Classify an object path by its extension, ignoring case.
    ///
    /// Returns `None` for unrecognised or missing extensions.
    pub fn from_path(object_path: &str) -> Option<Self> {
        let lower = object_path.to_lowercase();

        if lower.ends_with(".md") || lower.ends_with(".markdown") {
            Some(FileType::Markdown)
        } else if lower.ends_with(".txt") {
            Some(FileType::PlainText)
        } else if lower.ends_with(".csv") {
            Some(FileType::Csv)
        } else if lower.ends_with(".json") {
            Some(FileType::Json)
        } else {
            None
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            FileType::Markdown => "text/markdown",
            FileType::PlainText => "text/plain",
            FileType::Csv => "text/csv",
            FileType::Json => "application/json",
        }
    }

    pub fn is_markdown(self) -> bool {
        self == FileType::Markdown
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_extensions() {
        assert_eq!(FileType::from_path("notes/a.md"), Some(FileType::Markdown));
        assert_eq!(FileType::from_path("a.markdown"), Some(FileType::Markdown));
        assert_eq!(FileType::from_path("a.txt"), Some(FileType::PlainText));
        assert_eq!(FileType::from_path("data/a.csv"), Some(FileType::Csv));
        assert_eq!(FileType::from_path("a.json"), Some(FileType::Json));
    }

    #[test]
    fn test_extension_match_ignores_case() {
        assert_eq!(FileType::from_path("README.MD"), Some(FileType::Markdown));
        assert_eq!(FileType::from_path("Export.Csv"), Some(FileType::Csv));
        assert_eq!(
            FileType::from_path("a.JSON").map(FileType::mime_type),
            Some("application/json")
        );
    }

    #[test]
    fn test_unknown_extensions() {
        assert_eq!(FileType::from_path("photo.png"), None);
        assert_eq!(FileType::from_path("Makefile"), None);
        assert_eq!(FileType::from_path("archive.md.gz"), None);
        assert_eq!(FileType::from_path("md"), None);
    }
}
