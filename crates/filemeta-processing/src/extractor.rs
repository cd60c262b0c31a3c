//! Metadata extraction for a downloaded object

use std::borrow::Cow;

use crate::frontmatter::{split_frontmatter, FrontmatterDocument};
use crate::text::{first_line, word_count};
use crate::{ExtractedMetadata, FileType};

/// Frontmatter key holding the display name
pub const DISPLAY_NAME_KEY: &str = "Name";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Decode content as text.
///
/// Recognised types are decoded lossily. Anything else is treated as text only
/// when it is valid UTF-8 or the storage layer reported a `text/*` type.
/// A leading byte order mark is dropped.
fn decode_text<'a>(
    content: &'a [u8],
    file_type: Option<FileType>,
    event_mimetype: Option<&str>,
) -> Option<Cow<'a, str>> {
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(content);
    if file_type.is_some() {
        return Some(String::from_utf8_lossy(content));
    }
    if let Ok(text) = std::str::from_utf8(content) {
        return Some(Cow::Borrowed(text));
    }
    if event_mimetype.is_some_and(|m| m.to_lowercase().starts_with("text/")) {
        return Some(String::from_utf8_lossy(content));
    }
    None
}

/// Derive display name, word count, first line and file type for one object.
pub fn extract_metadata(
    object_path: &str,
    content: &[u8],
    event_mimetype: Option<&str>,
) -> ExtractedMetadata {
    let file_type = FileType::from_path(object_path);

    let Some(text) = decode_text(content, file_type, event_mimetype) else {
        tracing::debug!(
            object_path = %object_path,
            size_bytes = content.len(),
            "Content is not text, skipping derived fields"
        );
        return ExtractedMetadata {
            file_type,
            ..Default::default()
        };
    };

    let mut display_name = None;
    let mut body: &str = &text;

    if file_type.is_some_and(FileType::is_markdown) {
        match split_frontmatter(&text) {
            Some((block, remainder)) => {
                body = remainder;
                match FrontmatterDocument::parse(block) {
                    Ok(document) => display_name = document.get_str(DISPLAY_NAME_KEY),
                    Err(e) => tracing::warn!(
                        error = %e,
                        object_path = %object_path,
                        "Error parsing YAML frontmatter"
                    ),
                }
            }
            None => tracing::warn!(
                object_path = %object_path,
                "No YAML frontmatter found"
            ),
        }
    }

    ExtractedMetadata {
        display_name,
        word_count: Some(word_count(body)),
        first_line: Some(first_line(body).to_string()),
        file_type,
    }
}
