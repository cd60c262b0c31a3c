//! filemeta processing library
//!
//! Pure content analysis for ingested objects: classification by extension,
//! Markdown frontmatter parsing and the derived text metrics. Nothing here
//! performs I/O.

pub mod extractor;
pub mod file_type;
pub mod frontmatter;
pub mod metadata;
pub mod text;

pub use extractor::extract_metadata;
pub use file_type::FileType;
pub use frontmatter::{split_frontmatter, FrontmatterDocument, FrontmatterError};
pub use metadata::ExtractedMetadata;
