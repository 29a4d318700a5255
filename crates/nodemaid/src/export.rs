//! Output containers for serialized diagrams.
//!
//! This module turns Mermaid text into the file that ends up on disk. It is
//! the final stage of an export:
//!
//! ```text
//! Scene snapshot
//!     ↓ operator (select object and modifier)
//! Node graph
//!     ↓ mermaid
//! Diagram text
//!     ↓ export (this module)
//! Markdown or HTML file
//! ```
//!
//! A [`Document`] pairs the final text with its normalized path; writing it
//! opens, fills and closes the file in one scoped call.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use log::debug;

use nodemaid_core::format::ExportFormat;

use crate::config::HtmlConfig;

/// Appends the format's extension to `path` unless its file name already
/// ends with it.
///
/// The extension is appended, never substituted, so `graph.txt` becomes
/// `graph.txt.md`. A file name that is only the extension, like `.md`, is
/// left alone.
///
/// # Examples
///
/// ```
/// use std::path::{Path, PathBuf};
///
/// use nodemaid::export::normalize_path;
/// use nodemaid_core::format::ExportFormat;
///
/// assert_eq!(
///     normalize_path(Path::new("out/tree"), ExportFormat::Html),
///     PathBuf::from("out/tree.html")
/// );
/// assert_eq!(
///     normalize_path(Path::new("out/tree.md"), ExportFormat::Markdown),
///     PathBuf::from("out/tree.md")
/// );
/// ```
pub fn normalize_path(path: &Path, format: ExportFormat) -> PathBuf {
    let extension = format.extension();
    let suffix = format!(".{extension}");
    if path
        .file_name()
        .is_some_and(|name| name.as_encoded_bytes().ends_with(suffix.as_bytes()))
    {
        return path.to_path_buf();
    }

    let mut raw = path.as_os_str().to_os_string();
    raw.push(".");
    raw.push(extension);
    PathBuf::from(raw)
}

/// Wraps a bare diagram body in a standalone HTML page.
///
/// The page loads the diagram renderer from `config.script_src()` and
/// renders every `mermaid` element once the page has loaded.
pub fn html_page(body: &str, config: &HtmlConfig) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
  <meta charset="UTF-8">
  <title>{title}</title>
  <script src="{script_src}"></script>
</head>
<body>
  <div class="mermaid">
{body}
  </div>

  <script>
    mermaid.initialize({{
      startOnLoad: true
    }});
  </script>
</body>
</html>
"#,
        lang = config.lang(),
        title = config.title(),
        script_src = config.script_src(),
    )
}

/// Final file contents and the path they are written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    path: PathBuf,
    contents: String,
}

impl Document {
    /// Builds the document for serialized diagram text.
    ///
    /// `text` must come from [`MermaidWriter::write`] with the same
    /// `format`: fenced for Markdown, bare for HTML. Markdown text is
    /// written as is; HTML text is spliced into [`html_page`]. The path is
    /// run through [`normalize_path`].
    ///
    /// [`MermaidWriter::write`]: crate::mermaid::MermaidWriter::write
    pub fn new(text: String, format: ExportFormat, path: &Path, html: &HtmlConfig) -> Self {
        let contents = match format {
            ExportFormat::Markdown => text,
            ExportFormat::Html => html_page(&text, html),
        };

        Self {
            path: normalize_path(path, format),
            contents,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn contents(&self) -> &str {
        &self.contents
    }

    /// Writes the contents to the path as UTF-8, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns the underlying [`io::Error`] if the file cannot be created or
    /// written.
    pub fn write(&self) -> io::Result<()> {
        debug!(
            path:% = self.path.display(),
            bytes = self.contents.len();
            "Writing document"
        );
        fs::write(&self.path, &self.contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_appended_once() {
        let path = normalize_path(Path::new("graph"), ExportFormat::Markdown);
        assert_eq!(path, PathBuf::from("graph.md"));
        assert_eq!(normalize_path(&path, ExportFormat::Markdown), path);

        assert_eq!(
            normalize_path(Path::new("out/.md"), ExportFormat::Markdown),
            PathBuf::from("out/.md")
        );
        assert_eq!(
            normalize_path(Path::new("out/.html"), ExportFormat::Html),
            PathBuf::from("out/.html")
        );
    }

    #[test]
    fn test_other_extension_is_kept() {
        assert_eq!(
            normalize_path(Path::new("graph.txt"), ExportFormat::Markdown),
            PathBuf::from("graph.txt.md")
        );
        assert_eq!(
            normalize_path(Path::new("graph.md"), ExportFormat::Html),
            PathBuf::from("graph.md.html")
        );
    }

    #[test]
    fn test_html_page_embeds_body() {
        let page = html_page("graph TD\n    node_0 --> node_1", &HtmlConfig::default());

        let script = "<script src=\"https://unpkg.com/mermaid/dist/mermaid.min.js\"></script>";
        let div = "  <div class=\"mermaid\">\ngraph TD\n    node_0 --> node_1\n  </div>";

        assert!(page.starts_with("<!DOCTYPE html>\n<html lang=\"en\">"));
        assert!(page.contains(script));
        assert!(page.contains(div));
        assert!(page.contains("mermaid.initialize({\n      startOnLoad: true\n    });"));
        assert!(page.trim_end().ends_with("</html>"));
    }

    #[test]
    fn test_markdown_document_is_text_as_is() {
        let text = "```mermaid\ngraph TD\n```".to_string();
        let document = Document::new(
            text.clone(),
            ExportFormat::Markdown,
            Path::new("tree"),
            &HtmlConfig::default(),
        );

        assert_eq!(document.contents(), text);
        assert_eq!(document.path(), Path::new("tree.md"));
    }

    #[test]
    fn test_html_document_for_path_with_extension() {
        let document = Document::new(
            "graph TD".to_string(),
            ExportFormat::Html,
            Path::new("tree.html"),
            &HtmlConfig::default(),
        );

        assert_eq!(document.path(), Path::new("tree.html"));
        assert!(document.contents().starts_with("<!DOCTYPE html>"));
    }

    #[test]
    fn test_write_document() {
        let dir = tempfile::tempdir().unwrap();
        let document = Document::new(
            "```mermaid\ngraph TD\n```".to_string(),
            ExportFormat::Markdown,
            &dir.path().join("tree"),
            &HtmlConfig::default(),
        );

        document.write().unwrap();

        let written = fs::read_to_string(dir.path().join("tree.md")).unwrap();
        assert_eq!(written, "```mermaid\ngraph TD\n```");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let document = Document::new(
            "graph TD".to_string(),
            ExportFormat::Html,
            &dir.path().join("missing").join("tree"),
            &HtmlConfig::default(),
        );

        let err = document.write().unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        assert!(!dir.path().join("missing").exists());
    }
}
