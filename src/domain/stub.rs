//! Generated C++ stub: record formatting and the output document

use std::fmt::Write as _;
use std::path::PathBuf;

use crate::domain::node::Scalar;

/// Marker comment on the first line of every generated stub.
pub const AUTOGENERATED_MARKER: &str = "// This file is autogenerated";

/// Include line that makes `QT_TRANSLATE_NOOP` available.
pub const INCLUDE_LINE: &str = "#include <QtGlobal>";

/// Default translation context passed to `QT_TRANSLATE_NOOP`.
pub const DEFAULT_CONTEXT: &str = "QtC::ProjectExplorer";

/// One extracted string, numbered in emission order across the whole run.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRecord {
    pub key: String,
    pub value: Scalar,
    pub source: PathBuf,
    pub index: usize,
}

impl ExtractionRecord {
    /// Render as one stub line within `context`.
    pub fn format(&self, context: &str) -> String {
        format_record(
            self.index,
            &self.value,
            &self.source.to_string_lossy(),
            context,
        )
    }
}

/// Escape `text` as the body of a C string literal.
///
/// Control characters without a short escape use fixed-width octal so the
/// following character can never be absorbed into the escape.
pub fn escape_c_string(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_ascii_control() => {
                let _ = write!(out, "\\{:03o}", c as u32);
            }
            c => out.push(c),
        }
    }
    out
}

/// Line breaks would end the trailing `//` comment early.
fn sanitize_comment(text: &str) -> String {
    text.replace(['\r', '\n'], " ")
}

/// Format one declaration line:
/// `const char *a{index} = QT_TRANSLATE_NOOP("{context}", "{value}"); // {source}`
pub fn format_record(index: usize, value: &Scalar, source: &str, context: &str) -> String {
    format!(
        "const char *a{} = QT_TRANSLATE_NOOP(\"{}\", \"{}\"); // {}",
        index,
        escape_c_string(context),
        escape_c_string(&value.as_text()),
        sanitize_comment(source)
    )
}

/// Complete generated stub, built up record by record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputDocument {
    context: String,
    lines: Vec<String>,
}

impl Default for OutputDocument {
    fn default() -> Self {
        Self::new(DEFAULT_CONTEXT)
    }
}

impl OutputDocument {
    pub fn new(context: impl Into<String>) -> Self {
        Self {
            context: context.into(),
            lines: Vec::new(),
        }
    }

    pub fn push(&mut self, record: &ExtractionRecord) {
        self.lines.push(record.format(&self.context));
    }

    /// Declaration lines, in emission order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Full file content: header, blank line, one declaration per line.
    pub fn render(&self) -> String {
        let mut out = String::new();
        out.push_str(AUTOGENERATED_MARKER);
        out.push('\n');
        out.push_str(INCLUDE_LINE);
        out.push_str("\n\n");
        for line in &self.lines {
            out.push_str(line);
            out.push('\n');
        }
        out
    }
}
