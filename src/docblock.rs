//! Documentation comment parsing: description line, `@param`, `@return`, `@var`.
//!
//! Line-oriented and regex-based. Parsing never fails; absent or malformed
//! markup degrades to empty fields and callers apply defaults (`mixed` types,
//! `void` returns, no description).

use regex::Regex;

use crate::types::MemberKind;

/// A single `@param` tag, recorded in encounter order. The Nth tag pairs with
/// the Nth declared parameter by position; the `$name` written in the tag is
/// parsed but deliberately not used for correlation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocParam {
    /// Free-text remainder of the tag line, if non-empty.
    pub description: Option<String>,
    /// The type token (a non-whitespace run) following `@param`.
    pub type_name: String,
}

/// The single `@var` tag of a field docblock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocVar {
    /// Free-text remainder of the tag line, if non-empty.
    pub description: Option<String>,
    /// The type string following `@var`, everything up to the `$name`.
    /// Unlike `@param`, it may span several words.
    pub type_name: String,
}

/// Structured fields extracted from one documentation comment.
#[derive(Debug, Clone, Default)]
pub struct ParsedDoc {
    /// First non-tag sentence line of the comment.
    pub description: Option<String>,
    /// `@param` tags in encounter order. Methods only.
    pub params: Vec<DocParam>,
    /// Type string from the first `@return` tag. Methods only.
    pub return_type: Option<String>,
    /// The `@var` tag. Fields only.
    pub var: Option<DocVar>,
}

/// Docblock parser with pre-compiled tag patterns. Build once, use for every
/// member in the run.
pub struct DocblockParser {
    description: Regex,
    param: Regex,
    ret: Regex,
    var: Regex,
}

impl DocblockParser {
    /// Compile the tag grammar.
    ///
    /// # Panics
    ///
    /// Panics if a hardcoded pattern is invalid (compile-time invariant).
    pub fn new() -> Self {
        Self {
            description: Regex::new(r"\*\s*(\w[^*].+)$").expect("valid regex"),
            param: Regex::new(r"@param\s+(\S+)\s*\$(\w+)\s*(.*)$").expect("valid regex"),
            ret: Regex::new(r"@return\s+(.+)$").expect("valid regex"),
            var: Regex::new(r"@var\s+(.+)\s+\$(\w+)\s*(.*)$").expect("valid regex"),
        }
    }

    /// Extract structured fields from a raw documentation comment.
    /// With no comment text, every field is empty.
    pub fn parse(&self, raw: Option<&str>, kind: MemberKind) -> ParsedDoc {
        let Some(raw) = raw else {
            return ParsedDoc::default();
        };

        let mut doc = ParsedDoc::default();
        for line in raw.lines() {
            self.parse_line(line, kind, &mut doc);
        }
        doc
    }

    /// Fold one comment line into the accumulated doc.
    fn parse_line(&self, line: &str, kind: MemberKind, doc: &mut ParsedDoc) {
        match kind {
            MemberKind::Method => {
                if let Some(cap) = self.param.captures(line) {
                    doc.params.push(DocParam {
                        description: clean_fragment(&cap[3]),
                        type_name: cap[1].to_string(),
                    });
                    return;
                }
                if doc.return_type.is_none() {
                    if let Some(cap) = self.ret.captures(line) {
                        doc.return_type = clean_fragment(&cap[1]);
                        return;
                    }
                }
            },
            MemberKind::Field => {
                if doc.var.is_none() {
                    if let Some(cap) = self.var.captures(line) {
                        doc.var = Some(DocVar {
                            description: clean_fragment(&cap[3]),
                            type_name: cap[1].to_string(),
                        });
                        return;
                    }
                }
            },
        }

        // The description is the first sentence line; tag lines start with `@`
        // after the comment asterisk and never match.
        if doc.description.is_none() {
            if let Some(cap) = self.description.captures(line) {
                doc.description = clean_fragment(&cap[1]);
            }
        }
    }
}

/// Trim comment-closing artifacts and surrounding whitespace from a captured
/// fragment. Empty fragments collapse to `None`.
fn clean_fragment(fragment: &str) -> Option<String> {
    let cleaned = fragment.trim().trim_end_matches("*/").trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
