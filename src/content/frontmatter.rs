//! Front-matter parsing
//!
//! Documents open with a header block fenced by two `---` lines:
//!
//! ```text
//! ---
//! title: Hello World
//! publishedAt: "2024-01-15"
//! ---
//! Body text.
//! ```
//!
//! Header lines are `key: value` pairs split on the first colon. Parsing is
//! lenient: lines that don't fit are reported as [`FrontMatterIssue`]s and
//! otherwise ignored.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use indexmap::IndexMap;
use serde::Serialize;

/// Line that opens and closes the front-matter block
pub const DELIMITER: &str = "---";

/// Metadata parsed from a document's front-matter block
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrontMatter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "publishedAt", skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    /// Any other keys, in the order they appear in the file
    #[serde(flatten)]
    pub extra: IndexMap<String, String>,
}

/// A header line the parser could not use
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrontMatterIssue {
    /// Line has no colon, or nothing before it
    Malformed { line: usize, text: String },
    /// Key already seen earlier in the block; this later value replaced it
    DuplicateKey { line: usize, key: String },
}

impl std::fmt::Display for FrontMatterIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FrontMatterIssue::Malformed { line, text } => {
                write!(f, "line {}: expected 'key: value', found '{}'", line, text)
            }
            FrontMatterIssue::DuplicateKey { line, key } => {
                write!(f, "line {}: duplicate key '{}' overrides earlier value", line, key)
            }
        }
    }
}

/// Result of splitting a document into metadata and body
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedDocument<'a> {
    pub front_matter: FrontMatter,
    pub body: &'a str,
    pub issues: Vec<FrontMatterIssue>,
}

impl<'a> ParsedDocument<'a> {
    fn without_front_matter(content: &'a str) -> Self {
        Self {
            front_matter: FrontMatter::default(),
            body: content,
            issues: Vec::new(),
        }
    }
}

impl FrontMatter {
    /// Split `content` into front-matter and body.
    ///
    /// The opening delimiter must be the first non-blank line. Without an
    /// opening and a closing delimiter the whole input is body and the
    /// metadata is empty.
    pub fn parse(content: &str) -> ParsedDocument<'_> {
        // Offsets stay relative to `content` so a leading BOM is skipped, not lost
        let scan = content.strip_prefix('\u{feff}').unwrap_or(content);
        let mut lines = scan.split_inclusive('\n').enumerate();
        let mut offset = content.len() - scan.len();

        let mut opening = None;
        for (index, line) in lines.by_ref() {
            offset += line.len();
            if line.trim().is_empty() {
                continue;
            }
            if is_delimiter(line) {
                opening = Some(index);
            }
            break;
        }

        let Some(opening) = opening else {
            return ParsedDocument::without_front_matter(content);
        };

        let header_start = offset;
        for (_, line) in lines {
            if is_delimiter(line) {
                let header = &content[header_start..offset];
                let body = &content[offset + line.len()..];
                // Header starts on the line after the opening delimiter (1-based)
                let (front_matter, issues) = Self::parse_header(header, opening + 2);
                return ParsedDocument {
                    front_matter,
                    body,
                    issues,
                };
            }
            offset += line.len();
        }

        ParsedDocument::without_front_matter(content)
    }

    fn parse_header(header: &str, first_line: usize) -> (Self, Vec<FrontMatterIssue>) {
        let mut front_matter = FrontMatter::default();
        let mut issues = Vec::new();

        for (i, raw) in header.lines().enumerate() {
            let line_no = first_line + i;
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            let Some((key, value)) = line.split_once(':') else {
                issues.push(FrontMatterIssue::Malformed {
                    line: line_no,
                    text: line.to_string(),
                });
                continue;
            };

            let key = key.trim();
            if key.is_empty() {
                issues.push(FrontMatterIssue::Malformed {
                    line: line_no,
                    text: line.to_string(),
                });
                continue;
            }

            let value = strip_quotes(value.trim()).to_string();
            if front_matter.insert(key, value).is_some() {
                issues.push(FrontMatterIssue::DuplicateKey {
                    line: line_no,
                    key: key.to_string(),
                });
            }
        }

        (front_matter, issues)
    }

    /// Set a field by its on-disk key, returning the value it replaced
    pub fn insert(&mut self, key: &str, value: String) -> Option<String> {
        match key {
            "title" => self.title.replace(value),
            "publishedAt" => self.published_at.replace(value),
            "slug" => self.slug.replace(value),
            "summary" => self.summary.replace(value),
            _ => self.extra.insert(key.to_string(), value),
        }
    }

    /// Look up a field by its on-disk key
    pub fn get(&self, key: &str) -> Option<&str> {
        match key {
            "title" => self.title.as_deref(),
            "publishedAt" => self.published_at.as_deref(),
            "slug" => self.slug.as_deref(),
            "summary" => self.summary.as_deref(),
            _ => self.extra.get(key).map(String::as_str),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.published_at.is_none()
            && self.slug.is_none()
            && self.summary.is_none()
            && self.extra.is_empty()
    }

    /// Parse `publishedAt` into a calendar date
    pub fn published_date(&self) -> Option<NaiveDate> {
        self.published_at.as_deref().and_then(parse_date_string)
    }
}

fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

/// Remove one layer of matching single or double quotes
fn strip_quotes(value: &str) -> &str {
    for quote in ['"', '\''] {
        if value.len() >= 2 && value.starts_with(quote) && value.ends_with(quote) {
            return &value[1..value.len() - 1];
        }
    }
    value
}

/// Parse a date string in the formats authors actually write
pub(crate) fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y/%m/%d") {
        return Some(d);
    }

    let formats = [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M:%S%.f",
    ];
    for fmt in formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }

    DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_frontmatter_and_body() {
        let content = "---\ntitle: T\npublishedAt: 2022-01-01\n---\nHello";

        let doc = FrontMatter::parse(content);
        assert_eq!(doc.front_matter.title.as_deref(), Some("T"));
        assert_eq!(doc.front_matter.published_at.as_deref(), Some("2022-01-01"));
        assert_eq!(doc.body, "Hello");
        assert!(doc.issues.is_empty());
    }

    #[test]
    fn test_only_first_colon_splits() {
        let content = "---\nsummary: 'A: B: C'\nurl: https://example.com/a\n---\n";

        let doc = FrontMatter::parse(content);
        assert_eq!(doc.front_matter.summary.as_deref(), Some("A: B: C"));
        assert_eq!(doc.front_matter.get("url"), Some("https://example.com/a"));
    }

    #[test]
    fn test_quotes_stripped() {
        let single = FrontMatter::parse("---\ntitle: 'Hello'\n---\n");
        let double = FrontMatter::parse("---\ntitle: \"Hello\"\n---\n");
        let bare = FrontMatter::parse("---\ntitle: Hello\n---\n");

        assert_eq!(single.front_matter.title.as_deref(), Some("Hello"));
        assert_eq!(double.front_matter.title.as_deref(), Some("Hello"));
        assert_eq!(bare.front_matter.title.as_deref(), Some("Hello"));
    }

    #[test]
    fn test_only_one_layer_of_matching_quotes() {
        let doc = FrontMatter::parse("---\na: \"'x'\"\nb: 'y\"\nc: \"\n---\n");
        assert_eq!(doc.front_matter.get("a"), Some("'x'"));
        assert_eq!(doc.front_matter.get("b"), Some("'y\""));
        assert_eq!(doc.front_matter.get("c"), Some("\""));
    }

    #[test]
    fn test_no_frontmatter_is_all_body() {
        let content = "Just some text.\n\nNo header here.\n";

        let doc = FrontMatter::parse(content);
        assert!(doc.front_matter.is_empty());
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_unclosed_frontmatter_is_all_body() {
        let content = "---\ntitle: Never closed\nbody text\n";

        let doc = FrontMatter::parse(content);
        assert!(doc.front_matter.is_empty());
        assert_eq!(doc.body, content);
        assert!(doc.issues.is_empty());
    }

    #[test]
    fn test_separator_after_prose_is_not_frontmatter() {
        let content = "Intro paragraph\n---\ntitle: nope\n---\nMore\n";

        let doc = FrontMatter::parse(content);
        assert!(doc.front_matter.is_empty());
        assert_eq!(doc.body, content);
    }

    #[test]
    fn test_leading_blank_lines_allowed() {
        let doc = FrontMatter::parse("\n\n---\ntitle: Late\n---\nBody");
        assert_eq!(doc.front_matter.title.as_deref(), Some("Late"));
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn test_leading_bom_ignored() {
        let doc = FrontMatter::parse("\u{feff}---\ntitle: T\npublishedAt: 2024-01-01\n---\nBody");
        assert_eq!(doc.front_matter.title.as_deref(), Some("T"));
        assert_eq!(doc.front_matter.published_at.as_deref(), Some("2024-01-01"));
        assert_eq!(doc.body, "Body");
        assert!(doc.issues.is_empty());

        let plain = "\u{feff}No header here.\n";
        let doc = FrontMatter::parse(plain);
        assert!(doc.front_matter.is_empty());
        assert_eq!(doc.body, plain);
    }

    #[test]
    fn test_single_leading_newline_trimmed_from_body() {
        let doc = FrontMatter::parse("---\ntitle: T\n---\n\nParagraph\n");
        assert_eq!(doc.body, "\nParagraph\n");
    }

    #[test]
    fn test_later_delimiters_stay_in_body() {
        let doc = FrontMatter::parse("---\ntitle: T\n---\nabove\n---\nbelow\n");
        assert_eq!(doc.body, "above\n---\nbelow\n");
    }

    #[test]
    fn test_crlf_line_endings() {
        let doc = FrontMatter::parse("---\r\ntitle: Windows\r\nslug: win\r\n---\r\nBody\r\n");
        assert_eq!(doc.front_matter.title.as_deref(), Some("Windows"));
        assert_eq!(doc.front_matter.slug.as_deref(), Some("win"));
        assert_eq!(doc.body, "Body\r\n");
    }

    #[test]
    fn test_duplicate_key_last_wins() {
        let doc = FrontMatter::parse("---\ntitle: First\ntitle: Second\n---\n");
        assert_eq!(doc.front_matter.title.as_deref(), Some("Second"));
        assert_eq!(
            doc.issues,
            vec![FrontMatterIssue::DuplicateKey {
                line: 3,
                key: "title".to_string()
            }]
        );
    }

    #[test]
    fn test_malformed_lines_reported_and_skipped() {
        let content = "---\ntitle: Ok\njust words\n: no key\n\nsummary: fine\n---\nBody";

        let doc = FrontMatter::parse(content);
        assert_eq!(doc.front_matter.title.as_deref(), Some("Ok"));
        assert_eq!(doc.front_matter.summary.as_deref(), Some("fine"));
        assert_eq!(
            doc.issues,
            vec![
                FrontMatterIssue::Malformed {
                    line: 3,
                    text: "just words".to_string()
                },
                FrontMatterIssue::Malformed {
                    line: 4,
                    text: ": no key".to_string()
                },
            ]
        );
        assert_eq!(doc.body, "Body");
    }

    #[test]
    fn test_unknown_keys_preserved_in_order() {
        let doc = FrontMatter::parse("---\nimage: /og.png\ntitle: T\naccent: blue\n---\n");
        let keys: Vec<_> = doc.front_matter.extra.keys().cloned().collect();
        assert_eq!(keys, vec!["image", "accent"]);
        assert_eq!(doc.front_matter.get("image"), Some("/og.png"));
        assert_eq!(doc.front_matter.get("missing"), None);
    }

    #[test]
    fn test_empty_value_kept() {
        let doc = FrontMatter::parse("---\nsummary:\n---\n");
        assert_eq!(doc.front_matter.summary.as_deref(), Some(""));
    }

    #[test]
    fn test_serialize_uses_on_disk_keys() {
        let doc = FrontMatter::parse("---\ntitle: T\npublishedAt: 2024-03-01\nimage: x.png\n---\n");
        let json = serde_json::to_value(&doc.front_matter).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "title": "T",
                "publishedAt": "2024-03-01",
                "image": "x.png"
            })
        );
    }

    #[test]
    fn test_published_date() {
        let fm = FrontMatter {
            published_at: Some("2024-01-15".to_string()),
            ..Default::default()
        };
        assert_eq!(
            fm.published_date(),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );

        let fm = FrontMatter {
            published_at: Some("2024-01-15T10:30:00+02:00".to_string()),
            ..Default::default()
        };
        assert_eq!(
            fm.published_date(),
            NaiveDate::from_ymd_opt(2024, 1, 15)
        );

        let fm = FrontMatter {
            published_at: Some("last tuesday".to_string()),
            ..Default::default()
        };
        assert_eq!(fm.published_date(), None);
    }
}
