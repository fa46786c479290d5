//! Checks for the restricted HTML subset allowed in some text fields.
//!
//! [`scan`] tokenizes a string and reports every problem it finds without
//! stopping at the first; [`check_markup`] logs those problems through the
//! context.

use crate::config::MarkupPolicy;
use crate::context::Context;
use regex::Regex;
use std::sync::LazyLock;

static MARKUP_LIKE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<\s*/?\s*[A-Za-z][A-Za-z0-9]*(\s[^<>]*)?/?\s*>|<!--|<!\[CDATA\[|<[!?]").unwrap()
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([A-Za-z][A-Za-z0-9]*)(\s[\s\S]*)?$").unwrap());

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"\s*([A-Za-z_:][-A-Za-z0-9_:.]*)(?:\s*=\s*(?:"[^"]*"|'[^']*'|[^\s"'=<>`]+))?"#)
        .unwrap()
});

/// Elements that never take a closing tag.
const VOID_TAGS: &[&str] = &["br", "img", "hr", "wbr", "input", "meta", "link"];

/// One problem found in a markup string.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MarkupIssue {
    Malformed(String),
    DisallowedTag(String),
    DisallowedAttribute { tag: String, attribute: String },
    Comment,
    Cdata,
    Declaration,
}

impl MarkupIssue {
    pub fn message(&self) -> String {
        match self {
            MarkupIssue::Malformed(detail) => format!("Malformed markup: {}", detail),
            MarkupIssue::DisallowedTag(tag) => format!("Markup tag '<{}>' is not allowed.", tag),
            MarkupIssue::DisallowedAttribute { tag, attribute } => format!(
                "Attribute '{}' is not allowed on markup tag '<{}>'.",
                attribute, tag
            ),
            MarkupIssue::Comment => "Markup comments are not allowed.".to_string(),
            MarkupIssue::Cdata => "CDATA sections are not allowed in markup.".to_string(),
            MarkupIssue::Declaration => {
                "Markup declarations and processing instructions are not allowed.".to_string()
            }
        }
    }
}

/// True when `text` contains anything that looks like a tag, comment or
/// CDATA section.
pub fn looks_like_markup(text: &str) -> bool {
    MARKUP_LIKE_RE.is_match(text)
}

/// Check `text` as a markup value of the current field and log every issue.
///
/// Fields that do not permit markup only get a single error when markup-like
/// syntax is present. In fields that do, any `<` starts a scan, so tags left
/// unterminated are reported too. The text is always returned unchanged.
pub fn check_markup(ctx: &mut Context<'_>, text: &str, permitted: bool) -> String {
    if !permitted {
        if looks_like_markup(text) {
            let field = ctx.field().to_string();
            ctx.error(format!("Markup is not allowed in '{}'.", field));
        }
        return text.to_string();
    }
    if !text.contains('<') {
        return text.to_string();
    }
    for issue in scan(text, &ctx.config().markup) {
        ctx.error(issue.message());
    }
    text.to_string()
}

/// Tokenize `text` and collect every markup issue against `policy`.
pub fn scan(text: &str, policy: &MarkupPolicy) -> Vec<MarkupIssue> {
    let mut issues = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find('<') {
        let tail = &rest[start..];

        if let Some(body) = tail.strip_prefix("<!--") {
            issues.push(MarkupIssue::Comment);
            match body.find("-->") {
                Some(end) => rest = &body[end + 3..],
                None => {
                    issues.push(MarkupIssue::Malformed("unterminated comment".to_string()));
                    return issues;
                }
            }
            continue;
        }
        if let Some(body) = tail.strip_prefix("<![CDATA[") {
            issues.push(MarkupIssue::Cdata);
            match body.find("]]>") {
                Some(end) => rest = &body[end + 3..],
                None => {
                    issues.push(MarkupIssue::Malformed("unterminated CDATA section".to_string()));
                    return issues;
                }
            }
            continue;
        }
        if tail.starts_with("<!") || tail.starts_with("<?") {
            issues.push(MarkupIssue::Declaration);
            match tail.find('>') {
                Some(end) => rest = &tail[end + 1..],
                None => {
                    issues.push(MarkupIssue::Malformed("unterminated declaration".to_string()));
                    return issues;
                }
            }
            continue;
        }

        let Some(end) = find_tag_end(tail) else {
            issues.push(MarkupIssue::Malformed("unterminated tag".to_string()));
            return issues;
        };
        let inner = tail[1..end].trim();
        rest = &tail[end + 1..];

        if let Some(name) = inner.strip_prefix('/') {
            close_tag(name.trim(), &mut open, &mut issues);
        } else {
            open_tag(inner, policy, &mut open, &mut issues);
        }
    }

    if let Some(tag) = open.last() {
        issues.push(MarkupIssue::Malformed(format!("unclosed tag '<{}>'", tag)));
    }
    issues
}

fn open_tag(
    inner: &str,
    policy: &MarkupPolicy,
    open: &mut Vec<String>,
    issues: &mut Vec<MarkupIssue>,
) {
    let (inner, self_closing) = match inner.strip_suffix('/') {
        Some(stripped) => (stripped.trim_end(), true),
        None => (inner, false),
    };
    let Some(caps) = TAG_RE.captures(inner) else {
        issues.push(MarkupIssue::Malformed(format!("invalid tag '<{}>'", inner)));
        return;
    };
    let tag = caps[1].to_ascii_lowercase();
    let tag_allowed = policy.allows_tag(&tag);
    if !tag_allowed {
        issues.push(MarkupIssue::DisallowedTag(tag.clone()));
    }

    let attrs = caps.get(2).map(|m| m.as_str()).unwrap_or("");
    let mut cursor = 0;
    for attr in ATTR_RE.captures_iter(attrs) {
        let whole = attr.get(0).map(|m| (m.start(), m.end())).unwrap_or((cursor, cursor));
        if whole.0 != cursor {
            break;
        }
        cursor = whole.1;
        let name = attr[1].to_ascii_lowercase();
        if tag_allowed && !policy.allows_attribute(&tag, &name) {
            issues.push(MarkupIssue::DisallowedAttribute {
                tag: tag.clone(),
                attribute: name,
            });
        }
    }
    if !attrs[cursor..].trim().is_empty() {
        issues.push(MarkupIssue::Malformed(format!(
            "invalid attributes on '<{}>'",
            tag
        )));
    }

    if !self_closing && !VOID_TAGS.contains(&tag.as_str()) {
        open.push(tag);
    }
}

fn close_tag(name: &str, open: &mut Vec<String>, issues: &mut Vec<MarkupIssue>) {
    let name = name.to_ascii_lowercase();
    if VOID_TAGS.contains(&name.as_str()) {
        return;
    }
    match open.last() {
        Some(top) if *top == name => {
            open.pop();
        }
        Some(top) => {
            issues.push(MarkupIssue::Malformed(format!(
                "closing tag '</{}>' does not match '<{}>'",
                name, top
            )));
            if let Some(pos) = open.iter().rposition(|t| *t == name) {
                open.truncate(pos);
            }
        }
        None => issues.push(MarkupIssue::Malformed(format!(
            "closing tag '</{}>' has no opening tag",
            name
        ))),
    }
}

/// Byte offset of the `>` ending the tag that starts `tail`, skipping over
/// quoted attribute values.
fn find_tag_end(tail: &str) -> Option<usize> {
    let mut quote: Option<char> = None;
    for (i, c) in tail.char_indices().skip(1) {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return Some(i),
            (None, '<') => return None,
            (None, _) => {}
        }
    }
    None
}
