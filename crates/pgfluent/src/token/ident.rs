//! Identifier and literal quoting.
//!
//! Quoted names are split on `.` into parts and each part is wrapped in double
//! quotes with embedded `"` doubled. A part that is already quoted is kept as
//! it is, so `public."UserTable".id` becomes `"public"."UserTable"."id"`.
//!
//! Nothing here validates: raw fragments are trusted and passed through.

/// A part of a dotted identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum IdentPart {
    /// Bare text between dots.
    Unquoted(String),
    /// Text that arrived already wrapped in double quotes (unescaped here).
    Quoted(String),
}

/// Split a dotted identifier into parts, honoring `"..."` segments that may
/// themselves contain dots.
pub(crate) fn split_ident(s: &str) -> Vec<IdentPart> {
    let mut parts = Vec::new();
    let mut chars = s.chars().peekable();

    loop {
        if chars.peek() == Some(&'"') {
            chars.next();
            let mut name = String::new();
            while let Some(c) = chars.next() {
                if c == '"' {
                    // Escaped quote: ""
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        name.push('"');
                    } else {
                        break;
                    }
                } else {
                    name.push(c);
                }
            }
            // Text between the closing quote and the next dot stays in the part.
            for c in chars.by_ref() {
                if c == '.' {
                    break;
                }
                name.push(c);
            }
            parts.push(IdentPart::Quoted(name));
        } else {
            let mut name = String::new();
            for c in chars.by_ref() {
                if c == '.' {
                    break;
                }
                name.push(c);
            }
            parts.push(IdentPart::Unquoted(name));
        }

        if chars.peek().is_none() {
            break;
        }
    }

    // `split_ident("a.")` leaves no trailing part; keep the shape of the input.
    if s.ends_with('.') {
        parts.push(IdentPart::Unquoted(String::new()));
    }
    parts
}

/// Append `name` with every dotted part double-quoted.
pub(crate) fn write_quoted_ident(name: &str, out: &mut String) {
    for (i, part) in split_ident(name).iter().enumerate() {
        if i > 0 {
            out.push('.');
        }
        let text = match part {
            IdentPart::Unquoted(s) | IdentPart::Quoted(s) => s,
        };
        out.push('"');
        out.push_str(&text.replace('"', "\"\""));
        out.push('"');
    }
}

/// Append `s` as a single-quoted string literal, doubling embedded quotes.
pub(crate) fn write_literal(s: &str, out: &mut String) {
    out.push('\'');
    out.push_str(&s.replace('\'', "''"));
    out.push('\'');
}

/// Append `body` as a dollar-quoted string: `$$body$$` or `$tag$body$tag$`.
pub(crate) fn write_dollar_quoted(body: &str, tag: Option<&str>, out: &mut String) {
    let tag = tag.unwrap_or("");
    out.push('$');
    out.push_str(tag);
    out.push('$');
    out.push_str(body);
    out.push('$');
    out.push_str(tag);
    out.push('$');
}
