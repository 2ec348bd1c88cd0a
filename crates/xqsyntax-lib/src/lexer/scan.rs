//! Character-level helpers shared by the region scanners.

use crate::syntax::SyntaxKind;

pub(super) fn is_name_start(c: char) -> bool {
    matches!(c,
        'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}')
}

pub(super) fn is_name_char(c: char) -> bool {
    is_name_start(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

pub(super) fn starts_with_name(s: &str) -> bool {
    s.chars().next().is_some_and(is_name_start)
}

/// Byte length of the NCName at the start of `s`, or 0.
pub(super) fn name_len(s: &str) -> usize {
    let mut chars = s.char_indices();
    match chars.next() {
        Some((_, c)) if is_name_start(c) => {}
        _ => return 0,
    }
    chars
        .find(|&(_, c)| !is_name_char(c))
        .map_or(s.len(), |(i, _)| i)
}

/// Byte length of a `prefix:local` or `local` name at the start of `s`, or 0.
fn qname_len(s: &str) -> usize {
    let prefix = name_len(s);
    if prefix == 0 {
        return 0;
    }
    let rest = &s[prefix..];
    if let Some(after_colon) = rest.strip_prefix(':') {
        let local = name_len(after_colon);
        if local > 0 {
            return prefix + 1 + local;
        }
    }
    prefix
}

pub(super) fn whitespace_len(s: &str) -> usize {
    s.bytes()
        .position(|b| !matches!(b, b' ' | b'\t' | b'\r' | b'\n'))
        .unwrap_or(s.len())
}

/// Byte length of the first char of `s`; `s` must be non-empty.
pub(super) fn char_len(s: &str) -> usize {
    s.chars().next().map_or(0, char::len_utf8)
}

/// Length of the text run before the first occurrence of any of `stops`.
pub(super) fn run_until(s: &str, stops: &[&str]) -> usize {
    let mut i = 0;
    while i < s.len() {
        let rest = &s[i..];
        if stops.iter().any(|stop| rest.starts_with(stop)) {
            return i;
        }
        i += char_len(rest);
    }
    s.len()
}

/// Scans an entity or character reference; `s` starts with `&`.
pub(super) fn entity_ref(s: &str) -> (SyntaxKind, usize) {
    let rest = &s[1..];
    if rest.starts_with(';') {
        return (SyntaxKind::EmptyEntityRef, 2);
    }
    if let Some(num) = rest.strip_prefix('#') {
        let (digits, prefix) = match num.strip_prefix('x') {
            Some(hex) => (
                hex.bytes().take_while(u8::is_ascii_hexdigit).count(),
                3,
            ),
            None => (num.bytes().take_while(u8::is_ascii_digit).count(), 2),
        };
        let len = prefix + digits;
        if digits > 0 && s[len..].starts_with(';') {
            return (SyntaxKind::CharRef, len + 1);
        }
        return (SyntaxKind::PartialEntityRef, len);
    }
    let name = name_len(rest);
    if name > 0 && rest[name..].starts_with(';') {
        return (SyntaxKind::PredefinedEntityRef, name + 2);
    }
    (SyntaxKind::PartialEntityRef, name + 1)
}

/// Looks ahead for a well-formed direct start tag: `<QName (S QName S? = S? value)* S? (> | />)`.
///
/// `s` starts with `<` followed by a name start character.
pub(super) fn is_start_tag(s: &str) -> bool {
    let mut i = 1;
    let name = qname_len(&s[i..]);
    if name == 0 {
        return false;
    }
    i += name;
    loop {
        let ws = whitespace_len(&s[i..]);
        i += ws;
        let rest = &s[i..];
        if rest.starts_with('>') || rest.starts_with("/>") {
            return true;
        }
        if ws == 0 {
            return false;
        }
        let attr = qname_len(rest);
        if attr == 0 {
            return false;
        }
        i += attr;
        i += whitespace_len(&s[i..]);
        if !s[i..].starts_with('=') {
            return false;
        }
        i += 1;
        i += whitespace_len(&s[i..]);
        match attr_value_len(&s[i..]) {
            Some(len) => i += len,
            None => return false,
        }
    }
}

/// Length of a quoted attribute value including its quotes. Enclosed expressions may
/// contain the delimiter inside nested string literals.
fn attr_value_len(s: &str) -> Option<usize> {
    let quote = match s.as_bytes().first() {
        Some(b'"') => b'"',
        Some(b'\'') => b'\'',
        _ => return None,
    };
    let bytes = s.as_bytes();
    let mut i = 1;
    let mut depth = 0usize;
    let mut in_string: Option<u8> = None;
    while i < bytes.len() {
        let b = bytes[i];
        if let Some(q) = in_string {
            if b == q {
                in_string = None;
            }
            i += 1;
            continue;
        }
        match b {
            b'{' if depth == 0 && bytes.get(i + 1) == Some(&b'{') => i += 1,
            b'}' if depth == 0 && bytes.get(i + 1) == Some(&b'}') => i += 1,
            b'{' => depth += 1,
            b'}' if depth > 0 => depth -= 1,
            b'"' | b'\'' if depth > 0 => in_string = Some(b),
            b'<' if depth == 0 => return None,
            _ if b == quote && depth == 0 => return Some(i + 1),
            _ => {}
        }
        i += 1;
    }
    None
}
