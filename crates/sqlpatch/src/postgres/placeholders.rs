use std::borrow::Cow;

/// Rewrite `?` placeholders to PostgreSQL's `$1..$n`.
///
/// Question marks are copied through unchanged inside:
/// - string literals, including `E'...'` literals with backslash escapes,
/// - dollar-quoted bodies (`$$...$$`, `$fn$...$fn$`),
/// - quoted identifiers,
/// - line and (nested) block comments.
///
/// `??` outside of those renders a single literal `?`, which is how jsonb
/// operators such as `?|` are written. Existing `$n` parameters are left alone.
///
/// Returns the input unchanged (borrowed) when nothing had to be replaced.
pub fn rewrite_placeholders(sql: &str) -> Cow<'_, str> {
    if !sql.contains('?') {
        return Cow::Borrowed(sql);
    }

    let bytes = sql.as_bytes();
    let mut out = String::new();
    let mut replaced = false;
    let mut last = 0usize;
    let mut next_index = 1usize;
    let mut i = 0usize;

    while i < bytes.len() {
        match bytes[i] {
            b'?' => {
                if !replaced {
                    out.reserve(sql.len() + 8);
                    replaced = true;
                }
                out.push_str(&sql[last..i]);
                if bytes.get(i + 1) == Some(&b'?') {
                    out.push('?');
                    i += 2;
                } else {
                    out.push('$');
                    out.push_str(&next_index.to_string());
                    next_index += 1;
                    i += 1;
                }
                last = i;
            }
            b'\'' => i = skip_quoted(bytes, i + 1, b'\'', is_escape_string(bytes, i)),
            b'"' => i = skip_quoted(bytes, i + 1, b'"', false),
            b'-' if bytes.get(i + 1) == Some(&b'-') => i = skip_line_comment(bytes, i + 2),
            b'/' if bytes.get(i + 1) == Some(&b'*') => i = skip_block_comment(bytes, i + 2),
            b'$' => i = skip_dollar_quoted(bytes, i),
            _ => i += 1,
        }
    }

    if !replaced {
        return Cow::Borrowed(sql);
    }
    out.push_str(&sql[last..]);
    Cow::Owned(out)
}

fn is_ident_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$' || b >= 0x80
}

/// `E'...'` / `e'...'`, but not the tail of an identifier like `name'`.
fn is_escape_string(bytes: &[u8], quote: usize) -> bool {
    quote >= 1
        && matches!(bytes[quote - 1], b'E' | b'e')
        && (quote < 2 || !is_ident_byte(bytes[quote - 2]))
}

/// Returns the index just past the closing quote. A doubled quote stays inside.
fn skip_quoted(bytes: &[u8], start: usize, quote: u8, backslash_escapes: bool) -> usize {
    let mut i = start;
    while i < bytes.len() {
        let b = bytes[i];
        if backslash_escapes && b == b'\\' {
            i += 2;
            continue;
        }
        if b == quote {
            if bytes.get(i + 1) == Some(&quote) {
                i += 2;
                continue;
            }
            return i + 1;
        }
        i += 1;
    }
    bytes.len()
}

fn skip_line_comment(bytes: &[u8], start: usize) -> usize {
    match bytes[start..].iter().position(|&b| b == b'\n') {
        Some(pos) => start + pos + 1,
        None => bytes.len(),
    }
}

// PostgreSQL block comments nest.
fn skip_block_comment(bytes: &[u8], start: usize) -> usize {
    let mut depth = 1usize;
    let mut i = start;
    while i < bytes.len() {
        match (bytes[i], bytes.get(i + 1)) {
            (b'/', Some(&b'*')) => {
                depth += 1;
                i += 2;
            }
            (b'*', Some(&b'/')) => {
                depth -= 1;
                i += 2;
                if depth == 0 {
                    return i;
                }
            }
            _ => i += 1,
        }
    }
    bytes.len()
}

/// Skips a `$tag$ ... $tag$` body starting at the `$` at `start`.
///
/// Anything that is not an opening tag (`$1`, `foo$bar`, a lone `$`) only
/// advances by one byte.
fn skip_dollar_quoted(bytes: &[u8], start: usize) -> usize {
    if start > 0 && is_ident_byte(bytes[start - 1]) {
        return start + 1;
    }
    let mut j = start + 1;
    if bytes.get(j).is_some_and(u8::is_ascii_digit) {
        return start + 1;
    }
    while j < bytes.len() && bytes[j] != b'$' && is_ident_byte(bytes[j]) {
        j += 1;
    }
    if bytes.get(j) != Some(&b'$') {
        return start + 1;
    }

    let tag = &bytes[start..=j];
    let body = j + 1;
    match bytes[body..].windows(tag.len()).position(|w| w == tag) {
        Some(pos) => body + pos + tag.len(),
        None => bytes.len(),
    }
}
