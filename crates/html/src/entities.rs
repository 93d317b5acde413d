use memchr::memchr;

/// Decode the entity subset host markup uses for toggle alternatives.
///
/// Contract:
/// - Named entities decoded: `&amp;`, `&lt;`, `&gt;`, `&quot;`, `&apos;`, `&nbsp;`.
/// - Numeric entities decoded only when well-formed and semicolon-terminated:
///   `&#123;` (decimal) and `&#x1F4A9;` (hex).
/// - Only valid Unicode scalar values decode; invalid scalars pass through unchanged.
/// - Missing semicolons, unknown names, malformed numerics, or overlong digit runs are left
///   unchanged.
///
/// Not HTML5-complete. Keep the behavior narrow and stable: toggle comparison depends on it.
pub fn decode_entities(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = String::with_capacity(s.len());
    let mut pos = 0;
    while let Some(rel) = memchr(b'&', &bytes[pos..]) {
        let amp = pos + rel;
        out.push_str(&s[pos..amp]);
        pos = match read_reference(s, amp) {
            Reference::Decoded(ch, next) => {
                out.push(ch);
                next
            }
            Reference::Verbatim(end) => {
                out.push_str(&s[amp..end]);
                end
            }
        };
    }
    out.push_str(&s[pos..]);
    out
}

const NAMED: [(&[u8], char); 6] = [
    (b"&amp;", '&'),
    (b"&lt;", '<'),
    (b"&gt;", '>'),
    (b"&quot;", '"'),
    (b"&apos;", '\''),
    (b"&nbsp;", '\u{00A0}'),
];

const MAX_HEX_DIGITS: usize = 6; // 0x10FFFF
const MAX_DEC_DIGITS: usize = 7; // 1114111

/// What the character reference starting at an `&` turns into. Positions are byte offsets just
/// past the consumed input and always sit on a char boundary.
enum Reference {
    Decoded(char, usize),
    Verbatim(usize),
}

fn read_reference(s: &str, amp: usize) -> Reference {
    let bytes = s.as_bytes();
    let rest = &bytes[amp..];
    if let Some((pat, ch)) = NAMED.iter().find(|(pat, _)| rest.starts_with(pat)) {
        return Reference::Decoded(*ch, amp + pat.len());
    }

    let (digits_start, radix, max_digits) = match rest {
        [b'&', b'#', b'x' | b'X', ..] => (amp + 3, 16, MAX_HEX_DIGITS),
        [b'&', b'#', ..] => (amp + 2, 10, MAX_DEC_DIGITS),
        _ => return Reference::Verbatim(amp + 1),
    };
    let Some(semi) = scan_digits(bytes, digits_start, radix, max_digits) else {
        return Reference::Verbatim(malformed_end(bytes, amp));
    };
    match u32::from_str_radix(&s[digits_start..semi], radix)
        .ok()
        .and_then(char::from_u32)
    {
        Some(ch) => Reference::Decoded(ch, semi + 1),
        // surrogates and out-of-range values stay as written
        None => Reference::Verbatim(semi + 1),
    }
}

/// Offset of the terminating `;` after at least one digit. Bounded so adversarial digit runs
/// stay linear.
fn scan_digits(bytes: &[u8], start: usize, radix: u32, max_digits: usize) -> Option<usize> {
    let digits = bytes[start..]
        .iter()
        .take(max_digits + 1)
        .take_while(|b| (**b as char).is_digit(radix))
        .count();
    if digits == 0 || digits > max_digits {
        return None;
    }
    (bytes.get(start + digits) == Some(&b';')).then_some(start + digits)
}

/// A malformed reference is copied through its `;`, or up to the next `&` or whitespace.
fn malformed_end(bytes: &[u8], amp: usize) -> usize {
    for (j, b) in bytes.iter().enumerate().skip(amp + 1) {
        match b {
            b';' => return j + 1,
            b'&' => return j,
            b if b.is_ascii_whitespace() => return j,
            _ => {}
        }
    }
    bytes.len()
}

/// Escape a text node for serialization, matching what `innerHTML` produces.
pub fn escape_text(s: &str) -> String {
    escape_with(s, false)
}

/// Escape an attribute value for a double-quoted serialization.
pub fn escape_attr(s: &str) -> String {
    escape_with(s, true)
}

fn escape_with(s: &str, in_attribute: bool) -> String {
    let needs = s.chars().any(|c| match c {
        '&' | '\u{00A0}' => true,
        '"' => in_attribute,
        '<' | '>' => !in_attribute,
        _ => false,
    });
    if !needs {
        return s.to_string();
    }
    let mut out = String::with_capacity(s.len() + 16);
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '\u{00A0}' => out.push_str("&nbsp;"),
            '"' if in_attribute => out.push_str("&quot;"),
            '<' if !in_attribute => out.push_str("&lt;"),
            '>' if !in_attribute => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_entities_used_by_hosts() {
        assert_eq!(decode_entities("a &amp; b"), "a & b");
        assert_eq!(decode_entities("&lt;tag&gt;"), "<tag>");
        assert_eq!(decode_entities("&quot;hi&quot;"), "\"hi\"");
        assert_eq!(decode_entities("a&nbsp;b"), "a\u{00A0}b");
    }

    #[test]
    fn decodes_numeric_entities() {
        // Python's html.escape writes apostrophes as &#x27;
        assert_eq!(decode_entities("it&#x27;s"), "it's");
        assert_eq!(decode_entities("&#215;"), "×");
    }

    #[test]
    fn leaves_malformed_entities_untouched() {
        assert_eq!(decode_entities("&notanentity; &amp"), "&notanentity; &amp");
        assert_eq!(decode_entities("&#xD800;"), "&#xD800;");
        assert_eq!(decode_entities("&#99999999;"), "&#99999999;");
        assert_eq!(decode_entities("&#xZZ;&amp;"), "&#xZZ;&");
    }

    #[test]
    fn decode_is_idempotent_on_plain_text() {
        for s in ["", "plain", "πσ", "&", "&&", "&;", "&#;"] {
            assert_eq!(decode_entities(s), s);
        }
    }

    #[test]
    fn escape_text_matches_inner_html() {
        assert_eq!(escape_text("a < b & \"c\""), "a &lt; b &amp; \"c\"");
        assert_eq!(escape_text("x\u{00A0}y"), "x&nbsp;y");
        assert_eq!(escape_text("dog"), "dog");
    }

    #[test]
    fn escape_attr_quotes_only_what_breaks_attributes() {
        assert_eq!(escape_attr(r#"say "hi" <now> & go"#), "say &quot;hi&quot; <now> &amp; go");
    }

    #[test]
    fn escape_then_decode_restores_value() {
        let raw = "Tom & \"Jerry\" <3";
        assert_eq!(decode_entities(&escape_attr(raw)), raw);
        assert_eq!(decode_entities(&escape_text(raw)), raw);
    }
}
