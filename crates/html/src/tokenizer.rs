//! Fragment tokenizer for host-supplied markup.
//!
//! Tag and attribute names use the ASCII class `[A-Za-z0-9:_-]` and are interned lowercase.
//! `<!…>`, `<?…>` and `</` followed by a non-letter are bogus comments running to the next `>`;
//! `</>` is dropped. Any other `<` that does not open a tag is kept as literal text.
//! `script`/`style` bodies are rawtext up to the matching close tag.
//!
//! Known limitations:
//! - Not the HTML5 state machine: no implied end tags, no foster parenting.
//! - Rawtext close-tag scanning accepts only ASCII whitespace before `>`.
use crate::entities::decode_entities;
use crate::types::{AtomId, AtomTable, Token, TokenStream};
use memchr::memchr;

const COMMENT_START: &str = "<!--";
const COMMENT_END: &str = "-->";

// < cannot appear in UTF-8 continuation bytes, so byte scans for it stay on char boundaries
const SCRIPT_CLOSE_TAG: &[u8] = b"</script";
const STYLE_CLOSE_TAG: &[u8] = b"</style";

pub(crate) fn is_void_element(name: &str) -> bool {
    matches!(
        name,
        "area"
            | "base"
            | "br"
            | "col"
            | "embed"
            | "hr"
            | "img"
            | "input"
            | "link"
            | "meta"
            | "param"
            | "source"
            | "track"
            | "wbr"
    )
}

pub(crate) fn is_rawtext_element(name: &str) -> bool {
    name == "script" || name == "style"
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'-' || b == b'_' || b == b':'
}

fn starts_with_ignore_ascii_case_at(haystack: &[u8], start: usize, needle: &[u8]) -> bool {
    haystack.len() >= start + needle.len()
        && haystack[start..start + needle.len()].eq_ignore_ascii_case(needle)
}

fn find_rawtext_close_tag(haystack: &str, close_tag: &[u8]) -> Option<(usize, usize)> {
    let bytes = haystack.as_bytes();
    let len = bytes.len();
    let n = close_tag.len();
    let mut i = 0;
    while i + n <= len {
        i += memchr(b'<', &bytes[i..])?;
        if i + n > len {
            return None;
        }
        if starts_with_ignore_ascii_case_at(bytes, i, close_tag) {
            let mut k = i + n;
            while k < len && bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k < len && bytes[k] == b'>' {
                return Some((i, k + 1));
            }
        }
        i += 1;
    }
    None
}

/// Cursor over one input string. Every slice boundary it produces sits on an ASCII structural
/// byte, so slices are always valid UTF-8.
pub struct Tokenizer<'a> {
    input: &'a str,
    bytes: &'a [u8],
    pos: usize,
    atoms: AtomTable,
    out: Vec<Token>,
    pending_text: String,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            input,
            bytes: input.as_bytes(),
            pos: 0,
            atoms: AtomTable::new(),
            out: Vec::new(),
            pending_text: String::new(),
        }
    }

    pub fn run(mut self) -> TokenStream {
        while self.pos < self.bytes.len() {
            if self.bytes[self.pos] != b'<' {
                self.scan_text();
                continue;
            }
            if self.input[self.pos..].starts_with(COMMENT_START) {
                self.scan_comment();
            } else if starts_with_ignore_ascii_case_at(self.bytes, self.pos, b"<!doctype") {
                self.scan_doctype();
            } else if self.peek(1) == Some(b'/') && self.peek(2).is_some_and(|b| b.is_ascii_alphabetic())
            {
                self.scan_end_tag();
            } else if self.peek(1).is_some_and(|b| b.is_ascii_alphabetic()) {
                self.scan_start_tag();
            } else if self.peek(1) == Some(b'!') {
                self.scan_bogus_comment(self.pos + 2);
            } else if self.peek(1) == Some(b'?') {
                // the '?' is part of the comment body
                self.scan_bogus_comment(self.pos + 1);
            } else if self.peek(1) == Some(b'/') && self.peek(2) == Some(b'>') {
                self.pos += 3;
            } else if self.peek(1) == Some(b'/') && self.peek(2).is_some() {
                self.scan_bogus_comment(self.pos + 2);
            } else {
                // stray '<' is literal text
                self.pending_text.push('<');
                self.pos += 1;
            }
        }
        self.flush_text();
        TokenStream::new(self.out, self.atoms)
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn flush_text(&mut self) {
        if self.pending_text.is_empty() {
            return;
        }
        let decoded = decode_entities(&self.pending_text);
        self.pending_text.clear();
        if !decoded.is_empty() {
            self.out.push(Token::Text(decoded));
        }
    }

    fn push(&mut self, token: Token) {
        self.flush_text();
        self.out.push(token);
    }

    fn scan_text(&mut self) {
        let start = self.pos;
        let end = memchr(b'<', &self.bytes[start..]).map_or(self.bytes.len(), |rel| start + rel);
        self.pending_text.push_str(&self.input[start..end]);
        self.pos = end;
    }

    fn scan_comment(&mut self) {
        let body_start = self.pos + COMMENT_START.len();
        match self.input[body_start..].find(COMMENT_END) {
            Some(rel) => {
                let body = self.input[body_start..body_start + rel].to_string();
                self.push(Token::Comment(body));
                self.pos = body_start + rel + COMMENT_END.len();
            }
            None => {
                let body = self.input[body_start..].to_string();
                self.push(Token::Comment(body));
                self.pos = self.bytes.len();
            }
        }
    }

    /// Everything from `body_start` up to the next `>` (or end of input) becomes a comment.
    fn scan_bogus_comment(&mut self, body_start: usize) {
        let rest = &self.bytes[body_start..];
        let body_end = memchr(b'>', rest).map_or(self.bytes.len(), |rel| body_start + rel);
        let body = self.input[body_start..body_end].to_string();
        self.push(Token::Comment(body));
        self.pos = (body_end + 1).min(self.bytes.len());
    }

    fn scan_doctype(&mut self) {
        let rest = &self.input[self.pos + 2..];
        match rest.find('>') {
            Some(end) => {
                let doctype = rest[..end].trim().to_string();
                self.push(Token::Doctype(doctype));
                self.pos += 2 + end + 1;
            }
            None => self.pos = self.bytes.len(),
        }
    }

    fn scan_name(&mut self, start: usize) -> (AtomId, usize) {
        let mut end = start;
        while end < self.bytes.len() && is_name_byte(self.bytes[end]) {
            end += 1;
        }
        let atom = self.atoms.intern_ascii_lowercase(&self.input[start..end]);
        (atom, end)
    }

    fn scan_end_tag(&mut self) {
        let (name, mut k) = self.scan_name(self.pos + 2);
        k = memchr(b'>', &self.bytes[k..]).map_or(self.bytes.len(), |rel| k + rel + 1);
        self.push(Token::EndTag(name));
        self.pos = k;
    }

    fn scan_start_tag(&mut self) {
        let (name, mut k) = self.scan_name(self.pos + 1);
        let len = self.bytes.len();
        let mut attributes: Vec<(AtomId, Option<String>)> = Vec::new();
        let mut self_closing = false;

        loop {
            while k < len && self.bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            if k >= len {
                break;
            }
            match self.bytes[k] {
                b'>' => {
                    k += 1;
                    break;
                }
                b'/' => {
                    if self.bytes.get(k + 1) == Some(&b'>') {
                        self_closing = true;
                        k += 2;
                        break;
                    }
                    k += 1;
                    continue;
                }
                _ => {}
            }
            let name_start = k;
            while k < len && is_name_byte(self.bytes[k]) {
                k += 1;
            }
            if name_start == k {
                k += 1;
                continue;
            }
            let attr_name = self.atoms.intern_ascii_lowercase(&self.input[name_start..k]);
            while k < len && self.bytes[k].is_ascii_whitespace() {
                k += 1;
            }
            let value = if k < len && self.bytes[k] == b'=' {
                k += 1;
                while k < len && self.bytes[k].is_ascii_whitespace() {
                    k += 1;
                }
                let (value, next) = self.scan_attribute_value(k);
                k = next;
                Some(value)
            } else {
                None
            };
            // first occurrence wins, as in HTML
            if !attributes.iter().any(|(existing, _)| *existing == attr_name) {
                attributes.push((attr_name, value));
            }
        }

        let name_str = self.atoms.resolve(name);
        if is_void_element(name_str) {
            self_closing = true;
        }
        let rawtext = is_rawtext_element(name_str) && !self_closing;
        let close_tag = if name_str == "script" {
            SCRIPT_CLOSE_TAG
        } else {
            STYLE_CLOSE_TAG
        };

        self.push(Token::StartTag {
            name,
            attributes,
            self_closing,
        });
        self.pos = k;

        if rawtext {
            self.scan_rawtext(name, close_tag);
        }
    }

    fn scan_attribute_value(&self, mut k: usize) -> (String, usize) {
        let len = self.bytes.len();
        if k < len && (self.bytes[k] == b'"' || self.bytes[k] == b'\'') {
            let quote = self.bytes[k];
            k += 1;
            let start = k;
            k = memchr(quote, &self.bytes[k..]).map_or(len, |rel| k + rel);
            let raw = &self.input[start..k];
            if k < len {
                k += 1;
            }
            return (decode_entities(raw), k);
        }
        let start = k;
        while k < len && !self.bytes[k].is_ascii_whitespace() && self.bytes[k] != b'>' {
            if self.bytes[k] == b'/' && self.bytes.get(k + 1) == Some(&b'>') {
                break;
            }
            k += 1;
        }
        (decode_entities(&self.input[start..k]), k)
    }

    fn scan_rawtext(&mut self, name: AtomId, close_tag: &[u8]) {
        let start = self.pos;
        match find_rawtext_close_tag(&self.input[start..], close_tag) {
            Some((rel_start, rel_end)) => {
                let raw = &self.input[start..start + rel_start];
                if !raw.is_empty() {
                    self.out.push(Token::Text(raw.to_string()));
                }
                self.out.push(Token::EndTag(name));
                self.pos = start + rel_end;
            }
            None => {
                // missing close tag: the remainder is rawtext, closed implicitly
                let raw = &self.input[start..];
                if !raw.is_empty() {
                    self.out.push(Token::Text(raw.to_string()));
                }
                self.out.push(Token::EndTag(name));
                self.pos = self.bytes.len();
            }
        }
    }
}

/// Tokenizes a whole fragment; names are interned into the stream's atom table.
pub fn tokenize(input: &str) -> TokenStream {
    Tokenizer::new(input).run()
}
