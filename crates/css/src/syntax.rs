use std::fmt;

// A single CSS property: "color: red"
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    pub name: String,
    pub value: String,
}

impl Declaration {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.trim().to_ascii_lowercase(),
            value: value.trim().to_string(),
        }
    }
}

impl fmt::Display for Declaration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {};", self.name, self.value)
    }
}

// input: "color: red; font-size: 12px;"
// output: vec![Declaration { name: "color", value: "red" }, Declaration { name: "font-size", value: "12px" }]
pub fn parse_declarations(input: &str) -> Vec<Declaration> {
    split_top_level(input)
        .into_iter()
        .filter_map(|pair| {
            let (n, v) = pair.split_once(':')?;
            let name = n.trim().to_ascii_lowercase();
            if name.is_empty() {
                return None;
            }
            Some(Declaration {
                name,
                value: v.trim().to_string(),
            })
        })
        .collect()
}

// Split at `;` outside quoted strings and parentheses:
// "font-family: 'a;b'; background: url(x;y)" -> ["font-family: 'a;b'", " background: url(x;y)"]
fn split_top_level(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0usize;
    let mut quote: Option<char> = None;
    let mut escaped = false;
    let mut parens = 0usize;

    for (i, ch) in input.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match (quote, ch) {
            (_, '\\') => escaped = true,
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"' | '\'') => quote = Some(ch),
            (None, '(') => parens += 1,
            (None, ')') => parens = parens.saturating_sub(1),
            (None, ';') if parens == 0 => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            (None, _) => {}
        }
    }
    parts.push(&input[start..]);
    parts
}

// output: "color: red; font-size: 12px;"
pub fn serialize_declarations(declarations: &[Declaration]) -> String {
    declarations
        .iter()
        .map(Declaration::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Assign a shorthand property the way `element.style.<shorthand> = value` does: the first
/// declaration of the shorthand or one of its longhands (`name-*`) is replaced in place, the rest
/// of that family is dropped, and the shorthand is appended when none was present.
pub fn set_shorthand(declarations: &mut Vec<Declaration>, shorthand: &str, value: &str) {
    let family_prefix = format!("{shorthand}-");
    let in_family = |d: &Declaration| d.name == shorthand || d.name.starts_with(&family_prefix);

    let replacement = Declaration::new(shorthand, value);
    match declarations.iter().position(in_family) {
        Some(first) => {
            declarations[first] = replacement;
            let mut index = 0usize;
            declarations.retain(|d| {
                let keep = index == first || !in_family(d);
                index += 1;
                keep
            });
        }
        None => declarations.push(replacement),
    }
}
