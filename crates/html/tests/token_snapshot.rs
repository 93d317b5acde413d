use html::{Token, TokenStream, tokenize};

fn escape_text(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

/// One line per token, stable enough to compare against hand-written snapshots.
fn format_tokens(stream: &TokenStream) -> Vec<String> {
    let atoms = stream.atoms();
    stream
        .iter()
        .map(|token| match token {
            Token::Doctype(dt) => format!("DOCTYPE \"{}\"", escape_text(dt)),
            Token::StartTag {
                name,
                attributes,
                self_closing,
            } => {
                let attrs: Vec<String> = attributes
                    .iter()
                    .map(|(k, v)| match v {
                        Some(v) => format!("{}=\"{}\"", atoms.resolve(*k), escape_text(v)),
                        None => atoms.resolve(*k).to_string(),
                    })
                    .collect();
                format!(
                    "START name={} attrs=[{}] self_closing={self_closing}",
                    atoms.resolve(*name),
                    attrs.join(" ")
                )
            }
            Token::EndTag(name) => format!("END name={}", atoms.resolve(*name)),
            Token::Comment(text) => format!("COMMENT \"{}\"", escape_text(text)),
            Token::Text(text) => format!("TEXT \"{}\"", escape_text(text)),
        })
        .collect()
}

fn assert_snapshot(input: &str, expected: &[&str]) {
    let actual = format_tokens(&tokenize(input));
    assert_eq!(
        actual, expected,
        "token snapshot mismatch for input: {input:?}"
    );
}

#[test]
fn correction_body() {
    assert_snapshot(
        concat!(
            r#"<div>I <span class="toggle" data-original="has" data-corrected="have" "#,
            r#"style="background:#2EBD2E; color:white;">have</span> <br>two cats</div>"#
        ),
        &[
            "START name=div attrs=[] self_closing=false",
            "TEXT \"I \"",
            "START name=span attrs=[class=\"toggle\" data-original=\"has\" data-corrected=\"have\" style=\"background:#2EBD2E; color:white;\"] self_closing=false",
            "TEXT \"have\"",
            "END name=span",
            "TEXT \" \"",
            "START name=br attrs=[] self_closing=true",
            "TEXT \"two cats\"",
            "END name=div",
        ],
    );
}

#[test]
fn escaped_quotes_in_alternatives() {
    assert_snapshot(
        r#"<span class="toggle" data-original="he said &quot;no&quot;" data-corrected='it&#39;s'>x</span>"#,
        &[
            "START name=span attrs=[class=\"toggle\" data-original=\"he said \\\"no\\\"\" data-corrected=\"it's\"] self_closing=false",
            "TEXT \"x\"",
            "END name=span",
        ],
    );
}

#[test]
fn mixed_case_names_and_comments() {
    assert_snapshot(
        "<!DOCTYPE html><P CLASS=Toggle>a<!-- b -->c</p>",
        &[
            "DOCTYPE \"DOCTYPE html\"",
            "START name=p attrs=[class=\"Toggle\"] self_closing=false",
            "TEXT \"a\"",
            "COMMENT \" b \"",
            "TEXT \"c\"",
            "END name=p",
        ],
    );
}

#[test]
fn cdata_outside_foreign_content_is_a_comment() {
    assert_snapshot(
        "<p><![CDATA[x]]>y</p>",
        &[
            "START name=p attrs=[] self_closing=false",
            "COMMENT \"[CDATA[x]]\"",
            "TEXT \"y\"",
            "END name=p",
        ],
    );
}

#[test]
fn style_body_is_not_tokenized() {
    assert_snapshot(
        "<style>.toggle > b { color: red }</style>x",
        &[
            "START name=style attrs=[] self_closing=false",
            "TEXT \".toggle > b { color: red }\"",
            "END name=style",
            "TEXT \"x\"",
        ],
    );
}
