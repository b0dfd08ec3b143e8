use super::lexer::{TokenKind, lex, token_text};

fn snapshot(input: &str) -> String {
    let mut out = String::new();
    for token in lex(input) {
        out.push_str(&format!(
            "{:?} {:?}\n",
            token.kind,
            token_text(input, &token)
        ));
    }
    out
}

#[test]
fn element_with_quoted_attribute() {
    insta::assert_snapshot!(snapshot(r#"<div class="a">hi</div>"#), @r#"
    StartTag "<div"
    AttrName "class"
    Equals "="
    AttrValue "\"a\""
    TagEnd ">"
    Text "hi"
    EndTag "</div"
    TagEnd ">"
    "#);
}

#[test]
fn unquoted_value_and_self_close() {
    insta::assert_snapshot!(snapshot("<input value=x disabled/>"), @r#"
    StartTag "<input"
    AttrName "value"
    Equals "="
    AttrValue "x"
    AttrName "disabled"
    TagSelfClose "/>"
    "#);
}

#[test]
fn single_quoted_and_spaced_equals() {
    insta::assert_snapshot!(snapshot("<a title = 'x y'>"), @r#"
    StartTag "<a"
    AttrName "title"
    Equals "="
    AttrValue "'x y'"
    TagEnd ">"
    "#);
}

#[test]
fn declarations_and_bare_lt() {
    insta::assert_snapshot!(snapshot("<!DOCTYPE html><!-- c --><p>a < b</p>"), @r#"
    Doctype "<!DOCTYPE html>"
    Comment "<!-- c -->"
    StartTag "<p"
    TagEnd ">"
    Text "a < b"
    EndTag "</p"
    TagEnd ">"
    "#);
}

#[test]
fn raw_text_body_is_one_token() {
    insta::assert_snapshot!(snapshot("<script>if (a < b) { x(); }</script>"), @r#"
    StartTag "<script"
    TagEnd ">"
    RawText "if (a < b) { x(); }"
    EndTag "</script"
    TagEnd ">"
    "#);
}

#[test]
fn raw_text_end_tag_is_case_insensitive() {
    insta::assert_snapshot!(snapshot("<style>a</b></STYLE>"), @r#"
    StartTag "<style"
    TagEnd ">"
    RawText "a</b>"
    EndTag "</STYLE"
    TagEnd ">"
    "#);
}

#[test]
fn unterminated_comment_runs_to_end() {
    insta::assert_snapshot!(snapshot("x<!-- open"), @r#"
    Text "x"
    Comment "<!-- open"
    "#);
}

#[test]
fn cdata_and_processing_instruction() {
    insta::assert_snapshot!(snapshot("<?xml v?><![CDATA[a<b]]>"), @r#"
    ProcessingInstruction "<?xml v?>"
    CData "<![CDATA[a<b]]>"
    "#);
}

#[test]
fn stray_lt_in_tag_is_garbage() {
    insta::assert_snapshot!(snapshot("<a <b>"), @r#"
    StartTag "<a"
    Garbage "<"
    AttrName "b"
    TagEnd ">"
    "#);
}

#[test]
fn placeholders_stay_in_text() {
    let tokens = lex("<p>{a} and {b}</p>");
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::StartTag,
            TokenKind::TagEnd,
            TokenKind::Text,
            TokenKind::EndTag,
            TokenKind::TagEnd,
        ]
    );
}
