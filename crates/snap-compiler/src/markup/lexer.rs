//! Markup lexer.
//!
//! Produces span-based tokens without storing text; text is sliced from
//! source only when needed.
//!
//! Two logos lexers share one cursor: [`ContentToken`] between tags and
//! [`TagToken`] inside a start or end tag, switched with `morph`. Bodies of
//! comments, declarations, and raw-text elements are skipped by bumping the
//! cursor past their terminator.
//!
//! ## Error handling
//!
//! Consecutive error characters inside a tag coalesce into one `Garbage`
//! token. A construct cut off by end of input extends to the end of source;
//! the tree builder detects the missing terminator from the token text.

use std::ops::Range;

use logos::{Lexer, Logos};
use rowan::TextRange;

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum ContentToken {
    #[token("<!--")]
    CommentOpen,

    #[token("<![CDATA[")]
    CDataOpen,

    #[token("<!")]
    DeclarationOpen,

    #[token("<?")]
    PiOpen,

    #[token("</")]
    EndTagOpen,

    #[token("<")]
    Lt,

    #[regex(r"[^<]+")]
    Text,
}

#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum TagToken {
    #[regex(r"[ \t\r\n\x0C]+")]
    Whitespace,

    #[token("=")]
    Equals,

    #[token(">")]
    Close,

    #[token("/>")]
    SelfClose,

    #[token("/")]
    Slash,

    #[regex(r#""[^"]*""#)]
    #[regex(r"'[^']*'")]
    Quoted,

    #[regex(r#"[^ \t\r\n\x0C"'<>/=]+"#)]
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Text,
    /// `<!-- ... -->`, terminator included when present.
    Comment,
    /// `<![CDATA[ ... ]]>`
    CData,
    /// `<!DOCTYPE ...>` and other `<!` declarations.
    Doctype,
    /// `<? ... >`
    ProcessingInstruction,
    /// `<name`
    StartTag,
    /// `</name`
    EndTag,
    AttrName,
    Equals,
    /// Quoted (quotes included) or unquoted attribute value.
    AttrValue,
    /// `>`
    TagEnd,
    /// `/>`
    TagSelfClose,
    /// Body of a raw-text element, up to its end tag.
    RawText,
    Garbage,
}

/// Zero-copy token: kind + span, text retrieved via [`token_text`] when needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: TextRange,
}

impl Token {
    #[inline]
    pub fn new(kind: TokenKind, span: TextRange) -> Self {
        Self { kind, span }
    }
}

fn range_to_text_range(range: Range<usize>) -> TextRange {
    TextRange::new((range.start as u32).into(), (range.end as u32).into())
}

/// Elements whose body is not markup.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style", "textarea", "title"];

/// Tokenizes markup into a vector of span-based tokens.
pub fn lex(source: &str) -> Vec<Token> {
    let mut tokens = Vec::new();
    let mut content = ContentToken::lexer(source);

    while let Some(next) = content.next() {
        let span = content.span();
        // Every byte matches some content token.
        let Ok(kind) = next else {
            push_text(&mut tokens, span);
            continue;
        };

        match kind {
            ContentToken::Text => push_text(&mut tokens, span),
            ContentToken::CommentOpen => {
                skip_past(&mut content, "-->");
                tokens.push(Token::new(
                    TokenKind::Comment,
                    range_to_text_range(content.span()),
                ));
            }
            ContentToken::CDataOpen => {
                skip_past(&mut content, "]]>");
                tokens.push(Token::new(
                    TokenKind::CData,
                    range_to_text_range(content.span()),
                ));
            }
            ContentToken::DeclarationOpen => {
                skip_past(&mut content, ">");
                tokens.push(Token::new(
                    TokenKind::Doctype,
                    range_to_text_range(content.span()),
                ));
            }
            ContentToken::PiOpen => {
                skip_past(&mut content, ">");
                tokens.push(Token::new(
                    TokenKind::ProcessingInstruction,
                    range_to_text_range(content.span()),
                ));
            }
            ContentToken::Lt | ContentToken::EndTagOpen => {
                let starts_name = content
                    .remainder()
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_alphabetic());
                if !starts_name {
                    push_text(&mut tokens, span);
                    continue;
                }

                let name_len = content
                    .remainder()
                    .find(|c: char| c.is_ascii_whitespace() || c == '/' || c == '>')
                    .unwrap_or(content.remainder().len());
                content.bump(name_len);

                let tag_kind = if kind == ContentToken::Lt {
                    TokenKind::StartTag
                } else {
                    TokenKind::EndTag
                };
                let name_span = content.span();
                tokens.push(Token::new(tag_kind, range_to_text_range(name_span.clone())));

                let prefix = if kind == ContentToken::Lt { 1 } else { 2 };
                let name = &source[name_span.start + prefix..name_span.end];
                let mut tag = content.morph::<TagToken>();
                let self_closed = lex_tag(&mut tag, &mut tokens);
                content = tag.morph::<ContentToken>();

                if tag_kind == TokenKind::StartTag
                    && !self_closed
                    && RAW_TEXT_ELEMENTS
                        .iter()
                        .any(|raw| raw.eq_ignore_ascii_case(name))
                {
                    lex_raw_text(&mut content, name, &mut tokens);
                }
            }
        }
    }

    tokens
}

/// Append text, merging with a preceding adjacent text token.
fn push_text(tokens: &mut Vec<Token>, span: Range<usize>) {
    let range = range_to_text_range(span);
    if let Some(last) = tokens.last_mut()
        && last.kind == TokenKind::Text
        && last.span.end() == range.start()
    {
        last.span = last.span.cover(range);
        return;
    }
    tokens.push(Token::new(TokenKind::Text, range));
}

/// Extend the current token past `terminator`, or to end of input.
fn skip_past(lexer: &mut Lexer<'_, ContentToken>, terminator: &str) {
    let rest = lexer.remainder();
    let len = rest
        .find(terminator)
        .map_or(rest.len(), |at| at + terminator.len());
    lexer.bump(len);
}

/// Lex attributes up to and including `>` or `/>`. Returns whether the tag
/// ended with `/>`.
fn lex_tag(tag: &mut Lexer<'_, TagToken>, tokens: &mut Vec<Token>) -> bool {
    let mut error_start: Option<usize> = None;

    let flush = |error_start: &mut Option<usize>, end: usize, tokens: &mut Vec<Token>| {
        if let Some(start) = error_start.take() {
            tokens.push(Token::new(
                TokenKind::Garbage,
                range_to_text_range(start..end),
            ));
        }
    };

    while let Some(next) = tag.next() {
        let span = tag.span();
        let Ok(kind) = next else {
            if error_start.is_none() {
                error_start = Some(span.start);
            }
            continue;
        };
        flush(&mut error_start, span.start, tokens);

        match kind {
            TagToken::Close => {
                tokens.push(Token::new(TokenKind::TagEnd, range_to_text_range(span)));
                return false;
            }
            TagToken::SelfClose => {
                tokens.push(Token::new(
                    TokenKind::TagSelfClose,
                    range_to_text_range(span),
                ));
                return true;
            }
            TagToken::Whitespace | TagToken::Slash => {}
            TagToken::Name => {
                tokens.push(Token::new(TokenKind::AttrName, range_to_text_range(span)));
            }
            TagToken::Quoted => {
                tokens.push(Token::new(TokenKind::AttrValue, range_to_text_range(span)));
            }
            TagToken::Equals => {
                tokens.push(Token::new(TokenKind::Equals, range_to_text_range(span)));
                lex_unquoted_value(tag, tokens);
            }
        }
    }

    flush(&mut error_start, tag.source().len(), tokens);
    false
}

/// An unquoted value runs to the next whitespace or `>`. Quoted values are
/// left for the tag lexer.
fn lex_unquoted_value(tag: &mut Lexer<'_, TagToken>, tokens: &mut Vec<Token>) {
    let rest = tag.remainder();
    let ws = rest.len() - rest.trim_start_matches(|c: char| c.is_ascii_whitespace()).len();
    let value = &rest[ws..];
    if value.is_empty() || value.starts_with(['"', '\'', '>']) {
        return;
    }

    let len = value
        .find(|c: char| c.is_ascii_whitespace() || c == '>')
        .unwrap_or(value.len());
    let start = tag.span().end + ws;
    tag.bump(ws + len);
    tokens.push(Token::new(
        TokenKind::AttrValue,
        range_to_text_range(start..start + len),
    ));
}

/// Emit the body of a raw-text element as one token and stop before its
/// end tag (matched case-insensitively).
fn lex_raw_text(content: &mut Lexer<'_, ContentToken>, name: &str, tokens: &mut Vec<Token>) {
    let rest = content.remainder();
    let start = content.span().end;

    let mut len = rest.len();
    let mut search = 0;
    while let Some(at) = rest[search..].find("</") {
        let candidate = search + at;
        let after = &rest[candidate + 2..];
        if after.len() >= name.len()
            && after.is_char_boundary(name.len())
            && after[..name.len()].eq_ignore_ascii_case(name)
        {
            len = candidate;
            break;
        }
        search = candidate + 2;
    }

    if len > 0 {
        tokens.push(Token::new(
            TokenKind::RawText,
            range_to_text_range(start..start + len),
        ));
    }
    content.bump(len);
}

/// Retrieves the text slice for a token. O(1) slice into source.
#[inline]
pub fn token_text<'s>(source: &'s str, token: &Token) -> &'s str {
    &source[Range::<usize>::from(token.span)]
}
