//! Tolerant tree builder over the token stream.
//!
//! Never fails: malformed markup is repaired the way an HTML parser would
//! (implicit closes, dropped stray close tags) and each repair is reported.

use rowan::TextRange;

use crate::diagnostics::{DiagnosticKind, Diagnostics};

use super::entities;
use super::lexer::{RAW_TEXT_ELEMENTS, Token, TokenKind, lex, token_text};
use super::node::{Attribute, Element, Node, OtherKind};
use super::is_void_element;

/// Parse markup into top-level nodes plus diagnostics.
pub fn parse(source: &str) -> (Vec<Node>, Diagnostics) {
    let mut builder = TreeBuilder {
        source,
        tokens: lex(source),
        pos: 0,
        stack: Vec::new(),
        roots: Vec::new(),
        diagnostics: Diagnostics::new(),
    };
    builder.run();
    (builder.roots, builder.diagnostics)
}

struct OpenElement {
    element: Element,
    open_tag: TextRange,
}

struct TreeBuilder<'s> {
    source: &'s str,
    tokens: Vec<Token>,
    pos: usize,
    stack: Vec<OpenElement>,
    roots: Vec<Node>,
    diagnostics: Diagnostics,
}

impl<'s> TreeBuilder<'s> {
    fn run(&mut self) {
        while let Some(token) = self.bump() {
            match token.kind {
                TokenKind::Text => {
                    let text = entities::decode(self.text(&token)).into_owned();
                    self.append(Node::Text {
                        text,
                        span: token.span,
                    });
                }
                TokenKind::RawText => {
                    let text = self.text(&token).to_string();
                    self.append(Node::Text {
                        text,
                        span: token.span,
                    });
                }
                TokenKind::Comment => self.comment(token),
                TokenKind::CData => self.other(token, OtherKind::CData, "<![CDATA[", "]]>"),
                TokenKind::Doctype => self.other(token, OtherKind::Doctype, "<!", ">"),
                TokenKind::ProcessingInstruction => {
                    self.other(token, OtherKind::ProcessingInstruction, "<?", ">")
                }
                TokenKind::StartTag => self.start_tag(token),
                TokenKind::EndTag => self.end_tag(token),
                // Tag internals only follow a start or end tag.
                TokenKind::AttrName
                | TokenKind::Equals
                | TokenKind::AttrValue
                | TokenKind::TagEnd
                | TokenKind::TagSelfClose
                | TokenKind::Garbage => {}
            }
        }

        while let Some(open) = self.stack.pop() {
            self.diagnostics
                .report(DiagnosticKind::UnclosedElement, open.open_tag)
                .message(&open.element.name)
                .emit();
            self.attach_implicit(open);
        }
    }

    fn comment(&mut self, token: Token) {
        let raw = self.text(&token);
        let inner = &raw["<!--".len()..];
        let text = match inner.strip_suffix("-->") {
            Some(body) => body,
            None => {
                self.diagnostics
                    .report(DiagnosticKind::UnterminatedComment, token.span)
                    .emit();
                inner
            }
        };
        self.append(Node::Comment {
            text: text.to_string(),
            span: token.span,
        });
    }

    fn other(&mut self, token: Token, kind: OtherKind, open: &str, close: &str) {
        let raw = self.text(&token);
        let inner = raw.strip_prefix(open).unwrap_or(raw);
        let inner = inner.strip_suffix(close).unwrap_or(inner);
        self.append(Node::Other {
            kind,
            text: inner.to_string(),
            span: token.span,
        });
    }

    fn start_tag(&mut self, token: Token) {
        let name = self.text(&token)[1..].to_ascii_lowercase();
        let mut attributes: Vec<Attribute> = Vec::new();
        let mut end = token.span;
        let mut terminated = false;
        let mut self_closed = false;

        while let Some(next) = self.peek() {
            match next.kind {
                TokenKind::AttrName => {
                    self.pos += 1;
                    let attr = self.attribute(next);
                    end = attr.span;
                    // First occurrence wins.
                    if !attributes.iter().any(|a| a.name == attr.name) {
                        attributes.push(attr);
                    }
                }
                TokenKind::Equals | TokenKind::AttrValue | TokenKind::Garbage => {
                    self.pos += 1;
                    end = next.span;
                    let text = self.text(&next).to_string();
                    self.diagnostics
                        .report(DiagnosticKind::MalformedAttribute, next.span)
                        .message(text)
                        .emit();
                }
                TokenKind::TagEnd | TokenKind::TagSelfClose => {
                    self.pos += 1;
                    end = next.span;
                    terminated = true;
                    self_closed = next.kind == TokenKind::TagSelfClose;
                    break;
                }
                _ => break,
            }
        }

        let open_tag = token.span.cover(end);
        let mut element = Element {
            name,
            attributes,
            children: Vec::new(),
            span: open_tag,
        };

        if !terminated {
            self.diagnostics
                .report(DiagnosticKind::UnterminatedTag, open_tag)
                .emit();
            self.append(Node::Element(element));
            return;
        }

        if self_closed || is_void_element(&element.name) {
            self.append(Node::Element(element));
            return;
        }

        if RAW_TEXT_ELEMENTS.contains(&element.name.as_str())
            && let Some(body) = self.peek().filter(|t| t.kind == TokenKind::RawText)
        {
            self.pos += 1;
            let raw = self.text(&body);
            // Escapable raw text: textarea and title decode references.
            let text = match element.name.as_str() {
                "textarea" | "title" => entities::decode(raw).into_owned(),
                _ => raw.to_string(),
            };
            element.children.push(Node::Text {
                text,
                span: body.span,
            });
        }

        self.stack.push(OpenElement { element, open_tag });
    }

    /// Name, optional `=`, optional value.
    fn attribute(&mut self, name_token: Token) -> Attribute {
        let name = self.text(&name_token).to_ascii_lowercase();
        let mut span = name_token.span;
        let mut value = String::new();

        if let Some(eq) = self.peek().filter(|t| t.kind == TokenKind::Equals) {
            self.pos += 1;
            span = span.cover(eq.span);
            if let Some(v) = self.peek().filter(|t| t.kind == TokenKind::AttrValue) {
                self.pos += 1;
                span = span.cover(v.span);
                value = entities::decode(unquote(self.text(&v))).into_owned();
            }
        }

        Attribute { name, value, span }
    }

    fn end_tag(&mut self, token: Token) {
        let name = self.text(&token)[2..].to_ascii_lowercase();
        let mut close = token.span;
        let mut terminated = false;

        // Anything between the name and `>` is ignored.
        while let Some(next) = self.peek() {
            match next.kind {
                TokenKind::AttrName
                | TokenKind::Equals
                | TokenKind::AttrValue
                | TokenKind::Garbage
                | TokenKind::TagSelfClose => {
                    self.pos += 1;
                    close = close.cover(next.span);
                }
                TokenKind::TagEnd => {
                    self.pos += 1;
                    close = close.cover(next.span);
                    terminated = true;
                    break;
                }
                _ => break,
            }
        }

        if !terminated {
            self.diagnostics
                .report(DiagnosticKind::UnterminatedTag, close)
                .emit();
        }

        let Some(idx) = self.stack.iter().rposition(|o| o.element.name == name) else {
            self.diagnostics
                .report(DiagnosticKind::StrayCloseTag, close)
                .message(&name)
                .fix("remove the close tag", "")
                .emit();
            return;
        };

        while self.stack.len() > idx + 1 {
            let Some(open) = self.stack.pop() else { break };
            self.diagnostics
                .report(DiagnosticKind::UnclosedElement, open.open_tag)
                .message(&open.element.name)
                .related_to(format!("closed by `</{name}>`"), close)
                .emit();
            self.attach_implicit(open);
        }

        if let Some(mut open) = self.stack.pop() {
            open.element.span = TextRange::new(open.element.span.start(), close.end());
            self.append(Node::Element(open.element));
        }
    }

    /// Attach an element closed without an end tag; its span ends at its
    /// last child.
    fn attach_implicit(&mut self, open: OpenElement) {
        let mut element = open.element;
        if let Some(last) = element.children.last() {
            element.span = element.span.cover(last.span());
        }
        self.append(Node::Element(element));
    }

    fn append(&mut self, node: Node) {
        match self.stack.last_mut() {
            Some(parent) => parent.element.children.push(node),
            None => self.roots.push(node),
        }
    }

    fn bump(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).copied()?;
        self.pos += 1;
        Some(token)
    }

    fn peek(&self) -> Option<Token> {
        self.tokens.get(self.pos).copied()
    }

    fn text(&self, token: &Token) -> &'s str {
        token_text(self.source, token)
    }
}

fn unquote(raw: &str) -> &str {
    let bytes = raw.as_bytes();
    if raw.len() >= 2
        && (bytes[0] == b'"' || bytes[0] == b'\'')
        && bytes[raw.len() - 1] == bytes[0]
    {
        &raw[1..raw.len() - 1]
    } else {
        raw
    }
}
