use rowan::TextRange;

/// Node kinds the compiler does not encode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OtherKind {
    Doctype,
    ProcessingInstruction,
    CData,
}

impl OtherKind {
    pub fn name(self) -> &'static str {
        match self {
            Self::Doctype => "doctype",
            Self::ProcessingInstruction => "processing instruction",
            Self::CData => "CDATA section",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
    pub span: TextRange,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    /// Lowercase tag name.
    pub name: String,
    /// Attributes in source order.
    pub attributes: Vec<Attribute>,
    pub children: Vec<Node>,
    pub span: TextRange,
}

impl Element {
    /// A detached element for building trees in code.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
            span: TextRange::default(),
        }
    }

    pub fn attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.push(Attribute {
            name: name.into(),
            value: value.into(),
            span: TextRange::default(),
        });
        self
    }

    pub fn child(mut self, node: impl Into<Node>) -> Self {
        self.children.push(node.into());
        self
    }

    pub fn get_attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }
}

/// Children are torn down with a work list; nesting depth is bounded by
/// the input, not the thread stack.
impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(node) = pending.pop() {
            if let Node::Element(mut el) = node {
                pending.append(&mut el.children);
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Element(Element),
    Text { text: String, span: TextRange },
    Comment { text: String, span: TextRange },
    Other {
        kind: OtherKind,
        text: String,
        span: TextRange,
    },
}

impl Node {
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text {
            text: text.into(),
            span: TextRange::default(),
        }
    }

    pub fn comment(text: impl Into<String>) -> Self {
        Self::Comment {
            text: text.into(),
            span: TextRange::default(),
        }
    }

    pub fn span(&self) -> TextRange {
        match self {
            Self::Element(el) => el.span,
            Self::Text { span, .. } | Self::Comment { span, .. } | Self::Other { span, .. } => {
                *span
            }
        }
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }
}

impl From<Element> for Node {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}
