//! Static/dynamic classification of template strings.
//!
//! A `{field}` placeholder marks a binding. Detection is
//! shallow: [`is_dynamic`] is a substring test, and extraction uses the
//! first non-empty `{...}` match. Strings with braces that never form a
//! match fall back to literal text.

use std::sync::LazyLock;

use regex_automata::meta::Regex;

/// `\{([^}]+)\}`: a brace pair enclosing at least one non-`}` byte.
static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\{[^}]+\}").expect("placeholder pattern is valid")
});

const EVENT_PREFIX: &str = "on";
const HANDLER_PREFIX: &str = "eh__";

/// One piece of a mixed literal/bound string.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    Static(&'a str),
    Dynamic(&'a str),
}

impl<'a> Segment<'a> {
    pub fn text(self) -> &'a str {
        match self {
            Self::Static(s) | Self::Dynamic(s) => s,
        }
    }

    pub fn is_dynamic(self) -> bool {
        matches!(self, Self::Dynamic(_))
    }
}

/// Attribute classification, in precedence order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AttrClass<'a> {
    Event {
        event: &'a str,
        handler: &'a str,
    },
    DynDyn {
        name_field: &'a str,
        value_field: &'a str,
    },
    /// Static name, value mixing literal and bound segments.
    Parts {
        name: &'a str,
        segments: Vec<Segment<'a>>,
    },
    StaticDyn {
        name: &'a str,
        field: &'a str,
    },
    DynStatic {
        field: &'a str,
        value: &'a str,
    },
    Static {
        name: &'a str,
        value: &'a str,
    },
}

/// True when `s` contains both `{` and `}` anywhere.
pub fn is_dynamic(s: &str) -> bool {
    s.contains('{') && s.contains('}')
}

/// Content of the first `{...}` match, or `s` itself when nothing matches.
pub fn extract_field_name(s: &str) -> &str {
    match PLACEHOLDER.find(s) {
        Some(m) => &s[m.start() + 1..m.end() - 1],
        None => s,
    }
}

/// Split `s` into literal and bound segments, left to right.
///
/// No match yields one static segment holding all of `s` (even when empty).
pub fn parse_value_segments(s: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for m in PLACEHOLDER.find_iter(s) {
        if m.start() > cursor {
            segments.push(Segment::Static(&s[cursor..m.start()]));
        }
        segments.push(Segment::Dynamic(&s[m.start() + 1..m.end() - 1]));
        cursor = m.end();
    }

    if cursor < s.len() || segments.is_empty() {
        segments.push(Segment::Static(&s[cursor..]));
    }
    segments
}

/// Segments of a text node. Literal runs that are whitespace-only are
/// dropped; kept runs are not trimmed.
pub fn text_segments(s: &str) -> Vec<Segment<'_>> {
    parse_value_segments(s)
        .into_iter()
        .filter(|seg| match seg {
            Segment::Static(text) => !text.trim().is_empty(),
            Segment::Dynamic(_) => true,
        })
        .collect()
}

/// True when `s` has a brace outside every placeholder match.
pub fn has_unmatched_brace(s: &str) -> bool {
    parse_value_segments(s)
        .iter()
        .any(|seg| matches!(seg, Segment::Static(text) if text.contains(['{', '}'])))
}

pub fn is_event_attribute(name: &str) -> bool {
    name.starts_with(EVENT_PREFIX)
}

/// Event name with the `on` prefix removed.
pub fn event_name(name: &str) -> &str {
    name.strip_prefix(EVENT_PREFIX).unwrap_or(name)
}

/// Handler field of an event binding, with the legacy `eh__` prefix removed.
pub fn handler_field(value: &str) -> &str {
    let field = extract_field_name(value);
    field.strip_prefix(HANDLER_PREFIX).unwrap_or(field)
}

/// Classify one attribute. The order of checks decides the opcode.
pub fn classify_attribute<'a>(name: &'a str, value: &'a str) -> AttrClass<'a> {
    let name_dynamic = is_dynamic(name);
    let value_dynamic = is_dynamic(value);

    if is_event_attribute(name) && value_dynamic {
        return AttrClass::Event {
            event: event_name(name),
            handler: handler_field(value),
        };
    }

    match (name_dynamic, value_dynamic) {
        (true, true) => AttrClass::DynDyn {
            name_field: extract_field_name(name),
            value_field: extract_field_name(value),
        },
        (false, true) => {
            let segments = parse_value_segments(value);
            if segments.len() > 1 {
                AttrClass::Parts { name, segments }
            } else {
                AttrClass::StaticDyn {
                    name,
                    field: extract_field_name(value),
                }
            }
        }
        (true, false) => AttrClass::DynStatic {
            field: extract_field_name(name),
            value,
        },
        (false, false) => AttrClass::Static { name, value },
    }
}
