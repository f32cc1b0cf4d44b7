use crate::error::{DocumentError, Result};

pub const PATTERN_TAG: &str = "pattern";
pub const NOTE_TAG: &str = "note";
pub const HEAD_TAG: &str = "head";

/// Attributes of an element, in document order
pub type Attributes = Vec<(String, String)>;

/// A node of the parsed song tree
#[derive(Debug, Clone, PartialEq)]
pub enum Node {
    Pattern(Pattern),
    Note(Note),
    /// Any other element (`song`, `head`, `track`, ...)
    Element {
        tag: String,
        attributes: Attributes,
        children: Vec<Node>,
    },
}

impl Node {
    pub fn tag(&self) -> &str {
        match self {
            Node::Pattern(_) => PATTERN_TAG,
            Node::Note(_) => NOTE_TAG,
            Node::Element { tag, .. } => tag,
        }
    }

    pub fn children(&self) -> &[Node] {
        match self {
            Node::Pattern(pattern) => &pattern.children,
            Node::Note(_) => &[],
            Node::Element { children, .. } => children,
        }
    }

    /// Look up an attribute of a generic element
    pub fn attribute(&self, name: &str) -> Option<&str> {
        match self {
            Node::Element { attributes, .. } => find_attribute(attributes, name),
            _ => None,
        }
    }

    pub fn as_pattern(&self) -> Option<&Pattern> {
        match self {
            Node::Pattern(pattern) => Some(pattern),
            _ => None,
        }
    }

    pub fn as_note(&self) -> Option<&Note> {
        match self {
            Node::Note(note) => Some(note),
            _ => None,
        }
    }

    /// Build a node from a closed element, reading the attributes its tag requires
    pub(crate) fn from_element(
        tag: String,
        attributes: Attributes,
        children: Vec<Node>,
    ) -> Result<Self> {
        match tag.as_str() {
            PATTERN_TAG => Ok(Node::Pattern(Pattern {
                name: required(&tag, &attributes, "name")?.to_string(),
                pos: required_int(&tag, &attributes, "pos")?,
                len: required_int(&tag, &attributes, "len")?,
                children,
            })),
            NOTE_TAG => {
                if !children.is_empty() {
                    log::debug!("Ignoring {} child element(s) of <note>", children.len());
                }
                Ok(Node::Note(Note {
                    key: required(&tag, &attributes, "key")?.to_string(),
                    pos: required_int(&tag, &attributes, "pos")?,
                    len: required_int(&tag, &attributes, "len")?,
                    vol: required_int(&tag, &attributes, "vol")?,
                }))
            }
            _ => Ok(Node::Element {
                tag,
                attributes,
                children,
            }),
        }
    }
}

/// A `<pattern>` element
#[derive(Debug, Clone, PartialEq)]
pub struct Pattern {
    pub name: String,
    /// Start position in ticks
    pub pos: i64,
    /// Length in ticks
    pub len: i64,
    pub children: Vec<Node>,
}

impl Pattern {
    /// Note children in document order
    pub fn notes(&self) -> impl Iterator<Item = &Note> {
        self.children.iter().filter_map(Node::as_note)
    }

    /// A pattern holding at least one note is expanded directly and never
    /// descended into, even when it also nests other patterns.
    pub fn is_leaf(&self) -> bool {
        self.notes().next().is_some()
    }
}

/// A `<note>` element. `pos` is relative to the enclosing pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    pub key: String,
    pub pos: i64,
    pub len: i64,
    pub vol: i64,
}

pub(crate) fn find_attribute<'a>(attributes: &'a Attributes, name: &str) -> Option<&'a str> {
    attributes
        .iter()
        .find(|(key, _)| key == name)
        .map(|(_, value)| value.as_str())
}

fn required<'a>(tag: &str, attributes: &'a Attributes, name: &str) -> Result<&'a str> {
    find_attribute(attributes, name).ok_or_else(|| DocumentError::missing_attribute(tag, name))
}

fn required_int(tag: &str, attributes: &Attributes, name: &str) -> Result<i64> {
    parse_int(tag, name, required(tag, attributes, name)?)
}

pub(crate) fn parse_int(tag: &str, attribute: &str, value: &str) -> Result<i64> {
    value
        .trim()
        .parse()
        .map_err(|_| DocumentError::invalid_number(tag, attribute, value))
}
