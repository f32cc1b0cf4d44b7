use std::path::Path;

use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::{DocumentError, Result};
use crate::node::{parse_int, Attributes, Node, HEAD_TAG};

/// A parsed LMMP song, read-only once loaded
#[derive(Debug, Clone, PartialEq)]
pub struct SongDocument {
    root: Node,
    bpm: Option<i64>,
}

/// An element whose end tag has not been seen yet
struct OpenElement {
    tag: String,
    attributes: Attributes,
    children: Vec<Node>,
}

impl SongDocument {
    pub fn from_file(path: &Path) -> Result<Self> {
        let xml = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&xml)
    }

    /// Parse a whole document. Every attribute the importer needs is read
    /// and checked here, so a document that loads can be walked without
    /// further failures.
    pub fn parse(xml: &str) -> Result<Self> {
        let mut reader = Reader::from_str(xml);
        reader.config_mut().trim_text(true);

        let mut stack: Vec<OpenElement> = Vec::new();
        let mut root: Option<Node> = None;

        loop {
            let event = match reader.read_event() {
                Ok(event) => event,
                Err(e) => {
                    return Err(DocumentError::xml(
                        e.to_string(),
                        reader.buffer_position() as u64,
                    ))
                }
            };
            let position = reader.buffer_position() as u64;

            match event {
                Event::Start(ref e) => {
                    let (tag, attributes) = read_start(e, position)?;
                    stack.push(OpenElement {
                        tag,
                        attributes,
                        children: Vec::new(),
                    });
                }
                Event::Empty(ref e) => {
                    let (tag, attributes) = read_start(e, position)?;
                    let node = Node::from_element(tag, attributes, Vec::new())?;
                    attach(&mut stack, &mut root, node, position)?;
                }
                Event::End(_) => {
                    let open = stack
                        .pop()
                        .ok_or_else(|| DocumentError::xml("unexpected end tag", position))?;
                    let node = Node::from_element(open.tag, open.attributes, open.children)?;
                    attach(&mut stack, &mut root, node, position)?;
                }
                Event::Eof => break,
                // Declarations, comments, text and CDATA carry nothing we use
                _ => {}
            }
        }

        if let Some(open) = stack.last() {
            return Err(DocumentError::xml(
                format!("unclosed element <{}>", open.tag),
                reader.buffer_position() as u64,
            ));
        }

        let root = root.ok_or(DocumentError::Empty)?;
        let bpm = read_bpm(&root)?;
        log::debug!(
            "Loaded <{}> with {} top-level element(s), bpm {:?}",
            root.tag(),
            root.children().len(),
            bpm
        );

        Ok(SongDocument { root, bpm })
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Tempo from the last `<head>` under the root that carries a `bpm` attribute
    pub fn bpm(&self) -> Option<i64> {
        self.bpm
    }
}

fn read_start(e: &BytesStart<'_>, position: u64) -> Result<(String, Attributes)> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).into_owned();
    let mut attributes = Attributes::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|err| DocumentError::xml(err.to_string(), position))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|err| DocumentError::xml(err.to_string(), position))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok((tag, attributes))
}

fn attach(
    stack: &mut [OpenElement],
    root: &mut Option<Node>,
    node: Node,
    position: u64,
) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(DocumentError::xml("multiple root elements", position));
    }
    *root = Some(node);
    Ok(())
}

fn read_bpm(root: &Node) -> Result<Option<i64>> {
    let mut bpm = None;
    for head in root.children().iter().filter(|n| n.tag() == HEAD_TAG) {
        if let Some(value) = head.attribute("bpm") {
            bpm = Some(parse_int(HEAD_TAG, "bpm", value)?);
        }
    }
    Ok(bpm)
}
