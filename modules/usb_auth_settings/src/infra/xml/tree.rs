//! Owned element tree built from quick-xml events

use crate::contract::DocumentError;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

/// An element with its attributes, direct text and child elements
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Element {
    pub name: String,
    pub attributes: Vec<(String, String)>,
    /// Concatenated text and CDATA of the direct children, unescaped
    pub text: String,
    pub children: Vec<Element>,
}

impl Element {
    /// Value of attribute `name`
    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

fn syntax(message: impl Into<String>) -> DocumentError {
    DocumentError::Syntax(message.into())
}

fn open(start: &BytesStart<'_>) -> Result<Element, DocumentError> {
    let name = std::str::from_utf8(start.name().as_ref())
        .map_err(|e| syntax(format!("element name is not UTF-8: {e}")))?
        .to_owned();

    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr = attr.map_err(|e| syntax(format!("bad attribute in <{name}>: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| syntax(format!("attribute name is not UTF-8: {e}")))?
            .to_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| syntax(format!("bad value for attribute {key:?} in <{name}>: {e}")))?
            .into_owned();
        attributes.push((key, value));
    }

    Ok(Element {
        name,
        attributes,
        ..Element::default()
    })
}

fn close(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), DocumentError> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(syntax(format!(
            "extra content at the end of the document: <{}>",
            element.name
        )));
    }
    *root = Some(element);
    Ok(())
}

fn append_text(stack: &mut [Element], text: &str) -> Result<(), DocumentError> {
    match stack.last_mut() {
        Some(current) => {
            current.text.push_str(text);
            Ok(())
        }
        None if text.trim().is_empty() => Ok(()),
        None => Err(syntax("text outside of the root element")),
    }
}

/// Parse `content` into its root element
pub fn parse(content: &str) -> Result<Element, DocumentError> {
    let mut reader = Reader::from_str(content);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let event = reader
            .read_event()
            .map_err(|e| syntax(format!("{e} (at byte {})", reader.buffer_position())))?;
        match event {
            Event::Start(start) => stack.push(open(&start)?),
            Event::Empty(start) => {
                let element = open(&start)?;
                close(element, &mut stack, &mut root)?;
            }
            Event::End(end) => {
                let element = stack.pop().ok_or_else(|| {
                    syntax(format!(
                        "unexpected closing tag </{}>",
                        String::from_utf8_lossy(end.name().as_ref())
                    ))
                })?;
                close(element, &mut stack, &mut root)?;
            }
            Event::Text(text) => {
                let text = text
                    .unescape()
                    .map_err(|e| syntax(format!("bad text content: {e}")))?;
                append_text(&mut stack, &text)?;
            }
            Event::CData(data) => {
                let raw = data.into_inner();
                let text = std::str::from_utf8(&raw)
                    .map_err(|e| syntax(format!("CDATA is not UTF-8: {e}")))?;
                append_text(&mut stack, text)?;
            }
            Event::Eof => break,
            // declarations, comments, processing instructions, doctype
            _ => {}
        }
    }

    if let Some(unclosed) = stack.last() {
        return Err(syntax(format!(
            "premature end of document, <{}> is not closed",
            unclosed.name
        )));
    }
    root.ok_or_else(|| syntax("document is empty"))
}
