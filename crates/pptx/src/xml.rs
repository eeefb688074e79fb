//! Small helpers over quick-xml shared by the writer and the reader.

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use slidegen_core::{Error, Result};
use std::borrow::Cow;

pub const NS_DRAWINGML: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub const NS_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub const NS_PRESENTATIONML: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";
pub const NS_PACKAGE_RELATIONSHIPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";

/// The `xmlns` attributes carried by every PresentationML root element.
pub const PML_NAMESPACES: [(&str, &str); 3] = [
    ("xmlns:a", NS_DRAWINGML),
    ("xmlns:r", NS_RELATIONSHIPS),
    ("xmlns:p", NS_PRESENTATIONML),
];

/// Buffered XML part writer. Text content is escaped on write.
pub struct XmlWriter {
    inner: Writer<Vec<u8>>,
}

impl XmlWriter {
    /// Start a standalone UTF-8 document.
    pub fn new() -> Result<Self> {
        let mut writer = Self {
            inner: Writer::new(Vec::new()),
        };
        writer.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(writer)
    }

    pub fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.write(Event::Start(elem))
    }

    pub fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.write(Event::Empty(elem))
    }

    pub fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    /// Write escaped text. Characters XML 1.0 forbids are spelled `_xHHHH_`.
    pub fn text(&mut self, text: &str) -> Result<()> {
        let text = xml_safe(text);
        self.write(Event::Text(BytesText::new(&text)))
    }

    /// `<name attrs>text</name>`
    pub fn text_element(&mut self, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
        self.start(name, attrs)?;
        self.text(text)?;
        self.end(name)
    }

    pub fn finish(self) -> Vec<u8> {
        self.inner.into_inner()
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.inner
            .write_event(event)
            .map_err(|e| Error::Xml(format!("Failed to write XML: {}", e)))
    }
}

fn is_xml_char(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n' | '\r' | '\u{20}'..='\u{D7FF}' | '\u{E000}'..='\u{FFFD}' | '\u{10000}'..='\u{10FFFF}'
    )
}

/// Replace characters that cannot appear in an XML 1.0 document with the
/// OOXML `_xHHHH_` escape.
pub fn xml_safe(text: &str) -> Cow<'_, str> {
    if text.chars().all(is_xml_char) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    for c in text.chars() {
        if is_xml_char(c) {
            out.push(c);
        } else {
            out.push_str(&format!("_x{:04X}_", c as u32));
        }
    }
    Cow::Owned(out)
}

/// Extract the local name from a potentially namespaced XML element name.
pub fn local_name(name: &[u8]) -> &[u8] {
    if let Some(pos) = name.iter().position(|&b| b == b':') {
        &name[pos + 1..]
    } else {
        name
    }
}

/// Value of the attribute with the given qualified name, if present.
pub fn attribute(elem: &BytesStart<'_>, key: &[u8]) -> Option<String> {
    elem.attributes()
        .flatten()
        .find(|attr| attr.key.as_ref() == key)
        .map(|attr| match attr.unescape_value() {
            Ok(value) => value.into_owned(),
            Err(_) => String::from_utf8_lossy(&attr.value).into_owned(),
        })
}
