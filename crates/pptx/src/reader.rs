//! PPTX deck reader.
//!
//! Summarizes an existing presentation: slide size, and for every slide in
//! presentation order its name, text, text colors, pictures and background.

use crate::xml::{attribute, local_name};
use quick_xml::events::Event;
use quick_xml::Reader;
use serde::Serialize;
use slidegen_core::{Error, Result};
use std::collections::HashMap;
use std::io::{Read, Seek};
use zip::ZipArchive;

/// Summary of a presentation package.
#[derive(Debug, Clone, Serialize)]
pub struct DeckSummary {
    /// Slide width in EMU.
    pub slide_width: u64,

    /// Slide height in EMU.
    pub slide_height: u64,

    /// Slides in presentation order.
    pub slides: Vec<SlideSummary>,
}

/// Summary of a single slide.
#[derive(Debug, Clone, Default, Serialize)]
pub struct SlideSummary {
    /// 1-based position in the deck.
    pub number: usize,

    /// Name stored on the slide (`p:cSld/@name`), if any.
    pub name: Option<String>,

    /// Text of each shape that carries any.
    pub texts: Vec<ShapeText>,

    /// Whether the slide contains a picture.
    pub has_picture: bool,

    /// Solid background color as RGB hex, if the slide overrides it.
    pub background: Option<String>,
}

/// Text of one shape with its formatting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ShapeText {
    /// Paragraphs joined with `\n`.
    pub text: String,

    /// First explicit run color as RGB hex.
    pub color: Option<String>,

    /// Whether any paragraph is center aligned.
    pub centered: bool,
}

/// Reader for PPTX (Office Open XML) packages.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeckReader;

impl DeckReader {
    /// Create a new deck reader.
    pub fn new() -> Self {
        Self
    }

    /// Read a PPTX package from a reader.
    pub fn read<R: Read + Seek>(&self, reader: R) -> Result<DeckSummary> {
        let mut archive = ZipArchive::new(reader)
            .map_err(|e| Error::Zip(format!("Failed to open ZIP: {}", e)))?;

        let presentation = self.read_file_from_archive(&mut archive, "ppt/presentation.xml")?;
        let (slide_width, slide_height, slide_rids) = parse_presentation(&presentation)?;

        let rels = self.read_file_from_archive(&mut archive, "ppt/_rels/presentation.xml.rels")?;
        let targets = parse_relationships(&rels)?;

        let mut slides = Vec::with_capacity(slide_rids.len());
        for (idx, rid) in slide_rids.iter().enumerate() {
            let target = targets.get(rid).ok_or_else(|| {
                Error::CorruptedFile(format!("Slide relationship '{}' has no target", rid))
            })?;
            let path = resolve_target(target);
            let content = self.read_file_from_archive(&mut archive, &path)?;
            let mut slide = parse_slide(&content)?;
            slide.number = idx + 1;
            slides.push(slide);
        }

        Ok(DeckSummary {
            slide_width,
            slide_height,
            slides,
        })
    }

    /// Read a file from the ZIP archive.
    fn read_file_from_archive<R: Read + Seek>(
        &self,
        archive: &mut ZipArchive<R>,
        path: &str,
    ) -> Result<String> {
        let mut file = archive
            .by_name(path)
            .map_err(|e| Error::CorruptedFile(format!("Part not found in package '{}': {}", path, e)))?;

        let mut content = String::new();
        file.read_to_string(&mut content)
            .map_err(|e| Error::Zip(format!("Failed to read '{}': {}", path, e)))?;

        Ok(content)
    }
}

/// Package path for a target relative to `ppt/`.
fn resolve_target(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{}", target),
    }
}

fn xml_error(part: &str, e: quick_xml::Error) -> Error {
    Error::Xml(format!("Error parsing {}: {}", part, e))
}

/// Slide size and the relationship ids of the slide list, in order.
fn parse_presentation(xml: &str) -> Result<(u64, u64, Vec<String>)> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut size: (u64, u64) = (0, 0);
    let mut rids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"sldSz" => {
                        let cx = attribute(e, b"cx").and_then(|v| v.parse().ok());
                        let cy = attribute(e, b"cy").and_then(|v| v.parse().ok());
                        size = (cx.unwrap_or(0), cy.unwrap_or(0));
                    }
                    b"sldId" => {
                        if let Some(rid) = attribute(e, b"r:id") {
                            rids.push(rid);
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error("presentation", e)),
            _ => {}
        }
    }

    Ok((size.0, size.1, rids))
}

/// Map of relationship id to target.
fn parse_relationships(xml: &str) -> Result<HashMap<String, String>> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut targets = HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if e.name().as_ref() == b"Relationship" =>
            {
                if let (Some(id), Some(target)) = (attribute(e, b"Id"), attribute(e, b"Target")) {
                    targets.insert(id, target);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error("relationships", e)),
            _ => {}
        }
    }

    Ok(targets)
}

/// Extract name, shape text, pictures and background from slide XML.
fn parse_slide(xml: &str) -> Result<SlideSummary> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);

    let mut slide = SlideSummary::default();
    let mut current_shape: Option<ShapeText> = None;
    let mut in_background = false;
    let mut in_run_props = false;
    let mut in_text = false;
    let mut paragraphs = 0usize;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"cSld" => slide.name = attribute(e, b"name"),
                    b"bg" => in_background = true,
                    b"pic" => slide.has_picture = true,
                    b"sp" => {
                        current_shape = Some(ShapeText::default());
                        paragraphs = 0;
                    }
                    b"p" => {
                        if let Some(ref mut shape) = current_shape {
                            if paragraphs > 0 {
                                shape.text.push('\n');
                            }
                            paragraphs += 1;
                        }
                    }
                    b"pPr" => mark_centered(e, current_shape.as_mut()),
                    b"rPr" => in_run_props = true,
                    b"t" => in_text = true,
                    _ => {}
                }
            }
            Ok(Event::Empty(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"pPr" => mark_centered(e, current_shape.as_mut()),
                    b"srgbClr" => {
                        let value = attribute(e, b"val");
                        if in_background {
                            if slide.background.is_none() {
                                slide.background = value;
                            }
                        } else if in_run_props {
                            if let Some(ref mut shape) = current_shape {
                                if shape.color.is_none() {
                                    shape.color = value;
                                }
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Text(ref e)) => {
                if in_text {
                    if let Some(ref mut shape) = current_shape {
                        let text = e.unescape().unwrap_or_default();
                        shape.text.push_str(&text);
                    }
                }
            }
            Ok(Event::End(ref e)) => {
                let name = e.name();
                match local_name(name.as_ref()) {
                    b"bg" => in_background = false,
                    b"rPr" => in_run_props = false,
                    b"t" => in_text = false,
                    b"sp" => {
                        if let Some(shape) = current_shape.take() {
                            if !shape.text.trim().is_empty() {
                                slide.texts.push(shape);
                            }
                        }
                    }
                    _ => {}
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error("slide", e)),
            _ => {}
        }
    }

    Ok(slide)
}

fn mark_centered(e: &quick_xml::events::BytesStart<'_>, shape: Option<&mut ShapeText>) {
    if let Some(shape) = shape {
        if attribute(e, b"algn").as_deref() == Some("ctr") {
            shape.centered = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("slides/slide1.xml"), "ppt/slides/slide1.xml");
        assert_eq!(resolve_target("/ppt/slides/slide2.xml"), "ppt/slides/slide2.xml");
    }

    #[test]
    fn test_parse_presentation_keeps_list_order() {
        let xml = r#"<p:presentation xmlns:p="p" xmlns:r="r">
            <p:sldIdLst><p:sldId id="257" r:id="rId9"/><p:sldId id="256" r:id="rId7"/></p:sldIdLst>
            <p:sldSz cx="12192000" cy="6858000"/>
        </p:presentation>"#;
        let (cx, cy, rids) = parse_presentation(xml).unwrap();
        assert_eq!((cx, cy), (12_192_000, 6_858_000));
        assert_eq!(rids, vec!["rId9", "rId7"]);
    }

    #[test]
    fn test_parse_slide_text_and_color() {
        let xml = r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld name="Slide 2"><p:spTree>
            <p:sp><p:txBody><a:p><a:pPr algn="ctr"/><a:r><a:rPr sz="4800"><a:solidFill><a:srgbClr val="FFFFFF"/></a:solidFill></a:rPr><a:t>Hello &amp; welcome</a:t></a:r></a:p></p:txBody></p:sp>
        </p:spTree></p:cSld></p:sld>"#;
        let slide = parse_slide(xml).unwrap();
        assert_eq!(slide.name.as_deref(), Some("Slide 2"));
        assert_eq!(
            slide.texts,
            vec![ShapeText {
                text: "Hello & welcome".to_string(),
                color: Some("FFFFFF".to_string()),
                centered: true,
            }]
        );
        assert!(!slide.has_picture);
        assert_eq!(slide.background, None);
    }

    #[test]
    fn test_parse_slide_background() {
        let xml = r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:bg><p:bgPr><a:solidFill><a:srgbClr val="000000"/></a:solidFill></p:bgPr></p:bg><p:spTree/></p:cSld></p:sld>"#;
        let slide = parse_slide(xml).unwrap();
        assert_eq!(slide.background.as_deref(), Some("000000"));
        assert!(slide.texts.is_empty());
    }

    #[test]
    fn test_multi_paragraph_shape() {
        let xml = r#"<p:sld xmlns:p="p" xmlns:a="a"><p:cSld><p:spTree><p:sp><p:txBody>
            <a:p><a:r><a:t>one</a:t></a:r></a:p><a:p><a:r><a:t>two</a:t></a:r></a:p>
        </p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#;
        let slide = parse_slide(xml).unwrap();
        assert_eq!(slide.texts[0].text, "one\ntwo");
        assert!(!slide.texts[0].centered);
    }
}
