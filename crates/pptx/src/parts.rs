//! OOXML parts of a generated presentation.
//!
//! Master, layouts and theme are fixed and shipped as templates. Everything
//! that depends on the deck (slide list, slides, relationships, content
//! types, document properties) is written here.

use crate::background::BackgroundImage;
use crate::deck::Slide;
use crate::layout::{Rect, CAPTION_FONT_SIZE, NOTES_HEIGHT, NOTES_WIDTH, SLIDE_HEIGHT, SLIDE_WIDTH};
use crate::xml::{XmlWriter, NS_PACKAGE_RELATIONSHIPS, PML_NAMESPACES};
use slidegen_core::{Result, TextColor};

/// Template parts copied into every package unchanged, as (path, content).
pub const STATIC_PARTS: &[(&str, &str)] = &[
    ("ppt/theme/theme1.xml", include_str!("../templates/theme1.xml")),
    (
        "ppt/slideMasters/slideMaster1.xml",
        include_str!("../templates/slideMaster1.xml"),
    ),
    (
        "ppt/slideMasters/_rels/slideMaster1.xml.rels",
        include_str!("../templates/slideMaster1.xml.rels"),
    ),
    (
        "ppt/slideLayouts/slideLayout1.xml",
        include_str!("../templates/slideLayout1.xml"),
    ),
    (
        "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
        include_str!("../templates/slideLayout.xml.rels"),
    ),
    (
        "ppt/slideLayouts/slideLayout2.xml",
        include_str!("../templates/slideLayout2.xml"),
    ),
    (
        "ppt/slideLayouts/_rels/slideLayout2.xml.rels",
        include_str!("../templates/slideLayout.xml.rels"),
    ),
    ("ppt/presProps.xml", include_str!("../templates/presProps.xml")),
    ("ppt/viewProps.xml", include_str!("../templates/viewProps.xml")),
    ("ppt/tableStyles.xml", include_str!("../templates/tableStyles.xml")),
];

const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
const CT_PML: &str = "application/vnd.openxmlformats-officedocument.presentationml";

/// Layout targets, relative to a slide part.
const TITLE_ONLY_LAYOUT: &str = "../slideLayouts/slideLayout1.xml";
const BLANK_LAYOUT: &str = "../slideLayouts/slideLayout2.xml";

/// Relationship ids in `presentation.xml.rels` before the first slide.
const FIXED_PRESENTATION_RELS: usize = 5;

/// First slide id PowerPoint accepts.
const FIRST_SLIDE_ID: usize = 256;

fn rel_type(kind: &str) -> String {
    format!("{}/{}", REL_BASE, kind)
}

/// Package path of the slide at a 1-based position.
pub fn slide_part_name(number: usize) -> String {
    format!("ppt/slides/slide{}.xml", number)
}

/// Package path of the relationships of the slide at a 1-based position.
pub fn slide_rels_part_name(number: usize) -> String {
    format!("ppt/slides/_rels/slide{}.xml.rels", number)
}

pub fn content_types(slide_count: usize, image: Option<&BackgroundImage>) -> Result<Vec<u8>> {
    let mut w = XmlWriter::new()?;
    w.start(
        "Types",
        &[(
            "xmlns",
            "http://schemas.openxmlformats.org/package/2006/content-types",
        )],
    )?;
    w.empty(
        "Default",
        &[
            ("Extension", "rels"),
            (
                "ContentType",
                "application/vnd.openxmlformats-package.relationships+xml",
            ),
        ],
    )?;
    w.empty(
        "Default",
        &[("Extension", "xml"), ("ContentType", "application/xml")],
    )?;
    if let Some(image) = image {
        w.empty(
            "Default",
            &[
                ("Extension", image.extension()),
                ("ContentType", image.content_type()),
            ],
        )?;
    }

    let overrides = [
        ("/ppt/presentation.xml", format!("{}.presentation.main+xml", CT_PML)),
        ("/ppt/slideMasters/slideMaster1.xml", format!("{}.slideMaster+xml", CT_PML)),
        ("/ppt/slideLayouts/slideLayout1.xml", format!("{}.slideLayout+xml", CT_PML)),
        ("/ppt/slideLayouts/slideLayout2.xml", format!("{}.slideLayout+xml", CT_PML)),
        (
            "/ppt/theme/theme1.xml",
            "application/vnd.openxmlformats-officedocument.theme+xml".to_string(),
        ),
        ("/ppt/presProps.xml", format!("{}.presProps+xml", CT_PML)),
        ("/ppt/viewProps.xml", format!("{}.viewProps+xml", CT_PML)),
        ("/ppt/tableStyles.xml", format!("{}.tableStyles+xml", CT_PML)),
        (
            "/docProps/core.xml",
            "application/vnd.openxmlformats-package.core-properties+xml".to_string(),
        ),
        (
            "/docProps/app.xml",
            "application/vnd.openxmlformats-officedocument.extended-properties+xml".to_string(),
        ),
    ];
    for (part, content_type) in &overrides {
        w.empty(
            "Override",
            &[("PartName", *part), ("ContentType", content_type.as_str())],
        )?;
    }

    let slide_type = format!("{}.slide+xml", CT_PML);
    for number in 1..=slide_count {
        let part = format!("/{}", slide_part_name(number));
        w.empty(
            "Override",
            &[("PartName", part.as_str()), ("ContentType", slide_type.as_str())],
        )?;
    }

    w.end("Types")?;
    Ok(w.finish())
}

/// Write a relationships part from (id, type, target) triples.
fn relationships(rels: &[(String, String, String)]) -> Result<Vec<u8>> {
    let mut w = XmlWriter::new()?;
    w.start("Relationships", &[("xmlns", NS_PACKAGE_RELATIONSHIPS)])?;
    for (id, kind, target) in rels {
        w.empty(
            "Relationship",
            &[
                ("Id", id.as_str()),
                ("Type", kind.as_str()),
                ("Target", target.as_str()),
            ],
        )?;
    }
    w.end("Relationships")?;
    Ok(w.finish())
}

pub fn root_rels() -> Result<Vec<u8>> {
    relationships(&[
        (
            "rId1".to_string(),
            rel_type("officeDocument"),
            "ppt/presentation.xml".to_string(),
        ),
        (
            "rId2".to_string(),
            "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties"
                .to_string(),
            "docProps/core.xml".to_string(),
        ),
        (
            "rId3".to_string(),
            rel_type("extended-properties"),
            "docProps/app.xml".to_string(),
        ),
    ])
}

pub fn presentation(slide_count: usize) -> Result<Vec<u8>> {
    let mut w = XmlWriter::new()?;
    let mut root = PML_NAMESPACES.to_vec();
    root.push(("saveSubsetFonts", "1"));
    w.start("p:presentation", &root)?;

    w.start("p:sldMasterIdLst", &[])?;
    w.empty("p:sldMasterId", &[("id", "2147483648"), ("r:id", "rId1")])?;
    w.end("p:sldMasterIdLst")?;

    w.start("p:sldIdLst", &[])?;
    for idx in 0..slide_count {
        let id = (FIRST_SLIDE_ID + idx).to_string();
        let rid = format!("rId{}", FIXED_PRESENTATION_RELS + 1 + idx);
        w.empty("p:sldId", &[("id", id.as_str()), ("r:id", rid.as_str())])?;
    }
    w.end("p:sldIdLst")?;

    w.empty(
        "p:sldSz",
        &[
            ("cx", SLIDE_WIDTH.to_string().as_str()),
            ("cy", SLIDE_HEIGHT.to_string().as_str()),
        ],
    )?;
    w.empty(
        "p:notesSz",
        &[
            ("cx", NOTES_WIDTH.to_string().as_str()),
            ("cy", NOTES_HEIGHT.to_string().as_str()),
        ],
    )?;

    w.end("p:presentation")?;
    Ok(w.finish())
}

pub fn presentation_rels(slide_count: usize) -> Result<Vec<u8>> {
    let mut rels = vec![
        (
            "rId1".to_string(),
            rel_type("slideMaster"),
            "slideMasters/slideMaster1.xml".to_string(),
        ),
        ("rId2".to_string(), rel_type("theme"), "theme/theme1.xml".to_string()),
        ("rId3".to_string(), rel_type("presProps"), "presProps.xml".to_string()),
        ("rId4".to_string(), rel_type("viewProps"), "viewProps.xml".to_string()),
        ("rId5".to_string(), rel_type("tableStyles"), "tableStyles.xml".to_string()),
    ];
    debug_assert_eq!(rels.len(), FIXED_PRESENTATION_RELS);

    for number in 1..=slide_count {
        rels.push((
            format!("rId{}", FIXED_PRESENTATION_RELS + number),
            rel_type("slide"),
            format!("slides/slide{}.xml", number),
        ));
    }
    relationships(&rels)
}

pub fn slide_rels(slide: &Slide, image: Option<&BackgroundImage>) -> Result<Vec<u8>> {
    let layout = match slide {
        Slide::Caption { .. } => BLANK_LAYOUT,
        Slide::Title { .. } | Slide::Closing => TITLE_ONLY_LAYOUT,
    };
    let mut rels = vec![("rId1".to_string(), rel_type("slideLayout"), layout.to_string())];

    if slide.uses_background_image() {
        if let Some(image) = image {
            rels.push((
                "rId2".to_string(),
                rel_type("image"),
                format!("../media/image1.{}", image.extension()),
            ));
        }
    }
    relationships(&rels)
}

pub fn slide(slide: &Slide, color: TextColor) -> Result<Vec<u8>> {
    let mut w = XmlWriter::new()?;
    w.start("p:sld", &PML_NAMESPACES)?;

    match slide {
        Slide::Title { text } => {
            w.start("p:cSld", &[])?;
            w.start("p:spTree", &[])?;
            group_properties(&mut w)?;
            title_placeholder(&mut w, text)?;
        }
        Slide::Caption { name, text } => {
            w.start("p:cSld", &[("name", name.as_str())])?;
            w.start("p:spTree", &[])?;
            group_properties(&mut w)?;
            background_picture(&mut w)?;
            caption_box(&mut w, text, color)?;
        }
        Slide::Closing => {
            w.start("p:cSld", &[])?;
            w.start("p:bg", &[])?;
            w.start("p:bgPr", &[])?;
            solid_fill(&mut w, TextColor::Black.rgb_hex())?;
            w.empty("a:effectLst", &[])?;
            w.end("p:bgPr")?;
            w.end("p:bg")?;
            w.start("p:spTree", &[])?;
            group_properties(&mut w)?;
        }
    }

    w.end("p:spTree")?;
    w.end("p:cSld")?;
    w.start("p:clrMapOvr", &[])?;
    w.empty("a:masterClrMapping", &[])?;
    w.end("p:clrMapOvr")?;
    w.end("p:sld")?;
    Ok(w.finish())
}

fn group_properties(w: &mut XmlWriter) -> Result<()> {
    w.start("p:nvGrpSpPr", &[])?;
    w.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    w.empty("p:cNvGrpSpPr", &[])?;
    w.empty("p:nvPr", &[])?;
    w.end("p:nvGrpSpPr")?;

    w.start("p:grpSpPr", &[])?;
    w.start("a:xfrm", &[])?;
    w.empty("a:off", &[("x", "0"), ("y", "0")])?;
    w.empty("a:ext", &[("cx", "0"), ("cy", "0")])?;
    w.empty("a:chOff", &[("x", "0"), ("y", "0")])?;
    w.empty("a:chExt", &[("cx", "0"), ("cy", "0")])?;
    w.end("a:xfrm")?;
    w.end("p:grpSpPr")
}

fn transform(w: &mut XmlWriter, rect: Rect) -> Result<()> {
    w.start("a:xfrm", &[])?;
    w.empty(
        "a:off",
        &[
            ("x", rect.x.to_string().as_str()),
            ("y", rect.y.to_string().as_str()),
        ],
    )?;
    w.empty(
        "a:ext",
        &[
            ("cx", rect.cx.to_string().as_str()),
            ("cy", rect.cy.to_string().as_str()),
        ],
    )?;
    w.end("a:xfrm")?;
    w.start("a:prstGeom", &[("prst", "rect")])?;
    w.empty("a:avLst", &[])?;
    w.end("a:prstGeom")
}

fn solid_fill(w: &mut XmlWriter, rgb: &str) -> Result<()> {
    w.start("a:solidFill", &[])?;
    w.empty("a:srgbClr", &[("val", rgb)])?;
    w.end("a:solidFill")
}

fn title_placeholder(w: &mut XmlWriter, text: &str) -> Result<()> {
    w.start("p:sp", &[])?;
    w.start("p:nvSpPr", &[])?;
    w.empty("p:cNvPr", &[("id", "2"), ("name", "Title 1")])?;
    w.start("p:cNvSpPr", &[])?;
    w.empty("a:spLocks", &[("noGrp", "1")])?;
    w.end("p:cNvSpPr")?;
    w.start("p:nvPr", &[])?;
    w.empty("p:ph", &[("type", "title")])?;
    w.end("p:nvPr")?;
    w.end("p:nvSpPr")?;
    w.empty("p:spPr", &[])?;

    w.start("p:txBody", &[])?;
    w.empty("a:bodyPr", &[])?;
    w.empty("a:lstStyle", &[])?;
    w.start("a:p", &[])?;
    w.start("a:r", &[])?;
    w.empty("a:rPr", &[("lang", "en-US"), ("dirty", "0")])?;
    w.text_element("a:t", &[], text)?;
    w.end("a:r")?;
    w.end("a:p")?;
    w.end("p:txBody")?;
    w.end("p:sp")
}

/// Full-bleed picture referencing the shared media part (`rId2`).
fn background_picture(w: &mut XmlWriter) -> Result<()> {
    w.start("p:pic", &[])?;
    w.start("p:nvPicPr", &[])?;
    w.empty("p:cNvPr", &[("id", "2"), ("name", "Background")])?;
    w.empty("p:cNvPicPr", &[])?;
    w.empty("p:nvPr", &[])?;
    w.end("p:nvPicPr")?;

    w.start("p:blipFill", &[])?;
    w.empty("a:blip", &[("r:embed", "rId2")])?;
    w.start("a:stretch", &[])?;
    w.empty("a:fillRect", &[])?;
    w.end("a:stretch")?;
    w.end("p:blipFill")?;

    w.start("p:spPr", &[])?;
    transform(w, Rect::full_slide())?;
    w.end("p:spPr")?;
    w.end("p:pic")
}

fn caption_box(w: &mut XmlWriter, text: &str, color: TextColor) -> Result<()> {
    w.start("p:sp", &[])?;
    w.start("p:nvSpPr", &[])?;
    w.empty("p:cNvPr", &[("id", "3"), ("name", "Caption")])?;
    w.empty("p:cNvSpPr", &[("txBox", "1")])?;
    w.empty("p:nvPr", &[])?;
    w.end("p:nvSpPr")?;

    w.start("p:spPr", &[])?;
    transform(w, Rect::caption_box())?;
    w.empty("a:noFill", &[])?;
    w.end("p:spPr")?;

    w.start("p:txBody", &[])?;
    w.start(
        "a:bodyPr",
        &[("wrap", "square"), ("rtlCol", "0"), ("anchor", "ctr")],
    )?;
    w.empty("a:noAutofit", &[])?;
    w.end("a:bodyPr")?;
    w.empty("a:lstStyle", &[])?;
    w.start("a:p", &[])?;
    w.empty("a:pPr", &[("algn", "ctr")])?;
    // A vertical tab is a soft line break within the paragraph.
    for (idx, segment) in text.split('\u{b}').enumerate() {
        if idx > 0 {
            w.empty("a:br", &[])?;
        }
        w.start("a:r", &[])?;
        caption_run_properties(w, color)?;
        w.text_element("a:t", &[], segment)?;
        w.end("a:r")?;
    }
    w.end("a:p")?;
    w.end("p:txBody")?;
    w.end("p:sp")
}

fn caption_run_properties(w: &mut XmlWriter, color: TextColor) -> Result<()> {
    let size = CAPTION_FONT_SIZE.to_string();
    w.start(
        "a:rPr",
        &[("lang", "en-US"), ("sz", size.as_str()), ("dirty", "0")],
    )?;
    solid_fill(w, color.rgb_hex())?;
    w.end("a:rPr")
}

pub fn core_properties(title: &str) -> Result<Vec<u8>> {
    let mut w = XmlWriter::new()?;
    w.start(
        "cp:coreProperties",
        &[
            (
                "xmlns:cp",
                "http://schemas.openxmlformats.org/package/2006/metadata/core-properties",
            ),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:dcmitype", "http://purl.org/dc/dcmitype/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    w.text_element("dc:title", &[], title)?;
    w.text_element("dc:creator", &[], "slidegen")?;
    w.end("cp:coreProperties")?;
    Ok(w.finish())
}

pub fn app_properties(slide_count: usize) -> Result<Vec<u8>> {
    let mut w = XmlWriter::new()?;
    w.start(
        "Properties",
        &[
            (
                "xmlns",
                "http://schemas.openxmlformats.org/officeDocument/2006/extended-properties",
            ),
            (
                "xmlns:vt",
                "http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes",
            ),
        ],
    )?;
    w.text_element("Application", &[], "slidegen")?;
    w.text_element("PresentationFormat", &[], "Custom")?;
    w.text_element("Slides", &[], &slide_count.to_string())?;
    w.end("Properties")?;
    Ok(w.finish())
}
