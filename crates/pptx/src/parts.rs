//! Fixed package parts and the generated relationship/index parts.

use crate::xml::XmlOut;
use lesson_core::Result;

pub(crate) const NS_A: &str = "http://schemas.openxmlformats.org/drawingml/2006/main";
pub(crate) const NS_R: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships";
pub(crate) const NS_P: &str = "http://schemas.openxmlformats.org/presentationml/2006/main";

const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_RELATIONSHIPS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_SLIDE_MASTER: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
const REL_SLIDE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
const REL_THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
const REL_IMAGE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";

const CT_PRESENTATION: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
const CT_SLIDE_MASTER: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
const CT_SLIDE_LAYOUT: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
const CT_THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
const CT_SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";

/// Slide size in EMU (16:9, 13.333 x 7.5 inches).
pub(crate) const SLIDE_CX: i64 = 12_192_000;
pub(crate) const SLIDE_CY: i64 = 6_858_000;

/// An image file embedded in the package.
#[derive(Debug, Clone)]
pub(crate) struct MediaPart {
    /// File name under `ppt/media/`.
    pub name: String,
    pub bytes: Vec<u8>,
}

pub(crate) fn content_types(slide_count: usize) -> Result<Vec<u8>> {
    let mut xml = XmlOut::part()?;
    xml.start("Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    for (extension, content_type) in [
        ("rels", "application/vnd.openxmlformats-package.relationships+xml"),
        ("xml", "application/xml"),
        ("png", "image/png"),
        ("jpeg", "image/jpeg"),
    ] {
        xml.empty(
            "Default",
            &[("Extension", extension), ("ContentType", content_type)],
        )?;
    }

    let mut overrides = vec![
        ("/ppt/presentation.xml".to_string(), CT_PRESENTATION),
        ("/ppt/slideMasters/slideMaster1.xml".to_string(), CT_SLIDE_MASTER),
        ("/ppt/slideLayouts/slideLayout1.xml".to_string(), CT_SLIDE_LAYOUT),
        ("/ppt/theme/theme1.xml".to_string(), CT_THEME),
    ];
    for n in 1..=slide_count {
        overrides.push((format!("/ppt/slides/slide{}.xml", n), CT_SLIDE));
    }
    for (part_name, content_type) in &overrides {
        xml.empty(
            "Override",
            &[("PartName", part_name.as_str()), ("ContentType", *content_type)],
        )?;
    }
    xml.end("Types")?;
    Ok(xml.into_inner())
}

/// Relationship list; each entry is `(id, type, target)`.
fn relationships(rels: &[(String, &str, String)]) -> Result<Vec<u8>> {
    let mut xml = XmlOut::part()?;
    xml.start("Relationships", &[("xmlns", NS_RELATIONSHIPS)])?;
    for (id, rel_type, target) in rels {
        xml.empty(
            "Relationship",
            &[("Id", id.as_str()), ("Type", *rel_type), ("Target", target.as_str())],
        )?;
    }
    xml.end("Relationships")?;
    Ok(xml.into_inner())
}

fn rel(id: usize, rel_type: &str, target: impl Into<String>) -> (String, &str, String) {
    (format!("rId{}", id), rel_type, target.into())
}

pub(crate) fn package_rels() -> Result<Vec<u8>> {
    relationships(&[rel(1, REL_OFFICE_DOCUMENT, "ppt/presentation.xml")])
}

/// Master is rId1, theme rId2, slides from rId3 on.
pub(crate) fn presentation_rels(slide_count: usize) -> Result<Vec<u8>> {
    let mut rels = vec![
        rel(1, REL_SLIDE_MASTER, "slideMasters/slideMaster1.xml"),
        rel(2, REL_THEME, "theme/theme1.xml"),
    ];
    for n in 1..=slide_count {
        rels.push(rel(n + 2, REL_SLIDE, format!("slides/slide{}.xml", n)));
    }
    relationships(&rels)
}

pub(crate) fn presentation(slide_count: usize) -> Result<Vec<u8>> {
    let mut xml = XmlOut::part()?;
    xml.start(
        "p:presentation",
        &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)],
    )?;
    xml.wrap_empty(
        "p:sldMasterIdLst",
        &[],
        "p:sldMasterId",
        &[("id", "2147483648"), ("r:id", "rId1")],
    )?;

    xml.start("p:sldIdLst", &[])?;
    for n in 1..=slide_count {
        let id = (255 + n).to_string();
        let rel_id = format!("rId{}", n + 2);
        xml.empty("p:sldId", &[("id", id.as_str()), ("r:id", rel_id.as_str())])?;
    }
    xml.end("p:sldIdLst")?;

    let (cx, cy) = (SLIDE_CX.to_string(), SLIDE_CY.to_string());
    xml.empty("p:sldSz", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
    xml.empty("p:notesSz", &[("cx", cy.as_str()), ("cy", cx.as_str())])?;
    xml.end("p:presentation")?;
    Ok(xml.into_inner())
}

/// Slide rels: the layout, plus the embedded image when there is one.
pub(crate) fn slide_rels(media: Option<&MediaPart>) -> Result<Vec<u8>> {
    let mut rels = vec![rel(1, REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml")];
    if let Some(media) = media {
        rels.push(rel(2, REL_IMAGE, format!("../media/{}", media.name)));
    }
    relationships(&rels)
}

pub(crate) fn slide_master_rels() -> Result<Vec<u8>> {
    relationships(&[
        rel(1, REL_SLIDE_LAYOUT, "../slideLayouts/slideLayout1.xml"),
        rel(2, REL_THEME, "../theme/theme1.xml"),
    ])
}

pub(crate) fn slide_layout_rels() -> Result<Vec<u8>> {
    relationships(&[rel(1, REL_SLIDE_MASTER, "../slideMasters/slideMaster1.xml")])
}

/// The group header every shape tree starts with.
pub(crate) fn sp_tree_header(xml: &mut XmlOut) -> Result<()> {
    xml.start("p:nvGrpSpPr", &[])?;
    xml.empty("p:cNvPr", &[("id", "1"), ("name", "")])?;
    xml.empty("p:cNvGrpSpPr", &[])?;
    xml.empty("p:nvPr", &[])?;
    xml.end("p:nvGrpSpPr")?;
    xml.empty("p:grpSpPr", &[])
}

fn empty_sp_tree(xml: &mut XmlOut) -> Result<()> {
    xml.start("p:spTree", &[])?;
    sp_tree_header(xml)?;
    xml.end("p:spTree")
}

pub(crate) fn slide_master() -> Result<Vec<u8>> {
    let mut xml = XmlOut::part()?;
    xml.start(
        "p:sldMaster",
        &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)],
    )?;
    xml.start("p:cSld", &[])?;
    empty_sp_tree(&mut xml)?;
    xml.end("p:cSld")?;
    xml.empty(
        "p:clrMap",
        &[
            ("bg1", "lt1"),
            ("tx1", "dk1"),
            ("bg2", "lt2"),
            ("tx2", "dk2"),
            ("accent1", "accent1"),
            ("accent2", "accent2"),
            ("accent3", "accent3"),
            ("accent4", "accent4"),
            ("accent5", "accent5"),
            ("accent6", "accent6"),
            ("hlink", "hlink"),
            ("folHlink", "folHlink"),
        ],
    )?;
    xml.wrap_empty(
        "p:sldLayoutIdLst",
        &[],
        "p:sldLayoutId",
        &[("id", "2147483649"), ("r:id", "rId1")],
    )?;
    xml.end("p:sldMaster")?;
    Ok(xml.into_inner())
}

pub(crate) fn slide_layout() -> Result<Vec<u8>> {
    let mut xml = XmlOut::part()?;
    xml.start(
        "p:sldLayout",
        &[
            ("xmlns:a", NS_A),
            ("xmlns:r", NS_R),
            ("xmlns:p", NS_P),
            ("type", "blank"),
            ("preserve", "1"),
        ],
    )?;
    xml.start("p:cSld", &[("name", "Blank")])?;
    empty_sp_tree(&mut xml)?;
    xml.end("p:cSld")?;
    xml.wrap_empty("p:clrMapOvr", &[], "a:masterClrMapping", &[])?;
    xml.end("p:sldLayout")?;
    Ok(xml.into_inner())
}

/// Three copies of a `phClr` solid fill, as every style list needs three.
fn placeholder_fills(xml: &mut XmlOut, list: &str) -> Result<()> {
    xml.start(list, &[])?;
    for _ in 0..3 {
        xml.wrap_empty("a:solidFill", &[], "a:schemeClr", &[("val", "phClr")])?;
    }
    xml.end(list)
}

fn font(xml: &mut XmlOut, name: &str) -> Result<()> {
    xml.start(name, &[])?;
    xml.empty("a:latin", &[("typeface", "Calibri")])?;
    xml.empty("a:ea", &[("typeface", "")])?;
    xml.empty("a:cs", &[("typeface", "")])?;
    xml.end(name)
}

pub(crate) fn theme() -> Result<Vec<u8>> {
    let mut xml = XmlOut::part()?;
    xml.start("a:theme", &[("xmlns:a", NS_A), ("name", "Lesson")])?;
    xml.start("a:themeElements", &[])?;

    xml.start("a:clrScheme", &[("name", "Lesson")])?;
    xml.wrap_empty(
        "a:dk1",
        &[],
        "a:sysClr",
        &[("val", "windowText"), ("lastClr", "000000")],
    )?;
    xml.wrap_empty(
        "a:lt1",
        &[],
        "a:sysClr",
        &[("val", "window"), ("lastClr", "FFFFFF")],
    )?;
    for (name, rgb) in [
        ("a:dk2", "1F497D"),
        ("a:lt2", "EEECE1"),
        ("a:accent1", "4F81BD"),
        ("a:accent2", "C0504D"),
        ("a:accent3", "9BBB59"),
        ("a:accent4", "8064A2"),
        ("a:accent5", "4BACC6"),
        ("a:accent6", "F79646"),
        ("a:hlink", "0000FF"),
        ("a:folHlink", "800080"),
    ] {
        xml.wrap_empty(name, &[], "a:srgbClr", &[("val", rgb)])?;
    }
    xml.end("a:clrScheme")?;

    xml.start("a:fontScheme", &[("name", "Lesson")])?;
    font(&mut xml, "a:majorFont")?;
    font(&mut xml, "a:minorFont")?;
    xml.end("a:fontScheme")?;

    xml.start("a:fmtScheme", &[("name", "Lesson")])?;
    placeholder_fills(&mut xml, "a:fillStyleLst")?;
    xml.start("a:lnStyleLst", &[])?;
    for _ in 0..3 {
        xml.start("a:ln", &[("w", "9525")])?;
        xml.wrap_empty("a:solidFill", &[], "a:schemeClr", &[("val", "phClr")])?;
        xml.end("a:ln")?;
    }
    xml.end("a:lnStyleLst")?;
    xml.start("a:effectStyleLst", &[])?;
    for _ in 0..3 {
        xml.wrap_empty("a:effectStyle", &[], "a:effectLst", &[])?;
    }
    xml.end("a:effectStyleLst")?;
    placeholder_fills(&mut xml, "a:bgFillStyleLst")?;
    xml.end("a:fmtScheme")?;

    xml.end("a:themeElements")?;
    xml.end("a:theme")?;
    Ok(xml.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: Result<Vec<u8>>) -> String {
        String::from_utf8(bytes.unwrap()).unwrap()
    }

    #[test]
    fn test_presentation_rels_number_slides_after_master_and_theme() {
        let rels = text(presentation_rels(2));
        assert!(rels.contains(r#"Id="rId1""#));
        assert!(rels.contains(r#"Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide1.xml""#));
        assert!(rels.contains(r#"Target="slides/slide2.xml""#));
        assert!(!rels.contains("slide3.xml"));
    }

    #[test]
    fn test_content_types_override_every_slide() {
        let types = text(content_types(3));
        assert_eq!(types.matches("<Override ").count(), 4 + 3);
        assert!(types.contains(r#"PartName="/ppt/slides/slide3.xml""#));
    }

    #[test]
    fn test_theme_style_lists_have_three_entries() {
        let theme = text(theme());
        assert_eq!(theme.matches("<a:effectStyle>").count(), 3);
        assert_eq!(theme.matches(r#"<a:ln w="9525">"#).count(), 3);
    }
}
