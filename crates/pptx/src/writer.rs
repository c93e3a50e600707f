//! PPTX file writer implementation.

use crate::parts::{self, MediaPart, NS_A, NS_P, NS_R, SLIDE_CX};
use crate::xml::XmlOut;
use lesson_core::{Document, Error, ImageRef, Page, PageKind, Result};
use std::fs::File;
use std::io::{Seek, Write};
use std::path::Path;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

/// Left margin and content width shared by every text box, in EMU.
const MARGIN_X: i64 = 457_200;
const CONTENT_CX: i64 = SLIDE_CX - 2 * MARGIN_X;

const TITLE_Y: i64 = 304_800;
const TITLE_CY: i64 = 1_143_000;
const BODY_Y: i64 = 1_600_200;
const BODY_CY: i64 = 4_876_800;

/// Title page picture box, right of a narrowed body box.
const IMAGE_CX: i64 = 3_962_400;
const IMAGE_CY: i64 = 2_971_800;
const IMAGE_GAP: i64 = 304_800;

/// Largest `sz` DrawingML accepts, in hundredths of a point.
const MAX_FONT_SIZE: u32 = 400_000;

/// Extra size the title page heading gets over subtopic headings.
const TITLE_PAGE_BOOST: u32 = 800;

/// Writer for PPTX (Office Open XML) files.
#[derive(Debug, Clone)]
pub struct PptxWriter {
    /// Font size of slide titles, in hundredths of a point.
    title_font_size: u32,

    /// Font size of body lines, in hundredths of a point.
    body_font_size: u32,
}

impl Default for PptxWriter {
    fn default() -> Self {
        Self {
            title_font_size: 3200,
            body_font_size: 2000,
        }
    }
}

impl PptxWriter {
    /// Create a new PPTX writer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the title font size in points, clamped to 1..=4000.
    pub fn with_title_font_size(mut self, points: u32) -> Self {
        self.title_font_size = points.clamp(1, MAX_FONT_SIZE / 100) * 100;
        self
    }

    /// Set the body font size in points, clamped to 1..=4000.
    pub fn with_body_font_size(mut self, points: u32) -> Self {
        self.body_font_size = points.clamp(1, MAX_FONT_SIZE / 100) * 100;
        self
    }

    /// Write the document to a file.
    pub fn write_to_path(&self, document: &Document, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write(document, file)?;
        Ok(())
    }

    /// Write the document as a PPTX archive, one slide per page, and hand
    /// back the underlying writer.
    pub fn write<W: Write + Seek>(&self, document: &Document, writer: W) -> Result<W> {
        if document.is_empty() {
            return Err(Error::ExportError("document has no pages".to_string()));
        }

        let slide_count = document.len();
        let mut zip = ZipWriter::new(writer);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

        let add = |zip: &mut ZipWriter<W>, name: &str, bytes: &[u8]| -> Result<()> {
            zip.start_file(name, options)
                .map_err(|e| Error::ZipError(format!("Failed to add '{}': {}", name, e)))?;
            zip.write_all(bytes)?;
            Ok(())
        };

        add(&mut zip, "[Content_Types].xml", &parts::content_types(slide_count)?)?;
        add(&mut zip, "_rels/.rels", &parts::package_rels()?)?;
        add(&mut zip, "ppt/presentation.xml", &parts::presentation(slide_count)?)?;
        add(
            &mut zip,
            "ppt/_rels/presentation.xml.rels",
            &parts::presentation_rels(slide_count)?,
        )?;
        add(&mut zip, "ppt/slideMasters/slideMaster1.xml", &parts::slide_master()?)?;
        add(
            &mut zip,
            "ppt/slideMasters/_rels/slideMaster1.xml.rels",
            &parts::slide_master_rels()?,
        )?;
        add(&mut zip, "ppt/slideLayouts/slideLayout1.xml", &parts::slide_layout()?)?;
        add(
            &mut zip,
            "ppt/slideLayouts/_rels/slideLayout1.xml.rels",
            &parts::slide_layout_rels()?,
        )?;
        add(&mut zip, "ppt/theme/theme1.xml", &parts::theme()?)?;

        for (idx, page) in document.pages.iter().enumerate() {
            let number = idx + 1;
            let media = match (&page.image, page.kind) {
                (Some(image), PageKind::Title) => load_image(image, number),
                _ => None,
            };

            let slide = self.slide_xml(page, media.is_some())?;
            add(&mut zip, &format!("ppt/slides/slide{}.xml", number), &slide)?;
            add(
                &mut zip,
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                &parts::slide_rels(media.as_ref())?,
            )?;
            if let Some(media) = &media {
                add(&mut zip, &format!("ppt/media/{}", media.name), &media.bytes)?;
            }
        }

        log::debug!("Wrote PPTX with {} slides", slide_count);

        zip.finish()
            .map_err(|e| Error::ZipError(format!("Failed to finish archive: {}", e)))
    }

    /// Build the XML for one slide.
    fn slide_xml(&self, page: &Page, with_image: bool) -> Result<Vec<u8>> {
        let mut xml = XmlOut::part()?;
        xml.start("p:sld", &[("xmlns:a", NS_A), ("xmlns:r", NS_R), ("xmlns:p", NS_P)])?;
        xml.start("p:cSld", &[])?;
        xml.start("p:spTree", &[])?;
        parts::sp_tree_header(&mut xml)?;

        let title_size = match page.kind {
            PageKind::Title => self
                .title_font_size
                .saturating_add(TITLE_PAGE_BOOST)
                .min(MAX_FONT_SIZE),
            PageKind::Subtopic => self.title_font_size,
        };
        let title_lines = [page.title.clone()];
        let title_box = TextBox {
            id: 2,
            name: "Title",
            frame: (MARGIN_X, TITLE_Y, CONTENT_CX, TITLE_CY),
            font_size: title_size,
            bold: true,
        };
        xml.text_box(&title_box, &title_lines)?;

        let body_cx = if with_image {
            CONTENT_CX - IMAGE_CX - IMAGE_GAP
        } else {
            CONTENT_CX
        };
        let body_box = TextBox {
            id: 3,
            name: "Body",
            frame: (MARGIN_X, BODY_Y, body_cx, BODY_CY),
            font_size: self.body_font_size,
            bold: false,
        };
        xml.text_box(&body_box, &page.lines)?;

        if with_image {
            let x = MARGIN_X + CONTENT_CX - IMAGE_CX;
            xml.picture(4, (x, BODY_Y, IMAGE_CX, IMAGE_CY))?;
        }

        xml.end("p:spTree")?;
        xml.end("p:cSld")?;
        xml.wrap_empty("p:clrMapOvr", &[], "a:masterClrMapping", &[])?;
        xml.end("p:sld")?;

        Ok(xml.into_inner())
    }
}

/// Read the title page image from disk, if it is a supported local file.
fn load_image(image: &ImageRef, slide_number: usize) -> Option<MediaPart> {
    let path = Path::new(&image.uri);
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    let extension = match extension.as_deref() {
        Some("png") => "png",
        Some("jpg") | Some("jpeg") => "jpeg",
        _ => {
            log::warn!("Skipping image '{}': unsupported format", image.uri);
            return None;
        }
    };

    match std::fs::read(path) {
        Ok(bytes) => Some(MediaPart {
            name: format!("image{}.{}", slide_number, extension),
            bytes,
        }),
        Err(e) => {
            log::warn!("Skipping image '{}': {}", image.uri, e);
            None
        }
    }
}

/// Position, size and font of a text shape.
struct TextBox<'a> {
    id: u32,
    name: &'a str,
    /// `(x, y, cx, cy)` in EMU.
    frame: (i64, i64, i64, i64),
    font_size: u32,
    bold: bool,
}

impl XmlOut {
    fn xfrm(&mut self, (x, y, cx, cy): (i64, i64, i64, i64)) -> Result<()> {
        let (x, y, cx, cy) = (x.to_string(), y.to_string(), cx.to_string(), cy.to_string());
        self.start("a:xfrm", &[])?;
        self.empty("a:off", &[("x", x.as_str()), ("y", y.as_str())])?;
        self.empty("a:ext", &[("cx", cx.as_str()), ("cy", cy.as_str())])?;
        self.end("a:xfrm")?;
        self.start("a:prstGeom", &[("prst", "rect")])?;
        self.empty("a:avLst", &[])?;
        self.end("a:prstGeom")
    }

    /// A text box with one paragraph per line; blank lines stay as empty
    /// paragraphs.
    fn text_box(&mut self, shape: &TextBox<'_>, lines: &[String]) -> Result<()> {
        let id = shape.id.to_string();
        let size = shape.font_size.to_string();
        let bold = if shape.bold { "1" } else { "0" };

        self.start("p:sp", &[])?;
        self.start("p:nvSpPr", &[])?;
        self.empty("p:cNvPr", &[("id", id.as_str()), ("name", shape.name)])?;
        self.empty("p:cNvSpPr", &[("txBox", "1")])?;
        self.empty("p:nvPr", &[])?;
        self.end("p:nvSpPr")?;

        self.start("p:spPr", &[])?;
        self.xfrm(shape.frame)?;
        self.end("p:spPr")?;

        self.start("p:txBody", &[])?;
        self.empty("a:bodyPr", &[("wrap", "square")])?;
        self.empty("a:lstStyle", &[])?;
        if lines.is_empty() {
            self.empty("a:p", &[])?;
        }
        for line in lines {
            if line.is_empty() {
                self.empty("a:p", &[])?;
                continue;
            }
            self.start("a:p", &[])?;
            self.start("a:r", &[])?;
            self.empty("a:rPr", &[("lang", "en-US"), ("sz", size.as_str()), ("b", bold)])?;
            self.start("a:t", &[])?;
            self.text(line)?;
            self.end("a:t")?;
            self.end("a:r")?;
            self.end("a:p")?;
        }
        self.end("p:txBody")?;
        self.end("p:sp")
    }

    /// A picture shape referencing the slide's `rId2` image.
    fn picture(&mut self, id: u32, frame: (i64, i64, i64, i64)) -> Result<()> {
        let id = id.to_string();
        self.start("p:pic", &[])?;
        self.start("p:nvPicPr", &[])?;
        self.empty("p:cNvPr", &[("id", id.as_str()), ("name", "Picture")])?;
        self.empty("p:cNvPicPr", &[])?;
        self.empty("p:nvPr", &[])?;
        self.end("p:nvPicPr")?;

        self.start("p:blipFill", &[])?;
        self.empty("a:blip", &[("r:embed", "rId2")])?;
        self.start("a:stretch", &[])?;
        self.empty("a:fillRect", &[])?;
        self.end("a:stretch")?;
        self.end("p:blipFill")?;

        self.start("p:spPr", &[])?;
        self.xfrm(frame)?;
        self.end("p:spPr")?;
        self.end("p:pic")
    }
}
