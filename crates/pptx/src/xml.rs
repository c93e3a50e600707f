//! Thin wrapper over the quick-xml writer mapping errors into ours.

use lesson_core::{Error, Result};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

/// Streaming XML builder for one package part.
pub(crate) struct XmlOut {
    writer: Writer<Vec<u8>>,
}

impl XmlOut {
    /// Start a part with the standalone UTF-8 declaration.
    pub(crate) fn part() -> Result<Self> {
        let mut xml = Self {
            writer: Writer::new(Vec::new()),
        };
        xml.write(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
        Ok(xml)
    }

    pub(crate) fn into_inner(self) -> Vec<u8> {
        self.writer.into_inner()
    }

    fn write(&mut self, event: Event<'_>) -> Result<()> {
        self.writer
            .write_event(event)
            .map_err(|e| Error::XmlError(e.to_string()))
    }

    pub(crate) fn start(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.write(Event::Start(elem))
    }

    pub(crate) fn empty(&mut self, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
        let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
        self.write(Event::Empty(elem))
    }

    pub(crate) fn end(&mut self, name: &str) -> Result<()> {
        self.write(Event::End(BytesEnd::new(name)))
    }

    pub(crate) fn text(&mut self, text: &str) -> Result<()> {
        self.write(Event::Text(BytesText::new(text)))
    }

    /// `<name attrs><child/></name>` for a single empty child.
    pub(crate) fn wrap_empty(
        &mut self,
        name: &str,
        attrs: &[(&str, &str)],
        child: &str,
        child_attrs: &[(&str, &str)],
    ) -> Result<()> {
        self.start(name, attrs)?;
        self.empty(child, child_attrs)?;
        self.end(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_escapes_attributes_and_text() {
        let mut xml = XmlOut::part().unwrap();
        xml.start("a:t", &[("title", "x < \"y\"")]).unwrap();
        xml.text("Fish & Chips").unwrap();
        xml.end("a:t").unwrap();

        let out = String::from_utf8(xml.into_inner()).unwrap();
        assert!(out.starts_with(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#));
        assert!(out.contains("Fish &amp; Chips"));
        assert!(out.contains("x &lt; &quot;y&quot;"));
    }
}
