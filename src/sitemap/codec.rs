//! Parse and render sitemap XML.
//!
//! Only `<urlset>` documents are accepted. Each `<url>` must carry a
//! `<loc>`; `lastmod`, `changefreq`, and `priority` are carried through.
//! Other children of `<url>` (image or alternate-language extensions) are
//! skipped.

use quick_xml::Reader;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};

use super::document::{SitemapDocument, UrlEntry};
use crate::error::{MirrorError, MirrorResult};

/// Default namespace written when the source document declared none
pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Loc,
    Lastmod,
    Changefreq,
    Priority,
    Other,
}

impl Field {
    fn from_local_name(name: &[u8]) -> Self {
        match name {
            b"loc" => Self::Loc,
            b"lastmod" => Self::Lastmod,
            b"changefreq" => Self::Changefreq,
            b"priority" => Self::Priority,
            _ => Self::Other,
        }
    }
}

/// Accumulates one `<url>` element
#[derive(Default)]
struct PendingEntry {
    loc: String,
    lastmod: String,
    changefreq: String,
    priority: String,
    /// Element depth below `<url>`; 1 means a direct child
    depth: usize,
    field: Option<Field>,
}

impl PendingEntry {
    fn push_text(&mut self, text: &str) {
        let target = match self.field {
            Some(Field::Loc) => &mut self.loc,
            Some(Field::Lastmod) => &mut self.lastmod,
            Some(Field::Changefreq) => &mut self.changefreq,
            Some(Field::Priority) => &mut self.priority,
            Some(Field::Other) | None => return,
        };
        target.push_str(text);
    }

    fn finish(self, index: usize) -> MirrorResult<UrlEntry> {
        let location = self.loc.trim();
        if location.is_empty() {
            return Err(MirrorError::Parse(format!(
                "sitemap <url> #{} has no <loc>",
                index + 1
            )));
        }

        Ok(UrlEntry {
            location: location.to_string(),
            lastmod: non_empty(&self.lastmod),
            changefreq: non_empty(&self.changefreq),
            priority: non_empty(&self.priority),
        })
    }
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Parse a sitemap XML string into a document
///
/// # Errors
///
/// `MirrorError::Parse` when the XML is malformed, the root element is not
/// `<urlset>`, or a `<url>` has no `<loc>`.
pub fn parse_sitemap(xml: &str) -> MirrorResult<SitemapDocument> {
    let mut reader = Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut doc = SitemapDocument::default();
    let mut seen_root = false;
    let mut closed_root = false;
    let mut pending: Option<PendingEntry> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| MirrorError::Parse(format!("malformed sitemap XML: {e}")))?;

        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let is_empty = matches!(event, Event::Empty(_));
                let name = e.local_name();
                let name = name.as_ref();

                if !seen_root {
                    if name != b"urlset" {
                        return Err(MirrorError::Parse(format!(
                            "expected <urlset> root, found <{}>",
                            String::from_utf8_lossy(name)
                        )));
                    }
                    seen_root = true;
                    doc.namespaces = read_attributes(e)?;
                    if is_empty {
                        closed_root = true;
                    }
                } else if closed_root {
                    return Err(MirrorError::Parse(
                        "content after closing </urlset>".to_string(),
                    ));
                } else if let Some(entry) = pending.as_mut() {
                    if !is_empty {
                        entry.depth += 1;
                        if entry.depth == 1 {
                            entry.field = Some(Field::from_local_name(name));
                        }
                    }
                } else if name == b"url" {
                    if is_empty {
                        return Err(MirrorError::Parse(format!(
                            "sitemap <url> #{} has no <loc>",
                            doc.entries.len() + 1
                        )));
                    }
                    pending = Some(PendingEntry::default());
                }
            }
            Event::End(ref e) => {
                let name = e.local_name();
                let name = name.as_ref();

                match pending.as_mut() {
                    Some(entry) if entry.depth > 0 => {
                        if entry.depth == 1 {
                            entry.field = None;
                        }
                        entry.depth -= 1;
                    }
                    Some(_) if name == b"url" => {
                        if let Some(entry) = pending.take() {
                            let index = doc.entries.len();
                            doc.entries.push(entry.finish(index)?);
                        }
                    }
                    Some(_) => {}
                    None if name == b"urlset" => closed_root = true,
                    None => {}
                }
            }
            Event::Text(ref e) => {
                if let Some(entry) = pending.as_mut() {
                    if entry.depth == 1 {
                        let text = e.unescape().map_err(|err| {
                            MirrorError::Parse(format!("invalid text in sitemap: {err}"))
                        })?;
                        entry.push_text(&text);
                    }
                }
            }
            Event::CData(ref e) => {
                if let Some(entry) = pending.as_mut() {
                    if entry.depth == 1 {
                        entry.push_text(&String::from_utf8_lossy(e));
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !seen_root {
        return Err(MirrorError::Parse(
            "sitemap has no <urlset> element".to_string(),
        ));
    }
    if pending.is_some() || !closed_root {
        return Err(MirrorError::Parse(
            "sitemap ended before </urlset>".to_string(),
        ));
    }

    Ok(doc)
}

fn read_attributes(start: &BytesStart<'_>) -> MirrorResult<Vec<(String, String)>> {
    let mut attributes = Vec::new();
    for attr in start.attributes() {
        let attr =
            attr.map_err(|e| MirrorError::Parse(format!("invalid <urlset> attribute: {e}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| MirrorError::Parse(format!("invalid <urlset> attribute value: {e}")))?
            .into_owned();
        attributes.push((key, value));
    }
    Ok(attributes)
}

/// Render a document as sitemap XML
pub fn render_sitemap(doc: &SitemapDocument) -> MirrorResult<String> {
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))
        .map_err(xml_write_error)?;

    let mut root = BytesStart::new("urlset");
    if doc.namespaces.is_empty() {
        root.push_attribute(("xmlns", SITEMAP_NAMESPACE));
    }
    for (key, value) in &doc.namespaces {
        root.push_attribute((key.as_str(), value.as_str()));
    }
    writer
        .write_event(Event::Start(root))
        .map_err(xml_write_error)?;

    for entry in &doc.entries {
        writer
            .write_event(Event::Start(BytesStart::new("url")))
            .map_err(xml_write_error)?;
        write_text_element(&mut writer, "loc", &entry.location)?;
        if let Some(lastmod) = &entry.lastmod {
            write_text_element(&mut writer, "lastmod", lastmod)?;
        }
        if let Some(changefreq) = &entry.changefreq {
            write_text_element(&mut writer, "changefreq", changefreq)?;
        }
        if let Some(priority) = &entry.priority {
            write_text_element(&mut writer, "priority", priority)?;
        }
        writer
            .write_event(Event::End(BytesEnd::new("url")))
            .map_err(xml_write_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new("urlset")))
        .map_err(xml_write_error)?;

    String::from_utf8(writer.into_inner())
        .map_err(|e| MirrorError::Parse(format!("rendered sitemap is not UTF-8: {e}")))
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, name: &str, text: &str) -> MirrorResult<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(xml_write_error)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(xml_write_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(xml_write_error)?;
    Ok(())
}

fn xml_write_error(e: impl std::fmt::Display) -> MirrorError {
    MirrorError::Parse(format!("failed to write sitemap XML: {e}"))
}
