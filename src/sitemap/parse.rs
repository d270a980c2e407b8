//! Streaming sitemap parser built on `quick_xml`.
//!
//! Element names are matched by local name, so a prefixed sitemap namespace
//! (`<sm:urlset>`) parses the same as the default one. Only direct children of
//! `<url>` are read: `<image:image><image:loc>` never replaces `<loc>`.

use super::{ChangeFrequency, UrlRecord};
use crate::{debug, utils::date::parse_datetime};
use quick_xml::{
    Reader,
    escape::resolve_xml_entity,
    events::{BytesRef, Event},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ParseError {
    #[error("malformed XML at byte {position}")]
    Xml {
        position: u64,
        #[source]
        source: quick_xml::Error,
    },

    #[error("document has no root element")]
    MissingRoot,

    #[error("sitemap index documents are not supported, point to a `<urlset>` sitemap instead")]
    SitemapIndex,

    #[error("expected `<urlset>` root element, found `<{0}>`")]
    UnexpectedRoot(String),

    #[error("document ends inside `<{0}>`")]
    UnclosedElement(String),
}

/// Parse a sitemap document into its URL records, in document order.
///
/// Fails on XML that is not well-formed or has the wrong root. Unparseable
/// `<lastmod>`, `<changefreq>` and `<priority>` values are dropped.
pub fn parse_sitemap(xml: &str) -> Result<Vec<UrlRecord>, ParseError> {
    SitemapParser::new(xml.trim_start_matches('\u{feff}')).run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Loc,
    Lastmod,
    Changefreq,
    Priority,
}

impl Field {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"loc" => Some(Self::Loc),
            b"lastmod" => Some(Self::Lastmod),
            b"changefreq" => Some(Self::Changefreq),
            b"priority" => Some(Self::Priority),
            _ => None,
        }
    }
}

// Nesting depth (number of open elements) at which each level lives.
const URL_DEPTH: usize = 1;
const FIELD_DEPTH: usize = 2;

struct SitemapParser<'a> {
    reader: Reader<&'a [u8]>,
    records: Vec<UrlRecord>,
    /// Local names of open elements, innermost last.
    open: Vec<String>,
    root_seen: bool,
    current: Option<UrlRecord>,
    field: Option<Field>,
    text: String,
}

impl<'a> SitemapParser<'a> {
    fn new(xml: &'a str) -> Self {
        Self {
            reader: Reader::from_str(xml),
            records: Vec::new(),
            open: Vec::new(),
            root_seen: false,
            current: None,
            field: None,
            text: String::new(),
        }
    }

    fn run(mut self) -> Result<Vec<UrlRecord>, ParseError> {
        loop {
            let event = match self.reader.read_event() {
                Ok(event) => event,
                Err(e) => return Err(self.xml_error(e)),
            };

            match event {
                Event::Start(elem) => {
                    let name = String::from_utf8_lossy(elem.local_name().as_ref()).into_owned();
                    self.start(&name, false)?;
                    self.open.push(name);
                }
                Event::Empty(elem) => {
                    let name = String::from_utf8_lossy(elem.local_name().as_ref()).into_owned();
                    self.start(&name, true)?;
                }
                Event::End(elem) => {
                    self.open.pop();
                    self.end(elem.local_name().as_ref());
                }
                Event::Text(text) if self.in_field() => {
                    let decoded = text.decode().map_err(|e| self.xml_error(e))?;
                    self.text.push_str(&decoded);
                }
                Event::CData(cdata) if self.in_field() => {
                    let decoded = cdata.decode().map_err(|e| self.xml_error(e))?;
                    self.text.push_str(&decoded);
                }
                Event::GeneralRef(reference) if self.in_field() => {
                    self.push_reference(&reference)?;
                }
                Event::Eof => break,
                _ => {}
            }
        }

        if let Some(element) = self.open.pop() {
            return Err(ParseError::UnclosedElement(element));
        }
        if !self.root_seen {
            return Err(ParseError::MissingRoot);
        }

        Ok(self.records)
    }

    fn start(&mut self, name: &str, empty: bool) -> Result<(), ParseError> {
        match self.open.len() {
            0 => {
                if self.root_seen {
                    return Err(ParseError::UnexpectedRoot(name.to_string()));
                }
                match name {
                    "urlset" => self.root_seen = true,
                    "sitemapindex" => return Err(ParseError::SitemapIndex),
                    other => return Err(ParseError::UnexpectedRoot(other.to_string())),
                }
            }
            URL_DEPTH if name == "url" => {
                if empty {
                    self.records.push(UrlRecord::default());
                } else {
                    self.current = Some(UrlRecord::default());
                }
            }
            FIELD_DEPTH if self.current.is_some() && !empty => {
                self.field = Field::from_name(name.as_bytes());
                self.text.clear();
            }
            _ => {}
        }
        Ok(())
    }

    /// Called after the closing element was popped off `open`.
    fn end(&mut self, name: &[u8]) {
        match self.open.len() {
            FIELD_DEPTH => {
                if let Some(field) = self.field.take() {
                    let text = std::mem::take(&mut self.text);
                    self.assign(field, text.trim());
                }
            }
            URL_DEPTH if name == b"url" => {
                if let Some(record) = self.current.take() {
                    self.records.push(record);
                }
            }
            _ => {}
        }
    }

    /// Text directly inside a recognized `<url>` child.
    fn in_field(&self) -> bool {
        self.field.is_some() && self.open.len() == FIELD_DEPTH + 1
    }

    fn push_reference(&mut self, reference: &BytesRef<'_>) -> Result<(), ParseError> {
        if let Some(ch) = reference
            .resolve_char_ref()
            .map_err(|e| self.xml_error(e))?
        {
            self.text.push(ch);
            return Ok(());
        }

        let name = reference.decode().map_err(|e| self.xml_error(e))?;
        match resolve_xml_entity(&name) {
            Some(resolved) => self.text.push_str(resolved),
            None => {
                self.text.push('&');
                self.text.push_str(&name);
                self.text.push(';');
            }
        }
        Ok(())
    }

    fn assign(&mut self, field: Field, value: &str) {
        let index = self.records.len();
        let Some(record) = self.current.as_mut() else {
            return;
        };

        match field {
            Field::Loc => {
                record.location = (!value.is_empty()).then(|| value.to_string());
            }
            Field::Lastmod => {
                record.last_modified = parse_datetime(value);
                if record.last_modified.is_none() {
                    debug!("parse"; "url #{}: ignoring lastmod '{}'", index, value);
                }
            }
            Field::Changefreq => {
                record.change_frequency = ChangeFrequency::parse(value);
                if record.change_frequency.is_none() {
                    debug!("parse"; "url #{}: ignoring changefreq '{}'", index, value);
                }
            }
            Field::Priority => {
                record.priority = value
                    .parse::<f32>()
                    .ok()
                    .filter(|p| (0.0..=1.0).contains(p));
                if record.priority.is_none() {
                    debug!("parse"; "url #{}: ignoring priority '{}'", index, value);
                }
            }
        }
    }

    fn xml_error(&self, source: impl Into<quick_xml::Error>) -> ParseError {
        ParseError::Xml {
            position: self.reader.error_position() as u64,
            source: source.into(),
        }
    }
}
