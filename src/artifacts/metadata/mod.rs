//! Repository metadata (`maven-metadata.xml`)
//!
//! The metadata document lists every version registered for a package:
//!
//! ```xml
//! <metadata>
//!   <groupId>com.example</groupId>
//!   <artifactId>mylib</artifactId>
//!   <versioning>
//!     <release>1.0.0</release>
//!     <versions>
//!       <version>1.0.0</version>
//!     </versions>
//!   </versioning>
//! </metadata>
//! ```
//!
//! The registrar owns only the first `versions` container found two levels
//! below the root. The document is streamed event by event so that anything
//! else (declaration, comments, attributes, whitespace) is written back
//! untouched.

use anyhow::Context;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::{Reader, Writer};

const VERSIONS_TAG: &str = "versions";
const VERSION_TAG: &str = "version";

/// Depth of the `versions` container (root is depth 0)
const VERSIONS_DEPTH: usize = 2;

/// Indentation added per nesting level when the container has no entries yet
const INDENT_STEP: &str = "  ";

const BOM: &str = "\u{feff}";

/// Register `version` in the metadata `document`
///
/// Returns `None` when the version is already listed (the document must not
/// be rewritten), or the full rewritten document with one new `version`
/// entry appended to the container.
pub fn insert_version(document: &str, version: &str) -> anyhow::Result<Option<String>> {
    let (bom, document) = split_bom(document);
    let mut reader = Reader::from_str(document);
    let mut editor = VersionsEditor::new(version, document.len());

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .with_context(|| format!("malformed metadata document near byte {position}"))?;

        if let Event::Eof = event {
            break;
        }
        if editor.handle(event)? == Entry::AlreadyListed {
            return Ok(None);
        }
    }

    let rewritten = editor.finish()?;

    Ok(Some(format!("{bom}{rewritten}")))
}

/// Versions listed in the first `versions` container of `document`
pub fn list_versions(document: &str) -> anyhow::Result<Vec<String>> {
    let (_, document) = split_bom(document);
    let mut reader = Reader::from_str(document);
    let mut depth = 0usize;
    let mut inside = false;
    let mut entry: Option<String> = None;
    let mut versions = Vec::new();

    loop {
        let position = reader.buffer_position();
        let event = reader
            .read_event()
            .with_context(|| format!("malformed metadata document near byte {position}"))?;

        match event {
            Event::Eof => break,
            Event::Start(e) => {
                if depth == VERSIONS_DEPTH && e.name().as_ref() == VERSIONS_TAG.as_bytes() {
                    inside = true;
                } else if inside
                    && depth == VERSIONS_DEPTH + 1
                    && e.name().as_ref() == VERSION_TAG.as_bytes()
                {
                    entry = Some(String::new());
                }
                depth += 1;
            }
            Event::Empty(e) => {
                if depth == VERSIONS_DEPTH && e.name().as_ref() == VERSIONS_TAG.as_bytes() {
                    return Ok(versions);
                }
            }
            Event::Text(text) => {
                if let Some(entry) = entry.as_mut() {
                    entry.push_str(&text.unescape().context("invalid text in version entry")?);
                }
            }
            Event::CData(data) => {
                if let Some(entry) = entry.as_mut() {
                    entry.push_str(&String::from_utf8_lossy(&data));
                }
            }
            Event::End(_) => {
                depth = depth.saturating_sub(1);
                if inside && depth == VERSIONS_DEPTH + 1 {
                    versions.extend(entry.take());
                } else if inside && depth == VERSIONS_DEPTH {
                    return Ok(versions);
                }
            }
            _ => {}
        }
    }

    anyhow::bail!("metadata document has no <{VERSIONS_TAG}> element")
}

/// The reader skips a leading byte order mark, so it is carried separately
fn split_bom(document: &str) -> (&str, &str) {
    match document.strip_prefix(BOM) {
        Some(rest) => (BOM, rest),
        None => ("", document),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Entry {
    Missing,
    AlreadyListed,
}

enum VersionsScan<'a> {
    Before,
    Inside(Container<'a>),
    Done,
}

/// Streams a metadata document into a buffer, appending one entry when the
/// `versions` container closes without listing the version
struct VersionsEditor<'a, 'v> {
    writer: Writer<Vec<u8>>,
    version: &'v str,
    depth: usize,
    scan: VersionsScan<'a>,
}

impl<'a, 'v> VersionsEditor<'a, 'v> {
    fn new(version: &'v str, capacity: usize) -> Self {
        VersionsEditor {
            writer: Writer::new(Vec::with_capacity(capacity + 64)),
            version,
            depth: 0,
            scan: VersionsScan::Before,
        }
    }

    fn handle(&mut self, event: Event<'a>) -> anyhow::Result<Entry> {
        match std::mem::replace(&mut self.scan, VersionsScan::Done) {
            VersionsScan::Before => self.before_container(event)?,
            VersionsScan::Inside(container) => return self.inside_container(container, event),
            VersionsScan::Done => self.pass_through(event)?,
        }

        Ok(Entry::Missing)
    }

    fn finish(self) -> anyhow::Result<String> {
        match self.scan {
            VersionsScan::Done => {}
            VersionsScan::Before => {
                anyhow::bail!("metadata document has no <{VERSIONS_TAG}> element")
            }
            VersionsScan::Inside(_) => {
                anyhow::bail!("metadata document ends inside <{VERSIONS_TAG}>")
            }
        }

        String::from_utf8(self.writer.into_inner()).context("metadata document is not UTF-8")
    }

    fn is_container(&self, start: &BytesStart<'_>) -> bool {
        self.depth == VERSIONS_DEPTH && start.name().as_ref() == VERSIONS_TAG.as_bytes()
    }

    fn before_container(&mut self, event: Event<'a>) -> anyhow::Result<()> {
        match event {
            Event::Start(e) if self.is_container(&e) => {
                self.depth += 1;
                self.writer.write_event(Event::Start(e))?;
                self.scan = VersionsScan::Inside(Container::default());
            }
            Event::Empty(e) if self.is_container(&e) => {
                let end = e.to_end().into_owned();
                self.writer.write_event(Event::Start(e))?;
                write_version_entry(&mut self.writer, self.version)?;
                self.writer.write_event(Event::End(end))?;
            }
            event => {
                self.scan = VersionsScan::Before;
                self.pass_through(event)?;
            }
        }

        Ok(())
    }

    fn inside_container(
        &mut self,
        mut container: Container<'a>,
        event: Event<'a>,
    ) -> anyhow::Result<Entry> {
        match event {
            Event::Text(text)
                if self.depth == VERSIONS_DEPTH + 1 && text.iter().all(u8::is_ascii_whitespace) =>
            {
                container.flush_whitespace(&mut self.writer)?;
                container.pending_whitespace = Some(text);
            }
            Event::Text(text) => {
                if let Some(entry) = container.entry_text.as_mut() {
                    entry.push_str(&text.unescape().context("invalid text in version entry")?);
                }
                container.flush_whitespace(&mut self.writer)?;
                self.writer.write_event(Event::Text(text))?;
            }
            Event::CData(data) => {
                if let Some(entry) = container.entry_text.as_mut() {
                    entry.push_str(&String::from_utf8_lossy(&data));
                }
                container.flush_whitespace(&mut self.writer)?;
                self.writer.write_event(Event::CData(data))?;
            }
            Event::Start(e) => {
                if self.depth == VERSIONS_DEPTH + 1 {
                    container.note_child_indent();
                    if e.name().as_ref() == VERSION_TAG.as_bytes() {
                        container.entry_text = Some(String::new());
                    }
                }
                self.depth += 1;
                container.flush_whitespace(&mut self.writer)?;
                self.writer.write_event(Event::Start(e))?;
            }
            Event::Empty(e) => {
                if self.depth == VERSIONS_DEPTH + 1 {
                    container.note_child_indent();
                }
                container.flush_whitespace(&mut self.writer)?;
                self.writer.write_event(Event::Empty(e))?;
            }
            Event::End(e) => {
                self.depth = self.depth.saturating_sub(1);

                if self.depth == VERSIONS_DEPTH {
                    if let Some(indent) = container.new_entry_indent() {
                        self.writer
                            .write_event(Event::Text(BytesText::from_escaped(indent)))?;
                    }
                    write_version_entry(&mut self.writer, self.version)?;
                    container.flush_whitespace(&mut self.writer)?;
                    self.writer.write_event(Event::End(e))?;
                    return Ok(Entry::Missing);
                }

                if self.depth == VERSIONS_DEPTH + 1
                    && e.name().as_ref() == VERSION_TAG.as_bytes()
                    && container.entry_text.take().as_deref() == Some(self.version)
                {
                    return Ok(Entry::AlreadyListed);
                }

                container.flush_whitespace(&mut self.writer)?;
                self.writer.write_event(Event::End(e))?;
            }
            other => {
                container.flush_whitespace(&mut self.writer)?;
                self.writer.write_event(other)?;
            }
        }

        self.scan = VersionsScan::Inside(container);
        Ok(Entry::Missing)
    }

    fn pass_through(&mut self, event: Event<'a>) -> anyhow::Result<()> {
        match &event {
            Event::Start(_) => self.depth += 1,
            Event::End(_) => self.depth = self.depth.saturating_sub(1),
            _ => {}
        }
        self.writer.write_event(event)?;
        Ok(())
    }
}

/// Formatting state while streaming through the `versions` container
#[derive(Default)]
struct Container<'a> {
    /// Whitespace seen directly inside the container, not yet written
    pending_whitespace: Option<BytesText<'a>>,
    /// Whitespace preceding the first child, reused for the new entry
    child_indent: Option<String>,
    /// Text of the `version` entry currently open
    entry_text: Option<String>,
}

impl Container<'_> {
    fn flush_whitespace(&mut self, writer: &mut Writer<Vec<u8>>) -> anyhow::Result<()> {
        if let Some(text) = self.pending_whitespace.take() {
            writer.write_event(Event::Text(text))?;
        }
        Ok(())
    }

    fn note_child_indent(&mut self) {
        if self.child_indent.is_none() {
            if let Some(text) = &self.pending_whitespace {
                self.child_indent = Some(String::from_utf8_lossy(text).into_owned());
            }
        }
    }

    /// Indentation for an appended entry, derived from siblings or from the
    /// whitespace before the closing tag
    fn new_entry_indent(&self) -> Option<String> {
        self.child_indent.clone().or_else(|| {
            self.pending_whitespace
                .as_ref()
                .map(|text| format!("{}{INDENT_STEP}", String::from_utf8_lossy(text)))
        })
    }
}

fn write_version_entry(writer: &mut Writer<Vec<u8>>, version: &str) -> anyhow::Result<()> {
    writer.write_event(Event::Start(BytesStart::new(VERSION_TAG)))?;
    writer.write_event(Event::Text(BytesText::new(version)))?;
    writer.write_event(Event::End(BytesEnd::new(VERSION_TAG)))?;
    Ok(())
}
