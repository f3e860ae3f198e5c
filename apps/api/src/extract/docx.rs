//! DOCX extraction — reads `word/document.xml` out of the zip container and
//! walks the body paragraphs.
//!
//! Only paragraphs that are direct children of `<w:body>` count. Paragraphs
//! inside tables or text boxes sit deeper in the tree and are skipped, as is
//! any text inside them.

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Seek};
use std::path::Path;

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::extract::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

/// Returns every body paragraph's text followed by `\n`, in document order.
pub fn extract_docx_text(path: &Path) -> Result<String, ExtractError> {
    let file = File::open(path)?;
    read_docx(file)
}

fn read_docx<R: Read + Seek>(reader: R) -> Result<String, ExtractError> {
    let mut archive =
        zip::ZipArchive::new(reader).map_err(|e| ExtractError::Docx(e.to_string()))?;
    let part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| ExtractError::Docx(format!("{DOCUMENT_PART}: {e}")))?;

    let paragraphs = body_paragraphs(BufReader::new(part))?;
    let mut text = String::new();
    for paragraph in paragraphs {
        text.push_str(&paragraph);
        text.push('\n');
    }
    Ok(text)
}

/// Streams the document XML and collects the text of each top-level paragraph.
fn body_paragraphs<R: BufRead>(source: R) -> Result<Vec<String>, ExtractError> {
    let mut reader = Reader::from_reader(source);
    let mut buf = Vec::new();

    // Local names of the currently open elements, outermost first.
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut in_text_run = false;

    loop {
        match reader
            .read_event_into(&mut buf)
            .map_err(|e| ExtractError::Docx(e.to_string()))?
        {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                if name == b"p" && is_body_child(&stack) {
                    current = Some(String::new());
                }
                if name == b"t" && in_top_level_paragraph(&stack, current.is_some()) {
                    in_text_run = true;
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let name = e.local_name();
                if name.as_ref() == b"p" && is_body_child(&stack) {
                    paragraphs.push(String::new());
                } else if let Some(text) = current.as_mut() {
                    if in_top_level_paragraph(&stack, true) {
                        match name.as_ref() {
                            b"tab" => text.push('\t'),
                            b"br" | b"cr" => text.push('\n'),
                            _ => {}
                        }
                    }
                }
            }
            Event::Text(t) => {
                if in_text_run {
                    if let Some(text) = current.as_mut() {
                        let unescaped = t.unescape().map_err(|e| ExtractError::Docx(e.to_string()))?;
                        text.push_str(&unescaped);
                    }
                }
            }
            Event::CData(t) => {
                if in_text_run {
                    if let Some(text) = current.as_mut() {
                        text.push_str(&String::from_utf8_lossy(&t));
                    }
                }
            }
            Event::End(_) => {
                let name = stack.pop().unwrap_or_default();
                if name == b"t" {
                    in_text_run = false;
                }
                if name == b"p" && is_body_child(&stack) {
                    if let Some(text) = current.take() {
                        paragraphs.push(text);
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

/// True when the next element opened would be a direct child of `<w:body>`.
fn is_body_child(stack: &[Vec<u8>]) -> bool {
    stack.last().map(|n| n.as_slice()) == Some(b"body".as_slice())
}

/// True while positioned inside a top-level paragraph but outside any nested
/// container (text boxes, nested tables) that carries its own paragraphs.
fn in_top_level_paragraph(stack: &[Vec<u8>], paragraph_open: bool) -> bool {
    if !paragraph_open {
        return false;
    }
    let Some(body_at) = stack.iter().position(|n| n == b"body") else {
        return false;
    };
    // stack[body_at + 1] is the open top-level <w:p>; nothing below it may be
    // another paragraph or a text-box container.
    stack[body_at + 2..]
        .iter()
        .all(|n| n != b"p" && n != b"txbxContent")
}
