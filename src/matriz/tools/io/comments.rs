//! Cell-comment extraction.
//!
//! calamine does not expose cell comments, so the XLSX archive is read
//! directly: the workbook part names the sheets, the relationship parts
//! map each sheet to its `xl/commentsN.xml` part, and the comment parts
//! carry the text runs attached to individual cells.

use std::collections::HashMap;
use std::fs::File;
use std::io::{Read, Seek};
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;
use zip::ZipArchive;
use zip::result::ZipError;

use crate::matriz::tools::error::{Result, ToolError};

/// Comment text keyed by 0-based (row, column) cell coordinates.
pub type CommentMap = HashMap<(u32, u32), String>;

/// Reads every cell comment in the workbook, keyed by sheet name.
///
/// Sheets without a comment part simply do not appear in the result; a
/// workbook with no comments at all yields an empty map.
pub fn read_comments(path: &Path) -> Result<HashMap<String, CommentMap>> {
    let file = File::open(path)?;
    let mut archive =
        ZipArchive::new(file).map_err(|error| ToolError::Zip(error.to_string()))?;

    let workbook_xml = read_part(&mut archive, "xl/workbook.xml")?.ok_or_else(|| {
        ToolError::InvalidWorkbook("missing xl/workbook.xml part".to_string())
    })?;
    let sheets = parse_workbook_sheets(&workbook_xml)?;

    let workbook_rels = match read_part(&mut archive, "xl/_rels/workbook.xml.rels")? {
        Some(data) => parse_relationships(&data)?,
        None => return Ok(HashMap::new()),
    };

    let mut comments = HashMap::new();
    for (sheet_name, relationship_id) in sheets {
        let Some((_, target)) = workbook_rels.get(&relationship_id) else {
            continue;
        };
        let sheet_part = resolve_target("xl", target);
        let Some((sheet_dir, sheet_file)) = sheet_part.rsplit_once('/') else {
            continue;
        };

        let rels_part = format!("{sheet_dir}/_rels/{sheet_file}.rels");
        let Some(rels_data) = read_part(&mut archive, &rels_part)? else {
            continue;
        };
        let sheet_rels = parse_relationships(&rels_data)?;
        let Some(comments_target) = sheet_rels
            .values()
            .find(|(kind, _)| kind.ends_with("/comments"))
            .map(|(_, target)| resolve_target(sheet_dir, target))
        else {
            continue;
        };

        if let Some(data) = read_part(&mut archive, &comments_target)? {
            let sheet_comments = parse_comments_part(&data)?;
            if !sheet_comments.is_empty() {
                comments.insert(sheet_name, sheet_comments);
            }
        }
    }

    Ok(comments)
}

/// Reads one named part out of the archive, or `None` when it is absent.
fn read_part<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    name: &str,
) -> Result<Option<Vec<u8>>> {
    let mut part = match archive.by_name(name) {
        Ok(part) => part,
        Err(ZipError::FileNotFound) => return Ok(None),
        Err(error) => return Err(ToolError::Zip(error.to_string())),
    };
    let mut data = Vec::new();
    part.read_to_end(&mut data)?;
    Ok(Some(data))
}

/// Parses `xl/workbook.xml` into (sheet name, relationship id) pairs in
/// workbook order.
fn parse_workbook_sheets(xml: &[u8]) -> Result<Vec<(String, String)>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut sheets = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                if element.name().as_ref() == b"sheet" {
                    let mut name = None;
                    let mut relationship_id = None;
                    for attribute in element.attributes() {
                        let attribute = attribute
                            .map_err(|error| ToolError::Xml(error.to_string()))?;
                        match attribute.key.as_ref() {
                            b"name" => {
                                name = Some(attribute_text(&attribute.value)?);
                            }
                            b"r:id" => {
                                relationship_id = Some(attribute_text(&attribute.value)?);
                            }
                            _ => {}
                        }
                    }
                    if let (Some(name), Some(relationship_id)) = (name, relationship_id) {
                        sheets.push((name, relationship_id));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(error) => return Err(ToolError::Xml(error.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(sheets)
}

/// Parses a `.rels` part into an Id -> (Type, Target) mapping.
fn parse_relationships(xml: &[u8]) -> Result<HashMap<String, (String, String)>> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut relationships = HashMap::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(element)) | Ok(Event::Empty(element)) => {
                if element.name().as_ref() == b"Relationship" {
                    let mut id = None;
                    let mut kind = None;
                    let mut target = None;
                    for attribute in element.attributes() {
                        let attribute = attribute
                            .map_err(|error| ToolError::Xml(error.to_string()))?;
                        match attribute.key.as_ref() {
                            b"Id" => id = Some(attribute_text(&attribute.value)?),
                            b"Type" => kind = Some(attribute_text(&attribute.value)?),
                            b"Target" => target = Some(attribute_text(&attribute.value)?),
                            _ => {}
                        }
                    }
                    if let (Some(id), Some(kind), Some(target)) = (id, kind, target) {
                        relationships.insert(id, (kind, target));
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(error) => return Err(ToolError::Xml(error.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(relationships)
}

/// Parses one `xl/commentsN.xml` part into per-cell comment text.
///
/// A comment's `<text>` element holds one or more runs; their text nodes
/// are concatenated as-is, so run boundaries (including the newline Excel
/// inserts after the author header) survive intact.
fn parse_comments_part(xml: &[u8]) -> Result<CommentMap> {
    let mut reader = Reader::from_reader(xml);
    let mut buf = Vec::new();
    let mut comments = HashMap::new();

    let mut current_ref: Option<(u32, u32)> = None;
    let mut current_text = String::new();
    let mut in_text = false;
    let mut in_t = false;

    loop {
        match reader.read_event_into(&mut buf) {
            // State flags only toggle on Start events; a self-closing
            // element has no matching End and carries no text anyway.
            Ok(Event::Start(element)) => match element.name().as_ref() {
                b"comment" => {
                    current_ref = None;
                    current_text.clear();
                    for attribute in element.attributes() {
                        let attribute =
                            attribute.map_err(|error| ToolError::Xml(error.to_string()))?;
                        if attribute.key.as_ref() == b"ref" {
                            let reference = attribute_text(&attribute.value)?;
                            current_ref = parse_cell_ref(&reference);
                        }
                    }
                }
                b"text" => in_text = true,
                b"t" if in_text => in_t = true,
                _ => {}
            },
            Ok(Event::Text(text)) => {
                if in_t {
                    let text = text
                        .unescape()
                        .map_err(|error| ToolError::Xml(error.to_string()))?;
                    current_text.push_str(&text);
                }
            }
            Ok(Event::End(element)) => match element.name().as_ref() {
                b"comment" => {
                    if let Some(coord) = current_ref.take() {
                        comments.insert(coord, current_text.clone());
                    }
                    current_text.clear();
                }
                b"text" => in_text = false,
                b"t" => in_t = false,
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(error) => return Err(ToolError::Xml(error.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(comments)
}

fn attribute_text(value: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(value)
        .map_err(|error| ToolError::Xml(error.to_string()))?;
    Ok(text.to_string())
}

/// Resolves a relationship target against the directory of the part that
/// declared it. Targets starting with `/` are archive-absolute.
fn resolve_target(base_dir: &str, target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        return absolute.to_string();
    }
    let mut parts: Vec<&str> = base_dir.split('/').filter(|s| !s.is_empty()).collect();
    for segment in target.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                parts.pop();
            }
            other => parts.push(other),
        }
    }
    parts.join("/")
}

/// Decodes an `A1`-style cell reference into 0-based (row, column).
fn parse_cell_ref(reference: &str) -> Option<(u32, u32)> {
    let mut col_str = String::new();
    let mut row_str = String::new();

    for ch in reference.chars() {
        if ch.is_ascii_alphabetic() {
            col_str.push(ch.to_ascii_uppercase());
        } else if ch.is_ascii_digit() {
            row_str.push(ch);
        }
    }

    if col_str.is_empty() || row_str.is_empty() {
        return None;
    }

    let col = col_str
        .chars()
        .rev()
        .enumerate()
        .map(|(i, ch)| {
            let value = (ch as u32) - ('A' as u32) + 1;
            value * 26_u32.pow(i as u32)
        })
        .sum::<u32>()
        - 1;
    let row = row_str.parse::<u32>().ok()?.checked_sub(1)?;

    Some((row, col))
}
