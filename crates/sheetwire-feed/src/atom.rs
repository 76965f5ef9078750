//! Atom feed decoding.
//!
//! Feeds are decoded in one pass into fixed record types. Nothing outside this
//! module sees XML.
//!
//! Elements are matched on their local name. The spreadsheet feeds only mix
//! the Atom default namespace with the `gs:` extension namespace, and their
//! local names do not collide.

use chrono::{DateTime, FixedOffset};
use quick_xml::escape::escape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;
use sheetwire_core::error::{Error, Result};

/// Atom namespace
pub const ATOM_NS: &str = "http://www.w3.org/2005/Atom";
/// Spreadsheet extension namespace (`gs:` prefix)
pub const SPREADSHEET_NS: &str = "http://schemas.google.com/spreadsheets/2006";

/// One spreadsheet from the spreadsheets feed
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadsheetEntry {
    /// Spreadsheet key (last segment of the entry id)
    pub key: String,
    pub title: String,
    pub updated: Option<DateTime<FixedOffset>>,
}

/// One worksheet from a worksheets feed
#[derive(Debug, Clone, PartialEq)]
pub struct WorksheetEntry {
    /// Worksheet id such as `od6`
    pub key: String,
    pub title: String,
    pub row_count: u32,
    pub col_count: u32,
    pub updated: Option<DateTime<FixedOffset>>,
}

/// One cell from a cells feed, or a single cell entry
#[derive(Debug, Clone, PartialEq)]
pub struct CellEntry {
    /// Full entry id URL
    pub id: String,
    /// Target for updates (`rel="edit"` link)
    pub edit_url: Option<String>,
    pub row: u32,
    pub col: u32,
    /// What the user typed, e.g. a formula
    pub input_value: String,
    /// Displayed value
    pub value: String,
    /// Numeric value reported by the service, if the cell holds a number
    pub numeric_value: Option<f64>,
}

#[derive(Debug, Default)]
struct RawCell {
    row: Option<String>,
    col: Option<String>,
    input_value: String,
    numeric_value: Option<String>,
    text: String,
}

#[derive(Debug, Default)]
struct RawEntry {
    id: String,
    title: String,
    updated: String,
    links: Vec<(String, String)>,
    row_count: String,
    col_count: String,
    cell: Option<RawCell>,
}

impl RawEntry {
    fn link(&self, rel: &str) -> Option<&str> {
        self.links
            .iter()
            .find(|(r, _)| r == rel)
            .map(|(_, href)| href.as_str())
    }

    fn key(&self) -> Result<String> {
        let id = self.id.trim_end_matches('/');
        match id.rsplit('/').next() {
            Some(key) if !key.is_empty() => Ok(key.to_string()),
            _ => Err(Error::decode("feed entry without an id")),
        }
    }

    fn updated(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.updated).ok()
    }
}

/// Which text-bearing element we are inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Id,
    Title,
    Updated,
    RowCount,
    ColCount,
    Cell,
}

fn xml_error(e: quick_xml::Error) -> Error {
    Error::decode(format!("invalid feed XML: {e}"))
}

fn read_link(e: &BytesStart<'_>) -> Result<Option<(String, String)>> {
    let mut rel = None;
    let mut href = None;
    for attr in e.attributes().flatten() {
        match attr.key.local_name().as_ref() {
            b"rel" => rel = Some(attr.unescape_value().map_err(xml_error)?.into_owned()),
            b"href" => href = Some(attr.unescape_value().map_err(xml_error)?.into_owned()),
            _ => {}
        }
    }
    Ok(rel.zip(href))
}

fn read_cell(e: &BytesStart<'_>) -> Result<RawCell> {
    let mut cell = RawCell::default();
    for attr in e.attributes().flatten() {
        let value = attr.unescape_value().map_err(xml_error)?.into_owned();
        match attr.key.local_name().as_ref() {
            b"row" => cell.row = Some(value),
            b"col" => cell.col = Some(value),
            b"inputValue" => cell.input_value = value,
            b"numericValue" => cell.numeric_value = Some(value),
            _ => {}
        }
    }
    Ok(cell)
}

/// Collect every `<entry>` of a feed (or a lone entry document).
fn read_entries(xml: &str) -> Result<Vec<RawEntry>> {
    // Cell text is kept verbatim, so whitespace is only dropped per field below
    let mut reader = Reader::from_str(xml);

    let mut entries = Vec::new();
    let mut entry: Option<RawEntry> = None;
    let mut field: Option<Field> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                if e.local_name().as_ref() == b"entry" {
                    entry = Some(RawEntry::default());
                    field = None;
                    continue;
                }
                // Feed-level metadata outside any entry is ignored
                let Some(current) = entry.as_mut() else {
                    continue;
                };
                field = match e.local_name().as_ref() {
                    b"id" => Some(Field::Id),
                    b"title" => Some(Field::Title),
                    b"updated" => Some(Field::Updated),
                    b"rowCount" => Some(Field::RowCount),
                    b"colCount" => Some(Field::ColCount),
                    b"cell" => {
                        current.cell = Some(read_cell(&e)?);
                        Some(Field::Cell)
                    }
                    b"link" => {
                        if let Some(link) = read_link(&e)? {
                            current.links.push(link);
                        }
                        None
                    }
                    _ => None,
                };
            }
            Ok(Event::Empty(e)) => {
                let Some(current) = entry.as_mut() else {
                    continue;
                };
                match e.local_name().as_ref() {
                    b"link" => {
                        if let Some(link) = read_link(&e)? {
                            current.links.push(link);
                        }
                    }
                    b"cell" => current.cell = Some(read_cell(&e)?),
                    _ => {}
                }
            }
            Ok(Event::Text(e)) => {
                if let (Some(current), Some(f)) = (entry.as_mut(), field) {
                    let text = e.unescape().map_err(xml_error)?;
                    let target = match f {
                        Field::Id => &mut current.id,
                        Field::Title => &mut current.title,
                        Field::Updated => &mut current.updated,
                        Field::RowCount => &mut current.row_count,
                        Field::ColCount => &mut current.col_count,
                        Field::Cell => match current.cell.as_mut() {
                            Some(cell) => &mut cell.text,
                            None => continue,
                        },
                    };
                    if f == Field::Cell {
                        target.push_str(&text);
                    } else {
                        target.push_str(text.trim());
                    }
                }
            }
            Ok(Event::End(e)) => {
                field = None;
                if e.local_name().as_ref() == b"entry" {
                    if let Some(done) = entry.take() {
                        entries.push(done);
                    }
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(xml_error(e)),
            _ => {}
        }
    }

    Ok(entries)
}

fn parse_count(raw: &str, what: &str) -> Result<u32> {
    if raw.is_empty() {
        return Ok(0);
    }
    raw.trim()
        .parse()
        .map_err(|_| Error::decode(format!("invalid {what} '{raw}'")))
}

/// Decode the spreadsheets feed
pub fn parse_spreadsheet_feed(xml: &str) -> Result<Vec<SpreadsheetEntry>> {
    read_entries(xml)?
        .into_iter()
        .map(|raw| {
            Ok(SpreadsheetEntry {
                key: raw.key()?,
                updated: raw.updated(),
                title: raw.title,
            })
        })
        .collect()
}

/// Decode a worksheets feed
pub fn parse_worksheet_feed(xml: &str) -> Result<Vec<WorksheetEntry>> {
    read_entries(xml)?
        .into_iter()
        .map(|raw| {
            Ok(WorksheetEntry {
                key: raw.key()?,
                row_count: parse_count(&raw.row_count, "row count")?,
                col_count: parse_count(&raw.col_count, "column count")?,
                updated: raw.updated(),
                title: raw.title,
            })
        })
        .collect()
}

fn cell_from_raw(raw: RawEntry) -> Result<CellEntry> {
    let edit_url = raw.link("edit").map(str::to_string);
    let cell = raw
        .cell
        .ok_or_else(|| Error::decode(format!("cell entry '{}' has no gs:cell", raw.id)))?;

    let position = |v: Option<String>, what: &str| -> Result<u32> {
        v.as_deref()
            .and_then(|s| s.parse().ok())
            .filter(|n| *n >= 1)
            .ok_or_else(|| Error::decode(format!("cell entry '{}' has an invalid {what}", raw.id)))
    };

    Ok(CellEntry {
        row: position(cell.row, "row")?,
        col: position(cell.col, "column")?,
        numeric_value: cell.numeric_value.and_then(|n| n.parse().ok()),
        input_value: cell.input_value,
        value: cell.text,
        edit_url,
        id: raw.id,
    })
}

/// Decode a cells feed
pub fn parse_cell_feed(xml: &str) -> Result<Vec<CellEntry>> {
    read_entries(xml)?.into_iter().map(cell_from_raw).collect()
}

/// Decode a single cell entry document
pub fn parse_cell_entry(xml: &str) -> Result<CellEntry> {
    let raw = read_entries(xml)?
        .into_iter()
        .next()
        .ok_or_else(|| Error::decode("response contains no cell entry"))?;
    cell_from_raw(raw)
}

/// Render the Atom entry that sets a cell's input value.
pub fn cell_update_entry(cell: &CellEntry, edit_url: &str, input_value: &str) -> String {
    format!(
        "<?xml version='1.0' encoding='UTF-8'?>\
         <entry xmlns=\"{ATOM_NS}\" xmlns:gs=\"{SPREADSHEET_NS}\">\
         <id>{id}</id>\
         <link rel=\"edit\" type=\"application/atom+xml\" href=\"{href}\"/>\
         <gs:cell row=\"{row}\" col=\"{col}\" inputValue=\"{value}\"/>\
         </entry>",
        id = escape(&cell.id),
        href = escape(edit_url),
        row = cell.row,
        col = cell.col,
        value = escape(input_value),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SPREADSHEETS: &str = include_str!("../tests/fixtures/spreadsheets_feed.xml");
    const WORKSHEETS: &str = include_str!("../tests/fixtures/worksheets_feed.xml");
    const CELLS: &str = include_str!("../tests/fixtures/cells_feed.xml");
    const CELL: &str = include_str!("../tests/fixtures/cell_entry.xml");

    #[test]
    fn test_parse_spreadsheet_feed() {
        let entries = parse_spreadsheet_feed(SPREADSHEETS).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "0123456789ABCDEF");
        assert_eq!(entries[0].title, "This is a spreadsheet title");
        assert_eq!(
            entries[0].updated.unwrap().to_rfc3339(),
            "2012-03-01T18:40:12.345+00:00"
        );
        assert_eq!(entries[1].key, "FEDCBA9876543210");
        assert_eq!(entries[1].title, "Budget & Plans");
    }

    #[test]
    fn test_parse_worksheet_feed() {
        let entries = parse_worksheet_feed(WORKSHEETS).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].key, "od6");
        assert_eq!(entries[0].title, "Sheet1");
        assert_eq!((entries[0].row_count, entries[0].col_count), (100, 20));
        assert_eq!(entries[1].key, "osyqnsz");
        assert_eq!((entries[1].row_count, entries[1].col_count), (50, 5));
    }

    #[test]
    fn test_parse_cell_feed() {
        let cells = parse_cell_feed(CELLS).unwrap();
        assert_eq!(cells.len(), 4);

        assert_eq!((cells[0].row, cells[0].col), (1, 1));
        assert_eq!(cells[0].value, "name");
        assert_eq!(
            cells[0].edit_url.as_deref(),
            Some("https://spreadsheets.google.com/feeds/cells/0123456789ABCDEF/od6/private/full/R1C1/1a")
        );

        assert_eq!(cells[2].value, "widgets & bolts");
        assert_eq!(cells[3].input_value, "=SUM(1,2)");
        assert_eq!(cells[3].value, "3");
        assert_eq!(cells[3].numeric_value, Some(3.0));
    }

    #[test]
    fn test_parse_cell_entry() {
        let cell = parse_cell_entry(CELL).unwrap();
        assert_eq!((cell.row, cell.col), (2, 2));
        assert_eq!(cell.value, "41");
        assert_eq!(cell.numeric_value, Some(41.0));
        assert!(cell.edit_url.unwrap().ends_with("/R2C2/9z"));
    }

    #[test]
    fn test_empty_cell_element() {
        let xml = r#"<entry xmlns="http://www.w3.org/2005/Atom" xmlns:gs="http://schemas.google.com/spreadsheets/2006">
            <id>https://x/cells/k/od6/private/full/R4C2</id>
            <gs:cell row="4" col="2" inputValue=""/>
        </entry>"#;
        let cell = parse_cell_entry(xml).unwrap();
        assert_eq!((cell.row, cell.col), (4, 2));
        assert_eq!(cell.value, "");
        assert_eq!(cell.edit_url, None);
    }

    #[test]
    fn test_cell_text_keeps_whitespace() {
        let xml = r#"<feed xmlns="http://www.w3.org/2005/Atom" xmlns:gs="http://schemas.google.com/spreadsheets/2006">
            <entry>
                <id>
                    https://x/cells/k/od6/private/full/R1C1
                </id>
                <gs:cell row="1" col="1" inputValue="  padded  ">  padded  </gs:cell>
            </entry>
            <entry>
                <id>https://x/cells/k/od6/private/full/R1C2</id>
                <gs:cell row="1" col="2" inputValue="   ">   </gs:cell>
            </entry>
        </feed>"#;
        let cells = parse_cell_feed(xml).unwrap();
        assert_eq!(cells[0].id, "https://x/cells/k/od6/private/full/R1C1");
        assert_eq!(cells[0].value, "  padded  ");
        assert_eq!(cells[0].value, cells[0].input_value);
        assert_eq!(cells[1].value, "   ");
    }

    #[test]
    fn test_malformed_feeds() {
        assert!(matches!(parse_cell_entry("<feed></feed>"), Err(Error::Decode(_))));
        assert!(matches!(
            parse_cell_feed("<feed><entry><id>x</id></entry></feed>"),
            Err(Error::Decode(_))
        ));
        assert!(matches!(
            parse_worksheet_feed("<feed><entry><id>a/od6</id><rowCount>many</rowCount></entry></feed>"),
            Err(Error::Decode(_))
        ));
        assert!(parse_spreadsheet_feed("<feed><entry><id>a/b</id></title></entry></feed>").is_err());
    }

    #[test]
    fn test_cell_update_entry() {
        let cell = parse_cell_entry(CELL).unwrap();
        let edit = cell.edit_url.clone().unwrap();
        let xml = cell_update_entry(&cell, &edit, "a < \"b\" & c");

        assert!(xml.contains(r#"<gs:cell row="2" col="2" inputValue="a &lt; &quot;b&quot; &amp; c"/>"#));
        assert!(xml.contains(&format!(r#"href="{edit}""#)));

        // The rendered entry decodes back to the same position and input value
        let parsed = parse_cell_entry(&xml).unwrap();
        assert_eq!((parsed.row, parsed.col), (2, 2));
        assert_eq!(parsed.input_value, "a < \"b\" & c");
        assert_eq!(parsed.edit_url.as_deref(), Some(edit.as_str()));
    }
}
