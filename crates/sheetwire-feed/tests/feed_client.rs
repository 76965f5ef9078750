//! Legacy client end to end against scripted feed responses

use pretty_assertions::assert_eq;
use sheetwire_core::{Error, SheetsService};
use sheetwire_feed::FeedClient;
use sheetwire_http::mock::ScriptedTransport;
use sheetwire_http::{Body, ClientConfig, Method};

const SPREADSHEETS: &str = include_str!("fixtures/spreadsheets_feed.xml");
const WORKSHEETS: &str = include_str!("fixtures/worksheets_feed.xml");
const CELLS: &str = include_str!("fixtures/cells_feed.xml");
const CELL: &str = include_str!("fixtures/cell_entry.xml");

fn client(transport: &ScriptedTransport) -> FeedClient {
    let config = ClientConfig::default().with_feeds_url("https://spreadsheets.google.com/feeds");
    FeedClient::with_transport(config, transport.clone())
}

#[test]
fn test_open_by_title() {
    let transport = ScriptedTransport::new().respond(200, SPREADSHEETS);
    let client = client(&transport);

    let spreadsheet = client.open("Budget & Plans").unwrap();
    assert_eq!(spreadsheet.key(), "FEDCBA9876543210");
    assert_eq!(spreadsheet.title(), Some("Budget & Plans"));
}

#[test]
fn test_open_missing_title() {
    let transport = ScriptedTransport::new().respond(200, SPREADSHEETS);
    let client = client(&transport);

    let err = client
        .open("Please don't use this phrase as a name of a sheet.")
        .unwrap_err();
    assert!(matches!(err, Error::SpreadsheetNotFound(_)));
}

#[test]
fn test_open_all_filters_by_title() {
    let transport = ScriptedTransport::new()
        .respond(200, SPREADSHEETS)
        .respond(200, SPREADSHEETS);
    let client = client(&transport);

    assert_eq!(client.open_all(None).unwrap().len(), 2);
    let matching = client.open_all(Some("This is a spreadsheet title")).unwrap();
    assert_eq!(matching.len(), 1);
    assert_eq!(matching[0].key(), "0123456789ABCDEF");
}

#[test]
fn test_open_by_key_resolves_title_on_refresh() {
    let transport = ScriptedTransport::new().respond(200, SPREADSHEETS);
    let client = client(&transport);

    let mut spreadsheet = client.open_by_key("0123456789ABCDEF");
    assert_eq!(spreadsheet.title(), None);
    assert!(transport.requests().is_empty());

    assert_eq!(spreadsheet.refresh().unwrap(), "This is a spreadsheet title");
    assert_eq!(spreadsheet.title(), Some("This is a spreadsheet title"));
}

#[test]
fn test_worksheets_are_cached_until_invalidated() {
    let transport = ScriptedTransport::new()
        .respond(200, WORKSHEETS)
        .respond(200, WORKSHEETS);
    let client = client(&transport);
    let mut spreadsheet = client.open_by_key("0123456789ABCDEF");

    let sheets = spreadsheet.worksheets().unwrap();
    assert_eq!(
        sheets.iter().map(|w| w.title()).collect::<Vec<_>>(),
        vec!["Sheet1", "Totals"]
    );
    assert_eq!(spreadsheet.sheet1().unwrap().id(), "od6");
    assert_eq!(spreadsheet.worksheet("Totals").unwrap().gid().unwrap(), "1751403737");
    assert!(spreadsheet.get_worksheet(5).unwrap().is_none());
    assert!(matches!(
        spreadsheet.worksheet("Missing"),
        Err(Error::WorksheetNotFound(_))
    ));
    assert_eq!(transport.requests().len(), 1);

    spreadsheet.invalidate_worksheets();
    spreadsheet.worksheets().unwrap();
    assert_eq!(transport.requests().len(), 2);
}

#[test]
fn test_get_all_values_is_rectangular() {
    let transport = ScriptedTransport::new()
        .respond(200, WORKSHEETS)
        .respond(200, CELLS);
    let client = client(&transport);
    let mut spreadsheet = client.open_by_key("0123456789ABCDEF");
    let sheet = spreadsheet.sheet1().unwrap();

    let values = sheet.get_all_values().unwrap();
    assert_eq!(
        values,
        vec![
            vec!["name", "", "total"],
            vec!["widgets & bolts", "", ""],
            vec!["", "", "3"],
        ]
    );
    assert_eq!(
        transport.last_request().unwrap().url,
        "https://spreadsheets.google.com/feeds/cells/0123456789ABCDEF/od6/private/full"
    );
}

#[test]
fn test_row_and_col_values_keep_gaps() {
    let transport = ScriptedTransport::new()
        .respond(200, WORKSHEETS)
        .respond(200, CELLS)
        .respond(200, CELLS);
    let client = client(&transport);
    let mut spreadsheet = client.open_by_key("0123456789ABCDEF");
    let sheet = spreadsheet.sheet1().unwrap();

    assert_eq!(
        sheet.row_values(1).unwrap(),
        vec![Some("name".to_string()), None, Some("total".to_string())]
    );
    assert_eq!(
        sheet.col_values(3).unwrap(),
        vec![Some("total".to_string()), None, Some("3".to_string())]
    );
}

#[test]
fn test_acell_reads_single_entry() {
    let transport = ScriptedTransport::new()
        .respond(200, WORKSHEETS)
        .respond(200, CELL);
    let client = client(&transport);
    let mut spreadsheet = client.open_by_key("0123456789ABCDEF");
    let sheet = spreadsheet.sheet1().unwrap();

    let cell = sheet.acell("B2").unwrap();
    assert_eq!((cell.row, cell.col), (2, 2));
    assert_eq!(cell.numeric_value(), Some(41.0));
    assert_eq!(
        transport.last_request().unwrap().url,
        "https://spreadsheets.google.com/feeds/cells/0123456789ABCDEF/od6/private/full/R2C2"
    );

    assert!(matches!(sheet.acell("2B"), Err(Error::InvalidLabel(_))));
}

#[test]
fn test_update_acell_puts_to_edit_link() {
    let transport = ScriptedTransport::new()
        .respond(200, WORKSHEETS)
        .respond(200, CELL)
        .respond(200, CELL);
    let client = client(&transport);
    let mut spreadsheet = client.open_by_key("0123456789ABCDEF");
    let sheet = spreadsheet.sheet1().unwrap();

    sheet.update_acell("B2", "<42>").unwrap();

    let put = transport.last_request().unwrap();
    assert_eq!(put.method, Method::Put);
    assert!(put.url.ends_with("/R2C2/9z"));
    match put.body {
        Body::Text { content_type, text } => {
            assert_eq!(content_type, "application/atom+xml");
            assert!(text.contains(r#"inputValue="&lt;42&gt;""#));
        }
        other => panic!("unexpected body {other:?}"),
    }
}

#[test]
fn test_api_error_status_is_kept() {
    let transport = ScriptedTransport::new().respond(404, "Not Found");
    let client = client(&transport);

    let err = client.worksheets_feed("nope").unwrap_err();
    assert_eq!(err.status_code(), Some(404));
}

#[test]
fn test_service_interface() {
    let transport = ScriptedTransport::new()
        .respond(200, SPREADSHEETS)
        .respond(200, WORKSHEETS)
        .respond(200, CELLS);
    let client = client(&transport);

    let spreadsheet = client.find_spreadsheet("Budget & Plans").unwrap();
    let worksheet = client.find_worksheet(&spreadsheet.id, "Totals").unwrap();
    assert_eq!((worksheet.row_count, worksheet.col_count), (50, 5));

    let grid = client.read_grid(&spreadsheet.id, &worksheet).unwrap();
    assert_eq!(grid.len(), 3);
    assert!(grid.iter().all(|row| row.len() == 3));
}
