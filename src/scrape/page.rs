//! Extracts raw daily rows from one month's page of markup.
//!
//! A data row is a `<tr>` carrying an `<abbr title="January 1, 2018">` date
//! label; its `<td>` cells hold max, min and mean temperature followed by
//! the remaining columns of the table. Header, legend and summary rows have
//! no such label and are skipped.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static DATE_LABEL: LazyLock<Selector> = LazyLock::new(|| selector("abbr[title]"));
static CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector is valid")
}

/// A candidate row: a long-form date label plus its cell texts in document order.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub date_label: String,
    pub cells: Vec<String>,
}

/// A parsed month page.
pub struct Page {
    document: Html,
}

impl Page {
    pub fn parse(markup: &str) -> Self {
        Page {
            document: Html::parse_document(markup),
        }
    }

    /// Candidate rows in document order, produced lazily.
    pub fn rows(&self) -> impl Iterator<Item = RawRow> + '_ {
        self.document.select(&ROW).filter_map(raw_row)
    }
}

fn raw_row(row: ElementRef<'_>) -> Option<RawRow> {
    let date_label = row
        .select(&DATE_LABEL)
        .next()
        .and_then(|abbr| abbr.value().attr("title"))?
        .to_string();

    let cells = row
        .select(&CELL)
        .map(|cell| cell.text().collect::<String>())
        .collect();

    Some(RawRow { date_label, cells })
}

// -- Tests -------------------------------------------------------------------
