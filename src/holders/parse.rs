//! Pure parsing of the shareholder table.

use scraper::{ElementRef, Html};
use tracing::{debug, warn};

use super::model::{RowError, ShareholderRecord};
use crate::core::Error;
use crate::core::client::constants::INVESTOR_ROW_PREFIX;
use crate::core::html::{selector, stripped_text};

/// Strip whitespace and thousands-separator commas: `"1\u{a0}234"` -> `"1234"`.
///
/// Any Unicode space counts as a separator, so ASCII, no-break and narrow
/// no-break spaces are all removed.
pub fn normalize_holdings(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .collect()
}

/// Drop a trailing `%` and use a dot decimal separator: `"12,5%"` -> `"12.5"`.
pub fn normalize_percent(raw: &str) -> String {
    let t = raw.trim();
    let t = t.strip_suffix('%').unwrap_or(t);
    t.trim().replace(',', ".")
}

/// Parse up to `max` investor rows from the page, in document order.
///
/// Rank is the 1-based loop position, so a skipped row leaves a gap.
pub fn parse_shareholder_table(html: &str, max: usize) -> Result<Vec<ShareholderRecord>, Error> {
    let doc = Html::parse_document(html);
    let rows_sel = selector(&format!(r#"tr[id^="{INVESTOR_ROW_PREFIX}"]"#))?;
    let cells_sel = selector("td")?;

    let rows: Vec<ElementRef<'_>> = doc.select(&rows_sel).collect();
    debug!("Found {} investor rows", rows.len());

    let mut out = Vec::with_capacity(rows.len().min(max));
    for (i, row) in rows.into_iter().take(max).enumerate() {
        let rank = u32::try_from(i + 1).unwrap_or(u32::MAX);
        match parse_row(&row, &cells_sel, rank) {
            Ok(rec) => {
                debug!(?rec, "Extracted");
                out.push(rec);
            }
            Err(e) => warn!(
                row = row.value().attr("id").unwrap_or_default(),
                "Skipping row {}: {e}",
                i + 1
            ),
        }
    }
    Ok(out)
}

fn parse_row(
    row: &ElementRef<'_>,
    cells_sel: &scraper::Selector,
    rank: u32,
) -> Result<ShareholderRecord, RowError> {
    let cells: Vec<String> = row.select(cells_sel).map(|td| stripped_text(&td)).collect();
    let [surname_company, first_name, holdings, percent, ..] = cells.as_slice() else {
        return Err(RowError::TooFewCells { found: cells.len() });
    };

    Ok(ShareholderRecord {
        rank,
        surname_company: surname_company.clone(),
        first_name: first_name.clone(),
        holdings: normalize_holdings(holdings),
        percent: normalize_percent(percent),
    })
}
