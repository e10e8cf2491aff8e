use scraper::{ElementRef, Selector};

use super::Error;

pub(crate) fn selector(css: &str) -> Result<Selector, Error> {
    Selector::parse(css).map_err(|e| Error::Data(format!("bad selector `{css}`: {e:?}")))
}

/// Text of an element with each text node trimmed and the pieces joined.
pub(crate) fn stripped_text(el: &ElementRef<'_>) -> String {
    el.text().map(str::trim).collect()
}
