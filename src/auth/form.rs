//! Form discovery on registry pages.

use indexmap::IndexMap;
use scraper::Html;
use url::Url;

use crate::core::Error;
use crate::core::html::selector;

/// Ordered form body. Inserting an existing name replaces its value in place.
pub type FormFields = IndexMap<String, String>;

/// The parts of a page needed to submit one of its forms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PageForm {
    /// Raw `action` attribute, if any.
    pub action: Option<String>,
    /// Every named hidden input on the page, in document order.
    pub hidden: FormFields,
}

/// Locate a form by `id`, falling back to the first form on the page.
/// Returns `None` when the page has no form at all.
pub(crate) fn find_form(html: &str, form_id: Option<&str>) -> Result<Option<PageForm>, Error> {
    let doc = Html::parse_document(html);
    let forms = selector("form")?;

    let by_id = form_id.filter(|id| !id.is_empty()).and_then(|id| {
        doc.select(&forms)
            .find(|f| f.value().attr("id") == Some(id))
    });
    let Some(form) = by_id.or_else(|| doc.select(&forms).next()) else {
        return Ok(None);
    };

    Ok(Some(PageForm {
        action: form.value().attr("action").map(str::to_string),
        hidden: hidden_fields(&doc)?,
    }))
}

fn hidden_fields(doc: &Html) -> Result<FormFields, Error> {
    let sel = selector(r#"input[type="hidden"]"#)?;
    let mut out = FormFields::new();
    for input in doc.select(&sel) {
        let attrs = input.value();
        if let Some(name) = attrs.attr("name").filter(|n| !n.is_empty()) {
            out.insert(name.to_string(), attrs.attr("value").unwrap_or_default().to_string());
        }
    }
    Ok(out)
}

/// Resolve a form action against the site root; empty or missing means `fallback`.
pub(crate) fn resolve_action(
    action: Option<&str>,
    site_root: &Url,
    fallback: &Url,
) -> Result<Url, Error> {
    match action.map(str::trim).filter(|a| !a.is_empty()) {
        Some(a) => Ok(site_root.join(a)?),
        None => Ok(fallback.clone()),
    }
}

/// Leading fields first, page hidden fields merged after them.
pub(crate) fn merge_fields<'a, I>(leading: I, hidden: &FormFields) -> FormFields
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut body: FormFields = leading
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    for (k, v) in hidden {
        body.insert(k.clone(), v.clone());
    }
    body
}
