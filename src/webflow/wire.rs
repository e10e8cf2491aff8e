use serde::{Deserialize, Serialize};

use crate::holders::ShareholderRecord;

/* --------- Minimal serde mapping for the collection items API --------- */

#[derive(Deserialize)]
pub(crate) struct ItemList {
    #[serde(default)]
    pub(crate) items: Vec<ItemRef>,
}

/// An existing collection item, as much of it as the clear phase needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemRef {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct CreateItem<'a> {
    pub(crate) fields: &'a ItemFields,
}

#[derive(Deserialize)]
pub(crate) struct CreatedItem {
    #[serde(rename = "_id", default)]
    pub(crate) id: Option<String>,
}

#[derive(Serialize)]
pub(crate) struct PublishSite {
    pub(crate) domains: Vec<String>,
}

/// Field payload of one shareholder item in the collection schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemFields {
    pub name: String,
    #[serde(rename = "surname-company")]
    pub surname_company: String,
    #[serde(rename = "first-name")]
    pub first_name: String,
    pub holdings: String,
    pub percentage: String,
    pub rank: u32,
    pub slug: String,
}

impl From<&ShareholderRecord> for ItemFields {
    fn from(r: &ShareholderRecord) -> Self {
        Self {
            name: r.display_name(),
            surname_company: r.surname_company.clone(),
            first_name: r.first_name.clone(),
            holdings: r.holdings.clone(),
            percentage: r.percent.clone(),
            rank: r.rank,
            slug: format!("shareholder-{}", r.rank),
        }
    }
}
