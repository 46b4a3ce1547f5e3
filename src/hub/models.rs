//! IMEC Hub search API models.
//!
//! Records returned by `/search`, discriminated by their `type` field.

use crate::i18n::Language;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

/// Record category shown as a section of the categorized view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Budget,
    News,
    Legal,
}

impl Category {
    /// Section order of the categorized view.
    pub const ALL: [Category; 3] = [Category::Budget, Category::News, Category::Legal];

    /// Discriminant value carried in the `type` field of a record.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Budget => "budget",
            Category::News => "news",
            Category::Legal => "legal",
        }
    }

    /// Localization key of the section heading.
    pub fn heading_key(self) -> &'static str {
        match self {
            Category::Budget => "budgets",
            Category::News => "news",
            Category::Legal => "legal",
        }
    }

    /// Localization key of the counter label.
    pub fn counter_key(self) -> &'static str {
        match self {
            Category::Budget => "kpi.budgets",
            Category::News => "kpi.news",
            Category::Legal => "kpi.legal",
        }
    }

    /// Value of the `type` query parameter understood by `/search`.
    ///
    /// # Details
    /// The backend filters budgets with the plural `budgets`.
    pub fn filter_param(self) -> &'static str {
        match self {
            Category::Budget => "budgets",
            Category::News => "news",
            Category::Legal => "legal",
        }
    }

    /// Next section, wrapping around.
    pub fn next(self) -> Self {
        match self {
            Category::Budget => Category::News,
            Category::News => Category::Legal,
            Category::Legal => Category::Budget,
        }
    }
}

/// Per-language summaries attached to hub records.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LocalizedSummaries {
    #[serde(deserialize_with = "lenient_string")]
    pub summary_fr: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub summary_en: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub summary_ar: Option<String>,
}

impl LocalizedSummaries {
    /// Summary matching the interface language.
    ///
    /// # Returns
    /// * `Option<&str>` - The summary, or None when that language's summary is
    ///   missing or empty. Other languages are never substituted.
    pub fn for_language(&self, lang: &Language) -> Option<&str> {
        let summary = match lang {
            Language::Fr => self.summary_fr.as_deref(),
            Language::En => self.summary_en.as_deref(),
            Language::Ar => self.summary_ar.as_deref(),
            Language::Other(_) => None,
        };
        summary.filter(|s| !s.trim().is_empty())
    }
}

/// Free-form display fields any record may carry.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct DisplayFields {
    #[serde(deserialize_with = "lenient_string")]
    pub title: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub summary: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub description: Option<String>,
    /// Outbound link to the source document
    #[serde(deserialize_with = "lenient_string")]
    pub url: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub country: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub source: Option<String>,
    /// Source credibility between 0 and 1
    #[serde(deserialize_with = "lenient_number")]
    pub credibility_score: Option<f64>,
}

/// Budget line (`type = "budget"`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct BudgetRecord {
    /// Corridor segment: rail, port, energy, data, customs
    #[serde(deserialize_with = "lenient_string")]
    pub segment: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub currency: Option<String>,
    #[serde(deserialize_with = "lenient_number")]
    pub amount_original: Option<f64>,
    #[serde(deserialize_with = "lenient_string")]
    pub date: Option<String>,
    /// Country identifiers, in backend order
    #[serde(deserialize_with = "lenient_list")]
    pub countries_involved: Option<Vec<String>>,
    #[serde(flatten)]
    pub summaries: LocalizedSummaries,
    #[serde(flatten)]
    pub display: DisplayFields,
}

/// News article (`type = "news"`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct NewsItem {
    #[serde(deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub outlet: Option<String>,
    #[serde(flatten)]
    pub summaries: LocalizedSummaries,
    #[serde(flatten)]
    pub display: DisplayFields,
}

/// Legal instrument (`type = "legal"`).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct LegalInstrument {
    /// law, decree, regulation, policy, mou, ...
    #[serde(deserialize_with = "lenient_string")]
    pub instrument_type: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub country_id: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub adoption_date: Option<String>,
    #[serde(deserialize_with = "lenient_string")]
    pub number: Option<String>,
    #[serde(flatten)]
    pub summaries: LocalizedSummaries,
    #[serde(flatten)]
    pub display: DisplayFields,
}

/// Record with a missing or unrecognised `type`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UnknownItem {
    /// Raw `type` value, if any
    pub kind: Option<String>,
    pub display: DisplayFields,
}

/// One record returned by the search endpoint.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResultItem {
    Budget(BudgetRecord),
    News(NewsItem),
    Legal(LegalInstrument),
    Other(UnknownItem),
}

impl SearchResultItem {
    /// Category of the record, None for unknown types.
    pub fn category(&self) -> Option<Category> {
        match self {
            SearchResultItem::Budget(_) => Some(Category::Budget),
            SearchResultItem::News(_) => Some(Category::News),
            SearchResultItem::Legal(_) => Some(Category::Legal),
            SearchResultItem::Other(_) => None,
        }
    }

    /// Value of the `type` field as received.
    pub fn type_label(&self) -> Option<&str> {
        match self {
            SearchResultItem::Other(item) => item.kind.as_deref(),
            known => known.category().map(Category::as_str),
        }
    }

    /// Generic display fields of the record.
    pub fn display(&self) -> &DisplayFields {
        match self {
            SearchResultItem::Budget(item) => &item.display,
            SearchResultItem::News(item) => &item.display,
            SearchResultItem::Legal(item) => &item.display,
            SearchResultItem::Other(item) => &item.display,
        }
    }
}

impl<'de> Deserialize<'de> for SearchResultItem {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let kind = value.get("type").and_then(Value::as_str).map(str::to_owned);

        let item = match kind.as_deref() {
            Some("budget") => BudgetRecord::deserialize(&value).map(SearchResultItem::Budget),
            Some("news") => NewsItem::deserialize(&value).map(SearchResultItem::News),
            Some("legal") => LegalInstrument::deserialize(&value).map(SearchResultItem::Legal),
            _ => Ok(SearchResultItem::Other(UnknownItem {
                kind: kind.clone(),
                display: display_fields(&value),
            })),
        };

        let item = item.unwrap_or_else(|err| {
            warn!(?kind, error = %err, "record does not match its type, showing it as generic");
            SearchResultItem::Other(UnknownItem {
                kind,
                display: display_fields(&value),
            })
        });

        Ok(item)
    }
}

/// Display fields of a record, empty when the value is not an object.
fn display_fields(value: &Value) -> DisplayFields {
    DisplayFields::deserialize(value).unwrap_or_default()
}

/// Text field that also accepts numbers and booleans.
///
/// # Details
/// Arrays, objects and null decode as None.
fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    })
}

/// Numeric field that also accepts numeric strings such as `"1200000"`.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    })
}

/// List of identifiers; a single string becomes a one-element list.
fn lenient_list<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Array(values) => Some(
            values
                .into_iter()
                .filter_map(|v| match v {
                    Value::String(s) => Some(s),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .collect(),
        ),
        Value::String(s) => Some(vec![s]),
        _ => None,
    })
}

/// Normalize a `/search` payload into a list of records.
///
/// # Arguments
/// * `payload` - Parsed response body
///
/// # Returns
/// * `serde_json::Result<Vec<SearchResultItem>>` - Records or a decoding error
///
/// # Details
/// Accepts either a bare array or an object with an `items` array. A missing
/// or null `items` field yields an empty list, as does any other JSON value.
pub fn normalize_items(payload: Value) -> serde_json::Result<Vec<SearchResultItem>> {
    let items = match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("items") {
            Some(Value::Array(items)) => items,
            Some(Value::Null) | None => Vec::new(),
            Some(other) => {
                return Err(serde_json::Error::custom(format!(
                    "`items` must be an array, found {}",
                    other
                )));
            }
        },
        _ => Vec::new(),
    };

    items.into_iter().map(serde_json::from_value).collect()
}
