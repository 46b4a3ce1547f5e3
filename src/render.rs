//! Result rendering into display trees.
//!
//! Turns search records into cards for the generic list and the categorized
//! view. The trees are plain data; `ui` draws them in the terminal and
//! `Display` prints them for `--print`.

use crate::hub::models::{BudgetRecord, Category, LegalInstrument, NewsItem};
use crate::hub::SearchResultItem;
use crate::i18n::{Direction, Language, t};
use std::fmt;

/// Number of cards shown by the generic list.
pub const GENERIC_LIST_LIMIT: usize = 24;

const SEPARATOR: &str = " • ";

/// Outbound link attached to a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub label: String,
    pub url: String,
}

/// A rendered record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Card {
    /// Short tags shown before the heading
    pub badges: Vec<String>,
    pub heading: String,
    /// Secondary line (dates, outlet, countries)
    pub meta: Option<String>,
    /// Summary or description
    pub body: Option<String>,
    pub link: Option<Link>,
}

/// Generic list result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// No records; the message replaces the list
    Empty { message: String },
    Cards(Vec<Card>),
}

/// One counter of the summary row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Counter {
    pub label: String,
    pub value: usize,
}

/// Section of the categorized view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub category: Category,
    pub heading: String,
    pub cards: Vec<Card>,
}

/// Categorized view: counters plus one section per record type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorizedView {
    /// Layout direction of the whole view
    pub direction: Direction,
    pub title: String,
    /// Total first, then budgets, news, legal
    pub counters: Vec<Counter>,
    /// Budget, news and legal sections, in that order
    pub sections: Vec<Section>,
}

/// Records split by type, relative order preserved.
#[derive(Debug, Default)]
pub struct Buckets<'a> {
    pub budgets: Vec<&'a BudgetRecord>,
    pub news: Vec<&'a NewsItem>,
    pub legal: Vec<&'a LegalInstrument>,
    /// All records, unknown types included
    pub total: usize,
}

impl Buckets<'_> {
    /// Number of records in a category.
    pub fn count(&self, category: Category) -> usize {
        match category {
            Category::Budget => self.budgets.len(),
            Category::News => self.news.len(),
            Category::Legal => self.legal.len(),
        }
    }
}

/// Split records into budget, news and legal buckets.
///
/// # Details
/// Unknown record types land in no bucket but still count towards `total`.
pub fn partition(items: &[SearchResultItem]) -> Buckets<'_> {
    let mut buckets = Buckets {
        total: items.len(),
        ..Buckets::default()
    };

    for item in items {
        match item {
            SearchResultItem::Budget(budget) => buckets.budgets.push(budget),
            SearchResultItem::News(news) => buckets.news.push(news),
            SearchResultItem::Legal(legal) => buckets.legal.push(legal),
            SearchResultItem::Other(_) => {}
        }
    }

    buckets
}

/// Render the generic list.
///
/// # Arguments
/// * `items` - Records from the last search
/// * `lang` - Interface language
///
/// # Returns
/// * `ListView` - Up to `GENERIC_LIST_LIMIT` cards, or the empty-state message
pub fn render_list(items: &[SearchResultItem], lang: &Language) -> ListView {
    if items.is_empty() {
        return ListView::Empty {
            message: t(lang, "results.none").to_string(),
        };
    }

    ListView::Cards(
        items
            .iter()
            .take(GENERIC_LIST_LIMIT)
            .map(|item| generic_card(item, lang))
            .collect(),
    )
}

/// Render the categorized view.
///
/// # Arguments
/// * `items` - Records from the last search
/// * `lang` - Interface language; `ar` makes the view right-to-left
pub fn render_categorized(items: &[SearchResultItem], lang: &Language) -> CategorizedView {
    let buckets = partition(items);

    let mut counters = vec![Counter {
        label: t(lang, "kpi.items").to_string(),
        value: buckets.total,
    }];
    counters.extend(Category::ALL.iter().map(|&category| Counter {
        label: t(lang, category.counter_key()).to_string(),
        value: buckets.count(category),
    }));

    let sections = Category::ALL
        .iter()
        .map(|&category| {
            let cards: Vec<Card> = match category {
                Category::Budget => buckets.budgets.iter().map(|b| budget_card(b, lang)).collect(),
                Category::News => buckets.news.iter().map(|n| news_card(n, lang)).collect(),
                Category::Legal => buckets.legal.iter().map(|l| legal_card(l, lang)).collect(),
            };
            Section {
                category,
                heading: t(lang, category.heading_key()).to_string(),
                cards,
            }
        })
        .collect();

    CategorizedView {
        direction: lang.direction(),
        title: t(lang, "title").to_string(),
        counters,
        sections,
    }
}

/// Uniform card used by the generic list.
pub fn generic_card(item: &SearchResultItem, lang: &Language) -> Card {
    let display = item.display();

    let secondary = display
        .country
        .as_deref()
        .or(display.source.as_deref())
        .unwrap_or_default();

    let heading = display
        .title
        .as_deref()
        .or(display.name.as_deref())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| t(lang, "card.untitled"));

    let body = display
        .summary
        .as_deref()
        .or(display.description.as_deref())
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Card {
        badges: vec![
            item.type_label().unwrap_or("item").to_string(),
            secondary.to_string(),
        ],
        heading: heading.to_string(),
        meta: display
            .credibility_score
            .map(|score| format!("{}: {:.0}%", t(lang, "card.credibility"), score * 100.0)),
        body,
        link: link_for(display.url.as_deref(), lang),
    }
}

fn budget_card(budget: &BudgetRecord, lang: &Language) -> Card {
    let amount = join_present(
        [
            budget.currency.clone(),
            budget.amount_original.map(|a| a.to_string()),
        ],
        " ",
    );
    let heading = join_present(
        [budget.segment.as_deref().map(str::to_uppercase), amount],
        SEPARATOR,
    );
    let countries = budget
        .countries_involved
        .as_ref()
        .filter(|c| !c.is_empty())
        .map(|c| c.join(", "));

    Card {
        badges: Vec::new(),
        heading: heading.unwrap_or_else(|| t(lang, "card.untitled").to_string()),
        meta: join_present([budget.date.clone(), countries], SEPARATOR),
        body: budget.summaries.for_language(lang).map(str::to_string),
        link: link_for(budget.display.url.as_deref(), lang),
    }
}

fn news_card(news: &NewsItem, lang: &Language) -> Card {
    let heading = join_present([news.display.title.clone(), news.date.clone()], SEPARATOR);

    Card {
        badges: Vec::new(),
        heading: heading.unwrap_or_else(|| t(lang, "card.untitled").to_string()),
        meta: news.outlet.clone().filter(|s| !s.is_empty()),
        body: news.summaries.for_language(lang).map(str::to_string),
        link: link_for(news.display.url.as_deref(), lang),
    }
}

fn legal_card(legal: &LegalInstrument, lang: &Language) -> Card {
    let heading = join_present(
        [
            legal.instrument_type.as_deref().map(str::to_uppercase),
            legal.display.title.clone(),
        ],
        SEPARATOR,
    );

    Card {
        badges: Vec::new(),
        heading: heading.unwrap_or_else(|| t(lang, "card.untitled").to_string()),
        meta: join_present(
            [
                legal.country_id.clone(),
                legal.adoption_date.clone(),
                legal.number.clone(),
            ],
            SEPARATOR,
        ),
        body: legal.summaries.for_language(lang).map(str::to_string),
        link: link_for(legal.display.url.as_deref(), lang),
    }
}

fn link_for(url: Option<&str>, lang: &Language) -> Option<Link> {
    url.filter(|u| !u.trim().is_empty()).map(|u| Link {
        label: t(lang, "card.open_source").to_string(),
        url: u.trim().to_string(),
    })
}

/// Join the non-empty parts with `sep`, None when nothing is left.
fn join_present<const N: usize>(parts: [Option<String>; N], sep: &str) -> Option<String> {
    let parts: Vec<String> = parts
        .into_iter()
        .flatten()
        .filter(|p| !p.trim().is_empty())
        .collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join(sep))
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let badges: Vec<&str> = self
            .badges
            .iter()
            .map(String::as_str)
            .filter(|b| !b.is_empty())
            .collect();
        if badges.is_empty() {
            writeln!(f, "  {}", self.heading)?;
        } else {
            writeln!(f, "  [{}] {}", badges.join("] ["), self.heading)?;
        }
        if let Some(meta) = &self.meta {
            writeln!(f, "    {}", meta)?;
        }
        if let Some(body) = &self.body {
            writeln!(f, "    {}", body)?;
        }
        if let Some(link) = &self.link {
            writeln!(f, "    {} {}", link.label, link.url)?;
        }
        Ok(())
    }
}

impl fmt::Display for ListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ListView::Empty { message } => writeln!(f, "{}", message),
            ListView::Cards(cards) => cards.iter().try_for_each(|card| write!(f, "{}", card)),
        }
    }
}

impl fmt::Display for CategorizedView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} [{}]", self.title, self.direction.as_str())?;
        let counters: Vec<String> = self
            .counters
            .iter()
            .map(|c| format!("{}: {}", c.label, c.value))
            .collect();
        writeln!(f, "{}", counters.join(" | "))?;
        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "## {} ({})", section.heading, section.cards.len())?;
            for card in &section.cards {
                write!(f, "{}", card)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hub::models::normalize_items;
    use serde_json::json;

    fn items(value: serde_json::Value) -> Vec<SearchResultItem> {
        normalize_items(value).unwrap()
    }

    fn mixed_items() -> Vec<SearchResultItem> {
        items(json!([
            {"type": "budget", "segment": "rail", "currency": "EUR", "amount_original": 1200000,
             "date": "2025-03-01", "countries_involved": ["IL", "JO"],
             "summary_fr": "Ligne Haïfa-Amman"},
            {"type": "news", "title": "Port deal signed", "date": "2025-05-02", "outlet": "Reuters",
             "summary_en": "Deal signed"},
            {"type": "event", "title": "Corridor summit"},
            {"type": "budget", "segment": "port", "currency": "USD", "amount_original": 500000000,
             "date": "2025-09-01", "countries_involved": ["AE"]},
            {"type": "legal", "title": "Rail Interoperability Regulation",
             "instrument_type": "regulation", "country_id": "IL", "adoption_date": "2025-04-12"}
        ]))
    }

    #[test]
    fn test_partition_counts() {
        let items = mixed_items();
        let buckets = partition(&items);
        assert_eq!(buckets.budgets.len(), 2);
        assert_eq!(buckets.news.len(), 1);
        assert_eq!(buckets.legal.len(), 1);
        assert_eq!(buckets.total, 5);
        // relative order within a bucket is preserved
        assert_eq!(buckets.budgets[0].segment.as_deref(), Some("rail"));
        assert_eq!(buckets.budgets[1].segment.as_deref(), Some("port"));
    }

    #[test]
    fn test_categorized_counters_and_sections() {
        let view = render_categorized(&mixed_items(), &Language::En);
        let values: Vec<usize> = view.counters.iter().map(|c| c.value).collect();
        assert_eq!(values, vec![5, 2, 1, 1]);
        assert_eq!(view.title, "Integrated IMEC view");
        let headings: Vec<&str> = view.sections.iter().map(|s| s.heading.as_str()).collect();
        assert_eq!(headings, vec!["Recent budgets", "Latest news", "Legal framework"]);
    }

    #[test]
    fn test_categorized_direction() {
        let items = mixed_items();
        assert_eq!(render_categorized(&items, &Language::Ar).direction, Direction::Rtl);
        assert_eq!(render_categorized(&items, &Language::Fr).direction, Direction::Ltr);
        assert_eq!(render_categorized(&items, &Language::En).direction, Direction::Ltr);
    }

    #[test]
    fn test_type_specific_layouts() {
        let view = render_categorized(&mixed_items(), &Language::Fr);

        let budget = &view.sections[0].cards[0];
        assert_eq!(budget.heading, "RAIL • EUR 1200000");
        assert_eq!(budget.meta.as_deref(), Some("2025-03-01 • IL, JO"));
        assert_eq!(budget.body.as_deref(), Some("Ligne Haïfa-Amman"));

        let news = &view.sections[1].cards[0];
        assert_eq!(news.heading, "Port deal signed • 2025-05-02");
        assert_eq!(news.meta.as_deref(), Some("Reuters"));

        let legal = &view.sections[2].cards[0];
        assert_eq!(legal.heading, "REGULATION • Rail Interoperability Regulation");
        assert_eq!(legal.meta.as_deref(), Some("IL • 2025-04-12"));
    }

    #[test]
    fn test_summary_is_not_taken_from_other_language() {
        let view = render_categorized(&mixed_items(), &Language::Fr);
        // The news item only has an English summary.
        assert_eq!(view.sections[1].cards[0].body, None);

        let view = render_categorized(&mixed_items(), &Language::En);
        assert_eq!(view.sections[1].cards[0].body.as_deref(), Some("Deal signed"));
    }

    #[test]
    fn test_generic_list_empty_state() {
        let view = render_list(&[], &Language::Fr);
        assert_eq!(
            view,
            ListView::Empty {
                message: "Aucun résultat.".to_string()
            }
        );
    }

    #[test]
    fn test_generic_list_is_capped() {
        let records: Vec<serde_json::Value> = (0..30)
            .map(|i| json!({"type": "news", "title": format!("Item {}", i)}))
            .collect();
        let ListView::Cards(cards) = render_list(&items(json!(records)), &Language::En) else {
            panic!("expected cards");
        };
        assert_eq!(cards.len(), GENERIC_LIST_LIMIT);
        assert_eq!(cards[23].heading, "Item 23");
    }

    #[test]
    fn test_generic_card_fields() {
        let records = items(json!([
            {"type": "event", "name": "Summit", "description": "Leaders meet",
             "source": "gov", "url": "https://example.org/s", "credibility_score": 0.8},
            {"summary": "No title here"}
        ]));

        let card = generic_card(&records[0], &Language::En);
        assert_eq!(card.badges, vec!["event".to_string(), "gov".to_string()]);
        assert_eq!(card.heading, "Summit");
        assert_eq!(card.meta.as_deref(), Some("Credibility: 80%"));
        assert_eq!(card.body.as_deref(), Some("Leaders meet"));
        assert_eq!(
            card.link,
            Some(Link {
                label: "Open source →".to_string(),
                url: "https://example.org/s".to_string()
            })
        );

        let card = generic_card(&records[1], &Language::Fr);
        assert_eq!(card.badges[0], "item");
        assert_eq!(card.heading, "(sans titre)");
        assert!(card.meta.is_none());
        assert!(card.link.is_none());
    }

    #[test]
    fn test_plain_text_output() {
        let text = render_categorized(&mixed_items(), &Language::Ar).to_string();
        assert!(text.starts_with("نظرة متكاملة على IMEC [rtl]"));
        assert!(text.contains("## أحدث الميزانيات (2)"));
    }
}
