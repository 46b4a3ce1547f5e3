//! UI localization for the hub browser.
//!
//! Static label tables for French, English and Arabic, plus the language and
//! text direction types used by the renderer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Interface language selected by the user.
///
/// Unknown codes are kept as `Other` so that lookups fall back to raw keys
/// instead of failing.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Language {
    #[default]
    Fr,
    En,
    Ar,
    Other(String),
}

/// Layout direction of a rendered view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Left-to-right
    Ltr,
    /// Right-to-left
    Rtl,
}

impl Direction {
    /// HTML-style attribute value (`ltr` / `rtl`).
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Ltr => "ltr",
            Direction::Rtl => "rtl",
        }
    }
}

impl Language {
    /// Parse a language code such as `fr`, `EN` or ` ar `.
    ///
    /// # Arguments
    /// * `code` - Language code, case-insensitive
    ///
    /// # Returns
    /// * `Language` - Known language or `Other` with the normalized code
    pub fn from_code(code: &str) -> Self {
        let code = code.trim().to_lowercase();
        match code.as_str() {
            "fr" => Language::Fr,
            "en" => Language::En,
            "ar" => Language::Ar,
            _ => Language::Other(code),
        }
    }

    /// Language code as used in the `lang` parameter.
    pub fn code(&self) -> &str {
        match self {
            Language::Fr => "fr",
            Language::En => "en",
            Language::Ar => "ar",
            Language::Other(code) => code,
        }
    }

    /// Text direction for this language. Only Arabic is right-to-left.
    pub fn direction(&self) -> Direction {
        match self {
            Language::Ar => Direction::Rtl,
            _ => Direction::Ltr,
        }
    }

    /// Next language in the FR -> EN -> AR cycle.
    ///
    /// # Details
    /// Unknown languages restart the cycle at French.
    pub fn next(&self) -> Self {
        match self {
            Language::Fr => Language::En,
            Language::En => Language::Ar,
            Language::Ar | Language::Other(_) => Language::Fr,
        }
    }

    /// Languages offered in the navigation bar.
    pub fn selectable() -> [Language; 3] {
        [Language::Fr, Language::En, Language::Ar]
    }
}

impl From<String> for Language {
    fn from(code: String) -> Self {
        Language::from_code(&code)
    }
}

impl From<Language> for String {
    fn from(lang: Language) -> Self {
        lang.code().to_string()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

type Table = &'static [(&'static str, &'static str)];

const FR: Table = &[
    ("title", "Vue intégrée IMEC"),
    ("budgets", "Budgets récents"),
    ("news", "Dernières actus"),
    ("legal", "Cadre légal"),
    ("kpi.items", "Éléments"),
    ("kpi.budgets", "Budgets"),
    ("kpi.news", "Actus"),
    ("kpi.legal", "Légal"),
    ("search.prompt", "Recherche : "),
    ("search.empty_query", "Veuillez entrer un mot-clé."),
    ("search.searching", "Recherche en cours sur « {query} »…"),
    ("search.loading", "Chargement des derniers éléments…"),
    ("results.none", "Aucun résultat."),
    ("results.idle", "Appuyez sur « / » pour lancer une recherche."),
    ("error.network", "Erreur de connexion à l'API"),
    ("card.untitled", "(sans titre)"),
    ("card.open_source", "Ouvrir la source →"),
    ("card.credibility", "Crédibilité"),
    ("search.hint_active", "Entrée : rechercher · Échap : annuler"),
    ("search.hint_idle", "« / » pour saisir"),
    (
        "help",
        "q quitter · / chercher · Entrée ouvrir · Tab section · v vue · l langue · r recharger",
    ),
    ("status.opened", "Ouvert :"),
    ("status.open_failed", "Impossible d'ouvrir le lien :"),
    ("view.categorized", "Par catégorie"),
    ("view.list", "Liste"),
];

const EN: Table = &[
    ("title", "Integrated IMEC view"),
    ("budgets", "Recent budgets"),
    ("news", "Latest news"),
    ("legal", "Legal framework"),
    ("kpi.items", "Items"),
    ("kpi.budgets", "Budgets"),
    ("kpi.news", "News"),
    ("kpi.legal", "Legal"),
    ("search.prompt", "Search: "),
    ("search.empty_query", "Please enter a keyword."),
    ("search.searching", "Searching for \"{query}\"…"),
    ("search.loading", "Loading latest items…"),
    ("results.none", "No results."),
    ("results.idle", "Press '/' to start a search."),
    ("error.network", "API connection error"),
    ("card.untitled", "(untitled)"),
    ("card.open_source", "Open source →"),
    ("card.credibility", "Credibility"),
    ("search.hint_active", "Enter: search · Esc: cancel"),
    ("search.hint_idle", "'/' to edit"),
    (
        "help",
        "q: quit · /: search · Enter: open · Tab: section · v: view · l: language · r: reload",
    ),
    ("status.opened", "Opened:"),
    ("status.open_failed", "Failed to open link:"),
    ("view.categorized", "By category"),
    ("view.list", "List"),
];

const AR: Table = &[
    ("title", "نظرة متكاملة على IMEC"),
    ("budgets", "أحدث الميزانيات"),
    ("news", "آخر الأخبار"),
    ("legal", "الإطار القانوني"),
    ("kpi.items", "العناصر"),
    ("kpi.budgets", "الميزانيات"),
    ("kpi.news", "الأخبار"),
    ("kpi.legal", "النصوص القانونية"),
    ("search.prompt", "بحث: "),
    ("search.empty_query", "يرجى إدخال كلمة مفتاحية."),
    ("search.searching", "جارٍ البحث عن «{query}»…"),
    ("search.loading", "جارٍ تحميل أحدث العناصر…"),
    ("results.none", "لا توجد نتائج."),
    ("results.idle", "اضغط / لبدء البحث."),
    ("error.network", "خطأ في الاتصال بواجهة البرمجة"),
    ("card.untitled", "(بدون عنوان)"),
    ("card.open_source", "فتح المصدر ←"),
    ("card.credibility", "المصداقية"),
    ("search.hint_active", "Enter: بحث · Esc: إلغاء"),
    ("search.hint_idle", "اضغط / للكتابة"),
    (
        "help",
        "q: خروج · /: بحث · Enter: فتح المصدر · Tab: قسم · v: العرض · l: اللغة · r: إعادة التحميل",
    ),
    ("status.opened", "تم الفتح:"),
    ("status.open_failed", "تعذر فتح الرابط:"),
    ("view.categorized", "حسب الفئة"),
    ("view.list", "قائمة"),
];

fn table(lang: &Language) -> Option<Table> {
    match lang {
        Language::Fr => Some(FR),
        Language::En => Some(EN),
        Language::Ar => Some(AR),
        Language::Other(_) => None,
    }
}

/// Translate a UI label key.
///
/// # Arguments
/// * `lang` - Current language
/// * `key` - Label key (e.g. `"budgets"`)
///
/// # Returns
/// * `&str` - Table entry, or `key` itself when the language or key is missing
pub fn t<'a>(lang: &Language, key: &'a str) -> &'a str {
    table(lang)
        .and_then(|entries| entries.iter().find(|(k, _)| *k == key))
        .map(|(_, value)| *value)
        .unwrap_or(key)
}

/// Translate a label containing a `{query}` placeholder.
pub fn t_query(lang: &Language, key: &str, query: &str) -> String {
    t(lang, key).replace("{query}", query)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_existing_key() {
        assert_eq!(t(&Language::Fr, "budgets"), "Budgets récents");
        assert_eq!(t(&Language::En, "legal"), "Legal framework");
        assert_eq!(t(&Language::Ar, "news"), "آخر الأخبار");
    }

    #[test]
    fn test_missing_key_falls_back_to_key() {
        assert_eq!(t(&Language::En, "no.such.label"), "no.such.label");
    }

    #[test]
    fn test_missing_language_falls_back_to_key() {
        let lang = Language::from_code("de");
        assert_eq!(lang, Language::Other("de".to_string()));
        assert_eq!(t(&lang, "budgets"), "budgets");
    }

    #[test]
    fn test_tables_define_same_keys() {
        let keys = |table: Table| table.iter().map(|(k, _)| *k).collect::<Vec<_>>();
        assert_eq!(keys(FR), keys(EN));
        assert_eq!(keys(FR), keys(AR));
    }

    #[test]
    fn test_direction() {
        assert_eq!(Language::Ar.direction(), Direction::Rtl);
        assert_eq!(Language::Fr.direction(), Direction::Ltr);
        assert_eq!(Language::En.direction(), Direction::Ltr);
        assert_eq!(Direction::Rtl.as_str(), "rtl");
    }

    #[test]
    fn test_language_cycle_and_parse() {
        assert_eq!(Language::from_code(" AR "), Language::Ar);
        assert_eq!(Language::Fr.next(), Language::En);
        assert_eq!(Language::Ar.next(), Language::Fr);
        assert_eq!(Language::Other("de".into()).next(), Language::Fr);
    }

    #[test]
    fn test_query_placeholder() {
        assert_eq!(
            t_query(&Language::En, "search.searching", "rail"),
            "Searching for \"rail\"…"
        );
    }
}
