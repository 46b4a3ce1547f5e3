//! Application state management.
//!
//! Manages the query input, the current search session, the result view and
//! the selection within it.

use crate::config::ViewMode;
use crate::error::{SearchError, validate_query};
use crate::hub::{Category, SearchResultItem};
use crate::i18n::{Language, t, t_query};
use crate::render::{self, Card, CategorizedView, ListView};
use chrono::{DateTime, Local};
use std::cmp;
use tracing::{debug, info, warn};

/// Keyboard focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiMode {
    /// Navigating results
    Browse,
    /// Typing a query
    Input,
}

/// Progress of the current search session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchState {
    /// Nothing searched yet
    Idle,
    /// Last submission was blank; no request was made
    Invalid,
    /// Waiting for the API
    Searching,
    /// Results are displayed
    Rendered,
    /// The API returned zero records
    Empty,
    /// Request or decoding failed; holds the error text
    Error(String),
}

/// Results of one search trigger.
///
/// Replaced wholesale by the next trigger.
#[derive(Debug, Clone)]
pub struct SearchSession {
    /// Sequence number of the request backing this session
    pub seq: u64,
    /// Submitted query, None for the initial unfiltered load
    pub query: Option<String>,
    /// Language active when the search was triggered
    pub lang: Language,
    pub items: Vec<SearchResultItem>,
    pub started_at: DateTime<Local>,
}

/// Request to be executed by the search client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    pub seq: u64,
    /// None requests the unfiltered result set
    pub query: Option<String>,
}

/// Completed request reported back to the event loop.
#[derive(Debug)]
pub struct SearchOutcome {
    pub seq: u64,
    pub result: Result<Vec<SearchResultItem>, SearchError>,
}

/// Main application state.
#[derive(Debug)]
pub struct App {
    /// Current keyboard focus
    pub mode: UiMode,
    /// Result layout
    pub view: ViewMode,
    /// Interface language
    pub lang: Language,
    /// Query being typed
    pub input: String,
    pub state: SearchState,
    /// Latest search session, if any
    pub session: Option<SearchSession>,
    /// Selected card within the visible list
    pub selected_index: usize,
    /// Section navigated in the categorized view
    pub focused_section: Category,
    /// Status message to display
    pub status_message: Option<String>,
    /// Whether the unfiltered result set may be fetched without a query
    pub load_on_start: bool,
    /// Sequence number of the most recently issued request
    latest_seq: u64,
}

impl App {
    /// Create a new application state.
    ///
    /// # Arguments
    /// * `lang` - Interface language
    /// * `view` - Initial result layout
    pub fn new(lang: Language, view: ViewMode) -> Self {
        Self {
            mode: UiMode::Browse,
            view,
            lang,
            input: String::new(),
            state: SearchState::Idle,
            session: None,
            selected_index: 0,
            focused_section: Category::Budget,
            status_message: None,
            load_on_start: false,
            latest_seq: 0,
        }
    }

    /// Submit the typed query.
    ///
    /// # Returns
    /// * `Option<SearchTicket>` - Request to dispatch, or None when the query
    ///   is blank
    ///
    /// # Details
    /// A blank query switches to `Invalid` and issues nothing. Otherwise the
    /// state becomes `Searching` immediately, before any response arrives.
    pub fn submit_search(&mut self) -> Option<SearchTicket> {
        self.mode = UiMode::Browse;
        match validate_query(&self.input) {
            Ok(query) => {
                let query = query.to_string();
                Some(self.start_session(Some(query)))
            }
            Err(_) => {
                // Supersede any request still in flight.
                self.latest_seq += 1;
                debug!(seq = self.latest_seq, "blank query submitted");
                self.state = SearchState::Invalid;
                self.session = None;
                None
            }
        }
    }

    /// Start the unfiltered load performed at startup.
    pub fn begin_initial_load(&mut self) -> SearchTicket {
        self.start_session(None)
    }

    /// Repeat the current search.
    ///
    /// # Returns
    /// * `Option<SearchTicket>` - Request to dispatch, or None when there is
    ///   nothing to reload
    ///
    /// # Details
    /// Without a submitted query the unfiltered set is fetched again, but only
    /// when `load_on_start` is enabled.
    pub fn reload(&mut self) -> Option<SearchTicket> {
        match self.session.as_ref().map(|s| s.query.clone()) {
            Some(Some(query)) => {
                self.input = query;
                self.submit_search()
            }
            Some(None) => Some(self.begin_initial_load()),
            None if self.load_on_start => Some(self.begin_initial_load()),
            None => {
                debug!("nothing to reload");
                None
            }
        }
    }

    fn start_session(&mut self, query: Option<String>) -> SearchTicket {
        self.latest_seq += 1;
        let seq = self.latest_seq;

        self.session = Some(SearchSession {
            seq,
            query: query.clone(),
            lang: self.lang.clone(),
            items: Vec::new(),
            started_at: Local::now(),
        });
        self.state = SearchState::Searching;
        self.selected_index = 0;
        self.focused_section = Category::Budget;

        info!(seq, ?query, "search started");
        SearchTicket { seq, query }
    }

    /// Apply a completed request.
    ///
    /// # Arguments
    /// * `outcome` - Result reported by the search task
    ///
    /// # Returns
    /// * `bool` - False when the outcome belongs to a superseded request and
    ///   was dropped
    pub fn apply_outcome(&mut self, outcome: SearchOutcome) -> bool {
        if outcome.seq != self.latest_seq {
            debug!(
                seq = outcome.seq,
                latest = self.latest_seq,
                "dropping stale search response"
            );
            return false;
        }

        match outcome.result {
            Ok(items) => {
                let count = items.len();
                self.state = if items.is_empty() {
                    SearchState::Empty
                } else {
                    SearchState::Rendered
                };
                let now = Local::now();
                if let Some(session) = self.session.as_mut() {
                    let elapsed_ms = (now - session.started_at).num_milliseconds();
                    info!(
                        seq = session.seq,
                        lang = %session.lang,
                        count,
                        elapsed_ms,
                        "search completed"
                    );
                    session.items = items;
                }
                self.set_status(format!(
                    "{} {} ({})",
                    count,
                    t(&self.lang, "kpi.items"),
                    now.format("%H:%M:%S")
                ));
            }
            Err(err) => {
                if err.is_network() {
                    warn!(error = %err, "search failed");
                }
                self.state = SearchState::Error(err.to_string());
                self.status_message = None;
                if let Some(session) = self.session.as_mut() {
                    session.items.clear();
                }
            }
        }

        self.selected_index = 0;
        true
    }

    /// Records of the current session.
    pub fn items(&self) -> &[SearchResultItem] {
        self.session
            .as_ref()
            .map(|s| s.items.as_slice())
            .unwrap_or_default()
    }

    /// Localized message that replaces the results region, if any.
    ///
    /// # Returns
    /// * `Option<String>` - Message for every state except `Rendered`
    pub fn results_message(&self) -> Option<String> {
        let lang = &self.lang;
        match &self.state {
            SearchState::Idle => Some(t(lang, "results.idle").to_string()),
            SearchState::Invalid => Some(t(lang, "search.empty_query").to_string()),
            SearchState::Searching => {
                let query = self.session.as_ref().and_then(|s| s.query.as_deref());
                Some(match query {
                    Some(query) => t_query(lang, "search.searching", query),
                    None => t(lang, "search.loading").to_string(),
                })
            }
            SearchState::Empty => Some(t(lang, "results.none").to_string()),
            SearchState::Error(message) => {
                Some(format!("{} ({}).", t(lang, "error.network"), message))
            }
            SearchState::Rendered => None,
        }
    }

    /// Generic list of the current records.
    pub fn list_view(&self) -> ListView {
        render::render_list(self.items(), &self.lang)
    }

    /// Categorized view of the current records.
    pub fn categorized_view(&self) -> CategorizedView {
        render::render_categorized(self.items(), &self.lang)
    }

    /// Cards that selection moves through.
    ///
    /// # Details
    /// The generic list in list view, the focused section in categorized view.
    pub fn navigable_cards(&self) -> Vec<Card> {
        if self.state != SearchState::Rendered {
            return Vec::new();
        }
        match self.view {
            ViewMode::List => match self.list_view() {
                ListView::Cards(cards) => cards,
                ListView::Empty { .. } => Vec::new(),
            },
            ViewMode::Categorized => self
                .categorized_view()
                .sections
                .into_iter()
                .find(|s| s.category == self.focused_section)
                .map(|s| s.cards)
                .unwrap_or_default(),
        }
    }

    /// Link of the selected card, if it has one.
    pub fn selected_link(&self) -> Option<String> {
        self.navigable_cards()
            .into_iter()
            .nth(self.selected_index)
            .and_then(|card| card.link)
            .map(|link| link.url)
    }

    /// Move selection up, wrapping to the bottom.
    pub fn move_up(&mut self) {
        let len = self.navigable_cards().len();
        if len == 0 {
            return;
        }
        if self.selected_index == 0 {
            self.selected_index = len - 1;
        } else {
            self.selected_index = cmp::min(self.selected_index - 1, len - 1);
        }
    }

    /// Move selection down, wrapping to the top.
    pub fn move_down(&mut self) {
        let len = self.navigable_cards().len();
        if len == 0 {
            return;
        }
        self.selected_index = (self.selected_index + 1) % len;
    }

    /// Focus the next section of the categorized view.
    pub fn focus_next_section(&mut self) {
        self.focused_section = self.focused_section.next();
        self.selected_index = 0;
    }

    /// Switch between categorized and list views.
    pub fn toggle_view(&mut self) {
        self.view = self.view.toggle();
        self.selected_index = 0;
    }

    /// Switch to the next interface language.
    ///
    /// # Details
    /// Current records are re-rendered in the new language; nothing is refetched.
    pub fn cycle_language(&mut self) {
        self.lang = self.lang.next();
        info!(lang = %self.lang, "language changed");
    }

    /// Add a character to the query being typed.
    pub fn add_input_char(&mut self, ch: char) {
        if self.mode == UiMode::Input {
            self.input.push(ch);
        }
    }

    /// Remove last character from the query being typed.
    pub fn remove_input_char(&mut self) {
        if self.mode == UiMode::Input {
            self.input.pop();
        }
    }

    /// Set status message.
    pub fn set_status(&mut self, message: String) {
        self.status_message = Some(message);
    }
}
