//! Search widget rendering.
//!
//! Displays the query input bar.

use crate::app::{App, SearchState, UiMode};
use crate::i18n::t;
use crate::ui::list::alignment;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render the search widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Displays the localized prompt and the typed query. Highlights when in
/// input mode and turns red after a blank submission.
pub fn render_search(app: &App, area: Rect, buf: &mut Buffer) {
    let is_active = app.mode == UiMode::Input;
    let prompt = t(&app.lang, "search.prompt");

    let line = Line::from(vec![
        Span::styled(prompt.to_string(), Style::default().fg(Color::Yellow)),
        Span::styled(
            app.input.clone(),
            Style::default().fg(if is_active { Color::White } else { Color::Gray }),
        ),
        Span::styled(
            if is_active { "_" } else { "" },
            Style::default().fg(Color::Yellow),
        ),
    ]);

    let invalid = app.state == SearchState::Invalid;
    let title = if invalid {
        t(&app.lang, "search.empty_query")
    } else if is_active {
        t(&app.lang, "search.hint_active")
    } else {
        t(&app.lang, "search.hint_idle")
    };

    let border_style = match (invalid, is_active) {
        (true, _) => Style::default().fg(Color::Red),
        (false, true) => Style::default().fg(Color::Yellow),
        (false, false) => Style::default(),
    };

    let paragraph = Paragraph::new(line)
        .alignment(alignment(app.lang.direction()))
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .style(border_style),
        );

    Widget::render(paragraph, area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewMode;
    use crate::i18n::Language;
    use crate::ui::list::buffer_text;

    #[test]
    fn test_prompt_and_input_are_shown() {
        let mut app = App::new(Language::En, ViewMode::List);
        app.mode = UiMode::Input;
        app.input = "rail".to_string();

        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        render_search(&app, area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Search: rail_"));
        assert!(text.contains("Esc: cancel"));
    }

    #[test]
    fn test_blank_submission_shows_hint() {
        let mut app = App::new(Language::Fr, ViewMode::List);
        app.input = "   ".to_string();
        assert!(app.submit_search().is_none());

        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        render_search(&app, area, &mut buf);

        assert!(buffer_text(&buf).contains("Veuillez entrer un mot-clé."));
    }

    #[test]
    fn test_hint_follows_language() {
        let app = App::new(Language::Fr, ViewMode::List);
        let area = Rect::new(0, 0, 60, 3);
        let mut buf = Buffer::empty(area);
        render_search(&app, area, &mut buf);

        assert!(buffer_text(&buf).contains("« / » pour saisir"));
    }
}
