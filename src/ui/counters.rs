//! Counter row rendering.
//!
//! Displays the view title with total and per-type record counts.

use crate::app::App;
use crate::ui::list::alignment;
use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render the counters widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
pub fn render_counters(app: &App, area: Rect, buf: &mut Buffer) {
    let view = app.categorized_view();

    let mut spans = Vec::new();
    for (i, counter) in view.counters.iter().enumerate() {
        if i > 0 {
            spans.push(Span::styled("  |  ", Style::default().fg(Color::DarkGray)));
        }
        spans.push(Span::styled(
            format!("{}: ", counter.label),
            Style::default().fg(Color::Cyan),
        ));
        spans.push(Span::styled(
            counter.value.to_string(),
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .alignment(alignment(view.direction))
        .block(
            Block::default()
                .title(view.title)
                .title_alignment(alignment(view.direction))
                .borders(Borders::ALL),
        );

    Widget::render(paragraph, area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::SearchOutcome;
    use crate::config::ViewMode;
    use crate::hub::models::normalize_items;
    use crate::i18n::Language;
    use crate::ui::list::buffer_text;
    use serde_json::json;

    #[test]
    fn test_counters_include_unknown_in_total() {
        let mut app = App::new(Language::En, ViewMode::Categorized);
        let ticket = app.begin_initial_load();
        app.apply_outcome(SearchOutcome {
            seq: ticket.seq,
            result: Ok(normalize_items(json!([
                {"type": "budget"}, {"type": "budget"}, {"type": "news"},
                {"type": "legal"}, {"type": "statement"}
            ]))
            .unwrap()),
        });

        let area = Rect::new(0, 0, 90, 3);
        let mut buf = Buffer::empty(area);
        render_counters(&app, area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("Integrated IMEC view"));
        assert!(text.contains("Items: 5"));
        assert!(text.contains("Budgets: 2"));
        assert!(text.contains("News: 1"));
        assert!(text.contains("Legal: 1"));
    }
}
