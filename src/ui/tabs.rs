//! Header widget rendering.
//!
//! Displays the hub name, the language switcher and the active view.

use crate::app::App;
use crate::config::ViewMode;
use crate::i18n::{Language, t};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Widget},
};

/// Render the header widget.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Shows `FR | EN | AR` followed by the two view modes, highlighting the
/// active language and view.
pub fn render_tabs(app: &App, area: Rect, buf: &mut Buffer) {
    let active = Style::default()
        .fg(Color::Yellow)
        .bg(Color::Blue)
        .add_modifier(Modifier::BOLD);
    let inactive = Style::default().fg(Color::Gray);
    let separator = || Span::styled(" | ", Style::default().fg(Color::DarkGray));

    let mut spans = Vec::new();
    for (i, lang) in Language::selectable().iter().enumerate() {
        if i > 0 {
            spans.push(separator());
        }
        let label = format!(" {} ", lang.code().to_uppercase());
        spans.push(Span::styled(label, if *lang == app.lang { active } else { inactive }));
    }

    spans.push(Span::raw("    "));

    for (i, view) in [ViewMode::Categorized, ViewMode::List].iter().enumerate() {
        if i > 0 {
            spans.push(separator());
        }
        let label = t(&app.lang, view.label_key());
        let text = if *view == app.view {
            format!("▶ {} ◀", label)
        } else {
            format!("  {}  ", label)
        };
        spans.push(Span::styled(text, if *view == app.view { active } else { inactive }));
    }

    let paragraph = Paragraph::new(Line::from(spans))
        .block(
            Block::default()
                .title("IMEC Intelligence Hub")
                .borders(Borders::ALL),
        )
        .alignment(Alignment::Center);

    Widget::render(paragraph, area, buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::list::buffer_text;

    #[test]
    fn test_header_marks_active_view() {
        let mut app = App::new(Language::En, ViewMode::Categorized);
        let area = Rect::new(0, 0, 80, 3);

        let mut buf = Buffer::empty(area);
        render_tabs(&app, area, &mut buf);
        let text = buffer_text(&buf);
        assert!(text.contains("IMEC Intelligence Hub"));
        assert!(text.contains(" FR  |  EN  |  AR "));
        assert!(text.contains("▶ By category ◀"));

        app.toggle_view();
        let mut buf = Buffer::empty(area);
        render_tabs(&app, area, &mut buf);
        assert!(buffer_text(&buf).contains("▶ List ◀"));
    }
}
