//! Categorized view rendering.
//!
//! Lays out the budget, news and legal sections side by side. Right-to-left
//! views mirror the column order.

use crate::app::App;
use crate::i18n::Direction;
use crate::render::Section;
use crate::ui::list::render_cards;
use ratatui::{
    buffer::Buffer,
    layout::{Constraint, Layout, Rect},
};

/// Render the categorized sections.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// The focused section carries the selection and a highlighted border.
pub fn render_sections(app: &App, area: Rect, buf: &mut Buffer) {
    let view = app.categorized_view();

    let mut sections: Vec<&Section> = view.sections.iter().collect();
    if view.direction == Direction::Rtl {
        sections.reverse();
    }

    let columns = Layout::horizontal([Constraint::Ratio(1, sections.len().max(1) as u32); 3])
        .split(area);

    for (section, column) in sections.into_iter().zip(columns.iter()) {
        let focused = section.category == app.focused_section;
        render_cards(
            &section.cards,
            format!("{} ({})", section.heading, section.cards.len()),
            view.direction,
            focused.then_some(app.selected_index),
            focused,
            *column,
            buf,
        );
    }
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

    fn rendered_app(lang: Language) -> App {
        let mut app = App::new(lang, ViewMode::Categorized);
        let ticket = app.begin_initial_load();
        app.apply_outcome(SearchOutcome {
            seq: ticket.seq,
            result: Ok(normalize_items(json!([
                {"type": "budget", "segment": "rail", "currency": "EUR", "amount_original": 10},
                {"type": "legal", "title": "MoU", "instrument_type": "mou", "country_id": "IN"}
            ]))
            .unwrap()),
        });
        app
    }

    #[test]
    fn test_sections_left_to_right() {
        let app = rendered_app(Language::En);
        let area = Rect::new(0, 0, 120, 8);
        let mut buf = Buffer::empty(area);
        render_sections(&app, area, &mut buf);

        let text = buffer_text(&buf);
        let budgets = text.find("Recent budgets (1)").unwrap();
        let legal = text.find("Legal framework (1)").unwrap();
        assert!(budgets < legal);
        assert!(text.contains("RAIL • EUR 10"));
        assert!(text.contains("MOU • MoU"));
    }

    #[test]
    fn test_sections_mirrored_for_arabic() {
        let app = rendered_app(Language::Ar);
        let view = app.categorized_view();
        assert_eq!(view.direction, Direction::Rtl);

        let area = Rect::new(0, 0, 150, 8);
        let mut buf = Buffer::empty(area);
        render_sections(&app, area, &mut buf);

        // The legal column is drawn first (leftmost) in a mirrored layout.
        let text = buffer_text(&buf);
        let first_line = text.lines().next().unwrap();
        let legal = first_line.find("الإطار القانوني (1)").unwrap();
        let budgets = first_line.find("أحدث الميزانيات (1)").unwrap();
        assert!(legal < budgets);
    }
}
