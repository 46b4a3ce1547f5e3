//! Card list widget rendering.
//!
//! Displays result cards with selection highlighting. Shared by the generic
//! list and the sections of the categorized view.

use crate::app::App;
use crate::i18n::{Direction, t};
use crate::render::{Card, ListView};
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap},
};

/// Render the generic list.
///
/// # Arguments
/// * `app` - Application state
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
///
/// # Details
/// Shows at most 24 cards; the title reports shown/total counts.
pub fn render_list(app: &App, area: Rect, buf: &mut Buffer) {
    let direction = app.lang.direction();
    let total = app.items().len();

    match app.list_view() {
        ListView::Empty { message } => {
            render_message(&message, t(&app.lang, "view.list"), direction, area, buf);
        }
        ListView::Cards(cards) => {
            let title = format!("{} ({}/{})", t(&app.lang, "view.list"), cards.len(), total);
            render_cards(
                &cards,
                title,
                direction,
                Some(app.selected_index),
                true,
                area,
                buf,
            );
        }
    }
}

/// Render a bordered message in place of results.
pub fn render_message(
    message: &str,
    title: &str,
    direction: Direction,
    area: Rect,
    buf: &mut Buffer,
) {
    let paragraph = Paragraph::new(Line::from(message.to_string()))
        .alignment(alignment(direction))
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .title(title.to_string())
                .title_alignment(alignment(direction))
                .borders(Borders::ALL),
        );
    Widget::render(paragraph, area, buf);
}

/// Render cards as a bordered, scrollable list.
///
/// # Arguments
/// * `cards` - Cards to show
/// * `title` - Block title
/// * `direction` - Text direction of the whole view
/// * `selected` - Selected card index, None for no selection
/// * `focused` - Whether the list has keyboard focus
/// * `area` - Area to render in
/// * `buf` - Buffer to render to
pub fn render_cards(
    cards: &[Card],
    title: String,
    direction: Direction,
    selected: Option<usize>,
    focused: bool,
    area: Rect,
    buf: &mut Buffer,
) {
    let separator_width = area.width.saturating_sub(2).max(10) as usize;
    let selected = selected.filter(|_| !cards.is_empty()).map(|i| i.min(cards.len() - 1));

    let items: Vec<ListItem> = cards
        .iter()
        .enumerate()
        .map(|(idx, card)| card_item(card, direction, selected == Some(idx), separator_width))
        .collect();

    let mut list_state = ListState::default();
    list_state.select(selected);

    let border_style = if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title(title)
                .title_alignment(alignment(direction))
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(Style::default().bg(Color::Blue).add_modifier(Modifier::BOLD));

    StatefulWidget::render(list, area, buf, &mut list_state);
}

/// Build the multi-line list entry of one card.
///
/// # Details
/// - Line 1: badges and heading (bold)
/// - Line 2: meta (dates, outlet, countries), if any
/// - Line 3: summary, if any
/// - Line 4: source link, if any
/// - Last line: separator
fn card_item(
    card: &Card,
    direction: Direction,
    is_selected: bool,
    separator_width: usize,
) -> ListItem<'static> {
    let align = alignment(direction);

    let mut heading_spans: Vec<Span> = card
        .badges
        .iter()
        .filter(|b| !b.is_empty())
        .map(|badge| {
            Span::styled(
                format!("[{}] ", badge),
                Style::default().fg(Color::Magenta),
            )
        })
        .collect();
    heading_spans.push(Span::styled(
        card.heading.clone(),
        Style::default()
            .fg(if is_selected { Color::Yellow } else { Color::White })
            .add_modifier(Modifier::BOLD),
    ));

    let mut lines = vec![Line::from(heading_spans).alignment(align)];

    if let Some(meta) = &card.meta {
        let meta = Span::styled(meta.clone(), Style::default().fg(Color::Cyan));
        lines.push(Line::from(meta).alignment(align));
    }
    if let Some(body) = &card.body {
        lines.push(Line::from(body.clone()).alignment(align));
    }
    if let Some(link) = &card.link {
        lines.push(
            Line::from(Span::styled(
                format!("{} {}", link.label, link.url),
                Style::default()
                    .fg(Color::Blue)
                    .add_modifier(Modifier::UNDERLINED),
            ))
            .alignment(align),
        );
    }

    let separator_style = if is_selected {
        Style::default().fg(Color::Blue)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    lines.push(Line::from(Span::styled("─".repeat(separator_width), separator_style)));

    ListItem::new(lines)
}

/// Paragraph alignment for a view direction.
pub fn alignment(direction: Direction) -> Alignment {
    match direction {
        Direction::Ltr => Alignment::Left,
        Direction::Rtl => Alignment::Right,
    }
}

#[cfg(test)]
pub(crate) fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            text.push_str(buf[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::{SearchOutcome, App};
    use crate::config::ViewMode;
    use crate::hub::models::normalize_items;
    use crate::i18n::Language;
    use serde_json::json;

    #[test]
    fn test_render_cards_shows_heading_and_link() {
        let mut app = App::new(Language::En, ViewMode::List);
        let ticket = app.begin_initial_load();
        app.apply_outcome(SearchOutcome {
            seq: ticket.seq,
            result: Ok(normalize_items(json!([
                {"type": "news", "title": "Haifa port", "url": "https://example.org/h"}
            ]))
            .unwrap()),
        });

        let area = Rect::new(0, 0, 60, 10);
        let mut buf = Buffer::empty(area);
        render_list(&app, area, &mut buf);

        let text = buffer_text(&buf);
        assert!(text.contains("List (1/1)"));
        assert!(text.contains("[news] Haifa port"));
        assert!(text.contains("https://example.org/h"));
    }

    #[test]
    fn test_rtl_alignment() {
        assert_eq!(alignment(Direction::Rtl), Alignment::Right);
        assert_eq!(alignment(Direction::Ltr), Alignment::Left);
    }
}
