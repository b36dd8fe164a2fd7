//! AST pane rendering
//!
//! One row per node in in-order traversal, the same columns as the
//! console table: kind, position and the kinds of the three children.

use crate::parser::ast::NodeRow;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn child_span(tag: &str) -> Span<'_> {
    let color = if tag == "NIL" {
        DEFAULT_THEME.comment
    } else {
        DEFAULT_THEME.fg
    };
    Span::styled(format!("{:<13}", tag), Style::default().fg(color))
}

/// Render the tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    rows: &[NodeRow],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(" Syntax Tree (in-order) ")
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused));

    if rows.is_empty() {
        let paragraph = Paragraph::new("(no tree)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    super::scroll_to_selection(scroll_offset, selected, rows.len(), visible_height);

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, row)| {
            let mut spans = vec![
                Span::styled(format!("{:<13}", row.kind), Style::default().fg(DEFAULT_THEME.node_kind)),
                Span::styled(
                    format!("{:<8}", row.position.to_string()),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
            ];
            spans.extend(row.children.iter().map(|tag| child_span(tag)));

            let item = ListItem::new(Line::from(spans));
            if idx == selected {
                item.style(
                    Style::default()
                        .bg(DEFAULT_THEME.current_line_bg)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                item
            }
        })
        .collect();

    frame.render_widget(List::new(items).block(block), area);
}
