//! Token pane rendering

use crate::parser::lexer::{Token, TokenKind};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

fn kind_style(kind: TokenKind) -> Style {
    match kind {
        TokenKind::Id => Style::default().fg(DEFAULT_THEME.fg),
        TokenKind::Num => Style::default().fg(DEFAULT_THEME.number),
        TokenKind::EndOfText => Style::default().fg(DEFAULT_THEME.comment),
        TokenKind::Int | TokenKind::Bool => Style::default().fg(DEFAULT_THEME.type_name),
        kind if kind.is_keyword() => Style::default().fg(DEFAULT_THEME.keyword),
        _ => Style::default().fg(DEFAULT_THEME.operator),
    }
}

/// Render the token pane
pub fn render_token_pane(
    frame: &mut Frame,
    area: Rect,
    tokens: &[Token],
    selected: usize,
    is_focused: bool,
    scroll_offset: &mut usize,
) {
    let block = Block::default()
        .title(format!(" Tokens ({}) ", tokens.len()))
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused));

    if tokens.is_empty() {
        let paragraph = Paragraph::new("(no tokens)")
            .block(block)
            .style(Style::default().fg(DEFAULT_THEME.comment));
        frame.render_widget(paragraph, area);
        return;
    }

    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders, min 1
    super::scroll_to_selection(scroll_offset, selected, tokens.len(), visible_height);

    let items: Vec<ListItem> = tokens
        .iter()
        .enumerate()
        .skip(*scroll_offset)
        .take(visible_height)
        .map(|(idx, token)| {
            let line = Line::from(vec![
                Span::styled(
                    format!("{:<9}", token.position.to_string()),
                    Style::default().fg(DEFAULT_THEME.comment),
                ),
                Span::styled(format!("{:<9}", token.kind.as_str()), kind_style(token.kind)),
                Span::styled(token.value.as_str(), Style::default().fg(DEFAULT_THEME.fg)),
            ]);

            let item = ListItem::new(line);
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
