//! Source pane rendering with keyword highlighting
//!
//! Shows the analyzed file with line numbers. The line holding the
//! selected token or node gets the current-line background; the line of
//! the error that ended the scan is drawn in the error colour.
//!
//! Highlighting uses a simple word splitter and the lexer's keyword table
//! rather than re-lexing, so it also works on text after a lexical error.

use crate::parser::lexer::TokenKind;
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn highlight_source_line(line: &str) -> Line<'_> {
    let mut spans = Vec::new();
    let mut word_start: Option<usize> = None;

    for (i, c) in line.char_indices() {
        if c.is_ascii_alphanumeric() || c == '_' {
            word_start.get_or_insert(i);
            continue;
        }

        if let Some(start) = word_start.take() {
            spans.push(word_span(&line[start..i]));
        }

        if line[i..].starts_with("//") {
            spans.push(Span::styled(&line[i..], Style::default().fg(DEFAULT_THEME.comment)));
            return Line::from(spans);
        }

        let style = match c {
            '(' | ')' => Style::default().fg(DEFAULT_THEME.primary),
            '<' | '>' | '=' | '!' | '+' | '-' | '*' | '/' | ':' => Style::default().fg(DEFAULT_THEME.operator),
            _ => Style::default().fg(DEFAULT_THEME.fg),
        };
        spans.push(Span::styled(&line[i..i + c.len_utf8()], style));
    }

    if let Some(start) = word_start {
        spans.push(word_span(&line[start..]));
    }

    Line::from(spans)
}

fn word_span(word: &str) -> Span<'_> {
    let style = match TokenKind::keyword(word) {
        Some(TokenKind::Int | TokenKind::Bool) => Style::default().fg(DEFAULT_THEME.type_name),
        Some(TokenKind::True | TokenKind::False) => Style::default().fg(DEFAULT_THEME.number),
        Some(_) => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        None if word.starts_with(|c: char| c.is_ascii_digit()) => Style::default().fg(DEFAULT_THEME.number),
        None => Style::default().fg(DEFAULT_THEME.fg),
    };
    Span::styled(word, style)
}

/// Render the source pane
///
/// `current_line` is 1-based; 0 marks no line. `scroll` is only a lower
/// bound: the view moves so that the current line stays visible.
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    source: &str,
    current_line: usize,
    error_line: Option<usize>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let block = Block::default()
        .title(" Source ")
        .borders(Borders::ALL)
        .border_style(super::border_style(is_focused));

    let lines: Vec<&str> = source.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    if !is_focused && current_line > 0 {
        super::scroll_to_selection(scroll, current_line - 1, total_lines, visible_height);
    }
    *scroll = (*scroll).min(total_lines.saturating_sub(visible_height));

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(*scroll)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let is_error = error_line == Some(line_num);
            let is_current = line_num == current_line;

            let (num_style, content_style) = if is_error {
                (
                    Style::default()
                        .fg(DEFAULT_THEME.error)
                        .add_modifier(Modifier::BOLD),
                    Some(
                        Style::default()
                            .bg(DEFAULT_THEME.error)
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                )
            } else if is_current {
                (
                    Style::default()
                        .fg(DEFAULT_THEME.secondary)
                        .add_modifier(Modifier::BOLD),
                    Some(Style::default().bg(DEFAULT_THEME.current_line_bg)),
                )
            } else {
                (Style::default().fg(DEFAULT_THEME.comment), None)
            };

            let mut content = highlight_source_line(line);
            if let Some(style) = content_style {
                for span in &mut content.spans {
                    span.style = if is_error { style } else { span.style.patch(style) };
                }
            }

            let mut spans = vec![Span::styled(format!("{:4} ", line_num), num_style)];
            spans.extend(content.spans);
            Line::from(spans)
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
