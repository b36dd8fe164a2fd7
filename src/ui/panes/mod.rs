//! TUI pane rendering modules
//!
//! # Pane Modules
//!
//! - [`source`]: Source text with keyword highlighting and the selected/error line marked
//! - [`tokens`]: Token table (position, kind, value)
//! - [`tree`]: In-order AST table (kind, position, child kinds)
//! - [`status`]: Status bar with the outcome and keybindings
//!
//! Each pane module exports one `render_*` function. The token and tree
//! panes share the selection scrolling in [`scroll_to_selection`].

pub mod source;
pub mod status;
pub mod tokens;
pub mod tree;

pub use source::render_source_pane;
pub use status::render_status_bar;
pub use tokens::render_token_pane;
pub use tree::render_tree_pane;

use crate::ui::theme::DEFAULT_THEME;
use ratatui::style::{Modifier, Style};

pub(crate) fn border_style(is_focused: bool) -> Style {
    if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    }
}

/// Adjust `offset` so that `selected` lies within a window of `visible`
/// rows over `total` rows.
pub(crate) fn scroll_to_selection(offset: &mut usize, selected: usize, total: usize, visible: usize) {
    let visible = visible.max(1);

    if selected < *offset {
        *offset = selected;
    } else if selected >= *offset + visible {
        *offset = selected + 1 - visible;
    }

    *offset = (*offset).min(total.saturating_sub(visible));
}
