//! Picker rendering
//!
//! - `colors`: palette
//! - branch list while browsing
//! - stash-or-abort prompt after a blocked checkout

mod colors;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

use crate::git::{BranchRef, IntentKind};
use crate::state::{BrowsingState, ConflictChoice, ConflictPrompt, Selector};

/// Render the selector. `max_visible` caps how many branches are listed at once.
pub fn render(frame: &mut Frame<'_>, selector: &Selector, max_visible: usize) {
    match selector {
        Selector::Browsing(state) => render_branch_list(frame, state, max_visible),
        Selector::ConflictPrompt(prompt) => render_conflict_prompt(frame, prompt),
        Selector::Done(_) => {}
    }
}

/// Create a centered rect with percentage width and absolute height
#[must_use]
pub fn centered_rect_absolute(percent_x: u16, height: u16, area: Rect) -> Rect {
    let height = height.min(area.height);
    let vertical_padding = area.height.saturating_sub(height) / 2;
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(vertical_padding),
            Constraint::Length(height),
            Constraint::Length(vertical_padding),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// First visible row so that the cursor stays on screen
const fn scroll_offset(cursor: usize, max_visible: usize) -> usize {
    if max_visible == 0 || cursor < max_visible {
        0
    } else {
        cursor + 1 - max_visible
    }
}

fn render_branch_list(frame: &mut Frame<'_>, state: &BrowsingState, max_visible: usize) {
    let max_visible = max_visible.max(1);
    // Filter line + blank + scroll indicator + blank + instructions + borders
    let chrome_lines: u16 = 7;
    let list_height = u16::try_from(max_visible).unwrap_or(u16::MAX);
    let area = centered_rect_absolute(60, chrome_lines.saturating_add(list_height), frame.area());

    let total_count = state.visible_indices().len();
    let cursor = state.cursor();
    let offset = scroll_offset(cursor, max_visible);

    let mut lines: Vec<Line<'_>> = vec![
        Line::from(vec![
            Span::styled("Filter: ", Style::default().fg(colors::TEXT_DIM)),
            Span::styled(
                format!("{}_", state.filter()),
                Style::default()
                    .fg(colors::TEXT_PRIMARY)
                    .bg(colors::INPUT_BG),
            ),
        ]),
        Line::from(""),
    ];

    for (idx, branch) in state
        .visible()
        .enumerate()
        .skip(offset)
        .take(max_visible)
    {
        lines.push(branch_line(branch, idx == cursor));
    }

    if total_count == 0 {
        lines.push(Line::from(Span::styled(
            "No matching branches",
            Style::default().fg(colors::TEXT_MUTED),
        )));
    }

    if let Some(indicator) = scroll_indicator(offset, max_visible, total_count) {
        lines.push(Line::from(Span::styled(
            indicator,
            Style::default().fg(colors::TEXT_MUTED),
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ select • Enter checkout • Esc cancel",
        Style::default().fg(colors::TEXT_MUTED),
    )));

    let title = if state.force() {
        " Switch Branch (force) "
    } else {
        " Switch Branch "
    };
    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::BORDER)),
        )
        .style(Style::default().bg(colors::MODAL_BG));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}

fn branch_line(branch: &BranchRef, is_selected: bool) -> Line<'static> {
    let base = if branch.is_current {
        Style::default().fg(colors::BRANCH_CURRENT)
    } else if branch.is_local {
        Style::default().fg(colors::TEXT_PRIMARY)
    } else {
        Style::default().fg(colors::BRANCH_REMOTE)
    };
    let style = if is_selected {
        base.bg(colors::SURFACE_HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    } else {
        base
    };
    let prefix = if is_selected { "▶ " } else { "  " };
    let marker = if branch.is_current { "* " } else { "  " };

    let mut spans = vec![Span::styled(
        format!("{prefix}{marker}{}", branch.name),
        style,
    )];
    if !branch.is_local {
        spans.push(Span::styled(
            " (remote)",
            Style::default().fg(colors::TEXT_MUTED),
        ));
    }
    Line::from(spans)
}

/// "more above/below" hint, when the list doesn't fit
fn scroll_indicator(offset: usize, max_visible: usize, total: usize) -> Option<String> {
    let hidden_above = offset;
    let hidden_below = total.saturating_sub(offset + max_visible);
    match (hidden_above > 0, hidden_below > 0) {
        (true, true) => Some(format!(
            "  ↑{hidden_above} more above, ↓{hidden_below} more below"
        )),
        (true, false) => Some(format!("  ↑{hidden_above} more above")),
        (false, true) => Some(format!("  ↓{hidden_below} more below")),
        (false, false) => None,
    }
}

fn render_conflict_prompt(frame: &mut Frame<'_>, prompt: &ConflictPrompt) {
    let intent = prompt.intent();
    let target = match intent.kind {
        IntentKind::Track => format!("{} (from remote)", intent.name),
        IntentKind::Local | IntentKind::Create => intent.name.clone(),
    };

    let mut lines: Vec<Line<'_>> = vec![
        Line::from(Span::styled(
            "Local Changes Would Be Overwritten",
            Style::default()
                .fg(colors::MODAL_BORDER_WARNING)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Checking out ", Style::default().fg(colors::TEXT_DIM)),
            Span::styled(
                target,
                Style::default()
                    .fg(colors::TEXT_PRIMARY)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                " would overwrite uncommitted changes.",
                Style::default().fg(colors::TEXT_DIM),
            ),
        ]),
        Line::from(""),
    ];

    for (idx, choice) in ConflictChoice::ALL.iter().enumerate() {
        let is_selected = idx == prompt.cursor();
        let accent = match choice {
            ConflictChoice::StashAndRetry => colors::ACCENT_POSITIVE,
            ConflictChoice::Abort => colors::ACCENT_NEGATIVE,
        };
        let style = if is_selected {
            Style::default()
                .fg(accent)
                .bg(colors::SURFACE_HIGHLIGHT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(colors::TEXT_PRIMARY)
        };
        let prefix = if is_selected { "▶ " } else { "  " };
        lines.push(Line::from(Span::styled(
            format!("{prefix}{}", choice.label()),
            style,
        )));
    }

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "↑/↓ select • Enter confirm • Esc abort",
        Style::default().fg(colors::TEXT_MUTED),
    )));

    // Height: content lines + 2 for borders
    let height = u16::try_from(lines.len() + 2).unwrap_or(u16::MAX);
    let area = centered_rect_absolute(60, height, frame.area());

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Checkout Blocked ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(colors::MODAL_BORDER_WARNING)),
        )
        .style(Style::default().bg(colors::MODAL_BG));

    frame.render_widget(Clear, area);
    frame.render_widget(paragraph, area);
}
