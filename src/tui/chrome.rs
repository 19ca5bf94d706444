// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

/// Header, footer, help overlay and style helpers used by TUI rendering.
fn phase_label(phase: Phase) -> &'static str {
    match phase {
        Phase::Idle => "add participants",
        Phase::Collecting => "collecting",
        Phase::LadderReady => "ladder ready",
        Phase::Animating => "drawing…",
        Phase::Revealed => "revealed",
    }
}

fn header_line(app: &App) -> Line<'static> {
    let revealed = app
        .session
        .round()
        .map(|round| format!("  {}/{} revealed", app.session.revealed().len(), round.len()));
    Line::from(vec![
        Span::styled(
            " AMIDA ",
            Style::default()
                .fg(Color::Black)
                .bg(FOOTER_KEY_COLOR)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(
            phase_label(app.session.phase()).to_owned(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  strategy: {}", app.session.strategy()),
            Style::default().fg(FOOTER_LABEL_COLOR),
        ),
        Span::styled(revealed.unwrap_or_default(), Style::default().fg(FOOTER_LABEL_COLOR)),
    ])
}

fn footer_line(app: &App) -> Line<'static> {
    if let Some(toast) = &app.toast {
        let color = if toast.is_error { ERROR_COLOR } else { Color::White };
        return Line::from(Span::styled(toast.message.clone(), Style::default().fg(color)));
    }

    let mut spans = Vec::<Span<'static>>::new();
    if app.session.round().is_some() {
        push_footer_entry(&mut spans, "PICK", "←/→");
        push_footer_entry(&mut spans, "DRAW", "Enter");
        push_footer_entry(&mut spans, "ALL", "a");
        push_footer_entry(&mut spans, "RESET", "r");
        push_footer_entry(&mut spans, "HELP", "?");
        push_footer_entry(&mut spans, "QUIT", "q");
    } else {
        push_footer_entry(&mut spans, "ADD", "Enter");
        push_footer_entry(&mut spans, "START", "Enter on empty");
        push_footer_entry(&mut spans, "REMOVE", "Del");
        push_footer_entry(&mut spans, "STRATEGY", "Tab");
        push_footer_entry(&mut spans, "HELP", "F1");
        push_footer_entry(&mut spans, "QUIT", "Esc");
    }
    Line::from(spans)
}

fn push_footer_entry(spans: &mut Vec<Span<'static>>, label: &str, key: &str) {
    if !spans.is_empty() {
        spans.push(Span::styled(" | ", Style::default().fg(FOOTER_LABEL_COLOR)));
    }
    spans.push(Span::styled(format!("{label}:"), Style::default().fg(FOOTER_LABEL_COLOR)));
    spans.push(Span::styled(key.to_owned(), help_key_style()));
}

fn roster_guide_lines(app: &App) -> Text<'static> {
    let needed = crate::lottery::MIN_PARTICIPANTS.saturating_sub(app.session.roster().len());
    let mut lines = vec![
        Line::from("Type a name and press Enter to add it."),
        Line::from("Press Enter on an empty line to draw the ladder."),
        Line::from(""),
        Line::from("Nobody can draw themselves: every name ends on someone else."),
    ];
    if needed > 0 {
        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            format!("{needed} more name(s) needed."),
            Style::default().fg(FOOTER_LABEL_COLOR),
        )));
    }
    Text::from(lines)
}

fn selection_style() -> Style {
    Style::default().add_modifier(Modifier::REVERSED | Modifier::BOLD)
}

fn cursor_style() -> Style {
    Style::default().fg(CURSOR_COLOR).add_modifier(Modifier::BOLD)
}

fn token_style() -> Style {
    Style::default().fg(TOKEN_COLOR).add_modifier(Modifier::BOLD)
}

fn path_style() -> Style {
    Style::default().fg(PATH_COLOR)
}

fn help_key_style() -> Style {
    Style::default().fg(FOOTER_KEY_COLOR).add_modifier(Modifier::BOLD)
}

fn help_header_style() -> Style {
    Style::default().fg(Color::White).add_modifier(Modifier::BOLD)
}

fn centered_rect(width_percent: u16, height_percent: u16, area: Rect) -> Rect {
    let vertical_margin = 100u16.saturating_sub(height_percent) / 2;
    let horizontal_margin = 100u16.saturating_sub(width_percent) / 2;

    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(vertical_margin),
            Constraint::Percentage(height_percent),
            Constraint::Percentage(vertical_margin),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(horizontal_margin),
            Constraint::Percentage(width_percent),
            Constraint::Percentage(horizontal_margin),
        ])
        .split(vertical[1])[1]
}

fn help_kv(key: &str, desc: &str, key_width: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{key:>key_width$}"), help_key_style()),
        Span::raw("  "),
        Span::raw(desc.to_owned()),
    ])
}

fn help_lines() -> Vec<Line<'static>> {
    const ROSTER: &[(&str, &str)] = &[
        ("type + Enter", "Add a participant"),
        ("Enter (empty)", "Draw the ladder"),
        ("↑/↓", "Select a participant"),
        ("Del", "Remove the selected participant"),
        ("Tab", "Switch strategy (direct / ladder)"),
        ("Esc", "Clear input, or quit when empty"),
    ];
    const ROUND: &[(&str, &str)] = &[
        ("←/→, h/l", "Move the cursor"),
        ("Enter/Space", "Send the token down the ladder"),
        ("a", "Reveal every result"),
        ("r", "Reset the round and keep the names"),
        ("q/Esc", "Quit"),
    ];

    let key_width =
        ROSTER.iter().chain(ROUND).map(|(key, _)| key.chars().count()).max().unwrap_or(0);
    let mut lines = vec![Line::from(Span::styled("--- Participants ---", help_header_style()))];
    lines.extend(ROSTER.iter().map(|(key, desc)| help_kv(key, desc, key_width)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled("--- Ladder ---", help_header_style())));
    lines.extend(ROUND.iter().map(|(key, desc)| help_kv(key, desc, key_width)));
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "? / F1 / Esc closes this help.",
        Style::default().fg(Color::DarkGray),
    )));
    lines
}

fn render_help(frame: &mut Frame<'_>, main_area: Rect) {
    let area = centered_rect(70, 70, main_area);
    frame.render_widget(Clear, area);
    let paragraph = Paragraph::new(Text::from(help_lines()))
        .block(Block::default().borders(Borders::ALL).title(" Help "))
        .wrap(Wrap { trim: false });
    frame.render_widget(paragraph, area);
}
