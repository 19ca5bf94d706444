// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Amida-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Amida and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Two screens share one [`Session`]: the roster editor while no round exists, and the ladder view
//! once a round is drawn. Animation frames are scheduled under the epoch returned by
//! [`Session::select_participant`]; the loop delivers them with [`Session::tick`], so a reset
//! between two frames simply turns the next one stale.

use std::{
    error::Error,
    io,
    time::{Duration, Instant},
};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use rand::rngs::StdRng;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use crate::config::Config;
use crate::lottery::Strategy;
use crate::model::AddOutcome;
use crate::render::{
    concealed_lanes, render_results, render_round_unicode, LadderRender, LadderRenderOptions,
    TokenPosition,
};
use crate::session::{Phase, Round, Session, TickOutcome};

const TOKEN_COLOR: Color = Color::LightYellow;
const PATH_COLOR: Color = Color::LightGreen;
const CURSOR_COLOR: Color = Color::LightCyan;
const ERROR_COLOR: Color = Color::LightRed;
const FOOTER_LABEL_COLOR: Color = Color::Gray;
const FOOTER_KEY_COLOR: Color = Color::Cyan;
const IDLE_POLL: Duration = Duration::from_millis(250);
const TOAST_TTL: Duration = Duration::from_secs(3);
const CURSOR_MARKER: char = '▼';

/// Runs the interactive lottery until the user quits.
pub fn run(config: Config, names: &[String]) -> Result<(), Box<dyn Error>> {
    let mut session = Session::new(config.strategy);
    for name in names {
        session.add_participant(name)?;
    }

    let mut app = App::new(session, config.rng(), config.frame_interval);
    let mut terminal = TerminalSession::new()?;
    tracing::info!(participants = names.len(), strategy = %config.strategy, "tui started");

    while !app.should_quit {
        terminal.draw(|frame| draw(frame, &mut app))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.handle_key(key);
                }
            }
        }
        app.on_tick(Instant::now());
    }

    Ok(())
}

fn draw(frame: &mut Frame<'_>, app: &mut App) {
    let area = frame.size();
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0), Constraint::Length(1)])
        .split(area);
    let (header_area, main_area, status_area) = (layout[0], layout[1], layout[2]);

    frame.render_widget(Paragraph::new(header_line(app)), header_area);

    if app.session.round().is_some() {
        draw_round(frame, app, main_area);
    } else {
        draw_roster(frame, app, main_area);
    }

    app.expire_toast(Instant::now());
    frame.render_widget(Paragraph::new(footer_line(app)), status_area);

    if app.show_help {
        render_help(frame, main_area);
    }
}

fn draw_roster(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(panes[0]);

    let items = app
        .session
        .roster()
        .iter()
        .enumerate()
        .map(|(idx, participant)| ListItem::new(format!("{:>2}. {participant}", idx + 1)))
        .collect::<Vec<_>>();
    let title = format!(" Participants ({}) ", app.session.roster().len());
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(selection_style())
        .highlight_symbol("› ");
    frame.render_stateful_widget(list, left[0], &mut app.roster_state);

    let input = Paragraph::new(app.input.clone())
        .block(Block::default().borders(Borders::ALL).title(" Add name "));
    frame.render_widget(input, left[1]);
    let max_x = left[1].x.saturating_add(left[1].width.saturating_sub(2));
    let cursor_x = left[1]
        .x
        .saturating_add(1)
        .saturating_add(u16::try_from(app.input.chars().count()).unwrap_or(u16::MAX))
        .min(max_x);
    frame.set_cursor(cursor_x, left[1].y.saturating_add(1));

    let guide = Paragraph::new(roster_guide_lines(app))
        .block(Block::default().borders(Borders::ALL).title(" How to play "))
        .wrap(Wrap { trim: false });
    frame.render_widget(guide, panes[1]);
}

fn draw_round(frame: &mut Frame<'_>, app: &mut App, area: Rect) {
    let results_width = area.width.saturating_mul(2) / 5;
    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(results_width)])
        .split(area);

    let ladder = Paragraph::new(app.ladder_text())
        .block(Block::default().borders(Borders::ALL).title(" Ladder "));
    frame.render_widget(ladder, panes[0]);

    let results = Paragraph::new(app.results_text())
        .block(Block::default().borders(Borders::ALL).title(" Results "))
        .wrap(Wrap { trim: false });
    frame.render_widget(results, panes[1]);
}

// Header, footer, help overlay and shared styles.
include!("chrome.rs");

#[derive(Debug, Clone)]
struct Toast {
    message: String,
    is_error: bool,
    expires_at: Instant,
}

/// The next animation frame, tagged with the epoch of the animation it belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingFrame {
    epoch: u64,
    due: Instant,
}

struct App {
    session: Session,
    rng: StdRng,
    frame_interval: Duration,
    input: String,
    roster_state: ListState,
    cursor: usize,
    pending_frame: Option<PendingFrame>,
    show_help: bool,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    fn new(session: Session, rng: StdRng, frame_interval: Duration) -> Self {
        let mut roster_state = ListState::default();
        if !session.roster().is_empty() {
            roster_state.select(Some(session.roster().len() - 1));
        }

        Self {
            session,
            rng,
            frame_interval,
            input: String::new(),
            roster_state,
            cursor: 0,
            pending_frame: None,
            show_help: false,
            toast: None,
            should_quit: false,
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        self.handle_key_code_at(key.code, Instant::now());
    }

    /// Returns whether the key did anything.
    fn handle_key_code_at(&mut self, code: KeyCode, now: Instant) -> bool {
        if self.show_help {
            return match code {
                KeyCode::Char('?') | KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q') => {
                    self.show_help = false;
                    true
                }
                _ => false,
            };
        }

        if self.session.round().is_some() {
            self.handle_round_key(code, now)
        } else {
            self.handle_roster_key(code, now)
        }
    }

    fn handle_roster_key(&mut self, code: KeyCode, now: Instant) -> bool {
        match code {
            KeyCode::Char(ch) => {
                self.input.push(ch);
                true
            }
            KeyCode::Backspace => self.input.pop().is_some(),
            KeyCode::Enter if self.input.trim().is_empty() => {
                self.input.clear();
                self.start_round(now)
            }
            KeyCode::Enter => self.commit_input(now),
            KeyCode::Up => self.move_roster_selection(-1),
            KeyCode::Down => self.move_roster_selection(1),
            KeyCode::Delete => self.remove_selected(now),
            KeyCode::Tab => {
                let next = match self.session.strategy() {
                    Strategy::Direct => Strategy::Ladder,
                    Strategy::Ladder => Strategy::Direct,
                };
                self.session.set_strategy(next);
                self.set_toast(format!("Strategy: {next}"), now);
                true
            }
            KeyCode::F(1) => {
                self.show_help = true;
                true
            }
            KeyCode::Esc if self.input.is_empty() => {
                self.should_quit = true;
                true
            }
            KeyCode::Esc => {
                self.input.clear();
                true
            }
            _ => false,
        }
    }

    fn handle_round_key(&mut self, code: KeyCode, now: Instant) -> bool {
        let len = self.session.round().map_or(0, Round::len);
        match code {
            KeyCode::Left | KeyCode::Char('h') => {
                self.cursor = self.cursor.saturating_sub(1);
                true
            }
            KeyCode::Right | KeyCode::Char('l') => {
                self.cursor = (self.cursor + 1).min(len.saturating_sub(1));
                true
            }
            KeyCode::Home => {
                self.cursor = 0;
                true
            }
            KeyCode::End => {
                self.cursor = len.saturating_sub(1);
                true
            }
            KeyCode::Enter | KeyCode::Char(' ') => self.animate_cursor(now),
            KeyCode::Char('a') => self.reveal_all(now),
            KeyCode::Char('r') => {
                self.session.reset();
                self.pending_frame = None;
                self.cursor = 0;
                self.set_toast("Round reset; participants kept", now);
                true
            }
            KeyCode::Char('?') | KeyCode::F(1) => {
                self.show_help = true;
                true
            }
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
                true
            }
            _ => false,
        }
    }

    fn commit_input(&mut self, now: Instant) -> bool {
        let raw = std::mem::take(&mut self.input);
        match self.session.add_participant(&raw) {
            Ok(AddOutcome::Added { index }) => {
                self.roster_state.select(Some(index));
                true
            }
            Ok(AddOutcome::Duplicate { index }) => {
                self.roster_state.select(Some(index));
                self.set_toast(format!("{} is already in the list", raw.trim()), now);
                true
            }
            Ok(AddOutcome::Blank) => false,
            Err(err) => {
                self.set_error(err.to_string(), now);
                false
            }
        }
    }

    fn remove_selected(&mut self, now: Instant) -> bool {
        let Some(index) = self.roster_state.selected() else {
            return false;
        };
        match self.session.remove_participant(index) {
            Ok(removed) => {
                let len = self.session.roster().len();
                self.roster_state.select((len > 0).then(|| index.min(len - 1)));
                self.set_toast(format!("Removed {removed}"), now);
                true
            }
            Err(err) => {
                self.set_error(err.to_string(), now);
                false
            }
        }
    }

    fn move_roster_selection(&mut self, delta: isize) -> bool {
        let len = self.session.roster().len();
        if len == 0 {
            return false;
        }
        let current = self.roster_state.selected().unwrap_or(0);
        let next = current.saturating_add_signed(delta).min(len - 1);
        self.roster_state.select(Some(next));
        next != current
    }

    fn start_round(&mut self, now: Instant) -> bool {
        let summary = match self.session.start(&mut self.rng) {
            Ok(round) => format!(
                "{} participants, {} rungs ({})",
                round.len(),
                round.ladder().rungs().len(),
                round.strategy()
            ),
            Err(err) => {
                self.set_error(err.to_string(), now);
                return false;
            }
        };
        self.cursor = 0;
        self.pending_frame = None;
        self.set_toast(format!("Ladder ready: {summary}"), now);
        true
    }

    fn animate_cursor(&mut self, now: Instant) -> bool {
        match self.session.select_participant(self.cursor) {
            Ok(epoch) => {
                self.pending_frame = Some(PendingFrame { epoch, due: now + self.frame_interval });
                true
            }
            Err(err) => {
                self.set_error(err.to_string(), now);
                false
            }
        }
    }

    fn reveal_all(&mut self, now: Instant) -> bool {
        match self.session.reveal_all() {
            Ok(reveals) => {
                self.set_toast(format!("Revealed {} results", reveals.len()), now);
                true
            }
            Err(err) => {
                self.set_error(err.to_string(), now);
                false
            }
        }
    }

    /// Delivers every frame that is due by `now`.
    fn on_tick(&mut self, now: Instant) {
        while let Some(pending) = self.pending_frame {
            if pending.due > now {
                break;
            }

            match self.session.tick(pending.epoch) {
                TickOutcome::Advanced { .. } => {
                    self.pending_frame =
                        Some(PendingFrame { due: pending.due + self.frame_interval, ..pending });
                }
                TickOutcome::Finished(reveal) => {
                    self.pending_frame = None;
                    self.set_toast(format!("{} → {}", reveal.participant, reveal.outcome), now);
                    self.move_cursor_to_unrevealed();
                }
                TickOutcome::Stale => {
                    tracing::debug!(epoch = pending.epoch, "dropping stale frame");
                    self.pending_frame = None;
                }
            }
        }
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        self.pending_frame
            .map_or(IDLE_POLL, |pending| pending.due.saturating_duration_since(now))
            .min(IDLE_POLL)
    }

    fn move_cursor_to_unrevealed(&mut self) {
        let len = self.session.round().map_or(0, Round::len);
        if let Some(next) = (1..=len)
            .map(|offset| (self.cursor + offset) % len)
            .find(|column| !self.session.is_revealed(*column))
        {
            self.cursor = next;
        }
    }

    fn set_toast(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        self.toast = Some(Toast { message, is_error: false, expires_at: now + TOAST_TTL });
    }

    fn set_error(&mut self, message: impl Into<String>, now: Instant) {
        let message = message.into();
        tracing::debug!(%message, "command rejected");
        self.toast = Some(Toast { message, is_error: true, expires_at: now + TOAST_TTL });
    }

    fn expire_toast(&mut self, now: Instant) {
        if self.toast.as_ref().is_some_and(|toast| toast.expires_at <= now) {
            self.toast = None;
        }
    }

    fn render_options(&self, round: &Round) -> LadderRenderOptions {
        let token = self
            .session
            .animation()
            .map(|animation| TokenPosition {
                start: animation.start(),
                rows_done: animation.rows_done(),
            })
            .or_else(|| {
                self.session
                    .last_reveal()
                    .map(|reveal| TokenPosition { start: reveal.column, rows_done: usize::MAX })
            });
        LadderRenderOptions {
            token,
            concealed: concealed_lanes(round.assignment(), self.session.revealed()),
        }
    }

    fn ladder_text(&self) -> Text<'static> {
        let Some(round) = self.session.round() else {
            return Text::default();
        };
        let render = match render_round_unicode(round, &self.render_options(round)) {
            Ok(render) => render,
            Err(err) => {
                return Text::from(Line::from(Span::styled(
                    format!("cannot draw ladder: {err}"),
                    Style::default().fg(ERROR_COLOR),
                )));
            }
        };

        let mut lines = Vec::with_capacity(render.bottom_label_y + 2);
        let marker = render
            .lane_x
            .get(self.cursor)
            .map(|x| format!("{}{CURSOR_MARKER}", " ".repeat(*x)))
            .unwrap_or_default();
        lines.push(Line::from(Span::styled(marker, cursor_style())));
        lines.extend(
            render
                .text
                .split('\n')
                .enumerate()
                .map(|(y, line)| styled_ladder_line(y, line, &render)),
        );
        Text::from(lines)
    }

    fn results_text(&self) -> Text<'static> {
        let Some(round) = self.session.round() else {
            return Text::default();
        };
        let results = render_results(round, self.session.revealed());
        if results.is_empty() {
            return Text::from(Line::from(Span::styled(
                "Pick a name with ←/→ and press Enter.",
                Style::default().fg(FOOTER_LABEL_COLOR),
            )));
        }
        Text::from(results.lines().map(|line| Line::from(line.to_owned())).collect::<Vec<_>>())
    }
}

/// Splits one rendered ladder line into spans, styling the token and the travelled path.
fn styled_ladder_line(y: usize, line: &str, render: &LadderRender) -> Line<'static> {
    let style_at = |x: usize| {
        if render.token == Some((x, y)) {
            token_style()
        } else if render.path.iter().any(|&(py, x0, x1)| py == y && (x0..=x1).contains(&x)) {
            path_style()
        } else {
            Style::default()
        }
    };

    let mut spans = Vec::<Span<'static>>::new();
    let mut run = String::new();
    let mut run_style = Style::default();
    for (x, ch) in line.chars().enumerate() {
        let style = style_at(x);
        if style != run_style && !run.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut run), run_style));
        }
        run_style = style;
        run.push(ch);
    }
    if !run.is_empty() {
        spans.push(Span::styled(run, run_style));
    }
    Line::from(spans)
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        if let Err(err) = execute!(stdout, EnterAlternateScreen) {
            teardown_terminal();
            return Err(err.into());
        }

        let mut terminal = match Terminal::new(CrosstermBackend::new(stdout)) {
            Ok(terminal) => terminal,
            Err(err) => {
                teardown_terminal();
                return Err(err.into());
            }
        };
        if let Err(err) = terminal.clear() {
            teardown_terminal();
            return Err(err.into());
        }

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let _ = execute!(io::stdout(), LeaveAlternateScreen);
}
