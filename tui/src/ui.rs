//! Terminal rendering and key mapping for the SweeperKeeper client

use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{prelude::*, widgets::*};
use std::time::Duration;
use sweeperkeeper_app::{AppSnapshot, HomeScreen, Notification, NotificationLevel, Route, Tab};
use sweeperkeeper_core::AccountId;

const TICK: Duration = Duration::from_millis(100);

pub enum UserEvent {
    Quit,
    Redraw,
    Tick,
    Type(LoginField, char),
    Backspace(LoginField),
    TogglePassword,
    SubmitLogin,
    SelectTab(Tab),
    Refresh,
    Claim(AccountId),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

#[derive(Debug, Default)]
pub struct UiState {
    mode: Mode,
    focus: LoginField,
    selected: usize,
}

#[derive(Debug, Default)]
enum Mode {
    #[default]
    Normal,
    ConfirmClaim(AccountId),
    Notice(Notification),
}

impl UiState {
    /// A notification is shown until dismissed; later ones wait their turn
    pub fn wants_notice(&self) -> bool {
        matches!(self.mode, Mode::Normal)
    }

    pub fn show_notice(&mut self, notice: Notification) {
        self.mode = Mode::Notice(notice);
    }

    fn clamp_selection(&mut self, len: usize) {
        self.selected = self.selected.min(len.saturating_sub(1));
    }
}

pub fn draw(frame: &mut Frame, state: &mut UiState, snap: &AppSnapshot) {
    state.clamp_selection(snap.accounts.len());
    frame.render_widget(Clear, frame.area());

    match snap.route {
        Route::Login => draw_login(frame, state, snap),
        Route::MainTabs => draw_tabs(frame, state, snap),
    }

    match &state.mode {
        Mode::Normal => {}
        Mode::ConfirmClaim(id) => {
            let area = centered_rect(50, 20, frame.area());
            frame.render_widget(Clear, area);
            let text = vec![
                Line::from(format!("Account {}", id)),
                Line::from("Are you sure you want to claim coins for this account?"),
                Line::from(""),
                Line::from("y: claim   n/Esc: cancel").dim(),
            ];
            frame.render_widget(
                Paragraph::new(text)
                    .wrap(Wrap { trim: true })
                    .block(Block::bordered().title("Claim Coins")),
                area,
            );
        }
        Mode::Notice(notice) => {
            let area = centered_rect(50, 25, frame.area());
            frame.render_widget(Clear, area);
            let color = match notice.level {
                NotificationLevel::Success => Color::Green,
                NotificationLevel::Error => Color::Red,
            };
            let mut text = vec![Line::from(notice.message.clone())];
            if let Some(detail) = &notice.detail {
                text.push(Line::from(detail.clone()).dim());
            }
            text.push(Line::from(""));
            text.push(Line::from("Enter/Esc: OK").dim());
            frame.render_widget(
                Paragraph::new(text).wrap(Wrap { trim: true }).block(
                    Block::bordered()
                        .title(notice.title.clone())
                        .border_style(Style::default().fg(color)),
                ),
                area,
            );
        }
    }
}

fn draw_login(frame: &mut Frame, state: &UiState, snap: &AppSnapshot) {
    let area = centered_rect(60, 60, frame.area());
    let [title, user, pass, help] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(1),
    ])
    .areas(area);

    frame.render_widget(
        Paragraph::new("SweeperKeeper Login")
            .bold()
            .alignment(Alignment::Center),
        title,
    );

    let field_style = |field: LoginField| {
        if state.focus == field {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        }
    };
    frame.render_widget(
        Paragraph::new(snap.username.as_str()).block(
            Block::bordered()
                .title("Username")
                .border_style(field_style(LoginField::Username)),
        ),
        user,
    );
    let pass_title = if snap.password_visible {
        "Password (visible)"
    } else {
        "Password"
    };
    frame.render_widget(
        Paragraph::new(snap.password_display.as_str()).block(
            Block::bordered()
                .title(pass_title)
                .border_style(field_style(LoginField::Password)),
        ),
        pass,
    );
    frame.render_widget(
        Paragraph::new("Tab: switch field   Ctrl+R: show/hide password   Enter: login   Ctrl+C: quit")
            .dim()
            .wrap(Wrap { trim: true }),
        help,
    );
}

fn draw_tabs(frame: &mut Frame, state: &UiState, snap: &AppSnapshot) {
    let [header, body, footer] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());

    let active = snap.active_tab.unwrap_or(Tab::Home);
    let selected = Tab::ALL.iter().position(|t| *t == active).unwrap_or(0);
    let user = snap.logged_in_as.as_deref().unwrap_or_default();
    frame.render_widget(
        Tabs::new(Tab::ALL.iter().enumerate().map(|(i, t)| format!("{} {}", i + 1, t)))
            .select(selected)
            .highlight_style(Style::default().fg(Color::Yellow).bold())
            .block(Block::bordered().title(format!("SweeperKeeper - {}", user))),
        header,
    );

    match active {
        Tab::Home => {
            let text = vec![
                Line::from(HomeScreen::TITLE).bold(),
                Line::from(HomeScreen::SUBTITLE),
            ];
            frame.render_widget(
                Paragraph::new(text)
                    .alignment(Alignment::Center)
                    .block(Block::bordered()),
                body,
            );
        }
        Tab::Dashboard => {
            let items: Vec<ListItem> = snap
                .accounts
                .iter()
                .map(|a| {
                    let pending = snap.pending_claims.contains(&a.id);
                    let action = if pending { "claiming..." } else { "[c] claim" };
                    let line = Line::from(vec![
                        Span::raw(format!("{:<20}", a.casino)),
                        Span::styled(format!("{:>12} coins  ", a.coins.to_string()), Style::default().fg(Color::Cyan)),
                        Span::styled(
                            action,
                            if pending {
                                Style::default().dim()
                            } else {
                                Style::default().fg(Color::Green)
                            },
                        ),
                    ]);
                    ListItem::new(line)
                })
                .collect();
            let mut list_state = ListState::default();
            if !snap.accounts.is_empty() {
                list_state.select(Some(state.selected));
            }
            frame.render_stateful_widget(
                List::new(items)
                    .block(Block::bordered().title("Dashboard"))
                    .highlight_style(Style::default().reversed())
                    .highlight_symbol("> "),
                body,
                &mut list_state,
            );
        }
        Tab::Casinos => {
            let items: Vec<ListItem> = snap
                .casinos
                .iter()
                .map(|c| ListItem::new(c.name.clone()))
                .collect();
            frame.render_widget(
                List::new(items).block(Block::bordered().title("Supported Casinos")),
                body,
            );
        }
    }

    frame.render_widget(
        Paragraph::new("1-3/←→: tabs   ↑↓: select   c: claim   r: refresh   Ctrl+C: quit").dim(),
        footer,
    );
}

/// Wait up to one tick for a key press
pub fn next_event(state: &mut UiState, snap: &AppSnapshot) -> std::io::Result<UserEvent> {
    if !event::poll(TICK)? {
        return Ok(UserEvent::Tick);
    }
    match event::read()? {
        Event::Key(key) if key.kind == KeyEventKind::Press => Ok(handle_key(state, snap, key)),
        Event::Resize(..) => Ok(UserEvent::Redraw),
        _ => Ok(UserEvent::Tick),
    }
}

pub fn handle_key(state: &mut UiState, snap: &AppSnapshot, key: KeyEvent) -> UserEvent {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    if ctrl && key.code == KeyCode::Char('c') {
        return UserEvent::Quit;
    }

    // Modals block everything underneath
    match &state.mode {
        Mode::Notice(_) => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                state.mode = Mode::Normal;
            }
            return UserEvent::Redraw;
        }
        Mode::ConfirmClaim(id) => {
            let event = match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => UserEvent::Claim(id.clone()),
                KeyCode::Char('n') | KeyCode::Esc => UserEvent::Redraw,
                _ => return UserEvent::Redraw,
            };
            state.mode = Mode::Normal;
            return event;
        }
        Mode::Normal => {}
    }

    match snap.route {
        Route::Login => match key.code {
            KeyCode::Char('r') if ctrl => UserEvent::TogglePassword,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                state.focus = match state.focus {
                    LoginField::Username => LoginField::Password,
                    LoginField::Password => LoginField::Username,
                };
                UserEvent::Redraw
            }
            KeyCode::Enter => UserEvent::SubmitLogin,
            KeyCode::Backspace => UserEvent::Backspace(state.focus),
            KeyCode::Char(c) if !ctrl => UserEvent::Type(state.focus, c),
            _ => UserEvent::Redraw,
        },
        Route::MainTabs => {
            let active = snap.active_tab.unwrap_or(Tab::Home);
            match key.code {
                KeyCode::Char('1') => UserEvent::SelectTab(Tab::Home),
                KeyCode::Char('2') => UserEvent::SelectTab(Tab::Dashboard),
                KeyCode::Char('3') => UserEvent::SelectTab(Tab::Casinos),
                KeyCode::Right => UserEvent::SelectTab(active.next()),
                KeyCode::Left => UserEvent::SelectTab(active.previous()),
                KeyCode::Char('r') => UserEvent::Refresh,
                KeyCode::Up if active == Tab::Dashboard => {
                    state.selected = state.selected.saturating_sub(1);
                    UserEvent::Redraw
                }
                KeyCode::Down if active == Tab::Dashboard => {
                    if state.selected + 1 < snap.accounts.len() {
                        state.selected += 1;
                    }
                    UserEvent::Redraw
                }
                KeyCode::Char('c') if active == Tab::Dashboard => {
                    if let Some(account) = snap.accounts.get(state.selected) {
                        if !snap.pending_claims.contains(&account.id) {
                            state.mode = Mode::ConfirmClaim(account.id.clone());
                        }
                    }
                    UserEvent::Redraw
                }
                _ => UserEvent::Redraw,
            }
        }
    }
}

fn centered_rect(w_percent: u16, h_percent: u16, r: Rect) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - h_percent) / 2),
        Constraint::Percentage(h_percent),
        Constraint::Percentage((100 - h_percent) / 2),
    ])
    .areas(r);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - w_percent) / 2),
        Constraint::Percentage(w_percent),
        Constraint::Percentage((100 - w_percent) / 2),
    ])
    .areas(middle);

    center
}
