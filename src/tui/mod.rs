//! Ratatui-based terminal UI.
//!
//! A single-window form with twelve labeled inputs, three actions (Predict,
//! Reset, Show Graphs), and a result area. An optional charts screen renders
//! exploratory plots over the bundled dataset.
//!
//! Handlers are synchronous and run to completion; each prediction attempt is
//! stateless and independent. Recoverable errors surface as a blocking modal
//! dialog and never touch the field contents.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
};

use crate::data::HousingSummary;
use crate::domain::{AppConfig, FEATURE_SCHEMA, FIELD_COUNT, RawInput};
use crate::error::AppError;
use crate::infer::run_predict;
use crate::model::Predictor;
use crate::report::format_price;

mod charts;
mod plotters_chart;

/// Start the TUI with a loaded, schema-checked model.
pub fn run(config: AppConfig, model: crate::model::LinearModel) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::new(4, format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(config, model);
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::new(4, format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::new(4, format!("Failed to enter alternate screen: {e}")));
        }
        Ok(Self)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Screen {
    Form,
    Charts,
}

/// A blocking notification; the form is inert until it is dismissed.
struct Dialog {
    title: &'static str,
    message: String,
}

struct App<M: Predictor> {
    config: AppConfig,
    model: M,
    inputs: [String; FIELD_COUNT],
    selected: usize,
    result: Option<String>,
    dialog: Option<Dialog>,
    screen: Screen,
    charts: Option<HousingSummary>,
    status: String,
}

impl<M: Predictor> App<M> {
    fn new(config: AppConfig, model: M) -> Self {
        Self {
            config,
            model,
            inputs: Default::default(),
            selected: 0,
            result: None,
            dialog: None,
            screen: Screen::Form,
            charts: None,
            status: "Fill the fields, then press Enter to predict.".to_string(),
        }
    }

    fn event_loop<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal
                    .draw(|f| self.draw(f))
                    .map_err(|e| AppError::new(4, format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::new(4, format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::new(4, format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code, key.modifiers) {
                        break;
                    }
                    needs_redraw = true;
                }
                Event::Resize(_, _) => {
                    needs_redraw = true;
                }
                _ => {}
            }
        }
        Ok(())
    }

    /// Returns `true` when the application should exit.
    fn handle_key(&mut self, code: KeyCode, mods: KeyModifiers) -> bool {
        // A dialog blocks everything until dismissed; fields keep their values.
        if self.dialog.is_some() {
            if matches!(code, KeyCode::Enter | KeyCode::Esc) {
                self.dialog = None;
            }
            return false;
        }

        if self.screen == Screen::Charts {
            if matches!(code, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('g')) {
                self.screen = Screen::Form;
            }
            return false;
        }

        if mods.contains(KeyModifiers::CONTROL) {
            match code {
                KeyCode::Char('p') => self.predict_price(),
                KeyCode::Char('r') => self.reset_fields(),
                KeyCode::Char('g') => self.show_graphs(),
                KeyCode::Char('q') | KeyCode::Char('c') => return true,
                _ => {}
            }
            return false;
        }

        match code {
            KeyCode::Esc => return true,
            KeyCode::Enter => self.predict_price(),
            KeyCode::Tab | KeyCode::Down => {
                self.selected = (self.selected + 1) % FIELD_COUNT;
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.selected = (self.selected + FIELD_COUNT - 1) % FIELD_COUNT;
            }
            KeyCode::Backspace => {
                self.inputs[self.selected].pop();
            }
            KeyCode::Char(c) => self.inputs[self.selected].push(c),
            _ => {}
        }
        false
    }

    /// The Predict action: run the shim over a fresh input record.
    fn predict_price(&mut self) {
        let raw = RawInput::new(self.inputs.clone());
        match run_predict(&raw, &self.model) {
            Ok(prediction) => {
                self.result = Some(format_price(prediction.price));
                self.status = "Prediction complete.".to_string();
            }
            Err(err) => {
                self.dialog = Some(Dialog {
                    title: err.title(),
                    message: err.to_string(),
                });
            }
        }
    }

    /// The Reset action: clear every field and the result area. Cannot fail.
    fn reset_fields(&mut self) {
        for value in &mut self.inputs {
            value.clear();
        }
        self.result = None;
        self.status = "Fields cleared.".to_string();
    }

    /// The Show Graphs action. The dataset is loaded lazily on first use; a
    /// load failure is reported in the status line without leaving the form.
    fn show_graphs(&mut self) {
        if self.charts.is_none() {
            match crate::data::load_housing_summary(&self.config.data_path) {
                Ok(summary) => {
                    self.status = if summary.row_errors.is_empty() {
                        format!("Dataset loaded: {} rows.", summary.rows_used)
                    } else {
                        format!(
                            "Dataset loaded: {} rows used, {} skipped.",
                            summary.rows_used,
                            summary.row_errors.len()
                        )
                    };
                    self.charts = Some(summary);
                }
                Err(err) => {
                    self.status = format!("Could not load dataset: {err}");
                    return;
                }
            }
        }
        self.screen = Screen::Charts;
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();

        if self.screen == Screen::Charts {
            if let Some(summary) = &self.charts {
                charts::draw(frame, size, summary);
            }
            return;
        }

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Min(FIELD_COUNT as u16 + 2),
                Constraint::Length(3),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_form(frame, chunks[1]);
        self.draw_result(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);

        if let Some(dialog) = &self.dialog {
            draw_dialog(frame, size, dialog);
        }
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let line = Line::from(vec![
            Span::styled(
                "House Price Predictor",
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("  ({})", self.config.model_path.display()),
                Style::default().fg(Color::Gray),
            ),
        ]);
        let p = Paragraph::new(line)
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_form(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let items: Vec<ListItem> = FEATURE_SCHEMA
            .iter()
            .zip(&self.inputs)
            .enumerate()
            .map(|(idx, (spec, value))| {
                let cursor = if idx == self.selected { "_" } else { "" };
                ListItem::new(format!(
                    "{:<18} {value}{cursor}",
                    format!("{}:", capitalize(spec.name))
                ))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Inputs").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected));
        frame.render_stateful_widget(list, area, &mut state);
    }

    fn draw_result(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let text = match &self.result {
            Some(result) => Span::styled(
                result.clone(),
                Style::default()
                    .fg(Color::Green)
                    .add_modifier(Modifier::BOLD),
            ),
            None => Span::styled(
                FEATURE_SCHEMA[self.selected].hint,
                Style::default().fg(Color::Gray),
            ),
        };
        let p = Paragraph::new(Line::from(text))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help = "Enter predict  ^R reset  ^G graphs  Tab/↑/↓ move  Esc quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn draw_dialog(frame: &mut ratatui::Frame<'_>, size: Rect, dialog: &Dialog) {
    let area = centered_rect(size, 60, 20);
    frame.render_widget(Clear, area);

    let mut text = Text::from(dialog.message.clone());
    text.push_line(Line::from(Span::styled(
        "(Enter to dismiss)",
        Style::default().fg(Color::Gray),
    )));

    let p = Paragraph::new(text)
        .wrap(Wrap { trim: true })
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .title(dialog.title)
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        );
    frame.render_widget(p, area);
}

fn centered_rect(size: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let width = (size.width * percent_x / 100).max(20).min(size.width);
    let height = (size.height * percent_y / 100).max(5).min(size.height);
    Rect {
        x: size.x + (size.width - width) / 2,
        y: size.y + (size.height - height) / 2,
        width,
        height,
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
