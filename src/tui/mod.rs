//! Ratatui-based terminal UI.
//!
//! The TUI shows the income-statement table with live filter fields and
//! sortable columns. Every edit re-derives the visible rows from the raw
//! dataset through the same pipeline the CLI uses; nothing is filtered
//! incrementally, so toggling bounds back and forth can't drift.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Cell, List, ListItem, Paragraph, Row, Table, TableState},
    Terminal,
};

use crate::app::pipeline::derive_view;
use crate::cli::ViewArgs;
use crate::data::FmpClient;
use crate::domain::{
    FilterCriteria, FilterField, FilterInputs, IncomeRecord, Period, SortColumn, SortDirection,
    SortSpec,
};
use crate::error::AppError;
use crate::report::format::fmt_usd;

/// Start the TUI.
pub fn run(args: ViewArgs) -> Result<(), AppError> {
    let _guard = TerminalGuard::new()?;

    let backend = ratatui::backend::CrosstermBackend::new(io::stdout());
    let mut terminal = Terminal::new(backend)
        .map_err(|e| AppError::data(format!("Failed to initialize terminal: {e}")))?;

    let mut app = App::new(args)?;
    app.event_loop(&mut terminal)
}

/// Ensures the terminal is restored (raw mode, alternate screen) on exit.
struct TerminalGuard;

impl TerminalGuard {
    fn new() -> Result<Self, AppError> {
        enable_raw_mode().map_err(|e| AppError::data(format!("Failed to enable raw mode: {e}")))?;
        if let Err(e) = execute!(io::stdout(), EnterAlternateScreen) {
            let _ = disable_raw_mode();
            return Err(AppError::data(format!("Failed to enter alternate screen: {e}")));
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

struct App {
    symbol: String,
    period: Period,
    client: FmpClient,
    /// The raw dataset for the session; replaced only by a fresh fetch.
    raw: Vec<IncomeRecord>,
    inputs: FilterInputs,
    sort: SortSpec,
    /// Derived rows, recomputed from `raw` on every state change.
    rows: Vec<IncomeRecord>,
    selected_field: usize,
    editing: bool,
    table_state: TableState,
    status: String,
}

impl App {
    fn new(args: ViewArgs) -> Result<Self, AppError> {
        let client = FmpClient::from_env()?;
        let mut app = Self {
            symbol: args.symbol.trim().to_ascii_uppercase(),
            period: args.period,
            client,
            raw: Vec::new(),
            inputs: crate::app::filter_inputs_from_args(&args),
            sort: crate::app::sort_spec_from_args(&args),
            rows: Vec::new(),
            selected_field: 0,
            editing: false,
            table_state: TableState::default(),
            status: "Fetching income statements...".to_string(),
        };
        app.refetch();
        Ok(app)
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
                    .map_err(|e| AppError::data(format!("Terminal draw error: {e}")))?;
                needs_redraw = false;
            }

            if !event::poll(Duration::from_millis(100))
                .map_err(|e| AppError::data(format!("Event poll error: {e}")))?
            {
                continue;
            }

            match event::read().map_err(|e| AppError::data(format!("Event read error: {e}")))? {
                Event::Key(key) => {
                    if key.kind != KeyEventKind::Press {
                        continue;
                    }
                    if self.handle_key(key.code) {
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

    /// Handle one key press; returns true to quit.
    fn handle_key(&mut self, code: KeyCode) -> bool {
        if self.editing {
            self.handle_field_edit(code);
            return false;
        }

        match code {
            KeyCode::Char('q') => return true,
            KeyCode::Up => {
                if self.selected_field > 0 {
                    self.selected_field -= 1;
                }
            }
            KeyCode::Down => {
                if self.selected_field + 1 < FilterField::ALL.len() {
                    self.selected_field += 1;
                }
            }
            KeyCode::Enter => {
                self.editing = true;
                let field = self.selected_field_id();
                self.status = format!(
                    "Editing {} ({}). Enter/Esc to stop.",
                    field.label().to_lowercase(),
                    if field.is_date() { "YYYY-MM-DD" } else { "amount" },
                );
            }
            KeyCode::Char('1') => self.activate_sort(SortColumn::Date),
            KeyCode::Char('2') => self.activate_sort(SortColumn::Revenue),
            KeyCode::Char('3') => self.activate_sort(SortColumn::NetIncome),
            KeyCode::Char('x') => {
                self.inputs.clear();
                self.sort.reset();
                self.recompute();
                self.status = "Filters and sort reset.".to_string();
            }
            KeyCode::Char('f') => self.refetch(),
            KeyCode::Char('j') => self.scroll_rows(1),
            KeyCode::Char('k') => self.scroll_rows(-1),
            _ => {}
        }

        false
    }

    fn handle_field_edit(&mut self, code: KeyCode) {
        match code {
            KeyCode::Esc | KeyCode::Enter => {
                self.editing = false;
                self.status = self.filter_summary();
            }
            KeyCode::Backspace => {
                let field = self.selected_field_id();
                self.inputs.field_mut(field).pop();
                self.recompute();
            }
            KeyCode::Char(c) => {
                let field = self.selected_field_id();
                let accepted = if field.is_date() {
                    c.is_ascii_digit() || c == '-'
                } else {
                    c.is_ascii_digit() || matches!(c, '-' | '.' | '$' | ',' | '_' | 'e' | 'E' | '+')
                };
                if accepted {
                    self.inputs.field_mut(field).push(c);
                    self.recompute();
                }
            }
            _ => {}
        }
    }

    fn selected_field_id(&self) -> FilterField {
        FilterField::ALL[self.selected_field.min(FilterField::ALL.len() - 1)]
    }

    fn activate_sort(&mut self, column: SortColumn) {
        self.sort = self.sort.activate(column);
        self.recompute();
        self.status = match self.sort.direction_for(column) {
            Some(SortDirection::Ascending) => format!("Sorting by {} ascending.", column.label()),
            Some(SortDirection::Descending) => format!("Sorting by {} descending.", column.label()),
            None => "Unsorted.".to_string(),
        };
    }

    fn scroll_rows(&mut self, delta: i32) {
        if self.rows.is_empty() {
            self.table_state.select(None);
            return;
        }
        let current = self.table_state.selected().unwrap_or(0) as i32;
        let next = (current + delta).clamp(0, self.rows.len() as i32 - 1);
        self.table_state.select(Some(next as usize));
    }

    /// Re-derive the visible rows from the raw dataset.
    fn recompute(&mut self) {
        let criteria = FilterCriteria::from_inputs(&self.inputs);
        self.rows = derive_view(&self.raw, &criteria, self.sort);
        if self.rows.is_empty() {
            self.table_state.select(None);
        } else if let Some(sel) = self.table_state.selected()
            && sel >= self.rows.len()
        {
            self.table_state.select(Some(self.rows.len() - 1));
        }
    }

    /// Fetch a fresh dataset. On failure the previous dataset is kept and the
    /// error is shown in the status line; a fetch is never retried on its own.
    fn refetch(&mut self) {
        match self.client.fetch_income_statements(&self.symbol, self.period) {
            Ok(raw) => {
                self.raw = raw;
                self.sort.reset();
                self.table_state.select(None);
                self.recompute();
                self.status = format!("Fetched {} statements.", self.raw.len());
            }
            Err(err) => {
                self.recompute();
                self.status = format!("Fetch failed: {err}");
            }
        }
    }

    fn filter_summary(&self) -> String {
        let criteria = FilterCriteria::from_inputs(&self.inputs);
        if criteria.is_empty() {
            "No active filters.".to_string()
        } else {
            format!("Showing {} of {} statements.", self.rows.len(), self.raw.len())
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let size = frame.area();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(4),
                Constraint::Min(0),
                Constraint::Length(10),
                Constraint::Length(3),
            ])
            .split(size);

        self.draw_header(frame, chunks[0]);
        self.draw_table(frame, chunks[1]);
        self.draw_filters(frame, chunks[2]);
        self.draw_footer(frame, chunks[3]);
    }

    fn draw_header(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let mut lines: Vec<Line> = Vec::new();
        lines.push(Line::from(vec![
            Span::styled("sv", Style::default().fg(Color::Cyan)),
            Span::raw(" — income statements"),
        ]));
        lines.push(Line::from(Span::styled(
            format!(
                "symbol: {} | period: {} | fetched: {} | showing: {} | sort: {}",
                self.symbol,
                self.period.query_value(),
                self.raw.len(),
                self.rows.len(),
                sort_summary(self.sort),
            ),
            Style::default().fg(Color::Gray),
        )));

        let p = Paragraph::new(Text::from(lines)).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }

    fn draw_table(&mut self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let header = Row::new(vec![
            header_cell("Date", Some(SortColumn::Date), self.sort),
            header_cell("Revenue", Some(SortColumn::Revenue), self.sort),
            header_cell("Net Income", Some(SortColumn::NetIncome), self.sort),
            header_cell("Gross Profit", None, self.sort),
            header_cell("Op. Income", None, self.sort),
            header_cell("EPS", None, self.sort),
        ])
        .style(Style::default().add_modifier(Modifier::BOLD));

        let rows: Vec<Row> = self
            .rows
            .iter()
            .map(|r| {
                Row::new(vec![
                    Cell::from(r.date.to_string()),
                    Cell::from(fmt_usd(r.revenue)),
                    Cell::from(fmt_usd(r.net_income)),
                    Cell::from(fmt_usd(r.gross_profit)),
                    Cell::from(fmt_usd(r.operating_income)),
                    Cell::from(format!("{:.2}", r.eps)),
                ])
            })
            .collect();

        let widths = [
            Constraint::Length(12),
            Constraint::Length(20),
            Constraint::Length(20),
            Constraint::Length(20),
            Constraint::Length(20),
            Constraint::Length(8),
        ];

        let title = if self.rows.is_empty() {
            "Statements (no rows match the current filters)"
        } else {
            "Statements"
        };

        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().title(title).borders(Borders::ALL))
            .row_highlight_style(Style::default().fg(Color::Black).bg(Color::White));

        frame.render_stateful_widget(table, area, &mut self.table_state);
    }

    fn draw_filters(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let criteria = FilterCriteria::from_inputs(&self.inputs);

        let items: Vec<ListItem> = FilterField::ALL
            .iter()
            .map(|field| {
                let raw = self.inputs.field(*field);
                let shown = if raw.is_empty() { "-" } else { raw };
                // Non-empty text that resolves to no bound is being ignored;
                // say so instead of silently showing a dead filter.
                let ignored = !raw.trim().is_empty() && !bound_is_active(*field, &criteria);
                let suffix = if ignored { "  (ignored)" } else { "" };
                ListItem::new(format!("{}: {shown}{suffix}", field.label()))
            })
            .collect();

        let list = List::new(items)
            .block(Block::default().title("Filters").borders(Borders::ALL))
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White))
            .highlight_symbol("» ");

        let mut state = ratatui::widgets::ListState::default();
        state.select(Some(self.selected_field));
        frame.render_stateful_widget(list, area, &mut state);

        if self.editing {
            let hint = Paragraph::new("Editing…")
                .style(Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
            let rect = Rect {
                x: area.x + 2,
                y: area.y + area.height.saturating_sub(2),
                width: area.width.saturating_sub(4),
                height: 1,
            };
            frame.render_widget(hint, rect);
        }
    }

    fn draw_footer(&self, frame: &mut ratatui::Frame<'_>, area: Rect) {
        let help =
            "↑/↓ select  Enter edit  1/2/3 sort date/revenue/net  x reset  f refetch  j/k scroll  q quit";
        let line = Line::from(vec![
            Span::styled(help, Style::default().fg(Color::Gray)),
            Span::raw(" | "),
            Span::styled(&self.status, Style::default().fg(Color::Yellow)),
        ]);
        let p = Paragraph::new(line).block(Block::default().borders(Borders::ALL));
        frame.render_widget(p, area);
    }
}

fn header_cell(name: &str, column: Option<SortColumn>, spec: SortSpec) -> Cell<'static> {
    let (label, active) = match column.and_then(|c| spec.direction_for(c)) {
        Some(SortDirection::Ascending) => (format!("{name} ↑"), true),
        Some(SortDirection::Descending) => (format!("{name} ↓"), true),
        None => (name.to_string(), false),
    };
    let style = if active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };
    Cell::from(label).style(style)
}

fn sort_summary(spec: SortSpec) -> String {
    match spec {
        SortSpec::Unsorted => "none".to_string(),
        SortSpec::By { column, direction } => format!(
            "{} {}",
            column.label().to_lowercase(),
            match direction {
                SortDirection::Ascending => "asc",
                SortDirection::Descending => "desc",
            }
        ),
    }
}

fn bound_is_active(field: FilterField, criteria: &FilterCriteria) -> bool {
    match field {
        FilterField::StartDate => criteria.start_date.is_some(),
        FilterField::EndDate => criteria.end_date.is_some(),
        FilterField::RevenueMin => criteria.revenue_min.is_some(),
        FilterField::RevenueMax => criteria.revenue_max.is_some(),
        FilterField::NetIncomeMin => criteria.net_income_min.is_some(),
        FilterField::NetIncomeMax => criteria.net_income_max.is_some(),
    }
}
