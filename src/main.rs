use std::io;
use std::path::PathBuf;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::Utc;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::widgets::{
    Axis, Bar, BarChart, BarGroup, Block, Borders, Chart, Dataset, GraphType, Paragraph, Wrap,
};

use scout_compare::coerce;
use scout_compare::config::AppConfig;
use scout_compare::export::export_comparison;
use scout_compare::feed::spawn_loader;
use scout_compare::fetch::ApiClient;
use scout_compare::logging;
use scout_compare::normalize::MetricCalibration;
use scout_compare::panels::ChartKind;
use scout_compare::presentation::{bar_series, radar_series, scatter_points};
use scout_compare::record::MergedRecord;
use scout_compare::schema::Position;
use scout_compare::selection::ToggleOutcome;
use scout_compare::state::{ComparisonView, Delta, LoadState, LoaderCommand, apply_delta};
use scout_compare::watchlist::SqliteWatchList;

const SERIES_COLORS: [Color; 6] = [
    Color::Cyan,
    Color::Yellow,
    Color::Green,
    Color::Magenta,
    Color::Red,
    Color::Blue,
];

struct App {
    view: ComparisonView,
    should_quit: bool,
    cmd_tx: mpsc::Sender<LoaderCommand>,
}

impl App {
    fn new(position: Position, selection_cap: usize, cmd_tx: mpsc::Sender<LoaderCommand>) -> Self {
        Self {
            view: ComparisonView::new(position, selection_cap),
            should_quit: false,
            cmd_tx,
        }
    }

    fn request_load(&mut self) {
        let cycle = self.view.begin_load();
        self.send_load(cycle);
    }

    fn switch_to(&mut self, position: Position) {
        let cycle = self.view.switch_position(position);
        self.send_load(cycle);
    }

    fn send_load(&mut self, cycle: u64) {
        let cmd = LoaderCommand::Load {
            cycle,
            position: self.view.position,
        };
        if self.cmd_tx.send(cmd).is_err() {
            self.view.load = LoadState::Failed("loader thread stopped".to_string());
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true
            }
            KeyCode::Tab => self.switch_to(self.view.position.next()),
            KeyCode::BackTab => self.switch_to(self.view.position.prev()),
            KeyCode::Char('b') | KeyCode::Esc => {
                if matches!(self.view.load, LoadState::Failed(_)) {
                    let back = self.view.previous_position.unwrap_or(self.view.position);
                    self.switch_to(back);
                }
            }
            KeyCode::Char('R') => self.request_load(),
            KeyCode::Char('j') | KeyCode::Down => self.view.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.view.select_prev(),
            KeyCode::Char(' ') | KeyCode::Enter => {
                if let Some(ToggleOutcome::Rejected) = self.view.toggle_at_cursor() {
                    let cap = self.view.selection.cap();
                    self.view
                        .push_log(format!("[INFO] selection full ({cap}); deselect someone first"));
                }
            }
            KeyCode::Char('c') => self.view.clear_selection(),
            KeyCode::Char('s') => self.view.cycle_sort_field(),
            KeyCode::Char('r') => self.view.flip_sort_direction(),
            KeyCode::Char('p') => self.view.cycle_panel(),
            KeyCode::Char('n') => self.view.toggle_relative_scale(),
            KeyCode::Char('x') => self.export(),
            _ => {}
        }
    }

    fn export(&mut self) {
        if self.view.load != LoadState::Ready {
            return;
        }
        let selected = self.view.selected_records();
        let records: Vec<&MergedRecord> = if selected.is_empty() {
            self.view.records.iter().collect()
        } else {
            selected
        };
        let path = PathBuf::from(format!(
            "scout_{}_{}.xlsx",
            self.view.position.slug(),
            Utc::now().format("%Y%m%d_%H%M%S")
        ));
        let line = match export_comparison(&path, self.view.position, &records) {
            Ok(report) => format!(
                "[INFO] exported {} players to {}",
                report.players,
                path.display()
            ),
            Err(err) => format!("[WARN] export failed: {err:#}"),
        };
        self.view.push_log(line);
    }
}

fn main() -> Result<()> {
    let config = AppConfig::from_env();
    match logging::init_file_logging(&config) {
        Ok(Some(path)) => tracing::info!(path = %path.display(), "logging to file"),
        Ok(None) => {}
        Err(err) => eprintln!("[WARN] logging disabled: {err:#}"),
    }

    let position = parse_position_arg().unwrap_or(Position::CentreBack);
    let db_path = config
        .db_path
        .clone()
        .context("unable to resolve watch-list db path (set SCOUT_DB_PATH)")?;
    let watchlist = SqliteWatchList::open(&db_path)?;
    let source = ApiClient::new(&config)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_loader(tx, cmd_rx, source, watchlist);

    let mut app = App::new(position, config.selection_cap, cmd_tx);
    app.view
        .push_log(format!("[INFO] api {} | db {}", config.api_base, db_path.display()));
    app.request_load();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn parse_position_arg() -> Option<Position> {
    let args = std::env::args().skip(1).collect::<Vec<_>>();
    for (idx, arg) in args.iter().enumerate() {
        if let Some(slug) = arg.strip_prefix("--position=") {
            return Position::from_slug(slug);
        }
        if arg == "--position" {
            return args.get(idx + 1).and_then(|s| Position::from_slug(s));
        }
    }
    None
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(200);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.view, delta);
        }

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.view))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match &app.view.load {
        LoadState::Idle | LoadState::Loading => {
            let msg = format!("Loading {}...", app.view.position.label());
            frame.render_widget(
                Paragraph::new(msg).block(Block::default().borders(Borders::ALL)),
                chunks[1],
            );
        }
        LoadState::Failed(err) => {
            let msg = format!(
                "Could not load {}.\n\n{err}\n\nPress b to go back, R to retry.",
                app.view.position.label()
            );
            frame.render_widget(
                Paragraph::new(msg)
                    .style(Style::default().fg(Color::Red))
                    .wrap(Wrap { trim: false })
                    .block(Block::default().title("Error").borders(Borders::ALL)),
                chunks[1],
            );
        }
        LoadState::Empty => {
            let msg = format!(
                "No watch-listed {} players with statistics.\n\nAdd some with: watchlist add {} <key>",
                app.view.position.label().to_lowercase(),
                app.view.position.slug()
            );
            frame.render_widget(
                Paragraph::new(msg).block(Block::default().borders(Borders::ALL)),
                chunks[1],
            );
        }
        LoadState::Ready => render_comparison(frame, chunks[1], &app.view),
    }

    let console = Paragraph::new(console_text(&app.view))
        .block(Block::default().title("Console").borders(Borders::TOP));
    frame.render_widget(console, chunks[2]);

    let help = Paragraph::new(
        "Tab pos  j/k move  space select  c clear  s sort  r dir  p panel  n scale  x export  R reload  q quit",
    )
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}

fn header_text(view: &ComparisonView) -> Line<'static> {
    let full = if view.selection.is_full() {
        Span::styled(" FULL", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))
    } else {
        Span::raw("")
    };
    Line::from(vec![
        Span::styled(
            format!(" {} ", view.position.label()),
            Style::default().fg(Color::Black).bg(Color::Cyan),
        ),
        Span::raw(format!(
            "  players {}  sort {}  selected {}/{}",
            view.records.len(),
            view.sort_label(),
            view.selection.len(),
            view.selection.cap()
        )),
        full,
    ])
}

fn render_comparison(frame: &mut Frame, area: Rect, view: &ComparisonView) {
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let list = Paragraph::new(player_list_text(view, columns[0].height as usize))
        .block(Block::default().title("Watch-list").borders(Borders::ALL));
    frame.render_widget(list, columns[0]);

    let selected = view.selected_records();
    let Some(panel) = view.current_panel() else {
        return;
    };
    let title = format!(
        "{} ({}/{}){}",
        panel.title,
        view.panel % view.panels().len().max(1) + 1,
        view.panels().len(),
        if view.relative_scale { " relative" } else { "" }
    );
    let calibrations: Vec<MetricCalibration> = panel
        .calibrations
        .iter()
        .map(|c| view.effective_calibration(c))
        .collect();
    let block = Block::default().title(title).borders(Borders::ALL);
    if selected.is_empty() {
        frame.render_widget(
            Paragraph::new(format!(
                "Select up to {} players with space to compare them.",
                view.selection.cap()
            ))
            .block(block),
            columns[1],
        );
        return;
    }

    match panel.kind {
        ChartKind::Bar => {
            let mut chart = BarChart::default()
                .block(block)
                .bar_width(3)
                .bar_gap(1)
                .group_gap(3)
                .max(100);
            for calib in &calibrations {
                let series = bar_series(&selected, calib);
                let bars: Vec<Bar> = series
                    .points
                    .iter()
                    .enumerate()
                    .map(|(idx, p)| {
                        Bar::default()
                            .value(p.scaled.round() as u64)
                            .text_value(coerce::fixed(p.raw, 1))
                            .style(Style::default().fg(SERIES_COLORS[idx % SERIES_COLORS.len()]))
                    })
                    .collect();
                chart = chart.data(
                    BarGroup::default()
                        .label(Line::from(series.field))
                        .bars(&bars),
                );
            }
            frame.render_widget(chart, columns[1]);
        }
        ChartKind::Radar => {
            let series = radar_series(&selected, &calibrations);
            let mut lines = Vec::new();
            for (axis_idx, axis) in calibrations.iter().map(|c| c.field).enumerate() {
                lines.push(Line::from(Span::styled(
                    axis.to_string(),
                    Style::default().add_modifier(Modifier::BOLD),
                )));
                for (idx, s) in series.iter().enumerate() {
                    let value = s.values.get(axis_idx).copied().unwrap_or(0.0);
                    let width = (value / 5.0).round() as usize;
                    lines.push(Line::from(vec![
                        Span::raw(format!("  {:<18}", truncate(&s.label, 18))),
                        Span::styled(
                            "█".repeat(width),
                            Style::default().fg(SERIES_COLORS[idx % SERIES_COLORS.len()]),
                        ),
                        Span::raw(format!(" {}", coerce::fixed(value, 0))),
                    ]));
                }
            }
            frame.render_widget(Paragraph::new(lines).block(block), columns[1]);
        }
        ChartKind::Scatter => {
            let (Some(x), Some(y)) = (calibrations.first(), calibrations.get(1)) else {
                return;
            };
            let points = scatter_points(&selected, x, y);
            let coords: Vec<[(f64, f64); 1]> = points.iter().map(|p| [(p.x, p.y)]).collect();
            let datasets: Vec<Dataset> = points
                .iter()
                .zip(coords.iter())
                .enumerate()
                .map(|(idx, (p, c))| {
                    Dataset::default()
                        .name(truncate(&p.label, 16))
                        .marker(symbols::Marker::Braille)
                        .graph_type(GraphType::Scatter)
                        .style(Style::default().fg(SERIES_COLORS[idx % SERIES_COLORS.len()]))
                        .data(c)
                })
                .collect();
            let chart = Chart::new(datasets)
                .block(block)
                .x_axis(
                    Axis::default()
                        .title(x.field)
                        .bounds([0.0, 100.0])
                        .labels(vec!["0".into(), "50".into(), "100".into()]),
                )
                .y_axis(
                    Axis::default()
                        .title(y.field)
                        .bounds([0.0, 100.0])
                        .labels(vec!["0".into(), "50".into(), "100".into()]),
                );
            frame.render_widget(chart, columns[1]);
        }
    }
}

fn player_list_text(view: &ComparisonView, height: usize) -> Vec<Line<'static>> {
    let records = view.visible_records();
    let visible = height.saturating_sub(2).max(1);
    let (start, end) = visible_range(view.cursor, records.len(), visible);
    let sort_field = view.sort.as_ref().map(|s| s.field.clone());

    records[start..end]
        .iter()
        .enumerate()
        .map(|(offset, r)| {
            let idx = start + offset;
            let cursor = if idx == view.cursor { ">" } else { " " };
            let mark = if r.selected { "[x]" } else { "[ ]" };
            let metric = sort_field
                .as_deref()
                .map(|f| coerce::to_display_fixed(r.value(f), 1))
                .unwrap_or_default();
            let text = format!(
                "{cursor}{mark} {:<20} {:<14} {metric}",
                truncate(&r.display_name(), 20),
                truncate(&r.team_name(), 14)
            );
            let mut style = Style::default();
            if idx == view.cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            if !r.selected && view.selection.is_full() {
                style = style.fg(Color::DarkGray);
            }
            Line::styled(text, style)
        })
        .collect()
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(view: &ComparisonView) -> String {
    view.logs
        .iter()
        .rev()
        .take(3)
        .rev()
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn truncate(raw: &str, max: usize) -> String {
    if raw.chars().count() <= max {
        raw.to_string()
    } else {
        let mut out: String = raw.chars().take(max.saturating_sub(1)).collect();
        out.push('…');
        out
    }
}
