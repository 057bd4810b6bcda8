//! IPC TUI Dashboard Module
//! ========================
//!
//! Real-time terminal dashboard over the simulated IPC activity.
//! Uses Ratatui for rendering and Crossbeam for metric delivery.
//!
//! Enable with the `dashboard` feature flag.
//!
//! Features:
//! - Header with session uptime
//! - Stat tiles (events / active processes / avg latency / issues)
//! - Avg-latency sparkline (last 100 refreshes)
//! - Live event table, unresolved issue panel, mechanism distribution

use std::collections::VecDeque;
use std::io;
use std::time::Duration;

use crossbeam::channel::Receiver;
use crossterm::{
    event::{self, Event, KeyCode},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph, Row, Sparkline, Table},
    Frame, Terminal,
};

use crate::model::{EventStatus, Severity};
use crate::view::DashboardView;

/// Snapshot sent from the simulation driver to the TUI each refresh.
#[derive(Debug, Clone)]
pub struct MetricPacket {
    /// Seconds since the session started.
    pub uptime_secs: u64,

    /// The renderable snapshot for this refresh.
    pub view: DashboardView,
}

/// Formats an uptime as HH:MM:SS.
pub fn format_uptime(secs: u64) -> String {
    format!("{:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60)
}

fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Critical | Severity::High => Color::Red,
        Severity::Medium => Color::Yellow,
        Severity::Low => Color::DarkGray,
    }
}

fn status_color(status: EventStatus) -> Color {
    match status {
        EventStatus::Success => Color::Green,
        EventStatus::Pending => Color::Yellow,
        EventStatus::Failed => Color::Red,
    }
}

/// TUI dashboard for the IPC activity stream.
pub struct IpcDashboard {
    rx: Receiver<MetricPacket>,
    latency_history: VecDeque<u64>,
    latest: Option<MetricPacket>,
    frame_count: usize,
}

impl IpcDashboard {
    /// Create a new dashboard with the metric receiver channel.
    pub fn new(rx: Receiver<MetricPacket>) -> Self {
        Self {
            rx,
            latency_history: VecDeque::with_capacity(100),
            latest: None,
            frame_count: 0,
        }
    }

    /// Run the TUI main loop (blocks until 'q' or Esc).
    pub fn run(&mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        loop {
            // Non-blocking receive of refresh packets
            while let Ok(packet) = self.rx.try_recv() {
                let latency_val = (packet.view.stats.avg_latency_ms * 100.0) as u64;
                self.latency_history.push_back(latency_val);
                if self.latency_history.len() > 100 {
                    self.latency_history.pop_front();
                }
                self.latest = Some(packet);
            }

            terminal.draw(|f| self.ui(f))?;
            self.frame_count += 1;

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.code == KeyCode::Char('q') || key.code == KeyCode::Esc {
                        break;
                    }
                }
            }
        }

        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        Ok(())
    }

    fn ui(&self, f: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .margin(1)
            .constraints([
                Constraint::Length(3),  // Header
                Constraint::Length(3),  // Stat tiles
                Constraint::Length(5),  // Latency sparkline
                Constraint::Min(8),     // Event table
                Constraint::Length(7),  // Issues
                Constraint::Length(7),  // Distribution
                Constraint::Length(1),  // Footer
            ])
            .split(f.area());

        let uptime = self
            .latest
            .as_ref()
            .map(|p| format_uptime(p.uptime_secs))
            .unwrap_or_else(|| "00:00:00".to_string());

        let header = Paragraph::new(Line::from(vec![
            Span::styled("IPC Activity Dashboard", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  |  "),
            Span::styled(format!("uptime {}", uptime), Style::default().fg(Color::Cyan)),
            Span::raw("  |  "),
            Span::raw(format!("Frame: {}", self.frame_count)),
        ]))
        .block(Block::default().borders(Borders::BOTTOM));
        f.render_widget(header, chunks[0]);

        self.render_stat_tiles(f, chunks[1]);
        self.render_sparkline(f, chunks[2]);
        self.render_event_table(f, chunks[3]);
        self.render_issues(f, chunks[4]);
        self.render_distribution(f, chunks[5]);

        let footer = Paragraph::new("Press 'q' to quit")
            .style(Style::default().fg(Color::DarkGray));
        f.render_widget(footer, chunks[6]);
    }

    fn render_stat_tiles(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let tiles = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
                Constraint::Percentage(25),
            ])
            .split(area);

        let stats = self.latest.as_ref().map(|p| p.view.stats);

        let total = stats.map(|s| s.total_events).unwrap_or(0);
        let tile = Paragraph::new(format!("{}", total))
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().title("Events").borders(Borders::ALL));
        f.render_widget(tile, tiles[0]);

        let active = stats.map(|s| s.active_processes).unwrap_or(0);
        let tile = Paragraph::new(format!("{}", active))
            .style(Style::default().fg(Color::Green))
            .block(Block::default().title("Active Procs").borders(Borders::ALL));
        f.render_widget(tile, tiles[1]);

        let latency = stats.map(|s| s.avg_latency_ms).unwrap_or(0.0);
        let tile = Paragraph::new(format!("{:.2}ms", latency))
            .style(Style::default().fg(Color::Cyan))
            .block(Block::default().title("Avg Latency").borders(Borders::ALL));
        f.render_widget(tile, tiles[2]);

        let issues = stats.map(|s| s.active_issues).unwrap_or(0);
        let issue_color = if issues > 5 {
            Color::Red
        } else if issues > 2 {
            Color::Yellow
        } else {
            Color::Green
        };
        let tile = Paragraph::new(format!("{}", issues))
            .style(Style::default().fg(issue_color).add_modifier(Modifier::BOLD))
            .block(Block::default().title("Active Issues").borders(Borders::ALL));
        f.render_widget(tile, tiles[3]);
    }

    fn render_sparkline(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let data: Vec<u64> = self.latency_history.iter().cloned().collect();
        let sparkline = Sparkline::default()
            .block(Block::default().title("Avg Latency (last 100 refreshes)").borders(Borders::ALL))
            .data(&data)
            .style(Style::default().fg(Color::Cyan));
        f.render_widget(sparkline, area);
    }

    fn render_event_table(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let header_cells = ["Source", "Target", "Mechanism", "Op", "Size", "Latency"]
            .iter()
            .map(|h| Span::styled(*h, Style::default().add_modifier(Modifier::BOLD)));
        let header = Row::new(header_cells).height(1);

        let rows: Vec<Row> = self
            .latest
            .iter()
            .flat_map(|p| p.view.events.iter())
            .take(area.height.saturating_sub(3) as usize)
            .map(|e| {
                Row::new(vec![
                    Span::raw(e.source_name.clone()),
                    Span::raw(e.target_name.clone()),
                    Span::raw(e.mechanism.as_str()),
                    Span::raw(e.operation.clone()),
                    Span::raw(format!("{:.1}KB", e.message_size_bytes as f64 / 1024.0)),
                    Span::styled(
                        format!("{:.2}ms", e.latency_ms),
                        Style::default().fg(status_color(e.status)),
                    ),
                ])
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Length(12),
                Constraint::Length(12),
                Constraint::Length(14),
                Constraint::Length(10),
                Constraint::Length(10),
                Constraint::Length(10),
            ],
        )
        .header(header)
        .block(Block::default().title("IPC Events").borders(Borders::ALL));
        f.render_widget(table, area);
    }

    fn render_issues(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let lines: Vec<Line> = match self.latest.as_ref() {
            Some(p) if !p.view.issues.is_empty() => p
                .view
                .issues
                .iter()
                .map(|issue| {
                    Line::from(vec![
                        Span::styled(
                            format!("{} ", issue.severity.as_str()),
                            Style::default()
                                .fg(severity_color(issue.severity))
                                .add_modifier(Modifier::BOLD),
                        ),
                        Span::raw(format!(
                            "{}: {} [{}]",
                            issue.kind,
                            issue.description,
                            issue.affected.join(", ")
                        )),
                    ])
                })
                .collect(),
            _ => vec![Line::from(Span::styled(
                "No active issues detected",
                Style::default().fg(Color::DarkGray),
            ))],
        };

        let panel = Paragraph::new(lines)
            .block(Block::default().title("Active Issues").borders(Borders::ALL));
        f.render_widget(panel, area);
    }

    fn render_distribution(&self, f: &mut Frame, area: ratatui::layout::Rect) {
        let slots = match self.latest.as_ref() {
            Some(p) => &p.view.distribution,
            None => return,
        };

        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints(vec![Constraint::Length(1); slots.len()])
            .split(
                Block::default()
                    .title("Mechanism Distribution")
                    .borders(Borders::ALL)
                    .inner(area),
            );
        f.render_widget(
            Block::default().title("Mechanism Distribution").borders(Borders::ALL),
            area,
        );

        for (slot, row) in slots.iter().zip(rows.iter()) {
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(Color::Cyan))
                .percent(slot.percentage.round() as u16)
                .label(format!("{} {} ({:.1}%)", slot.label, slot.count, slot.percentage));
            f.render_widget(gauge, *row);
        }
    }
}
