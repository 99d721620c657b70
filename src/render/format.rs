use std::fmt::Write as _;

use owo_colors::OwoColorize;

use crate::inspect::classify::Icon;
use crate::inspect::events::WindowLabel;
use crate::inspect::PodReport;
use crate::types::format_ts;

const COLUMN_GAP: &str = "  ";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Style {
    Plain,
    Title,
    Header,
    Good,
    Notice,
    Bad,
}

struct Cell {
    text: String,
    style: Style,
}

impl Cell {
    fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: Style::Plain,
        }
    }

    fn styled(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }
}

/// Borderless table; widths are measured before coloring.
struct Table {
    rows: Vec<Vec<Cell>>,
}

impl Table {
    fn new(headers: &[&str]) -> Self {
        let header = headers.iter().map(|h| Cell::styled(*h, Style::Header)).collect();
        Self { rows: vec![header] }
    }

    fn push(&mut self, row: Vec<Cell>) {
        self.rows.push(row);
    }

    fn render(&self, fmt: &HumanFormatter, out: &mut String) {
        let columns = self.rows.iter().map(Vec::len).max().unwrap_or(0);
        let mut widths = vec![0usize; columns];
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.text.chars().count());
            }
        }

        for row in &self.rows {
            let mut line = String::new();
            for (i, cell) in row.iter().enumerate() {
                let last = i + 1 == row.len();
                let text = if last {
                    cell.text.clone()
                } else {
                    pad(&cell.text, widths[i])
                };
                line.push_str(&fmt.paint(text, cell.style));
                if !last {
                    line.push_str(COLUMN_GAP);
                }
            }
            out.push_str(line.trim_end());
            out.push('\n');
        }
    }
}

fn pad(s: &str, width: usize) -> String {
    format!("{s:<width$}", width = width)
}

/// Human-readable tables for a [`PodReport`].
#[derive(Clone, Copy, Debug)]
pub struct HumanFormatter {
    color: bool,
}

impl HumanFormatter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn paint(&self, text: String, style: Style) -> String {
        if !self.color {
            return text;
        }
        match style {
            Style::Plain => text,
            Style::Title => text.cyan().to_string(),
            Style::Header | Style::Notice => text.yellow().to_string(),
            Style::Good => text.green().to_string(),
            Style::Bad => text.red().to_string(),
        }
    }

    pub fn format(&self, report: &PodReport) -> String {
        let mut out = String::new();

        let _ = writeln!(
            out,
            "{}{} / {}",
            self.paint("Pod:  ".to_string(), Style::Title),
            report.namespace,
            report.pod_name
        );
        let _ = writeln!(
            out,
            "{}{}\n",
            self.paint("Node: ".to_string(), Style::Title),
            report.node_name
        );

        if let Some(failure) = &report.total_failure {
            let _ = writeln!(out, "Phase:     {}", failure.phase);
            let _ = writeln!(out, "Reason:    {}", failure.reason);
            let _ = writeln!(out, "Message:   {}", failure.message);
            return out;
        }

        self.containers(report, &mut out);
        self.conditions(report, &mut out);
        self.events(report, &mut out);
        self.logs(report, &mut out);

        out
    }

    fn containers(&self, report: &PodReport, out: &mut String) {
        let _ = writeln!(out, "{}\n", self.paint("Containers:".to_string(), Style::Title));

        let mut table = Table::new(&["Type", "Name", "State", "RC", "Ready", "Image"]);
        for record in &report.containers {
            let (state, icon, message) = match &record.verdict {
                Some(v) => (v.state.as_str(), Some(v.icon), v.message.as_str()),
                None => ("", None, ""),
            };

            let rc = if record.restart_count > 0 {
                Cell::styled(record.restart_count.to_string(), Style::Notice)
            } else {
                Cell::plain(record.restart_count.to_string())
            };

            table.push(vec![
                Cell::plain(record.kind.code()),
                Cell::plain(record.name.clone()),
                Cell::plain(state),
                rc,
                icon.map(icon_cell).unwrap_or_else(|| Cell::plain("")),
                Cell::plain(record.image.clone()),
            ]);

            for line in message.lines() {
                let mut row: Vec<Cell> = (0..5).map(|_| Cell::plain("")).collect();
                row.push(Cell::plain(line));
                table.push(row);
            }
        }
        table.render(self, out);
    }

    fn conditions(&self, report: &PodReport, out: &mut String) {
        if report.failed_conditions.is_empty() {
            return;
        }

        let _ = writeln!(
            out,
            "\n{}\n",
            self.paint("Failed Pod Conditions:".to_string(), Style::Title)
        );

        let mut table = Table::new(&["Condition", "Reason", "Message"]);
        for c in &report.failed_conditions {
            table.push(vec![
                Cell::plain(c.type_.clone()),
                Cell::plain(c.reason.clone()),
                Cell::plain(c.message.clone()),
            ]);
        }
        table.render(self, out);
    }

    fn events(&self, report: &PodReport, out: &mut String) {
        let window = &report.event_window;
        if window.is_empty() {
            return;
        }

        let title = match window.label {
            WindowLabel::AllEvents => "Pod events:".to_string(),
            WindowLabel::SingleMostRecent => "Last pod event:".to_string(),
            WindowLabel::LastN(n) => format!("Last {n} pod events:"),
        };
        let _ = writeln!(out, "\n{}\n", self.paint(title, Style::Title));

        let mut table = Table::new(&["Last Seen", "Type", "Reason", "Message"]);
        for ev in &window.events {
            table.push(vec![
                Cell::plain(ev.timestamp.as_ref().map(format_ts).unwrap_or_default()),
                Cell::plain(ev.type_.clone()),
                Cell::plain(ev.reason.clone()),
                Cell::plain(ev.message.clone()),
            ]);
        }
        table.render(self, out);
    }

    fn logs(&self, report: &PodReport, out: &mut String) {
        let header = match report.log_tail_lines {
            0 => "logs:".to_string(),
            1 => "logs (last line):".to_string(),
            n => format!("logs (last {n} lines):"),
        };

        for (container, text) in &report.container_logs {
            let _ = write!(
                out,
                "\n{} {container} {}\n\n{text}",
                self.paint("Container".to_string(), Style::Title),
                self.paint(header.clone(), Style::Title),
            );
            if !text.ends_with('\n') {
                out.push('\n');
            }
        }
    }
}

fn icon_cell(icon: Icon) -> Cell {
    let (glyph, style) = match icon {
        Icon::Check => ("✔", Style::Good),
        Icon::Cross => ("✖", Style::Bad),
        Icon::Ellipsis => ("…", Style::Notice),
        Icon::Question => ("?", Style::Plain),
    };
    Cell::styled(glyph, style)
}
