//! JSON and terminal card output.

use owo_colors::{OwoColorize, Style};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::models::{DateKey, Event, EventBuckets, EventKind};

/// Everything the presenters need for one run.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct Report {
    pub title: String,
    pub source: String,
    pub events: EventBuckets,
}

/// Display styles, keyed by event type.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    pub conference: Style,
    pub meetup: Style,
    pub other: Style,
    pub border: Style,
    pub heading: Style,
    pub muted: Style,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            conference: Style::new().magenta(),
            meetup: Style::new().cyan(),
            other: Style::new().yellow(),
            border: Style::new().dimmed(),
            heading: Style::new().bold(),
            muted: Style::new().dimmed(),
        }
    }
}

impl Theme {
    /// No escape codes at all, for pipes and tests.
    pub fn plain() -> Self {
        Theme {
            conference: Style::new(),
            meetup: Style::new(),
            other: Style::new(),
            border: Style::new(),
            heading: Style::new(),
            muted: Style::new(),
        }
    }

    pub fn style_for(&self, kind: &EventKind) -> Style {
        match kind {
            EventKind::Conference => self.conference,
            EventKind::Meetup => self.meetup,
            EventKind::Other(_) => self.other,
        }
    }
}

pub fn render_json(report: &Report) -> Result<String> {
    Ok(serde_json::to_string_pretty(report)?)
}

enum Row {
    Text { plain: String, styled: String },
    Blank,
    Rule,
}

impl Row {
    fn styled(plain: impl Into<String>, style: Style) -> Row {
        let plain = plain.into();
        let styled = plain.style(style).to_string();
        Row::Text { plain, styled }
    }

    fn width(&self) -> usize {
        match self {
            Row::Text { plain, .. } => display_width(plain),
            Row::Blank | Row::Rule => 0,
        }
    }
}

/// Column width of `text`, one column per `char`. Double-width glyphs
/// (CJK, emoji) are undercounted and push the right border out.
fn display_width(text: &str) -> usize {
    text.chars().count()
}

fn display_date(key: &DateKey) -> Result<String> {
    let date = key
        .to_date()
        .ok_or_else(|| Error::DateFormat(key.to_string()))?;
    Ok(date.format("%b %d, %Y").to_string())
}

fn event_row(event: &Event, name_width: usize, theme: &Theme) -> Result<Row> {
    let date = display_date(&event.start)?;
    let name = format!("{:<name_width$}", event.name);
    let plain = format!("  {date}  {name}  {}", event.location);
    let styled = format!(
        "  {}  {}  {}",
        date.style(theme.muted),
        name.style(theme.style_for(&event.kind)),
        event.location.style(theme.muted)
    );
    Ok(Row::Text { plain, styled })
}

fn legend_row(events: &EventBuckets, theme: &Theme) -> Row {
    let mut kinds = vec![EventKind::Conference, EventKind::Meetup];
    let has_other = events
        .iter()
        .flat_map(|(_, bucket)| bucket.iter())
        .any(|event| matches!(event.kind, EventKind::Other(_)));
    if has_other {
        kinds.push(EventKind::Other("other".to_string()));
    }

    let mut plain = Vec::new();
    let mut styled = Vec::new();
    for kind in &kinds {
        let label = match kind {
            EventKind::Other(_) => "other",
            known => known.as_str(),
        };
        plain.push(format!("● {label}"));
        styled.push(format!("{} {}", "●".style(theme.style_for(kind)), label.style(theme.muted)));
    }

    Row::Text {
        plain: plain.join("   "),
        styled: styled.join("   "),
    }
}

/// Renders the bordered panel: title, one section per non-empty role and a
/// legend for the type colors.
pub fn render_card(report: &Report, theme: &Theme) -> Result<String> {
    let name_width = report
        .events
        .iter()
        .flat_map(|(_, bucket)| bucket.iter())
        .map(|event| display_width(&event.name))
        .max()
        .unwrap_or(0);

    let mut rows = vec![Row::styled(report.title.as_str(), theme.heading), Row::Rule];

    if report.events.is_empty() {
        rows.push(Row::styled("No upcoming events", theme.muted));
    } else {
        let mut first = true;
        for (role, bucket) in report.events.iter() {
            if bucket.is_empty() {
                continue;
            }
            if !first {
                rows.push(Row::Blank);
            }
            first = false;
            rows.push(Row::styled(role.heading(), theme.heading));
            for event in bucket {
                rows.push(event_row(event, name_width, theme)?);
            }
        }
    }

    rows.push(Row::Rule);
    rows.push(legend_row(&report.events, theme));

    let width = rows.iter().map(Row::width).max().unwrap_or(0);
    let horizontal = "─".repeat(width + 2);
    let side = "│".style(theme.border).to_string();

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(format!("╭{horizontal}╮").style(theme.border).to_string());
    for row in &rows {
        let line = match row {
            Row::Text { plain, styled } => {
                let padding = " ".repeat(width - display_width(plain));
                format!("{side} {styled}{padding} {side}")
            }
            Row::Blank => format!("{side} {} {side}", " ".repeat(width)),
            Row::Rule => format!("├{horizontal}┤").style(theme.border).to_string(),
        };
        lines.push(line);
    }
    lines.push(format!("╰{horizontal}╯").style(theme.border).to_string());

    Ok(lines.join("\n"))
}
