//! Reusable UI component helpers

use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};

use crate::display::Palette;

/// Bordered single-line input. Shows a `_` cursor while focused.
pub fn input_field<'a>(title: &'a str, value: &'a str, focused: bool, accent: Color, idle: Color, text: Color) -> Paragraph<'a> {
    let border = if focused { accent } else { idle };
    let cursor = if focused { "_" } else { "" };

    Paragraph::new(Line::from(vec![
        Span::styled(value, Style::default().fg(text)),
        Span::styled(cursor, Style::default().fg(accent)),
    ]))
    .block(
        Block::default()
            .title(Span::styled(title, Style::default().fg(border)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border)),
    )
}

/// `[ label ]` style button
pub fn button(label: &str, focused: bool, enabled: bool, accent: Color, idle: Color) -> Line<'static> {
    let mut style = Style::default().fg(if enabled { accent } else { idle });
    if focused && enabled {
        style = style.add_modifier(Modifier::REVERSED | Modifier::BOLD);
    }

    Line::from(vec![
        Span::styled("[ ", Style::default().fg(idle)),
        Span::styled(label.to_string(), style),
        Span::styled(" ]", Style::default().fg(idle)),
    ])
}

/// Horizontal bar `width` cells wide, filled to `fraction` with the
/// palette gradient. No palette means an empty, uncolored bar.
pub fn gradient_bar(width: u16, fraction: f64, palette: Option<Palette>, empty: Color) -> Line<'static> {
    let width = width as usize;
    let filled = match palette {
        Some(_) => ((width as f64) * fraction.clamp(0.0, 1.0)).round() as usize,
        None => 0,
    };

    let mut spans = Vec::with_capacity(width);
    if let Some(palette) = palette {
        let steps = filled.saturating_sub(1).max(1) as f64;
        for i in 0..filled {
            spans.push(Span::styled("█", Style::default().fg(palette.at(i as f64 / steps))));
        }
    }
    if width > filled {
        spans.push(Span::styled("░".repeat(width - filled), Style::default().fg(empty)));
    }

    Line::from(spans)
}
