mod components;

use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Field, Popup};
use crate::theme::Theme;

pub fn draw(f: &mut Frame, app: &App) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(0)
        .constraints([
            Constraint::Length(1),      // Info line
            Constraint::Length(3),      // Input fields
            Constraint::Length(1),      // Buttons
            Constraint::Min(8),         // Result region
            Constraint::Length(1),      // Footer
        ])
        .split(area);

    draw_info_line(f, app, chunks[0]);
    draw_inputs(f, app, chunks[1]);
    draw_buttons(f, app, chunks[2]);
    draw_result(f, app, chunks[3]);
    draw_footer(f, app, chunks[4]);

    match app.popup {
        Popup::None => {}
        Popup::Alert => draw_alert_popup(f, app),
        Popup::Help => draw_help_popup(f, &app.theme),
    }
}

fn draw_info_line(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let line = Line::from(vec![
        Span::styled("BMI Calculator", Style::default().fg(t.accent).add_modifier(Modifier::BOLD)),
        Span::styled(" │ ", Style::default().fg(t.text_dim)),
        Span::styled(app.endpoint(), Style::default().fg(t.text_dim)),
    ]);

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_inputs(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(40),
            Constraint::Percentage(40),
            Constraint::Percentage(20),
        ])
        .split(area);

    let weight = components::input_field(
        " Weight (kg) ",
        &app.weight,
        app.focus == Field::Weight,
        t.accent,
        t.inactive,
        t.text,
    );
    f.render_widget(weight, chunks[0]);

    let height_title = format!(" Height ({}) ", app.unit);
    let height = components::input_field(
        &height_title,
        &app.height,
        app.focus == Field::Height,
        t.accent,
        t.inactive,
        t.text,
    );
    f.render_widget(height, chunks[1]);

    let unit_focused = app.focus == Field::Unit;
    let unit_border = if unit_focused { t.accent } else { t.inactive };
    let unit = Paragraph::new(Line::from(vec![
        Span::styled("◂ ", Style::default().fg(t.text_dim)),
        Span::styled(app.unit.as_str(), Style::default().fg(t.text).add_modifier(Modifier::BOLD)),
        Span::styled(" ▸", Style::default().fg(t.text_dim)),
    ]))
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(Span::styled(" Unit ", Style::default().fg(unit_border)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(unit_border)),
    );
    f.render_widget(unit, chunks[2]);
}

fn draw_buttons(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let calculate = components::button(
        app.submit_button.label,
        app.focus == Field::Calculate,
        app.submit_button.enabled,
        t.accent,
        t.inactive,
    );
    f.render_widget(Paragraph::new(calculate).alignment(Alignment::Center), chunks[0]);

    let clear = components::button(
        "Clear",
        app.focus == Field::Clear,
        !app.is_in_flight(),
        t.danger,
        t.inactive,
    );
    f.render_widget(Paragraph::new(clear).alignment(Alignment::Center), chunks[1]);
}

fn draw_result(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let view = &app.result;

    let block = Block::default()
        .title(Span::styled(" Result ", Style::default().fg(t.header)))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(if view.visible { t.accent } else { t.inactive }));

    if !view.visible {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::styled("Enter your weight and height, then press Enter", Style::default().fg(t.text_dim)),
        ])
        .alignment(Alignment::Center)
        .block(block);
        f.render_widget(hint, area);
        return;
    }

    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),   // BMI value
            Constraint::Length(1),   // Category
            Constraint::Length(1),   // Healthy range
            Constraint::Length(1),   // Spacer
            Constraint::Length(1),   // Progress bar
            Constraint::Min(1),      // Note
        ])
        .split(inner);

    let category_color = view.palette.map(|p| p.at(1.0)).unwrap_or(t.text);

    let label = |name: &'static str| Span::styled(name, Style::default().fg(t.header));

    f.render_widget(
        Paragraph::new(Line::from(vec![
            label("BMI            "),
            Span::styled(view.bmi.as_str(), Style::default().fg(t.text).add_modifier(Modifier::BOLD)),
        ])),
        rows[0],
    );
    f.render_widget(
        Paragraph::new(Line::from(vec![
            label("Category       "),
            Span::styled(view.category.as_str(), Style::default().fg(category_color).add_modifier(Modifier::BOLD)),
        ])),
        rows[1],
    );
    f.render_widget(
        Paragraph::new(Line::from(vec![
            label("Healthy weight "),
            Span::styled(view.healthy_range.as_str(), Style::default().fg(t.text)),
            Span::styled(" kg", Style::default().fg(t.text_dim)),
        ])),
        rows[2],
    );

    // Bar plus a right-hand percentage label
    let percent = format!(" {:>3.0}%", view.progress_percent());
    let bar_width = rows[4].width.saturating_sub(percent.chars().count() as u16);
    let mut bar = components::gradient_bar(bar_width, view.progress, view.palette, t.inactive);
    bar.spans.push(Span::styled(percent, Style::default().fg(t.text_dim)));
    f.render_widget(Paragraph::new(bar), rows[4]);

    f.render_widget(
        Paragraph::new(Line::styled(view.note.as_str(), Style::default().fg(t.text)))
            .wrap(Wrap { trim: true }),
        rows[5],
    );
}

fn draw_footer(f: &mut Frame, app: &App, area: Rect) {
    let t = &app.theme;
    let key = |k: &'static str| Span::styled(k, Style::default().fg(t.accent));
    let desc = |d: &'static str| Span::styled(d, Style::default().fg(t.text_dim));

    let line = Line::from(vec![
        key("Tab"), desc(" next  "),
        key("Enter"), desc(" calculate  "),
        key("u"), desc(" unit  "),
        key("c"), desc(" clear  "),
        key("?"), desc(" help  "),
        key("q"), desc(" quit"),
    ]);

    f.render_widget(Paragraph::new(line).alignment(Alignment::Center), area);
}

fn draw_alert_popup(f: &mut Frame, app: &App) {
    let t = &app.theme;
    let popup_area = centered_rect(50, 30, f.area());

    f.render_widget(Clear, popup_area);

    let message = app.alert.as_deref().unwrap_or_default();

    let alert = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(message, Style::default().fg(t.text))),
        Line::from(""),
        Line::from(vec![
            Span::styled("Enter", Style::default().fg(t.accent).add_modifier(Modifier::BOLD)),
            Span::styled(" OK", Style::default().fg(t.text_dim)),
        ]),
    ])
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(Span::styled(" Alert ", Style::default().fg(t.danger)))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(t.danger)),
    );

    f.render_widget(alert, popup_area);
}

fn draw_help_popup(f: &mut Frame, t: &Theme) {
    let area = f.area();
    let popup_area = centered_rect(
        if area.width < 80 { 95 } else { 60 },
        if area.height < 30 { 95 } else { 70 },
        area,
    );

    f.render_widget(Clear, popup_area);

    let section = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().fg(t.header).add_modifier(Modifier::BOLD)))
    };
    let entry = |keys: &'static str, what: &'static str| {
        Line::from(vec![
            Span::styled(keys, Style::default().fg(t.accent)),
            Span::raw(what),
        ])
    };

    let help_text = vec![
        section("═══ Form ═══"),
        entry("  Tab/↓       ", "Next field"),
        entry("  S-Tab/↑     ", "Previous field"),
        entry("  0-9 .       ", "Type weight / height"),
        entry("  Space ←/→   ", "Switch unit (when Unit is focused)"),
        entry("  u           ", "Switch unit cm ↔ m"),
        Line::from(""),
        section("═══ Actions ═══"),
        entry("  Enter       ", "Calculate BMI (Clear when the Clear button is focused)"),
        entry("  c           ", "Clear the form"),
        entry("  q / Ctrl-C  ", "Quit"),
        Line::from(""),
        section("═══ One-shot ═══"),
        entry("  bmi-tui --weight 70 --height 175       ", ""),
        entry("  bmi-tui --weight 70 --height 1.75 --unit m", ""),
        Line::from(""),
        Line::from(vec![
            Span::styled("  Press ", Style::default().fg(t.text_dim)),
            Span::styled("?", Style::default().fg(t.accent)),
            Span::styled("/", Style::default().fg(t.text_dim)),
            Span::styled("Esc", Style::default().fg(t.accent)),
            Span::styled(" to close", Style::default().fg(t.text_dim)),
        ]),
    ];

    let help = Paragraph::new(help_text)
        .block(
            Block::default()
                .title(Span::styled(" Help ", Style::default().fg(t.accent)))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(t.accent)),
        )
        .wrap(Wrap { trim: false });

    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{BmiClient, BmiResponse};
    use ratatui::{backend::TestBackend, Terminal};

    fn render(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(90, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    fn app() -> App {
        App::new(BmiClient::new("http://127.0.0.1:5000"), Theme::default())
    }

    #[test]
    fn test_idle_screen_shows_form_and_hides_result() {
        let screen = render(&app());
        assert!(screen.contains("Weight (kg)"));
        assert!(screen.contains("Height (cm)"));
        assert!(screen.contains("Calculate BMI"));
        assert!(screen.contains("http://127.0.0.1:5000/api/bmi"));
        assert!(!screen.contains("Healthy weight"));
    }

    #[test]
    fn test_result_is_drawn() {
        let mut app = app();
        app.result.render(&BmiResponse {
            bmi: 22.5,
            category: "Normal".to_string(),
            note: "Healthy".to_string(),
            healthy_weight_min_kg: 55.0,
            healthy_weight_max_kg: 75.0,
        });

        let screen = render(&app);
        assert!(screen.contains("22.5"));
        assert!(screen.contains("Normal"));
        assert!(screen.contains("55 - 75"));
        assert!(screen.contains("38%"));
    }

    #[test]
    fn test_alert_popup_is_drawn() {
        let mut app = app();
        app.handle_key(crossterm::event::KeyEvent::new(
            crossterm::event::KeyCode::Enter,
            crossterm::event::KeyModifiers::NONE,
        ));

        let screen = render(&app);
        assert!(screen.contains("Alert"));
        assert!(screen.contains("Enter a valid weight in kilograms."));
    }

    #[test]
    fn test_busy_label_is_drawn() {
        let mut app = app();
        app.weight = "70".to_string();
        app.height = "175".to_string();
        assert!(app.begin_submit());

        let screen = render(&app);
        assert!(screen.contains("Calculating..."));
        assert!(!screen.contains("Calculate BMI"));
    }
}
