use crate::app::{App, FocusField};
use cookiebot_core::{help_lines, tier_name, SessionConfig};
use cookiebot_data::LeaderboardColumn;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::prelude::{Alignment, Color, Line, Modifier, Style, Stylize};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Row, Table, Wrap};
use ratatui::Frame;

pub fn draw(frame: &mut Frame, app: &App) {
    let root = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(10),
            Constraint::Length(9),
        ])
        .split(frame.area());

    draw_header(frame, root[0], app);

    let middle = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(root[1]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(5), Constraint::Min(6)])
        .split(middle[1]);

    draw_options(frame, middle[0], app);
    draw_countdown(frame, right[0], app);
    draw_game(frame, right[1], app);
    draw_report(frame, root[2], app);

    if app.board.is_some() {
        draw_board_popup(frame, app);
    }
    if app.show_help {
        draw_help_popup(frame);
    }
}

fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let state = match app.session_mode() {
        Some(mode) => format!("running ({})", mode.label()),
        None => "idle".to_string(),
    };
    let lines = vec![
        Line::from(format!("Cookie Bot | {state}").bold()),
        Line::from(format!("Status: {}", app.status_line)),
    ];
    let block = Block::default().borders(Borders::ALL).title("Overview");
    frame.render_widget(
        Paragraph::new(lines).wrap(Wrap { trim: true }).block(block),
        area,
    );
}

fn draw_options(frame: &mut Frame, area: Rect, app: &App) {
    let check = |on: bool| if on { "[x]" } else { "[ ]" };
    let preview = match app.request.config() {
        Ok(config) => config.mode_label(),
        Err(err) => format!("invalid: {err}"),
    };
    let rows = [
        (FocusField::Clicker, format!("{} Clicker", check(app.request.clicker))),
        (FocusField::BuyOut, format!("{} Buy-Out", check(app.request.buy_out))),
        (FocusField::Ratio, format!("Ratio: {}", app.request.ratio)),
        (FocusField::Time, format!("Time:  {}s", app.request.time)),
        (FocusField::Start, "< Cookie >".to_string()),
    ];
    let mut lines: Vec<Line<'_>> = rows
        .into_iter()
        .map(|(field, text)| {
            if field == app.focus {
                Line::from(format!(">> {text}")).style(
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )
            } else {
                Line::from(format!("   {text}"))
            }
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(format!("mode: {preview}")));
    frame.render_widget(
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .block(pane_block("Options", !app.is_running())),
        area,
    );
}

fn draw_countdown(frame: &mut Frame, area: Rect, app: &App) {
    let text = app
        .countdown_text()
        .unwrap_or_else(|| "-:--".to_string());
    let paragraph = Paragraph::new(Line::from(text.bold()))
        .alignment(Alignment::Center)
        .block(pane_block("Time left", app.is_running()));
    frame.render_widget(paragraph, area);
}

fn draw_game(frame: &mut Frame, area: Rect, app: &App) {
    let Some(game) = app.game_snapshot() else {
        let hint = Paragraph::new("press s or Enter on Cookie to start")
            .block(pane_block("Game", false));
        frame.render_widget(hint, area);
        return;
    };
    let mut lines = vec![
        Line::from(format!(
            "cookies {}  rate {:.1}/s  clicks {}",
            game.money(),
            game.production_rate(),
            game.clicks()
        )),
        Line::from(""),
    ];
    let prices = game.prices();
    for (tier, owned) in game.owned().iter().enumerate() {
        lines.push(Line::from(format!(
            "{:<13} owned {:>4}  price {}",
            tier_name(tier),
            owned,
            prices[tier]
        )));
    }
    frame.render_widget(
        Paragraph::new(lines).block(pane_block("Game", true)),
        area,
    );
}

fn draw_report(frame: &mut Frame, area: Rect, app: &App) {
    let lines: Vec<Line<'_>> = match app.last_report.as_ref() {
        Some(report) => report
            .to_text_report()
            .lines()
            .map(|line| Line::from(line.to_string()))
            .collect(),
        None => vec![Line::from("no session finished yet")],
    };
    frame.render_widget(
        Paragraph::new(lines).block(pane_block("Last session", false)),
        area,
    );
}

fn draw_board_popup(frame: &mut Frame, app: &App) {
    let Some(board) = app.board.as_ref() else {
        return;
    };
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);
    let arrow = if board.descending { "v" } else { "^" };
    let header = Row::new(LeaderboardColumn::ALL.iter().enumerate().map(|(idx, column)| {
        let marker = if *column == board.column { arrow } else { "" };
        format!("{} {}{marker}", idx + 1, column.label())
    }))
    .style(Style::default().add_modifier(Modifier::BOLD));
    let rows = board.rows.iter().map(|row| {
        Row::new(vec![
            format!("{:.1}", row.cps),
            row.time.to_string(),
            row.mode.clone(),
        ])
    });
    let table = Table::new(
        rows,
        [
            Constraint::Length(12),
            Constraint::Length(8),
            Constraint::Min(16),
        ],
    )
    .header(header)
    .block(
        Block::default()
            .title("Leaderboard (1/2/3 sort, l or Esc close)")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
    );
    frame.render_widget(table, area);
}

fn draw_help_popup(frame: &mut Frame) {
    let area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, area);
    let mut lines: Vec<Line<'_>> = help_lines().into_iter().map(Line::from).collect();
    lines.push(Line::from(""));
    lines.push(Line::from("q quit | ? help | tab/arrows/jk focus | enter activate"));
    lines.push(Line::from("c clicker | b buy-out | s start | space pause clicking"));
    lines.push(Line::from("x close countdown | w close game window | ctrl+c stop session"));
    lines.push(Line::from("l leaderboard | 1/2/3 sort by CPS/Time/Mode"));
    lines.push(Line::from(format!(
        "ratio must lie within [0, 1]; e.g. {}",
        example_label()
    )));
    let block = Block::default()
        .title("Help")
        .borders(Borders::ALL)
        .border_style(Style::default().fg(Color::Cyan));
    frame.render_widget(
        Paragraph::new(lines).block(block).wrap(Wrap { trim: true }),
        area,
    );
}

fn example_label() -> String {
    SessionConfig::new(true, true, 60, Some(0.625))
        .map(|config| config.mode_label())
        .unwrap_or_default()
}

fn pane_block(title: &str, focused: bool) -> Block<'_> {
    let mut block = Block::default().title(title).borders(Borders::ALL);
    if focused {
        block = block.border_style(Style::default().fg(Color::Yellow));
    }
    block
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
