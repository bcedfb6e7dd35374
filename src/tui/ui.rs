//! Drawing of the terminal interface.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        Bar, BarChart, BarGroup, Block, Borders, List, ListItem, Paragraph, Row, Table,
        canvas::{Canvas, Points},
    },
};

use crate::{
    CategoryTotals, ChartMode,
    statistics::{shares, sorted_totals},
    tui::{
        app::{App, Screen, Status},
        views::{FormView, ListView, MenuItem, MenuView, StatisticsView},
    },
};

const PALETTE: [Color; 11] = [
    Color::Cyan,
    Color::Magenta,
    Color::Yellow,
    Color::Green,
    Color::Blue,
    Color::Red,
    Color::LightCyan,
    Color::LightMagenta,
    Color::LightYellow,
    Color::LightGreen,
    Color::LightBlue,
];

fn color_for(index: usize) -> Color {
    PALETTE[index % PALETTE.len()]
}

/// Draw the whole interface for the current state of `app`.
pub fn draw<A>(frame: &mut Frame, app: &App<A>) {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let title = Paragraph::new("Finance Tracker")
        .alignment(Alignment::Center)
        .bold()
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, layout[0]);

    let help = match &app.screen {
        Screen::Menu(menu) => {
            render_menu(frame, layout[1], menu);
            "↑/↓ select  Enter open  q quit"
        }
        Screen::List(list) => {
            render_list(frame, layout[1], list);
            "↑/↓ scroll  Esc back"
        }
        Screen::Add(form) | Screen::Delete(form) => {
            render_form(frame, layout[1], form);
            "Tab next field  Enter submit  Esc back"
        }
        Screen::Statistics(statistics) => {
            render_statistics(frame, layout[1], statistics);
            "p pie charts  b bar charts  h hide  e export HTML  Esc back"
        }
    };

    render_footer(frame, layout[2], app.status.as_ref(), help);
}

fn render_footer(frame: &mut Frame, area: Rect, status: Option<&Status>, help: &str) {
    let status_line = match status {
        Some(Status::Info(message)) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Green),
        )),
        Some(Status::Error(message)) => Line::from(Span::styled(
            message.as_str(),
            Style::default().fg(Color::Red),
        )),
        None => Line::default(),
    };
    let help_line = Line::from(Span::styled(help, Style::default().fg(Color::DarkGray)));

    frame.render_widget(Paragraph::new(vec![status_line, help_line]), area);
}

fn render_menu(frame: &mut Frame, area: Rect, menu: &MenuView) {
    let items: Vec<ListItem> = MenuItem::ALL
        .iter()
        .map(|item| ListItem::new(item.label()))
        .collect();

    let list = List::new(items)
        .block(Block::default().title("Menu").borders(Borders::ALL))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");

    let mut state = menu.state.clone();
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_form(frame: &mut Frame, area: Rect, form: &FormView) {
    let block = Block::default().title(form.title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            form.fields
                .iter()
                .map(|_| Constraint::Length(3))
                .chain([Constraint::Min(0)]),
        )
        .split(inner);

    for (index, field) in form.fields.iter().enumerate() {
        let border_style = if index == form.focused {
            Style::default().fg(Color::Yellow)
        } else {
            Style::default()
        };

        let input = Paragraph::new(field.value.as_str()).block(
            Block::default()
                .title(field.label)
                .borders(Borders::ALL)
                .border_style(border_style),
        );
        frame.render_widget(input, rows[index]);
    }
}

fn render_list(frame: &mut Frame, area: Rect, list: &ListView) {
    let block = Block::default().title("Transactions").borders(Borders::ALL);

    if list.transactions.is_empty() {
        let empty = Paragraph::new("No transactions")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let header = Row::new(["ID", "Amount", "Category", "Type", "Date"]).bold();
    let rows = list.transactions.iter().map(|transaction| {
        Row::new([
            transaction.id.to_string(),
            format!("{:.2}", transaction.amount),
            transaction.category.clone(),
            transaction.transaction_type.clone(),
            transaction.date.clone(),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Length(12),
            Constraint::Min(12),
            Constraint::Length(8),
            Constraint::Length(12),
        ],
    )
    .header(header)
    .block(block)
    .row_highlight_style(Style::default().add_modifier(Modifier::REVERSED));

    let mut state = list.state.clone();
    frame.render_stateful_widget(table, area, &mut state);
}

fn render_statistics(frame: &mut Frame, area: Rect, statistics: &StatisticsView) {
    if statistics.mode == ChartMode::Hidden {
        let hint = Paragraph::new("Press p for pie charts or b for bar charts")
            .alignment(Alignment::Center)
            .block(Block::default().title("Statistics").borders(Borders::ALL));
        frame.render_widget(hint, area);
        return;
    }

    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let groups = [
        ("Income", &statistics.aggregate.income),
        ("Expenses", &statistics.aggregate.expense),
    ];

    for ((title, totals), area) in groups.into_iter().zip(halves.iter()) {
        match statistics.mode {
            ChartMode::Pie => render_pie_chart(frame, *area, title, totals),
            ChartMode::Bar => render_bar_chart(frame, *area, title, totals),
            ChartMode::Hidden => {}
        }
    }
}

fn render_pie_chart(frame: &mut Frame, area: Rect, title: &str, totals: &CategoryTotals) {
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let shares = shares(totals);
    if shares.is_empty() {
        let empty = Paragraph::new("No data").alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),
            Constraint::Length(shares.len().min(u16::MAX as usize) as u16),
        ])
        .split(inner);

    let mut slices = Vec::with_capacity(shares.len());
    let mut start_angle = 0.0_f64;
    for (index, share) in shares.iter().enumerate() {
        let sweep = share.fraction * std::f64::consts::TAU;
        slices.push((start_angle, start_angle + sweep, color_for(index)));
        start_angle += sweep;
    }

    let canvas = Canvas::default()
        .x_bounds([-1.0, 1.0])
        .y_bounds([-1.0, 1.0])
        .paint(|ctx| {
            for (start, end, color) in &slices {
                let mut points = Vec::new();
                let mut radius = 0.0;
                while radius <= 1.0 {
                    let mut angle = *start;
                    while angle <= *end {
                        points.push((radius * angle.cos(), radius * angle.sin()));
                        angle += 0.05;
                    }
                    radius += 0.04;
                }

                if !points.is_empty() {
                    ctx.draw(&Points {
                        coords: &points,
                        color: *color,
                    });
                }
            }
        });
    frame.render_widget(canvas, layout[0]);

    let legend: Vec<Line> = shares
        .iter()
        .enumerate()
        .map(|(index, share)| {
            Line::from(Span::styled(
                share.label(),
                Style::default().fg(color_for(index)),
            ))
        })
        .collect();
    frame.render_widget(Paragraph::new(legend), layout[1]);
}

fn render_bar_chart(frame: &mut Frame, area: Rect, title: &str, totals: &CategoryTotals) {
    let block = Block::default().title(title).borders(Borders::ALL);

    let totals = sorted_totals(totals);
    if totals.is_empty() {
        let empty = Paragraph::new("No data")
            .alignment(Alignment::Center)
            .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let bars: Vec<Bar> = totals
        .iter()
        .enumerate()
        .map(|(index, (category, amount))| {
            Bar::default()
                .value(amount.abs().round() as u64)
                .label(Line::from(*category))
                .text_value(format!("{amount:.2}"))
                .style(Style::default().fg(color_for(index)))
        })
        .collect();

    let chart = BarChart::default()
        .block(block)
        .bar_width(9)
        .bar_gap(2)
        .data(BarGroup::default().bars(&bars));

    frame.render_widget(chart, area);
}
