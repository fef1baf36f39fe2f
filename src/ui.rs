//! Terminal layout: header, one panel per coin, comparison table, footer.
//! Pure view of `DashboardState`; redrawn from scratch every tick.

use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Cell, Paragraph, Row, Table};
use ratatui::Frame;

use crate::formatters::{
    change_is_positive, fmt_brl, fmt_change, fmt_usd, group_thousands, spark_rising, sparkline,
};
use crate::models::{Coin, CoinPrice};
use crate::state::DashboardState;
use crate::utils::now_date_time;
use crate::REFRESH_INTERVAL_SECS;

const SPARK_WIDTH: usize = 30;

fn accent(coin: Coin) -> Color {
    match coin {
        Coin::Bitcoin => Color::Yellow,
        Coin::Ethereum => Color::Cyan,
    }
}

fn dim() -> Style {
    Style::default().add_modifier(Modifier::DIM)
}

fn change_style(change: f64) -> Style {
    if change_is_positive(change) {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::Red)
    }
}

pub fn draw(frame: &mut Frame, state: &DashboardState) {
    let rows = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(14),
        Constraint::Length(6),
        Constraint::Length(1),
    ])
    .split(frame.area());

    frame.render_widget(header(), rows[0]);
    draw_coin_panels(frame, state, rows[1]);
    frame.render_widget(comparison_table(state), rows[2]);
    frame.render_widget(footer(state), rows[3]);
}

fn draw_coin_panels(frame: &mut Frame, state: &DashboardState, area: Rect) {
    let columns =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(area);
    for (i, coin) in Coin::ALL.iter().enumerate() {
        frame.render_widget(coin_panel(*coin, state), columns[i]);
    }
}

fn header() -> Paragraph<'static> {
    let line = Line::from(vec![
        Span::styled(
            "CRYPTO DASHBOARD",
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("    {}", now_date_time()), dim()),
        Span::styled(
            format!("    refreshes every {}s", REFRESH_INTERVAL_SECS),
            dim(),
        ),
    ]);
    Paragraph::new(line)
        .alignment(Alignment::Center)
        .block(Block::bordered())
}

fn metric_row(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<16}", label), dim()),
        Span::raw(value),
    ])
}

fn styled_metric_row(label: &str, value: String, style: Style) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<16}", label), dim()),
        Span::styled(value, style),
    ])
}

fn coin_panel(coin: Coin, state: &DashboardState) -> Paragraph<'static> {
    let price = state.coin_price(coin).cloned().unwrap_or_default();

    let headline = Line::from(vec![
        Span::styled(
            format!(" {} {} ", coin.icon(), coin.symbol()),
            Style::default()
                .fg(accent(coin))
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", fmt_usd(price.usd)),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", fmt_change(price.usd_24h_change)),
            change_style(price.usd_24h_change),
        ),
    ]);

    let mut lines = vec![headline, Line::default()];
    lines.push(metric_row("USD price", fmt_usd(price.usd)));
    lines.push(metric_row("BRL price", fmt_brl(price.brl)));
    lines.push(styled_metric_row(
        "24h change",
        fmt_change(price.usd_24h_change),
        change_style(price.usd_24h_change),
    ));
    lines.push(metric_row("24h volume", fmt_usd(price.usd_24h_vol)));
    lines.push(metric_row("Market cap", fmt_usd(price.usd_market_cap)));

    if let Some(detail) = state.details.get(&coin) {
        lines.push(metric_row("ATH", fmt_usd(detail.ath)));
        lines.push(metric_row("ATL", fmt_usd(detail.atl)));
        let mut supply = group_thousands(detail.circulating_supply, 0);
        if let Some(max_supply) = detail.max_supply {
            if max_supply > 0.0 {
                let pct = detail.circulating_supply / max_supply * 100.0;
                supply.push_str(&format!(" ({:.1}%)", pct));
            }
        }
        lines.push(metric_row("Circulating", supply));
    }

    lines.push(Line::default());
    lines.push(sparkline_line(state.histories.get(&coin)));

    Paragraph::new(lines).block(
        Block::bordered()
            .title(Span::styled(
                format!(" {} {} ", coin.icon(), coin.symbol()),
                Style::default()
                    .fg(accent(coin))
                    .add_modifier(Modifier::BOLD),
            ))
            .border_style(Style::default().fg(accent(coin))),
    )
}

fn sparkline_line(history: Option<&Vec<f64>>) -> Line<'static> {
    let label = Span::styled("  Last 7 days  ", dim());
    match history {
        Some(history) if !history.is_empty() => {
            let style = if spark_rising(history) {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Red)
            };
            Line::from(vec![label, Span::styled(sparkline(history, SPARK_WIDTH), style)])
        }
        _ => Line::from(vec![label, Span::styled("no data", dim())]),
    }
}

fn comparison_table(state: &DashboardState) -> Table<'static> {
    let header = Row::new(["Coin", "USD", "BRL", "24h", "Volume", "Mkt Cap"])
        .style(Style::default().add_modifier(Modifier::BOLD));

    let rows: Vec<Row> = Coin::ALL
        .iter()
        .map(|coin| {
            let price: CoinPrice = state.coin_price(*coin).cloned().unwrap_or_default();
            Row::new(vec![
                Cell::from(format!("{} {}", coin.icon(), coin.symbol()))
                    .style(Style::default().fg(accent(*coin))),
                Cell::from(fmt_usd(price.usd)),
                Cell::from(fmt_brl(price.brl)),
                Cell::from(fmt_change(price.usd_24h_change))
                    .style(change_style(price.usd_24h_change)),
                Cell::from(fmt_usd(price.usd_24h_vol)),
                Cell::from(fmt_usd(price.usd_market_cap)),
            ])
        })
        .collect();

    Table::new(
        rows,
        [
            Constraint::Length(10),
            Constraint::Length(16),
            Constraint::Length(18),
            Constraint::Length(12),
            Constraint::Length(14),
            Constraint::Length(14),
        ],
    )
    .header(header)
    .block(Block::bordered().title(" Quick comparison "))
}

fn footer(state: &DashboardState) -> Paragraph<'static> {
    let mut spans = Vec::new();
    if state.healthy {
        spans.push(Span::styled("● ", Style::default().fg(Color::Green)));
        spans.push(Span::styled(
            format!("Last update: {}  ", state.last_update),
            dim(),
        ));
    } else {
        spans.push(Span::styled("● ", Style::default().fg(Color::Red)));
        spans.push(Span::styled(
            "Connection issue, showing last data  ",
            Style::default().fg(Color::Red).add_modifier(Modifier::DIM),
        ));
    }
    spans.push(Span::styled("Source: CoinGecko API  ", dim()));
    spans.push(Span::styled(
        "[Q] quit",
        Style::default().add_modifier(Modifier::BOLD | Modifier::DIM),
    ));
    Paragraph::new(Line::from(spans)).alignment(Alignment::Center)
}
