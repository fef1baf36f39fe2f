use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::time::MissedTickBehavior;

use coin_pulse::models::Coin;
use coin_pulse::state::{self, DashboardState, RefreshTimer};
use coin_pulse::ui;
use coin_pulse::utils::coingecko::CoinGecko;
use coin_pulse::{HISTORY_DAYS, HISTORY_REFRESH_SECS, REFRESH_INTERVAL_SECS};

#[tokio::main]
async fn main() -> io::Result<()> {
    let client = CoinGecko::init().expect("Failed to build CoinGecko client");

    println!("Loading data...");
    let mut dashboard = DashboardState::new();
    state::seed(&mut dashboard, &client).await;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = run_loop(&mut terminal, &client, &mut dashboard).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if result.is_ok() {
        println!("Dashboard closed.");
    }
    result
}

async fn run_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    client: &CoinGecko,
    dashboard: &mut DashboardState,
) -> io::Result<()> {
    let mut tick = tokio::time::interval(Duration::from_secs(1));
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut price_timer = RefreshTimer::new(Duration::from_secs(REFRESH_INTERVAL_SECS));
    let mut history_timer = RefreshTimer::new(Duration::from_secs(HISTORY_REFRESH_SECS));

    loop {
        terminal.draw(|frame| ui::draw(frame, dashboard))?;

        if quit_requested()? {
            return Ok(());
        }
        tick.tick().await;

        let now = Instant::now();
        if price_timer.due(now) {
            price_timer.fire(now);
            dashboard.apply_prices(client.fetch_prices().await);

            // History/detail refreshes ride along with a price refresh,
            // never on their own.
            if history_timer.due(now) {
                history_timer.fire(now);
                for coin in Coin::ALL {
                    dashboard
                        .apply_history(coin, client.fetch_history(coin.id(), HISTORY_DAYS).await);
                    dashboard.apply_detail(coin, client.fetch_detail(coin.id()).await);
                }
            }
        }
    }
}

/// Drains pending key events; true when the user asked to quit.
fn quit_requested() -> io::Result<bool> {
    while event::poll(Duration::from_millis(0))? {
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(true),
                KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    return Ok(true)
                }
                _ => {}
            }
        }
    }
    Ok(false)
}
