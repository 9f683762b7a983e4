// TUI event loop and terminal management
use std::sync::Arc;
use std::time::Duration;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen, SetTitle},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tokio::sync::mpsc;
use tracing::warn;

use hubscout_api::SubscribeClient;
use hubscout_cache::prefs::TIME_FRAME_KEY;
use hubscout_cache::PrefsStore;
use hubscout_core::models::ContentType;

use crate::app::{App, InputMode, Phase, ToastKind};
use crate::client::ContentFetcher;

pub async fn run_tui(
    mut app: App,
    fetcher: Arc<dyn ContentFetcher>,
    subscribe: Option<SubscribeClient>,
    prefs: Option<PrefsStore>,
) -> anyhow::Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Fetches resolve on background tasks and settle through this channel,
    // tagged with their sequence number so the store can drop stale ones.
    let (tx, mut rx) = mpsc::unbounded_channel();

    loop {
        if let Some(request) = app.take_pending() {
            let fetcher = Arc::clone(&fetcher);
            let tx = tx.clone();
            tokio::spawn(async move {
                let result = fetcher
                    .fetch(request.tab, request.time_frame, request.limit)
                    .await;
                let _ = tx.send((request.seq, result));
            });
        }

        while let Ok((seq, result)) = rx.try_recv() {
            app.complete_fetch(seq, result);
            if app.phase == Phase::Loaded {
                execute!(terminal.backend_mut(), SetTitle(app.window_title()))?;
            }
        }

        terminal.draw(|f| crate::ui::render(f, &mut app))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match app.input_mode {
                        InputMode::Normal => match key.code {
                            KeyCode::Char('q') => {
                                app.quit();
                            }
                            KeyCode::Tab => {
                                app.next_tab();
                            }
                            KeyCode::BackTab => {
                                app.previous_tab();
                            }
                            KeyCode::Char('1') => app.switch_tab(ContentType::Papers),
                            KeyCode::Char('2') => app.switch_tab(ContentType::Models),
                            KeyCode::Char('3') => app.switch_tab(ContentType::Datasets),
                            KeyCode::Char('4') => app.switch_tab(ContentType::Spaces),
                            KeyCode::Char('t') => {
                                app.cycle_time_frame();
                                persist_time_frame(&mut app, prefs.as_ref());
                            }
                            KeyCode::Char('r') => {
                                app.retry();
                            }
                            KeyCode::Char('n') => {
                                app.open_subscribe();
                            }
                            KeyCode::Char('j') | KeyCode::Down => {
                                app.next_item();
                            }
                            KeyCode::Char('k') | KeyCode::Up => {
                                app.previous_item();
                            }
                            KeyCode::Enter => {
                                if let Some(url) = app.selected_url() {
                                    if let Err(e) = open::that(&url) {
                                        app.set_toast(
                                            format!("Failed to open browser: {}", e),
                                            ToastKind::Error,
                                        );
                                    }
                                }
                            }
                            KeyCode::Char('p') => {
                                if let Some(url) = app.selected_pdf_url() {
                                    if let Err(e) = open::that(&url) {
                                        app.set_toast(
                                            format!("Failed to open browser: {}", e),
                                            ToastKind::Error,
                                        );
                                    }
                                }
                            }
                            _ => {}
                        },
                        InputMode::EditingEmail => match key.code {
                            KeyCode::Esc => {
                                app.close_subscribe();
                            }
                            KeyCode::Enter => {
                                submit_subscription(&mut app, subscribe.as_ref()).await;
                            }
                            KeyCode::Char(c) => {
                                app.email_input.push(c);
                            }
                            KeyCode::Backspace => {
                                app.email_input.pop();
                            }
                            _ => {}
                        },
                    }
                }
            }
        }

        app.tick();

        if app.should_quit {
            break;
        }
    }

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    Ok(())
}

fn persist_time_frame(app: &mut App, prefs: Option<&PrefsStore>) {
    if let Some(store) = prefs {
        if let Err(e) = store.set(TIME_FRAME_KEY, app.time_frame.as_param()) {
            warn!("failed to persist time frame: {}", e);
            app.set_toast(
                format!("Failed to save time range: {}", e),
                ToastKind::Error,
            );
        }
    }
}

async fn submit_subscription(app: &mut App, subscribe: Option<&SubscribeClient>) {
    if !app.email_is_plausible() {
        app.set_toast(
            "Please enter a valid email address.".to_string(),
            ToastKind::Error,
        );
        return;
    }

    let Some(client) = subscribe else {
        app.close_subscribe();
        return;
    };

    match client.subscribe(app.email_input.trim()).await {
        Ok(()) => {
            app.set_toast(
                "You've successfully subscribed!".to_string(),
                ToastKind::Info,
            );
            app.close_subscribe();
        }
        Err(e) => {
            app.set_toast(format!("Subscription failed: {}", e), ToastKind::Error);
        }
    }
}
