//! Terminal front-end: alternate-screen UI with a query input, a content
//! region, and a status bar.
//!
//! One request may be in flight at a time. It runs as a spawned task so the
//! screen keeps redrawing while Loading; admission control is the disabled
//! entry control in [`App`], not a lock. There is no cancellation: an issued
//! request runs to completion before the input re-enables.

mod app;
mod ui;

pub use app::{Action, App};

use std::io::{self, Stdout};
use std::sync::Arc;

use crossterm::event::{Event, EventStream, KeyEventKind};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio::task::JoinHandle;
use tracing::{error, warn};

use crate::application::{error_state, DescribeModelUseCase, GENERIC_FAILURE_MESSAGE};
use crate::domain::{DomainError, ViewState};

/// Run the front-end until the user quits.
pub async fn run(handler: Arc<DescribeModelUseCase>) -> Result<(), DomainError> {
    let mut terminal = setup_terminal()?;
    let result = event_loop(&mut terminal, handler).await;
    restore_terminal(&mut terminal)?;
    result
}

async fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    handler: Arc<DescribeModelUseCase>,
) -> Result<(), DomainError> {
    let mut app = App::new(handler.is_configured());
    let mut events = EventStream::new();
    let mut inflight: Option<JoinHandle<ViewState>> = None;

    loop {
        terminal.draw(|frame| ui::render(frame, &app))?;

        tokio::select! {
            state = join_inflight(&mut inflight) => {
                app.finish(state);
                inflight = None;
            }
            maybe_event = events.next() => {
                let event = match maybe_event {
                    Some(Ok(event)) => event,
                    Some(Err(e)) => {
                        warn!("Terminal event error: {e}");
                        continue;
                    }
                    None => return Ok(()),
                };

                let Event::Key(key) = event else {
                    // Resize and the rest just trigger a redraw.
                    continue;
                };
                if key.kind != KeyEventKind::Press {
                    continue;
                }

                match app.handle_key(key) {
                    Some(Action::Quit) => return Ok(()),
                    Some(Action::Submit(raw)) => {
                        // Precondition failures surface without entering
                        // Loading; only a validated submit issues a request.
                        match handler.validate(&raw) {
                            Err(e) => app.finish(error_state(&e)),
                            Ok(_) => {
                                app.begin_loading();
                                let handler = handler.clone();
                                inflight = Some(tokio::spawn(async move {
                                    handler.submit(&raw).await
                                }));
                            }
                        }
                    }
                    None => {}
                }
            }
        }
    }
}

/// Resolve the in-flight request, or park forever when there is none so the
/// select loop only reacts to terminal events.
async fn join_inflight(inflight: &mut Option<JoinHandle<ViewState>>) -> ViewState {
    match inflight {
        Some(handle) => handle.await.unwrap_or_else(|e| {
            error!("Submit task failed: {e}");
            ViewState::error(GENERIC_FAILURE_MESSAGE)
        }),
        None => std::future::pending().await,
    }
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>, DomainError> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

fn restore_terminal(terminal: &mut Terminal<CrosstermBackend<Stdout>>) -> Result<(), DomainError> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;
    Ok(())
}
