use crate::app::App;
use crate::state::messages::NetworkRequest;
use crossterm::event::KeyCode::Char;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{Mutex, mpsc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputOutcome {
    Redraw,
    Ignored,
    Quit,
}

pub async fn handle_key_bindings(
    key_event: KeyEvent,
    app: &Arc<Mutex<App>>,
    network_requests: &mpsc::Sender<NetworkRequest>,
) -> InputOutcome {
    let mut guard = app.lock().await;

    match (key_event.code, key_event.modifiers) {
        // Quit
        (Char('q'), _) | (Char('c'), KeyModifiers::CONTROL) => return InputOutcome::Quit,

        // Rounds and tabs
        (Char('l') | KeyCode::Right, _) => guard.next_round(),
        (Char('h') | KeyCode::Left, _) => guard.prev_round(),
        (Char(c @ '1'..='9'), _) => {
            let index = c as usize - '1' as usize;
            guard.select_tab(index);
        }

        // Matches within a round
        (Char('j') | KeyCode::Down, _) => guard.match_down(),
        (Char('k') | KeyCode::Up, _) => guard.match_up(),
        (KeyCode::Esc, _) => guard.clear_hover(),

        (Char('r'), _) => {
            guard.begin_manual_refresh(Instant::now());
            drop(guard);
            let _ = network_requests.send(NetworkRequest::RefreshScores).await;
            return InputOutcome::Redraw;
        }

        // Global
        (Char('f'), _) => guard.toggle_full_screen(),
        (Char('"'), _) => guard.toggle_show_logs(),

        _ => return InputOutcome::Ignored,
    }

    InputOutcome::Redraw
}

/// Pointer movement drives hover on the desktop bracket.
pub async fn handle_mouse(mouse_event: MouseEvent, app: &Arc<Mutex<App>>) -> InputOutcome {
    match mouse_event.kind {
        MouseEventKind::Moved => {
            let mut guard = app.lock().await;
            if guard.hover_at(mouse_event.column, mouse_event.row) {
                InputOutcome::Redraw
            } else {
                InputOutcome::Ignored
            }
        }
        _ => InputOutcome::Ignored,
    }
}
