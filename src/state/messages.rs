use courtside_api::{Bracket, ScoreRecord};
use crossterm::event::{KeyEvent, MouseEvent};
use std::path::PathBuf;

#[derive(Debug, Clone)]
pub enum NetworkRequest {
    LoadBracket { path: PathBuf },
    RefreshScores,
}

#[derive(Debug)]
pub enum NetworkResponse {
    BracketLoaded { bracket: Bracket },
    ScoresFetched { records: Vec<ScoreRecord> },
}

#[derive(Debug, Clone)]
pub enum UiEvent {
    KeyPressed(KeyEvent),
    Mouse(MouseEvent),
    /// New terminal size in columns and rows.
    Resize(u16, u16),
    AppStarted,
    Tick,
}
