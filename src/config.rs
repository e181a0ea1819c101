//! Session settings, loadable from a JSON file.
//!
//! Every field has a default so a partial file is enough, e.g.
//! `{"automated_side": "white", "search_depth": 2}`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::engines::opponent_controller::DEFAULT_THINK_DELAY;
use crate::errors::{BoardLabError, BoardLabResult};
use crate::game_state::chess_types::Color;
use crate::search::minimax::SearchConfig;

/// How a click on a legal destination is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmMode {
    /// Stage the destination as a target; `confirm_move` applies it.
    #[default]
    TwoStep,
    /// Apply the move on the click.
    Immediate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpponentKind {
    #[default]
    Minimax,
    ExternalEngine,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    pub confirm_mode: ConfirmMode,
    /// Side played by the opponent; `None` for two humans.
    pub automated_side: Option<Color>,
    pub opponent: OpponentKind,
    pub search_depth: u8,
    pub engine_depth: u8,
    pub engine_path: Option<PathBuf>,
    pub think_delay_ms: u64,
    pub jitter: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        let search = SearchConfig::default();
        Self {
            confirm_mode: ConfirmMode::TwoStep,
            automated_side: Some(Color::Black),
            opponent: OpponentKind::Minimax,
            search_depth: search.depth,
            engine_depth: 10,
            engine_path: None,
            think_delay_ms: DEFAULT_THINK_DELAY.as_millis() as u64,
            jitter: search.jitter,
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(text: &str) -> BoardLabResult<Self> {
        let config: Self = serde_json::from_str(text).map_err(|e| BoardLabError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> BoardLabResult<Self> {
        let text = fs::read_to_string(path)
            .map_err(|e| BoardLabError::Config(format!("{}: {e}", path.display())))?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> BoardLabResult<()> {
        if self.search_depth == 0 {
            return Err(BoardLabError::Config("search_depth must be at least 1".to_owned()));
        }
        if self.engine_depth == 0 {
            return Err(BoardLabError::Config("engine_depth must be at least 1".to_owned()));
        }
        if !self.jitter.is_finite() || self.jitter < 0.0 {
            return Err(BoardLabError::Config(format!("jitter must be a non-negative number, got {}", self.jitter)));
        }
        if self.opponent == OpponentKind::ExternalEngine && self.engine_path.is_none() {
            return Err(BoardLabError::Config("external engine selected without engine_path".to_owned()));
        }
        Ok(())
    }

    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            depth: self.search_depth,
            jitter: self.jitter,
        }
    }

    pub fn think_delay(&self) -> Duration {
        Duration::from_millis(self.think_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = SessionConfig::default();
        assert_eq!(config.confirm_mode, ConfirmMode::TwoStep);
        assert_eq!(config.automated_side, Some(Color::Black));
        assert_eq!(config.search_depth, 3);
        assert_eq!(config.engine_depth, 10);
        assert_eq!(config.think_delay(), Duration::from_millis(300));
        assert_eq!(config.jitter, 5.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_fills_defaults() {
        let config = SessionConfig::from_json_str(r#"{"automated_side": "white", "confirm_mode": "immediate"}"#)
            .expect("config should parse");
        assert_eq!(config.automated_side, Some(Color::White));
        assert_eq!(config.confirm_mode, ConfirmMode::Immediate);
        assert_eq!(config.search_depth, 3);
    }

    #[test]
    fn null_side_disables_opponent() {
        let config = SessionConfig::from_json_str(r#"{"automated_side": null}"#).expect("config should parse");
        assert_eq!(config.automated_side, None);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            SessionConfig::from_json_str(r#"{"search_depth": 0}"#),
            Err(BoardLabError::Config(_))
        ));
        assert!(matches!(
            SessionConfig::from_json_str(r#"{"opponent": "external_engine"}"#),
            Err(BoardLabError::Config(_))
        ));
        assert!(matches!(
            SessionConfig::from_json_str("not json"),
            Err(BoardLabError::Config(_))
        ));
    }

    #[test]
    fn missing_file_is_config_error() {
        let result = SessionConfig::from_json_file(Path::new("/nonexistent/board_lab.json"));
        assert!(matches!(result, Err(BoardLabError::Config(_))));
    }
}
