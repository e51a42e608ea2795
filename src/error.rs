//! Error types for story loading and session commands
//!
//! Degenerate geometry (zero-width lights, zero-radius alert sources) is not an
//! error: the detection math treats it as "no coverage". A capture attempt from
//! too far away is a notification, not an error.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GameError {
    #[error("scene '{from}' references unknown scene '{target}'")]
    InvalidSceneReference { from: String, target: String },

    #[error("story has no entry scene '{0}'")]
    MissingEntryScene(String),

    #[error("scene '{0}' is defined more than once")]
    DuplicateScene(String),

    #[error("scene keyed '{key}' declares id '{id}'")]
    SceneIdMismatch { key: String, id: String },

    #[error("malformed JSON data: {0}")]
    StoryFormat(#[from] serde_json::Error),

    #[error("scene '{scene}' has no choice {index}")]
    InvalidChoice { scene: String, index: usize },

    #[error("scene '{0}' is still revealing its text")]
    RevealInProgress(String),

    #[error("scene '{0}' has no continuation")]
    NoContinuation(String),

    #[error("no {kind} with id '{id}'")]
    UnknownEntity { kind: &'static str, id: String },
}
