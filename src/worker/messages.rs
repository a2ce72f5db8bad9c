use serde::{Serialize, Deserialize};
use tokio::sync::oneshot;
use crate::core::types::{Frame, FrameKey};

/// Reply slot of a call/return style command. `None` means "broadcast the
/// answer as a notification instead".
pub type Reply<T> = Option<oneshot::Sender<T>>;

/// Host → worker
#[derive(Debug)]
pub enum Command {
    /// Start loading the index. Retries after a failed load.
    Init,
    /// Replace the current criteria and search with it
    Search(String),
    RandomFrame { reply: Reply<Option<Frame>> },
    /// Frame `delta` positions away from `key`; 0 is goto, ±1 is next/previous
    LoadFrame { key: FrameKey, delta: i64, reply: Reply<Option<Frame>> },
    Shutdown,
}

/// Worker → host. Serialized with the tag names hosts already listen for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload")]
pub enum Notification {
    #[serde(rename = "setReady")]
    Ready(bool),
    #[serde(rename = "setSearchResults")]
    SearchResults(Vec<Frame>),
    #[serde(rename = "setDidSearch")]
    DidSearch(bool),
    #[serde(rename = "goToFrame")]
    GoToFrame(Frame),
    #[serde(rename = "setLoadError")]
    LoadError(String),
}
