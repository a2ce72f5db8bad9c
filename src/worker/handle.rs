use tokio::sync::{mpsc, oneshot};
use crate::core::error::{Error, Result};
use crate::core::types::{Frame, FrameKey};
use crate::worker::messages::{Command, Notification};

pub type NotificationReceiver = mpsc::UnboundedReceiver<Notification>;

/// Cloneable sender side of the worker. Dropping every handle stops the worker.
#[derive(Debug, Clone)]
pub struct WorkerHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl WorkerHandle {
    pub(crate) fn new(commands: mpsc::UnboundedSender<Command>) -> Self {
        WorkerHandle { commands }
    }

    fn send(&self, command: Command) -> Result<()> {
        self.commands.send(command).map_err(|_| Error::disconnected())
    }

    async fn call<F>(&self, build: F) -> Result<Option<Frame>>
    where
        F: FnOnce(oneshot::Sender<Option<Frame>>) -> Command,
    {
        let (tx, rx) = oneshot::channel();
        self.send(build(tx))?;
        rx.await.map_err(|_| Error::disconnected())
    }

    /// Begin loading the index. Readiness arrives as `Ready(true)` or `LoadError`.
    pub fn init(&self) -> Result<()> {
        self.send(Command::Init)
    }

    /// Set the criteria. Results arrive as `DidSearch` then `SearchResults`.
    pub fn search(&self, query: impl Into<String>) -> Result<()> {
        self.send(Command::Search(query.into()))
    }

    pub async fn random_frame(&self) -> Result<Option<Frame>> {
        self.call(|reply| Command::RandomFrame { reply: Some(reply) }).await
    }

    /// Broadcast form of [`random_frame`](Self::random_frame): answers with `GoToFrame`.
    pub fn load_random_frame(&self) -> Result<()> {
        self.send(Command::RandomFrame { reply: None })
    }

    pub async fn next_frame(&self, key: FrameKey) -> Result<Option<Frame>> {
        self.frame_at(key, 1).await
    }

    pub async fn previous_frame(&self, key: FrameKey) -> Result<Option<Frame>> {
        self.frame_at(key, -1).await
    }

    pub async fn frame_at(&self, key: FrameKey, delta: i64) -> Result<Option<Frame>> {
        self.call(|reply| Command::LoadFrame { key, delta, reply: Some(reply) }).await
    }

    /// Broadcast form of [`frame_at`](Self::frame_at). Misses send nothing.
    pub fn load_frame(&self, key: FrameKey, delta: i64) -> Result<()> {
        self.send(Command::LoadFrame { key, delta, reply: None })
    }

    pub fn shutdown(&self) -> Result<()> {
        self.send(Command::Shutdown)
    }
}
