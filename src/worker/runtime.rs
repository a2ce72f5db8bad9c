use std::future::Future;
use std::ops::ControlFlow;
use std::pin::Pin;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};
use crate::core::config::Config;
use crate::core::corpus::{fetch_payload, CorpusStore};
use crate::core::error::Result;
use crate::core::fetch::IndexFetcher;
use crate::core::types::Frame;
use crate::navigation::resolver::NavigationResolver;
use crate::search::executor::QueryEngine;
use crate::worker::handle::{NotificationReceiver, WorkerHandle};
use crate::worker::messages::{Command, Notification, Reply};

type PendingLoad = Pin<Box<dyn Future<Output = Result<String>> + Send>>;

/// State owned by the worker task. Only this task ever touches it.
pub struct Worker<F: IndexFetcher> {
    config: Config,
    fetcher: Arc<F>,
    store: CorpusStore,
    engine: QueryEngine,
    navigator: NavigationResolver,
    criteria: String,
    commands: mpsc::UnboundedReceiver<Command>,
    notifications: mpsc::UnboundedSender<Notification>,
}

impl<F: IndexFetcher> Worker<F> {
    /// Start a worker on the current tokio runtime.
    pub fn spawn(config: Config, fetcher: F) -> (WorkerHandle, NotificationReceiver) {
        let (handle, notifications, _task) = Self::spawn_with_task(config, fetcher);
        (handle, notifications)
    }

    /// Like [`spawn`](Self::spawn), also returning the task so callers can await shutdown.
    pub fn spawn_with_task(config: Config, fetcher: F) -> (WorkerHandle, NotificationReceiver, JoinHandle<()>) {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let (notification_tx, notification_rx) = mpsc::unbounded_channel();

        let store = CorpusStore::default();
        let engine = QueryEngine::new(&config, store.schema());
        let navigator = NavigationResolver::new(config.random_seed);

        let worker = Worker {
            config,
            fetcher: Arc::new(fetcher),
            store,
            engine,
            navigator,
            criteria: String::new(),
            commands: command_rx,
            notifications: notification_tx,
        };
        let task = tokio::spawn(worker.run());

        (WorkerHandle::new(command_tx), notification_rx, task)
    }

    async fn run(mut self) {
        let mut pending: Option<PendingLoad> = None;

        loop {
            tokio::select! {
                maybe = self.commands.recv() => {
                    let Some(command) = maybe else { break; };
                    if self.handle(command, &mut pending).is_break() {
                        break;
                    }
                }
                fetched = async {
                    match pending.as_mut() {
                        Some(load) => load.await,
                        None => std::future::pending().await,
                    }
                }, if pending.is_some() => {
                    pending = None;
                    self.finish_load(fetched);
                }
            }
        }

        debug!("search worker stopped");
    }

    fn handle(&mut self, command: Command, pending: &mut Option<PendingLoad>) -> ControlFlow<()> {
        match command {
            Command::Init => self.start_load(pending),
            Command::Search(criteria) => {
                self.criteria = criteria;
                self.run_search();
            }
            Command::RandomFrame { reply } => {
                let frame = self.navigator.random(&self.store);
                self.deliver(reply, frame);
            }
            Command::LoadFrame { key, delta, reply } => {
                let frame = self.navigator.resolve(&self.store, &key, delta);
                self.deliver(reply, frame);
            }
            Command::Shutdown => return ControlFlow::Break(()),
        }
        ControlFlow::Continue(())
    }

    fn start_load(&mut self, pending: &mut Option<PendingLoad>) {
        if self.store.is_ready() {
            debug!("init ignored, index already loaded");
            return;
        }
        if pending.is_some() {
            debug!("init ignored, load already in progress");
            return;
        }

        let source = self.config.index_source.clone();
        info!(%source, "loading index");
        let fetcher = Arc::clone(&self.fetcher);
        *pending = Some(Box::pin(async move { fetch_payload(fetcher.as_ref(), &source).await }));
    }

    fn finish_load(&mut self, fetched: Result<String>) {
        match fetched.and_then(|raw| self.store.load_json(&raw)) {
            Ok(()) => {
                self.notify(Notification::Ready(true));
                // Criteria typed while loading are not lost
                self.run_search();
            }
            // already logged by the failing step
            Err(e) => self.notify(Notification::LoadError(e.to_string())),
        }
    }

    fn run_search(&mut self) {
        if let Some(outcome) = self.engine.search(&self.store, &self.criteria) {
            self.notify(Notification::DidSearch(outcome.did_search));
            self.notify(Notification::SearchResults(outcome.frames));
        }
    }

    fn deliver(&self, reply: Reply<Option<Frame>>, frame: Option<Frame>) {
        match reply {
            Some(reply) => {
                // Caller stopped waiting; nothing to do
                let _ = reply.send(frame);
            }
            None => {
                if let Some(frame) = frame {
                    self.notify(Notification::GoToFrame(frame));
                }
            }
        }
    }

    fn notify(&self, notification: Notification) {
        if self.notifications.send(notification).is_err() {
            debug!("notification dropped, host no longer listening");
        }
    }
}
