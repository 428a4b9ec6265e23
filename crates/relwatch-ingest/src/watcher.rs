//! Folder watcher for newly created release documents.
//!
//! Watches a single directory (non-recursively) for file-creation events,
//! parses each supported document, and forwards the resulting change
//! entries to a registered sink. Event delivery is push-based: the OS
//! watcher feeds a channel and a worker thread blocks on it, so there is
//! no polling anywhere.

use crate::error::{IngestError, IngestResult};
use crate::parser::DocumentParser;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use relwatch_core::{ChangeEntry, DocKind};
use std::path::Path;
use std::sync::mpsc::{channel, Sender};
use std::sync::Arc;
use std::thread::JoinHandle;
use tracing::{debug, error, info};

/// Receives the change entries parsed from each new document.
///
/// Registered with the watcher at construction; implementations must
/// tolerate sequential single-writer use.
pub trait ChangeSink: Send + Sync {
    fn on_document(&self, path: &Path, entries: &[ChangeEntry]);
}

/// Default sink: logs one numbered line per change entry.
pub struct LogSink;

impl ChangeSink for LogSink {
    fn on_document(&self, path: &Path, entries: &[ChangeEntry]) {
        info!("Parsed {} changes from {:?}", entries.len(), path);
        for (i, entry) in entries.iter().enumerate() {
            info!("Change {}: {}", i + 1, entry.text);
        }
    }
}

/// Lifecycle states of a folder watcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchState {
    /// Constructed, not yet observing.
    Idle,
    /// Observing a directory; events are being processed.
    Watching,
    /// Teardown requested; worker draining its final cycle.
    Stopping,
    /// Observer resources released; no further events processed.
    Stopped,
}

enum WorkerMsg {
    Event(notify::Event),
    Shutdown,
}

/// Resources owned by one live watch session.
struct WatchSession {
    // Held so the OS watch registration stays alive; dropped on stop.
    _watcher: RecommendedWatcher,
    tx: Sender<WorkerMsg>,
    handle: JoinHandle<()>,
}

/// Watches a directory for new documents and feeds them through a parser.
pub struct FolderWatcher {
    parser: Arc<DocumentParser>,
    sink: Arc<dyn ChangeSink>,
    state: WatchState,
    session: Option<WatchSession>,
}

impl FolderWatcher {
    /// Create an idle watcher around a parser and a sink.
    pub fn new(parser: DocumentParser, sink: Arc<dyn ChangeSink>) -> Self {
        Self {
            parser: Arc::new(parser),
            sink,
            state: WatchState::Idle,
            session: None,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> WatchState {
        self.state
    }

    /// Start observing `dir` for newly created documents.
    ///
    /// Fails with `WatchSetup` if `dir` is not an existing directory or
    /// the OS watcher cannot be registered; on failure no observer is
    /// left behind and the state is unchanged.
    pub fn start(&mut self, dir: &Path) -> IngestResult<()> {
        if self.session.is_some() {
            return Err(IngestError::WatchSetup(format!(
                "watcher already running (state: {:?})",
                self.state
            )));
        }

        if !dir.is_dir() {
            return Err(IngestError::WatchSetup(format!(
                "not a watchable directory: {}",
                dir.display()
            )));
        }

        let (tx, rx) = channel();

        let event_tx = tx.clone();
        let mut watcher =
            notify::recommended_watcher(move |res: Result<notify::Event, notify::Error>| {
                match res {
                    Ok(event) => {
                        // Worker gone means we are shutting down; drop the event.
                        let _ = event_tx.send(WorkerMsg::Event(event));
                    }
                    Err(e) => error!("Watch error: {}", e),
                }
            })
            .map_err(|e| IngestError::WatchSetup(e.to_string()))?;

        watcher
            .watch(dir, RecursiveMode::NonRecursive)
            .map_err(|e| IngestError::WatchSetup(e.to_string()))?;

        let parser = Arc::clone(&self.parser);
        let sink = Arc::clone(&self.sink);
        let handle = std::thread::spawn(move || {
            while let Ok(msg) = rx.recv() {
                match msg {
                    WorkerMsg::Event(event) => handle_event(&parser, sink.as_ref(), &event),
                    WorkerMsg::Shutdown => break,
                }
            }
        });

        info!("Watching directory: {:?}", dir);

        self.session = Some(WatchSession {
            _watcher: watcher,
            tx,
            handle,
        });
        self.state = WatchState::Watching;

        Ok(())
    }

    /// Stop observing and release watch resources.
    ///
    /// Joins the worker thread; idempotent, so a second call (or a call
    /// on a watcher that never started) is a no-op.
    pub fn stop(&mut self) {
        let Some(session) = self.session.take() else {
            return;
        };

        self.state = WatchState::Stopping;
        debug!("Stopping watcher");

        // The shutdown message queues behind any pending events, so the
        // worker finishes its current delivery cycle before exiting.
        let _ = session.tx.send(WorkerMsg::Shutdown);
        drop(session._watcher);
        if session.handle.join().is_err() {
            error!("Watch worker panicked during shutdown");
        }

        self.state = WatchState::Stopped;
        info!("Watcher stopped");
    }
}

impl Drop for FolderWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Process one filesystem event: parse newly created documents and
/// forward their entries to the sink.
///
/// A parse failure is logged with the offending path and otherwise
/// swallowed, so one bad file never takes down the watch session.
fn handle_event(parser: &DocumentParser, sink: &dyn ChangeSink, event: &notify::Event) {
    if !matches!(event.kind, EventKind::Create(_)) {
        return;
    }

    for path in &event.paths {
        if path.is_dir() {
            continue;
        }

        if DocKind::from_path(path).is_none() {
            debug!("Ignoring unsupported file: {:?}", path);
            continue;
        }

        info!("Detected new document: {:?}", path);

        match parser.parse(path) {
            Ok(entries) => sink.on_document(path, &entries),
            Err(e) => error!("Failed to parse {:?}: {}", path, e),
        }
    }
}
