use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use crate::error::AssetError;
use crate::gltf::ModelBounds;

type LoadResult = Result<ModelBounds, AssetError>;

/// A model load running in the background.
///
/// The frame loop polls it once per tick. The load is fire-and-forget: it is
/// never retried or cancelled, and if it never finishes the caller simply
/// never sees a result.
#[derive(Debug)]
pub struct PendingLoad {
    label: String,
    rx: Option<Receiver<LoadResult>>,
}

impl PendingLoad {
    /// Compute the bounds of the glTF file at `path` on a worker thread.
    pub fn spawn(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let label = path.display().to_string();
        Self::spawn_with(label, move || ModelBounds::from_gltf_file(&path))
    }

    /// Run an arbitrary load function on a worker thread.
    pub fn spawn_with<F>(label: impl Into<String>, load: F) -> Self
    where
        F: FnOnce() -> LoadResult + Send + 'static,
    {
        let label = label.into();
        let (tx, rx) = mpsc::channel();
        tracing::debug!(model = %label, "starting model load");
        thread::spawn(move || {
            // The receiver may already be gone; nobody is waiting then.
            let _ = tx.send(load());
        });
        Self {
            label,
            rx: Some(rx),
        }
    }

    /// A load that has already finished, for synchronous sources.
    pub fn ready(label: impl Into<String>, result: LoadResult) -> Self {
        let (tx, rx) = mpsc::channel();
        let _ = tx.send(result);
        Self {
            label: label.into(),
            rx: Some(rx),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// True once the result has been handed out.
    pub fn is_finished(&self) -> bool {
        self.rx.is_none()
    }

    /// Non-blocking check for the result. Returns `Some` exactly once.
    pub fn poll(&mut self) -> Option<LoadResult> {
        let rx = self.rx.as_ref()?;
        let result = match rx.try_recv() {
            Ok(result) => result,
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Disconnected) => Err(AssetError::LoaderDisconnected),
        };
        self.rx = None;
        Some(result)
    }

    /// Block until the result arrives. Returns `None` if it was already taken.
    pub fn wait(&mut self) -> Option<LoadResult> {
        let rx = self.rx.take()?;
        Some(rx.recv().unwrap_or(Err(AssetError::LoaderDisconnected)))
    }
}
