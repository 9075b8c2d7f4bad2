use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, Condvar, Mutex},
};

use anyhow::Context;

use crate::{
    assets::decode::{self, LayerImage},
    foundation::error::{TraitmixError, TraitmixResult},
};

/// Byte access for layer sources, injected so tests and embedders can swap
/// the filesystem out. Implementations are shared across the render fan-out.
pub trait ImageLoader: Send + Sync {
    /// Fetch the raw encoded bytes for a normalized source path.
    fn load_bytes(&self, norm_source: &str) -> TraitmixResult<Vec<u8>>;
}

/// Loads layer bytes from a directory root on the local filesystem.
#[derive(Debug)]
pub struct FsImageLoader {
    root: PathBuf,
}

impl FsImageLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ImageLoader for FsImageLoader {
    fn load_bytes(&self, norm_source: &str) -> TraitmixResult<Vec<u8>> {
        let path = self.root.join(Path::new(norm_source));
        std::fs::read(&path)
            .with_context(|| format!("read layer bytes from '{}'", path.display()))
            .map_err(TraitmixError::from)
    }
}

/// Normalize and validate root-relative layer source paths.
///
/// The normalized result uses `/` separators, removes `.` segments, and
/// rejects absolute paths or parent traversals (`..`).
pub fn normalize_source(source: &str) -> TraitmixResult<String> {
    let s = source.replace('\\', "/");
    if s.starts_with('/') {
        return Err(TraitmixError::validation("layer sources must be relative"));
    }
    if s.is_empty() {
        return Err(TraitmixError::validation("layer source must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(TraitmixError::validation(
                "layer sources must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(TraitmixError::validation(
            "layer source must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[derive(Clone)]
enum SharedDecodeResult {
    Success(Arc<LayerImage>),
    Failure(String),
}

/// One in-flight decode. Later requesters for the same source block on `cv`
/// and share the first loader's outcome instead of decoding again.
struct DecodeInFlight {
    result: Mutex<Option<SharedDecodeResult>>,
    cv: Condvar,
}

impl DecodeInFlight {
    fn new() -> Self {
        Self {
            result: Mutex::new(None),
            cv: Condvar::new(),
        }
    }

    fn set(&self, result: SharedDecodeResult) {
        if let Ok(mut slot) = self.result.lock() {
            *slot = Some(result);
            self.cv.notify_all();
        }
    }

    fn wait(&self) -> TraitmixResult<Arc<LayerImage>> {
        let mut guard = self.result.lock().map_err(|_| poisoned())?;
        loop {
            if let Some(result) = guard.as_ref() {
                return match result {
                    SharedDecodeResult::Success(image) => Ok(Arc::clone(image)),
                    SharedDecodeResult::Failure(msg) => Err(TraitmixError::asset(msg.clone())),
                };
            }
            guard = self.cv.wait(guard).map_err(|_| poisoned())?;
        }
    }
}

fn poisoned() -> TraitmixError {
    TraitmixError::asset("image cache lock poisoned")
}

/// Memoizes decoded layer images by normalized source path.
///
/// Append-only: successful decodes stay cached for the cache's lifetime.
/// Failures propagate to every waiter of that flight but are never cached,
/// so a later call retries from scratch.
pub struct ImageCache {
    loader: Arc<dyn ImageLoader>,
    images: Mutex<HashMap<String, Arc<LayerImage>>>,
    in_flight: Mutex<HashMap<String, Arc<DecodeInFlight>>>,
    decode_counts: Mutex<HashMap<String, u64>>,
}

impl ImageCache {
    pub fn new(loader: Arc<dyn ImageLoader>) -> Self {
        Self {
            loader,
            images: Mutex::new(HashMap::new()),
            in_flight: Mutex::new(HashMap::new()),
            decode_counts: Mutex::new(HashMap::new()),
        }
    }

    /// Shorthand for a cache over a local asset directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self::new(Arc::new(FsImageLoader::new(root)))
    }

    /// Load (or reuse) the decoded image for one source path.
    pub fn get_or_load(&self, source: &str) -> TraitmixResult<Arc<LayerImage>> {
        let norm = normalize_source(source)?;

        if let Some(image) = self.get_cached(&norm) {
            return Ok(image);
        }

        let (flight, is_owner) = self.join_inflight(&norm)?;
        if !is_owner {
            return flight.wait();
        }

        // A finished load may have landed between the cache check and
        // joining, so the owner re-checks before decoding.
        let result = match self.get_cached(&norm) {
            Some(image) => Ok(image),
            None => self.load_and_decode(&norm),
        };
        let shared = match &result {
            Ok(image) => SharedDecodeResult::Success(Arc::clone(image)),
            Err(err) => SharedDecodeResult::Failure(err.to_string()),
        };
        self.finish_inflight(&norm, &flight, shared);

        result
    }

    /// How many times a source has actually been decoded; the memoization
    /// contract says this stays at 1 for any number of successful loads.
    pub fn decode_count(&self, source: &str) -> u64 {
        let Ok(norm) = normalize_source(source) else {
            return 0;
        };
        self.decode_counts
            .lock()
            .ok()
            .and_then(|counts| counts.get(&norm).copied())
            .unwrap_or(0)
    }

    fn get_cached(&self, norm: &str) -> Option<Arc<LayerImage>> {
        self.images
            .lock()
            .ok()
            .and_then(|images| images.get(norm).cloned())
    }

    fn join_inflight(&self, norm: &str) -> TraitmixResult<(Arc<DecodeInFlight>, bool)> {
        let mut map = self.in_flight.lock().map_err(|_| poisoned())?;
        if let Some(existing) = map.get(norm) {
            return Ok((Arc::clone(existing), false));
        }

        let flight = Arc::new(DecodeInFlight::new());
        map.insert(norm.to_string(), Arc::clone(&flight));
        Ok((flight, true))
    }

    fn finish_inflight(
        &self,
        norm: &str,
        flight: &Arc<DecodeInFlight>,
        result: SharedDecodeResult,
    ) {
        flight.set(result);
        if let Ok(mut map) = self.in_flight.lock() {
            map.remove(norm);
        }
    }

    fn load_and_decode(&self, norm: &str) -> TraitmixResult<Arc<LayerImage>> {
        let bytes = self.loader.load_bytes(norm)?;
        let image = Arc::new(decode::decode_image(&bytes)?);

        if let Ok(mut images) = self.images.lock() {
            images.insert(norm.to_string(), Arc::clone(&image));
        }
        if let Ok(mut counts) = self.decode_counts.lock() {
            *counts.entry(norm.to_string()).or_insert(0) += 1;
        }
        tracing::debug!(
            source = norm,
            width = image.width,
            height = image.height,
            "decoded layer image"
        );

        Ok(image)
    }
}
