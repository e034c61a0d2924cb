use std::{
    cell::RefCell,
    collections::{BTreeMap, HashMap},
    fmt,
    future::Future,
    path::PathBuf,
    pin::Pin,
    rc::Rc,
};

use anyhow::Context;

use crate::{
    assets::decode::{Texture, decode_texture},
    foundation::error::{SlideFxError, SlideFxResult},
};

#[derive(Clone, Debug, PartialEq)]
pub enum TextureState {
    Pending,
    Ready(Texture),
    Failed(String),
}

#[derive(Debug)]
struct TextureSlot {
    key: String,
    state: RefCell<TextureState>,
    placeholder: Texture,
}

/// Shared reference to a cached texture. Handles are usable immediately: until the load
/// resolves they sample a neutral placeholder, and resolution swaps the pixels in place for
/// every holder at once.
#[derive(Clone)]
pub struct TextureHandle(Rc<TextureSlot>);

impl TextureHandle {
    pub fn path(&self) -> &str {
        &self.0.key
    }

    pub fn is_ready(&self) -> bool {
        matches!(*self.0.state.borrow(), TextureState::Ready(_))
    }

    pub fn state(&self) -> TextureState {
        self.0.state.borrow().clone()
    }

    /// The pixels to draw right now: real data when ready, the placeholder otherwise.
    pub fn texture(&self) -> Texture {
        match &*self.0.state.borrow() {
            TextureState::Ready(t) => t.clone(),
            TextureState::Pending | TextureState::Failed(_) => self.0.placeholder.clone(),
        }
    }
}

impl PartialEq for TextureHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TextureHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TextureHandle")
            .field("path", &self.0.key)
            .field("ready", &self.is_ready())
            .finish()
    }
}

pub type LoadFuture<'a> = Pin<Box<dyn Future<Output = anyhow::Result<Vec<u8>>> + 'a>>;

/// Fetches encoded texture bytes for a normalized relative path.
pub trait TextureLoader {
    fn fetch<'a>(&'a self, path: &'a str) -> LoadFuture<'a>;
}

/// Reads textures from a directory on disk.
#[derive(Clone, Debug)]
pub struct FsTextureLoader {
    root: PathBuf,
}

impl FsTextureLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl TextureLoader for FsTextureLoader {
    fn fetch<'a>(&'a self, path: &'a str) -> LoadFuture<'a> {
        Box::pin(async move {
            let full = self.root.join(path);
            std::fs::read(&full).with_context(|| format!("read texture '{}'", full.display()))
        })
    }
}

/// Serves textures from memory; paths without an entry fail to load.
#[derive(Clone, Debug, Default)]
pub struct MemoryTextureLoader {
    files: HashMap<String, Vec<u8>>,
}

impl MemoryTextureLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>, bytes: Vec<u8>) {
        self.files.insert(path.into(), bytes);
    }

    pub fn with(mut self, path: impl Into<String>, bytes: Vec<u8>) -> Self {
        self.insert(path, bytes);
        self
    }
}

impl TextureLoader for MemoryTextureLoader {
    fn fetch<'a>(&'a self, path: &'a str) -> LoadFuture<'a> {
        Box::pin(async move {
            self.files
                .get(path)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("no such texture '{path}'"))
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct LoadReport {
    pub loaded: Vec<String>,
    pub failed: Vec<(String, String)>,
}

impl LoadReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Texture cache owned by a carousel instance and passed by reference to whoever needs it.
/// Dropping or clearing it ends every cached load deterministically.
#[derive(Debug, Default)]
pub struct ResourceCache {
    slots: BTreeMap<String, TextureHandle>,
}

impl ResourceCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the handle for `path`, creating a pending slot on first request.
    pub fn request(&mut self, path: &str) -> SlideFxResult<TextureHandle> {
        let key = normalize_rel_path(path)?;
        if let Some(h) = self.slots.get(&key) {
            return Ok(h.clone());
        }
        let handle = TextureHandle(Rc::new(TextureSlot {
            key: key.clone(),
            state: RefCell::new(TextureState::Pending),
            placeholder: Texture::placeholder(),
        }));
        tracing::debug!(path = %key, "texture requested");
        self.slots.insert(key, handle.clone());
        Ok(handle)
    }

    pub fn get(&self, path: &str) -> Option<TextureHandle> {
        let key = normalize_rel_path(path).ok()?;
        self.slots.get(&key).cloned()
    }

    /// Paths whose load has not resolved yet, in stable order.
    pub fn pending(&self) -> Vec<String> {
        self.slots
            .iter()
            .filter(|(_, h)| matches!(*h.0.state.borrow(), TextureState::Pending))
            .map(|(k, _)| k.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Handles held outside the cache for `path`.
    pub fn external_refs(&self, path: &str) -> usize {
        self.get(path)
            .map(|h| Rc::strong_count(&h.0).saturating_sub(2))
            .unwrap_or(0)
    }

    /// Decodes `bytes` and swaps them into the slot for `path`.
    pub fn resolve(&mut self, path: &str, bytes: &[u8]) -> SlideFxResult<()> {
        let handle = self.request(path)?;
        match decode_texture(bytes) {
            Ok(tex) => {
                tracing::debug!(path = %handle.path(), w = tex.width, h = tex.height, "texture ready");
                *handle.0.state.borrow_mut() = TextureState::Ready(tex);
                Ok(())
            }
            Err(e) => {
                let err = SlideFxError::resource_load(handle.path(), &e);
                self.fail(handle.path(), &e);
                Err(err)
            }
        }
    }

    /// Marks `path` as failed; holders keep sampling the placeholder.
    pub fn fail(&mut self, path: &str, err: impl fmt::Display) {
        let Ok(handle) = self.request(path) else {
            return;
        };
        tracing::warn!(path = %handle.path(), error = %err, "texture load failed; using placeholder");
        *handle.0.state.borrow_mut() = TextureState::Failed(err.to_string());
    }

    /// Drives `loader` over every pending path. Failures degrade to the placeholder and are
    /// collected in the report rather than returned.
    pub async fn load_pending(&mut self, loader: &dyn TextureLoader) -> LoadReport {
        let mut report = LoadReport::default();
        for path in self.pending() {
            match loader.fetch(&path).await {
                Ok(bytes) => match self.resolve(&path, &bytes) {
                    Ok(()) => report.loaded.push(path),
                    Err(e) => report.failed.push((path, e.to_string())),
                },
                Err(e) => {
                    let err = SlideFxError::resource_load(&path, format!("{e:#}"));
                    self.fail(&path, &err);
                    report.failed.push((path, err.to_string()));
                }
            }
        }
        report
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

/// Normalizes a relative resource path: forward slashes, no `.` segments, no escapes.
pub fn normalize_rel_path(source: &str) -> SlideFxResult<String> {
    let s = source.trim().replace('\\', "/");
    if s.starts_with('/') {
        return Err(SlideFxError::validation("resource paths must be relative"));
    }
    if s.is_empty() {
        return Err(SlideFxError::validation("resource path must be non-empty"));
    }

    let mut out = Vec::<&str>::new();
    for part in s.split('/') {
        if part.is_empty() || part == "." {
            continue;
        }
        if part == ".." {
            return Err(SlideFxError::validation(
                "resource paths must not contain '..'",
            ));
        }
        out.push(part);
    }

    if out.is_empty() {
        return Err(SlideFxError::validation(
            "resource path must contain a file name",
        ));
    }

    Ok(out.join("/"))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/cache.rs"]
mod tests;
