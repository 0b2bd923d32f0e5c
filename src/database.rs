//! Main entry point for Mojibox.
//!
//! This module provides the `Mojibox` struct, which wires a storage backend,
//! the settings manager, the collection store and the icon cache together.

use crate::error::Result;
use mojibox_core::clock::{Clock, SystemClock};
use mojibox_core::config::StoreConfig;
use mojibox_engine::{
    CollectionStore, CommunicationService, DefaultPayloadSource, IconCache, IconFetcher,
    InitSource, SettingsManager,
};
use mojibox_storage::{FileBackend, KeyValueBackend, MemoryBackend, StorageAdapter, StorageKeys};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// An opened emoji collection.
///
/// Create one with [`Mojibox::open`], [`Mojibox::in_memory`] or
/// [`Mojibox::builder`].
///
/// # Example
///
/// ```ignore
/// use mojibox::prelude::*;
///
/// let mb = Mojibox::open("./emoji-data")?;
///
/// mb.store.add_group(EmojiGroup::new("cats", "🐱"));
/// let groups = mb.store.get_emoji_groups();
///
/// mb.settings.set_settings(SettingsPatch::new().grid_columns(6), Some(&groups));
/// ```
pub struct Mojibox {
    /// Groups, ungrouped list, usage and hot ranking
    pub store: Arc<CollectionStore>,

    /// Global settings
    pub settings: Arc<SettingsManager>,

    /// Group icon cache
    pub icons: Arc<IconCache>,

    init_source: InitSource,
    path: Option<PathBuf>,
}

impl std::fmt::Debug for Mojibox {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Mojibox")
            .field("store", &self.store)
            .field("init_source", &self.init_source)
            .field("path", &self.path)
            .finish()
    }
}

impl Mojibox {
    /// Open a file-backed collection in `dir`, creating the directory if
    /// needed.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        Self::builder().path(dir).open()
    }

    /// Open a collection that lives only in memory.
    ///
    /// | Method | Disk Files | Shared |
    /// |--------|------------|--------|
    /// | `Mojibox::in_memory()` | None | No |
    /// | `builder().shared_memory(b)` | None | With every store on `b` |
    /// | `Mojibox::open(dir)` | One per key | With every store on `dir` |
    pub fn in_memory() -> Result<Self> {
        Self::builder().in_memory().open()
    }

    /// Create a builder.
    pub fn builder() -> MojiboxBuilder {
        MojiboxBuilder::new()
    }

    /// Where the collection was loaded from at open time.
    pub fn init_source(&self) -> InitSource {
        self.init_source
    }

    /// Data directory, for file-backed collections.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Pick up writes made by other instances on the same backend.
    pub fn reload(&self) -> bool {
        self.store.reload_from_storage()
    }
}

enum BackendChoice {
    Memory,
    Shared(Arc<dyn KeyValueBackend>),
    Path(PathBuf),
}

/// Builder for a [`Mojibox`].
///
/// # Example
///
/// ```ignore
/// // Two surfaces sharing one backend
/// let backend = MemoryBackend::new();
/// let popup = Mojibox::builder().shared_memory(backend.clone()).open()?;
/// let options = Mojibox::builder().shared_memory(backend).open()?;
///
/// // Tests: manual time, bundled defaults
/// let clock = Arc::new(ManualClock::new(0));
/// let mb = Mojibox::builder()
///     .clock(clock.clone())
///     .defaults(Arc::new(JsonFileDefaults::new("defaults.json")))
///     .open()?;
/// ```
pub struct MojiboxBuilder {
    backend: BackendChoice,
    config: StoreConfig,
    config_file: Option<PathBuf>,
    clock: Arc<dyn Clock>,
    communication: Option<Arc<dyn CommunicationService>>,
    defaults: Option<Arc<dyn DefaultPayloadSource>>,
    icon_fetcher: Option<Arc<dyn IconFetcher>>,
}

impl MojiboxBuilder {
    /// Create a builder with in-memory storage and default settings.
    pub fn new() -> Self {
        Self {
            backend: BackendChoice::Memory,
            config: StoreConfig::default(),
            config_file: None,
            clock: Arc::new(SystemClock),
            communication: None,
            defaults: None,
            icon_fetcher: None,
        }
    }

    /// Use a private in-memory backend.
    pub fn in_memory(mut self) -> Self {
        self.backend = BackendChoice::Memory;
        self
    }

    /// Use a backend shared with other instances.
    pub fn shared_memory(mut self, backend: MemoryBackend) -> Self {
        self.backend = BackendChoice::Shared(Arc::new(backend));
        self
    }

    /// Use any backend implementation.
    pub fn backend(mut self, backend: Arc<dyn KeyValueBackend>) -> Self {
        self.backend = BackendChoice::Shared(backend);
        self
    }

    /// Store data as files under `dir`.
    pub fn path(mut self, dir: impl AsRef<Path>) -> Self {
        self.backend = BackendChoice::Path(dir.as_ref().to_path_buf());
        self
    }

    /// Use explicit tunables.
    pub fn config(mut self, config: StoreConfig) -> Self {
        self.config = config;
        self
    }

    /// Load tunables from a TOML file at open time. Overrides
    /// [`config`](Self::config).
    pub fn config_file(mut self, path: impl AsRef<Path>) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Time source for decay and cache expiry.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Cross-surface notification channel.
    pub fn communication(mut self, comms: Arc<dyn CommunicationService>) -> Self {
        self.communication = Some(comms);
        self
    }

    /// Payload installed when the backend is empty.
    pub fn defaults(mut self, defaults: Arc<dyn DefaultPayloadSource>) -> Self {
        self.defaults = Some(defaults);
        self
    }

    /// Fetcher used by icon preloading.
    pub fn icon_fetcher(mut self, fetcher: Arc<dyn IconFetcher>) -> Self {
        self.icon_fetcher = Some(fetcher);
        self
    }

    /// Open the collection and load it from storage.
    pub fn open(self) -> Result<Mojibox> {
        let config = match &self.config_file {
            Some(path) => StoreConfig::from_toml_file(path)?,
            None => {
                self.config.validate()?;
                self.config
            }
        };

        let (backend, path) = match self.backend {
            BackendChoice::Memory => {
                let backend: Arc<dyn KeyValueBackend> = Arc::new(MemoryBackend::new());
                (backend, None)
            }
            BackendChoice::Shared(backend) => (backend, None),
            BackendChoice::Path(dir) => {
                let backend: Arc<dyn KeyValueBackend> = Arc::new(FileBackend::open(&dir)?);
                (backend, Some(dir))
            }
        };
        let adapter = StorageAdapter::with_keys(backend, StorageKeys::from_config(&config));

        let mut store = CollectionStore::new(config, adapter, self.clock);
        if let Some(comms) = self.communication {
            store = store.with_communication(comms);
        }
        if let Some(defaults) = self.defaults {
            store = store.with_defaults(defaults);
        }
        if let Some(fetcher) = self.icon_fetcher {
            store = store.with_icon_fetcher(fetcher);
        }

        let init_source = store.init_from_storage();
        tracing::debug!(path = ?path, source = ?init_source, "mojibox opened");
        let store = Arc::new(store);
        Ok(Mojibox {
            settings: Arc::clone(store.settings()),
            icons: Arc::clone(store.icons()),
            store,
            init_source,
            path,
        })
    }
}

impl Default for MojiboxBuilder {
    fn default() -> Self {
        Self::new()
    }
}

