//! Extension-keyed document factories.
//!
//! A host owns an `OpenerRegistry` and passes it to `activate`, which
//! registers the table editor for `.csv` and `.tsv`. The returned
//! `Activation` removes exactly those registrations again on `deactivate`.

use std::collections::BTreeMap;
use std::path::Path;

use tracing::{debug, info};

use crate::config::EditorConfig;
use crate::editor::{OpenOutcome, TableEditor};
use crate::error::Result;
use crate::fileio::FileHost;

pub type OpenerFn = Box<dyn Fn(&Path, &dyn FileHost) -> Result<OpenOutcome>>;

/// Extensions handled by the table editor
pub const TABLE_EXTENSIONS: [&str; 2] = ["csv", "tsv"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct OpenerId(u64);

struct Opener {
    extension: String,
    factory: OpenerFn,
}

/// Registered openers, consulted in registration order
#[derive(Default)]
pub struct OpenerRegistry {
    openers: BTreeMap<OpenerId, Opener>,
    next_id: u64,
}

impl OpenerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `factory` for files whose extension matches `extension`
    /// (case-insensitive, without the dot)
    pub fn register(&mut self, extension: &str, factory: OpenerFn) -> OpenerId {
        let id = OpenerId(self.next_id);
        self.next_id += 1;
        self.openers.insert(
            id,
            Opener { extension: extension.to_ascii_lowercase(), factory },
        );
        debug!(extension, ?id, "registered opener");
        id
    }

    /// Returns false if `id` was not registered
    pub fn unregister(&mut self, id: OpenerId) -> bool {
        self.openers.remove(&id).is_some()
    }

    pub fn handles(&self, path: &Path) -> bool {
        self.find(path).is_some()
    }

    pub fn len(&self) -> usize {
        self.openers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.openers.is_empty()
    }

    fn find(&self, path: &Path) -> Option<&Opener> {
        let ext = path.extension()?.to_str()?.to_ascii_lowercase();
        self.openers.values().find(|o| o.extension == ext)
    }

    /// Open `path` with the first opener that claims its extension, or
    /// `None` if nobody does
    pub fn open(&self, path: &Path, host: &dyn FileHost) -> Option<Result<OpenOutcome>> {
        let opener = self.find(path)?;
        Some((opener.factory)(path, host))
    }
}

/// Registrations made by `activate`
#[derive(Debug)]
pub struct Activation {
    ids: Vec<OpenerId>,
}

impl Activation {
    pub fn deactivate(self, registry: &mut OpenerRegistry) {
        for id in self.ids {
            registry.unregister(id);
        }
        info!("table editor deactivated");
    }
}

/// Register the table editor for every extension in `TABLE_EXTENSIONS`
pub fn activate(registry: &mut OpenerRegistry, config: &EditorConfig) -> Activation {
    let ids = TABLE_EXTENSIONS
        .iter()
        .map(|ext| {
            let config = config.clone();
            let factory: OpenerFn =
                Box::new(move |path, host| TableEditor::open(path, host, &config));
            registry.register(ext, factory)
        })
        .collect();
    info!("table editor activated");
    Activation { ids }
}
