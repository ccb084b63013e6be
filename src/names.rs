use crate::catalog::{CatalogIndex, CatalogStore, QuickCache};
use crate::manifest::ManifestReader;
use crate::model::{SandboxCandidate, SandboxDir};
use crate::shortcuts::ShortcutIndex;

pub const UNKNOWN_NAME: &str = "UNKNOWN";

/// Prefix for names recovered from the full catalog.
pub const CATALOG_MARKER: char = '*';

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NameSource {
    Shortcut,
    Manifest,
    QuickCache,
    Catalog,
}

/// Precedence: the first source that yields a name wins.
pub const RESOLUTION_ORDER: [NameSource; 4] = [
    NameSource::Shortcut,
    NameSource::Manifest,
    NameSource::QuickCache,
    NameSource::Catalog,
];

#[derive(Clone, Debug)]
pub struct BatchResolution {
    pub candidates: Vec<SandboxCandidate>,
    pub cache_updated: bool,
}

/// Names prefixes for one batch.
///
/// Owns the quick cache for the duration of the batch; the full catalog is
/// pulled from the store the first time every cheaper source misses, and at
/// most once.
pub struct NameResolver<'a, S: CatalogStore + ?Sized> {
    shortcuts: &'a ShortcutIndex,
    manifests: ManifestReader,
    quick: QuickCache,
    store: &'a S,
    catalog: Option<CatalogIndex>,
}

impl<'a, S: CatalogStore + ?Sized> NameResolver<'a, S> {
    pub fn new(
        shortcuts: &'a ShortcutIndex,
        manifests: ManifestReader,
        quick: QuickCache,
        store: &'a S,
    ) -> Self {
        Self {
            shortcuts,
            manifests,
            quick,
            store,
            catalog: None,
        }
    }

    pub fn resolve(&mut self, id: &str) -> String {
        self.resolve_with_source(id)
            .map(|(name, _)| name)
            .unwrap_or_else(|| UNKNOWN_NAME.to_string())
    }

    pub fn resolve_with_source(&mut self, id: &str) -> Option<(String, NameSource)> {
        RESOLUTION_ORDER
            .iter()
            .find_map(|source| self.lookup(*source, id).map(|name| (name, *source)))
    }

    /// Queries a single source.
    pub fn lookup(&mut self, source: NameSource, id: &str) -> Option<String> {
        match source {
            NameSource::Shortcut => self.shortcuts.get(id).map(str::to_string),
            NameSource::Manifest => self.manifests.name_for(id),
            NameSource::QuickCache => self.quick.get(id).map(str::to_string),
            NameSource::Catalog => {
                let name = self.catalog().get(id)?;
                let name = format!("{}{}", CATALOG_MARKER, name);
                self.quick.insert(id, &name);
                Some(name)
            }
        }
    }

    pub fn resolve_batch(&mut self, dirs: Vec<SandboxDir>) -> BatchResolution {
        let candidates = dirs
            .into_iter()
            .map(|dir| {
                let display_name = self.resolve(&dir.id);
                SandboxCandidate {
                    id: dir.id,
                    display_name,
                    path: dir.path,
                }
            })
            .collect();
        BatchResolution {
            candidates,
            cache_updated: self.quick.is_dirty(),
        }
    }

    pub fn catalog_loaded(&self) -> bool {
        self.catalog.is_some()
    }

    pub fn quick_cache(&self) -> &QuickCache {
        &self.quick
    }

    pub fn into_quick_cache(self) -> QuickCache {
        self.quick
    }

    fn catalog(&mut self) -> &CatalogIndex {
        let store = self.store;
        self.catalog.get_or_insert_with(|| match store.load_full() {
            Ok(index) => index,
            Err(err) => {
                tracing::warn!(error = ?err, "catalog snapshot unavailable");
                CatalogIndex::default()
            }
        })
    }
}

/// Loads the quick cache, names every prefix, and writes the cache back once
/// if the catalog contributed new entries.
pub fn annotate_sandboxes<S: CatalogStore + ?Sized>(
    store: &S,
    shortcuts: &ShortcutIndex,
    manifests: ManifestReader,
    dirs: Vec<SandboxDir>,
) -> BatchResolution {
    let quick = store.load_quick().unwrap_or_else(|err| {
        tracing::warn!(error = ?err, "quick cache unreadable, starting empty");
        QuickCache::default()
    });

    let mut resolver = NameResolver::new(shortcuts, manifests, quick, store);
    let batch = resolver.resolve_batch(dirs);

    if batch.cache_updated {
        let quick = resolver.into_quick_cache();
        if let Err(err) = store.save_quick(&quick) {
            tracing::warn!(error = ?err, "failed to update quick cache");
        }
    }
    batch
}

#[cfg(test)]
#[path = "tests/names_tests.rs"]
mod tests;
