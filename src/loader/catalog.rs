use super::ensure_directory;
use crate::catalog::{CatalogKind, ReferenceCatalog};
use crate::error::LoadError;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, info};

/// One entry of a catalog file. Only the ID is of interest here; entries
/// without one are skipped.
trait CatalogEntry: DeserializeOwned {
    const FILE_NAME: &'static str;
    const KIND: CatalogKind;

    fn into_id(self) -> String;
}

macro_rules! catalog_entries {
    ( $( ($name:ident, $field:literal, $file:literal, $kind:expr) ),* $(,)? ) => {
        $(
            #[derive(Deserialize)]
            struct $name {
                #[serde(rename = $field, default)]
                id: String,
            }

            impl CatalogEntry for $name {
                const FILE_NAME: &'static str = $file;
                const KIND: CatalogKind = $kind;

                fn into_id(self) -> String {
                    self.id
                }
            }
        )*
    };
}

catalog_entries! {
    (NpcEntry, "NPCID", "npcs.yaml", CatalogKind::Character),
    (ItemEntry, "ItemID", "items.yaml", CatalogKind::Item),
    (FactionEntry, "FactionID", "factions.yaml", CatalogKind::Faction),
    (ResourceEntry, "ResourceID", "resources.yaml", CatalogKind::Resource),
    (ObjectEntry, "ObjectID", "objects.yaml", CatalogKind::Object),
}

/// Loads the five catalog files from `dir`.
///
/// A missing file yields an empty set. A missing directory, an unreadable file,
/// or a malformed file is fatal.
pub fn load_catalog(dir: impl AsRef<Path>) -> Result<ReferenceCatalog, LoadError> {
    let dir = dir.as_ref();
    ensure_directory(dir).map_err(|message| LoadError::CatalogUnreadable {
        path: dir.display().to_string(),
        message,
    })?;

    let mut catalog = ReferenceCatalog::new();
    load_entries::<NpcEntry>(dir, &mut catalog)?;
    load_entries::<ItemEntry>(dir, &mut catalog)?;
    load_entries::<FactionEntry>(dir, &mut catalog)?;
    load_entries::<ResourceEntry>(dir, &mut catalog)?;
    load_entries::<ObjectEntry>(dir, &mut catalog)?;

    info!(
        "Loaded reference catalog from {} ({} IDs)",
        dir.display(),
        catalog.len()
    );
    Ok(catalog)
}

fn load_entries<T: CatalogEntry>(dir: &Path, catalog: &mut ReferenceCatalog) -> Result<(), LoadError> {
    let path = dir.join(T::FILE_NAME);
    let unreadable = |message: String| LoadError::CatalogUnreadable {
        path: path.display().to_string(),
        message,
    };

    let content = match fs::read_to_string(&path) {
        Ok(content) => content,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            debug!("Catalog file {} not found, using an empty set", path.display());
            return Ok(());
        }
        Err(e) => return Err(unreadable(e.to_string())),
    };
    if content.trim().is_empty() {
        return Ok(());
    }

    let entries: Vec<T> = serde_yaml::from_str(&content).map_err(|e| unreadable(e.to_string()))?;
    let ids: Vec<String> = entries
        .into_iter()
        .map(CatalogEntry::into_id)
        .filter(|id| !id.is_empty())
        .collect();
    debug!("Read {} {} IDs from {}", ids.len(), T::KIND, path.display());
    catalog.extend(T::KIND, ids);
    Ok(())
}
