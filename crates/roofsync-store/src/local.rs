//! Typed local store for the property collection and the credential.

use roofsync_core::{Credential, PropertyCollection};

use crate::Result;
use crate::traits::KeyValueStore;

/// Key holding the serialized property collection (a JSON array).
pub const PROPERTIES_KEY: &str = "solar_properties";

/// Key holding the remote access credential.
pub const CREDENTIAL_KEY: &str = "github_token";

/// The two persisted scalars of a roofsync instance.
///
/// Missing or corrupt content loads as an empty collection (or no
/// credential) and is logged. A backend read error is only swallowed by the
/// display-side [`LocalStore::load`]. Saving is synchronous and durable.
#[derive(Debug)]
pub struct LocalStore<K> {
    backend: K,
}

impl<K: KeyValueStore> LocalStore<K> {
    /// Wrap a key/value backend.
    pub fn new(backend: K) -> Self {
        Self { backend }
    }

    /// The underlying backend.
    pub fn backend(&self) -> &K {
        &self.backend
    }

    /// Load the property collection for display.
    ///
    /// A backend that cannot be read yields an empty collection. Anything
    /// about to rewrite the collection, locally or remotely, must use
    /// [`LocalStore::try_load`] instead.
    pub fn load(&self) -> PropertyCollection {
        self.try_load().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "could not read stored properties; starting empty");
            PropertyCollection::new()
        })
    }

    /// Load the property collection, failing if the backend cannot be read.
    ///
    /// Nothing stored, or stored content that does not decode as a valid
    /// collection, still yields an empty collection.
    pub fn try_load(&self) -> Result<PropertyCollection> {
        let Some(raw) = self.backend.read(PROPERTIES_KEY)? else {
            return Ok(PropertyCollection::new());
        };

        match PropertyCollection::from_json_slice(raw.as_bytes()) {
            Ok(collection) => Ok(collection),
            Err(e) => {
                tracing::warn!(error = %e, "stored properties are unusable; starting empty");
                Ok(PropertyCollection::new())
            }
        }
    }

    /// Persist the property collection, replacing what was stored.
    pub fn save(&self, collection: &PropertyCollection) -> Result<()> {
        let json = serde_json::to_string(collection)?;
        self.backend.write(PROPERTIES_KEY, &json)?;
        tracing::debug!(properties = collection.len(), "saved properties");
        Ok(())
    }

    /// Load the credential, if one is configured.
    pub fn credential(&self) -> Option<Credential> {
        match self.backend.read(CREDENTIAL_KEY) {
            Ok(raw) => raw.and_then(Credential::new),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored credential");
                None
            }
        }
    }

    /// Store a credential, or remove it with `None`.
    pub fn set_credential(&self, credential: Option<&Credential>) -> Result<()> {
        match credential {
            Some(credential) => self.backend.write(CREDENTIAL_KEY, credential.expose()),
            None => self.backend.remove(CREDENTIAL_KEY),
        }
    }
}
