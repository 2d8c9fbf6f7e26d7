use std::collections::HashMap;
use std::fmt::Write as _;
use std::sync::{Arc, RwLock};

use rand::rngs::OsRng;
use rand::TryRngCore;

use super::domain::ReceiptId;

const ID_BYTES: usize = 16;
const MAX_ID_ATTEMPTS: usize = 8;

/// Storage abstraction so the service can run against any keyed backend.
pub trait ReceiptStore: Send + Sync {
    /// Stores the points under a freshly generated identifier.
    fn put(&self, points: u64) -> Result<ReceiptId, StoreError>;
    fn get(&self, id: &ReceiptId) -> Result<Option<u64>, StoreError>;
}

/// Error enumeration for store failures.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Entropy(#[from] EntropyError),
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// The random source could not produce identifier bytes.
#[derive(Debug, thiserror::Error)]
#[error("failed to generate unique id: {0}")]
pub struct EntropyError(pub String);

/// Source of receipt identifiers.
pub trait IdGenerator: Send + Sync {
    fn next_id(&self) -> Result<ReceiptId, EntropyError>;
}

/// 128 bits from the operating system RNG, hex encoded.
#[derive(Debug, Default, Clone, Copy)]
pub struct OsRandomIds;

impl IdGenerator for OsRandomIds {
    fn next_id(&self) -> Result<ReceiptId, EntropyError> {
        let mut bytes = [0u8; ID_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|err| EntropyError(err.to_string()))?;
        Ok(ReceiptId(hex_encode(&bytes)))
    }
}

fn hex_encode(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{byte:02x}");
    }
    out
}

/// Process-local store guarded by a reader/writer lock.
#[derive(Debug, Clone)]
pub struct InMemoryReceiptStore<G = OsRandomIds> {
    records: Arc<RwLock<HashMap<ReceiptId, u64>>>,
    ids: G,
}

impl InMemoryReceiptStore<OsRandomIds> {
    pub fn new() -> Self {
        Self::with_generator(OsRandomIds)
    }
}

impl Default for InMemoryReceiptStore<OsRandomIds> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G> InMemoryReceiptStore<G>
where
    G: IdGenerator,
{
    pub fn with_generator(ids: G) -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
            ids,
        }
    }

    pub fn len(&self) -> Result<usize, StoreError> {
        Ok(self.records.read().map_err(|_| poisoned())?.len())
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.len()? == 0)
    }
}

fn poisoned() -> StoreError {
    StoreError::Unavailable("receipt store lock poisoned".to_string())
}

impl<G> ReceiptStore for InMemoryReceiptStore<G>
where
    G: IdGenerator,
{
    fn put(&self, points: u64) -> Result<ReceiptId, StoreError> {
        for _ in 0..MAX_ID_ATTEMPTS {
            let id = self.ids.next_id()?;
            let mut guard = self
                .records
                .write()
                .map_err(|_| poisoned())?;
            if guard.contains_key(&id) {
                tracing::warn!(%id, "generated receipt id already in use, retrying");
                continue;
            }
            guard.insert(id.clone(), points);
            return Ok(id);
        }

        Err(StoreError::Unavailable(
            "unable to allocate an unused receipt id".to_string(),
        ))
    }

    fn get(&self, id: &ReceiptId) -> Result<Option<u64>, StoreError> {
        let guard = self.records.read().map_err(|_| poisoned())?;
        Ok(guard.get(id).copied())
    }
}
