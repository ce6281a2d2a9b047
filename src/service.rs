use tracing::{debug, error, warn};

use crate::models::{AnswerKey, Tally};
use crate::store::{MemoryStore, RedisStore, StoreError, VOTE_KEY};

/// Which backend served an operation. `Fallback` means the result lives only
/// in this process and is lost on restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Persistence {
    Stored,
    Fallback,
}

/// Records votes against the configured store, degrading to the in-memory
/// fallback when no store is configured or an operation fails. Store errors
/// are absorbed here; only the fallback's own failure propagates.
pub struct VoteService {
    store: Option<RedisStore>,
    fallback: MemoryStore,
}

impl VoteService {
    pub fn new(store: Option<RedisStore>) -> Self {
        Self {
            store,
            fallback: MemoryStore::default(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(None)
    }

    pub fn store(&self) -> Option<&RedisStore> {
        self.store.as_ref()
    }

    /// Current tally. Never errors: a failed store read degrades to the
    /// fallback, and a missing value yields the zeroed tally.
    pub async fn tally(&self) -> (Tally, Persistence) {
        if let Some(store) = &self.store {
            match store.get(VOTE_KEY).await {
                Ok(current) => return (current.unwrap_or_default(), Persistence::Stored),
                Err(e) => warn!("Store read failed, serving fallback tally: {}", e),
            }
        }
        let snapshot = self.fallback.get(VOTE_KEY).unwrap_or_else(|e| {
            error!("Fallback read failed: {}", e);
            None
        });
        (snapshot.unwrap_or_default(), Persistence::Fallback)
    }

    /// Records one vote for `answer` and returns the updated tally. At most
    /// one attempt is made against the store; on failure the vote is kept in
    /// the fallback so the response stays consistent within this process.
    pub async fn submit(&self, answer: AnswerKey) -> Result<(Tally, Persistence), StoreError> {
        let (mut tally, source) = self.tally().await;
        tally.increment(answer);

        if source == Persistence::Stored {
            if let Some(store) = &self.store {
                match store.set(VOTE_KEY, &tally).await {
                    Ok(()) => {
                        debug!("Recorded vote for {}", answer.as_str());
                        return Ok((tally, Persistence::Stored));
                    }
                    Err(e) => warn!("Store write failed, keeping vote in fallback: {}", e),
                }
            }
        }

        self.fallback.set(VOTE_KEY, tally)?;
        debug!("Recorded vote for {} in fallback", answer.as_str());
        Ok((tally, Persistence::Fallback))
    }
}
