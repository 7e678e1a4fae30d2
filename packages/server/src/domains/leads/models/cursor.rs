use anyhow::{Context, Result};

use crate::common::LeadListId;
use crate::kernel::BaseKeyValueStore;

/// Resumption point of a job, stored under `cursor:{id}`.
///
/// Read only when an attempt starts and written only when an attempt succeeds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeadCursor {
    /// No attempt has ever finished (key absent).
    Unset,
    /// A previous attempt finished and the provider had no further pages (`""`).
    Exhausted,
    /// Opaque provider token to resume from.
    Token(String),
}

impl LeadCursor {
    pub fn key(id: LeadListId) -> String {
        format!("cursor:{}", id)
    }

    /// Cursor after a successful attempt: the provider's token, or exhausted.
    pub fn after_attempt(next: Option<String>) -> Self {
        match next {
            Some(token) if !token.is_empty() => LeadCursor::Token(token),
            _ => LeadCursor::Exhausted,
        }
    }

    /// The value to hand to the provider. Exhausted and unset cursors both
    /// start from scratch instead of looping on an empty token.
    pub fn forwardable(&self) -> Option<&str> {
        match self {
            LeadCursor::Token(token) => Some(token),
            LeadCursor::Unset | LeadCursor::Exhausted => None,
        }
    }

    fn stored_value(&self) -> Option<&str> {
        match self {
            LeadCursor::Unset => None,
            LeadCursor::Exhausted => Some(""),
            LeadCursor::Token(token) => Some(token),
        }
    }

    pub async fn find(id: LeadListId, kv: &dyn BaseKeyValueStore) -> Result<Self> {
        let Some(raw) = kv.get(&Self::key(id)).await? else {
            return Ok(LeadCursor::Unset);
        };

        // Payloads are JSON strings; tolerate a bare token written by hand.
        let token = serde_json::from_str::<String>(&raw).unwrap_or(raw);
        Ok(if token.is_empty() {
            LeadCursor::Exhausted
        } else {
            LeadCursor::Token(token)
        })
    }

    /// Persist this cursor. Saving `Unset` removes the key.
    pub async fn save(&self, id: LeadListId, kv: &dyn BaseKeyValueStore) -> Result<()> {
        match self.stored_value() {
            Some(value) => {
                let payload =
                    serde_json::to_string(value).context("Failed to encode cursor")?;
                kv.set(&Self::key(id), &payload).await
            }
            None => Self::delete(id, kv).await,
        }
    }

    pub async fn delete(id: LeadListId, kv: &dyn BaseKeyValueStore) -> Result<()> {
        kv.delete(&Self::key(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kernel::MemoryKeyValueStore;

    #[test]
    fn only_tokens_are_forwarded() {
        assert_eq!(LeadCursor::Unset.forwardable(), None);
        assert_eq!(LeadCursor::Exhausted.forwardable(), None);
        assert_eq!(LeadCursor::Token("c".into()).forwardable(), Some("c"));
    }

    #[test]
    fn missing_or_empty_next_cursor_means_exhausted() {
        assert_eq!(LeadCursor::after_attempt(None), LeadCursor::Exhausted);
        assert_eq!(LeadCursor::after_attempt(Some(String::new())), LeadCursor::Exhausted);
        assert_eq!(
            LeadCursor::after_attempt(Some("next".into())),
            LeadCursor::Token("next".into())
        );
    }

    #[tokio::test]
    async fn absent_key_is_unset_and_empty_string_is_exhausted() {
        let kv = MemoryKeyValueStore::new();
        let id = LeadListId::new();
        assert_eq!(LeadCursor::find(id, &kv).await.unwrap(), LeadCursor::Unset);

        LeadCursor::Exhausted.save(id, &kv).await.unwrap();
        assert_eq!(kv.get(&LeadCursor::key(id)).await.unwrap().as_deref(), Some("\"\""));
        assert_eq!(LeadCursor::find(id, &kv).await.unwrap(), LeadCursor::Exhausted);
    }

    #[tokio::test]
    async fn token_is_stored_as_json_string() {
        let kv = MemoryKeyValueStore::new();
        let id = LeadListId::new();

        LeadCursor::Token("abc".into()).save(id, &kv).await.unwrap();

        assert_eq!(kv.get(&LeadCursor::key(id)).await.unwrap().as_deref(), Some("\"abc\""));
        assert_eq!(
            LeadCursor::find(id, &kv).await.unwrap(),
            LeadCursor::Token("abc".into())
        );
    }

    #[tokio::test]
    async fn bare_token_is_accepted() {
        let kv = MemoryKeyValueStore::new();
        let id = LeadListId::new();
        kv.set(&LeadCursor::key(id), "raw-token").await.unwrap();

        assert_eq!(
            LeadCursor::find(id, &kv).await.unwrap(),
            LeadCursor::Token("raw-token".into())
        );
    }
}
