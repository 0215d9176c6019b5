//! Share tokens.
//!
//! A token is an unguessable handle pointing back at the owning tenant
//! and expense id recorded when it was minted. Entries are immutable and
//! never expire on their own; a token whose expense has been deleted
//! stays registered and surfaces the ledger's not-found on use.
use std::collections::HashMap;
use std::sync::{Mutex, PoisonError};

use uuid::Uuid;

use crate::{EngineError, ResultEngine};

/// Owner and expense a token resolves to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShareRef {
    pub owner: String,
    pub expense_id: u64,
}

/// Mints and resolves share tokens.
#[derive(Debug, Default)]
pub struct ShareRegistry {
    shares: Mutex<HashMap<String, ShareRef>>,
}

impl ShareRegistry {
    /// Mint a fresh token for `(owner, expense_id)`.
    ///
    /// Sharing the same expense twice mints two independent tokens; none
    /// of them is ever invalidated by a later share.
    pub fn issue(&self, owner: &str, expense_id: u64) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.shares
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(
                token.clone(),
                ShareRef {
                    owner: owner.to_string(),
                    expense_id,
                },
            );

        token
    }

    /// Look up a token. Does not check that the expense still exists.
    pub fn resolve(&self, token: &str) -> ResultEngine<ShareRef> {
        self.shares
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(token)
            .cloned()
            .ok_or_else(|| EngineError::KeyNotFound(format!("share token {token}")))
    }
}
