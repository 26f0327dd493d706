//! Reserve transactions and the per-claim first-date index

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use core_kernel::ReserveTransactionId;

/// A dated financial entry recorded against a claim
///
/// `claim_id` is a plain foreign key to [`crate::Claim::claim_id`]; the
/// transaction does not own or hold the claim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReserveTransaction {
    pub id: ReserveTransactionId,
    pub claim_id: String,
    /// Free-form category tag such as "XYZ"
    pub reserve_type: String,
    pub transaction_date: NaiveDateTime,
}

impl ReserveTransaction {
    pub fn new(
        claim_id: impl Into<String>,
        reserve_type: impl Into<String>,
        transaction_date: NaiveDateTime,
    ) -> Self {
        Self {
            id: ReserveTransactionId::generate(),
            claim_id: claim_id.into(),
            reserve_type: reserve_type.into(),
            transaction_date,
        }
    }
}

/// Category tags that mark a transaction as a reserve or a payment
///
/// Matching is exact and case-sensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionCategories {
    pub reserve: Vec<String>,
    pub payment: Vec<String>,
}

impl TransactionCategories {
    pub fn new<R, P>(reserve: R, payment: P) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            reserve: reserve.into_iter().map(Into::into).collect(),
            payment: payment.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_reserve(&self, reserve_type: &str) -> bool {
        self.reserve.iter().any(|t| t == reserve_type)
    }

    pub fn is_payment(&self, reserve_type: &str) -> bool {
        self.payment.iter().any(|t| t == reserve_type)
    }
}

impl Default for TransactionCategories {
    fn default() -> Self {
        Self::new(["XYZ"], ["ABC", "EFG"])
    }
}

/// Earliest matching transaction dates of a single claim
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FirstDates {
    pub first_reserve: Option<NaiveDateTime>,
    pub first_payment: Option<NaiveDateTime>,
}

/// In-memory index of first reserve and first payment dates keyed by claim id
///
/// Built in one pass over the whole transaction set so that per-claim lookups
/// are local instead of one store round trip per claim.
#[derive(Debug, Clone, Default)]
pub struct ReserveIndex {
    by_claim: HashMap<String, FirstDates>,
}

impl ReserveIndex {
    /// Builds the index, keeping only the minimum date per claim and bucket
    pub fn build<'a, I>(transactions: I, categories: &TransactionCategories) -> Self
    where
        I: IntoIterator<Item = &'a ReserveTransaction>,
    {
        let mut by_claim: HashMap<String, FirstDates> = HashMap::new();

        for tx in transactions {
            let is_reserve = categories.is_reserve(&tx.reserve_type);
            let is_payment = categories.is_payment(&tx.reserve_type);
            if !is_reserve && !is_payment {
                continue;
            }

            let entry = by_claim.entry(tx.claim_id.clone()).or_default();
            if is_reserve {
                keep_earliest(&mut entry.first_reserve, tx.transaction_date);
            }
            if is_payment {
                keep_earliest(&mut entry.first_payment, tx.transaction_date);
            }
        }

        Self { by_claim }
    }

    pub fn first_dates(&self, claim_id: &str) -> FirstDates {
        self.by_claim.get(claim_id).copied().unwrap_or_default()
    }

    /// Number of claims with at least one matching transaction
    pub fn len(&self) -> usize {
        self.by_claim.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_claim.is_empty()
    }
}

fn keep_earliest(slot: &mut Option<NaiveDateTime>, candidate: NaiveDateTime) {
    match slot {
        Some(current) if *current <= candidate => {}
        _ => *slot = Some(candidate),
    }
}
