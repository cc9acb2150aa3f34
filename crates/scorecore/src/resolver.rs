//! Score lookup by phone number
//!
//! Reads a fresh snapshot through a [`SheetSource`], skips the header row and
//! linearly scans the rest. Column A holds the phone number, column B the
//! score; further columns are ignored. Rows with fewer than two cells are
//! skipped without aborting the scan.

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use fluent_templates::fluent_bundle::FluentArgs;
use futures_util::FutureExt;
use unic_langid::LanguageIdentifier;

use crate::error::{LookupError, LookupResult};
use crate::i18n;
use crate::phone;
use crate::sheets::{SheetSource, Snapshot};

/// A row that matched the queried number
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreMatch {
    /// The number exactly as it was queried
    pub phone: String,
    /// Raw content of the score cell
    pub score: String,
    /// Index of the matching row in the snapshot (header is row 0)
    pub row: usize,
}

/// Finds the first data row whose phone cell matches `query`.
///
/// Pure part of the lookup; [`ScoreResolver::lookup`] wraps it with the fetch.
pub fn find_score(snapshot: &Snapshot, query: &str) -> LookupResult<ScoreMatch> {
    if snapshot.len() <= 1 {
        return Err(LookupError::EmptyDataset);
    }

    let wanted = phone::normalize(query);

    snapshot
        .iter()
        .enumerate()
        .skip(1)
        .find_map(|(row, cells)| match cells.as_slice() {
            [number, score, ..] if phone::normalize(number) == wanted => Some(ScoreMatch {
                phone: query.to_string(),
                score: score.clone(),
                row,
            }),
            _ => None,
        })
        .ok_or(LookupError::NotFound)
}

/// Looks up loyalty scores in the score sheet
pub struct ScoreResolver {
    source: Arc<dyn SheetSource>,
}

impl ScoreResolver {
    pub fn new(source: Arc<dyn SheetSource>) -> Self {
        Self { source }
    }

    /// Fetches a snapshot and finds the score for `query`.
    ///
    /// A panic while fetching or scanning is caught and reported as
    /// [`LookupError::Unexpected`].
    pub async fn lookup(&self, query: &str) -> LookupResult<ScoreMatch> {
        let attempt = async {
            let snapshot = self.source.fetch_all_rows().await?;
            log::debug!("Fetched score snapshot with {} rows", snapshot.len());
            find_score(&snapshot, query)
        };

        match AssertUnwindSafe(attempt).catch_unwind().await {
            Ok(result) => result,
            Err(panic) => {
                let reason = panic
                    .downcast_ref::<&str>()
                    .map(|s| s.to_string())
                    .or_else(|| panic.downcast_ref::<String>().cloned())
                    .unwrap_or_else(|| "unknown panic".to_string());
                Err(LookupError::Unexpected(reason))
            }
        }
    }

    /// Looks up `query` and renders the outcome as a user-facing message.
    ///
    /// Never fails: every error kind maps to its own message, and backend or
    /// unexpected errors are logged instead of being shown.
    pub async fn resolve(&self, query: &str, lang: &LanguageIdentifier) -> String {
        match self.lookup(query).await {
            Ok(found) => {
                log::info!("Score found for {} (row {})", phone::mask(query), found.row);
                let mut args = FluentArgs::new();
                args.set("phone", found.phone);
                args.set("score", found.score);
                i18n::t_args(lang, "score-found", &args)
            }
            Err(err) => {
                match &err {
                    LookupError::BackendUnavailable(cause) => {
                        log::error!("Failed to connect to score sheet: {}", cause)
                    }
                    LookupError::Unexpected(reason) => {
                        log::error!("Unexpected error while fetching scores: {}", reason)
                    }
                    LookupError::EmptyDataset => log::warn!("Score sheet has no data rows"),
                    other => log::info!("Lookup for {}: {}", phone::mask(query), other),
                }
                i18n::t(lang, err.message_key())
            }
        }
    }
}
