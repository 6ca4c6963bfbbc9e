use crate::application::models::snapshot::{RelationshipEntry, SnapshotDocument, SnapshotKind};
use crate::application::models::user::AccountId;
use crate::error::SnapshotError;
use std::collections::HashSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Accounts in `following` that are absent from `followers`.
///
/// Duplicates are collapsed and the result keeps the order in which each
/// account first appears in `following`.
pub fn compute_unfollow_candidates(
    following: &[AccountId],
    followers: &[AccountId],
) -> Vec<AccountId> {
    let followers: HashSet<&str> = followers.iter().map(String::as_str).collect();
    let mut seen: HashSet<&str> = HashSet::new();

    let mut candidates = Vec::new();
    for id in following {
        if !followers.contains(id.as_str()) && seen.insert(id.as_str()) {
            candidates.push(id.clone());
        }
    }
    candidates
}

/// Reads the account identifiers of one exported snapshot file.
pub fn load_snapshot(path: &Path, kind: SnapshotKind) -> Result<Vec<AccountId>, SnapshotError> {
    let content = fs::read_to_string(path).map_err(|source| SnapshotError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let document: SnapshotDocument =
        serde_json::from_str(&content).map_err(|source| SnapshotError::Json {
            path: path.to_path_buf(),
            source,
        })?;

    let ids = extract_identifiers(path, document.into_entries())?;
    info!("Loaded {} {} from {}", ids.len(), kind, path.display());
    Ok(ids)
}

pub(crate) fn extract_identifiers(
    path: &Path,
    entries: Vec<RelationshipEntry>,
) -> Result<Vec<AccountId>, SnapshotError> {
    let mut ids = Vec::with_capacity(entries.len());
    for (index, entry) in entries.into_iter().enumerate() {
        let before = ids.len();
        ids.extend(
            entry
                .string_list_data
                .unwrap_or_default()
                .into_iter()
                .filter_map(|data| data.value)
                .filter(|value| !value.is_empty()),
        );
        if ids.len() == before {
            // Newer exports carry the username in the title only.
            let title = entry.title.unwrap_or_default();
            if title.is_empty() {
                return Err(SnapshotError::Malformed {
                    path: path.to_path_buf(),
                    index,
                    reason: "entry has neither a string_list_data value nor a title".to_string(),
                });
            }
            debug!("Entry {} identified by title {}", index, title);
            ids.push(title);
        }
    }
    Ok(ids)
}
