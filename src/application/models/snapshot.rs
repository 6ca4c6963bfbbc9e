use serde::Deserialize;

/// Which side of the relationship a snapshot describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SnapshotKind {
    Followers,
    Following,
}

impl std::fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SnapshotKind::Followers => write!(f, "followers"),
            SnapshotKind::Following => write!(f, "following"),
        }
    }
}

/// Top level of an exported relationship file.
///
/// Followers are exported as a bare array, following wrapped in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum SnapshotDocument {
    Bare(Vec<RelationshipEntry>),
    Following {
        relationships_following: Vec<RelationshipEntry>,
    },
    Followers {
        relationships_followers: Vec<RelationshipEntry>,
    },
}

impl SnapshotDocument {
    pub(crate) fn into_entries(self) -> Vec<RelationshipEntry> {
        match self {
            SnapshotDocument::Bare(entries)
            | SnapshotDocument::Following {
                relationships_following: entries,
            }
            | SnapshotDocument::Followers {
                relationships_followers: entries,
            } => entries,
        }
    }
}

/// One exported relationship. Either field may be absent or `null`.
#[derive(Debug, Deserialize)]
pub(crate) struct RelationshipEntry {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub string_list_data: Option<Vec<StringListData>>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct StringListData {
    #[serde(default)]
    #[allow(dead_code)]
    pub href: Option<String>,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    #[allow(dead_code)]
    pub timestamp: Option<i64>,
}
