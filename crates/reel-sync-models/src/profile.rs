use std::collections::BTreeSet;

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// The user's selected genre names. Order-irrelevant, duplicates collapsed.
/// Persisted on the profile document as a single comma-delimited string
/// field and split back on read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenrePreference(BTreeSet<String>);

impl GenrePreference {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(
            names
                .into_iter()
                .map(Into::into)
                .filter(|n| !n.is_empty())
                .collect(),
        )
    }

    /// Selection toggle: returns a copy with `genre` added if absent,
    /// removed if present.
    pub fn toggled(&self, genre: &str) -> Self {
        let mut names = self.0.clone();
        if !names.remove(genre) {
            names.insert(genre.to_string());
        }
        Self(names)
    }

    pub fn contains(&self, genre: &str) -> bool {
        self.0.contains(genre)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    fn to_delimited(&self) -> String {
        self.0.iter().cloned().collect::<Vec<_>>().join(",")
    }

    fn from_delimited(raw: &str) -> Self {
        Self::from_names(raw.split(',').map(str::to_string))
    }
}

impl Serialize for GenrePreference {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_delimited())
    }
}

impl<'de> Deserialize<'de> for GenrePreference {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_delimited(&raw))
    }
}

/// The `users/{uid}` profile document. Written with merge semantics so a
/// partial save leaves the other fields untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_picture: Option<String>,
    #[serde(default)]
    pub preferences: GenrePreference,
}
