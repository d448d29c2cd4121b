//! Ordered key→label mapping with precomputed normalized keys.

/// Normalize a lookup key: trim surrounding whitespace and case-fold.
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingEntry {
    /// Key as it appeared in the source.
    pub key: String,
    pub normalized_key: String,
    /// Length of the normalized key in characters, used for longest-match ranking.
    pub key_chars: usize,
    pub label: String,
}

/// Insertion-ordered mapping. Order only matters for breaking ties between
/// equally long partial matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceMapping {
    entries: Vec<MappingEntry>,
}

impl ReferenceMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `(key, label)` pairs, skipping pairs with an empty key or label.
    pub fn from_pairs<K, V, I>(pairs: I) -> Self
    where
        K: AsRef<str>,
        V: AsRef<str>,
        I: IntoIterator<Item = (K, V)>,
    {
        let mut mapping = Self::new();
        for (key, label) in pairs {
            mapping.insert(key.as_ref(), label.as_ref());
        }
        mapping
    }

    /// Insert or replace a label. A repeated key keeps its first position.
    /// Returns false when the key or label is blank.
    pub fn insert(&mut self, key: &str, label: &str) -> bool {
        let key = key.trim();
        let label = label.trim();
        if key.is_empty() || label.is_empty() {
            return false;
        }
        let normalized_key = normalize_key(key);
        if let Some(existing) = self
            .entries
            .iter_mut()
            .find(|entry| entry.normalized_key == normalized_key)
        {
            existing.label = label.to_string();
            return true;
        }
        self.entries.push(MappingEntry {
            key: key.to_string(),
            key_chars: normalized_key.chars().count(),
            normalized_key,
            label: label.to_string(),
        });
        true
    }

    /// Exact lookup by case-insensitive, trimmed key.
    pub fn get(&self, key: &str) -> Option<&str> {
        let normalized = normalize_key(key);
        self.entries
            .iter()
            .find(|entry| entry.normalized_key == normalized)
            .map(|entry| entry.label.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &MappingEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Distinct labels in first-seen order.
    pub fn labels(&self) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for entry in &self.entries {
            if !seen.contains(&entry.label.as_str()) {
                seen.push(entry.label.as_str());
            }
        }
        seen
    }
}

/// Parse `Key:Value` lines. Splits on the first `:`; blank lines and lines
/// with an empty key or value are ignored.
pub fn parse_mapping(text: &str) -> ReferenceMapping {
    let mut mapping = ReferenceMapping::new();
    for line in text.lines() {
        let line = line.trim_start_matches('\u{feff}');
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        mapping.insert(key, value);
    }
    mapping
}
