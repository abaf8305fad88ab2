/// Query parameter holding the comma-joined filter tokens.
pub const FILTERS_PARAM: &str = "filters";

/// Ordered, duplicate-free list of free-text filter tokens.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    tokens: Vec<String>,
}

impl FilterSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Splits a raw `filters` parameter value, dropping empty pieces.
    pub fn parse(raw: &str) -> Self {
        let mut set = Self::new();
        for piece in raw.split(',') {
            set.insert(piece);
        }
        set
    }

    /// Trims `raw` and appends it unless it is empty or already present.
    pub fn insert(&mut self, raw: &str) -> bool {
        let trimmed = raw.trim();
        if trimmed.is_empty() || self.contains(trimmed) {
            return false;
        }
        self.tokens.push(trimmed.to_string());
        true
    }

    /// Out-of-range indices are ignored.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.tokens.len() {
            return false;
        }
        self.tokens.remove(index);
        true
    }

    pub fn clear(&mut self) -> bool {
        let had_tokens = !self.tokens.is_empty();
        self.tokens.clear();
        had_tokens
    }

    pub fn contains(&self, token: &str) -> bool {
        self.tokens.iter().any(|t| t == token)
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    pub fn to_vec(&self) -> Vec<String> {
        self.tokens.clone()
    }

    /// Comma-joined form stored in the URL.
    pub fn serialize(&self) -> String {
        self.tokens.join(",")
    }
}

/// A filter token either targets a named field (`role:teacher`) or is free text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterToken<'a> {
    Qualified { key: &'a str, value: &'a str },
    Text(&'a str),
}

impl<'a> FilterToken<'a> {
    pub fn classify(token: &'a str) -> Self {
        match token.split_once(':') {
            Some((key, value)) if !key.trim().is_empty() => FilterToken::Qualified {
                key: key.trim(),
                value: value.trim(),
            },
            _ => FilterToken::Text(token.trim()),
        }
    }

    pub fn is_qualified(&self) -> bool {
        matches!(self, FilterToken::Qualified { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_trims_and_keeps_insertion_order() {
        let mut set = FilterSet::new();

        assert!(set.insert("  eso "));
        assert!(set.insert("bio"));
        assert!(set.insert("role:teacher"));

        assert_eq!(set.tokens(), ["eso", "bio", "role:teacher"]);
    }

    #[test]
    fn insert_rejects_empty_and_duplicates() {
        let mut set = FilterSet::new();
        set.insert("bio");

        assert!(!set.insert("   "));
        assert!(!set.insert("bio "));
        assert!(set.insert("Bio"), "matching is case-sensitive");
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn remove_out_of_range_is_noop() {
        let mut set = FilterSet::parse("a,b");

        assert!(!set.remove(2));
        assert!(!set.remove(usize::MAX));
        assert_eq!(set.tokens(), ["a", "b"]);

        assert!(set.remove(0));
        assert_eq!(set.tokens(), ["b"]);
    }

    #[test]
    fn parse_drops_empty_pieces_and_duplicates() {
        let set = FilterSet::parse(",eso,,bio,eso,");

        assert_eq!(set.tokens(), ["eso", "bio"]);
        assert_eq!(set.serialize(), "eso,bio");
    }

    #[test]
    fn classify_splits_key_value_tokens() {
        assert_eq!(
            FilterToken::classify("role:teacher"),
            FilterToken::Qualified {
                key: "role",
                value: "teacher"
            }
        );
        assert_eq!(FilterToken::classify(":x"), FilterToken::Text(":x"));
        assert!(!FilterToken::classify("biology").is_qualified());
    }
}
