use std::fmt;

use url::form_urlencoded;

/// Ordered `key=value` pairs of a location's query string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs = form_urlencoded::parse(raw.as_bytes())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .filter(|(key, _)| !key.is_empty())
            .collect();
        Self { pairs }
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, value)| value.as_str())
    }

    /// Replaces the first occurrence in place so parameter order stays stable.
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        let value = value.into();
        match self.pairs.iter().position(|(k, _)| k == key) {
            Some(idx) => {
                self.pairs[idx].1 = value;
                let mut seen = 0;
                self.pairs.retain(|(k, _)| {
                    if k != key {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.pairs.push((key.to_string(), value)),
        }
    }

    pub fn remove(&mut self, key: &str) -> bool {
        let before = self.pairs.len();
        self.pairs.retain(|(k, _)| k != key);
        before != self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish();
        // Commas are legal in a query (RFC 3986) and keep `filters=a,b` readable.
        write!(f, "{}", restore_commas(&encoded))
    }
}

impl From<&str> for QueryString {
    fn from(raw: &str) -> Self {
        QueryString::parse(raw)
    }
}

fn restore_commas(encoded: &str) -> String {
    encoded.replace("%2C", ",").replace("%2c", ",")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_leading_question_mark_and_decodes() {
        let query = QueryString::parse("?filters=role%3Ateacher,bio&page=2&q=a+b");

        assert_eq!(query.get("filters"), Some("role:teacher,bio"));
        assert_eq!(query.get("page"), Some("2"));
        assert_eq!(query.get("q"), Some("a b"));
        assert_eq!(query.get("limit"), None);
    }

    #[test]
    fn set_replaces_in_place_and_appends_new_keys() {
        let mut query = QueryString::parse("page=1&filters=x&page=4");

        query.set("page", "3");
        query.set("limit", "20");

        assert_eq!(query.to_string(), "page=3&filters=x&limit=20");
    }

    #[test]
    fn display_keeps_commas_literal() {
        let mut query = QueryString::default();
        query.set("filters", "eso,bio,role:teacher");

        assert_eq!(query.to_string(), "filters=eso,bio,role%3Ateacher");
    }

    #[test]
    fn remove_drops_every_occurrence() {
        let mut query = QueryString::parse("filters=a&page=2&filters=b");

        assert!(query.remove("filters"));
        assert!(!query.remove("filters"));
        assert_eq!(query.to_string(), "page=2");
    }

    #[test]
    fn empty_query_renders_empty_string() {
        assert!(QueryString::parse("?").is_empty());
        assert_eq!(QueryString::parse("").to_string(), "");
    }
}
