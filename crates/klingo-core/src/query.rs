//! Convenience builder for URL query parameters.
//!
//! AQL requests carry their routing hints (`a`, `page`) as query-string
//! parameters rather than in the JSON body; this helper assembles the pairs
//! from optional values without boilerplate.

use std::fmt::Display;

/// Builder for assembling query parameter pairs.
#[derive(Debug, Default, Clone)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    /// Create a new, empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { pairs: Vec::new() }
    }

    /// Append a required key/value pair.
    pub fn push<T>(&mut self, key: &'static str, value: T)
    where
        T: Display,
    {
        self.pairs.push((key, value.to_string()));
    }

    /// Append a key/value pair when the value is present.
    pub fn push_opt<T>(&mut self, key: &'static str, value: Option<T>)
    where
        T: ToString,
    {
        if let Some(value) = value {
            self.pairs.push((key, value.to_string()));
        }
    }

    /// Return the collected key/value pairs.
    #[must_use]
    pub fn into_pairs(self) -> Vec<(&'static str, String)> {
        self.pairs
    }

    /// Returns true if no parameters have been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::QueryParams;

    #[test]
    fn push_opt_skips_none() {
        let mut params = QueryParams::new();
        params.push_opt("a", Option::<String>::None);
        assert!(params.is_empty());
    }

    #[test]
    fn push_collects_in_order() {
        let mut params = QueryParams::new();
        params.push("a", "agendas.index");
        params.push_opt("page", Some(3u32));
        assert_eq!(
            params.into_pairs(),
            vec![("a", "agendas.index".to_string()), ("page", "3".to_string())]
        );
    }
}
