//! Recipient list normalization for batch sends.
//!
//! Raw recipient input arrives as free text (comma or newline separated).
//! Normalization preserves submission order and keeps duplicates; anything
//! malformed beyond that is the gateway's call to reject.

/// Ordered list of normalized recipients for one batch.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RecipientList {
    entries: Vec<String>,
}

impl RecipientList {
    /// Parses raw free-text input into a recipient list.
    ///
    /// Splits on runs of commas and newlines, trims surrounding whitespace
    /// from each candidate, and discards empty entries.
    pub fn parse(raw: &str) -> Self {
        let entries = raw
            .split(|ch| ch == ',' || ch == '\n')
            .map(str::trim)
            .filter(|candidate| !candidate.is_empty())
            .map(str::to_owned)
            .collect();

        Self { entries }
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn as_slice(&self) -> &[String] {
        &self.entries
    }

    pub fn into_vec(self) -> Vec<String> {
        self.entries
    }
}
