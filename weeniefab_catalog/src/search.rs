use weeniefab_id::strip_hex_prefix;

use crate::DidOption;

/// How free text typed into an identifier search box is matched against options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    /// Blank input, everything matches
    All,
    /// `0x`-prefixed input, matched case-insensitively against the hex form
    Hex(String),
    /// Input that parses as a decimal integer, matched against the decimal form
    Decimal(String),
    /// Anything else, matched case-insensitively against the label
    Label(String),
}

impl SearchQuery {
    pub fn classify(query: &str) -> Self {
        let query = query.trim();
        if query.is_empty() {
            Self::All
        } else if strip_hex_prefix(query).is_some() {
            Self::Hex(query.to_ascii_lowercase())
        } else if query.parse::<i32>().is_ok() {
            Self::Decimal(query.to_string())
        } else {
            Self::Label(query.to_lowercase())
        }
    }

    pub fn matches(&self, option: &DidOption) -> bool {
        match self {
            Self::All => true,
            Self::Hex(needle) => option.hex().to_ascii_lowercase().contains(needle.as_str()),
            Self::Decimal(needle) => option.did.to_string().contains(needle.as_str()),
            Self::Label(needle) => option.label().to_lowercase().contains(needle.as_str()),
        }
    }

    /// The first `take` options that match, in candidate order
    pub fn filter(&self, options: Vec<DidOption>, take: usize) -> Vec<DidOption> {
        options
            .into_iter()
            .filter(|option| self.matches(option))
            .take(take)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use weeniefab_id::Did;

    fn options(ids: &[u32]) -> Vec<DidOption> {
        ids.iter()
            .map(|&id| DidOption::new(Did::new(id), false))
            .collect()
    }

    fn ids(options: &[DidOption]) -> Vec<u32> {
        options.iter().map(|o| o.did.as_u32()).collect()
    }

    #[test]
    fn classification() {
        assert_eq!(SearchQuery::classify("   "), SearchQuery::All);
        assert_eq!(
            SearchQuery::classify(" 0X0000000a "),
            SearchQuery::Hex("0x0000000a".to_string())
        );
        assert_eq!(
            SearchQuery::classify("-12"),
            SearchQuery::Decimal("-12".to_string())
        );
        assert_eq!(
            SearchQuery::classify("(0x06"),
            SearchQuery::Label("(0x06".to_string())
        );
    }

    #[test]
    fn hex_matches_hex_form_only() {
        let candidates = options(&[10, 11, 0x0A00_0000]);
        let query = SearchQuery::classify("0x0000000A");
        assert_eq!(ids(&query.filter(candidates.clone(), 200)), vec![10]);

        // the prefix is part of the match, so "0xA" does not hit 0x0A000000
        let query = SearchQuery::classify("0xa");
        assert!(query.filter(candidates, 200).is_empty());
    }

    #[test]
    fn decimal_matches_substring() {
        let candidates = options(&[1, 10, 11, 100, 210, 0x10]);
        let query = SearchQuery::classify("10");
        assert_eq!(ids(&query.filter(candidates, 200)), vec![10, 100, 210]);
    }

    #[test]
    fn label_matches_case_insensitively() {
        let candidates = options(&[0x0600_0001, 0x0700_0001]);
        let query = SearchQuery::classify("(0X06");
        assert_eq!(ids(&query.filter(candidates, 200)), vec![0x0600_0001]);
    }

    #[test]
    fn take_caps_matches() {
        let candidates = options(&[10, 100, 110, 210]);
        let query = SearchQuery::classify("10");
        assert_eq!(ids(&query.filter(candidates.clone(), 2)), vec![10, 100]);
        assert_eq!(ids(&SearchQuery::All.filter(candidates, 3)), vec![10, 100, 110]);
    }
}
