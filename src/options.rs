//! Reader configuration

/// Knobs controlling how tolerant the CoNLL-U reader is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReaderOptions {
    /// Drop multiword range rows (`1-2`) in addition to empty nodes (`1.1`)
    pub skip_ranges: bool,
    /// Reject HEAD values that point outside the sentence or at the token itself
    pub check_heads: bool,
}

impl Default for ReaderOptions {
    fn default() -> Self {
        Self {
            skip_ranges: true,
            check_heads: true,
        }
    }
}

impl ReaderOptions {
    pub fn with_skip_ranges(mut self, skip: bool) -> Self {
        self.skip_ranges = skip;
        self
    }

    pub fn with_check_heads(mut self, check: bool) -> Self {
        self.check_heads = check;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = ReaderOptions::default();
        assert!(opts.skip_ranges);
        assert!(opts.check_heads);
    }

    #[test]
    fn test_setters_chain() {
        let opts = ReaderOptions::default()
            .with_skip_ranges(false)
            .with_check_heads(false);
        assert!(!opts.skip_ranges);
        assert!(!opts.check_heads);
    }
}
