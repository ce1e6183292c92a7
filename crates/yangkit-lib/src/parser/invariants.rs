//! Parser self-checks. A failure here is a grammar bug, never bad input.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;
use super::cst::SyntaxKind;

impl Parser<'_> {
    /// Every lookahead burns one unit; `bump` refills.
    #[inline]
    pub(super) fn ensure_progress(&self) {
        let left = self.debug_fuel.get();
        assert!(left != 0, "statement parser stalled without consuming a token");
        self.debug_fuel.set(left - 1);
    }

    /// Statement and block rules are only entered on their first token.
    #[inline]
    pub(super) fn assert_current(&mut self, expected: SyntaxKind) {
        let found = self.current();
        assert_eq!(
            found, expected,
            "grammar rule entered at {found:?}, caller must check for {expected:?}"
        );
    }
}
