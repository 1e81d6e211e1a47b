//! Invariant checks excluded from coverage reports.

#![cfg_attr(coverage_nightly, coverage(off))]

use super::core::Parser;
use super::syntax_kind::SyntaxKind;

impl Parser<'_> {
    /// Each lookahead burns fuel; consuming a token refills it.
    #[inline]
    pub(super) fn ensure_progress(&self) {
        let fuel = self.debug_fuel.get();
        assert!(fuel != 0, "parser made no progress at {:?}", self.current_token());
        self.debug_fuel.set(fuel - 1);
    }

    #[inline]
    pub(super) fn assert_current(&self, expected: SyntaxKind) {
        let found = self.current();
        assert_eq!(
            found, expected,
            "production entered on {found:?}, caller must check for {expected:?} first",
        );
    }

    /// Every `enter_recursion` and `enter_chain` on a successful path has a matching exit.
    #[inline]
    pub(super) fn assert_depth_released(&self) {
        debug_assert_eq!(self.depth, 0, "recursion depth leaked after a complete parse");
        debug_assert_eq!(self.chain, 0, "operator chain count leaked after a complete parse");
    }
}
