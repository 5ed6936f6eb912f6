//! Structural formula normalization
//!
//! Two formulas "compute the same kind of thing" when they differ only in
//! which cells they reference. Replacing every reference with a placeholder
//! makes that comparable by string equality:
//!
//! ```text
//! =SUMIF($A$2:$A$100,B$1,'Sheet'!C5)  ->  =SUMIF(CELL:CELL,CELL,CELL)
//! ```
//!
//! This is lexical, not syntactic: nothing here parses the formula grammar,
//! and a ref-shaped substring inside a string literal gets replaced too.
//! That trade-off is acceptable for structural row comparison.

use lazy_regex::regex;

/// Placeholder substituted for every cell reference
pub const REF_PLACEHOLDER: &str = "CELL";

/// Normalize a formula to its structural pattern.
///
/// Replacement is order-sensitive: sheet-qualified references contain a bare
/// reference as a suffix, so they must be consumed first or the bare pass
/// would leave the qualifier behind.
pub fn formula_pattern(formula: &str) -> String {
    // quoted cross-sheet refs: 'Sheet Name'!A1
    let pass = regex!(r"'[^']+'![A-Z$]{1,3}\$?\d*").replace_all(formula, REF_PLACEHOLDER);
    // unquoted cross-sheet refs: SheetName!A1
    let pass = regex!(r"[A-Za-z_][A-Za-z0-9_]*![A-Z$]{1,3}\$?\d*").replace_all(&pass, REF_PLACEHOLDER);
    // bare refs: $A$1, A1, $A1, A$1, AA1
    let pass = regex!(r"\$?[A-Z]{1,3}\$?\d+").replace_all(&pass, REF_PLACEHOLDER);
    pass.into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn bare_refs_collapse_to_placeholder() {
        assert_eq!(formula_pattern("=A1+B2"), "=CELL+CELL");
        assert_eq!(formula_pattern("=AA10*AB10"), "=CELL*CELL");
    }

    #[test]
    fn dollar_anchors_do_not_matter() {
        assert_eq!(formula_pattern("=$A$1"), "=CELL");
        assert_eq!(formula_pattern("=A$1"), "=CELL");
        assert_eq!(formula_pattern("=$A1"), "=CELL");
    }

    #[test]
    fn quoted_sheet_refs_are_one_placeholder() {
        assert_eq!(formula_pattern("='Q1 Actuals'!B2"), "=CELL");
        assert_eq!(formula_pattern("='P&L'!$C$10+5"), "=CELL+5");
    }

    #[test]
    fn unquoted_sheet_refs_are_one_placeholder() {
        assert_eq!(formula_pattern("=Assumptions!B2*12"), "=CELL*12");
    }

    #[test]
    fn structurally_equal_formulas_share_a_pattern() {
        let a = formula_pattern("=SUMIF($A$2:$A$100,B$1,'Sheet'!C5)");
        let b = formula_pattern("=SUMIF($A$2:$A$100,B$2,'Other'!D9)");
        assert_eq!(a, b);
        assert_eq!(a, "=SUMIF(CELL:CELL,CELL,CELL)");
    }

    #[test]
    fn function_names_survive() {
        assert_eq!(formula_pattern("=SUM(B2:B10)/COUNT(B2:B10)"), "=SUM(CELL:CELL)/COUNT(CELL:CELL)");
        assert_eq!(formula_pattern("=IF(C2>0,C2,0)"), "=IF(CELL>0,CELL,0)");
    }

    #[test]
    fn numbers_and_operators_survive() {
        assert_eq!(formula_pattern("=B2*1.1+100"), "=CELL*1.1+100");
    }

    #[test]
    fn non_formula_text_passes_through() {
        assert_eq!(formula_pattern("Revenue"), "Revenue");
        assert_eq!(formula_pattern(""), "");
    }
}
