//! Transcoding of legacy account codes into their debit and credit halves
//!
//! A legacy code keeps two 5-character segments side by side: the debit half
//! (CBI) and the credit half (CBK). Codes up to 20 characters start the pair at
//! offset 0; longer codes carry a 5-character branch prefix before it. The
//! target ledger stores each half as its own code with the half repeated in
//! both segment slots.
//!
//! None of these functions fail. A segment that runs past the end of the code
//! degrades to an empty string, so a malformed code still yields a result.

/// Width of one CBI/CBK segment
pub const SEGMENT_LEN: usize = 5;

/// Codes longer than this carry a branch prefix before the segments
pub const SHORT_CODE_MAX_LEN: usize = 20;

/// Offset of the debit (CBI) segment
pub fn cbi_start(code: &str) -> usize {
    if code.len() <= SHORT_CODE_MAX_LEN {
        0
    } else {
        SEGMENT_LEN
    }
}

/// Offset of the credit (CBK) segment
pub fn cbk_start(code: &str) -> usize {
    cbi_start(code) + SEGMENT_LEN
}

/// Debit half of a code
pub fn debit_half(code: &str) -> &str {
    segment(code, cbi_start(code))
}

/// Credit half of a code
pub fn credit_half(code: &str) -> &str {
    segment(code, cbk_start(code))
}

/// Target-ledger code of the debit side: the debit half written into both segment slots
pub fn to_debit_code(code: &str) -> String {
    rebuild(code, debit_half(code))
}

/// Target-ledger code of the credit side: the credit half written into both segment slots
pub fn to_credit_code(code: &str) -> String {
    rebuild(code, credit_half(code))
}

/// A code is dual-nature when its two halves differ
pub fn is_dual_nature(code: &str) -> bool {
    debit_half(code) != credit_half(code)
}

fn segment(code: &str, start: usize) -> &str {
    code.get(start..start + SEGMENT_LEN).unwrap_or("")
}

fn rebuild(code: &str, half: &str) -> String {
    let start = cbi_start(code);
    let prefix = code.get(..start).unwrap_or("");
    let suffix = code.get(start + 2 * SEGMENT_LEN..).unwrap_or("");

    let mut rebuilt = String::with_capacity(prefix.len() + 2 * half.len() + suffix.len());
    rebuilt.push_str(prefix);
    rebuilt.push_str(half);
    rebuilt.push_str(half);
    rebuilt.push_str(suffix);
    rebuilt
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_halves_for_10_and_20_char_codes() {
        let code10 = "ABCDE12345";
        let code20 = format!("-----{}{}", code10, "XXXXX");
        assert_eq!(code20.len(), 20);

        assert_eq!(debit_half(code10), "ABCDE");
        assert_eq!(credit_half(code10), "12345");
        assert_eq!(debit_half(&code20), "-----");
        assert_eq!(credit_half(&code20), "ABCDE");
    }

    #[test]
    fn test_halves_for_long_codes_skip_branch_prefix() {
        let code = "BRNCH1234567890CBKDBCBKCR";
        assert_eq!(cbi_start(code), 5);
        assert_eq!(cbk_start(code), 10);
        assert_eq!(debit_half(code), "12345");
        assert_eq!(credit_half(code), "67890");
        assert_eq!(to_debit_code(code), "BRNCH1234512345CBKDBCBKCR");
        assert_eq!(to_credit_code(code), "BRNCH6789067890CBKDBCBKCR");
        assert!(is_dual_nature(code));
    }

    #[test]
    fn test_ten_char_code_split() {
        let code = "CCCCDDDDEE";
        assert_eq!(to_debit_code(code), "CCCCDCCCCD");
        assert_eq!(to_credit_code(code), "DDDEEDDDEE");
        assert!(is_dual_nature(code));
    }

    #[test]
    fn test_single_nature_code_is_unchanged() {
        let code = "1234512345";
        assert!(!is_dual_nature(code));
        assert_eq!(to_debit_code(code), code);
        assert_eq!(to_credit_code(code), code);
    }

    #[test]
    fn test_suffix_is_kept() {
        let code = "AAAAABBBBBCBK12345BB";
        assert_eq!(to_debit_code(code), "AAAAAAAAAACBK12345BB");
        assert_eq!(to_credit_code(code), "BBBBBBBBBBCBK12345BB");
    }

    #[test]
    fn test_boundary_lengths_do_not_panic() {
        // Empty and sub-segment codes have no halves at all
        assert_eq!(debit_half(""), "");
        assert_eq!(to_debit_code(""), "");
        assert!(!is_dual_nature(""));

        assert_eq!(debit_half("1234"), "");
        assert_eq!(credit_half("1234"), "");
        assert_eq!(to_debit_code("1234"), "");
        assert!(!is_dual_nature("1234"));

        // Exactly one segment: the credit half is missing
        assert_eq!(debit_half("ABCDE"), "ABCDE");
        assert_eq!(credit_half("ABCDE"), "");
        assert_eq!(to_debit_code("ABCDE"), "ABCDEABCDE");
        assert_eq!(to_credit_code("ABCDE"), "");
        assert!(is_dual_nature("ABCDE"));

        assert_eq!(credit_half("ABCDEF"), "");
        assert_eq!(to_debit_code("ABCDEF"), "ABCDEABCDE");

        // 21 characters switches to the prefixed layout
        let code21 = "PPPPPAAAAABBBBBZZZZZZ";
        assert_eq!(code21.len(), 21);
        assert_eq!(debit_half(code21), "AAAAA");
        assert_eq!(credit_half(code21), "BBBBB");
        assert_eq!(to_credit_code(code21), "PPPPPBBBBBBBBBBZZZZZZ");
    }

    #[test]
    fn test_multibyte_boundary_degrades() {
        // 'é' takes two bytes, so byte offset 5 falls inside it
        let code = "ABCDéFGHIJ";
        assert_eq!(debit_half(code), "");
        assert_eq!(credit_half(code), "");
        assert!(!is_dual_nature(code));
    }
}
