pub fn assert_str_contains(s1: &str, to_contain: &str) {
    assert!(
        s1.contains(to_contain),
        "String does not contain expected value. \nString: `{s1}`\nDoes not contain: `{to_contain}`"
    );
}

pub fn assert_str_not_contains(s1: &str, not_to_contain: &str) {
    assert!(
        !s1.contains(not_to_contain),
        "String unexpectedly contains a value. \nString: `{s1}`\nContains: `{not_to_contain}`"
    );
}

/// Asserts that `s1` has exactly `expected` lines and that none of them is empty
pub fn assert_non_blank_lines(s1: &str, expected: usize) {
    let lines = s1.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), expected, "Unexpected line count in: `{s1}`");
    assert!(
        lines.iter().all(|l| !l.trim().is_empty()),
        "Blank line found in: `{s1}`"
    );
}
