//! Near-match test for single-edit variants
//!
//! A bounded two-pointer scan instead of a full edit-distance table: the
//! cost is linear in the shorter string and the scan stops at the second
//! mismatch.

/// Whether `a` can be turned into `b` with at most one substitution,
/// insertion or deletion
pub fn within_one_edit(a: &str, b: &str) -> bool {
    if a.is_ascii() && b.is_ascii() {
        return one_edit(a.as_bytes(), b.as_bytes());
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    one_edit(&a, &b)
}

fn one_edit<T: PartialEq>(a: &[T], b: &[T]) -> bool {
    if a.len().abs_diff(b.len()) > 1 {
        return false;
    }

    let (mut i, mut j) = (0, 0);
    let mut edits = 0;

    while i < a.len() && j < b.len() {
        if a[i] == b[j] {
            i += 1;
            j += 1;
            continue;
        }

        edits += 1;
        if edits > 1 {
            return false;
        }

        // Skip the extra element on the longer side; on equal lengths treat
        // the mismatch as a substitution.
        if a.len() > b.len() {
            i += 1;
        } else if b.len() > a.len() {
            j += 1;
        } else {
            i += 1;
            j += 1;
        }
    }

    edits + (a.len() - i) + (b.len() - j) <= 1
}
