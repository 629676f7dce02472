// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shell-glob-style pattern matching for project rules
//!
//! Every rule in a project's configuration (source repositories,
//! destinations, group/kind allow and deny lists) is expressed with the same
//! pattern language: `*` matches any run of characters, including none and
//! including separators like `/`; every other character matches itself.
//! Matching is case-sensitive and anchored: the whole value must match the
//! whole pattern.
//!
//! Note that `?` and `[...]` are *not* metacharacters here, which rules out
//! the `glob` crate: repository URLs legitimately contain `?`, and a rule
//! author writing one must get a literal match.

/// Returns whether `value` matches the glob `pattern`
///
/// Implemented by splitting the pattern into the literal segments between
/// `*`s: the first segment anchors the start of the value, the last anchors
/// the end, and each middle segment must appear in between, in order.
/// Leftmost placement of the middle segments is always sufficient, so no
/// backtracking is needed.
pub fn matches(pattern: &str, value: &str) -> bool {
    if !pattern.contains('*') {
        return pattern == value;
    }

    // `split` yields at least two segments since the pattern contains `*`.
    let segments: Vec<&str> = pattern.split('*').collect();
    let (first, rest) = segments.split_first().unwrap();
    let (last, middle) = rest.split_last().unwrap();

    let Some(remainder) = value.strip_prefix(first) else {
        return false;
    };
    let Some(mut remainder) = remainder.strip_suffix(last) else {
        return false;
    };

    for segment in middle {
        if segment.is_empty() {
            continue;
        }
        match remainder.find(segment) {
            Some(start) => {
                remainder = &remainder[start + segment.len()..];
            }
            None => return false,
        }
    }

    true
}
