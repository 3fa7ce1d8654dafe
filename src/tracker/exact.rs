// Copyright 2026 Thomas Johannesson
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Exact matching of unchanged lines

use std::collections::{BTreeMap, HashMap, VecDeque};

use crate::Revision;

/// Pair old and new lines whose normalized text is identical.
///
/// Old lines are visited in ascending index order and each takes the
/// lowest-indexed new line with the same text that no earlier old line has
/// taken ("first available wins"). Duplicate lines therefore keep their
/// relative order.
///
/// New indices are bucketed by text up front; popping the front of a bucket
/// is the same as scanning the new revision for the first unused equal line,
/// so the result is identical to the quadratic scan.
pub(crate) fn match_unchanged(old: &Revision, new: &Revision) -> BTreeMap<usize, usize> {
    let mut buckets: HashMap<&str, VecDeque<usize>> = HashMap::new();
    for line in new.lines() {
        buckets
            .entry(line.normalized.as_str())
            .or_default()
            .push_back(line.index);
    }

    let mut unchanged = BTreeMap::new();
    for line in old.lines() {
        if let Some(new_index) = buckets
            .get_mut(line.normalized.as_str())
            .and_then(VecDeque::pop_front)
        {
            unchanged.insert(line.index, new_index);
        }
    }

    unchanged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(map: &BTreeMap<usize, usize>) -> Vec<(usize, usize)> {
        map.iter().map(|(o, n)| (*o, *n)).collect()
    }

    /// Straightforward first-available scan used as the reference result.
    fn quadratic_scan(old: &Revision, new: &Revision) -> BTreeMap<usize, usize> {
        let mut used = vec![false; new.len() + 1];
        let mut result = BTreeMap::new();
        for o in old.lines() {
            for n in new.lines() {
                if !used[n.index] && o.normalized == n.normalized {
                    used[n.index] = true;
                    result.insert(o.index, n.index);
                    break;
                }
            }
        }
        result
    }

    #[test]
    fn identical_revisions_map_line_for_line() {
        let old = Revision::from_lines("old", ["a", "b", "c"]);
        let new = Revision::from_lines("new", ["a", "b", "c"]);

        assert_eq!(
            pairs(&match_unchanged(&old, &new)),
            vec![(1, 1), (2, 2), (3, 3)]
        );
    }

    #[test]
    fn whitespace_and_case_differences_still_match() {
        let old = Revision::from_lines("old", ["  Return   X;"]);
        let new = Revision::from_lines("new", ["return x;"]);

        assert_eq!(pairs(&match_unchanged(&old, &new)), vec![(1, 1)]);
    }

    #[test]
    fn moved_line_is_found_anywhere() {
        let mut new_lines: Vec<String> = (0..40).map(|i| format!("filler {}", i)).collect();
        new_lines.push("the moved line".to_string());
        let old = Revision::from_lines("old", ["the moved line"]);
        let new = Revision::from_lines("new", new_lines);

        assert_eq!(pairs(&match_unchanged(&old, &new)), vec![(1, 41)]);
    }

    #[test]
    fn duplicates_bind_in_relative_order() {
        // Two "}" in old, three in new: old 2 -> new 1, old 4 -> new 3
        let old = Revision::from_lines("old", ["x", "}", "y", "}"]);
        let new = Revision::from_lines("new", ["}", "z", "}", "}"]);

        assert_eq!(pairs(&match_unchanged(&old, &new)), vec![(2, 1), (4, 3)]);
    }

    #[test]
    fn surplus_old_duplicates_stay_unmatched() {
        let old = Revision::from_lines("old", ["", "", ""]);
        let new = Revision::from_lines("new", ["code", ""]);

        assert_eq!(pairs(&match_unchanged(&old, &new)), vec![(1, 2)]);
    }

    #[test]
    fn empty_revisions_produce_no_pairs() {
        let empty = Revision::from_lines("empty", Vec::<String>::new());
        let some = Revision::from_lines("some", ["a"]);

        assert!(match_unchanged(&empty, &some).is_empty());
        assert!(match_unchanged(&some, &empty).is_empty());
    }

    #[test]
    fn bucketed_matches_quadratic_scan() {
        let old = Revision::from_lines(
            "old",
            ["{", "int a;", "}", "{", "b++;", "}", "", "int a;", ""],
        );
        let new = Revision::from_lines(
            "new",
            ["", "{", "}", "int a;", "{", "c--;", "}", "}", "int a;"],
        );

        assert_eq!(match_unchanged(&old, &new), quadratic_scan(&old, &new));
    }
}
