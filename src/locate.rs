//! Change-location locator
//!
//! One atomic mutation (setting an attribute, appending a scheme) only ever
//! changes the serialized text from one point onward: every line before the
//! mutation site is byte-identical between the old and new serialization.
//! That prefix-identical structure lets a binary search find the first
//! changed line instead of a linear scan, which matters once a config with
//! a couple hundred schemes reaches thousands of lines.

/// Location of the first difference between two line sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChangeLocation {
    /// Index of the first line that differs
    pub first_changed_line: usize,
    /// Absolute difference in total line count
    pub line_delta: usize,
}

/// Find where two normalized line sequences first diverge.
///
/// Returns `None` only when the sequences are entirely equal. If one
/// sequence is a strict prefix of the other, the first changed line is the
/// shorter length (the append case).
///
/// Binary search over the length of the agreeing prefix. A single matching
/// line at the probe is not proof the whole prefix matches (both sides can
/// coincidentally read `    },`), so every forward move is confirmed by
/// comparing the unverified slice, keeping the invariant that `agreed`
/// lines are known identical.
pub fn locate_change(old_lines: &[String], new_lines: &[String]) -> Option<ChangeLocation> {
    let shortest = old_lines.len().min(new_lines.len());
    let line_delta = old_lines.len().abs_diff(new_lines.len());

    let mut agreed = 0usize;
    let mut upper = shortest;
    while agreed < upper {
        let probe = agreed + (upper - agreed + 1) / 2;
        if old_lines[probe - 1] == new_lines[probe - 1]
            && old_lines[agreed..probe] == new_lines[agreed..probe]
        {
            agreed = probe;
        } else {
            upper = probe - 1;
        }
    }

    if agreed == shortest {
        if line_delta == 0 {
            // Entirely equal; a mutation should never produce this.
            None
        } else {
            Some(ChangeLocation {
                first_changed_line: shortest,
                line_delta,
            })
        }
    } else {
        Some(ChangeLocation {
            first_changed_line: agreed,
            line_delta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    /// Reference implementation: linear scan.
    fn locate_linear(old: &[String], new: &[String]) -> Option<ChangeLocation> {
        let shortest = old.len().min(new.len());
        let line_delta = old.len().abs_diff(new.len());
        let first = (0..shortest).find(|&i| old[i] != new[i]);
        match first {
            Some(i) => Some(ChangeLocation {
                first_changed_line: i,
                line_delta,
            }),
            None if line_delta > 0 => Some(ChangeLocation {
                first_changed_line: shortest,
                line_delta,
            }),
            None => None,
        }
    }

    #[test]
    fn equal_sequences_have_no_change() {
        let a = lines(&["{", "    \"schemes\": [", "    ]", "}"]);
        assert_eq!(locate_change(&a, &a.clone()), None);
    }

    #[test]
    fn difference_at_first_line() {
        let old = lines(&["{", "}"]);
        let new = lines(&["[", "]"]);
        assert_eq!(
            locate_change(&old, &new),
            Some(ChangeLocation {
                first_changed_line: 0,
                line_delta: 0
            })
        );
    }

    #[test]
    fn insertion_in_the_middle() {
        let old = lines(&["{", "    \"a\": 1,", "    \"b\": 2", "}"]);
        let new = lines(&["{", "    \"a\": 1,", "    \"a2\": 9,", "    \"b\": 2", "}"]);
        assert_eq!(
            locate_change(&old, &new),
            Some(ChangeLocation {
                first_changed_line: 2,
                line_delta: 1
            })
        );
    }

    #[test]
    fn pure_append_reports_shorter_length() {
        let old = lines(&["a", "b"]);
        let new = lines(&["a", "b", "c", "d"]);
        assert_eq!(
            locate_change(&old, &new),
            Some(ChangeLocation {
                first_changed_line: 2,
                line_delta: 2
            })
        );
    }

    #[test]
    fn repeated_closer_lines_do_not_fool_the_search() {
        // An appended scheme entry makes old and new share lots of
        // identical "    }," lines around the true change point.
        let mut old = vec!["{".to_string(), "    \"schemes\": [".to_string()];
        for i in 0..40 {
            old.push("        {".to_string());
            old.push(format!("            \"name\": \"scheme {}\"", i));
            old.push("        },".to_string());
        }
        old.push("    ]".to_string());
        old.push("}".to_string());

        let mut new = old.clone();
        let insert_at = 2 + 20 * 3;
        let inserted = [
            "        {".to_string(),
            "            \"name\": \"inserted\"".to_string(),
            "        },".to_string(),
        ];
        for (offset, line) in inserted.iter().enumerate() {
            new.insert(insert_at + offset, line.clone());
        }

        let located = locate_change(&old, &new).unwrap();
        assert_eq!(located, locate_linear(&old, &new).unwrap());
        assert_eq!(located.line_delta, 3);
        // The linear reference lands wherever the texts truly diverge,
        // which for identical repeated entries is at the first line whose
        // content differs, never past it.
        assert!(located.first_changed_line <= insert_at + 1);
    }

    #[test]
    fn matches_linear_reference_on_random_sequences() {
        // Deterministic xorshift so failures reproduce.
        let mut state = 0x9e3779b97f4a7c15u64;
        let mut next = move || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };
        // Small alphabet with heavy duplication to provoke coincidental
        // single-line matches near the change point.
        let alphabet = ["    },", "        {", "    ]", "\"x\": 1,", "\"y\": 2,"];

        for _ in 0..500 {
            let len = 1 + (next() % 60) as usize;
            let old: Vec<String> = (0..len)
                .map(|_| alphabet[(next() % alphabet.len() as u64) as usize].to_string())
                .collect();
            let mut new = old.clone();
            let k = (next() % len as u64) as usize;
            match next() % 3 {
                0 => {
                    // replacement
                    new[k] = "REPLACED".to_string();
                }
                1 => {
                    // insertion of one to three fresh lines
                    let count = 1 + (next() % 3) as usize;
                    for offset in 0..count {
                        new.insert(k + offset, format!("INSERTED {}", offset));
                    }
                }
                _ => {
                    // deletion
                    new.remove(k);
                }
            }
            assert_eq!(
                locate_change(&old, &new),
                locate_linear(&old, &new),
                "old={:?} new={:?}",
                old,
                new
            );
        }
    }
}
