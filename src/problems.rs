//! Small lookup problems solved with [`HashTable`] as the only container.
//!
//! The table is keyed by strings, so elements are keyed through `ToString`.

use crate::HashTable;

/// Whether `second` is a rearrangement of the characters of `first`.
pub fn anagrams(first: &str, second: &str) -> bool {
    if first.chars().count() != second.chars().count() {
        return false;
    }

    let mut counts: HashTable<usize> = HashTable::new();
    for letter in first.chars() {
        let key = letter.to_string();
        match counts.read_mut(&key) {
            Some(count) => *count += 1,
            None => counts.insert(key, 1),
        }
    }

    for letter in second.chars() {
        match counts.read_mut(&letter.to_string()) {
            Some(count) if *count > 0 => *count -= 1,
            _ => return false,
        }
    }

    true
}

/// Elements of `second`, in order and with repeats, that also occur in `first`.
pub fn common_elements<T: ToString + Clone>(first: &[T], second: &[T]) -> Vec<T> {
    let seen: HashTable<()> = first.iter().map(|x| (x.to_string(), ())).collect();

    second
        .iter()
        .filter(|x| seen.contains_key(&x.to_string()))
        .cloned()
        .collect()
}

/// The first element equal to one that came before it.
pub fn first_duplicate<T: ToString + Clone>(items: &[T]) -> Option<T> {
    let mut seen = HashTable::new();

    for item in items {
        let key = item.to_string();
        if seen.contains_key(&key) {
            return Some(item.clone());
        }
        seen.insert(key, ());
    }

    None
}

/// Whether two entries of `nums` at different positions add up to `target`.
pub fn two_sum(nums: &[i64], target: i64) -> bool {
    let mut seen = HashTable::new();

    for &n in nums {
        if let Some(complement) = target.checked_sub(n) {
            if seen.contains_key(&complement.to_string()) {
                return true;
            }
        }
        seen.insert(n.to_string(), ());
    }

    false
}

/// Whether `words` follows `pattern`: each letter stands for exactly one word
/// and no two letters stand for the same word.
pub fn word_pattern<S: AsRef<str>>(pattern: &str, words: &[S]) -> bool {
    if pattern.chars().count() != words.len() {
        return false;
    }

    let mut matches: HashTable<&str> = HashTable::new();
    let mut used: HashTable<()> = HashTable::new();

    for (letter, word) in pattern.chars().zip(words) {
        let word = word.as_ref();
        let letter = letter.to_string();

        match matches.read(&letter) {
            Some(matched) => {
                if *matched != word {
                    return false;
                }
            }
            None => {
                if used.contains_key(word) {
                    return false;
                }
                used.insert(word, ());
                matches.insert(letter, word);
            }
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn anagram_pairs() {
        assert!(anagrams("listen", "silent"));
        assert!(anagrams("", ""));
        assert!(anagrams("aab", "aba"));
        assert!(!anagrams("aab", "abb"));
        assert!(!anagrams("rat", "car"));
        assert!(!anagrams("abc", "ab"));
        assert!(anagrams("añb", "bña"));
    }

    #[test]
    fn common() {
        assert_eq!(common_elements(&[1, 2, 3, 4], &[3, 4, 5, 4]), vec![3, 4, 4]);
        assert_eq!(common_elements(&["x", "y"], &["z"]), Vec::<&str>::new());
        assert!(common_elements::<u8>(&[], &[1, 2]).is_empty());
    }

    #[test]
    fn duplicates() {
        assert_eq!(first_duplicate(&[2, 1, 3, 5, 3, 2]), Some(3));
        assert_eq!(first_duplicate(&["a", "b", "a"]), Some("a"));
        assert_eq!(first_duplicate(&[1, 2, 3]), None);
        assert_eq!(first_duplicate::<u8>(&[]), None);
    }

    #[test]
    fn sums() {
        assert!(two_sum(&[2, 7, 11, 15], 9));
        assert!(two_sum(&[-3, 4, 3, 90], 0));
        assert!(!two_sum(&[1, 2, 3], 7));
        // The same element cannot pair with itself.
        assert!(!two_sum(&[5], 10));
        assert!(two_sum(&[5, 5], 10));
        assert!(!two_sum(&[i64::MIN, 1], i64::MAX));
    }

    #[test]
    fn patterns() {
        assert!(word_pattern("abba", &["dog", "cat", "cat", "dog"]));
        assert!(!word_pattern("abba", &["dog", "cat", "cat", "fish"]));
        assert!(!word_pattern("aaaa", &["dog", "cat", "cat", "dog"]));
        assert!(!word_pattern("abba", &["dog", "dog", "dog", "dog"]));
        assert!(!word_pattern("ab", &["dog"]));
        assert!(word_pattern("", &[] as &[&str]));

        let owned = vec!["red".to_string(), "blue".to_string()];
        assert!(word_pattern("xy", &owned));
    }
}
