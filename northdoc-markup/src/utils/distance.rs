/// Character-level Levenshtein distance between two strings.
///
/// Uses the two-row dynamic programming formulation, so memory is
/// proportional to the shorter input.
#[must_use]
pub fn levenshtein(a: &str, b: &str) -> usize {
  let (short, long) = if a.chars().count() <= b.chars().count() {
    (a, b)
  } else {
    (b, a)
  };

  let short: Vec<char> = short.chars().collect();
  if short.is_empty() {
    return long.chars().count();
  }

  let mut previous: Vec<usize> = (0..=short.len()).collect();
  let mut current = vec![0; short.len() + 1];

  for (i, lc) in long.chars().enumerate() {
    current[0] = i + 1;
    for (j, &sc) in short.iter().enumerate() {
      let substitution = previous[j] + usize::from(lc != sc);
      let insertion = current[j] + 1;
      let deletion = previous[j + 1] + 1;
      current[j + 1] = substitution.min(insertion).min(deletion);
    }
    std::mem::swap(&mut previous, &mut current);
  }

  previous[short.len()]
}

#[cfg(test)]
mod tests {
  use super::levenshtein;

  #[test]
  fn test_identical_strings() {
    assert_eq!(levenshtein("intro", "intro"), 0);
    assert_eq!(levenshtein("", ""), 0);
  }

  #[test]
  fn test_single_edits() {
    assert_eq!(levenshtein("intro", "introo"), 1);
    assert_eq!(levenshtein("intro", "intr"), 1);
    assert_eq!(levenshtein("intro", "indro"), 1);
  }

  #[test]
  fn test_classic_pairs() {
    assert_eq!(levenshtein("kitten", "sitting"), 3);
    assert_eq!(levenshtein("flaw", "lawn"), 2);
    assert_eq!(levenshtein("", "abc"), 3);
    assert_eq!(levenshtein("abc", ""), 3);
  }

  #[test]
  fn test_symmetric() {
    assert_eq!(
      levenshtein("getting-started", "geting-startd"),
      levenshtein("geting-startd", "getting-started")
    );
  }

  #[test]
  fn test_counts_characters_not_bytes() {
    assert_eq!(levenshtein("café", "cafe"), 1);
  }
}
