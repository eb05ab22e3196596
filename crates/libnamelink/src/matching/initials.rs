use crate::matching::{
  MatchType,
  normalize::{drop_chars_end, strip_non_char_start, strip_non_chars},
};

/// Checks whether `n1` is made of the initials of the words of `n2`.
///
/// Initials shorter than three characters never match. When `endings` are
/// given, `n1` may also match once one of them is trimmed from its end.
pub fn initials_match(n1: &str, n2: &str, endings: &[String]) -> Option<MatchType> {
  let initials = n2
    .split_whitespace()
    .filter_map(|term| term.chars().next())
    .filter(|c| c.is_alphanumeric())
    .collect::<String>()
    .to_uppercase();

  if initials.chars().count() < 3 || n1.chars().count() < 3 {
    return None;
  }

  if initials == n1 || initials == n1.chars().filter(|c| c.is_alphanumeric()).collect::<String>() {
    return Some(MatchType::Initials);
  }

  let n1_lc = n1.to_lowercase();
  let trimmed = endings
    .iter()
    .filter(|end| !end.is_empty() && n1_lc.ends_with(&end.to_lowercase()))
    .any(|end| drop_chars_end(n1, end.chars().count()).trim() == initials);

  trimmed.then_some(MatchType::InitialsTrim)
}

/// Cheap guard before [`initials_match`]: `initials` must look like an
/// acronym (no lowercase letter, at least two uppercase ones).
pub fn check_for_initials_match(initials: &str, name: &str) -> bool {
  if initials.chars().any(char::is_lowercase) {
    return false;
  }

  if initials.chars().filter(|c| c.is_uppercase()).count() < 2 {
    return false;
  }

  initials_match(initials, name, &[]).is_some()
}

/// Removes a leading or trailing acronym from `name` when it stands for the
/// rest of the name ("BBC British Broadcasting Corporation").
pub(crate) fn drop_initials(name: &str) -> Option<&str> {
  let first_space = name.find(' ')?;
  let tail = strip_non_char_start(&name[first_space..]);

  if check_for_initials_match(&name[..first_space], tail) {
    return Some(tail);
  }

  let last_space = name.rfind(' ')?;

  if last_space == first_space {
    return None;
  }

  let head = strip_non_char_start(&name[..last_space]);

  check_for_initials_match(&name[last_space..], head).then_some(head)
}

/// Splits a name before every uppercase letter.
fn split_on_upper(name: &str) -> Vec<&str> {
  let mut parts = Vec::new();
  let mut start = 0;

  for (position, _) in name.char_indices().filter(|(_, c)| c.is_uppercase()) {
    let text = name[start..position].trim_end();

    if !text.is_empty() {
      parts.push(text);
    }

    start = position;
  }

  let text = name[start..].trim_end();

  if !text.is_empty() {
    parts.push(text);
  }

  parts
}

fn split_on_upper_and_tidy(name: &str) -> Vec<String> {
  split_on_upper(name).into_iter().map(strip_non_chars).filter(|part| !part.is_empty()).collect()
}

fn is_initial_of(initial: &str, word: &str) -> bool {
  let mut chars = initial.chars();

  match (chars.next(), chars.next()) {
    (Some(c), None) => word.starts_with(c),
    _ => false,
  }
}

/// Compares two names part by part, where parts start at uppercase letters
/// and a single-letter part stands for any part starting with that letter
/// ("J R R Tolkien" and "John Ronald Reuel Tolkien").
pub fn name_containing_initials(n1: &str, n2: &str) -> bool {
  if !n1.chars().any(char::is_uppercase) || !n2.chars().any(char::is_uppercase) {
    return false;
  }

  let n1_split = split_on_upper_and_tidy(n1);
  let n2_split = split_on_upper_and_tidy(n2);

  if n1_split.len() != n2_split.len() || n1_split.len() < 3 {
    return false;
  }

  n1_split
    .iter()
    .zip(&n2_split)
    .all(|(part1, part2)| part1 == part2 || is_initial_of(part1, part2) || is_initial_of(part2, part1))
}

#[cfg(test)]
mod tests {
  use crate::matching::MatchType;

  #[test]
  fn initials_match() {
    assert_eq!(super::initials_match("BBC", "British Broadcasting Corporation", &[]), Some(MatchType::Initials));
    assert_eq!(super::initials_match("B.B.C.", "British Broadcasting Corporation", &[]), Some(MatchType::Initials));
    assert_eq!(super::initials_match("AB", "Anything Big", &[]), None);
    assert_eq!(super::initials_match("ABC", "Anything Big", &[]), None);
    assert_eq!(super::initials_match("XYZ", "British Broadcasting Corporation", &[]), None);
  }

  #[test]
  fn initials_match_with_endings() {
    let endings = vec!["reserve".to_string()];

    assert_eq!(
      super::initials_match("RSPB Reserve", "Royal Society Protection Birds", &endings),
      Some(MatchType::InitialsTrim)
    );
    assert_eq!(super::initials_match("RSPB Reserve", "Royal Society Protection Birds", &[]), None);
  }

  #[test]
  fn check_for_initials_match() {
    assert!(super::check_for_initials_match("BBC", "British Broadcasting Corporation"));
    assert!(!super::check_for_initials_match("Bbc", "British Broadcasting Corporation"));
    assert!(!super::check_for_initials_match("B", "British Broadcasting Corporation"));
  }

  #[test]
  fn drop_initials() {
    assert_eq!(super::drop_initials("YMCA Young Men's Christian Association"), Some("Young Men's Christian Association"));
    assert_eq!(super::drop_initials("Royal Albert Hall (RAH)"), Some("Royal Albert Hall"));
    assert_eq!(super::drop_initials("Royal Albert Hall RAH"), Some("Royal Albert Hall"));
    assert_eq!(super::drop_initials("Town Hall"), None);
    assert_eq!(super::drop_initials("Hall"), None);
  }

  #[test]
  fn split_on_upper() {
    assert_eq!(super::split_on_upper("YMCA Building"), vec!["Y", "M", "C", "A", "Building"]);
    assert_eq!(super::split_on_upper("St Mary's Church"), vec!["St", "Mary's", "Church"]);
    assert_eq!(super::split_on_upper_and_tidy("St Mary's Church"), vec!["St", "Marys", "Church"]);
  }

  #[test]
  fn name_containing_initials() {
    assert!(super::name_containing_initials("YMCA Building", "Y M C A Building"));
    assert!(super::name_containing_initials("J R R Tolkien House", "John Ronald Reuel Tolkien House"));
    assert!(super::name_containing_initials("J R Hartley", "James Robert Hartley"));
    assert!(!super::name_containing_initials("J R Hartley", "Ken Robert Hartley"));
    assert!(!super::name_containing_initials("Abc Def", "Abc Deg"));
    assert!(!super::name_containing_initials("lower case name", "Lower Case Name"));
  }
}
