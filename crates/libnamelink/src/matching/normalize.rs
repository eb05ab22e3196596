use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::matching::{latinize::latinize, ordinals::ordinal_words, replacers::tidy::TIDY};

static NON_CHARS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\-@\w]").unwrap());
static NON_CHARS_AND_DASH: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^@\w]").unwrap());
static NON_CHAR_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^@\w]*").unwrap());
static NON_CHARS_KEEP_COMMAS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^@\w, ]").unwrap());
static DIGITS: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+$").unwrap());
static ORDINAL_NUMBER: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)([0-9]+)(?:st|nd|rd|th)\b").unwrap());

/// Removes everything but word characters, `@` and dashes.
pub(crate) fn strip_non_chars(value: &str) -> String {
  NON_CHARS.replace_all(value, "").into_owned()
}

/// Removes everything but word characters and `@`.
pub(crate) fn strip_non_chars_and_dash(value: &str) -> String {
  NON_CHARS_AND_DASH.replace_all(value, "").into_owned()
}

/// Removes everything but word characters, `@`, commas and spaces.
pub(crate) fn keep_commas(value: &str) -> String {
  NON_CHARS_KEEP_COMMAS.replace_all(value, "").into_owned()
}

pub(crate) fn strip_non_char_start(value: &str) -> &str {
  match NON_CHAR_START.find(value) {
    Some(mat) => &value[mat.end()..],
    None => value,
  }
}

pub(crate) fn remove_start<'s>(value: &'s str, prefix: &str) -> &'s str {
  value.strip_prefix(prefix).unwrap_or(value)
}

/// Skips the first `count` characters of `value`.
pub(crate) fn drop_chars_start(value: &str, count: usize) -> &str {
  match value.char_indices().nth(count) {
    Some((index, _)) => &value[index..],
    None => "",
  }
}

/// Drops the last `count` characters of `value`.
pub(crate) fn drop_chars_end(value: &str, count: usize) -> &str {
  if count == 0 {
    return value;
  }

  match value.char_indices().rev().nth(count - 1) {
    Some((index, _)) => &value[..index],
    None => "",
  }
}

/// True for a non-empty run of decimal digits in any script. Fractions and
/// numerals such as "½" or "Ⅻ" are not digits.
pub(crate) fn is_digits(value: &str) -> bool {
  DIGITS.is_match(value)
}

/// Drops function words ("the", "of", ...) found between two identical
/// separators. Separators are kept, so "bank of england" becomes
/// "bank  england".
fn strip_function_words(name: &str) -> String {
  let mut out = String::with_capacity(name.len());
  let mut rest = name;

  while let Some(c) = rest.chars().next() {
    out.push(c);
    rest = &rest[c.len_utf8()..];

    if c != ' ' && c != '-' {
      continue;
    }

    if let Some(word) = TIDY.function_words.iter().find(|word| rest.strip_prefix(word.as_str()).is_some_and(|after| after.starts_with(c))) {
      rest = &rest[word.len()..];
    }
  }

  out
}

/// Canonicalizes a lowercase name so that trivially different spellings of
/// the same name compare equal.
///
/// Common words are abbreviated ("saint" becomes "st", "catholic" becomes
/// "rc"), a leading "the", a possessive or a plural "s" are dropped, function
/// words are removed, American spellings are anglicized and the result is
/// transliterated to ASCII. If transliteration leaves no alphanumeric
/// character at all, the untransliterated text is kept.
pub fn tidy_name(name: &str) -> String {
  let mut name = name.to_string();

  for substitution in &TIDY.substitutions {
    name = name.replace(&substitution.from, &substitution.to);
  }

  if let Some(rest) = name.strip_prefix("the ") {
    name = rest.to_string();
  } else if let Some(rest) = name.strip_suffix("'s") {
    name = rest.to_string();
  }

  if name.chars().count() > 1 && name.ends_with('s') {
    name.pop();
  }

  if !name.trim_start().starts_with("s ") {
    name = name.replace("s ", " ").replace("s' ", "").replace("s-", "-");
  }

  let mut name = strip_function_words(&name);

  for spelling in &TIDY.spellings {
    name = name.replace(&spelling.from, &spelling.to);
  }

  latinize(&name).unwrap_or_else(|| name.trim().to_string())
}

/// Spells out ordinal numbers, lowercases and keeps only word characters,
/// `@` and dashes. Used to compare addresses.
pub fn normalize_name(name: &str) -> String {
  let name = ORDINAL_NUMBER.replace_all(name, |captures: &Captures| match captures[1].parse::<u64>() {
    Ok(number) => ordinal_words(number),
    Err(_) => captures[0].to_string(),
  });

  strip_non_chars(&name.to_lowercase())
}
