use std::iter;

use ahash::HashSet;

use crate::matching::{
  MatchType,
  normalize::{drop_chars_start, strip_non_chars, strip_non_chars_and_dash},
};

/// Compares two names ignoring everything but word characters (and dashes
/// when `dash_okay` is set). Empty names never match.
pub fn strip_non_chars_match(osm: &str, wd: &str, dash_okay: bool) -> bool {
  let strip = if dash_okay { strip_non_chars } else { strip_non_chars_and_dash };

  let wd_stripped = strip(wd);
  let osm_stripped = strip(osm);

  !wd_stripped.is_empty() && !osm_stripped.is_empty() && wd_stripped == osm_stripped
}

fn versions(name: &str, words: &[String]) -> HashSet<String> {
  words
    .iter()
    .filter(|word| !word.is_empty())
    .map(|word| name.replace(word.as_str(), ""))
    .chain(iter::once(name.to_string()))
    .collect()
}

/// Compares two names after removing any one of `words` from either of them.
///
/// The resulting tier records which side needed trimming: [`MatchType::Good`]
/// when the knowledge-base name was left untouched,
/// [`MatchType::WikidataTrimmed`] when only the knowledge-base name was
/// trimmed and [`MatchType::BothTrimmed`] otherwise.
pub fn match_with_words_removed<'w, I>(osm: &str, wd: &str, words: I) -> Option<MatchType>
where
  I: IntoIterator<Item = &'w str>,
{
  let words = words.into_iter().collect::<Vec<_>>();

  if words.is_empty() {
    return None;
  }

  let wd_char_only = strip_non_chars(wd);
  let osm_char_only = strip_non_chars(osm);
  let words = words.into_iter().map(strip_non_chars).collect::<Vec<_>>();

  let osm_versions = versions(&osm_char_only, &words);
  let wd_versions = versions(&wd_char_only, &words);

  let matching = osm_versions.iter().filter(|osm| !osm.is_empty() && wd_versions.contains(*osm)).collect::<Vec<_>>();

  if matching.is_empty() {
    return None;
  }

  if matching.iter().any(|osm| **osm == wd_char_only) {
    return Some(MatchType::Good);
  }

  if matching.iter().any(|osm| **osm == osm_char_only) {
    return Some(MatchType::WikidataTrimmed);
  }

  Some(MatchType::BothTrimmed)
}

/// Returns what is left of `osm` once `wd` is removed from its start, either
/// literally or by comparing stripped space-delimited prefixes.
pub fn prefix_name_match<'o>(osm: &'o str, wd: &str) -> Option<&'o str> {
  let wd_lc = wd.to_lowercase();

  if osm.to_lowercase().starts_with(&wd_lc) {
    return Some(drop_chars_start(osm, wd.chars().count()).trim());
  }

  osm
    .match_indices(' ')
    .find(|(space, _)| strip_non_chars_match(&osm[..*space].to_lowercase(), &wd_lc, true))
    .map(|(space, _)| osm[space..].trim())
}

/// Detects a bare plural word ("spires") whose singular only appears inside a
/// longer name ("spire lane"). Such pairs must not be matched by trimming.
pub fn plural_word_name_in_other_name(n1: &str, n2: &str) -> bool {
  let Some(singular) = n1.strip_suffix('s') else {
    return false;
  };

  !n1.contains(' ') && n2.contains(' ') && !n2.contains(n1) && n2.contains(singular)
}
