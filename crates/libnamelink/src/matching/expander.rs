use std::collections::BTreeSet;

use tracing::instrument;

use crate::matching::{
  MatchType,
  initials::drop_initials,
  normalize::{drop_chars_end, drop_chars_start},
  rules::name_match_main,
};

/// Leading words of a knowledge-base name describing something standing for
/// the named entity rather than the entity itself.
const DEDICATION_PREFIXES: [&str; 3] = ["Tomb of ", "Statue of ", "Memorial to "];
const SITE_PREFIX: &str = "site of";
const RAILINGS_SUFFIX: &str = " and attached railings";

const PLACE_SUFFIXES: [&str; 2] = ["city", "county"];
const PLACE_CONNECTORS: [&str; 4] = ["of", "de", "di", "at"];

/// Matches a pair of names, retrying with common variants of both names when
/// the names do not match as they are.
///
/// Variants include the observed name without a leading or trailing acronym,
/// the knowledge-base name without a dedication ("Tomb of"), both names
/// without one of `place_names`, and each `;`-separated alternative of the
/// observed name.
#[instrument(level = "trace", skip_all, fields(osm = osm, wd = wd))]
pub fn name_match(osm: &str, wd: &str, endings: &[String], place_names: &[String]) -> Option<MatchType> {
  let place_names = place_name_variants(place_names);

  if let Some(match_type) = name_match_single(osm, wd, endings, &place_names) {
    return Some(match_type);
  }

  if !osm.contains(';') {
    return None;
  }

  osm.split(';').find_map(|alternative| name_match_single(alternative.trim(), wd, endings, &place_names))
}

fn name_match_single(osm: &str, wd: &str, endings: &[String], place_names: &BTreeSet<String>) -> Option<MatchType> {
  if let Some(match_type) = name_match_main(osm, wd, endings) {
    return Some(match_type);
  }

  if let Some(osm_without_initials) = drop_initials(osm)
    && let Some(match_type) = name_match_main(osm_without_initials, wd, endings)
  {
    return Some(match_type);
  }

  for prefix in DEDICATION_PREFIXES {
    if let Some(rest) = wd.strip_prefix(prefix)
      && name_match_main(osm, rest, endings).is_some()
    {
      return Some(MatchType::Trim);
    }
  }

  if osm.to_lowercase().starts_with(SITE_PREFIX) && name_match_main(drop_chars_start(osm, SITE_PREFIX.len()), wd, endings).is_some() {
    return Some(MatchType::Trim);
  }

  if wd.to_lowercase().ends_with(RAILINGS_SUFFIX) && name_match_main(osm, drop_chars_end(wd, RAILINGS_SUFFIX.len()), endings).is_some() {
    return Some(MatchType::Trim);
  }

  place_names
    .iter()
    .filter(|place_name| osm.contains(place_name.as_str()) || wd.contains(place_name.as_str()))
    .find_map(|place_name| name_match_main(&strip_place_name(osm, place_name), &strip_place_name(wd, place_name), endings))
}

/// Adds "Springfield" for every "Springfield City" or "Springfield County".
fn place_name_variants(place_names: &[String]) -> BTreeSet<String> {
  let mut variants = place_names.iter().cloned().collect::<BTreeSet<_>>();

  for place_name in place_names {
    let lowercase = place_name.to_lowercase();

    for suffix in PLACE_SUFFIXES {
      let count = suffix.len() + 1;

      if lowercase.strip_suffix(suffix).is_some_and(|head| head.ends_with(' ')) && place_name.chars().count() > count {
        variants.insert(drop_chars_end(place_name, count).to_string());
      }
    }
  }

  variants
}

/// Removes a place name from a name, with its connecting word ("of London")
/// when it has one.
fn strip_place_name(name: &str, place_name: &str) -> String {
  for connector in PLACE_CONNECTORS {
    let phrase = format!(" {connector} {place_name}");

    if name.contains(&phrase) {
      return name.replace(&phrase, "");
    }
  }

  name.replace(place_name, "")
}
