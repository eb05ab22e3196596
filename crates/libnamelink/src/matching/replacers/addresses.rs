use std::{collections::HashMap, sync::LazyLock};

use aho_corasick::{AhoCorasick, AhoCorasickBuilder, MatchKind};
use itertools::Itertools;
use regex::Regex;
use serde::Deserialize;

use crate::matching::replacers::Dictionaries;

pub(crate) struct StreetTypes {
  /// Full street-type words, as whole-word patterns.
  pub(crate) forms: AhoCorasick,
  /// Abbreviation of each pattern of `forms`, by pattern index.
  pub(crate) abbreviations: Vec<String>,
  /// Splits a normalized address into its head and a trailing street-type word.
  pub(crate) common_end: Regex,
}

pub(crate) static STREET_TYPES: LazyLock<StreetTypes> = LazyLock::new(|| {
  let file = Dictionaries::get("addresses.yml").expect("could not read address dictionary");
  let dictionary = serde_yaml::from_slice::<AddressDictionary>(&file.data).expect("could not unmarshal address dictionary");

  let (patterns, abbreviations): (Vec<_>, Vec<_>) = dictionary
    .abbreviations
    .into_iter()
    .map(|(form, abbreviation)| (form.to_lowercase(), abbreviation.to_lowercase()))
    .sorted()
    .unzip();

  let ends = patterns.iter().chain(dictionary.common_ends.iter()).map(|word| regex::escape(word)).join("|");

  StreetTypes {
    forms: AhoCorasickBuilder::new()
      .match_kind(MatchKind::LeftmostLongest)
      .ascii_case_insensitive(true)
      .build(&patterns)
      .expect("could not build street type matcher"),
    abbreviations,
    common_end: Regex::new(&format!("(?i)^(.+)({ends})$")).expect("could not build street type pattern"),
  }
});

#[derive(Deserialize)]
struct AddressDictionary {
  abbreviations: HashMap<String, String>,
  #[serde(default)]
  common_ends: Vec<String>,
}

#[cfg(test)]
mod tests {
  use super::STREET_TYPES;

  #[test]
  fn street_types() {
    let index = STREET_TYPES.abbreviations.iter().position(|abbreviation| abbreviation == "blvd").unwrap();

    assert!(STREET_TYPES.forms.find("sunset boulevard").is_some_and(|mat| mat.pattern().as_usize() == index));

    let captures = STREET_TYPES.common_end.captures("10downingstreet").unwrap();

    assert_eq!(&captures[1], "10downing");
    assert!(STREET_TYPES.common_end.is_match("1unionplaza"));
    assert!(!STREET_TYPES.common_end.is_match("street"));
  }
}
