use std::fmt;

use bon::Builder;
use serde::{Deserialize, Serialize};

pub(crate) mod address;
pub(crate) mod comparers;
pub(crate) mod expander;
pub(crate) mod identifier;
pub(crate) mod initials;
pub(crate) mod latinize;
pub(crate) mod normalize;
pub(crate) mod ordinals;
pub(crate) mod replacers;
pub(crate) mod rules;


/// Confidence tier assigned to a matched pair of names.
///
/// Variants are listed roughly from strongest to weakest, but no ordering is
/// implied: the tier only records which rule produced the match.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchType {
  Good,
  /// Only the knowledge-base name needed a word removed.
  WikidataTrimmed,
  /// Both names needed a word removed.
  BothTrimmed,
  Trim,
  /// Reserved for address-derived matches, which are not produced by the
  /// name pipeline.
  Address,
  Initials,
  InitialsTrim,
  /// Only produced by the corroborated prefix fallback of the aggregator.
  Prefix,
}

impl MatchType {
  pub fn as_str(&self) -> &'static str {
    match self {
      MatchType::Good => "good",
      MatchType::WikidataTrimmed => "wikidata_trimmed",
      MatchType::BothTrimmed => "both_trimmed",
      MatchType::Trim => "trim",
      MatchType::Address => "address",
      MatchType::Initials => "initials",
      MatchType::InitialsTrim => "initials_trim",
      MatchType::Prefix => "prefix",
    }
  }
}

impl fmt::Display for MatchType {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Caller-supplied vocabulary for one aggregation call.
#[derive(Builder, Clone, Debug, Default, Deserialize)]
pub struct MatchParams {
  /// Extra trimmable words, merged with the endings derived from the
  /// feature's city.
  #[serde(default)]
  #[builder(default)]
  pub endings: Vec<String>,
  /// Place names that may be stripped from both names before retrying.
  #[serde(default)]
  #[builder(default)]
  pub place_names: Vec<String>,
}
