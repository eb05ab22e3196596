use std::collections::{BTreeMap, BTreeSet};

use ahash::HashMap;
use bon::bon;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeMap};

use crate::matching::MatchType;

/// Tag keys containing "name" that do not hold a name of the feature.
const BAD_NAME_FIELDS: [&str; 5] = ["tiger:name_base", "name:right", "name:left", "gnis:county_name", "openGeoDB:name"];

/// Locative prepositions put before a city name ("in Berlin", "w Krakowie",
/// "à Paris"), covering English, German, Dutch, Polish, French, Spanish,
/// Portuguese, Czech, the Scandinavian languages and Italian.
const CITY_PREFIXES: [&str; 8] = ["in", "w", "à", "en", "em", "v", "i", "a"];

/// A mapped feature, as its set of tags.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Feature {
  pub tags: BTreeMap<String, String>,
}

impl Feature {
  pub fn tag(&self, key: &str) -> Option<&str> {
    self.tags.get(key).map(String::as_str)
  }

  /// Name-bearing tags of the feature, as `(key, value)` pairs in key order.
  ///
  /// A tag is name-bearing if its key contains "name" and is not a known
  /// non-name field, or if its key is "operator".
  pub fn names(&self) -> Vec<(&str, &str)> {
    self
      .tags
      .iter()
      .filter(|(key, _)| (key.contains("name") && !BAD_NAME_FIELDS.contains(&key.as_str())) || *key == "operator")
      .map(|(key, value)| (key.as_str(), value.as_str()))
      .collect()
  }

  pub fn has_address(&self) -> bool {
    self.tags.contains_key("addr:housenumber") || self.tags.contains_key("addr:full")
  }

  /// Trimmable endings for this feature: `extra`, plus the feature's city
  /// alone and after every locative preposition when `addr:city` is set.
  pub fn city_endings(&self, extra: &[String]) -> Vec<String> {
    let Some(city) = self.tag("addr:city") else {
      return extra.to_vec();
    };

    let city = city.to_lowercase();
    let mut endings = extra.iter().cloned().collect::<BTreeSet<_>>();

    endings.insert(city.clone());
    endings.extend(CITY_PREFIXES.iter().map(|prefix| format!("{prefix} {city}")));

    endings.into_iter().collect()
  }
}

#[bon]
impl Feature {
  #[builder]
  pub fn builder(tags: &[(&str, &str)]) -> Feature {
    tags.iter().copied().collect()
  }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Feature {
  fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
    Feature {
      tags: iter.into_iter().map(|(key, value)| (key.into(), value.into())).collect(),
    }
  }
}

/// Knowledge-base field a candidate name was read from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
  Label,
  Alias,
  Sitelink,
}

/// Provenance of a candidate name: the field it came from, and the language
/// (for labels and aliases) or site (for sitelinks) code.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Source {
  pub kind: SourceKind,
  pub code: String,
}

impl Source {
  pub fn label(lang: &str) -> Source {
    Source { kind: SourceKind::Label, code: lang.to_string() }
  }

  pub fn alias(lang: &str) -> Source {
    Source { kind: SourceKind::Alias, code: lang.to_string() }
  }

  pub fn sitelink(site: &str) -> Source {
    Source { kind: SourceKind::Sitelink, code: site.to_string() }
  }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Candidate {
  pub name: String,
  pub sources: Vec<Source>,
}

/// Candidate names of a knowledge-base entity with their provenance, in
/// first-seen order. Inserting a name twice accumulates its sources.
#[derive(Clone, Debug, Default)]
pub struct CandidateNames {
  candidates: Vec<Candidate>,
  index: HashMap<String, usize>,
}

impl CandidateNames {
  pub fn insert(&mut self, name: impl Into<String>, source: Source) {
    let name = name.into();

    match self.index.get(&name) {
      Some(position) => self.candidates[*position].sources.push(source),

      None => {
        self.index.insert(name.clone(), self.candidates.len());
        self.candidates.push(Candidate { name, sources: vec![source] });
      }
    }
  }

  pub fn get(&self, name: &str) -> Option<&[Source]> {
    self.index.get(name).map(|position| self.candidates[*position].sources.as_slice())
  }

  pub fn contains(&self, name: &str) -> bool {
    self.index.contains_key(name)
  }

  pub fn iter(&self) -> impl Iterator<Item = &Candidate> {
    self.candidates.iter()
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.candidates.iter().map(|candidate| candidate.name.as_str())
  }

  pub fn len(&self) -> usize {
    self.candidates.len()
  }

  pub fn is_empty(&self) -> bool {
    self.candidates.is_empty()
  }
}

impl<N: Into<String>> FromIterator<(N, Source)> for CandidateNames {
  fn from_iter<T: IntoIterator<Item = (N, Source)>>(iter: T) -> Self {
    let mut names = CandidateNames::default();

    for (name, source) in iter {
      names.insert(name, source);
    }

    names
  }
}

impl Serialize for CandidateNames {
  fn serialize<S: Serializer>(&self, ser: S) -> Result<S::Ok, S::Error> {
    let mut map = ser.serialize_map(Some(self.candidates.len()))?;
    for candidate in &self.candidates {
      map.serialize_entry(&candidate.name, &candidate.sources)?;
    }
    map.end()
  }
}

/// One accepted pair, as reported by the aggregator for a tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchHit {
  pub category: MatchType,
  pub candidate: String,
  pub sources: Vec<Source>,
}

/// One matched pair with its full provenance on both sides.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MatchDetail {
  pub category: MatchType,
  pub candidate: String,
  pub sources: Vec<Source>,
  pub observed: String,
  pub tag: String,
}

/// Known external identifiers of a knowledge-base entity, by the tag key
/// holding the same identifier on a feature.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(transparent)]
pub struct IdentifierSpec(pub BTreeMap<String, Vec<IdentifierValues>>);

#[derive(Clone, Debug, Deserialize)]
pub struct IdentifierValues {
  pub values: Vec<String>,
  /// Kind of identifier; `website` values are compared as URLs.
  pub label: String,
}
