use std::collections::BTreeMap;

use serde::Deserialize;
use serde_inline_default::serde_inline_default;

use crate::{
  error::NameLinkError,
  model::{CandidateNames, Source},
};

const ENTITY_URI_PREFIX: &str = "http://www.wikidata.org/entity/";
const CATEGORY_PREFIX: &str = "Category:";

/// Mapping tags too generic to tell anything about an entity.
const SKIP_TAGS: [&str; 16] = [
  "route:road",
  "route=road",
  "highway=primary",
  "highway=road",
  "highway=service",
  "highway=motorway",
  "highway=trunk",
  "highway=unclassified",
  "highway",
  "landuse",
  "name",
  "website",
  "addr:street",
  "type=associatedStreet",
  "type=waterway",
  "waterway=river",
];

/// How candidate names are harvested from an entity.
#[serde_inline_default]
#[derive(Clone, Debug, Deserialize)]
pub struct EntityParams {
  /// Languages contributing no names.
  #[serde_inline_default(default_skip_languages())]
  pub skip_languages: Vec<String>,
  /// Languages with more aliases than this contribute no alias at all.
  #[serde_inline_default(3)]
  pub max_aliases: usize,
}

impl Default for EntityParams {
  fn default() -> Self {
    EntityParams {
      skip_languages: default_skip_languages(),
      max_aliases: 3,
    }
  }
}

fn default_skip_languages() -> Vec<String> {
  vec!["ar".to_string(), "arc".to_string(), "pl".to_string()]
}

#[derive(Clone, Debug, Deserialize)]
pub struct Term {
  pub value: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct Sitelink {
  pub title: String,
}

/// A knowledge-base entity document, limited to its names.
#[derive(Clone, Debug, Deserialize)]
pub struct Entity {
  #[serde(default)]
  pub id: Option<String>,
  pub labels: BTreeMap<String, Term>,
  pub sitelinks: BTreeMap<String, Sitelink>,
  #[serde(default)]
  pub aliases: BTreeMap<String, Vec<Term>>,
}

impl Entity {
  pub fn from_json(document: &str) -> Result<Entity, NameLinkError> {
    Ok(serde_json::from_str(document)?)
  }

  /// Every name of the entity with where it was read from: labels first,
  /// then sitelink titles, then aliases.
  pub fn candidate_names(&self, params: &EntityParams) -> CandidateNames {
    let skipped = |lang: &str| params.skip_languages.iter().any(|skip| skip == lang);
    let mut names = CandidateNames::default();

    for (lang, label) in &self.labels {
      if !skipped(lang.as_str()) {
        names.insert(label.value.as_str(), Source::label(lang));
      }
    }

    for (site, sitelink) in &self.sitelinks {
      if site.strip_suffix("wiki").is_some_and(skipped) {
        continue;
      }

      names.insert(sitelink.title.strip_prefix(CATEGORY_PREFIX).unwrap_or(&sitelink.title), Source::sitelink(site));
    }

    for (lang, aliases) in &self.aliases {
      if skipped(lang.as_str()) || aliases.len() > params.max_aliases {
        continue;
      }

      for alias in aliases {
        names.insert(alias.value.as_str(), Source::alias(lang));
      }
    }

    names
  }
}

/// Extracts the identifier from an entity URI
/// (`http://www.wikidata.org/entity/Q42` gives `Q42`).
pub fn qid_from_uri(uri: &str) -> Result<&str, NameLinkError> {
  match uri.strip_prefix(ENTITY_URI_PREFIX) {
    Some(qid) if qid.starts_with('Q') && qid.len() > 1 => Ok(qid),
    _ => Err(NameLinkError::InvalidEntityUri(uri.to_string())),
  }
}

/// Reads the mapping tag or key documented by a knowledge-base value
/// (`Key:amenity` gives `amenity`, `Tag:amenity=pub` gives `amenity=pub`).
/// Generic tags are ignored.
pub fn osm_tag_from_wiki_value(value: &str) -> Option<&str> {
  let tag = match (value.strip_prefix("Key:"), value.strip_prefix("Tag:")) {
    (Some(key), _) if !key.contains('=') => key,
    (_, Some(tag)) if tag.contains('=') => tag,
    _ => return None,
  };

  if tag.is_empty() || SKIP_TAGS.contains(&tag) {
    return None;
  }

  Some(tag)
}

#[cfg(test)]
mod tests {
  use serde_json_assert::assert_json_eq;

  use super::{Entity, EntityParams};
  use crate::{error::NameLinkError, model::Source};

  const TOWER_BRIDGE: &str = r#"{
    "id": "Q83125",
    "labels": {
      "en": {"language": "en", "value": "Tower Bridge"},
      "fr": {"language": "fr", "value": "Tower Bridge"},
      "pl": {"language": "pl", "value": "Tower Bridge"},
      "ar": {"language": "ar", "value": "جسر البرج"}
    },
    "sitelinks": {
      "enwiki": {"site": "enwiki", "title": "Tower Bridge"},
      "commonswiki": {"site": "commonswiki", "title": "Category:Tower Bridge"},
      "plwiki": {"site": "plwiki", "title": "Tower Bridge"},
      "dewiki": {"site": "dewiki", "title": "Tower Bridge (London)"}
    },
    "aliases": {
      "en": [{"language": "en", "value": "Tower Bridge, London"}],
      "de": [
        {"language": "de", "value": "A"},
        {"language": "de", "value": "B"},
        {"language": "de", "value": "C"},
        {"language": "de", "value": "D"}
      ]
    }
  }"#;

  #[test]
  fn candidate_names() {
    let entity = Entity::from_json(TOWER_BRIDGE).unwrap();
    let names = entity.candidate_names(&EntityParams::default());

    assert_eq!(entity.id.as_deref(), Some("Q83125"));
    assert_eq!(names.names().collect::<Vec<_>>(), vec!["Tower Bridge", "Tower Bridge (London)", "Tower Bridge, London"]);
    assert_eq!(
      names.get("Tower Bridge"),
      Some([Source::label("en"), Source::label("fr"), Source::sitelink("commonswiki"), Source::sitelink("enwiki")].as_slice())
    );
    assert_eq!(names.get("Tower Bridge (London)"), Some([Source::sitelink("dewiki")].as_slice()));
    assert_eq!(names.get("Tower Bridge, London"), Some([Source::alias("en")].as_slice()));
  }

  #[test]
  fn candidate_names_params() {
    let entity = Entity::from_json(TOWER_BRIDGE).unwrap();
    let params: EntityParams = serde_json::from_str(r#"{"skip_languages": ["en"]}"#).unwrap();

    assert_eq!(params.max_aliases, 3);

    let names = entity.candidate_names(&params);

    assert!(names.get("جسر البرج").is_some());
    assert!(!names.contains("Tower Bridge, London"));
    assert_eq!(names.get("Tower Bridge").map(<[_]>::len), Some(4));

    let params = EntityParams { max_aliases: 4, ..EntityParams::default() };

    assert!(entity.candidate_names(&params).contains("D"));
  }

  #[test]
  fn entity_params_defaults() {
    let params: EntityParams = serde_json::from_str("{}").unwrap();

    assert_eq!(params.skip_languages, ["ar", "arc", "pl"]);
    assert_eq!(params.max_aliases, 3);
  }

  #[test]
  fn invalid_entity() {
    assert!(matches!(Entity::from_json(r#"{"labels": {}}"#), Err(NameLinkError::InvalidEntity(_))));
    assert!(matches!(Entity::from_json("not json"), Err(NameLinkError::InvalidEntity(_))));

    let entity = Entity::from_json(r#"{"labels": {}, "sitelinks": {}}"#).unwrap();

    assert!(entity.candidate_names(&EntityParams::default()).is_empty());
  }

  #[test]
  fn serialized_candidate_names() {
    let entity = Entity::from_json(r#"{"labels": {"en": {"value": "Big Ben"}}, "sitelinks": {"enwiki": {"title": "Big Ben"}}}"#).unwrap();

    assert_json_eq!(
      serde_json::to_value(entity.candidate_names(&EntityParams::default())).unwrap(),
      serde_json::json!({"Big Ben": [{"kind": "label", "code": "en"}, {"kind": "sitelink", "code": "enwiki"}]})
    );
  }

  #[test]
  fn qid_from_uri() {
    assert_eq!(super::qid_from_uri("http://www.wikidata.org/entity/Q42").unwrap(), "Q42");
    assert!(matches!(super::qid_from_uri("https://example.org/Q42"), Err(NameLinkError::InvalidEntityUri(_))));
    assert!(super::qid_from_uri("http://www.wikidata.org/entity/").is_err());
  }

  #[test]
  fn osm_tag_from_wiki_value() {
    assert_eq!(super::osm_tag_from_wiki_value("Key:amenity"), Some("amenity"));
    assert_eq!(super::osm_tag_from_wiki_value("Tag:amenity=pub"), Some("amenity=pub"));
    assert_eq!(super::osm_tag_from_wiki_value("Tag:amenity"), None);
    assert_eq!(super::osm_tag_from_wiki_value("Key:amenity=pub"), None);
    assert_eq!(super::osm_tag_from_wiki_value("amenity=pub"), None);
    assert_eq!(super::osm_tag_from_wiki_value("Key:highway"), None);
    assert_eq!(super::osm_tag_from_wiki_value("Tag:highway=primary"), None);
    assert_eq!(super::osm_tag_from_wiki_value("Key:landuse"), None);
    assert_eq!(super::osm_tag_from_wiki_value("Key:name"), None);
  }
}
