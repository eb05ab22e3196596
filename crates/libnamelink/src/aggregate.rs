use std::collections::BTreeMap;

use ahash::HashMap;
use metrics::counter;
use tracing::instrument;

use crate::{
  matching::{MatchParams, MatchType, comparers::prefix_name_match, expander::name_match, initials::initials_match, normalize::drop_chars_start},
  model::{Candidate, CandidateNames, Feature, MatchDetail, MatchHit},
};

/// Correlates the names of a feature with the candidate names of one entity.
///
/// Returns the accepted candidates by tag key. Weak matches are suppressed:
/// trimmed matches found only after removing the operator from the start of
/// a name, names needing both sides trimmed when read from the `operator`
/// tag, and acronyms that also stand for another candidate name. When no tag
/// matches, a candidate is still accepted as a prefix of a name if the rest
/// of that name matches another candidate.
#[instrument(skip_all, fields(tags = feature.tags.len(), candidates = candidates.len()))]
pub fn check_for_match(feature: &Feature, candidates: &CandidateNames, params: &MatchParams) -> BTreeMap<String, Vec<MatchHit>> {
  let names = feature.names();
  let mut hits: BTreeMap<String, Vec<MatchHit>> = BTreeMap::new();

  if names.is_empty() || candidates.is_empty() {
    return hits;
  }

  let operator = feature.tag("operator").map(str::to_lowercase).filter(|operator| !operator.is_empty());
  let endings = feature.city_endings(&params.endings);
  let mut cache: HashMap<(&str, &str), Option<MatchType>> = HashMap::default();

  for candidate in candidates.iter() {
    for &(tag, observed) in &names {
      let verdict = *cache
        .entry((observed, candidate.name.as_str()))
        .or_insert_with(|| match_observed(observed, &candidate.name, operator.as_deref(), &endings, &params.place_names));

      let Some(category) = verdict else {
        continue;
      };

      if category == MatchType::BothTrimmed && tag == "operator" {
        suppress(tag, &candidate.name, "operator_both_trimmed");
        continue;
      }

      if category == MatchType::Initials && initials_match_other_candidate(&candidate.name, candidates) {
        suppress(tag, &candidate.name, "ambiguous_initials");
        continue;
      }

      accept(&mut hits, tag, candidate, category);
    }
  }

  if !hits.is_empty() {
    return hits;
  }

  for candidate in candidates.iter() {
    for &(tag, observed) in &names {
      let Some(left_over) = prefix_name_match(observed, &candidate.name).filter(|left_over| !left_over.is_empty()) else {
        continue;
      };

      let corroborated = candidates
        .names()
        .filter(|other| *other != candidate.name)
        .any(|other| name_match(left_over, other, &[], &params.place_names).is_some());

      if corroborated {
        accept(&mut hits, tag, candidate, MatchType::Prefix);
      }
    }
  }

  hits
}

/// Classifies every pair of feature name and candidate name, without any of
/// the suppressions of [`check_for_match`].
#[instrument(skip_all, fields(tags = feature.tags.len(), candidates = candidates.len()))]
pub fn get_all_matches(feature: &Feature, candidates: &CandidateNames, endings: &[String]) -> Vec<MatchDetail> {
  let names = feature.names();

  candidates
    .iter()
    .flat_map(|candidate| {
      names.iter().filter_map(move |&(tag, observed)| {
        name_match(observed, &candidate.name, endings, &[]).map(|category| MatchDetail {
          category,
          candidate: candidate.name.clone(),
          sources: candidate.sources.clone(),
          observed: observed.to_string(),
          tag: tag.to_string(),
        })
      })
    })
    .collect()
}

/// Matches one pair, retrying without the operator when the observed name
/// starts with it. Only untrimmed matches are kept from that retry.
fn match_observed(observed: &str, candidate: &str, operator: Option<&str>, endings: &[String], place_names: &[String]) -> Option<MatchType> {
  if let Some(category) = name_match(observed, candidate, endings, place_names) {
    return Some(category);
  }

  let operator = operator?;

  if !observed.to_lowercase().starts_with(operator) {
    return None;
  }

  let rest = drop_chars_start(observed, operator.chars().count()).trim_end();

  match name_match(rest, candidate, endings, place_names) {
    Some(MatchType::BothTrimmed | MatchType::WikidataTrimmed) => {
      tracing::debug!(observed, candidate, reason = "operator_prefix_trimmed", "suppressed match");
      counter!("namelink_suppressed_total", "reason" => "operator_prefix_trimmed").increment(1);

      None
    }

    category => category,
  }
}

fn initials_match_other_candidate(initials: &str, candidates: &CandidateNames) -> bool {
  candidates.names().any(|other| other != initials && initials_match(initials, other, &[]).is_some())
}

fn accept(hits: &mut BTreeMap<String, Vec<MatchHit>>, tag: &str, candidate: &Candidate, category: MatchType) {
  tracing::debug!(tag, candidate = %candidate.name, category = category.as_str(), "accepted match");
  counter!("namelink_matches_total", "category" => category.as_str()).increment(1);

  hits.entry(tag.to_string()).or_default().push(MatchHit {
    category,
    candidate: candidate.name.clone(),
    sources: candidate.sources.clone(),
  });
}

fn suppress(tag: &str, candidate: &str, reason: &'static str) {
  tracing::debug!(tag, candidate, reason, "suppressed match");
  counter!("namelink_suppressed_total", "reason" => reason).increment(1);
}

#[cfg(test)]
mod tests {
  use serde_json::json;
  use serde_json_assert::assert_json_eq;

  use crate::{
    matching::{MatchParams, MatchType},
    model::{CandidateNames, Feature, MatchDetail, MatchHit, Source},
  };

  fn hit(category: MatchType, candidate: &str, sources: &[Source]) -> MatchHit {
    MatchHit {
      category,
      candidate: candidate.to_string(),
      sources: sources.to_vec(),
    }
  }

  #[test]
  fn check_for_match() {
    let feature = Feature::builder().tags(&[("name", "Tower Bridge"), ("highway", "primary")]).build();
    let candidates = [("Tower Bridge", Source::label("en")), ("Pont de la Tour", Source::label("fr"))]
      .into_iter()
      .collect::<CandidateNames>();

    let hits = super::check_for_match(&feature, &candidates, &MatchParams::default());

    assert_eq!(hits.len(), 1);
    assert_eq!(hits["name"], vec![hit(MatchType::Good, "Tower Bridge", &[Source::label("en")])]);

    assert_json_eq!(
      serde_json::to_value(&hits).unwrap(),
      json!({
        "name": [{"category": "good", "candidate": "Tower Bridge", "sources": [{"kind": "label", "code": "en"}]}],
      })
    );
  }

  #[test]
  fn empty_inputs() {
    let feature = Feature::builder().tags(&[("name", "Tower Bridge")]).build();
    let candidates = [("Tower Bridge", Source::label("en"))].into_iter().collect::<CandidateNames>();

    assert!(super::check_for_match(&Feature::default(), &candidates, &MatchParams::default()).is_empty());
    assert!(super::check_for_match(&feature, &CandidateNames::default(), &MatchParams::default()).is_empty());
  }

  #[test]
  fn operator_both_trimmed() {
    let params = MatchParams::builder().endings(vec!["inn".to_string(), "hotel".to_string()]).build();
    let candidates = [("Old House Hotel", Source::label("en"))].into_iter().collect::<CandidateNames>();

    let feature = Feature::builder().tags(&[("operator", "Old House Inn")]).build();

    assert!(super::check_for_match(&feature, &candidates, &params).is_empty());

    let feature = Feature::builder().tags(&[("name", "Old House Inn"), ("operator", "Old House Inn")]).build();
    let hits = super::check_for_match(&feature, &candidates, &params);

    assert_eq!(hits.keys().collect::<Vec<_>>(), vec!["name"]);
    assert_eq!(hits["name"][0].category, MatchType::BothTrimmed);
  }

  #[test]
  fn operator_prefix() {
    let params = MatchParams::builder().endings(vec!["inn".to_string(), "hotel".to_string()]).build();
    let feature = Feature::builder().tags(&[("name", "Tesco Old House Inn"), ("operator", "Tesco")]).build();

    let candidates = [("Old House Inn", Source::label("en"))].into_iter().collect::<CandidateNames>();
    let hits = super::check_for_match(&feature, &candidates, &params);

    assert_eq!(hits.keys().collect::<Vec<_>>(), vec!["name"]);
    assert_eq!(hits["name"], vec![hit(MatchType::Good, "Old House Inn", &[Source::label("en")])]);

    let candidates = [("Old House Hotel", Source::label("en"))].into_iter().collect::<CandidateNames>();

    assert!(super::check_for_match(&feature, &candidates, &params).is_empty());
  }

  #[test]
  fn match_observed() {
    let endings = vec!["inn".to_string(), "hotel".to_string()];

    assert_eq!(super::match_observed("Tesco Old House Inn", "Old House Inn", Some("tesco"), &endings, &[]), Some(MatchType::Good));
    assert_eq!(super::match_observed("Tesco Old House Inn", "Old House Hotel", Some("tesco"), &endings, &[]), None);
    assert_eq!(super::match_observed("Old House Inn", "Old House Hotel", Some("tesco"), &endings, &[]), Some(MatchType::BothTrimmed));
    assert_eq!(super::match_observed("Tesco Old House Inn", "Old House Inn", None, &endings, &[]), None);
  }

  #[test]
  fn ambiguous_initials() {
    let feature = Feature::builder().tags(&[("name", "british broadcasting corp")]).build();

    let candidates = [("BBC", Source::alias("en"))].into_iter().collect::<CandidateNames>();
    let hits = super::check_for_match(&feature, &candidates, &MatchParams::default());

    assert_eq!(hits["name"], vec![hit(MatchType::Initials, "BBC", &[Source::alias("en")])]);

    let candidates = [("BBC", Source::alias("en")), ("British Broadcasting Corporation", Source::label("en"))]
      .into_iter()
      .collect::<CandidateNames>();

    assert!(super::check_for_match(&feature, &candidates, &MatchParams::default()).is_empty());
  }

  #[test]
  fn corroborated_prefix() {
    let feature = Feature::builder().tags(&[("name", "Tesco Express")]).build();

    let candidates = [("Tesco", Source::label("en")), ("Express", Source::alias("en"))]
      .into_iter()
      .collect::<CandidateNames>();
    let hits = super::check_for_match(&feature, &candidates, &MatchParams::default());

    assert_eq!(hits["name"], vec![hit(MatchType::Prefix, "Tesco", &[Source::label("en")])]);

    let candidates = [("Tesco", Source::label("en"))].into_iter().collect::<CandidateNames>();

    assert!(super::check_for_match(&feature, &candidates, &MatchParams::default()).is_empty());
  }

  #[test]
  fn city_endings() {
    let candidates = [("Science Museum London", Source::label("en"))].into_iter().collect::<CandidateNames>();

    let feature = Feature::builder().tags(&[("name", "Science Museum")]).build();

    assert!(super::check_for_match(&feature, &candidates, &MatchParams::default()).is_empty());

    let feature = Feature::builder().tags(&[("name", "Science Museum"), ("addr:city", "London")]).build();
    let hits = super::check_for_match(&feature, &candidates, &MatchParams::default());

    assert_eq!(hits["name"][0].category, MatchType::WikidataTrimmed);
  }

  #[test]
  fn get_all_matches() {
    let feature = Feature::builder().tags(&[("name", "Tower Bridge"), ("name:fr", "Pont de la Tour")]).build();
    let candidates = [
      ("Tower Bridge", Source::label("en")),
      ("Pont de la Tour", Source::label("fr")),
      ("Tower Bridge", Source::sitelink("enwiki")),
    ]
    .into_iter()
    .collect::<CandidateNames>();

    let details = super::get_all_matches(&feature, &candidates, &[]);

    assert_eq!(
      details,
      vec![
        MatchDetail {
          category: MatchType::Good,
          candidate: "Tower Bridge".to_string(),
          sources: vec![Source::label("en"), Source::sitelink("enwiki")],
          observed: "Tower Bridge".to_string(),
          tag: "name".to_string(),
        },
        MatchDetail {
          category: MatchType::Good,
          candidate: "Pont de la Tour".to_string(),
          sources: vec![Source::label("fr")],
          observed: "Pont de la Tour".to_string(),
          tag: "name:fr".to_string(),
        },
      ]
    );
  }
}
