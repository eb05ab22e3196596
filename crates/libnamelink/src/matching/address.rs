use std::{collections::BTreeSet, sync::LazyLock};

use regex::Regex;
use serde::Serialize;

use crate::{
  matching::{
    normalize::{is_digits, normalize_name},
    replacers::{addresses::STREET_TYPES, replace_with},
  },
  model::Feature,
};

static NUMBER_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(?:(?:Number|No)s?\.? )?(\d[-\d]*,? .*$)").unwrap());
static UK_POSTCODE_START: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)^[a-z][a-z]\d+[a-z]?$").unwrap());

/// What an address correlator concluded about a feature and an entity.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AddressCorrelation {
  Confirmed,
  Refuted,
  Unknown,
}

/// Splits on the last space, the whole value being the tail if there is none.
fn rpartition(value: &str) -> (&str, &str) {
  value.rsplit_once(' ').unwrap_or(("", value))
}

/// Compares the address of a feature with the candidate names of an entity
/// that look like addresses ("10 Downing Street", "221B Baker Street, NW1").
///
/// Candidate addresses may end with the start of a UK postcode, which must
/// then agree with the feature's postcode. A feature without address never
/// correlates. When a candidate address only shares a prefix with the
/// feature's, the outcome is [`AddressCorrelation::Unknown`].
pub fn check_name_matches_address<'n, I>(feature: &Feature, candidate_names: I) -> AddressCorrelation
where
  I: IntoIterator<Item = &'n str>,
{
  if !feature.has_address() {
    return AddressCorrelation::Unknown;
  }

  let mut number_start = candidate_names
    .into_iter()
    .filter(|name| !name.to_lowercase().ends_with(" building"))
    .filter_map(|name| NUMBER_START.captures(name).map(|captures| captures[1].to_string()))
    .collect::<BTreeSet<_>>();

  if number_start.is_empty() {
    return AddressCorrelation::Unknown;
  }

  let before_comma = number_start
    .iter()
    .filter_map(|name| name.rfind(',').map(|comma| name[..comma].to_string()))
    .filter(|name| !is_digits(name))
    .collect::<Vec<_>>();

  number_start.extend(before_comma);

  let normalized = number_start.iter().map(|name| normalize_name(name)).collect::<BTreeSet<_>>();
  let postcode = feature.tag("addr:postcode").filter(|postcode| !postcode.is_empty()).map(str::to_lowercase);

  if let (Some(number), Some(street)) = (feature.tag("addr:housenumber"), feature.tag("addr:street")) {
    let osm_address = normalize_name(&format!("{number} {street}"));

    if normalized.contains(&osm_address) {
      return AddressCorrelation::Confirmed;
    }

    for candidate in &number_start {
      let (name, postcode_start) = rpartition(candidate);

      if let Some(postcode) = &postcode
        && !postcode.starts_with(&postcode_start.to_lowercase())
      {
        continue;
      }

      if UK_POSTCODE_START.is_match(postcode_start) && normalize_name(name) == osm_address {
        return AddressCorrelation::Confirmed;
      }
    }

    if normalized.iter().any(|name| name.starts_with(&osm_address) || osm_address.starts_with(name.as_str())) {
      return AddressCorrelation::Unknown;
    }

    if let Some(captures) = STREET_TYPES.common_end.captures(&osm_address) {
      let short = &captures[1];

      if normalized.iter().any(|name| name.starts_with(short)) {
        return AddressCorrelation::Unknown;
      }
    }
  }

  if let Some(full) = feature.tag("addr:full") {
    let osm_address = normalize_name(full);

    if normalized.iter().any(|name| osm_address.starts_with(name.as_str())) {
      return AddressCorrelation::Confirmed;
    }

    let with_postcode = number_start.iter().map(|candidate| rpartition(candidate)).any(|(name, postcode_start)| {
      UK_POSTCODE_START.is_match(postcode_start) && normalize_name(name) == osm_address
    });

    if with_postcode {
      return AddressCorrelation::Confirmed;
    }
  }

  // The feature is named after one of the addresses, the address tags may
  // then describe an entrance on another street.
  if feature.tag("name").is_some_and(|name| number_start.contains(name)) {
    return AddressCorrelation::Unknown;
  }

  AddressCorrelation::Refuted
}

/// Searches the address of a feature in a free-text description of an
/// entity. Street types may appear abbreviated in the description.
pub fn check_for_address_in_extract(feature: &Feature, extract: &str) -> bool {
  if extract.is_empty() || !feature.has_address() {
    return false;
  }

  if let (Some(number), Some(street)) = (feature.tag("addr:housenumber"), feature.tag("addr:street"))
    && address_in_extract(&format!("{number} {street}"), extract)
  {
    return true;
  }

  feature.tag("addr:full").is_some_and(|full| address_in_extract(full, extract))
}

fn address_in_extract(address: &str, extract: &str) -> bool {
  let pattern = replace_with(&STREET_TYPES.forms, &regex::escape(address), |index, word| {
    format!("({word}|{}\\.?)", STREET_TYPES.abbreviations[index])
  });

  match Regex::new(&format!(r"(?i)\b{pattern}")) {
    Ok(regex) => regex.is_match(extract),

    Err(err) => {
      tracing::debug!(error = err.to_string(), address, "could not build address pattern");
      false
    }
  }
}
