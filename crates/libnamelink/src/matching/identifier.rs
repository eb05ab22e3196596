use ahash::HashSet;

use crate::model::{Feature, IdentifierSpec};

/// Strips the scheme, a leading `www.` and trailing slashes from a URL.
pub fn normalize_url(url: &str) -> &str {
  let url = url.strip_prefix("https://").or_else(|| url.strip_prefix("http://")).unwrap_or(url);
  let url = url.strip_prefix("www.").unwrap_or(url);

  url.trim_end_matches('/')
}

/// Checks whether the feature carries one of the known identifiers of an
/// entity. Identifiers are compared verbatim and without spaces, websites as
/// normalized URLs.
pub fn check_identifier(feature: &Feature, identifiers: &IdentifierSpec) -> bool {
  for (key, entries) in &identifiers.0 {
    let Some(osm_value) = feature.tag(key).filter(|value| !value.is_empty()) else {
      continue;
    };

    for entry in entries {
      let values = entry
        .values
        .iter()
        .cloned()
        .chain(entry.values.iter().filter(|value| value.contains(' ')).map(|value| value.replace(' ', "")))
        .collect::<HashSet<_>>();

      if values.contains(osm_value) {
        return true;
      }

      if osm_value.contains(' ') && values.contains(&osm_value.replace(' ', "")) {
        return true;
      }

      if entry.label == "website" {
        let osm_url = normalize_url(osm_value);

        if values.iter().any(|value| normalize_url(value) == osm_url) {
          return true;
        }
      }
    }
  }

  false
}
