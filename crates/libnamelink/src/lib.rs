mod aggregate;
mod entity;
mod error;
mod matching;
mod model;

/// Loads the embedded dictionaries, which are otherwise parsed on first use.
pub fn init() {
  let _ = *crate::matching::replacers::tidy::TIDY;
  let _ = *crate::matching::replacers::addresses::STREET_TYPES;
}

pub mod prelude {
  pub use crate::aggregate::{check_for_match, get_all_matches};
  pub use crate::entity::{Entity, EntityParams, osm_tag_from_wiki_value, qid_from_uri};
  pub use crate::error::NameLinkError;
  pub use crate::matching::{
    MatchParams, MatchType,
    address::{AddressCorrelation, check_for_address_in_extract, check_name_matches_address},
    comparers::{match_with_words_removed, plural_word_name_in_other_name, prefix_name_match, strip_non_chars_match},
    expander::name_match,
    identifier::{check_identifier, normalize_url},
    initials::{check_for_initials_match, initials_match, name_containing_initials},
    normalize::{normalize_name, tidy_name},
    rules::name_match_main,
  };
  pub use crate::model::{Candidate, CandidateNames, Feature, IdentifierSpec, IdentifierValues, MatchDetail, MatchHit, Source, SourceKind};
}
