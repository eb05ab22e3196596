use std::iter;

use ahash::HashSet;
use libnamelink_macros::match_rule;

use crate::matching::{
  MatchType,
  comparers::{match_with_words_removed, plural_word_name_in_other_name, strip_non_chars_match},
  initials::{initials_match, name_containing_initials},
  normalize::{is_digits, keep_commas, remove_start, strip_non_chars, tidy_name},
};

/// Words that may always be trimmed from the end or start of a name.
const GENERIC_TRIMS: [&str; 3] = ["building", "complex", "house"];

/// Outcome of one step of the decision list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Verdict {
  /// The step has no opinion, run the next one.
  Continue,
  Matched(MatchType),
  /// The pair cannot match, skip all remaining steps.
  Rejected,
}

pub(crate) trait Rule: Send + Sync {
  fn name(&self) -> &'static str;
  fn apply(&self, pair: &mut Pair) -> Verdict;
}

/// The pair of names being classified, and the derived forms computed by the
/// steps that ran so far. Later steps rely on the forms prepared by earlier
/// ones, so rules must run in [`RULES`] order.
pub(crate) struct Pair<'p> {
  pub(crate) osm: &'p str,
  pub(crate) wd: &'p str,
  endings: &'p [String],
  osm_lc: String,
  wd_lc: String,
  osm_tidy: String,
  wd_tidy: String,
  plural_in_other_name: bool,
}

impl<'p> Pair<'p> {
  pub(crate) fn new(osm: &'p str, wd: &'p str, endings: &'p [String]) -> Pair<'p> {
    let osm_lc = osm.to_lowercase();
    let wd_lc = wd.to_lowercase();
    let plural_in_other_name = plural_word_name_in_other_name(&osm_lc, &wd_lc) || plural_word_name_in_other_name(&wd_lc, &osm_lc);

    Pair {
      osm,
      wd,
      endings,
      osm_lc,
      wd_lc,
      osm_tidy: String::new(),
      wd_tidy: String::new(),
      plural_in_other_name,
    }
  }

  /// Caller endings plus "house", which is always trimmable.
  fn trimmable_words(&self) -> impl Iterator<Item = &str> {
    self.endings.iter().map(String::as_str).chain(iter::once("house"))
  }

  /// Compares the observed name with the part of the knowledge-base name
  /// before its last comma ("Springfield" and "Springfield, Illinois").
  fn matches_before_comma(&self) -> bool {
    let Some(comma) = self.wd_tidy.rfind(", ") else {
      return false;
    };

    if is_digits(&self.osm_tidy) {
      return false;
    }

    let head = &self.wd_tidy[..comma];

    head == self.osm_tidy || strip_non_chars_match(&self.osm_tidy, head, true)
  }
}

#[match_rule(EmptyGuard, name = "empty_guard")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  if pair.osm.is_empty() || pair.wd.is_empty() {
    return Verdict::Rejected;
  }

  Verdict::Continue
}

#[match_rule(ExactMatch, name = "exact_match")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  if pair.osm == pair.wd {
    return Verdict::Matched(MatchType::Good);
  }

  Verdict::Continue
}

#[match_rule(ContainingInitials, name = "containing_initials")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  if name_containing_initials(pair.osm, pair.wd) {
    return Verdict::Matched(MatchType::Good);
  }

  Verdict::Continue
}

#[match_rule(TokenSet, name = "token_set")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  let osm_tokens = pair.osm_lc.split_whitespace().collect::<HashSet<_>>();
  let wd_tokens = pair.wd_lc.split_whitespace().collect::<HashSet<_>>();

  if osm_tokens == wd_tokens {
    return Verdict::Matched(MatchType::Good);
  }

  Verdict::Continue
}

#[match_rule(StrippedWithoutDash, name = "stripped_without_dash")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  if strip_non_chars_match(&pair.osm_lc, &pair.wd_lc, false) {
    return Verdict::Matched(MatchType::Good);
  }

  Verdict::Continue
}

#[match_rule(Initials, name = "initials")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  match initials_match(pair.osm, pair.wd, pair.endings).or_else(|| initials_match(pair.wd, pair.osm, pair.endings)) {
    Some(match_type) => Verdict::Matched(match_type),
    None => Verdict::Continue,
  }
}

#[match_rule(StrippedWithDash, name = "stripped_with_dash")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  if strip_non_chars_match(&pair.osm_lc, &pair.wd_lc, true) {
    return Verdict::Matched(MatchType::Good);
  }

  Verdict::Continue
}

#[match_rule(Tidy, name = "tidy")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  pair.wd_tidy = tidy_name(&pair.wd_lc);
  pair.osm_tidy = tidy_name(&pair.osm_lc);

  if pair.wd_tidy.is_empty() || pair.osm_tidy.is_empty() {
    return Verdict::Rejected;
  }

  if pair.wd_tidy == pair.osm_tidy {
    return Verdict::Matched(MatchType::Good);
  }

  Verdict::Continue
}

#[match_rule(WordsRemoved, name = "words_removed")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  match match_with_words_removed(&pair.osm_lc, &pair.wd_lc, pair.trimmable_words()) {
    Some(_) if pair.osm_lc.contains("church") && pair.wd_lc.contains("church") => Verdict::Matched(MatchType::Good),
    Some(match_type) => Verdict::Matched(match_type),
    None => Verdict::Continue,
  }
}

#[match_rule(TidyWordsRemoved, name = "tidy_words_removed")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  let tidy_endings = pair.trimmable_words().map(tidy_name).collect::<Vec<_>>();

  match match_with_words_removed(&pair.osm_tidy, &pair.wd_tidy, tidy_endings.iter().map(String::as_str)) {
    Some(match_type) if !pair.plural_in_other_name => Verdict::Matched(match_type),
    _ => Verdict::Continue,
  }
}

#[match_rule(TidyStripped, name = "tidy_stripped")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  if strip_non_chars_match(&pair.osm_tidy, &pair.wd_tidy, false) {
    return Verdict::Matched(MatchType::Good);
  }

  Verdict::Continue
}

#[match_rule(CommaQualifier, name = "comma_qualifier")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  // Keeps "Washington, D.C." in one piece.
  if pair.wd_tidy.contains("washington, d") {
    pair.wd_tidy = pair.wd_tidy.replace("washington, d", "washington d");
  }

  if pair.matches_before_comma() {
    return Verdict::Matched(MatchType::Good);
  }

  Verdict::Continue
}

#[match_rule(ReversedWords, name = "reversed_words")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  if pair.wd_tidy.split_whitespace().eq(pair.osm_tidy.split_whitespace().rev()) {
    return Verdict::Matched(MatchType::Good);
  }

  Verdict::Continue
}

#[match_rule(CommaQualifierStripped, name = "comma_qualifier_stripped")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  pair.wd_tidy = keep_commas(&pair.wd_tidy);
  pair.osm_tidy = keep_commas(&pair.osm_tidy);

  let Some(comma) = pair.wd_tidy.rfind(", ") else {
    return Verdict::Continue;
  };

  if is_digits(&pair.osm_tidy) {
    return Verdict::Continue;
  }

  let head = &pair.wd_tidy[..comma];

  if head == pair.osm_tidy || remove_start(head, "the ") == remove_start(&pair.osm_tidy, "the ") {
    return Verdict::Matched(MatchType::Good);
  }

  Verdict::Continue
}

#[match_rule(PunctuationStripped, name = "punctuation_stripped")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  pair.wd_tidy = strip_non_chars(&pair.wd_tidy);
  pair.osm_tidy = strip_non_chars(&pair.osm_tidy);

  if pair.wd_tidy == pair.osm_tidy {
    return Verdict::Matched(MatchType::Good);
  }

  Verdict::Continue
}

#[match_rule(LeadingThe, name = "leading_the")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  // Spaces are gone by now, so "the" is glued to the next word.
  if let Some(rest) = pair.wd_tidy.strip_prefix("the") {
    pair.wd_tidy = rest.to_string();
  }

  if let Some(rest) = pair.osm_tidy.strip_prefix("the") {
    pair.osm_tidy = rest.to_string();
  }

  if pair.wd_tidy == pair.osm_tidy {
    return Verdict::Matched(MatchType::Good);
  }

  Verdict::Continue
}

#[match_rule(PluralGuard, name = "plural_guard")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  if pair.plural_in_other_name {
    return Verdict::Rejected;
  }

  Verdict::Continue
}

#[match_rule(GenericTrim, name = "generic_trim")]
fn apply(&self, pair: &mut Pair) -> Verdict {
  let (osm, wd) = (pair.osm_tidy.as_str(), pair.wd_tidy.as_str());

  let trimmed = GENERIC_TRIMS.into_iter().chain(pair.trimmable_words()).filter(|end| !end.is_empty()).any(|end| {
    wd.strip_suffix(end) == Some(osm) || wd.strip_prefix(end) == Some(osm) || osm.strip_suffix(end) == Some(wd) || osm.strip_prefix(end) == Some(wd)
  });

  if trimmed {
    return Verdict::Matched(MatchType::Trim);
  }

  Verdict::Continue
}

/// The pair classification decision list. The first rule returning a verdict
/// other than [`Verdict::Continue`] decides.
pub(crate) const RULES: &[&dyn Rule] = &[
  &EmptyGuard,
  &ExactMatch,
  &ContainingInitials,
  &TokenSet,
  &StrippedWithoutDash,
  &Initials,
  &StrippedWithDash,
  &Tidy,
  &WordsRemoved,
  &TidyWordsRemoved,
  &TidyStripped,
  &CommaQualifier,
  &ReversedWords,
  &CommaQualifierStripped,
  &PunctuationStripped,
  &LeadingThe,
  &PluralGuard,
  &GenericTrim,
];

/// Classifies one (observed name, knowledge-base name) pair.
///
/// `endings` are extra words that may be trimmed from either name. Returns
/// `None` when the names do not plausibly denote the same entity.
pub fn name_match_main(osm: &str, wd: &str, endings: &[String]) -> Option<MatchType> {
  let mut pair = Pair::new(osm, wd, endings);

  for rule in RULES {
    match rule.apply(&mut pair) {
      Verdict::Continue => continue,

      Verdict::Matched(match_type) => {
        tracing::trace!(rule = rule.name(), category = match_type.as_str(), "names matched");

        return Some(match_type);
      }

      Verdict::Rejected => {
        tracing::trace!(rule = rule.name(), "names rejected");

        return None;
      }
    }
  }

  None
}
