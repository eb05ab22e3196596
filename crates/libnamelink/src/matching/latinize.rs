use unidecode::unidecode;

/// Folds a name to ASCII with the Text::Unidecode tables, trimming the
/// result.
///
/// Returns `None` when nothing alphanumeric is left, as happens for names made
/// only of punctuation or of characters the tables have no entry for.
pub(crate) fn latinize(name: &str) -> Option<String> {
  let folded = if name.is_ascii() { name.trim().to_string() } else { unidecode(name).trim().to_string() };

  folded.chars().any(|c| c.is_ascii_alphanumeric()).then_some(folded)
}
