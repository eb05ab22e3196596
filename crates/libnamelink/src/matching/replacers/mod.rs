use aho_corasick::AhoCorasick;
use rust_embed::Embed;

pub(crate) mod addresses;
pub(crate) mod tidy;

#[derive(Embed)]
#[folder = "./assets/dictionaries"]
struct Dictionaries;

/// Replaces every whole-word match of `aho` in `haystack` with the output of
/// `replacement`, called with the index of the matched pattern and the
/// matched text.
pub(crate) fn replace_with<F>(aho: &AhoCorasick, haystack: &str, mut replacement: F) -> String
where
  F: FnMut(usize, &str) -> String,
{
  let mut out = String::with_capacity(haystack.len());
  let mut cursor = 0;

  for mat in aho.find_iter(haystack) {
    let start_is_boundary = mat.start() == 0 || !haystack[..mat.start()].chars().next_back().map(|c| c.is_alphanumeric()).unwrap_or_default();
    let end_is_boundary = mat.end() == haystack.len() || !haystack[mat.end()..].chars().next().map(|c| c.is_alphanumeric()).unwrap_or_default();

    if start_is_boundary && end_is_boundary {
      out.push_str(&haystack[cursor..mat.start()]);
      out.push_str(&replacement(mat.pattern().as_usize(), &haystack[mat.start()..mat.end()]));

      cursor = mat.end();
    }
  }

  out.push_str(&haystack[cursor..]);
  out
}
