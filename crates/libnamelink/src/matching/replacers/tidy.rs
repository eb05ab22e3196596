use std::sync::LazyLock;

use serde::Deserialize;

use crate::matching::replacers::Dictionaries;

pub(crate) static TIDY: LazyLock<TidyDictionary> = LazyLock::new(|| {
  let file = Dictionaries::get("tidy.yml").expect("could not read tidy dictionary");

  serde_yaml::from_slice::<TidyDictionary>(&file.data).expect("could not unmarshal tidy dictionary")
});

#[derive(Deserialize)]
pub(crate) struct TidyDictionary {
  pub(crate) substitutions: Vec<Substitution>,
  pub(crate) function_words: Vec<String>,
  pub(crate) spellings: Vec<Substitution>,
}

#[derive(Deserialize)]
pub(crate) struct Substitution {
  pub(crate) from: String,
  pub(crate) to: String,
}
