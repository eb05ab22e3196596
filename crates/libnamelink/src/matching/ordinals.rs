const SMALL: [&str; 20] = [
  "zero",
  "one",
  "two",
  "three",
  "four",
  "five",
  "six",
  "seven",
  "eight",
  "nine",
  "ten",
  "eleven",
  "twelve",
  "thirteen",
  "fourteen",
  "fifteen",
  "sixteen",
  "seventeen",
  "eighteen",
  "nineteen",
];

const TENS: [&str; 10] = ["", "", "twenty", "thirty", "forty", "fifty", "sixty", "seventy", "eighty", "ninety"];

const SCALES: [(u64, &str); 6] = [
  (1_000_000_000_000_000_000, "quintillion"),
  (1_000_000_000_000_000, "quadrillion"),
  (1_000_000_000_000, "trillion"),
  (1_000_000_000, "billion"),
  (1_000_000, "million"),
  (1_000, "thousand"),
];

/// Spells out a number in British English ("one hundred and one").
pub(crate) fn cardinal_words(number: u64) -> String {
  match number {
    0..20 => SMALL[number as usize].to_string(),

    20..100 => match number % 10 {
      0 => TENS[(number / 10) as usize].to_string(),
      units => format!("{}-{}", TENS[(number / 10) as usize], SMALL[units as usize]),
    },

    100..1000 => {
      let head = format!("{} hundred", SMALL[(number / 100) as usize]);

      match number % 100 {
        0 => head,
        rest => format!("{head} and {}", cardinal_words(rest)),
      }
    }

    _ => {
      let (scale, word) = SCALES.iter().find(|(scale, _)| number >= *scale).copied().unwrap_or(SCALES[SCALES.len() - 1]);
      let head = format!("{} {word}", cardinal_words(number / scale));

      match number % scale {
        0 => head,
        rest @ 1..100 => format!("{head} and {}", cardinal_words(rest)),
        rest => format!("{head}, {}", cardinal_words(rest)),
      }
    }
  }
}

/// Spells out the ordinal form of a number ("twenty-first", "one hundredth").
pub(crate) fn ordinal_words(number: u64) -> String {
  let cardinal = cardinal_words(number);
  let (head, last) = match cardinal.rfind([' ', '-']) {
    Some(index) => cardinal.split_at(index + 1),
    None => ("", cardinal.as_str()),
  };

  let last = match last {
    "one" => "first".to_string(),
    "two" => "second".to_string(),
    "three" => "third".to_string(),
    "five" => "fifth".to_string(),
    "eight" => "eighth".to_string(),
    "nine" => "ninth".to_string(),
    "twelve" => "twelfth".to_string(),
    word => match word.strip_suffix('y') {
      Some(stem) => format!("{stem}ieth"),
      None => format!("{word}th"),
    },
  };

  format!("{head}{last}")
}
