//! Cellphone normalisation.
//!
//! Numbers are stored as an `(extension, number)` pair. Two shapes exist:
//! local numbers (`05XXXXXXXX`) carry extension `"0"`, everything else is
//! treated as international with extension `"972"`. The normaliser trusts its
//! input; callers run [`crate::validation::validate_cellphone`] first.

use std::fmt;

pub const LOCAL_EXTENSION: &str = "0";
pub const INTERNATIONAL_EXTENSION: &str = "972";

const LOCAL_PREFIX: &str = "05";

/// A cellphone number split into dialling extension and subscriber number.
///
/// Uniqueness and SMS-status sharing are keyed on `number` alone, so the
/// local and international spellings of one subscriber collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone {
  pub extension: String,
  pub number:    String,
}

impl Phone {
  /// Split a raw cellphone string. Total: inputs shorter than the extension
  /// yield an empty `number`.
  pub fn normalize(raw: &str) -> Self {
    let digits = raw.strip_prefix('+').unwrap_or(raw);

    let extension = if digits.starts_with(LOCAL_PREFIX) {
      LOCAL_EXTENSION
    } else {
      INTERNATIONAL_EXTENSION
    };

    Self {
      extension: extension.to_owned(),
      number:    digits.get(extension.len()..).unwrap_or_default().to_owned(),
    }
  }
}

/// Display form: `0501234567` for local numbers, `+972501234567` otherwise.
impl fmt::Display for Phone {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    if self.extension.len() == 1 {
      write!(f, "{}{}", self.extension, self.number)
    } else {
      write!(f, "+{}{}", self.extension, self.number)
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::validation::{PhoneKind, classify_cellphone};

  #[test]
  fn local_number_splits_off_leading_zero() {
    let phone = Phone::normalize("0501234567");
    assert_eq!(phone.extension, "0");
    assert_eq!(phone.number, "501234567");
    assert_eq!(phone.to_string(), "0501234567");
  }

  #[test]
  fn international_number_strips_plus_and_country_code() {
    let phone = Phone::normalize("+972501234567");
    assert_eq!(phone.extension, "972");
    assert_eq!(phone.number, "501234567");
    assert_eq!(phone.to_string(), "+972501234567");
  }

  #[test]
  fn both_spellings_share_the_subscriber_number() {
    assert_eq!(
      Phone::normalize("0521112233").number,
      Phone::normalize("+972521112233").number,
    );
  }

  #[test]
  fn unrecognised_prefix_falls_into_international_branch() {
    let phone = Phone::normalize("0612345678");
    assert_eq!(phone.extension, "972");
    assert_eq!(phone.number, "2345678");
  }

  #[test]
  fn short_input_does_not_panic() {
    assert_eq!(Phone::normalize("").number, "");
    assert_eq!(Phone::normalize("+9").number, "");
    assert_eq!(Phone::normalize("05").number, "5");
  }

  #[test]
  fn display_round_trip_keeps_phone_class() {
    let samples = [
      "0500000000",
      "0539876543",
      "0599999999",
      "+972000000000",
      "+972541234567",
      "+972999999999",
    ];
    for raw in samples {
      let kind = classify_cellphone(raw).expect("sample is valid");
      let phone = Phone::normalize(raw);
      assert_eq!(phone.number.len(), 9, "{raw}");
      match kind {
        PhoneKind::Local => assert_eq!(phone.extension, LOCAL_EXTENSION),
        PhoneKind::International => {
          assert_eq!(phone.extension, INTERNATIONAL_EXTENSION)
        }
      }
      let shown = phone.to_string();
      assert_eq!(shown, raw);
      assert_eq!(classify_cellphone(&shown), Some(kind));
    }
  }
}
