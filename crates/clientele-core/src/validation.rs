//! Format rules for user-supplied client fields.
//!
//! `[[:word:]]` and `[0-9]` keep the patterns ASCII-only.

use std::sync::LazyLock;

use regex::Regex;

pub const NAME_MAX_LEN: usize = 100;

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(
    r"^[[:word:]]+([.-]?[[:word:]]+)*@[[:word:]]+([.-]?[[:word:]]+)*(\.[[:word:]]{2,3})+$",
  )
  .expect("email pattern compiles")
});

static LOCAL_CELLPHONE: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^05[0-9]{8}$").expect("local pattern compiles"));

static INTERNATIONAL_CELLPHONE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"^\+972[0-9]{9}$").expect("international pattern compiles")
});

/// Which accepted shape a cellphone string has.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhoneKind {
  /// `05` followed by eight digits.
  Local,
  /// `+972` followed by nine digits.
  International,
}

pub fn validate_email(email: &str) -> bool { EMAIL.is_match(email) }

pub fn classify_cellphone(cellphone: &str) -> Option<PhoneKind> {
  if LOCAL_CELLPHONE.is_match(cellphone) {
    Some(PhoneKind::Local)
  } else if INTERNATIONAL_CELLPHONE.is_match(cellphone) {
    Some(PhoneKind::International)
  } else {
    None
  }
}

pub fn validate_cellphone(cellphone: &str) -> bool {
  classify_cellphone(cellphone).is_some()
}

/// Returns the detail message for an unacceptable name, if any.
pub fn check_name(name: &str) -> Option<&'static str> {
  let trimmed = name.trim();
  if trimmed.is_empty() {
    Some("Name is required")
  } else if trimmed.chars().count() > NAME_MAX_LEN {
    Some("Name must be at most 100 characters")
  } else {
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_common_emails() {
    for email in ["a@b.com", "john.doe@example.org", "x-y_z@mail.co.il", "a1@b2.net"] {
      assert!(validate_email(email), "{email}");
    }
  }

  #[test]
  fn rejects_malformed_emails() {
    for email in [
      "",
      "plain",
      "@b.com",
      "a@",
      "a@b",
      "a@b.c",
      "a@b.comm",
      "a..b@c.com",
      "a b@c.com",
      "a@b.com ",
    ] {
      assert!(!validate_email(email), "{email:?}");
    }
  }

  #[test]
  fn rejects_non_ascii_word_characters() {
    assert!(!validate_email("josé@example.com"));
  }

  #[test]
  fn classifies_cellphones() {
    assert_eq!(classify_cellphone("0501234567"), Some(PhoneKind::Local));
    assert_eq!(
      classify_cellphone("+972501234567"),
      Some(PhoneKind::International)
    );
  }

  #[test]
  fn rejects_malformed_cellphones() {
    for phone in [
      "",
      "050123456",
      "05012345678",
      "0601234567",
      "972501234567",
      "+97250123456",
      "+9725012345678",
      "+1501234567",
      "05O1234567",
      "٠٥٠١٢٣٤٥٦٧",
    ] {
      assert!(!validate_cellphone(phone), "{phone:?}");
    }
  }

  #[test]
  fn name_rules() {
    assert_eq!(check_name("Alice"), None);
    assert_eq!(check_name("   "), Some("Name is required"));
    assert_eq!(
      check_name(&"n".repeat(NAME_MAX_LEN + 1)),
      Some("Name must be at most 100 characters")
    );
    assert_eq!(check_name(&"n".repeat(NAME_MAX_LEN)), None);
  }
}
