/// Field rule tables for the intake form
///
/// Each case pairs an input with the message the page must show for it
/// (empty when the value is accepted).

use chrono::NaiveDate;
use intake_validation::validators::{
    validate_address1, validate_address2, validate_city, validate_dob, validate_email,
    validate_first_name, validate_last_name, validate_middle_initial, validate_pain,
    validate_phone, validate_ssn, validate_state, validate_symptoms, validate_user_id,
    validate_weight, validate_zip, DobBounds,
};
use intake_validation::{format_ssn, Verdict};
use pretty_assertions::assert_eq;
use rstest::rstest;

fn assert_verdict(verdict: Verdict, expected: &str) {
    assert_eq!(verdict.message(), expected);
    assert_eq!(verdict.is_valid(), expected.is_empty());
}

#[rstest]
#[case("Bob12", "")]
#[case("bob_1-x", "")]
#[case("a2345678901234567890", "")]
#[case("", "User ID is required.")]
#[case("   ", "User ID is required.")]
#[case("Bob1", "5–20 chars; start with letter; letters, numbers, - or _ only.")]
#[case("_bob12", "5–20 chars; start with letter; letters, numbers, - or _ only.")]
#[case("bob 12", "5–20 chars; start with letter; letters, numbers, - or _ only.")]
#[case("a23456789012345678901", "5–20 chars; start with letter; letters, numbers, - or _ only.")]
fn user_id(#[case] input: &str, #[case] expected: &str) {
    assert_verdict(validate_user_id(input), expected);
}

#[rstest]
#[case("Mary-Kate", "")]
#[case("D'Arcy", "")]
#[case("", "First name is required.")]
#[case("Anne Marie", "Letters, apostrophes, and dashes only (1–30).")]
#[case("José", "Letters, apostrophes, and dashes only (1–30).")]
fn first_name(#[case] input: &str, #[case] expected: &str) {
    assert_verdict(validate_first_name(input), expected);
}

#[rstest]
#[case("", "")]
#[case("Q", "")]
#[case("1", "Middle initial must be 1 letter or blank.")]
#[case("Q.", "Middle initial must be 1 letter or blank.")]
fn middle_initial(#[case] input: &str, #[case] expected: &str) {
    assert_verdict(validate_middle_initial(input), expected);
}

#[rstest]
#[case("Smith", "")]
#[case("Smith-Jones 4th", "")]
#[case("King5th", "")]
#[case("", "Last name is required.")]
#[case("Smith Jr", "1–30 letters/apostrophes/dashes; optional 2nd–5th.")]
#[case("Smith 1st", "1–30 letters/apostrophes/dashes; optional 2nd–5th.")]
fn last_name(#[case] input: &str, #[case] expected: &str) {
    assert_verdict(validate_last_name(input), expected);
}

#[rstest]
#[case("555-123-4567", "")]
#[case(" 555-123-4567 ", "")]
#[case("", "Phone number is required.")]
#[case("5551234567", "Use format 000-000-0000.")]
#[case("(555) 123-4567", "Use format 000-000-0000.")]
fn phone(#[case] input: &str, #[case] expected: &str) {
    assert_verdict(validate_phone(input), expected);
}

#[rstest]
#[case("12345", "")]
#[case("", "Zip code is required.")]
#[case("1234", "Zip must be exactly 5 digits.")]
#[case("12345-6789", "Zip must be exactly 5 digits.")]
fn zip(#[case] input: &str, #[case] expected: &str) {
    assert_verdict(validate_zip(input), expected);
}

#[rstest]
#[case("", "")]
#[case("123-45-6789", "")]
#[case("123-45-678", "SSN must be 9 digits, formatted 000-00-0000.")]
#[case("123456789", "SSN must be 9 digits, formatted 000-00-0000.")]
fn ssn(#[case] input: &str, #[case] expected: &str) {
    assert_verdict(validate_ssn(input), expected);
}

#[test]
fn addresses_and_city_lengths() {
    assert_verdict(validate_address1("12 Elm St"), "");
    assert_verdict(validate_address1(""), "Address Line 1 is required.");
    assert_verdict(validate_address1("A"), "2–30 characters required.");
    assert_verdict(validate_address1(&"x".repeat(31)), "2–30 characters required.");
    assert_verdict(validate_address2("  "), "");
    assert_verdict(validate_address2("Apt 4"), "");
    assert_verdict(validate_address2("4"), "If entered, must be 2–30 characters.");
    assert_verdict(validate_city("Akron"), "");
    assert_verdict(validate_city(""), "City is required.");
    assert_verdict(validate_city(" X "), "2–30 characters required.");
    assert_verdict(validate_state("OH"), "");
    assert_verdict(validate_state(""), "Please select a state.");
}

#[rstest]
#[case("jane.doe@example.com", "")]
#[case("  Jane.Doe@Example.COM ", "")]
#[case("a+tag@mail.example.org", "")]
#[case("", "Email is required.")]
#[case("   ", "Email is required.")]
#[case("a@b.c", "Email must be in the format name@domain.tld.")]
#[case("a@b", "Email must be in the format name@domain.tld.")]
#[case("@x.io", "Email must be in the format name@domain.tld.")]
#[case("jane doe@example.com", "Email must be in the format name@domain.tld.")]
fn email(#[case] input: &str, #[case] expected: &str) {
    assert_verdict(validate_email(input), expected);
}

#[rstest]
#[case("", "")]
#[case("Dull ache, worse at night", "")]
#[case("it's 'sharp'", "")]
#[case("a \"sharp\" pain", "Please avoid using double quotes (\").")]
#[case("\"", "Please avoid using double quotes (\").")]
fn symptoms(#[case] input: &str, #[case] expected: &str) {
    assert_verdict(validate_symptoms(input), expected);
}

#[rstest]
#[case("1", "")]
#[case("10", "")]
#[case("0", "Pain level must be between 1 and 10.")]
#[case("11", "Pain level must be between 1 and 10.")]
#[case("abc", "Pain level must be between 1 and 10.")]
#[case("", "Pain level must be between 1 and 10.")]
fn pain_range(#[case] input: &str, #[case] expected: &str) {
    assert_verdict(validate_pain(input), expected);
}

#[rstest]
#[case("5", "")]
#[case("400", "")]
#[case("4", "Weight must be between 5 and 400 lbs.")]
#[case("401", "Weight must be between 5 and 400 lbs.")]
#[case("", "Weight must be between 5 and 400 lbs.")]
fn weight_range(#[case] input: &str, #[case] expected: &str) {
    assert_verdict(validate_weight(input), expected);
}

#[rstest]
#[case("1906-10-19", true)]
#[case("1906-10-18", false)]
#[case("2026-10-19", true)]
#[case("2026-10-20", false)]
#[case("2026-02-30", false)]
fn dob_boundaries(#[case] input: &str, #[case] valid: bool) {
    let today = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    let bounds = DobBounds::new(today, 120);
    assert_eq!(validate_dob(input, &bounds).is_valid(), valid);
}

#[test]
fn validators_are_idempotent() {
    for input in ["Bob1", "Bob12", ""] {
        assert_eq!(validate_user_id(input), validate_user_id(input));
    }
    assert_eq!(validate_zip("1234"), validate_zip("1234"));
}

#[test]
fn formatted_ssn_always_validates() {
    for raw in ["123456789", "123-45-6789", "12 34 56 789", "1234567890123"] {
        let formatted = format_ssn(raw);
        assert_verdict(validate_ssn(&formatted), "");
        assert_eq!(format_ssn(&formatted), formatted);
    }
}
