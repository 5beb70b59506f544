use super::*;

use field_config::FieldSet;
use shared::domain::{FieldKind, FieldPattern};

fn email_field() -> FieldDefinition {
    FieldDefinition::new("email", "Email", FieldKind::Email)
        .required()
        .with_pattern(FieldPattern::new(".+@.+").expect("pattern"), None)
}

fn age_field() -> FieldDefinition {
    FieldDefinition::new("age", "Age", FieldKind::Number).with_range(Some(18.0), Some(99.0))
}

#[test]
fn required_message_names_the_label() {
    let field = FieldDefinition::new("fullName", "Full Name", FieldKind::Text).required();
    assert_eq!(validate(&field, &FieldValue::text("")), "Full Name is required");
    assert_eq!(validate(&field, &FieldValue::Unset), "Full Name is required");
    assert_eq!(validate(&field, &FieldValue::text("   \t")), "Full Name is required");
    assert_eq!(validate(&field, &FieldValue::text("Ada")), "");
}

#[test]
fn required_checkbox_must_be_checked() {
    let field = FieldDefinition::new("terms", "Terms", FieldKind::Checkbox).required();
    assert_eq!(validate(&field, &FieldValue::Bool(false)), "Terms is required");
    assert_eq!(validate(&field, &FieldValue::Bool(true)), "");
}

#[test]
fn email_scenarios() {
    let field = email_field();
    assert_eq!(validate(&field, &FieldValue::text("")), "Email is required");
    assert_eq!(validate(&field, &FieldValue::text("abc")), "Email is not valid");
    assert_eq!(validate(&field, &FieldValue::text("a@b.com")), "");
}

#[test]
fn min_length_boundary() {
    let field = FieldDefinition::new("user", "Username", FieldKind::Text).with_length(Some(3), None);
    assert_eq!(
        validate(&field, &FieldValue::text("ab")),
        "Username must be at least 3 characters"
    );
    assert_eq!(validate(&field, &FieldValue::text("abc")), "");
    assert_eq!(validate(&field, &FieldValue::text("abcd")), "");
    assert_eq!(
        validate(&field, &FieldValue::Unset),
        "Username must be at least 3 characters"
    );
}

#[test]
fn length_counts_characters_not_bytes() {
    let field = FieldDefinition::new("city", "City", FieldKind::Text).with_length(None, Some(4));
    assert_eq!(validate(&field, &FieldValue::text("Köln")), "");
    assert_eq!(
        validate(&field, &FieldValue::text("Kölna")),
        "City cannot exceed 4 characters"
    );
}

#[test]
fn astral_characters_count_once() {
    let field = FieldDefinition::new("mood", "Mood", FieldKind::Text).with_length(Some(1), Some(1));
    assert_eq!(text_length(&FieldValue::text("😀")), Some(1));
    assert_eq!(validate(&field, &FieldValue::text("😀")), "");
    assert_eq!(
        validate(&field, &FieldValue::text("😀😀")),
        "Mood cannot exceed 1 characters"
    );
}

#[test]
fn length_rules_skip_checkbox_values() {
    let field =
        FieldDefinition::new("flag", "Flag", FieldKind::Checkbox).with_length(Some(10), Some(20));
    assert_eq!(validate(&field, &FieldValue::Bool(true)), "");
}

#[test]
fn numeric_bounds_reject_out_of_range_values() {
    let field = age_field();
    assert_eq!(validate(&field, &FieldValue::text("17")), "Age must be at least 18");
    assert_eq!(validate(&field, &FieldValue::text("100")), "Age cannot be more than 99");
    assert_eq!(validate(&field, &FieldValue::text("18")), "");
    assert_eq!(validate(&field, &FieldValue::text(" 99 ")), "");
    assert_eq!(validate(&field, &FieldValue::text("42.5")), "");
}

#[test]
fn non_numeric_values_never_pass_numeric_bounds() {
    let field = age_field();
    for raw in ["abc", "", "  ", "NaN", "inf", "12abc"] {
        assert_eq!(
            validate(&field, &FieldValue::text(raw)),
            "Age must be at least 18",
            "value {raw:?} should fail"
        );
    }

    let max_only = FieldDefinition::new("qty", "Quantity", FieldKind::Number).with_range(None, Some(5.0));
    assert_eq!(
        validate(&max_only, &FieldValue::text("lots")),
        "Quantity cannot be more than 5"
    );
    assert_eq!(
        validate(&max_only, &FieldValue::Unset),
        "Quantity cannot be more than 5"
    );
}

#[test]
fn fractional_bounds_keep_their_decimals() {
    let field =
        FieldDefinition::new("rate", "Rate", FieldKind::Number).with_range(Some(0.5), None);
    assert_eq!(validate(&field, &FieldValue::text("0.25")), "Rate must be at least 0.5");
}

#[test]
fn coercion_is_explicit_and_total() {
    assert_eq!(coerce_number(&FieldValue::text("3")), Coerced::Number(3.0));
    assert_eq!(coerce_number(&FieldValue::text("-1e2")), Coerced::Number(-100.0));
    assert_eq!(coerce_number(&FieldValue::text("")), Coerced::NotANumber);
    assert_eq!(coerce_number(&FieldValue::text("infinity")), Coerced::NotANumber);
    assert_eq!(coerce_number(&FieldValue::Bool(true)), Coerced::Number(1.0));
    assert_eq!(coerce_number(&FieldValue::Unset), Coerced::NotANumber);
}

#[test]
fn pattern_uses_custom_message_verbatim() {
    let field = FieldDefinition::new("phone", "Phone", FieldKind::Tel).with_pattern(
        FieldPattern::new(r"^\(\d{3}\) \d{3}-\d{4}$").expect("pattern"),
        Some("Use the format (123) 456-7890"),
    );
    assert_eq!(
        validate(&field, &FieldValue::text("1234567890")),
        "Use the format (123) 456-7890"
    );
    assert_eq!(validate(&field, &FieldValue::text("(123) 456-7890")), "");
}

#[test]
fn pattern_search_is_unanchored() {
    let field = FieldDefinition::new("code", "Code", FieldKind::Text)
        .with_pattern(FieldPattern::new("[0-9]").expect("pattern"), None);
    assert_eq!(validate(&field, &FieldValue::text("abc1def")), "");
    assert_eq!(validate(&field, &FieldValue::text("abcdef")), "Code is not valid");
}

#[test]
fn first_failing_rule_wins() {
    let field = FieldDefinition::new("pin", "PIN", FieldKind::Text)
        .required()
        .with_length(Some(4), Some(4))
        .with_pattern(FieldPattern::new("^[0-9]+$").expect("pattern"), Some("Digits only"));

    assert_eq!(check(&field, &FieldValue::text("")), Err(RuleFailure::Required));
    assert_eq!(check(&field, &FieldValue::text("ab")), Err(RuleFailure::MinLength(4)));
    assert_eq!(check(&field, &FieldValue::text("abcde")), Err(RuleFailure::MaxLength(4)));
    assert_eq!(check(&field, &FieldValue::text("abcd")), Err(RuleFailure::Pattern));
    assert_eq!(check(&field, &FieldValue::text("1234")), Ok(()));
}

#[test]
fn unrecognized_type_uses_default_rules() {
    let field = FieldDefinition::new("shade", "Shade", FieldKind::Other("color".into()))
        .required()
        .with_length(Some(4), None);
    assert_eq!(validate(&field, &FieldValue::text("")), "Shade is required");
    assert_eq!(
        validate(&field, &FieldValue::text("#ff")),
        "Shade must be at least 4 characters"
    );
    assert_eq!(validate(&field, &FieldValue::text("#ffffff")), "");
}

#[test]
fn validation_is_repeatable() {
    let field = email_field();
    let value = FieldValue::text("abc");
    assert_eq!(validate(&field, &value), validate(&field, &value));
}

#[test]
fn validate_all_covers_every_field_with_defaults() {
    let fields = FieldSet::new(vec![
        email_field(),
        FieldDefinition::new("terms", "Terms", FieldKind::Checkbox).required(),
        FieldDefinition::new("notes", "Notes", FieldKind::Textarea),
    ])
    .expect("fields");

    let mut values = FieldValues::new();
    values.insert("email".into(), FieldValue::text("a@b.com"));
    values.insert("stale".into(), FieldValue::text("left over"));

    let errors = validate_all(&fields, &values);
    assert_eq!(errors.len(), 3);
    assert_eq!(errors.get("email").map(String::as_str), Some(""));
    assert_eq!(errors.get("terms").map(String::as_str), Some("Terms is required"));
    assert_eq!(errors.get("notes").map(String::as_str), Some(""));
    assert!(!errors.contains_key("stale"));
}
