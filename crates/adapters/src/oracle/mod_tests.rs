use super::*;

#[test]
fn oracle_option_equality_is_by_value_and_label() {
    let a = OracleOption { value: "yes".to_string(), label: "Yes".to_string() };
    let b = OracleOption { value: "yes".to_string(), label: "Yes".to_string() };
    assert_eq!(a, b);
}
