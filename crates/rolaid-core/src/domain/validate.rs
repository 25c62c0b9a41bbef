//! Hex validators for `0x`-prefixed fields.

use super::errors::{FieldFault, PerformerError};

/// `0x` + 64 hex digits (bytes32).
pub const BYTES32_HEX_LEN: usize = 66;

const HEX_PREFIX: &str = "0x";

/// Checks that `value` is present, `0x`-prefixed and, when `expected_len > 0`,
/// exactly `expected_len` chars long (prefix included).
///
/// The body is not inspected here; use [`require_bytes32`] when the digits
/// themselves must be hex as well.
pub fn require_hex(
    field: &'static str,
    value: &str,
    expected_len: usize,
) -> Result<(), PerformerError> {
    if value.is_empty() {
        return Err(PerformerError::invalid_field(field, FieldFault::Missing));
    }
    if !value.starts_with(HEX_PREFIX) {
        return Err(PerformerError::invalid_field(field, FieldFault::MissingPrefix));
    }
    if expected_len > 0 && value.len() != expected_len {
        return Err(PerformerError::invalid_field(
            field,
            FieldFault::Length {
                expected: expected_len,
                actual: value.len(),
            },
        ));
    }
    Ok(())
}

/// `require_hex(field, value, 66)` plus a digit check on the 64-char body.
pub fn require_bytes32(field: &'static str, value: &str) -> Result<(), PerformerError> {
    require_hex(field, value, BYTES32_HEX_LEN)?;
    let body = &value[HEX_PREFIX.len()..];
    if let Some(bad) = body.chars().find(|c| !c.is_ascii_hexdigit()) {
        return Err(PerformerError::invalid_field(
            field,
            FieldFault::InvalidHex(format!("invalid character {bad:?}")),
        ));
    }
    Ok(())
}

/// Strips an optional `0x` prefix and decodes the rest.
pub fn decode_hex_bytes(s: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits = s.strip_prefix(HEX_PREFIX).unwrap_or(s);
    hex::decode(digits)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn bytes32(byte: &str) -> String {
        format!("0x{}", byte.repeat(32))
    }

    #[test]
    fn bytes32_value_passes() {
        let v = bytes32("ab");
        assert_eq!(v.len(), BYTES32_HEX_LEN);
        require_hex("pool_id", &v, BYTES32_HEX_LEN).unwrap();
        require_bytes32("pool_id", &v).unwrap();
    }

    #[rstest]
    #[case::empty("", FieldFault::Missing)]
    #[case::no_prefix("11", FieldFault::MissingPrefix)]
    #[case::upper_prefix("0X11", FieldFault::MissingPrefix)]
    #[case::too_short("0x11", FieldFault::Length { expected: 66, actual: 4 })]
    fn malformed_values_fail(#[case] value: &str, #[case] fault: FieldFault) {
        let err = require_hex("oracle_update_id", value, BYTES32_HEX_LEN).unwrap_err();
        assert!(matches!(
            err,
            PerformerError::InvalidField { field: "oracle_update_id", fault: ref f } if *f == fault
        ));
    }

    #[test]
    fn truncated_bytes32_reports_length() {
        // 0x + 62 digits = 64 chars
        let v = format!("0x{}", "11".repeat(31));
        let err = require_bytes32("pool_id", &v).unwrap_err();
        assert_eq!(
            err.to_string(),
            "pool_id length must be 66 chars incl 0x (got 64)"
        );
    }

    #[test]
    fn zero_expected_len_skips_length_check() {
        require_hex("settlement_data", "0x", 0).unwrap();
        require_hex("settlement_data", "0xdeadbeef", 0).unwrap();
    }

    #[test]
    fn non_hex_digits_fail_bytes32() {
        let v = format!("0x{}", "zz".repeat(32));
        // 長さと prefix だけなら通る
        require_hex("app_id", &v, BYTES32_HEX_LEN).unwrap();
        let err = require_bytes32("app_id", &v).unwrap_err();
        assert!(matches!(
            err,
            PerformerError::InvalidField {
                field: "app_id",
                fault: FieldFault::InvalidHex(_)
            }
        ));
    }

    #[rstest]
    #[case::prefixed("0xdead", vec![0xde, 0xad])]
    #[case::bare("dead", vec![0xde, 0xad])]
    #[case::empty_prefixed("0x", vec![])]
    #[case::empty("", vec![])]
    fn decode_accepts_optional_prefix(#[case] input: &str, #[case] expected: Vec<u8>) {
        assert_eq!(decode_hex_bytes(input).unwrap(), expected);
    }

    #[rstest]
    #[case::odd_digits("0xabc")]
    #[case::non_hex("0xzz")]
    #[case::double_prefix("0x0xab")]
    fn decode_rejects_bad_hex(#[case] input: &str) {
        assert!(decode_hex_bytes(input).is_err());
    }
}
