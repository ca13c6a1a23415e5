//! Error message formatting for the exchange error taxonomy
//!
//! The service layer shows these messages to users verbatim, so Display output
//! must carry the numbers needed to act on the error.

use types::AmmError;

#[test]
fn test_arithmetic_error_formatting() {
    let error = AmmError::ArithmeticOverflow {
        operation: "swap numerator",
    };
    assert_eq!(error.to_string(), "Arithmetic overflow in swap numerator");

    let debug_output = format!("{:?}", error);
    assert!(debug_output.contains("ArithmeticOverflow"));
    assert!(debug_output.contains("swap numerator"));

    let error = AmmError::ArithmeticUnderflow {
        operation: "amount subtraction",
    };
    assert!(error.to_string().contains("underflow"));
}

#[test]
fn test_insufficient_errors_carry_amounts() {
    let error = AmmError::InsufficientShares {
        requested: 500,
        available: 200,
    };
    let display = error.to_string();
    assert!(display.contains("requested 500"));
    assert!(display.contains("available 200"));

    let error = AmmError::InsufficientTokenAmount {
        required: 1_000,
        provided: 999,
    };
    let display = error.to_string();
    assert!(display.contains("requires 1000"));
    assert!(display.contains("provided 999"));

    let error = AmmError::InsufficientLiquidity {
        requested: 10,
        available: 0,
    };
    assert!(error.to_string().contains("reserve holds 0"));
}

#[test]
fn test_stale_quote_formatting() {
    let error = AmmError::StaleQuote {
        quoted: 90,
        current: 81,
    };
    let display = error.to_string();
    assert!(display.contains("Stale quote"));
    assert!(display.contains("90"));
    assert!(display.contains("81"));
    assert!(error.is_requotable());
    assert!(!AmmError::ZeroShareMint.is_requotable());
}

#[test]
fn test_settlement_failed_helper() {
    let error = AmmError::settlement_failed("insufficient base balance");
    assert_eq!(
        error,
        AmmError::SettlementFailed {
            reason: "insufficient base balance".to_string()
        }
    );
    assert_eq!(
        error.to_string(),
        "Settlement failed: insufficient base balance"
    );
}

#[test]
fn test_invalid_input_formatting() {
    let error = AmmError::InvalidFee {
        numerator: 5,
        denominator: 0,
    };
    assert!(error.to_string().contains("5/0"));

    let error = AmmError::InvalidDecimal {
        input: "1.2.3".to_string(),
    };
    assert!(error.to_string().contains("'1.2.3'"));

    let error = AmmError::InconsistentReserves {
        base: 1,
        token: 0,
        lp_supply: 1,
    };
    let display = error.to_string();
    assert!(display.contains("base 1"));
    assert!(display.contains("token 0"));
}
