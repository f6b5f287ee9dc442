use thiserror::Error;

#[derive(Debug, Error)]
pub enum WashbayError {
    #[error("Config error: {0}")]
    Config(String),

    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Bay {bay} does not exist (this site has {bays} bays)")]
    UnknownBay { bay: u8, bays: u8 },

    #[error("Invalid amount: {0:?}")]
    InvalidAmount(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Parses a money amount typed into a form field.
///
/// Accepts surrounding whitespace; rejects blanks, NaN, infinities and
/// negative values.
pub fn parse_amount(raw: &str) -> Result<f64, WashbayError> {
    let trimmed = raw.trim();
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
        _ => Err(WashbayError::InvalidAmount(raw.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_amount_accepts_plain_numbers() {
        assert_eq!(parse_amount("40").unwrap(), 40.0);
        assert_eq!(parse_amount(" 12.5 ").unwrap(), 12.5);
        assert_eq!(parse_amount("0").unwrap(), 0.0);
    }

    #[test]
    fn parse_amount_rejects_garbage() {
        assert!(parse_amount("").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("-3").is_err());
        assert!(parse_amount("NaN").is_err());
        assert!(parse_amount("inf").is_err());
    }

    #[test]
    fn error_display() {
        let err = WashbayError::UnknownBay { bay: 9, bays: 5 };
        assert_eq!(err.to_string(), "Bay 9 does not exist (this site has 5 bays)");

        let err = WashbayError::CustomerNotFound("c9".into());
        assert_eq!(err.to_string(), "Customer not found: c9");

        let err = WashbayError::InvalidAmount("x".into());
        assert_eq!(err.to_string(), "Invalid amount: \"x\"");
    }
}
