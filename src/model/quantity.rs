//! Kubernetes memory quantity parsing, normalized to megabytes.

use thiserror::Error;

/// Why a memory quantity could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantityError {
    #[error("unrecognized memory unit in `{0}`")]
    UnknownUnit(String),
    #[error("invalid number in memory quantity `{0}`")]
    InvalidNumber(String),
}

/// Parse a memory quantity into MB-equivalent units.
///
/// Accepted forms: bare number (MB), `<n>M`, `<n>Mi`, `<n>Gi` (×1024).
/// Fractional values are truncated after scaling.
pub fn parse_memory_mb(raw: &str) -> Result<u64, QuantityError> {
    let s = raw.trim();

    // Suffix order matters: "Mi" must be tried before "M".
    let (number, scale) = if let Some(n) = s.strip_suffix("Gi") {
        (n, 1024.0)
    } else if let Some(n) = s.strip_suffix("Mi") {
        (n, 1.0)
    } else if let Some(n) = s.strip_suffix('M') {
        (n, 1.0)
    } else if s.chars().next().is_some_and(|c| c.is_ascii_digit() || c == '.')
        && s.chars().all(|c| c.is_ascii_digit() || c == '.')
    {
        (s, 1.0)
    } else {
        return Err(QuantityError::UnknownUnit(raw.to_string()));
    };

    let value: f64 = number
        .trim()
        .parse()
        .map_err(|_| QuantityError::InvalidNumber(raw.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(QuantityError::InvalidNumber(raw.to_string()));
    }
    Ok((value * scale) as u64)
}

/// Parse a memory quantity, degrading to 0 on error.
///
/// Used by the resource-limit check, which treats an unparseable quantity as a
/// local anomaly rather than a failure of the run.
pub fn memory_mb_lenient(raw: &str) -> u64 {
    match parse_memory_mb(raw) {
        Ok(mb) => mb,
        Err(e) => {
            log::warn!("{e}; treating as 0");
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gibibytes() {
        assert_eq!(parse_memory_mb("2Gi"), Ok(2048));
        assert_eq!(parse_memory_mb("1.5Gi"), Ok(1536));
    }

    #[test]
    fn mebibytes_and_megabytes() {
        assert_eq!(parse_memory_mb("512Mi"), Ok(512));
        assert_eq!(parse_memory_mb("1024M"), Ok(1024));
    }

    #[test]
    fn bare_number_is_mb() {
        assert_eq!(parse_memory_mb("256"), Ok(256));
        assert_eq!(parse_memory_mb("  300 "), Ok(300));
    }

    #[test]
    fn unknown_unit_is_error() {
        assert_eq!(
            parse_memory_mb("2TB"),
            Err(QuantityError::UnknownUnit("2TB".into()))
        );
        assert!(parse_memory_mb("varies").is_err());
        assert!(parse_memory_mb("").is_err());
    }

    #[test]
    fn garbage_number_is_error() {
        assert_eq!(
            parse_memory_mb("abcMi"),
            Err(QuantityError::InvalidNumber("abcMi".into()))
        );
        assert!(parse_memory_mb("-5Mi").is_err());
    }

    #[test]
    fn lenient_falls_back_to_zero() {
        assert_eq!(memory_mb_lenient("2TB"), 0);
        assert_eq!(memory_mb_lenient("varies"), 0);
        assert_eq!(memory_mb_lenient("2Gi"), 2048);
    }
}
