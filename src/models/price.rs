use serde::{Deserialize, Serialize};

/// Asking price as the backend's decimal text (e.g. `"48000000.00"`).
///
/// The text is kept as received. Display formatting works on the digits
/// directly so the amount never round-trips through a binary float.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(String);

/// Parsed decimal parts of a price
struct DecimalParts<'a> {
    negative: bool,
    whole: &'a str,
    fraction: &'a str,
}

impl Price {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The raw decimal text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the text is a well-formed decimal
    pub fn is_valid(&self) -> bool {
        self.parts().is_some()
    }

    /// Format as whole US dollars with thousands separators (`$1,200,000`).
    ///
    /// Cents are rounded half away from zero. Malformed text is returned
    /// unchanged.
    pub fn display_usd(&self) -> String {
        let Some(parts) = self.parts() else {
            return self.0.clone();
        };

        let mut whole = parts.whole.trim_start_matches('0').to_string();
        if whole.is_empty() {
            whole.push('0');
        }
        if parts.fraction.chars().next().is_some_and(|c| c >= '5') {
            whole = increment_digits(&whole);
        }

        let grouped = group_thousands(&whole);
        if parts.negative && grouped != "0" {
            format!("-${}", grouped)
        } else {
            format!("${}", grouped)
        }
    }

    fn parts(&self) -> Option<DecimalParts<'_>> {
        let text = self.0.trim();
        let (negative, unsigned) = match text.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, text),
        };

        let (whole, fraction) = match unsigned.split_once('.') {
            Some((whole, fraction)) => (whole, fraction),
            None => (unsigned, ""),
        };

        if whole.is_empty() && fraction.is_empty() {
            return None;
        }
        if !whole.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit()) {
            return None;
        }

        Some(DecimalParts { negative, whole, fraction })
    }
}

impl std::fmt::Display for Price {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_usd())
    }
}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// Add one to a string of ASCII digits
fn increment_digits(digits: &str) -> String {
    let mut bytes: Vec<u8> = digits.bytes().collect();
    for byte in bytes.iter_mut().rev() {
        if *byte == b'9' {
            *byte = b'0';
        } else {
            *byte += 1;
            return String::from_utf8_lossy(&bytes).into_owned();
        }
    }
    format!("1{}", String::from_utf8_lossy(&bytes))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_groups_thousands() {
        assert_eq!(Price::new("48000000.00").display_usd(), "$48,000,000");
        assert_eq!(Price::new("1200000.00").display_usd(), "$1,200,000");
        assert_eq!(Price::new("280000.00").display_usd(), "$280,000");
        assert_eq!(Price::new("999").display_usd(), "$999");
    }

    #[test]
    fn test_display_rounds_half_up() {
        assert_eq!(Price::new("1999.50").display_usd(), "$2,000");
        assert_eq!(Price::new("1999.49").display_usd(), "$1,999");
        assert_eq!(Price::new("999999.99").display_usd(), "$1,000,000");
        assert_eq!(Price::new("0.50").display_usd(), "$1");
        assert_eq!(Price::new(".25").display_usd(), "$0");
    }

    #[test]
    fn test_display_keeps_malformed_text() {
        let price = Price::new("call for price");
        assert!(!price.is_valid());
        assert_eq!(price.display_usd(), "call for price");
    }

    #[test]
    fn test_serde_is_transparent() {
        let price: Price = serde_json::from_str("\"250000.00\"").unwrap();
        assert_eq!(price.as_str(), "250000.00");
        assert_eq!(serde_json::to_string(&price).unwrap(), "\"250000.00\"");
    }
}
