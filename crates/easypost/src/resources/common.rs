//! Types shared by several resources.

use serde::{Deserialize, Serialize};

/// Which environment a resource was created in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Created with a test API key.
    Test,
    /// Created with a production API key.
    Production,
    /// Unknown mode.
    #[serde(other)]
    Unknown,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Test => write!(f, "test"),
            Self::Production => write!(f, "production"),
            Self::Unknown => write!(f, "unknown"),
        }
    }
}

/// A charge applied to a shipment or tracker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fee {
    /// Fee category (`LabelFee`, `PostageFee`, `InsuranceFee`, `TrackerFee`).
    #[serde(rename = "type")]
    pub fee_type: Option<String>,
    /// Amount in USD, as a decimal string.
    pub amount: Option<String>,
    /// Whether the fee has been charged.
    pub charged: Option<bool>,
    /// Whether the fee has been refunded.
    pub refunded: Option<bool>,
}

/// A carrier message attached to a shipment or rate request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Carrier that produced the message.
    pub carrier: Option<String>,
    /// Carrier account the message relates to.
    pub carrier_account_id: Option<String>,
    /// Message category (e.g. `rate_error`).
    #[serde(rename = "type")]
    pub message_type: Option<String>,
    /// Message text.
    pub message: Option<String>,
}

/// Reference to an existing resource by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdRef {
    /// Resource id.
    pub id: String,
}

impl IdRef {
    /// Reference the resource with `id`.
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }
}

impl From<&str> for IdRef {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for IdRef {
    fn from(id: String) -> Self {
        Self { id }
    }
}

/// File format for generated postage labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LabelFormat {
    Png,
    Pdf,
    Zpl,
    Epl2,
}

impl std::fmt::Display for LabelFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Png => write!(f, "PNG"),
            Self::Pdf => write!(f, "PDF"),
            Self::Zpl => write!(f, "ZPL"),
            Self::Epl2 => write!(f, "EPL2"),
        }
    }
}

impl std::str::FromStr for LabelFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "PNG" => Ok(Self::Png),
            "PDF" => Ok(Self::Pdf),
            "ZPL" => Ok(Self::Zpl),
            "EPL2" => Ok(Self::Epl2),
            other => Err(format!("unknown label format: {other}")),
        }
    }
}

/// Decoders for fields the API returns either as JSON numbers or strings.
pub(crate) mod lenient {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub(crate) fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => Ok(n.as_f64()),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => s.trim().parse().map(Some).map_err(D::Error::custom),
            Some(other) => Err(D::Error::custom(format!("expected a number, got {other}"))),
        }
    }

    pub(crate) fn opt_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<Value>::deserialize(deserializer)? {
            None | Some(Value::Null) => Ok(None),
            Some(Value::Number(n)) => n
                .as_i64()
                .or_else(|| n.as_f64().and_then(whole))
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("expected an integer, got {n}"))),
            Some(Value::String(s)) if s.trim().is_empty() => Ok(None),
            Some(Value::String(s)) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(whole))
                    .map(Some)
                    .ok_or_else(|| D::Error::custom(format!("expected an integer, got {s:?}")))
            }
            Some(other) => Err(D::Error::custom(format!("expected an integer, got {other}"))),
        }
    }

    /// Non-negative count where `null` or a missing value means zero.
    pub(crate) fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: Deserializer<'de>,
    {
        match opt_i64(deserializer)? {
            None => Ok(0),
            Some(n) => u32::try_from(n)
                .map_err(|_| D::Error::custom(format!("expected a count, got {n}"))),
        }
    }

    // `2.0` -> 2; fractional or out-of-range values are rejected.
    #[allow(clippy::cast_possible_truncation, clippy::float_cmp)]
    fn whole(f: f64) -> Option<i64> {
        (f.is_finite() && f.fract() == 0.0 && f.abs() < 9.0e15).then(|| f as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Lenient {
        #[serde(default, deserialize_with = "lenient::opt_f64")]
        value: Option<f64>,
        #[serde(default, deserialize_with = "lenient::opt_i64")]
        quantity: Option<i64>,
    }

    #[test]
    fn test_lenient_numbers() {
        let parsed: Lenient = serde_json::from_value(json!({"value": "10.50", "quantity": 2})).unwrap();
        assert_eq!(parsed.value, Some(10.5));
        assert_eq!(parsed.quantity, Some(2));

        let parsed: Lenient = serde_json::from_value(json!({"value": 8, "quantity": "3"})).unwrap();
        assert_eq!(parsed.value, Some(8.0));
        assert_eq!(parsed.quantity, Some(3));

        let parsed: Lenient = serde_json::from_value(json!({"value": null})).unwrap();
        assert_eq!(parsed.value, None);
        assert_eq!(parsed.quantity, None);

        assert!(serde_json::from_value::<Lenient>(json!({"value": "ten"})).is_err());
    }

    #[test]
    fn test_lenient_whole_floats_as_integers() {
        let parsed: Lenient = serde_json::from_value(json!({"quantity": "2.0"})).unwrap();
        assert_eq!(parsed.quantity, Some(2));

        let parsed: Lenient = serde_json::from_value(json!({"quantity": 3.0})).unwrap();
        assert_eq!(parsed.quantity, Some(3));

        assert!(serde_json::from_value::<Lenient>(json!({"quantity": "2.5"})).is_err());
        assert!(serde_json::from_value::<Lenient>(json!({"quantity": 1.5})).is_err());
    }

    #[test]
    fn test_unknown_mode() {
        let mode: Mode = serde_json::from_value(json!("sandbox")).unwrap();
        assert_eq!(mode, Mode::Unknown);
        assert_eq!(Mode::Production.to_string(), "production");
    }

    #[test]
    fn test_label_format_parse() {
        assert_eq!("pdf".parse::<LabelFormat>().unwrap(), LabelFormat::Pdf);
        assert_eq!(serde_json::to_value(LabelFormat::Epl2).unwrap(), json!("EPL2"));
        assert!("gif".parse::<LabelFormat>().is_err());
    }
}
