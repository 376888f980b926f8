//! Market snapshot: the single input document of an analysis run.
//!
//! Snapshots are JSON with curves keyed by tenor strings:
//!
//! ```json
//! {
//!   "bond": { "price": 94.5, "coupon": 0.052, "years_to_maturity": 7.0, "recovery_rate": 0.4 },
//!   "cds_curve": { "1": 80.0, "5": 140.0 },
//!   "treasury_curve": { "0.25": 0.0495, "10": 0.0425 }
//! }
//! ```
//!
//! `face_value` defaults to 100 and `frequency` to 2.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use basis_curves::interpolation::{ExtrapolationMethod, InterpolationMethod};
use basis_curves::rate_curve::RateCurve;
use basis_curves::spread_curve::SpreadCurve;

use crate::bond::BondSpec;
use crate::error::{AnalyticsError, AnalyticsResult};

fn default_face_value() -> f64 {
    100.0
}

fn default_frequency() -> u32 {
    2
}

/// Bond terms and market price as quoted in a snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BondQuote {
    /// Market price per `face_value`.
    pub price: f64,
    /// Annual coupon rate as a decimal.
    pub coupon: f64,
    /// Years to maturity.
    pub years_to_maturity: f64,
    /// Assumed recovery as a fraction of face.
    pub recovery_rate: f64,
    /// Face value.
    #[serde(default = "default_face_value")]
    pub face_value: f64,
    /// Coupons per year.
    #[serde(default = "default_frequency")]
    pub frequency: u32,
}

impl BondQuote {
    /// Validated bond terms.
    pub fn spec(&self) -> AnalyticsResult<BondSpec> {
        BondSpec::new(
            self.coupon,
            self.years_to_maturity,
            self.frequency,
            self.face_value,
            self.recovery_rate,
        )
    }
}

/// Descriptive information about where a snapshot came from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotMetadata {
    /// Issuer ticker.
    pub ticker: String,
    /// Human-readable bond description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Data source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Time the quotes were taken.
    pub as_of: DateTime<Utc>,
}

/// A bond quote with the default-swap and risk-free curves to price it on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSnapshot {
    /// The bond under analysis.
    pub bond: BondQuote,
    /// Default-swap spreads in bps by tenor.
    #[serde(with = "tenor_map")]
    pub cds_curve: Vec<(f64, f64)>,
    /// Risk-free zero rates (decimal) by tenor.
    #[serde(with = "tenor_map")]
    pub treasury_curve: Vec<(f64, f64)>,
    /// Optional provenance.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<SnapshotMetadata>,
}

impl MarketSnapshot {
    /// Built-in sample: an investment-grade 7y bond trading below par.
    pub fn demo() -> Self {
        Self {
            bond: BondQuote {
                price: 94.50,
                coupon: 0.052,
                years_to_maturity: 7.0,
                recovery_rate: 0.40,
                face_value: 100.0,
                frequency: 2,
            },
            cds_curve: vec![
                (1.0, 80.0),
                (3.0, 110.0),
                (5.0, 140.0),
                (7.0, 160.0),
                (10.0, 180.0),
            ],
            treasury_curve: vec![
                (0.25, 0.0495),
                (0.5, 0.0490),
                (1.0, 0.0480),
                (2.0, 0.0460),
                (5.0, 0.0440),
                (10.0, 0.0425),
                (30.0, 0.0450),
            ],
            metadata: Some(SnapshotMetadata {
                ticker: "INTC".to_string(),
                description: Some("INTC 5.200% 02/10/2033".to_string()),
                source: Some("demo".to_string()),
                as_of: DateTime::from_timestamp(1_768_510_800, 0).unwrap_or_default(),
            }),
        }
    }

    /// Parses a snapshot from JSON without validating it.
    pub fn from_json(json: &str) -> AnalyticsResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Renders the snapshot as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> AnalyticsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks every number in the snapshot.
    ///
    /// Price must be positive; bond terms as in [`BondSpec::new`]; both curves
    /// non-empty with positive tenors and finite values; spreads positive.
    pub fn validate(&self) -> AnalyticsResult<()> {
        let price = self.bond.price;
        if !price.is_finite() || price <= 0.0 {
            return Err(AnalyticsError::validation(format!(
                "bond price must be positive, got {price}"
            )));
        }
        self.bond.spec()?;

        if self.cds_curve.is_empty() {
            return Err(AnalyticsError::validation("CDS curve is empty"));
        }
        if self.treasury_curve.is_empty() {
            return Err(AnalyticsError::validation("treasury curve is empty"));
        }
        for &(tenor, spread) in &self.cds_curve {
            if !spread.is_finite() || spread <= 0.0 {
                return Err(AnalyticsError::validation(format!(
                    "CDS spread at {tenor}y must be positive, got {spread}"
                )));
            }
        }
        for &(tenor, value) in self.cds_curve.iter().chain(&self.treasury_curve) {
            if !tenor.is_finite() || tenor <= 0.0 || !value.is_finite() {
                return Err(AnalyticsError::validation(format!(
                    "curve point ({tenor}, {value}) is not a positive tenor with a finite value"
                )));
            }
        }
        Ok(())
    }

    /// Builds the risk-free curve with the given policies.
    pub fn treasury(
        &self,
        interpolation: InterpolationMethod,
        extrapolation: ExtrapolationMethod,
    ) -> AnalyticsResult<RateCurve> {
        Ok(RateCurve::with_methods(
            self.treasury_curve.iter().copied(),
            interpolation,
            extrapolation,
        )?)
    }

    /// Builds the default-swap spread curve.
    pub fn cds(&self) -> AnalyticsResult<SpreadCurve> {
        Ok(SpreadCurve::new(self.cds_curve.iter().copied())?)
    }

    /// Ticker from the metadata, if any.
    pub fn ticker(&self) -> Option<&str> {
        self.metadata.as_ref().map(|m| m.ticker.as_str())
    }
}

/// (De)serializes `Vec<(tenor, value)>` as a JSON object keyed by tenor.
mod tenor_map {
    use std::fmt;

    use serde::de::{self, MapAccess, Visitor};
    use serde::ser::SerializeMap;
    use serde::{Deserializer, Serializer};

    pub(super) fn serialize<S>(points: &[(f64, f64)], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(points.len()))?;
        for (tenor, value) in points {
            map.serialize_entry(&tenor.to_string(), value)?;
        }
        map.end()
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Vec<(f64, f64)>, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(TenorMapVisitor)
    }

    struct TenorMapVisitor;

    impl<'de> Visitor<'de> for TenorMapVisitor {
        type Value = Vec<(f64, f64)>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("an object mapping tenor strings to numbers")
        }

        fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut points = Vec::with_capacity(access.size_hint().unwrap_or(0));
            while let Some((key, value)) = access.next_entry::<String, f64>()? {
                let tenor: f64 = key
                    .trim()
                    .parse()
                    .map_err(|_| de::Error::custom(format!("invalid tenor key '{key}'")))?;
                points.push((tenor, value));
            }
            points.sort_by(|a, b| a.0.total_cmp(&b.0));
            Ok(points)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "bond": { "price": 94.5, "coupon": 0.052, "years_to_maturity": 7, "recovery_rate": 0.4 },
        "cds_curve": { "10": 180, "1": 80, "3": 110 },
        "treasury_curve": { "0.25": 0.0495, "10": 0.0425 }
    }"#;

    #[test]
    fn test_defaults_and_key_parsing() {
        let snapshot = MarketSnapshot::from_json(MINIMAL).unwrap();
        assert_eq!(snapshot.bond.face_value, 100.0);
        assert_eq!(snapshot.bond.frequency, 2);
        assert_eq!(snapshot.cds_curve, vec![(1.0, 80.0), (3.0, 110.0), (10.0, 180.0)]);
        assert_eq!(snapshot.treasury_curve[0], (0.25, 0.0495));
        assert!(snapshot.metadata.is_none());
        snapshot.validate().unwrap();
    }

    #[test]
    fn test_demo_round_trip() {
        let demo = MarketSnapshot::demo();
        demo.validate().unwrap();
        let json = demo.to_json_pretty().unwrap();
        assert!(json.contains("\"0.25\": 0.0495"));
        assert_eq!(MarketSnapshot::from_json(&json).unwrap(), demo);
        assert_eq!(demo.ticker(), Some("INTC"));
    }

    #[test]
    fn test_missing_key_is_snapshot_error() {
        let json = r#"{ "bond": { "price": 94.5, "coupon": 0.05, "years_to_maturity": 7, "recovery_rate": 0.4 },
                        "cds_curve": { "1": 80 } }"#;
        let err = MarketSnapshot::from_json(json).unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidSnapshot(_)));
        assert!(err.to_string().contains("treasury_curve"));
    }

    #[test]
    fn test_bad_tenor_key() {
        let json = MINIMAL.replace("\"10\": 180", "\"ten\": 180");
        assert!(MarketSnapshot::from_json(&json).is_err());
    }

    #[test]
    fn test_validation_failures() {
        let mut s = MarketSnapshot::demo();
        s.bond.recovery_rate = 1.5;
        assert!(s.validate().unwrap_err().is_validation());

        let mut s = MarketSnapshot::demo();
        s.bond.price = 0.0;
        assert!(s.validate().is_err());

        let mut s = MarketSnapshot::demo();
        s.cds_curve.clear();
        assert!(s.validate().is_err());

        let mut s = MarketSnapshot::demo();
        s.cds_curve[2].1 = -5.0;
        assert!(s.validate().is_err());

        let mut s = MarketSnapshot::demo();
        s.treasury_curve[0].0 = 0.0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_curve_builders() {
        let s = MarketSnapshot::demo();
        let treasury = s.treasury(InterpolationMethod::Linear, ExtrapolationMethod::Flat).unwrap();
        assert_eq!(treasury.tenors().len(), 7);
        assert_eq!(s.cds().unwrap().spread_bps(7.0), Some(160.0));
    }
}
