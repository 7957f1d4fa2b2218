use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::layout::page::Rect;

/// Labels for the optional trade attributes, in print order.
pub const DETAIL_LABELS: [&str; 6] = [
    "HS Code",
    "Quantity",
    "Unit",
    "FCL Type",
    "Packaging",
    "Quantity per FCL",
];

/// A product as posted by the catalog form. Request-scoped and never mutated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductRecord {
    pub name: String,
    #[serde(default)]
    pub hs_code: Option<String>,
    #[serde(default)]
    pub quantity: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub fcl_type: Option<String>,
    #[serde(default)]
    pub packaging: Option<String>,
    #[serde(default)]
    pub quantity_per_fcl: Option<String>,
    #[serde(default)]
    pub description: Vec<String>,
    #[serde(default)]
    pub specifications: Vec<String>,
    #[serde(default)]
    pub images: Vec<ImageRef>,
}

impl ProductRecord {
    /// Rejects records that cannot be rendered meaningfully.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::Validation("name cannot be empty".to_string()));
        }
        Ok(())
    }

    /// `(label, value)` pairs for every trade attribute that carries a value.
    pub fn details(&self) -> Vec<(&'static str, &str)> {
        let values = [
            &self.hs_code,
            &self.quantity,
            &self.unit,
            &self.fcl_type,
            &self.packaging,
            &self.quantity_per_fcl,
        ];
        DETAIL_LABELS
            .iter()
            .zip(values)
            .filter_map(|(label, value)| match value.as_deref() {
                Some(v) if !v.is_empty() => Some((*label, v)),
                _ => None,
            })
            .collect()
    }
}

/// An image reference with an optional caller-supplied rectangle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ImageRef {
    pub path: String,
    #[serde(default)]
    pub x: Option<f32>,
    #[serde(default)]
    pub y: Option<f32>,
    #[serde(default)]
    pub w: Option<f32>,
    #[serde(default)]
    pub h: Option<f32>,
}

impl ImageRef {
    #[cfg(test)]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Self::default()
        }
    }

    #[cfg(test)]
    pub fn with_rect(path: impl Into<String>, x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            path: path.into(),
            x: Some(x),
            y: Some(y),
            w: Some(w),
            h: Some(h),
        }
    }

    /// The explicit rectangle, if all four coordinates are present and non-zero.
    /// Width and height must also be positive.
    pub fn explicit_rect(&self) -> Option<Rect> {
        let (x, y, w, h) = (self.x?, self.y?, self.w?, self.h?);
        let all_set = [x, y, w, h].iter().all(|v| v.is_finite() && *v != 0.0);
        if all_set && w > 0.0 && h > 0.0 {
            Some(Rect::new(x, y, w, h))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_minimal_record() {
        let record: ProductRecord = serde_json::from_str(r#"{"name": "Zinc Oxide"}"#).unwrap();
        assert_eq!(record.name, "Zinc Oxide");
        assert!(record.hs_code.is_none());
        assert!(record.description.is_empty());
        assert!(record.images.is_empty());
    }

    #[test]
    fn test_deserialize_missing_name_fails() {
        let result = serde_json::from_str::<ProductRecord>(r#"{"hs_code": "28170010"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_blank_name() {
        let record = ProductRecord {
            name: "   ".to_string(),
            ..Default::default()
        };
        assert!(matches!(record.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_details_skip_empty_and_missing_values() {
        let record = ProductRecord {
            name: "Raw Sugar".to_string(),
            hs_code: Some("170114".to_string()),
            quantity: Some(String::new()),
            packaging: Some("50 kg PP bags".to_string()),
            ..Default::default()
        };
        assert_eq!(
            record.details(),
            vec![("HS Code", "170114"), ("Packaging", "50 kg PP bags")]
        );
    }

    #[test]
    fn test_details_keep_label_order() {
        let record = ProductRecord {
            name: "x".to_string(),
            quantity_per_fcl: Some("25 MT".to_string()),
            hs_code: Some("1".to_string()),
            unit: Some("MT".to_string()),
            ..Default::default()
        };
        let labels: Vec<&str> = record.details().iter().map(|(l, _)| *l).collect();
        assert_eq!(labels, vec!["HS Code", "Unit", "Quantity per FCL"]);
    }

    #[test]
    fn test_explicit_rect_requires_all_four_non_zero() {
        assert!(ImageRef::with_rect("a.png", 10.0, 20.0, 30.0, 40.0)
            .explicit_rect()
            .is_some());
        assert!(ImageRef::with_rect("a.png", 0.0, 20.0, 30.0, 40.0)
            .explicit_rect()
            .is_none());
        let partial = ImageRef {
            path: "a.png".to_string(),
            x: Some(1.0),
            y: Some(1.0),
            w: Some(1.0),
            h: None,
        };
        assert!(partial.explicit_rect().is_none());
    }

    #[test]
    fn test_explicit_rect_rejects_negative_size() {
        assert!(ImageRef::with_rect("a.png", 10.0, 20.0, -30.0, 40.0)
            .explicit_rect()
            .is_none());
    }
}
