use serde::Deserialize;

use crate::error::{Error, Result};

/// Index-aligned data-space coordinates.
///
/// Invariant: `xs.len() == ys.len()` and every value is finite.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawDataset")]
pub struct PointDataset {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

#[derive(Deserialize)]
struct RawDataset {
    x: Vec<f64>,
    y: Vec<f64>,
}

impl TryFrom<RawDataset> for PointDataset {
    type Error = Error;

    fn try_from(raw: RawDataset) -> Result<Self> {
        PointDataset::new(raw.x, raw.y)
    }
}

impl PointDataset {
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> Result<Self> {
        if xs.len() != ys.len() {
            return Err(Error::DataShape {
                what: "y",
                expected: xs.len(),
                found: ys.len(),
            });
        }
        if let Some(index) = xs.iter().position(|v| !v.is_finite()) {
            return Err(Error::NonFiniteCoordinate { axis: 'x', index });
        }
        if let Some(index) = ys.iter().position(|v| !v.is_finite()) {
            return Err(Error::NonFiniteCoordinate { axis: 'y', index });
        }
        Ok(Self { xs, ys })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.xs.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    #[inline]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    #[inline]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_aligned_finite_coordinates() {
        let d = PointDataset::new(vec![0.0, 1.0], vec![2.0, 3.0]).unwrap();
        assert_eq!(d.len(), 2);
        assert_eq!(d.ys(), &[2.0, 3.0]);
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = PointDataset::new(vec![0.0, 1.0, 2.0], vec![0.0]).unwrap_err();
        assert_eq!(err, Error::DataShape { what: "y", expected: 3, found: 1 });
    }

    #[test]
    fn rejects_nan_and_infinity() {
        let err = PointDataset::new(vec![0.0, f64::NAN], vec![0.0, 0.0]).unwrap_err();
        assert_eq!(err, Error::NonFiniteCoordinate { axis: 'x', index: 1 });

        let err = PointDataset::new(vec![0.0], vec![f64::INFINITY]).unwrap_err();
        assert_eq!(err, Error::NonFiniteCoordinate { axis: 'y', index: 0 });
    }

    #[test]
    fn empty_dataset_is_valid() {
        assert!(PointDataset::new(Vec::new(), Vec::new()).unwrap().is_empty());
    }

    #[test]
    fn deserializes_with_validation() {
        let d: PointDataset = serde_json::from_str(r#"{"x":[1,2],"y":[3,4]}"#).unwrap();
        assert_eq!(d.xs(), &[1.0, 2.0]);

        let bad = serde_json::from_str::<PointDataset>(r#"{"x":[1,2],"y":[3]}"#);
        assert!(bad.is_err());
    }
}
