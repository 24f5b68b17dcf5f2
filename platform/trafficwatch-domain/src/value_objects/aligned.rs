use serde::{Deserialize, Serialize};

/// One position of an hour-of-day window, split around the center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SplitPoint {
    pub key: i64,
    pub label: String,
    pub history: Option<f64>,
    pub prediction: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CyclicAlignment {
    pub points: Vec<SplitPoint>,
    pub center_index: usize,
}

impl CyclicAlignment {
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    pub fn history(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.history).collect()
    }

    pub fn prediction(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.prediction).collect()
    }

    pub fn center(&self) -> Option<&SplitPoint> {
        self.points.get(self.center_index)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlignedPoint {
    pub key: i64,
    pub label: String,
    pub value: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequentialAlignment {
    pub points: Vec<AlignedPoint>,
    pub center_index: usize,
}

impl SequentialAlignment {
    pub fn labels(&self) -> Vec<String> {
        self.points.iter().map(|p| p.label.clone()).collect()
    }

    pub fn values(&self) -> Vec<Option<f64>> {
        self.points.iter().map(|p| p.value).collect()
    }

    pub fn center(&self) -> Option<&AlignedPoint> {
        self.points.get(self.center_index)
    }
}
