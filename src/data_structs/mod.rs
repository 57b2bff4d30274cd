mod grid;
mod measurement;
mod result;

pub use grid::DensityGrid;
pub use measurement::{
    DataQualityWarning,
    RowKey,
    StudyMeasurement,
};
pub use result::{
    AggregateResult,
    AggregateSummary,
    StudyCurve,
};
