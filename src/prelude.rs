pub use crate::data_structs::{
    AggregateResult,
    AggregateSummary,
    DataQualityWarning,
    DensityGrid,
    RowKey,
    StudyCurve,
    StudyMeasurement,
};
pub use crate::error::{
    PdfError,
    PdfResult,
};
pub use crate::io::{
    read_measurements,
    read_measurements_from_path,
    write_summaries,
    ExportTable,
};
pub use crate::tools::pdf::{
    aggregate,
    PdfAggregator,
    PdfConfig,
};
pub use crate::utils::{
    chi_squared,
    chi_squared_test,
    gaussian,
};
