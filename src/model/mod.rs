pub mod metric;
pub mod params;
pub mod records;
pub mod site;

pub use metric::Metric;
pub use params::{ConfigError, EnrichmentParams};
pub use records::{EnrichmentRecord, KinaseHit, LabelWeights, SiteAssignment};
pub use site::{RegulationLabel, Site};
