pub mod fdr;
pub mod fisher;

pub use fdr::benjamini_hochberg;
pub use fisher::{FisherGreater, Table2x2, fisher_exact_greater};
