pub mod delimited;

pub use delimited::{read_labeled_delimited, write_predictions, DelimitedReaderConfig};
