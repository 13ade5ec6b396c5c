//! Property input records and loading

mod data;
pub mod loader;

pub use data::{NormalizedRates, PropertyInputs, MAX_HOLDING_YEARS};
pub use loader::{load_properties, load_properties_from_reader, load_property_json};
