pub mod assemble;
pub mod etl;
pub mod evaluate;
pub mod normalize;
pub mod pipeline;
pub mod port_reference;
pub mod product_line;

pub use crate::domain::model::{Email, PortEntry, RawDraft, ShipmentRecord};
pub use crate::domain::ports::{ConfigProvider, ExtractionOracle, Pipeline, Storage};
pub use crate::utils::error::Result;
