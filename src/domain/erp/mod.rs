//! ERP enrichment boundary

mod entity;
mod source;

pub use entity::{ErpOrderContext, PartnerRecord, SalesOrder};
pub use source::EnrichmentSource;

#[cfg(test)]
pub use source::mock::MockEnrichmentSource;
