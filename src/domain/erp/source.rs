//! Enrichment source boundary trait

use async_trait::async_trait;
use std::fmt::Debug;

use super::{PartnerRecord, SalesOrder};
use crate::domain::DomainError;

/// Boundary to the ERP system supplying account enrichment.
///
/// An unmatched company resolves to `Ok(None)`, not an error; only transport
/// or authentication problems surface as `DomainError::Collaborator`.
#[async_trait]
pub trait EnrichmentSource: Send + Sync + Debug {
    /// Look up a business partner by company name
    async fn lookup_partner(&self, company: &str) -> Result<Option<PartnerRecord>, DomainError>;

    /// List sales orders for a partner, most recent first
    async fn list_orders(
        &self,
        partner_id: &str,
        limit: usize,
    ) -> Result<Vec<SalesOrder>, DomainError>;
}
