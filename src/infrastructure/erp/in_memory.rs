//! In-memory ERP simulator
//!
//! Partner lookup is a case-insensitive prefix match on the company name,
//! mirroring how the live system matches leads to business partners.

use async_trait::async_trait;
use chrono::{Duration, Utc};

use crate::domain::erp::{EnrichmentSource, PartnerRecord, SalesOrder};
use crate::domain::DomainError;

/// In-memory enrichment source seeded with demo partners
#[derive(Debug, Default)]
pub struct InMemoryErp {
    partners: Vec<PartnerRecord>,
    orders: Vec<SalesOrder>,
}

impl InMemoryErp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_demo_data() -> Self {
        let now = Utc::now();
        Self {
            partners: vec![
                PartnerRecord::new("BP-1000", "Globex Manufacturing")
                    .with_credit_rating("A+")
                    .with_account_status("Active")
                    .with_payment_terms("NET30"),
                PartnerRecord::new("BP-1001", "Initech Retail")
                    .with_credit_rating("B")
                    .with_account_status("Active"),
            ],
            orders: vec![
                SalesOrder::new("SO-5001", "BP-1000", 850_000.0, now - Duration::days(42)),
                SalesOrder::new("SO-5002", "BP-1000", 420_000.0, now - Duration::days(150)),
                SalesOrder::new("SO-5003", "BP-1000", 1_100_000.0, now - Duration::days(400)),
                SalesOrder::new("SO-5004", "BP-1001", 35_000.0, now - Duration::days(90))
                    .with_open(true),
            ],
        }
    }

    pub fn with_partner(mut self, partner: PartnerRecord) -> Self {
        self.partners.push(partner);
        self
    }

    pub fn with_order(mut self, order: SalesOrder) -> Self {
        self.orders.push(order);
        self
    }
}

#[async_trait]
impl EnrichmentSource for InMemoryErp {
    async fn lookup_partner(&self, company: &str) -> Result<Option<PartnerRecord>, DomainError> {
        if company.trim().is_empty() {
            return Ok(None);
        }

        let needle = company.trim().to_lowercase();
        Ok(self
            .partners
            .iter()
            .find(|p| {
                let name = p.name.to_lowercase();
                name.starts_with(&needle) || needle.starts_with(&name)
            })
            .cloned())
    }

    async fn list_orders(
        &self,
        partner_id: &str,
        limit: usize,
    ) -> Result<Vec<SalesOrder>, DomainError> {
        let mut orders: Vec<SalesOrder> = self
            .orders
            .iter()
            .filter(|o| o.partner_id == partner_id)
            .cloned()
            .collect();

        orders.sort_by(|a, b| b.ordered_at.cmp(&a.ordered_at));
        orders.truncate(limit);
        Ok(orders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_lookup_matches_company_prefix() {
        let erp = InMemoryErp::with_demo_data();

        let partner = erp.lookup_partner("Globex").await.unwrap();
        assert_eq!(partner.unwrap().id, "BP-1000");

        let partner = erp.lookup_partner("globex manufacturing gmbh").await.unwrap();
        assert_eq!(partner.unwrap().id, "BP-1000");
    }

    #[tokio::test]
    async fn test_unknown_company_is_none() {
        let erp = InMemoryErp::with_demo_data();
        assert!(erp.lookup_partner("Unknown Corp").await.unwrap().is_none());
        assert!(erp.lookup_partner("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_orders_most_recent_first() {
        let erp = InMemoryErp::with_demo_data();

        let orders = erp.list_orders("BP-1000", 10).await.unwrap();
        assert_eq!(orders.len(), 3);
        assert!(orders[0].ordered_at > orders[1].ordered_at);
        assert!(orders[1].ordered_at > orders[2].ordered_at);

        let limited = erp.list_orders("BP-1000", 2).await.unwrap();
        assert_eq!(limited.len(), 2);
    }
}
