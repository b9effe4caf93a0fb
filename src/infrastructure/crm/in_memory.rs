//! In-memory CRM simulator
//!
//! Default record source for demos and tests: seeded with a handful of
//! representative leads and cases, applies mutations to its own store so a
//! full pipeline run behaves like the real system.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::crm::{FieldUpdates, RecordSource};
use crate::domain::lead::LeadRecord;
use crate::domain::ticket::TicketRecord;
use crate::domain::DomainError;

#[derive(Debug, Default)]
struct Store {
    leads: Vec<LeadRecord>,
    cases: Vec<TicketRecord>,
    field_updates: HashMap<String, FieldUpdates>,
    owners: HashMap<String, String>,
    tasks: Vec<(String, String)>,
    comments: Vec<(String, String)>,
}

/// In-memory record source
#[derive(Debug, Default)]
pub struct InMemoryCrm {
    store: Mutex<Store>,
}

impl InMemoryCrm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulator seeded with demo records
    pub fn with_demo_data() -> Self {
        let crm = Self::new();
        {
            let mut store = crm.store.lock().unwrap();
            store.leads = demo_leads();
            store.cases = demo_cases();
        }
        crm
    }

    pub fn with_lead(self, lead: LeadRecord) -> Self {
        self.store.lock().unwrap().leads.push(lead);
        self
    }

    pub fn with_case(self, case: TicketRecord) -> Self {
        self.store.lock().unwrap().cases.push(case);
        self
    }

    /// Owner assigned to a record, if any (inspection helper)
    pub fn owner_of(&self, id: &str) -> Option<String> {
        self.store.lock().unwrap().owners.get(id).cloned()
    }

    /// Field updates applied to a record (inspection helper)
    pub fn updates_for(&self, id: &str) -> FieldUpdates {
        self.store
            .lock()
            .unwrap()
            .field_updates
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    /// Comments posted on a record (inspection helper)
    pub fn comments_on(&self, id: &str) -> Vec<String> {
        self.store
            .lock()
            .unwrap()
            .comments
            .iter()
            .filter(|(record, _)| record == id)
            .map(|(_, text)| text.clone())
            .collect()
    }

    fn known_record(&self, id: &str) -> bool {
        let store = self.store.lock().unwrap();
        store.leads.iter().any(|l| l.id == id) || store.cases.iter().any(|c| c.id == id)
    }
}

#[async_trait]
impl RecordSource for InMemoryCrm {
    async fn fetch_new_leads(&self, limit: usize) -> Result<Vec<LeadRecord>, DomainError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .leads
            .iter()
            .filter(|lead| !store.owners.contains_key(&lead.id))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn fetch_lead(&self, id: &str) -> Result<Option<LeadRecord>, DomainError> {
        let store = self.store.lock().unwrap();
        Ok(store.leads.iter().find(|l| l.id == id).cloned())
    }

    async fn fetch_new_cases(&self, limit: usize) -> Result<Vec<TicketRecord>, DomainError> {
        let store = self.store.lock().unwrap();
        Ok(store
            .cases
            .iter()
            .filter(|case| case.status.as_deref() != Some("Closed"))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn fetch_case(&self, id: &str) -> Result<Option<TicketRecord>, DomainError> {
        let store = self.store.lock().unwrap();
        Ok(store.cases.iter().find(|c| c.id == id).cloned())
    }

    async fn update_fields(&self, id: &str, fields: FieldUpdates) -> Result<(), DomainError> {
        if !self.known_record(id) {
            return Err(DomainError::not_found(format!("record '{id}' not found")));
        }

        let mut store = self.store.lock().unwrap();

        if let Some(status) = fields.get("status").and_then(|v| v.as_str()) {
            if let Some(lead) = store.leads.iter_mut().find(|l| l.id == id) {
                lead.status = Some(status.to_string());
            }
            if let Some(case) = store.cases.iter_mut().find(|c| c.id == id) {
                case.status = Some(status.to_string());
            }
        }
        if let Some(priority) = fields.get("priority").and_then(|v| v.as_str()) {
            if let Some(case) = store.cases.iter_mut().find(|c| c.id == id) {
                case.priority = Some(priority.to_string());
            }
        }

        store.field_updates.entry(id.to_string()).or_default().extend(fields);
        Ok(())
    }

    async fn assign_owner(&self, id: &str, owner_id: &str) -> Result<(), DomainError> {
        if !self.known_record(id) {
            return Err(DomainError::not_found(format!("record '{id}' not found")));
        }

        self.store
            .lock()
            .unwrap()
            .owners
            .insert(id.to_string(), owner_id.to_string());
        Ok(())
    }

    async fn create_task(
        &self,
        id: &str,
        subject: &str,
        body: &str,
    ) -> Result<String, DomainError> {
        if !self.known_record(id) {
            return Err(DomainError::not_found(format!("record '{id}' not found")));
        }

        let mut store = self.store.lock().unwrap();
        store.tasks.push((id.to_string(), format!("{subject}\n{body}")));
        Ok(format!("task-{:04}", store.tasks.len()))
    }

    async fn post_comment(&self, id: &str, text: &str) -> Result<(), DomainError> {
        if !self.known_record(id) {
            return Err(DomainError::not_found(format!("record '{id}' not found")));
        }

        self.store
            .lock()
            .unwrap()
            .comments
            .push((id.to_string(), text.to_string()));
        Ok(())
    }
}

fn demo_leads() -> Vec<LeadRecord> {
    vec![
        LeadRecord::new("00Q-0001", "Jordan Kim", "Globex Manufacturing")
            .with_title("CTO")
            .with_industry("Technology")
            .with_source("Partner Referral")
            .with_rating("Hot")
            .with_employee_count(12_000)
            .with_annual_revenue(600_000_000.0)
            .with_description("Budget approved for a plant automation project, timeline Q3"),
        LeadRecord::new("00Q-0002", "Riley Chen", "Initech Retail")
            .with_title("Operations Manager")
            .with_industry("Retail")
            .with_source("Web")
            .with_rating("Warm")
            .with_employee_count(320)
            .with_annual_revenue(45_000_000.0),
        LeadRecord::new("00Q-0003", "Sam Novak", "Corner Bakery")
            .with_title("Analyst")
            .with_industry("Retail")
            .with_source("Cold Call")
            .with_rating("Cold")
            .with_employee_count(5)
            .with_annual_revenue(50_000.0),
    ]
}

fn demo_cases() -> Vec<TicketRecord> {
    vec![
        TicketRecord::new(
            "500-0001",
            "URGENT: system down",
            "We can't access production since this morning, all dashboards are unavailable",
        )
        .with_case_number("00001001")
        .with_priority("Medium")
        .with_origin("Web"),
        TicketRecord::new(
            "500-0002",
            "How do I reset my password?",
            "I forgot my password and my account is now locked",
        )
        .with_case_number("00001002")
        .with_priority("Low")
        .with_origin("Email"),
        TicketRecord::new(
            "500-0003",
            "Invoice discrepancy",
            "The charge on invoice INV-2291 does not match the quoted price",
        )
        .with_case_number("00001003")
        .with_priority("Medium")
        .with_origin("Email"),
    ]
}
