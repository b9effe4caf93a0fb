//! Pipeline services: step implementations and assembly per workflow

mod complaint_service;
mod lead_service;
mod ticket_service;

pub use complaint_service::ComplaintService;
pub use lead_service::LeadQualificationService;
pub use ticket_service::TicketTriageService;
