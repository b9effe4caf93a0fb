//! Complaint classification domain

mod classifier;
mod routing;
mod state;

pub use classifier::ComplaintClassifier;
pub use routing::{route_complaint, ComplaintAction, ComplaintDecision, ComplaintRecipients};
pub use state::{ComplaintFlowState, ComplaintPatch};
