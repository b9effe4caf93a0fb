//! Support ticket triage domain

mod classifier;
mod entity;
mod routing;
mod state;

pub use classifier::TicketClassifier;
pub use entity::TicketRecord;
pub use routing::{route_ticket, PriorityChange, TicketAction, TicketDecision};
pub use state::{TicketFlowState, TicketPatch};
