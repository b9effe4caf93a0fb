mod runs;

pub use runs::{run_complaint, run_lead, run_ticket};
