mod job;
mod receipt;
mod status;

pub use job::{Job, JobIntake, TransitionKind};
pub use receipt::Receipt;
pub use status::{JobStatus, Lifecycle, PaymentMethod, Transition};
