use std::fmt;

use serde::{Deserialize, Serialize};

/// Where a vehicle is in the wash.
///
/// Each job flows through: QUEUED → WASHING → DRYING → COMPLETED → PAID
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum JobStatus {
    Queued,
    Washing,
    Drying,
    Completed,
    Paid,
}

impl JobStatus {
    pub const ALL: [JobStatus; 5] = [
        JobStatus::Queued,
        JobStatus::Washing,
        JobStatus::Drying,
        JobStatus::Completed,
        JobStatus::Paid,
    ];

    /// The status one step further along, or `None` from `Paid`.
    pub fn next(self) -> Option<JobStatus> {
        match self {
            JobStatus::Queued => Some(JobStatus::Washing),
            JobStatus::Washing => Some(JobStatus::Drying),
            JobStatus::Drying => Some(JobStatus::Completed),
            JobStatus::Completed => Some(JobStatus::Paid),
            JobStatus::Paid => None,
        }
    }

    pub fn is_terminal(self) -> bool {
        self == JobStatus::Paid
    }

    /// Still on the live queue (anything not yet paid for).
    pub fn is_open(self) -> bool {
        !self.is_terminal()
    }

    /// Still physically occupying a bay.
    pub fn is_in_bay(self) -> bool {
        self < JobStatus::Completed
    }

    /// Work is done, whether or not the money is in.
    pub fn is_settled(self) -> bool {
        self >= JobStatus::Completed
    }
}

impl fmt::Display for JobStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobStatus::Queued => write!(f, "In Queue"),
            JobStatus::Washing => write!(f, "Washing"),
            JobStatus::Drying => write!(f, "Drying"),
            JobStatus::Completed => write!(f, "Completed"),
            JobStatus::Paid => write!(f, "Paid"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Cash,
    MtnMomo,
    TelecelCash,
    Card,
    Split,
}

impl fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "Cash"),
            PaymentMethod::MtnMomo => write!(f, "MTN MoMo"),
            PaymentMethod::TelecelCash => write!(f, "Telecel Cash"),
            PaymentMethod::Card => write!(f, "Visa/Mastercard"),
            PaymentMethod::Split => write!(f, "Split Payment"),
        }
    }
}

/// The result of asking the lifecycle for the next step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Move straight to the given status.
    Next(JobStatus),
    /// The wash is done; the only way forward is taking payment.
    AwaitPayment,
    /// Nothing follows `Paid`.
    Terminal,
}

/// The one-step advance rule used by the live queue.
pub struct Lifecycle;

impl Lifecycle {
    /// Compute the transition out of `status`.
    ///
    /// - `Queued`, `Washing` and `Drying` advance to the next status.
    /// - `Completed` requires a payment confirmation before becoming `Paid`.
    /// - `Paid` is terminal.
    pub fn advance(status: JobStatus) -> Transition {
        match status {
            JobStatus::Completed => Transition::AwaitPayment,
            other => match other.next() {
                Some(next) => Transition::Next(next),
                None => Transition::Terminal,
            },
        }
    }
}
