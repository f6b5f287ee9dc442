use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::status::{JobStatus, PaymentMethod};
use crate::records::{Service, VehicleType};

/// How a status change was made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionKind {
    /// The regular one-step advance from the queue.
    Advance,
    /// `Completed → Paid` after a confirmed payment.
    Payment,
    /// A manual correction; may jump anywhere.
    Override,
}

/// One entry in a job's status trail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusChange {
    pub from: JobStatus,
    pub to: JobStatus,
    pub kind: TransitionKind,
    pub at: DateTime<Utc>,
}

/// What the intake wizard collects before a job is opened.
#[derive(Debug, Clone, Default)]
pub struct JobIntake {
    pub customer_id: String,
    pub vehicle_plate: Option<String>,
    pub vehicle_type: Option<VehicleType>,
    pub service_ids: Vec<String>,
    pub worker_id: Option<String>,
    pub bay: u8,
    pub notes: Option<String>,
    pub photos: Vec<String>,
}

/// A single vehicle moving through the wash.
///
/// Services are copied in at creation time, so `total_amount` stays what the
/// customer was quoted even if the price list changes later.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Job {
    pub id: String,
    pub customer_id: String,
    pub customer_name: String,
    pub customer_phone: Option<String>,
    pub vehicle_plate: String,
    pub vehicle_type: VehicleType,
    pub services: Vec<Service>,
    pub total_amount: f64,
    pub assigned_worker_id: String,
    pub bay: u8,
    pub status: JobStatus,
    pub status_history: Vec<StatusChange>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub payment_method: Option<PaymentMethod>,
    pub notes: Option<String>,
    pub photos: Vec<String>,
}

impl Job {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        customer_id: String,
        customer_name: String,
        customer_phone: Option<String>,
        vehicle_plate: String,
        vehicle_type: VehicleType,
        services: &[Service],
        assigned_worker_id: String,
        bay: u8,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: format!("job-{}", Uuid::new_v4().simple()),
            customer_id,
            customer_name,
            customer_phone,
            vehicle_plate,
            vehicle_type,
            services: services.to_vec(),
            total_amount: services.iter().fold(0.0, |total, s| total + s.price),
            assigned_worker_id,
            bay,
            status: JobStatus::Queued,
            status_history: Vec::new(),
            start_time: now,
            end_time: None,
            payment_method: None,
            notes: None,
            photos: Vec::new(),
        }
    }

    /// Moves the job to `to` and records the change.
    pub fn set_status(&mut self, to: JobStatus, kind: TransitionKind, at: DateTime<Utc>) {
        self.status_history.push(StatusChange {
            from: self.status,
            to,
            kind,
            at,
        });
        self.status = to;
    }

    /// Records payment and closes the job.
    pub fn mark_paid(&mut self, method: PaymentMethod, at: DateTime<Utc>) {
        self.payment_method = Some(method);
        self.end_time = Some(at);
        self.set_status(JobStatus::Paid, TransitionKind::Payment, at);
    }

    /// Whether the job was started on `date` (UTC calendar day).
    pub fn started_on(&self, date: NaiveDate) -> bool {
        self.start_time
            .to_rfc3339()
            .starts_with(&date.format("%Y-%m-%d").to_string())
    }

    /// Status changes that skipped the regular advance path.
    pub fn overrides(&self) -> impl Iterator<Item = &StatusChange> {
        self.status_history
            .iter()
            .filter(|change| change.kind == TransitionKind::Override)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::starter_services;
    use chrono::TimeZone;

    fn make_job(service_ids: &[&str], now: DateTime<Utc>) -> Job {
        let services: Vec<Service> = starter_services()
            .into_iter()
            .filter(|s| service_ids.contains(&s.id.as_str()))
            .collect();
        Job::new(
            "c1".into(),
            "John Doe".into(),
            Some("0244123456".into()),
            "GT-2023-21".into(),
            VehicleType::Suv,
            &services,
            "w1".into(),
            1,
            now,
        )
    }

    #[test]
    fn job_creation_defaults() {
        let job = make_job(&["s1", "s4"], Utc::now());
        assert_eq!(job.status, JobStatus::Queued);
        assert_eq!(job.total_amount, 70.0);
        assert_eq!(job.services.len(), 2);
        assert!(job.status_history.is_empty());
        assert!(job.id.starts_with("job-"));
        assert!(job.payment_method.is_none());
    }

    #[test]
    fn total_is_frozen_copy_of_prices() {
        let mut catalog = starter_services();
        let job = Job::new(
            "c1".into(),
            "John Doe".into(),
            None,
            "GT-2023-21".into(),
            VehicleType::Suv,
            &catalog[1..2],
            "w1".into(),
            1,
            Utc::now(),
        );
        catalog[1].price = 55.0;
        assert_eq!(job.total_amount, 40.0);
        assert_eq!(job.services[0].price, 40.0);
    }

    #[test]
    fn job_without_services_totals_plain_zero() {
        let job = make_job(&[], Utc::now());
        assert_eq!(job.total_amount, 0.0);
        assert_eq!(format!("{}", job.total_amount), "0");
    }

    #[test]
    fn started_on_compares_calendar_date() {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap();
        let job = make_job(&["s2"], start);
        assert!(job.started_on(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert!(!job.started_on(NaiveDate::from_ymd_opt(2024, 1, 2).unwrap()));
    }

    #[test]
    fn history_records_each_change() {
        let now = Utc::now();
        let mut job = make_job(&["s2"], now);
        job.set_status(JobStatus::Washing, TransitionKind::Advance, now);
        job.set_status(JobStatus::Completed, TransitionKind::Override, now);
        job.mark_paid(PaymentMethod::Cash, now);

        let trail: Vec<_> = job.status_history.iter().map(|c| (c.from, c.to)).collect();
        assert_eq!(
            trail,
            vec![
                (JobStatus::Queued, JobStatus::Washing),
                (JobStatus::Washing, JobStatus::Completed),
                (JobStatus::Completed, JobStatus::Paid),
            ]
        );
        assert_eq!(job.overrides().count(), 1);
        assert_eq!(job.payment_method, Some(PaymentMethod::Cash));
        assert_eq!(job.end_time, Some(now));
    }
}
