//! The application state every screen reads from and writes through.
//!
//! [`AppState`] owns all collections. Screens get shared slices for reading
//! and call the named operations below to change anything; no field is
//! writable from outside this module. Lookups that miss are no-ops, and
//! malformed form input is ignored.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::config::WashbayConfig;
use crate::error::{WashbayError, parse_amount};
use crate::lifecycle::{
    Job, JobIntake, JobStatus, Lifecycle, PaymentMethod, Receipt, Transition, TransitionKind,
};
use crate::records::{
    Customer, Expense, ExpenseCategory, Role, Service, VehicleType, Worker, WorkerStatus,
    starter_customers, starter_services, starter_workers,
};

/// Which screen is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Screen {
    #[default]
    Dashboard,
    NewJob,
    Queue,
    Customers,
    Reports,
    Settings,
    Expenses,
}

/// Asks the cashier to confirm payment for a finished job.
pub trait PaymentPrompt {
    /// The method the customer paid with, or `None` if payment was declined.
    fn confirm_payment(&self, job: &Job) -> Option<PaymentMethod>;

    /// Whether to prepare a receipt message once payment is recorded.
    fn wants_receipt(&self, job: &Job) -> bool;
}

/// What [`AppState::advance_job`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum Advance {
    Moved { from: JobStatus, to: JobStatus },
    Paid {
        method: PaymentMethod,
        receipt: Option<Receipt>,
    },
    /// Payment was not confirmed; the job stays `Completed`.
    PaymentDeclined,
    AlreadyPaid,
}

/// Handle for one in-flight insight request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InsightTicket(u64);

#[derive(Debug, Default)]
struct InsightSlot {
    generation: u64,
    loading: bool,
    text: Option<String>,
}

#[derive(Debug)]
pub struct AppState {
    jobs: Vec<Job>,
    customers: Vec<Customer>,
    workers: Vec<Worker>,
    services: Vec<Service>,
    expenses: Vec<Expense>,
    current_screen: Screen,
    loyalty_enabled: bool,
    business_name: String,
    currency: String,
    bays: u8,
    insight: InsightSlot,
}

impl AppState {
    /// A store with no records at all.
    pub fn empty(config: &WashbayConfig) -> Self {
        Self {
            jobs: Vec::new(),
            customers: Vec::new(),
            workers: Vec::new(),
            services: Vec::new(),
            expenses: Vec::new(),
            current_screen: Screen::default(),
            loyalty_enabled: config.loyalty_enabled,
            business_name: config.business_name.clone(),
            currency: config.currency.clone(),
            bays: config.bays,
            insight: InsightSlot::default(),
        }
    }

    /// A store opened with the starter catalog and one paid job from `now`.
    pub fn seeded(config: &WashbayConfig, now: DateTime<Utc>) -> Self {
        let mut state = Self::empty(config);
        state.services = starter_services();
        state.workers = starter_workers();
        state.customers = starter_customers();

        let mut first = Job::new(
            "c1".into(),
            "John Doe".into(),
            Some("0244123456".into()),
            "GT-2023-21".into(),
            VehicleType::Suv,
            &state.services[1..2],
            "w1".into(),
            1,
            now,
        );
        first.id = "job-001".into();
        first.set_status(JobStatus::Paid, TransitionKind::Override, now);
        state.jobs.push(first);
        state
    }

    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    pub fn customers(&self) -> &[Customer] {
        &self.customers
    }

    pub fn workers(&self) -> &[Worker] {
        &self.workers
    }

    pub fn services(&self) -> &[Service] {
        &self.services
    }

    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    pub fn current_screen(&self) -> Screen {
        self.current_screen
    }

    pub fn loyalty_enabled(&self) -> bool {
        self.loyalty_enabled
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    pub fn job(&self, id: &str) -> Option<&Job> {
        self.jobs.iter().find(|j| j.id == id)
    }

    pub fn customer(&self, id: &str) -> Option<&Customer> {
        self.customers.iter().find(|c| c.id == id)
    }

    pub fn worker(&self, id: &str) -> Option<&Worker> {
        self.workers.iter().find(|w| w.id == id)
    }

    pub fn set_current_screen(&mut self, screen: Screen) {
        if self.current_screen == Screen::Dashboard && screen != Screen::Dashboard {
            // Anything still loading for the dashboard is now stale.
            self.insight.generation += 1;
            self.insight.loading = false;
        }
        self.current_screen = screen;
    }

    pub fn set_loyalty_enabled(&mut self, enabled: bool) {
        self.loyalty_enabled = enabled;
    }

    /// Puts a new job at the front of the list and, with loyalty on, gives
    /// its customer one point.
    pub fn add_job(&mut self, job: Job) {
        if self.loyalty_enabled {
            if let Some(customer) = self.customers.iter_mut().find(|c| c.id == job.customer_id) {
                customer.loyalty_points += 1;
                customer.last_visit = Utc::now();
                tracing::debug!(
                    customer = %customer.id,
                    points = customer.loyalty_points,
                    "loyalty point added"
                );
            }
        }
        tracing::info!(
            job = %job.id,
            plate = %job.vehicle_plate,
            bay = job.bay,
            total = job.total_amount,
            "job added"
        );
        self.jobs.insert(0, job);
    }

    /// Unchecked status setter kept for callers that need to jump anywhere.
    /// Goes through [`AppState::override_job_status`], so the jump is recorded.
    pub fn update_job_status(&mut self, id: &str, status: JobStatus) {
        self.override_job_status(id, status);
    }

    /// Manual correction to any status. Returns `false` if no job has `id`.
    pub fn override_job_status(&mut self, id: &str, status: JobStatus) -> bool {
        let Some(job) = self.jobs.iter_mut().find(|j| j.id == id) else {
            tracing::debug!(job = %id, "status override for unknown job ignored");
            return false;
        };
        tracing::warn!(job = %id, from = %job.status, to = %status, "status overridden");
        job.set_status(status, TransitionKind::Override, Utc::now());
        true
    }

    /// Moves the job exactly one step along the lifecycle.
    ///
    /// From `Completed` the step is payment: `prompt` is asked for a method,
    /// and declining leaves the job where it is. Returns `None` if no job has
    /// `id`.
    pub fn advance_job(&mut self, id: &str, prompt: &impl PaymentPrompt) -> Option<Advance> {
        let business_name = &self.business_name;
        let currency = &self.currency;
        let job = self.jobs.iter_mut().find(|j| j.id == id)?;
        let now = Utc::now();

        let advance = match Lifecycle::advance(job.status) {
            Transition::Next(to) => {
                let from = job.status;
                job.set_status(to, TransitionKind::Advance, now);
                Advance::Moved { from, to }
            }
            Transition::AwaitPayment => match prompt.confirm_payment(job) {
                Some(method) => {
                    job.mark_paid(method, now);
                    let receipt = prompt
                        .wants_receipt(job)
                        .then(|| Receipt::for_job(job, business_name, currency));
                    Advance::Paid { method, receipt }
                }
                None => Advance::PaymentDeclined,
            },
            Transition::Terminal => Advance::AlreadyPaid,
        };
        tracing::info!(job = %id, status = %job.status, ?advance, "job advanced");
        Some(advance)
    }

    /// The intake wizard's finish step. Returns the new job's id.
    ///
    /// Without a worker (or with one that is not on staff) the first worker
    /// on the list is assigned.
    pub fn open_job(
        &mut self,
        intake: JobIntake,
        now: DateTime<Utc>,
    ) -> Result<String, WashbayError> {
        let customer = self
            .customer(&intake.customer_id)
            .ok_or_else(|| WashbayError::CustomerNotFound(intake.customer_id.clone()))?;
        if intake.bay == 0 || intake.bay > self.bays {
            return Err(WashbayError::UnknownBay {
                bay: intake.bay,
                bays: self.bays,
            });
        }

        let plate = intake
            .vehicle_plate
            .filter(|p| !p.trim().is_empty())
            .or_else(|| customer.vehicle_plate.clone())
            .unwrap_or_else(|| "Unknown".to_string());
        let vehicle_type = intake
            .vehicle_type
            .or(customer.vehicle_type)
            .unwrap_or(VehicleType::Sedan);
        let services: Vec<Service> = intake
            .service_ids
            .iter()
            .filter_map(|id| self.services.iter().find(|s| &s.id == id).cloned())
            .collect();
        let worker_id = intake
            .worker_id
            .filter(|id| self.worker(id).is_some())
            .or_else(|| self.workers.first().map(|w| w.id.clone()))
            .unwrap_or_default();

        let mut job = Job::new(
            customer.id.clone(),
            customer.name.clone(),
            Some(customer.phone.clone()),
            plate,
            vehicle_type,
            &services,
            worker_id,
            intake.bay,
            now,
        );
        job.notes = intake.notes.filter(|n| !n.trim().is_empty());
        job.photos = intake.photos;

        let id = job.id.clone();
        self.add_job(job);
        Ok(id)
    }

    pub fn add_customer(&mut self, customer: Customer) {
        tracing::info!(customer = %customer.id, name = %customer.name, "customer added");
        self.customers.push(customer);
    }

    /// Customer form submit. Name and phone are required; the plate is
    /// optional. New customers start with no loyalty points.
    pub fn register_customer(
        &mut self,
        name: &str,
        phone: &str,
        plate: Option<&str>,
        now: DateTime<Utc>,
    ) -> Option<String> {
        let (name, phone) = (name.trim(), phone.trim());
        if name.is_empty() || phone.is_empty() {
            return None;
        }
        let id = format!("c-{}", Uuid::new_v4().simple());
        let mut customer = Customer::new(id.clone(), name.into(), phone.into(), now);
        customer.vehicle_plate = plate
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(str::to_string);
        self.add_customer(customer);
        Some(id)
    }

    /// Creates a placeholder customer from a phone number typed into intake
    /// search. Needs at least three characters.
    pub fn register_walk_in(&mut self, phone: &str, now: DateTime<Utc>) -> Option<String> {
        let phone = phone.trim();
        if phone.chars().count() < 3 {
            return None;
        }
        let id = format!("c-{}", Uuid::new_v4().simple());
        self.add_customer(Customer::new(id.clone(), "New Customer".into(), phone.into(), now));
        Some(id)
    }

    /// Newest first.
    pub fn add_expense(&mut self, expense: Expense) {
        tracing::info!(
            expense = %expense.id,
            amount = expense.amount,
            category = ?expense.category,
            "expense recorded"
        );
        self.expenses.insert(0, expense);
    }

    /// Expense form submit. Blank titles and unparseable amounts are ignored.
    pub fn record_expense(
        &mut self,
        title: &str,
        raw_amount: &str,
        category: ExpenseCategory,
        today: NaiveDate,
    ) -> Option<String> {
        if title.trim().is_empty() {
            return None;
        }
        let amount = match parse_amount(raw_amount) {
            Ok(amount) => amount,
            Err(e) => {
                tracing::debug!(error = %e, "expense form ignored");
                return None;
            }
        };
        let id = format!("exp-{}", Uuid::new_v4().simple());
        self.add_expense(Expense {
            id: id.clone(),
            title: title.trim().to_string(),
            amount,
            category,
            date: today,
        });
        Some(id)
    }

    pub fn add_worker(&mut self, worker: Worker) {
        tracing::info!(worker = %worker.id, role = ?worker.role, "worker added");
        self.workers.push(worker);
    }

    /// Staff form submit. Invited staff start out `Pending`.
    pub fn invite_worker(&mut self, name: &str, email: &str, role: Role) -> Option<String> {
        if name.trim().is_empty() || email.trim().is_empty() {
            return None;
        }
        let id = format!("w-{}", Uuid::new_v4().simple());
        self.add_worker(Worker {
            id: id.clone(),
            name: name.trim().to_string(),
            email: Some(email.trim().to_string()),
            role,
            status: WorkerStatus::Pending,
        });
        Some(id)
    }

    pub fn remove_worker(&mut self, id: &str) {
        let before = self.workers.len();
        self.workers.retain(|w| w.id != id);
        if self.workers.len() < before {
            tracing::info!(worker = %id, "worker removed");
        }
    }

    /// Replaces the service with the same id. Existing jobs keep the prices
    /// they were opened with.
    pub fn update_service(&mut self, service: Service) {
        if let Some(slot) = self.services.iter_mut().find(|s| s.id == service.id) {
            tracing::info!(service = %service.id, price = service.price, "service updated");
            *slot = service;
        }
    }

    /// Price field edit on the settings screen.
    pub fn set_service_price(&mut self, id: &str, raw_price: &str) -> bool {
        let Ok(price) = parse_amount(raw_price) else {
            return false;
        };
        let Some(current) = self.services.iter().find(|s| s.id == id) else {
            return false;
        };
        let updated = Service {
            price,
            ..current.clone()
        };
        self.update_service(updated);
        true
    }

    /// Starts a new insight request, superseding any earlier one.
    pub fn begin_insight(&mut self) -> InsightTicket {
        self.insight.generation += 1;
        self.insight.loading = true;
        InsightTicket(self.insight.generation)
    }

    /// Stores the text for `ticket` unless a newer request started or the
    /// dashboard has been left since. Returns whether it was applied.
    pub fn finish_insight(&mut self, ticket: InsightTicket, text: String) -> bool {
        if ticket.0 != self.insight.generation || self.current_screen != Screen::Dashboard {
            tracing::debug!(
                ticket = ticket.0,
                current = self.insight.generation,
                "stale insight dropped"
            );
            return false;
        }
        self.insight.loading = false;
        self.insight.text = Some(text);
        true
    }

    pub fn insight(&self) -> Option<&str> {
        self.insight.text.as_deref()
    }

    pub fn insight_loading(&self) -> bool {
        self.insight.loading
    }
}
