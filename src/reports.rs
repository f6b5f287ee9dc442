//! Read-side views over the store: the dashboard's daily numbers, the
//! revenue report, and the paging every list screen uses.

use std::collections::HashMap;

use chrono::NaiveDate;
use serde::Serialize;

use crate::lifecycle::Job;
use crate::records::{Customer, Expense};

pub const REPORT_PAGE_SIZE: usize = 10;
pub const EXPENSE_PAGE_SIZE: usize = 8;
pub const CUSTOMER_PAGE_SIZE: usize = 9;

/// Jobs started on `date`.
pub fn jobs_on(jobs: &[Job], date: NaiveDate) -> Vec<&Job> {
    jobs.iter().filter(|j| j.started_on(date)).collect()
}

/// The live queue: every job not yet paid for.
pub fn queue(jobs: &[Job]) -> Vec<&Job> {
    jobs.iter().filter(|j| j.status.is_open()).collect()
}

pub fn expenses_on(expenses: &[Expense], date: NaiveDate) -> f64 {
    expenses
        .iter()
        .filter(|e| e.date == date)
        .fold(0.0, |total, e| total + e.amount)
}

pub fn search_customers<'a>(customers: &'a [Customer], term: &str) -> Vec<&'a Customer> {
    customers.iter().filter(|c| c.matches(term)).collect()
}

/// Headline numbers for one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub revenue: f64,
    pub cars: usize,
    /// Vehicles still being worked on, regardless of start date.
    pub in_bay: usize,
    pub expenses: f64,
}

impl DailySummary {
    pub fn compute(jobs: &[Job], expenses: &[Expense], date: NaiveDate) -> Self {
        let today = jobs_on(jobs, date);
        Self {
            date,
            revenue: today.iter().fold(0.0, |total, j| total + j.total_amount),
            cars: today.len(),
            in_bay: jobs.iter().filter(|j| j.status.is_in_bay()).count(),
            expenses: expenses_on(expenses, date),
        }
    }

    pub fn net(&self) -> f64 {
        self.revenue - self.expenses
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceCount {
    pub name: String,
    pub count: usize,
}

/// Revenue over every settled job (completed or paid).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RevenueReport {
    pub jobs: usize,
    pub revenue: f64,
    /// Most popular first; ties broken by name.
    pub popularity: Vec<ServiceCount>,
}

impl RevenueReport {
    pub fn compute(jobs: &[Job]) -> Self {
        let settled: Vec<&Job> = jobs.iter().filter(|j| j.status.is_settled()).collect();

        let mut counts: HashMap<&str, usize> = HashMap::new();
        for job in &settled {
            for service in &job.services {
                *counts.entry(service.name.as_str()).or_insert(0) += 1;
            }
        }
        let mut popularity: Vec<ServiceCount> = counts
            .into_iter()
            .map(|(name, count)| ServiceCount {
                name: name.to_string(),
                count,
            })
            .collect();
        popularity.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));

        Self {
            jobs: settled.len(),
            revenue: settled.iter().fold(0.0, |total, j| total + j.total_amount),
            popularity,
        }
    }

    /// Settled jobs in store order, for the report's history table.
    pub fn history(jobs: &[Job]) -> Vec<&Job> {
        jobs.iter().filter(|j| j.status.is_settled()).collect()
    }
}

/// One page of a list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-based.
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }
}

/// Slices `items` into 1-based pages of `per_page`.
///
/// Page 0 is treated as page 1 and a page past the end clamps to the last
/// page. An empty list yields a single empty page 1 with `total_pages == 0`.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> Page<T> {
    let per_page = per_page.max(1);
    let total_items = items.len();
    let total_pages = total_items.div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));
    let start = (page - 1) * per_page;
    Page {
        items: items.iter().skip(start).take(per_page).cloned().collect(),
        page,
        total_pages,
        total_items,
    }
}
