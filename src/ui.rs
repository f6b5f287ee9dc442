//! Saída de terminal do WashBay: tabelas coloridas e spinner.
//!
//! Usa `console` para estilização com cores e `indicatif` para o spinner
//! exibido enquanto a análise do dia está sendo gerada.

use console::Style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::lifecycle::{Job, JobStatus};
use crate::records::{Customer, Expense, Service, Worker, WorkerStatus};
use crate::reports::{DailySummary, Page, RevenueReport};
use crate::store::Advance;

/// Spinner exibido enquanto o painel aguarda a análise do dia.
pub struct InsightSpinner {
    pb: ProgressBar,
}

impl InsightSpinner {
    pub fn start() -> Self {
        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}") {
            pb.set_style(style);
        }
        pb.set_message("Analysing today's data...");
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        Self { pb }
    }

    pub fn finish(self) {
        self.pb.finish_and_clear();
    }
}

/// Cor usada no selo de status de um job.
pub fn status_style(status: JobStatus) -> Style {
    match status {
        JobStatus::Queued => Style::new().dim(),
        JobStatus::Washing => Style::new().blue(),
        JobStatus::Drying => Style::new().yellow(),
        JobStatus::Completed => Style::new().green(),
        JobStatus::Paid => Style::new().green().bold(),
    }
}

fn heading(text: &str) {
    println!();
    println!("{}", Style::new().bold().apply_to(format!("─── {text} ───")));
}

pub fn print_summary(summary: &DailySummary, currency: &str) {
    heading(&format!("Today {}", summary.date));
    println!("  Sales      {currency}{}", summary.revenue);
    println!("  Cars       {}", summary.cars);
    println!("  In bays    {}", summary.in_bay);
    println!("  Expenses   {currency}{}", summary.expenses);
    let net = summary.net();
    let style = if net >= 0.0 {
        Style::new().green()
    } else {
        Style::new().red()
    };
    println!("  Net        {}", style.apply_to(format!("{currency}{net}")));
}

pub fn print_queue(jobs: &[&Job], currency: &str) {
    heading(&format!("Live Queue ({} active)", jobs.len()));
    let tally: Vec<String> = JobStatus::ALL
        .into_iter()
        .filter(|status| status.is_open())
        .map(|status| {
            let count = jobs.iter().filter(|j| j.status == status).count();
            format!("{} {count}", status_style(status).apply_to(status))
        })
        .collect();
    println!("  {}", tally.join("  ·  "));
    if jobs.is_empty() {
        println!("  All caught up! No vehicles in the queue right now.");
        return;
    }
    for job in jobs {
        let services: Vec<&str> = job.services.iter().map(|s| s.name.as_str()).collect();
        println!(
            "  Bay {}  {:<12} {:<16} {:>10}  {}",
            job.bay,
            job.vehicle_plate,
            job.customer_name,
            format!("{currency}{}", job.total_amount),
            status_style(job.status).apply_to(job.status),
        );
        let edited = if job.overrides().next().is_some() {
            "  (status edited)"
        } else {
            ""
        };
        println!(
            "         {}  [{}]{edited}",
            Style::new().dim().apply_to(&job.id),
            services.join(", ")
        );
    }
}

pub fn print_advance(job: &Job, advance: &Advance) {
    let mark = Style::new().cyan().apply_to("→");
    match advance {
        Advance::Moved { from, to } => {
            println!(
                "  {mark} {} {} → {}",
                job.vehicle_plate,
                from,
                status_style(*to).apply_to(to)
            );
        }
        Advance::Paid { method, receipt } => {
            println!(
                "  {} {} paid via {method}",
                Style::new().green().bold().apply_to("✓"),
                job.vehicle_plate
            );
            if let Some(receipt) = receipt {
                println!("    {}", receipt.message);
                println!("    {}", Style::new().underlined().apply_to(&receipt.link));
            }
        }
        Advance::PaymentDeclined => {
            println!(
                "  {} {} payment declined, still Completed",
                Style::new().yellow().apply_to("↺"),
                job.vehicle_plate
            );
        }
        Advance::AlreadyPaid => {
            println!(
                "  {} {} is already paid",
                Style::new().dim().apply_to("·"),
                job.vehicle_plate
            );
        }
    }
}

pub fn print_report(report: &RevenueReport, history: &Page<Job>, currency: &str) {
    heading("Reports");
    println!("  Revenue    {currency}{} from {} jobs", report.revenue, report.jobs);
    if report.popularity.is_empty() {
        println!("  No data yet");
    } else {
        println!("  Popular services:");
        for entry in &report.popularity {
            println!("    {:<18} {}", entry.name, entry.count);
        }
    }
    println!();
    for job in &history.items {
        println!(
            "  {}  {:<12} {:>10}  {}",
            job.start_time.format("%Y-%m-%d %H:%M"),
            job.vehicle_plate,
            format!("{currency}{}", job.total_amount),
            status_style(job.status).apply_to(job.status),
        );
    }
    print_page_footer(history);
}

pub fn print_customers(page: &Page<Customer>) {
    heading("Customers");
    if page.items.is_empty() {
        println!("  No customers found");
    }
    for c in &page.items {
        println!(
            "  {:<16} {:<12} {:<12} {:>3} pts",
            c.name,
            c.phone,
            c.vehicle_plate.as_deref().unwrap_or("-"),
            c.loyalty_points
        );
    }
    print_page_footer(page);
}

pub fn print_expenses(page: &Page<Expense>, today_total: f64, currency: &str) {
    heading("Expenses");
    println!("  Today      {currency}{today_total}");
    if page.items.is_empty() {
        println!("  No expenses recorded");
    }
    for e in &page.items {
        println!(
            "  {}  {:<20} {:<12} {:>10}",
            e.date,
            e.title,
            format!("{:?}", e.category),
            format!("{currency}{}", e.amount)
        );
    }
    print_page_footer(page);
}

/// Tabela de preços, equipe e o estado do programa de fidelidade.
pub fn print_settings(services: &[Service], workers: &[Worker], loyalty: bool, currency: &str) {
    heading("Settings");
    let loyalty = if loyalty {
        Style::new().green().apply_to("on")
    } else {
        Style::new().dim().apply_to("off")
    };
    println!("  Loyalty points   {loyalty}");
    println!();
    for service in services {
        println!(
            "  {:<4} {:<18} {:>10}  {} min",
            service.id,
            service.name,
            format!("{currency}{}", service.price),
            service.duration_mins
        );
    }
    println!();
    for worker in workers {
        let status = match worker.status {
            WorkerStatus::Active => Style::new().green().apply_to("active"),
            WorkerStatus::Pending => Style::new().yellow().apply_to("pending"),
        };
        println!(
            "  {:<8} {:<16} {:<10} {}",
            worker.id,
            worker.name,
            format!("{:?}", worker.role),
            status
        );
    }
}

/// Avisa que uma entrada do formulário foi ignorada.
pub fn print_ignored(what: &str) {
    eprintln!("{} ignored: {what}", Style::new().yellow().apply_to("!"));
}

pub fn print_insight(text: &str) {
    heading("Insight");
    println!("  {}", Style::new().italic().apply_to(text));
}

fn print_page_footer<T>(page: &Page<T>) {
    if page.total_pages <= 1 {
        return;
    }
    let prev = if page.has_prev() { "‹ prev  " } else { "" };
    let next = if page.has_next() { "  next ›" } else { "" };
    println!(
        "{}",
        Style::new().dim().apply_to(format!(
            "  {prev}page {}/{} ({} items){next}",
            page.page, page.total_pages, page.total_items
        ))
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_status_has_a_style() {
        for status in JobStatus::ALL {
            let styled = status_style(status).apply_to(status).to_string();
            assert!(styled.contains(&status.to_string()));
        }
    }
}
