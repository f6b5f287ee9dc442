mod cli;
mod config;
mod error;
mod gemini;
mod insight;
mod lifecycle;
mod logging;
mod records;
mod reports;
mod store;
mod ui;

use std::time::Duration;

use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};
use clap::Parser;
use serde::Serialize;

use cli::{Cli, Command, FlagPrompt};
use config::WashbayConfig;
use gemini::GeminiClient;
use insight::InsightService;
use lifecycle::{JobIntake, JobStatus};
use records::{Customer, ExpenseCategory};
use reports::{
    CUSTOMER_PAGE_SIZE, DailySummary, EXPENSE_PAGE_SIZE, REPORT_PAGE_SIZE, RevenueReport, paginate,
};
use store::{AppState, Screen};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let config = WashbayConfig::load()?;

    let now = Utc::now();
    let today = now.date_naive();
    let mut state = AppState::seeded(&config, now);
    if cli.no_loyalty {
        state.set_loyalty_enabled(false);
    }
    let prompt = FlagPrompt {
        pay: cli.pay,
        receipt: cli.receipt,
    };

    match cli.command {
        Command::Demo => run_demo(&mut state, &prompt, &config, today, cli.json).await?,
        Command::Queue => {
            state.set_current_screen(Screen::Queue);
            let queue = reports::queue(state.jobs());
            if cli.json {
                print_json(&queue)?;
            } else {
                ui::print_queue(&queue, state.currency());
            }
        }
        Command::Report { page } => {
            state.set_current_screen(Screen::Reports);
            let report = RevenueReport::compute(state.jobs());
            let history: Vec<_> = RevenueReport::history(state.jobs())
                .into_iter()
                .cloned()
                .collect();
            let history = paginate(&history, page, REPORT_PAGE_SIZE);
            if cli.json {
                print_json(&serde_json::json!({ "report": report, "history": history }))?;
            } else {
                ui::print_report(&report, &history, state.currency());
            }
        }
        Command::Customers {
            search,
            page,
            add,
            phone,
            plate,
            walk_in,
        } => {
            state.set_current_screen(Screen::Customers);
            if let Some(name) = add {
                let phone = phone.unwrap_or_default();
                if state
                    .register_customer(&name, &phone, plate.as_deref(), now)
                    .is_none()
                {
                    ui::print_ignored("customer needs a name and a phone number");
                }
            }
            if let Some(phone) = walk_in {
                if state.register_walk_in(&phone, now).is_none() {
                    ui::print_ignored("walk-in phone needs at least 3 characters");
                }
            }
            let term = search.as_deref().unwrap_or("");
            let found: Vec<Customer> = reports::search_customers(state.customers(), term)
                .into_iter()
                .cloned()
                .collect();
            let page = paginate(&found, page, CUSTOMER_PAGE_SIZE);
            if cli.json {
                print_json(&page)?;
            } else {
                ui::print_customers(&page);
            }
        }
        Command::Expenses { page } => {
            state.set_current_screen(Screen::Expenses);
            let page = paginate(state.expenses(), page, EXPENSE_PAGE_SIZE);
            let today_total = reports::expenses_on(state.expenses(), today);
            if cli.json {
                print_json(&page)?;
            } else {
                ui::print_expenses(&page, today_total, state.currency());
            }
        }
        Command::Settings {
            prices,
            invite,
            email,
            role,
            remove,
        } => {
            state.set_current_screen(Screen::Settings);
            for edit in &prices {
                let applied = edit
                    .split_once('=')
                    .is_some_and(|(id, raw)| state.set_service_price(id.trim(), raw));
                if !applied {
                    ui::print_ignored(&format!("price edit {edit:?}"));
                }
            }
            if let Some(name) = invite {
                let email = email.unwrap_or_default();
                if state.invite_worker(&name, &email, role.into()).is_none() {
                    ui::print_ignored("staff invite needs a name and an email");
                }
            }
            for id in &remove {
                state.remove_worker(id);
            }
            if cli.json {
                print_json(&serde_json::json!({
                    "loyalty_enabled": state.loyalty_enabled(),
                    "services": state.services(),
                    "workers": state.workers(),
                }))?;
            } else {
                ui::print_settings(
                    state.services(),
                    state.workers(),
                    state.loyalty_enabled(),
                    state.currency(),
                );
            }
        }
        Command::Override { job, status } => {
            state.set_current_screen(Screen::Queue);
            if !state.override_job_status(&job, status.into()) {
                ui::print_ignored(&format!("no job with id {job}"));
            }
            if cli.json {
                print_json(&state.job(&job))?;
            } else {
                ui::print_queue(&reports::queue(state.jobs()), state.currency());
            }
        }
        Command::Insight => {
            refresh_insight(&mut state, &config, today, !cli.json).await;
            let text = state.insight().unwrap_or(insight::NO_TEXT);
            if cli.json {
                print_json(&serde_json::json!({ "insight": text }))?;
            } else {
                ui::print_insight(text);
            }
        }
    }

    Ok(())
}

/// A short day at the bay: a new customer and a walk-in, three cars, one of
/// them all the way through to payment and one corrected by hand.
async fn run_demo(
    state: &mut AppState,
    prompt: &FlagPrompt,
    config: &WashbayConfig,
    today: NaiveDate,
    json: bool,
) -> Result<()> {
    let now = Utc::now();

    state.set_current_screen(Screen::Customers);
    let kofi = state
        .register_customer("Kofi Boateng", "0245550101", Some("GR-4410-24"), now)
        .context("demo customer rejected")?;
    let walk_in = state
        .register_walk_in("0207778888", now)
        .context("demo walk-in rejected")?;

    state.set_current_screen(Screen::Expenses);
    state.record_expense("Diesel for generator", "120", ExpenseCategory::Fuel, today);
    state.record_expense("Car shampoo", "35.50", ExpenseCategory::Soap, today);

    state.set_current_screen(Screen::NewJob);
    let first = state.open_job(
        JobIntake {
            customer_id: kofi,
            service_ids: vec!["s3".into(), "s4".into()],
            worker_id: Some("w2".into()),
            bay: 2,
            notes: Some("Mud on the wheel arches".into()),
            ..Default::default()
        },
        now,
    )?;
    let second = state.open_job(
        JobIntake {
            customer_id: walk_in,
            service_ids: vec!["s1".into()],
            bay: 3,
            ..Default::default()
        },
        now,
    )?;
    let third = state.open_job(
        JobIntake {
            customer_id: "c2".into(),
            service_ids: vec!["s6".into()],
            bay: 4,
            ..Default::default()
        },
        now,
    )?;

    state.set_current_screen(Screen::Queue);
    let mut moves = Vec::new();
    for _ in 0..4 {
        if let Some(advance) = state.advance_job(&first, prompt) {
            moves.push((first.clone(), advance));
        }
    }
    if let Some(advance) = state.advance_job(&second, prompt) {
        moves.push((second.clone(), advance));
    }
    // An under wash needs no drying bay.
    state.update_job_status(&third, JobStatus::Completed);

    state.set_current_screen(Screen::Dashboard);
    refresh_insight(state, config, today, !json).await;
    let summary = DailySummary::compute(state.jobs(), state.expenses(), today);
    let queue = reports::queue(state.jobs());

    if json {
        let receipts: Vec<_> = moves
            .iter()
            .filter_map(|(_, advance)| match advance {
                store::Advance::Paid { receipt, .. } => receipt.as_ref(),
                _ => None,
            })
            .collect();
        print_json(&serde_json::json!({
            "summary": summary,
            "queue": queue,
            "receipts": receipts,
            "insight": state.insight(),
        }))?;
        return Ok(());
    }

    for (id, advance) in &moves {
        if let Some(job) = state.job(id) {
            ui::print_advance(job, advance);
        }
    }
    ui::print_queue(&queue, state.currency());
    ui::print_summary(&summary, state.currency());
    if let Some(text) = state.insight() {
        ui::print_insight(text);
    }
    Ok(())
}

/// Runs one insight request for the dashboard and stores the result if it
/// is still wanted.
async fn refresh_insight(
    state: &mut AppState,
    config: &WashbayConfig,
    today: NaiveDate,
    spinner: bool,
) {
    let generator = if config.has_api_key() {
        GeminiClient::new(
            config.api_key.clone(),
            config.model.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
        .map_err(|e| tracing::warn!(error = %e, "could not build insight client"))
        .ok()
    } else {
        None
    };
    let service = InsightService::new(
        generator,
        config.business_name.clone(),
        config.currency.clone(),
    );

    if state.current_screen() != Screen::Dashboard {
        state.set_current_screen(Screen::Dashboard);
    }
    let ticket = state.begin_insight();
    let show_spinner = spinner && state.insight_loading();
    let progress = show_spinner.then(ui::InsightSpinner::start);
    let text = service.generate(state.jobs(), state.expenses(), today).await;
    if let Some(progress) = progress {
        progress.finish();
    }
    state.finish_insight(ticket, text);
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
