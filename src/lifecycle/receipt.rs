use serde::Serialize;

use super::job::Job;

const WHATSAPP_BASE: &str = "https://wa.me/";
const COUNTRY_CODE: &str = "233";

/// A pre-filled receipt message and the chat link that carries it.
///
/// Building one never sends anything; the link is handed to whoever opens it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Receipt {
    pub message: String,
    pub link: String,
}

impl Receipt {
    pub fn for_job(job: &Job, business_name: &str, currency: &str) -> Self {
        let message = format!(
            "Hello {}, thanks for washing with {business_name}! Total: {currency}{}. Receipt: #{}",
            job.customer_name,
            job.total_amount,
            receipt_number(&job.id),
        );
        let encoded = urlencoding::encode(&message);
        let link = match job.customer_phone.as_deref().map(international_phone) {
            Some(phone) if !phone.is_empty() => format!("{WHATSAPP_BASE}{phone}?text={encoded}"),
            _ => format!("{WHATSAPP_BASE}?text={encoded}"),
        };
        Self { message, link }
    }
}

// Local numbers are written with a trunk `0`; the chat service wants the
// country code instead.
fn international_phone(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| !c.is_whitespace()).collect();
    match digits.strip_prefix('0') {
        Some(rest) => format!("{COUNTRY_CODE}{rest}"),
        None => digits,
    }
}

fn receipt_number(job_id: &str) -> String {
    let tail: String = job_id.trim_start_matches("job-").chars().take(8).collect();
    tail.to_uppercase()
}
