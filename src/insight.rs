//! Daily advice for the owner, written by a text generation model.
//!
//! [`InsightService`] never fails: a missing key, a network problem or an
//! empty answer all come back as one of the fixed messages below.

use chrono::NaiveDate;

use crate::gemini::{GeminiError, TextGenerator};
use crate::lifecycle::Job;
use crate::records::Expense;
use crate::reports::DailySummary;

pub const NO_JOBS_YET: &str = "Start adding jobs to unlock AI insights!";
pub const NOT_CONFIGURED: &str = "API Key not configured for AI insights.";
pub const UNAVAILABLE: &str = "AI Insight currently unavailable (check connection).";
pub const NO_TEXT: &str = "Could not generate insight.";

pub struct InsightService<G> {
    generator: Option<G>,
    business_name: String,
    currency: String,
}

impl<G: TextGenerator> InsightService<G> {
    /// `generator` is `None` when no credential is configured.
    pub fn new(generator: Option<G>, business_name: String, currency: String) -> Self {
        Self {
            generator,
            business_name,
            currency,
        }
    }

    pub async fn generate(&self, jobs: &[Job], expenses: &[Expense], today: NaiveDate) -> String {
        if jobs.is_empty() {
            return NO_JOBS_YET.to_string();
        }
        let Some(generator) = &self.generator else {
            return NOT_CONFIGURED.to_string();
        };

        let summary = DailySummary::compute(jobs, expenses, today);
        let prompt = self.prompt(&summary);

        match generator.generate(&prompt).await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) | Err(GeminiError::EmptyResponse) => NO_TEXT.to_string(),
            Err(e) => {
                tracing::warn!(error = %e, "insight generation failed");
                UNAVAILABLE.to_string()
            }
        }
    }

    fn prompt(&self, summary: &DailySummary) -> String {
        let currency = &self.currency;
        format!(
            "You are an expert business analyst for {}, a vehicle washing bay in Accra, Ghana.\n\
             Analyze today's performance ({}):\n\
             - Total Revenue: {currency} {}\n\
             - Total Cars Washed: {}\n\
             - Expenses: {currency} {}\n\
             \n\
             Provide a short, motivating summary (max 3 sentences) in English \
             with a touch of Ghanaian friendly tone.\n\
             Suggest one quick marketing tip for tomorrow.",
            self.business_name, summary.date, summary.revenue, summary.cars, summary.expenses,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::GeminiClient;
    use crate::records::{VehicleType, starter_services};
    use chrono::Utc;
    use std::sync::Mutex;
    use std::time::Duration;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct MockGenerator {
        result: Result<String, u16>,
        prompts: Mutex<Vec<String>>,
    }

    impl MockGenerator {
        fn ok(text: &str) -> Self {
            Self {
                result: Ok(text.to_string()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn err(status: u16) -> Self {
            Self {
                result: Err(status),
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    impl TextGenerator for &MockGenerator {
        async fn generate(&self, prompt: &str) -> Result<String, GeminiError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            match &self.result {
                Ok(text) => Ok(text.clone()),
                Err(status) => Err(GeminiError::ApiError {
                    status: *status,
                    message: "mock error".into(),
                }),
            }
        }
    }

    fn service(generator: Option<&MockGenerator>) -> InsightService<&MockGenerator> {
        InsightService::new(generator, "WashBay Pro".into(), "GHS".into())
    }

    fn todays_job() -> Job {
        Job::new(
            "c1".into(),
            "John Doe".into(),
            None,
            "GT-2023-21".into(),
            VehicleType::Suv,
            &starter_services()[1..2],
            "w1".into(),
            1,
            Utc::now(),
        )
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    #[tokio::test]
    async fn empty_jobs_skips_the_call() {
        let generator = MockGenerator::ok("never");
        let text = service(Some(&generator)).generate(&[], &[], today()).await;
        assert_eq!(text, NO_JOBS_YET);
        assert!(generator.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn missing_credential_falls_back() {
        let text = service(None).generate(&[todays_job()], &[], today()).await;
        assert_eq!(text, NOT_CONFIGURED);
        assert!(!text.is_empty());
    }

    #[tokio::test]
    async fn failure_is_swallowed() {
        let generator = MockGenerator::err(500);
        let text = service(Some(&generator))
            .generate(&[todays_job()], &[], today())
            .await;
        assert_eq!(text, UNAVAILABLE);
    }

    #[tokio::test]
    async fn blank_answer_uses_placeholder() {
        let generator = MockGenerator::ok("   ");
        let text = service(Some(&generator))
            .generate(&[todays_job()], &[], today())
            .await;
        assert_eq!(text, NO_TEXT);
    }

    #[tokio::test]
    async fn prompt_carries_todays_numbers() {
        let generator = MockGenerator::ok("Ayekoo! Push the Engine Wash tomorrow.");
        let text = service(Some(&generator))
            .generate(&[todays_job(), todays_job()], &[], today())
            .await;
        assert_eq!(text, "Ayekoo! Push the Engine Wash tomorrow.");

        let prompts = generator.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("Total Revenue: GHS 80"));
        assert!(prompts[0].contains("Total Cars Washed: 2"));
        assert!(prompts[0].contains("Expenses: GHS 0"));
    }

    async fn live_service(
        body: serde_json::Value,
        status: u16,
    ) -> (MockServer, InsightService<GeminiClient>) {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&server)
            .await;
        let client = GeminiClient::with_base_url(
            "test-key".into(),
            "gemini-2.5-flash".into(),
            Duration::from_secs(5),
            server.uri(),
        )
        .unwrap();
        let service = InsightService::new(Some(client), "WashBay Pro".into(), "GHS".into());
        (server, service)
    }

    #[tokio::test]
    async fn model_with_no_candidates_uses_placeholder() {
        let (_server, service) = live_service(serde_json::json!({ "candidates": [] }), 200).await;
        let text = service.generate(&[todays_job()], &[], today()).await;
        assert_eq!(text, NO_TEXT);
    }

    #[tokio::test]
    async fn model_server_error_reads_unavailable() {
        let (_server, service) =
            live_service(serde_json::json!({ "error": { "message": "boom" } }), 500).await;
        let text = service.generate(&[todays_job()], &[], today()).await;
        assert_eq!(text, UNAVAILABLE);
    }
}
