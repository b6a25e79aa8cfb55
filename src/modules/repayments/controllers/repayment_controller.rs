// HTTP handlers for the repayment planner
//
// Endpoints:
// - POST /api/calculate - Simulate a plan and return the ledger plus a text summary
// - POST /api/export_csv - Simulate a plan and download the ledger as CSV
// - GET / - Planner form
//
// The service keeps no state between requests: every call carries the whole plan.

use actix_web::{http::header, web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::calendar::current_year;
use crate::core::{AppError, Result, MAX_YEAR, MIN_YEAR};
use crate::modules::repayments::{
    models::{Course, Debtor, SimulationInput, SimulationResult},
    services::{simulate, LedgerCsvExporter, SummaryRenderer, TOLERANCE},
};

const INDEX_HTML: &str = include_str!("../../../../static/index.html");
const CSV_FILENAME: &str = "repay_result.csv";

/// Request body shared by calculate and export
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CalculateRequest {
    pub salary: f64,
    #[serde(default)]
    pub living_expense: f64,
    #[serde(default = "default_start_month")]
    pub start_month: u32,
    /// Defaults to the current year
    #[serde(default)]
    pub base_year: Option<i32>,
    #[serde(default)]
    pub debtors: Vec<DebtorRequest>,
    #[serde(default)]
    pub courses: Vec<CourseRequest>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DebtorRequest {
    pub name: String,
    pub debt: f64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CourseRequest {
    pub fee: f64,
    pub months: u32,
}

fn default_start_month() -> u32 {
    1
}

impl CalculateRequest {
    /// Field-level checks; cross-field rules are enforced by the simulator
    pub fn into_input(self) -> Result<SimulationInput> {
        if !self.salary.is_finite() || self.salary <= 0.0 {
            return Err(AppError::validation("Salary must be a number greater than 0"));
        }

        if !self.living_expense.is_finite() || self.living_expense < 0.0 {
            return Err(AppError::validation(
                "Living expense must be a number of at least 0",
            ));
        }

        if !(1..=12).contains(&self.start_month) {
            return Err(AppError::validation(format!(
                "Start month must be between 1 and 12, got {}",
                self.start_month
            )));
        }

        let base_year = self.base_year.unwrap_or_else(current_year);
        if !(MIN_YEAR..=MAX_YEAR).contains(&base_year) {
            return Err(AppError::validation(format!(
                "Base year must be between {} and {}, got {}",
                MIN_YEAR, MAX_YEAR, base_year
            )));
        }

        let debtors = self
            .debtors
            .into_iter()
            .map(|d| {
                let name = d.name.trim().to_string();
                if name.is_empty() {
                    return Err(AppError::validation("Every debtor needs a name"));
                }
                if !d.debt.is_finite() || d.debt <= TOLERANCE {
                    return Err(AppError::validation(format!(
                        "Debt owed to {} must be a number greater than {}",
                        name, TOLERANCE
                    )));
                }
                Ok(Debtor::new(name, d.debt))
            })
            .collect::<Result<Vec<_>>>()?;

        let courses = self
            .courses
            .into_iter()
            .enumerate()
            .map(|(position, c)| {
                if !c.fee.is_finite() || c.fee <= TOLERANCE || c.months == 0 {
                    return Err(AppError::validation(format!(
                        "{} needs a fee greater than {} and at least one month",
                        Course::id_for(position),
                        TOLERANCE
                    )));
                }
                Ok(Course::new(c.fee, c.months))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(SimulationInput {
            monthly_salary: self.salary,
            living_expense: self.living_expense,
            start_month: self.start_month,
            base_year,
            debtors,
            courses,
        })
    }
}

/// Response for POST /api/calculate
#[derive(Debug, Serialize, Deserialize)]
pub struct CalculateResponse {
    pub status: String,
    pub summary: String,
    pub result: SimulationResult,
}

/// Validate the request and run the simulation off the async workers
async fn run_plan(request: CalculateRequest) -> Result<(SimulationInput, SimulationResult)> {
    let input = request.into_input()?;

    info!(
        debtors = input.debtors.len(),
        courses = input.courses.len(),
        "Running repayment plan"
    );

    let (input, outcome) = web::block(move || {
        let outcome = simulate(&input);
        (input, outcome)
    })
    .await
    .map_err(|e| AppError::internal(format!("Simulation worker failed: {}", e)))?;

    Ok((input, outcome?))
}

/// POST /api/calculate
///
/// # Returns
/// - 200: Ledger, completion months and a printable summary
/// - 400: Invalid plan (no disposable income, no obligations, bad amounts)
/// - 422: Plan does not finish within the horizon
pub async fn calculate(request: web::Json<CalculateRequest>) -> Result<HttpResponse> {
    let (input, result) = run_plan(request.into_inner()).await?;
    let summary = SummaryRenderer::render(&input, &result);

    Ok(HttpResponse::Ok().json(CalculateResponse {
        status: "success".to_string(),
        summary,
        result,
    }))
}

/// POST /api/export_csv
///
/// Same body as calculate; responds with the ledger as a CSV attachment.
pub async fn export_csv(request: web::Json<CalculateRequest>) -> Result<HttpResponse> {
    let (_, result) = run_plan(request.into_inner()).await?;
    let body = LedgerCsvExporter::new().with_bom().to_bytes(&result)?;

    Ok(HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", CSV_FILENAME),
        ))
        .body(body))
}

/// GET /
pub async fn index() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(INDEX_HTML)
}

/// Configure repayment routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(index)).service(
        web::scope("/api")
            .route("/calculate", web::post().to(calculate))
            .route("/export_csv", web::post().to(export_csv)),
    );
}
