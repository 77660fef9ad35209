use axum::extract::{Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{get, post};
use axum::{Json, Router};
use axum_prometheus::PrometheusMetricLayer;
use clap::{Args, Parser, Subcommand};
use insulin_atlas::config::AppConfig;
use insulin_atlas::datasets::{self, AtlasDatasets};
use insulin_atlas::error::AppError;
use insulin_atlas::report::{self, DistrictRiskReport};
use insulin_atlas::scoring::{
    overall_risk, policy_summary, score_all, score_breakdown, CategoryBreakdown, CategoryScores,
    PolicySummary, RiskLevel, ScorecardMetrics,
};
use insulin_atlas::telemetry;
use insulin_atlas::domain::{
    filter_alerts, sort_districts, Alert, AlertFilter, DistrictSortKey, SortDirection,
};
use metrics_exporter_prometheus::PrometheusHandle;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
struct AppState {
    readiness: Arc<AtomicBool>,
    metrics: PrometheusHandle,
    datasets: Arc<AtlasDatasets>,
}

#[derive(Parser, Debug)]
#[command(
    name = "Insulin Access Atlas",
    about = "Score congressional districts for insulin access risk from the command line or over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Generate per-district risk reports
    District {
        #[command(subcommand)]
        command: DistrictCommand,
    },
}

#[derive(Args, Debug, Default)]
struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum DistrictCommand {
    /// Build a district risk report and optional facility listing
    Report(DistrictReportArgs),
}

#[derive(Args, Debug)]
struct DistrictReportArgs {
    /// District identifier, e.g. MA-04
    #[arg(long)]
    district: String,
    /// Optional facility roster CSV to score against instead of stored data
    #[arg(long)]
    facilities: Option<PathBuf>,
    /// Include a full facility listing in the output
    #[arg(long)]
    list_facilities: bool,
}

#[derive(Debug, Deserialize)]
struct DistrictReportRequest {
    district_id: String,
    #[serde(default)]
    facilities_csv: Option<String>,
    #[serde(default)]
    include_facilities: bool,
}

#[derive(Debug, Serialize)]
struct DistrictReportResponse {
    data_source: RosterSource,
    #[serde(flatten)]
    report: DistrictRiskReport,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum RosterSource {
    Imported,
    Stored,
}

#[derive(Debug, Default, Deserialize)]
struct DistrictListQuery {
    #[serde(default)]
    sort_by: Option<DistrictSortKey>,
    #[serde(default)]
    direction: Option<SortDirection>,
}

#[tokio::main]
async fn main() {
    if let Err(err) = run_cli().await {
        eprintln!("application error: {err}");
        std::process::exit(1);
    }
}

async fn run_cli() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => run_server(args).await,
        Command::District {
            command: DistrictCommand::Report(args),
        } => run_district_report(args),
    }
}

async fn run_server(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }

    telemetry::init(&config.telemetry)?;

    let datasets = match &config.data.directory {
        Some(dir) => AtlasDatasets::load(dir)?,
        None => AtlasDatasets::sample(),
    };

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let state = AppState {
        readiness: readiness_flag.clone(),
        metrics: prometheus_handle,
        datasets: Arc::new(datasets),
    };

    let app = build_router(state).layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "insulin access atlas ready");

    axum::serve(listener, app).await?;
    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/districts", get(district_list_endpoint))
        .route("/api/v1/districts/report", post(district_report_endpoint))
        .route("/api/v1/alerts", get(alerts_endpoint))
        .route("/api/v1/scorecard", post(scorecard_endpoint))
        .route("/api/v1/policies/summary", get(policy_summary_endpoint))
        .with_state(state)
}

fn run_district_report(args: DistrictReportArgs) -> Result<(), AppError> {
    let DistrictReportArgs {
        district,
        facilities,
        list_facilities,
    } = args;

    let config = AppConfig::load()?;
    let atlas = match &config.data.directory {
        Some(dir) => AtlasDatasets::load(dir)?,
        None => AtlasDatasets::sample(),
    };

    let district = atlas.district(&district)?;
    let imported = facilities.is_some();
    let roster = match facilities {
        Some(path) => datasets::roster_from_path(&path)?,
        None => atlas.facilities_in_state(&district.state_code),
    };

    let report = report::build_report(district, &roster, &atlas, list_facilities);
    render_district_report(&report, imported, list_facilities);

    Ok(())
}

async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

async fn readiness_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

async fn metrics_endpoint(State(state): State<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

async fn district_list_endpoint(
    State(state): State<AppState>,
    Query(query): Query<DistrictListQuery>,
) -> Json<Vec<report::DistrictListEntry>> {
    let mut districts = state.datasets.districts.clone();
    sort_districts(
        &mut districts,
        query.sort_by.unwrap_or(DistrictSortKey::RiskScore),
        query.direction.unwrap_or(SortDirection::Descending),
    );
    Json(report::district_list(&districts))
}

async fn district_report_endpoint(
    State(state): State<AppState>,
    Json(payload): Json<DistrictReportRequest>,
) -> Result<Json<DistrictReportResponse>, AppError> {
    let DistrictReportRequest {
        district_id,
        facilities_csv,
        include_facilities,
    } = payload;

    let district = state.datasets.district(&district_id)?;

    let (roster, data_source) = match facilities_csv {
        Some(csv) => {
            let roster = datasets::parse_roster(Cursor::new(csv.into_bytes()))?;
            (roster, RosterSource::Imported)
        }
        None => (
            state.datasets.facilities_in_state(&district.state_code),
            RosterSource::Stored,
        ),
    };

    let report = report::build_report(district, &roster, &state.datasets, include_facilities);

    Ok(Json(DistrictReportResponse {
        data_source,
        report,
    }))
}

async fn policy_summary_endpoint(State(state): State<AppState>) -> Json<PolicySummary> {
    Json(policy_summary(&state.datasets.policies))
}

#[derive(Debug, Serialize)]
struct ScorecardResponse {
    category_scores: CategoryScores,
    overall_score: u8,
    risk_level: RiskLevel,
    breakdown: Vec<CategoryBreakdown>,
}

async fn scorecard_endpoint(
    Json(metrics): Json<ScorecardMetrics>,
) -> Json<ScorecardResponse> {
    let category_scores = score_all(&metrics);
    let overall_score = overall_risk(&category_scores);
    Json(ScorecardResponse {
        category_scores,
        overall_score,
        risk_level: RiskLevel::from_score(overall_score),
        breakdown: score_breakdown(&metrics),
    })
}

async fn alerts_endpoint(
    State(state): State<AppState>,
    Query(filter): Query<AlertFilter>,
) -> Json<Vec<Alert>> {
    Json(filter_alerts(&state.datasets.alerts, &filter))
}

fn render_district_report(report: &DistrictRiskReport, imported: bool, list_facilities: bool) {
    println!("Insulin access report for {} ({})", report.name, report.state);
    println!(
        "Composite risk: {} ({})",
        report.metrics.risk_score, report.risk_label
    );

    if imported {
        println!("Data source: imported facility roster");
    } else {
        println!("Data source: stored reference facilities");
    }

    println!("\nFactor breakdown");
    for bar in &report.factor_bars {
        println!("- {}: {}", bar.factor, bar.score);
    }

    println!("\nProximity");
    println!(
        "- Average distance to care: {} miles (coverage score {})",
        report.proximity.average_distance, report.proximity.coverage_score
    );
    if let Some(center) = &report.proximity.nearest_center {
        println!("- Nearest health center: {} ({})", center.name, center.city);
    }
    if let Some(pharmacy) = &report.proximity.nearest_pharmacy {
        println!("- Nearest pharmacy: {} ({})", pharmacy.name, pharmacy.city);
    }

    println!("\nPolicy ({})", report.policy.state_name);
    match &report.policy.copay_cap {
        Some(cap) => println!("- Copay cap: {cap}"),
        None => println!("- No copay cap on file"),
    }
    for benefit in &report.policy.benefits {
        println!("- Benefit: {benefit}");
    }
    for limitation in &report.policy.limitations {
        println!("- Limitation: {limitation}");
    }

    if report.shortages.affected_products.is_empty() {
        println!("\nShortages: none affecting this state");
    } else {
        println!("\nShortages (score {})", report.shortages.score);
        for product in &report.shortages.affected_products {
            println!("- {product}");
        }
    }

    println!("\nSuggested actions");
    for action in &report.insights.priority_actions {
        println!("- {} [{:?}]", action.action, action.urgency);
        println!("  {}", action.description);
        if let Some(contact) = &action.contact {
            println!("  Contact: {contact}");
        }
    }

    if list_facilities {
        if let Some(facilities) = &report.facilities {
            println!("\nFacility roster");
            for facility in facilities {
                let distance = facility
                    .distance_miles
                    .map(|miles| format!("{miles} mi"))
                    .unwrap_or_else(|| "n/a".to_string());
                println!(
                    "- {} | {} | {} | {}, {}",
                    facility.id, facility.name, distance, facility.city, facility.state
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let handle = PrometheusBuilder::new()
            .build_recorder()
            .handle();
        AppState {
            readiness: Arc::new(AtomicBool::new(true)),
            metrics: handle,
            datasets: Arc::new(AtlasDatasets::sample()),
        }
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let app = build_router(test_state());
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn readiness_endpoint_reflects_the_flag() {
        let state = test_state();
        state.readiness.store(false, Ordering::Release);
        let app = build_router(state);
        let response = app
            .oneshot(
                Request::builder()
                    .uri("/ready")
                    .body(Body::empty())
                    .expect("request builds"),
            )
            .await
            .expect("router responds");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn district_list_defaults_to_risk_descending() {
        let state = test_state();
        let Json(rows) =
            district_list_endpoint(State(state), Query(DistrictListQuery::default())).await;

        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].id, "GA-07");
        assert!(rows[0].risk_score >= rows[1].risk_score);
    }

    #[tokio::test]
    async fn district_report_endpoint_uses_stored_roster_by_default() {
        let state = test_state();
        let request = DistrictReportRequest {
            district_id: "MA-04".to_string(),
            facilities_csv: None,
            include_facilities: false,
        };

        let Json(body) = district_report_endpoint(State(state), Json(request))
            .await
            .expect("report builds");

        assert_eq!(body.data_source, RosterSource::Stored);
        assert_eq!(body.report.district_id, "MA-04");
        assert!(body.report.facilities.is_none());
    }

    #[tokio::test]
    async fn district_report_endpoint_accepts_an_inline_roster() {
        let state = test_state();
        let csv = "Site ID,Site Name,Facility Type,Street Address,City,State,ZIP Code,Latitude,Longitude,Services,Hours,Phone\n\
                   HC-9,Quincy Community Health,FQHC,500 Hancock St,Quincy,MA,02171,42.2529,-71.0023,Primary Care,Mon-Fri 8AM-5PM,(617) 555-0100\n";
        let request = DistrictReportRequest {
            district_id: "MA-04".to_string(),
            facilities_csv: Some(csv.to_string()),
            include_facilities: true,
        };

        let Json(body) = district_report_endpoint(State(state), Json(request))
            .await
            .expect("report builds");

        assert_eq!(body.data_source, RosterSource::Imported);
        let facilities = body.report.facilities.expect("facility views");
        assert_eq!(facilities.len(), 1);
        assert_eq!(facilities[0].id, "HC-9");
    }

    #[tokio::test]
    async fn district_report_endpoint_rejects_unknown_districts() {
        let state = test_state();
        let request = DistrictReportRequest {
            district_id: "ZZ-99".to_string(),
            facilities_csv: None,
            include_facilities: false,
        };

        let err = district_report_endpoint(State(state), Json(request))
            .await
            .expect_err("unknown district rejected");
        assert!(matches!(err, AppError::Dataset(_)));
    }

    #[tokio::test]
    async fn policy_summary_endpoint_reports_the_capped_states() {
        let Json(summary) = policy_summary_endpoint(State(test_state())).await;
        assert_eq!(summary.total_states, 5);
        assert!(summary.states_with_caps >= 4);
        assert_eq!(summary.best_policy.expect("best policy").state, "NY");
    }

    #[tokio::test]
    async fn scorecard_endpoint_scores_all_five_categories() {
        use insulin_atlas::scoring::category::{
            DemographicIndicators, EconomicIndicators, EducationIndicators, HealthIndicators,
            InfrastructureIndicators,
        };

        let metrics = ScorecardMetrics {
            economic: EconomicIndicators {
                gdp_growth: 2.5,
                unemployment_rate: 4.0,
                median_income: 65_000.0,
                poverty_rate: 12.0,
            },
            demographic: DemographicIndicators {
                population_growth: 1.0,
                age_distribution: 0.16,
                diversity_index: 0.55,
                migration_rate: 2.0,
            },
            education: EducationIndicators {
                graduation_rate: 88.0,
                test_scores: 72.0,
                teacher_ratio: 16.0,
                funding_per_student: 12_000.0,
            },
            health: HealthIndicators {
                life_expectancy: 79.0,
                access_to_care: 80.0,
                health_outcomes: 70.0,
                insurance_coverage: 91.0,
            },
            infrastructure: InfrastructureIndicators {
                road_quality: 60.0,
                broadband_access: 85.0,
                public_transport: 40.0,
                utilities: 75.0,
            },
        };

        let Json(body) = scorecard_endpoint(Json(metrics)).await;
        assert_eq!(body.breakdown.len(), 5);
        assert!(body.overall_score <= 100);
        assert_eq!(body.risk_level, RiskLevel::from_score(body.overall_score));
    }

    #[tokio::test]
    async fn alerts_endpoint_applies_the_query_filter() {
        let state = test_state();
        let filter = AlertFilter {
            district_id: Some("GA-07".to_string()),
            ..AlertFilter::default()
        };

        let Json(alerts) = alerts_endpoint(State(state), Query(filter)).await;
        assert!(!alerts.is_empty());
        assert!(alerts.iter().all(|alert| alert.district_id == "GA-07"));
    }
}
