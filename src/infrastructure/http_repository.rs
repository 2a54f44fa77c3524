// HTTP repository implementation for the progress API
use crate::application::progress_repository::ProgressRepository;
use crate::domain::dashboard::{DashboardSnapshot, Visit};
use crate::domain::unit::Unit;
use crate::infrastructure::config::{ApiSettings, TransportMode};
use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct HttpProgressRepository {
    client: reqwest::Client,
    base_url: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UnitDto {
    id: i64,
    world_id: String,
    unit_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DashboardDto {
    unit_name: String,
    total_students: i64,
    average_score: f64,
    #[serde(default)]
    recent_visits: Vec<VisitDto>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VisitDto {
    student_id: String,
    score: f64,
    visit_date: VisitDateDto,
}

/// `visitDate` arrives as an ISO-8601 string or an epoch number, and some
/// backends stringify the epoch too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum VisitDateDto {
    Epoch(i64),
    Text(String),
}

impl HttpProgressRepository {
    pub fn new(settings: &ApiSettings) -> Result<Self> {
        let client = match settings.transport_mode {
            TransportMode::SameOrigin => reqwest::Client::builder()
                .cookie_store(true)
                .build()
                .context("failed to build HTTP client")?,
            TransportMode::Cors => reqwest::Client::new(),
        };

        Ok(Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn units_url(&self) -> String {
        format!("{}/api/units", self.base_url)
    }

    fn dashboard_url(&self, world_id: &str) -> String {
        format!(
            "{}/api/progress/dashboard/{}",
            self.base_url,
            urlencoding::encode(world_id)
        )
    }

    async fn execute_get<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("failed to send request to progress API")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("progress API request failed with status {}: {}", status, body);
        }

        response
            .json::<T>()
            .await
            .context("failed to parse progress API response")
    }
}

#[async_trait]
impl ProgressRepository for HttpProgressRepository {
    async fn list_units(&self) -> Result<Vec<Unit>> {
        let dtos: Vec<UnitDto> = self.execute_get(&self.units_url()).await?;
        Ok(dtos
            .into_iter()
            .map(|dto| Unit::new(dto.id, dto.world_id, dto.unit_name))
            .collect())
    }

    async fn fetch_dashboard(&self, world_id: &str) -> Result<DashboardSnapshot> {
        let dto: DashboardDto = self.execute_get(&self.dashboard_url(world_id)).await?;

        let mut visits = Vec::with_capacity(dto.recent_visits.len());
        for visit in dto.recent_visits {
            let visit_date = parse_visit_date(&visit.visit_date)?;
            visits.push(Visit::new(visit.student_id, visit.score, visit_date));
        }

        Ok(DashboardSnapshot::new(
            dto.unit_name,
            dto.total_students,
            dto.average_score,
            visits,
        ))
    }
}

/// Epoch values at or above this are taken as milliseconds.
const EPOCH_MILLIS_THRESHOLD: i64 = 100_000_000_000;

fn parse_visit_date(dto: &VisitDateDto) -> Result<DateTime<Utc>> {
    match dto {
        VisitDateDto::Epoch(epoch) => parse_epoch(*epoch),
        VisitDateDto::Text(text) => {
            if let Ok(parsed) = DateTime::parse_from_rfc3339(text) {
                return Ok(parsed.with_timezone(&Utc));
            }
            if let Ok(epoch) = text.parse::<i64>() {
                return parse_epoch(epoch);
            }
            anyhow::bail!("unparseable visit date: {text}")
        }
    }
}

fn parse_epoch(epoch: i64) -> Result<DateTime<Utc>> {
    let parsed = if epoch.abs() >= EPOCH_MILLIS_THRESHOLD {
        Utc.timestamp_millis_opt(epoch)
    } else {
        Utc.timestamp_opt(epoch, 0)
    };
    parsed
        .single()
        .ok_or_else(|| anyhow::anyhow!("epoch visit date out of range: {epoch}"))
}
