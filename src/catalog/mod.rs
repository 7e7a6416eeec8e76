pub mod cache;
pub mod dto;

use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::error::AppError;
use crate::models::{Course, CourseLevel, Period, Term};

pub use cache::CourseCache;

#[derive(Clone, Debug)]
pub struct CatalogConfig {
    pub base_url: String,
    pub api_token: Option<String>,
}

impl CatalogConfig {
    pub fn new_from_env() -> Result<Self, AppError> {
        let base_url = env::var("CATALOG_URL")
            .map_err(|_| AppError::BadRequest("CATALOG_URL is not set".to_string()))?;
        let api_token = env::var("CATALOG_TOKEN").ok();

        Ok(Self { base_url, api_token })
    }
}

/// Read-only source of catalog courses. The HTTP implementation talks
/// to the hosted catalog; the noop one serves an empty catalog so the
/// service can run without credentials.
#[async_trait]
pub trait CatalogClient: Send + Sync {
    async fn fetch_courses(&self, program: Option<&str>) -> Result<Vec<Course>, AppError>;
}

pub struct HttpCatalogClient {
    client: Client,
    config: CatalogConfig,
}

impl HttpCatalogClient {
    pub fn new(config: CatalogConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .build()
            .map_err(|e| AppError::BadRequest(format!("Failed to build http client: {}", e)))?;
        Ok(Self { client, config })
    }
}

#[async_trait]
impl CatalogClient for HttpCatalogClient {
    async fn fetch_courses(&self, program: Option<&str>) -> Result<Vec<Course>, AppError> {
        let url = format!("{}/courses", self.config.base_url.trim_end_matches('/'));

        let mut request = self.client.get(&url);
        if let Some(program) = program {
            request = request.query(&[("program", program)]);
        }
        if let Some(token) = &self.config.api_token {
            request = request.header("Authorization", format!("Bearer {}", token));
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("catalog request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Upstream(format!("catalog error {}: {}", status, body)));
        }

        let parsed: dto::CourseListResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Failed to parse catalog response: {}", e)))?;

        let mut courses = Vec::new();
        for record in parsed.results {
            match record.into_course() {
                Ok(course) => courses.push(course),
                Err(e) => {
                    tracing::warn!("Skipping malformed catalog record: {}", e);
                }
            }
        }
        Ok(courses)
    }
}

pub struct NoopCatalogClient;

#[async_trait]
impl CatalogClient for NoopCatalogClient {
    async fn fetch_courses(&self, _program: Option<&str>) -> Result<Vec<Course>, AppError> {
        Ok(Vec::new())
    }
}

/// Facet filter applied in-memory over a fetched course list.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseFilter {
    pub program: Option<String>,
    pub term: Option<Term>,
    pub period: Option<Period>,
    pub block: Option<u8>,
    pub level: Option<CourseLevel>,
    pub campus: Option<String>,
    pub q: Option<String>,
}

pub fn filter_courses(courses: &[Course], filter: &CourseFilter) -> Vec<Course> {
    courses
        .iter()
        .filter(|course| {
            if let Some(program) = &filter.program {
                if !course.programs.iter().any(|p| p == program) {
                    return false;
                }
            }
            if let Some(term) = filter.term {
                if !course.terms.contains(&term) {
                    return false;
                }
            }
            if let Some(period) = filter.period {
                if !course.periods.contains(&period) {
                    return false;
                }
            }
            if let Some(block) = filter.block {
                if !course.blocks.contains(&block) {
                    return false;
                }
            }
            if let Some(level) = filter.level {
                if course.level != level {
                    return false;
                }
            }
            if let Some(campus) = &filter.campus {
                if !course.campus.eq_ignore_ascii_case(campus) {
                    return false;
                }
            }
            if let Some(q) = &filter.q {
                let needle = q.to_lowercase();
                if !course.code.to_lowercase().contains(&needle)
                    && !course.name.to_lowercase().contains(&needle)
                {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect()
}
