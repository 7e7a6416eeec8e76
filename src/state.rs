use std::sync::Arc;

use sqlx::SqlitePool;

use crate::catalog::{CatalogClient, CourseCache};

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub catalog: Arc<dyn CatalogClient>,
    pub courses: Arc<CourseCache>,
}
