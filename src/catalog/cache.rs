use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::models::Course;

/// TTL cache for catalog query results, keyed by the upstream query
/// parameters. Expiry is checked on read; there is no eviction loop,
/// the key space is the handful of program names students browse.
pub struct CourseCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Vec<Course>, Instant)>>,
}

impl CourseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn get(&self, key: &str) -> Option<Vec<Course>> {
        let Ok(mut entries) = self.entries.lock() else {
            return None;
        };
        match entries.get(key) {
            Some((_, inserted_at)) if inserted_at.elapsed() >= self.ttl => {
                entries.remove(key);
                None
            }
            Some((courses, _)) => Some(courses.clone()),
            None => None,
        }
    }

    pub fn put(&self, key: &str, courses: Vec<Course>) {
        if let Ok(mut entries) = self.entries.lock() {
            entries.insert(key.to_string(), (courses, Instant::now()));
        }
    }
}
