#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use oxide_schema_ext::SchemaConnection;

/// In-memory connection that records metadata queries and statements.
#[derive(Debug)]
pub struct FakeConnection {
    driver: &'static str,
    prefix: String,
    tables: Vec<String>,
    fail: bool,
    metadata_queries: AtomicUsize,
    executed: Mutex<Vec<String>>,
}

impl FakeConnection {
    pub fn new(driver: &'static str, prefix: &str, tables: &[&str]) -> Self {
        Self {
            driver,
            prefix: prefix.to_string(),
            tables: tables.iter().map(|t| (*t).to_string()).collect(),
            fail: false,
            metadata_queries: AtomicUsize::new(0),
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn mysql(prefix: &str, tables: &[&str]) -> Self {
        Self::new("mysql", prefix, tables)
    }

    pub fn postgres(prefix: &str, tables: &[&str]) -> Self {
        Self::new("postgres", prefix, tables)
    }

    /// Makes every query fail as if the pool were exhausted.
    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }

    pub fn metadata_queries(&self) -> usize {
        self.metadata_queries.load(Ordering::SeqCst)
    }

    pub fn executed(&self) -> Vec<String> {
        self.executed.lock().unwrap().clone()
    }
}

impl SchemaConnection for FakeConnection {
    fn driver_name(&self) -> &str {
        self.driver
    }

    fn table_prefix(&self) -> &str {
        &self.prefix
    }

    async fn table_names(&self) -> Result<Vec<String>, sqlx::Error> {
        self.metadata_queries.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(sqlx::Error::PoolTimedOut);
        }
        Ok(self.tables.clone())
    }

    async fn execute(&self, sql: &str) -> Result<u64, sqlx::Error> {
        if self.fail {
            return Err(sqlx::Error::PoolTimedOut);
        }
        self.executed.lock().unwrap().push(sql.to_string());
        Ok(0)
    }
}
