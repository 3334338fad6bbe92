//! Scan history persistence
//!
//! Keeps a record of every single-text scan in sqlite so the dashboard
//! endpoints can show recent activity and aggregate statistics. Only a
//! short preview of the scanned text is stored, never the full input.

use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::analysis::AnalysisReport;

/// Stored preview length, in characters
const PREVIEW_CHARS: usize = 100;

/// One recorded scan
#[derive(Debug, Clone, serde::Serialize)]
pub struct ScanRecord {
    pub id: String,
    pub preview: String,
    pub prediction: String,
    pub confidence: f64,
    pub risk_level: String,
    pub text_length: i64,
    pub created_at: String,
}

/// Aggregate scan statistics
#[derive(Debug, Clone, serde::Serialize)]
pub struct ScanStats {
    pub total_scans: u64,
    pub spam_count: u64,
    pub ham_count: u64,
    pub avg_confidence: f64,
}

/// Scan history store
pub struct ScanStore {
    db: SqlitePool,
}

impl ScanStore {
    pub fn new(db: SqlitePool) -> Self {
        Self { db }
    }

    /// Initialize database tables
    pub async fn init_db(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS scan_log (
                id TEXT PRIMARY KEY,
                preview TEXT NOT NULL,
                prediction TEXT NOT NULL,
                confidence REAL NOT NULL,
                risk_level TEXT NOT NULL,
                text_length INTEGER NOT NULL,
                created_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Record one completed scan
    pub async fn record(&self, text: &str, report: &AnalysisReport) -> Result<()> {
        let id = Uuid::new_v4().to_string();
        let preview: String = text.chars().take(PREVIEW_CHARS).collect();

        sqlx::query(
            "INSERT INTO scan_log (id, preview, prediction, confidence, risk_level, text_length, created_at) VALUES (?, ?, ?, ?, ?, ?, ?)"
        )
        .bind(&id)
        .bind(&preview)
        .bind(report.prediction.as_str())
        .bind(report.confidence)
        .bind(report.risk_level.as_str())
        .bind(report.text_length as i64)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.db)
        .await?;

        Ok(())
    }

    /// Most recent scans, newest first
    pub async fn recent(&self, limit: i64) -> Result<Vec<ScanRecord>> {
        let rows = sqlx::query_as::<_, (String, String, String, f64, String, i64, String)>(
            "SELECT id, preview, prediction, confidence, risk_level, text_length, created_at FROM scan_log ORDER BY created_at DESC LIMIT ?"
        )
        .bind(limit)
        .fetch_all(&self.db)
        .await?;

        let records = rows
            .into_iter()
            .map(
                |(id, preview, prediction, confidence, risk_level, text_length, created_at)| {
                    ScanRecord {
                        id,
                        preview,
                        prediction,
                        confidence,
                        risk_level,
                        text_length,
                        created_at,
                    }
                },
            )
            .collect();

        Ok(records)
    }

    /// Aggregate statistics over the whole log
    pub async fn stats(&self) -> Result<ScanStats> {
        let (total_scans,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM scan_log")
            .fetch_one(&self.db)
            .await?;

        let (spam_count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM scan_log WHERE prediction = 'spam'")
                .fetch_one(&self.db)
                .await?;

        let (avg_confidence,): (Option<f64>,) =
            sqlx::query_as("SELECT AVG(confidence) FROM scan_log")
                .fetch_one(&self.db)
                .await?;

        Ok(ScanStats {
            total_scans: total_scans as u64,
            spam_count: spam_count as u64,
            ham_count: (total_scans - spam_count) as u64,
            avg_confidence: avg_confidence.unwrap_or(0.0),
        })
    }

    /// Delete all recorded scans, returning how many were removed
    pub async fn clear(&self) -> Result<u64> {
        let result = sqlx::query("DELETE FROM scan_log").execute(&self.db).await?;
        Ok(result.rows_affected())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{IndicatorSet, PatternSet, RiskLevel};
    use crate::model::Label;

    fn report(prediction: Label, confidence: f64, risk_level: RiskLevel) -> AnalysisReport {
        AnalysisReport {
            prediction,
            confidence,
            text_length: 42,
            normalized_length: 20,
            indicators: IndicatorSet {
                suspicious_keywords: Vec::new(),
                url_count: 0,
                caps_percentage: 0.0,
                exclamation_count: 0,
                money_terms: Vec::new(),
                urgency_words: Vec::new(),
            },
            risk_level,
            recommendations: Vec::new(),
            word_importance: Vec::new(),
            patterns: PatternSet {
                urls: Vec::new(),
                email_addresses: Vec::new(),
                phone_numbers: Vec::new(),
                ip_addresses: Vec::new(),
                dollar_amounts: Vec::new(),
                percentages: Vec::new(),
            },
            ensemble: None,
        }
    }

    async fn store() -> ScanStore {
        let pool = SqlitePool::connect("sqlite::memory:").await.unwrap();
        let store = ScanStore::new(pool);
        store.init_db().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_record_and_recent() {
        let store = store().await;
        store
            .record("free money", &report(Label::Spam, 0.98, RiskLevel::High))
            .await
            .unwrap();
        store
            .record("meeting notes", &report(Label::Ham, 0.92, RiskLevel::Low))
            .await
            .unwrap();

        let records = store.recent(10).await.unwrap();
        assert_eq!(records.len(), 2);
        assert!(records.iter().any(|r| r.prediction == "spam"));
        assert!(records.iter().any(|r| r.risk_level == "Low"));
    }

    #[tokio::test]
    async fn test_recent_respects_limit() {
        let store = store().await;
        for _ in 0..5 {
            store
                .record("text", &report(Label::Ham, 0.9, RiskLevel::Low))
                .await
                .unwrap();
        }

        let records = store.recent(3).await.unwrap();
        assert_eq!(records.len(), 3);
    }

    #[tokio::test]
    async fn test_preview_is_truncated() {
        let store = store().await;
        let long_text = "x".repeat(500);
        store
            .record(&long_text, &report(Label::Spam, 0.9, RiskLevel::High))
            .await
            .unwrap();

        let records = store.recent(1).await.unwrap();
        assert_eq!(records[0].preview.chars().count(), PREVIEW_CHARS);
    }

    #[tokio::test]
    async fn test_stats() {
        let store = store().await;
        store
            .record("one", &report(Label::Spam, 1.0, RiskLevel::High))
            .await
            .unwrap();
        store
            .record("two", &report(Label::Ham, 0.5, RiskLevel::Medium))
            .await
            .unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_scans, 2);
        assert_eq!(stats.spam_count, 1);
        assert_eq!(stats.ham_count, 1);
        assert!((stats.avg_confidence - 0.75).abs() < 1e-9);
    }

    #[tokio::test]
    async fn test_stats_on_empty_log() {
        let store = store().await;
        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_scans, 0);
        assert_eq!(stats.avg_confidence, 0.0);
    }

    #[tokio::test]
    async fn test_clear() {
        let store = store().await;
        store
            .record("one", &report(Label::Spam, 1.0, RiskLevel::High))
            .await
            .unwrap();
        store
            .record("two", &report(Label::Ham, 0.5, RiskLevel::Low))
            .await
            .unwrap();

        assert_eq!(store.clear().await.unwrap(), 2);
        assert!(store.recent(10).await.unwrap().is_empty());
        assert_eq!(store.stats().await.unwrap().total_scans, 0);
    }
}
