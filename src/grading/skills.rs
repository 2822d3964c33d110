use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::CategorizedResult;

use super::ResultStore;

/// Bucket for results whose assessment has no category.
pub const DEFAULT_CATEGORY: &str = "General";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSummary {
    pub category: String,
    pub total_assessments: i64,
    pub average_score: i64,
    pub total_score: i64,
    pub last_attempt: DateTime<Utc>,
}

impl SkillSummary {
    fn empty(category: &str, seen_at: DateTime<Utc>) -> Self {
        Self {
            category: category.to_string(),
            total_assessments: 0,
            average_score: 0,
            total_score: 0,
            last_attempt: seen_at,
        }
    }

    fn fold(&mut self, result: &CategorizedResult) {
        self.total_assessments += 1;
        self.total_score += i64::from(result.percentage);
        self.average_score = (2 * self.total_score + self.total_assessments)
            / (2 * self.total_assessments);
        if result.submitted_at > self.last_attempt {
            self.last_attempt = result.submitted_at;
        }
    }
}

fn category_label(raw: Option<&str>) -> &str {
    match raw {
        Some(label) if !label.is_empty() => label,
        _ => DEFAULT_CATEGORY,
    }
}

/// Group results by category, keeping categories in first-seen order.
pub fn aggregate(results: &[CategorizedResult]) -> Vec<SkillSummary> {
    let mut buckets: Vec<SkillSummary> = Vec::new();
    let mut slots: HashMap<String, usize> = HashMap::new();

    for result in results {
        let category = category_label(result.skill_category.as_deref());
        let slot = match slots.get(category) {
            Some(&slot) => slot,
            None => {
                buckets.push(SkillSummary::empty(category, result.submitted_at));
                slots.insert(category.to_string(), buckets.len() - 1);
                buckets.len() - 1
            }
        };
        buckets[slot].fold(result);
    }

    buckets
}

/// Per-category skill breakdown of everything `user_id` has submitted.
pub async fn analyze<S>(store: &S, user_id: i64) -> Result<Vec<SkillSummary>, sqlx::Error>
where
    S: ResultStore + ?Sized,
{
    let results = store.fetch_results_for_user(user_id).await?;
    Ok(aggregate(&results))
}
