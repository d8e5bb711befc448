use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::KinshipManager;
use crate::Result;

/// Counts shown on the research dashboard
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub person_count: usize,
    pub relation_count: usize,
    pub relations_by_type: BTreeMap<String, usize>,
    pub relations_by_category: BTreeMap<String, usize>,
}

impl KinshipManager {
    pub async fn dashboard_stats(&self, user_id: &str) -> Result<DashboardStats> {
        let person_count = self.storage.count_persons_by_owner(user_id).await?;
        let relations = self.storage.list_relations_by_owner(user_id).await?;

        let mut stats = DashboardStats {
            person_count,
            relation_count: relations.len(),
            ..Default::default()
        };

        for relation in &relations {
            *stats
                .relations_by_type
                .entry(relation.relation_type.clone())
                .or_default() += 1;

            let category = self
                .registry
                .category(&relation.relation_type)
                .map(|c| c.to_string())
                .unwrap_or_else(|| "unknown".to_string());
            *stats.relations_by_category.entry(category).or_default() += 1;
        }

        Ok(stats)
    }
}
