// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::config::settings::ForecastSettings;
use crate::domain::models::forecast::DemandForecast;
use crate::domain::models::recommendation::{DistributionRecommendation, RecommendationType};
use crate::domain::models::work_item::{Priority, WorkItem};
use std::collections::HashMap;
use uuid::Uuid;

/// 推荐引擎的输入
///
/// `work_items` 按成员ID索引，值为该成员在看板上的工作项（可包含已完成项，引擎会过滤）；
/// `display_names` 缺失时回退到预测的标签
#[derive(Debug, Default)]
pub struct RecommendationInput<'a> {
    pub forecasts: &'a [DemandForecast],
    pub work_items: HashMap<Uuid, Vec<WorkItem>>,
    pub display_names: HashMap<Uuid, String>,
}

/// 推荐引擎
///
/// 针对每个过载成员：推迟其低优先级任务，或把中/低优先级任务
/// 重新分配给有空余容量的成员
#[derive(Debug, Clone)]
pub struct RecommendationEngine {
    settings: ForecastSettings,
}

impl RecommendationEngine {
    pub fn new(settings: &ForecastSettings) -> Self {
        Self {
            settings: settings.clone(),
        }
    }

    /// 是否可作为重新分配的目标
    pub fn is_underutilized(&self, forecast: &DemandForecast) -> bool {
        forecast.target.person_id().is_some()
            && !forecast.is_overloaded()
            && forecast.headroom_hours() > self.settings.underutilized_headroom_hours
    }

    /// 可移动的候选任务
    ///
    /// 仅包含待办和进行中的项，按紧急程度从低到高，再按截止日期（无日期的排最后）
    pub fn movable_items(items: &[WorkItem]) -> Vec<&WorkItem> {
        let mut movable: Vec<&WorkItem> = items
            .iter()
            .filter(|item| item.status.is_movable())
            .collect();
        movable.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then_with(|| match (a.due_date, b.due_date) {
                    (Some(x), Some(y)) => x.cmp(&y),
                    (Some(_), None) => std::cmp::Ordering::Less,
                    (None, Some(_)) => std::cmp::Ordering::Greater,
                    (None, None) => std::cmp::Ordering::Equal,
                })
        });
        movable
    }

    /// 生成建议
    ///
    /// 结果按 `priority` 升序排列，同一等级内保持生成顺序
    pub fn recommend(
        &self,
        board_id: Uuid,
        input: &RecommendationInput<'_>,
    ) -> Vec<DistributionRecommendation> {
        let underutilized: Vec<&DemandForecast> = input
            .forecasts
            .iter()
            .filter(|f| self.is_underutilized(f))
            .take(self.settings.max_reassign_targets)
            .collect();

        let mut recommendations = Vec::new();
        for forecast in input.forecasts.iter().filter(|f| f.is_overloaded()) {
            let Some(member) = forecast.target.person_id() else {
                continue;
            };
            let member_name = Self::name_of(input, member, forecast);
            let items = input
                .work_items
                .get(&member)
                .map(|items| Self::movable_items(items))
                .unwrap_or_default();

            recommendations.extend(self.defer_candidates(board_id, forecast, member, &member_name, &items));

            if items.is_empty() {
                continue;
            }
            let reassignable: Vec<&WorkItem> = items
                .iter()
                .copied()
                .filter(|item| matches!(item.priority, Priority::Medium | Priority::Low))
                .take(self.settings.max_reassign_tasks)
                .collect();
            if reassignable.is_empty() {
                continue;
            }

            for target in &underutilized {
                let Some(target_id) = target.target.person_id() else {
                    continue;
                };
                let target_name = Self::name_of(input, target_id, target);
                let mut rec = DistributionRecommendation::new(
                    board_id,
                    forecast.id,
                    RecommendationType::Reassign,
                    self.settings.reassign_priority,
                    format!("Reassign to {}", target_name),
                    format!(
                        "Reassign tasks from {} to {}. {} has available capacity and can handle additional work.",
                        member_name, target_name, target_name
                    ),
                    self.settings.reassign_savings_hours,
                    self.settings.reassign_confidence,
                );
                rec.affected_tasks = reassignable.iter().map(|item| item.id).collect();
                rec.affected_users = vec![member, target_id];
                recommendations.push(rec);
            }
        }

        recommendations.sort_by_key(|rec| rec.priority);
        recommendations
    }

    fn defer_candidates(
        &self,
        board_id: Uuid,
        forecast: &DemandForecast,
        member: Uuid,
        member_name: &str,
        items: &[&WorkItem],
    ) -> Vec<DistributionRecommendation> {
        items
            .iter()
            .filter(|item| item.priority == Priority::Low)
            .take(self.settings.max_defer_per_resource)
            .map(|item| {
                let mut rec = DistributionRecommendation::new(
                    board_id,
                    forecast.id,
                    RecommendationType::Defer,
                    self.settings.defer_priority,
                    format!("Defer: {}", item.title),
                    format!(
                        "Defer task '{}' to later period to reduce current workload on {}. \
                         This task is marked as low priority and can be scheduled after high-priority items.",
                        item.title, member_name
                    ),
                    self.settings.defer_savings_hours,
                    self.settings.defer_confidence,
                );
                rec.affected_tasks = vec![item.id];
                rec.affected_users = vec![member];
                rec
            })
            .collect()
    }

    fn name_of(input: &RecommendationInput<'_>, id: Uuid, forecast: &DemandForecast) -> String {
        input
            .display_names
            .get(&id)
            .cloned()
            .unwrap_or_else(|| forecast.label())
    }
}

#[cfg(test)]
#[path = "recommendation_engine_test.rs"]
mod tests;
