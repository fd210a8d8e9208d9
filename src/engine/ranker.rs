// ==========================================
// 牧场载畜平衡系统 - 调拨建议排序
// ==========================================
// 优先级 (0-100) = 起点利用率基准分 + min(20, AU × 2)，上限 100
// 基准分: >100 -> 100, >90 -> 80, >80 -> 60, 其余 -> 40
// ==========================================

use crate::domain::transfer::TransferRecommendation;
use std::cmp::Ordering;

const PRIORITY_CAP: f64 = 100.0;
const AU_BONUS_PER_AU: f64 = 2.0;
const AU_BONUS_CAP: f64 = 20.0;

#[derive(Debug, Default)]
pub struct RecommendationRanker;

impl RecommendationRanker {
    pub fn new() -> Self {
        Self
    }

    /// 调拨优先级
    pub fn priority(&self, origin_utilization: f64, au_moved: f64) -> f64 {
        let base = if origin_utilization > 100.0 {
            100.0
        } else if origin_utilization > 90.0 {
            80.0
        } else if origin_utilization > 80.0 {
            60.0
        } else {
            40.0
        };
        let bonus = (au_moved * AU_BONUS_PER_AU).min(AU_BONUS_CAP);
        (base + bonus).min(PRIORITY_CAP)
    }

    /// 全局扫描排序: 仅保留 ROI 达标且可行的建议，ROI 降序
    ///
    /// ROI 相同再按优先级降序、起终点 ID 升序
    pub fn rank_by_roi(&self, recommendations: Vec<TransferRecommendation>) -> Vec<TransferRecommendation> {
        let mut kept: Vec<TransferRecommendation> = recommendations
            .into_iter()
            .filter(|r| r.roi.accept && r.viability.viable)
            .collect();

        kept.sort_by(|a, b| {
            b.roi
                .roi_pct
                .total_cmp(&a.roi.roi_pct)
                .then_with(|| b.priority.total_cmp(&a.priority))
                .then_with(|| by_route(a, b))
        });
        kept
    }

    /// 平衡报告排序: 优先级降序，优先级相同按预估收益降序
    pub fn rank_by_priority(&self, mut recommendations: Vec<TransferRecommendation>) -> Vec<TransferRecommendation> {
        recommendations.sort_by(|a, b| {
            b.priority
                .total_cmp(&a.priority)
                .then_with(|| b.estimated_benefit.total_cmp(&a.estimated_benefit))
                .then_with(|| by_route(a, b))
        });
        recommendations
    }
}

fn by_route(a: &TransferRecommendation, b: &TransferRecommendation) -> Ordering {
    a.origin_id
        .cmp(&b.origin_id)
        .then_with(|| a.destination_id.cmp(&b.destination_id))
}
