// ==========================================
// 牧场载畜平衡系统 - 调拨可行性校验
// ==========================================
// 校验顺序:
// 1) 调出 AU 不超过起点当前载畜量
// 2) 起点存在该类别存栏
// 3) 调出头数不超过该类别存栏 × max_category_share
// 4) 终点调入后利用率不超过 destination_ceiling_pct
// 无论是否可行，都给出调拨后利用率
// ==========================================

use crate::config::EngineConfig;
use crate::domain::assessment::{CapacityAssessment, CategoryLoad, StockingConstraint};
use crate::domain::transfer::{RejectionReason, TransferCandidate, ViabilityCheck};
use crate::engine::matcher::max_category_heads;
use crate::i18n::t_with_args;
use std::sync::Arc;
use tracing::debug;

pub struct ViabilityChecker {
    config: Arc<EngineConfig>,
}

impl ViabilityChecker {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    /// 校验候选调拨
    pub fn check(
        &self,
        origin: &CapacityAssessment,
        destination: &CapacityAssessment,
        candidate: &TransferCandidate,
    ) -> ViabilityCheck {
        let au_moved = candidate.au_moved;
        let origin_after = origin.utilization_after_removing(au_moved);
        let destination_after = destination.utilization_after_adding(au_moved);

        let rejection = self.first_rejection(origin, destination, candidate, destination_after);
        if let Some(reason) = &rejection {
            debug!(
                origin_id = %candidate.origin_id,
                destination_id = %candidate.destination_id,
                reason = %reason,
                "调拨不可行"
            );
        }

        ViabilityCheck {
            viable: rejection.is_none(),
            rejection,
            origin_utilization_after: origin_after,
            destination_utilization_after: destination_after,
            origin_relief_pts: origin.utilization_pct - origin_after,
            destination_increase_pts: destination_after - destination.utilization_pct,
        }
    }

    fn first_rejection(
        &self,
        origin: &CapacityAssessment,
        destination: &CapacityAssessment,
        candidate: &TransferCandidate,
        destination_after: f64,
    ) -> Option<RejectionReason> {
        if candidate.au_moved > origin.au_load {
            return Some(RejectionReason::ExceedsOriginLoad {
                au_moved: candidate.au_moved,
                origin_load: origin.au_load,
            });
        }

        let category = match find_category(origin, &candidate.category) {
            Some(c) if c.head_count > 0 => c,
            _ => {
                return Some(RejectionReason::CategoryAbsent {
                    category: candidate.category.clone(),
                })
            }
        };

        let max_heads = max_category_heads(category.head_count, self.config.max_category_share);
        if candidate.head_count > max_heads {
            return Some(RejectionReason::ExceedsCategoryShare {
                head_count: candidate.head_count,
                max_heads,
            });
        }

        if !destination.can_receive(candidate.au_moved, self.config.destination_ceiling_pct) {
            return Some(RejectionReason::DestinationOverCeiling {
                utilization_after: destination_after,
                ceiling: self.config.destination_ceiling_pct,
            });
        }

        None
    }
}

/// 起点类别查找 (精确匹配优先，其次忽略大小写与首尾空白)
fn find_category<'a>(origin: &'a CapacityAssessment, name: &str) -> Option<&'a CategoryLoad> {
    origin.category(name).or_else(|| {
        let wanted = name.trim().to_lowercase();
        origin
            .categories
            .iter()
            .find(|c| c.category.trim().to_lowercase() == wanted)
    })
}

/// 不可行原因的本地化描述
pub fn describe_rejection(reason: &RejectionReason) -> String {
    match reason {
        RejectionReason::ExceedsOriginLoad { au_moved, origin_load } => t_with_args(
            "rejection.exceeds_origin_load",
            &[
                ("au_moved", &format!("{:.1}", au_moved)),
                ("origin_load", &format!("{:.1}", origin_load)),
            ],
        ),
        RejectionReason::CategoryAbsent { category } => {
            t_with_args("rejection.category_absent", &[("category", category)])
        }
        RejectionReason::ExceedsCategoryShare { head_count, max_heads } => t_with_args(
            "rejection.exceeds_category_share",
            &[
                ("head_count", &head_count.to_string()),
                ("max_heads", &max_heads.to_string()),
            ],
        ),
        RejectionReason::DestinationOverCeiling { utilization_after, .. } => t_with_args(
            "rejection.destination_over_ceiling",
            &[("utilization", &format!("{:.0}", utilization_after))],
        ),
    }
}
