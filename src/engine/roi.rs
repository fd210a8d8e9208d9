// ==========================================
// 牧场载畜平衡系统 - ROI 评估引擎
// ==========================================
// roi% = 年收益 / 总成本 × 100
// 回收期 (月) = 总成本 / (年收益 / 12)，年收益 <= 0 时取哨兵值
// 总成本为 0 时 roi% 与回收期均为 0
// ==========================================

use crate::config::EngineConfig;
use crate::domain::transfer::{BenefitBreakdown, CostBreakdown, RoiResult, ViabilityCheck};
use crate::domain::types::RoiTier;
use crate::engine::viability::describe_rejection;
use crate::i18n::t_with_args;
use std::sync::Arc;

// 档位下限 (%)
const EXCELLENT_FROM_PCT: f64 = 100.0;
const GOOD_FROM_PCT: f64 = 50.0;
const FAIR_FROM_PCT: f64 = 20.0;

pub struct RoiEvaluator {
    config: Arc<EngineConfig>,
}

impl RoiEvaluator {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算 ROI 结论
    pub fn evaluate(&self, cost: &CostBreakdown, benefit: &BenefitBreakdown) -> RoiResult {
        let cost_total = cost.total;
        let benefit_annual = benefit.annual_total;

        let (roi_pct, payback_months) = if cost_total == 0.0 {
            (0.0, 0.0)
        } else {
            let roi = benefit_annual / cost_total * 100.0;
            let payback = if benefit_annual > 0.0 {
                cost_total / (benefit_annual / 12.0)
            } else {
                self.config.payback_sentinel_months
            };
            (roi, payback)
        };

        RoiResult {
            cost_total,
            benefit_annual,
            roi_pct,
            payback_months,
            accept: roi_pct >= self.config.min_accept_roi_pct,
            tier: Self::tier(roi_pct),
        }
    }

    /// ROI 档位
    pub fn tier(roi_pct: f64) -> RoiTier {
        if roi_pct >= EXCELLENT_FROM_PCT {
            RoiTier::Excellent
        } else if roi_pct >= GOOD_FROM_PCT {
            RoiTier::Good
        } else if roi_pct >= FAIR_FROM_PCT {
            RoiTier::Fair
        } else {
            RoiTier::Low
        }
    }

    /// 本地化结论文本
    ///
    /// - 不可行: NOT RECOMMENDED + 原因
    /// - 可行且 ROI 达标: RECOMMENDED + ROI + 回收期
    /// - 可行但 ROI 不达标: 提示评估紧迫性
    pub fn verdict(&self, viability: &ViabilityCheck, roi: &RoiResult) -> String {
        if !viability.viable {
            let reason = viability
                .rejection
                .as_ref()
                .map(describe_rejection)
                .unwrap_or_default();
            return t_with_args("verdict.not_recommended", &[("reason", &reason)]);
        }

        let roi_text = format!("{:.0}", roi.roi_pct);
        if roi.accept {
            t_with_args(
                "verdict.recommended",
                &[
                    ("roi", &roi_text),
                    ("payback", &format!("{:.1}", roi.payback_months)),
                ],
            )
        } else {
            t_with_args("verdict.low_roi", &[("roi", &roi_text)])
        }
    }
}
