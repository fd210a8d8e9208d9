// ==========================================
// 牧场载畜平衡系统 - 调拨收益模型
// ==========================================
// 收益 (年化) = 超载损失规避 + 闲置草场利用 + 资源优化
// 快速估算仅用于平衡报告的展示排序
// ==========================================

use crate::config::EngineConfig;
use crate::domain::assessment::{CapacityAssessment, StockingConstraint};
use crate::domain::transfer::BenefitBreakdown;
use std::sync::Arc;

// 快速估算单价 (每 AU 每年)
const QUICK_RELIEF_VALUE_PER_AU: f64 = 800.0;
const QUICK_BASE_VALUE_PER_AU: f64 = 400.0;
const QUICK_IDLE_BONUS_PER_AU: f64 = 200.0;

pub struct BenefitModel {
    config: Arc<EngineConfig>,
}

impl BenefitModel {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    /// 收益拆分
    ///
    /// 1) 起点利用率 > relief_reference_pct:
    ///    超出参考线的 AU × AU 市值 × 月损失率 × 12
    /// 2) 终点利用率 < idle_destination_below_pct:
    ///    min(终点剩余容量, 调拨 AU) × 闲置草场价值
    /// 3) 调拨 AU × 资源优化价值
    pub fn estimate(
        &self,
        origin: &CapacityAssessment,
        destination: &CapacityAssessment,
        au_moved: f64,
    ) -> BenefitBreakdown {
        let cfg = &self.config;

        let overload_relief = if origin.utilization_pct > cfg.relief_reference_pct {
            let monthly = origin.excess_over(cfg.relief_reference_pct)
                * cfg.au_market_value
                * cfg.monthly_loss_rate;
            monthly * 12.0
        } else {
            0.0
        };

        let pasture_utilization = if destination.utilization_pct < cfg.idle_destination_below_pct {
            (destination.au_available * cfg.idle_pasture_value_per_au)
                .min(au_moved * cfg.idle_pasture_value_per_au)
        } else {
            0.0
        };

        let optimization = au_moved * cfg.optimization_value_per_au;
        let annual_total = overload_relief + pasture_utilization + optimization;

        BenefitBreakdown {
            overload_relief,
            pasture_utilization,
            optimization,
            annual_total,
            monthly_total: annual_total / 12.0,
        }
    }

    /// 快速收益估算
    ///
    /// 起点 > high_above_pct 按 800/AU，否则 400/AU；
    /// 终点 < underused_below_pct 再加 200/AU
    pub fn quick_estimate(&self, origin_utilization: f64, destination_utilization: f64, au: f64) -> f64 {
        let mut benefit = if origin_utilization > self.config.high_above_pct {
            au * QUICK_RELIEF_VALUE_PER_AU
        } else {
            au * QUICK_BASE_VALUE_PER_AU
        };
        if destination_utilization < self.config.underused_below_pct {
            benefit += au * QUICK_IDLE_BONUS_PER_AU;
        }
        benefit
    }
}
