// ==========================================
// 牧场载畜平衡系统 - 调拨成本模型
// ==========================================
// 运输 = AU × 距离 × 运输费率
// 处置 = 头数 × 处置费
// 防疫 = 头数 × 防疫费
// 管理 = (运输 + 处置 + 防疫) × 管理费率
// ==========================================

use crate::config::EngineConfig;
use crate::domain::transfer::{CostBreakdown, CostDetails};
use crate::i18n::t_with_args;
use std::sync::Arc;

pub struct CostModel {
    config: Arc<EngineConfig>,
}

impl CostModel {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    /// 调拨成本拆分
    ///
    /// 头数为 0 时单头成本为 0
    pub fn price(&self, head_count: u32, au_moved: f64, distance_km: f64) -> CostBreakdown {
        let cfg = &self.config;
        let heads = head_count as f64;

        let transport = au_moved * distance_km * cfg.transport_rate_per_au_km;
        let handling = heads * cfg.handling_cost_per_head;
        let medical = heads * cfg.medical_cost_per_head;
        let base = transport + handling + medical;
        let administrative = base * cfg.administrative_rate;
        let total = base + administrative;
        let per_head = if head_count > 0 { total / heads } else { 0.0 };

        let details = CostDetails {
            transport: t_with_args(
                "cost.transport_detail",
                &[
                    ("amount", &format!("{:.2}", transport)),
                    ("au", &format!("{:.1}", au_moved)),
                    ("distance", &format!("{}", distance_km)),
                    ("rate", &format!("{:.2}", cfg.transport_rate_per_au_km)),
                ],
            ),
            handling: t_with_args(
                "cost.handling_detail",
                &[
                    ("amount", &format!("{:.2}", handling)),
                    ("heads", &head_count.to_string()),
                    ("rate", &format!("{:.2}", cfg.handling_cost_per_head)),
                ],
            ),
            medical: t_with_args(
                "cost.medical_detail",
                &[
                    ("amount", &format!("{:.2}", medical)),
                    ("heads", &head_count.to_string()),
                    ("rate", &format!("{:.2}", cfg.medical_cost_per_head)),
                ],
            ),
        };

        CostBreakdown {
            transport,
            handling,
            medical,
            administrative,
            total,
            per_head,
            details,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> CostModel {
        CostModel::new(Arc::new(EngineConfig::default()))
    }

    #[test]
    fn test_transport_cost_scenario() {
        let cost = model().price(20, 10.0, 50.0);
        assert_eq!(cost.transport, 1250.0);
    }

    #[test]
    fn test_full_breakdown_scenario() {
        let cost = model().price(20, 10.0, 50.0);
        assert_eq!(cost.handling, 1000.0);
        assert_eq!(cost.medical, 600.0);
        assert_eq!(cost.administrative, 285.0);
        assert_eq!(cost.total, 3135.0);
        assert_eq!(cost.per_head, 156.75);
        assert!(cost.details.transport.contains("1250.00"));
        assert!(cost.details.handling.contains("20"));
    }

    #[test]
    fn test_zero_heads_has_zero_per_head() {
        let cost = model().price(0, 0.0, 80.0);
        assert_eq!(cost.total, 0.0);
        assert_eq!(cost.per_head, 0.0);
    }
}
