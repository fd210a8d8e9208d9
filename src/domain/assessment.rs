// ==========================================
// 牧场载畜平衡系统 - 载畜评估领域模型
// ==========================================
// 红线: 评估结果只在请求内有效，不缓存、不落库
// ==========================================

use crate::domain::types::{
    CapacityStatus, CategoryTag, HerdProfile, ImbalanceType, Severity,
};
use serde::{Deserialize, Serialize};

// ==========================================
// CategoryLoad - 单类别载畜量
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryLoad {
    pub category: String,
    pub tag: CategoryTag,
    pub head_count: u32,
    pub au_factor: f64, // 每头折算 AU
    pub au_load: f64,   // head_count × au_factor
}

// ==========================================
// CapacityAssessment - 牧场载畜评估
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacityAssessment {
    // ===== 牧场标识 =====
    pub property_id: String,
    pub property_name: String,
    pub herd_profile: HerdProfile,
    pub area_ha: f64,

    // ===== 载畜指标 =====
    pub au_load: f64,         // 当前载畜量 (AU)
    pub au_capacity: f64,     // 承载能力 (AU)
    pub utilization_pct: f64, // 利用率 (%)
    pub au_surplus: f64,      // 超载量 (仅超载时 > 0)
    pub au_available: f64,    // 剩余容量 (超载时为 0)
    pub status: CapacityStatus,

    // ===== 存栏明细 =====
    pub total_heads: u32,
    pub categories: Vec<CategoryLoad>,
}

impl CapacityAssessment {
    /// 按类别名称查找存栏明细
    pub fn category(&self, name: &str) -> Option<&CategoryLoad> {
        self.categories.iter().find(|c| c.category == name)
    }
}

// ==========================================
// Trait: StockingConstraint
// ==========================================
// 用途: 调拨前后利用率推演
pub trait StockingConstraint {
    /// 调入 au 后的利用率
    fn utilization_after_adding(&self, au: f64) -> f64;

    /// 调出 au 后的利用率
    fn utilization_after_removing(&self, au: f64) -> f64;

    /// 调入 au 后利用率是否不超过 ceiling_pct
    fn can_receive(&self, au: f64, ceiling_pct: f64) -> bool;

    /// 超出 reference_pct 对应载畜量的 AU (不小于 0)
    fn excess_over(&self, reference_pct: f64) -> f64;
}

impl StockingConstraint for CapacityAssessment {
    fn utilization_after_adding(&self, au: f64) -> f64 {
        utilization_pct(self.au_load + au, self.au_capacity)
    }

    fn utilization_after_removing(&self, au: f64) -> f64 {
        utilization_pct(self.au_load - au, self.au_capacity)
    }

    fn can_receive(&self, au: f64, ceiling_pct: f64) -> bool {
        self.utilization_after_adding(au) <= ceiling_pct
    }

    fn excess_over(&self, reference_pct: f64) -> f64 {
        (self.au_load - self.au_capacity * reference_pct / 100.0).max(0.0)
    }
}

/// 利用率 (%)
///
/// 承载能力 <= 0 时返回 0，不做除法
pub fn utilization_pct(au_load: f64, au_capacity: f64) -> f64 {
    if au_capacity > 0.0 {
        au_load * 100.0 / au_capacity
    } else {
        0.0
    }
}

// ==========================================
// ImbalanceRecord - 失衡记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImbalanceRecord {
    pub property_id: String,
    pub property_name: String,
    pub imbalance_type: ImbalanceType,
    pub severity: Severity,
    pub utilization_pct: f64,
    pub au_amount: f64,           // 超载量或剩余容量
    pub suggested_action: String, // 本地化建议
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assessment(load: f64, capacity: f64) -> CapacityAssessment {
        CapacityAssessment {
            property_id: "P1".to_string(),
            property_name: "Fazenda".to_string(),
            herd_profile: HerdProfile::FullCycle,
            area_ha: capacity,
            au_load: load,
            au_capacity: capacity,
            utilization_pct: utilization_pct(load, capacity),
            au_surplus: 0.0,
            au_available: 0.0,
            status: CapacityStatus::Adequate,
            total_heads: 0,
            categories: vec![],
        }
    }

    #[test]
    fn test_utilization_guard_on_zero_capacity() {
        assert_eq!(utilization_pct(50.0, 0.0), 0.0);
        assert_eq!(utilization_pct(50.0, -10.0), 0.0);
        assert_eq!(utilization_pct(150.0, 100.0), 150.0);
    }

    #[test]
    fn test_stocking_constraint_projection() {
        let a = assessment(40.0, 100.0);
        assert_eq!(a.utilization_after_adding(50.0), 90.0);
        assert_eq!(a.utilization_after_removing(20.0), 20.0);
        assert!(a.can_receive(55.0, 95.0));
        assert!(!a.can_receive(56.0, 95.0));
    }

    #[test]
    fn test_excess_over_reference() {
        let a = assessment(150.0, 100.0);
        assert_eq!(a.excess_over(85.0), 65.0);
        let b = assessment(50.0, 100.0);
        assert_eq!(b.excess_over(85.0), 0.0);
    }
}
