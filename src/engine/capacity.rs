// ==========================================
// 牧场载畜平衡系统 - 载畜能力分析引擎
// ==========================================
// 职责: 存栏 -> 标准化 AU 载畜量，草场面积 -> AU 承载能力，判定利用状态
// 输入: 牧场属性 + 当前存栏
// 输出: CapacityAssessment (载畜评估)
// ==========================================

use crate::config::EngineConfig;
use crate::domain::assessment::{utilization_pct, CapacityAssessment, CategoryLoad};
use crate::domain::property::{InventoryItem, PropertyAttributes};
use crate::domain::types::{CapacityStatus, CategoryTag, PastureQuality};
use crate::engine::error::{EngineError, EngineResult};
use crate::repository::RanchRepository;
use std::sync::Arc;
use tracing::{debug, instrument};

// ==========================================
// CapacityAnalyzer - 载畜能力分析引擎
// ==========================================
pub struct CapacityAnalyzer {
    config: Arc<EngineConfig>,
}

impl CapacityAnalyzer {
    /// 构造函数
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 评估单个牧场
    ///
    /// 规则:
    /// 1) AU 载畜量 = Σ(头数 × 类别 AU 系数)，未登记类别按默认系数
    /// 2) AU 承载能力 = 面积 × 每公顷 AU × 牧草等级系数
    /// 3) 利用率 = 载畜量 / 承载能力 × 100，承载能力 <= 0 时为 0
    pub fn assess(
        &self,
        property: &PropertyAttributes,
        inventory: &[InventoryItem],
    ) -> CapacityAssessment {
        let (au_load, categories) = self.load_au(inventory);
        let au_capacity = self.capacity_au(property.area_ha, property.pasture_quality);
        let utilization = utilization_pct(au_load, au_capacity);
        let status = self.classify(utilization);

        let (au_surplus, au_available) = if status == CapacityStatus::Overloaded {
            (au_load - au_capacity, 0.0)
        } else {
            (0.0, (au_capacity - au_load).max(0.0))
        };

        let total_heads = inventory
            .iter()
            .fold(0u32, |acc, item| acc.saturating_add(item.head_count));

        debug!(
            property_id = %property.property_id,
            au_load,
            au_capacity,
            utilization,
            status = %status,
            "牧场载畜评估完成"
        );

        CapacityAssessment {
            property_id: property.property_id.clone(),
            property_name: property.name.clone(),
            herd_profile: property.herd_profile,
            area_ha: property.area_ha,
            au_load,
            au_capacity,
            utilization_pct: utilization,
            au_surplus,
            au_available,
            status,
            total_heads,
            categories,
        }
    }

    /// 从仓储读取并评估牧场
    ///
    /// # 错误
    /// - DataUnavailable: 牧场不存在
    /// - Repository: 读取失败
    #[instrument(skip(self, repo))]
    pub fn assess_from_repository(
        &self,
        repo: &dyn RanchRepository,
        property_id: &str,
    ) -> EngineResult<CapacityAssessment> {
        let property = repo
            .get_property(property_id)?
            .ok_or_else(|| EngineError::property_unavailable(property_id))?;
        let inventory = repo.get_inventory(property_id)?;

        Ok(self.assess(&property, &inventory))
    }

    // ==========================================
    // 指标计算
    // ==========================================

    /// 计算 AU 载畜量及类别明细
    pub fn load_au(&self, inventory: &[InventoryItem]) -> (f64, Vec<CategoryLoad>) {
        let mut total = 0.0;
        let mut categories = Vec::with_capacity(inventory.len());

        for item in inventory {
            let spec = self.config.category_spec(&item.category);
            if spec.is_none() {
                debug!(category = %item.category, "未登记类别，使用默认 AU 系数");
            }
            let au_factor = spec
                .map(|s| s.au_factor)
                .unwrap_or(self.config.default_au_factor);
            let tag = spec.map(|s| s.tag).unwrap_or(CategoryTag::Unclassified);
            let au_load = item.head_count as f64 * au_factor;

            total += au_load;
            categories.push(CategoryLoad {
                category: item.category.clone(),
                tag,
                head_count: item.head_count,
                au_factor,
                au_load,
            });
        }

        (total, categories)
    }

    /// 计算 AU 承载能力
    pub fn capacity_au(&self, area_ha: f64, quality: PastureQuality) -> f64 {
        area_ha * self.config.au_per_hectare * self.config.quality_multiplier(quality)
    }

    /// 判定利用状态
    ///
    /// - 利用率 > 100: OVERLOADED
    /// - 利用率 > 85: HIGH (含 100)
    /// - 利用率 < 50: UNDERUSED
    /// - 其余: ADEQUATE (含 50 与 85)
    pub fn classify(&self, utilization: f64) -> CapacityStatus {
        if utilization > self.config.overloaded_above_pct {
            CapacityStatus::Overloaded
        } else if utilization > self.config.high_above_pct {
            CapacityStatus::High
        } else if utilization < self.config.underused_below_pct {
            CapacityStatus::Underused
        } else {
            CapacityStatus::Adequate
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::HerdProfile;
    use crate::repository::InMemoryRanchRepository;

    fn analyzer() -> CapacityAnalyzer {
        CapacityAnalyzer::new(Arc::new(EngineConfig::default()))
    }

    fn property(area_ha: f64, quality: PastureQuality) -> PropertyAttributes {
        PropertyAttributes::new("P1", "O1", "Fazenda Teste", area_ha, quality, HerdProfile::FullCycle)
    }

    #[test]
    fn test_medium_quality_overloaded_scenario() {
        // 150 头经产母牛 = 150 AU，100ha 中等草场 = 100 AU
        let assessment = analyzer().assess(
            &property(100.0, PastureQuality::Medium),
            &[InventoryItem::new("Multíparas (>36m)", 150)],
        );

        assert_eq!(assessment.au_capacity, 100.0);
        assert_eq!(assessment.au_load, 150.0);
        assert_eq!(assessment.utilization_pct, 150.0);
        assert_eq!(assessment.status, CapacityStatus::Overloaded);
        assert_eq!(assessment.au_surplus, 50.0);
        assert_eq!(assessment.au_available, 0.0);
    }

    #[test]
    fn test_low_quality_underused_scenario() {
        // 120 头育成母牛 × 0.5 = 60 AU，200ha 低等草场 = 160 AU
        let assessment = analyzer().assess(
            &property(200.0, PastureQuality::Low),
            &[InventoryItem::new("Novilhas (12-24m)", 120)],
        );

        assert_eq!(assessment.au_capacity, 160.0);
        assert_eq!(assessment.au_load, 60.0);
        assert_eq!(assessment.utilization_pct, 37.5);
        assert_eq!(assessment.status, CapacityStatus::Underused);
        assert_eq!(assessment.au_available, 100.0);
    }

    #[test]
    fn test_high_quality_multiplier() {
        assert_eq!(analyzer().capacity_au(100.0, PastureQuality::High), 120.0);
    }

    #[test]
    fn test_unknown_category_uses_default_factor() {
        let (load, categories) = analyzer().load_au(&[InventoryItem::new("Búfalos", 4)]);
        assert_eq!(load, 3.0);
        assert_eq!(categories[0].tag, CategoryTag::Unclassified);
        assert_eq!(categories[0].au_factor, 0.75);
    }

    #[test]
    fn test_zero_capacity_gives_zero_utilization() {
        let assessment = analyzer().assess(
            &property(0.0, PastureQuality::Medium),
            &[InventoryItem::new("Touros", 10)],
        );
        assert_eq!(assessment.au_capacity, 0.0);
        assert_eq!(assessment.utilization_pct, 0.0);
        assert_eq!(assessment.status, CapacityStatus::Underused);
    }

    #[test]
    fn test_status_boundaries() {
        let a = analyzer();
        assert_eq!(a.classify(100.0), CapacityStatus::High);
        assert_eq!(a.classify(100.01), CapacityStatus::Overloaded);
        assert_eq!(a.classify(85.0), CapacityStatus::Adequate);
        assert_eq!(a.classify(85.01), CapacityStatus::High);
        assert_eq!(a.classify(50.0), CapacityStatus::Adequate);
        assert_eq!(a.classify(49.99), CapacityStatus::Underused);
    }

    #[test]
    fn test_assess_twice_is_idempotent() {
        let a = analyzer();
        let prop = property(80.0, PastureQuality::High);
        let inventory = vec![
            InventoryItem::new("Garrotes (12-24m)", 37),
            InventoryItem::new("Touros", 3),
        ];
        let first = a.assess(&prop, &inventory);
        let second = a.assess(&prop, &inventory);
        assert_eq!(first, second);
    }

    #[test]
    fn test_unknown_property_is_data_unavailable() {
        let repo = InMemoryRanchRepository::new();
        let result = analyzer().assess_from_repository(&repo, "missing");
        assert!(matches!(result, Err(EngineError::DataUnavailable { .. })));
    }
}
