// ==========================================
// 牧场载畜平衡系统 - 调拨匹配引擎
// ==========================================
// 职责: 超载起点 × 闲置终点 -> 调出类别 + 头数
// 输入: 起点/终点载畜评估 + 匹配模式
// 输出: TransferCandidate (可能为空)
// ==========================================
// 两个调用入口:
// - match_for_sweep:       全局扫描，终点剩余容量系数 0.70，最小 5 AU，
//                          最终调出头数不少于 min_category_heads
// - match_explicit_pair:   指定起终点，终点剩余容量系数 0.80，最小 3 AU
// ==========================================

use crate::config::EngineConfig;
use crate::domain::assessment::{CapacityAssessment, CategoryLoad};
use crate::domain::transfer::TransferCandidate;
use crate::domain::types::HerdProfile;
use crate::engine::compatibility::is_compatible;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

/// 浮点取整容差 (避免 7.0 / 0.5 之类的商落到 13.999...)
const FLOOR_EPSILON: f64 = 1e-9;

/// 匹配模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MatchMode {
    /// 牧场主全局扫描
    Sweep,
    /// 单对起终点的显式请求
    ExplicitPair,
}

// ==========================================
// TransferMatcher - 调拨匹配引擎
// ==========================================
pub struct TransferMatcher {
    config: Arc<EngineConfig>,
}

impl TransferMatcher {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self { config }
    }

    // ==========================================
    // 调用入口
    // ==========================================

    /// 全局扫描匹配
    ///
    /// 目标 AU = min(起点超载量, 终点剩余容量 × sweep_transfer_ratio)，
    /// 低于 sweep_min_au 或调出头数少于 min_category_heads 的组合丢弃
    pub fn match_for_sweep(
        &self,
        origin: &CapacityAssessment,
        destination: &CapacityAssessment,
        distance_km: f64,
    ) -> Option<TransferCandidate> {
        self.match_pair(origin, destination, MatchMode::Sweep, distance_km)
    }

    /// 指定起终点匹配
    ///
    /// 目标 AU = min(起点超载量, 终点剩余容量 × pair_transfer_ratio)，
    /// 低于 pair_min_au 的组合丢弃
    pub fn match_explicit_pair(
        &self,
        origin: &CapacityAssessment,
        destination: &CapacityAssessment,
        distance_km: f64,
    ) -> Option<TransferCandidate> {
        self.match_pair(origin, destination, MatchMode::ExplicitPair, distance_km)
    }

    // ==========================================
    // 核心方法
    // ==========================================

    fn match_pair(
        &self,
        origin: &CapacityAssessment,
        destination: &CapacityAssessment,
        mode: MatchMode,
        distance_km: f64,
    ) -> Option<TransferCandidate> {
        let target = self.target_au(origin, destination, mode);
        if target < self.min_au(mode) {
            debug!(
                origin_id = %origin.property_id,
                destination_id = %destination.property_id,
                ?mode,
                target,
                "目标 AU 低于下限，放弃匹配"
            );
            return None;
        }

        let Some(selected) = self.select_category(&origin.categories, destination.herd_profile)
        else {
            debug!(
                origin_id = %origin.property_id,
                destination_id = %destination.property_id,
                profile = %destination.herd_profile,
                "起点无兼容类别"
            );
            return None;
        };

        let quantity = self.quantity_for(target, selected.au_factor, selected.head_count);
        if quantity < self.min_quantity(mode) {
            debug!(
                origin_id = %origin.property_id,
                destination_id = %destination.property_id,
                ?mode,
                quantity,
                "调出头数不足，放弃匹配"
            );
            return None;
        }

        Some(TransferCandidate {
            origin_id: origin.property_id.clone(),
            destination_id: destination.property_id.clone(),
            category: selected.category.clone(),
            head_count: quantity,
            au_factor: selected.au_factor,
            au_moved: quantity as f64 * selected.au_factor,
            distance_km,
        })
    }

    /// 目标调拨 AU
    pub fn target_au(
        &self,
        origin: &CapacityAssessment,
        destination: &CapacityAssessment,
        mode: MatchMode,
    ) -> f64 {
        let ratio = match mode {
            MatchMode::Sweep => self.config.sweep_transfer_ratio,
            MatchMode::ExplicitPair => self.config.pair_transfer_ratio,
        };
        origin.au_surplus.min(destination.au_available * ratio)
    }

    /// 最小调拨 AU
    pub fn min_au(&self, mode: MatchMode) -> f64 {
        match mode {
            MatchMode::Sweep => self.config.sweep_min_au,
            MatchMode::ExplicitPair => self.config.pair_min_au,
        }
    }

    /// 最小调出头数 (显式请求只要求非零)
    pub fn min_quantity(&self, mode: MatchMode) -> u32 {
        match mode {
            MatchMode::Sweep => self.config.min_category_heads.max(1),
            MatchMode::ExplicitPair => 1,
        }
    }

    /// 选择调出类别
    ///
    /// 条件: 头数 >= min_category_heads 且与终点生产模式兼容；
    /// 取头数最多者，头数相同按类别名升序
    pub fn select_category<'a>(
        &self,
        categories: &'a [CategoryLoad],
        destination_profile: HerdProfile,
    ) -> Option<&'a CategoryLoad> {
        categories
            .iter()
            .filter(|c| c.head_count >= self.config.min_category_heads)
            .filter(|c| is_compatible(c.tag, destination_profile))
            .min_by(|a, b| {
                b.head_count
                    .cmp(&a.head_count)
                    .then_with(|| a.category.cmp(&b.category))
            })
    }

    /// 调出头数 = min(⌊目标 AU / 系数⌋, ⌊类别头数 × max_category_share⌋)
    pub fn quantity_for(&self, target_au: f64, au_factor: f64, available_heads: u32) -> u32 {
        if au_factor <= 0.0 || target_au <= 0.0 {
            return 0;
        }
        let needed = (target_au / au_factor + FLOOR_EPSILON).floor();
        let cap = self.max_heads(available_heads);
        (needed.min(cap as f64)) as u32
    }

    /// 单类别最大调出头数
    pub fn max_heads(&self, available_heads: u32) -> u32 {
        max_category_heads(available_heads, self.config.max_category_share)
    }
}

/// 单类别最大调出头数 = ⌊类别头数 × share⌋
///
/// 匹配与可行性校验共用
pub fn max_category_heads(available_heads: u32, share: f64) -> u32 {
    (available_heads as f64 * share + FLOOR_EPSILON).floor() as u32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{CapacityStatus, CategoryTag};

    fn load(category: &str, tag: CategoryTag, heads: u32, factor: f64) -> CategoryLoad {
        CategoryLoad {
            category: category.to_string(),
            tag,
            head_count: heads,
            au_factor: factor,
            au_load: heads as f64 * factor,
        }
    }

    fn assessment(
        id: &str,
        profile: HerdProfile,
        load_au: f64,
        capacity: f64,
        categories: Vec<CategoryLoad>,
    ) -> CapacityAssessment {
        let overloaded = load_au > capacity;
        CapacityAssessment {
            property_id: id.to_string(),
            property_name: id.to_string(),
            herd_profile: profile,
            area_ha: capacity,
            au_load: load_au,
            au_capacity: capacity,
            utilization_pct: load_au * 100.0 / capacity,
            au_surplus: if overloaded { load_au - capacity } else { 0.0 },
            au_available: if overloaded { 0.0 } else { capacity - load_au },
            status: if overloaded { CapacityStatus::Overloaded } else { CapacityStatus::Underused },
            total_heads: categories.iter().map(|c| c.head_count).sum(),
            categories,
        }
    }

    fn matcher() -> TransferMatcher {
        TransferMatcher::new(Arc::new(EngineConfig::default()))
    }

    #[test]
    fn test_target_au_uses_mode_ratio() {
        let origin = assessment("O", HerdProfile::FullCycle, 150.0, 100.0, vec![]);
        let dest = assessment("D", HerdProfile::FullCycle, 20.0, 100.0, vec![]);
        let m = matcher();
        // 终点剩余 80 AU
        assert_eq!(m.target_au(&origin, &dest, MatchMode::Sweep), 50.0_f64.min(80.0 * 0.70));
        assert_eq!(m.target_au(&origin, &dest, MatchMode::ExplicitPair), 50.0);
    }

    #[test]
    fn test_select_category_prefers_largest_compatible_herd() {
        let categories = vec![
            load("Vacas de Descarte", CategoryTag::CullCow, 200, 0.9),
            load("Garrotes (12-24m)", CategoryTag::Yearling, 40, 0.5),
            load("Multíparas (>36m)", CategoryTag::Multiparous, 90, 1.0),
            load("Touros", CategoryTag::Bull, 4, 1.25),
        ];
        let m = matcher();

        let feedlot = m.select_category(&categories, HerdProfile::Feedlot).unwrap();
        assert_eq!(feedlot.category, "Garrotes (12-24m)");

        let breeding = m.select_category(&categories, HerdProfile::BreedingOnly).unwrap();
        assert_eq!(breeding.category, "Multíparas (>36m)");
    }

    #[test]
    fn test_select_category_skips_small_herds_and_breaks_ties_by_name() {
        let categories = vec![
            load("Novilhas (12-24m)", CategoryTag::Heifer, 30, 0.5),
            load("Garrotes (12-24m)", CategoryTag::Yearling, 30, 0.5),
            load("Bois Magros (24-36m)", CategoryTag::Steer, 4, 0.75),
        ];
        let selected = matcher()
            .select_category(&categories, HerdProfile::FatteningOnly)
            .unwrap();
        assert_eq!(selected.category, "Garrotes (12-24m)");
    }

    #[test]
    fn test_quantity_is_capped_at_category_share() {
        let m = matcher();
        // 需要 40 头，最多 ⌊30 × 0.8⌋ = 24 头
        assert_eq!(m.quantity_for(20.0, 0.5, 30), 24);
        // 7 / 0.5 = 14 头
        assert_eq!(m.quantity_for(7.0, 0.5, 100), 14);
        assert_eq!(m.quantity_for(0.0, 0.5, 100), 0);
    }

    #[test]
    fn test_sweep_discards_pairs_below_five_au() {
        // 超载 4 AU: 显式请求可行 (>= 3)，全局扫描丢弃 (< 5)
        let origin = assessment(
            "O",
            HerdProfile::FullCycle,
            104.0,
            100.0,
            vec![load("Multíparas (>36m)", CategoryTag::Multiparous, 104, 1.0)],
        );
        let dest = assessment("D", HerdProfile::FullCycle, 10.0, 100.0, vec![]);
        let m = matcher();

        assert!(m.match_for_sweep(&origin, &dest, 50.0).is_none());
        let candidate = m.match_explicit_pair(&origin, &dest, 50.0).unwrap();
        assert_eq!(candidate.head_count, 4);
        assert_eq!(candidate.au_moved, 4.0);
        assert_eq!(candidate.distance_km, 50.0);
    }

    #[test]
    fn test_sweep_requires_minimum_head_count() {
        // 超载 5 AU 全为 Touros (1.25): 目标 5 AU -> 4 头
        let origin = assessment(
            "O",
            HerdProfile::FullCycle,
            105.0,
            100.0,
            vec![load("Touros", CategoryTag::Bull, 84, 1.25)],
        );
        let dest = assessment("D", HerdProfile::FullCycle, 10.0, 100.0, vec![]);
        let m = matcher();

        assert!(m.match_for_sweep(&origin, &dest, 50.0).is_none());
        let candidate = m.match_explicit_pair(&origin, &dest, 50.0).unwrap();
        assert_eq!(candidate.head_count, 4);
        assert_eq!(candidate.au_moved, 5.0);
    }

    #[test]
    fn test_max_category_heads_shared_cap() {
        assert_eq!(max_category_heads(30, 0.8), 24);
        assert_eq!(max_category_heads(5, 0.8), 4);
        assert_eq!(matcher().max_heads(30), max_category_heads(30, 0.8));
    }

    #[test]
    fn test_no_compatible_category_gives_no_match() {
        let origin = assessment(
            "O",
            HerdProfile::FullCycle,
            150.0,
            100.0,
            vec![load("Multíparas (>36m)", CategoryTag::Multiparous, 150, 1.0)],
        );
        let dest = assessment("D", HerdProfile::Feedlot, 10.0, 100.0, vec![]);
        assert!(matcher().match_for_sweep(&origin, &dest, 50.0).is_none());
    }
}
