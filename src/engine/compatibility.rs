// ==========================================
// 牧场载畜平衡系统 - 类别/生产模式兼容表
// ==========================================
// 规则: 按 CategoryTag 枚举做集合成员判断，不做名称子串匹配
// 淘汰母牛 (CullCow) 与未分类 (Unclassified) 不调入任何牧场
// ==========================================

use crate::domain::types::{CategoryTag, HerdProfile};

const BREEDING_ONLY: &[CategoryTag] = &[
    CategoryTag::Multiparous,
    CategoryTag::Primiparous,
    CategoryTag::Heifer,
    CategoryTag::Bull,
];

const REARING_ONLY: &[CategoryTag] = &[CategoryTag::Calf, CategoryTag::Yearling, CategoryTag::Heifer];

const FATTENING_ONLY: &[CategoryTag] =
    &[CategoryTag::Yearling, CategoryTag::Heifer, CategoryTag::Steer];

const FEEDLOT: &[CategoryTag] = &[CategoryTag::Yearling, CategoryTag::Steer];

const FULL_CYCLE: &[CategoryTag] = &[
    CategoryTag::Calf,
    CategoryTag::Yearling,
    CategoryTag::Heifer,
    CategoryTag::Steer,
    CategoryTag::Multiparous,
    CategoryTag::Primiparous,
    CategoryTag::Bull,
];

/// 生产模式允许调入的类别标签
pub fn allowed_tags(profile: HerdProfile) -> &'static [CategoryTag] {
    match profile {
        HerdProfile::BreedingOnly => BREEDING_ONLY,
        HerdProfile::RearingOnly => REARING_ONLY,
        HerdProfile::FatteningOnly => FATTENING_ONLY,
        HerdProfile::Feedlot => FEEDLOT,
        HerdProfile::FullCycle => FULL_CYCLE,
    }
}

/// 类别是否可调入该生产模式的牧场
pub fn is_compatible(tag: CategoryTag, profile: HerdProfile) -> bool {
    allowed_tags(profile).contains(&tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feedlot_accepts_only_yearlings_and_steers() {
        assert!(is_compatible(CategoryTag::Yearling, HerdProfile::Feedlot));
        assert!(is_compatible(CategoryTag::Steer, HerdProfile::Feedlot));
        assert!(!is_compatible(CategoryTag::Heifer, HerdProfile::Feedlot));
        assert!(!is_compatible(CategoryTag::Calf, HerdProfile::Feedlot));
    }

    #[test]
    fn test_breeding_only_rejects_steers() {
        assert!(is_compatible(CategoryTag::Bull, HerdProfile::BreedingOnly));
        assert!(!is_compatible(CategoryTag::Steer, HerdProfile::BreedingOnly));
    }

    #[test]
    fn test_cull_cows_and_unclassified_never_compatible() {
        for profile in [
            HerdProfile::BreedingOnly,
            HerdProfile::RearingOnly,
            HerdProfile::FatteningOnly,
            HerdProfile::Feedlot,
            HerdProfile::FullCycle,
        ] {
            assert!(!is_compatible(CategoryTag::CullCow, profile));
            assert!(!is_compatible(CategoryTag::Unclassified, profile));
        }
    }
}
