// ==========================================
// 牧场载畜平衡系统 - 牧场与存栏领域模型
// ==========================================
// 职责: 牧场属性 + 当前存栏 (只读事实，由宿主应用提供)
// ==========================================

use crate::domain::types::{HerdProfile, PastureQuality};
use serde::{Deserialize, Serialize};

// ==========================================
// PropertyAttributes - 牧场属性
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAttributes {
    pub property_id: String,            // 牧场ID
    pub owner_id: String,               // 所属牧场主ID
    pub name: String,                   // 牧场名称
    pub area_ha: f64,                   // 草场面积 (公顷)
    pub pasture_quality: PastureQuality, // 牧草等级
    pub herd_profile: HerdProfile,      // 生产模式
}

impl PropertyAttributes {
    pub fn new(
        property_id: &str,
        owner_id: &str,
        name: &str,
        area_ha: f64,
        pasture_quality: PastureQuality,
        herd_profile: HerdProfile,
    ) -> Self {
        Self {
            property_id: property_id.to_string(),
            owner_id: owner_id.to_string(),
            name: name.to_string(),
            area_ha,
            pasture_quality,
            herd_profile,
        }
    }
}

// ==========================================
// InventoryItem - 存栏条目 (类别 + 头数)
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub category: String, // 类别名称
    pub head_count: u32,  // 头数
}

impl InventoryItem {
    pub fn new(category: &str, head_count: u32) -> Self {
        Self {
            category: category.to_string(),
            head_count,
        }
    }
}
