// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

#![allow(dead_code)]

use ranch_balance::domain::property::{InventoryItem, PropertyAttributes};
use ranch_balance::domain::types::{HerdProfile, PastureQuality};
use ranch_balance::repository::InMemoryRanchRepository;

// 常用类别名
pub const MULTIPAROUS: &str = "Multíparas (>36m)";
pub const HEIFERS: &str = "Novilhas (12-24m)";
pub const YEARLINGS: &str = "Garrotes (12-24m)";
pub const STEERS: &str = "Bois Magros (24-36m)";
pub const BULLS: &str = "Touros";
pub const CULL_COWS: &str = "Vacas de Descarte";

// ==========================================
// PropertyAttributes 构建器
// ==========================================

pub struct PropertyBuilder {
    property_id: String,
    owner_id: String,
    name: Option<String>,
    area_ha: f64,
    pasture_quality: PastureQuality,
    herd_profile: HerdProfile,
    inventory: Vec<InventoryItem>,
}

impl PropertyBuilder {
    pub fn new(property_id: &str) -> Self {
        Self {
            property_id: property_id.to_string(),
            owner_id: "O1".to_string(),
            name: None,
            area_ha: 100.0,
            pasture_quality: PastureQuality::Medium,
            herd_profile: HerdProfile::FullCycle,
            inventory: Vec::new(),
        }
    }

    pub fn owner(mut self, owner_id: &str) -> Self {
        self.owner_id = owner_id.to_string();
        self
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn area(mut self, area_ha: f64) -> Self {
        self.area_ha = area_ha;
        self
    }

    pub fn quality(mut self, quality: PastureQuality) -> Self {
        self.pasture_quality = quality;
        self
    }

    pub fn profile(mut self, profile: HerdProfile) -> Self {
        self.herd_profile = profile;
        self
    }

    pub fn herd(mut self, category: &str, head_count: u32) -> Self {
        self.inventory.push(InventoryItem::new(category, head_count));
        self
    }

    pub fn build(self) -> (PropertyAttributes, Vec<InventoryItem>) {
        let name = self.name.unwrap_or_else(|| self.property_id.clone());
        (
            PropertyAttributes::new(
                &self.property_id,
                &self.owner_id,
                &name,
                self.area_ha,
                self.pasture_quality,
                self.herd_profile,
            ),
            self.inventory,
        )
    }
}

// ==========================================
// InMemoryRanchRepository 构建器
// ==========================================

#[derive(Default)]
pub struct RanchBuilder {
    repo: InMemoryRanchRepository,
}

impl RanchBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn property(mut self, builder: PropertyBuilder) -> Self {
        let (property, inventory) = builder.build();
        self.repo = self.repo.with_property(property, inventory);
        self
    }

    pub fn distance(mut self, origin_id: &str, destination_id: &str, distance_km: f64) -> Self {
        self.repo.set_distance(origin_id, destination_id, distance_km);
        self
    }

    pub fn build(self) -> InMemoryRanchRepository {
        self.repo
    }
}

/// 标准场景 (牧场主 O1)
///
/// - P1 Fazenda Norte: 100 ha, 150 头经产母牛 -> 150 AU, 利用率 150%
/// - P2 Fazenda Sul:   200 ha, 100 头育成母牛 -> 50 AU, 利用率 25%
/// - P3 Retiro:        100 ha, 70 头经产母牛  -> 70 AU, 利用率 70%
/// - P4 Confinamento:  100 ha 育肥场, 20 头架子牛 -> 10 AU, 利用率 10%
/// - X1 属于牧场主 O2
/// - P1 <-> P2 距离 40 km，其余取默认距离
pub fn standard_ranch() -> InMemoryRanchRepository {
    RanchBuilder::new()
        .property(
            PropertyBuilder::new("P1")
                .name("Fazenda Norte")
                .herd(MULTIPAROUS, 150),
        )
        .property(
            PropertyBuilder::new("P2")
                .name("Fazenda Sul")
                .area(200.0)
                .herd(HEIFERS, 100),
        )
        .property(PropertyBuilder::new("P3").name("Retiro").herd(MULTIPAROUS, 70))
        .property(
            PropertyBuilder::new("P4")
                .name("Confinamento")
                .profile(HerdProfile::Feedlot)
                .herd(YEARLINGS, 20),
        )
        .property(PropertyBuilder::new("X1").owner("O2").herd(BULLS, 10))
        .distance("P1", "P2", 40.0)
        .build()
}
