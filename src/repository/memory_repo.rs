// ==========================================
// 牧场载畜平衡系统 - 内存仓储
// ==========================================
// 用途: 宿主应用预先加载存栏快照后交给引擎；CSV 导入与测试使用
// ==========================================

use crate::domain::property::{InventoryItem, PropertyAttributes};
use crate::repository::error::RepositoryResult;
use crate::repository::ranch_repo::RanchRepository;
use std::collections::{BTreeMap, HashMap};

/// 内存仓储 (快照构建完成后只读)
#[derive(Debug, Clone, Default)]
pub struct InMemoryRanchRepository {
    properties: BTreeMap<String, PropertyAttributes>,
    inventories: HashMap<String, Vec<InventoryItem>>,
    distances: HashMap<(String, String), f64>,
}

impl InMemoryRanchRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// 登记牧场（同ID覆盖）
    pub fn insert_property(&mut self, property: PropertyAttributes) {
        self.properties.insert(property.property_id.clone(), property);
    }

    /// 设置牧场存栏（整体替换）
    pub fn set_inventory(&mut self, property_id: &str, items: Vec<InventoryItem>) {
        self.inventories.insert(property_id.to_string(), items);
    }

    /// 追加单条存栏，同类别头数累加
    pub fn add_inventory_item(&mut self, property_id: &str, item: InventoryItem) {
        let items = self.inventories.entry(property_id.to_string()).or_default();
        match items.iter_mut().find(|i| i.category == item.category) {
            Some(existing) => existing.head_count = existing.head_count.saturating_add(item.head_count),
            None => items.push(item),
        }
    }

    /// 设置两牧场间距离（双向）
    pub fn set_distance(&mut self, origin_id: &str, destination_id: &str, distance_km: f64) {
        self.distances
            .insert((origin_id.to_string(), destination_id.to_string()), distance_km);
        self.distances
            .insert((destination_id.to_string(), origin_id.to_string()), distance_km);
    }

    /// Builder 风格的登记
    pub fn with_property(mut self, property: PropertyAttributes, items: Vec<InventoryItem>) -> Self {
        let id = property.property_id.clone();
        self.insert_property(property);
        self.set_inventory(&id, items);
        self
    }

    pub fn property_count(&self) -> usize {
        self.properties.len()
    }
}

impl RanchRepository for InMemoryRanchRepository {
    fn get_property(&self, property_id: &str) -> RepositoryResult<Option<PropertyAttributes>> {
        Ok(self.properties.get(property_id).cloned())
    }

    fn get_inventory(&self, property_id: &str) -> RepositoryResult<Vec<InventoryItem>> {
        Ok(self.inventories.get(property_id).cloned().unwrap_or_default())
    }

    fn list_owner_properties(&self, owner_id: &str) -> RepositoryResult<Vec<String>> {
        Ok(self
            .properties
            .values()
            .filter(|p| p.owner_id == owner_id)
            .map(|p| p.property_id.clone())
            .collect())
    }

    fn distance_km(&self, origin_id: &str, destination_id: &str) -> RepositoryResult<Option<f64>> {
        Ok(self
            .distances
            .get(&(origin_id.to_string(), destination_id.to_string()))
            .copied())
    }
}
