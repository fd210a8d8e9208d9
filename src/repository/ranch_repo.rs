// ==========================================
// 牧场载畜平衡系统 - 牧场只读仓储接口
// ==========================================
// 红线: 引擎只读，不写存栏
// 实现者: 宿主应用 (SqliteRanchRepository / InMemoryRanchRepository 为内置实现)
// ==========================================

use crate::domain::property::{InventoryItem, PropertyAttributes};
use crate::repository::error::RepositoryResult;

// ==========================================
// RanchRepository Trait
// ==========================================
pub trait RanchRepository: Send + Sync {
    /// 查询牧场属性
    ///
    /// # 返回
    /// - Ok(Some): 找到牧场
    /// - Ok(None): 牧场不存在
    fn get_property(&self, property_id: &str) -> RepositoryResult<Option<PropertyAttributes>>;

    /// 查询牧场当前存栏（类别 + 头数）
    ///
    /// 无存栏时返回空列表
    fn get_inventory(&self, property_id: &str) -> RepositoryResult<Vec<InventoryItem>>;

    /// 列出牧场主名下所有牧场ID（按ID升序）
    fn list_owner_properties(&self, owner_id: &str) -> RepositoryResult<Vec<String>>;

    /// 两个牧场间的运输距离 (公里)
    ///
    /// 默认不提供距离，由引擎使用配置中的默认距离
    fn distance_km(&self, _origin_id: &str, _destination_id: &str) -> RepositoryResult<Option<f64>> {
        Ok(None)
    }
}
