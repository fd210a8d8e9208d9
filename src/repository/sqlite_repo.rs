// ==========================================
// 牧场载畜平衡系统 - SQLite 只读仓储
// ==========================================
// 红线: Repository 不含业务逻辑，只读
// 表: property / inventory_item / property_distance
// ==========================================

use crate::db::{missing_read_tables, open_sqlite_read_only};
use crate::domain::property::{InventoryItem, PropertyAttributes};
use crate::domain::types::{HerdProfile, PastureQuality};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::ranch_repo::RanchRepository;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

/// 以只读方式打开宿主库并校验依赖表
///
/// # 错误
/// - DatabaseConnectionError: 文件不存在或无法打开
/// - SchemaMissing: 缺少依赖表
pub fn open_read_only_connection(db_path: &str) -> RepositoryResult<Connection> {
    let conn = open_sqlite_read_only(db_path)?;

    let missing = missing_read_tables(&conn)?;
    if !missing.is_empty() {
        return Err(RepositoryError::SchemaMissing(missing.join(", ")));
    }
    Ok(conn)
}

// ==========================================
// SqliteRanchRepository - 牧场只读仓储
// ==========================================
pub struct SqliteRanchRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteRanchRepository {
    /// 创建新的仓储实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_read_only_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }
}

impl RanchRepository for SqliteRanchRepository {
    fn get_property(&self, property_id: &str) -> RepositoryResult<Option<PropertyAttributes>> {
        let conn = self.get_conn()?;

        let row = conn
            .query_row(
                r#"
                SELECT property_id, owner_id, name, area_ha, pasture_quality, herd_profile
                FROM property
                WHERE property_id = ?1
                "#,
                params![property_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, String>(1)?,
                        row.get::<_, String>(2)?,
                        row.get::<_, f64>(3)?,
                        row.get::<_, String>(4)?,
                        row.get::<_, String>(5)?,
                    ))
                },
            )
            .optional()?;

        let Some((id, owner_id, name, area_ha, quality_raw, profile_raw)) = row else {
            return Ok(None);
        };

        let pasture_quality =
            PastureQuality::parse(&quality_raw).ok_or_else(|| RepositoryError::FieldValueError {
                field: "pasture_quality".to_string(),
                message: format!("property_id={} 无法识别的牧草等级: {}", id, quality_raw),
            })?;
        let herd_profile =
            HerdProfile::parse(&profile_raw).ok_or_else(|| RepositoryError::FieldValueError {
                field: "herd_profile".to_string(),
                message: format!("property_id={} 无法识别的生产模式: {}", id, profile_raw),
            })?;

        Ok(Some(PropertyAttributes {
            property_id: id,
            owner_id,
            name,
            area_ha,
            pasture_quality,
            herd_profile,
        }))
    }

    fn get_inventory(&self, property_id: &str) -> RepositoryResult<Vec<InventoryItem>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT category, head_count
            FROM inventory_item
            WHERE property_id = ?1
            ORDER BY category
            "#,
        )?;

        let rows = stmt
            .query_map(params![property_id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, i64>(1)?))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        rows.into_iter()
            .map(|(category, head_count)| {
                let head_count =
                    u32::try_from(head_count).map_err(|_| RepositoryError::FieldValueError {
                        field: "head_count".to_string(),
                        message: format!(
                            "property_id={} category={} 头数非法: {}",
                            property_id, category, head_count
                        ),
                    })?;
                Ok(InventoryItem {
                    category,
                    head_count,
                })
            })
            .collect()
    }

    fn list_owner_properties(&self, owner_id: &str) -> RepositoryResult<Vec<String>> {
        let conn = self.get_conn()?;

        let mut stmt = conn.prepare(
            "SELECT property_id FROM property WHERE owner_id = ?1 ORDER BY property_id",
        )?;

        let ids = stmt
            .query_map(params![owner_id], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(ids)
    }

    fn distance_km(&self, origin_id: &str, destination_id: &str) -> RepositoryResult<Option<f64>> {
        let conn = self.get_conn()?;

        // 距离按无向边存储，任一方向命中即可
        let distance = conn
            .query_row(
                r#"
                SELECT distance_km FROM property_distance
                WHERE (origin_id = ?1 AND destination_id = ?2)
                   OR (origin_id = ?2 AND destination_id = ?1)
                LIMIT 1
                "#,
                params![origin_id, destination_id],
                |row| row.get::<_, f64>(0),
            )
            .optional()?;

        Ok(distance)
    }
}
