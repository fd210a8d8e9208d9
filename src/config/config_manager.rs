// ==========================================
// 牧场载畜平衡系统 - 配置管理器
// ==========================================
// 职责: 从 config_kv 表加载引擎配置覆写
// 存储: config_kv 表 (scope_id + key + value)
// 覆写顺序: 默认值 < global < 牧场主 scope
// ==========================================

use crate::config::engine_config::{CategorySpec, EngineConfig};
use crate::db::configure_sqlite_connection;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::sqlite_repo::open_read_only_connection;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigScope - 配置作用域
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigScope {
    Global,                      // 全局
    Owner { owner_id: String },  // 牧场主 (叠加在全局之上)
}

impl ConfigScope {
    fn scope_ids(&self) -> Vec<&str> {
        match self {
            ConfigScope::Global => vec![GLOBAL_SCOPE_ID],
            ConfigScope::Owner { owner_id } => vec![GLOBAL_SCOPE_ID, owner_id.as_str()],
        }
    }
}

const GLOBAL_SCOPE_ID: &str = "global";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径 (只读打开)
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_read_only_connection(db_path)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_config_value(&self, scope_id: &str, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        let value = conn
            .query_row(
                "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
                params![scope_id, key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;

        Ok(value)
    }

    /// 读取 global scope 的配置值
    pub fn get_global_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        self.get_config_value(GLOBAL_SCOPE_ID, key)
    }

    /// 加载引擎配置
    ///
    /// 未配置的键保持默认值；格式错误的值记录告警后忽略；
    /// 覆写完成后整体校验，不合法则返回 ValidationError
    pub fn load_engine_config(&self, scope: &ConfigScope) -> RepositoryResult<EngineConfig> {
        let mut config = EngineConfig::default();

        for scope_id in scope.scope_ids() {
            self.apply_overrides(scope_id, &mut config)?;
        }

        config
            .validate()
            .map_err(|e| RepositoryError::ValidationError(e.to_string()))?;

        tracing::debug!(scope = ?scope, "引擎配置加载完成");
        Ok(config)
    }

    fn apply_overrides(&self, scope_id: &str, config: &mut EngineConfig) -> RepositoryResult<()> {
        let f64_fields: [(&str, &mut f64); 14] = [
            (config_keys::DEFAULT_AU_FACTOR, &mut config.default_au_factor),
            (config_keys::AU_PER_HECTARE, &mut config.au_per_hectare),
            (config_keys::SWEEP_TRANSFER_RATIO, &mut config.sweep_transfer_ratio),
            (config_keys::PAIR_TRANSFER_RATIO, &mut config.pair_transfer_ratio),
            (config_keys::SWEEP_MIN_AU, &mut config.sweep_min_au),
            (config_keys::PAIR_MIN_AU, &mut config.pair_min_au),
            (config_keys::DESTINATION_CEILING_PCT, &mut config.destination_ceiling_pct),
            (config_keys::DEFAULT_DISTANCE_KM, &mut config.default_distance_km),
            (config_keys::TRANSPORT_RATE_PER_AU_KM, &mut config.transport_rate_per_au_km),
            (config_keys::HANDLING_COST_PER_HEAD, &mut config.handling_cost_per_head),
            (config_keys::MEDICAL_COST_PER_HEAD, &mut config.medical_cost_per_head),
            (config_keys::ADMINISTRATIVE_RATE, &mut config.administrative_rate),
            (config_keys::AU_MARKET_VALUE, &mut config.au_market_value),
            (config_keys::MIN_ACCEPT_ROI_PCT, &mut config.min_accept_roi_pct),
        ];

        for (key, target) in f64_fields {
            if let Some(raw) = self.get_config_value(scope_id, key)? {
                match raw.trim().parse::<f64>() {
                    Ok(value) => *target = value,
                    Err(_) => tracing::warn!(
                        scope_id,
                        config_key = key,
                        raw_value = %raw,
                        "配置值不是数字，保持原值"
                    ),
                }
            }
        }

        if let Some(raw) = self.get_config_value(scope_id, config_keys::MAX_PAIRS)? {
            match raw.trim().parse::<usize>() {
                Ok(value) => config.max_pairs = value,
                Err(_) => tracing::warn!(
                    scope_id,
                    config_key = config_keys::MAX_PAIRS,
                    raw_value = %raw,
                    "配置值不是整数，保持原值"
                ),
            }
        }

        // 类别表按条目合并，不整体替换
        if let Some(raw) = self.get_config_value(scope_id, config_keys::CATEGORY_TABLE)? {
            match serde_json::from_str::<BTreeMap<String, CategorySpec>>(&raw) {
                Ok(entries) => config.categories.extend(entries),
                Err(e) => tracing::warn!(
                    scope_id,
                    config_key = config_keys::CATEGORY_TABLE,
                    error = %e,
                    "类别表配置格式错误，保持原值"
                ),
            }
        }

        Ok(())
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // AU 折算
    pub const DEFAULT_AU_FACTOR: &str = "default_au_factor";
    pub const CATEGORY_TABLE: &str = "category_table"; // JSON: {"名称": {"au_factor": 0.5, "tag": "HEIFER"}}

    // 承载能力
    pub const AU_PER_HECTARE: &str = "au_per_hectare";

    // 调拨匹配
    pub const SWEEP_TRANSFER_RATIO: &str = "sweep_transfer_ratio";
    pub const PAIR_TRANSFER_RATIO: &str = "pair_transfer_ratio";
    pub const SWEEP_MIN_AU: &str = "sweep_min_au";
    pub const PAIR_MIN_AU: &str = "pair_min_au";
    pub const DESTINATION_CEILING_PCT: &str = "destination_ceiling_pct";
    pub const DEFAULT_DISTANCE_KM: &str = "default_distance_km";
    pub const MAX_PAIRS: &str = "max_pairs";

    // 成本
    pub const TRANSPORT_RATE_PER_AU_KM: &str = "transport_rate_per_au_km";
    pub const HANDLING_COST_PER_HEAD: &str = "handling_cost_per_head";
    pub const MEDICAL_COST_PER_HEAD: &str = "medical_cost_per_head";
    pub const ADMINISTRATIVE_RATE: &str = "administrative_rate";

    // 收益 / ROI
    pub const AU_MARKET_VALUE: &str = "au_market_value";
    pub const MIN_ACCEPT_ROI_PCT: &str = "min_accept_roi_pct";
}
