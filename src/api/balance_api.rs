// ==========================================
// 牧场载畜平衡系统 - 载畜平衡 API
// ==========================================
// 职责: 载畜评估、调拨方案评估、调拨建议、平衡报告
// 红线: 只读，所有结果为建议，不落库
// ==========================================

use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::error::{ApiError, ApiResult};
use crate::config::{ConfigManager, ConfigScope, EngineConfig};
use crate::domain::assessment::CapacityAssessment;
use crate::domain::transfer::{BalanceReport, TransferEvaluation, TransferRecommendation};
use crate::engine::TransferOptimizer;
use crate::repository::{open_read_only_connection, RanchRepository, SqliteRanchRepository};

// ==========================================
// TransferRequest - 指定调拨方案请求
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferRequest {
    pub origin_id: String,
    pub destination_id: String,
    pub category: String,
    pub head_count: u32,
    /// 缺省时取仓储距离，再缺省取配置默认距离
    #[serde(default)]
    pub distance_km: Option<f64>,
}

// ==========================================
// BalanceApi - 载畜平衡 API
// ==========================================
pub struct BalanceApi {
    optimizer: TransferOptimizer,
}

impl BalanceApi {
    /// 创建新的BalanceApi实例
    ///
    /// # 参数
    /// - repo: 牧场只读仓储
    /// - config: 引擎配置
    pub fn new(repo: Arc<dyn RanchRepository>, config: Arc<EngineConfig>) -> Self {
        Self {
            optimizer: TransferOptimizer::new(repo, config),
        }
    }

    /// 基于 SQLite 数据库创建实例
    ///
    /// 只读打开，文件或依赖表缺失时报错；
    /// 仓储与配置管理器共享同一连接；config_kv 覆写按 scope 叠加
    pub fn from_sqlite(db_path: &str, scope: &ConfigScope) -> ApiResult<Self> {
        let conn = open_read_only_connection(db_path)?;
        let conn = Arc::new(Mutex::new(conn));

        let config = ConfigManager::from_connection(conn.clone())?.load_engine_config(scope)?;
        let repo = SqliteRanchRepository::from_connection(conn);

        info!(db_path, scope = ?scope, "载畜平衡 API 初始化完成");
        Ok(Self::new(Arc::new(repo), Arc::new(config)))
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 评估单个牧场
    pub fn assess_property(&self, property_id: &str) -> ApiResult<CapacityAssessment> {
        require_non_empty("property_id", property_id)?;
        Ok(self.optimizer.assess_property(property_id)?)
    }

    /// 评估牧场主名下全部牧场（数据缺失的牧场被跳过）
    pub fn assess_owner(&self, owner_id: &str) -> ApiResult<Vec<CapacityAssessment>> {
        require_non_empty("owner_id", owner_id)?;
        let (assessments, skipped) = self.optimizer.assess_owner(owner_id)?;
        debug!(owner_id, skipped = skipped.len(), "牧场主评估");
        Ok(assessments)
    }

    /// 评估指定调拨方案
    pub fn evaluate_transfer(&self, request: &TransferRequest) -> ApiResult<TransferEvaluation> {
        require_non_empty("origin_id", &request.origin_id)?;
        require_non_empty("destination_id", &request.destination_id)?;

        let distance_km = match request.distance_km {
            Some(d) => d,
            None => self
                .optimizer
                .distance_between(&request.origin_id, &request.destination_id)?,
        };

        Ok(self.optimizer.evaluate_transfer(
            &request.origin_id,
            &request.destination_id,
            &request.category,
            request.head_count,
            distance_km,
        )?)
    }

    /// 指定起终点的调拨建议
    pub fn recommend_pair(
        &self,
        origin_id: &str,
        destination_id: &str,
        distance_km: Option<f64>,
    ) -> ApiResult<Option<TransferRecommendation>> {
        require_non_empty("origin_id", origin_id)?;
        require_non_empty("destination_id", destination_id)?;
        Ok(self
            .optimizer
            .recommend_pair(origin_id, destination_id, distance_km)?)
    }

    /// 牧场主全局调拨建议（ROI 降序）
    pub fn sweep_owner(&self, owner_id: &str) -> ApiResult<Vec<TransferRecommendation>> {
        require_non_empty("owner_id", owner_id)?;
        Ok(self.optimizer.sweep_owner(owner_id)?)
    }

    /// 牧场主平衡报告
    pub fn analyze_balance(
        &self,
        owner_id: &str,
        include_recommendations: bool,
    ) -> ApiResult<BalanceReport> {
        require_non_empty("owner_id", owner_id)?;
        Ok(self
            .optimizer
            .analyze_balance(owner_id, include_recommendations)?)
    }

    pub fn config(&self) -> &EngineConfig {
        self.optimizer.config()
    }
}

fn require_non_empty(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::InvalidInput(format!("{}不能为空", field)));
    }
    Ok(())
}
