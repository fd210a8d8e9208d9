// ==========================================
// 牧场载畜平衡系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 承载能力 <= 0 不是错误，按利用率 0 处理；
//       未登记类别不是错误，按默认 AU 系数处理
// ==========================================

use crate::config::engine_config::ConfigError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 牧场或存栏数据缺失（只中止当前牧场的评估）
    #[error("数据不可用: {entity} id={id}")]
    DataUnavailable { entity: String, id: String },

    /// 调用方参数无法解释
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("仓储错误: {0}")]
    Repository(#[from] RepositoryError),
}

impl EngineError {
    pub fn property_unavailable(property_id: &str) -> Self {
        EngineError::DataUnavailable {
            entity: "property".to_string(),
            id: property_id.to_string(),
        }
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
