// ==========================================
// 牧场载畜平衡系统 - 核心库
// ==========================================
// 职责: 多牧场载畜评估、失衡识别、调拨方案匹配与 ROI 评估
// 技术栈: Rust + SQLite (只读适配)
// 系统定位: 决策支持 (只给建议，不修改存栏)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 只读数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 存栏快照
pub mod importer;

// 配置层 - 引擎配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 对外接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    CapacityStatus, CategoryTag, HerdProfile, ImbalanceType, PastureQuality, RoiTier, Severity,
    SystemStatus,
};

// 领域实体
pub use domain::{
    BalanceReport, CapacityAssessment, InventoryItem, PropertyAttributes, TransferEvaluation,
    TransferRecommendation,
};

// 配置
pub use config::{ConfigManager, ConfigScope, EngineConfig};

// 引擎
pub use engine::{
    BenefitModel, CapacityAnalyzer, CostModel, EngineError, ImbalanceDetector,
    RecommendationRanker, RoiEvaluator, TransferMatcher, TransferOptimizer, ViabilityChecker,
};

// 仓储
pub use repository::{InMemoryRanchRepository, RanchRepository, SqliteRanchRepository};

// API
pub use api::{ApiError, BalanceApi, TransferRequest};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "牧场载畜平衡系统";
