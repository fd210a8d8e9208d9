// ==========================================
// 牧场载畜平衡系统 - 引擎层
// ==========================================
// 职责: 实现载畜评估与调拨优化规则, 不拼 SQL
// 红线: 引擎无状态, 每次请求基于当前存栏重新计算
// ==========================================

pub mod benefit;
pub mod capacity;
pub mod compatibility;
pub mod cost;
pub mod error;
pub mod imbalance;
pub mod matcher;
pub mod optimizer;
pub mod ranker;
pub mod roi;
pub mod viability;

// 重导出核心引擎
pub use benefit::BenefitModel;
pub use capacity::CapacityAnalyzer;
pub use compatibility::{allowed_tags, is_compatible};
pub use cost::CostModel;
pub use error::{EngineError, EngineResult};
pub use imbalance::ImbalanceDetector;
pub use matcher::{MatchMode, TransferMatcher};
pub use optimizer::{system_alerts, system_status, TransferOptimizer};
pub use ranker::RecommendationRanker;
pub use roi::RoiEvaluator;
pub use viability::{describe_rejection, ViabilityChecker};
