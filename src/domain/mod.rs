// ==========================================
// 牧场载畜平衡系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、载畜约束接口
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod assessment;
pub mod property;
pub mod transfer;
pub mod types;

// 重导出核心类型
pub use assessment::{
    utilization_pct, CapacityAssessment, CategoryLoad, ImbalanceRecord, StockingConstraint,
};
pub use property::{InventoryItem, PropertyAttributes};
pub use transfer::{
    BalanceReport, BenefitBreakdown, CostBreakdown, CostDetails, PropertyShift, RejectionReason,
    RoiResult, SkippedProperty, TransferCandidate, TransferEvaluation, TransferRecommendation,
    ViabilityCheck,
};
pub use types::{
    CapacityStatus, CategoryTag, HerdProfile, ImbalanceType, PastureQuality, RoiTier, Severity,
    SystemStatus,
};
