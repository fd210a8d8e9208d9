// ==========================================
// 牧场载畜平衡系统 - API 层
// ==========================================
// 职责: 对宿主应用暴露的入口，参数校验 + 错误转换
// ==========================================

pub mod balance_api;
pub mod error;

// 重导出核心 API
pub use balance_api::{BalanceApi, TransferRequest};
pub use error::{ApiError, ApiResult};
