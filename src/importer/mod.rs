// ==========================================
// 牧场载畜平衡系统 - 导入层
// ==========================================
// 职责: 外部存栏快照 (CSV) -> 内存仓储
// ==========================================

pub mod csv_loader;
pub mod error;

// 重导出核心类型
pub use csv_loader::SnapshotImporter;
pub use error::{ImportError, ImportResult};
