// ==========================================
// 牧场载畜平衡系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑，只读
// ==========================================
// 职责: 提供牧场属性/存栏读取接口,屏蔽数据来源
// 约束: 所有查询使用参数化
// ==========================================

pub mod error;
pub mod memory_repo;
pub mod ranch_repo;
pub mod sqlite_repo;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use memory_repo::InMemoryRanchRepository;
pub use ranch_repo::RanchRepository;
pub use sqlite_repo::{open_read_only_connection, SqliteRanchRepository};
