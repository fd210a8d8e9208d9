// ==========================================
// 牧场载畜平衡系统 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，宿主应用写入时只读查询不报 busy
// - 引擎以只读方式打开宿主库，不建库、不建表
// - READ_SCHEMA_SQL 仅供测试与夹具建库
// ==========================================

use rusqlite::{Connection, OpenFlags};
use std::path::PathBuf;
use std::time::Duration;

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "RANCH_BALANCE_DB_PATH";

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 只读适配器依赖的表
pub const READ_TABLES: [&str; 4] = ["property", "inventory_item", "property_distance", "config_kv"];

/// 只读适配器依赖的表结构 (测试/夹具建库用)
pub const READ_SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS property (
    property_id     TEXT PRIMARY KEY,
    owner_id        TEXT NOT NULL,
    name            TEXT NOT NULL,
    area_ha         REAL NOT NULL,
    pasture_quality TEXT NOT NULL DEFAULT 'MEDIUM',
    herd_profile    TEXT NOT NULL DEFAULT 'FULL_CYCLE'
);

CREATE INDEX IF NOT EXISTS idx_property_owner ON property(owner_id);

CREATE TABLE IF NOT EXISTS inventory_item (
    property_id TEXT NOT NULL REFERENCES property(property_id),
    category    TEXT NOT NULL,
    head_count  INTEGER NOT NULL,
    PRIMARY KEY (property_id, category)
);

CREATE TABLE IF NOT EXISTS property_distance (
    origin_id      TEXT NOT NULL,
    destination_id TEXT NOT NULL,
    distance_km    REAL NOT NULL,
    PRIMARY KEY (origin_id, destination_id)
);

CREATE TABLE IF NOT EXISTS config_kv (
    scope_id TEXT NOT NULL,
    key      TEXT NOT NULL,
    value    TEXT NOT NULL,
    PRIMARY KEY (scope_id, key)
);
"#;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 以读写方式打开 SQLite 连接并应用统一配置 (测试/夹具建库用)
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 以只读方式打开 SQLite 连接
///
/// 文件不存在时返回 CannotOpen，不会新建空库
pub fn open_sqlite_read_only(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 列出缺失的只读依赖表
pub fn missing_read_tables(conn: &Connection) -> rusqlite::Result<Vec<&'static str>> {
    let mut stmt =
        conn.prepare("SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1")?;

    let mut missing = Vec::new();
    for table in READ_TABLES {
        let count: i64 = stmt.query_row([table], |row| row.get(0))?;
        if count == 0 {
            missing.push(table);
        }
    }
    Ok(missing)
}

/// 建立只读适配器依赖的表（幂等，测试与夹具使用）
pub fn ensure_read_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(READ_SCHEMA_SQL)
}

/// 默认数据库路径
///
/// 优先取 RANCH_BALANCE_DB_PATH，其次取用户数据目录，最后为当前目录
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./ranch_balance.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("ranch-balance");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("ranch_balance.db");
        }
    }

    path.to_string_lossy().to_string()
}
