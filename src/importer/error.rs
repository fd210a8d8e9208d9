// ==========================================
// 牧场载畜平衡系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 行号: 按文件行计 (表头为第 1 行)
// ==========================================

use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("缺少必需列 (文件 {file}): {column}")]
    MissingColumn { file: String, column: String },

    // ===== 数据映射错误 =====
    #[error("字段映射失败 (行 {row}): {message}")]
    FieldMappingError { row: usize, message: String },

    #[error("类型转换失败 (行 {row}, 字段 {field}): {message}")]
    TypeConversionError {
        row: usize,
        field: String,
        message: String,
    },

    // ===== 数据质量错误 =====
    #[error("主键缺失 (行 {row}): {field} 为空")]
    PrimaryKeyMissing { row: usize, field: String },

    #[error("数值范围错误 (行 {row}, 字段 {field}): 值 {value} 不能为负数")]
    NegativeValue { row: usize, field: String, value: f64 },

    #[error("引用的牧场不存在 (行 {row}): property_id={property_id}")]
    UnknownProperty { row: usize, property_id: String },

    #[error("牧场重复 (行 {row}): property_id={property_id}")]
    DuplicateProperty { row: usize, property_id: String },

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
