// ==========================================
// 牧场载畜平衡系统 - 存栏快照 CSV 导入
// ==========================================
// 文件:
// - 牧场:   property_id,owner_id,name,area_ha,pasture_quality,herd_profile
// - 存栏:   property_id,category,head_count
// - 距离:   origin_id,destination_id,distance_km (可选)
// 规则: 表头去空白；完全空白的行跳过；牧草等级/生产模式留空取默认值
// 输出: InMemoryRanchRepository (导入完成后只读)
// ==========================================

use crate::domain::property::{InventoryItem, PropertyAttributes};
use crate::domain::types::{HerdProfile, PastureQuality};
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::InMemoryRanchRepository;
use csv::ReaderBuilder;
use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::path::Path;
use tracing::info;

/// 单行原始记录 (行号, 列名 -> 值)
type RawRow = (usize, HashMap<String, String>);

// ==========================================
// SnapshotImporter - 快照导入器
// ==========================================
#[derive(Debug, Default)]
pub struct SnapshotImporter;

impl SnapshotImporter {
    pub fn new() -> Self {
        Self
    }

    /// 导入完整快照
    ///
    /// # 参数
    /// - properties: 牧场文件
    /// - inventory: 存栏文件
    /// - distances: 距离文件（可选）
    pub fn load(
        &self,
        properties: &Path,
        inventory: &Path,
        distances: Option<&Path>,
    ) -> ImportResult<InMemoryRanchRepository> {
        let mut repo = InMemoryRanchRepository::new();

        let property_rows = read_rows(properties, &PROPERTY_COLUMNS)?;
        let mut seen = HashSet::new();
        for (row, record) in &property_rows {
            let property = parse_property(*row, record)?;
            if !seen.insert(property.property_id.clone()) {
                return Err(ImportError::DuplicateProperty {
                    row: *row,
                    property_id: property.property_id,
                });
            }
            repo.insert_property(property);
        }

        let inventory_rows = read_rows(inventory, &INVENTORY_COLUMNS)?;
        for (row, record) in &inventory_rows {
            let property_id = required(*row, record, "property_id")?;
            if !seen.contains(property_id) {
                return Err(ImportError::UnknownProperty {
                    row: *row,
                    property_id: property_id.to_string(),
                });
            }
            let category = required(*row, record, "category")?;
            let head_count = parse_u32(*row, record, "head_count")?;
            repo.add_inventory_item(property_id, InventoryItem::new(category, head_count));
        }

        let mut distance_count = 0;
        if let Some(path) = distances {
            for (row, record) in &read_rows(path, &DISTANCE_COLUMNS)? {
                let origin_id = required(*row, record, "origin_id")?;
                let destination_id = required(*row, record, "destination_id")?;
                let distance_km = parse_non_negative(*row, record, "distance_km")?;
                repo.set_distance(origin_id, destination_id, distance_km);
                distance_count += 1;
            }
        }

        info!(
            properties = property_rows.len(),
            inventory_rows = inventory_rows.len(),
            distances = distance_count,
            "存栏快照导入完成"
        );
        Ok(repo)
    }
}

const PROPERTY_COLUMNS: [&str; 4] = ["property_id", "owner_id", "name", "area_ha"];
const INVENTORY_COLUMNS: [&str; 3] = ["property_id", "category", "head_count"];
const DISTANCE_COLUMNS: [&str; 3] = ["origin_id", "destination_id", "distance_km"];

// ==========================================
// CSV 读取
// ==========================================

fn read_rows(path: &Path, required_columns: &[&str]) -> ImportResult<Vec<RawRow>> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    if let Some(ext) = path.extension() {
        if ext != "csv" {
            return Err(ImportError::UnsupportedFormat(
                ext.to_string_lossy().to_string(),
            ));
        }
    }

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(file);

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    for column in required_columns {
        if !headers.iter().any(|h| h == column) {
            return Err(ImportError::MissingColumn {
                file: path.display().to_string(),
                column: column.to_string(),
            });
        }
    }

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let record = result?;
        let mut row_map = HashMap::new();
        for (col_idx, value) in record.iter().enumerate() {
            if let Some(header) = headers.get(col_idx) {
                row_map.insert(header.clone(), value.trim().to_string());
            }
        }

        // 跳过完全空白的行
        if row_map.values().all(|v| v.is_empty()) {
            continue;
        }
        rows.push((idx + 2, row_map));
    }

    Ok(rows)
}

// ==========================================
// 字段解析
// ==========================================

fn parse_property(row: usize, record: &HashMap<String, String>) -> ImportResult<PropertyAttributes> {
    let property_id = required(row, record, "property_id")?;
    let owner_id = required(row, record, "owner_id")?;
    let name = optional(record, "name").unwrap_or(property_id);
    let area_ha = parse_non_negative(row, record, "area_ha")?;

    let pasture_quality = match optional(record, "pasture_quality") {
        None => PastureQuality::default(),
        Some(raw) => PastureQuality::parse(raw).ok_or_else(|| ImportError::FieldMappingError {
            row,
            message: format!("无法识别的牧草等级: {}", raw),
        })?,
    };
    let herd_profile = match optional(record, "herd_profile") {
        None => HerdProfile::default(),
        Some(raw) => HerdProfile::parse(raw).ok_or_else(|| ImportError::FieldMappingError {
            row,
            message: format!("无法识别的生产模式: {}", raw),
        })?,
    };

    Ok(PropertyAttributes::new(
        property_id,
        owner_id,
        name,
        area_ha,
        pasture_quality,
        herd_profile,
    ))
}

fn optional<'a>(record: &'a HashMap<String, String>, field: &str) -> Option<&'a str> {
    record
        .get(field)
        .map(|v| v.as_str())
        .filter(|v| !v.is_empty())
}

fn required<'a>(row: usize, record: &'a HashMap<String, String>, field: &str) -> ImportResult<&'a str> {
    optional(record, field).ok_or_else(|| ImportError::PrimaryKeyMissing {
        row,
        field: field.to_string(),
    })
}

fn parse_non_negative(row: usize, record: &HashMap<String, String>, field: &str) -> ImportResult<f64> {
    let raw = required(row, record, field)?;
    let value = raw
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ImportError::TypeConversionError {
            row,
            field: field.to_string(),
            message: format!("不是有效数字: {}", raw),
        })?;
    if value < 0.0 {
        return Err(ImportError::NegativeValue {
            row,
            field: field.to_string(),
            value,
        });
    }
    Ok(value)
}

fn parse_u32(row: usize, record: &HashMap<String, String>, field: &str) -> ImportResult<u32> {
    let raw = required(row, record, field)?;
    raw.parse::<u32>().map_err(|e| ImportError::TypeConversionError {
        row,
        field: field.to_string(),
        message: format!("{} ({})", e, raw),
    })
}
