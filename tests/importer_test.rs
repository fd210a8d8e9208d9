// ==========================================
// 存栏快照导入 集成测试
// ==========================================
// 测试范围:
// 1. CSV -> InMemoryRanchRepository -> 引擎全流程
// 2. 文件级错误: 不存在、格式不支持
// 3. 行级错误: 负数、重复牧场、无法识别的编码
// ==========================================

use ranch_balance::domain::types::{HerdProfile, PastureQuality};
use ranch_balance::importer::{ImportError, SnapshotImporter};
use ranch_balance::repository::RanchRepository;
use ranch_balance::{EngineConfig, TransferOptimizer};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tempfile::{Builder, NamedTempFile};

fn csv_file(lines: &[&str]) -> NamedTempFile {
    let mut file = Builder::new().suffix(".csv").tempfile().unwrap();
    for line in lines {
        writeln!(file, "{}", line).unwrap();
    }
    file
}

fn standard_properties() -> NamedTempFile {
    csv_file(&[
        "property_id,owner_id,name,area_ha,pasture_quality,herd_profile",
        "P1,O1,Fazenda Norte,100,MEDIUM,FULL_CYCLE",
        "P2,O1,Fazenda Sul,200,media,ciclo_completo",
        "P3,O1,Retiro,100,ALTA,SO_CRIA",
    ])
}

#[test]
fn test_import_then_sweep() {
    let properties = standard_properties();
    let inventory = csv_file(&[
        "property_id,category,head_count",
        "P1,Multíparas (>36m),150",
        "P2,Novilhas (12-24m),100",
        "P3,Multíparas (>36m),60",
    ]);
    let distances = csv_file(&["origin_id,destination_id,distance_km", "P2,P1,40"]);

    let repo = SnapshotImporter::new()
        .load(properties.path(), inventory.path(), Some(distances.path()))
        .unwrap();

    assert_eq!(repo.property_count(), 3);
    let p3 = repo.get_property("P3").unwrap().unwrap();
    assert_eq!(p3.pasture_quality, PastureQuality::High);
    assert_eq!(p3.herd_profile, HerdProfile::BreedingOnly);
    assert_eq!(repo.distance_km("P1", "P2").unwrap(), Some(40.0));

    let optimizer = TransferOptimizer::new(Arc::new(repo), Arc::new(EngineConfig::default()));
    let recs = optimizer.sweep_owner("O1").unwrap();

    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].destination_id, "P2");
    assert_eq!(recs[0].distance_km, 40.0);
}

#[test]
fn test_missing_file() {
    let inventory = csv_file(&["property_id,category,head_count"]);
    let result = SnapshotImporter::new().load(
        Path::new("/nonexistent/properties.csv"),
        inventory.path(),
        None,
    );
    assert!(matches!(result, Err(ImportError::FileNotFound(_))));
}

#[test]
fn test_unsupported_extension() {
    let mut file = Builder::new().suffix(".xlsx").tempfile().unwrap();
    writeln!(file, "property_id,owner_id,name,area_ha").unwrap();
    let inventory = csv_file(&["property_id,category,head_count"]);

    let result = SnapshotImporter::new().load(file.path(), inventory.path(), None);
    assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
}

#[test]
fn test_negative_area() {
    let properties = csv_file(&["property_id,owner_id,name,area_ha", "P1,O1,A,-5"]);
    let inventory = csv_file(&["property_id,category,head_count"]);

    let result = SnapshotImporter::new().load(properties.path(), inventory.path(), None);
    assert!(matches!(
        result,
        Err(ImportError::NegativeValue { row: 2, .. })
    ));
}

#[test]
fn test_negative_head_count() {
    let properties = standard_properties();
    let inventory = csv_file(&["property_id,category,head_count", "P1,Touros,-2"]);

    let result = SnapshotImporter::new().load(properties.path(), inventory.path(), None);
    assert!(matches!(
        result,
        Err(ImportError::TypeConversionError { row: 2, .. })
    ));
}

#[test]
fn test_duplicate_property() {
    let properties = csv_file(&[
        "property_id,owner_id,name,area_ha",
        "P1,O1,A,100",
        "P1,O1,B,100",
    ]);
    let inventory = csv_file(&["property_id,category,head_count"]);

    let result = SnapshotImporter::new().load(properties.path(), inventory.path(), None);
    assert!(matches!(
        result,
        Err(ImportError::DuplicateProperty { row: 3, .. })
    ));
}

#[test]
fn test_unknown_profile_code() {
    let properties = csv_file(&[
        "property_id,owner_id,name,area_ha,herd_profile",
        "P1,O1,A,100,HYDROPONIC",
    ]);
    let inventory = csv_file(&["property_id,category,head_count"]);

    let result = SnapshotImporter::new().load(properties.path(), inventory.path(), None);
    assert!(matches!(
        result,
        Err(ImportError::FieldMappingError { row: 2, .. })
    ));
}

#[test]
fn test_missing_primary_key() {
    let properties = csv_file(&["property_id,owner_id,name,area_ha", ",O1,A,100"]);
    let inventory = csv_file(&["property_id,category,head_count"]);

    let result = SnapshotImporter::new().load(properties.path(), inventory.path(), None);
    assert!(matches!(
        result,
        Err(ImportError::PrimaryKeyMissing { row: 2, .. })
    ));
}
