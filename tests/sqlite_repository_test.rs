// ==========================================
// SqliteRanchRepository 集成测试
// ==========================================
// 测试范围:
// 1. 牧场属性/存栏/距离读取
// 2. 葡语编码兼容
// 3. 非法字段值 -> FieldValueError
// 4. 共享连接
// ==========================================


use ranch_balance::db::open_sqlite_connection;
use ranch_balance::domain::types::{HerdProfile, PastureQuality};
use ranch_balance::repository::{RanchRepository, RepositoryError, SqliteRanchRepository};
use std::sync::{Arc, Mutex};
use test_helpers::*;

fn seeded_repo() -> (tempfile::NamedTempFile, SqliteRanchRepository) {
    let (temp_file, db_path) = create_test_db().expect("无法创建测试数据库");
    {
        let conn = open_sqlite_connection(&db_path).unwrap();
        seed_standard_ranch(&conn).unwrap();
    }
    let repo = SqliteRanchRepository::new(&db_path).expect("无法打开仓储");
    (temp_file, repo)
}

#[test]
fn test_get_property() {
    let (_db, repo) = seeded_repo();

    let p1 = repo.get_property("P1").unwrap().unwrap();
    assert_eq!(p1.owner_id, "O1");
    assert_eq!(p1.name, "Fazenda Norte");
    assert_eq!(p1.area_ha, 100.0);
    assert_eq!(p1.pasture_quality, PastureQuality::Medium);
    assert_eq!(p1.herd_profile, HerdProfile::FullCycle);

    // P2 以葡语编码存储
    let p2 = repo.get_property("P2").unwrap().unwrap();
    assert_eq!(p2.pasture_quality, PastureQuality::Medium);
    assert_eq!(p2.herd_profile, HerdProfile::FullCycle);

    let p4 = repo.get_property("P4").unwrap().unwrap();
    assert_eq!(p4.herd_profile, HerdProfile::Feedlot);

    assert!(repo.get_property("NOPE").unwrap().is_none());
}

#[test]
fn test_get_inventory() {
    let (_db, repo) = seeded_repo();

    let items = repo.get_inventory("P1").unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].category, "Multíparas (>36m)");
    assert_eq!(items[0].head_count, 150);

    assert!(repo.get_inventory("NOPE").unwrap().is_empty());
}

#[test]
fn test_list_owner_properties_sorted() {
    let (_db, repo) = seeded_repo();

    assert_eq!(
        repo.list_owner_properties("O1").unwrap(),
        vec!["P1", "P2", "P3", "P4"]
    );
    assert_eq!(repo.list_owner_properties("O2").unwrap(), vec!["X1"]);
    assert!(repo.list_owner_properties("O9").unwrap().is_empty());
}

#[test]
fn test_distance_is_undirected() {
    let (_db, repo) = seeded_repo();

    assert_eq!(repo.distance_km("P1", "P2").unwrap(), Some(40.0));
    assert_eq!(repo.distance_km("P2", "P1").unwrap(), Some(40.0));
    assert_eq!(repo.distance_km("P1", "P3").unwrap(), None);
}

#[test]
fn test_unknown_profile_is_field_value_error() {
    let (_db, db_path) = create_test_db().unwrap();
    {
        let conn = open_sqlite_connection(&db_path).unwrap();
        insert_property(&conn, "B1", "O1", "Broken", 100.0, "MEDIUM", "HYDROPONIC").unwrap();
    }
    let repo = SqliteRanchRepository::new(&db_path).unwrap();

    match repo.get_property("B1") {
        Err(RepositoryError::FieldValueError { field, .. }) => assert_eq!(field, "herd_profile"),
        other => panic!("unexpected result: {:?}", other),
    }
}

#[test]
fn test_negative_head_count_is_field_value_error() {
    let (_db, db_path) = create_test_db().unwrap();
    {
        let conn = open_sqlite_connection(&db_path).unwrap();
        insert_property(&conn, "B1", "O1", "Broken", 100.0, "MEDIUM", "FULL_CYCLE").unwrap();
        insert_inventory(&conn, "B1", "Touros", -3).unwrap();
    }
    let repo = SqliteRanchRepository::new(&db_path).unwrap();

    assert!(matches!(
        repo.get_inventory("B1"),
        Err(RepositoryError::FieldValueError { .. })
    ));
}

#[test]
fn test_shared_connection() {
    let (_db, db_path) = create_test_db().unwrap();
    let conn = open_sqlite_connection(&db_path).unwrap();
    seed_standard_ranch(&conn).unwrap();

    let repo = SqliteRanchRepository::from_connection(Arc::new(Mutex::new(conn)));
    assert!(repo.get_property("X1").unwrap().is_some());
}
