use std::fs;
use std::path::PathBuf;
use std::process::Command;
use std::time::{SystemTime, UNIX_EPOCH};

fn bin() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_sales-pivot"));
    command.current_dir(env!("CARGO_MANIFEST_DIR"));
    command
}

fn fixture() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/sales_sample.csv")
}

fn unique_temp_path(name: &str) -> PathBuf {
    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("clock should be after unix epoch")
        .as_nanos();
    std::env::temp_dir().join(format!("sales-pivot-{name}-{stamp}.csv"))
}

#[test]
fn missing_command_prints_usage() {
    let output = bin().output().expect("binary should run");
    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("usage: sales-pivot"));
}

#[test]
fn resolve_command_emits_json_per_city() {
    let output = bin()
        .args(["resolve", "г. Москва", "Лондон"])
        .output()
        .expect("resolve should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let payload: serde_json::Value =
        serde_json::from_str(&stdout).expect("resolve should emit json");
    assert_eq!(payload[0]["warehouse"], "Склад Москва");
    assert_eq!(payload[1]["warehouse"], "Основной склад");
    assert!(payload[1]["region_match"].is_null());
}

#[test]
fn ingest_command_prints_filtered_json_summary() {
    let output = bin()
        .args(["ingest"])
        .arg(fixture())
        .args(["--product", "Чай", "--json"])
        .output()
        .expect("ingest should run");

    assert_eq!(output.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let groups: serde_json::Value =
        serde_json::from_str(&stdout).expect("ingest should emit json");
    let keys: Vec<&str> = groups
        .as_array()
        .expect("array")
        .iter()
        .filter_map(|group| group["key"].as_str())
        .collect();
    assert_eq!(keys, vec!["Склад Москва", "Склад Новосибирск"]);

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Processed 5 of 7 records (2 skipped)"));
}

#[test]
fn ingest_command_fails_on_missing_columns() {
    let path = unique_temp_path("bad-headers");
    fs::write(&path, "Регион,SKU\nЮг,1\n").expect("write temp csv");

    let output = bin().arg("ingest").arg(&path).output().expect("ingest should run");
    let _ = fs::remove_file(&path);

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Available headers: Регион, SKU"));
}

#[test]
fn ingest_command_returns_usage_without_path() {
    let output = bin().arg("ingest").output().expect("ingest should run");
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn export_command_writes_pivot_csv() {
    let out = unique_temp_path("export");
    let output = bin()
        .arg("export")
        .arg(fixture())
        .arg(&out)
        .output()
        .expect("export should run");

    assert_eq!(output.status.code(), Some(0));
    let csv = fs::read_to_string(&out).expect("export file");
    let _ = fs::remove_file(&out);
    let lines: Vec<&str> = csv.lines().collect();
    assert!(lines[0].starts_with("Product,"));
    assert_eq!(lines.last().copied(), Some("Total,5,3,2,1,1,12"));
}

#[test]
fn reference_command_reports_loaded_files() {
    let output = bin().arg("reference").output().expect("reference should run");
    assert_eq!(output.status.code(), Some(0));
    let payload: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("reference should emit json");
    assert_eq!(payload["city_regions"]["origin"]["kind"], "loaded");
    assert_eq!(payload["region_warehouses"]["entries"], 9);
}
