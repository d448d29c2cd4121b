//! Inspect a sales sheet: print its size, headers, the detected columns and the first rows.
//! Usage: cargo run --bin inspect_sheet -- path/to/sales.xlsx

use std::path::Path;

use sales_pivot::ingest::detect_columns;
use sales_pivot::sheet::read_rows;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::args()
        .nth(1)
        .ok_or("Usage: inspect_sheet <path-to.xlsx|csv>")?;
    let path = Path::new(&path);
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }

    let rows = read_rows(path)?;
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    println!("Size: {} rows x {} cols", rows.len(), width);

    let Some(headers) = rows.first() else {
        println!("Sheet is empty");
        return Ok(());
    };
    let names: Vec<String> = headers.iter().map(ToString::to_string).collect();
    println!("Headers: {}", names.join(" | "));

    match detect_columns(headers) {
        Ok(columns) => println!("Columns: {:?}", columns),
        Err(err) => println!("Columns: {}", err.status()),
    }

    println!("First 25 rows:");
    for (i, row) in rows.iter().skip(1).take(25).enumerate() {
        let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
        println!("  {}: {}", i + 1, cells.join(" | "));
    }
    Ok(())
}
