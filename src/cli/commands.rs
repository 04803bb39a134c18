use std::path::PathBuf;

use colored::Colorize;

use crate::error::{BridgeError, BridgeResult};
use crate::range;
use crate::sheet;
use crate::workbook;

/// Execute the read command
pub fn read(
    file: PathBuf,
    sheet_name: String,
    start: String,
    end: Option<String>,
) -> BridgeResult<()> {
    let rows = range::read_range(&file, &sheet_name, &start, end.as_deref())?;

    if rows.is_empty() {
        println!("{}", "No data found in specified range".yellow());
        return Ok(());
    }

    println!(
        "{}",
        format!("📊 {} ({} rows)", sheet_name, rows.len()).bold().green()
    );
    for row in &rows {
        let line = serde_json::to_string(row)
            .map_err(|e| BridgeError::Data(format!("cannot render row: {}", e)))?;
        println!("{}", line);
    }
    Ok(())
}

/// Execute the read-meta command
pub fn read_meta(
    file: PathBuf,
    sheet_name: String,
    start: String,
    end: Option<String>,
    skip_validation: bool,
) -> BridgeResult<()> {
    let data =
        range::read_range_with_metadata(&file, &sheet_name, &start, end.as_deref(), !skip_validation)?;
    let body = serde_json::to_string_pretty(&data)
        .map_err(|e| BridgeError::Data(format!("cannot render range data: {}", e)))?;
    println!("{}", body);
    Ok(())
}

/// Execute the write command. Rows are given as a JSON array of arrays.
pub fn write(
    file: PathBuf,
    sheet_name: Option<String>,
    rows_json: String,
    start: String,
    no_detect: bool,
) -> BridgeResult<()> {
    let rows: Vec<Vec<serde_json::Value>> = serde_json::from_str(&rows_json)
        .map_err(|e| BridgeError::Data(format!("rows must be a JSON array of arrays: {}", e)))?;

    let summary = range::write_range(&file, sheet_name.as_deref(), &rows, &start, !no_detect)?;

    println!("{}", "✅ Write complete".bold().green());
    println!("   {}", summary.message);
    Ok(())
}

/// Execute the autoformat command
pub fn autoformat(
    file: PathBuf,
    sheet_name: String,
    start: String,
    end: Option<String>,
) -> BridgeResult<()> {
    let count = range::auto_format_range(&file, &sheet_name, &start, end.as_deref())?;
    println!(
        "{}",
        format!("✅ Applied automatic formatting to {} cells", count)
            .bold()
            .green()
    );
    Ok(())
}

/// Execute the info command
pub fn info(file: PathBuf, include_ranges: bool) -> BridgeResult<()> {
    let info = workbook::workbook_info(&file, include_ranges)?;
    let body = serde_json::to_string_pretty(&info)
        .map_err(|e| BridgeError::Data(format!("cannot render workbook info: {}", e)))?;
    println!("{}", body);
    Ok(())
}

/// Execute the new command
pub fn new_workbook(file: PathBuf) -> BridgeResult<()> {
    workbook::create_workbook(&file)?;
    println!(
        "{}",
        format!("✅ Created workbook at {}", file.display())
            .bold()
            .green()
    );
    Ok(())
}

/// Execute the new-sheet command
pub fn new_sheet(file: PathBuf, name: String) -> BridgeResult<()> {
    workbook::create_sheet(&file, &name)?;
    println!("{}", format!("✅ Created sheet '{}'", name).bold().green());
    Ok(())
}

/// Execute the rename-sheet command
pub fn rename_sheet_cmd(file: PathBuf, old_name: String, new_name: String) -> BridgeResult<()> {
    let message = sheet::rename_sheet(&file, &old_name, &new_name)?;
    println!("{}", format!("✅ {}", message).bold().green());
    Ok(())
}

/// Execute the delete-sheet command
pub fn delete_sheet_cmd(file: PathBuf, name: String) -> BridgeResult<()> {
    let message = sheet::delete_sheet(&file, &name)?;
    println!("{}", format!("✅ {}", message).bold().green());
    Ok(())
}

/// Execute the copy-sheet command
pub fn copy_sheet_cmd(file: PathBuf, source: String, target: String) -> BridgeResult<()> {
    let message = sheet::copy_sheet(&file, &source, &target)?;
    println!("{}", format!("✅ {}", message).bold().green());
    Ok(())
}
