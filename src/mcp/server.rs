//! Sheetbridge MCP Server implementation
//!
//! Implements the Model Context Protocol over stdin/stdout using JSON-RPC.
//! Log output goes to stderr; stdout carries only protocol frames.

use std::io::{BufRead, BufReader, Write};

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::BridgeResult;
use crate::paths::PathResolver;
use crate::range::{auto_format_range, read_range, read_range_with_metadata, write_range};
use crate::sheet::{copy_sheet, delete_sheet, rename_sheet};
use crate::workbook::{create_sheet, create_workbook, workbook_info};

/// JSON-RPC request
#[derive(Debug, Deserialize)]
struct JsonRpcRequest {
    #[allow(dead_code)]
    jsonrpc: String,
    id: Option<Value>,
    method: String,
    #[serde(default)]
    params: Value,
}

/// JSON-RPC response
#[derive(Debug, Serialize)]
struct JsonRpcResponse {
    jsonrpc: String,
    id: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<JsonRpcError>,
}

/// JSON-RPC error
#[derive(Debug, Serialize)]
struct JsonRpcError {
    code: i32,
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<Value>,
}

/// MCP Tool definition
#[derive(Debug, Serialize)]
struct Tool {
    name: String,
    description: String,
    #[serde(rename = "inputSchema")]
    input_schema: Value,
}

/// Run the MCP server synchronously over stdin/stdout.
///
/// Reads newline-delimited JSON-RPC requests until EOF. The request
/// handling logic is tested via `handle_request()`.
pub fn run_mcp_server_sync(resolver: &PathResolver) {
    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout();
    let reader = BufReader::new(stdin.lock());

    for line in reader.lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        if line.trim().is_empty() {
            continue;
        }

        let request: JsonRpcRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let error_response = JsonRpcResponse {
                    jsonrpc: "2.0".to_string(),
                    id: Value::Null,
                    result: None,
                    error: Some(JsonRpcError {
                        code: -32700,
                        message: format!("Parse error: {}", e),
                        data: None,
                    }),
                };
                if let Ok(body) = serde_json::to_string(&error_response) {
                    let _ = writeln!(stdout, "{}", body);
                    let _ = stdout.flush();
                }
                continue;
            }
        };

        let response = handle_request(resolver, &request);

        if let Some(resp) = response {
            if let Ok(body) = serde_json::to_string(&resp) {
                let _ = writeln!(stdout, "{}", body);
                let _ = stdout.flush();
            }
        }
    }
}

/// Handle a JSON-RPC request
fn handle_request(resolver: &PathResolver, request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
    let id = request.id.clone().unwrap_or(Value::Null);

    match request.method.as_str() {
        "initialize" => Some(JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(json!({
                "protocolVersion": "2024-11-05",
                "capabilities": {
                    "tools": {
                        "listChanged": false
                    }
                },
                "serverInfo": {
                    "name": "sheetbridge-mcp",
                    "version": env!("CARGO_PKG_VERSION")
                },
                "instructions": "Sheetbridge MCP Server - Excel workbook manipulation. Read and write worksheet ranges with automatic type detection (numbers, percentages, currency, dates, booleans), apply canonical number formats, inspect cell metadata and validation rules, and manage sheets."
            })),
            error: None,
        }),
        "notifications/initialized" => None, // No response for notifications
        "tools/list" => Some(JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(json!({
                "tools": get_tools()
            })),
            error: None,
        }),
        "tools/call" => {
            let tool_name = request
                .params
                .get("name")
                .and_then(|v| v.as_str())
                .unwrap_or("");
            let arguments = request
                .params
                .get("arguments")
                .cloned()
                .unwrap_or(json!({}));

            let result = call_tool(resolver, tool_name, &arguments);
            Some(JsonRpcResponse {
                jsonrpc: "2.0".to_string(),
                id,
                result: Some(result),
                error: None,
            })
        }
        "ping" => Some(JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id,
            result: Some(json!({})),
            error: None,
        }),
        _ => Some(JsonRpcResponse {
            jsonrpc: "2.0".to_string(),
            id,
            result: None,
            error: Some(JsonRpcError {
                code: -32601,
                message: format!("Method not found: {}", request.method),
                data: None,
            }),
        }),
    }
}

fn filepath_schema() -> Value {
    json!({
        "type": "string",
        "description": "Path to the Excel file (absolute, or relative to the configured files directory)"
    })
}

/// Get all available tools
fn get_tools() -> Vec<Tool> {
    vec![
        Tool {
            name: "excel_read_range".to_string(),
            description: "Read data from an Excel worksheet range. Returns rows of raw cell values; rows that are entirely empty are skipped. With no end cell the sheet's populated data range is read.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "filepath": filepath_schema(),
                    "sheet_name": {
                        "type": "string",
                        "description": "Name of the worksheet to read"
                    },
                    "start_cell": {
                        "type": "string",
                        "description": "Starting cell reference, or a full range like 'A1:C10'",
                        "default": "A1"
                    },
                    "end_cell": {
                        "type": "string",
                        "description": "Ending cell reference (optional)"
                    }
                },
                "required": ["filepath", "sheet_name"]
            }),
        },
        Tool {
            name: "excel_read_range_metadata".to_string(),
            description: "Read an Excel range with per-cell metadata: address, raw value, row/column, and data-validation rules. Every cell of the rectangle is included, empty or not.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "filepath": filepath_schema(),
                    "sheet_name": {
                        "type": "string",
                        "description": "Name of the worksheet to read"
                    },
                    "start_cell": {
                        "type": "string",
                        "description": "Starting cell reference, or a full range like 'A1:C10'",
                        "default": "A1"
                    },
                    "end_cell": {
                        "type": "string",
                        "description": "Ending cell reference (optional)"
                    },
                    "include_validation": {
                        "type": "boolean",
                        "description": "Whether to include data-validation metadata",
                        "default": true
                    }
                },
                "required": ["filepath", "sheet_name"]
            }),
        },
        Tool {
            name: "excel_write_range".to_string(),
            description: "Write rows of data to an Excel worksheet with automatic type detection. Detects numbers ('123' -> 123), percentages ('50%' -> 0.5 with percent format), currency ('$1,000' -> 1000 with currency format), dates ('2023-12-25'), and booleans ('true' -> TRUE), applying the matching number format.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "filepath": filepath_schema(),
                    "sheet_name": {
                        "type": "string",
                        "description": "Worksheet to write to (default: active sheet; created if missing)"
                    },
                    "rows": {
                        "type": "array",
                        "items": { "type": "array" },
                        "description": "Rows of cell values to write"
                    },
                    "start_cell": {
                        "type": "string",
                        "description": "Cell to start writing at",
                        "default": "A1"
                    },
                    "auto_detect_types": {
                        "type": "boolean",
                        "description": "Whether to detect and convert value types",
                        "default": true
                    }
                },
                "required": ["filepath", "rows"]
            }),
        },
        Tool {
            name: "excel_autoformat_range".to_string(),
            description: "Analyze existing cell values in a range and apply the proper number formats (numeric, percentage, currency, date). With no end cell, all data in the sheet is processed.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "filepath": filepath_schema(),
                    "sheet_name": {
                        "type": "string",
                        "description": "Name of the worksheet"
                    },
                    "start_cell": {
                        "type": "string",
                        "description": "Starting cell reference",
                        "default": "A1"
                    },
                    "end_cell": {
                        "type": "string",
                        "description": "Ending cell reference (optional)"
                    }
                },
                "required": ["filepath", "sheet_name"]
            }),
        },
        Tool {
            name: "excel_create_workbook".to_string(),
            description: "Create a new Excel workbook with a default sheet.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "filepath": filepath_schema()
                },
                "required": ["filepath"]
            }),
        },
        Tool {
            name: "excel_create_sheet".to_string(),
            description: "Create a new worksheet in an existing workbook.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "filepath": filepath_schema(),
                    "sheet_name": {
                        "type": "string",
                        "description": "Name for the new worksheet"
                    }
                },
                "required": ["filepath", "sheet_name"]
            }),
        },
        Tool {
            name: "excel_workbook_info".to_string(),
            description: "Get workbook metadata: sheet names, sheet count, file size, and optionally the used range of each sheet.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "filepath": filepath_schema(),
                    "include_ranges": {
                        "type": "boolean",
                        "description": "Whether to include used data ranges per sheet",
                        "default": false
                    }
                },
                "required": ["filepath"]
            }),
        },
        Tool {
            name: "excel_rename_sheet".to_string(),
            description: "Rename a worksheet.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "filepath": filepath_schema(),
                    "old_name": {
                        "type": "string",
                        "description": "Current worksheet name"
                    },
                    "new_name": {
                        "type": "string",
                        "description": "New worksheet name"
                    }
                },
                "required": ["filepath", "old_name", "new_name"]
            }),
        },
        Tool {
            name: "excel_delete_sheet".to_string(),
            description: "Delete a worksheet from a workbook.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "filepath": filepath_schema(),
                    "sheet_name": {
                        "type": "string",
                        "description": "Worksheet to delete"
                    }
                },
                "required": ["filepath", "sheet_name"]
            }),
        },
        Tool {
            name: "excel_copy_sheet".to_string(),
            description: "Copy a worksheet within a workbook.".to_string(),
            input_schema: json!({
                "type": "object",
                "properties": {
                    "filepath": filepath_schema(),
                    "source_sheet": {
                        "type": "string",
                        "description": "Worksheet to copy"
                    },
                    "target_sheet": {
                        "type": "string",
                        "description": "Name for the copy"
                    }
                },
                "required": ["filepath", "source_sheet", "target_sheet"]
            }),
        },
    ]
}

fn text_result(text: String) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": text
        }],
        "isError": false
    })
}

fn error_result(text: String) -> Value {
    json!({
        "content": [{
            "type": "text",
            "text": text
        }],
        "isError": true
    })
}

fn arg_str<'a>(arguments: &'a Value, key: &str) -> &'a str {
    arguments.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

fn arg_opt_str<'a>(arguments: &'a Value, key: &str) -> Option<&'a str> {
    arguments.get(key).and_then(|v| v.as_str())
}

fn arg_bool(arguments: &Value, key: &str, default: bool) -> bool {
    arguments
        .get(key)
        .and_then(|v| v.as_bool())
        .unwrap_or(default)
}

fn run_tool<T>(op: impl FnOnce() -> BridgeResult<T>, render: impl FnOnce(T) -> String) -> Value {
    match op() {
        Ok(value) => text_result(render(value)),
        Err(e) => {
            tracing::error!("tool call failed: {}", e);
            error_result(format!("Error: {}", e))
        }
    }
}

/// Call a tool by name
fn call_tool(resolver: &PathResolver, name: &str, arguments: &Value) -> Value {
    let filepath = arg_str(arguments, "filepath");
    let full_path = match resolver.resolve(filepath) {
        Ok(p) => p,
        Err(e) => return error_result(format!("Error: {}", e)),
    };

    match name {
        "excel_read_range" => run_tool(
            || {
                read_range(
                    &full_path,
                    arg_str(arguments, "sheet_name"),
                    arg_opt_str(arguments, "start_cell").unwrap_or("A1"),
                    arg_opt_str(arguments, "end_cell"),
                )
            },
            |rows| {
                if rows.is_empty() {
                    "No data found in specified range".to_string()
                } else {
                    rows.iter()
                        .map(|row| {
                            serde_json::to_string(row).unwrap_or_else(|_| "[]".to_string())
                        })
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            },
        ),
        "excel_read_range_metadata" => run_tool(
            || {
                read_range_with_metadata(
                    &full_path,
                    arg_str(arguments, "sheet_name"),
                    arg_opt_str(arguments, "start_cell").unwrap_or("A1"),
                    arg_opt_str(arguments, "end_cell"),
                    arg_bool(arguments, "include_validation", true),
                )
            },
            |data| serde_json::to_string_pretty(&data).unwrap_or_else(|_| "{}".to_string()),
        ),
        "excel_write_range" => {
            let rows: Vec<Vec<Value>> = arguments
                .get("rows")
                .and_then(|v| v.as_array())
                .map(|arr| {
                    arr.iter()
                        .map(|row| row.as_array().cloned().unwrap_or_else(|| vec![row.clone()]))
                        .collect()
                })
                .unwrap_or_default();

            run_tool(
                || {
                    write_range(
                        &full_path,
                        arg_opt_str(arguments, "sheet_name"),
                        &rows,
                        arg_opt_str(arguments, "start_cell").unwrap_or("A1"),
                        arg_bool(arguments, "auto_detect_types", true),
                    )
                },
                |summary| summary.message,
            )
        }
        "excel_autoformat_range" => {
            let start = arg_opt_str(arguments, "start_cell").unwrap_or("A1").to_string();
            let end = arg_opt_str(arguments, "end_cell").map(str::to_string);
            run_tool(
                || {
                    auto_format_range(
                        &full_path,
                        arg_str(arguments, "sheet_name"),
                        &start,
                        end.as_deref(),
                    )
                },
                |count| {
                    let range_desc = match &end {
                        Some(e) => format!("range {}:{}", start, e),
                        None => "the sheet's data range".to_string(),
                    };
                    format!(
                        "Applied automatic formatting to {} cells in {}",
                        count, range_desc
                    )
                },
            )
        }
        "excel_create_workbook" => run_tool(
            || create_workbook(&full_path),
            |_| format!("Created workbook at {}", full_path.display()),
        ),
        "excel_create_sheet" => {
            let sheet_name = arg_str(arguments, "sheet_name").to_string();
            run_tool(
                || create_sheet(&full_path, &sheet_name),
                |_| format!("Created sheet '{}'", sheet_name),
            )
        }
        "excel_workbook_info" => run_tool(
            || workbook_info(&full_path, arg_bool(arguments, "include_ranges", false)),
            |info| serde_json::to_string_pretty(&info).unwrap_or_else(|_| "{}".to_string()),
        ),
        "excel_rename_sheet" => run_tool(
            || {
                rename_sheet(
                    &full_path,
                    arg_str(arguments, "old_name"),
                    arg_str(arguments, "new_name"),
                )
            },
            |message| message,
        ),
        "excel_delete_sheet" => run_tool(
            || delete_sheet(&full_path, arg_str(arguments, "sheet_name")),
            |message| message,
        ),
        "excel_copy_sheet" => run_tool(
            || {
                copy_sheet(
                    &full_path,
                    arg_str(arguments, "source_sheet"),
                    arg_str(arguments, "target_sheet"),
                )
            },
            |message| message,
        ),
        _ => error_result(format!("Unknown tool: {}", name)),
    }
}
