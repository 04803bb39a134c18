use clap::{Parser, Subcommand};
use sheetbridge::cli;
use sheetbridge::error::BridgeResult;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sheetbridge")]
#[command(about = "Read and write Excel ranges with automatic type inference.")]
#[command(long_about = "Sheetbridge - Excel range transfer with type inference

Raw text like \"$1,000.50\", \"50%\", or \"2023-12-25\" is normalized to a
typed value plus a canonical display format before it lands in a cell.

COMMANDS:
  read          - Read raw values from a range
  read-meta     - Read a range with per-cell metadata
  write         - Write rows with automatic type detection
  autoformat    - Re-infer and format existing cell values
  info          - Show workbook metadata
  new           - Create a new workbook
  new-sheet     - Add a worksheet
  rename-sheet  - Rename a worksheet
  delete-sheet  - Remove a worksheet
  copy-sheet    - Duplicate a worksheet

EXAMPLES:
  sheetbridge read book.xlsx Sheet1 A1 --end C10
  sheetbridge write book.xlsx '[[\"Name\",\"Amount\"],[\"Bob\",\"$1,250.00\"]]'
  sheetbridge autoformat book.xlsx Sheet1 A1
  sheetbridge info book.xlsx --ranges

The MCP server lives in the companion binary: sheetbridge-mcp")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    #[command(long_about = "Read raw values from a worksheet range.

Each row prints as a JSON array. Rows whose cells are all empty are
skipped. If the requested start cell lies beyond the populated area
the command reports an empty result instead of failing.

RANGE SELECTION:
  With no --end, the range runs from the start cell to the last
  populated cell of the sheet. A start like \"A1:C10\" carries its own
  end and overrides --end.

EXAMPLES:
  sheetbridge read book.xlsx Sheet1 A1
  sheetbridge read book.xlsx Sheet1 A1 --end C10
  sheetbridge read book.xlsx Sheet1 A1:C10")]
    /// Read raw values from a worksheet range
    Read {
        /// Path to Excel file (.xlsx)
        file: PathBuf,

        /// Worksheet name
        sheet: String,

        /// Start cell (e.g. A1) or full range (e.g. A1:C10)
        start: String,

        /// End cell (optional; defaults to the sheet's populated extent)
        #[arg(short, long)]
        end: Option<String>,
    },

    #[command(long_about = "Read a range with per-cell metadata.

Emits a JSON document with one record per cell in the range: address,
value, row, column, and (unless --skip-validation) a descriptor of any
data-validation rule covering that cell. Empty cells are included.

EXAMPLES:
  sheetbridge read-meta book.xlsx Sheet1 A1 --end C10
  sheetbridge read-meta book.xlsx Sheet1 A1:C10 --skip-validation")]
    /// Read a range with per-cell metadata
    ReadMeta {
        /// Path to Excel file (.xlsx)
        file: PathBuf,

        /// Worksheet name
        sheet: String,

        /// Start cell (e.g. A1) or full range (e.g. A1:C10)
        start: String,

        /// End cell (optional; defaults to the sheet's populated extent)
        #[arg(short, long)]
        end: Option<String>,

        /// Skip data-validation lookups
        #[arg(long)]
        skip_validation: bool,
    },

    #[command(long_about = "Write rows of data with automatic type detection.

Rows are a JSON array of arrays. String values are inferred: \"50%\"
becomes 0.5 with a percentage format, \"$1,250.00\" becomes 1250.0 with
a currency format, \"2023-12-25\" becomes an Excel date serial, and so
on. Non-string JSON values (numbers, booleans) are written as-is.

If the named sheet does not exist it is created. With no --sheet the
workbook's first sheet is used.

EXAMPLES:
  sheetbridge write book.xlsx '[[\"Name\",\"Amount\"],[\"Bob\",\"$1,250.00\"]]'
  sheetbridge write book.xlsx '[[1,2],[3,4]]' --start B2 --sheet Data
  sheetbridge write book.xlsx '[[\"raw text\"]]' --no-detect")]
    /// Write rows with automatic type detection
    Write {
        /// Path to Excel file (.xlsx)
        file: PathBuf,

        /// Rows as a JSON array of arrays
        rows: String,

        /// Worksheet name (defaults to the first sheet)
        #[arg(short, long)]
        sheet: Option<String>,

        /// Top-left cell of the destination (default: A1)
        #[arg(long, default_value = "A1")]
        start: String,

        /// Write strings verbatim without type detection
        #[arg(long)]
        no_detect: bool,
    },

    #[command(long_about = "Re-infer and format existing cell values.

Walks the given range (or the whole populated sheet when no range is
given), re-runs type inference on each populated cell's text, and
rewrites the cell with the inferred value and display format.

EXAMPLES:
  sheetbridge autoformat book.xlsx Sheet1 A1
  sheetbridge autoformat book.xlsx Sheet1 A1 --end C10")]
    /// Re-infer and format existing cell values
    Autoformat {
        /// Path to Excel file (.xlsx)
        file: PathBuf,

        /// Worksheet name
        sheet: String,

        /// Start cell (e.g. A1) or full range (e.g. A1:C10)
        start: String,

        /// End cell (optional; defaults to the whole populated sheet)
        #[arg(short, long)]
        end: Option<String>,
    },

    /// Show workbook metadata (sheets, size, used ranges)
    Info {
        /// Path to Excel file (.xlsx)
        file: PathBuf,

        /// Include the used range of each populated sheet
        #[arg(short, long)]
        ranges: bool,
    },

    /// Create a new workbook with a default sheet
    New {
        /// Path for the new Excel file (.xlsx)
        file: PathBuf,
    },

    /// Add a worksheet to an existing workbook
    NewSheet {
        /// Path to Excel file (.xlsx)
        file: PathBuf,

        /// Name for the new worksheet
        name: String,
    },

    /// Rename a worksheet
    RenameSheet {
        /// Path to Excel file (.xlsx)
        file: PathBuf,

        /// Current worksheet name
        old_name: String,

        /// New worksheet name
        new_name: String,
    },

    /// Remove a worksheet (the last sheet cannot be deleted)
    DeleteSheet {
        /// Path to Excel file (.xlsx)
        file: PathBuf,

        /// Worksheet name to delete
        name: String,
    },

    /// Duplicate a worksheet within the workbook
    CopySheet {
        /// Path to Excel file (.xlsx)
        file: PathBuf,

        /// Worksheet to copy
        source: String,

        /// Name for the copy
        target: String,
    },
}

fn main() -> BridgeResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Read {
            file,
            sheet,
            start,
            end,
        } => cli::read(file, sheet, start, end),

        Commands::ReadMeta {
            file,
            sheet,
            start,
            end,
            skip_validation,
        } => cli::read_meta(file, sheet, start, end, skip_validation),

        Commands::Write {
            file,
            rows,
            sheet,
            start,
            no_detect,
        } => cli::write(file, sheet, rows, start, no_detect),

        Commands::Autoformat {
            file,
            sheet,
            start,
            end,
        } => cli::autoformat(file, sheet, start, end),

        Commands::Info { file, ranges } => cli::info(file, ranges),

        Commands::New { file } => cli::new_workbook(file),

        Commands::NewSheet { file, name } => cli::new_sheet(file, name),

        Commands::RenameSheet {
            file,
            old_name,
            new_name,
        } => cli::rename_sheet_cmd(file, old_name, new_name),

        Commands::DeleteSheet { file, name } => cli::delete_sheet_cmd(file, name),

        Commands::CopySheet {
            file,
            source,
            target,
        } => cli::copy_sheet_cmd(file, source, target),
    }
}
