//! Mapping workbook population.
//!
//! The template's header row is the authoritative contract: column
//! positions are resolved by header text, never by fixed indices, and
//! every expected header is validated up front so a drifted template
//! fails with a named header instead of deep inside row writing.
//!
//! The populated workbook is serialised to an in-memory buffer; no
//! temporary files are created.

use std::collections::HashMap;
use std::io::Cursor;
use std::path::Path;

use chrono::Local;
use umya_spreadsheet::{Spreadsheet, Worksheet};

use crate::error::{Result, ToolError};

use super::{MappingInfo, MappingRow, SECURITY_CLASSIFICATION};

const SHEET_DATA: &str = "Data Mapping";
const SHEET_INFO: &str = "Mapping Information";

// "Data Mapping" headers. Several carry embedded newlines in the
// template; the lookup preserves interior whitespace exactly.
const H_SEQ: &str = "Seq#";
const H_TARGET_COLUMN: &str = "Target Column Name";
const H_TARGET_DATATYPE: &str = "Target Datatype";
const H_NULLABLE: &str = "Nullable \n(Y/N)";
const H_SOURCE_COLUMN: &str = "Source Column Name";
const H_SOURCE_DATATYPE: &str = "Source Data type";
const H_SOURCE_SCHEMA: &str = "Source Schema";
const H_SOURCE_TABLE: &str = "Source Table Name";
const H_TRANSFORM: &str = "Transform Comments";
const H_MOD_DATE: &str = "Mod Date";
const H_DESCRIPTION: &str = "Target Column Description";
const H_PRIMARY_INDEX: &str = "PI/DK \n(Y/N)";
const H_PRIMARY_KEY: &str = "PK\n(Y/N)";
const H_FOREIGN_KEY: &str = "FK\n(Y/N)";
const H_COMPRESSION: &str = "Comp-\nression\n(Y/N)";
const H_UNICODE: &str = "Uni-code\n(Y/N)";
const H_PII: &str = "PII\n(Y/N)";
const H_SECURITY: &str = "Security Classification";

// "Mapping Information" headers.
const I_SNO: &str = "Sno";
const I_DOMAIN: &str = "Domain";
const I_PROJECT: &str = "Project ID - Project Name";
const I_VERSION: &str = "Mapping Version";
const I_ADDITIONAL: &str = "Additional Information";
const I_AUTHOR: &str = "Created by Data Architect";
const I_CREATED: &str = "Created Date";
const I_LOAD: &str = "Load Strategy";
const I_EXPECTATIONS: &str = "Data Expectations";
const I_ILM: &str = "ILM Strategy";

// Fixed "Mapping Information" cell values.
const INFO_DOMAIN: &str = "GOSC";
const INFO_PROJECT: &str = "DSC Logistics/Trade";
const INFO_VERSION: &str = "1.0";

/// Header-text to column-index map for one sheet, built from row 1.
struct HeaderIndex {
    sheet_name: &'static str,
    positions: HashMap<String, u32>,
}

impl HeaderIndex {
    fn scan(sheet: &Worksheet, sheet_name: &'static str) -> Self {
        let (highest_column, _) = sheet.get_highest_column_and_row();
        let mut positions = HashMap::new();
        for column in 1..=highest_column {
            let value = sheet.get_value((column, 1));
            let trimmed = value.trim();
            if !trimmed.is_empty() {
                positions.entry(trimmed.to_string()).or_insert(column);
            }
        }
        Self {
            sheet_name,
            positions,
        }
    }

    fn require(&self, header: &str) -> Result<u32> {
        self.positions.get(header).copied().ok_or_else(|| {
            ToolError::Template(format!(
                "sheet '{}' has no '{}' header",
                self.sheet_name,
                header.replace('\n', " ")
            ))
        })
    }
}

/// Resolved column positions of the "Data Mapping" sheet.
struct DataColumns {
    seq: u32,
    target_column: u32,
    target_datatype: u32,
    nullable: u32,
    source_column: u32,
    source_datatype: u32,
    source_schema: u32,
    source_table: u32,
    transform: u32,
    mod_date: u32,
    description: u32,
    primary_index: u32,
    primary_key: u32,
    foreign_key: u32,
    compression: u32,
    unicode: u32,
    pii: u32,
    security: u32,
}

impl DataColumns {
    fn resolve(sheet: &Worksheet) -> Result<Self> {
        let index = HeaderIndex::scan(sheet, SHEET_DATA);
        Ok(Self {
            seq: index.require(H_SEQ)?,
            target_column: index.require(H_TARGET_COLUMN)?,
            target_datatype: index.require(H_TARGET_DATATYPE)?,
            nullable: index.require(H_NULLABLE)?,
            source_column: index.require(H_SOURCE_COLUMN)?,
            source_datatype: index.require(H_SOURCE_DATATYPE)?,
            source_schema: index.require(H_SOURCE_SCHEMA)?,
            source_table: index.require(H_SOURCE_TABLE)?,
            transform: index.require(H_TRANSFORM)?,
            mod_date: index.require(H_MOD_DATE)?,
            description: index.require(H_DESCRIPTION)?,
            primary_index: index.require(H_PRIMARY_INDEX)?,
            primary_key: index.require(H_PRIMARY_KEY)?,
            foreign_key: index.require(H_FOREIGN_KEY)?,
            compression: index.require(H_COMPRESSION)?,
            unicode: index.require(H_UNICODE)?,
            pii: index.require(H_PII)?,
            security: index.require(H_SECURITY)?,
        })
    }
}

/// Resolved column positions of the "Mapping Information" sheet.
struct InfoColumns {
    sno: u32,
    domain: u32,
    project: u32,
    version: u32,
    additional: u32,
    author: u32,
    created: u32,
    load: u32,
    expectations: u32,
    ilm: u32,
}

impl InfoColumns {
    fn resolve(sheet: &Worksheet) -> Result<Self> {
        let index = HeaderIndex::scan(sheet, SHEET_INFO);
        Ok(Self {
            sno: index.require(I_SNO)?,
            domain: index.require(I_DOMAIN)?,
            project: index.require(I_PROJECT)?,
            version: index.require(I_VERSION)?,
            additional: index.require(I_ADDITIONAL)?,
            author: index.require(I_AUTHOR)?,
            created: index.require(I_CREATED)?,
            load: index.require(I_LOAD)?,
            expectations: index.require(I_EXPECTATIONS)?,
            ilm: index.require(I_ILM)?,
        })
    }
}

/// A mapping workbook loaded from the template.
#[derive(Debug)]
pub struct MappingWorkbook {
    book: Spreadsheet,
}

impl MappingWorkbook {
    /// Load the template workbook from disk.
    pub fn load(template_path: &Path) -> Result<Self> {
        let book = umya_spreadsheet::reader::xlsx::read(template_path).map_err(|e| {
            ToolError::Template(format!(
                "failed to load template {}: {}",
                template_path.display(),
                e
            ))
        })?;
        Ok(Self { book })
    }

    /// Write one data row per column and the single metadata row.
    pub fn populate(&mut self, rows: &[MappingRow], info: &MappingInfo) -> Result<()> {
        {
            let sheet = self
                .book
                .get_sheet_by_name_mut(SHEET_DATA)
                .ok_or_else(|| missing_sheet(SHEET_DATA))?;
            write_data_sheet(sheet, rows)?;
        }

        let sheet = self
            .book
            .get_sheet_by_name_mut(SHEET_INFO)
            .ok_or_else(|| missing_sheet(SHEET_INFO))?;
        write_info_sheet(sheet, info)
    }

    /// Serialise the workbook to bytes.
    pub fn into_bytes(self) -> Result<Vec<u8>> {
        let mut cursor = Cursor::new(Vec::new());
        umya_spreadsheet::writer::xlsx::write_writer(&self.book, &mut cursor)
            .map_err(|e| ToolError::Write(format!("failed to serialise workbook: {}", e)))?;
        Ok(cursor.into_inner())
    }
}

fn missing_sheet(name: &str) -> ToolError {
    ToolError::Template(format!("template has no '{}' sheet", name))
}

fn write_data_sheet(sheet: &mut Worksheet, rows: &[MappingRow]) -> Result<()> {
    let columns = DataColumns::resolve(sheet)?;

    for (offset, row) in rows.iter().enumerate() {
        let r = offset as u32 + 2;
        sheet.get_cell_mut((columns.seq, r)).set_value_number(row.seq);
        sheet
            .get_cell_mut((columns.target_column, r))
            .set_value(&row.target_column);
        sheet
            .get_cell_mut((columns.target_datatype, r))
            .set_value(&row.target_datatype);
        sheet.get_cell_mut((columns.nullable, r)).set_value(row.nullable);
        sheet
            .get_cell_mut((columns.source_column, r))
            .set_value(&row.source_column);
        sheet
            .get_cell_mut((columns.source_datatype, r))
            .set_value(&row.source_datatype);
        sheet
            .get_cell_mut((columns.source_schema, r))
            .set_value(&row.source_schema);
        sheet
            .get_cell_mut((columns.source_table, r))
            .set_value(&row.source_table);
        sheet
            .get_cell_mut((columns.transform, r))
            .set_value(row.transform_comment);
        sheet.get_cell_mut((columns.mod_date, r)).set_value("");
        sheet
            .get_cell_mut((columns.description, r))
            .set_value(&row.description);
        sheet
            .get_cell_mut((columns.primary_index, r))
            .set_value(row.primary_index);
        sheet
            .get_cell_mut((columns.primary_key, r))
            .set_value(row.primary_key);
        sheet
            .get_cell_mut((columns.foreign_key, r))
            .set_value(row.foreign_key);
        sheet
            .get_cell_mut((columns.compression, r))
            .set_value(row.compression);
        sheet.get_cell_mut((columns.unicode, r)).set_value(row.unicode);
        sheet.get_cell_mut((columns.pii, r)).set_value(row.pii);
        sheet
            .get_cell_mut((columns.security, r))
            .set_value(SECURITY_CLASSIFICATION);
    }

    Ok(())
}

fn write_info_sheet(sheet: &mut Worksheet, info: &MappingInfo) -> Result<()> {
    let columns = InfoColumns::resolve(sheet)?;

    sheet.get_cell_mut((columns.sno, 2)).set_value_number(1);
    sheet.get_cell_mut((columns.domain, 2)).set_value(INFO_DOMAIN);
    sheet.get_cell_mut((columns.project, 2)).set_value(INFO_PROJECT);
    sheet.get_cell_mut((columns.version, 2)).set_value(INFO_VERSION);
    sheet.get_cell_mut((columns.additional, 2)).set_value("");
    sheet.get_cell_mut((columns.author, 2)).set_value(&info.author);
    sheet
        .get_cell_mut((columns.created, 2))
        .set_value(Local::now().format("%Y-%m-%d").to_string());
    sheet
        .get_cell_mut((columns.load, 2))
        .set_value(&info.load_strategy);
    sheet.get_cell_mut((columns.expectations, 2)).set_value("");
    sheet.get_cell_mut((columns.ilm, 2)).set_value(&info.ilm_strategy);

    Ok(())
}
