use crate::core::{QueryShape, Record};
use crate::utils::error::{Result, SyncError};

/// 已取回的一列資料，欄位以 0 起算的索引讀取
pub trait ContactRow {
    fn column_count(&self) -> usize;

    /// 讀取第 `index` 欄為文字；SQL NULL 回傳 `Ok(None)`
    fn text(&self, index: usize) -> std::result::Result<Option<String>, String>;
}

impl QueryShape {
    pub fn from_column_count(count: usize) -> Result<Self> {
        match count {
            1 => Ok(QueryShape::EmailOnly),
            3 => Ok(QueryShape::NameAndEmail),
            other => Err(SyncError::SchemaError {
                message: format!("expected 1 or 3 columns, query returned {}", other),
            }),
        }
    }
}

/// `column_count` 來自查詢結果的欄位資訊，即使沒有任何資料列也會檢查。
/// 每一列都必須與宣告的欄位數相同；全部讀完才回傳。
pub fn decode_rows<R: ContactRow>(column_count: usize, rows: &[R]) -> Result<Vec<Record>> {
    let shape = QueryShape::from_column_count(column_count)?;
    tracing::debug!("Decoding {} rows as {:?}", rows.len(), shape);

    let mut records = Vec::with_capacity(rows.len());
    for (index, row) in rows.iter().enumerate() {
        let row_number = index + 1;
        if row.column_count() != shape.column_count() {
            return Err(SyncError::SchemaError {
                message: format!(
                    "row {} has {} columns but the query declared {}",
                    row_number,
                    row.column_count(),
                    shape.column_count()
                ),
            });
        }
        records.push(decode_row(row, shape, row_number)?);
    }

    Ok(records)
}

fn decode_row<R: ContactRow>(row: &R, shape: QueryShape, row_number: usize) -> Result<Record> {
    let read = |index: usize| {
        row.text(index).map_err(|message| SyncError::RowReadError {
            row: row_number,
            message,
        })
    };

    let record = match shape {
        QueryShape::EmailOnly => Record {
            email_address: read(0)?.unwrap_or_default(),
            ..Record::default()
        },
        QueryShape::NameAndEmail => Record {
            first_name: read(0)?.unwrap_or_default(),
            last_name: read(1)?.unwrap_or_default(),
            email_address: read(2)?.unwrap_or_default(),
        },
    };

    if record.email_address.is_empty() {
        return Err(SyncError::RowReadError {
            row: row_number,
            message: "email address is NULL or empty".to_string(),
        });
    }

    Ok(record)
}
