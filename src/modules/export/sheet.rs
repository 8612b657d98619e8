use crate::core::error::{AppError, Result};

/// A record that can be rendered as one row of a tabular export.
pub trait SheetRow {
    /// Column headers, written once at the top of the sheet.
    fn headers() -> Vec<&'static str>;

    /// Cell values for this record, in header order.
    fn row(&self) -> Vec<String>;
}

/// Serialize records into CSV bytes suitable for a download response.
/// Zero records produce a header-only sheet, not an error.
pub fn write_sheet<T: SheetRow>(rows: &[T]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(T::headers())
        .map_err(|e| AppError::Internal(format!("Failed to write sheet header: {}", e)))?;

    for record in rows {
        writer
            .write_record(record.row())
            .map_err(|e| AppError::Internal(format!("Failed to write sheet row: {}", e)))?;
    }

    writer
        .into_inner()
        .map_err(|e| AppError::Internal(format!("Failed to finish sheet: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Item {
        name: String,
        count: i64,
    }

    impl SheetRow for Item {
        fn headers() -> Vec<&'static str> {
            vec!["name", "count"]
        }

        fn row(&self) -> Vec<String> {
            vec![self.name.clone(), self.count.to_string()]
        }
    }

    #[test]
    fn test_writes_header_and_rows() {
        let items = vec![
            Item {
                name: "first".to_string(),
                count: 1,
            },
            Item {
                name: "second".to_string(),
                count: 2,
            },
        ];

        let bytes = write_sheet(&items).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "name,count\nfirst,1\nsecond,2\n");
    }

    #[test]
    fn test_empty_input_yields_header_only() {
        let bytes = write_sheet::<Item>(&[]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "name,count\n");
    }

    #[test]
    fn test_cells_with_commas_are_quoted() {
        let items = vec![Item {
            name: "a, b".to_string(),
            count: 3,
        }];

        let bytes = write_sheet(&items).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        assert_eq!(text, "name,count\n\"a, b\",3\n");
    }
}
