//! Expected schema catalog and consistency checking.
//!
//! The SQL schema itself is owned by an external migration file; this module
//! only verifies that the live database carries every table and column the
//! models map onto, keeping the two in lock-step. Nothing here issues DDL.

use crate::error::Result;
use crate::model::{
    DataSource, Day, Entity, InformationDocument, Itinerary, ItineraryItem, ProcessingEmail,
    StrandedItineraryItem, TravelAdvisor,
};

use super::connection::Database;

/// Expected shape of one table.
#[derive(Debug, Clone, Copy)]
pub struct TableSpec {
    /// Table name.
    pub name: &'static str,
    /// Columns the models require.
    pub columns: &'static [&'static str],
}

/// Tables and columns the model layer requires.
///
/// Derived from each entity's column constants so the catalog cannot drift
/// from the row mapping.
pub const EXPECTED_TABLES: &[TableSpec] = &[
    TableSpec {
        name: TravelAdvisor::TABLE,
        columns: TravelAdvisor::COLUMNS,
    },
    TableSpec {
        name: Itinerary::TABLE,
        columns: Itinerary::COLUMNS,
    },
    TableSpec {
        name: DataSource::TABLE,
        columns: DataSource::COLUMNS,
    },
    TableSpec {
        name: InformationDocument::TABLE,
        columns: InformationDocument::COLUMNS,
    },
    TableSpec {
        name: Day::TABLE,
        columns: Day::COLUMNS,
    },
    TableSpec {
        name: ItineraryItem::TABLE,
        columns: ItineraryItem::COLUMNS,
    },
    TableSpec {
        name: ProcessingEmail::TABLE,
        columns: ProcessingEmail::COLUMNS,
    },
    TableSpec {
        name: StrandedItineraryItem::TABLE,
        columns: StrandedItineraryItem::COLUMNS,
    },
];

const SELECT_TABLE_COLUMNS: &str = r"
    SELECT column_name
    FROM information_schema.columns
    WHERE table_schema = 'public' AND table_name = $1
";

/// Result of comparing the live schema against the expected catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SchemaReport {
    /// Tables missing entirely.
    pub missing_tables: Vec<String>,
    /// `(table, column)` pairs missing from tables that do exist.
    pub missing_columns: Vec<(String, String)>,
}

impl SchemaReport {
    /// True when every expected table and column is present.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        self.missing_tables.is_empty() && self.missing_columns.is_empty()
    }
}

impl Database {
    /// Compares the live schema against the expected table catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the `information_schema` queries fail.
    pub fn verify_schema(&mut self) -> Result<SchemaReport> {
        let mut report = SchemaReport::default();

        for spec in EXPECTED_TABLES {
            let rows = self.client.query(SELECT_TABLE_COLUMNS, &[&spec.name])?;
            if rows.is_empty() {
                report.missing_tables.push(spec.name.to_string());
                continue;
            }

            let present = rows
                .iter()
                .map(|row| row.try_get(0))
                .collect::<std::result::Result<Vec<String>, _>>()?;

            for column in spec.columns {
                if !present.iter().any(|name| name == column) {
                    report
                        .missing_columns
                        .push((spec.name.to_string(), (*column).to_string()));
                }
            }
        }

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_covers_every_table() {
        let names: Vec<&str> = EXPECTED_TABLES.iter().map(|t| t.name).collect();
        assert_eq!(names.len(), 8);
        for expected in [
            "travel_advisors",
            "itineraries",
            "data_sources",
            "information_documents",
            "days",
            "itinerary_items",
            "processing_emails",
            "stranded_itinerary_items",
        ] {
            assert!(names.contains(&expected), "missing table {expected}");
        }
    }

    #[test]
    fn test_catalog_requires_advisor_email_column() {
        let advisors = EXPECTED_TABLES
            .iter()
            .find(|t| t.name == "travel_advisors")
            .unwrap();
        assert!(advisors.columns.contains(&"email"));
    }

    #[test]
    fn test_catalog_requires_nullable_fk_columns() {
        let items = EXPECTED_TABLES
            .iter()
            .find(|t| t.name == "itinerary_items")
            .unwrap();
        assert!(items.columns.contains(&"day_id"));

        let stranded = EXPECTED_TABLES
            .iter()
            .find(|t| t.name == "stranded_itinerary_items")
            .unwrap();
        assert!(stranded.columns.contains(&"travel_advisor_id"));
        assert!(stranded.columns.contains(&"itinerary_item_id"));
    }

    #[test]
    fn test_empty_report_is_consistent() {
        let report = SchemaReport::default();
        assert!(report.is_consistent());

        let report = SchemaReport {
            missing_tables: vec!["processing_emails".to_string()],
            missing_columns: vec![],
        };
        assert!(!report.is_consistent());
    }
}
