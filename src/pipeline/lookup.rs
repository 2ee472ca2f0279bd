//! Record lookup by PCTID.

use serde_json::Value;

use crate::models::{Record, record_pctid};
use crate::storage::DatasetStorage;

/// Find the first record whose PCTID equals `target`.
///
/// Records without a PCTID, or whose PCTID is not a whole number, are skipped.
pub fn find_by_pctid(records: &[Record], target: i64) -> Option<&Record> {
    records
        .iter()
        .find(|record| record_pctid(record) == Some(target))
}

/// Render every field as `key: value`, one per line, in field order.
pub fn render_record(record: &Record) -> String {
    record
        .iter()
        .map(|(key, value)| format!("{}: {}", key, render_value(value)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strings print bare; everything else prints as compact JSON.
fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Full lookup report, as shown to the user.
pub fn describe_lookup(records: &[Record], target: i64) -> String {
    match find_by_pctid(records, target) {
        Some(record) => format!(
            "Information for PCTID {}:\n{}",
            target,
            render_record(record)
        ),
        None => format!("No information found for PCTID {}", target),
    }
}

/// Look up a record in the stored snapshot without touching the network.
pub async fn lookup_snapshot(storage: &dyn DatasetStorage, target: i64) -> String {
    let records = storage.load().await;
    log::debug!(
        "Searching {} cached records in {}",
        records.len(),
        storage.location().display()
    );
    describe_lookup(&records, target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Dataset;
    use crate::storage::LocalStorage;
    use serde_json::json;
    use tempfile::TempDir;

    fn sample() -> Dataset {
        serde_json::from_value(json!([
            {"PCTID": "12", "Name": "Foo"},
            {"PCTID": "7", "Name": "Bar"}
        ]))
        .unwrap()
    }

    #[test]
    fn test_found_renders_fields() {
        let data = sample();
        let record = find_by_pctid(&data, 7).unwrap();
        assert_eq!(render_record(record), "PCTID: 7\nName: Bar");
    }

    #[test]
    fn test_not_found() {
        let data = sample();
        assert!(find_by_pctid(&data, 99).is_none());
        assert_eq!(describe_lookup(&data, 99), "No information found for PCTID 99");
    }

    #[test]
    fn test_empty_dataset_not_found() {
        assert!(find_by_pctid(&[], 1).is_none());
    }

    #[test]
    fn test_first_match_wins() {
        let data: Dataset = serde_json::from_value(json!([
            {"PCTID": "5", "Name": "First"},
            {"PCTID": 5, "Name": "Second"}
        ]))
        .unwrap();
        assert_eq!(find_by_pctid(&data, 5).unwrap()["Name"], "First");
    }

    #[test]
    fn test_skips_missing_and_invalid_ids() {
        let data: Dataset = serde_json::from_value(json!([
            {"Name": "NoId"},
            {"PCTID": "n/a", "Name": "Junk"},
            {"PCTID": null},
            {"PCTID": "3", "Name": "Three"}
        ]))
        .unwrap();
        assert_eq!(find_by_pctid(&data, 3).unwrap()["Name"], "Three");
    }

    #[test]
    fn test_whole_float_id_matches() {
        let data: Dataset = serde_json::from_value(json!([
            {"PCTID": 6.5, "Name": "Fraction"},
            {"PCTID": 7.0, "Name": "Seven"}
        ]))
        .unwrap();
        assert_eq!(
            describe_lookup(&data, 7),
            "Information for PCTID 7:\nPCTID: 7.0\nName: Seven"
        );
    }

    #[test]
    fn test_render_non_string_values() {
        let data: Dataset = serde_json::from_value(json!([
            {"PCTID": 4, "Area": 1.5, "Active": true, "Note": null, "Tags": ["a", "b"]}
        ]))
        .unwrap();
        assert_eq!(
            describe_lookup(&data, 4),
            "Information for PCTID 4:\nPCTID: 4\nArea: 1.5\nActive: true\nNote: null\nTags: [\"a\",\"b\"]"
        );
    }

    #[tokio::test]
    async fn test_lookup_snapshot_reads_cache() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("dataset_growth_form.json"));
        storage.save(&sample()).await.unwrap();

        assert_eq!(
            lookup_snapshot(&storage, 12).await,
            "Information for PCTID 12:\nPCTID: 12\nName: Foo"
        );
    }

    #[tokio::test]
    async fn test_lookup_snapshot_without_cache() {
        let tmp = TempDir::new().unwrap();
        let storage = LocalStorage::new(tmp.path().join("missing.json"));

        assert_eq!(
            lookup_snapshot(&storage, 12).await,
            "No information found for PCTID 12"
        );
    }
}
