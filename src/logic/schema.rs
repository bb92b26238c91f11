// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Lightweight schema probing for tabular resource files.
//!
//! Only field names are extracted; full type inference is the catalog
//! backend's job. Failures here are expected to be degraded to an empty
//! schema by the caller.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde_json::Value;

use crate::models::resource::{Field, Schema};
use crate::utils::file_extension;

/// Probe the field names of a tabular file, dispatching on extension.
///
/// Spreadsheet formats (xlsx/xls/ods) are accepted but not probed
/// locally; they yield an empty schema.
///
/// # Errors
///
/// Fails when the file cannot be read or parsed in the probed formats.
pub fn probe_schema(path: &Path) -> Result<Schema> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    match file_extension(&name).as_deref() {
        Some("csv") => probe_delimited(path, b','),
        Some("tsv") => probe_delimited(path, b'\t'),
        Some("json") | Some("geojson") => probe_json(path),
        Some("xlsx") | Some("xls") | Some("ods") => Ok(Schema::default()),
        other => bail!("no schema prober for format {:?}", other),
    }
}

/// Field names from the header row of a delimited file.
fn probe_delimited(path: &Path, delimiter: u8) -> Result<Schema> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .from_path(path)
        .with_context(|| format!("Failed to open delimited file: {:?}", path))?;
    let headers = reader
        .headers()
        .with_context(|| format!("Failed to read header row: {:?}", path))?;

    Ok(Schema {
        fields: headers.iter().map(Field::new).collect(),
    })
}

/// Field names from JSON: keys of the first object found.
///
/// Accepts a top-level object, a top-level array of objects, or a
/// GeoJSON feature collection (keys of the first feature's properties).
fn probe_json(path: &Path) -> Result<Schema> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read JSON file: {:?}", path))?;
    let value: Value = serde_json::from_str(&text)
        .with_context(|| format!("Failed to parse JSON file: {:?}", path))?;

    let object = match &value {
        Value::Object(map) => {
            if let Some(Value::Array(features)) = map.get("features") {
                features
                    .first()
                    .and_then(|f| f.get("properties"))
                    .and_then(Value::as_object)
            } else {
                Some(map)
            }
        }
        Value::Array(items) => items.first().and_then(Value::as_object),
        _ => None,
    };

    let fields = object
        .map(|map| map.keys().map(Field::new).collect())
        .unwrap_or_default();

    Ok(Schema { fields })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::PathBuf;

    use tempfile::TempDir;

    use super::probe_schema;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn csv_headers_become_fields() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "table.csv", "id,name,amount\n1,a,2.5\n");

        let schema = probe_schema(&path).unwrap();

        let names: Vec<_> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["id", "name", "amount"]);
    }

    #[test]
    fn tsv_uses_tab_delimiter() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "table.tsv", "id\tname\n1\ta\n");

        let schema = probe_schema(&path).unwrap();

        let names: Vec<_> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["id", "name"]);
    }

    #[test]
    fn json_array_of_objects_yields_first_object_keys() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "rows.json", r#"[{"id": 1, "label": "x"}, {"id": 2}]"#);

        let schema = probe_schema(&path).unwrap();

        let names: Vec<_> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["id", "label"]);
    }

    #[test]
    fn geojson_uses_feature_properties() {
        let tmp = TempDir::new().unwrap();
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [
                {"type": "Feature", "properties": {"region": "north", "pop": 10}, "geometry": null}
            ]
        }"#;
        let path = write(&tmp, "map.geojson", geojson);

        let schema = probe_schema(&path).unwrap();

        let names: Vec<_> = schema.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["pop", "region"]);
    }

    #[test]
    fn spreadsheet_formats_yield_empty_schema() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "book.xlsx", "not really a workbook");

        let schema = probe_schema(&path).unwrap();

        assert!(schema.fields.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "broken.json", "{ not json");

        assert!(probe_schema(&path).is_err());
    }

    #[test]
    fn unknown_format_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = write(&tmp, "report.pdf", "%PDF-");

        assert!(probe_schema(&path).is_err());
    }
}
