//! Integration tests for CSV to DXF label generation.
//!
//! These tests run the full pipeline against schedules written to a temp
//! directory and check the structure of the generated DXF files.

use cable_label::{
    generate_files, generate_from_csv, pack, parse_csv_file, CableRecord, LabelError,
    LayoutParameters, OutputOptions,
};
use pretty_assertions::assert_eq;
use std::path::Path;
use tempfile::TempDir;

/// Schedule with a header, quoted values and prefixed origin/destination.
const SCHEDULE: &str = "\
CABLE_ID,SPECIFICATION,ORIGIN,DESTINATION
M1D-TX-010A,500mm² 110 XLPE CU FLEX 20-OF,ORIGIN: M1D-TX-010A,DESTINATION: M1D-MSB-010A
M1D-TX-010B,\"240mm², 4C XLPE\",M1D-MSB-010A,M1D-DB-01
DB1/C3,,M1D-DB-01,
";

fn write_schedule(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("schedule.csv");
    std::fs::write(&path, content).unwrap();
    path
}

fn many_records(n: usize) -> String {
    let mut csv = String::from("Cable ID,Spec,Origin,Destination\n");
    for i in 0..n {
        csv.push_str(&format!("C-{:03},4mm² 2C,MSB-1,DB-{}\n", i + 1, i % 4));
    }
    csv
}

fn file_names(paths: &[std::path::PathBuf]) -> Vec<String> {
    paths
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect()
}

/// Count DXF entities of the given type on the given layer.
fn count_entities(dxf: &str, entity: &str, layer: &str) -> usize {
    let needle = format!("  0\n{}\n  8\n{}\n", entity, layer);
    dxf.matches(&needle).count()
}

// ==================== Parsing ====================

#[test]
fn test_parse_schedule_file() {
    let dir = TempDir::new().unwrap();
    let path = write_schedule(&dir, SCHEDULE);
    let records = parse_csv_file(&path).unwrap();

    assert_eq!(
        records,
        vec![
            CableRecord::new(
                "M1D-TX-010A",
                "500mm² 110 XLPE CU FLEX 20-OF",
                "M1D-TX-010A",
                "M1D-MSB-010A"
            ),
            CableRecord::new("M1D-TX-010B", "240mm², 4C XLPE", "M1D-MSB-010A", "M1D-DB-01"),
            CableRecord::new("DB1/C3", "", "M1D-DB-01", ""),
        ]
    );
}

#[test]
fn test_parse_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = write_schedule(&dir, "\n  \n");
    assert!(matches!(
        parse_csv_file(&path),
        Err(LabelError::EmptyFile { .. })
    ));
}

#[test]
fn test_parse_header_only() {
    let dir = TempDir::new().unwrap();
    let path = write_schedule(&dir, "Cable ID,Spec,Origin,Destination\n");
    assert!(matches!(parse_csv_file(&path), Err(LabelError::NoRecords)));
}

// ==================== Generation ====================

#[test]
fn test_generate_combined_sheet() {
    let dir = TempDir::new().unwrap();
    let csv = write_schedule(&dir, SCHEDULE);
    let options = OutputOptions {
        output_dir: dir.path().join("out"),
        ..Default::default()
    };

    let files = generate_from_csv(&csv, &LayoutParameters::default(), &options).unwrap();
    assert_eq!(file_names(&files), vec!["cable_labels_sheet_01.dxf"]);

    let dxf = std::fs::read_to_string(&files[0]).unwrap();
    assert_eq!(count_entities(&dxf, "POLYLINE", "Cutting"), 3);
    assert_eq!(count_entities(&dxf, "POLYLINE", "Hole"), 12);
    // 4 + 4 + 2 text lines
    assert_eq!(count_entities(&dxf, "TEXT", "Text"), 10);
    assert!(dxf.contains("  9\n$DWGCODEPAGE\n  3\nANSI_1252\n"));
    assert!(dxf.contains("  1\n500mm\\U+00B2 110 XLPE CU FLE...\n"));
    assert!(dxf.is_ascii());
    assert!(dxf.contains("  1\nFROM: M1D-TX-010A\n"));
    assert!(dxf.contains("  1\nTO: M1D-MSB-010A\n"));
    assert!(dxf.ends_with("  0\nEOF\n"));
}

#[test]
fn test_generate_multiline_cell_stays_one_label() {
    let dir = TempDir::new().unwrap();
    let csv = write_schedule(
        &dir,
        "Cable Ref,Cable Size,From Panel,To Panel\nC-1,\"4mm²\r\n2C flex\",MSB,DB-1\n",
    );
    let options = OutputOptions {
        output_dir: dir.path().join("out"),
        ..Default::default()
    };

    let files = generate_from_csv(&csv, &LayoutParameters::default(), &options).unwrap();
    let dxf = std::fs::read_to_string(&files[0]).unwrap();
    assert_eq!(count_entities(&dxf, "POLYLINE", "Cutting"), 1);
    assert!(dxf.contains("  1\nC-1\n"));
    assert!(dxf.contains("  1\n4mm\\U+00B2  2C flex\n"));
    assert!(!dxf.contains("Cable Ref"));
    assert!(dxf.ends_with("  0\nEOF\n"));
    // Only the trailing EOF sits in a value position
    assert_eq!(dxf.matches("\nEOF\n").count(), 1);
}

#[test]
fn test_parse_unterminated_quote_reports_line() {
    let dir = TempDir::new().unwrap();
    let path = write_schedule(&dir, "C-1,4mm²,MSB,DB-1\nC-2,\"6mm²,MSB,DB-2\n");
    assert!(matches!(
        parse_csv_file(&path),
        Err(LabelError::ParseError { line: 2, .. })
    ));
}

#[test]
fn test_generate_individual_files() {
    let dir = TempDir::new().unwrap();
    let csv = write_schedule(&dir, SCHEDULE);
    let options = OutputOptions {
        output_dir: dir.path().join("labels"),
        individual: true,
        combined: false,
    };

    let files = generate_from_csv(&csv, &LayoutParameters::default(), &options).unwrap();
    insta::assert_snapshot!(file_names(&files).join("\n"), @r###"
    cable_M1D-TX-010A.dxf
    cable_M1D-TX-010B.dxf
    cable_DB1_C3.dxf
    "###);

    let dxf = std::fs::read_to_string(&files[2]).unwrap();
    assert!(dxf.contains("  9\n$EXTMAX\n 10\n80.000\n 20\n40.000\n"));
    assert_eq!(count_entities(&dxf, "POLYLINE", "Cutting"), 1);
    assert_eq!(count_entities(&dxf, "POLYLINE", "Hole"), 4);
    assert_eq!(count_entities(&dxf, "TEXT", "Text"), 2);
}

#[test]
fn test_generate_paginates_sheets() {
    let dir = TempDir::new().unwrap();
    let csv = write_schedule(&dir, &many_records(85));
    let options = OutputOptions {
        output_dir: dir.path().join("out"),
        ..Default::default()
    };

    let files = generate_from_csv(&csv, &LayoutParameters::default(), &options).unwrap();
    assert_eq!(
        file_names(&files),
        vec![
            "cable_labels_sheet_01.dxf",
            "cable_labels_sheet_02.dxf",
            "cable_labels_sheet_03.dxf",
        ]
    );

    let outlines: Vec<usize> = files
        .iter()
        .map(|f| count_entities(&std::fs::read_to_string(f).unwrap(), "POLYLINE", "Cutting"))
        .collect();
    assert_eq!(outlines, vec![42, 42, 1]);
}

#[test]
fn test_generate_is_deterministic() {
    let dir = TempDir::new().unwrap();
    let csv = write_schedule(&dir, &many_records(50));
    let params = LayoutParameters::default();

    let run = |name: &str| {
        let options = OutputOptions {
            output_dir: dir.path().join(name),
            ..Default::default()
        };
        generate_from_csv(&csv, &params, &options)
            .unwrap()
            .iter()
            .map(|f| std::fs::read(f).unwrap())
            .collect::<Vec<_>>()
    };

    assert_eq!(run("a"), run("b"));
}

#[test]
fn test_generate_writes_nothing_on_invalid_record() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    let mut records: Vec<CableRecord> = (0..5)
        .map(|i| CableRecord::new(format!("C-{}", i), "", "", ""))
        .collect();
    records[3].id = String::new();

    let options = OutputOptions {
        output_dir: out.clone(),
        individual: true,
        combined: true,
    };
    let err = generate_files(&records, &LayoutParameters::default(), &options).unwrap_err();
    assert_eq!(err.record_index(), Some(3));
    assert!(!Path::new(&out).exists());
}

#[test]
fn test_generate_with_json_config() {
    let dir = TempDir::new().unwrap();
    let config = dir.path().join("layout.json");
    std::fs::write(
        &config,
        r#"{ "label_width": 100, "label_height": 50, "columns": 2, "rows": 2 }"#,
    )
    .unwrap();
    let params = LayoutParameters::from_json_file(&config).unwrap();
    assert_eq!(params.hole_spacing(), (90.0, 40.0));

    let csv = write_schedule(&dir, &many_records(5));
    let records = parse_csv_file(&csv).unwrap();
    let pages = pack(&records, &params).unwrap();
    assert_eq!(pages.len(), 2);
    assert_eq!(pages[1].label_count(), 1);

    let options = OutputOptions {
        output_dir: dir.path().join("out"),
        ..Default::default()
    };
    let files = generate_files(&records, &params, &options).unwrap();
    let dxf = std::fs::read_to_string(&files[0]).unwrap();
    // 2 * 100 + 2 + 2 * 2 by 2 * 50 + 2 + 2 * 2
    assert!(dxf.contains("  9\n$EXTMAX\n 10\n206.000\n 20\n106.000\n"));
}
