use std::fs;

use matriz_tools::normalize::{extract_number, normalize, second_segment};
use matriz_tools::reference::PlaceList;
use matriz_tools::sync;
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

#[test]
fn normalize_strips_accents_and_is_idempotent() {
    assert_eq!(normalize("áéíóúüñ ÁÉÍÓÚÜÑ"), "AEIOUUN AEIOUUN");
    assert_eq!(normalize("Peñas Blancas"), "PENAS BLANCAS");
    assert_eq!(normalize(""), "");

    for text in ["Cañas", "León", "ya normalizado", "FRONTERA PEÑAS BLANCAS"] {
        let once = normalize(text);
        assert_eq!(normalize(&once), once);
    }
}

#[test]
fn second_segment_prefers_the_second_comment_part() {
    assert_eq!(second_segment("A;B"), "B");
    assert_eq!(second_segment("A"), "A");
    assert_eq!(second_segment(""), "");
    assert_eq!(second_segment("autor:\ncontenido real"), "contenido real");
    assert_eq!(second_segment("uno;;dos;tres"), "dos");
    // A trailing delimiter yields an empty second segment, as in the
    // source spreadsheets' convention.
    assert_eq!(second_segment("solo encabezado;"), "");
}

#[test]
fn extract_number_finds_the_first_numeric_run() {
    assert_eq!(extract_number("123.45 km"), Some(123.45));
    assert_eq!(extract_number("120"), Some(120.0));
    assert_eq!(extract_number("ruta 12 y 15"), Some(12.0));
    assert_eq!(extract_number("no digits here"), None);
    assert_eq!(extract_number(""), None);
}

#[test]
fn builtin_place_list_matches_in_reference_order() {
    let places = PlaceList::builtin();
    assert!(!places.is_empty());

    let matches = places.matches_in(&normalize("de Cañas hacia León y Managua"));
    assert_eq!(matches, vec!["CAÑAS", "LEON", "MANAGUA"]);
}

#[test]
fn sheet_records_keep_types_and_null_blanks() {
    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("galones.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, "Ciudad").expect("header written");
    worksheet.write_string(0, 1, "Galones").expect("header written");
    // Third header left blank on purpose.
    worksheet.write_string(1, 0, "MANAGUA").expect("cell written");
    worksheet.write_number(1, 1, 12.5).expect("cell written");
    worksheet.write_boolean(1, 2, true).expect("cell written");
    // Row 2 left entirely empty.
    worksheet.write_string(3, 0, "LEON").expect("cell written");
    workbook.save(&xlsx_path).expect("workbook saved");

    let output_path = temp_dir.path().join("salida.json");
    let summary =
        sync::sheet_to_json(&xlsx_path, &output_path, None).expect("sheet converted");
    assert_eq!(summary.records, 3);

    let written = fs::read_to_string(&output_path).expect("output read");
    let parsed: serde_json::Value = serde_json::from_str(&written).expect("JSON parsed");
    let expected = serde_json::json!([
        {
            "Ciudad": "MANAGUA",
            "Galones": 12.5,
            "Columna 3": true
        },
        {
            "Ciudad": null,
            "Galones": null,
            "Columna 3": null
        },
        {
            "Ciudad": "LEON",
            "Galones": null,
            "Columna 3": null
        }
    ]);
    assert_eq!(parsed, expected);
}

#[test]
fn dump_drops_empty_rows_and_concatenates_sheets() {
    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("galones.xlsx");

    let mut workbook = Workbook::new();

    let first = workbook.add_worksheet();
    first.set_name("Enero").expect("sheet named");
    first.write_string(0, 0, "Ciudad").expect("header written");
    first.write_string(0, 1, "Nota").expect("header written");
    first.write_string(1, 0, "MANAGUA").expect("cell written");
    // Row 2 left entirely empty; it must not appear in the dump.
    first.write_string(3, 0, "LEON").expect("cell written");
    first.write_string(3, 1, "ok").expect("cell written");

    let second = workbook.add_worksheet();
    second.set_name("Febrero").expect("sheet named");
    second.write_string(0, 0, "Ciudad").expect("header written");
    second.write_string(1, 0, "GRANADA").expect("cell written");

    workbook.save(&xlsx_path).expect("workbook saved");

    let output_path = temp_dir.path().join("salida.txt");
    let summary = sync::workbook_to_text(&xlsx_path, &output_path).expect("workbook dumped");
    assert_eq!(summary.sheets, 2);
    assert_eq!(summary.records, 3);

    let written = fs::read_to_string(&output_path).expect("output read");
    let parsed: serde_json::Value = serde_json::from_str(&written).expect("JSON parsed");
    let expected = serde_json::json!([
        {
            "Ciudad": "MANAGUA",
            "Nota": ""
        },
        {
            "Ciudad": "LEON",
            "Nota": "ok"
        },
        {
            "Ciudad": "GRANADA"
        }
    ]);
    assert_eq!(parsed, expected);
}

#[test]
fn named_sheet_selection_and_missing_sheet_error() {
    let temp_dir = tempdir().expect("temporary directory");
    let xlsx_path = temp_dir.path().join("galones.xlsx");

    let mut workbook = Workbook::new();
    let first = workbook.add_worksheet();
    first.set_name("Datos").expect("sheet named");
    first.write_string(0, 0, "Ciudad").expect("header written");
    first.write_string(1, 0, "MANAGUA").expect("cell written");
    workbook.save(&xlsx_path).expect("workbook saved");

    let output_path = temp_dir.path().join("salida.json");
    let summary = sync::sheet_to_json(&xlsx_path, &output_path, Some("Datos"))
        .expect("named sheet converted");
    assert_eq!(summary.records, 1);

    let missing = sync::sheet_to_json(&xlsx_path, &output_path, Some("NoExiste"));
    let error = missing.expect_err("missing sheet should error");
    assert!(error.to_string().contains("NoExiste"));
}
