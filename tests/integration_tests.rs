use fixie::{
    read_path, read_str, row, write_path, write_str, AlignedCompactWriter, CompactWriter,
    FixtureWriter, Key, OutputStyle, ReadHandle, Row, SwitchingWriter, Value, WriteHandle,
};
use std::io::Cursor;

fn element_rows() -> Vec<Row> {
    vec![
        row!({"name": "Hydrogen", "symbol": "H", "number": 1, "weight": 1.00794, "metallic": false, "group": None::<&str>}),
        row!({"name": "Helium", "symbol": "He", "number": 2, "weight": 4.002602, "metallic": false, "group": "Noble gas"}),
        row!({"name": "Lithium", "symbol": "Li", "number": 3, "weight": 6.941, "metallic": true, "group": "Alkali metal"}),
        row!({"name": "Beryllium", "symbol": "Be", "number": 4, "weight": 9.012182, "metallic": true, "group": "Alkaline earth metal"}),
        row!({"name": "Boron", "symbol": "B", "number": 5, "weight": 10.811, "metallic": true, "group": None::<&str>}),
        row!({"name": "Nitrogen", "symbol": "N", "number": 7, "weight": 14.0067, "metallic": false, "group": "Pnictogen"}),
        row!({"name": "Oxygen", "symbol": "O", "number": 8, "weight": 15.9994, "metallic": false, "group": "Chalcogen"}),
        row!({"name": "Neon", "symbol": "Ne", "number": 10, "weight": 20.1797, "metallic": false, "group": "Noble gas"}),
    ]
}

#[test]
fn every_style_round_trips_the_element_table() {
    for style in [
        OutputStyle::Compact,
        OutputStyle::AlignedCompact,
        OutputStyle::Expanded,
        OutputStyle::AlignedExpanded,
        OutputStyle::Switching,
    ] {
        let rows = element_rows();
        let text = write_str(&rows, style).unwrap();
        let back = read_str(&text).unwrap();
        assert_eq!(back.len(), rows.len(), "style {:?}", style);
        for (i, (key, row)) in back.iter().enumerate() {
            assert_eq!(*key, Key::Index(i as u64), "style {:?}", style);
            assert_eq!(*row, rows[i], "style {:?}\n{}", style, text);
        }
    }
}

#[test]
fn compact_output_quotes_only_what_it_must() {
    let text = write_str(&element_rows()[..2], OutputStyle::Compact).unwrap();
    assert_eq!(
        text,
        "columns: [name, symbol, number, weight, metallic, group]\n\
         data: [\n\
         [Hydrogen, H, 1, 1.00794, false, null],\n\
         [Helium, He, 2, 4.002602, false, 'Noble gas'],\n\
         ]\n"
    );
}

#[test]
fn aligned_compact_output_lines_up_every_column() {
    let text = write_str(&element_rows()[..2], OutputStyle::AlignedCompact).unwrap();
    assert_eq!(
        text,
        "columns:\n\
         \u{20}[name,     symbol, number, weight,   metallic, group      ]\n\
         data: [\n\
         \u{20}[Hydrogen, H,      1,      1.00794,  false,    null       ],\n\
         \u{20}[Helium,   He,     2,      4.002602, false,    'Noble gas'],\n\
         ]\n"
    );
}

#[test]
fn expanded_output_gives_each_row_a_block() {
    let rows = vec![
        row!({"name": "Hydrogen", "symbol": "H"}),
        row!({"name": "Helium", "symbol": "He"}),
    ];
    let text = write_str(&rows, OutputStyle::Expanded).unwrap();
    assert_eq!(
        text,
        "- name: Hydrogen\n  symbol: H\n\n- name: Helium\n  symbol: He\n"
    );
}

#[test]
fn aligned_expanded_output_aligns_on_the_longest_name() {
    let rows = vec![row!({"name": "Hydrogen", "n": 1})];
    let text = write_str(&rows, OutputStyle::AlignedExpanded).unwrap();
    assert_eq!(text, "- name: Hydrogen\n  n:    1\n");
}

#[test]
fn switching_writer_picks_aligned_output_for_small_documents() {
    let text = write_str(&element_rows(), OutputStyle::Switching).unwrap();
    assert!(text.starts_with("columns:\n ["));
    let aligned = write_str(&element_rows(), OutputStyle::AlignedCompact).unwrap();
    assert_eq!(text, aligned);
}

#[test]
fn switching_writer_over_threshold_matches_plain_compact() {
    let rows = element_rows();
    let mut buffer = Vec::new();
    {
        let mut writer = SwitchingWriter::from_stream(&mut buffer).with_threshold(48);
        writer.write_all(&rows).unwrap();
        writer.close().unwrap();
    }
    let switched = String::from_utf8(buffer).unwrap();
    let compact = write_str(&rows, OutputStyle::Compact).unwrap();
    assert_eq!(switched, compact);
}

#[test]
fn labelled_compact_documents_round_trip_by_hand() {
    let doc = "columns: [name, symbol]\n\
               data: {\n\
               hydrogen: [Hydrogen, H],\n\
               helium:   [Helium,   He],\n\
               }\n";
    let rows = read_str(doc).unwrap();
    assert_eq!(
        rows,
        vec![
            (
                Key::from("hydrogen"),
                row!({"name": "Hydrogen", "symbol": "H"})
            ),
            (
                Key::from("helium"),
                row!({"name": "Helium", "symbol": "He"})
            ),
        ]
    );
}

#[test]
fn handles_write_and_read_real_files() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("elements.fix");

    let rows = element_rows();
    write_path(&path, &rows, OutputStyle::Switching).unwrap();

    let back = read_path(&path).unwrap();
    assert_eq!(back.len(), rows.len());
    for (i, (_, row)) in back.iter().enumerate() {
        assert_eq!(*row, rows[i]);
    }
}

#[test]
fn lazy_file_handles_open_on_first_use() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lazy.fix");

    let mut writer = CompactWriter::create(&path);
    assert!(!path.exists());
    writer.write(&row!(["a", "b"])).unwrap();
    assert!(path.exists());
    writer.close().unwrap();

    let mut reader = ReadHandle::open(&path);
    let rows = reader.read_all().unwrap();
    assert_eq!(rows, vec![(Key::Index(0), row!(["a", "b"]))]);
    reader.close().unwrap();
}

#[test]
fn missing_files_fail_with_the_path_in_the_error() {
    let err = read_path("/nonexistent/fixture.fix").unwrap_err();
    assert_eq!(
        err.path(),
        Some(std::path::Path::new("/nonexistent/fixture.fix"))
    );
}

#[test]
fn factory_writes_files_in_its_configured_style() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("styled.fix");

    let writer = FixtureWriter::new(OutputStyle::Expanded);
    let mut handle = writer.open_path(&path);
    handle.write(&row!({"name": "H"})).unwrap();
    handle.close().unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert_eq!(text, "- name: H\n");
}

#[test]
fn rewinding_a_file_backed_reader_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rewind.fix");
    write_path(&path, &element_rows(), OutputStyle::Compact).unwrap();

    let mut reader = ReadHandle::open(&path);
    let first = reader.read_all().unwrap();
    let second = reader.read_all().unwrap();
    let third = reader.read_all().unwrap();
    assert_eq!(first, second);
    assert_eq!(second, third);
    reader.close().unwrap();
}

#[test]
fn a_writer_output_feeds_straight_back_into_a_reader() {
    let mut buffer = Vec::new();
    {
        let mut writer = AlignedCompactWriter::from_stream(&mut buffer);
        writer
            .write(&row!({"word": "héllo", "len": 5}))
            .unwrap();
        writer.write(&row!({"word": "x", "len": 1})).unwrap();
        writer.close().unwrap();
    }
    let mut reader = ReadHandle::from_stream(Cursor::new(buffer));
    let rows = reader.read_all().unwrap();
    assert_eq!(rows[0].1.get("word"), Some(&Value::from("héllo")));
    assert_eq!(rows[1].1.get("len"), Some(&Value::from(1)));
}

#[test]
fn strings_that_look_like_other_scalars_stay_strings() {
    let rows = vec![row!({"a": "42", "b": "true", "c": "null", "d": "1.5"})];
    for style in [OutputStyle::Compact, OutputStyle::Expanded] {
        let text = write_str(&rows, style).unwrap();
        let back = read_str(&text).unwrap();
        assert_eq!(back[0].1, rows[0], "style {:?}\n{}", style, text);
    }
}
