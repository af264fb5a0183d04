//! Property-based tests - pragmatic roundtrip guarantees over generated
//! row sets, complementing the fixture-corpus tests.

use fixie::{read_str, write_str, OutputStyle, Row, Value};
use proptest::prelude::*;

fn scalar_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        // finite floats only; NaN never compares equal to itself
        any::<i32>().prop_map(|n| Value::from(f64::from(n) / 8.0)),
        "[ -~]{0,24}".prop_map(Value::from),
    ]
}

fn named_rows() -> impl Strategy<Value = Vec<Row>> {
    (
        prop::collection::vec("[a-z][a-z0-9_]{0,8}", 1..6),
        1usize..8,
    )
        .prop_flat_map(|(mut names, row_count)| {
            names.sort();
            names.dedup();
            let arity = names.len();
            prop::collection::vec(prop::collection::vec(scalar_value(), arity..=arity), row_count)
                .prop_map(move |value_rows| {
                    value_rows
                        .into_iter()
                        .map(|values| {
                            Row::from_pairs(names.iter().cloned().zip(values))
                        })
                        .collect()
                })
        })
}

fn positional_rows() -> impl Strategy<Value = Vec<Row>> {
    (1usize..6, 1usize..8).prop_flat_map(|(arity, row_count)| {
        prop::collection::vec(prop::collection::vec(scalar_value(), arity..=arity), row_count)
            .prop_map(|value_rows| value_rows.into_iter().map(Row::from_values).collect())
    })
}

fn roundtrips(rows: &[Row], style: OutputStyle) -> bool {
    match write_str(rows, style) {
        Ok(text) => match read_str(&text) {
            Ok(back) => {
                back.len() == rows.len() && back.iter().zip(rows).all(|((_, row), expected)| row == expected)
            }
            Err(e) => {
                eprintln!("read failed: {}", e);
                false
            }
        },
        Err(e) => {
            eprintln!("write failed: {}", e);
            false
        }
    }
}

proptest! {
    #[test]
    fn prop_named_rows_roundtrip_compact(rows in named_rows()) {
        prop_assert!(roundtrips(&rows, OutputStyle::Compact));
    }

    #[test]
    fn prop_named_rows_roundtrip_aligned_compact(rows in named_rows()) {
        prop_assert!(roundtrips(&rows, OutputStyle::AlignedCompact));
    }

    #[test]
    fn prop_named_rows_roundtrip_expanded(rows in named_rows()) {
        prop_assert!(roundtrips(&rows, OutputStyle::Expanded));
    }

    #[test]
    fn prop_named_rows_roundtrip_aligned_expanded(rows in named_rows()) {
        prop_assert!(roundtrips(&rows, OutputStyle::AlignedExpanded));
    }

    #[test]
    fn prop_positional_rows_roundtrip_compact(rows in positional_rows()) {
        prop_assert!(roundtrips(&rows, OutputStyle::Compact));
    }

    #[test]
    fn prop_positional_rows_roundtrip_expanded(rows in positional_rows()) {
        prop_assert!(roundtrips(&rows, OutputStyle::Expanded));
    }

    #[test]
    fn prop_switching_output_always_rereads(rows in named_rows()) {
        prop_assert!(roundtrips(&rows, OutputStyle::Switching));
    }
}
