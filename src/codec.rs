//! Record codec: Todo <-> flat row of 4 text fields.
//!
//! Row layout: [id][description][completed][created_at unix seconds]
//! CSV quoting is not done here; the store hands rows to the csv crate.

use chrono::{DateTime, Utc};

use crate::error::{Result, TodoError};
use crate::todo::Todo;

pub const FIELD_COUNT: usize = 4;

/// Decode a row into `(id, Todo)`.
///
/// Accepts anything that yields string fields (`csv::StringRecord`, `&[&str]`, ...).
pub fn decode<I, S>(row: I) -> Result<(u64, Todo)>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let fields: Vec<S> = row.into_iter().collect();
    if fields.len() != FIELD_COUNT {
        return Err(TodoError::Format {
            fields: fields.len(),
        });
    }

    let id = parse_id(fields[0].as_ref())?;
    let description = fields[1].as_ref().to_string();
    let completed = parse_bool(fields[2].as_ref())?;
    let created_at = parse_unix_secs(fields[3].as_ref())?;

    Ok((
        id,
        Todo {
            description,
            completed,
            created_at,
        },
    ))
}

pub fn encode(id: u64, todo: &Todo) -> [String; FIELD_COUNT] {
    [
        id.to_string(),
        todo.description.clone(),
        todo.completed.to_string(),
        todo.created_at.timestamp().to_string(),
    ]
}

fn parse_id(s: &str) -> Result<u64> {
    let id = s
        .parse::<u64>()
        .map_err(|e| TodoError::parse("id", s, e))?;
    if id == 0 {
        return Err(TodoError::parse("id", s, "id must be positive"));
    }
    Ok(id)
}

// Short and capitalized forms are accepted on read; encode always writes true/false.
fn parse_bool(s: &str) -> Result<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(TodoError::parse("completed", s, "not a boolean literal")),
    }
}

fn parse_unix_secs(s: &str) -> Result<DateTime<Utc>> {
    let secs = s
        .parse::<i64>()
        .map_err(|e| TodoError::parse("created_at", s, e))?;
    DateTime::from_timestamp(secs, 0)
        .ok_or_else(|| TodoError::parse("created_at", s, "timestamp out of range"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(secs: i64) -> DateTime<Utc> {
        DateTime::from_timestamp(secs, 0).unwrap()
    }

    #[test]
    fn encode_layout() {
        let t = Todo {
            description: "buy milk".into(),
            completed: true,
            created_at: ts(1_700_000_000),
        };
        assert_eq!(
            encode(7, &t),
            [
                "7".to_string(),
                "buy milk".to_string(),
                "true".to_string(),
                "1700000000".to_string()
            ]
        );
    }

    #[test]
    fn decode_encoded_row_gives_back_id_and_todo() {
        let t = Todo {
            description: "with, comma and \"quotes\"\nand a newline".into(),
            completed: false,
            created_at: ts(0),
        };
        let (id, back) = decode(encode(42, &t)).unwrap();
        assert_eq!(id, 42);
        assert_eq!(back, t);
    }

    #[test]
    fn decode_accepts_short_and_capitalized_booleans() {
        for (lit, want) in [("1", true), ("T", true), ("True", true), ("0", false), ("F", false)] {
            let (_, t) = decode(["1", "x", lit, "10"]).unwrap();
            assert_eq!(t.completed, want, "literal {lit}");
        }
    }

    #[test]
    fn decode_rejects_wrong_field_count() {
        let err = decode(["1", "x", "false"]).unwrap_err();
        assert!(matches!(err, TodoError::Format { fields: 3 }), "got {err:?}");

        let err = decode(["1", "x", "false", "10", "extra"]).unwrap_err();
        assert!(matches!(err, TodoError::Format { fields: 5 }), "got {err:?}");
    }

    #[test]
    fn decode_rejects_bad_fields() {
        let cases: [([&str; 4], &str); 5] = [
            (["abc", "x", "false", "10"], "id"),
            (["0", "x", "false", "10"], "id"),
            (["-3", "x", "false", "10"], "id"),
            (["1", "x", "yes", "10"], "completed"),
            (["1", "x", "false", "soon"], "created_at"),
        ];
        for (row, want_field) in cases {
            match decode(row) {
                Err(TodoError::Parse { field, .. }) => assert_eq!(field, want_field, "row {row:?}"),
                other => panic!("row {row:?}: expected Parse error, got {other:?}"),
            }
        }
    }

    #[test]
    fn decode_rejects_out_of_range_timestamp() {
        let big = i64::MAX.to_string();
        let err = decode(["1", "x", "false", big.as_str()]).unwrap_err();
        assert!(matches!(err, TodoError::Parse { field: "created_at", .. }));
    }
}
