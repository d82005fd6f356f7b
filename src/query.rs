// src/query.rs

use anyhow::{Context, Result};
use prettytable::{format, Cell, Row, Table};
use rusqlite::{types::Value, Connection};
use std::fmt;

use crate::schema::check_identifier;

/// The fixed read statements run after every load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BankQuery {
    SelectAll,
    AverageGbp,
    /// No `ORDER BY`: names come back in storage order, which for a freshly
    /// replaced table is insertion order.
    FirstFiveNames,
}

impl BankQuery {
    pub const ALL: [BankQuery; 3] = [
        BankQuery::SelectAll,
        BankQuery::AverageGbp,
        BankQuery::FirstFiveNames,
    ];

    pub fn statement(self, table: &str) -> String {
        match self {
            BankQuery::SelectAll => format!("SELECT * FROM {}", table),
            BankQuery::AverageGbp => format!("SELECT AVG(MC_GBP_Billion) FROM {}", table),
            BankQuery::FirstFiveNames => format!("SELECT Name FROM {} LIMIT 5", table),
        }
    }
}

/// Result set of one statement, fully materialised.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryOutput {
    pub statement: String,
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

/// Run `statement` and collect every row.
pub fn run_query(conn: &Connection, statement: &str) -> Result<QueryOutput> {
    let mut stmt = conn
        .prepare(statement)
        .with_context(|| format!("preparing `{}`", statement))?;
    let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
    let width = columns.len();

    let mut out_rows = Vec::new();
    let mut rows = stmt
        .query([])
        .with_context(|| format!("running `{}`", statement))?;
    while let Some(row) = rows.next()? {
        let values = (0..width)
            .map(|i| row.get::<_, Value>(i))
            .collect::<rusqlite::Result<Vec<_>>>()?;
        out_rows.push(values);
    }

    Ok(QueryOutput {
        statement: statement.to_string(),
        columns,
        rows: out_rows,
    })
}

/// Run the three fixed queries against `table`, in order.
pub fn run_all(conn: &Connection, table: &str) -> Result<Vec<QueryOutput>> {
    check_identifier(table)?;
    BankQuery::ALL
        .iter()
        .map(|q| run_query(conn, &q.statement(table)))
        .collect()
}

fn render_value(v: &Value) -> String {
    match v {
        Value::Null => "NULL".to_string(),
        Value::Integer(i) => i.to_string(),
        // `{:?}` keeps the trailing `.0` on whole numbers
        Value::Real(f) => format!("{:?}", f),
        Value::Text(s) => s.clone(),
        Value::Blob(b) => format!("<{} bytes>", b.len()),
    }
}

impl QueryOutput {
    /// Result set as a borderless table with a leading row-index column.
    pub fn to_table(&self) -> Table {
        let mut table = Table::new();
        table.set_format(*format::consts::FORMAT_CLEAN);

        let mut titles = vec![Cell::new("")];
        titles.extend(self.columns.iter().map(|c| Cell::new(c)));
        table.set_titles(Row::new(titles));

        for (i, row) in self.rows.iter().enumerate() {
            let mut cells = vec![Cell::new(&i.to_string())];
            cells.extend(row.iter().map(|v| match v {
                Value::Integer(_) | Value::Real(_) => {
                    Cell::new(&render_value(v)).style_spec("r")
                }
                _ => Cell::new(&render_value(v)),
            }));
            table.add_row(Row::new(cells));
        }
        table
    }
}

impl fmt::Display for QueryOutput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::load::load_table;
    use crate::schema::EnrichedRow;

    fn bank(name: &str, usd: f64, gbp: f64) -> EnrichedRow {
        EnrichedRow {
            name: name.into(),
            mc_usd_billion: usd,
            mc_gbp_billion: gbp,
            mc_eur_billion: 0.0,
            mc_inr_billion: 0.0,
        }
    }

    fn loaded(n: usize) -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        let rows: Vec<_> = (0..n)
            .map(|i| bank(&format!("Bank {}", i), 10.0 * i as f64, 8.0 * i as f64))
            .collect();
        load_table(&mut conn, "Largest_banks", &rows).unwrap();
        conn
    }

    #[test]
    fn statements() {
        assert_eq!(
            BankQuery::SelectAll.statement("Largest_banks"),
            "SELECT * FROM Largest_banks"
        );
        assert_eq!(
            BankQuery::AverageGbp.statement("Largest_banks"),
            "SELECT AVG(MC_GBP_Billion) FROM Largest_banks"
        );
        assert_eq!(
            BankQuery::FirstFiveNames.statement("Largest_banks"),
            "SELECT Name FROM Largest_banks LIMIT 5"
        );
    }

    #[test]
    fn runs_all_three_in_order() {
        let conn = loaded(8);
        let out = run_all(&conn, "Largest_banks").unwrap();
        assert_eq!(out.len(), 3);

        assert_eq!(out[0].rows.len(), 8);
        assert_eq!(out[0].columns, EnrichedRow::column_names());

        assert_eq!(out[1].rows, vec![vec![Value::Real(28.0)]]);

        let names: Vec<_> = out[2]
            .rows
            .iter()
            .map(|r| render_value(&r[0]))
            .collect();
        assert_eq!(names, vec!["Bank 0", "Bank 1", "Bank 2", "Bank 3", "Bank 4"]);
    }

    #[test]
    fn average_of_empty_table_is_null() {
        let conn = loaded(0);
        let out = run_query(&conn, &BankQuery::AverageGbp.statement("Largest_banks")).unwrap();
        assert_eq!(out.rows, vec![vec![Value::Null]]);
    }

    #[test]
    fn renders_index_and_columns() {
        let out = QueryOutput {
            statement: "SELECT Name FROM t LIMIT 5".into(),
            columns: vec!["Name".into()],
            rows: vec![
                vec![Value::Text("JPMorgan Chase".into())],
                vec![Value::Text("ICBC".into())],
            ],
        };
        let table = out.to_table();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get_row(1).unwrap().get_cell(1).unwrap().get_content(), "ICBC");

        let text = out.to_string();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].contains("Name"));
        assert!(lines[1].trim_start().starts_with('0'));
        assert!(lines[1].contains("JPMorgan Chase"));
        assert!(lines[2].contains("ICBC"));
    }

    #[test]
    fn reals_keep_a_decimal_place() {
        assert_eq!(render_value(&Value::Real(80.0)), "80.0");
        assert_eq!(render_value(&Value::Real(987.6)), "987.6");
        assert_eq!(render_value(&Value::Integer(5)), "5");

        let out = QueryOutput {
            statement: "SELECT AVG(MC_GBP_Billion) FROM t".into(),
            columns: vec!["AVG(MC_GBP_Billion)".into()],
            rows: vec![vec![Value::Real(28.0)]],
        };
        assert!(out.to_string().contains("28.0"));
    }

    #[test]
    fn unknown_table_is_an_error() {
        let conn = Connection::open_in_memory().unwrap();
        assert!(run_all(&conn, "Largest_banks").is_err());
    }
}
