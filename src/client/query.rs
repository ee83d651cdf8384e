//! The client's query language.
//!
//! Two statement forms are understood:
//!
//! ```text
//! SELECT <columns> FROM <table>
//! INSERT INTO <table> VALUES <field>=<value>[,<field>=<value>...]
//! ```
//!
//! Keywords are upper case. Inserted values are always strings and may not
//! contain whitespace, commas or `=`.

use crate::error::{Error, Result};
use recordstore_core::{Record, TableName};

/// A parsed query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Read every record of a table
    Select {
        /// Table to read
        table: TableName,
    },
    /// Insert one record
    Insert {
        /// Target table
        table: TableName,
        /// Record built from the `VALUES` pairs
        record: Record,
    },
}

/// What a successful query produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutput {
    /// Records read by a `SELECT`, in identifier order
    Rows(Vec<Record>),
    /// The record stored by an `INSERT`
    Inserted(Record),
}

impl QueryOutput {
    /// Records carried by the output
    pub fn records(&self) -> &[Record] {
        match self {
            QueryOutput::Rows(rows) => rows,
            QueryOutput::Inserted(record) => std::slice::from_ref(record),
        }
    }
}

impl Query {
    /// Parse query text.
    ///
    /// # Example
    ///
    /// ```
    /// use recordstore::Query;
    ///
    /// let query = Query::parse("INSERT INTO users VALUES id=1,name=Alice")?;
    /// assert!(matches!(query, Query::Insert { .. }));
    /// # Ok::<(), recordstore::Error>(())
    /// ```
    pub fn parse(text: &str) -> Result<Self> {
        let text = text.trim();
        if text.starts_with("SELECT") {
            Self::parse_select(text)
        } else if text.starts_with("INSERT") {
            Self::parse_insert(text)
        } else {
            Err(Error::InvalidQuery(format!("unsupported query type: {}", text)))
        }
    }

    fn parse_select(text: &str) -> Result<Self> {
        let (_, table) = text
            .split_once("FROM")
            .ok_or_else(|| Error::InvalidQuery(format!("missing FROM clause: {}", text)))?;
        let table = table.trim();
        if table.is_empty() || table.contains(char::is_whitespace) {
            return Err(Error::InvalidQuery(format!("invalid table name in: {}", text)));
        }
        Ok(Query::Select {
            table: TableName::from(table),
        })
    }

    fn parse_insert(text: &str) -> Result<Self> {
        let parts: Vec<&str> = text.split_whitespace().collect();
        let [_, "INTO", table, "VALUES", values] = parts.as_slice() else {
            return Err(Error::InvalidQuery(format!(
                "expected INSERT INTO <table> VALUES <pairs>: {}",
                text
            )));
        };

        let mut record = Record::new();
        for pair in values.split(',') {
            match pair.split('=').collect::<Vec<_>>().as_slice() {
                [field, value] if !field.is_empty() => {
                    record.insert(*field, *value);
                }
                _ => {
                    return Err(Error::InvalidQuery(format!("malformed pair '{}'", pair)));
                }
            }
        }

        Ok(Query::Insert {
            table: TableName::from(*table),
            record,
        })
    }
}
