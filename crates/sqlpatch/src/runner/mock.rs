//! In-memory executor for unit tests.
//!
//! Records every call and tracks how many statements and cursors are alive,
//! so tests can assert that each handle was released before the call returned.

use crate::error::{SqlError, SqlResult};
use crate::executor::{RowCursor, StatementExecutor};
use crate::value::Value;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

pub(crate) type MockRow = Vec<Value>;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Call {
    Prepare(String),
    Execute(String, Vec<Value>),
    ExecutePrepared(String, Vec<Value>),
    QueryPrepared(String, Vec<Value>),
    Query(String, Vec<Value>),
}

#[derive(Debug, Default)]
pub(crate) struct MockState {
    pub(crate) calls: Vec<Call>,
    pub(crate) statements_opened: u64,
    pub(crate) statements_closed: u64,
    pub(crate) cursors_opened: u64,
    pub(crate) cursors_closed: u64,
}

impl MockState {
    pub(crate) fn live_statements(&self) -> u64 {
        self.statements_opened - self.statements_closed
    }

    pub(crate) fn live_cursors(&self) -> u64 {
        self.cursors_opened - self.cursors_closed
    }
}

#[derive(Default)]
pub(crate) struct MockExecutor {
    state: Arc<Mutex<MockState>>,
    rows: Vec<MockRow>,
    affected: u64,
    fail_prepare: Option<String>,
    fail_execute: Option<String>,
    fail_query: Option<String>,
    fail_row_at: Option<usize>,
}

impl MockExecutor {
    pub(crate) fn new() -> Self {
        Self {
            affected: 1,
            ..Self::default()
        }
    }

    pub(crate) fn with_rows(mut self, rows: Vec<MockRow>) -> Self {
        self.rows = rows;
        self
    }

    pub(crate) fn fail_prepare(mut self, msg: &str) -> Self {
        self.fail_prepare = Some(msg.to_string());
        self
    }

    pub(crate) fn fail_execute(mut self, msg: &str) -> Self {
        self.fail_execute = Some(msg.to_string());
        self
    }

    pub(crate) fn fail_query(mut self, msg: &str) -> Self {
        self.fail_query = Some(msg.to_string());
        self
    }

    /// Make the cursor fail when asked for row `index` (0-based).
    pub(crate) fn fail_row_at(mut self, index: usize) -> Self {
        self.fail_row_at = Some(index);
        self
    }

    pub(crate) fn state(&self) -> Arc<Mutex<MockState>> {
        Arc::clone(&self.state)
    }

    fn record(&self, call: Call) {
        self.state.lock().unwrap().calls.push(call);
    }

    fn open_cursor(&self) -> MockRows {
        self.state.lock().unwrap().cursors_opened += 1;
        MockRows {
            rows: self.rows.iter().cloned().collect(),
            position: 0,
            fail_at: self.fail_row_at,
            state: Arc::clone(&self.state),
        }
    }
}

pub(crate) struct MockStatement {
    sql: String,
    state: Arc<Mutex<MockState>>,
}

impl Drop for MockStatement {
    fn drop(&mut self) {
        self.state.lock().unwrap().statements_closed += 1;
    }
}

pub(crate) struct MockRows {
    rows: VecDeque<MockRow>,
    position: usize,
    fail_at: Option<usize>,
    state: Arc<Mutex<MockState>>,
}

impl Drop for MockRows {
    fn drop(&mut self) {
        self.state.lock().unwrap().cursors_closed += 1;
    }
}

impl RowCursor for MockRows {
    type Row = MockRow;

    async fn next_row(&mut self) -> SqlResult<Option<MockRow>> {
        if self.fail_at == Some(self.position) {
            return Err(SqlError::Execution(format!(
                "cursor failed at row {}",
                self.position
            )));
        }
        self.position += 1;
        Ok(self.rows.pop_front())
    }
}

impl StatementExecutor for MockExecutor {
    type Statement = MockStatement;
    type Row = MockRow;
    type Rows = MockRows;

    async fn prepare(&self, sql: &str) -> SqlResult<MockStatement> {
        self.record(Call::Prepare(sql.to_string()));
        if let Some(msg) = &self.fail_prepare {
            return Err(SqlError::Prepare(msg.clone()));
        }
        self.state.lock().unwrap().statements_opened += 1;
        Ok(MockStatement {
            sql: sql.to_string(),
            state: Arc::clone(&self.state),
        })
    }

    async fn execute(&self, sql: &str, args: &[Value]) -> SqlResult<u64> {
        self.record(Call::Execute(sql.to_string(), args.to_vec()));
        match &self.fail_execute {
            Some(msg) => Err(SqlError::Execution(msg.clone())),
            None => Ok(self.affected),
        }
    }

    async fn execute_prepared(&self, stmt: &MockStatement, args: &[Value]) -> SqlResult<u64> {
        self.record(Call::ExecutePrepared(stmt.sql.clone(), args.to_vec()));
        match &self.fail_execute {
            Some(msg) => Err(SqlError::Execution(msg.clone())),
            None => Ok(self.affected),
        }
    }

    async fn query_prepared(&self, stmt: &MockStatement, args: &[Value]) -> SqlResult<MockRows> {
        self.record(Call::QueryPrepared(stmt.sql.clone(), args.to_vec()));
        if let Some(msg) = &self.fail_query {
            return Err(SqlError::Execution(msg.clone()));
        }
        Ok(self.open_cursor())
    }

    async fn query(&self, sql: &str, args: &[Value]) -> SqlResult<MockRows> {
        self.record(Call::Query(sql.to_string(), args.to_vec()));
        if let Some(msg) = &self.fail_query {
            return Err(SqlError::Execution(msg.clone()));
        }
        Ok(self.open_cursor())
    }
}
