//! In-process gateway with the same contract as the Postgres one.
//!
//! Clones share one table, so a test can hand a clone to the editor and keep
//! another to inspect what was stored and which calls were made.

use std::cell::RefCell;
use std::rc::Rc;

use log::debug;

use super::{Gateway, GatewayError, GatewayResult};
use crate::core::schema::{Record, RecordId, Value};

/// One gateway call, as seen by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Create,
    ReadAll,
    Update(RecordId),
    Delete(RecordId),
    ClearAll,
}

#[derive(Debug, Default)]
struct MemoryTable {
    records: Vec<Record>,
    next_id: i32,
    calls: Vec<GatewayCall>,
    fail_next: Option<GatewayError>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryGateway {
    table: Rc<RefCell<MemoryTable>>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with `rows` stored, ids assigned from 1 in order.
    pub fn with_rows(rows: Vec<Vec<Value>>) -> Self {
        let mut gateway = Self::new();
        for values in rows {
            // A fresh table never fails.
            let _ = gateway.create(&values);
        }
        gateway.table.borrow_mut().calls.clear();
        gateway
    }

    /// Snapshot of the stored records, ordered by id.
    pub fn records(&self) -> Vec<Record> {
        self.table.borrow().records.clone()
    }

    /// Every call made so far, oldest first.
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.table.borrow().calls.clone()
    }

    /// Make the next call fail with `error` without touching the table.
    pub fn fail_next(&self, error: GatewayError) {
        self.table.borrow_mut().fail_next = Some(error);
    }

    fn begin(&self, call: GatewayCall) -> GatewayResult<std::cell::RefMut<'_, MemoryTable>> {
        debug!("Memory gateway: {:?}", call);
        let mut table = self.table.borrow_mut();
        table.calls.push(call);
        match table.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(table),
        }
    }
}

impl Gateway for MemoryGateway {
    fn create(&mut self, values: &[Value]) -> GatewayResult<RecordId> {
        let mut table = self.begin(GatewayCall::Create)?;
        table.next_id += 1;
        let id = RecordId(table.next_id);
        table.records.push(Record {
            id,
            values: values.to_vec(),
        });
        Ok(id)
    }

    fn read_all(&mut self) -> GatewayResult<Vec<Record>> {
        let table = self.begin(GatewayCall::ReadAll)?;
        Ok(table.records.clone())
    }

    fn update(&mut self, id: RecordId, values: &[Value]) -> GatewayResult<()> {
        let mut table = self.begin(GatewayCall::Update(id))?;
        let record = table
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(GatewayError::NotFound(id))?;
        record.values = values.to_vec();
        Ok(())
    }

    fn delete(&mut self, id: RecordId) -> GatewayResult<()> {
        let mut table = self.begin(GatewayCall::Delete(id))?;
        let before = table.records.len();
        table.records.retain(|r| r.id != id);
        if table.records.len() == before {
            return Err(GatewayError::NotFound(id));
        }
        Ok(())
    }

    fn clear_all(&mut self) -> GatewayResult<()> {
        let mut table = self.begin(GatewayCall::ClearAll)?;
        table.records.clear();
        Ok(())
    }
}
