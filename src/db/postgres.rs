//! Postgres-backed gateway.
//!
//! Opens one connection at startup, ensures the schema's table exists, and
//! keeps the connection for the life of the process. Column lists come from
//! the static schema definitions; user input only ever travels as bound
//! parameters.

use std::time::Instant;

use log::{debug, info, warn};
use postgres::types::ToSql;
use postgres::{Client, NoTls, Row};

use super::{Gateway, GatewayError, GatewayResult};
use crate::core::schema::{FieldKind, Record, RecordId, Schema, Value};

pub struct PgGateway {
    client: Client,
    schema: Schema,
}

impl PgGateway {
    /// Connect with a libpq-style string (`host=… user=…` or a
    /// `postgresql://` URL) and create the table if it is missing.
    pub fn connect(params: &str, schema: Schema) -> GatewayResult<Self> {
        let started_at = Instant::now();
        let mut client = Client::connect(params, NoTls)
            .map_err(|e| GatewayError::Connect(e.to_string()))?;
        client
            .batch_execute(schema.create_table_sql())
            .map_err(|e| GatewayError::Connect(format!("creating table {schema}: {e}")))?;
        info!(
            "Connected to Postgres, table {} ready ({}ms)",
            schema,
            started_at.elapsed().as_millis()
        );
        Ok(Self { client, schema })
    }

    fn column_list(&self) -> String {
        self.schema
            .columns()
            .iter()
            .map(|c| c.name)
            .collect::<Vec<_>>()
            .join(", ")
    }

    fn row_to_record(&self, row: &Row) -> GatewayResult<Record> {
        let id: i32 = row.try_get(0).map_err(invalid)?;
        let values = self
            .schema
            .columns()
            .iter()
            .enumerate()
            .map(|(i, column)| {
                let idx = i + 1;
                let missing = || {
                    GatewayError::InvalidData(format!("record {id}: {} is NULL", column.name))
                };
                match column.kind {
                    FieldKind::Integer => row
                        .try_get::<_, Option<i32>>(idx)
                        .map_err(invalid)?
                        .map(Value::Integer)
                        .ok_or_else(missing),
                    FieldKind::Text => row
                        .try_get::<_, Option<String>>(idx)
                        .map_err(invalid)?
                        .map(Value::Text)
                        .ok_or_else(missing),
                    FieldKind::MonthDay => {
                        let ts = row
                            .try_get::<_, Option<chrono::NaiveDateTime>>(idx)
                            .map_err(invalid)?
                            .ok_or_else(missing)?;
                        Value::month_day_from_timestamp(ts)
                            .map(Value::MonthDay)
                            .ok_or_else(|| {
                                GatewayError::InvalidData(format!(
                                    "record {id}: {} = {ts} has no month-day",
                                    column.name
                                ))
                            })
                    }
                }
            })
            .collect::<GatewayResult<Vec<_>>>()?;
        Ok(Record {
            id: RecordId(id),
            values,
        })
    }
}

/// Owned SQL parameters for a value list, in column order.
fn to_params(values: &[Value]) -> Vec<Box<dyn ToSql + Sync>> {
    values
        .iter()
        .map(|v| -> Box<dyn ToSql + Sync> {
            match v {
                Value::Integer(n) => Box::new(*n),
                Value::Text(s) => Box::new(s.clone()),
                Value::MonthDay(date) => Box::new(Value::month_day_timestamp(*date)),
            }
        })
        .collect()
}

fn query_err(e: postgres::Error) -> GatewayError {
    warn!("Postgres error: {}", e);
    GatewayError::Query(e.to_string())
}

fn invalid(e: postgres::Error) -> GatewayError {
    GatewayError::InvalidData(e.to_string())
}

impl Gateway for PgGateway {
    fn create(&mut self, values: &[Value]) -> GatewayResult<RecordId> {
        let started_at = Instant::now();
        let placeholders = (1..=values.len())
            .map(|i| format!("${i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {}({}) VALUES({}) RETURNING id",
            self.schema.table_name(),
            self.column_list(),
            placeholders
        );
        let params = to_params(values);
        let refs: Vec<&(dyn ToSql + Sync)> = params.iter().map(|p| p.as_ref()).collect();

        let row = self.client.query_one(sql.as_str(), &refs).map_err(query_err)?;
        let id = RecordId(row.try_get(0).map_err(invalid)?);
        debug!("create -> id {} ({}ms)", id, started_at.elapsed().as_millis());
        Ok(id)
    }

    fn read_all(&mut self) -> GatewayResult<Vec<Record>> {
        let started_at = Instant::now();
        let sql = format!(
            "SELECT id, {} FROM {} ORDER BY id",
            self.column_list(),
            self.schema.table_name()
        );
        let rows = self.client.query(sql.as_str(), &[]).map_err(query_err)?;
        let records = rows
            .iter()
            .map(|row| self.row_to_record(row))
            .collect::<GatewayResult<Vec<_>>>()?;
        debug!(
            "read_all -> {} records ({}ms)",
            records.len(),
            started_at.elapsed().as_millis()
        );
        Ok(records)
    }

    fn update(&mut self, id: RecordId, values: &[Value]) -> GatewayResult<()> {
        let started_at = Instant::now();
        let assignments = self
            .schema
            .columns()
            .iter()
            .enumerate()
            .map(|(i, c)| format!("{}=${}", c.name, i + 2))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE id=$1",
            self.schema.table_name(),
            assignments
        );
        let params = to_params(values);
        let mut refs: Vec<&(dyn ToSql + Sync)> = Vec::with_capacity(params.len() + 1);
        refs.push(&id.0);
        refs.extend(params.iter().map(|p| p.as_ref()));

        let changed = self.client.execute(sql.as_str(), &refs).map_err(query_err)?;
        debug!(
            "update id {} -> {} rows ({}ms)",
            id,
            changed,
            started_at.elapsed().as_millis()
        );
        if changed == 0 {
            return Err(GatewayError::NotFound(id));
        }
        Ok(())
    }

    fn delete(&mut self, id: RecordId) -> GatewayResult<()> {
        let started_at = Instant::now();
        let sql = format!("DELETE FROM {} WHERE id=$1", self.schema.table_name());
        let changed = self.client.execute(sql.as_str(), &[&id.0]).map_err(query_err)?;
        debug!(
            "delete id {} -> {} rows ({}ms)",
            id,
            changed,
            started_at.elapsed().as_millis()
        );
        if changed == 0 {
            return Err(GatewayError::NotFound(id));
        }
        Ok(())
    }

    fn clear_all(&mut self) -> GatewayResult<()> {
        let sql = format!("DELETE FROM {}", self.schema.table_name());
        let removed = self.client.execute(sql.as_str(), &[]).map_err(query_err)?;
        info!("Cleared {} records from {}", removed, self.schema);
        Ok(())
    }
}
