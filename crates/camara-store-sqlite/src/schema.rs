//! SQL schema for the SQLite store.
//!
//! Executed once at connection startup. Every statement is idempotent, so
//! reopening an existing database file is a no-op.

/// Full schema DDL; idempotent thanks to `CREATE ... IF NOT EXISTS`.
///
/// Foreign keys stay disabled: an expense may be written before (or without)
/// its legislator, and the reference is documentation only.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS deputados (
    id          INTEGER PRIMARY KEY,   -- upstream-assigned
    nome        TEXT NOT NULL,
    nome_civil  TEXT NOT NULL DEFAULT '',
    partido     TEXT NOT NULL DEFAULT '',
    uf          TEXT NOT NULL DEFAULT '',
    foto        TEXT NOT NULL DEFAULT '',
    email       TEXT NOT NULL DEFAULT '',
    updated_at  TEXT NOT NULL          -- RFC 3339 UTC; store-assigned
);

CREATE INDEX IF NOT EXISTS idx_deputados_partido ON deputados(partido);
CREATE INDEX IF NOT EXISTS idx_deputados_uf      ON deputados(uf);

-- Expenses are insert-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS despesas (
    id               INTEGER PRIMARY KEY AUTOINCREMENT,
    deputado_id      INTEGER NOT NULL REFERENCES deputados(id),
    ano              INTEGER NOT NULL,
    mes              INTEGER NOT NULL DEFAULT 0,
    tipo_despesa     TEXT NOT NULL DEFAULT '',
    data_documento   TEXT NOT NULL DEFAULT '',   -- free text, never parsed
    valor_documento  REAL NOT NULL DEFAULT 0,
    valor_liquido    REAL NOT NULL DEFAULT 0,
    nome_fornecedor  TEXT NOT NULL DEFAULT '',
    cnpj_fornecedor  TEXT NOT NULL DEFAULT '',
    num_documento    TEXT NOT NULL DEFAULT '',
    created_at       TEXT NOT NULL,
    UNIQUE (deputado_id, ano, num_documento, valor_documento)
);

CREATE INDEX IF NOT EXISTS idx_despesas_deputado ON despesas(deputado_id);
CREATE INDEX IF NOT EXISTS idx_despesas_ano      ON despesas(ano);

-- Reserved for a ranking cache; no code path reads or writes it yet.
CREATE TABLE IF NOT EXISTS ranking_cache (
    ano         INTEGER PRIMARY KEY,
    data        TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

PRAGMA user_version = 1;
";
