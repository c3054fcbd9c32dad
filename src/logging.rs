//! Structured logging for the dashboard pipeline.
//!
//! JSON lines with level and domain filtering via environment variables,
//! credential redaction, and an optional file sink under LOG_DIR.

use chrono::Utc;
use serde_json::{json, Map, Value};
use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, OnceLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
}

impl Level {
    pub fn from_env() -> Self {
        match std::env::var("LOG_LEVEL").as_deref() {
            Ok("trace") => Level::Trace,
            Ok("debug") => Level::Debug,
            Ok("info") => Level::Info,
            Ok("warn") => Level::Warn,
            Ok("error") => Level::Error,
            _ => Level::Info,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Domain {
    Auth,    // signin, token extraction, session restore
    Query,   // GraphQL execution
    Session, // store reads/writes, logout
    Stats,   // aggregation
    Render,  // chart geometry and SVG output
    System,  // startup, CLI dispatch
}

impl Domain {
    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Auth => "auth",
            Domain::Query => "query",
            Domain::Session => "session",
            Domain::Stats => "stats",
            Domain::Render => "render",
            Domain::System => "system",
        }
    }

    pub fn is_enabled(&self) -> bool {
        // LOG_DOMAINS is a comma-separated list, or "all"
        match std::env::var("LOG_DOMAINS").as_deref() {
            Ok("all") | Err(_) => true,
            Ok(domains) => domains.split(',').any(|d| d.trim() == self.as_str()),
        }
    }
}

static LOG_SEQ: AtomicU64 = AtomicU64::new(0);
static EVENTS_SINK: OnceLock<Option<Mutex<BufWriter<File>>>> = OnceLock::new();

fn next_seq() -> u64 {
    LOG_SEQ.fetch_add(1, Ordering::SeqCst)
}

fn events_sink() -> &'static Option<Mutex<BufWriter<File>>> {
    EVENTS_SINK.get_or_init(|| {
        let dir = std::env::var("LOG_DIR").ok()?;
        let mut path = PathBuf::from(dir);
        if let Err(err) = create_dir_all(&path) {
            eprintln!("[log] failed to create log dir: {}", err);
            return None;
        }
        path.push("events.jsonl");
        match File::create(&path) {
            Ok(file) => Some(Mutex::new(BufWriter::new(file))),
            Err(err) => {
                eprintln!("[log] failed to create events log: {}", err);
                None
            }
        }
    })
}

fn sanitize_fields(mut fields: Map<String, Value>) -> Map<String, Value> {
    let redacted = Value::String("[REDACTED]".to_string());
    for key in ["authorization", "Authorization", "password", "token", "credential"] {
        if fields.contains_key(key) {
            fields.insert(key.to_string(), redacted.clone());
        }
    }
    fields
}

/// RFC3339 timestamp with milliseconds
pub fn ts_now() -> String {
    Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Emit a structured log entry.
pub fn log(level: Level, domain: Domain, event: &str, fields: Map<String, Value>) {
    if level < Level::from_env() || !domain.is_enabled() {
        return;
    }

    let mut entry = Map::new();
    entry.insert("ts".to_string(), json!(ts_now()));
    entry.insert("seq".to_string(), json!(next_seq()));
    entry.insert("lvl".to_string(), json!(level.as_str().to_uppercase()));
    entry.insert("domain".to_string(), json!(domain.as_str()));
    entry.insert("event".to_string(), json!(event));
    entry.insert("data".to_string(), Value::Object(sanitize_fields(fields)));

    let line = Value::Object(entry).to_string();
    if let Some(sink) = events_sink() {
        if let Ok(mut w) = sink.lock() {
            let _ = writeln!(w, "{}", line);
            let _ = w.flush();
        }
    }
    println!("{}", line);
}

/// Info-level shorthand used at orchestration points.
pub fn json_log(domain: Domain, event: &str, fields: Map<String, Value>) {
    log(Level::Info, domain, event, fields);
}

pub fn obj(pairs: &[(&str, Value)]) -> Map<String, Value> {
    let mut map = Map::new();
    for (k, v) in pairs {
        map.insert((*k).to_string(), v.clone());
    }
    map
}

pub fn v_str(s: &str) -> Value {
    Value::String(s.to_string())
}

pub fn v_num(n: f64) -> Value {
    json!(n)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(Level::Trace < Level::Debug);
        assert!(Level::Debug < Level::Info);
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
    }

    #[test]
    fn test_obj_helper() {
        let m = obj(&[("key", v_str("value")), ("num", v_num(42.0))]);
        assert_eq!(m.get("key").unwrap(), "value");
        assert_eq!(m.get("num").unwrap(), 42.0);
    }

    #[test]
    fn test_sanitize_redacts_credentials() {
        let m = sanitize_fields(obj(&[
            ("password", v_str("hunter2")),
            ("user", v_str("alice")),
        ]));
        assert_eq!(m.get("password").unwrap(), "[REDACTED]");
        assert_eq!(m.get("user").unwrap(), "alice");
    }

    #[test]
    fn test_seq_increments() {
        let s1 = next_seq();
        let s2 = next_seq();
        assert!(s2 > s1);
    }
}
