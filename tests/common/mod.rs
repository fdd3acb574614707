//! In-memory transport that records every call and answers from a script.
#![allow(dead_code)]

use admin_console::config::ConsoleSettings;
use admin_console::{AppError, Transport};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::{json, Value};
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

#[derive(Clone, Debug, PartialEq)]
pub struct Call {
    pub method: &'static str,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl Call {
    pub fn param(&self, key: &str) -> Option<&str> {
        self.query.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_str())
    }
}

#[derive(Clone, Debug)]
enum Scripted {
    Ok(Value),
    Fail(StatusCode, String),
}

/// Unscripted calls succeed: GET answers an empty page, writes answer with no content.
#[derive(Default)]
pub struct MockTransport {
    calls: Mutex<Vec<Call>>,
    /// Keyed by (method, path). The last entry of a queue is sticky.
    script: Mutex<HashMap<(&'static str, String), VecDeque<Scripted>>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn on(&self, method: &'static str, path: &str, response: Value) {
        self.push(method, path, Scripted::Ok(response));
    }

    pub fn fail(&self, method: &'static str, path: &str, status: StatusCode, text: &str) {
        self.push(method, path, Scripted::Fail(status, text.to_string()));
    }

    fn push(&self, method: &'static str, path: &str, entry: Scripted) {
        self.script
            .lock()
            .unwrap()
            .entry((method, path.to_string()))
            .or_default()
            .push_back(entry);
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn calls_to(&self, method: &str) -> Vec<Call> {
        self.calls().into_iter().filter(|c| c.method == method).collect()
    }

    pub fn last(&self, method: &str) -> Option<Call> {
        self.calls_to(method).pop()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn answer(&self, call: Call) -> Option<Result<Value, AppError>> {
        let key = (call.method, call.path.clone());
        self.calls.lock().unwrap().push(call);
        let mut script = self.script.lock().unwrap();
        let queue = script.get_mut(&key)?;
        let entry = if queue.len() > 1 {
            queue.pop_front()?
        } else {
            queue.front()?.clone()
        };
        Some(match entry {
            Scripted::Ok(v) => Ok(v),
            Scripted::Fail(status, text) => Err(AppError::from_status(status, Some(text))),
        })
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, AppError> {
        let call = Call {
            method: "GET",
            path: path.to_string(),
            query: query.to_vec(),
            body: None,
        };
        self.answer(call)
            .unwrap_or_else(|| Ok(json!({"items": [], "total": 0, "page": 1, "page_size": 20, "pages": 0})))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Option<Value>, AppError> {
        let call = Call {
            method: "POST",
            path: path.to_string(),
            query: Vec::new(),
            body: Some(body.clone()),
        };
        match self.answer(call) {
            Some(Ok(Value::Null)) | None => Ok(None),
            Some(res) => res.map(Some),
        }
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<Value, AppError> {
        let call = Call {
            method: "PATCH",
            path: path.to_string(),
            query: Vec::new(),
            body: Some(body.clone()),
        };
        self.answer(call).unwrap_or(Ok(Value::Null))
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        let call = Call {
            method: "DELETE",
            path: path.to_string(),
            query: Vec::new(),
            body: None,
        };
        self.answer(call).unwrap_or(Ok(Value::Null)).map(|_| ())
    }
}

pub fn page_json(items: Vec<Value>, total: u64, page: u64, page_size: u64) -> Value {
    json!({
        "items": items,
        "total": total,
        "page": page,
        "page_size": page_size,
        "pages": total.div_ceil(page_size),
    })
}

pub fn settings() -> ConsoleSettings {
    ConsoleSettings::default()
}

pub fn settings_without_debounce() -> ConsoleSettings {
    ConsoleSettings {
        search_debounce: Duration::ZERO,
        ..ConsoleSettings::default()
    }
}
