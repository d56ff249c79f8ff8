#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use anyhow::{Result, anyhow};
use serde_json::{Value, json};
use taxkit_ecount::{EcountClient, EcountConfig, HttpReply, Transport};

#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Value,
}

impl RecordedCall {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }
}

/// Replays scripted replies in order and records every request.
#[derive(Default)]
pub struct FakeTransport {
    replies: Mutex<VecDeque<HttpReply>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl FakeTransport {
    pub fn new(replies: Vec<HttpReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl Transport for FakeTransport {
    async fn post_json(&self, url: &str, headers: &[(&str, &str)], body: &Value) -> Result<HttpReply> {
        self.calls.lock().unwrap().push(RecordedCall {
            url: url.to_string(),
            headers: headers
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
            body: body.clone(),
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| anyhow!("no scripted reply for {url}"))
    }
}

pub fn ok(body: Value) -> HttpReply {
    HttpReply {
        status: 200,
        reason: "OK".into(),
        body: body.to_string(),
    }
}

pub fn http_error(status: u16, reason: &str) -> HttpReply {
    HttpReply {
        status,
        reason: reason.into(),
        body: String::new(),
    }
}

pub fn login_ok(session_id: &str, zone: Option<&str>) -> HttpReply {
    let mut datas = json!({ "SESSION_ID": session_id });
    if let Some(zone) = zone {
        datas["ZONE"] = json!(zone);
    }
    ok(json!({ "Status": "200", "Data": { "Datas": datas } }))
}

pub fn slips(rows: Value) -> HttpReply {
    ok(json!({ "Status": "200", "Data": { "Datas": rows, "TotalCount": 0 } }))
}

pub fn test_config() -> EcountConfig {
    EcountConfig {
        com_code: "TESTCOM".into(),
        user_id: "testuser".into(),
        api_cert_key: "testapikey123".into(),
        zone: "Q".into(),
        base_url: None,
    }
}

pub fn client(replies: Vec<HttpReply>) -> EcountClient<FakeTransport> {
    EcountClient::with_transport(test_config(), FakeTransport::new(replies))
}
