//! Integration tests for the mailchimp crate
//!
//! These tests drive the full client against an in-memory Mailchimp fake.

use anyhow::Result;
use mailchimp::{
    BatchStatus, BatchTimeoutError, DesiredState, MailchimpApi, MailchimpClient, MailchimpConfig,
    MemberStatus, MemorySyncLogger, Person, Sleeper, SubscriberId, TagUpdate, synchronize,
};
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// In-memory stand-in for the Mailchimp API
///
/// Serves members and segments with real count/offset paging, accepts batches
/// and reports each batch with the scripted status sequence.
struct FakeMailchimp {
    list_id: String,
    members: Vec<Value>,
    segments: Vec<Value>,
    batch_statuses: Vec<&'static str>,
    errored_operations: u64,
    state: Mutex<FakeState>,
}

#[derive(Default)]
struct FakeState {
    gets: Vec<String>,
    batches: Vec<Vec<Value>>,
    status_fetches: usize,
    tag_posts: Vec<(String, Value)>,
}

impl FakeMailchimp {
    fn new(list_id: &str) -> Self {
        Self {
            list_id: list_id.to_string(),
            members: Vec::new(),
            segments: Vec::new(),
            batch_statuses: vec!["finished"],
            errored_operations: 0,
            state: Mutex::new(FakeState::default()),
        }
    }

    fn with_members(mut self, emails: &[&str]) -> Self {
        self.members = emails
            .iter()
            .map(|email| {
                json!({
                    "id": SubscriberId::from_email(email).to_string(),
                    "email_address": email,
                    "status": "subscribed",
                    "tags": [{"id": 1, "name": "Member"}]
                })
            })
            .collect();
        self
    }

    fn with_segments(mut self, names: &[&str]) -> Self {
        self.segments = names
            .iter()
            .enumerate()
            .map(|(i, name)| json!({"id": 100 + i, "name": name, "member_count": 0}))
            .collect();
        self
    }

    fn with_batch_statuses(mut self, statuses: Vec<&'static str>) -> Self {
        self.batch_statuses = statuses;
        self
    }

    fn with_errored_operations(mut self, errored: u64) -> Self {
        self.errored_operations = errored;
        self
    }

    fn page(items: &[Value], key: &str, query: &[(&str, String)]) -> Value {
        let param = |name: &str| -> usize {
            query
                .iter()
                .find(|(k, _)| *k == name)
                .and_then(|(_, v)| v.parse().ok())
                .unwrap_or(0)
        };
        let (count, offset) = (param("count"), param("offset"));
        let window: Vec<Value> = items.iter().skip(offset).take(count).cloned().collect();
        json!({ key: window, "total_items": items.len() })
    }

    fn batches(&self) -> Vec<Vec<Value>> {
        self.state.lock().unwrap().batches.clone()
    }
}

impl MailchimpApi for FakeMailchimp {
    fn get(&self, path: &str, query: &[(&str, String)]) -> Result<Value> {
        let mut state = self.state.lock().unwrap();
        state.gets.push(path.to_string());

        if path == format!("lists/{}/members", self.list_id) {
            return Ok(Self::page(&self.members, "members", query));
        }
        if path == format!("lists/{}/segments", self.list_id) {
            return Ok(Self::page(&self.segments, "segments", query));
        }
        if let Some(batch_id) = path.strip_prefix("batches/") {
            let index = state.status_fetches.min(self.batch_statuses.len() - 1);
            state.status_fetches += 1;
            let total = state.batches.last().map_or(0, |ops| ops.len()) as u64;
            return Ok(json!({
                "id": batch_id,
                "status": self.batch_statuses[index],
                "total_operations": total,
                "finished_operations": total,
                "errored_operations": self.errored_operations,
                "response_body_url": ""
            }));
        }

        anyhow::bail!("404 Not Found: GET {}", path)
    }

    fn post(&self, path: &str, body: &Value) -> Result<Value> {
        let mut state = self.state.lock().unwrap();

        if path == "batches" {
            let operations = body["operations"].as_array().cloned().unwrap_or_default();
            state.batches.push(operations);
            state.status_fetches = 0;
            return Ok(json!({"id": format!("batch-{}", state.batches.len()), "status": "pending"}));
        }
        if path.ends_with("/tags") {
            state.tag_posts.push((path.to_string(), body.clone()));
            return Ok(Value::Null);
        }

        anyhow::bail!("404 Not Found: POST {}", path)
    }
}

#[derive(Default)]
struct RecordingSleeper {
    sleeps: Mutex<Vec<Duration>>,
}

impl Sleeper for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.sleeps.lock().unwrap().push(duration);
    }
}

struct Harness {
    api: Arc<FakeMailchimp>,
    logger: Arc<MemorySyncLogger>,
    sleeper: Arc<RecordingSleeper>,
    client: MailchimpClient,
}

fn harness(api: FakeMailchimp, page_size: usize) -> Harness {
    let api = Arc::new(api);
    let logger = Arc::new(MemorySyncLogger::new());
    let sleeper = Arc::new(RecordingSleeper::default());
    let config = MailchimpConfig::new("list1", "secret-us6").with_page_size(page_size);
    let client =
        MailchimpClient::with_parts(&config, api.clone(), logger.clone(), sleeper.clone()).unwrap();

    Harness {
        api,
        logger,
        sleeper,
        client,
    }
}

fn emails(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("member{}@example.com", i)).collect()
}

#[test]
fn test_fetch_members_pages_through_audience() {
    let all = emails(125);
    let refs: Vec<&str> = all.iter().map(String::as_str).collect();
    let h = harness(FakeMailchimp::new("list1").with_members(&refs), 50);

    let members = h.client.fetch_members().unwrap();

    assert_eq!(members.len(), 125);
    assert_eq!(members[0].email_address, "member0@example.com");
    assert_eq!(members[124].email_address, "member124@example.com");
    assert_eq!(members[0].status, MemberStatus::Subscribed);
    assert!(members[0].tags.contains("Member"));
    assert_eq!(h.api.state.lock().unwrap().gets.len(), 3);
}

#[test]
fn test_fetch_segments() {
    let h = harness(FakeMailchimp::new("list1").with_segments(&["Board", "Staff"]), 50);

    let segments = h.client.fetch_segments().unwrap();

    assert_eq!(segments.len(), 2);
    assert_eq!(segments[0].id, "100");
    assert_eq!(segments[1].name, "Staff");
}

#[test]
fn test_subscribe_submits_one_batch() {
    let h = harness(FakeMailchimp::new("list1"), 50);
    let people = vec![
        Person::new("jane@example.com").with_name("Jane", "Doe"),
        Person::new("john@example.com"),
    ];

    let summary = h.client.subscribe(&people).unwrap().unwrap();

    assert_eq!(summary.total_operations, 2);
    let batches = h.api.batches();
    assert_eq!(batches.len(), 1);
    assert_eq!(batches[0][0]["path"], "lists/list1/members");
    let body: Value = serde_json::from_str(batches[0][0]["body"].as_str().unwrap()).unwrap();
    assert_eq!(body["merge_fields"]["FNAME"], "Jane");
}

#[test]
fn test_empty_requests_make_no_remote_calls() {
    let h = harness(FakeMailchimp::new("list1"), 50);

    assert!(h.client.delete(&[]).unwrap().is_none());
    assert!(h.client.subscribe(&[]).unwrap().is_none());
    assert!(h.client.create_segments(&[]).unwrap().is_none());
    assert!(h.client.update_segments(&BTreeMap::new()).unwrap().is_none());

    assert!(h.api.batches().is_empty());
    assert!(h.api.state.lock().unwrap().gets.is_empty());
}

#[test]
fn test_update_segments_keyed_by_segment_id() {
    let h = harness(FakeMailchimp::new("list1"), 50);
    let mut segments = BTreeMap::new();
    segments.insert("100".to_string(), vec!["a@example.com".to_string()]);
    segments.insert("101".to_string(), vec!["b@example.com".to_string()]);

    h.client.update_segments(&segments).unwrap().unwrap();

    let batch = &h.api.batches()[0];
    assert_eq!(batch.len(), 2);
    assert_eq!(batch[0]["path"], "lists/list1/segments/100");
    assert_eq!(batch[1]["path"], "lists/list1/segments/101");
}

#[test]
fn test_delete_is_case_insensitive() {
    let h = harness(FakeMailchimp::new("list1"), 50);

    h.client
        .delete(&["Gone@Example.com".to_string()])
        .unwrap()
        .unwrap();

    let batch = &h.api.batches()[0];
    assert_eq!(batch[0]["method"], "DELETE");
    assert_eq!(
        batch[0]["path"],
        format!("lists/list1/members/{}", SubscriberId::from_email("gone@example.com"))
    );
}

#[test]
fn test_polls_with_quadratic_backoff() {
    let h = harness(
        FakeMailchimp::new("list1").with_batch_statuses(vec!["pending", "started", "finished"]),
        50,
    );

    h.client.create_segments(&["Board".to_string()]).unwrap();

    assert_eq!(
        *h.sleeper.sleeps.lock().unwrap(),
        vec![Duration::from_secs(0), Duration::from_secs(1), Duration::from_secs(4)]
    );
    let messages = h.logger.messages();
    assert!(messages.contains(&"batch batch-1, status: pending".to_string()));
    assert!(messages.contains(&"batch batch-1, status: finished".to_string()));
}

#[test]
fn test_batch_timeout_is_reported() {
    let h = harness(
        FakeMailchimp::new("list1").with_batch_statuses(vec!["started"]),
        50,
    );

    let err = h.client.delete(&["a@example.com".to_string()]).unwrap_err();

    let timeout = err.downcast_ref::<BatchTimeoutError>().unwrap();
    assert_eq!(timeout.batch_id, "batch-1");
    assert_eq!(timeout.status, BatchStatus::Started);
    assert_eq!(h.api.state.lock().unwrap().status_fetches, 12);
}

#[test]
fn test_errored_operations_are_not_fatal() {
    let h = harness(FakeMailchimp::new("list1").with_errored_operations(1), 50);

    let summary = h
        .client
        .subscribe(&[Person::new("bad-address")])
        .unwrap()
        .unwrap();

    assert!(summary.has_errors());
    assert_eq!(summary.errored_operations, 1);
}

#[test]
fn test_update_tags() {
    let h = harness(FakeMailchimp::new("list1"), 50);

    h.client
        .update_tags("Test@Example.com", &[TagUpdate::active("Board")])
        .unwrap();

    let state = h.api.state.lock().unwrap();
    assert_eq!(state.tag_posts.len(), 1);
    assert_eq!(
        state.tag_posts[0].0,
        format!("lists/list1/members/{}/tags", SubscriberId::from_email("test@example.com"))
    );
    assert!(state.batches.is_empty());
}

#[test]
fn test_synchronize_reconciles_audience() {
    let h = harness(
        FakeMailchimp::new("list1")
            .with_members(&["keep@example.com", "gone@example.com"])
            .with_segments(&["Board"]),
        50,
    );
    let desired = DesiredState {
        people: vec![Person::new("KEEP@example.com"), Person::new("new@example.com")],
        segments: vec!["Board".to_string(), "Staff".to_string()],
    };

    let stats = synchronize(&h.client, &desired).unwrap();

    assert_eq!(stats.members_fetched, 2);
    assert_eq!(stats.subscribed, 1);
    assert_eq!(stats.deleted, 1);
    assert_eq!(stats.segments_created, 1);
    assert_eq!(stats.batches.len(), 3);
    assert_eq!(stats.errored_operations(), 0);

    let batches = h.api.batches();
    assert_eq!(batches[0][0]["path"], "lists/list1/members");
    assert_eq!(batches[1][0]["method"], "DELETE");
    assert_eq!(batches[2][0]["path"], "lists/list1/segments");
}

#[test]
fn test_synchronize_with_nothing_to_do() {
    let h = harness(FakeMailchimp::new("list1").with_members(&["a@example.com"]), 50);
    let desired = DesiredState {
        people: vec![Person::new("a@example.com")],
        segments: Vec::new(),
    };

    let stats = synchronize(&h.client, &desired).unwrap();

    assert!(stats.batches.is_empty());
    assert!(h.api.batches().is_empty());
}

#[test]
fn test_client_rejects_zero_page_size() {
    let config = MailchimpConfig::new("list1", "secret-us6").with_page_size(0);
    let result = MailchimpClient::with_parts(
        &config,
        Arc::new(FakeMailchimp::new("list1")),
        Arc::new(MemorySyncLogger::new()),
        Arc::new(RecordingSleeper::default()),
    );
    assert!(result.is_err());
}
