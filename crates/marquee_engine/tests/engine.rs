use std::sync::{mpsc, Arc, Mutex};
use std::time::Duration;

use bytes::Bytes;
use marquee_engine::{
    EngineCommand, EngineEvent, EngineHandle, FailureKind, ListingApi, QueryParams, QueryValue,
    Transport, TransportError, TransportResponse,
};

/// Answers from a fixed table keyed by path and records every request.
#[derive(Default)]
struct ScriptedTransport {
    requests: Mutex<Vec<(String, QueryParams)>>,
}

#[async_trait::async_trait]
impl Transport for ScriptedTransport {
    async fn get(
        &self,
        path: &str,
        params: &QueryParams,
    ) -> Result<TransportResponse, TransportError> {
        self.requests
            .lock()
            .unwrap()
            .push((path.to_string(), params.clone()));
        let body = match path {
            "/movie/popular" => r#"{"page":1,"total_pages":2,"results":[{"id":1,"title":"A"}]}"#,
            "/search/movie" => return Err(TransportError::Timeout),
            "/movie/7" => r#"{"id":7,"title":"Seven"}"#,
            "/movie/7/credits" => {
                return Ok(TransportResponse {
                    status: 503,
                    body: Bytes::new(),
                })
            }
            _ => "{}",
        };
        Ok(TransportResponse {
            status: 200,
            body: Bytes::from_static(body.as_bytes()),
        })
    }
}

fn spawn() -> (EngineHandle, mpsc::Receiver<EngineEvent>, Arc<ScriptedTransport>) {
    let transport = Arc::new(ScriptedTransport::default());
    let (event_tx, event_rx) = mpsc::channel();
    let api = ListingApi::new(transport.clone());
    let engine = EngineHandle::spawn(api, event_tx).expect("engine");
    (engine, event_rx, transport)
}

fn next_event(rx: &mpsc::Receiver<EngineEvent>) -> EngineEvent {
    rx.recv_timeout(Duration::from_secs(5)).expect("engine event")
}

#[test]
fn browse_command_reports_page_with_its_generation() {
    let (engine, rx, transport) = spawn();
    engine.submit(EngineCommand::BrowsePage {
        generation: 4,
        page: 1,
    });

    match next_event(&rx) {
        EngineEvent::BrowsePage {
            generation,
            page,
            result,
        } => {
            assert_eq!(generation, 4);
            assert_eq!(page, 1);
            let listing = result.expect("listing");
            assert_eq!(listing.total_pages, 2);
            assert_eq!(listing.results[0].title, "A");
        }
        other => panic!("unexpected event {other:?}"),
    }

    let requests = transport.requests.lock().unwrap();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].1.get("page"), Some(&QueryValue::Int(1)));
}

#[test]
fn transport_failures_are_normalized() {
    let (engine, rx, _transport) = spawn();
    engine.submit(EngineCommand::SearchPage {
        generation: 1,
        query: "abc".into(),
        page: 1,
    });

    match next_event(&rx) {
        EngineEvent::SearchPage { result, .. } => {
            let err = result.unwrap_err();
            assert_eq!(err.kind, FailureKind::Timeout);
            assert_eq!(err.message, "timeout");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn detail_and_credits_complete_independently() {
    let (engine, rx, _transport) = spawn();
    engine.submit(EngineCommand::Detail { generation: 2, id: 7 });
    engine.submit(EngineCommand::Credits { generation: 2, id: 7 });

    let mut detail_ok = false;
    let mut credits_status = None;
    for _ in 0..2 {
        match next_event(&rx) {
            EngineEvent::Detail { id, result, .. } => {
                assert_eq!(id, 7);
                detail_ok = result.is_ok();
            }
            EngineEvent::Credits { result, .. } => {
                credits_status = result.err().map(|err| err.kind);
            }
            other => panic!("unexpected event {other:?}"),
        }
    }
    assert!(detail_ok);
    assert_eq!(credits_status, Some(FailureKind::HttpStatus(503)));
}
