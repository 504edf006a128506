//! Client state and the pure transitions applied to it.
//!
//! Every mutation is an `Action` run through `reduce`. Side effects (network
//! calls, persistence, clocks) live in `Session`, which feeds the results
//! back in as actions.

use super::history::RecentQueries;
use super::model::{DraftRequest, HeaderEntry, HttpMethod, ResponseView, SavedQuery};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClientState {
    pub draft: DraftRequest,
    pub is_loading: bool,
    pub response: Option<ResponseView>,
    pub recent: RecentQueries,
}

impl ClientState {
    pub fn with_recent(recent: RecentQueries) -> Self {
        Self {
            recent,
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    SetUrl(String),
    SetMethod(HttpMethod),
    SetHeaders(Vec<HeaderEntry>),
    SetBody(String),
    AddHeader,
    UpdateHeader {
        index: usize,
        key: String,
        value: String,
    },
    ToggleHeader(usize),
    RemoveHeader(usize),
    SendStarted,
    /// A relay call resolved; `snapshot` is recorded in the recent list.
    SendSucceeded {
        response: ResponseView,
        snapshot: SavedQuery,
    },
    /// A relay call failed; stored as the synthetic status-0 response.
    SendFailed(String),
    ClearResponse,
    LoadSavedQuery(String),
    DeleteSavedQuery(String),
    /// Replace the body with generated JSON and make sure the draft declares
    /// a JSON content type.
    ApplyGeneratedJson(String),
}

pub fn reduce(mut state: ClientState, action: Action) -> ClientState {
    match action {
        Action::SetUrl(url) => state.draft.url = url,
        Action::SetMethod(method) => state.draft.method = method,
        Action::SetHeaders(headers) => state.draft.headers = headers,
        Action::SetBody(body) => state.draft.body = body,
        Action::AddHeader => state.draft.headers.push(HeaderEntry::blank()),
        Action::UpdateHeader { index, key, value } => {
            if let Some(header) = state.draft.headers.get_mut(index) {
                header.key = key;
                header.value = value;
            }
        }
        Action::ToggleHeader(index) => {
            if let Some(header) = state.draft.headers.get_mut(index) {
                header.enabled = !header.enabled;
            }
        }
        Action::RemoveHeader(index) => {
            if index < state.draft.headers.len() {
                state.draft.headers.remove(index);
            }
        }
        Action::SendStarted => state.is_loading = true,
        Action::SendSucceeded { response, snapshot } => {
            state.is_loading = false;
            state.response = Some(response);
            state.recent.record(snapshot);
        }
        Action::SendFailed(details) => {
            state.is_loading = false;
            state.response = Some(ResponseView::failure(details));
        }
        Action::ClearResponse => state.response = None,
        Action::LoadSavedQuery(id) => {
            if let Some(query) = state.recent.find(&id) {
                state.draft = DraftRequest {
                    method: query.method,
                    url: query.url.clone(),
                    headers: query.headers.clone(),
                    body: query.body.clone(),
                };
            }
        }
        Action::DeleteSavedQuery(id) => {
            state.recent.remove(&id);
        }
        Action::ApplyGeneratedJson(json) => {
            state.draft.body = json;
            ensure_json_content_type(&mut state.draft.headers);
        }
    }
    state
}

fn ensure_json_content_type(headers: &mut Vec<HeaderEntry>) {
    if headers.iter().any(HeaderEntry::declares_json) {
        return;
    }

    match headers.iter_mut().find(|h| h.is_content_type()) {
        Some(existing) => *existing = HeaderEntry::new("Content-Type", "application/json"),
        None => headers.push(HeaderEntry::new("Content-Type", "application/json")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn apply(state: ClientState, actions: Vec<Action>) -> ClientState {
        actions.into_iter().fold(state, reduce)
    }

    fn ok_response() -> ResponseView {
        ResponseView {
            status: 200,
            status_text: "OK".to_string(),
            headers: Default::default(),
            data: json!({ "ok": true }),
            time: 12,
        }
    }

    #[test]
    fn test_header_editing() {
        let state = apply(
            ClientState::default(),
            vec![
                Action::UpdateHeader {
                    index: 0,
                    key: "Accept".into(),
                    value: "*/*".into(),
                },
                Action::AddHeader,
                Action::UpdateHeader {
                    index: 1,
                    key: "X-Trace".into(),
                    value: "on".into(),
                },
                Action::ToggleHeader(1),
                Action::RemoveHeader(0),
                // Out of range: ignored.
                Action::ToggleHeader(9),
                Action::RemoveHeader(9),
            ],
        );

        assert_eq!(state.draft.headers.len(), 1);
        assert_eq!(state.draft.headers[0].key, "X-Trace");
        assert!(!state.draft.headers[0].enabled);
    }

    #[test]
    fn test_send_lifecycle() {
        let state = apply(
            ClientState::default(),
            vec![Action::SetUrl("https://a.test".into()), Action::SendStarted],
        );
        assert!(state.is_loading);

        let snapshot = SavedQuery::snapshot(&state.draft, "1".into(), 1);
        let state = reduce(
            state,
            Action::SendSucceeded {
                response: ok_response(),
                snapshot,
            },
        );
        assert!(!state.is_loading);
        assert_eq!(state.response.as_ref().map(|r| r.status), Some(200));
        assert_eq!(state.recent.len(), 1);

        let state = reduce(state, Action::SendFailed("dns failure".into()));
        let response = state.response.clone().unwrap();
        assert!(response.is_failure());
        assert_eq!(response.data["details"], "dns failure");
        // Failures never touch the recent list.
        assert_eq!(state.recent.len(), 1);

        let state = reduce(state, Action::ClearResponse);
        assert!(state.response.is_none());
        assert_eq!(state.draft.url, "https://a.test");
    }

    #[test]
    fn test_load_saved_query_overwrites_draft() {
        let saved_draft = DraftRequest {
            method: HttpMethod::Patch,
            url: "https://a.test/users/1".into(),
            headers: vec![HeaderEntry::new("Authorization", "Bearer t")],
            body: "{\"name\":\"x\"}".into(),
        };
        let mut recent = RecentQueries::new();
        recent.record(SavedQuery::snapshot(&saved_draft, "42".into(), 42));

        let state = apply(
            ClientState::with_recent(recent),
            vec![
                Action::SetUrl("https://unsaved.test".into()),
                Action::SetBody("scratch".into()),
                Action::LoadSavedQuery("42".into()),
            ],
        );
        assert_eq!(state.draft, saved_draft);

        let state = reduce(state, Action::LoadSavedQuery("missing".into()));
        assert_eq!(state.draft, saved_draft);

        let state = reduce(state, Action::DeleteSavedQuery("42".into()));
        assert!(state.recent.is_empty());
    }

    #[test]
    fn test_generated_json_adds_content_type() {
        let state = reduce(
            ClientState::default(),
            Action::ApplyGeneratedJson("{\n  \"a\": 1\n}".into()),
        );
        assert_eq!(state.draft.body, "{\n  \"a\": 1\n}");
        assert_eq!(state.draft.headers.len(), 2);
        assert_eq!(
            state.draft.headers[1],
            HeaderEntry::new("Content-Type", "application/json")
        );
    }

    #[test]
    fn test_generated_json_rewrites_existing_content_type() {
        let mut disabled = HeaderEntry::new("content-type", "text/plain");
        disabled.enabled = false;
        let state = apply(
            ClientState::default(),
            vec![
                Action::SetHeaders(vec![HeaderEntry::new("Accept", "*/*"), disabled]),
                Action::ApplyGeneratedJson("[]".into()),
            ],
        );
        assert_eq!(state.draft.headers.len(), 2);
        assert_eq!(
            state.draft.headers[1],
            HeaderEntry::new("Content-Type", "application/json")
        );
    }

    #[test]
    fn test_generated_json_keeps_existing_json_header() {
        let headers = vec![HeaderEntry::new("CONTENT-TYPE", "application/json; charset=utf-8")];
        let state = apply(
            ClientState::default(),
            vec![
                Action::SetHeaders(headers.clone()),
                Action::ApplyGeneratedJson("{}".into()),
            ],
        );
        assert_eq!(state.draft.headers, headers);
    }
}
