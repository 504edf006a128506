//! Drives `ClientState` through real side effects: relay calls, the wall
//! clock, and persistence of the recent-query list.

use chrono::Utc;
use std::time::Instant;

use super::history::RecentQueries;
use super::model::{ResponseView, SavedQuery};
use super::relay::RelayClient;
use super::state::{reduce, Action, ClientState};
use super::storage::KeyValueStore;
use super::ClientError;
use crate::proxy::ProxyRequest;

pub struct Session<R, S> {
    state: ClientState,
    relay: R,
    store: S,
}

impl<R, S> Session<R, S>
where
    R: RelayClient,
    S: KeyValueStore,
{
    /// Starts a session with the recent-query list read from `store`.
    pub fn new(relay: R, store: S) -> Result<Self, ClientError> {
        let recent = RecentQueries::load(&store)?;
        Ok(Self {
            state: ClientState::with_recent(recent),
            relay,
            store,
        })
    }

    pub fn state(&self) -> &ClientState {
        &self.state
    }

    pub fn relay(&self) -> &R {
        &self.relay
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Applies an action that needs no side effects beyond persistence.
    pub fn dispatch(&mut self, action: Action) -> Result<(), ClientError> {
        let touches_recent = matches!(action, Action::DeleteSavedQuery(_));
        self.apply(action);
        if touches_recent {
            self.state.recent.persist(&self.store)?;
        }
        Ok(())
    }

    fn apply(&mut self, action: Action) {
        let state = std::mem::take(&mut self.state);
        self.state = reduce(state, action);
    }

    /// The relay request the current draft would produce.
    pub fn outbound_request(&self) -> ProxyRequest {
        let draft = &self.state.draft;
        ProxyRequest {
            url: Some(draft.url.clone()),
            method: Some(draft.method.as_str().to_string()),
            headers: draft.outbound_headers(),
            body: draft.outbound_body().map(str::to_string),
        }
    }

    /// Sends the draft through the relay.
    ///
    /// Local validation failures are returned as errors and nothing is sent.
    /// Once dispatched, the outcome is always stored as the current response:
    /// the upstream's on success, the status-0 failure shape otherwise. Only
    /// a success snapshots the draft into the recent list.
    pub async fn send(&mut self) -> Result<ResponseView, ClientError> {
        self.state.draft.validate()?;

        let request = self.outbound_request();
        self.apply(Action::SendStarted);

        let started = Instant::now();
        let response = match self.relay.relay(request).await {
            Ok(envelope) => {
                let elapsed = started.elapsed().as_millis() as u64;
                let now = Utc::now().timestamp_millis();
                let snapshot = SavedQuery::snapshot(
                    &self.state.draft,
                    self.state.recent.next_id(now),
                    now,
                );
                let response = ResponseView::from_envelope(envelope, elapsed);

                self.apply(Action::SendSucceeded {
                    response: response.clone(),
                    snapshot,
                });

                if let Err(e) = self.state.recent.persist(&self.store) {
                    tracing::warn!("Failed to persist recent queries: {}", e);
                }
                response
            }
            Err(e) => {
                tracing::error!("Error making request: {}", e);
                let details = e.to_string();
                self.apply(Action::SendFailed(details.clone()));
                ResponseView::failure(details)
            }
        };

        Ok(response)
    }

    /// Asks the relay for a JSON body and merges it into the draft,
    /// pretty-printed.
    pub async fn generate_json(&mut self, description: &str) -> Result<(), ClientError> {
        if description.trim().is_empty() {
            return Err(ClientError::EmptyDescription);
        }

        let json = self.relay.generate_json(description.to_string()).await?;
        let value: serde_json::Value = serde_json::from_str(&json)?;
        let formatted = serde_json::to_string_pretty(&value)?;

        self.apply(Action::ApplyGeneratedJson(formatted));
        Ok(())
    }

    /// Replaces the draft with a saved snapshot, discarding unsaved edits.
    pub fn load_saved_query(&mut self, id: &str) -> Result<(), ClientError> {
        if self.state.recent.find(id).is_none() {
            return Err(ClientError::UnknownQuery(id.to_string()));
        }
        self.apply(Action::LoadSavedQuery(id.to_string()));
        Ok(())
    }

    pub fn delete_saved_query(&mut self, id: &str) -> Result<(), ClientError> {
        if self.state.recent.find(id).is_none() {
            return Err(ClientError::UnknownQuery(id.to_string()));
        }
        self.dispatch(Action::DeleteSavedQuery(id.to_string()))
    }

    pub fn clear_response(&mut self) {
        self.apply(Action::ClearResponse);
    }
}
