//! In-memory chat backend doubles shared by the integration tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use tether_chat::backend::{
    ChannelState, ChatBackend, ChatConnector, ChatMember, ChatUser, MESSAGING, MessagePreview,
};
use tether_chat::error::ChatError;

#[derive(Default)]
pub struct MemoryBackend {
    pub channels: Mutex<HashMap<String, ChannelState>>,
    pub users: Mutex<HashMap<String, ChatUser>>,
    pub get_calls: AtomicUsize,
    pub create_calls: AtomicUsize,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, id: &str, name: &str) {
        self.users.lock().unwrap().insert(
            id.to_string(),
            ChatUser {
                id: id.to_string(),
                name: Some(name.to_string()),
                image: None,
            },
        );
    }

    /// Seed a channel directly, bypassing the create path.
    pub fn seed_channel(&self, channel: ChannelState) {
        self.channels
            .lock()
            .unwrap()
            .insert(channel.id.clone(), channel);
    }

    pub fn channel_count(&self) -> usize {
        self.channels.lock().unwrap().len()
    }
}

/// Convenience builder for seeded channel state.
pub fn channel(
    id: &str,
    members: &[(&str, Option<&str>)],
    last_message: Option<(&str, DateTime<Utc>)>,
    unread_count: u32,
) -> ChannelState {
    ChannelState {
        id: id.to_string(),
        channel_type: MESSAGING.to_string(),
        created_by_id: members[0].0.to_string(),
        members: members
            .iter()
            .map(|(user_id, name)| ChatMember {
                user_id: user_id.to_string(),
                user: name.map(|n| ChatUser {
                    id: user_id.to_string(),
                    name: Some(n.to_string()),
                    image: None,
                }),
            })
            .collect(),
        last_message: last_message.map(|(text, created_at)| MessagePreview {
            text: text.to_string(),
            created_at,
        }),
        last_message_at: last_message.map(|(_, created_at)| created_at),
        unread_count,
    }
}

#[async_trait]
impl ChatBackend for MemoryBackend {
    async fn get_channel(&self, channel_id: &str) -> Result<ChannelState, ChatError> {
        self.get_calls.fetch_add(1, Ordering::SeqCst);
        self.channels
            .lock()
            .unwrap()
            .get(channel_id)
            .cloned()
            .ok_or(ChatError::NotFound)
    }

    async fn create_channel(
        &self,
        channel_id: &str,
        members: &[String],
        created_by: &str,
    ) -> Result<ChannelState, ChatError> {
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().unwrap().clone();
        let mut channels = self.channels.lock().unwrap();
        if channels.contains_key(channel_id) {
            return Err(ChatError::Conflict);
        }
        let state = ChannelState {
            id: channel_id.to_string(),
            channel_type: MESSAGING.to_string(),
            created_by_id: created_by.to_string(),
            members: members
                .iter()
                .map(|id| ChatMember {
                    user_id: id.clone(),
                    user: users.get(id).cloned(),
                })
                .collect(),
            last_message: None,
            last_message_at: None,
            unread_count: 0,
        };
        channels.insert(channel_id.to_string(), state.clone());
        Ok(state)
    }

    async fn query_channels(
        &self,
        member_id: &str,
        limit: u32,
    ) -> Result<Vec<ChannelState>, ChatError> {
        let mut matched: Vec<ChannelState> = self
            .channels
            .lock()
            .unwrap()
            .values()
            .filter(|c| c.members.iter().any(|m| m.user_id == member_id))
            .cloned()
            .collect();
        // Backend contract: most recent message first.
        matched.sort_by(|a, b| b.last_message_at.cmp(&a.last_message_at));
        matched.truncate(limit as usize);
        Ok(matched)
    }

    async fn upsert_user(&self, user: &ChatUser) -> Result<(), ChatError> {
        self.users
            .lock()
            .unwrap()
            .insert(user.id.clone(), user.clone());
        Ok(())
    }
}

/// Connector double that counts calls and can be made slow or faulty.
#[derive(Default)]
pub struct CountingConnector {
    pub connects: AtomicUsize,
    pub disconnects: AtomicUsize,
    pub connect_delay: Option<Duration>,
    pub fail_disconnect: AtomicBool,
}

#[async_trait]
impl ChatConnector for CountingConnector {
    async fn connect(&self, _user: &ChatUser, _token: &str) -> Result<(), ChatError> {
        if let Some(delay) = self.connect_delay {
            tokio::time::sleep(delay).await;
        }
        self.connects.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self, _user_id: &str) -> Result<(), ChatError> {
        self.disconnects.fetch_add(1, Ordering::SeqCst);
        if self.fail_disconnect.load(Ordering::SeqCst) {
            return Err(ChatError::Api {
                status: 500,
                message: "backend hiccup".into(),
            });
        }
        Ok(())
    }
}
