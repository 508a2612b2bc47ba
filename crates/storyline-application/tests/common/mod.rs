#![allow(dead_code)]

use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use storyline_core::api::StoryApi;
use storyline_core::error::{Result, StoryError};
use storyline_core::session::Session;
use storyline_core::story::{NewStory, PhotoPayload, StoryDetail, StoryQuery, StorySummary};
use storyline_core::user::{Credentials, LoginResponse, LoginResult, Registration};

pub const PASSWORD: &str = "secret123";
pub const TOKEN: &str = "eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9.fake";

/// In-process stand-in for the story service that counts every call.
pub struct FakeStoryApi {
    stories: Vec<StorySummary>,
    calls: AtomicUsize,
    pub offline: AtomicBool,
    pub registered_emails: Mutex<Vec<String>>,
    pub seen_tokens: Mutex<Vec<String>>,
    pub seen_queries: Mutex<Vec<StoryQuery>>,
    pub uploads: Mutex<Vec<(Option<String>, NewStory)>>,
}

impl FakeStoryApi {
    pub fn with_stories(count: usize) -> Self {
        Self {
            stories: (0..count).map(story).collect(),
            calls: AtomicUsize::new(0),
            offline: AtomicBool::new(false),
            registered_emails: Mutex::new(vec!["taken@example.com".to_string()]),
            seen_tokens: Mutex::new(Vec::new()),
            seen_queries: Mutex::new(Vec::new()),
            uploads: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn enter(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.offline.load(Ordering::SeqCst) {
            return Err(StoryError::network("connection refused"));
        }
        Ok(())
    }

    fn check_token(&self, token: &str) -> Result<()> {
        self.seen_tokens.lock().unwrap().push(token.to_string());
        if token != TOKEN {
            return Err(StoryError::remote(401, "Invalid token"));
        }
        Ok(())
    }
}

#[async_trait]
impl StoryApi for FakeStoryApi {
    async fn register(&self, registration: &Registration) -> Result<String> {
        self.enter()?;
        let mut emails = self.registered_emails.lock().unwrap();
        if emails.contains(&registration.email) {
            return Err(StoryError::remote(400, "email already exists"));
        }
        emails.push(registration.email.clone());
        Ok("User created".to_string())
    }

    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.enter()?;
        if credentials.password != PASSWORD {
            return Err(StoryError::remote(401, "Invalid password"));
        }
        Ok(LoginResponse {
            message: "success".to_string(),
            login_result: LoginResult {
                user_id: "user-yj5pc_LARC_AgK61".to_string(),
                name: "Arif Faizin".to_string(),
                token: TOKEN.to_string(),
            },
        })
    }

    async fn list_stories(&self, token: &str, query: &StoryQuery) -> Result<Vec<StorySummary>> {
        self.enter()?;
        self.check_token(token)?;
        self.seen_queries.lock().unwrap().push(*query);

        let size = query.size.map(|s| s as usize).unwrap_or(self.stories.len());
        let page = query.page.unwrap_or(1) as usize;
        let start = (page - 1) * size;
        Ok(self
            .stories
            .iter()
            .skip(start)
            .take(size)
            .cloned()
            .collect())
    }

    async fn story_detail(&self, token: &str, id: &str) -> Result<StoryDetail> {
        self.enter()?;
        self.check_token(token)?;
        self.stories
            .iter()
            .find(|s| s.id == id)
            .map(|s| StoryDetail { summary: s.clone() })
            .ok_or_else(|| StoryError::remote(404, "Story not found"))
    }

    async fn upload_story(&self, token: &str, story: NewStory) -> Result<String> {
        self.enter()?;
        self.check_token(token)?;
        self.uploads
            .lock()
            .unwrap()
            .push((Some(token.to_string()), story));
        Ok("Story created successfully".to_string())
    }

    async fn upload_guest_story(&self, story: NewStory) -> Result<String> {
        self.enter()?;
        self.uploads.lock().unwrap().push((None, story));
        Ok("Story created successfully".to_string())
    }
}

pub fn story(n: usize) -> StorySummary {
    StorySummary {
        id: format!("story-{n:04}"),
        name: "Dimas".to_string(),
        description: format!("Story number {n}"),
        photo_url: format!("https://example.com/photos/{n}.jpg"),
        created_at: Utc.with_ymd_and_hms(2022, 1, 8, 6, 34, 18).unwrap(),
        lat: None,
        lon: None,
    }
}

pub fn logged_in_session() -> Session {
    Session {
        user_id: "user-yj5pc_LARC_AgK61".to_string(),
        name: "Arif Faizin".to_string(),
        email: "arif@example.com".to_string(),
        token: TOKEN.to_string(),
        is_logged_in: true,
    }
}

pub fn new_story() -> NewStory {
    NewStory::new(
        PhotoPayload {
            bytes: vec![0x89, 0x50, 0x4E, 0x47],
            file_name: "photo.png".to_string(),
            content_type: "image/png".to_string(),
        },
        "A day at the beach",
    )
}
