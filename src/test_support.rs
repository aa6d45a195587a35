//! Scripted fakes shared by unit tests

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::{
    DepotDocument, DepotSource, Quality, TagDefinition, TagRecord, TagStore, TagWrite,
};
use crate::shared::{FetchError, StoreError, StoreResult};

/// How the fake store answers one `write` call
#[derive(Debug, Clone)]
pub enum WriteScript {
    AllGood,
    /// The first `n` items of the chunk come back bad
    BadFirst(usize),
    /// The call itself fails
    Fail,
}

/// Tag store whose answers are scripted per call; unscripted calls are all good
#[derive(Default)]
pub struct ScriptedTagStore {
    pub script: Mutex<VecDeque<WriteScript>>,
    pub writes: Mutex<Vec<Vec<TagWrite>>>,
    pub configured: Mutex<Vec<(String, TagDefinition)>>,
    pub fail_configure: bool,
}

impl ScriptedTagStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_script(script: impl IntoIterator<Item = WriteScript>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            ..Self::default()
        }
    }

    pub fn write_calls(&self) -> Vec<Vec<TagWrite>> {
        self.writes.lock().unwrap().clone()
    }

    pub fn chunk_sizes(&self) -> Vec<usize> {
        self.writes.lock().unwrap().iter().map(Vec::len).collect()
    }

    pub fn configured(&self) -> Vec<(String, TagDefinition)> {
        self.configured.lock().unwrap().clone()
    }
}

#[async_trait]
impl TagStore for ScriptedTagStore {
    async fn write(&self, writes: &[TagWrite]) -> StoreResult<Vec<Quality>> {
        self.writes.lock().unwrap().push(writes.to_vec());
        let step = self
            .script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(WriteScript::AllGood);
        match step {
            WriteScript::AllGood => Ok(vec![Quality::Good; writes.len()]),
            WriteScript::BadFirst(n) => Ok((0..writes.len())
                .map(|i| if i < n { Quality::BadNotFound } else { Quality::Good })
                .collect()),
            WriteScript::Fail => Err(StoreError::InvalidPath("scripted failure".to_string())),
        }
    }

    async fn configure(&self, parent: &str, definitions: &[TagDefinition]) -> StoreResult<()> {
        if self.fail_configure {
            return Err(StoreError::InvalidPath(parent.to_string()));
        }
        let mut configured = self.configured.lock().unwrap();
        for def in definitions {
            configured.push((parent.to_string(), def.clone()));
        }
        Ok(())
    }

    async fn browse(&self, _prefix: &str) -> StoreResult<Vec<TagRecord>> {
        Ok(Vec::new())
    }
}

/// Depot source returning a fixed document or a fixed HTTP status failure
pub enum FakeSource {
    Document(String),
    Status(u16),
}

#[async_trait]
impl DepotSource for FakeSource {
    async fn fetch(&self) -> Result<DepotDocument, FetchError> {
        match self {
            FakeSource::Document(body) => Ok(serde_json::from_str(body)?),
            FakeSource::Status(code) => Err(FetchError::Status(*code)),
        }
    }
}

/// `n` distinct writes with integer values
pub fn writes(n: usize) -> Vec<TagWrite> {
    (0..n)
        .map(|i| TagWrite::new(crate::domain::TagPath::new(format!("[default]T/Tag{}", i)), i as i64))
        .collect()
}
