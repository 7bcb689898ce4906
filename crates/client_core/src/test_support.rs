use std::{
    collections::VecDeque,
    sync::atomic::{AtomicUsize, Ordering},
    time::Duration,
};

use async_trait::async_trait;
use shared::{
    domain::{Address, Company, User, UserId},
    error::FetchError,
};
use tokio::sync::{oneshot, Mutex};

use crate::fetcher::UserFetcher;

pub(crate) type FetchResult = Result<Vec<User>, FetchError>;

pub(crate) fn user(id: i64, name: &str, email: &str, city: &str, company: &str) -> User {
    let handle = name.to_lowercase().replace(' ', "_");
    User {
        id: UserId(id),
        name: name.to_string(),
        email: email.to_string(),
        phone: format!("+51 900 000 {id:03}"),
        username: handle.clone(),
        website: format!("{}.example", handle.replace('_', "-")),
        address: Address {
            street: "Av. Arequipa 123".to_string(),
            suite: "Departamento 4B".to_string(),
            city: city.to_string(),
            zipcode: "15001".to_string(),
        },
        company: Company {
            name: company.to_string(),
            catch_phrase: "Soluciones tecnológicas innovadoras".to_string(),
            bs: "desarrollo-software".to_string(),
        },
    }
}

pub(crate) fn carlos() -> User {
    user(
        1,
        "Carlos Rodríguez",
        "carlos.rodriguez@email.com",
        "Lima",
        "Tech Solutions Perú",
    )
}

pub(crate) fn maria() -> User {
    user(
        2,
        "María García",
        "maria.garcia@email.com",
        "Arequipa",
        "Consultoría Andina",
    )
}

pub(crate) fn sample_users() -> Vec<User> {
    vec![
        carlos(),
        maria(),
        user(3, "Leanne Graham", "Sincere@april.biz", "Gwenborough", "Romaguera-Crona"),
        user(4, "Ervin Howell", "Shanna@melissa.tv", "Wisokyburgh", "Deckow-Crist"),
    ]
}

/// Answers each call with the next queued result, immediately.
pub(crate) struct ScriptedFetcher {
    results: Mutex<VecDeque<FetchResult>>,
    calls: AtomicUsize,
}

impl ScriptedFetcher {
    pub(crate) fn new(results: impl IntoIterator<Item = FetchResult>) -> Self {
        Self {
            results: Mutex::new(results.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserFetcher for ScriptedFetcher {
    async fn fetch_users(&self) -> FetchResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.results
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(FetchError::network("no scripted result left")))
    }
}

/// Each call parks until the test answers through the matching sender.
pub(crate) struct GatedFetcher {
    gates: Mutex<VecDeque<oneshot::Receiver<FetchResult>>>,
    started: AtomicUsize,
}

impl GatedFetcher {
    pub(crate) fn new(count: usize) -> (Self, Vec<oneshot::Sender<FetchResult>>) {
        let (senders, receivers): (Vec<_>, VecDeque<_>) =
            (0..count).map(|_| oneshot::channel()).unzip();
        (
            Self {
                gates: Mutex::new(receivers),
                started: AtomicUsize::new(0),
            },
            senders,
        )
    }

    /// Yields until `count` fetches have picked up their gate.
    pub(crate) async fn wait_until_started(&self, count: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.started.load(Ordering::SeqCst) < count {
                tokio::task::yield_now().await;
            }
        })
        .await
        .expect("fetch did not start in time");
    }
}

#[async_trait]
impl UserFetcher for GatedFetcher {
    async fn fetch_users(&self) -> FetchResult {
        let gate = self.gates.lock().await.pop_front();
        self.started.fetch_add(1, Ordering::SeqCst);
        match gate {
            Some(gate) => gate
                .await
                .unwrap_or_else(|_| Err(FetchError::network("gate dropped"))),
            None => Err(FetchError::network("no gate left")),
        }
    }
}
