//! Per-screen state shared by every dashboard.
//!
//! A screen is mounted by fetching its records (a failed fetch renders as
//! empty), may open one record in an edit dialog, and runs at most one save
//! at a time. Saves update local records optimistically and then re-fetch.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::Serialize;
use tokio::sync::Mutex;

use crate::api::FetchError;
use crate::error::{AppError, AppResult};
use crate::models::Keyed;

pub const EMPTY_MESSAGE: &str = "Không có dữ liệu";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "phase", content = "key", rename_all = "lowercase")]
pub enum Phase {
    Loading,
    Ready,
    Empty,
    Editing(String),
}

#[derive(Debug)]
pub struct Screen<R> {
    phase: Phase,
    records: Vec<R>,
    saving: Arc<AtomicBool>,
}

impl<R> Default for Screen<R> {
    fn default() -> Self {
        Self {
            phase: Phase::Loading,
            records: Vec::new(),
            saving: Arc::new(AtomicBool::new(false)),
        }
    }
}

impl<R: Clone> Screen<R> {
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn records(&self) -> &[R] {
        &self.records
    }

    pub fn is_saving(&self) -> bool {
        self.saving.load(Ordering::Acquire)
    }

    pub fn begin_loading(&mut self) {
        self.phase = Phase::Loading;
    }

    /// Replace the records and settle into Ready or Empty.
    pub fn loaded(&mut self, records: Vec<R>) {
        self.records = records;
        self.settle();
    }

    fn settle(&mut self) {
        self.phase = if self.records.is_empty() {
            Phase::Empty
        } else {
            Phase::Ready
        };
    }

    /// Open the edit dialog on the record with `key`.
    pub fn begin_edit(&mut self, key: &str) -> AppResult<R>
    where
        R: Keyed,
    {
        match self.phase {
            Phase::Ready => {}
            Phase::Editing(ref open) => {
                return Err(AppError::Conflict(format!("Record {open} is already being edited")))
            }
            _ => return Err(AppError::Conflict("Nothing loaded to edit".into())),
        }

        let record = self
            .records
            .iter()
            .find(|r| r.key() == key)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("No record {key}")))?;

        self.phase = Phase::Editing(key.to_string());
        Ok(record)
    }

    /// Close the edit dialog without touching the server.
    pub fn cancel_edit(&mut self) {
        if matches!(self.phase, Phase::Editing(_)) {
            self.settle();
        }
    }
}

/// A dashboard rendered as either data or the "no data" placeholder.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Rendered<V> {
    Ready { data: V },
    Empty { message: &'static str },
}

impl<V> Rendered<V> {
    pub fn from_records<R>(records: &[R], derive: impl FnOnce(&[R]) -> V) -> Self {
        if records.is_empty() {
            Rendered::Empty {
                message: EMPTY_MESSAGE,
            }
        } else {
            Rendered::Ready {
                data: derive(records),
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Rendered::Empty { .. })
    }
}

/// Log a failed list fetch and carry on with no records.
pub fn or_empty<R>(result: Result<Vec<R>, FetchError>, what: &str) -> Vec<R> {
    match result {
        Ok(records) => records,
        Err(e) => {
            tracing::error!(error = %e, resource = what, "Fetch failed, rendering empty");
            Vec::new()
        }
    }
}

/// Mount a screen: fetch, store, derive.
pub async fn mount<R, V, Fut, D>(
    screen: &Mutex<Screen<R>>,
    what: &str,
    fetch: Fut,
    derive: D,
) -> Rendered<V>
where
    R: Clone,
    Fut: Future<Output = Result<Vec<R>, FetchError>>,
    D: FnOnce(&[R]) -> V,
{
    screen.lock().await.begin_loading();

    let records = or_empty(fetch.await, what);

    let mut screen = screen.lock().await;
    screen.loaded(records);
    Rendered::from_records(screen.records(), derive)
}

/// Find a loaded record, re-mounting the screen once if it is not there.
pub async fn find_or_reload<R, P, Fut>(
    screen: &Mutex<Screen<R>>,
    what: &str,
    matches: P,
    reload: Fut,
) -> Option<R>
where
    R: Clone,
    P: Fn(&R) -> bool,
    Fut: Future<Output = Result<Vec<R>, FetchError>>,
{
    if let Some(found) = screen.lock().await.records().iter().find(|r| matches(*r)).cloned() {
        return Some(found);
    }

    let records = or_empty(reload.await, what);
    let mut screen = screen.lock().await;
    screen.loaded(records);
    screen.records().iter().find(|r| matches(*r)).cloned()
}

/// The right to run the one save a screen allows. Released on drop, so a
/// save abandoned mid-flight frees the screen as well.
#[derive(Debug)]
pub struct SaveSlot {
    saving: Arc<AtomicBool>,
}

impl Drop for SaveSlot {
    fn drop(&mut self) {
        self.saving.store(false, Ordering::Release);
    }
}

/// Take the screen's save slot, or 409 while another save holds it.
pub async fn claim<R>(screen: &Mutex<Screen<R>>) -> AppResult<SaveSlot> {
    let saving = screen.lock().await.saving.clone();
    if saving
        .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
        .is_err()
    {
        return Err(AppError::Conflict("A save is already in progress".into()));
    }
    Ok(SaveSlot { saving })
}

/// Run one save against the backend.
///
/// * Refused with 409 while another save on the same screen is in flight.
/// * On failure the screen stays where it was (an open dialog stays open).
/// * On success `optimistic` is applied, any dialog closes, and `refetch`
///   reconciles with the server. A failed refetch keeps the optimistic records.
pub async fn save<R, CallFut, RefetchFut, O>(
    screen: &Mutex<Screen<R>>,
    what: &str,
    call: CallFut,
    optimistic: O,
    refetch: RefetchFut,
) -> AppResult<Vec<R>>
where
    R: Clone,
    CallFut: Future<Output = Result<(), FetchError>>,
    RefetchFut: Future<Output = Result<Vec<R>, FetchError>>,
    O: FnOnce(&mut Vec<R>),
{
    let slot = claim(screen).await?;
    commit(screen, slot, what, call, optimistic, refetch).await
}

/// The body of [`save`] for a caller that already holds the slot, e.g. one
/// that must read current state before building the write.
pub async fn commit<R, CallFut, RefetchFut, O>(
    screen: &Mutex<Screen<R>>,
    _slot: SaveSlot,
    what: &str,
    call: CallFut,
    optimistic: O,
    refetch: RefetchFut,
) -> AppResult<Vec<R>>
where
    R: Clone,
    CallFut: Future<Output = Result<(), FetchError>>,
    RefetchFut: Future<Output = Result<Vec<R>, FetchError>>,
    O: FnOnce(&mut Vec<R>),
{
    if let Err(e) = call.await {
        tracing::error!(error = %e, resource = what, "Save failed");
        return Err(AppError::Upstream(e));
    }

    {
        let mut screen = screen.lock().await;
        optimistic(&mut screen.records);
        screen.settle();
    }

    let fetched = refetch.await;

    let mut screen = screen.lock().await;
    match fetched {
        Ok(records) => screen.records = records,
        Err(e) => {
            tracing::warn!(error = %e, resource = what, "Refresh after save failed, keeping local changes");
        }
    }
    screen.settle();
    Ok(screen.records.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    #[derive(Debug, Clone, PartialEq)]
    struct Item {
        id: u32,
        value: i32,
    }

    impl Keyed for Item {
        fn key(&self) -> String {
            self.id.to_string()
        }
    }

    fn failure() -> FetchError {
        FetchError::Status {
            status: 500,
            body: "boom".into(),
        }
    }

    #[tokio::test]
    async fn test_mount_ready_and_empty() {
        let screen = Mutex::new(Screen::default());
        let rendered = mount(&screen, "items", async { Ok(vec![Item { id: 1, value: 2 }]) }, |items: &[Item]| items.len()).await;
        assert!(matches!(rendered, Rendered::Ready { data: 1 }));
        assert_eq!(screen.lock().await.phase(), &Phase::Ready);

        let rendered = mount(&screen, "items", async { Ok(Vec::<Item>::new()) }, |items: &[Item]| items.len()).await;
        assert!(rendered.is_empty());
        assert_eq!(screen.lock().await.phase(), &Phase::Empty);
    }

    #[tokio::test]
    async fn test_failed_fetch_renders_empty() {
        let screen: Mutex<Screen<Item>> = Mutex::new(Screen::default());
        let rendered = mount(&screen, "items", async { Err(failure()) }, |items: &[Item]| items.len()).await;
        assert!(rendered.is_empty());
    }

    #[tokio::test]
    async fn test_edit_and_cancel() {
        let mut screen = Screen::default();
        screen.loaded(vec![Item { id: 1, value: 2 }]);

        let draft = screen.begin_edit("1").unwrap();
        assert_eq!(draft.value, 2);
        assert_eq!(screen.phase(), &Phase::Editing("1".into()));
        assert!(matches!(screen.begin_edit("1"), Err(AppError::Conflict(_))));

        screen.cancel_edit();
        assert_eq!(screen.phase(), &Phase::Ready);
        assert!(matches!(screen.begin_edit("9"), Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_failed_save_keeps_dialog_open() {
        let screen = Mutex::new(Screen::default());
        {
            let mut s = screen.lock().await;
            s.loaded(vec![Item { id: 1, value: 2 }]);
            s.begin_edit("1").unwrap();
        }

        let result = save(
            &screen,
            "items",
            async { Err(failure()) },
            |items: &mut Vec<Item>| items[0].value = 5,
            async { Ok(vec![]) },
        )
        .await;

        assert!(matches!(result, Err(AppError::Upstream(_))));
        let s = screen.lock().await;
        assert_eq!(s.phase(), &Phase::Editing("1".into()));
        assert_eq!(s.records()[0].value, 2);
        assert!(!s.is_saving());
    }

    #[tokio::test]
    async fn test_successful_save_reconciles() {
        let screen = Mutex::new(Screen::default());
        screen.lock().await.loaded(vec![Item { id: 1, value: 2 }]);

        let records = save(
            &screen,
            "items",
            async { Ok(()) },
            |items: &mut Vec<Item>| items[0].value = 5,
            async { Ok(vec![Item { id: 1, value: 6 }]) },
        )
        .await
        .unwrap();
        assert_eq!(records, vec![Item { id: 1, value: 6 }]);
    }

    #[tokio::test]
    async fn test_failed_refetch_keeps_optimistic_records() {
        let screen = Mutex::new(Screen::default());
        screen.lock().await.loaded(vec![Item { id: 1, value: 2 }]);

        let records = save(
            &screen,
            "items",
            async { Ok(()) },
            |items: &mut Vec<Item>| items[0].value = 5,
            async { Err(failure()) },
        )
        .await
        .unwrap();
        assert_eq!(records[0].value, 5);
    }

    #[tokio::test]
    async fn test_second_save_refused_while_in_flight() {
        let screen = Arc::new(Mutex::new(Screen::default()));
        screen.lock().await.loaded(vec![Item { id: 1, value: 2 }]);

        let (release_tx, release_rx) = tokio::sync::oneshot::channel::<()>();
        let calls = Arc::new(AtomicUsize::new(0));

        let first = {
            let screen = screen.clone();
            let calls = calls.clone();
            tokio::spawn(async move {
                save(
                    &screen,
                    "items",
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        let _ = release_rx.await;
                        Ok(())
                    },
                    |_: &mut Vec<Item>| {},
                    async { Ok(vec![Item { id: 1, value: 3 }]) },
                )
                .await
            })
        };

        // Wait until the first save holds the slot.
        while !screen.lock().await.is_saving() {
            tokio::task::yield_now().await;
        }

        let second = save(
            &screen,
            "items",
            async { Ok(()) },
            |_: &mut Vec<Item>| {},
            async { Ok(vec![]) },
        )
        .await;
        assert!(matches!(second, Err(AppError::Conflict(_))));

        release_tx.send(()).unwrap();
        let first = first.await.unwrap().unwrap();
        assert_eq!(first[0].value, 3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_abandoned_save_frees_the_screen() {
        let screen = Mutex::new(Screen::default());
        screen.lock().await.loaded(vec![Item { id: 1, value: 2 }]);

        let abandoned = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            save(
                &screen,
                "items",
                std::future::pending::<Result<(), FetchError>>(),
                |_: &mut Vec<Item>| {},
                async { Ok(vec![]) },
            ),
        )
        .await;
        assert!(abandoned.is_err());
        assert!(!screen.lock().await.is_saving());

        let records = save(
            &screen,
            "items",
            async { Ok(()) },
            |items: &mut Vec<Item>| items[0].value = 5,
            async { Ok(vec![Item { id: 1, value: 6 }]) },
        )
        .await
        .unwrap();
        assert_eq!(records[0].value, 6);
    }

    #[tokio::test]
    async fn test_claimed_slot_blocks_save_until_released() {
        let screen: Mutex<Screen<Item>> = Mutex::new(Screen::default());

        let slot = claim(&screen).await.unwrap();
        assert!(matches!(claim(&screen).await, Err(AppError::Conflict(_))));

        drop(slot);
        assert!(claim(&screen).await.is_ok());
    }
}
