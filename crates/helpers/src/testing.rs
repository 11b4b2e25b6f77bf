//! In-memory service double for the helper tests

use async_trait::async_trait;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;

use tio_common::{
    EditorApi, Folder, FoldersApi, Scan, ScanCreated, ScanDetails, ScanDetailsInfo, ScanList,
    ScanSettings, ScanStatus, ScansApi, Session, SessionApi, Template, TemplateType,
    TenableIoError, TioResult,
};

#[derive(Default)]
struct State {
    templates: Vec<Template>,
    scans: Vec<Scan>,
    folder_scans: HashMap<i64, Vec<Scan>>,
    folders: Vec<Folder>,
    /// Queued statuses per scan; the last one repeats forever.
    statuses: HashMap<i64, VecDeque<ScanStatus>>,
    reported_ids: HashMap<i64, i64>,
    failing_stops: HashSet<i64>,
    failing_status: HashSet<i64>,
    session: Option<Session>,
    created: Vec<(String, ScanSettings)>,
    template_fetches: usize,
    events: Vec<String>,
}

#[derive(Default)]
pub struct MockTenable {
    state: Mutex<State>,
}

impl MockTenable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_templates(self, templates: Vec<Template>) -> Self {
        self.state.lock().unwrap().templates = templates;
        self
    }

    pub fn with_scans(self, scans: Vec<Scan>) -> Self {
        self.state.lock().unwrap().scans = scans;
        self
    }

    pub fn with_folder(self, folder: Folder, scans: Vec<Scan>) -> Self {
        {
            let mut state = self.state.lock().unwrap();
            state.folder_scans.insert(folder.id, scans);
            state.folders.push(folder);
        }
        self
    }

    pub fn with_statuses(self, id: i64, statuses: Vec<ScanStatus>) -> Self {
        self.state.lock().unwrap().statuses.insert(id, statuses.into());
        self
    }

    pub fn with_reported_id(self, requested: i64, reported: i64) -> Self {
        self.state.lock().unwrap().reported_ids.insert(requested, reported);
        self
    }

    pub fn failing_stop(self, id: i64) -> Self {
        self.state.lock().unwrap().failing_stops.insert(id);
        self
    }

    pub fn failing_status(self, id: i64) -> Self {
        self.state.lock().unwrap().failing_status.insert(id);
        self
    }

    pub fn with_session(self, session: Option<Session>) -> Self {
        self.state.lock().unwrap().session = session;
        self
    }

    pub fn events(&self) -> Vec<String> {
        self.state.lock().unwrap().events.clone()
    }

    pub fn count(&self, prefix: &str) -> usize {
        self.events().iter().filter(|e| e.starts_with(prefix)).count()
    }

    pub fn created(&self) -> Vec<(String, ScanSettings)> {
        self.state.lock().unwrap().created.clone()
    }

    pub fn template_fetches(&self) -> usize {
        self.state.lock().unwrap().template_fetches
    }
}

#[async_trait]
impl EditorApi for MockTenable {
    async fn list_templates(&self, kind: TemplateType) -> TioResult<Vec<Template>> {
        assert_eq!(kind, TemplateType::Scan);
        let mut state = self.state.lock().unwrap();
        state.template_fetches += 1;
        Ok(state.templates.clone())
    }
}

#[async_trait]
impl ScansApi for MockTenable {
    async fn create_scan(&self, template_uuid: &str, settings: &ScanSettings) -> TioResult<ScanCreated> {
        let mut state = self.state.lock().unwrap();
        state
            .created
            .push((template_uuid.to_string(), settings.clone()));
        Ok(ScanCreated {
            id: 100 + state.created.len() as i64,
            uuid: None,
            name: Some(settings.name.clone()),
        })
    }

    async fn scan_details(&self, id: i64) -> TioResult<ScanDetails> {
        let mut state = self.state.lock().unwrap();
        state.events.push(format!("status:{id}"));
        if state.failing_status.contains(&id) {
            return Err(TenableIoError::Api {
                status: 500,
                message: format!("scan {id} unavailable"),
            });
        }
        let status = match state.statuses.get_mut(&id) {
            Some(queue) if queue.len() > 1 => queue.pop_front().unwrap_or_default(),
            Some(queue) => queue.front().copied().unwrap_or_default(),
            None => return Err(TenableIoError::NotFound(format!("scans/{id}"))),
        };
        let object_id = state.reported_ids.get(&id).copied().unwrap_or(id);
        Ok(ScanDetails {
            info: ScanDetailsInfo {
                object_id,
                status,
                name: Some(format!("scan-{id}")),
                ..Default::default()
            },
            ..Default::default()
        })
    }

    async fn list_scans(&self, folder_id: Option<i64>) -> TioResult<ScanList> {
        let state = self.state.lock().unwrap();
        let scans = match folder_id {
            Some(folder) => state.folder_scans.get(&folder).cloned().unwrap_or_default(),
            None => state.scans.clone(),
        };
        Ok(ScanList::from_scans(scans))
    }

    async fn launch_scan(&self, id: i64, _alt_targets: Option<&[String]>) -> TioResult<String> {
        self.state.lock().unwrap().events.push(format!("launch:{id}"));
        Ok(format!("run-{id}"))
    }

    async fn stop_scan(&self, id: i64, force: bool) -> TioResult<()> {
        let mut state = self.state.lock().unwrap();
        state.events.push(format!("stop:{id}:{force}"));
        if state.failing_stops.contains(&id) {
            return Err(TenableIoError::Api {
                status: 409,
                message: "Scan is not active.".to_string(),
            });
        }
        Ok(())
    }

    async fn pause_scan(&self, id: i64) -> TioResult<()> {
        self.state.lock().unwrap().events.push(format!("pause:{id}"));
        Ok(())
    }

    async fn resume_scan(&self, id: i64) -> TioResult<()> {
        self.state.lock().unwrap().events.push(format!("resume:{id}"));
        Ok(())
    }

    async fn delete_scan(&self, id: i64) -> TioResult<()> {
        self.state.lock().unwrap().events.push(format!("delete:{id}"));
        Ok(())
    }
}

#[async_trait]
impl FoldersApi for MockTenable {
    async fn list_folders(&self) -> TioResult<Vec<Folder>> {
        Ok(self.state.lock().unwrap().folders.clone())
    }

    async fn create_folder(&self, name: &str) -> TioResult<i64> {
        let mut state = self.state.lock().unwrap();
        let id = 500 + state.folders.len() as i64;
        state.folders.push(folder(id, name));
        Ok(id)
    }

    async fn delete_folder(&self, id: i64) -> TioResult<()> {
        self.state.lock().unwrap().folders.retain(|f| f.id != id);
        Ok(())
    }
}

#[async_trait]
impl SessionApi for MockTenable {
    async fn active_session(&self) -> TioResult<Option<Session>> {
        Ok(self.state.lock().unwrap().session.clone())
    }
}

pub fn folder(id: i64, name: &str) -> Folder {
    Folder {
        id,
        name: name.to_string(),
        kind: Some("custom".to_string()),
        default_tag: None,
        custom: Some(1),
        unread_count: None,
    }
}
