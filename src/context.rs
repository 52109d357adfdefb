//! Everything one process needs, wired once from the configuration.

use crate::config::Config;
use crate::core::desk::{NotificationSettings, WorkOrderDesk};
use crate::core::diagnostics::{Diagnostics, diagnose};
use crate::core::preventive::PreventiveTaskRepository;
use crate::core::scheduler::{RecurrenceScheduler, SweepReport};
use crate::core::stats::Statistics;
use crate::core::work_orders::WorkOrderRepository;
use crate::db::{MemoryWorkbook, SqliteWorkbook, Workbook};
use crate::errors::{AppError, AppResult};
use crate::export::{ExportFormat, ExportLogic};
use crate::models::{
    NewPreventiveTask, NewWorkOrder, OperationResult, PreventiveTask, WorkOrder, WorkOrderChanges,
};
use crate::services::blob::{BlobStore, DirBlobStore};
use crate::services::notify::{LogNotifier, NotificationService, OutboxNotifier};
use crate::services::textgen::{
    ChecklistSuggestion, CommandTextGenerator, TextGenerationService, suggest_checklist,
};
use chrono::NaiveDate;
use std::path::Path;
use std::rc::Rc;

/// Overrides for the collaborators [`AppContext`] would otherwise build
/// from the configuration.
pub struct AppContextBuilder {
    config: Config,
    workbook: Option<Rc<dyn Workbook>>,
    blobs: Option<Box<dyn BlobStore>>,
    notifier: Option<Box<dyn NotificationService>>,
    generator: Option<Option<Box<dyn TextGenerationService>>>,
}

impl AppContextBuilder {
    pub fn workbook(mut self, workbook: Rc<dyn Workbook>) -> Self {
        self.workbook = Some(workbook);
        self
    }

    pub fn blob_store(mut self, blobs: Box<dyn BlobStore>) -> Self {
        self.blobs = Some(blobs);
        self
    }

    pub fn notifier(mut self, notifier: Box<dyn NotificationService>) -> Self {
        self.notifier = Some(notifier);
        self
    }

    /// `None` behaves as if no credential were configured.
    pub fn text_generator(mut self, generator: Option<Box<dyn TextGenerationService>>) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn build(self) -> AppResult<AppContext> {
        let config = self.config;
        let workbook = match self.workbook {
            Some(wb) => wb,
            None => open_workbook(&config.workbook)?,
        };

        let blobs = self
            .blobs
            .unwrap_or_else(|| Box::new(DirBlobStore::new(&config.blob_dir)));
        let notifier = self.notifier.unwrap_or_else(|| default_notifier(&config));
        let generator = self.generator.unwrap_or_else(|| default_generator(&config));

        let ttl = config.cache_ttl();
        let orders = WorkOrderRepository::open(Rc::clone(&workbook), ttl)?;
        let tasks = PreventiveTaskRepository::open(Rc::clone(&workbook), ttl)?;
        let settings = NotificationSettings {
            enabled: config.email_notifications,
            recipients: config.recipients(),
        };

        tracing::debug!(workbook = %workbook.location(), "context ready");
        Ok(AppContext {
            desk: WorkOrderDesk::new(orders, blobs, notifier, settings),
            tasks,
            generator,
            workbook,
            config,
        })
    }
}

fn open_workbook(path: &str) -> AppResult<Rc<dyn Workbook>> {
    let path = path.trim();
    if path.is_empty() {
        return Err(AppError::Config(
            "no workbook configured; run `hotelmaint config --set workbook <PATH>`".into(),
        ));
    }
    if let Some(parent) = Path::new(path).parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    Ok(Rc::new(SqliteWorkbook::open(path)?))
}

fn default_notifier(config: &Config) -> Box<dyn NotificationService> {
    if config.outbox.trim().is_empty() {
        Box::new(LogNotifier)
    } else {
        Box::new(OutboxNotifier::new(&config.outbox))
    }
}

fn default_generator(config: &Config) -> Option<Box<dyn TextGenerationService>> {
    if config.ai_api_key.trim().is_empty() {
        return None;
    }
    Some(Box::new(CommandTextGenerator::new(
        &config.ai_command,
        &config.ai_api_key,
    )))
}

pub struct AppContext {
    config: Config,
    workbook: Rc<dyn Workbook>,
    desk: WorkOrderDesk,
    tasks: PreventiveTaskRepository,
    generator: Option<Box<dyn TextGenerationService>>,
}

impl AppContext {
    pub fn builder(config: Config) -> AppContextBuilder {
        AppContextBuilder {
            config,
            workbook: None,
            blobs: None,
            notifier: None,
            generator: None,
        }
    }

    /// Open the workbook named by `config.workbook` and wire the services.
    pub fn open(config: Config) -> AppResult<Self> {
        Self::builder(config).build()
    }

    /// Context over a fresh in-memory workbook.
    pub fn in_memory(config: Config) -> AppResult<Self> {
        Self::builder(config)
            .workbook(Rc::new(MemoryWorkbook::new()))
            .build()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn workbook(&self) -> &Rc<dyn Workbook> {
        &self.workbook
    }

    pub fn work_orders(&mut self) -> &mut WorkOrderRepository {
        self.desk.orders()
    }

    pub fn preventive_tasks(&mut self) -> &mut PreventiveTaskRepository {
        &mut self.tasks
    }

    // ---------------------------
    // Work orders
    // ---------------------------

    pub fn create_work_order(&mut self, input: NewWorkOrder) -> OperationResult {
        self.desk.create(input)
    }

    pub fn update_work_order(&mut self, id: &str, changes: WorkOrderChanges) -> OperationResult {
        self.desk.update(id, changes)
    }

    pub fn pending_orders(&mut self) -> Vec<WorkOrder> {
        self.desk.orders().get_pending()
    }

    pub fn order_history(&mut self) -> Vec<WorkOrder> {
        self.desk.orders().get_history()
    }

    pub fn all_orders(&mut self) -> Vec<WorkOrder> {
        self.desk.orders().get_all()
    }

    pub fn order(&mut self, id: &str) -> Option<WorkOrder> {
        self.desk.orders().get_by_id(id)
    }

    // ---------------------------
    // Preventive tasks
    // ---------------------------

    pub fn create_preventive_task(&mut self, input: &NewPreventiveTask) -> OperationResult {
        self.tasks.create(input)
    }

    pub fn active_tasks(&mut self) -> Vec<PreventiveTask> {
        self.tasks.get_active()
    }

    pub fn all_tasks(&mut self) -> Vec<PreventiveTask> {
        self.tasks.get_all()
    }

    pub fn task(&mut self, id: &str) -> Option<PreventiveTask> {
        self.tasks.get_by_id(id)
    }

    pub fn deactivate_task(&mut self, id: &str) -> OperationResult {
        self.tasks.deactivate(id)
    }

    pub fn sweep(&mut self) -> SweepReport {
        RecurrenceScheduler::new(&mut self.desk, &mut self.tasks).sweep()
    }

    pub fn sweep_on(&mut self, today: NaiveDate) -> SweepReport {
        RecurrenceScheduler::new(&mut self.desk, &mut self.tasks).sweep_on(today)
    }

    pub fn generate_for_task(&mut self, task_id: &str) -> OperationResult {
        RecurrenceScheduler::new(&mut self.desk, &mut self.tasks).generate_for_task(task_id)
    }

    // ---------------------------
    // Reports
    // ---------------------------

    pub fn suggest_checklist(
        &self,
        sector: &str,
        location: &str,
        description: &str,
    ) -> ChecklistSuggestion {
        suggest_checklist(self.generator.as_deref(), sector, location, description)
    }

    pub fn statistics(&mut self) -> Statistics {
        Statistics::compute(&self.desk.orders().get_all_records())
    }

    pub fn export(&mut self, format: ExportFormat, file: Option<&Path>, force: bool) -> OperationResult {
        let records = self.desk.orders().get_all_records();
        let result = ExportLogic::export(&records, format, file, force)
            .map(|path| OperationResult::ok(None, format!("Exported: {}", path.display())));
        OperationResult::from_result("export work orders", result)
    }

    pub fn diagnose(&self) -> Diagnostics {
        diagnose(self.workbook.as_ref())
    }

    /// Report on the workbook named by `config` without opening the tables,
    /// so missing sheets stay missing.
    pub fn inspect(config: &Config) -> AppResult<Diagnostics> {
        let workbook = open_workbook(&config.workbook)?;
        Ok(diagnose(workbook.as_ref()))
    }

    /// Release the workbook and every service.
    pub fn close(self) {
        tracing::debug!(workbook = %self.workbook.location(), "context closed");
    }
}
