//! Application state and the products/firms/users/commands screens.

use std::time::{Duration, Instant};

use admin_lib::AdminClient;
use admin_lib::ProductSource;
use admin_lib::columns::{firm_columns, product_columns, user_columns};
use admin_lib::model::{
    FirmSummary, Job, JobSchedule, ProductWithBarcodes, Session, SyncCounts, UserSummary,
};
use log::{debug, info, warn};
use pagetable::{
    ClientPagedTable, MutationMode, PageData, PageRequest, PageSource, PagedTable,
    PaginationState, RowActions, SelectionStore, ServerPagedTable, SortState, TableAction,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::config::LISTING_PAGE_SIZE;
use crate::form::FirmForm;
use crate::keys::{Command, Focus};
use crate::toast::Toasts;

pub const PRODUCTS_ERROR: &str = "Ürünler getirilirken bir hata ile karşılaşıldı";
pub const FIRM_DELETED: &str = "Firma başarıyla silindi";
pub const FIRM_UPDATED: &str = "Firma güncellendi";
pub const FIRM_UPDATED_DETAIL: &str = "Firma bilgileri başarıyla kaydedildi.";
pub const SYNC_DONE: &str = "Ürünler başarıyla getirildi";

/// Quiet period between the last schedule edit and the save.
pub const JOB_SAVE_DELAY: Duration = Duration::from_millis(500);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Products,
    Firms,
    Users,
    Commands,
}

impl Screen {
    pub const ALL: [Screen; 4] = [
        Screen::Products,
        Screen::Firms,
        Screen::Users,
        Screen::Commands,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Self::Products => "Ürünler",
            Self::Firms => "Firmalar",
            Self::Users => "Kullanıcılar",
            Self::Commands => "Komutlar",
        }
    }

    fn next(self) -> Self {
        match self {
            Self::Products => Self::Firms,
            Self::Firms => Self::Users,
            Self::Users => Self::Commands,
            Self::Commands => Self::Products,
        }
    }
}

/// Messages from table callbacks and background tasks.
#[derive(Debug)]
pub enum AppEvent {
    Paginate(PaginationState),
    Sort(SortState),
    Search(Option<String>),
    ProductsLoaded {
        generation: u64,
        page: PageData<ProductWithBarcodes>,
        error: Option<String>,
    },
    FirmsLoaded(Result<Vec<FirmSummary>, String>),
    UsersLoaded(Result<Vec<UserSummary>, String>),
    FirmDeleted {
        id: i64,
        result: Result<String, String>,
    },
    FirmUpdated {
        id: i64,
        result: Result<FirmSummary, String>,
    },
    SyncFinished(Result<SyncCounts, String>),
    JobLoaded(Result<Option<Job>, String>),
    JobSaved(Result<Option<Job>, String>),
}

/// Progress of the last schedule save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SaveState {
    #[default]
    Idle,
    Saving,
    Saved,
}

impl SaveState {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "",
            Self::Saving => "Kaydediliyor...",
            Self::Saved => "Kaydedildi",
        }
    }
}

/// Remote side of the app. Absent in tests.
#[derive(Debug, Clone)]
pub struct Backend {
    pub client: AdminClient,
    pub session: Session,
}

/// Products query state owned by the page, pushed into the table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQueryState {
    pub pagination: PaginationState,
    pub sorting: SortState,
    pub search: Option<String>,
}

pub struct App {
    pub screen: Screen,
    focus: Focus,
    cursor: usize,
    quit: bool,

    pub products: ServerPagedTable<ProductWithBarcodes>,
    product_query: ProductQueryState,
    /// Bumped on every products request; older responses are dropped.
    generation: u64,
    loading: bool,

    pub firms: ClientPagedTable<FirmSummary>,
    pub users: ClientPagedTable<UserSummary>,
    pub selection: SelectionStore<i64>,
    firm_actions: RowActions<FirmSummary, i64>,
    deleting: bool,
    form: Option<FirmForm>,
    updating: bool,

    job: Option<Job>,
    schedule: JobSchedule,
    job_save: SaveState,
    /// When the pending schedule edit is saved.
    job_save_due: Option<Instant>,
    syncing: bool,

    pub toasts: Toasts,
    backend: Option<Backend>,
    events: UnboundedSender<AppEvent>,
}

impl App {
    pub fn new(
        page_size: usize,
        backend: Option<Backend>,
        events: UnboundedSender<AppEvent>,
    ) -> Self {
        let pagination = PaginationState::new(page_size);
        let products = ServerPagedTable::new(product_columns(), pagination);

        let tx = events.clone();
        products.on_paginate(move |p| {
            let _ = tx.send(AppEvent::Paginate(p));
        });
        let tx = events.clone();
        products.on_sort(move |s| {
            let _ = tx.send(AppEvent::Sort(s));
        });
        let tx = events.clone();
        products.on_search(move |q| {
            let _ = tx.send(AppEvent::Search(q));
        });

        let selection = SelectionStore::new();
        let firm_actions = RowActions::new(selection.clone(), |f: &FirmSummary| f.id);
        let firms = ClientPagedTable::new(firm_columns(&firm_actions), Vec::new())
            .with_page_size(LISTING_PAGE_SIZE);
        let users =
            ClientPagedTable::new(user_columns(), Vec::new()).with_page_size(LISTING_PAGE_SIZE);

        Self {
            screen: Screen::Products,
            focus: Focus::Table,
            cursor: 0,
            quit: false,
            products,
            product_query: ProductQueryState {
                pagination,
                sorting: SortState::none(),
                search: None,
            },
            generation: 0,
            loading: false,
            firms,
            users,
            selection,
            firm_actions,
            deleting: false,
            form: None,
            updating: false,
            job: None,
            schedule: JobSchedule::default(),
            job_save: SaveState::Idle,
            job_save_due: None,
            syncing: false,
            toasts: Toasts::default(),
            backend,
            events,
        }
    }

    /// Initial fetches.
    pub fn start(&mut self) {
        self.refresh_products();
        self.load_listings();
        self.load_job();
    }

    pub fn should_quit(&self) -> bool {
        self.quit
    }

    pub fn session(&self) -> Option<&Session> {
        self.backend.as_ref().map(|b| &b.session)
    }

    /// Effective focus: a pending delete or edit always takes the keyboard.
    pub fn focus(&self) -> Focus {
        match self.selection.mutation_mode() {
            Some(MutationMode::Delete) => Focus::Confirm,
            Some(MutationMode::Update) if self.form.is_some() => Focus::EditForm,
            _ => self.focus,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn product_query(&self) -> &ProductQueryState {
        &self.product_query
    }

    pub fn form(&self) -> Option<&FirmForm> {
        self.form.as_ref()
    }

    pub fn is_updating(&self) -> bool {
        self.updating
    }

    pub fn job(&self) -> Option<&Job> {
        self.job.as_ref()
    }

    pub fn schedule(&self) -> JobSchedule {
        self.schedule
    }

    pub fn job_save(&self) -> SaveState {
        self.job_save
    }

    pub fn is_syncing(&self) -> bool {
        self.syncing
    }

    /// The table behind the current screen. The commands screen has none.
    pub fn table(&self) -> Option<&dyn PagedTable> {
        match self.screen {
            Screen::Products => Some(&self.products),
            Screen::Firms => Some(&self.firms),
            Screen::Users => Some(&self.users),
            Screen::Commands => None,
        }
    }

    fn dispatch(&self, action: TableAction) -> bool {
        self.table().is_some_and(|t| t.dispatch(action))
    }

    fn visible_len(&self) -> usize {
        self.table().map_or(0, |t| t.view().row_len())
    }

    fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.visible_len().saturating_sub(1));
    }

    /// Firm under the cursor, if the firms screen is showing one.
    pub fn selected_firm(&self) -> Option<FirmSummary> {
        if self.screen != Screen::Firms {
            return None;
        }
        self.firms.visible_rows().get(self.cursor).cloned()
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    pub fn handle_command(&mut self, command: Command) {
        debug!("command: {:?}", command);
        match command {
            Command::Quit => self.quit = true,
            Command::NextScreen => {
                self.screen = self.screen.next();
                self.cursor = 0;
            }
            Command::NextPage => {
                self.dispatch(TableAction::NextPage);
                self.cursor = 0;
            }
            Command::PreviousPage => {
                self.dispatch(TableAction::PreviousPage);
                self.cursor = 0;
            }
            Command::ToggleSort(position) => {
                let id = self.table().and_then(|t| t.column_ids().get(position).cloned());
                if let Some(id) = id {
                    self.dispatch(TableAction::ToggleSort(id));
                }
            }
            Command::FocusPageInput => {
                if let Some(table) = self.table() {
                    table.set_page_input("");
                    self.focus = Focus::PageInput;
                }
            }
            Command::PageChar(c) => {
                if let Some(table) = self.table() {
                    let text = format!("{}{}", table.page_input(), c);
                    table.dispatch(TableAction::EditPageInput(text));
                }
            }
            Command::PageBackspace => {
                if let Some(table) = self.table() {
                    let mut text = table.page_input();
                    text.pop();
                    table.dispatch(TableAction::EditPageInput(text));
                }
            }
            Command::CommitPage => {
                self.dispatch(TableAction::CommitPageInput);
                self.focus = Focus::Table;
                self.clamp_cursor();
            }
            Command::FocusSearch => {
                if self.screen == Screen::Products {
                    self.focus = Focus::Search;
                }
            }
            Command::SearchChar(c) => {
                let text = format!("{}{}", self.products.search_input(), c);
                self.products.dispatch(TableAction::Search(text));
            }
            Command::SearchBackspace => {
                let mut text = self.products.search_input();
                text.pop();
                self.products.dispatch(TableAction::Search(text));
            }
            Command::LeaveSearch => self.focus = Focus::Table,
            Command::CursorUp => self.cursor = self.cursor.saturating_sub(1),
            Command::CursorDown => {
                self.cursor += 1;
                self.clamp_cursor();
            }
            Command::Edit => {
                if let Some(firm) = self.selected_firm() {
                    self.firm_actions.edit(&firm);
                    self.form = Some(FirmForm::for_firm(&firm));
                }
            }
            Command::Delete => {
                if let Some(firm) = self.selected_firm() {
                    self.firm_actions.delete(&firm);
                }
            }
            Command::ConfirmYes => self.delete_selected_firm(),
            Command::ConfirmNo => {
                if !self.deleting {
                    self.selection.clear();
                    self.form = None;
                }
            }
            Command::FormChar(c) => self.with_form(|form| form.push(c)),
            Command::FormBackspace => self.with_form(FirmForm::backspace),
            Command::FormNext => self.with_form(FirmForm::next),
            Command::FormPrevious => self.with_form(FirmForm::previous),
            Command::FormSubmit => self.submit_form(),
            Command::FormCancel => {
                if !self.updating {
                    self.selection.clear();
                    self.form = None;
                }
            }
            Command::RunSync => {
                if self.screen == Screen::Commands {
                    self.run_sync();
                }
            }
            Command::FrequencyUp => {
                self.edit_schedule(|s| s.frequency = s.frequency.saturating_add(1));
            }
            Command::FrequencyDown => {
                self.edit_schedule(|s| s.frequency = s.frequency.saturating_sub(1).max(1));
            }
            Command::CycleUnit => self.edit_schedule(|s| s.unit = s.unit.next()),
        }
    }

    fn with_form(&mut self, edit: impl FnOnce(&mut FirmForm)) {
        if !self.updating
            && let Some(form) = &mut self.form
        {
            edit(form);
        }
    }

    /// Change the schedule and push the save back by [`JOB_SAVE_DELAY`].
    fn edit_schedule(&mut self, edit: impl FnOnce(&mut JobSchedule)) {
        if self.screen != Screen::Commands {
            return;
        }
        edit(&mut self.schedule);
        self.job_save_due = Some(Instant::now() + JOB_SAVE_DELAY);
    }

    // -------------------------------------------------------------------------
    // Timers
    // -------------------------------------------------------------------------

    /// The next instant [`tick`](Self::tick) has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        match (self.toasts.next_expiry(), self.job_save_due) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        }
    }

    /// Expire toasts and save a schedule whose quiet period is over.
    pub fn tick(&mut self, now: Instant) {
        self.toasts.prune(now);
        if let Some(due) = self.job_save_due
            && due <= now
        {
            self.job_save_due = None;
            self.save_job();
        }
    }

    // -------------------------------------------------------------------------
    // Events
    // -------------------------------------------------------------------------

    pub fn handle_event(&mut self, event: AppEvent) {
        let now = Instant::now();
        match event {
            AppEvent::Paginate(pagination) => {
                self.product_query.pagination = pagination;
                self.products.set_pagination(pagination);
                self.refresh_products();
            }
            AppEvent::Sort(sorting) => {
                self.product_query.sorting = sorting.clone();
                self.products.set_sorting(sorting);
                self.reset_product_page();
                self.refresh_products();
            }
            AppEvent::Search(search) => {
                info!("product search: {:?}", search);
                self.product_query.search = search;
                self.reset_product_page();
                self.refresh_products();
            }
            AppEvent::ProductsLoaded {
                generation,
                page,
                error,
            } => {
                if generation != self.generation {
                    debug!(
                        "dropping stale products response {} (current {})",
                        generation, self.generation
                    );
                    return;
                }
                self.loading = false;
                if let Some(error) = error {
                    warn!("products fetch failed: {}", error);
                    self.toasts.error(PRODUCTS_ERROR, now);
                }
                self.products.set_page(page.rows, page.row_count);
                self.clamp_cursor();
            }
            AppEvent::FirmsLoaded(Ok(firms)) => {
                self.firms.set_rows(firms);
                self.clamp_cursor();
            }
            AppEvent::UsersLoaded(Ok(users)) => {
                self.users.set_rows(users);
                self.clamp_cursor();
            }
            AppEvent::FirmsLoaded(Err(error)) | AppEvent::UsersLoaded(Err(error)) => {
                self.toasts.error(error, now);
            }
            AppEvent::FirmDeleted { id, result } => {
                self.deleting = false;
                match result {
                    Ok(_) => {
                        self.firms.retain(|f| f.id != id);
                        self.selection.clear();
                        self.toasts.info(FIRM_DELETED, now);
                        self.clamp_cursor();
                    }
                    Err(error) => self.toasts.error(error, now),
                }
            }
            AppEvent::FirmUpdated { id, result } => {
                self.updating = false;
                match result {
                    Ok(firm) => {
                        if !self.firms.replace_where(|f| f.id == id, firm) {
                            debug!("updated firm {} not in listing", id);
                        }
                        self.selection.clear();
                        self.form = None;
                        self.toasts.info_with(FIRM_UPDATED, FIRM_UPDATED_DETAIL, now);
                    }
                    Err(error) => self.toasts.error(error, now),
                }
            }
            AppEvent::SyncFinished(result) => {
                self.syncing = false;
                match result {
                    Ok(counts) => {
                        info!("product sync: {:?}", counts);
                        self.toasts.info_with(SYNC_DONE, counts.summary(), now);
                        self.load_job();
                        self.refresh_products();
                    }
                    Err(error) => self.toasts.error(error, now),
                }
            }
            AppEvent::JobLoaded(Ok(job)) => {
                // A pending edit wins over the stored schedule.
                if self.job_save_due.is_none()
                    && let Some(job) = &job
                {
                    self.schedule = job.schedule();
                }
                self.job = job;
            }
            AppEvent::JobSaved(Ok(job)) => {
                self.job_save = SaveState::Saved;
                if job.is_some() {
                    self.job = job;
                }
            }
            AppEvent::JobLoaded(Err(error)) => self.toasts.error(error, now),
            AppEvent::JobSaved(Err(error)) => {
                self.job_save = SaveState::Idle;
                self.toasts.error(error, now);
            }
        }
    }

    fn reset_product_page(&mut self) {
        let pagination = self.product_query.pagination.with_page_index(0);
        self.product_query.pagination = pagination;
        self.products.set_pagination(pagination);
    }

    // -------------------------------------------------------------------------
    // Background work
    // -------------------------------------------------------------------------

    /// Fetch the products page for the current query.
    pub fn refresh_products(&mut self) {
        self.generation += 1;
        self.cursor = 0;
        let Some(backend) = &self.backend else { return };
        self.loading = true;

        let generation = self.generation;
        let source = ProductSource::new(backend.client.clone(), &backend.session.server_code);
        let request = PageRequest::new(
            &self.product_query.pagination,
            &self.product_query.sorting,
            self.product_query.search.clone(),
        );
        let tx = self.events.clone();
        tokio::spawn(async move {
            let (page, error) = source.fetch_or_empty(&request).await;
            let error = error.map(|e| e.user_message());
            let _ = tx.send(AppEvent::ProductsLoaded {
                generation,
                page,
                error,
            });
        });
    }

    fn load_listings(&self) {
        let Some(backend) = &self.backend else { return };

        let client = backend.client.clone();
        let tx = self.events.clone();
        tokio::spawn(async move {
            let firms = client
                .firms()
                .await
                .map(|r| r.into_inner())
                .map_err(|e| e.user_message());
            let _ = tx.send(AppEvent::FirmsLoaded(firms));
        });

        let client = backend.client.clone();
        let tx = self.events.clone();
        tokio::spawn(async move {
            let users = client
                .users()
                .await
                .map(|r| r.into_inner())
                .map_err(|e| e.user_message());
            let _ = tx.send(AppEvent::UsersLoaded(users));
        });
    }

    fn delete_selected_firm(&mut self) {
        if self.deleting {
            return;
        }
        let Some(id) = self.selection.selected_id() else { return };
        let Some(backend) = &self.backend else { return };
        self.deleting = true;

        let client = backend.client.clone();
        let tx = self.events.clone();
        tokio::spawn(async move {
            let result = client.delete_firm(id).await.map_err(|e| e.user_message());
            let _ = tx.send(AppEvent::FirmDeleted { id, result });
        });
    }

    fn submit_form(&mut self) {
        if self.updating {
            return;
        }
        let Some(form) = &mut self.form else { return };
        let update = match form.to_update() {
            Ok(update) => update,
            Err(reason) => {
                form.set_error(reason);
                return;
            }
        };
        let id = form.firm_id;
        let Some(backend) = &self.backend else { return };
        self.updating = true;

        let client = backend.client.clone();
        let tx = self.events.clone();
        tokio::spawn(async move {
            let result = client
                .update_firm(id, &update)
                .await
                .map_err(|e| e.user_message());
            let _ = tx.send(AppEvent::FirmUpdated { id, result });
        });
    }

    fn run_sync(&mut self) {
        if self.syncing {
            return;
        }
        let Some(backend) = &self.backend else { return };
        self.syncing = true;

        let client = backend.client.clone();
        let server_code = backend.session.server_code.clone();
        let tx = self.events.clone();
        tokio::spawn(async move {
            let result = client
                .sync_products(&server_code)
                .await
                .map_err(|e| e.user_message());
            let _ = tx.send(AppEvent::SyncFinished(result));
        });
    }

    fn load_job(&self) {
        let Some(backend) = &self.backend else { return };

        let client = backend.client.clone();
        let server_code = backend.session.server_code.clone();
        let tx = self.events.clone();
        tokio::spawn(async move {
            let job = client.job(&server_code).await.map_err(|e| e.user_message());
            let _ = tx.send(AppEvent::JobLoaded(job));
        });
    }

    fn save_job(&mut self) {
        self.job_save = SaveState::Saving;
        let Some(backend) = &self.backend else { return };

        let client = backend.client.clone();
        let server_code = backend.session.server_code.clone();
        let schedule = self.schedule;
        let tx = self.events.clone();
        tokio::spawn(async move {
            let job = client
                .save_job(&server_code, &schedule)
                .await
                .map_err(|e| e.user_message());
            let _ = tx.send(AppEvent::JobSaved(job));
        });
    }
}

#[cfg(test)]
mod tests {
    use admin_lib::model::JobUnit;
    use chrono::Utc;
    use tokio::sync::mpsc::{UnboundedReceiver, unbounded_channel};

    use super::*;

    fn app() -> (App, UnboundedReceiver<AppEvent>) {
        let (tx, rx) = unbounded_channel();
        (App::new(20, None, tx), rx)
    }

    fn job(frequency: u32, unit: JobUnit) -> Job {
        Job {
            id: 1,
            firm_id: 1,
            frequency,
            unit,
            last_ran_at: None,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    fn firm(id: i64) -> FirmSummary {
        FirmSummary {
            id,
            name: format!("Firma {id}"),
            dia_server_code: "S1".into(),
            dia_firm_code: id,
            created_at: Utc::now(),
            updated_at: None,
        }
    }

    /// Feed queued table callbacks back into the app, like the main loop.
    fn pump(app: &mut App, rx: &mut UnboundedReceiver<AppEvent>) {
        while let Ok(event) = rx.try_recv() {
            app.handle_event(event);
        }
    }

    #[test]
    fn test_sort_resets_product_page() {
        let (mut app, mut rx) = app();
        app.products.set_page(Vec::new(), 57);
        app.handle_command(Command::NextPage);
        pump(&mut app, &mut rx);
        assert_eq!(app.product_query().pagination.page_index, 1);

        app.handle_command(Command::ToggleSort(2));
        pump(&mut app, &mut rx);
        assert_eq!(app.product_query().pagination.page_index, 0);
        assert_eq!(app.product_query().sorting, SortState::ascending("price"));
        assert_eq!(app.products.sorting(), SortState::ascending("price"));
        assert_eq!(app.products.page_input(), "1");
    }

    #[test]
    fn test_unsortable_column_is_ignored() {
        let (mut app, mut rx) = app();
        app.handle_command(Command::ToggleSort(3));
        pump(&mut app, &mut rx);
        assert!(app.product_query().sorting.is_empty());
    }

    #[test]
    fn test_search_event_resets_page() {
        let (mut app, _rx) = app();
        app.handle_event(AppEvent::Paginate(PaginationState::new(20).with_page_index(2)));
        app.handle_event(AppEvent::Search(Some("widget".into())));
        assert_eq!(app.product_query().pagination.page_index, 0);
        assert_eq!(app.product_query().search.as_deref(), Some("widget"));
    }

    #[test]
    fn test_stale_products_response_dropped() {
        let (mut app, _rx) = app();
        app.refresh_products();
        let stale = app.generation;
        app.refresh_products();

        app.handle_event(AppEvent::ProductsLoaded {
            generation: stale,
            page: PageData::new(Vec::new(), 99),
            error: None,
        });
        assert_eq!(app.products.row_count(), 0);

        app.handle_event(AppEvent::ProductsLoaded {
            generation: app.generation,
            page: PageData::new(Vec::new(), 5),
            error: None,
        });
        assert_eq!(app.products.row_count(), 5);
    }

    #[test]
    fn test_failed_fetch_shows_toast_and_empty_table() {
        let (mut app, _rx) = app();
        app.handle_event(AppEvent::ProductsLoaded {
            generation: app.generation,
            page: PageData::empty(),
            error: Some("HTTP 500".into()),
        });
        assert!(app.products.view().is_empty());
        assert_eq!(app.toasts.visible()[0].message, PRODUCTS_ERROR);
    }

    #[test]
    fn test_page_input_commit() {
        let (mut app, mut rx) = app();
        app.products.set_page(Vec::new(), 57);
        app.handle_command(Command::FocusPageInput);
        assert_eq!(app.focus(), Focus::PageInput);
        app.handle_command(Command::PageChar('9'));
        app.handle_command(Command::CommitPage);
        pump(&mut app, &mut rx);
        assert_eq!(app.focus(), Focus::Table);
        assert_eq!(app.product_query().pagination.page_index, 2);
        assert_eq!(app.products.page_input(), "3");
    }

    #[test]
    fn test_delete_flow() {
        let (mut app, _rx) = app();
        app.firms.set_rows((1..=7).map(firm).collect());
        app.handle_command(Command::NextScreen);
        assert_eq!(app.screen, Screen::Firms);

        app.handle_command(Command::CursorDown);
        app.handle_command(Command::Delete);
        assert_eq!(app.focus(), Focus::Confirm);
        assert_eq!(app.selection.selected_id(), Some(2));

        app.handle_command(Command::ConfirmNo);
        assert_eq!(app.focus(), Focus::Table);
        assert!(app.selection.snapshot().is_empty());

        app.handle_command(Command::Delete);
        app.handle_event(AppEvent::FirmDeleted {
            id: 2,
            result: Ok("ok".into()),
        });
        assert_eq!(app.firms.row_count(), 6);
        assert!(app.selection.snapshot().is_empty());
        assert_eq!(app.toasts.visible()[0].message, FIRM_DELETED);
    }

    #[test]
    fn test_edit_form_cancelled_with_escape() {
        let (mut app, _rx) = app();
        app.firms.set_rows((1..=3).map(firm).collect());
        app.handle_command(Command::NextScreen);
        app.handle_command(Command::Edit);
        assert_eq!(app.selection.mutation_mode(), Some(MutationMode::Update));
        assert_eq!(app.focus(), Focus::EditForm);
        assert_eq!(app.form().map(|f| f.firm_id), Some(1));

        app.handle_command(Command::FormCancel);
        assert!(app.selection.snapshot().is_empty());
        assert!(app.form().is_none());
        assert_eq!(app.focus(), Focus::Table);
    }

    #[test]
    fn test_invalid_form_stays_open() {
        let (mut app, _rx) = app();
        app.firms.set_rows((1..=3).map(firm).collect());
        app.handle_command(Command::NextScreen);
        app.handle_command(Command::Edit);
        app.handle_command(Command::FormPrevious);
        app.handle_command(Command::FormChar('x'));
        app.handle_command(Command::FormSubmit);

        let form = app.form().expect("form still open");
        assert_eq!(form.error(), Some(admin_lib::model::PERIOD_CODE_INVALID));
        assert!(!app.is_updating());
        assert_eq!(app.focus(), Focus::EditForm);
    }

    #[test]
    fn test_firm_update_replaces_row() {
        let (mut app, _rx) = app();
        app.firms.set_rows((1..=3).map(firm).collect());
        app.handle_command(Command::NextScreen);
        app.handle_command(Command::CursorDown);
        app.handle_command(Command::Edit);

        let updated = FirmSummary {
            name: "Yeni Ad".into(),
            updated_at: Some(Utc::now()),
            ..firm(2)
        };
        app.handle_event(AppEvent::FirmUpdated {
            id: 2,
            result: Ok(updated.clone()),
        });
        assert_eq!(app.firms.row_count(), 3);
        assert!(app.firms.rows().contains(&updated));
        assert!(app.selection.snapshot().is_empty());
        assert!(app.form().is_none());

        let toast = &app.toasts.visible()[0];
        assert_eq!(toast.message, FIRM_UPDATED);
        assert_eq!(toast.description.as_deref(), Some(FIRM_UPDATED_DETAIL));
    }

    #[test]
    fn test_failed_update_keeps_form() {
        let (mut app, _rx) = app();
        app.firms.set_rows((1..=3).map(firm).collect());
        app.handle_command(Command::NextScreen);
        app.handle_command(Command::Edit);
        app.handle_event(AppEvent::FirmUpdated {
            id: 1,
            result: Err("Firma bulunamadı".into()),
        });
        assert!(app.form().is_some());
        assert_eq!(app.toasts.visible()[0].message, "Firma bulunamadı");
    }

    fn commands_screen() -> (App, UnboundedReceiver<AppEvent>) {
        let (mut app, rx) = app();
        while app.screen != Screen::Commands {
            app.handle_command(Command::NextScreen);
        }
        (app, rx)
    }

    #[test]
    fn test_commands_screen_has_no_table() {
        let (mut app, _rx) = commands_screen();
        assert!(app.table().is_none());
        app.handle_command(Command::NextPage);
        app.handle_command(Command::FocusPageInput);
        app.handle_command(Command::CursorDown);
        assert_eq!(app.focus(), Focus::Table);
        assert_eq!(app.cursor(), 0);
    }

    #[test]
    fn test_schedule_saved_after_quiet_period() {
        let (mut app, _rx) = commands_screen();
        app.handle_command(Command::FrequencyUp);
        app.handle_command(Command::FrequencyUp);
        app.handle_command(Command::CycleUnit);
        assert_eq!(
            app.schedule(),
            JobSchedule {
                frequency: 3,
                unit: JobUnit::Month,
            }
        );
        assert!(app.next_deadline().is_some());

        app.tick(Instant::now());
        assert_eq!(app.job_save(), SaveState::Idle);

        app.tick(Instant::now() + JOB_SAVE_DELAY);
        assert_eq!(app.job_save(), SaveState::Saving);
        assert!(app.next_deadline().is_none());

        app.handle_event(AppEvent::JobSaved(Ok(Some(job(3, JobUnit::Month)))));
        assert_eq!(app.job_save(), SaveState::Saved);
        assert_eq!(app.job_save().label(), "Kaydedildi");
    }

    #[test]
    fn test_frequency_never_below_one() {
        let (mut app, _rx) = commands_screen();
        app.handle_command(Command::FrequencyDown);
        assert_eq!(app.schedule().frequency, 1);
    }

    #[test]
    fn test_schedule_keys_ignored_elsewhere() {
        let (mut app, _rx) = app();
        app.handle_command(Command::FrequencyUp);
        assert_eq!(app.schedule(), JobSchedule::default());
        assert!(app.next_deadline().is_none());
    }

    #[test]
    fn test_loaded_job_sets_schedule() {
        let (mut app, _rx) = commands_screen();
        app.handle_event(AppEvent::JobLoaded(Ok(Some(job(6, JobUnit::Hour)))));
        assert_eq!(app.schedule().frequency, 6);
        assert_eq!(app.schedule().unit, JobUnit::Hour);

        // A pending edit is not overwritten by a reload.
        app.handle_command(Command::FrequencyUp);
        app.handle_event(AppEvent::JobLoaded(Ok(Some(job(2, JobUnit::Day)))));
        assert_eq!(app.schedule().frequency, 7);
        assert_eq!(app.job().map(|j| j.frequency), Some(2));
    }

    #[test]
    fn test_sync_summary_toast() {
        let (mut app, _rx) = commands_screen();
        let counts = SyncCounts {
            inserted_product_rows_count: 1,
            ..SyncCounts::default()
        };
        app.handle_event(AppEvent::SyncFinished(Ok(counts)));
        assert!(!app.is_syncing());
        let toast = &app.toasts.visible()[0];
        assert_eq!(toast.message, SYNC_DONE);
        assert_eq!(toast.description, Some(counts.summary()));
    }

    #[test]
    fn test_listing_page_size() {
        let (mut app, _rx) = app();
        app.firms.set_rows((1..=12).map(firm).collect());
        assert_eq!(app.firms.page_count(), 3);
        assert_eq!(app.firms.visible_rows().len(), 5);
    }
}
