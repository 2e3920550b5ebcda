//! Page state for the entity list pages and the report page.
//!
//! Pages move through `Loading -> Ready | Error` when they mount or the user
//! retries. Mutations never touch that state: a successful create or update
//! replaces the rows via [`PageAction::Refreshed`], a successful delete drops
//! the row locally via [`PageAction::Removed`], and any failure only raises a
//! [`Notification`].

use crate::{CategorySales, DashboardSnapshot, Identified, StockAlert, TopSeller};

/// How long a notification stays on screen
pub const NOTIFICATION_TTL_MS: u32 = 5_000;

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Error(String),
}

impl<T> Default for LoadState<T> {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            LoadState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            LoadState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn from_result(result: Result<T, String>) -> Self {
        match result {
            Ok(data) => LoadState::Ready(data),
            Err(message) => LoadState::Error(message),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn css_class(self) -> &'static str {
        match self {
            NotificationKind::Success => "alert success",
            NotificationKind::Error => "alert error",
            NotificationKind::Warning => "alert warning",
            NotificationKind::Info => "alert info",
        }
    }
}

/// A transient message. Ids let a dismiss timer clear only the message it
/// was started for.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u32,
    pub kind: NotificationKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PageAction<R, A = ()> {
    /// Mount or manual retry
    LoadStarted,
    Loaded(Vec<R>),
    LoadFailed(String),
    /// Rows re-fetched after a mutation
    Refreshed(Vec<R>),
    /// Side data the page needs (e.g. categories for the product table)
    AuxLoaded(A),
    Removed(i64),
    Notify(NotificationKind, String),
    Dismiss(u32),
}

/// State of one entity list page with optional auxiliary data `A`
#[derive(Debug, Clone, PartialEq)]
pub struct ListPage<R, A = ()> {
    pub state: LoadState<Vec<R>>,
    pub aux: A,
    pub notification: Option<Notification>,
    next_notification_id: u32,
}

impl<R, A: Default> Default for ListPage<R, A> {
    fn default() -> Self {
        Self {
            state: LoadState::Loading,
            aux: A::default(),
            notification: None,
            next_notification_id: 1,
        }
    }
}

impl<R: Identified, A> ListPage<R, A> {
    pub fn rows(&self) -> &[R] {
        self.state.data().map(Vec::as_slice).unwrap_or(&[])
    }

    /// Id the next notification will get; lets callers schedule its dismissal
    pub fn next_notification_id(&self) -> u32 {
        self.next_notification_id
    }

    pub fn apply(&mut self, action: PageAction<R, A>) {
        match action {
            PageAction::LoadStarted => self.state = LoadState::Loading,
            PageAction::Loaded(rows) | PageAction::Refreshed(rows) => self.state = LoadState::Ready(rows),
            PageAction::LoadFailed(message) => self.state = LoadState::Error(message),
            PageAction::AuxLoaded(aux) => self.aux = aux,
            PageAction::Removed(id) => {
                if let LoadState::Ready(rows) = &mut self.state {
                    rows.retain(|row| row.id() != id);
                }
            }
            PageAction::Notify(kind, message) => {
                self.notification = Some(Notification {
                    id: self.next_notification_id,
                    kind,
                    message,
                });
                self.next_notification_id = self.next_notification_id.wrapping_add(1);
            }
            PageAction::Dismiss(id) => {
                if self.notification.as_ref().map(|n| n.id) == Some(id) {
                    self.notification = None;
                }
            }
        }
    }
}

pub const SALES_BY_CATEGORY: &str = "Sales by Category";
pub const TOP_SELLING: &str = "Top Selling Products";
pub const LOW_STOCK: &str = "Low Stock Products";

/// The report page: three datasets that load and fail independently.
///
/// A section that already shows data keeps it when a refresh of that
/// section fails; its title is listed in `stale` until the next refresh.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPage {
    pub sales_by_category: LoadState<Vec<CategorySales>>,
    pub top_selling: LoadState<Vec<TopSeller>>,
    pub low_stock: LoadState<Vec<StockAlert>>,
    pub stale: Vec<&'static str>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ReportAction {
    LoadStarted,
    SalesByCategory(Result<Vec<CategorySales>, String>),
    TopSelling(Result<Vec<TopSeller>, String>),
    LowStock(Result<Vec<StockAlert>, String>),
}

fn restart<T>(slot: &mut LoadState<T>) {
    if slot.data().is_none() {
        *slot = LoadState::Loading;
    }
}

fn settle<T>(slot: &mut LoadState<T>, result: Result<T, String>, title: &'static str, stale: &mut Vec<&'static str>) {
    match result {
        Err(_) if slot.data().is_some() => {
            if !stale.contains(&title) {
                stale.push(title);
            }
        }
        result => *slot = LoadState::from_result(result),
    }
}

impl ReportPage {
    pub fn apply(&mut self, action: ReportAction) {
        match action {
            ReportAction::LoadStarted => {
                restart(&mut self.sales_by_category);
                restart(&mut self.top_selling);
                restart(&mut self.low_stock);
                self.stale.clear();
            }
            ReportAction::SalesByCategory(result) => {
                settle(&mut self.sales_by_category, result, SALES_BY_CATEGORY, &mut self.stale)
            }
            ReportAction::TopSelling(result) => settle(&mut self.top_selling, result, TOP_SELLING, &mut self.stale),
            ReportAction::LowStock(result) => settle(&mut self.low_stock, result, LOW_STOCK, &mut self.stale),
        }
    }

    /// Warning for sections still showing data from an earlier load
    pub fn stale_notice(&self) -> Option<String> {
        (!self.stale.is_empty()).then(|| {
            format!(
                "Could not refresh {}. Showing previously loaded data.",
                self.stale.join(", ")
            )
        })
    }

    pub fn is_loading(&self) -> bool {
        self.sales_by_category.is_loading() || self.top_selling.is_loading() || self.low_stock.is_loading()
    }

    /// Page-level error, only when nothing at all could be loaded
    pub fn banner(&self) -> Option<&'static str> {
        let all_failed = self.sales_by_category.error().is_some()
            && self.top_selling.error().is_some()
            && self.low_stock.error().is_some();
        all_failed.then_some("Failed to load report data. Please try again later.")
    }
}

/// Single-resource pages (dashboard, one category) load one payload
#[derive(Debug, Clone, PartialEq)]
pub enum DetailAction<D> {
    LoadStarted,
    Loaded(D),
    LoadFailed(String),
}

impl<D> LoadState<D> {
    pub fn apply(&mut self, action: DetailAction<D>) {
        *self = match action {
            DetailAction::LoadStarted => LoadState::Loading,
            DetailAction::Loaded(data) => LoadState::Ready(data),
            DetailAction::LoadFailed(message) => LoadState::Error(message),
        };
    }
}

/// The dashboard always has a snapshot to render; a failed load shows the
/// error over an empty one
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardPage {
    pub snapshot: DashboardSnapshot,
    pub loading: bool,
    pub error: Option<String>,
}

impl DashboardPage {
    pub fn loading() -> Self {
        Self {
            loading: true,
            ..Self::default()
        }
    }

    pub fn apply(&mut self, action: DetailAction<DashboardSnapshot>) {
        match action {
            DetailAction::LoadStarted => {
                self.loading = true;
                self.error = None;
            }
            DetailAction::Loaded(snapshot) => {
                self.snapshot = snapshot;
                self.loading = false;
                self.error = None;
            }
            DetailAction::LoadFailed(message) => {
                self.snapshot = DashboardSnapshot::default();
                self.loading = false;
                self.error = Some(message);
            }
        }
    }
}
